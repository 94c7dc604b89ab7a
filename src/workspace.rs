//! Access to the project on disk: reading sources, locating DTO classes and
//! writing generated documents.
//!
//! The extraction and generation code only depends on the [`Workspace`] trait,
//! so it can run against the file system ([`FsWorkspace`]) or any other store.

use crate::error::{Error, Result};
use crate::scanner::FileScanner;
use crate::serializer::write_to_file;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of generated request documents.
pub const DOCUMENT_EXTENSION: &str = "http";

/// The I/O collaborators the generator relies on.
pub trait Workspace {
    /// Reads a source file.
    fn read_source(&self, path: &Path) -> Result<String>;

    /// Finds the source file declaring `type_name`, if any.
    ///
    /// When several files match, the first one is returned.
    fn locate_dto_source(&self, type_name: &str) -> Result<Option<PathBuf>>;

    /// Writes a generated document, creating missing directories.
    fn write_document(&self, path: &Path, content: &str) -> Result<()>;
}

/// [`Workspace`] backed by a project directory.
pub struct FsWorkspace {
    scanner: FileScanner,
}

impl FsWorkspace {
    /// Opens a workspace rooted at `root`, which must be an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::InvalidArgument(format!(
                "Project path is not a directory: {}",
                root.display()
            )));
        }
        Ok(Self {
            scanner: FileScanner::new(root),
        })
    }

    pub fn root(&self) -> &Path {
        self.scanner.root_path()
    }

    pub fn scanner(&self) -> &FileScanner {
        &self.scanner
    }

    /// `path` relative to the workspace root when it lies inside it.
    pub fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(self.root())
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }

    /// Output directory for generated documents; relative directories are
    /// resolved against the workspace root.
    pub fn output_directory(&self, configured: &str) -> PathBuf {
        let configured = Path::new(configured);
        if configured.is_absolute() {
            configured.to_path_buf()
        } else {
            self.root().join(configured)
        }
    }
}

impl Workspace for FsWorkspace {
    fn read_source(&self, path: &Path) -> Result<String> {
        debug!("Reading source: {}", path.display());
        fs::read_to_string(path).map_err(|e| Error::io(path, e))
    }

    fn locate_dto_source(&self, type_name: &str) -> Result<Option<PathBuf>> {
        let mut matches = self.scanner.find_class_files(type_name);
        match matches.len() {
            0 => {
                warn!("DTO file not found: {}", type_name);
                Ok(None)
            }
            1 => Ok(matches.pop()),
            n => {
                warn!(
                    "Found {} files for DTO {}, using {}",
                    n,
                    type_name,
                    matches[0].display()
                );
                Ok(Some(matches.swap_remove(0)))
            }
        }
    }

    fn write_document(&self, path: &Path, content: &str) -> Result<()> {
        write_to_file(content, path)
    }
}

/// File name of the request document generated for a controller class.
pub fn document_file_name(class_name: &str) -> String {
    format!("{}.{}", class_name, DOCUMENT_EXTENSION)
}
