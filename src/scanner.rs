use crate::extractor::is_controller_source;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into.
const SKIPPED_DIRS: [&str; 3] = ["target", "build", "node_modules"];

/// File scanner for traversing Java project directories.
///
/// The `FileScanner` recursively walks a project directory to find Java source files.
/// It skips build output (`target`, `build`), `node_modules` and hidden directories
/// (those starting with `.`).
///
/// # Example
///
/// ```no_run
/// use http_from_source::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let scanner = FileScanner::new(PathBuf::from("./my-service"));
/// let result = scanner.scan();
/// println!("Found {} Java files", result.java_files.len());
/// ```
pub struct FileScanner {
    root_path: PathBuf,
}

/// Result of directory scanning operation.
///
/// Contains the list of discovered Java files and any warnings encountered during scanning.
pub struct ScanResult {
    /// List of paths to all discovered `.java` files
    pub java_files: Vec<PathBuf>,
    /// Warning messages for any issues encountered (e.g., inaccessible directories)
    pub warnings: Vec<String>,
}

impl FileScanner {
    /// Creates a new `FileScanner` for the specified root directory.
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Scans the directory tree and collects all `.java` files, sorted by path.
    ///
    /// Inaccessible entries are logged and recorded as warnings; scanning continues.
    pub fn scan(&self) -> ScanResult {
        let mut java_files = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(&self.root_path)
            .into_iter()
            .filter_entry(|e| self.should_descend(e))
        {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("java") {
                        java_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        java_files.sort();
        debug!(
            "Scanned {}: {} Java files",
            self.root_path.display(),
            java_files.len()
        );

        ScanResult {
            java_files,
            warnings,
        }
    }

    /// Java files whose content marks them as Spring controllers.
    ///
    /// Files that cannot be read are skipped with a warning.
    pub fn find_controller_files(&self) -> Vec<PathBuf> {
        let controllers: Vec<PathBuf> = self
            .scan()
            .java_files
            .into_iter()
            .filter(|path| match fs::read_to_string(path) {
                Ok(content) => is_controller_source(&content),
                Err(e) => {
                    warn!("Skipping unreadable file {}: {}", path.display(), e);
                    false
                }
            })
            .collect();

        debug!("Found {} controller files", controllers.len());
        controllers
    }

    /// All Java files named exactly `<class_name>.java`, sorted by path.
    pub fn find_class_files(&self, class_name: &str) -> Vec<PathBuf> {
        let file_name = format!("{}.java", class_name);
        self.scan()
            .java_files
            .into_iter()
            .filter(|path| path.file_name().and_then(|n| n.to_str()) == Some(file_name.as_str()))
            .collect()
    }

    fn should_descend(&self, entry: &DirEntry) -> bool {
        // Don't filter the root directory itself
        if entry.path() == self.root_path {
            return true;
        }
        if !entry.file_type().is_dir() {
            return true;
        }
        let file_name = entry.file_name().to_string_lossy();
        !file_name.starts_with('.') && !SKIPPED_DIRS.contains(&&*file_name)
    }
}
