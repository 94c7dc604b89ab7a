//! Environment and parse diagnostics for a project.

use crate::extractor::controller::extract_controller;
use crate::request_builder::GenerationConfig;
use crate::workspace::{FsWorkspace, Workspace};
use log::debug;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Snapshot of what a generation run would see.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub project_root: PathBuf,
    pub java_files: usize,
    /// Controller files in path order
    pub controllers: Vec<ControllerDiagnostic>,
    pub scan_warnings: Vec<String>,
    pub output_directory: PathBuf,
    pub output_directory_exists: bool,
}

/// Parse outcome for one controller file.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerDiagnostic {
    /// Path relative to the project root
    pub path: PathBuf,
    pub content_length: usize,
    pub has_rest_controller: bool,
    pub has_controller: bool,
    pub class_name: Option<String>,
    pub methods_found: usize,
    /// Read failure, if the file could not be loaded
    pub error: Option<String>,
}

/// Scans the workspace and parses every controller file without writing anything.
pub fn collect(workspace: &FsWorkspace, config: &GenerationConfig) -> DiagnosticReport {
    let scan = workspace.scanner().scan();
    let controllers = workspace
        .scanner()
        .find_controller_files()
        .into_iter()
        .map(|path| diagnose_controller(workspace, path))
        .collect();

    let output_directory = workspace.output_directory(&config.output_directory);
    let output_directory_exists = output_directory.is_dir();

    DiagnosticReport {
        project_root: workspace.root().to_path_buf(),
        java_files: scan.java_files.len(),
        controllers,
        scan_warnings: scan.warnings,
        output_directory,
        output_directory_exists,
    }
}

fn diagnose_controller(workspace: &FsWorkspace, path: PathBuf) -> ControllerDiagnostic {
    let relative = workspace.relative_path(&path);
    debug!("Diagnosing {}", relative.display());

    match workspace.read_source(&path) {
        Ok(content) => {
            let controller = extract_controller(&content, &relative.to_string_lossy());
            ControllerDiagnostic {
                path: relative,
                content_length: content.len(),
                has_rest_controller: content.contains("@RestController"),
                has_controller: content.contains("@Controller"),
                class_name: Some(controller.class_name),
                methods_found: controller.methods.len(),
                error: None,
            }
        }
        Err(e) => ControllerDiagnostic {
            path: relative,
            content_length: 0,
            has_rest_controller: false,
            has_controller: false,
            class_name: None,
            methods_found: 0,
            error: Some(e.to_string()),
        },
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "--- Spring HTTP Generator Diagnostics ---")?;
        writeln!(f, "Project Root: {}", self.project_root.display())?;
        writeln!(f, "Java Files: {}", self.java_files)?;
        for warning in &self.scan_warnings {
            writeln!(f, "  Warning: {}", warning)?;
        }

        writeln!(f, "Controller Files: {}", self.controllers.len())?;
        for controller in &self.controllers {
            writeln!(f, "  {}", controller.path.display())?;
            if let Some(error) = &controller.error {
                writeln!(f, "    Read Error: {}", error)?;
                continue;
            }
            writeln!(f, "    Content Length: {}", controller.content_length)?;
            writeln!(f, "    Has @RestController: {}", controller.has_rest_controller)?;
            writeln!(f, "    Has @Controller: {}", controller.has_controller)?;
            if let Some(class_name) = &controller.class_name {
                writeln!(f, "    Parsed Controller: {}", class_name)?;
            }
            writeln!(f, "    Methods Found: {}", controller.methods_found)?;
        }

        writeln!(f, "Target Output Directory: {}", self.output_directory.display())?;
        if self.output_directory_exists {
            write!(f, "  Output Directory exists: Yes")
        } else {
            write!(f, "  Output Directory exists: No (will be created)")
        }
    }
}
