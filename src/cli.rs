use crate::diagnostics;
use crate::example_generator::ExampleGenerator;
use crate::extractor::controller::extract_controller;
use crate::extractor::{ControllerDescriptor, EndpointDescriptor, LINE_MATCH_TOLERANCE};
use crate::request_builder::{
    GenerationConfig, RequestBuilder, DEFAULT_BASE_URL, DEFAULT_OUTPUT_DIRECTORY,
};
use crate::serializer::{serialize_json, serialize_yaml};
use crate::workspace::{document_file_name, FsWorkspace, Workspace};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

/// HTTP From Source - Generate .http request files from Spring Boot controllers
#[derive(Parser, Debug)]
#[command(name = "http-from-source")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the Java project directory
    #[arg(value_name = "PROJECT_PATH")]
    pub project_path: PathBuf,

    /// Only process this controller file (absolute or relative to the project path)
    #[arg(short = 'c', long = "controller", value_name = "FILE")]
    pub controller: Option<PathBuf>,

    /// Print a single endpoint's request, selected by method name
    #[arg(short = 'e', long = "endpoint", value_name = "NAME", requires = "controller")]
    pub endpoint: Option<String>,

    /// Print a single endpoint's request, selected by a line near its mapping annotation
    #[arg(
        short = 'l',
        long = "line",
        value_name = "N",
        requires = "controller",
        conflicts_with = "endpoint"
    )]
    pub line: Option<usize>,

    /// Output format (http, json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "http")]
    pub output_format: OutputFormat,

    /// Print documents to stdout instead of writing files
    #[arg(long = "stdout")]
    pub stdout: bool,

    /// Base URL prepended to every request path
    #[arg(long = "base-url", value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Do not emit Authorization headers
    #[arg(long = "no-auth-header")]
    pub no_auth_header: bool,

    /// Output directory for .http files, relative to the project path
    #[arg(short = 'o', long = "output-dir", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIRECTORY)]
    pub output_dir: String,

    /// Print a diagnostic report and exit
    #[arg(long = "diagnostics")]
    pub diagnostics: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// HTTP request documents
    Http,
    /// Parsed controller descriptors as JSON
    Json,
    /// Parsed controller descriptors as YAML
    Yaml,
}

impl CliArgs {
    /// Generation settings derived from the command-line flags.
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            base_url: self.base_url.clone(),
            include_auth_header: !self.no_auth_header,
            output_directory: self.output_dir.clone(),
        }
    }

    fn single_endpoint_requested(&self) -> bool {
        self.endpoint.is_some() || self.line.is_some()
    }
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.project_path.exists() {
        anyhow::bail!(
            "Project path does not exist: {}",
            args.project_path.display()
        );
    }

    if !args.project_path.is_dir() {
        anyhow::bail!(
            "Project path is not a directory: {}",
            args.project_path.display()
        );
    }

    if args.single_endpoint_requested() && args.output_format != OutputFormat::Http {
        anyhow::bail!("--endpoint and --line only apply to the http format");
    }

    info!("Project path: {}", args.project_path.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref controller) = args.controller {
        info!("Controller: {}", controller.display());
    } else {
        info!("Controller: all");
    }
    if args.stdout || args.single_endpoint_requested() {
        info!("Output: stdout");
    } else {
        info!("Output directory: {}", args.output_dir);
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    let workspace = FsWorkspace::new(&args.project_path)
        .with_context(|| format!("Failed to open project {}", args.project_path.display()))?;
    let config = args.generation_config();

    if args.diagnostics {
        let report = diagnostics::collect(&workspace, &config);
        println!("{}", report);
        return Ok(());
    }

    // Step 1: Find controller files
    let controller_files = match &args.controller {
        Some(file) => vec![resolve_controller_path(&workspace, file)],
        None => {
            info!("Scanning for controllers...");
            workspace.scanner().find_controller_files()
        }
    };
    info!("Found {} controller files", controller_files.len());

    if controller_files.is_empty() {
        warn!("No Spring Boot controllers found in {}", workspace.root().display());
        return Ok(());
    }

    // Step 2: Parse controllers; an unreadable file only skips itself
    let mut controllers = Vec::new();
    let mut failures = 0usize;
    for path in &controller_files {
        match load_controller(&workspace, path) {
            Ok(controller) => controllers.push(controller),
            Err(e) => {
                error!("{:#}", e);
                failures += 1;
            }
        }
    }

    if args.controller.is_some() && controllers.is_empty() {
        anyhow::bail!("Controller could not be read");
    }

    // Step 3: Render
    match args.output_format {
        OutputFormat::Json => println!("{}", serialize_json(&controllers)?),
        OutputFormat::Yaml => println!("{}", serialize_yaml(&controllers)?),
        OutputFormat::Http if args.single_endpoint_requested() => {
            let controller = controllers
                .first()
                .context("No controller available for endpoint selection")?;
            let endpoint = select_endpoint(controller, &args)?;
            let builder = RequestBuilder::new(&config, ExampleGenerator::new(&workspace));
            println!(
                "{}",
                builder.generate_single_endpoint_document(controller, endpoint)
            );
            info!("Generated HTTP request for {}", endpoint.name);
        }
        OutputFormat::Http => {
            failures += write_documents(&workspace, &config, &controllers, args.stdout);
        }
    }

    // Step 4: Summary
    info!("Generation complete!");
    info!("Summary:");
    info!("  - Controller files: {}", controller_files.len());
    info!(
        "  - Endpoints found: {}",
        controllers.iter().map(|c| c.methods.len()).sum::<usize>()
    );
    info!("  - Failures: {}", failures);

    Ok(())
}

fn resolve_controller_path(workspace: &FsWorkspace, file: &Path) -> PathBuf {
    if file.is_absolute() || file.exists() {
        file.to_path_buf()
    } else {
        workspace.root().join(file)
    }
}

fn load_controller(workspace: &FsWorkspace, path: &Path) -> Result<ControllerDescriptor> {
    let content = workspace
        .read_source(path)
        .with_context(|| format!("Failed to read controller {}", path.display()))?;
    let source_identifier = workspace.relative_path(path);
    Ok(extract_controller(
        &content,
        &source_identifier.to_string_lossy(),
    ))
}

fn select_endpoint<'c>(
    controller: &'c ControllerDescriptor,
    args: &CliArgs,
) -> Result<&'c EndpointDescriptor> {
    if let Some(name) = &args.endpoint {
        return controller.endpoint_named(name).with_context(|| {
            format!("No endpoint named {} in {}", name, controller.class_name)
        });
    }

    let line = args.line.unwrap_or_default();
    controller.endpoint_near_line(line).with_context(|| {
        format!(
            "No endpoint within {} lines of line {} in {}",
            LINE_MATCH_TOLERANCE, line, controller.class_name
        )
    })
}

/// Writes (or prints) one document per controller and returns the number of failures.
fn write_documents(
    workspace: &FsWorkspace,
    config: &GenerationConfig,
    controllers: &[ControllerDescriptor],
    to_stdout: bool,
) -> usize {
    let builder = RequestBuilder::new(config, ExampleGenerator::new(workspace));
    let output_dir = workspace.output_directory(&config.output_directory);
    let mut failures = 0;

    for controller in controllers {
        if controller.methods.is_empty() {
            warn!(
                "No endpoints found in {}, skipping",
                controller.source_identifier
            );
            continue;
        }

        let document = builder.generate_document(controller);
        if to_stdout {
            println!("{}", document);
            continue;
        }

        let path = output_dir.join(document_file_name(&controller.class_name));
        match workspace.write_document(&path, &document) {
            Ok(()) => info!(
                "Generated {} with {} requests",
                workspace.relative_path(&path).display(),
                controller.methods.len()
            ),
            Err(e) => {
                error!("Failed to write {}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    failures
}
