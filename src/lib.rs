//! HTTP From Source - request documents from annotated Spring controllers.
//!
//! This library reads Java source text, finds Spring MVC controllers and their
//! mapping annotations, and renders ready-to-send `.http` request documents:
//! one request per endpoint, with resolved URLs, `{{var}}` placeholders, query
//! strings, auth and content-type headers, and example JSON bodies built from
//! the request DTO's fields.
//!
//! Extraction is lexical. No Java compiler or parser is involved; a bounded set
//! of pattern rules covers the common shapes of annotated controllers and DTOs.
//!
//! # Architecture
//!
//! 1. [`normalizer`] - strips block comments, maps offsets to lines
//! 2. [`extractor`] - controllers, endpoints, parameters and DTO fields
//! 3. [`type_mapper`] - default example values for Java types
//! 4. [`path_resolver`] - URL assembly, placeholders and query strings
//! 5. [`example_generator`] - example JSON payloads from DTOs
//! 6. [`request_builder`] - `.http` document rendering
//! 7. [`workspace`] / [`scanner`] - source lookup and document output
//! 8. [`serializer`] - JSON / YAML rendering and file writing
//! 9. [`diagnostics`] - environment and parse report
//!
//! # Example Usage
//!
//! ```no_run
//! use http_from_source::{generate_document, parse_controller};
//! use http_from_source::request_builder::GenerationConfig;
//! use http_from_source::workspace::{FsWorkspace, Workspace};
//! use std::path::Path;
//!
//! let workspace = FsWorkspace::new("./my-service").unwrap();
//! let path = Path::new("./my-service/src/main/java/com/example/UserController.java");
//! let source = workspace.read_source(path).unwrap();
//!
//! let controller = parse_controller(&source, "UserController.java");
//! let document = generate_document(&controller, &GenerationConfig::default(), &workspace);
//! println!("{}", document);
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete CLI application.

pub mod cli;
pub mod diagnostics;
pub mod error;
pub mod example_generator;
pub mod extractor;
pub mod normalizer;
pub mod path_resolver;
pub mod request_builder;
pub mod scanner;
pub mod serializer;
pub mod type_mapper;
pub mod workspace;

use example_generator::ExampleGenerator;
use extractor::{ControllerDescriptor, DtoDescriptor, EndpointDescriptor};
use request_builder::{GenerationConfig, RequestBuilder};
use workspace::Workspace;

/// Parses a controller source into its descriptor.
///
/// Never fails: a missing class declaration yields `UnknownController`, and
/// annotations without a following method are left out.
pub fn parse_controller(text: &str, source_identifier: &str) -> ControllerDescriptor {
    extractor::controller::extract_controller(text, source_identifier)
}

/// Parses a DTO source into its field list.
pub fn parse_dto(text: &str, class_name: &str) -> DtoDescriptor {
    extractor::dto::extract_dto(text, class_name)
}

/// Renders the request document for every endpoint of `controller`.
///
/// Request-body DTOs are looked up through `workspace`; a DTO that cannot be
/// found or read is rendered as `{}`.
pub fn generate_document(
    controller: &ControllerDescriptor,
    config: &GenerationConfig,
    workspace: &dyn Workspace,
) -> String {
    RequestBuilder::new(config, ExampleGenerator::new(workspace)).generate_document(controller)
}

/// Renders a document holding only `endpoint`'s request.
pub fn generate_single_endpoint_document(
    controller: &ControllerDescriptor,
    endpoint: &EndpointDescriptor,
    config: &GenerationConfig,
    workspace: &dyn Workspace,
) -> String {
    RequestBuilder::new(config, ExampleGenerator::new(workspace))
        .generate_single_endpoint_document(controller, endpoint)
}
