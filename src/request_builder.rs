//! Rendering of `.http` request documents from parsed controllers.
//!
//! A document starts with a `### ClassName` header and a `# Generated from:`
//! comment, followed by one request block per endpoint. Blocks are separated
//! by `###` lines:
//!
//! ```text
//! ### UserController
//! # Generated from: src/main/java/com/example/UserController.java
//!
//! # getUser
//! GET http://localhost:8080/api/users/{{id}}
//!
//! ###
//! ```

use crate::example_generator::ExampleGenerator;
use crate::extractor::{ControllerDescriptor, EndpointDescriptor};
use crate::path_resolver::complete_endpoint;
use crate::serializer::serialize_json;
use log::{debug, warn};
use serde::Serialize;
use std::time::Instant;

/// Default target for generated requests.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default output directory, relative to the project root.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "http-requests";

/// Header line added to endpoints that require authentication.
pub const AUTHORIZATION_HEADER: &str = "Authorization: Bearer {{token}}";

/// Header line added to requests that carry a JSON body.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type: application/json";

/// Separator between request blocks.
pub const REQUEST_SEPARATOR: &str = "###";

/// Settings for document generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationConfig {
    /// Scheme, host and port prepended to every request path
    pub base_url: String,
    /// Emit an `Authorization` header for endpoints that require auth
    pub include_auth_header: bool,
    /// Where documents are written
    pub output_directory: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            include_auth_header: true,
            output_directory: DEFAULT_OUTPUT_DIRECTORY.to_string(),
        }
    }
}

/// Builds request documents for one generation run.
pub struct RequestBuilder<'a> {
    config: &'a GenerationConfig,
    examples: ExampleGenerator<'a>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(config: &'a GenerationConfig, examples: ExampleGenerator<'a>) -> Self {
        Self { config, examples }
    }

    /// Renders the document for every endpoint of `controller`.
    pub fn generate_document(&self, controller: &ControllerDescriptor) -> String {
        let start = Instant::now();
        let mut sections = vec![
            format!("{} {}", REQUEST_SEPARATOR, controller.class_name),
            format!("# Generated from: {}", controller.source_identifier),
            String::new(),
        ];

        for endpoint in &controller.methods {
            sections.push(self.generate_request(controller, endpoint));
            sections.push(String::new());
            sections.push(REQUEST_SEPARATOR.to_string());
            sections.push(String::new());
        }

        debug!(
            "Generated document for {} ({} requests) in {:?}",
            controller.class_name,
            controller.methods.len(),
            start.elapsed()
        );
        sections.join("\n")
    }

    /// Renders a document holding a single endpoint's request.
    pub fn generate_single_endpoint_document(
        &self,
        controller: &ControllerDescriptor,
        endpoint: &EndpointDescriptor,
    ) -> String {
        [
            format!(
                "{} {}.{}",
                REQUEST_SEPARATOR, controller.class_name, endpoint.name
            ),
            String::new(),
            self.generate_request(controller, endpoint),
        ]
        .join("\n")
    }

    /// Renders one request block: name comment, request line, headers and an
    /// optional example body.
    pub fn generate_request(
        &self,
        controller: &ControllerDescriptor,
        endpoint: &EndpointDescriptor,
    ) -> String {
        let mut lines = vec![
            format!("# {}", endpoint.name),
            format!(
                "{} {}",
                endpoint.http_method,
                complete_endpoint(&self.config.base_url, controller, endpoint)
            ),
        ];

        if self.config.include_auth_header && endpoint.requires_auth {
            lines.push(AUTHORIZATION_HEADER.to_string());
        }

        let body = endpoint.body_parameter();
        if endpoint.http_method.carries_body() && body.is_some() {
            lines.push(CONTENT_TYPE_HEADER.to_string());
        }

        if let Some(body) = body {
            lines.push(String::new());
            lines.push(self.body_json(&body.param_type));
        }

        lines.join("\n")
    }

    fn body_json(&self, body_type: &str) -> String {
        let example = self.examples.body_example(body_type);
        match serialize_json(&example) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to render request body for {}: {}", body_type, e);
                "{}".to_string()
            }
        }
    }
}
