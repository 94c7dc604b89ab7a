//! Source extraction for annotated Spring controllers and DTO classes.
//!
//! The extractors work directly on source text with bounded lexical heuristics
//! instead of a full Java front end. Every extractor is a stateless function of
//! its input text; the descriptors produced here are plain values with no link
//! back to the text they came from.
//!
//! - [`controller`] assembles a [`ControllerDescriptor`] for a controller class
//! - [`method`] extracts one [`EndpointDescriptor`] from a mapping annotation
//! - [`parameter`] splits and parses handler parameter lists
//! - [`dto`] extracts [`DtoFieldDescriptor`]s from a DTO class body
//!
//! # Example
//!
//! ```
//! use http_from_source::extractor::controller::extract_controller;
//! use http_from_source::extractor::HttpMethod;
//!
//! let source = r#"
//!     @RestController
//!     @RequestMapping("/api/users")
//!     public class UserController {
//!         @GetMapping("/{id}")
//!         public ResponseEntity<User> getUser(@PathVariable Long id) { return null; }
//!     }
//! "#;
//!
//! let controller = extract_controller(source, "UserController.java");
//! assert_eq!(controller.base_path, "/api/users");
//! assert_eq!(controller.methods[0].http_method, HttpMethod::Get);
//! ```

pub mod controller;
pub mod dto;
pub mod method;
pub mod parameter;

use serde::Serialize;
use std::fmt;

/// A parsed controller class and its endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerDescriptor {
    /// Simple class name, or `UnknownController` when no class declaration was found
    pub class_name: String,
    /// Class-level `@RequestMapping` path, empty when absent
    pub base_path: String,
    /// Whether a security annotation sits on the class itself
    pub requires_auth: bool,
    /// Endpoints ordered by the line of their mapping annotation
    pub methods: Vec<EndpointDescriptor>,
    /// Where the source came from (usually a file path)
    pub source_identifier: String,
}

/// One request-handling method of a controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointDescriptor {
    /// Java method name
    pub name: String,
    /// HTTP verb the endpoint answers to
    pub http_method: HttpMethod,
    /// Method-level path, possibly empty, possibly with `{var}` placeholders
    pub path: String,
    /// Parameters in declaration order
    pub parameters: Vec<ParameterDescriptor>,
    /// Class-level auth OR a method-level security annotation
    pub requires_auth: bool,
    /// 1-based line of the mapping annotation
    pub line_number: usize,
}

/// HTTP verbs recognised on mapping annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

/// A single handler method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    /// Parameter name
    pub name: String,
    /// Declared type, generic arguments included
    #[serde(rename = "type")]
    pub param_type: String,
    /// Binding annotation, if any
    pub annotation: Option<ParamAnnotation>,
    /// `required = true` was given, or the parameter is a request body
    pub required: bool,
    /// `defaultValue = "..."` from the binding annotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// Spring parameter binding annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParamAnnotation {
    RequestBody,
    PathVariable,
    RequestParam,
    RequestHeader,
}

/// A parsed data-transfer object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DtoDescriptor {
    pub class_name: String,
    /// Fields in declaration order
    pub fields: Vec<DtoFieldDescriptor>,
}

/// A single DTO field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DtoFieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    /// Marked with `@NotNull`, `@NotEmpty` or `@NotBlank`
    pub required: bool,
    /// `@Schema(description = "...")`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `@Schema(example = ...)`, kept as raw text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_value: Option<String>,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Parses an upper-case verb keyword such as `POST`.
    pub fn from_keyword(keyword: &str) -> Option<HttpMethod> {
        Self::ALL.into_iter().find(|m| m.as_str() == keyword)
    }

    /// Whether requests with this verb conventionally carry a body.
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ParamAnnotation {
    /// Markers in detection priority order.
    pub const PRIORITY: [ParamAnnotation; 4] = [
        ParamAnnotation::RequestBody,
        ParamAnnotation::PathVariable,
        ParamAnnotation::RequestParam,
        ParamAnnotation::RequestHeader,
    ];

    /// The annotation as written in source, including the `@`.
    pub fn marker(&self) -> &'static str {
        match self {
            ParamAnnotation::RequestBody => "@RequestBody",
            ParamAnnotation::PathVariable => "@PathVariable",
            ParamAnnotation::RequestParam => "@RequestParam",
            ParamAnnotation::RequestHeader => "@RequestHeader",
        }
    }
}

/// Maximum distance, in lines, between a requested line and an endpoint's
/// annotation for [`ControllerDescriptor::endpoint_near_line`].
pub const LINE_MATCH_TOLERANCE: usize = 20;

impl ControllerDescriptor {
    /// Finds an endpoint by Java method name.
    pub fn endpoint_named(&self, name: &str) -> Option<&EndpointDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Finds the first endpoint whose annotation line is within
    /// [`LINE_MATCH_TOLERANCE`] lines of `line`.
    pub fn endpoint_near_line(&self, line: usize) -> Option<&EndpointDescriptor> {
        self.methods
            .iter()
            .find(|m| m.line_number.abs_diff(line) < LINE_MATCH_TOLERANCE)
    }
}

impl EndpointDescriptor {
    /// The `@RequestBody` parameter, if the handler declares one.
    pub fn body_parameter(&self) -> Option<&ParameterDescriptor> {
        self.parameters
            .iter()
            .find(|p| p.annotation == Some(ParamAnnotation::RequestBody))
    }

    /// Parameters bound with `@RequestParam`, in declaration order.
    pub fn query_parameters(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters
            .iter()
            .filter(|p| p.annotation == Some(ParamAnnotation::RequestParam))
    }
}

/// Whether `text` looks like a Spring controller source file.
pub fn is_controller_source(text: &str) -> bool {
    text.contains("@RestController") || text.contains("@Controller")
}
