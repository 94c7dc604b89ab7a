//! Example JSON payloads for request bodies, built from DTO field lists.

use crate::error::Result;
use crate::extractor::dto::extract_dto;
use crate::extractor::DtoDescriptor;
use crate::serializer::serialize_json;
use crate::type_mapper::{base_type, example_for, is_standard_type};
use crate::workspace::Workspace;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static LEADING_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[0-9]+").expect("leading integer pattern"));

/// Example payload generator - turns request body types into example JSON
pub struct ExampleGenerator<'a> {
    /// Where DTO sources are looked up
    workspace: &'a dyn Workspace,
}

impl<'a> ExampleGenerator<'a> {
    pub fn new(workspace: &'a dyn Workspace) -> Self {
        Self { workspace }
    }

    /// Example value for a `@RequestBody` parameter type.
    ///
    /// Standard types are mapped directly. Anything else is treated as a DTO
    /// class: its source is located, parsed and turned into an example object.
    /// A DTO that cannot be found, read or parsed yields `{}` and a warning.
    pub fn body_example(&self, body_type: &str) -> Value {
        if is_standard_type(body_type) {
            debug!("Body type {} is a standard type", body_type);
            return example_for(body_type);
        }

        let class_name = base_type(body_type);
        match self.lookup_dto(class_name) {
            Ok(Some(dto)) => {
                info!("DTO {} parsed successfully", class_name);
                generate_example(&dto)
            }
            Ok(None) => {
                warn!("DTO file not found for type: {}, using empty object", body_type);
                Value::Object(Map::new())
            }
            Err(e) => {
                warn!("Failed to generate request body for {}: {}", body_type, e);
                Value::Object(Map::new())
            }
        }
    }

    fn lookup_dto(&self, class_name: &str) -> Result<Option<DtoDescriptor>> {
        info!("Searching for DTO: {}", class_name);
        let Some(path) = self.workspace.locate_dto_source(class_name)? else {
            return Ok(None);
        };

        debug!("DTO file found: {}. Parsing...", path.display());
        let content = self.workspace.read_source(&path)?;
        Ok(Some(extract_dto(&content, class_name)))
    }
}

/// Builds an example object keyed by field name, in declaration order.
///
/// An explicit `@Schema` example, coerced to the field's type, takes precedence
/// over the type's default example.
pub fn generate_example(dto: &DtoDescriptor) -> Value {
    let object: Map<String, Value> = dto
        .fields
        .iter()
        .map(|field| {
            let value = match &field.example_value {
                Some(raw) => coerce_example(raw, &field.field_type),
                None => example_for(&field.field_type),
            };
            (field.name.clone(), value)
        })
        .collect();
    Value::Object(object)
}

/// [`generate_example`] rendered as two-space indented JSON.
pub fn generate_example_json(dto: &DtoDescriptor) -> Result<String> {
    serialize_json(&generate_example(dto))
}

/// Converts a raw example string to a JSON value matching the declared type.
///
/// Integral types read the leading integer (`"9.99"` gives `9`, `"12abc"` gives
/// `12`) and fall back to `0` when there is none. Decimal types fall back to
/// `0.0` when the text does not parse; booleans are `true` only for the literal
/// `true`.
pub fn coerce_example(raw: &str, declared_type: &str) -> Value {
    let raw = raw.trim();
    match base_type(declared_type) {
        "int" | "Integer" | "long" | "Long" | "short" | "Short" | "byte" | "Byte"
        | "BigInteger" => Value::from(leading_integer(raw).unwrap_or(0)),
        "double" | "Double" | "float" | "Float" | "BigDecimal" => {
            Value::from(raw.parse::<f64>().unwrap_or(0.0))
        }
        "boolean" | "Boolean" => Value::Bool(raw == "true"),
        _ => Value::String(raw.to_string()),
    }
}

fn leading_integer(raw: &str) -> Option<i64> {
    LEADING_INTEGER.find(raw)?.as_str().parse().ok()
}
