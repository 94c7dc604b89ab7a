//! Example values for declared Java types.

use serde_json::{json, Map, Value};

/// Collection types rendered as a single-element array.
const COLLECTION_TYPES: [&str; 6] = ["List", "Set", "Collection", "ArrayList", "HashSet", "LinkedList"];

/// Map types rendered as an empty object.
const MAP_TYPES: [&str; 4] = ["Map", "HashMap", "LinkedHashMap", "TreeMap"];

/// Nil UUID used as the example for `UUID` fields.
pub const NIL_UUID: &str = "00000000-0000-0000-0000-000000000000";

/// Element type assumed for raw collections such as a bare `List`.
const DEFAULT_ELEMENT_TYPE: &str = "String";

/// Example value for a scalar, date/time or identifier type.
fn scalar_example(base_type: &str) -> Option<Value> {
    let value = match base_type {
        "int" | "Integer" | "long" | "Long" | "short" | "Short" | "byte" | "Byte"
        | "BigInteger" => json!(0),
        "double" | "Double" | "float" | "Float" | "BigDecimal" => json!(0.0),
        "boolean" | "Boolean" => json!(false),
        "char" | "Character" | "String" => json!(""),
        "LocalDate" => json!("2025-01-01"),
        "LocalDateTime" | "Date" => json!("2025-01-01T00:00:00"),
        "LocalTime" => json!("00:00:00"),
        "Instant" | "ZonedDateTime" => json!("2025-01-01T00:00:00Z"),
        "OffsetDateTime" => json!("2025-01-01T00:00:00+00:00"),
        "UUID" => json!(NIL_UUID),
        _ => return None,
    };
    Some(value)
}

/// Returns a representative JSON value for a declared type.
///
/// Collections recurse on their element type, maps and unknown types become
/// `{}`. Recursion ends at the first type that is neither a collection nor an
/// array, so it always terminates.
///
/// # Example
///
/// ```
/// use http_from_source::type_mapper::example_for;
/// use serde_json::json;
///
/// assert_eq!(example_for("List<Integer>"), json!([0]));
/// assert_eq!(example_for("Map<String,String>"), json!({}));
/// ```
pub fn example_for(declared_type: &str) -> Value {
    let declared_type = declared_type.trim();

    if let Some(element) = declared_type.strip_suffix("[]") {
        return Value::Array(vec![example_for(element)]);
    }

    let base = base_type(declared_type);

    if COLLECTION_TYPES.contains(&base) {
        let element = generic_argument(declared_type).unwrap_or(DEFAULT_ELEMENT_TYPE);
        return Value::Array(vec![example_for(element)]);
    }

    if MAP_TYPES.contains(&base) {
        return Value::Object(Map::new());
    }

    scalar_example(base).unwrap_or_else(|| Value::Object(Map::new()))
}

/// Whether the type resolves through the scalar table, a collection or a map,
/// as opposed to falling back to the empty-object default.
pub fn is_standard_type(declared_type: &str) -> bool {
    let declared_type = declared_type.trim();
    if let Some(element) = declared_type.strip_suffix("[]") {
        return is_standard_type(element);
    }

    let base = base_type(declared_type);
    COLLECTION_TYPES.contains(&base) || MAP_TYPES.contains(&base) || scalar_example(base).is_some()
}

/// The simple type name with generic arguments and package qualifier removed:
/// `java.util.List<String>` becomes `List`.
pub fn base_type(declared_type: &str) -> &str {
    let without_generics = declared_type
        .split('<')
        .next()
        .unwrap_or(declared_type)
        .trim();
    without_generics
        .rsplit('.')
        .next()
        .unwrap_or(without_generics)
}

/// Everything between the first `<` and the last `>`, if present.
fn generic_argument(declared_type: &str) -> Option<&str> {
    let open = declared_type.find('<')?;
    let close = declared_type.rfind('>')?;
    let inner = declared_type.get(open + 1..close)?.trim();
    (!inner.is_empty()).then_some(inner)
}
