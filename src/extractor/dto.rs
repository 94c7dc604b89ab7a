//! Field extraction for DTO classes.

use crate::extractor::{DtoDescriptor, DtoFieldDescriptor};
use crate::normalizer::{lookback, strip_block_comments};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Instant;

/// Number of bytes before a field declaration searched for its annotations.
/// The window is further cut at the previous statement boundary.
pub const FIELD_CONTEXT_WINDOW: usize = 500;

/// Validation annotations that make a field required.
pub const REQUIRED_MARKERS: [&str; 3] = ["@NotNull", "@NotEmpty", "@NotBlank"];

/// Modifiers that may appear between the visibility keyword and the type.
const TYPE_MODIFIERS: [&str; 3] = ["final", "transient", "volatile"];

static FIELD_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:private|public|protected)\s+([A-Za-z0-9_<>,.?\[\]\s]+)\s+([A-Za-z_][A-Za-z0-9_]*)\s*(?:=[^;]*)?;",
    )
    .expect("field declaration pattern")
});

static SCHEMA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"@(?:Schema|ApiModelProperty)\s*\(((?:[^)"]|"[^"]*")*)\)"#)
        .expect("schema pattern")
});

static QUOTED_EXAMPLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"example\s*=\s*"([^"]*)""#).expect("example pattern"));

static BARE_EXAMPLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"example\s*=\s*(-?[0-9.]+|true|false)").expect("bare example pattern")
});

static DESCRIPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"description\s*=\s*"([^"]*)""#).expect("description pattern"));

static STATIC_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bstatic\b").expect("static pattern"));

/// Parses the fields of a DTO class.
pub fn extract_dto(text: &str, class_name: &str) -> DtoDescriptor {
    let started = Instant::now();
    let clean = strip_block_comments(text);
    let fields = extract_fields(&clean);

    debug!(
        "Parsed DTO {} with {} fields in {:?}",
        class_name,
        fields.len(),
        started.elapsed()
    );

    DtoDescriptor {
        class_name: class_name.to_string(),
        fields,
    }
}

/// Extracts field declarations in declaration order, skipping static and
/// line-commented ones.
pub fn extract_fields(text: &str) -> Vec<DtoFieldDescriptor> {
    let mut fields = Vec::new();

    for caps in FIELD_DECL.captures_iter(text) {
        let Some(decl) = caps.get(0) else { continue };
        let raw_type = &caps[1];
        let name = caps[2].to_string();

        if is_line_commented(text, decl.start()) {
            continue;
        }

        let window = lookback(text, decl.start(), FIELD_CONTEXT_WINDOW);
        let context = &window[statement_start(window)..];

        if STATIC_WORD.is_match(raw_type) || STATIC_WORD.is_match(context) {
            debug!("Skipping static field {}", name);
            continue;
        }

        let schema = SCHEMA.captures(context).map(|c| c[1].to_string());
        let example_value = schema.as_deref().and_then(schema_example);
        let description = schema
            .as_deref()
            .and_then(|s| DESCRIPTION.captures(s))
            .map(|c| c[1].to_string());

        fields.push(DtoFieldDescriptor {
            name,
            field_type: clean_type(raw_type),
            required: REQUIRED_MARKERS.iter().any(|m| context.contains(m)),
            description,
            example_value,
        });
    }

    fields
}

fn schema_example(schema_args: &str) -> Option<String> {
    QUOTED_EXAMPLE
        .captures(schema_args)
        .or_else(|| BARE_EXAMPLE.captures(schema_args))
        .map(|c| c[1].to_string())
}

/// Offset just past the last `;`, `{` or `}` of `context` that is neither
/// inside parentheses nor inside a string literal, so annotation arguments like
/// `{"A", "B"}` or `"smiley :)"` do not move it.
fn statement_start(context: &str) -> usize {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut chars = context.char_indices().rev().peekable();

    while let Some((idx, c)) = chars.next() {
        if c == '"' && !matches!(chars.peek(), Some((_, '\\'))) {
            in_string = !in_string;
            continue;
        }
        if in_string {
            continue;
        }
        match c {
            ')' => depth += 1,
            '(' => depth -= 1,
            ';' | '{' | '}' if depth <= 0 => return idx + 1,
            _ => {}
        }
    }
    0
}

/// Whether a `//` comment opens on the declaration's line before `offset`.
/// Slashes inside string literals (`"https://..."`) do not count.
fn is_line_commented(text: &str, offset: usize) -> bool {
    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    let mut in_string = false;
    let mut escaped = false;
    let mut previous = None;

    for c in text[line_start..offset].chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == '/' && previous == Some('/') {
            return true;
        }
        previous = Some(c);
    }
    false
}

/// Drops modifiers and collapses whitespace in a declared type.
fn clean_type(raw: &str) -> String {
    raw.split_whitespace()
        .filter(|t| !TYPE_MODIFIERS.contains(t))
        .collect::<Vec<_>>()
        .join(" ")
}
