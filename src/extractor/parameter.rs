//! Handler parameter list splitting and per-parameter parsing.

use crate::extractor::{ParamAnnotation, ParameterDescriptor};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Any annotation, with its parenthesized arguments when present.
static ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@[A-Za-z_][A-Za-z0-9_.]*\s*(?:\([^)]*\))?").expect("annotation pattern")
});

static REQUIRED_TRUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"required\s*=\s*true").expect("required pattern"));

static DEFAULT_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"defaultValue\s*=\s*"([^"]*)""#).expect("defaultValue pattern"));

/// Splits a raw parameter list on top-level commas.
///
/// Commas nested inside generic brackets (`Map<String, Integer>`) or inside
/// annotation arguments (`@RequestParam(value = "q", required = false)`) do not
/// separate parameters. Entries are trimmed and empty entries dropped.
pub fn split_parameters(params: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;

    for c in params.chars() {
        match c {
            '<' | '(' => depth += 1,
            '>' | ')' => depth -= 1,
            _ => {}
        }

        if c == ',' && depth == 0 {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                result.push(trimmed.to_string());
            }
            current.clear();
        } else {
            current.push(c);
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        result.push(trimmed.to_string());
    }
    result
}

/// Parses a single raw parameter such as `@RequestParam(required = true) String q`.
///
/// Returns `None` when fewer than two tokens remain once annotations are
/// stripped, since there is then no type/name pair to report.
pub fn parse_parameter(raw: &str) -> Option<ParameterDescriptor> {
    let annotation = ParamAnnotation::PRIORITY
        .into_iter()
        .find(|a| raw.contains(a.marker()));

    let stripped = ANNOTATION.replace_all(raw, " ");
    let tokens: Vec<&str> = stripped
        .split_whitespace()
        .filter(|t| *t != "final")
        .collect();

    if tokens.len() < 2 {
        debug!("Dropping parameter without type and name: {:?}", raw);
        return None;
    }

    let (name, type_tokens) = tokens.split_last()?;
    let required =
        annotation == Some(ParamAnnotation::RequestBody) || REQUIRED_TRUE.is_match(raw);
    let default_value = DEFAULT_VALUE
        .captures(raw)
        .map(|caps| caps[1].to_string());

    Some(ParameterDescriptor {
        name: name.to_string(),
        param_type: type_tokens.join(" "),
        annotation,
        required,
        default_value,
    })
}

/// Parses a whole parameter list, preserving declaration order.
pub fn parse_parameters(params: &str) -> Vec<ParameterDescriptor> {
    if params.trim().is_empty() {
        return Vec::new();
    }

    split_parameters(params)
        .iter()
        .filter_map(|p| parse_parameter(p))
        .collect()
}
