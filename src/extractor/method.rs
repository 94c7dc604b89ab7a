//! Extraction of a single endpoint from a mapping annotation.

use crate::extractor::parameter::parse_parameters;
use crate::extractor::{EndpointDescriptor, HttpMethod};
use crate::normalizer::{line_number_at, lookback};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Number of bytes before a mapping annotation searched for method-level
/// security annotations.
///
/// This is a lexical approximation of "the annotation block above the method".
/// Annotations written between the mapping annotation and the method head are
/// not part of the window.
/// A very long block (many `@ApiResponse`s, say) can push a security annotation
/// out of the window; a short previous method can leak its annotation into it.
pub const AUTH_LOOKBACK_WINDOW: usize = 500;

/// Method-level security annotations.
pub const METHOD_AUTH_MARKERS: [&str; 2] = ["@Secured", "@PreAuthorize"];

/// The mapping annotation starting exactly at the match offset.
static MAPPING_AT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@[A-Za-z]+Mapping\s*(?:\(([^)]*)\))?").expect("mapping pattern")
});

static KEYED_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:value|path)\s*=\s*\{?\s*"([^"]*)""#).expect("keyed path pattern")
});

static POSITIONAL_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*\{?\s*"([^"]*)""#).expect("positional path pattern"));

static VERB_ARGUMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"method\s*=\s*\{?\s*(?:RequestMethod\.)?(GET|POST|PUT|DELETE|PATCH)\b")
        .expect("verb pattern")
});

/// Optional modifiers, return type tokens, method name and opening parenthesis.
static METHOD_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:public|protected|private)?\s+(?:(?:static|final|synchronized|abstract|native|default)\s+)*[A-Za-z0-9_<>?,.\[\]\s]+?\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(",
    )
    .expect("method head pattern")
});

/// How the HTTP verb of a mapping annotation is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbHint {
    /// A verb-specific annotation such as `@PostMapping`
    Fixed(HttpMethod),
    /// `@RequestMapping`, whose verb comes from its `method` argument
    Any,
}

/// Extracts the endpoint introduced by the mapping annotation at `annotation_offset`.
///
/// `text` must already be normalized. Returns `None` when no method declaration
/// follows the annotation; such annotations are not endpoints.
pub fn extract_method(
    text: &str,
    annotation_offset: usize,
    verb_hint: VerbHint,
    class_requires_auth: bool,
) -> Option<EndpointDescriptor> {
    let line_number = line_number_at(text, annotation_offset);
    let after_annotation = text.get(annotation_offset..)?;
    let (path, http_method) = extract_mapping(after_annotation, verb_hint);

    let head = METHOD_HEAD.captures(after_annotation)?;
    let name = head[1].to_string();
    let whole = head.get(0)?;
    let params_start = whole.end();
    let params_len = matching_paren_len(&after_annotation[params_start..])?;
    let params = &after_annotation[params_start..params_start + params_len];
    debug!("Extracted method {} with params: {}", name, params.trim());

    let requires_auth = class_requires_auth
        || has_auth_marker(lookback(text, annotation_offset, AUTH_LOOKBACK_WINDOW));

    Some(EndpointDescriptor {
        name,
        http_method,
        path,
        parameters: parse_parameters(params),
        requires_auth,
        line_number,
    })
}

/// Reads the path and verb from the mapping annotation at the start of `text`.
fn extract_mapping(text: &str, verb_hint: VerbHint) -> (String, HttpMethod) {
    let mut method = match verb_hint {
        VerbHint::Fixed(method) => method,
        VerbHint::Any => HttpMethod::Get,
    };
    let mut path = String::new();

    let Some(args) = MAPPING_AT.captures(text).and_then(|caps| caps.get(1)) else {
        return (path, method);
    };
    let args = args.as_str();

    if let Some(caps) = KEYED_PATH
        .captures(args)
        .or_else(|| POSITIONAL_PATH.captures(args))
    {
        path = caps[1].to_string();
    }

    if verb_hint == VerbHint::Any {
        if let Some(verb) = VERB_ARGUMENT
            .captures(args)
            .and_then(|caps| HttpMethod::from_keyword(&caps[1]))
        {
            method = verb;
        }
    }

    (path, method)
}

/// Length of the text up to (not including) the parenthesis closing an
/// already-opened one. String and char literals are skipped.
fn matching_paren_len(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn has_auth_marker(context: &str) -> bool {
    METHOD_AUTH_MARKERS.iter().any(|m| context.contains(m))
}
