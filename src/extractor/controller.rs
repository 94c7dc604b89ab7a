//! Controller-level extraction: class name, base path, class auth and endpoints.

use crate::extractor::method::{extract_method, VerbHint};
use crate::extractor::{ControllerDescriptor, EndpointDescriptor, HttpMethod};
use crate::normalizer::strip_block_comments;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Instant;

/// Class name used when the source has no class declaration.
pub const UNKNOWN_CONTROLLER: &str = "UnknownController";

/// Class-level security annotations.
pub const CLASS_AUTH_MARKERS: [&str; 4] = [
    "@Secured",
    "@PreAuthorize",
    "@RolesAllowed",
    "@SecurityRequirement",
];

static CLASS_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bclass\s+([A-Za-z_][A-Za-z0-9_]*)").expect("class declaration pattern")
});

static BASE_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"@RequestMapping\s*\(\s*(?:(?:value|path)\s*=\s*)?\{?\s*"([^"]+)""#)
        .expect("base path pattern")
});

/// One pattern per mapping annotation, scanned independently.
static MAPPING_SCANS: Lazy<Vec<(Regex, VerbHint)>> = Lazy::new(|| {
    [
        ("GetMapping", VerbHint::Fixed(HttpMethod::Get)),
        ("PostMapping", VerbHint::Fixed(HttpMethod::Post)),
        ("PutMapping", VerbHint::Fixed(HttpMethod::Put)),
        ("DeleteMapping", VerbHint::Fixed(HttpMethod::Delete)),
        ("PatchMapping", VerbHint::Fixed(HttpMethod::Patch)),
        ("RequestMapping", VerbHint::Any),
    ]
    .into_iter()
    .map(|(name, hint)| {
        let pattern = Regex::new(&format!(r"@{}\b", name)).expect("mapping scan pattern");
        (pattern, hint)
    })
    .collect()
});

/// Parses a controller source file.
///
/// Never fails: a missing class declaration yields [`UNKNOWN_CONTROLLER`], and a
/// controller without endpoints is a valid result with an empty method list.
pub fn extract_controller(text: &str, source_identifier: &str) -> ControllerDescriptor {
    let started = Instant::now();
    let clean = strip_block_comments(text);

    let class_offset = CLASS_DECL.find(&clean).map(|m| m.start());
    let class_name = CLASS_DECL
        .captures(&clean)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| UNKNOWN_CONTROLLER.to_string());

    let prefix = class_offset.map(|offset| &clean[..offset]);
    let base_path = prefix.map(extract_base_path).unwrap_or_default();
    let requires_auth = prefix.map(has_class_auth).unwrap_or(false);
    let methods = extract_endpoints(&clean, class_offset, requires_auth);

    info!("Parsed controller {} from {}", class_name, source_identifier);
    debug!(
        "Found {} methods and base path: {:?} in {:?}",
        methods.len(),
        base_path,
        started.elapsed()
    );

    ControllerDescriptor {
        class_name,
        base_path,
        requires_auth,
        methods,
        source_identifier: source_identifier.to_string(),
    }
}

/// Class-level `@RequestMapping` path from the text preceding the class declaration.
fn extract_base_path(prefix: &str) -> String {
    BASE_PATH
        .captures(prefix)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

fn has_class_auth(prefix: &str) -> bool {
    CLASS_AUTH_MARKERS.iter().any(|m| prefix.contains(m))
}

/// Collects endpoints from every mapping annotation, then orders them by line.
///
/// Each annotation kind is scanned separately, so the collected list is grouped
/// by verb until the final sort restores source order.
fn extract_endpoints(
    text: &str,
    class_offset: Option<usize>,
    class_requires_auth: bool,
) -> Vec<EndpointDescriptor> {
    let mut endpoints = Vec::new();

    for (pattern, hint) in MAPPING_SCANS.iter() {
        for occurrence in pattern.find_iter(text) {
            // annotations above the class declaration belong to the class
            if class_offset.is_some_and(|offset| occurrence.start() < offset) {
                continue;
            }

            match extract_method(text, occurrence.start(), *hint, class_requires_auth) {
                Some(endpoint) => endpoints.push(endpoint),
                None => debug!(
                    "No method declaration follows {} at byte {}",
                    occurrence.as_str(),
                    occurrence.start()
                ),
            }
        }
    }

    endpoints.sort_by_key(|e| e.line_number);
    endpoints.dedup_by(|a, b| {
        a.line_number == b.line_number && a.http_method == b.http_method && a.path == b.path
    });
    endpoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::ParamAnnotation;

    #[test]
    fn test_extract_class_name() {
        let content = r#"
            @RestController
            public class UserController {
            }
        "#;
        let result = extract_controller(content, "UserController.java");
        assert_eq!(result.class_name, "UserController");
        assert_eq!(result.source_identifier, "UserController.java");
        assert!(result.methods.is_empty());
    }

    #[test]
    fn test_missing_class_uses_sentinel() {
        let result = extract_controller("@RestController\n", "Broken.java");
        assert_eq!(result.class_name, UNKNOWN_CONTROLLER);
        assert_eq!(result.base_path, "");
        assert!(!result.requires_auth);
    }

    #[test]
    fn test_extract_base_path() {
        let content = r#"
            @RestController
            @RequestMapping("/api/users")
            public class UserController {
            }
        "#;
        assert_eq!(extract_controller(content, "x").base_path, "/api/users");

        let keyed = r#"
            @RequestMapping(path = "/v2/orders")
            public class OrderController {}
        "#;
        assert_eq!(extract_controller(keyed, "x").base_path, "/v2/orders");
    }

    #[test]
    fn test_base_path_ignores_method_level_mapping() {
        let content = r#"
            @RestController
            public class PingController {
                @RequestMapping("/ping")
                public String ping() { return "pong"; }
            }
        "#;
        let result = extract_controller(content, "x");
        assert_eq!(result.base_path, "");
        assert_eq!(result.methods.len(), 1);
        assert_eq!(result.methods[0].path, "/ping");
    }

    #[test]
    fn test_class_level_security() {
        let content = r#"
            @SecurityRequirement(name = "token")
            @RestController
            @RequestMapping("/api/users")
            public class UserController {
                @GetMapping
                public List<User> all() { return null; }
            }
        "#;
        let result = extract_controller(content, "x");
        assert!(result.requires_auth);
        assert!(result.methods[0].requires_auth);
    }

    #[test]
    fn test_commented_out_endpoint_is_ignored() {
        let content = r#"
            @RestController
            public class UserController {
                /*
                @GetMapping("/old")
                public String old() { return ""; }
                */
                @GetMapping("/new")
                public String current() { return ""; }
            }
        "#;
        let result = extract_controller(content, "x");
        assert_eq!(result.methods.len(), 1);
        assert_eq!(result.methods[0].name, "current");
        assert_eq!(result.methods[0].line_number, 8);
    }

    #[test]
    fn test_endpoints_keep_source_order() {
        let content = r#"
            @RestController
            @RequestMapping("/api/users")
            public class UserController {
                @DeleteMapping("/{id}")
                public ResponseEntity<Void> delete(@PathVariable Long id) { return null; }

                @GetMapping
                public ResponseEntity<List<User>> getAll() { return null; }

                @PutMapping("/{id}")
                public ResponseEntity<User> update(@PathVariable Long id, @RequestBody UserDTO dto) { return null; }

                @PostMapping
                public ResponseEntity<User> create(@RequestBody UserDTO dto) { return null; }
            }
        "#;
        let result = extract_controller(content, "x");
        let verbs: Vec<_> = result.methods.iter().map(|m| m.http_method).collect();
        assert_eq!(
            verbs,
            vec![HttpMethod::Delete, HttpMethod::Get, HttpMethod::Put, HttpMethod::Post]
        );

        let update = &result.methods[2];
        assert_eq!(update.parameters.len(), 2);
        assert_eq!(update.parameters[1].annotation, Some(ParamAnnotation::RequestBody));
    }

    #[test]
    fn test_request_mapping_with_method() {
        let content = r#"
            @RestController
            @RequestMapping("/legacy")
            public class LegacyController {
                @RequestMapping(value = "/items", method = RequestMethod.POST)
                public Item add(@RequestBody Item item) { return item; }
            }
        "#;
        let result = extract_controller(content, "x");
        assert_eq!(result.methods.len(), 1);
        assert_eq!(result.methods[0].http_method, HttpMethod::Post);
        assert_eq!(result.methods[0].path, "/items");
    }
}
