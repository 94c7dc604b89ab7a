//! Request path assembly: base path + method path + base URL, placeholders
//! and query strings.

use crate::extractor::{ControllerDescriptor, EndpointDescriptor, ParameterDescriptor};
use once_cell::sync::Lazy;
use regex::Regex;

static PATH_VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}]+)\}").expect("path variable pattern"));

/// Value rendered for required query parameters without a default.
pub const REQUIRED_QUERY_PLACEHOLDER: &str = "value";

/// Joins a controller base path and a method path.
///
/// Each non-empty part is given a leading `/` and stripped of one trailing `/`.
/// Two empty parts produce `/`.
pub fn combine(base_path: &str, method_path: &str) -> String {
    let base = normalize_segment(base_path);
    let method = normalize_segment(method_path);

    match (base.is_empty(), method.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => method,
        (false, true) => base,
        (false, false) if method == "/" => base,
        (false, false) if base == "/" => method,
        (false, false) => base + &method,
    }
}

/// Absolute request URL for a base URL and the two path parts.
pub fn resolve(base_url: &str, base_path: &str, method_path: &str) -> String {
    let base_url = base_url.strip_suffix('/').unwrap_or(base_url);
    format!("{}{}", base_url, combine(base_path, method_path))
}

/// Rewrites `{name}` placeholders to the `{{name}}` template-variable form.
pub fn format_path_variables(path: &str) -> String {
    PATH_VARIABLE.replace_all(path, "{{$1}}").into_owned()
}

/// Builds `?a=value&b=` from query parameters; empty input gives `""`.
///
/// A parameter with a `defaultValue` renders that value; otherwise required
/// parameters get [`REQUIRED_QUERY_PLACEHOLDER`] and optional ones stay empty.
pub fn build_query_string<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = &'a ParameterDescriptor>,
{
    let pairs: Vec<String> = params
        .into_iter()
        .map(|p| {
            let value = match (&p.default_value, p.required) {
                (Some(default), _) => default.as_str(),
                (None, true) => REQUIRED_QUERY_PLACEHOLDER,
                (None, false) => "",
            };
            format!("{}={}", p.name, value)
        })
        .collect();

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

/// Full request target for an endpoint: resolved URL, template placeholders
/// and `@RequestParam` query string.
pub fn complete_endpoint(
    base_url: &str,
    controller: &ControllerDescriptor,
    endpoint: &EndpointDescriptor,
) -> String {
    let url = resolve(base_url, &controller.base_path, &endpoint.path);
    let mut target = format_path_variables(&url);
    target.push_str(&build_query_string(endpoint.query_parameters()));
    target
}

fn normalize_segment(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{HttpMethod, ParamAnnotation};

    fn query_param(name: &str, required: bool) -> ParameterDescriptor {
        ParameterDescriptor {
            name: name.to_string(),
            param_type: "String".to_string(),
            annotation: Some(ParamAnnotation::RequestParam),
            required,
            default_value: None,
        }
    }

    #[test]
    fn test_combine() {
        assert_eq!(combine("", ""), "/");
        assert_eq!(combine("api/users", "list"), "/api/users/list");
        assert_eq!(combine("/api/users/", "/list/"), "/api/users/list");
        assert_eq!(combine("/api", ""), "/api");
        assert_eq!(combine("", "/{id}"), "/{id}");
        assert_eq!(combine("/", "/"), "/");
        assert_eq!(combine("/api", "/"), "/api");
    }

    #[test]
    fn test_combine_shape() {
        let samples = ["a", "/a", "a/", "/a/", "a/b", "/", "x/y/"];
        for base in samples {
            for method in samples {
                let combined = combine(base, method);
                assert!(combined.starts_with('/'), "{} + {} = {}", base, method, combined);
                assert!(
                    combined == "/" || !combined.ends_with('/'),
                    "{} + {} = {}",
                    base,
                    method,
                    combined
                );
            }
        }
    }

    #[test]
    fn test_resolve() {
        assert_eq!(
            resolve("http://localhost:8080/", "/api/users", "/{id}"),
            "http://localhost:8080/api/users/{id}"
        );
        assert_eq!(resolve("http://h", "", ""), "http://h/");
    }

    #[test]
    fn test_format_path_variables() {
        assert_eq!(format_path_variables("/users/{id}"), "/users/{{id}}");
        assert_eq!(
            format_path_variables("/users/{userId}/posts/{postId}"),
            "/users/{{userId}}/posts/{{postId}}"
        );
        assert_eq!(format_path_variables("/users"), "/users");
    }

    #[test]
    fn test_build_query_string() {
        let none: [ParameterDescriptor; 0] = [];
        assert_eq!(build_query_string(&none), "");
        assert_eq!(build_query_string(&[query_param("query", false)]), "?query=");
        assert_eq!(
            build_query_string(&[query_param("q", true), query_param("page", false)]),
            "?q=value&page="
        );

        let mut size = query_param("size", false);
        size.default_value = Some("20".to_string());
        assert_eq!(build_query_string(&[size]), "?size=20");
    }

    #[test]
    fn test_complete_endpoint() {
        let endpoint = EndpointDescriptor {
            name: "search".to_string(),
            http_method: HttpMethod::Get,
            path: "/{org}/search".to_string(),
            parameters: vec![query_param("query", false)],
            requires_auth: false,
            line_number: 1,
        };
        let controller = ControllerDescriptor {
            class_name: "SearchController".to_string(),
            base_path: "/api".to_string(),
            requires_auth: false,
            methods: vec![endpoint.clone()],
            source_identifier: "SearchController.java".to_string(),
        };

        assert_eq!(
            complete_endpoint("http://localhost:8080", &controller, &endpoint),
            "http://localhost:8080/api/{{org}}/search?query="
        );
    }
}
