use clap::Parser;
use http_from_source::{
    cli::{self, CliArgs},
    extractor::{HttpMethod, ParamAnnotation},
    generate_document, generate_single_endpoint_document, parse_controller, parse_dto,
    request_builder::GenerationConfig,
    workspace::FsWorkspace,
};
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;

const CONTROLLER_DIR: &str = "src/main/java/com/example/demo/controller";
const DTO_DIR: &str = "src/main/java/com/example/demo/dto";

/// Helper function to create a temporary test project
fn create_test_project(files: Vec<(&str, &str)>) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    for (path, content) in files {
        let file_path = temp_dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&file_path, content).expect("Failed to write test file");
    }

    temp_dir
}

fn spring_project() -> TempDir {
    create_test_project(vec![
        (
            &format!("{}/UserController.java", CONTROLLER_DIR),
            include_str!("fixtures/UserController.java"),
        ),
        (
            &format!("{}/AdminController.java", CONTROLLER_DIR),
            include_str!("fixtures/AdminController.java"),
        ),
        (
            &format!("{}/UserDTO.java", DTO_DIR),
            include_str!("fixtures/UserDTO.java"),
        ),
    ])
}

fn run_cli(root: &Path, extra: &[&str]) {
    let mut argv = vec!["http-from-source", root.to_str().expect("utf-8 temp path")];
    argv.extend_from_slice(extra);
    let args = CliArgs::try_parse_from(argv).expect("Failed to parse arguments");
    let args = cli::parse_args_from_parsed(args).expect("Invalid arguments");
    cli::run(args).expect("Generation failed");
}

fn read_document(root: &Path, dir: &str, class_name: &str) -> String {
    std::fs::read_to_string(root.join(dir).join(format!("{}.http", class_name)))
        .unwrap_or_else(|e| panic!("Missing document for {}: {}", class_name, e))
}

const USER_PAYLOAD: &str = r#"{
  "name": "Jane Doe",
  "email": "",
  "age": 30,
  "active": false,
  "birthDate": "2025-01-01",
  "roles": [
    ""
  ]
}"#;

#[test]
fn test_parse_controller_fixture() {
    let controller = parse_controller(
        include_str!("fixtures/UserController.java"),
        "UserController.java",
    );

    assert_eq!(controller.class_name, "UserController");
    assert_eq!(controller.base_path, "/api/users");
    assert!(!controller.requires_auth);

    let names: Vec<_> = controller.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["getUser", "listUsers", "createUser", "updateUser", "deleteUser"]
    );

    let verbs: Vec<_> = controller.methods.iter().map(|m| m.http_method).collect();
    assert_eq!(
        verbs,
        vec![
            HttpMethod::Get,
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete
        ]
    );

    let list = controller.endpoint_named("listUsers").unwrap();
    assert_eq!(list.parameters.len(), 3);
    assert!(list.parameters[0].required);
    assert_eq!(list.parameters[1].default_value.as_deref(), Some("20"));

    let update = controller.endpoint_named("updateUser").unwrap();
    assert_eq!(update.parameters[0].annotation, Some(ParamAnnotation::PathVariable));
    assert_eq!(update.parameters[1].param_type, "UserDTO");

    let delete = controller.endpoint_named("deleteUser").unwrap();
    assert!(delete.requires_auth);
    assert!(controller.methods[..4].iter().all(|m| !m.requires_auth));
}

#[test]
fn test_parse_dto_fixture() {
    let dto = parse_dto(include_str!("fixtures/UserDTO.java"), "UserDTO");

    let names: Vec<_> = dto.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["name", "email", "age", "active", "birthDate", "roles"]
    );

    assert!(dto.fields[0].required);
    assert_eq!(dto.fields[0].description.as_deref(), Some("Full name"));
    assert_eq!(dto.fields[0].example_value.as_deref(), Some("Jane Doe"));
    assert!(dto.fields[1].required);
    assert!(!dto.fields[2].required);
    assert_eq!(dto.fields[5].field_type, "List<String>");
}

#[test]
fn test_generate_document_with_dto_payload() {
    let temp_dir = spring_project();
    let workspace = FsWorkspace::new(temp_dir.path()).unwrap();
    let controller = parse_controller(
        include_str!("fixtures/UserController.java"),
        "UserController.java",
    );

    let document = generate_document(&controller, &GenerationConfig::default(), &workspace);

    assert!(document.starts_with("### UserController\n# Generated from: UserController.java\n\n"));
    assert!(document.contains("# getUser\nGET http://localhost:8080/api/users/{{id}}\n\n###\n"));
    assert!(document.contains(
        "# listUsers\nGET http://localhost:8080/api/users?status=value&size=20&sort=\n"
    ));
    assert!(document.contains(&format!(
        "# createUser\nPOST http://localhost:8080/api/users\nContent-Type: application/json\n\n{}\n\n###",
        USER_PAYLOAD
    )));
    assert!(document.contains(&format!(
        "# updateUser\nPUT http://localhost:8080/api/users/{{{{id}}}}\nContent-Type: application/json\n\n{}",
        USER_PAYLOAD
    )));
    assert!(document.contains(
        "# deleteUser\nDELETE http://localhost:8080/api/users/{{id}}\nAuthorization: Bearer {{token}}\n\n###\n"
    ));
    assert_eq!(document.matches("\n###\n").count(), 5);
}

#[test]
fn test_generate_single_endpoint_document() {
    let temp_dir = spring_project();
    let workspace = FsWorkspace::new(temp_dir.path()).unwrap();
    let controller = parse_controller(
        include_str!("fixtures/UserController.java"),
        "UserController.java",
    );
    let endpoint = controller.endpoint_named("createUser").unwrap();

    let document = generate_single_endpoint_document(
        &controller,
        endpoint,
        &GenerationConfig::default(),
        &workspace,
    );

    assert_eq!(
        document,
        format!(
            "### UserController.createUser\n\n# createUser\nPOST http://localhost:8080/api/users\nContent-Type: application/json\n\n{}",
            USER_PAYLOAD
        )
    );
}

#[test]
fn test_cli_writes_one_document_per_controller() {
    let temp_dir = spring_project();
    let root = temp_dir.path();

    run_cli(root, &[]);

    let user_document = read_document(root, "http-requests", "UserController");
    assert!(user_document.starts_with(&format!(
        "### UserController\n# Generated from: {}/UserController.java\n",
        CONTROLLER_DIR
    )));
    assert!(user_document.contains(USER_PAYLOAD));

    let admin_document = read_document(root, "http-requests", "AdminController");
    let expected = format!(
        "\
### AdminController
# Generated from: {}/AdminController.java

# clearCache
DELETE http://localhost:8080/admin/cache
Authorization: Bearer {{{{token}}}}

###

# updateSettings
PATCH http://localhost:8080/admin/settings
Authorization: Bearer {{{{token}}}}
Content-Type: application/json

{{}}

###

# audit
POST http://localhost:8080/admin/audit
Authorization: Bearer {{{{token}}}}
Content-Type: application/json

{{}}

###
",
        CONTROLLER_DIR
    );
    assert_eq!(admin_document, expected);
}

#[test]
fn test_cli_config_flags() {
    let temp_dir = spring_project();
    let root = temp_dir.path();

    run_cli(
        root,
        &[
            "--base-url",
            "https://staging.example.com/",
            "--no-auth-header",
            "--output-dir",
            "out/requests",
        ],
    );

    let document = read_document(root, "out/requests", "AdminController");
    assert!(document.contains("DELETE https://staging.example.com/admin/cache\n"));
    assert!(!document.contains("Authorization"));
    assert!(!root.join("http-requests").exists());
}

#[test]
fn test_cli_single_controller_and_existing_output_directory() {
    let temp_dir = spring_project();
    let root = temp_dir.path();
    std::fs::create_dir(root.join("http-requests")).unwrap();

    let controller = format!("{}/UserController.java", CONTROLLER_DIR);
    run_cli(root, &["--controller", &controller]);

    assert!(root.join("http-requests/UserController.http").exists());
    assert!(!root.join("http-requests/AdminController.http").exists());
}

#[test]
fn test_cli_skips_controller_without_endpoints() {
    let temp_dir = spring_project();
    let root = temp_dir.path();
    std::fs::write(
        root.join(CONTROLLER_DIR).join("StatusController.java"),
        "@RestController\npublic class StatusController {\n    private final String version = \"1\";\n}\n",
    )
    .unwrap();

    run_cli(root, &[]);

    assert!(root.join("http-requests/UserController.http").exists());
    assert!(!root.join("http-requests/StatusController.http").exists());
}

#[test]
fn test_cli_dump_formats_write_nothing() {
    let temp_dir = spring_project();
    let root = temp_dir.path();

    run_cli(root, &["--format", "json"]);
    run_cli(root, &["--format", "yaml"]);
    run_cli(root, &["--stdout"]);

    assert!(!root.join("http-requests").exists());
}

#[test]
fn test_cli_single_endpoint_selection() {
    let temp_dir = spring_project();
    let root = temp_dir.path();
    let controller = format!("{}/UserController.java", CONTROLLER_DIR);

    run_cli(root, &["--controller", &controller, "--endpoint", "deleteUser"]);
    run_cli(root, &["--controller", &controller, "--line", "20"]);
    assert!(!root.join("http-requests").exists());

    let args = CliArgs::try_parse_from([
        "http-from-source",
        root.to_str().unwrap(),
        "--controller",
        &controller,
        "--endpoint",
        "missing",
    ])
    .unwrap();
    assert!(cli::run(args).is_err());
}

#[test]
fn test_cli_rejects_missing_project() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope");
    let args = CliArgs::try_parse_from(["http-from-source", missing.to_str().unwrap()]).unwrap();
    assert!(cli::parse_args_from_parsed(args).is_err());
}
