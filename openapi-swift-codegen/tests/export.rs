//! End-to-end export tests.

use async_trait::async_trait;
use openapi_swift_codegen::{
    CodegenError, Config, Generator, GeneratorExtension, Renderer, ResolvedDocument,
    generate_from_json,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const PETSTORE: &str = r#"{
    "info": {"title": "Pet Store", "version": "1.0.0"},
    "servers": [{"url": "https://pets.example.com/v1"}],
    "groups": [{
        "name": "pets",
        "path": "/pets",
        "operations": [{
            "name": "listPets",
            "method": "GET",
            "path": "",
            "parameters": [{
                "name": "limit",
                "in": "query",
                "type": {"schemaType": "INTEGER", "format": "int32"},
                "default": 20
            }],
            "responses": [{
                "code": 200,
                "description": "A page of pets",
                "mediaType": "application/json",
                "type": {
                    "schemaType": "ARRAY",
                    "component": {"schemaType": "OBJECT", "scopedName": ["Pet"]}
                }
            }]
        }, {
            "name": "getPet",
            "method": "GET",
            "path": "/{petId}",
            "parameters": [{
                "name": "petId",
                "in": "path",
                "required": true,
                "type": {"schemaType": "INTEGER", "format": "int64"}
            }],
            "responses": [{
                "code": 200,
                "description": "The pet",
                "mediaType": "application/json",
                "type": {"schemaType": "OBJECT", "scopedName": ["Pet"]}
            }]
        }]
    }, {
        "name": "empty",
        "path": "/empty",
        "operations": []
    }],
    "schemas": [{
        "name": "Pet",
        "scopedName": ["Pet"],
        "kind": "object",
        "properties": [
            {"name": "id", "required": true, "type": {"schemaType": "INTEGER", "format": "int64"}},
            {"name": "tag", "type": {"schemaType": "STRING", "nullable": true}},
            {"name": "status", "required": true, "type": {"schemaType": "ENUM", "scopedName": ["Status"]}, "default": "AVAILABLE"}
        ]
    }, {
        "name": "Status",
        "scopedName": ["Status"],
        "kind": "enum",
        "valueType": {"schemaType": "STRING"},
        "values": ["AVAILABLE", "SOLD"]
    }, {
        "name": "Identifier",
        "scopedName": ["Identifier"],
        "kind": "oneOf",
        "members": [
            {"type": {"schemaType": "STRING"}},
            {"type": {"schemaType": "STRING", "format": "uuid"}},
            {"type": {"schemaType": "INTEGER"}}
        ]
    }],
    "securitySchemes": [{"name": "basic", "type": "http", "scheme": "basic"}]
}"#;

fn config() -> Config {
    Config::from_value(json!({ "hideGenerationTimestamp": true })).expect("Failed to parse config")
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative))
        .unwrap_or_else(|e| panic!("Failed to read {relative}: {e}"))
}

#[tokio::test]
async fn test_export_petstore() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let resolved = generate_from_json(PETSTORE, &config(), dir.path())
        .await
        .expect("Failed to generate");
    assert_eq!(resolved.options.package_name(), Some("Api"));

    let root = dir.path();
    assert!(root.join("Package.swift").is_file());
    assert!(root.join("Sources/Api/Support/Nullable.swift").is_file());
    assert!(root.join("Sources/Api/Support/Configuration.swift").is_file());
    assert!(root.join("Sources/Api/Security/Credentials.swift").is_file());
    assert!(!root.join("Sources/Api/APIs/EmptyApi.swift").exists());

    let pet = read(root, "Sources/Api/Models/Pet.swift");
    assert!(pet.contains("public struct Pet: Codable, Equatable"));
    assert!(pet.contains("public var id: Int64"));
    assert!(pet.contains("public var tag: Nullable<String>?"));
    assert!(pet.contains("status: Api.Status = Api.Status.available"));
    assert!(pet.contains("// Generated by openapi-swift"));
    assert!(!pet.contains(" on 2"), "timestamp should be hidden");

    let status = read(root, "Sources/Api/Models/Status.swift");
    assert!(status.contains("public enum Status: String, Codable, CaseIterable"));
    assert!(status.contains("case available = \"AVAILABLE\""));

    let identifier = read(root, "Sources/Api/Models/Identifier.swift");
    assert!(identifier.contains("case string(String)"));
    assert!(identifier.contains("case string1(String)"));
    assert!(identifier.contains("case int(Int)"));

    let api = read(root, "Sources/Api/APIs/PetsApi.swift");
    assert!(api.contains("public class PetsApi"));
    assert!(api.contains("public func listPets(limit: Int32? = 20) async throws -> [Api.Pet]"));
    assert!(api.contains("public func getPet(petId: Int64 = 0) async throws -> Api.Pet"));
    assert!(api.contains("var path = \"/pets/{petId}\""));
    assert!(api.contains("https://pets.example.com/v1"));

    let credentials = read(root, "Sources/Api/Security/Credentials.swift");
    assert!(credentials.contains("BasicSecurityClient"));

    let package = read(root, "Package.swift");
    assert!(package.contains("name: \"Api\""));
    assert!(package.contains("path: \"Sources/Api\""));
}

#[tokio::test]
async fn test_custom_templates_override() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let templates = dir.path().join("templates");
    fs::create_dir_all(&templates).expect("Failed to create dir");
    fs::write(templates.join("pojo.jinja2"), "custom {{ pojo.className }}")
        .expect("Failed to write template");
    fs::write(dir.path().join("config.json"), r#"{"customTemplates": "templates"}"#)
        .expect("Failed to write config");

    let config = Config::from_file(&dir.path().join("config.json")).expect("Failed to load config");
    let output = dir.path().join("out");
    generate_from_json(PETSTORE, &config, &output)
        .await
        .expect("Failed to generate");

    assert_eq!(read(&output, "Sources/Api/Models/Pet.swift"), "custom Pet");
}

struct Readme {
    templates: PathBuf,
}

#[async_trait]
impl GeneratorExtension for Readme {
    fn name(&self) -> &str {
        "readme"
    }

    fn template_dirs(&self) -> Vec<PathBuf> {
        vec![self.templates.clone()]
    }

    fn clean_path_patterns(&self) -> Vec<String> {
        vec!["README.md".to_string()]
    }

    async fn export_templates(
        &self,
        output_path: &Path,
        document: &ResolvedDocument,
        renderer: &dyn Renderer,
        root: &tera::Context,
    ) -> openapi_swift_codegen::Result<()> {
        let mut context = root.clone();
        context.insert("title", &document.info.title);
        renderer
            .emit("readme", &output_path.join("README.md"), &context)
            .await
    }
}

#[tokio::test]
async fn test_extension_exports_after_builtin() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let templates = dir.path().join("extension");
    fs::create_dir_all(&templates).expect("Failed to create dir");
    fs::write(templates.join("readme.jinja2"), "# {{ title }} ({{ package.name }})")
        .expect("Failed to write template");

    let generator = Generator::from_config(&config())
        .expect("Failed to create generator")
        .with_extensions(vec![Arc::new(Readme { templates })]);
    assert!(generator.clean_path_patterns().contains(&"README.md".to_string()));

    let document = openapi_swift_schema::parse_document(PETSTORE).expect("Failed to parse");
    let resolved = generator
        .post_process_document(document)
        .expect("Failed to process");
    let output = dir.path().join("out");
    generator
        .export_templates(&output, &resolved)
        .await
        .expect("Failed to export");

    assert_eq!(read(&output, "README.md"), "# Pet Store (Api)");
    assert!(output.join("Package.swift").is_file());
}

#[tokio::test]
async fn test_broken_template_fails_export() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let templates = dir.path().join("templates");
    fs::create_dir_all(&templates).expect("Failed to create dir");
    fs::write(templates.join("enum.jinja2"), "{{ missing.value }}").expect("Failed to write");

    let config = Config::from_value(json!({ "customTemplates": templates.to_string_lossy() }))
        .expect("Failed to parse config");
    let result = generate_from_json(PETSTORE, &config, &dir.path().join("out")).await;
    assert!(matches!(result, Err(CodegenError::Template(_))));
}
