//! Integration tests for the ReportBuilder API
//!
//! These tests drive the public API end to end: load a surface model from
//! JSON, generate a report, and check it for changes.

use std::fs;

use veneer::config::ReportConfig;
use veneer::stability::TrimLevel;
use veneer::{ReportBuilder, VeneerError, reports_equivalent};

const WIDGET_MODEL: &str = r#"{
    "packageName": "widgets",
    "source": "export class Widget {\n    render;\n}",
    "root": {
        "id": 0, "kind": "fragment", "range": { "start": 0, "end": 35 },
        "children": [
            {
                "id": 1, "kind": "classDeclaration",
                "range": { "start": 0, "end": 35 },
                "children": [
                    { "id": 2, "kind": "exportKeyword", "range": { "start": 0, "end": 6 } },
                    { "id": 3, "kind": "declarationKeyword", "range": { "start": 7, "end": 12 } },
                    { "id": 4, "kind": "identifier", "range": { "start": 13, "end": 19 } },
                    {
                        "id": 5, "kind": "memberList",
                        "range": { "start": 20, "end": 35 },
                        "children": [
                            { "id": 6, "kind": "propertyDeclaration", "range": { "start": 26, "end": 33 } }
                        ]
                    }
                ]
            }
        ]
    },
    "declarations": [
        {
            "name": "Widget", "kind": "class", "node": 1, "file": "src/widget",
            "metadata": { "releaseTag": "public", "documented": true }
        },
        {
            "name": "render", "kind": "property", "node": 6, "file": "src/widget",
            "parent": 0,
            "metadata": { "documented": true }
        }
    ],
    "entities": [
        {
            "nameForEmit": "Widget",
            "exportNames": ["Widget"],
            "declarations": [0],
            "consumable": true
        }
    ],
    "packageDocumented": true
}"#;

fn load_widget_model() -> veneer::model::SurfaceModel {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("surface.json");
    fs::write(&path, WIDGET_MODEL).expect("Failed to write model file");
    veneer::load_model(&path).expect("Failed to load surface model")
}

#[test]
fn test_builder_api_exists() {
    let _builder = ReportBuilder::default();
}

#[test]
fn test_generate_widget_report() {
    let model = load_widget_model();
    let builder = ReportBuilder::default();

    let report = builder.generate(&model).expect("Failed to generate report");

    assert!(report.starts_with("## API Report File for \"widgets\""));
    assert!(report.contains("class Widget {"));
    assert!(report.contains("render;"));
    assert!(report.contains("export { Widget }"));
}

#[test]
fn test_builder_with_config() {
    let model = load_widget_model();
    let builder = ReportBuilder::new(ReportConfig::new(TrimLevel::Untrimmed));

    let report = builder.generate(&model).expect("Failed to generate report");
    assert!(report.contains("class Widget {"));
}

#[test]
fn test_load_model_missing_file_returns_error() {
    let result = veneer::load_model("does-not-exist.json");
    assert!(matches!(result, Err(VeneerError::Io(_))));
}

#[test]
fn test_load_model_malformed_json_returns_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("surface.json");
    fs::write(&path, "{ not json").expect("Failed to write model file");

    let result = veneer::load_model(&path);
    assert!(matches!(result, Err(VeneerError::Model(_))));
}

#[test]
fn test_up_to_date_check_ignores_reflow() {
    let model = load_widget_model();
    let builder = ReportBuilder::default();

    let report = builder.generate(&model).expect("Failed to generate report");
    let reflowed = report.replace("\n\n", "\n");

    assert!(builder.is_up_to_date(&model, &report).unwrap());
    assert!(builder.is_up_to_date(&model, &reflowed).unwrap());
}

#[test]
fn test_up_to_date_check_detects_surface_change() {
    let model = load_widget_model();
    let builder = ReportBuilder::default();

    let report = builder.generate(&model).expect("Failed to generate report");
    let stale = report.replace("render", "renderFrame");

    assert!(!builder.is_up_to_date(&model, &stale).unwrap());
    assert!(!reports_equivalent(&report, &stale));
}

#[test]
fn test_builder_reusability() {
    let model = load_widget_model();
    let builder = ReportBuilder::default();

    let first = builder.generate(&model).expect("Failed to generate report");
    let second = builder.generate(&model).expect("Failed to generate report");

    // Generation is deterministic and the builder is reusable.
    assert_eq!(first, second);
}
