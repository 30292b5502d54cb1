//! Integration tests for `convert()` — exercise parser, mapper and
//! serializer together via the public API only, against the shared
//! fixtures in `tests/manifests`.

use iiif_downgrade_core::{convert, convert_str, ConvertOptions, DiagnosticKind, ErrorCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/manifests");

fn fixture(name: &str) -> Value {
    let path = format!("{FIXTURES_DIR}/{name}.json");
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {path}: {e}"));
    serde_json::from_str(&content).unwrap_or_else(|e| panic!("Failed to parse {path}: {e}"))
}

fn canvas_ids(manifest: &Value) -> Vec<&str> {
    manifest["sequences"][0]["canvases"]
        .as_array()
        .expect("canvases should be an array")
        .iter()
        .map(|c| c["@id"].as_str().expect("canvas @id"))
        .collect()
}

// ── Minimal single image ────────────────────────────────────────────────────

#[test]
fn test_minimal_single_image() {
    let result = convert(&fixture("minimal"), &ConvertOptions::default()).unwrap();
    let m = &result.manifest;

    assert!(result.diagnostics.is_empty());
    assert_eq!(m["@context"], json!("http://iiif.io/api/presentation/2/context.json"));
    assert_eq!(m["@id"], json!("m1"));
    assert_eq!(m["@type"], json!("sc:Manifest"));
    assert_eq!(m["label"], json!("T"));

    let sequences = m["sequences"].as_array().unwrap();
    assert_eq!(sequences.len(), 1);
    assert_eq!(sequences[0]["@id"], json!("m1/sequence/normal"));

    let canvas = &sequences[0]["canvases"][0];
    assert_eq!(canvas["@id"], json!("c1"));
    assert_eq!(canvas["width"], json!(100));
    assert_eq!(canvas["height"], json!(200));
    assert_eq!(canvas["images"][0]["resource"]["@id"], json!("img1"));
    assert_eq!(canvas["images"][0]["resource"]["format"], json!("image/jpeg"));
    assert_eq!(canvas["images"][0]["on"], json!("c1"));
}

#[test]
fn test_convert_str_matches_convert() {
    let text = std::fs::read_to_string(format!("{FIXTURES_DIR}/minimal.json")).unwrap();
    let from_str = convert_str(&text, &ConvertOptions::default()).unwrap();
    let from_value = convert(&fixture("minimal"), &ConvertOptions::default()).unwrap();
    assert_eq!(from_str.manifest, from_value.manifest);
}

// ── Compound work ───────────────────────────────────────────────────────────

#[test]
fn test_book_keeps_page_order_and_drops_note() {
    let result = convert(&fixture("book"), &ConvertOptions::default()).unwrap();

    assert_eq!(
        canvas_ids(&result.manifest),
        vec![
            "https://example.org/iiif/book1/canvas/f1r",
            "https://example.org/iiif/book1/canvas/f1v",
            "https://example.org/iiif/book1/canvas/f2r",
        ]
    );

    let kinds: Vec<&DiagnosticKind> = result.diagnostics.iter().map(|d| &d.kind).collect();
    assert_eq!(kinds.len(), 2);
    assert!(matches!(kinds[0], DiagnosticKind::ChoiceCollapsed { .. }));
    assert_eq!(kinds[1], &DiagnosticKind::NoPaintingAnnotation);
    assert_eq!(
        result.diagnostics[1].resource_id,
        "https://example.org/iiif/book1/canvas/note"
    );
}

#[test]
fn test_book_descriptive_properties() {
    let m = convert(&fixture("book"), &ConvertOptions::default())
        .unwrap()
        .manifest;

    assert_eq!(m["label"], json!("Book of Hours"));
    assert_eq!(m["description"], json!("A fifteenth-century book of hours."));
    assert_eq!(
        m["metadata"],
        json!([
            { "label": "Date", "value": "c. 1450" },
            { "label": "Language", "value": "Latin" }
        ])
    );
    assert_eq!(m["attribution"], json!("Provided by Example Library"));
    assert_eq!(m["license"], json!("http://creativecommons.org/licenses/by/4.0/"));
    assert_eq!(m["navDate"], json!("1450-01-01T00:00:00Z"));
    assert_eq!(m["viewingHint"], json!("paged"));
    assert_eq!(m["viewingDirection"], json!("left-to-right"));
    assert!(m.get("structures").is_none());
}

#[test]
fn test_book_thumbnail_and_services() {
    let m = convert(&fixture("book"), &ConvertOptions::default())
        .unwrap()
        .manifest;

    assert_eq!(
        m["thumbnail"],
        json!({
            "@id": "https://images.example.org/iiif/book1-f1r/full/!200,200/0/default.jpg",
            "service": {
                "@context": "http://iiif.io/api/image/3/context.json",
                "@id": "https://images.example.org/iiif/book1-f1r",
                "profile": "level1"
            }
        })
    );

    let first = &m["sequences"][0]["canvases"][0]["images"][0];
    assert_eq!(
        first["@id"],
        json!("https://example.org/iiif/book1/annotation/f1r")
    );
    assert_eq!(first["@type"], json!("oa:Annotation"));
    assert_eq!(first["motivation"], json!("sc:painting"));
    assert_eq!(
        first["resource"]["service"],
        json!({
            "@context": "http://iiif.io/api/image/2/context.json",
            "@id": "https://images.example.org/iiif/book1-f1r",
            "profile": "http://iiif.io/api/image/2/level2.json"
        })
    );
}

#[test]
fn test_book_choice_keeps_first_alternative() {
    let result = convert(&fixture("book"), &ConvertOptions::default()).unwrap();

    let f1v = &result.manifest["sequences"][0]["canvases"][1];
    assert_eq!(
        f1v["images"][0]["resource"]["@id"],
        json!("https://images.example.org/iiif/book1-f1v-natural/full/max/0/default.jpg")
    );

    let choice = &result.diagnostics[0];
    assert_eq!(
        choice.resource_id,
        "https://example.org/iiif/book1/annotation/f1v"
    );
    assert!(choice
        .message
        .contains("https://images.example.org/iiif/book1-f1v-uv/full/max/0/default.jpg"));
}

#[test]
fn test_first_canvas_thumbnail_lifted_to_manifest() {
    // The first canvas paints nothing and is dropped; its thumbnail still
    // becomes the manifest thumbnail.
    let input = json!({
        "id": "m1",
        "type": "Manifest",
        "items": [
            {
                "id": "c1",
                "type": "Canvas",
                "thumbnail": [{
                    "id": "thumb.jpg",
                    "type": "Image",
                    "format": "image/jpeg",
                    "service": [{ "id": "svc", "type": "ImageService2", "profile": "level0" }]
                }],
                "items": []
            }
        ]
    });

    let result = convert(&input, &ConvertOptions::default()).unwrap();
    assert_eq!(
        result.manifest["thumbnail"],
        json!({
            "@id": "thumb.jpg",
            "service": {
                "@context": "http://iiif.io/api/image/2/context.json",
                "@id": "svc",
                "profile": "http://iiif.io/api/image/2/level0.json"
            }
        })
    );
    assert!(canvas_ids(&result.manifest).is_empty());
}

// ── JSON-LD 1.0 keys ────────────────────────────────────────────────────────

#[test]
fn test_jsonld_keys_and_array_body() {
    let result = convert(&fixture("jsonld_keys"), &ConvertOptions::default()).unwrap();
    let m = &result.manifest;

    assert_eq!(m["@id"], json!("https://example.org/iiif/photo/manifest"));
    assert_eq!(m["label"], json!("Harbour at dusk"));
    assert_eq!(
        m["sequences"][0]["canvases"][0]["images"][0]["resource"]["@id"],
        json!("https://example.org/photo-color.jpg")
    );
    // The annotation is anonymous, so the collapse is reported on its canvas.
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].kind,
        DiagnosticKind::ChoiceCollapsed {
            kept: "https://example.org/photo-color.jpg".to_string(),
            dropped: vec!["https://example.org/photo-bw.jpg".to_string()],
        }
    );
    assert_eq!(
        result.diagnostics[0].resource_id,
        "https://example.org/iiif/photo/canvas/1"
    );
}

// ── Options ─────────────────────────────────────────────────────────────────

#[test]
fn test_manifest_id_override() {
    let options = ConvertOptions::with_manifest_id("https://example.org/manifest/v2/123.json");
    let m = convert(&fixture("minimal"), &options).unwrap().manifest;

    assert_eq!(m["@id"], json!("https://example.org/manifest/v2/123.json"));
    assert_eq!(
        m["sequences"][0]["@id"],
        json!("https://example.org/manifest/v2/123.json/sequence/normal")
    );
    // Canvas identifiers are never rewritten.
    assert_eq!(m["sequences"][0]["canvases"][0]["@id"], json!("c1"));
}

#[test]
fn test_empty_manifest_id_override_falls_back_to_source_id() {
    let m = convert(&fixture("minimal"), &ConvertOptions::with_manifest_id(""))
        .unwrap()
        .manifest;
    assert_eq!(m["@id"], json!("m1"));
    assert_eq!(m["sequences"][0]["@id"], json!("m1/sequence/normal"));
}

// ── Fatal errors ────────────────────────────────────────────────────────────

#[test]
fn test_collection_is_unsupported() {
    let err = convert(&fixture("collection"), &ConvertOptions::default()).unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::UnsupportedShape);
    assert!(err.to_string().contains("Collection"));
}

#[test]
fn test_invalid_json_text_is_malformed() {
    let err = convert_str("{\"id\": \"m1\",", &ConvertOptions::default()).unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::MalformedInput);
    assert_eq!(err.to_json()["code"], json!("malformed_input"));
}

#[test]
fn test_missing_type_is_malformed() {
    let err = convert(&json!({ "id": "m1", "items": [] }), &ConvertOptions::default())
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::MalformedInput);
}

#[test]
fn test_nested_manifest_item_is_unsupported() {
    let input = json!({
        "id": "m1",
        "type": "Manifest",
        "items": [{ "id": "m2", "type": "Manifest", "items": [] }]
    });
    let err = convert(&input, &ConvertOptions::default()).unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::UnsupportedShape);
    assert_eq!(err.path(), Some("#/items/0"));
}

// ── Diagnostics serialization ───────────────────────────────────────────────

#[test]
fn test_result_serializes_with_diagnostics() {
    let result = convert(&fixture("book"), &ConvertOptions::default()).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["diagnostics"][1]["severity"], json!("warning"));
    assert_eq!(
        value["diagnostics"][1]["kind"]["type"],
        json!("no_painting_annotation")
    );
    assert_eq!(value["diagnostics"][1]["path"], json!("#/items/2"));
}
