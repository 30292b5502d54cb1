//! Loader: raw JSON → Presentation 3 model.
//!
//! Only the fields the mapper reads are extracted; everything else is
//! ignored so newer documents still load. Mandatory fields (`id` and `type`
//! on the manifest and on each canvas) are enforced here. Both the v3
//! spelling (`id`, `type`) and the JSON-LD 1.0 spelling (`@id`, `@type`) are
//! accepted, and the v3 spelling wins when a node carries both.
//!
//! Optional properties with an unexpected shape are dropped rather than
//! rejected: a label that is a number is no label at all.

use serde_json::{Map, Value};

use crate::error::ConvertError;
use crate::model::language::LanguageMap;
use crate::model::v3::{
    Annotation, AnnotationPage, Body, Canvas, ContentResource, Manifest, MetadataEntry, Service,
};

type Object = Map<String, Value>;

/// Parse a Presentation 3 manifest.
///
/// # Errors
///
/// - [`ConvertError::MalformedInput`] when the document is not an object or
///   a manifest/canvas lacks a string `id` or `type`.
/// - [`ConvertError::UnsupportedShape`] when the top-level type is not
///   `Manifest`, or an entry of `items` is not a `Canvas`.
pub fn parse_manifest(value: &Value) -> Result<Manifest, ConvertError> {
    let path = "#";
    let obj = as_object(value, path)?;

    let kind = required_str(obj, "type", "@type", path)?;
    if kind != "Manifest" {
        return Err(ConvertError::unsupported(
            path,
            format!("top-level type '{kind}' (expected 'Manifest')"),
        ));
    }
    let id = required_str(obj, "id", "@id", path)?;

    let items = match obj.get("items") {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| parse_canvas(item, &format!("{path}/items/{i}")))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(ConvertError::malformed(
                format!("{path}/items"),
                "'items' must be an array of canvases",
            ))
        }
    };

    Ok(Manifest {
        id: id.to_string(),
        label: obj.get("label").and_then(parse_language_map),
        summary: obj.get("summary").and_then(parse_language_map),
        metadata: obj
            .get("metadata")
            .map(parse_metadata)
            .unwrap_or_default(),
        required_statement: obj.get("requiredStatement").and_then(parse_metadata_entry),
        rights: optional_string(obj, "rights"),
        nav_date: optional_string(obj, "navDate"),
        behavior: obj.get("behavior").map(string_list).unwrap_or_default(),
        viewing_direction: optional_string(obj, "viewingDirection"),
        thumbnail: obj.get("thumbnail").map(parse_resources).unwrap_or_default(),
        items,
        has_structures: obj.contains_key("structures"),
    })
}

fn parse_canvas(value: &Value, path: &str) -> Result<Canvas, ConvertError> {
    let obj = as_object(value, path)?;

    let kind = required_str(obj, "type", "@type", path)?;
    if kind != "Canvas" {
        return Err(ConvertError::unsupported(
            path,
            format!("item of type '{kind}' (expected 'Canvas')"),
        ));
    }
    let id = required_str(obj, "id", "@id", path)?;

    let pages = obj
        .get("items")
        .and_then(Value::as_array)
        .map(|pages| {
            pages
                .iter()
                .filter_map(Value::as_object)
                .map(parse_annotation_page)
                .collect()
        })
        .unwrap_or_default();

    Ok(Canvas {
        id: id.to_string(),
        label: obj.get("label").and_then(parse_language_map),
        width: dimension(obj, "width"),
        height: dimension(obj, "height"),
        thumbnail: obj.get("thumbnail").map(parse_resources).unwrap_or_default(),
        items: pages,
    })
}

fn parse_annotation_page(obj: &Object) -> AnnotationPage {
    let annotations = obj
        .get("items")
        .and_then(Value::as_array)
        .map(|annos| {
            annos
                .iter()
                .filter_map(Value::as_object)
                .map(parse_annotation)
                .collect()
        })
        .unwrap_or_default();

    AnnotationPage {
        id: lenient_str(obj, "id", "@id"),
        items: annotations,
    }
}

fn parse_annotation(obj: &Object) -> Annotation {
    Annotation {
        id: lenient_str(obj, "id", "@id"),
        motivation: obj.get("motivation").map(string_list).unwrap_or_default(),
        body: obj.get("body").and_then(parse_body),
    }
}

/// An array body and a `Choice` object both become [`Body::Choice`].
fn parse_body(value: &Value) -> Option<Body> {
    match value {
        Value::Object(obj) if lenient_str(obj, "type", "@type").as_deref() == Some("Choice") => {
            Some(Body::Choice(
                obj.get("items").map(parse_resources).unwrap_or_default(),
            ))
        }
        Value::Object(obj) => Some(Body::Single(parse_resource(obj))),
        Value::Array(_) => Some(Body::Choice(parse_resources(value))),
        _ => None,
    }
}

/// Accepts a single resource object or an array of them.
fn parse_resources(value: &Value) -> Vec<ContentResource> {
    match value {
        Value::Object(obj) => vec![parse_resource(obj)],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_object)
            .map(parse_resource)
            .collect(),
        _ => Vec::new(),
    }
}

fn parse_resource(obj: &Object) -> ContentResource {
    let service = match obj.get("service") {
        Some(Value::Object(svc)) => vec![parse_service(svc)],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_object)
            .map(parse_service)
            .collect(),
        _ => Vec::new(),
    };

    ContentResource {
        id: lenient_str(obj, "id", "@id"),
        kind: lenient_str(obj, "type", "@type"),
        format: optional_string(obj, "format"),
        width: dimension(obj, "width"),
        height: dimension(obj, "height"),
        service,
    }
}

fn parse_service(obj: &Object) -> Service {
    // v2-era services sometimes list several profiles; the first is the
    // compliance level.
    let profile = match obj.get("profile") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Array(items)) => items.iter().find_map(Value::as_str).map(str::to_string),
        _ => None,
    };

    Service {
        id: lenient_str(obj, "id", "@id"),
        kind: lenient_str(obj, "type", "@type"),
        profile,
    }
}

fn parse_metadata(value: &Value) -> Vec<MetadataEntry> {
    match value.as_array() {
        Some(entries) => entries.iter().filter_map(parse_metadata_entry).collect(),
        None => {
            tracing::debug!("ignoring non-array 'metadata'");
            Vec::new()
        }
    }
}

fn parse_metadata_entry(value: &Value) -> Option<MetadataEntry> {
    let obj = value.as_object()?;
    Some(MetadataEntry {
        label: obj
            .get("label")
            .and_then(parse_language_map)
            .unwrap_or_default(),
        value: obj
            .get("value")
            .and_then(parse_language_map)
            .unwrap_or_default(),
    })
}

/// Parse a language map, keeping tag order as written.
///
/// Each tag's value may be a list of strings or a lone string. A bare
/// string in place of the whole map is read as an untagged value.
pub fn parse_language_map(value: &Value) -> Option<LanguageMap> {
    match value {
        Value::Object(obj) => Some(
            obj.iter()
                .map(|(tag, values)| (tag.clone(), string_list(values)))
                .collect(),
        ),
        Value::String(s) => Some(LanguageMap::untagged(s.as_str())),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Object, ConvertError> {
    value
        .as_object()
        .ok_or_else(|| ConvertError::malformed(path, "expected a JSON object"))
}

/// A mandatory string field, read as `canonical` or else `legacy`.
fn required_str<'a>(
    obj: &'a Object,
    canonical: &str,
    legacy: &str,
    path: &str,
) -> Result<&'a str, ConvertError> {
    match obj.get(canonical).or_else(|| obj.get(legacy)) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(ConvertError::malformed(
            path,
            format!("'{canonical}' must be a string"),
        )),
        None => Err(ConvertError::malformed(
            path,
            format!("missing required '{canonical}'"),
        )),
    }
}

/// An optional string field, read as `canonical` or else `legacy`.
fn lenient_str(obj: &Object, canonical: &str, legacy: &str) -> Option<String> {
    obj.get(canonical)
        .or_else(|| obj.get(legacy))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn optional_string(obj: &Object, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// A string or an array of strings. Non-string array entries are skipped.
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// A positive integer dimension. Zero, negative and fractional values are
/// treated as absent.
fn dimension(obj: &Object, key: &str) -> Option<u64> {
    let value = obj.get(key)?;
    match value.as_u64().filter(|v| *v > 0) {
        Some(v) => Some(v),
        None => {
            tracing::debug!(key, %value, "omitting invalid dimension");
            None
        }
    }
}
