//! Declarative TOML block definitions.
//!
//! The build walk loads every `*.toml` file in the blocks directory so
//! editors can add block types without recompiling. A file declares one
//! keyed block:
//!
//! ```toml
//! id = "Hero"
//! title = "Hero"
//! renderer = "hero"
//!
//! [shape]
//! type = "object"
//!
//! [shape.fields.title]
//! type = "string"
//! description = "Hero title"
//! default = "Welcome"
//!
//! [shape.fields.cta]
//! type = "lazy"
//! ref = "Link"
//! optional = true
//! ```
//!
//! Node types: `string`, `number`, `integer`, `boolean`, `object` (with
//! `fields`), `array` (with `item`), `enum` (with `variants`), `union`
//! (with `one_of`), and `lazy` (with `ref`). A broken file is reported and
//! skipped; it never aborts the walk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::catalog::{BlockMeta, SchemaCatalog};
use crate::error::SchemaError;
use crate::shape::{Field, Shape};

#[derive(Debug, Deserialize)]
struct BlockSource {
    id: String,
    title: Option<String>,
    description: Option<String>,
    renderer: Option<String>,
    input_type: Option<String>,
    shape: ShapeSource,
}

#[derive(Debug, Deserialize)]
struct ShapeSource {
    #[serde(rename = "type")]
    kind: String,
    description: Option<String>,
    default: Option<toml::Value>,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    optional: bool,
    fields: Option<BTreeMap<String, ShapeSource>>,
    item: Option<Box<ShapeSource>>,
    variants: Option<Vec<String>>,
    one_of: Option<Vec<ShapeSource>>,
    #[serde(rename = "ref")]
    reference: Option<String>,
}

/// What a directory walk registered and what it had to skip.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub registered: Vec<String>,
    pub skipped: Vec<(PathBuf, String)>,
}

/// Parse one block source document.
///
/// # Errors
///
/// Returns [`SchemaError::Source`] when the TOML or the shape grammar is
/// invalid.
pub fn parse(text: &str, origin: &Path) -> Result<(BlockMeta, Shape), SchemaError> {
    let source: BlockSource = toml::from_str(text).map_err(|error| SchemaError::Source {
        path: origin.display().to_string(),
        reason: error.to_string(),
    })?;

    let shape = build_shape(source.shape, origin)?;
    let mut meta = BlockMeta::keyed(source.id);
    if let Some(title) = source.title {
        meta = meta.title(title);
    }
    if let Some(description) = source.description {
        meta = meta.description(description);
    }
    if let Some(renderer) = source.renderer {
        meta = meta.renderer(renderer.as_str());
    }
    if let Some(hint) = source.input_type {
        meta = meta.input_type(hint);
    }

    Ok((meta, shape))
}

/// Load and parse one block source file.
///
/// # Errors
///
/// Returns [`SchemaError::Io`] on read failure or [`SchemaError::Source`]
/// on parse failure.
pub fn load_file(path: &Path) -> Result<(BlockMeta, Shape), SchemaError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text, path)
}

/// Walk `dir` for `*.toml` block sources and register each on `catalog`.
///
/// Files are visited in path order so repeated walks produce the same
/// catalog state. A file that fails to parse or compile is logged,
/// recorded in the report, and skipped.
///
/// # Errors
///
/// Returns [`SchemaError::Io`] only if the directory itself cannot be
/// read.
pub fn load_dir(catalog: &SchemaCatalog, dir: &Path) -> Result<LoadReport, SchemaError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    let mut report = LoadReport::default();
    for path in paths {
        match load_file(&path).and_then(|(meta, shape)| catalog.register(meta, shape)) {
            Ok(entry) => report.registered.push(entry.id().to_string()),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "skipping block source");
                report.skipped.push((path, error.to_string()));
            }
        }
    }

    Ok(report)
}

fn build_shape(source: ShapeSource, origin: &Path) -> Result<Shape, SchemaError> {
    let malformed = |reason: String| SchemaError::Source {
        path: origin.display().to_string(),
        reason,
    };

    let mut shape = match source.kind.as_str() {
        "string" => Shape::string(),
        "number" => Shape::number(),
        "integer" => Shape::integer(),
        "boolean" => Shape::boolean(),
        "object" => {
            let mut fields = Vec::new();
            for (name, field_source) in source.fields.unwrap_or_default() {
                let optional = field_source.optional;
                let mut field = Field::new(name, build_shape(field_source, origin)?);
                if optional {
                    field = field.optional();
                }
                fields.push(field);
            }
            Shape::object(fields)
        }
        "array" => {
            let item = source
                .item
                .ok_or_else(|| malformed("array node without item".into()))?;
            Shape::array(build_shape(*item, origin)?)
        }
        "enum" => {
            let variants = source
                .variants
                .ok_or_else(|| malformed("enum node without variants".into()))?;
            Shape::enumeration(variants)
        }
        "union" => {
            let variants = source
                .one_of
                .ok_or_else(|| malformed("union node without one_of".into()))?
                .into_iter()
                .map(|variant| build_shape(variant, origin))
                .collect::<Result<Vec<_>, _>>()?;
            Shape::one_of(variants)
        }
        "lazy" => {
            let reference = source
                .reference
                .ok_or_else(|| malformed("lazy node without ref".into()))?;
            Shape::lazy(reference)
        }
        other => return Err(malformed(format!("unknown shape type '{other}'"))),
    };

    if let Some(description) = source.description {
        shape = shape.describe(description);
    }
    if let Some(default) = source.default {
        shape = shape.default_value(toml_to_json(default));
    }
    if source.nullable {
        shape = shape.nullable();
    }

    Ok(shape)
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(text) => Value::String(text),
        toml::Value::Integer(number) => Value::from(number),
        toml::Value::Float(number) => {
            serde_json::Number::from_f64(number).map_or(Value::Null, Value::Number)
        }
        toml::Value::Boolean(flag) => Value::Bool(flag),
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, item)| (key, toml_to_json(item)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const HERO: &str = r#"
id = "Hero"
title = "Hero"
renderer = "hero"

[shape]
type = "object"

[shape.fields.title]
type = "string"
description = "Hero title"
default = "Welcome"

[shape.fields.style]
type = "enum"
variants = ["wide", "boxed"]
default = "wide"

[shape.fields.tags]
type = "array"
optional = true
[shape.fields.tags.item]
type = "string"
"#;

    #[test]
    fn parses_block_source() {
        let (meta, shape) = parse(HERO, Path::new("hero.toml")).unwrap();
        assert_eq!(meta.id.as_deref(), Some("Hero"));
        assert_eq!(meta.renderer.as_ref().map(|r| r.as_str()), Some("hero"));

        let catalog = SchemaCatalog::new();
        let entry = catalog.register(meta, shape).unwrap();
        assert!(entry.validate(&json!({"title": "Hi", "style": "boxed"})).is_ok());
        assert!(entry.validate(&json!({"title": "Hi", "style": "round"})).is_err());
    }

    #[test]
    fn rejects_unknown_shape_type() {
        let text = "id = \"Bad\"\n[shape]\ntype = \"maybe\"\n";
        assert!(matches!(
            parse(text, Path::new("bad.toml")),
            Err(SchemaError::Source { .. })
        ));
    }

    #[test]
    fn load_dir_skips_broken_files_and_registers_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hero.toml"), HERO).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "id = \"X\"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a block").unwrap();

        let catalog = SchemaCatalog::new();
        let report = load_dir(&catalog, dir.path()).unwrap();

        assert_eq!(report.registered, vec!["Hero".to_string()]);
        assert_eq!(report.skipped.len(), 1);
        assert!(catalog.lookup("Hero").is_some());
    }

    #[test]
    fn repeated_walks_replace_rather_than_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hero.toml"), HERO).unwrap();

        let catalog = SchemaCatalog::new();
        load_dir(&catalog, dir.path()).unwrap();
        load_dir(&catalog, dir.path()).unwrap();

        assert_eq!(catalog.ids(), vec!["Hero".to_string()]);
        assert_eq!(catalog.len(), 1);
    }
}
