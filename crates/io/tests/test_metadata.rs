//! Integration tests: materialising schema metadata into a NetCDF file.

use std::path::{Path, PathBuf};

use geonc_io::{Converter, FileMode, IoError};
use geonc_schema::{AttributeSpec, DimensionSpec, Schema, SchemaError, TypeTag, VariableSpec};
use netcdf::AttributeValue;
use tempfile::tempdir;

fn create(dir: &Path, schema: Schema) -> (Converter, PathBuf) {
    let path = dir.join("meta.nc");
    let conv = Converter::new(schema, &path, FileMode::Replace).expect("create converter");
    (conv, path)
}

fn attr(file: &netcdf::File, var: &str, name: &str) -> Option<AttributeValue> {
    file.variable(var)
        .expect("variable exists")
        .attribute_value(name)
        .map(|r| r.expect("attribute readable"))
}

#[test]
fn dimensions_created_in_declared_order() {
    let dir = tempdir().unwrap();
    let schema = Schema::new(
        vec![
            DimensionSpec::new("node", 5),
            DimensionSpec::new("time", 1),
            DimensionSpec::new("elem", 2),
        ],
        vec![],
    );
    let (mut conv, path) = create(dir.path(), schema);
    conv.write_dimensions().unwrap();

    let names: Vec<(String, usize)> = conv.container().dimensions();
    assert_eq!(
        names,
        vec![
            ("node".to_string(), 5),
            ("time".to_string(), 1),
            ("elem".to_string(), 2)
        ]
    );
    drop(conv);

    let file = netcdf::open(&path).unwrap();
    let on_disk: Vec<String> = file.dimensions().map(|d| d.name()).collect();
    assert_eq!(on_disk, ["node", "time", "elem"]);
}

#[test]
fn write_dimensions_is_idempotent() {
    let dir = tempdir().unwrap();
    let schema = Schema::new(vec![DimensionSpec::new("node", 3)], vec![]);
    let (mut conv, _path) = create(dir.path(), schema);
    conv.write_dimensions().unwrap();
    conv.write_dimensions().unwrap();
    assert_eq!(conv.container().dimension_len("node"), Some(3));
}

#[test]
fn conflicting_dimension_in_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("existing.nc");
    {
        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension("node", 4).unwrap();
    }

    let schema = Schema::new(vec![DimensionSpec::new("node", 3)], vec![]);
    let mut conv = Converter::new(schema, &path, FileMode::Write).unwrap();
    let err = conv.write_dimensions().unwrap_err();
    assert!(
        matches!(
            err,
            IoError::DuplicateDimension {
                existing: 4,
                requested: 3,
                ..
            }
        ),
        "got {err:?}"
    );
}

#[test]
fn variable_shape_is_dimension_product() {
    let dir = tempdir().unwrap();
    let schema = Schema::new(
        vec![DimensionSpec::new("time", 2), DimensionSpec::new("node", 3)],
        vec![VariableSpec::new("u", "float", ["time", "node"])],
    );
    let (mut conv, _path) = create(dir.path(), schema);
    conv.write_dimensions().unwrap();
    let binding = conv.write_variable_definition("u").unwrap();

    assert_eq!(binding.tag(), TypeTag::F32);
    assert_eq!(binding.shape(), vec![2, 3]);
    assert_eq!(binding.len(), 6);
    assert_eq!(conv.container().variable_shape("u"), Some(vec![2, 3]));
}

#[test]
fn undeclared_dimension_creates_nothing() {
    let dir = tempdir().unwrap();
    let schema = Schema::new(
        vec![DimensionSpec::new("node", 3)],
        vec![VariableSpec::new("lat", "double", ["bogus"])],
    );
    let (mut conv, _path) = create(dir.path(), schema);
    conv.write_dimensions().unwrap();

    let err = conv.write_variable_definition("lat").unwrap_err();
    assert!(
        matches!(err, IoError::UnknownDimension { ref name, .. } if name == "bogus"),
        "got {err:?}"
    );
    assert!(!conv.container().has_variable("lat"));
}

#[test]
fn variable_before_dimensions_fails() {
    let dir = tempdir().unwrap();
    let schema = Schema::new(
        vec![DimensionSpec::new("node", 3)],
        vec![VariableSpec::new("lat", "double", ["node"])],
    );
    let (mut conv, _path) = create(dir.path(), schema);

    let err = conv.write_variable_definition("lat").unwrap_err();
    assert!(matches!(err, IoError::UnknownDimension { .. }));
}

#[test]
fn unknown_variable_type() {
    let dir = tempdir().unwrap();
    let schema = Schema::new(vec![], vec![VariableSpec::new("v", "quad", Vec::<String>::new())]);
    let (mut conv, _path) = create(dir.path(), schema);

    let err = conv.write_variable_definition("v").unwrap_err();
    assert!(
        matches!(
            err,
            IoError::Schema {
                source: SchemaError::UnknownType { .. }
            }
        ),
        "got {err:?}"
    );
    assert!(!conv.container().has_variable("v"));
}

#[test]
fn undeclared_variable() {
    let dir = tempdir().unwrap();
    let (mut conv, _path) = create(dir.path(), Schema::default());
    let err = conv.write_variable_definition("nope").unwrap_err();
    assert!(matches!(
        err,
        IoError::Schema {
            source: SchemaError::VariableNotFound { .. }
        }
    ));
}

#[test]
fn redefining_identical_variable_is_noop() {
    let dir = tempdir().unwrap();
    let schema = Schema::new(
        vec![DimensionSpec::new("node", 3)],
        vec![VariableSpec::new("lat", "double", ["node"])],
    );
    let (mut conv, _path) = create(dir.path(), schema);
    conv.write_dimensions().unwrap();
    let first = conv.write_variable_definition("lat").unwrap();
    let second = conv.write_variable_definition("lat").unwrap();
    assert_eq!(first, second);
}

#[test]
fn redefining_with_different_type_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("existing.nc");
    {
        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension("node", 2).unwrap();
        file.add_variable::<i32>("x", &["node"]).unwrap();
    }

    let schema = Schema::new(
        vec![DimensionSpec::new("node", 2)],
        vec![VariableSpec::new("x", "double", ["node"])],
    );
    let mut conv = Converter::new(schema, &path, FileMode::Write).unwrap();
    conv.write_dimensions().unwrap();
    let err = conv.write_variable_definition("x").unwrap_err();
    assert!(
        matches!(err, IoError::DuplicateVariable { ref name } if name == "x"),
        "got {err:?}"
    );
    assert_eq!(conv.container().variable_type("x").unwrap(), TypeTag::I32);
}

#[test]
fn zero_length_dimension_rejected() {
    let dir = tempdir().unwrap();
    let schema = Schema::new(vec![DimensionSpec::new("rec", 0)], vec![]);
    let (mut conv, _path) = create(dir.path(), schema);
    let err = conv.write_dimensions().unwrap_err();
    assert!(
        matches!(err, IoError::ZeroLengthDimension { ref name } if name == "rec"),
        "got {err:?}"
    );
    assert_eq!(conv.container().dimension_len("rec"), None);
}

#[test]
fn attributes_written_with_declared_types() {
    let dir = tempdir().unwrap();
    let schema = Schema::new(
        vec![DimensionSpec::new("node", 2)],
        vec![
            VariableSpec::new("temp", "double", ["node"])
                .with_attribute(AttributeSpec::new("units", "string", "K"))
                .with_attribute(AttributeSpec::new("_FillValue", "double", "-9999.5"))
                .with_attribute(AttributeSpec::new("level", "int", "3"))
                .with_attribute(AttributeSpec::new("scale", "float", "0.5")),
        ],
    );
    let (mut conv, path) = create(dir.path(), schema);
    let report = conv.write_metadata().unwrap();
    assert!(report.is_clean());
    assert_eq!(report.written(), 4);
    drop(conv);

    let file = netcdf::open(&path).unwrap();
    match attr(&file, "temp", "units") {
        Some(AttributeValue::Str(s)) => assert_eq!(s, "K"),
        other => panic!("expected string units, got {other:?}"),
    }
    match attr(&file, "temp", "_FillValue") {
        Some(AttributeValue::Double(v)) => assert_eq!(v, -9999.5),
        other => panic!("expected double _FillValue, got {other:?}"),
    }
    match attr(&file, "temp", "level") {
        Some(AttributeValue::Int(v)) => assert_eq!(v, 3),
        other => panic!("expected int level, got {other:?}"),
    }
    match attr(&file, "temp", "scale") {
        Some(AttributeValue::Float(v)) => assert_eq!(v, 0.5),
        other => panic!("expected float scale, got {other:?}"),
    }
}

#[test]
fn unparseable_attribute_skipped_siblings_kept() {
    let dir = tempdir().unwrap();
    let schema = Schema::new(
        vec![DimensionSpec::new("node", 2)],
        vec![
            VariableSpec::new("temp", "double", ["node"])
                .with_attribute(AttributeSpec::new("units", "string", "K"))
                .with_attribute(AttributeSpec::new("valid_max", "double", "hot"))
                .with_attribute(AttributeSpec::new("level", "int", "3")),
        ],
    );
    let (mut conv, path) = create(dir.path(), schema);
    let report = conv.write_metadata().unwrap();

    assert_eq!(report.written(), 2);
    assert_eq!(report.issues().len(), 1);
    let issue = &report.issues()[0];
    assert_eq!(issue.variable, "temp");
    assert_eq!(issue.attribute, "valid_max");
    assert!(matches!(
        issue.error,
        SchemaError::AttributeValueParse { type_name: "double", .. }
    ));
    drop(conv);

    let file = netcdf::open(&path).unwrap();
    assert!(attr(&file, "temp", "units").is_some());
    assert!(attr(&file, "temp", "valid_max").is_none());
    assert!(attr(&file, "temp", "level").is_some());
}

#[test]
fn unknown_attribute_type_is_fatal() {
    let dir = tempdir().unwrap();
    let schema = Schema::new(
        vec![],
        vec![
            VariableSpec::new("v", "int", Vec::<String>::new())
                .with_attribute(AttributeSpec::new("a", "decimal", "1")),
        ],
    );
    let (mut conv, _path) = create(dir.path(), schema);
    conv.write_variable_definition("v").unwrap();
    let err = conv.write_variable_attributes("v").unwrap_err();
    assert!(matches!(
        err,
        IoError::Schema {
            source: SchemaError::UnknownType { .. }
        }
    ));
}

#[test]
fn read_only_container_rejects_metadata() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ro.nc");
    drop(netcdf::create(&path).unwrap());

    let schema = Schema::new(vec![DimensionSpec::new("node", 1)], vec![]);
    let mut conv = Converter::new(schema, &path, FileMode::Read).unwrap();
    let err = conv.write_dimensions().unwrap_err();
    assert!(matches!(err, IoError::ReadOnly { .. }));
}
