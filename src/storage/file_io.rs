//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure, and
//! readers for the report files exported by the accounting backend.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::AureonError;

/// Read a report file as a list of raw records
///
/// A file may hold an array of records, a single record, or the backend's
/// response envelope `{ "data": [...] }`. Records are returned untouched;
/// validation is left to the aggregator.
pub fn read_report_file<P: AsRef<Path>>(path: P) -> Result<Vec<Value>, AureonError> {
    let path = path.as_ref();

    let file = File::open(path)
        .map_err(|e| AureonError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    let value: Value = serde_json::from_reader(reader)
        .map_err(|e| AureonError::Storage(format!("Failed to parse {}: {}", path.display(), e)))?;

    Ok(flatten_payload(value))
}

/// Unwrap a JSON payload into its records
pub fn flatten_payload(value: Value) -> Vec<Value> {
    match value {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(records)) => records,
            Some(other) => {
                map.insert("data".to_string(), other);
                vec![Value::Object(map)]
            }
            None => vec![Value::Object(map)],
        },
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// List the `*.json` files of a directory, sorted by name
///
/// A missing directory yields an empty list.
pub fn list_json_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, AureonError> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir)
        .map_err(|e| AureonError::Storage(format!("Failed to read {}: {}", dir.display(), e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| AureonError::Storage(format!("Failed to read {}: {}", dir.display(), e)))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), AureonError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AureonError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file in the same directory, so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| AureonError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| AureonError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| AureonError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| AureonError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        AureonError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_flatten_payload_shapes() {
        assert_eq!(flatten_payload(json!([1, 2])).len(), 2);
        assert_eq!(flatten_payload(json!({ "data": [{}, {}, {}] })).len(), 3);
        assert_eq!(
            flatten_payload(json!({ "hotelName": "A" })),
            vec![json!({ "hotelName": "A" })]
        );
        assert_eq!(
            flatten_payload(json!({ "data": "x", "hotelName": "A" })),
            vec![json!({ "data": "x", "hotelName": "A" })]
        );
        assert!(flatten_payload(json!(null)).is_empty());
    }

    #[test]
    fn test_write_and_read_report_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("reports.json");
        let records = vec![json!({ "hotelName": "Mbolo Hotel", "montantBar": 10 })];

        write_json_atomic(&path, &records).unwrap();
        assert!(path.exists());
        assert!(!temp_dir.path().join("nested").join("reports.json.tmp").exists());

        assert_eq!(read_report_file(&path).unwrap(), records);
    }

    #[test]
    fn test_read_invalid_report_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_report_file(&path).unwrap_err();
        assert!(matches!(err, AureonError::Storage(_)));
        assert!(read_report_file(temp_dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_list_json_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.json"), "[]").unwrap();
        fs::write(temp_dir.path().join("a.json"), "[]").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let files = list_json_files(temp_dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);

        assert!(list_json_files(temp_dir.path().join("missing")).unwrap().is_empty());
    }
}
