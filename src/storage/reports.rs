//! Report repository for JSON storage
//!
//! Loads the raw daily reports kept under `reports/*.json` and indexes them
//! by date. Records are stored exactly as they were received; only the date
//! is read up front, for the index.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::AureonError;
use crate::reports::fields;

use super::file_io::{list_json_files, read_report_file, write_json_atomic};

#[derive(Debug, Default)]
struct ReportData {
    records: Vec<Value>,
    /// Index: report date -> positions in `records`
    by_date: BTreeMap<NaiveDate, Vec<usize>>,
}

/// Repository for raw report records with a date index
pub struct ReportRepository {
    dir: PathBuf,
    data: RwLock<ReportData>,
}

impl ReportRepository {
    /// Create a new report repository over a directory
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            data: RwLock::new(ReportData::default()),
        }
    }

    /// Directory the reports are read from
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Load every report file and rebuild the date index
    pub fn load(&self) -> Result<(), AureonError> {
        let mut records = Vec::new();
        for path in list_json_files(&self.dir)? {
            let mut file_records = read_report_file(&path)?;
            tracing::debug!(file = %path.display(), count = file_records.len(), "loaded report file");
            records.append(&mut file_records);
        }

        let mut by_date: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
        for (i, record) in records.iter().enumerate() {
            if let Some(date) = fields::date(record, fields::CREATED_AT) {
                by_date.entry(date).or_default().push(i);
            }
        }

        let mut data = self
            .data
            .write()
            .map_err(|e| AureonError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = ReportData { records, by_date };

        Ok(())
    }

    /// Write records to a new file in the reports directory and reload
    ///
    /// `file_name` must be a plain file name; anything that would resolve
    /// outside the reports directory is rejected.
    pub fn import(&self, file_name: &str, records: &[Value]) -> Result<PathBuf, AureonError> {
        validate_file_name(file_name)?;
        let file_name = if file_name.ends_with(".json") {
            file_name.to_string()
        } else {
            format!("{}.json", file_name)
        };
        let path = self.dir.join(file_name);
        if path.exists() {
            return Err(AureonError::Storage(format!(
                "Report file already exists: {}",
                path.display()
            )));
        }

        write_json_atomic(&path, records)?;
        self.load()?;
        Ok(path)
    }

    /// Get all records, in file order
    pub fn get_all(&self) -> Result<Vec<Value>, AureonError> {
        let data = self
            .data
            .read()
            .map_err(|e| AureonError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.records.clone())
    }

    /// Get the records dated within an inclusive range
    ///
    /// Records whose date cannot be read never match a range.
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Value>, AureonError> {
        if start > end {
            return Ok(Vec::new());
        }
        let data = self
            .data
            .read()
            .map_err(|e| AureonError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .by_date
            .range(start..=end)
            .flat_map(|(_, positions)| positions.iter())
            .map(|&i| data.records[i].clone())
            .collect())
    }

    /// Distinct hotel names, first spelling seen, sorted case-insensitively
    pub fn hotels(&self) -> Result<Vec<String>, AureonError> {
        let data = self
            .data
            .read()
            .map_err(|e| AureonError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut names: BTreeMap<String, String> = BTreeMap::new();
        for record in &data.records {
            if let Some(name) = fields::text(record, fields::HOTEL_NAME) {
                names
                    .entry(fields::hotel_key(&name))
                    .or_insert_with(|| name.trim().to_string());
            }
        }
        Ok(names.into_values().collect())
    }

    /// Number of records loaded
    pub fn count(&self) -> Result<usize, AureonError> {
        let data = self
            .data
            .read()
            .map_err(|e| AureonError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.records.len())
    }
}

fn validate_file_name(file_name: &str) -> Result<(), AureonError> {
    let mut components = Path::new(file_name).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !plain || file_name.contains(['/', '\\']) {
        return Err(AureonError::Validation(format!(
            "Invalid report file name '{}': use a plain name without directories",
            file_name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ReportRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ReportRepository::new(temp_dir.path().join("reports"));
        (temp_dir, repo)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_empty_directory() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.hotels().unwrap().is_empty());
    }

    #[test]
    fn test_import_and_query_by_date() {
        let (_temp_dir, repo) = create_test_repo();
        let records = vec![
            json!({ "hotelName": "Mbolo Hotel", "createdAt": "2025-01-02T08:00:00Z" }),
            json!({ "hotelName": "mbolo hotel", "createdAt": "2025-01-20" }),
            json!({ "hotelName": "Hotel la Dibamba", "createdAt": "2025-02-01" }),
            json!({ "hotelName": "Hotel la Dibamba" }),
            json!(null),
        ];
        let path = repo.import("january", &records).unwrap();
        assert!(path.ends_with("january.json"));

        assert_eq!(repo.count().unwrap(), 5);
        assert_eq!(
            repo.get_by_date_range(date(2025, 1, 1), date(2025, 1, 31)).unwrap().len(),
            2
        );
        assert_eq!(
            repo.get_by_date_range(date(2025, 1, 2), date(2025, 1, 2)).unwrap().len(),
            1
        );
        assert!(repo
            .get_by_date_range(date(2025, 2, 2), date(2025, 1, 1))
            .unwrap()
            .is_empty());
        assert_eq!(
            repo.hotels().unwrap(),
            vec!["Hotel la Dibamba".to_string(), "Mbolo Hotel".to_string()]
        );
    }

    #[test]
    fn test_import_refuses_to_overwrite() {
        let (_temp_dir, repo) = create_test_repo();
        repo.import("day.json", &[json!({})]).unwrap();
        assert!(repo.import("day", &[json!({})]).is_err());
    }

    #[test]
    fn test_import_rejects_names_outside_directory() {
        let (temp_dir, repo) = create_test_repo();
        for name in ["../../x", "../escape", "sub/day", "..", ".", "", "/tmp/day", "a\\b"] {
            let err = repo.import(name, &[json!({})]).unwrap_err();
            assert!(err.is_validation(), "name {:?}", name);
        }
        assert!(!temp_dir.path().join("escape.json").exists());
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_load_reads_every_file() {
        let (_temp_dir, repo) = create_test_repo();
        std::fs::create_dir_all(repo.dir()).unwrap();
        std::fs::write(repo.dir().join("a.json"), r#"[{"hotelName":"A"}]"#).unwrap();
        std::fs::write(repo.dir().join("b.json"), r#"{"data":[{"hotelName":"B"},{"hotelName":"C"}]}"#)
            .unwrap();

        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 3);
        assert_eq!(repo.get_all().unwrap()[0], json!({ "hotelName": "A" }));
    }
}
