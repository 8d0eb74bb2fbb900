//! Header-only CSV datasets
//!
//! Every CSV dataset is served as its header row and nothing else. Unknown dataset
//! names fall back to the `ClinicalView` columns.

use crate::domain::errors::MockError;
use crate::domain::Result;
use std::collections::BTreeMap;

/// Dataset used when a requested name has no columns configured
pub const DEFAULT_CSV_DATASET: &str = "ClinicalView";

/// Immutable dataset name → column list table
#[derive(Debug, Clone, Default)]
pub struct CsvHeaderTable {
    datasets: BTreeMap<String, Vec<String>>,
}

impl CsvHeaderTable {
    pub fn new(datasets: BTreeMap<String, Vec<String>>) -> Self {
        Self { datasets }
    }

    /// Columns for `dataset`, falling back to `ClinicalView`
    pub fn columns(&self, dataset: &str) -> Option<&[String]> {
        self.datasets
            .get(dataset)
            .or_else(|| self.datasets.get(DEFAULT_CSV_DATASET))
            .map(Vec::as_slice)
    }

    pub fn dataset_names(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    /// The header row for `dataset` terminated by `\n`
    ///
    /// Returns a bare `"\n"` when neither the dataset nor the fallback has columns.
    pub fn header(&self, dataset: &str) -> Result<String> {
        let columns = match self.columns(dataset) {
            Some(columns) if !columns.is_empty() => columns,
            _ => return Ok("\n".to_string()),
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(columns)?;
        let bytes = writer
            .into_inner()
            .map_err(|e| MockError::Serialization(format!("Failed to flush CSV header: {e}")))?;

        Ok(String::from_utf8(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockConfig;

    fn table() -> CsvHeaderTable {
        CsvHeaderTable::new(MockConfig::default().csv_datasets)
    }

    #[test]
    fn test_users_header() {
        let header = table().header("Users").unwrap();
        assert_eq!(
            header,
            "UserOID,Username,FirstName,LastName,Email,Active,Role\n"
        );
    }

    #[test]
    fn test_unknown_dataset_falls_back() {
        let header = table().header("Unknown").unwrap();
        assert_eq!(
            header,
            "StudyOID,SiteNumber,SubjectName,FieldOID,FieldValue,RecordDate\n"
        );
    }

    #[test]
    fn test_header_only() {
        let header = table().header("Sites").unwrap();
        let lines: Vec<&str> = header.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("SiteName"));
        assert!(lines[1].is_empty());
    }

    #[test]
    fn test_column_needing_quotes() {
        let mut datasets = BTreeMap::new();
        datasets.insert("Odd".to_string(), vec!["A,B".to_string(), "C".to_string()]);
        let header = CsvHeaderTable::new(datasets).header("Odd").unwrap();
        assert_eq!(header, "\"A,B\",C\n");
    }

    #[test]
    fn test_empty_table() {
        let header = CsvHeaderTable::default().header("Users").unwrap();
        assert_eq!(header, "\n");
    }
}
