pub mod csv_file;
pub mod xlsx;

use crate::error::LimnosError;
use std::collections::BTreeMap;
use std::path::Path;

pub use csv_file::CsvSource;
pub use xlsx::XlsxSource;

/// One flat input row: column name -> raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Record {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Trait for tabular record backends.
pub trait RecordSource: Send + Sync {
    /// Read every row, in file order.
    fn records(&self) -> Result<Vec<Record>, LimnosError>;

    /// Name of this backend (for diagnostics).
    fn source_name(&self) -> &str;
}

/// Pick a backend from the file extension. Anything that is not `.xlsx`
/// is read as CSV.
pub fn open_path(path: &Path) -> Box<dyn RecordSource> {
    let is_xlsx = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);

    if is_xlsx {
        Box::new(XlsxSource::from_path(path))
    } else {
        Box::new(CsvSource::from_path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_get_missing_column() {
        let r = Record::from_pairs([("result", "1.5")]);
        assert_eq!(r.get("result"), Some("1.5"));
        assert_eq!(r.get("determinand.label"), None);
    }

    #[test]
    fn test_open_path_picks_backend_by_extension() {
        assert_eq!(open_path(Path::new("data.xlsx")).source_name(), "xlsx");
        assert_eq!(open_path(Path::new("data.XLSX")).source_name(), "xlsx");
        assert_eq!(open_path(Path::new("data.csv")).source_name(), "csv");
        assert_eq!(open_path(Path::new("data")).source_name(), "csv");
    }
}
