use crate::error::LimnosError;
use crate::source::{Record, RecordSource};
use std::path::{Path, PathBuf};

enum Input {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// Headed CSV backend. The first row names the columns; extra columns are
/// carried through and ignored by the builder.
pub struct CsvSource {
    input: Input,
}

impl CsvSource {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        CsvSource {
            input: Input::Path(path.as_ref().to_path_buf()),
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        CsvSource {
            input: Input::Bytes(bytes.into()),
        }
    }

    fn read<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Record>, LimnosError> {
        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(LimnosError::Source("CSV has no header row".into()));
        }

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let record = Record::from_pairs(
                headers
                    .iter()
                    .zip(row.iter())
                    .map(|(h, v)| (h.trim(), v)),
            );
            records.push(record);
        }

        Ok(records)
    }
}

impl RecordSource for CsvSource {
    fn records(&self) -> Result<Vec<Record>, LimnosError> {
        let records = match &self.input {
            Input::Path(path) => {
                let file = std::fs::File::open(path)?;
                Self::read(reader_builder().from_reader(file))?
            }
            Input::Bytes(bytes) => Self::read(reader_builder().from_reader(bytes.as_slice()))?,
        };
        tracing::debug!(rows = records.len(), "read CSV records");
        Ok(records)
    }

    fn source_name(&self) -> &str {
        "csv"
    }
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true).trim(csv::Trim::Headers);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_headed_rows() {
        let csv = "sample.samplingPoint.notation,result\nTP1,0.5\nTP2,1.25\n";
        let records = CsvSource::from_bytes(csv).records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("sample.samplingPoint.notation"), Some("TP1"));
        assert_eq!(records[1].get("result"), Some("1.25"));
    }

    #[test]
    fn test_quoted_commas_survive() {
        let csv = "sample.samplingPoint.label,result\n\"RIVER X, AT BRIDGE\",3\n";
        let records = CsvSource::from_bytes(csv).records().unwrap();
        assert_eq!(
            records[0].get("sample.samplingPoint.label"),
            Some("RIVER X, AT BRIDGE")
        );
    }

    #[test]
    fn test_short_row_leaves_column_missing() {
        let csv = "a,b,c\n1,2\n";
        let records = CsvSource::from_bytes(csv).records().unwrap();
        assert_eq!(records[0].get("b"), Some("2"));
        assert_eq!(records[0].get("c"), None);
    }

    #[test]
    fn test_reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "result").unwrap();
        writeln!(file, "7").unwrap();
        let records = CsvSource::from_path(file.path()).records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("result"), Some("7"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CsvSource::from_path("/nonexistent/limnos.csv")
            .records()
            .unwrap_err();
        assert!(matches!(err, LimnosError::Io(_)));
    }
}
