use std::io::Cursor;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx};

use crate::error::LimnosError;
use crate::source::{Record, RecordSource};

enum Input {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// XLSX backend: first worksheet, first row is the header.
///
/// Reading stops at the first fully empty row.
pub struct XlsxSource {
    input: Input,
}

impl XlsxSource {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        XlsxSource {
            input: Input::Path(path.as_ref().to_path_buf()),
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        XlsxSource {
            input: Input::Bytes(bytes.into()),
        }
    }
}

impl RecordSource for XlsxSource {
    fn records(&self) -> Result<Vec<Record>, LimnosError> {
        let bytes = match &self.input {
            Input::Path(path) => std::fs::read(path)?,
            Input::Bytes(bytes) => bytes.clone(),
        };

        let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes))
            .map_err(|e| LimnosError::Source(format!("failed to open xlsx: {e}")))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| LimnosError::Source("xlsx has no worksheets".into()))?
            .map_err(|e| LimnosError::Source(format!("failed to read first sheet: {e}")))?;

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|c| cell_as_string(c).unwrap_or_default())
                .collect(),
            None => return Err(LimnosError::Source("xlsx sheet is empty".into())),
        };

        let mut records = Vec::new();
        for row in rows {
            if row.iter().all(|c| matches!(c, Data::Empty)) {
                break;
            }

            let mut record = Record::new();
            for (header, cell) in headers.iter().zip(row.iter()) {
                if header.is_empty() {
                    continue;
                }
                if let Some(text) = cell_as_string(cell) {
                    record.insert(header.clone(), text);
                }
            }
            records.push(record);
        }

        tracing::debug!(rows = records.len(), "read xlsx records");
        Ok(records)
    }

    fn source_name(&self) -> &str {
        "xlsx"
    }
}

/// Render a cell as the text a CSV export would have carried.
fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => Some(s.trim().to_string()),
        Data::Float(f) => Some(format!("{f}")),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => Some(naive.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => Some(format!("{cell}")),
        },
        Data::DateTimeIso(s) => Some(s.clone()),
        Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_cells_render_like_csv() {
        assert_eq!(cell_as_string(&Data::Float(449100.0)).as_deref(), Some("449100"));
        assert_eq!(cell_as_string(&Data::Float(0.25)).as_deref(), Some("0.25"));
        assert_eq!(cell_as_string(&Data::Int(12)).as_deref(), Some("12"));
    }

    #[test]
    fn test_bool_and_empty_cells() {
        assert_eq!(cell_as_string(&Data::Bool(true)).as_deref(), Some("true"));
        assert_eq!(cell_as_string(&Data::Empty), None);
    }

    const SAMPLING_XLSX: &[u8] = include_bytes!("../../tests/fixtures/sampling.xlsx");

    #[test]
    fn test_reads_header_row_and_stops_at_empty_row() {
        let records = XlsxSource::from_bytes(SAMPLING_XLSX).records().unwrap();

        // Third data row sits after an empty row and is never read.
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("sample.samplingPoint.notation"), Some("NE-1"));
        assert_eq!(records[1].get("sample.samplingPoint.notation"), Some("NE-2"));
        assert!(records
            .iter()
            .all(|r| r.get("sample.samplingPoint.label") != Some("AFTER GAP")));
    }

    #[test]
    fn test_cells_render_like_csv_export() {
        let records = XlsxSource::from_bytes(SAMPLING_XLSX).records().unwrap();
        let first = &records[0];

        assert_eq!(first.get("sample.sampleDateTime"), Some("2016-01-05T12:00:00"));
        assert_eq!(first.get("sample.samplingPoint.northing"), Some("542000"));
        assert_eq!(first.get("result"), Some("0.0021"));
        assert_eq!(first.get("sample.isComplianceSample"), Some("false"));

        let second = &records[1];
        assert_eq!(second.get("sample.sampleDateTime"), Some("2016-02-01T08:00:00"));
        assert_eq!(second.get("sample.isComplianceSample"), Some("true"));
        assert_eq!(second.get("result"), Some("2"));
    }

    #[test]
    fn test_workbook_builds_dataset() {
        let records = XlsxSource::from_bytes(SAMPLING_XLSX).records().unwrap();
        let ds = crate::ingest::build(&records).unwrap();

        assert_eq!(ds.size(), 2);
        let wear = ds.get_by_notation("NE-1").unwrap();
        assert_eq!(wear.northing, 542000);
        assert_eq!(wear.easting, 427000);
        assert!(wear.samples()[0].timestamp().is_some());
        let beach = ds.get_by_label("BEACH").unwrap();
        assert!(beach.samples()[0].is_compliance_sample);
        assert_eq!(beach.samples()[0].result_for("Bags"), Some(2.0));
    }

    #[test]
    fn test_garbage_bytes_are_source_error() {
        let err = XlsxSource::from_bytes(b"not a zip".to_vec())
            .records()
            .unwrap_err();
        assert!(matches!(err, LimnosError::Source(_)));
    }
}
