//! Column names of the sampling export and the typed row read from them.

use crate::error::LimnosError;
use crate::ingest::values::{parse_coordinate, parse_flag, parse_result};
use crate::model::{Determinand, Sample, SamplingPoint};
use crate::source::Record;

pub const POINT_NOTATION: &str = "sample.samplingPoint.notation";
pub const POINT_LABEL: &str = "sample.samplingPoint.label";
pub const POINT_NORTHING: &str = "sample.samplingPoint.northing";
pub const POINT_EASTING: &str = "sample.samplingPoint.easting";
pub const SAMPLE_PURPOSE: &str = "sample.purpose.label";
pub const SAMPLE_DATE_TIME: &str = "sample.sampleDateTime";
pub const SAMPLE_MATERIAL: &str = "sample.sampledMaterialType.label";
pub const SAMPLE_IS_COMPLIANCE: &str = "sample.isComplianceSample";
pub const DETERMINAND_LABEL: &str = "determinand.label";
pub const DETERMINAND_DEFINITION: &str = "determinand.definition";
pub const DETERMINAND_NOTATION: &str = "determinand.notation";
pub const DETERMINAND_UNIT: &str = "determinand.unit.label";
pub const RESULT: &str = "result";

/// Every column a record must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    POINT_NOTATION,
    POINT_LABEL,
    POINT_NORTHING,
    POINT_EASTING,
    SAMPLE_PURPOSE,
    SAMPLE_DATE_TIME,
    SAMPLE_MATERIAL,
    SAMPLE_IS_COMPLIANCE,
    DETERMINAND_LABEL,
    DETERMINAND_DEFINITION,
    DETERMINAND_NOTATION,
    DETERMINAND_UNIT,
    RESULT,
];

/// A record with every field extracted and typed.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    pub point_notation: String,
    pub point_label: String,
    pub northing: i64,
    pub easting: i64,
    pub purpose: String,
    pub date_time: String,
    pub material: String,
    pub is_compliance_sample: bool,
    pub determinand: Determinand,
}

impl MeasurementRow {
    pub fn from_record(row: usize, record: &Record) -> Result<Self, LimnosError> {
        let text = |field: &str| -> Result<String, LimnosError> {
            record
                .get(field)
                .map(|v| v.to_string())
                .ok_or_else(|| LimnosError::Parse {
                    row,
                    field: field.to_string(),
                    reason: "missing field".into(),
                })
        };
        let numeric_err = |field: &str, reason: String| LimnosError::Parse {
            row,
            field: field.to_string(),
            reason,
        };

        let northing = parse_coordinate(&text(POINT_NORTHING)?)
            .map_err(|e| numeric_err(POINT_NORTHING, e))?;
        let easting = parse_coordinate(&text(POINT_EASTING)?)
            .map_err(|e| numeric_err(POINT_EASTING, e))?;
        let result = parse_result(&text(RESULT)?).map_err(|e| numeric_err(RESULT, e))?;

        Ok(MeasurementRow {
            point_notation: text(POINT_NOTATION)?,
            point_label: text(POINT_LABEL)?,
            northing,
            easting,
            purpose: text(SAMPLE_PURPOSE)?,
            date_time: text(SAMPLE_DATE_TIME)?,
            material: text(SAMPLE_MATERIAL)?,
            is_compliance_sample: parse_flag(&text(SAMPLE_IS_COMPLIANCE)?),
            determinand: Determinand {
                label: text(DETERMINAND_LABEL)?,
                definition: text(DETERMINAND_DEFINITION)?,
                notation: text(DETERMINAND_NOTATION)?,
                unit_label: text(DETERMINAND_UNIT)?,
                result,
            },
        })
    }

    pub(crate) fn new_point(&self) -> SamplingPoint {
        SamplingPoint::new(
            self.point_notation.clone(),
            self.point_label.clone(),
            self.northing,
            self.easting,
        )
    }

    pub(crate) fn new_sample(&self) -> Sample {
        Sample::new(
            self.date_time.clone(),
            self.purpose.clone(),
            self.material.clone(),
            self.is_compliance_sample,
        )
    }
}
