use std::collections::BTreeSet;

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::model::deduction::{self, DeductionKind, DeductionTable};
use crate::model::employee::EmployeeRecord;

/// Distinct units, sorted.
pub fn units(records: &[EmployeeRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.unit.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct positions within `unit`, sorted.
pub fn positions(records: &[EmployeeRecord], unit: &str) -> Vec<String> {
    records
        .iter()
        .filter(|r| r.unit == unit)
        .map(|r| r.jabatan.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// First record for the (unit, jabatan) pair.
pub fn find_position<'a>(
    records: &'a [EmployeeRecord],
    unit: &str,
    jabatan: &str,
) -> Result<&'a EmployeeRecord, ApiError> {
    records
        .iter()
        .find(|r| r.unit == unit && r.jabatan == jabatan)
        .ok_or_else(|| ApiError::NotFound(format!("Not found: {} - {}", unit, jabatan)))
}

pub fn deduction_table(
    records: &[EmployeeRecord],
    unit: &str,
    jabatan: &str,
) -> Result<DeductionTable, ApiError> {
    let record = find_position(records, unit, jabatan)?;
    Ok(DeductionTable::from_deductions(&record.deductions))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Calculation {
    #[schema(example = "Cabang A")]
    pub unit: String,
    #[schema(example = "Teller")]
    pub jabatan: String,
    #[serde(rename = "type")]
    pub kind: DeductionKind,
    #[schema(example = 12)]
    pub minutes: u32,
    #[schema(example = "11-15 menit")]
    pub range: String,
    #[schema(example = 20000)]
    pub deduction: i64,
}

/// Deduction owed for `minutes` of `kind` by the (unit, jabatan) position.
pub fn calculate(
    records: &[EmployeeRecord],
    unit: &str,
    jabatan: &str,
    kind: DeductionKind,
    minutes: u32,
) -> Result<Calculation, ApiError> {
    let record = find_position(records, unit, jabatan)?;
    let (range, deduction) = deduction::charge(kind, &record.deductions, minutes)
        .ok_or_else(|| ApiError::Validation("minutes must be greater than 0".to_string()))?;

    Ok(Calculation {
        unit: unit.to_string(),
        jabatan: jabatan.to_string(),
        kind,
        minutes,
        range: range.to_string(),
        deduction,
    })
}
