use std::path::Path;

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::{debug, warn};

use crate::model::employee::{Deductions, EmployeeRecord};

/// Banner and header rows at the top of the sheet.
pub const HEADER_ROWS: u32 = 8;

// Zero-based sheet columns (B..T).
const COL_NO: u32 = 1;
const COL_NO_REK_PANIN: u32 = 2;
const COL_NO_REK_CCB: u32 = 3;
const COL_UNIT: u32 = 4;
const COL_JABATAN: u32 = 5;
const COL_FIRST_DEDUCTION: u32 = 6;
const DEDUCTION_COLUMNS: usize = 14;

static EMPTY_CELL: Data = Data::Empty;

/// Reads the first worksheet of the workbook at `path` and extracts the roster.
///
/// Any failure to open or read the workbook aborts the whole load; bad rows
/// inside the sheet do not (see [`extract_roster`]).
pub fn load_roster(path: &Path) -> Result<Vec<EmployeeRecord>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open roster {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("Roster workbook has no sheets"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet '{}'", sheet_name))?;

    let records = extract_roster(&range);
    debug!(path = %path.display(), count = records.len(), "Roster loaded");
    Ok(records)
}

/// Walks the data rows of `range` in order and returns the valid employees.
///
/// Cells are addressed by absolute sheet position, so a sheet whose used
/// range does not start at A1 is read the same way.
pub fn extract_roster(range: &Range<Data>) -> Vec<EmployeeRecord> {
    let (Some((start_row, _)), Some((end_row, _))) = (range.start(), range.end()) else {
        return Vec::new();
    };

    let mut carry = UnitCarry::default();
    let mut records = Vec::new();

    for row in start_row.max(HEADER_ROWS)..=end_row {
        let cell = |col: u32| range.get_value((row, col)).unwrap_or(&EMPTY_CELL);

        if !is_data_row(cell(COL_NO)) {
            continue;
        }

        // The unit carries forward even if the rest of the row turns out bad.
        let unit = carry.resolve(cell(COL_UNIT));

        let deductions = match read_deductions(&cell) {
            Ok(d) => d,
            Err(e) => {
                warn!(row, error = %format!("{:#}", e), "Skipping roster row");
                continue;
            }
        };

        let record = EmployeeRecord {
            id: row,
            no: cell_text(cell(COL_NO)),
            no_rek_panin: cell_text(cell(COL_NO_REK_PANIN)),
            no_rek_ccb: cell_text(cell(COL_NO_REK_CCB)),
            unit,
            jabatan: cell_text(cell(COL_JABATAN)),
            deductions,
        };

        if is_complete(&record) {
            records.push(record);
        }
    }

    records
}

/// Forward-fill state for the unit column.
#[derive(Debug, Default)]
struct UnitCarry {
    last_valid_unit: String,
}

impl UnitCarry {
    fn resolve(&mut self, cell: &Data) -> String {
        let unit = cell_text(cell);
        if is_absent(cell) || is_placeholder(&unit) {
            self.last_valid_unit.clone()
        } else {
            self.last_valid_unit.clone_from(&unit);
            unit
        }
    }
}

/// Rows without a sequence number, and repeated "NO" header rows, are not
/// employees. This also covers blank separator rows (no sequence number, "0"
/// in the account column).
fn is_data_row(no: &Data) -> bool {
    match no {
        Data::String(s) if s == "NO" => false,
        other => !is_absent(other),
    }
}

/// Cells that hold no value: empty, blank text, or a formula error.
fn is_absent(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn is_placeholder(value: &str) -> bool {
    matches!(value, "" | "0" | "nan")
}

fn is_complete(record: &EmployeeRecord) -> bool {
    !matches!(record.unit.as_str(), "" | "0") && !matches!(record.jabatan.as_str(), "" | "0")
}

fn read_deductions<'a>(cell: &impl Fn(u32) -> &'a Data) -> Result<Deductions> {
    let mut amounts = [0i64; DEDUCTION_COLUMNS];
    for (offset, amount) in amounts.iter_mut().enumerate() {
        let col = COL_FIRST_DEDUCTION + offset as u32;
        *amount = deduction_amount(cell(col)).with_context(|| format!("column {}", col))?;
    }
    Ok(Deductions::from_columns(amounts))
}

/// Absent cells are 0; anything else must be an integer.
fn deduction_amount(cell: &Data) -> Result<i64> {
    if is_absent(cell) {
        return Ok(0);
    }
    match cell {
        Data::Int(i) => Ok(*i),
        Data::Float(f) => float_to_i64(*f).ok_or_else(|| anyhow!("out of range: {}", f)),
        Data::Bool(b) => Ok(i64::from(*b)),
        Data::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| anyhow!("not an integer: {:?}", s)),
        other => Err(anyhow!("not a number: {}", other)),
    }
}

/// Text value of a cell. Whole floats render without a fraction so numeric
/// sequence and account numbers read back as "12", not "12.0".
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => match float_to_i64(*f) {
            Some(i) => i.to_string(),
            None => f.to_string(),
        },
        other => other.to_string(),
    }
}

/// Truncates toward zero; `None` for NaN, infinities and values past `i64`.
fn float_to_i64(f: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it overflows.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let t = f.trunc();
    (t.is_finite() && t >= -LIMIT && t < LIMIT).then_some(t as i64)
}
