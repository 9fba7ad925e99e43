use crate::model::attendance::{AttendanceFilter, RecordId};
use crate::model::deduction::{DeductionEntry, DeductionKind, DeductionTable};
use crate::model::employee::{Deductions, EmployeeRecord};
use crate::models::{CalculateReq, PositionQuery, UnitQuery};
use crate::roster::views::Calculation;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Deduction API",
        version = "1.0.0",
        description = r#"
## Attendance & Lateness Deductions

Reads the employee roster and its lateness / early-departure deduction
schedule from the `Pot Keterlambatan` spreadsheet, and keeps daily attendance
records in a document table.

### Key Features
- **Roster**
  - Units, positions per unit, the full employee list
- **Deductions**
  - Deduction table per position, deduction for a number of minutes
- **Attendance**
  - List, create (one record per date/name/unit/jabatan), update and delete

### Response Format
Every response is HTTP 200 with a JSON envelope: `{"success": true, ...}` on
success and `{"success": false, "error": "..."}` on failure.
"#,
    ),
    paths(
        crate::api::roster::list_units,
        crate::api::roster::list_positions,
        crate::api::roster::get_deduction_table,
        crate::api::roster::list_employees,
        crate::api::roster::calculate,

        crate::api::attendance::list_attendance,
        crate::api::attendance::create_attendance,
        crate::api::attendance::update_attendance,
        crate::api::attendance::delete_attendance
    ),
    components(
        schemas(
            EmployeeRecord,
            Deductions,
            DeductionKind,
            DeductionEntry,
            DeductionTable,
            Calculation,
            CalculateReq,
            UnitQuery,
            PositionQuery,
            AttendanceFilter,
            RecordId
        )
    ),
    tags(
        (name = "Roster", description = "Roster and deduction schedule APIs"),
        (name = "Attendance", description = "Attendance record APIs"),
    )
)]
pub struct ApiDoc;
