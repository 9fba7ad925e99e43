use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One roster row after unit forward-fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 9,
        "no": "1",
        "no_rek_panin": "1234567890",
        "no_rek_ccb": "0987654321",
        "unit": "Cabang A",
        "jabatan": "Teller",
        "pulang_awal_1_10": 25000,
        "pulang_awal_11_20": 50000,
        "pulang_awal_21_30": 75000,
        "pulang_awal_31_40": 100000,
        "pulang_awal_41_50": 125000,
        "pulang_awal_51_60": 150000,
        "pulang_awal_60_plus": 200000,
        "terlambat_6_10": 10000,
        "terlambat_11_15": 20000,
        "terlambat_16_20": 30000,
        "terlambat_21_25": 40000,
        "terlambat_26_30": 50000,
        "terlambat_31_45": 75000,
        "terlambat_46_60": 100000
    })
)]
pub struct EmployeeRecord {
    /// Zero-based sheet row the record was read from
    #[schema(example = 9)]
    pub id: u32,

    #[schema(example = "1")]
    pub no: String,

    #[schema(example = "1234567890")]
    pub no_rek_panin: String,

    #[schema(example = "0987654321")]
    pub no_rek_ccb: String,

    #[schema(example = "Cabang A")]
    pub unit: String,

    #[schema(example = "Teller")]
    pub jabatan: String,

    #[serde(flatten)]
    pub deductions: Deductions,
}

/// The fourteen deduction amounts of a roster row, in sheet column order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Deductions {
    pub pulang_awal_1_10: i64,
    pub pulang_awal_11_20: i64,
    pub pulang_awal_21_30: i64,
    pub pulang_awal_31_40: i64,
    pub pulang_awal_41_50: i64,
    pub pulang_awal_51_60: i64,
    pub pulang_awal_60_plus: i64,
    pub terlambat_6_10: i64,
    pub terlambat_11_15: i64,
    pub terlambat_16_20: i64,
    pub terlambat_21_25: i64,
    pub terlambat_26_30: i64,
    pub terlambat_31_45: i64,
    pub terlambat_46_60: i64,
}

impl Deductions {
    /// Builds the schedule from the 14 amounts as they appear left to right
    /// (early departure bands first, then lateness bands).
    pub fn from_columns(c: [i64; 14]) -> Self {
        Self {
            pulang_awal_1_10: c[0],
            pulang_awal_11_20: c[1],
            pulang_awal_21_30: c[2],
            pulang_awal_31_40: c[3],
            pulang_awal_41_50: c[4],
            pulang_awal_51_60: c[5],
            pulang_awal_60_plus: c[6],
            terlambat_6_10: c[7],
            terlambat_11_15: c[8],
            terlambat_16_20: c[9],
            terlambat_21_25: c[10],
            terlambat_26_30: c[11],
            terlambat_31_45: c[12],
            terlambat_46_60: c[13],
        }
    }

    pub fn pulang_awal(&self) -> [i64; 7] {
        [
            self.pulang_awal_1_10,
            self.pulang_awal_11_20,
            self.pulang_awal_21_30,
            self.pulang_awal_31_40,
            self.pulang_awal_41_50,
            self.pulang_awal_51_60,
            self.pulang_awal_60_plus,
        ]
    }

    pub fn terlambat(&self) -> [i64; 7] {
        [
            self.terlambat_6_10,
            self.terlambat_11_15,
            self.terlambat_16_20,
            self.terlambat_21_25,
            self.terlambat_26_30,
            self.terlambat_31_45,
            self.terlambat_46_60,
        ]
    }
}
