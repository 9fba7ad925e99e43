use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use super::employee::Deductions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[derive(EnumString, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeductionKind {
    /// Leaving before the end of the work day
    PulangAwal,
    /// Arriving after the start of the work day
    Terlambat,
}

/// A minute range of the schedule. `max: None` is open ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub label: &'static str,
    pub min: u32,
    pub max: Option<u32>,
}

impl Band {
    const fn new(label: &'static str, min: u32, max: Option<u32>) -> Self {
        Self { label, min, max }
    }

    fn contains(&self, minutes: u32) -> bool {
        minutes >= self.min && self.max.is_none_or(|max| minutes <= max)
    }
}

pub const PULANG_AWAL_BANDS: [Band; 7] = [
    Band::new("1-10 menit", 1, Some(10)),
    Band::new("11-20 menit", 11, Some(20)),
    Band::new("21-30 menit", 21, Some(30)),
    Band::new("31-40 menit", 31, Some(40)),
    Band::new("41-50 menit", 41, Some(50)),
    Band::new("51-60 menit", 51, Some(60)),
    Band::new("> 60 menit", 61, None),
];

pub const TERLAMBAT_BANDS: [Band; 7] = [
    Band::new("6-10 menit", 6, Some(10)),
    Band::new("11-15 menit", 11, Some(15)),
    Band::new("16-20 menit", 16, Some(20)),
    Band::new("21-25 menit", 21, Some(25)),
    Band::new("26-30 menit", 26, Some(30)),
    Band::new("31-45 menit", 31, Some(45)),
    Band::new("46-60 menit", 46, Some(60)),
];

/// Lateness at or below this many minutes carries no deduction.
pub const TERLAMBAT_GRACE_MINUTES: u32 = 5;
pub const TERLAMBAT_GRACE_LABEL: &str = "1-5 menit";

impl DeductionKind {
    pub fn bands(self) -> &'static [Band; 7] {
        match self {
            DeductionKind::PulangAwal => &PULANG_AWAL_BANDS,
            DeductionKind::Terlambat => &TERLAMBAT_BANDS,
        }
    }

    pub fn amounts(self, deductions: &Deductions) -> [i64; 7] {
        match self {
            DeductionKind::PulangAwal => deductions.pulang_awal(),
            DeductionKind::Terlambat => deductions.terlambat(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeductionEntry {
    #[schema(example = "6-10 menit")]
    pub range: String,
    #[schema(example = 10000)]
    pub deduction: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeductionTable {
    pub pulang_awal: Vec<DeductionEntry>,
    pub terlambat: Vec<DeductionEntry>,
}

impl DeductionTable {
    pub fn from_deductions(deductions: &Deductions) -> Self {
        let entries = |kind: DeductionKind| {
            kind.bands()
                .iter()
                .zip(kind.amounts(deductions))
                .map(|(band, deduction)| DeductionEntry {
                    range: band.label.to_string(),
                    deduction,
                })
                .collect()
        };

        Self {
            pulang_awal: entries(DeductionKind::PulangAwal),
            terlambat: entries(DeductionKind::Terlambat),
        }
    }
}

/// Resolves `minutes` of `kind` to a band label and amount.
///
/// Lateness inside the grace period yields a zero deduction, lateness past
/// the last band is charged at the last band. Returns `None` for zero minutes.
pub fn charge(kind: DeductionKind, deductions: &Deductions, minutes: u32) -> Option<(&'static str, i64)> {
    if minutes == 0 {
        return None;
    }
    if kind == DeductionKind::Terlambat && minutes <= TERLAMBAT_GRACE_MINUTES {
        return Some((TERLAMBAT_GRACE_LABEL, 0));
    }

    let bands = kind.bands();
    let amounts = kind.amounts(deductions);
    let index = bands
        .iter()
        .position(|band| band.contains(minutes))
        .unwrap_or(bands.len() - 1);

    Some((bands[index].label, amounts[index]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn schedule() -> Deductions {
        Deductions::from_columns([
            10, 20, 30, 40, 50, 60, 70, // pulang awal
            1, 2, 3, 4, 5, 6, 7, // terlambat
        ])
    }

    #[test]
    fn kind_parses_wire_names() {
        assert_eq!(DeductionKind::from_str("terlambat").unwrap(), DeductionKind::Terlambat);
        assert_eq!(DeductionKind::from_str("pulang_awal").unwrap(), DeductionKind::PulangAwal);
        assert!(DeductionKind::from_str("absent").is_err());
        assert_eq!(DeductionKind::PulangAwal.as_ref(), "pulang_awal");
    }

    #[test]
    fn table_pairs_labels_with_amounts() {
        let table = DeductionTable::from_deductions(&schedule());

        assert_eq!(table.pulang_awal.len(), 7);
        assert_eq!(table.terlambat.len(), 7);
        assert_eq!(table.pulang_awal[0].range, "1-10 menit");
        assert_eq!(table.pulang_awal[6].range, "> 60 menit");
        assert_eq!(table.pulang_awal[6].deduction, 70);
        assert_eq!(table.terlambat[5].range, "31-45 menit");
        assert_eq!(table.terlambat[5].deduction, 6);
    }

    #[test]
    fn band_boundaries() {
        let d = schedule();

        assert_eq!(charge(DeductionKind::PulangAwal, &d, 10), Some(("1-10 menit", 10)));
        assert_eq!(charge(DeductionKind::PulangAwal, &d, 11), Some(("11-20 menit", 20)));
        assert_eq!(charge(DeductionKind::PulangAwal, &d, 60), Some(("51-60 menit", 60)));
        assert_eq!(charge(DeductionKind::PulangAwal, &d, 61), Some(("> 60 menit", 70)));
        assert_eq!(charge(DeductionKind::Terlambat, &d, 6), Some(("6-10 menit", 1)));
        assert_eq!(charge(DeductionKind::Terlambat, &d, 45), Some(("31-45 menit", 6)));
        assert_eq!(charge(DeductionKind::Terlambat, &d, 46), Some(("46-60 menit", 7)));
    }

    #[test]
    fn lateness_grace_and_overflow() {
        let d = schedule();

        assert_eq!(charge(DeductionKind::Terlambat, &d, 5), Some(("1-5 menit", 0)));
        assert_eq!(charge(DeductionKind::Terlambat, &d, 1), Some(("1-5 menit", 0)));
        assert_eq!(charge(DeductionKind::Terlambat, &d, 240), Some(("46-60 menit", 7)));
        assert_eq!(charge(DeductionKind::Terlambat, &d, 0), None);
    }
}
