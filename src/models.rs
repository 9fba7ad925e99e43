use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct UnitQuery {
    /// Missing means the empty unit
    #[schema(example = "Cabang A")]
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PositionQuery {
    #[schema(example = "Cabang A")]
    #[serde(default)]
    pub unit: String,
    #[schema(example = "Teller")]
    #[serde(default)]
    pub jabatan: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CalculateReq {
    #[schema(example = "Cabang A")]
    pub unit: String,
    #[schema(example = "Teller")]
    pub jabatan: String,
    /// `terlambat` or `pulang_awal`
    #[schema(example = "terlambat")]
    #[serde(rename = "type")]
    pub kind: String,
    #[schema(example = 12)]
    pub minutes: i64,
}
