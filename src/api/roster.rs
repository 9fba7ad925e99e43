use std::str::FromStr;

use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::debug;

use crate::{
    config::Config,
    error::ApiError,
    model::{deduction::DeductionKind, employee::EmployeeRecord},
    models::{CalculateReq, PositionQuery, UnitQuery},
    roster::{load_roster, views},
};

/// The roster is re-read on every request.
async fn roster(config: &Config) -> Result<Vec<EmployeeRecord>, ApiError> {
    let path = config.roster_path.clone();
    Ok(web::block(move || load_roster(&path)).await??)
}

/// List units
#[utoipa::path(
    get,
    path = "/api/units",
    responses(
        (status = 200, description = "Distinct units, sorted", body = Object, example = json!({
            "success": true,
            "data": ["Cabang A", "Cabang B", "Kantor Pusat"]
        }))
    ),
    tag = "Roster"
)]
pub async fn list_units(config: web::Data<Config>) -> Result<HttpResponse, ApiError> {
    let records = roster(&config).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": views::units(&records)
    })))
}

/// List positions of a unit
#[utoipa::path(
    get,
    path = "/api/positions",
    params(UnitQuery),
    responses(
        (status = 200, description = "Distinct positions in the unit, sorted", body = Object, example = json!({
            "success": true,
            "data": ["Kasir", "Teller"]
        }))
    ),
    tag = "Roster"
)]
pub async fn list_positions(
    config: web::Data<Config>,
    query: web::Query<UnitQuery>,
) -> Result<HttpResponse, ApiError> {
    let records = roster(&config).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": views::positions(&records, &query.unit)
    })))
}

/// Deduction table of a position
#[utoipa::path(
    get,
    path = "/api/deduction-table",
    params(PositionQuery),
    responses(
        (status = 200, description = "Deduction schedule, or an error envelope when the pair is unknown", body = Object, example = json!({
            "success": true,
            "data": {
                "unit": "Cabang A",
                "jabatan": "Teller",
                "deduction_table": {
                    "pulang_awal": [{"range": "1-10 menit", "deduction": 25000}],
                    "terlambat": [{"range": "6-10 menit", "deduction": 10000}]
                }
            }
        }))
    ),
    tag = "Roster"
)]
pub async fn get_deduction_table(
    config: web::Data<Config>,
    query: web::Query<PositionQuery>,
) -> Result<HttpResponse, ApiError> {
    let records = roster(&config).await?;
    let table = views::deduction_table(&records, &query.unit, &query.jabatan)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": {
            "unit": query.unit,
            "jabatan": query.jabatan,
            "deduction_table": table
        }
    })))
}

/// List roster employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All valid roster rows in sheet order", body = Object, example = json!({
            "success": true,
            "data": [{"id": 8, "no": "1", "unit": "Cabang A", "jabatan": "Teller"}],
            "count": 1
        }))
    ),
    tag = "Roster"
)]
pub async fn list_employees(config: web::Data<Config>) -> Result<HttpResponse, ApiError> {
    let records = roster(&config).await?;
    let count = records.len();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": records,
        "count": count
    })))
}

/// Calculate a deduction
#[utoipa::path(
    post,
    path = "/api/calculate",
    request_body = CalculateReq,
    responses(
        (status = 200, description = "Band and amount for the given minutes", body = Object, example = json!({
            "success": true,
            "data": {
                "unit": "Cabang A",
                "jabatan": "Teller",
                "type": "terlambat",
                "minutes": 12,
                "range": "11-15 menit",
                "deduction": 20000
            }
        }))
    ),
    tag = "Roster"
)]
pub async fn calculate(
    config: web::Data<Config>,
    payload: web::Json<CalculateReq>,
) -> Result<HttpResponse, ApiError> {
    let req = payload.into_inner();

    let kind = DeductionKind::from_str(&req.kind)
        .map_err(|_| ApiError::Validation(format!("Unknown deduction type: {}", req.kind)))?;
    let minutes = u32::try_from(req.minutes)
        .ok()
        .filter(|m| *m > 0)
        .ok_or_else(|| ApiError::Validation("minutes must be greater than 0".to_string()))?;

    let records = roster(&config).await?;
    let calculation = views::calculate(&records, &req.unit, &req.jabatan, kind, minutes)?;
    debug!(?calculation, "Deduction calculated");

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": calculation
    })))
}
