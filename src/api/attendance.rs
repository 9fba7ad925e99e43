use actix_web::{HttpResponse, web};
use serde_json::{Value, json};

use crate::{
    error::ApiError,
    model::attendance::AttendanceFilter,
    store::{AttendanceGateway, CreateOutcome},
    utils::request::into_document,
};

/// List attendance records
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceFilter),
    responses(
        (status = 200, description = "Matching records, newest date first", body = Object, example = json!({
            "success": true,
            "data": [{
                "_id": "9b2f3c1e-6a77-4a51-9d55-0b1c7e0f4a10",
                "date": "2024-05-01",
                "name": "John",
                "unit": "Cabang A",
                "jabatan": "Teller",
                "arrival": "09:12",
                "departure": "18:00",
                "created_at": "2024-05-01T09:15:02.114Z"
            }]
        }))
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    gateway: web::Data<AttendanceGateway>,
    filter: web::Query<AttendanceFilter>,
) -> Result<HttpResponse, ApiError> {
    let records = gateway.list(&filter).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": records
    })))
}

/// Create or overwrite an attendance record
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body(content = Object, example = json!({
        "date": "2024-05-01",
        "name": "John",
        "unit": "Cabang A",
        "jabatan": "Teller",
        "arrival": "09:12",
        "departure": "18:00"
    })),
    responses(
        (status = 200, description = "Record created, or the record with the same date/name/unit/jabatan overwritten", body = Object, example = json!({
            "success": true,
            "message": "Record created",
            "id": "9b2f3c1e-6a77-4a51-9d55-0b1c7e0f4a10"
        }))
    ),
    tag = "Attendance"
)]
pub async fn create_attendance(
    gateway: web::Data<AttendanceGateway>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let document = into_document(payload.into_inner())?;

    let (message, id) = match gateway.create(document).await? {
        CreateOutcome::Created(id) => ("Record created", id),
        CreateOutcome::Updated(id) => ("Record updated", id),
    };

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": message,
        "id": id
    })))
}

/// Update an attendance record
#[utoipa::path(
    put,
    path = "/api/attendance",
    request_body(content = Object, example = json!({
        "_id": "9b2f3c1e-6a77-4a51-9d55-0b1c7e0f4a10",
        "departure": "17:30"
    })),
    responses(
        (status = 200, description = "Record updated", body = Object, example = json!({
            "success": true,
            "message": "Record updated"
        }))
    ),
    tag = "Attendance"
)]
pub async fn update_attendance(
    gateway: web::Data<AttendanceGateway>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let document = into_document(payload.into_inner())?;
    gateway.update(document).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Record updated"
    })))
}

/// Delete an attendance record
#[utoipa::path(
    delete,
    path = "/api/attendance",
    request_body(content = Object, example = json!({
        "_id": "9b2f3c1e-6a77-4a51-9d55-0b1c7e0f4a10"
    })),
    responses(
        (status = 200, description = "Record deleted", body = Object, example = json!({
            "success": true,
            "message": "Record deleted"
        }))
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    gateway: web::Data<AttendanceGateway>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let document = into_document(payload.into_inner())?;
    gateway.delete(&document).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Record deleted"
    })))
}
