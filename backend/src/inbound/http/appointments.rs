//! REST handlers for the simple appointment resource.
//!
//! ```text
//! GET    /api/v1/appointments
//! POST   /api/v1/appointments        {"name":"Ada","date":"2024-01-01","time":"10:30"}
//! GET    /api/v1/appointments/{id}
//! PUT    /api/v1/appointments/{id}   {"date":"2024-02-02"}
//! DELETE /api/v1/appointments/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    ApiResult, Appointment, AppointmentDraft, AppointmentPatch, AppointmentValidationError, Error,
};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/appointments`.
///
/// Fields are optional at the serde level so that missing values surface as
/// the shared validation error envelope instead of a deserialisation error.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<CreateAppointmentRequest> for AppointmentDraft {
    type Error = Error;

    fn try_from(value: CreateAppointmentRequest) -> Result<Self, Self::Error> {
        let draft = Self {
            name: value.name.unwrap_or_default(),
            date: value.date.unwrap_or_default(),
            time: value.time.unwrap_or_default(),
            description: value.description,
        };
        draft.validate().map_err(map_validation_error)?;
        Ok(draft)
    }
}

/// Request body for `PUT /api/v1/appointments/{id}`. Absent fields are left
/// unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    pub name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<UpdateAppointmentRequest> for AppointmentPatch {
    type Error = Error;

    fn try_from(value: UpdateAppointmentRequest) -> Result<Self, Self::Error> {
        let patch = Self {
            name: value.name,
            date: value.date,
            time: value.time,
            description: value.description,
        };
        patch.validate().map_err(map_validation_error)?;
        Ok(patch)
    }
}

fn map_validation_error(err: AppointmentValidationError) -> Error {
    let AppointmentValidationError::BlankField { field } = err;
    Error::invalid_request(format!("{field} must not be blank"))
        .with_details(json!({ "field": field, "code": "blank_field" }))
}

fn not_found(id: i32) -> Error {
    Error::not_found(format!("appointment {id} not found"))
}

/// List all appointments in insertion order.
#[utoipa::path(
    get,
    path = "/api/v1/appointments",
    responses(
        (status = 200, description = "All appointments", body = [Appointment]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "listAppointments"
)]
#[get("/appointments")]
pub async fn list_appointments(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Appointment>>> {
    let records = state.appointments.list().await?;
    Ok(web::Json(records))
}

/// Fetch one appointment by id.
#[utoipa::path(
    get,
    path = "/api/v1/appointments/{id}",
    params(("id" = i32, Path, description = "Appointment identifier")),
    responses(
        (status = 200, description = "The appointment", body = Appointment),
        (status = 404, description = "Unknown id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "getAppointment"
)]
#[get("/appointments/{id}")]
pub async fn get_appointment(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Appointment>> {
    let id = path.into_inner();
    let record = state
        .appointments
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(web::Json(record))
}

/// Create an appointment. Requires a non-empty JSON body carrying `name`,
/// `date`, and `time`.
#[utoipa::path(
    post,
    path = "/api/v1/appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Created appointment", body = Appointment),
        (status = 400, description = "Missing or blank required field", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "createAppointment"
)]
#[post("/appointments")]
pub async fn create_appointment(
    state: web::Data<HttpState>,
    payload: web::Json<CreateAppointmentRequest>,
) -> ApiResult<HttpResponse> {
    let draft = AppointmentDraft::try_from(payload.into_inner())?;
    let stored = state.appointments.insert(draft).await?;
    Ok(HttpResponse::Created().json(stored))
}

/// Apply a partial update to an appointment.
#[utoipa::path(
    put,
    path = "/api/v1/appointments/{id}",
    params(("id" = i32, Path, description = "Appointment identifier")),
    request_body = UpdateAppointmentRequest,
    responses(
        (status = 200, description = "Updated appointment", body = Appointment),
        (status = 400, description = "Blank required field", body = Error),
        (status = 404, description = "Unknown id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "updateAppointment"
)]
#[put("/appointments/{id}")]
pub async fn update_appointment(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateAppointmentRequest>,
) -> ApiResult<web::Json<Appointment>> {
    let id = path.into_inner();
    let patch = AppointmentPatch::try_from(payload.into_inner())?;
    let record = state
        .appointments
        .update(id, patch)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(web::Json(record))
}

/// Delete an appointment permanently.
#[utoipa::path(
    delete,
    path = "/api/v1/appointments/{id}",
    params(("id" = i32, Path, description = "Appointment identifier")),
    responses(
        (status = 200, description = "Deletion confirmation"),
        (status = 404, description = "Unknown id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "deleteAppointment"
)]
#[delete("/appointments/{id}")]
pub async fn delete_appointment(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    if !state.appointments.delete(id).await? {
        return Err(not_found(id));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": format!("appointment {id} deleted") })))
}
