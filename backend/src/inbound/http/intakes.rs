//! REST handlers for the extended intake resource.
//!
//! JSON field names follow the intake form verbatim (`fileNumber`,
//! `nationalId`, `visitDate`, ...). `createdAt` may be omitted on create, in
//! which case the server stamps the current RFC 3339 time.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    ApiResult, Error, IntakeDraft, IntakePatch, IntakeRecord, IntakeValidationError,
};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/intakes`.
///
/// Fields are optional at the serde level so that missing values surface as
/// the shared validation error envelope instead of a deserialisation error.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntakeRequest {
    pub file_number: Option<String>,
    pub intake_date: Option<String>,
    pub admin_name: Option<String>,
    pub national_id: Option<String>,
    pub age: Option<i32>,
    pub block: Option<String>,
    pub lot: Option<String>,
    pub sector: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub visit_date: Option<String>,
    pub visit_time: Option<String>,
    pub scheduler: Option<String>,
    pub created_at: Option<String>,
}

impl TryFrom<CreateIntakeRequest> for IntakeDraft {
    type Error = Error;

    fn try_from(value: CreateIntakeRequest) -> Result<Self, Self::Error> {
        let created_at = value
            .created_at
            .filter(|stamp| !stamp.trim().is_empty())
            .unwrap_or_else(|| Utc::now().to_rfc3339());
        let draft = Self {
            file_number: value.file_number.unwrap_or_default(),
            intake_date: value.intake_date.unwrap_or_default(),
            admin_name: value.admin_name.unwrap_or_default(),
            national_id: value.national_id.unwrap_or_default(),
            age: value.age,
            block: value.block,
            lot: value.lot,
            sector: value.sector,
            subjects: value.subjects.unwrap_or_default(),
            visit_date: value.visit_date.unwrap_or_default(),
            visit_time: value.visit_time.unwrap_or_default(),
            scheduler: value.scheduler.unwrap_or_default(),
            created_at,
        };
        draft.validate().map_err(map_validation_error)?;
        Ok(draft)
    }
}

/// Request body for `PUT /api/v1/intakes/{id}`. Absent fields are left
/// unchanged; `subjects` is replaced wholesale when supplied.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIntakeRequest {
    pub file_number: Option<String>,
    pub intake_date: Option<String>,
    pub admin_name: Option<String>,
    pub national_id: Option<String>,
    pub age: Option<i32>,
    pub block: Option<String>,
    pub lot: Option<String>,
    pub sector: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub visit_date: Option<String>,
    pub visit_time: Option<String>,
    pub scheduler: Option<String>,
    pub created_at: Option<String>,
}

impl TryFrom<UpdateIntakeRequest> for IntakePatch {
    type Error = Error;

    fn try_from(value: UpdateIntakeRequest) -> Result<Self, Self::Error> {
        let patch = Self {
            file_number: value.file_number,
            intake_date: value.intake_date,
            admin_name: value.admin_name,
            national_id: value.national_id,
            age: value.age,
            block: value.block,
            lot: value.lot,
            sector: value.sector,
            subjects: value.subjects,
            visit_date: value.visit_date,
            visit_time: value.visit_time,
            scheduler: value.scheduler,
            created_at: value.created_at,
        };
        patch.validate().map_err(map_validation_error)?;
        Ok(patch)
    }
}

fn map_validation_error(err: IntakeValidationError) -> Error {
    let IntakeValidationError::BlankField { field } = err;
    Error::invalid_request(format!("{field} must not be blank"))
        .with_details(json!({ "field": field, "code": "blank_field" }))
}

fn not_found(id: i32) -> Error {
    Error::not_found(format!("intake record {id} not found"))
}

/// List all intake records in insertion order.
#[utoipa::path(
    get,
    path = "/api/v1/intakes",
    responses(
        (status = 200, description = "All intake records", body = [IntakeRecord]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["intakes"],
    operation_id = "listIntakes"
)]
#[get("/intakes")]
pub async fn list_intakes(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<IntakeRecord>>> {
    let records = state.intakes.list().await?;
    Ok(web::Json(records))
}

/// Fetch one intake record by id.
#[utoipa::path(
    get,
    path = "/api/v1/intakes/{id}",
    params(("id" = i32, Path, description = "Intake record identifier")),
    responses(
        (status = 200, description = "The intake record", body = IntakeRecord),
        (status = 404, description = "Unknown id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["intakes"],
    operation_id = "getIntake"
)]
#[get("/intakes/{id}")]
pub async fn get_intake(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<IntakeRecord>> {
    let id = path.into_inner();
    let record = state
        .intakes
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(web::Json(record))
}

/// Create an intake record. Requires a non-empty JSON body carrying every
/// required intake field.
#[utoipa::path(
    post,
    path = "/api/v1/intakes",
    request_body = CreateIntakeRequest,
    responses(
        (status = 201, description = "Created intake record", body = IntakeRecord),
        (status = 400, description = "Missing or blank required field", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["intakes"],
    operation_id = "createIntake"
)]
#[post("/intakes")]
pub async fn create_intake(
    state: web::Data<HttpState>,
    payload: web::Json<CreateIntakeRequest>,
) -> ApiResult<HttpResponse> {
    let draft = IntakeDraft::try_from(payload.into_inner())?;
    let stored = state.intakes.insert(draft).await?;
    Ok(HttpResponse::Created().json(stored))
}

/// Apply a partial update to an intake record.
#[utoipa::path(
    put,
    path = "/api/v1/intakes/{id}",
    params(("id" = i32, Path, description = "Intake record identifier")),
    request_body = UpdateIntakeRequest,
    responses(
        (status = 200, description = "Updated intake record", body = IntakeRecord),
        (status = 400, description = "Blank required field", body = Error),
        (status = 404, description = "Unknown id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["intakes"],
    operation_id = "updateIntake"
)]
#[put("/intakes/{id}")]
pub async fn update_intake(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateIntakeRequest>,
) -> ApiResult<web::Json<IntakeRecord>> {
    let id = path.into_inner();
    let patch = IntakePatch::try_from(payload.into_inner())?;
    let record = state
        .intakes
        .update(id, patch)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(web::Json(record))
}

/// Delete an intake record permanently.
#[utoipa::path(
    delete,
    path = "/api/v1/intakes/{id}",
    params(("id" = i32, Path, description = "Intake record identifier")),
    responses(
        (status = 200, description = "Deletion confirmation"),
        (status = 404, description = "Unknown id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["intakes"],
    operation_id = "deleteIntake"
)]
#[delete("/intakes/{id}")]
pub async fn delete_intake(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    if !state.intakes.delete(id).await? {
        return Err(not_found(id));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": format!("intake record {id} deleted") })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{
        InMemoryAppointmentRepository, IntakeRepositoryError, MockIntakeRepository,
    };
    use crate::inbound::http::test_utils::test_app;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    fn create_body() -> Value {
        json!({
            "fileNumber": "EXP-2024-0117",
            "intakeDate": "2024-01-17",
            "adminName": "Mar Gomez",
            "nationalId": "44556677",
            "age": 52,
            "block": "B",
            "lot": "12",
            "subjects": ["water", "electricity"],
            "visitDate": "2024-02-01",
            "visitTime": "09:00",
            "scheduler": "Reception",
            "createdAt": "2024-01-17T12:00:00+00:00"
        })
    }

    #[actix_web::test]
    async fn subjects_round_trip_in_order() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/intakes")
                .set_json(create_body())
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let created: Value = actix_test::read_body_json(created).await;
        let id = created["id"].as_i64().expect("id");

        let fetched: Value = actix_test::read_body_json(
            actix_test::call_service(
                &app,
                actix_test::TestRequest::get()
                    .uri(&format!("/api/v1/intakes/{id}"))
                    .to_request(),
            )
            .await,
        )
        .await;
        assert_eq!(fetched["subjects"], json!(["water", "electricity"]));
        assert_eq!(fetched["fileNumber"], "EXP-2024-0117");
        assert_eq!(fetched["nationalId"], "44556677");
    }

    #[actix_web::test]
    async fn omitted_subjects_default_to_empty_list() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let mut body = create_body();
        body.as_object_mut().expect("object").remove("subjects");
        let created: Value = actix_test::read_body_json(
            actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/v1/intakes")
                    .set_json(body)
                    .to_request(),
            )
            .await,
        )
        .await;
        assert_eq!(created["subjects"], json!([]));
    }

    #[actix_web::test]
    async fn omitted_created_at_is_stamped_by_the_server() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let mut body = create_body();
        body.as_object_mut().expect("object").remove("createdAt");
        let created: Value = actix_test::read_body_json(
            actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/v1/intakes")
                    .set_json(body)
                    .to_request(),
            )
            .await,
        )
        .await;
        let stamp = created["createdAt"].as_str().expect("createdAt string");
        assert!(
            chrono::DateTime::parse_from_rfc3339(stamp).is_ok(),
            "expected RFC 3339 stamp, got {stamp}"
        );
    }

    #[rstest]
    #[case("fileNumber")]
    #[case("nationalId")]
    #[case("visitDate")]
    #[case("scheduler")]
    #[actix_web::test]
    async fn missing_required_field_is_rejected_without_insert(#[case] field: &str) {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let mut body = create_body();
        body.as_object_mut().expect("object").remove(field);
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/intakes")
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload: Value = actix_test::read_body_json(response).await;
        assert_eq!(payload["details"]["field"], field);

        let listed: Value = actix_test::read_body_json(
            actix_test::call_service(
                &app,
                actix_test::TestRequest::get()
                    .uri("/api/v1/intakes")
                    .to_request(),
            )
            .await,
        )
        .await;
        assert_eq!(listed.as_array().map(Vec::len), Some(0));
    }

    #[actix_web::test]
    async fn update_replaces_subjects_and_keeps_other_fields() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let created: Value = actix_test::read_body_json(
            actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/v1/intakes")
                    .set_json(create_body())
                    .to_request(),
            )
            .await,
        )
        .await;
        let id = created["id"].as_i64().expect("id");

        let updated: Value = actix_test::read_body_json(
            actix_test::call_service(
                &app,
                actix_test::TestRequest::put()
                    .uri(&format!("/api/v1/intakes/{id}"))
                    .set_json(json!({ "subjects": ["roads"], "visitTime": "11:45" }))
                    .to_request(),
            )
            .await,
        )
        .await;
        assert_eq!(updated["subjects"], json!(["roads"]));
        assert_eq!(updated["visitTime"], "11:45");
        assert_eq!(updated["adminName"], "Mar Gomez");
    }

    #[actix_web::test]
    async fn storage_failure_on_insert_surfaces_as_redacted_internal_error() {
        let mut intakes = MockIntakeRepository::new();
        intakes.expect_insert().returning(|_| {
            Err(IntakeRepositoryError::connection(
                "server closed the connection unexpectedly",
            ))
        });
        let state = HttpState::new(
            Arc::new(InMemoryAppointmentRepository::new()),
            Arc::new(intakes),
        );
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/intakes")
                .set_json(create_body())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let payload: Value = actix_test::read_body_json(response).await;
        assert_eq!(payload["code"], "internal_error");
        assert_eq!(payload["message"], "Internal server error");
    }

    #[actix_web::test]
    async fn delete_unknown_id_reports_not_found() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/intakes/404")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let payload: Value = actix_test::read_body_json(response).await;
        assert_eq!(payload["code"], "not_found");
    }
}
