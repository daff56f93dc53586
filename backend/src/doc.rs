//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every REST path and schema into one document. Debug
//! builds serve it at `/api-docs/openapi.json`; `cargo run --bin
//! openapi-dump` exports it for external tooling.

use actix_web::web;
use utoipa::OpenApi;

use crate::domain::{Appointment, Error, ErrorCode, IntakeRecord};
use crate::inbound::http::appointments::{CreateAppointmentRequest, UpdateAppointmentRequest};
use crate::inbound::http::intakes::{CreateIntakeRequest, UpdateIntakeRequest};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Citas backend API",
        description = "Appointment and intake scheduling over REST, with \
                       health probes for orchestration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::appointments::list_appointments,
        crate::inbound::http::appointments::get_appointment,
        crate::inbound::http::appointments::create_appointment,
        crate::inbound::http::appointments::update_appointment,
        crate::inbound::http::appointments::delete_appointment,
        crate::inbound::http::intakes::list_intakes,
        crate::inbound::http::intakes::get_intake,
        crate::inbound::http::intakes::create_intake,
        crate::inbound::http::intakes::update_intake,
        crate::inbound::http::intakes::delete_intake,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Appointment,
        CreateAppointmentRequest,
        UpdateAppointmentRequest,
        IntakeRecord,
        CreateIntakeRequest,
        UpdateIntakeRequest,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "appointments", description = "Appointment CRUD and listing"),
        (name = "intakes", description = "Intake record CRUD and listing"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

/// Serve the generated document; wired up in debug builds only.
pub async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn intake_schema_uses_camel_case_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let intake_schema = schemas.get("IntakeRecord").expect("IntakeRecord schema");

        assert_object_schema_has_field(intake_schema, "fileNumber");
        assert_object_schema_has_field(intake_schema, "createdAt");
        assert_object_schema_has_field(intake_schema, "subjects");
    }

    #[test]
    fn every_resource_path_is_registered() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/appointments",
            "/api/v1/appointments/{id}",
            "/api/v1/intakes",
            "/api/v1/intakes/{id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "path {path} should be documented"
            );
        }
    }
}
