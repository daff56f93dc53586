//! HTML form interface for the simple appointment variant.
//!
//! This is the original booking front door: `GET /` renders every
//! appointment as a plain HTML listing with an inline creation form, and
//! `POST /` accepts the form-encoded fields and redirects back to the
//! listing. It is an alternative interface over the same persistence layer
//! as the REST resource, not a layer on top of it.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::{ApiResult, Appointment, AppointmentDraft, Error};
use crate::inbound::http::state::HttpState;

/// Form-encoded payload accepted by `POST /`.
#[derive(Debug, Default, Deserialize)]
pub struct AppointmentForm {
    pub name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
}

/// Replace the characters HTML treats as markup.
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn render_listing(appointments: &[Appointment]) -> String {
    let mut rows = String::new();
    for appointment in appointments {
        let description = appointment.description.as_deref().unwrap_or("");
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&appointment.name),
            escape_html(&appointment.date),
            escape_html(&appointment.time),
            escape_html(description),
        ));
    }
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>Appointments</title></head>\n<body>\n<h1>Appointments</h1>\n<table>\n<tr><th>Name</th><th>Date</th><th>Time</th><th>Description</th></tr>\n{rows}</table>\n<form method=\"post\" action=\"/\">\n<input name=\"name\" placeholder=\"Name\" required>\n<input name=\"date\" placeholder=\"Date\" required>\n<input name=\"time\" placeholder=\"Time\" required>\n<input name=\"description\" placeholder=\"Description\">\n<button type=\"submit\">Book</button>\n</form>\n</body>\n</html>\n"
    )
}

/// Render every appointment as a human-readable HTML listing.
#[get("/")]
pub async fn list_page(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let appointments = state.appointments.list().await?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_listing(&appointments)))
}

/// Accept the booking form, insert the appointment, and redirect to `/`.
#[post("/")]
pub async fn submit_form(
    state: web::Data<HttpState>,
    form: web::Form<AppointmentForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let draft = AppointmentDraft {
        name: form.name.unwrap_or_default(),
        date: form.date.unwrap_or_default(),
        time: form.time.unwrap_or_default(),
        description: form.description.filter(|text| !text.trim().is_empty()),
    };
    draft
        .validate()
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    state.appointments.insert(draft).await?;
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::test_app;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;

    #[rstest]
    fn escape_html_neutralises_markup() {
        assert_eq!(
            escape_html("<b>\"Ada\" & 'Bob'</b>"),
            "&lt;b&gt;&quot;Ada&quot; &amp; &#39;Bob&#39;&lt;/b&gt;"
        );
    }

    #[actix_web::test]
    async fn submitting_the_form_redirects_and_lists_the_record() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let posted = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/")
                .set_form([
                    ("name", "Ada Lovelace"),
                    ("date", "2024-01-01"),
                    ("time", "10:30"),
                    ("description", "first visit"),
                ])
                .to_request(),
        )
        .await;
        assert_eq!(posted.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            posted
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/")
        );

        let page = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").to_request(),
        )
        .await;
        assert_eq!(page.status(), StatusCode::OK);
        let body = actix_test::read_body(page).await;
        let html = std::str::from_utf8(&body).expect("utf8 page");
        assert!(html.contains("Ada Lovelace"));
        assert!(html.contains("first visit"));
    }

    #[actix_web::test]
    async fn blank_required_form_field_is_rejected_without_insert() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let posted = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/")
                .set_form([("name", "Ada"), ("date", ""), ("time", "10:30")])
                .to_request(),
        )
        .await;
        assert_eq!(posted.status(), StatusCode::BAD_REQUEST);

        let page = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").to_request(),
        )
        .await;
        let body = actix_test::read_body(page).await;
        let html = std::str::from_utf8(&body).expect("utf8 page");
        assert!(!html.contains("Ada"));
    }

    #[actix_web::test]
    async fn listing_escapes_stored_markup() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/")
                .set_form([
                    ("name", "<script>alert(1)</script>"),
                    ("date", "2024-01-01"),
                    ("time", "10:30"),
                ])
                .to_request(),
        )
        .await;

        let page = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").to_request(),
        )
        .await;
        let body = actix_test::read_body(page).await;
        let html = std::str::from_utf8(&body).expect("utf8 page");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
