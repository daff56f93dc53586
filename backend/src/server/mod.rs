//! Server construction and middleware wiring.

mod config;

pub use config::{AppSettings, ServerConfig};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::inbound::http::appointments::{
    create_appointment, delete_appointment, get_appointment, list_appointments, update_appointment,
};
use crate::inbound::http::error::{form_config, json_config};
use crate::inbound::http::form::{list_page, submit_form};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::intakes::{
    create_intake, delete_intake, get_intake, list_intakes, update_intake,
};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::persistence::{DieselAppointmentRepository, DieselIntakeRepository};

#[cfg(debug_assertions)]
use crate::doc::openapi_json;

/// Assemble the application: REST resources under `/api/v1`, the HTML form
/// interface at the root, and health probes.
///
/// Tests reuse this so requests traverse the same middleware and extractor
/// configuration as production traffic.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(list_appointments)
        .service(get_appointment)
        .service(create_appointment)
        .service(update_appointment)
        .service(delete_appointment)
        .service(list_intakes)
        .service(get_intake)
        .service(create_intake)
        .service(update_intake)
        .service(delete_intake);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(form_config())
        .wrap(Trace)
        .service(api)
        .service(list_page)
        .service(submit_form)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.route("/api-docs/openapi.json", web::get().to(openapi_json));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => HttpState::new(
            Arc::new(DieselAppointmentRepository::new(pool.clone())),
            Arc::new(DieselIntakeRepository::new(pool.clone())),
        ),
        None => HttpState::in_memory(),
    }
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// The returned [`Server`] must be awaited to drive the listener; readiness
/// is marked once the socket is bound.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
