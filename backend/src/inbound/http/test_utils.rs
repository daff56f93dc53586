//! Helpers shared by handler unit tests.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;
use crate::server;

/// Build an application exposing the form and REST interfaces over the
/// supplied state, wired the same way as the production server.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    server::build_app(health_state, web::Data::new(state))
}
