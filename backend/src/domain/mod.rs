//! Domain entities, validation, and ports.
//!
//! Types here are transport and storage agnostic. Serde attributes document
//! the JSON contract (camelCase field names, optional fields omitted);
//! invariants live in each type's Rustdoc.

pub mod appointment;
pub mod error;
pub mod intake;
pub mod ports;

pub use self::appointment::{
    Appointment, AppointmentDraft, AppointmentPatch, AppointmentValidationError,
};
pub use self::error::{Error, ErrorCode};
pub use self::intake::{IntakeDraft, IntakePatch, IntakeRecord, IntakeValidationError};

/// Convenient result alias for fallible handlers.
pub type ApiResult<T> = Result<T, Error>;
