//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Simple appointment bookings.
    ///
    /// Date and time are stored as the caller-supplied strings; the original
    /// booking form never applied calendar validation.
    appointments (id) {
        /// Primary key, assigned by the `SERIAL` sequence.
        id -> Int4,
        /// Person the appointment is for.
        name -> Varchar,
        /// Scheduled date as entered.
        date -> Varchar,
        /// Scheduled time as entered.
        time -> Varchar,
        /// Optional free-form note.
        description -> Nullable<Text>,
    }
}

diesel::table! {
    /// Extended intake form records.
    ///
    /// `subjects` is a native `text[]` column so the ordered list round-trips
    /// without a serialisation boundary.
    intake_records (id) {
        /// Primary key, assigned by the `SERIAL` sequence.
        id -> Int4,
        file_number -> Varchar,
        intake_date -> Varchar,
        admin_name -> Varchar,
        national_id -> Varchar,
        age -> Nullable<Int4>,
        block -> Nullable<Varchar>,
        lot -> Nullable<Varchar>,
        sector -> Nullable<Varchar>,
        subjects -> Array<Text>,
        visit_date -> Varchar,
        visit_time -> Varchar,
        scheduler -> Varchar,
        created_at -> Varchar,
    }
}
