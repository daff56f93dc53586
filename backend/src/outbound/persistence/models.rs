//! Diesel row, insert, and changeset models.
//!
//! These structs are internal to the persistence layer; repositories map
//! them to and from domain types so callers never see Diesel concerns.

use diesel::prelude::*;

use crate::domain::{
    Appointment, AppointmentDraft, AppointmentPatch, IntakeDraft, IntakePatch, IntakeRecord,
};

use super::schema::{appointments, intake_records};

/// Queryable appointment row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AppointmentRow {
    pub id: i32,
    pub name: String,
    pub date: String,
    pub time: String,
    pub description: Option<String>,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        let AppointmentRow {
            id,
            name,
            date,
            time,
            description,
        } = row;
        Self {
            id,
            name,
            date,
            time,
            description,
        }
    }
}

/// Insertable appointment row; the id comes from the sequence.
#[derive(Debug, Insertable)]
#[diesel(table_name = appointments)]
pub(crate) struct NewAppointmentRow {
    pub name: String,
    pub date: String,
    pub time: String,
    pub description: Option<String>,
}

impl From<AppointmentDraft> for NewAppointmentRow {
    fn from(draft: AppointmentDraft) -> Self {
        let AppointmentDraft {
            name,
            date,
            time,
            description,
        } = draft;
        Self {
            name,
            date,
            time,
            description,
        }
    }
}

/// Partial appointment update; `None` fields are left untouched.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = appointments)]
pub(crate) struct AppointmentChangeset {
    pub name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
}

impl From<AppointmentPatch> for AppointmentChangeset {
    fn from(patch: AppointmentPatch) -> Self {
        let AppointmentPatch {
            name,
            date,
            time,
            description,
        } = patch;
        Self {
            name,
            date,
            time,
            description,
        }
    }
}

/// Queryable intake row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = intake_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IntakeRow {
    pub id: i32,
    pub file_number: String,
    pub intake_date: String,
    pub admin_name: String,
    pub national_id: String,
    pub age: Option<i32>,
    pub block: Option<String>,
    pub lot: Option<String>,
    pub sector: Option<String>,
    pub subjects: Vec<String>,
    pub visit_date: String,
    pub visit_time: String,
    pub scheduler: String,
    pub created_at: String,
}

impl From<IntakeRow> for IntakeRecord {
    fn from(row: IntakeRow) -> Self {
        let IntakeRow {
            id,
            file_number,
            intake_date,
            admin_name,
            national_id,
            age,
            block,
            lot,
            sector,
            subjects,
            visit_date,
            visit_time,
            scheduler,
            created_at,
        } = row;
        Self {
            id,
            file_number,
            intake_date,
            admin_name,
            national_id,
            age,
            block,
            lot,
            sector,
            subjects,
            visit_date,
            visit_time,
            scheduler,
            created_at,
        }
    }
}

/// Insertable intake row; the id comes from the sequence.
#[derive(Debug, Insertable)]
#[diesel(table_name = intake_records)]
pub(crate) struct NewIntakeRow {
    pub file_number: String,
    pub intake_date: String,
    pub admin_name: String,
    pub national_id: String,
    pub age: Option<i32>,
    pub block: Option<String>,
    pub lot: Option<String>,
    pub sector: Option<String>,
    pub subjects: Vec<String>,
    pub visit_date: String,
    pub visit_time: String,
    pub scheduler: String,
    pub created_at: String,
}

impl From<IntakeDraft> for NewIntakeRow {
    fn from(draft: IntakeDraft) -> Self {
        let IntakeDraft {
            file_number,
            intake_date,
            admin_name,
            national_id,
            age,
            block,
            lot,
            sector,
            subjects,
            visit_date,
            visit_time,
            scheduler,
            created_at,
        } = draft;
        Self {
            file_number,
            intake_date,
            admin_name,
            national_id,
            age,
            block,
            lot,
            sector,
            subjects,
            visit_date,
            visit_time,
            scheduler,
            created_at,
        }
    }
}

/// Partial intake update; `None` fields are left untouched.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = intake_records)]
pub(crate) struct IntakeChangeset {
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

impl From<IntakePatch> for IntakeChangeset {
    fn from(patch: IntakePatch) -> Self {
        let IntakePatch {
            file_number,
            intake_date,
            admin_name,
            national_id,
            age,
            block,
            lot,
            sector,
            subjects,
            visit_date,
            visit_time,
            scheduler,
            created_at,
        } = patch;
        Self {
            file_number,
            intake_date,
            admin_name,
            national_id,
            age,
            block,
            lot,
            sector,
            subjects,
            visit_date,
            visit_time,
            scheduler,
            created_at,
        }
    }
}
