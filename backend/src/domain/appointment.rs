//! Simple appointment data model.
//!
//! An appointment is a flat record: a name plus free-form date and time
//! strings. The original booking form never validated calendar semantics, so
//! the domain only enforces presence of the required fields.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised by appointment drafts and patches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentValidationError {
    /// A required field was missing or blank.
    BlankField {
        /// JSON name of the offending field.
        field: &'static str,
    },
}

impl std::fmt::Display for AppointmentValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { field } => write!(f, "{field} must not be blank"),
        }
    }
}

impl std::error::Error for AppointmentValidationError {}

fn require(field: &'static str, value: &str) -> Result<(), AppointmentValidationError> {
    if value.trim().is_empty() {
        return Err(AppointmentValidationError::BlankField { field });
    }
    Ok(())
}

/// A stored appointment.
///
/// ## Invariants
/// - `id` is assigned by the persistence layer and never changes.
/// - `name`, `date`, and `time` are non-blank; drafts and patches enforce
///   this before any record reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Storage-assigned identifier.
    #[schema(example = 1)]
    pub id: i32,
    /// Person the appointment is for.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Scheduled date as entered by the caller.
    #[schema(example = "2024-01-01")]
    pub date: String,
    /// Scheduled time as entered by the caller.
    #[schema(example = "10:30")]
    pub time: String,
    /// Optional free-form note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Appointment {
    /// Assemble a stored appointment from a storage id and a validated draft.
    #[must_use]
    pub fn new(id: i32, draft: AppointmentDraft) -> Self {
        let AppointmentDraft {
            name,
            date,
            time,
            description,
        } = draft;
        Self {
            id,
            name,
            date,
            time,
            description,
        }
    }

    /// Overwrite the fields present in `patch`, leaving the rest unchanged.
    pub fn apply(&mut self, patch: AppointmentPatch) {
        let AppointmentPatch {
            name,
            date,
            time,
            description,
        } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(date) = date {
            self.date = date;
        }
        if let Some(time) = time {
            self.time = time;
        }
        if let Some(description) = description {
            self.description = Some(description);
        }
    }
}

/// Field set for creating an appointment, prior to id assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub name: String,
    pub date: String,
    pub time: String,
    pub description: Option<String>,
}

impl AppointmentDraft {
    /// Check that every required field is present and non-blank.
    ///
    /// Validation is deliberately shallow: presence only, no format checks.
    pub fn validate(&self) -> Result<(), AppointmentValidationError> {
        require("name", &self.name)?;
        require("date", &self.date)?;
        require("time", &self.time)?;
        Ok(())
    }
}

/// Partial field set for updating an appointment in place.
///
/// `None` means "leave unchanged"; a supplied value overwrites the stored
/// one. Required fields may not be overwritten with blanks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentPatch {
    pub name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
}

impl AppointmentPatch {
    /// Check that every supplied required field is non-blank.
    pub fn validate(&self) -> Result<(), AppointmentValidationError> {
        if let Some(name) = &self.name {
            require("name", name)?;
        }
        if let Some(date) = &self.date {
            require("date", date)?;
        }
        if let Some(time) = &self.time {
            require("time", time)?;
        }
        Ok(())
    }

    /// True when the patch carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft() -> AppointmentDraft {
        AppointmentDraft {
            name: "Ada".into(),
            date: "2024-01-01".into(),
            time: "10:30".into(),
            description: None,
        }
    }

    #[rstest]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[rstest]
    #[case("name", AppointmentDraft { name: "  ".into(), ..draft() })]
    #[case("date", AppointmentDraft { date: String::new(), ..draft() })]
    #[case("time", AppointmentDraft { time: " ".into(), ..draft() })]
    fn blank_required_field_is_rejected(
        #[case] field: &'static str,
        #[case] candidate: AppointmentDraft,
    ) {
        let err = candidate.validate().expect_err("blank field should fail");
        assert_eq!(err, AppointmentValidationError::BlankField { field });
    }

    #[rstest]
    fn apply_overwrites_only_supplied_fields() {
        let mut stored = Appointment::new(1, draft());
        stored.apply(AppointmentPatch {
            date: Some("2024-02-02".into()),
            ..AppointmentPatch::default()
        });
        assert_eq!(stored.name, "Ada");
        assert_eq!(stored.date, "2024-02-02");
        assert_eq!(stored.time, "10:30");
        assert_eq!(stored.description, None);
    }

    #[rstest]
    fn patch_rejects_blank_override_of_required_field() {
        let patch = AppointmentPatch {
            name: Some("   ".into()),
            ..AppointmentPatch::default()
        };
        assert!(patch.validate().is_err());
    }

    #[rstest]
    fn empty_patch_reports_empty() {
        assert!(AppointmentPatch::default().is_empty());
        assert!(
            !AppointmentPatch {
                time: Some("09:00".into()),
                ..AppointmentPatch::default()
            }
            .is_empty()
        );
    }

    #[rstest]
    fn serialises_camel_case_and_omits_missing_description() {
        let value = serde_json::to_value(Appointment::new(7, draft())).expect("serialise");
        assert_eq!(value["id"], 7);
        assert_eq!(value["name"], "Ada");
        assert!(value.get("description").is_none());
    }
}
