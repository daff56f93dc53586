//! Extended intake form data model.
//!
//! The intake variant captures the full reception desk form: file number,
//! national id, plot coordinates (block/lot/sector), an ordered list of
//! subjects to discuss, and the scheduled visit. As with the simple
//! appointment, validation is presence-only.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised by intake drafts and patches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeValidationError {
    /// A required field was missing or blank.
    BlankField {
        /// JSON name of the offending field.
        field: &'static str,
    },
}

impl std::fmt::Display for IntakeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { field } => write!(f, "{field} must not be blank"),
        }
    }
}

impl std::error::Error for IntakeValidationError {}

fn require(field: &'static str, value: &str) -> Result<(), IntakeValidationError> {
    if value.trim().is_empty() {
        return Err(IntakeValidationError::BlankField { field });
    }
    Ok(())
}

/// A stored intake record.
///
/// ## Invariants
/// - `id` is assigned by the persistence layer and never changes.
/// - Required string fields are non-blank; drafts and patches enforce this
///   before any record reaches storage.
/// - `subjects` preserves caller-supplied order and defaults to the empty
///   list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRecord {
    /// Storage-assigned identifier.
    #[schema(example = 1)]
    pub id: i32,
    /// Reception file number.
    #[schema(example = "EXP-2024-0117")]
    pub file_number: String,
    /// Date the intake was registered.
    #[schema(example = "2024-01-17")]
    pub intake_date: String,
    /// Name of the administrator who registered the intake.
    pub admin_name: String,
    /// National identity document of the visitor.
    pub national_id: String,
    /// Visitor age, when given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    /// Plot block, when given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    /// Plot lot, when given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot: Option<String>,
    /// Plot sector, when given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    /// Ordered list of subjects to discuss during the visit.
    pub subjects: Vec<String>,
    /// Scheduled visit date.
    #[schema(example = "2024-02-01")]
    pub visit_date: String,
    /// Scheduled visit time.
    #[schema(example = "09:00")]
    pub visit_time: String,
    /// Person who scheduled the visit.
    pub scheduler: String,
    /// Creation timestamp recorded with the intake.
    #[schema(example = "2024-01-17T12:00:00+00:00")]
    pub created_at: String,
}

impl IntakeRecord {
    /// Assemble a stored record from a storage id and a validated draft.
    #[must_use]
    pub fn new(id: i32, draft: IntakeDraft) -> Self {
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

    /// Overwrite the fields present in `patch`, leaving the rest unchanged.
    pub fn apply(&mut self, patch: IntakePatch) {
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
        if let Some(file_number) = file_number {
            self.file_number = file_number;
        }
        if let Some(intake_date) = intake_date {
            self.intake_date = intake_date;
        }
        if let Some(admin_name) = admin_name {
            self.admin_name = admin_name;
        }
        if let Some(national_id) = national_id {
            self.national_id = national_id;
        }
        if let Some(age) = age {
            self.age = Some(age);
        }
        if let Some(block) = block {
            self.block = Some(block);
        }
        if let Some(lot) = lot {
            self.lot = Some(lot);
        }
        if let Some(sector) = sector {
            self.sector = Some(sector);
        }
        if let Some(subjects) = subjects {
            self.subjects = subjects;
        }
        if let Some(visit_date) = visit_date {
            self.visit_date = visit_date;
        }
        if let Some(visit_time) = visit_time {
            self.visit_time = visit_time;
        }
        if let Some(scheduler) = scheduler {
            self.scheduler = scheduler;
        }
        if let Some(created_at) = created_at {
            self.created_at = created_at;
        }
    }
}

/// Field set for creating an intake record, prior to id assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeDraft {
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

impl IntakeDraft {
    /// Check that every required field is present and non-blank.
    pub fn validate(&self) -> Result<(), IntakeValidationError> {
        require("fileNumber", &self.file_number)?;
        require("intakeDate", &self.intake_date)?;
        require("adminName", &self.admin_name)?;
        require("nationalId", &self.national_id)?;
        require("visitDate", &self.visit_date)?;
        require("visitTime", &self.visit_time)?;
        require("scheduler", &self.scheduler)?;
        require("createdAt", &self.created_at)?;
        Ok(())
    }
}

/// Partial field set for updating an intake record in place.
///
/// `None` means "leave unchanged". Required fields may not be overwritten
/// with blanks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakePatch {
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

impl IntakePatch {
    /// Check that every supplied required field is non-blank.
    pub fn validate(&self) -> Result<(), IntakeValidationError> {
        let required = [
            ("fileNumber", &self.file_number),
            ("intakeDate", &self.intake_date),
            ("adminName", &self.admin_name),
            ("nationalId", &self.national_id),
            ("visitDate", &self.visit_date),
            ("visitTime", &self.visit_time),
            ("scheduler", &self.scheduler),
            ("createdAt", &self.created_at),
        ];
        for (field, value) in required {
            if let Some(value) = value {
                require(field, value)?;
            }
        }
        Ok(())
    }

    /// True when the patch carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file_number.is_none()
            && self.intake_date.is_none()
            && self.admin_name.is_none()
            && self.national_id.is_none()
            && self.age.is_none()
            && self.block.is_none()
            && self.lot.is_none()
            && self.sector.is_none()
            && self.subjects.is_none()
            && self.visit_date.is_none()
            && self.visit_time.is_none()
            && self.scheduler.is_none()
            && self.created_at.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft() -> IntakeDraft {
        IntakeDraft {
            file_number: "EXP-2024-0117".into(),
            intake_date: "2024-01-17".into(),
            admin_name: "Mar Gomez".into(),
            national_id: "44556677".into(),
            age: Some(52),
            block: Some("B".into()),
            lot: Some("12".into()),
            sector: None,
            subjects: vec!["water".into(), "electricity".into()],
            visit_date: "2024-02-01".into(),
            visit_time: "09:00".into(),
            scheduler: "Reception".into(),
            created_at: "2024-01-17T12:00:00+00:00".into(),
        }
    }

    #[rstest]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[rstest]
    #[case("fileNumber", IntakeDraft { file_number: " ".into(), ..draft() })]
    #[case("scheduler", IntakeDraft { scheduler: String::new(), ..draft() })]
    #[case("createdAt", IntakeDraft { created_at: "  ".into(), ..draft() })]
    fn blank_required_field_is_rejected(
        #[case] field: &'static str,
        #[case] candidate: IntakeDraft,
    ) {
        let err = candidate.validate().expect_err("blank field should fail");
        assert_eq!(err, IntakeValidationError::BlankField { field });
    }

    #[rstest]
    fn apply_replaces_subjects_wholesale_and_keeps_order() {
        let mut stored = IntakeRecord::new(3, draft());
        stored.apply(IntakePatch {
            subjects: Some(vec!["roads".into(), "water".into()]),
            ..IntakePatch::default()
        });
        assert_eq!(stored.subjects, vec!["roads", "water"]);
        assert_eq!(stored.file_number, "EXP-2024-0117");
    }

    #[rstest]
    fn patch_rejects_blank_override() {
        let patch = IntakePatch {
            visit_date: Some("  ".into()),
            ..IntakePatch::default()
        };
        assert_eq!(
            patch.validate().expect_err("blank visitDate"),
            IntakeValidationError::BlankField { field: "visitDate" }
        );
    }

    #[rstest]
    fn serialises_with_verbatim_camel_case_field_names() {
        let value = serde_json::to_value(IntakeRecord::new(9, draft())).expect("serialise");
        for key in [
            "fileNumber",
            "intakeDate",
            "adminName",
            "nationalId",
            "visitDate",
            "visitTime",
            "scheduler",
            "createdAt",
            "subjects",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["subjects"][0], "water");
        assert_eq!(value["subjects"][1], "electricity");
    }
}
