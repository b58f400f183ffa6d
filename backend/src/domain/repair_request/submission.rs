//! Validation of customer submissions and admin notes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ContactMethod;

/// Maximum characters in a customer name.
pub const NAME_MAX_CHARS: usize = 100;
/// Maximum characters in a problem description.
pub const PROBLEM_MAX_CHARS: usize = 2000;
/// Maximum characters in a phone number or email address.
pub const CONTACT_MAX_CHARS: usize = 254;
/// Maximum characters in a device category.
pub const DEVICE_TYPE_MAX_CHARS: usize = 64;
/// Maximum characters in admin notes.
pub const NOTES_MAX_CHARS: usize = 4000;

/// Device category used when the customer picked neither a device type nor
/// a service category.
pub const GENERAL_DEVICE_TYPE: &str = "general";

/// Submission fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionField {
    Name,
    DeviceType,
    Problem,
    ContactMethod,
    Contact,
    Notes,
}

impl SubmissionField {
    /// Field name as it appears in request bodies.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DeviceType => "deviceType",
            Self::Problem => "problem",
            Self::ContactMethod => "contactMethod",
            Self::Contact => "contact",
            Self::Notes => "notes",
        }
    }
}

impl fmt::Display for SubmissionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a submission is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("problem description must not be empty")]
    EmptyProblem,
    #[error("contact must not be empty")]
    EmptyContact,
    #[error("contact method must be whatsapp or email (got {value:?})")]
    InvalidContactMethod { value: String },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: SubmissionField, max: usize },
}

impl SubmissionValidationError {
    /// Field the error refers to.
    #[must_use]
    pub fn field(&self) -> SubmissionField {
        match self {
            Self::EmptyName => SubmissionField::Name,
            Self::EmptyProblem => SubmissionField::Problem,
            Self::EmptyContact => SubmissionField::Contact,
            Self::InvalidContactMethod { .. } => SubmissionField::ContactMethod,
            Self::TooLong { field, .. } => *field,
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::EmptyProblem => "empty_problem",
            Self::EmptyContact => "empty_contact",
            Self::InvalidContactMethod { .. } => "invalid_contact_method",
            Self::TooLong { .. } => "too_long",
        }
    }
}

/// Device category recorded on a repair request.
///
/// Always non-empty. Stored as entered (trimmed); comparisons for icon
/// selection are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceType(String);

impl DeviceType {
    /// Pick the device category for a submission.
    ///
    /// The first non-blank of `device_type` and `service_category` wins;
    /// otherwise the category is [`GENERAL_DEVICE_TYPE`].
    ///
    /// # Examples
    /// ```
    /// use techfix::domain::DeviceType;
    ///
    /// assert_eq!(DeviceType::resolve(Some("laptop"), Some("computers")).as_str(), "laptop");
    /// assert_eq!(DeviceType::resolve(Some(" "), Some("computers")).as_str(), "computers");
    /// assert_eq!(DeviceType::resolve(None, None).as_str(), "general");
    /// ```
    #[must_use]
    pub fn resolve(device_type: Option<&str>, service_category: Option<&str>) -> Self {
        [device_type, service_category]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .map_or_else(
                || Self(GENERAL_DEVICE_TYPE.to_owned()),
                |value| Self(value.to_owned()),
            )
    }

    /// Rebuild a stored device category.
    pub fn from_stored(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Self(GENERAL_DEVICE_TYPE.to_owned())
        } else {
            Self(value)
        }
    }

    /// Category text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw submission as received from the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairRequestSubmission {
    pub name: String,
    pub device_type: Option<String>,
    pub service_category: Option<String>,
    pub problem: String,
    pub contact_method: String,
    pub contact: String,
}

/// Submission that passed validation; every string is trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    pub name: String,
    pub device_type: DeviceType,
    pub problem: String,
    pub contact_method: ContactMethod,
    pub contact: String,
}

impl TryFrom<RepairRequestSubmission> for ValidatedSubmission {
    type Error = SubmissionValidationError;

    fn try_from(value: RepairRequestSubmission) -> Result<Self, Self::Error> {
        let name = required(
            &value.name,
            SubmissionField::Name,
            NAME_MAX_CHARS,
            SubmissionValidationError::EmptyName,
        )?;
        let problem = required(
            &value.problem,
            SubmissionField::Problem,
            PROBLEM_MAX_CHARS,
            SubmissionValidationError::EmptyProblem,
        )?;
        let contact_method = value
            .contact_method
            .trim()
            .parse::<ContactMethod>()
            .map_err(|err| SubmissionValidationError::InvalidContactMethod { value: err.value })?;
        let contact = required(
            &value.contact,
            SubmissionField::Contact,
            CONTACT_MAX_CHARS,
            SubmissionValidationError::EmptyContact,
        )?;
        let device_type = DeviceType::resolve(
            value.device_type.as_deref(),
            value.service_category.as_deref(),
        );
        ensure_max(device_type.as_str(), SubmissionField::DeviceType, DEVICE_TYPE_MAX_CHARS)?;

        Ok(Self {
            name,
            device_type,
            problem,
            contact_method,
            contact,
        })
    }
}

/// Normalise admin notes: trim, treat blank as "no notes".
///
/// # Examples
/// ```
/// use techfix::domain::normalise_notes;
///
/// assert_eq!(normalise_notes("  ").unwrap(), None);
/// assert_eq!(normalise_notes(" screen ordered ").unwrap().as_deref(), Some("screen ordered"));
/// ```
pub fn normalise_notes(raw: &str) -> Result<Option<String>, SubmissionValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    ensure_max(trimmed, SubmissionField::Notes, NOTES_MAX_CHARS)?;
    Ok(Some(trimmed.to_owned()))
}

fn required(
    raw: &str,
    field: SubmissionField,
    max: usize,
    empty: SubmissionValidationError,
) -> Result<String, SubmissionValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    ensure_max(trimmed, field, max)?;
    Ok(trimmed.to_owned())
}

fn ensure_max(
    value: &str,
    field: SubmissionField,
    max: usize,
) -> Result<(), SubmissionValidationError> {
    if value.chars().count() > max {
        return Err(SubmissionValidationError::TooLong { field, max });
    }
    Ok(())
}
