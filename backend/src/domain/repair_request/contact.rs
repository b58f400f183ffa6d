//! Contact channel chosen by the customer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the business should reach the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Whatsapp,
    Email,
}

impl ContactMethod {
    /// All contact methods offered by the submission form.
    pub const ALL: [Self; 2] = [Self::Whatsapp, Self::Email];

    /// Stable wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Whatsapp => "whatsapp",
            Self::Email => "email",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Whatsapp => "WhatsApp",
            Self::Email => "Email",
        }
    }

    /// Link an admin can follow to reach the customer.
    ///
    /// WhatsApp links keep only the digits of the stored number; email links
    /// use the address verbatim.
    ///
    /// # Examples
    /// ```
    /// use techfix::domain::ContactMethod;
    ///
    /// assert_eq!(
    ///     ContactMethod::Whatsapp.contact_link("+31 6 1234 5678"),
    ///     "https://wa.me/31612345678",
    /// );
    /// assert_eq!(
    ///     ContactMethod::Email.contact_link("jane@example.nl"),
    ///     "mailto:jane@example.nl",
    /// );
    /// ```
    #[must_use]
    pub fn contact_link(self, contact: &str) -> String {
        match self {
            Self::Whatsapp => {
                let digits: String = contact.chars().filter(char::is_ascii_digit).collect();
                format!("https://wa.me/{digits}")
            }
            Self::Email => format!("mailto:{contact}"),
        }
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a contact method string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contact method: {value}")]
pub struct ParseContactMethodError {
    pub value: String,
}

impl FromStr for ContactMethod {
    type Err = ParseContactMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ParseContactMethodError {
                value: s.to_owned(),
            })
    }
}
