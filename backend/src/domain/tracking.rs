//! Public tracking projection and its presentation hints.
//!
//! Anyone holding a tracking token sees the fields below and nothing else.
//! Contact details, notes and the token itself stay private.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{DeviceType, RepairRequest, RepairStatus};

/// Presentation tuple for a status on the tracking page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPresentation {
    pub icon: &'static str,
    pub color: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

impl RepairStatus {
    /// Icon, colour, label and sentence shown to the customer.
    ///
    /// # Examples
    /// ```
    /// use techfix::domain::RepairStatus;
    ///
    /// let shown = RepairStatus::Completed.presentation();
    /// assert_eq!(shown.label, "Completed");
    /// assert_eq!(shown.color, "green");
    /// ```
    #[must_use]
    pub const fn presentation(self) -> StatusPresentation {
        match self {
            Self::Pending => StatusPresentation {
                icon: "clock",
                color: "yellow",
                label: "Pending Review",
                description: "Your repair request has been received and is awaiting review.",
            },
            Self::InProgress => StatusPresentation {
                icon: "refresh-cw",
                color: "blue",
                label: "In Progress",
                description: "Great news! Your device is currently being repaired.",
            },
            Self::Completed => StatusPresentation {
                icon: "check-circle",
                color: "green",
                label: "Completed",
                description: "Your repair has been completed! We'll contact you for pickup/delivery.",
            },
            Self::Cancelled => StatusPresentation {
                icon: "x-circle",
                color: "red",
                label: "Cancelled",
                description: "This repair request has been cancelled.",
            },
        }
    }
}

/// Icon family for a device category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceIcon {
    Monitor,
    Smartphone,
    Home,
    Wifi,
    Wrench,
}

impl DeviceIcon {
    /// Icon identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monitor => "monitor",
            Self::Smartphone => "smartphone",
            Self::Home => "home",
            Self::Wifi => "wifi",
            Self::Wrench => "wrench",
        }
    }
}

impl DeviceType {
    /// Icon shown next to the device category; unknown categories get a
    /// wrench.
    #[must_use]
    pub fn icon(&self) -> DeviceIcon {
        match self.as_str().trim().to_lowercase().as_str() {
            "laptop" | "desktop pc" => DeviceIcon::Monitor,
            "mobile phone" | "tablet" => DeviceIcon::Smartphone,
            "tv" | "heater" => DeviceIcon::Home,
            "router" | "network switch" => DeviceIcon::Wifi,
            _ => DeviceIcon::Wrench,
        }
    }
}

/// Fields of a repair request visible to a token holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedRepair {
    pub id: Uuid,
    pub name: String,
    pub device_type: DeviceType,
    pub problem: String,
    pub status: RepairStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&RepairRequest> for TrackedRepair {
    fn from(value: &RepairRequest) -> Self {
        Self {
            id: value.id(),
            name: value.name().to_owned(),
            device_type: value.device_type().clone(),
            problem: value.problem().to_owned(),
            status: value.status(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

/// Everything the tracking page renders for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingView {
    pub repair: TrackedRepair,
    pub presentation: StatusPresentation,
    pub device_icon: DeviceIcon,
}

impl From<&RepairRequest> for TrackingView {
    fn from(value: &RepairRequest) -> Self {
        Self {
            repair: TrackedRepair::from(value),
            presentation: value.status().presentation(),
            device_icon: value.device_type().icon(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("laptop", DeviceIcon::Monitor)]
    #[case("Desktop PC", DeviceIcon::Monitor)]
    #[case("mobile phone", DeviceIcon::Smartphone)]
    #[case("tablet", DeviceIcon::Smartphone)]
    #[case("TV", DeviceIcon::Home)]
    #[case("heater", DeviceIcon::Home)]
    #[case("router", DeviceIcon::Wifi)]
    #[case("network switch", DeviceIcon::Wifi)]
    #[case("computers", DeviceIcon::Wrench)]
    #[case("general", DeviceIcon::Wrench)]
    fn device_icons(#[case] device_type: &str, #[case] expected: DeviceIcon) {
        assert_eq!(DeviceType::from_stored(device_type).icon(), expected);
    }

    #[rstest]
    #[case(RepairStatus::Pending, "clock", "yellow", "Pending Review")]
    #[case(RepairStatus::InProgress, "refresh-cw", "blue", "In Progress")]
    #[case(RepairStatus::Completed, "check-circle", "green", "Completed")]
    #[case(RepairStatus::Cancelled, "x-circle", "red", "Cancelled")]
    fn status_presentation(
        #[case] status: RepairStatus,
        #[case] icon: &str,
        #[case] color: &str,
        #[case] label: &str,
    ) {
        let shown = status.presentation();
        assert_eq!((shown.icon, shown.color, shown.label), (icon, color, label));
        assert!(!shown.description.is_empty());
    }
}
