//! Site profile and the fixed service catalogue.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::{ContactMethod, TrackingToken};

/// Brand name used when configuration does not override it.
pub const DEFAULT_BRAND_NAME: &str = "TechFix NL";
/// Region the business serves.
pub const SERVICE_AREA: &str = "The Netherlands";
/// Promised response time for new requests.
pub const RESPONSE_TIME_HOURS: u32 = 24;

/// Device types offered by the submission form, as displayed.
pub const DEVICE_TYPE_LABELS: [&str; 9] = [
    "Laptop",
    "Desktop PC",
    "Mobile Phone",
    "Tablet",
    "TV",
    "Heater",
    "Router",
    "Network Switch",
    "Other",
];

/// Option in the device type picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceTypeOption {
    pub label: &'static str,
    pub value: String,
}

/// Device type options; values are the lowercased labels.
#[must_use]
pub fn device_type_options() -> Vec<DeviceTypeOption> {
    DEVICE_TYPE_LABELS
        .iter()
        .map(|label| DeviceTypeOption {
            label,
            value: label.to_lowercase(),
        })
        .collect()
}

/// Branding and public origin, built once at start-up.
///
/// # Examples
/// ```
/// use techfix::domain::{SiteProfile, TrackingToken};
///
/// let site = SiteProfile::new("TechFix NL", "https://techfix.nl/");
/// let token = TrackingToken::parse("abc").unwrap();
/// assert_eq!(site.tracking_url(&token), "https://techfix.nl/track/abc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteProfile {
    brand_name: String,
    public_origin: String,
}

impl SiteProfile {
    /// Build a profile; trailing slashes are stripped from the origin.
    pub fn new(brand_name: impl Into<String>, public_origin: impl Into<String>) -> Self {
        let public_origin = public_origin.into();
        Self {
            brand_name: brand_name.into(),
            public_origin: public_origin.trim_end_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn brand_name(&self) -> &str {
        self.brand_name.as_str()
    }

    #[must_use]
    pub fn public_origin(&self) -> &str {
        self.public_origin.as_str()
    }

    /// Shareable tracking link for `token`.
    #[must_use]
    pub fn tracking_url(&self, token: &TrackingToken) -> String {
        format!("{}/track/{}", self.public_origin, token.as_str())
    }

    /// Contact methods offered by the submission form.
    #[must_use]
    pub fn contact_methods(&self) -> &'static [ContactMethod] {
        &ContactMethod::ALL
    }
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self::new(DEFAULT_BRAND_NAME, "http://localhost:8080")
    }
}

/// Service catalogue grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceCategory {
    Computers,
    MobilePhones,
    HomeElectronics,
    NetworkGear,
}

impl ServiceCategory {
    pub const ALL: [Self; 4] = [
        Self::Computers,
        Self::MobilePhones,
        Self::HomeElectronics,
        Self::NetworkGear,
    ];

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Computers => "computers",
            Self::MobilePhones => "mobile-phones",
            Self::HomeElectronics => "home-electronics",
            Self::NetworkGear => "network-gear",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Computers => "Computers",
            Self::MobilePhones => "Mobile Phones",
            Self::HomeElectronics => "Home Electronics",
            Self::NetworkGear => "Network Gear",
        }
    }
}

/// Filter applied to the catalogue; `All` keeps everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ServiceCategory),
}

/// Error returned for an unknown category slug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service category: {slug}")]
pub struct UnknownServiceCategory {
    pub slug: String,
}

impl FromStr for CategoryFilter {
    type Err = UnknownServiceCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim();
        if slug.is_empty() || slug == "all" {
            return Ok(Self::All);
        }
        ServiceCategory::ALL
            .into_iter()
            .find(|category| category.slug() == slug)
            .map(Self::Only)
            .ok_or_else(|| UnknownServiceCategory {
                slug: slug.to_owned(),
            })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => f.write_str(category.slug()),
        }
    }
}

/// One entry in the service catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOffering {
    pub id: &'static str,
    pub category: ServiceCategory,
    pub title: &'static str,
    pub problems: &'static [&'static str],
    pub price: &'static str,
}

const SERVICES: [ServiceOffering; 12] = [
    ServiceOffering {
        id: "os-install",
        category: ServiceCategory::Computers,
        title: "OS Installation",
        problems: &["Windows/Linux Setup", "Driver Installation", "System Optimization"],
        price: "From €49",
    },
    ServiceOffering {
        id: "hardware-replace",
        category: ServiceCategory::Computers,
        title: "Hardware Replacement",
        problems: &["RAM Upgrade", "CPU Replacement", "GPU Installation"],
        price: "From €39 + parts",
    },
    ServiceOffering {
        id: "cleaning",
        category: ServiceCategory::Computers,
        title: "Deep Cleaning",
        problems: &["Dust Removal", "Thermal Paste", "Fan Maintenance"],
        price: "From €35",
    },
    ServiceOffering {
        id: "data-recovery",
        category: ServiceCategory::Computers,
        title: "Data Recovery",
        problems: &["Failed HDD/SSD", "Corrupted Files", "Backup Setup"],
        price: "From €59",
    },
    ServiceOffering {
        id: "screen-replace",
        category: ServiceCategory::MobilePhones,
        title: "Screen Replacement",
        problems: &["Cracked Screen", "Touch Issues", "Display Problems"],
        price: "From €69",
    },
    ServiceOffering {
        id: "battery-swap",
        category: ServiceCategory::MobilePhones,
        title: "Battery Swap",
        problems: &["Fast Drain", "Swelling Battery", "Charging Issues"],
        price: "From €39",
    },
    ServiceOffering {
        id: "tv-repair",
        category: ServiceCategory::HomeElectronics,
        title: "TV Repair",
        problems: &["Power Board Issues", "No Picture", "Backlight Problems"],
        price: "From €59",
    },
    ServiceOffering {
        id: "heater-fix",
        category: ServiceCategory::HomeElectronics,
        title: "Heater Diagnostics",
        problems: &["Thermostat Issues", "No Heat", "Sensor Calibration"],
        price: "From €45",
    },
    ServiceOffering {
        id: "power-issues",
        category: ServiceCategory::HomeElectronics,
        title: "Power Electronics",
        problems: &["Surge Damage", "Capacitor Replace", "Power Supply Fix"],
        price: "From €55",
    },
    ServiceOffering {
        id: "router-config",
        category: ServiceCategory::NetworkGear,
        title: "Router Configuration",
        problems: &["WiFi Setup", "Speed Optimization", "Security Hardening"],
        price: "From €35",
    },
    ServiceOffering {
        id: "switch-trouble",
        category: ServiceCategory::NetworkGear,
        title: "Switch Troubleshooting",
        problems: &["Port Issues", "VLAN Setup", "Network Drops"],
        price: "From €45",
    },
    ServiceOffering {
        id: "network-setup",
        category: ServiceCategory::NetworkGear,
        title: "Home Network Setup",
        problems: &["Full Installation", "Mesh Systems", "Cable Management"],
        price: "From €79",
    },
];

/// Catalogue entries matching `filter`, in catalogue order.
#[must_use]
pub fn services_matching(filter: CategoryFilter) -> Vec<ServiceOffering> {
    SERVICES
        .iter()
        .filter(|service| match filter {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => service.category == category,
        })
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", 12)]
    #[case("all", 12)]
    #[case("computers", 4)]
    #[case("mobile-phones", 2)]
    #[case("home-electronics", 3)]
    #[case("network-gear", 3)]
    fn filters_by_category(#[case] slug: &str, #[case] expected: usize) {
        let filter: CategoryFilter = slug.parse().expect("known slug");
        assert_eq!(services_matching(filter).len(), expected);
    }

    #[rstest]
    fn unknown_slug_is_rejected() {
        let err = "toasters".parse::<CategoryFilter>().expect_err("unknown slug");
        assert_eq!(err.slug, "toasters");
    }

    #[rstest]
    fn device_type_values_are_lowercase_labels() {
        let options = device_type_options();
        assert_eq!(options.len(), DEVICE_TYPE_LABELS.len());
        assert!(
            options
                .iter()
                .any(|option| option.label == "Desktop PC" && option.value == "desktop pc")
        );
    }

    #[rstest]
    #[case("https://techfix.nl", "https://techfix.nl/track/t0k3n")]
    #[case("https://techfix.nl///", "https://techfix.nl/track/t0k3n")]
    fn tracking_url_joins_origin_and_token(#[case] origin: &str, #[case] expected: &str) {
        let site = SiteProfile::new(DEFAULT_BRAND_NAME, origin);
        let token = TrackingToken::parse("t0k3n").expect("non-blank token");
        assert_eq!(site.tracking_url(&token), expected);
    }
}
