use std::fmt;

use super::model::{LaunchDataset, LaunchRecord, PayloadRange};

// ---------------------------------------------------------------------------
// Site selection: the dropdown value
// ---------------------------------------------------------------------------

/// Dropdown label meaning "no site filter".
pub const ALL_SITES: &str = "All Sites";

/// Which launch site(s) the dashboard is looking at.
///
/// Any site name is accepted, including ones the dataset does not contain;
/// those simply match no rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Interpret a dropdown value. Only the exact sentinel maps to `All`.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(label.to_string())
        }
    }

    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.launch_site == *site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{ALL_SITES}"),
            SiteSelection::Site(site) => write!(f, "{site}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Row filters
// ---------------------------------------------------------------------------

/// Records at the selected site(s), in dataset order.
pub fn site_records<'a>(
    dataset: &'a LaunchDataset,
    site: &'a SiteSelection,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset.records().iter().filter(move |rec| site.matches(rec))
}

/// Records passing both the payload window and the site filter, in dataset
/// order. The payload window is applied first.
pub fn payload_site_records<'a>(
    dataset: &'a LaunchDataset,
    site: &'a SiteSelection,
    range: PayloadRange,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset
        .records()
        .iter()
        .filter(move |rec| range.contains(rec.payload_mass_kg))
        .filter(move |rec| site.matches(rec))
}
