use std::collections::BTreeSet;
use std::fmt;

use super::error::DatasetError;

// ---------------------------------------------------------------------------
// Column names – the compatibility contract with the input file
// ---------------------------------------------------------------------------

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_CLASS: &str = "class";

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Launch outcome; stored in the source file as `class` (1 = success).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value as it appears in the dataset.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    /// Interpret a numeric cell. Only exact 0 and 1 are accepted.
    pub fn from_class(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Outcome::Failure)
        } else if value == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Always finite and non-negative.
    pub payload_mass_kg: f64,
    pub booster_version_category: String,
    pub outcome: Outcome,
}

impl LaunchRecord {
    /// Validate raw cell values coming out of a loader.
    ///
    /// `row` is only used for diagnostics.
    pub fn from_cells(
        row: usize,
        launch_site: &str,
        payload_mass_kg: f64,
        booster_version_category: &str,
        class: f64,
    ) -> Result<Self, DatasetError> {
        let launch_site = launch_site.trim();
        if launch_site.is_empty() {
            return Err(DatasetError::invalid(row, COL_LAUNCH_SITE, "empty site identifier"));
        }
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            return Err(DatasetError::invalid(
                row,
                COL_PAYLOAD_MASS,
                format!("expected a non-negative mass, got {payload_mass_kg}"),
            ));
        }
        let booster = booster_version_category.trim();
        if booster.is_empty() {
            return Err(DatasetError::invalid(row, COL_BOOSTER_CATEGORY, "empty category"));
        }
        let outcome = Outcome::from_class(class).ok_or_else(|| {
            DatasetError::invalid(row, COL_CLASS, format!("expected 0 or 1, got {class}"))
        })?;

        Ok(LaunchRecord {
            launch_site: launch_site.to_string(),
            payload_mass_kg,
            booster_version_category: booster.to_string(),
            outcome,
        })
    }
}

// ---------------------------------------------------------------------------
// PayloadRange – inclusive payload filter bounds
// ---------------------------------------------------------------------------

/// Inclusive `[low, high]` payload window in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Inclusive at both ends. An inverted range contains nothing.
    pub fn contains(&self, mass_kg: f64) -> bool {
        self.low <= mass_kg && mass_kg <= self.high
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full, immutable dataset with indices computed once at load time.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct sites in order of first appearance.
    sites: Vec<String>,
    /// Sorted distinct booster categories.
    booster_categories: BTreeSet<String>,
    /// `[min_payload, max_payload]` over all records.
    payload_bounds: PayloadRange,
}

impl LaunchDataset {
    /// Build indices from loaded records. A dataset must have at least one row.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories = BTreeSet::new();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for rec in &records {
            if !sites.contains(&rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            booster_categories.insert(rec.booster_version_category.clone());
            min = min.min(rec.payload_mass_kg);
            max = max.max(rec.payload_mass_kg);
        }

        Ok(LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_bounds: PayloadRange::new(min, max),
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    pub fn payload_bounds(&self) -> PayloadRange {
        self.payload_bounds
    }

    /// Number of launch records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(site: &str, payload: f64, booster: &str, class: f64) -> LaunchRecord {
        LaunchRecord::from_cells(0, site, payload, booster, class).unwrap()
    }

    /// The three-row dataset used throughout the aggregation tests.
    pub(crate) fn scenario_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("CCAFS LC-40", 500.0, "v1.0", 1.0),
            record("CCAFS LC-40", 2500.0, "v1.1", 0.0),
            record("KSC LC-39A", 6000.0, "v1.1", 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_outcome_class_round_trip() {
        assert_eq!(Outcome::from_class(1.0), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(0.0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(0.5), None);
        assert_eq!(Outcome::Success.class(), 1);
        assert_eq!(Outcome::Failure.to_string(), "0");
    }

    #[test]
    fn test_record_validation() {
        assert!(LaunchRecord::from_cells(0, "KSC LC-39A", 0.0, "FT", 1.0).is_ok());

        let err = LaunchRecord::from_cells(4, "KSC LC-39A", -1.0, "FT", 1.0).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidValue { row: 4, column: COL_PAYLOAD_MASS, .. }
        ));

        let err = LaunchRecord::from_cells(2, "KSC LC-39A", 10.0, "FT", 2.0).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidValue { column: COL_CLASS, .. }));

        let err = LaunchRecord::from_cells(1, "  ", 10.0, "FT", 1.0).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidValue { column: COL_LAUNCH_SITE, .. }));

        let err = LaunchRecord::from_cells(1, "KSC", f64::NAN, "FT", 1.0).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidValue { column: COL_PAYLOAD_MASS, .. }));
    }

    #[test]
    fn test_payload_range_is_inclusive() {
        let range = PayloadRange::new(500.0, 2500.0);
        assert!(range.contains(500.0));
        assert!(range.contains(2500.0));
        assert!(!range.contains(2500.1));
        assert!(!PayloadRange::new(10.0, 5.0).contains(7.0));
    }

    #[test]
    fn test_dataset_indices() {
        let ds = scenario_dataset();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites(), ["CCAFS LC-40", "KSC LC-39A"]);
        assert_eq!(
            ds.booster_categories().iter().collect::<Vec<_>>(),
            ["v1.0", "v1.1"]
        );
        assert_eq!(ds.payload_bounds(), PayloadRange::new(500.0, 6000.0));
    }

    #[test]
    fn test_sites_keep_first_appearance_order() {
        let ds = LaunchDataset::from_records(vec![
            record("VAFB SLC-4E", 100.0, "FT", 1.0),
            record("CCAFS LC-40", 200.0, "FT", 0.0),
            record("VAFB SLC-4E", 300.0, "B4", 1.0),
        ])
        .unwrap();
        assert_eq!(ds.sites(), ["VAFB SLC-4E", "CCAFS LC-40"]);
    }

    #[test]
    fn test_empty_dataset_rejected() {
        assert_eq!(
            LaunchDataset::from_records(Vec::new()).unwrap_err(),
            DatasetError::Empty
        );
    }
}
