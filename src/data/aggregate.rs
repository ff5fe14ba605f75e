use std::collections::BTreeMap;

use super::filter::{payload_site_records, site_records, SiteSelection};
use super::model::{LaunchDataset, Outcome, PayloadRange};

// ---------------------------------------------------------------------------
// Chart-ready summaries
// ---------------------------------------------------------------------------

/// One labelled wedge of the success pie.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
}

/// Labels, values and title for the success pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn labels(&self) -> Vec<&str> {
        self.slices.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<u64> {
        self.slices.iter().map(|s| s.value).collect()
    }

    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// A single launch on the payload/outcome scatter.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

/// Points and title for the payload vs. success scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Successful launch counts for the pie chart.
///
/// * `All` – one slice per site (sorted by site name) whose value is the
///   number of successful launches there; sites without a success still get a
///   zero slice.
/// * `Site(s)` – the rows of `s` counted per outcome class, labelled `"0"` /
///   `"1"`. Only classes that occur are emitted, so an unknown site produces
///   no slices at all.
pub fn success_breakdown(dataset: &LaunchDataset, site: &SiteSelection) -> PieChart {
    match site {
        SiteSelection::All => {
            let mut successes: BTreeMap<&str, u64> = BTreeMap::new();
            for rec in dataset.records() {
                *successes.entry(rec.launch_site.as_str()).or_default() +=
                    u64::from(rec.outcome.class());
            }
            PieChart {
                title: "Total Success Launches By Site".to_string(),
                slices: successes
                    .into_iter()
                    .map(|(label, value)| PieSlice {
                        label: label.to_string(),
                        value,
                    })
                    .collect(),
            }
        }
        SiteSelection::Site(name) => {
            let mut counts: BTreeMap<Outcome, u64> = BTreeMap::new();
            for rec in site_records(dataset, site) {
                *counts.entry(rec.outcome).or_default() += 1;
            }
            PieChart {
                title: format!("Total Success Launches for site {name}"),
                slices: counts
                    .into_iter()
                    .map(|(outcome, value)| PieSlice {
                        label: outcome.to_string(),
                        value,
                    })
                    .collect(),
            }
        }
    }
}

/// Launches inside the payload window (and at the selected site) for the
/// scatter chart, in dataset order.
pub fn payload_success(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
) -> ScatterChart {
    let title = match site {
        SiteSelection::All => "Correlation between Payload and Success for all Sites".to_string(),
        SiteSelection::Site(name) => format!("Correlation between Payload and Success for {name}"),
    };

    let points = payload_site_records(dataset, site, range)
        .map(|rec| ScatterPoint {
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome,
            booster_version_category: rec.booster_version_category.clone(),
        })
        .collect();

    ScatterChart { title, points }
}
