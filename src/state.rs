use std::collections::BTreeMap;

use crate::data::aggregate::{payload_success, success_breakdown, PieChart, ScatterChart};
use crate::data::filter::{SiteSelection, ALL_SITES};
use crate::data::model::{LaunchDataset, PayloadRange};

// ---------------------------------------------------------------------------
// Inputs, outputs and figures
// ---------------------------------------------------------------------------

/// The dashboard controls a callback can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    SiteDropdown,
    PayloadSlider,
}

/// The charts a callback can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Output {
    SuccessPie,
    PayloadScatter,
}

/// Current values of every control.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Pie(PieChart),
    Scatter(ScatterChart),
}

/// A registered recomputation: when any of `inputs` changes, `compute` runs
/// and its figure replaces whatever `output` showed before.
pub struct Callback {
    pub output: Output,
    pub inputs: &'static [Input],
    pub compute: fn(&LaunchDataset, &Controls) -> Figure,
}

impl Callback {
    fn observes(&self, input: Input) -> bool {
        self.inputs.contains(&input)
    }
}

/// The latest figure for an output plus how many times it has been produced.
#[derive(Debug, Clone)]
struct Rendered {
    figure: Figure,
    revision: u64,
}

fn success_pie(dataset: &LaunchDataset, controls: &Controls) -> Figure {
    Figure::Pie(success_breakdown(dataset, &controls.site))
}

fn payload_scatter(dataset: &LaunchDataset, controls: &Controls) -> Figure {
    Figure::Scatter(payload_success(dataset, &controls.site, controls.payload))
}

/// The dashboard's wiring: the pie follows the site dropdown, the scatter
/// follows both controls.
pub fn default_callbacks() -> Vec<Callback> {
    vec![
        Callback {
            output: Output::SuccessPie,
            inputs: &[Input::SiteDropdown],
            compute: success_pie,
        },
        Callback {
            output: Output::PayloadScatter,
            inputs: &[Input::SiteDropdown, Input::PayloadSlider],
            compute: payload_scatter,
        },
    ]
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct DashboardState {
    /// Loaded once at startup, never mutated.
    dataset: LaunchDataset,
    controls: Controls,
    callbacks: Vec<Callback>,
    rendered: BTreeMap<Output, Rendered>,
}

impl DashboardState {
    pub fn new(dataset: LaunchDataset) -> Self {
        Self::with_callbacks(dataset, default_callbacks())
    }

    /// Controls start at "All Sites" and the full payload domain; every
    /// callback fires once so each output has a figure before the first frame.
    pub fn with_callbacks(dataset: LaunchDataset, callbacks: Vec<Callback>) -> Self {
        let controls = Controls {
            site: SiteSelection::All,
            payload: dataset.payload_bounds(),
        };
        let mut state = Self {
            dataset,
            controls,
            callbacks,
            rendered: BTreeMap::new(),
        };
        for idx in 0..state.callbacks.len() {
            state.fire(idx);
        }
        state
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Dropdown entries: the sentinel, then each site in dataset order.
    pub fn site_options(&self) -> Vec<String> {
        std::iter::once(ALL_SITES.to_string())
            .chain(self.dataset.sites().iter().cloned())
            .collect()
    }

    pub fn set_site(&mut self, site: SiteSelection) {
        log::debug!("site changed to {site}");
        self.controls.site = site;
        self.notify(Input::SiteDropdown);
    }

    pub fn set_payload_range(&mut self, payload: PayloadRange) {
        log::debug!("payload range changed to [{}, {}]", payload.low, payload.high);
        self.controls.payload = payload;
        self.notify(Input::PayloadSlider);
    }

    /// Re-run every callback observing `input`.
    fn notify(&mut self, input: Input) {
        for idx in 0..self.callbacks.len() {
            if self.callbacks[idx].observes(input) {
                self.fire(idx);
            }
        }
    }

    fn fire(&mut self, idx: usize) {
        let callback = &self.callbacks[idx];
        let figure = (callback.compute)(&self.dataset, &self.controls);
        let output = callback.output;

        let revision = self.rendered.get(&output).map_or(0, |r| r.revision) + 1;
        log::debug!("recomputed {output:?} (revision {revision})");
        self.rendered.insert(output, Rendered { figure, revision });
    }

    pub fn figure(&self, output: Output) -> Option<&Figure> {
        self.rendered.get(&output).map(|r| &r.figure)
    }

    pub fn pie_chart(&self) -> Option<&PieChart> {
        match self.figure(Output::SuccessPie)? {
            Figure::Pie(pie) => Some(pie),
            Figure::Scatter(_) => None,
        }
    }

    pub fn scatter_chart(&self) -> Option<&ScatterChart> {
        match self.figure(Output::PayloadScatter)? {
            Figure::Scatter(scatter) => Some(scatter),
            Figure::Pie(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::scenario_dataset;

    impl DashboardState {
        /// Number of times `output` has been computed (0 if never).
        fn revision(&self, output: Output) -> u64 {
            self.rendered.get(&output).map_or(0, |r| r.revision)
        }
    }

    #[test]
    fn test_initial_state_shows_everything() {
        let state = DashboardState::new(scenario_dataset());

        assert_eq!(state.controls().site, SiteSelection::All);
        assert_eq!(state.controls().payload, PayloadRange::new(500.0, 6000.0));
        assert_eq!(state.revision(Output::SuccessPie), 1);
        assert_eq!(state.revision(Output::PayloadScatter), 1);

        let pie = state.pie_chart().unwrap();
        assert_eq!(pie.values(), vec![1, 1]);
        assert_eq!(state.scatter_chart().unwrap().points.len(), 3);
    }

    #[test]
    fn test_site_options() {
        let state = DashboardState::new(scenario_dataset());
        assert_eq!(
            state.site_options(),
            vec!["All Sites", "CCAFS LC-40", "KSC LC-39A"]
        );
    }

    #[test]
    fn test_site_change_recomputes_both_charts() {
        let mut state = DashboardState::new(scenario_dataset());
        state.set_site(SiteSelection::from_label("CCAFS LC-40"));

        assert_eq!(state.revision(Output::SuccessPie), 2);
        assert_eq!(state.revision(Output::PayloadScatter), 2);

        let pie = state.pie_chart().unwrap();
        assert_eq!(pie.title, "Total Success Launches for site CCAFS LC-40");
        assert_eq!(pie.labels(), vec!["0", "1"]);
        assert_eq!(pie.values(), vec![1, 1]);

        let scatter = state.scatter_chart().unwrap();
        assert_eq!(
            scatter.title,
            "Correlation between Payload and Success for CCAFS LC-40"
        );
        assert_eq!(scatter.points.len(), 2);
    }

    #[test]
    fn test_payload_change_leaves_pie_alone() {
        let mut state = DashboardState::new(scenario_dataset());
        state.set_payload_range(PayloadRange::new(0.0, 3000.0));

        assert_eq!(state.revision(Output::SuccessPie), 1);
        assert_eq!(state.revision(Output::PayloadScatter), 2);
        assert_eq!(state.scatter_chart().unwrap().points.len(), 2);
    }

    #[test]
    fn test_out_of_domain_payload_empties_scatter() {
        let mut state = DashboardState::new(scenario_dataset());
        state.set_payload_range(PayloadRange::new(7000.0, 10_000.0));
        assert!(state.scatter_chart().unwrap().points.is_empty());
    }

    #[test]
    fn test_repeated_input_gives_identical_figures() {
        let mut state = DashboardState::new(scenario_dataset());
        state.set_site(SiteSelection::from_label("KSC LC-39A"));
        let pie = state.pie_chart().cloned();
        let scatter = state.scatter_chart().cloned();

        state.set_site(SiteSelection::from_label("KSC LC-39A"));
        assert_eq!(state.pie_chart().cloned(), pie);
        assert_eq!(state.scatter_chart().cloned(), scatter);
        assert_eq!(state.revision(Output::SuccessPie), 3);
    }

    #[test]
    fn test_custom_callbacks_only_fire_for_observed_inputs() {
        let callbacks = vec![Callback {
            output: Output::PayloadScatter,
            inputs: &[Input::PayloadSlider],
            compute: payload_scatter,
        }];
        let mut state = DashboardState::with_callbacks(scenario_dataset(), callbacks);
        assert!(state.pie_chart().is_none());

        state.set_site(SiteSelection::from_label("KSC LC-39A"));
        assert_eq!(state.revision(Output::PayloadScatter), 1);
        // Stale until the slider moves.
        assert_eq!(state.scatter_chart().unwrap().points.len(), 3);

        state.set_payload_range(PayloadRange::new(0.0, 10_000.0));
        assert_eq!(state.revision(Output::PayloadScatter), 2);
        assert_eq!(state.scatter_chart().unwrap().points.len(), 1);
    }
}
