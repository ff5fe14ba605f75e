use eframe::egui;

use crate::color::ColorMap;
use crate::data::model::LaunchDataset;
use crate::state::DashboardState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: DashboardState,
    /// Fixed per booster category so colours survive filtering.
    booster_colors: ColorMap,
    /// Search text typed into the site dropdown.
    site_query: String,
}

impl LaunchDashApp {
    pub fn new(dataset: LaunchDataset) -> Self {
        let booster_colors = ColorMap::new(dataset.booster_categories());
        Self {
            state: DashboardState::new(dataset),
            booster_colors,
            site_query: String::new(),
        }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title ----
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            panels::header(ui, &self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("controls")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::controls(ui, &mut self.state, &mut self.site_query);
            });

        // ---- Central panel: pie above, scatter below ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(pie) = self.state.pie_chart() {
                ui.allocate_ui(egui::vec2(ui.available_width(), 320.0), |ui| {
                    plot::success_pie(ui, pie);
                });
            }
            ui.separator();
            if let Some(scatter) = self.state.scatter_chart() {
                plot::payload_scatter(ui, scatter, &self.booster_colors);
            }
        });
    }
}
