use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::SiteSelection;
use crate::data::model::PayloadRange;
use crate::state::DashboardState;

/// Display range of the payload selector, independent of the dataset bounds.
pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
pub const PAYLOAD_SLIDER_STEP: f64 = 1_000.0;
/// Labelled tick marks under the payload sliders.
pub const PAYLOAD_MARKS: [f64; 5] = [0.0, 2_500.0, 5_000.0, 7_500.0, 10_000.0];

const SITE_PLACEHOLDER: &str = "Select a Launch Site here";

const HEADER_COLOR: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Render the dashboard title, the record count and the number of launches
/// matching both filters.
pub fn header(ui: &mut Ui, state: &DashboardState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .size(32.0)
                .strong()
                .color(HEADER_COLOR),
        );
        let shown = state.scatter_chart().map_or(0, |s| s.points.len());
        ui.label(status_line(state.dataset().len(), shown));
    });
}

/// `shown` counts launches passing both the site and the payload filter.
fn status_line(total: usize, shown: usize) -> String {
    format!("{total} launches loaded, {shown} shown")
}

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the site dropdown and the payload range selector.
///
/// Each widget pushes its new value into `state` only when the user changed
/// it, which in turn recomputes the dependent charts. `site_query` is the
/// dropdown's search text and lives as long as the app.
pub fn controls(ui: &mut Ui, state: &mut DashboardState, site_query: &mut String) {
    ui.heading("Launch Site");
    ui.separator();

    let current = state.controls().site.to_string();
    let mut picked: Option<String> = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(site_query)
                    .hint_text(SITE_PLACEHOLDER)
                    .desired_width(f32::INFINITY),
            )
            .request_focus();
            let options = state.site_options();
            let matching = matching_options(&options, site_query);
            if matching.is_empty() {
                ui.label(RichText::new("No matching sites").weak());
            }
            for option in matching {
                if ui.selectable_label(current == *option, option).clicked() {
                    picked = Some(option.clone());
                }
            }
        });
    if let Some(label) = picked {
        site_query.clear();
        if label != current {
            state.set_site(SiteSelection::from_label(&label));
        }
    }

    ui.add_space(12.0);
    ui.heading("Payload range (Kg)");
    ui.separator();

    // Leave room for the value box and the "from"/"to" text.
    ui.spacing_mut().slider_width = (ui.available_width() - 90.0).max(120.0);

    let before = state.controls().payload;
    let mut low = before.low;
    let mut high = before.high;

    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, PAYLOAD_SLIDER_MIN..=PAYLOAD_SLIDER_MAX)
                .step_by(PAYLOAD_SLIDER_STEP)
                .text("from"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, PAYLOAD_SLIDER_MIN..=PAYLOAD_SLIDER_MAX)
                .step_by(PAYLOAD_SLIDER_STEP)
                .text("to"),
        )
        .changed();
    payload_marks(ui);

    if low_changed || high_changed {
        let handle = if low_changed { Handle::Low } else { Handle::High };
        let range = ordered_range(PayloadRange::new(low, high), handle);
        if range != before {
            state.set_payload_range(range);
        }
    }

    let bounds = state.dataset().payload_bounds();
    if ui.small_button("Reset to data range").clicked() && before != bounds {
        state.set_payload_range(bounds);
    }
    ui.label(
        RichText::new(format!(
            "Dataset payloads span {:.0} – {:.0} kg",
            bounds.low, bounds.high
        ))
        .weak(),
    );
}

/// Paint the labelled tick marks in a strip as wide as the slider rail.
fn payload_marks(ui: &mut Ui) {
    let width = ui.spacing().slider_width;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 22.0), egui::Sense::hover());
    // egui keeps the handle centre this far inside the rail ends.
    let inset = ui.spacing().interact_size.y / 2.0;
    let painter = ui.painter_at(rect.expand(inset));
    let stroke = ui.visuals().widgets.noninteractive.fg_stroke;
    let font = egui::FontId::proportional(10.0);

    for mark in PAYLOAD_MARKS {
        let x = mark_x(rect.left() + inset, rect.right() - inset, mark);
        painter.line_segment(
            [egui::pos2(x, rect.top()), egui::pos2(x, rect.top() + 4.0)],
            stroke,
        );
        painter.text(
            egui::pos2(x, rect.top() + 5.0),
            egui::Align2::CENTER_TOP,
            format!("{mark:.0}"),
            font.clone(),
            stroke.color,
        );
    }
}

/// Horizontal position of a payload value on a rail spanning `left..right`.
fn mark_x(left: f32, right: f32, value: f64) -> f32 {
    let t = (value - PAYLOAD_SLIDER_MIN) / (PAYLOAD_SLIDER_MAX - PAYLOAD_SLIDER_MIN);
    left + (right - left) * t.clamp(0.0, 1.0) as f32
}

/// Site options containing `query`, ignoring case. An empty query keeps all.
pub fn matching_options<'a>(options: &'a [String], query: &str) -> Vec<&'a String> {
    let needle = query.trim().to_lowercase();
    options
        .iter()
        .filter(|option| option.to_lowercase().contains(&needle))
        .collect()
}

/// Which end of the range selector the user dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Low,
    High,
}

/// Keep `low <= high` the way a two-handle range slider does: the handle that
/// was not dragged gets pushed along.
pub fn ordered_range(range: PayloadRange, moved: Handle) -> PayloadRange {
    if range.low <= range.high {
        return range;
    }
    match moved {
        Handle::Low => PayloadRange::new(range.low, range.low),
        Handle::High => PayloadRange::new(range.high, range.high),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        ["All Sites", "CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
            .map(String::from)
            .to_vec()
    }

    #[test]
    fn test_status_line_counts_filtered_launches() {
        let mut state = DashboardState::new(crate::data::model::tests::scenario_dataset());
        state.set_site(SiteSelection::from_label("KSC LC-39A"));
        let shown = state.scatter_chart().map_or(0, |s| s.points.len());
        assert_eq!(status_line(state.dataset().len(), shown), "3 launches loaded, 1 shown");
    }

    #[test]
    fn test_matching_options_empty_query_keeps_all() {
        let options = options();
        assert_eq!(matching_options(&options, "").len(), options.len());
        assert_eq!(matching_options(&options, "   ").len(), options.len());
    }

    #[test]
    fn test_matching_options_ignores_case() {
        let options = options();
        let found = matching_options(&options, "ccafs");
        assert_eq!(found, [&options[1], &options[4]]);
        assert_eq!(matching_options(&options, "39a"), [&options[3]]);
        assert!(matching_options(&options, "Boca Chica").is_empty());
    }

    #[test]
    fn test_marks_span_the_rail() {
        assert_eq!(PAYLOAD_MARKS.first(), Some(&PAYLOAD_SLIDER_MIN));
        assert_eq!(PAYLOAD_MARKS.last(), Some(&PAYLOAD_SLIDER_MAX));
        assert_eq!(mark_x(10.0, 210.0, 0.0), 10.0);
        assert_eq!(mark_x(10.0, 210.0, 5_000.0), 110.0);
        assert_eq!(mark_x(10.0, 210.0, 7_500.0), 160.0);
        assert_eq!(mark_x(10.0, 210.0, 10_000.0), 210.0);
        assert_eq!(mark_x(10.0, 210.0, 12_000.0), 210.0);
    }

    #[test]
    fn test_ordered_range_keeps_valid_ranges() {
        let range = PayloadRange::new(1000.0, 5000.0);
        assert_eq!(ordered_range(range, Handle::Low), range);
        assert_eq!(ordered_range(range, Handle::High), range);
    }

    #[test]
    fn test_ordered_range_pushes_other_handle() {
        let crossed = PayloadRange::new(6000.0, 4000.0);
        assert_eq!(
            ordered_range(crossed, Handle::Low),
            PayloadRange::new(6000.0, 6000.0)
        );
        assert_eq!(
            ordered_range(crossed, Handle::High),
            PayloadRange::new(4000.0, 4000.0)
        );
    }
}
