use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::color::{generate_palette, ColorMap};
use crate::data::aggregate::{PieChart, ScatterChart};

/// Largest angle drawn as a single polygon; keeps every piece convex.
const MAX_SEGMENT_ANGLE: f32 = FRAC_PI_2 / 3.0;

// ---------------------------------------------------------------------------
// Success pie chart
// ---------------------------------------------------------------------------

/// Start and end angle (radians) of each slice, clockwise from 12 o'clock.
/// Zero-valued slices get an empty wedge; an all-zero pie has no wedges.
pub fn wedge_angles(values: &[u64]) -> Vec<(f32, f32)> {
    let total: u64 = values.iter().sum();
    if total == 0 {
        return Vec::new();
    }
    let mut start = -FRAC_PI_2;
    values
        .iter()
        .map(|&v| {
            let end = start + TAU * (v as f32 / total as f32);
            let wedge = (start, end);
            start = end;
            wedge
        })
        .collect()
}

/// Render the pie chart with its legend to the right.
pub fn success_pie(ui: &mut Ui, pie: &PieChart) {
    ui.label(RichText::new(&pie.title).heading());

    let wedges = wedge_angles(&pie.values());
    if wedges.is_empty() {
        ui.label("No launches match this selection.");
        return;
    }

    let colors = generate_palette(pie.slices.len());
    let total = pie.total() as f32;

    ui.horizontal(|ui: &mut Ui| {
        let size = ui.available_height().clamp(160.0, 280.0);
        let (response, painter) = ui.allocate_painter(egui::vec2(size, size), Sense::hover());
        let center = response.rect.center();
        let radius = size * 0.45;

        for (&(start, end), &color) in wedges.iter().zip(&colors) {
            for shape in wedge_shapes(center, radius, start, end, color) {
                painter.add(shape);
            }
        }

        ui.add_space(16.0);
        ui.vertical(|ui: &mut Ui| {
            let entries = pie.labels().into_iter().zip(pie.values()).zip(&colors);
            for ((label, value), &color) in entries {
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, color);
                    let pct = 100.0 * value as f32 / total;
                    ui.label(format!("{label}: {value} ({pct:.1}%)"));
                });
            }
        });
    });
}

/// Break a wedge into convex pieces no wider than `MAX_SEGMENT_ANGLE`.
fn wedge_shapes(center: Pos2, radius: f32, start: f32, end: f32, color: Color32) -> Vec<Shape> {
    let sweep = end - start;
    if sweep <= 0.0 {
        return Vec::new();
    }
    let pieces = (sweep / MAX_SEGMENT_ANGLE).ceil() as usize;
    let step = sweep / pieces as f32;
    let point = |angle: f32| center + radius * egui::vec2(angle.cos(), angle.sin());

    (0..pieces)
        .map(|i| {
            let a0 = start + step * i as f32;
            let a1 = a0 + step;
            let mut points = vec![center];
            let arc_steps = 8;
            for k in 0..=arc_steps {
                points.push(point(a0 + (a1 - a0) * k as f32 / arc_steps as f32));
            }
            Shape::convex_polygon(points, color, Stroke::NONE)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Payload vs. success scatter chart
// ---------------------------------------------------------------------------

/// Render the scatter chart, one coloured series per booster category.
pub fn payload_scatter(ui: &mut Ui, scatter: &ScatterChart, booster_colors: &ColorMap) {
    ui.label(RichText::new(&scatter.title).heading());

    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in &scatter.points {
        series
            .entry(p.booster_version_category.as_str())
            .or_default()
            .push([p.payload_mass_kg, f64::from(p.outcome.class())]);
    }

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, coords) in series {
                let points: PlotPoints = coords.into_iter().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(category)
                        .color(booster_colors.color_for(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }
        });
}
