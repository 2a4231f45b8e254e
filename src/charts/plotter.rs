//! Chart Plotter Module
//! Interactive pie, bar and word-cloud drawing with egui / egui_plot.

use crate::charts::wordcloud::WordCloudLayout;
use crate::stats::text::capitalize;
use crate::stats::FrequencyDistribution;
use egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Vec2};
use egui_plot::{Bar, BarChart, Plot};
use std::f32::consts::{FRAC_PI_2, TAU};

/// matplotlib "Paired" qualitative palette.
pub const PAIRED: [Color32; 12] = [
    Color32::from_rgb(166, 206, 227),
    Color32::from_rgb(31, 120, 180),
    Color32::from_rgb(178, 223, 138),
    Color32::from_rgb(51, 160, 44),
    Color32::from_rgb(251, 154, 153),
    Color32::from_rgb(227, 26, 28),
    Color32::from_rgb(253, 191, 111),
    Color32::from_rgb(255, 127, 0),
    Color32::from_rgb(202, 178, 214),
    Color32::from_rgb(106, 61, 154),
    Color32::from_rgb(255, 255, 153),
    Color32::from_rgb(177, 89, 40),
];

pub const SKY_BLUE: Color32 = Color32::from_rgb(135, 206, 235);

/// Pie slices start at 12 o'clock and run counter-clockwise.
pub const PIE_START_ANGLE: f32 = FRAC_PI_2;

/// Largest arc drawn as one convex polygon.
const MAX_SEGMENT: f32 = FRAC_PI_2;

/// One pie slice with angles in radians (counter-clockwise from +x).
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub percent: f64,
    pub start: f32,
    pub sweep: f32,
    pub color: Color32,
}

impl PieSlice {
    pub fn mid_angle(&self) -> f32 {
        self.start + self.sweep / 2.0
    }
}

/// Point on a circle for a mathematical angle, in screen space (y down).
pub fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + Vec2::new(radius * angle.cos(), -radius * angle.sin())
}

/// Creates the report's charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Slice geometry for a distribution, largest share first.
    pub fn pie_slices(dist: &FrequencyDistribution) -> Vec<PieSlice> {
        let mut start = PIE_START_ANGLE;
        dist.shares()
            .into_iter()
            .enumerate()
            .map(|(i, (label, percent))| {
                let sweep = (percent / 100.0) as f32 * TAU;
                let slice = PieSlice {
                    count: dist.get(&label).unwrap_or_default(),
                    label: capitalize(&label),
                    percent,
                    start,
                    sweep,
                    color: PAIRED[i % PAIRED.len()],
                };
                start += sweep;
                slice
            })
            .collect()
    }

    /// Draw a pie chart with capitalized labels and one-decimal percentages.
    pub fn draw_pie_chart(ui: &mut egui::Ui, dist: &FrequencyDistribution, size: f32) {
        let slices = Self::pie_slices(dist);
        let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::hover());
        if slices.is_empty() {
            painter.text(
                response.rect.center(),
                Align2::CENTER_CENTER,
                "No answers",
                FontId::proportional(14.0),
                Color32::GRAY,
            );
            return;
        }

        let center = response.rect.center();
        let radius = size * 0.32;
        let label_color = ui.visuals().text_color();

        for slice in &slices {
            let segments = (slice.sweep / MAX_SEGMENT).ceil().max(1.0) as usize;
            let step = slice.sweep / segments as f32;
            for s in 0..segments {
                let a0 = slice.start + step * s as f32;
                let points_per_segment = 16;
                let mut points = vec![center];
                points.extend((0..=points_per_segment).map(|k| {
                    polar(center, radius, a0 + step * k as f32 / points_per_segment as f32)
                }));
                painter.add(Shape::convex_polygon(points, slice.color, Stroke::NONE));
            }

            let mid = slice.mid_angle();
            painter.text(
                polar(center, radius * 0.6, mid),
                Align2::CENTER_CENTER,
                format!("{:.1}%", slice.percent),
                FontId::proportional(12.0),
                Color32::BLACK,
            );

            let align = if mid.cos() >= 0.0 {
                Align2::LEFT_CENTER
            } else {
                Align2::RIGHT_CENTER
            };
            painter.text(
                polar(center, radius * 1.1, mid),
                align,
                &slice.label,
                FontId::proportional(13.0),
                label_color,
            );
        }

        // Slice borders
        for slice in &slices {
            painter.line_segment(
                [center, polar(center, radius, slice.start)],
                Stroke::new(1.0, Color32::WHITE),
            );
        }
    }

    /// Draw participants per city as a bar chart, largest city first.
    pub fn draw_city_bar_chart(ui: &mut egui::Ui, city_counts: &FrequencyDistribution, height: f32) {
        if city_counts.is_empty() {
            ui.label(RichText::new("No participants").italics());
            return;
        }
        let sorted = city_counts.sorted_desc();
        let labels: Vec<String> = sorted.iter().map(|(city, _)| city.clone()).collect();

        let bars: Vec<Bar> = sorted
            .iter()
            .enumerate()
            .map(|(i, (city, count))| Bar::new(i as f64, *count as f64).name(city).width(0.6))
            .collect();

        Plot::new("city_bar_chart")
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("City")
            .y_axis_label("Number of Participants")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(SKY_BLUE).name("Participants"));
            });
    }

    /// Paint a laid-out word cloud scaled into the available width.
    pub fn draw_word_cloud(ui: &mut egui::Ui, cloud: &WordCloudLayout) {
        let width = ui.available_width().min(cloud.width * 1.5).max(200.0);
        let scale = width / cloud.width;
        let size = Vec2::new(width, cloud.height * scale);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 4.0, Color32::WHITE);
        for word in &cloud.words {
            let [r, g, b] = word.color;
            painter.text(
                origin + Vec2::new(word.x, word.y) * scale,
                Align2::LEFT_TOP,
                &word.text,
                FontId::proportional(word.font_size * scale),
                Color32::from_rgb(r, g, b),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pie_slices_cover_full_circle() {
        let mut dist = FrequencyDistribution::new();
        dist.add_n("no", 1);
        dist.add_n("yes", 3);

        let slices = ChartPlotter::pie_slices(&dist);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "Yes");
        assert_eq!(slices[0].count, 3);
        assert!((slices[0].percent - 75.0).abs() < 1e-9);
        assert!((slices[0].start - PIE_START_ANGLE).abs() < 1e-6);

        let swept: f32 = slices.iter().map(|s| s.sweep).sum();
        assert!((swept - TAU).abs() < 1e-4);
        assert!((slices[1].start - (slices[0].start + slices[0].sweep)).abs() < 1e-6);
        assert_eq!(slices[1].color, PAIRED[1]);
    }

    #[test]
    fn empty_distribution_has_no_slices() {
        assert!(ChartPlotter::pie_slices(&FrequencyDistribution::new()).is_empty());
    }

    #[test]
    fn polar_points_up_at_start_angle() {
        let p = polar(Pos2::new(100.0, 100.0), 10.0, PIE_START_ANGLE);
        assert!((p.x - 100.0).abs() < 1e-4);
        assert!((p.y - 90.0).abs() < 1e-4);
    }
}
