//! Static Chart Renderer
//! Rasterises the report charts with plotters for export.
//!
//! Each chart is drawn into an RGB buffer, wrapped as an `image::RgbImage`
//! and encoded as PNG by the caller.

use crate::charts::plotter::{polar, ChartPlotter, SKY_BLUE};
use crate::charts::wordcloud::WordCloudLayout;
use crate::stats::FrequencyDistribution;
use image::RgbImage;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Image buffer has the wrong size for {0}x{1}")]
    Buffer(u32, u32),
}

fn drawing_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

fn rgb(c: egui::Color32) -> RGBColor {
    RGBColor(c.r(), c.g(), c.b())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Run `draw` on a white bitmap of the given size.
    fn render<F>(width: u32, height: u32, draw: F) -> Result<RgbImage, RenderError>
    where
        F: FnOnce(&DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>) -> Result<(), RenderError>,
    {
        let mut buf = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(drawing_err)?;
            draw(&root)?;
            root.present().map_err(drawing_err)?;
        }
        RgbImage::from_raw(width, height, buf).ok_or(RenderError::Buffer(width, height))
    }

    /// Pie chart with title, slice labels and percentages.
    pub fn render_pie(
        dist: &FrequencyDistribution,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<RgbImage, RenderError> {
        let slices = ChartPlotter::pie_slices(dist);

        Self::render(width, height, |root| {
            let area = root.titled(title, (FONT, 24)).map_err(drawing_err)?;
            let (w, h) = area.dim_in_pixel();
            let center = egui::pos2(w as f32 / 2.0, h as f32 / 2.0);
            let radius = w.min(h) as f32 * 0.35;

            for slice in &slices {
                let steps = ((slice.sweep / std::f32::consts::TAU) * 120.0).ceil().max(2.0) as usize;
                let mut points = vec![(center.x as i32, center.y as i32)];
                points.extend((0..=steps).map(|k| {
                    let p = polar(center, radius, slice.start + slice.sweep * k as f32 / steps as f32);
                    (p.x.round() as i32, p.y.round() as i32)
                }));
                area.draw(&Polygon::new(points, rgb(slice.color).filled()))
                    .map_err(drawing_err)?;
            }

            for slice in &slices {
                let mid = slice.mid_angle();
                let pct = polar(center, radius * 0.6, mid);
                let pct_style = TextStyle::from((FONT, 16).into_font())
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                area.draw(&Text::new(
                    format!("{:.1}%", slice.percent),
                    (pct.x as i32, pct.y as i32),
                    pct_style,
                ))
                .map_err(drawing_err)?;

                let at = polar(center, radius * 1.1, mid);
                let h_pos = if mid.cos() >= 0.0 { HPos::Left } else { HPos::Right };
                let label_style = TextStyle::from((FONT, 18).into_font())
                    .color(&BLACK)
                    .pos(Pos::new(h_pos, VPos::Center));
                area.draw(&Text::new(slice.label.clone(), (at.x as i32, at.y as i32), label_style))
                    .map_err(drawing_err)?;
            }
            Ok(())
        })
    }

    /// Participants per city, largest first.
    pub fn render_city_bars(
        city_counts: &FrequencyDistribution,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<RgbImage, RenderError> {
        let sorted = city_counts.sorted_desc();
        let labels: Vec<String> = sorted.iter().map(|(c, _)| c.clone()).collect();
        let y_max = sorted.first().map(|(_, n)| *n as u32).unwrap_or(0) + 1;
        let n = sorted.len().max(1) as u32;

        Self::render(width, height, |root| {
            let mut chart = ChartBuilder::on(root)
                .caption(title, (FONT, 24))
                .margin(20)
                .x_label_area_size(50)
                .y_label_area_size(60)
                .build_cartesian_2d((0u32..n).into_segmented(), 0u32..y_max)
                .map_err(drawing_err)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_desc("City")
                .y_desc("Number of Participants")
                .x_label_formatter(&|v| match v {
                    SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
                    _ => String::new(),
                })
                .draw()
                .map_err(drawing_err)?;

            chart
                .draw_series(
                    Histogram::vertical(&chart)
                        .style(rgb(SKY_BLUE).filled())
                        .margin(10)
                        .data(sorted.iter().enumerate().map(|(i, (_, c))| (i as u32, *c as u32))),
                )
                .map_err(drawing_err)?;
            Ok(())
        })
    }

    /// Word cloud at the layout's canvas size on a white background.
    pub fn render_word_cloud(cloud: &WordCloudLayout) -> Result<RgbImage, RenderError> {
        let (width, height) = (cloud.width.round() as u32, cloud.height.round() as u32);

        Self::render(width, height, |root| {
            for word in &cloud.words {
                let [r, g, b] = word.color;
                let color = RGBColor(r, g, b);
                let style = TextStyle::from((FONT, word.font_size as f64).into_font())
                    .color(&color)
                    .pos(Pos::new(HPos::Left, VPos::Top));
                root.draw(&Text::new(
                    word.text.clone(),
                    (word.x.round() as i32, word.y.round() as i32),
                    style,
                ))
                .map_err(drawing_err)?;
            }
            Ok(())
        })
    }
}
