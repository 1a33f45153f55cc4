use crate::config::ChartConfig;
use std::fmt::Write;

const STROKE: &str = "#5a3be7";
const BACKGROUND: &str = "#f8f7fc";
const MARKER_RADIUS: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Pixel coordinates of a series on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub points: Vec<Point>,
    /// Highlight for the most recent value.
    pub marker: Option<Point>,
}

impl ChartGeometry {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `x,y` pairs in SVG polyline syntax.
    pub fn polyline(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Standalone SVG document; empty geometry renders as an empty string.
    pub fn to_svg(&self) -> String {
        let Some(marker) = self.marker else {
            return String::new();
        };

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        let _ = writeln!(
            svg,
            r#"  <rect width="{}" height="{}" rx="8" fill="{}"/>"#,
            self.width, self.height, BACKGROUND
        );
        let _ = writeln!(
            svg,
            r#"  <polyline fill="none" stroke="{}" stroke-width="2" points="{}"/>"#,
            STROKE,
            self.polyline()
        );
        let _ = writeln!(
            svg,
            r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            marker.x, marker.y, MARKER_RADIUS, STROKE
        );
        svg.push_str("</svg>\n");
        svg
    }
}

/// Maps a numeric series onto a fixed canvas.
///
/// x runs across `[margin, width - margin]` by rank. y is normalized against the
/// series' own range and inverted onto `[2 * margin, height - margin]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRenderer {
    width: f64,
    height: f64,
    margin: f64,
}

impl ChartRenderer {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            margin: config.margin,
        }
    }

    pub fn render(&self, series: &[f64]) -> ChartGeometry {
        let mut geometry = ChartGeometry {
            width: self.width,
            height: self.height,
            points: Vec::with_capacity(series.len()),
            marker: None,
        };
        if series.is_empty() {
            return geometry;
        }

        let min = series.iter().copied().fold(f64::INFINITY, f64::min);
        let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = if max > min { max - min } else { 1.0 };

        let plot_width = self.width - 2.0 * self.margin;
        let plot_height = self.height - 3.0 * self.margin;
        let last = series.len() - 1;

        geometry.points = series
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let rank = if last == 0 { 1.0 } else { i as f64 / last as f64 };
                Point {
                    x: rank * plot_width + self.margin,
                    y: self.height - self.margin - ((value - min) / span) * plot_height,
                }
            })
            .collect();
        geometry.marker = geometry.points.last().copied();
        geometry
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(&ChartConfig::default())
    }
}
