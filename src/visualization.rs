//! Visualization utilities for TSP tours.
//!
//! Generates SVG drawings of a point set and its tour, and plain-text exports
//! for external plotting. Nothing here feeds back into tour construction.

use crate::instance::{Point, TspInstance};
use crate::solution::Solution;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG visualization generator
pub struct Visualizer {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Margin
    pub margin: f64,
    /// Node radius
    pub node_radius: f64,
}

impl Default for Visualizer {
    fn default() -> Self {
        Visualizer {
            width: 800.0,
            height: 800.0,
            margin: 20.0,
            node_radius: 5.0,
        }
    }
}

impl Visualizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map from instance coordinates to canvas coordinates. The bounding box
    /// is padded by the margin on every side and scaled uniformly.
    fn transform(&self, points: &[Point]) -> impl Fn(&Point) -> (f64, f64) {
        let (min_x, max_x, min_y, max_y) = get_bounds(points);
        let min_x = min_x - self.margin;
        let min_y = min_y - self.margin;
        let span_x = (max_x + self.margin - min_x).max(1.0);
        let span_y = (max_y + self.margin - min_y).max(1.0);

        let scale = ((self.width - 2.0 * self.margin) / span_x)
            .min((self.height - 2.0 * self.margin) / span_y);
        let margin = self.margin;

        move |p: &Point| {
            (
                (p.x - min_x) * scale + margin,
                (p.y - min_y) * scale + margin,
            )
        }
    }

    /// Generate SVG visualization of a solution
    pub fn generate_svg(&self, instance: &TspInstance, solution: &Solution) -> String {
        let mut svg = String::new();
        let transform = self.transform(&instance.points);

        svg.push_str(&format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
<style>
    .node {{ fill: #1f4fd1; }}
    .start {{ fill: #27ae60; stroke: #1e8449; stroke-width: 2; }}
    .edge {{ stroke: #d62c1a; stroke-width: 2; fill: none; }}
    .label {{ font-family: Arial; font-size: 10px; fill: #2c3e50; }}
    .title {{ font-family: Arial; font-size: 14px; fill: #2c3e50; font-weight: bold; }}
</style>
<rect width="100%" height="100%" fill="#ffffff"/>
"##,
            self.width, self.height, self.width, self.height
        ));

        svg.push_str(&format!(
            r##"<text x="{}" y="16" class="title">{} | Points: {} | Total distance: {:.2}</text>
"##,
            self.margin,
            escape_xml(&instance.name),
            instance.points.len(),
            solution.cost
        ));

        if solution.tour.len() > 1 {
            let coords: Vec<String> = solution
                .tour
                .iter()
                .map(|p| {
                    let (x, y) = transform(p);
                    format!("{:.2},{:.2}", x, y)
                })
                .collect();
            svg.push_str(&format!(
                r##"<polyline points="{}" class="edge"/>
"##,
                coords.join(" ")
            ));
        }

        for (i, point) in instance.points.iter().enumerate() {
            let (x, y) = transform(point);
            let class = if !solution.is_empty() && i == solution.start_index {
                "start"
            } else {
                "node"
            };

            svg.push_str(&format!(
                r##"<circle cx="{:.2}" cy="{:.2}" r="{}" class="{}"/>
"##,
                x, y, self.node_radius, class
            ));
            svg.push_str(&format!(
                r##"<text x="{:.2}" y="{:.2}" class="label" text-anchor="middle">{}</text>
"##,
                x,
                y - self.node_radius - 3.0,
                i
            ));
        }

        svg.push_str("</svg>");

        svg
    }

    /// Save SVG to file
    pub fn save_svg<P: AsRef<Path>>(&self, svg: &str, path: P) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(svg.as_bytes())?;
        Ok(())
    }

    /// Export data for external plotting (e.g., matplotlib)
    pub fn export_plot_data(&self, instance: &TspInstance, solution: &Solution) -> String {
        let mut data = String::new();

        data.push_str("# TSP Tour Data\n");
        data.push_str(&format!("# Instance: {}\n", instance.name));
        data.push_str(&format!("# Total distance: {:.2}\n\n", solution.cost));

        data.push_str("# Points: index, x, y\n");
        for (i, p) in instance.points.iter().enumerate() {
            data.push_str(&format!("{},{},{}\n", i, p.x, p.y));
        }

        data.push_str("\n# Tour: sequence of point indices\n");
        let order: Vec<String> = solution.order.iter().map(|n| n.to_string()).collect();
        data.push_str(&order.join(","));
        data.push('\n');

        data.push_str("\n# Segment distances\n");
        let segments: Vec<String> = solution
            .segment_distances
            .iter()
            .map(|d| format!("{:.4}", d))
            .collect();
        data.push_str(&segments.join(","));
        data.push('\n');

        data
    }
}

/// Escape text for use inside SVG markup
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Coordinate bounds `(min_x, max_x, min_y, max_y)`, all zero for no points
fn get_bounds(points: &[Point]) -> (f64, f64, f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    (min_x, max_x, min_y, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::construction::{ConstructionHeuristic, NearestNeighborHeuristic};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_instance() -> TspInstance {
        TspInstance::new(
            "test",
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(0.0, 50.0),
            ],
        )
    }

    #[test]
    fn test_visualizer() {
        let instance = create_test_instance();
        let solution = Solution::from_order(&instance.points, vec![0, 1, 2], "test").unwrap();

        let viz = Visualizer::new();
        let svg = viz.generate_svg(&instance, &solution);

        assert!(svg.contains("<svg"));
        assert!(svg.contains("test"));
        assert!(svg.contains("<polyline"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches("class=\"start\"").count(), 1);
    }

    #[test]
    fn test_name_is_escaped() {
        let mut instance = create_test_instance();
        instance.name = "a<b & \"c\"".to_string();
        let solution = Solution::from_order(&instance.points, vec![0, 1, 2], "test").unwrap();

        let svg = Visualizer::new().generate_svg(&instance, &solution);

        assert!(svg.contains("a&lt;b &amp; &quot;c&quot;"));
        assert!(!svg.contains("a<b"));
    }

    #[test]
    fn test_points_stay_on_canvas() {
        let instance = create_test_instance();
        let viz = Visualizer::new();
        let transform = viz.transform(&instance.points);

        for p in &instance.points {
            let (x, y) = transform(p);
            assert!(x >= viz.margin && x <= viz.width - viz.margin);
            assert!(y >= viz.margin && y <= viz.height - viz.margin);
        }
    }

    #[test]
    fn test_single_point_has_no_edges() {
        let instance = TspInstance::new("one", vec![Point::new(5.0, 5.0)]);
        let solution = NearestNeighborHeuristic::new()
            .construct(&instance.points, &mut ChaCha8Rng::seed_from_u64(0))
            .unwrap();

        let svg = Visualizer::new().generate_svg(&instance, &solution);
        assert!(!svg.contains("<polyline"));
        assert_eq!(svg.matches("<circle").count(), 1);
    }

    #[test]
    fn test_export_plot_data() {
        let instance = create_test_instance();
        let solution = Solution::from_order(&instance.points, vec![2, 0, 1], "test").unwrap();
        let data = Visualizer::new().export_plot_data(&instance, &solution);

        assert!(data.contains("2,0,1\n"));
        assert!(data.contains("50.0000,100.0000"));
    }
}
