//! Module for representing and persisting Euclidean TSP instances.
//!
//! An instance is a named, ordered set of 2-D points. Instances are either
//! generated at random (see [`crate::generator`]) or read from TSP-LIB style
//! text files with a `NODE_COORD_SECTION`, which allows fixed point sets to be
//! replayed.

use crate::error::{Result, TspError};
use crate::generator::{InstanceConfig, PointGenerator, Region};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// A point in the plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to `other`
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A named set of points to visit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TspInstance {
    /// Name of the instance
    pub name: String,
    /// Comment/description
    pub comment: String,
    /// Region the points were generated in, if known
    pub region: Option<Region>,
    /// Points in input order
    pub points: Vec<Point>,
}

impl TspInstance {
    pub fn new(name: impl Into<String>, points: Vec<Point>) -> Self {
        TspInstance {
            name: name.into(),
            comment: String::new(),
            region: None,
            points,
        }
    }

    /// Generate a random instance according to `config`.
    pub fn generate(config: &InstanceConfig, rng: &mut dyn RngCore) -> Result<Self> {
        let generator = PointGenerator::new(config.region)?;
        let count = config.resolve_count(rng)?;
        let points = generator.generate(count, rng)?;

        let mut instance = TspInstance::new(format!("random{}", count), points);
        instance.comment = format!(
            "{} uniform points in {}x{}",
            count, config.region.width, config.region.height
        );
        instance.region = Some(config.region);
        Ok(instance)
    }

    /// Number of points
    pub fn dimension(&self) -> usize {
        self.points.len()
    }

    /// Read an instance from a TSP-LIB style file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(&path)?;
        let mut instance = Self::parse(&text)?;
        if instance.name.is_empty() {
            instance.name = path
                .as_ref()
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(instance)
    }

    /// Parse TSP-LIB style text. Only `NODE_COORD_SECTION` data is used;
    /// node ids are informational and points keep file order.
    pub fn parse(text: &str) -> Result<Self> {
        let mut name = String::new();
        let mut comment = String::new();
        let mut dimension: Option<(usize, usize)> = None;
        let mut points = Vec::new();
        let mut in_coords = false;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();

            if line.is_empty() {
                continue;
            }
            if line == "EOF" {
                break;
            }

            if let Some((key, value)) = line.split_once(':') {
                let value = value.trim();
                match key.trim() {
                    "NAME" => {
                        name = value.to_string();
                        continue;
                    }
                    "COMMENT" => {
                        comment = value.to_string();
                        continue;
                    }
                    "DIMENSION" => {
                        let n = value
                            .parse()
                            .map_err(|_| TspError::parse(line_no, "Invalid dimension"))?;
                        dimension = Some((n, line_no));
                        continue;
                    }
                    "TYPE" | "EDGE_WEIGHT_TYPE" => continue,
                    _ => {}
                }
            }

            if line.starts_with("NODE_COORD_SECTION") {
                in_coords = true;
                continue;
            }
            if line.ends_with("_SECTION") {
                in_coords = false;
                continue;
            }

            if in_coords {
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() < 3 {
                    return Err(TspError::parse(line_no, "Expected `id x y`"));
                }
                let x: f64 = parts[1]
                    .parse()
                    .map_err(|_| TspError::parse(line_no, "Invalid x coordinate"))?;
                let y: f64 = parts[2]
                    .parse()
                    .map_err(|_| TspError::parse(line_no, "Invalid y coordinate"))?;
                if !x.is_finite() || !y.is_finite() {
                    return Err(TspError::parse(line_no, "Coordinates must be finite"));
                }
                points.push(Point::new(x, y));
            }
        }

        if let Some((n, line_no)) = dimension {
            if n != points.len() {
                return Err(TspError::parse(
                    line_no,
                    format!("DIMENSION is {} but {} coordinates were read", n, points.len()),
                ));
            }
        }

        Ok(TspInstance {
            name,
            comment,
            region: None,
            points,
        })
    }

    /// Render as TSP-LIB text (EUC_2D, 1-indexed node ids)
    pub fn to_tsplib(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "NAME: {}", self.name);
        if !self.comment.is_empty() {
            let _ = writeln!(out, "COMMENT: {}", self.comment);
        }
        let _ = writeln!(out, "TYPE: TSP");
        let _ = writeln!(out, "DIMENSION: {}", self.points.len());
        let _ = writeln!(out, "EDGE_WEIGHT_TYPE: EUC_2D");
        let _ = writeln!(out, "NODE_COORD_SECTION");
        for (i, p) in self.points.iter().enumerate() {
            let _ = writeln!(out, "{} {} {}", i + 1, p.x, p.y);
        }
        out.push_str("EOF\n");
        out
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_tsplib())?;
        Ok(())
    }

    /// Get statistics about the instance
    pub fn statistics(&self) -> InstanceStatistics {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in &self.points {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        let n = self.points.len();
        let mut pair_count = 0usize;
        let mut distance_sum = 0.0;
        let mut max_distance: f64 = 0.0;
        let mut duplicate_points = 0usize;
        for i in 0..n {
            let mut seen_before = false;
            for j in 0..n {
                if i == j {
                    continue;
                }
                let d = self.points[i].distance(&self.points[j]);
                if j < i && d == 0.0 {
                    seen_before = true;
                }
                if j > i {
                    pair_count += 1;
                    distance_sum += d;
                    max_distance = max_distance.max(d);
                }
            }
            if seen_before {
                duplicate_points += 1;
            }
        }

        let avg_distance = if pair_count > 0 {
            distance_sum / pair_count as f64
        } else {
            0.0
        };
        let bounds = if n > 0 {
            Some((min_x, min_y, max_x, max_y))
        } else {
            None
        };

        InstanceStatistics {
            name: self.name.clone(),
            dimension: n,
            bounds,
            duplicate_points,
            avg_distance,
            max_distance,
        }
    }
}

/// Statistics about a TSP instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceStatistics {
    pub name: String,
    pub dimension: usize,
    /// `(min_x, min_y, max_x, max_y)`, `None` for an empty instance
    pub bounds: Option<(f64, f64, f64, f64)>,
    /// Points whose coordinates repeat an earlier point
    pub duplicate_points: usize,
    pub avg_distance: f64,
    pub max_distance: f64,
}

impl std::fmt::Display for InstanceStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Instance: {}", self.name)?;
        writeln!(f, "  Points: {}", self.dimension)?;
        if let Some((min_x, min_y, max_x, max_y)) = self.bounds {
            writeln!(
                f,
                "  Bounds: x [{}, {}], y [{}, {}]",
                min_x, max_x, min_y, max_y
            )?;
        }
        writeln!(f, "  Duplicate points: {}", self.duplicate_points)?;
        writeln!(f, "  Avg distance: {:.2}", self.avg_distance)?;
        writeln!(f, "  Max distance: {:.2}", self.max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SAMPLE: &str = "NAME: square
COMMENT: unit square
TYPE: TSP
DIMENSION: 4
EDGE_WEIGHT_TYPE: EUC_2D
NODE_COORD_SECTION
1 0 0
2 1 0
3 1 1
4 0 1
EOF
";

    #[test]
    fn test_distance_calculation() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);

        assert!((a.distance(&b) - 5.0).abs() < 1e-10);
        assert!((b.distance(&a) - 5.0).abs() < 1e-10);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_parse_sample() {
        let instance = TspInstance::parse(SAMPLE).unwrap();

        assert_eq!(instance.name, "square");
        assert_eq!(instance.comment, "unit square");
        assert_eq!(instance.dimension(), 4);
        assert_eq!(instance.points[2], Point::new(1.0, 1.0));
    }

    #[test]
    fn test_parse_bad_coordinate() {
        let text = "NODE_COORD_SECTION\n1 0 0\n2 abc 3\nEOF\n";
        match TspInstance::parse(text) {
            Err(TspError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_dimension_mismatch() {
        let text = "NAME: short\nDIMENSION: 3\nNODE_COORD_SECTION\n1 0 0\n2 1 1\nEOF\n";
        match TspInstance::parse(text) {
            Err(TspError::Parse { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("DIMENSION is 3"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_without_points() {
        let instance = TspInstance::parse("NAME: empty\nEOF\n").unwrap();
        assert_eq!(instance.dimension(), 0);
    }

    #[test]
    fn test_tsplib_text_reparses() {
        let instance = TspInstance::new(
            "pair",
            vec![Point::new(1.5, 2.0), Point::new(759.0, 0.0)],
        );
        let reparsed = TspInstance::parse(&instance.to_tsplib()).unwrap();

        assert_eq!(reparsed.name, "pair");
        assert_eq!(reparsed.points, instance.points);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("nn_tsp_instance_{}.tsp", std::process::id()));
        let instance = TspInstance::parse(SAMPLE).unwrap();
        instance.save(&path).unwrap();

        let loaded = TspInstance::from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.points, instance.points);
    }

    #[test]
    fn test_generate_from_config() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let config = InstanceConfig {
            point_count: Some(9),
            ..Default::default()
        };
        let instance = TspInstance::generate(&config, &mut rng).unwrap();

        assert_eq!(instance.dimension(), 9);
        assert_eq!(instance.region, Some(Region::default()));
        assert!(instance.points.iter().all(|p| Region::default().contains(p)));
    }

    #[test]
    fn test_statistics() {
        let instance = TspInstance::new(
            "dups",
            vec![
                Point::new(0.0, 0.0),
                Point::new(3.0, 4.0),
                Point::new(0.0, 0.0),
            ],
        );
        let stats = instance.statistics();

        assert_eq!(stats.dimension, 3);
        assert_eq!(stats.duplicate_points, 1);
        assert_eq!(stats.bounds, Some((0.0, 0.0, 3.0, 4.0)));
        assert!((stats.max_distance - 5.0).abs() < 1e-10);
        assert!((stats.avg_distance - 10.0 / 3.0).abs() < 1e-10);
        assert!(stats.to_string().contains("Points: 3"));
    }
}
