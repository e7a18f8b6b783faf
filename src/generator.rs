//! Random point generation.
//!
//! Points are drawn uniformly from the integer grid of a bounded rectangle
//! `[0, width) x [0, height)`. The random source is always passed in by the
//! caller, so a seeded generator gives reproducible point sets.

use crate::error::{Result, TspError};
use crate::instance::Point;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Default side length of the generation region.
pub const DEFAULT_REGION_SIDE: u32 = 760;
/// Default smallest instance size picked by [`random_count`].
pub const DEFAULT_MIN_POINTS: usize = 5;
/// Default largest instance size picked by [`random_count`].
pub const DEFAULT_MAX_POINTS: usize = 14;

/// Bounded rectangle points are generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let region = Region { width, height };
        region.validate()?;
        Ok(region)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TspError::invalid(format!(
                "region must have positive sides, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Whether a point lies inside `[0, width) x [0, height)`.
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width as f64
            && point.y < self.height as f64
    }
}

impl Default for Region {
    fn default() -> Self {
        Region {
            width: DEFAULT_REGION_SIDE,
            height: DEFAULT_REGION_SIDE,
        }
    }
}

/// Parameters for producing a random instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Exact number of points; when `None` a count is drawn from
    /// `min_points..=max_points`.
    pub point_count: Option<usize>,
    pub min_points: usize,
    pub max_points: usize,
    pub region: Region,
    /// Seed for [`InstanceConfig::rng`]; when `None` a fresh one is drawn
    /// by [`InstanceConfig::resolve_seed`].
    pub seed: Option<u64>,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        InstanceConfig {
            point_count: None,
            min_points: DEFAULT_MIN_POINTS,
            max_points: DEFAULT_MAX_POINTS,
            region: Region::default(),
            seed: None,
        }
    }
}

impl InstanceConfig {
    /// Return the configured seed, drawing and storing a fresh one first if
    /// none is set. Later calls return the same value.
    pub fn resolve_seed(&mut self) -> u64 {
        *self.seed.get_or_insert_with(|| rand::thread_rng().gen())
    }

    /// Seeded random source for this configuration. Two configs with the same
    /// seed yield identical streams.
    pub fn rng(&mut self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.resolve_seed())
    }

    /// Resolve the number of points to generate.
    pub fn resolve_count(&self, rng: &mut dyn RngCore) -> Result<usize> {
        match self.point_count {
            Some(0) => Err(TspError::invalid("point count must be at least 1")),
            Some(count) => Ok(count),
            None => random_count(self.min_points, self.max_points, rng),
        }
    }
}

/// Draw an instance size uniformly from `min..=max`.
pub fn random_count(min: usize, max: usize, rng: &mut dyn RngCore) -> Result<usize> {
    if min == 0 {
        return Err(TspError::invalid("minimum point count must be at least 1"));
    }
    if min > max {
        return Err(TspError::invalid(format!(
            "empty point count range {}..={}",
            min, max
        )));
    }
    Ok(rng.gen_range(min..=max))
}

/// Uniform point generator over a [`Region`].
#[derive(Debug, Clone, Default)]
pub struct PointGenerator {
    region: Region,
}

impl PointGenerator {
    pub fn new(region: Region) -> Result<Self> {
        region.validate()?;
        Ok(PointGenerator { region })
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Generate `count` points. Each point draws x then y, independently and
    /// uniformly from the integer grid of the region. Coincident points are
    /// kept as they are.
    pub fn generate(&self, count: usize, rng: &mut dyn RngCore) -> Result<Vec<Point>> {
        if count == 0 {
            return Err(TspError::invalid("point count must be at least 1"));
        }

        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            let x = rng.gen_range(0..self.region.width);
            let y = rng.gen_range(0..self.region.height);
            points.push(Point::new(x as f64, y as f64));
        }

        log::debug!(
            "Generated {} points in {}x{} region",
            count,
            self.region.width,
            self.region.height
        );
        Ok(points)
    }
}
