use crate::error::{Result, TspError};
use crate::instance::Point;
use crate::solution::Solution;
use ordered_float::OrderedFloat;
use rand::{Rng, RngCore};

pub trait ConstructionHeuristic {
    fn construct(&self, points: &[Point], rng: &mut dyn RngCore) -> Result<Solution>;
    fn name(&self) -> &str;
}

/// How the first tour stop is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartPolicy {
    /// Uniformly random over the input points
    #[default]
    Random,
    /// A given input index
    Fixed(usize),
}

/// Index of the point in `pool` closest to `current`.
///
/// Ties go to the earliest candidate in pool order. Returns `None` for an
/// empty pool.
pub fn nearest(current: &Point, pool: &[Point]) -> Option<usize> {
    nearest_among(current, pool.iter().copied().enumerate())
}

fn nearest_among<I>(current: &Point, candidates: I) -> Option<usize>
where
    I: Iterator<Item = (usize, Point)>,
{
    // `min_by_key` keeps the first of several equal minima.
    candidates
        .map(|(i, p)| (i, current.distance(&p)))
        .min_by_key(|&(_, d)| OrderedFloat(d))
        .map(|(i, d)| {
            log::trace!("nearest to {} is #{} at {:.3}", current, i, d);
            i
        })
}

/// Nearest Neighbor Heuristic
///
/// Starts from one point and repeatedly moves to the closest point not yet
/// visited until all points are in the tour.
pub struct NearestNeighborHeuristic {
    pub start: StartPolicy,
}

impl NearestNeighborHeuristic {
    pub fn new() -> Self {
        NearestNeighborHeuristic {
            start: StartPolicy::Random,
        }
    }

    pub fn starting_at(index: usize) -> Self {
        NearestNeighborHeuristic {
            start: StartPolicy::Fixed(index),
        }
    }

    fn pick_start(&self, n: usize, rng: &mut dyn RngCore) -> Result<usize> {
        match self.start {
            StartPolicy::Random => Ok(rng.gen_range(0..n)),
            StartPolicy::Fixed(index) if index < n => Ok(index),
            StartPolicy::Fixed(index) => Err(TspError::invalid(format!(
                "start index {} out of range for {} points",
                index, n
            ))),
        }
    }
}

impl Default for NearestNeighborHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionHeuristic for NearestNeighborHeuristic {
    fn construct(&self, points: &[Point], rng: &mut dyn RngCore) -> Result<Solution> {
        if points.is_empty() {
            return Err(TspError::EmptyInput);
        }
        let start = std::time::Instant::now();

        // Working pool: the builder's own copy plus visited flags. Scanning
        // unvisited entries in index order presents candidates in the same
        // order as removing visited points from a list would.
        let pool: Vec<Point> = points.to_vec();
        let mut visited = vec![false; pool.len()];

        let first = self.pick_start(pool.len(), rng)?;
        visited[first] = true;
        let mut order = Vec::with_capacity(pool.len());
        order.push(first);
        let mut current = first;

        while order.len() < pool.len() {
            let candidates = pool
                .iter()
                .copied()
                .enumerate()
                .filter(|&(i, _)| !visited[i]);
            let Some(next) = nearest_among(&pool[current], candidates) else {
                break;
            };

            log::debug!(
                "step {}: #{} -> #{} ({:.3})",
                order.len(),
                current,
                next,
                pool[current].distance(&pool[next])
            );
            visited[next] = true;
            order.push(next);
            current = next;
        }

        let mut solution = Solution::from_order(points, order, self.name())?;
        solution.computation_time = start.elapsed().as_secs_f64();
        log::info!(
            "{} tour over {} points from #{}: {:.2}",
            self.name(),
            solution.len(),
            solution.start_index,
            solution.cost
        );
        Ok(solution)
    }

    fn name(&self) -> &str {
        match self.start {
            StartPolicy::Random => "NearestNeighbor",
            StartPolicy::Fixed(_) => "NearestNeighbor-FixedStart",
        }
    }
}
