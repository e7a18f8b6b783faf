//! Tour representation and distance accounting.
//!
//! A [`Solution`] holds a finished tour (an open path visiting every point
//! once), the input index of each stop, and the distances derived from it.

use crate::error::{Result, TspError};
use crate::instance::Point;
use serde::{Deserialize, Serialize};

/// Length of each consecutive leg of `tour`, in visiting order.
pub fn segment_distances(tour: &[Point]) -> Vec<f64> {
    tour.windows(2).map(|w| w[0].distance(&w[1])).collect()
}

/// Sum of consecutive leg lengths. No closing edge is added, so tours of
/// zero or one point have length 0.
pub fn total_distance(tour: &[Point]) -> f64 {
    tour.windows(2).map(|w| w[0].distance(&w[1])).sum()
}

/// A constructed tour over a point set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Points in visiting order
    pub tour: Vec<Point>,
    /// Index into the input point set of each tour stop
    pub order: Vec<usize>,
    /// Distances between consecutive stops
    pub segment_distances: Vec<f64>,
    /// Total tour length
    pub cost: f64,
    /// Input index of the first stop
    pub start_index: usize,
    /// Algorithm that generated this solution
    pub algorithm: String,
    /// Computation time in seconds
    pub computation_time: f64,
}

impl Solution {
    /// Build a solution from a visiting order over `points`.
    ///
    /// Fails with [`TspError::InvalidArgument`] if any index in `order` is out
    /// of range for `points`. Repeated or missing indices are accepted; use
    /// [`Solution::is_permutation_of`] to check for a full tour.
    pub fn from_order(points: &[Point], order: Vec<usize>, algorithm: &str) -> Result<Self> {
        let tour = order
            .iter()
            .map(|&i| {
                points.get(i).copied().ok_or_else(|| {
                    TspError::invalid(format!(
                        "tour index {} out of range for {} points",
                        i,
                        points.len()
                    ))
                })
            })
            .collect::<Result<Vec<Point>>>()?;
        let segment_distances = segment_distances(&tour);
        let cost: f64 = segment_distances.iter().sum();
        let start_index = order.first().copied().unwrap_or(0);

        Ok(Solution {
            tour,
            order,
            segment_distances,
            cost,
            start_index,
            algorithm: algorithm.to_string(),
            computation_time: 0.0,
        })
    }

    pub fn len(&self) -> usize {
        self.tour.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tour.is_empty()
    }

    /// Check that every index of a point set of size `n` appears exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.order.len() != n || self.tour.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &i in &self.order {
            if i >= n || seen[i] {
                return false;
            }
            seen[i] = true;
        }
        true
    }

    /// Longest single leg, 0 for tours without legs
    pub fn longest_segment(&self) -> f64 {
        self.segment_distances.iter().cloned().fold(0.0, f64::max)
    }

    /// Average leg length, 0 for tours without legs
    pub fn mean_segment(&self) -> f64 {
        if self.segment_distances.is_empty() {
            0.0
        } else {
            self.cost / self.segment_distances.len() as f64
        }
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution ({})", self.algorithm)?;
        writeln!(f, "  Total distance: {:.2}", self.cost)?;
        writeln!(f, "  Points: {}", self.tour.len())?;
        writeln!(f, "  Start index: {}", self.start_index)?;
        writeln!(f, "  Time: {:.6}s", self.computation_time)?;
        writeln!(f, "  Order: {:?}", self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_distance_short_tours() {
        assert_eq!(total_distance(&[]), 0.0);
        assert_eq!(total_distance(&[Point::new(4.0, 2.0)]), 0.0);
        assert!(segment_distances(&[Point::new(4.0, 2.0)]).is_empty());
    }

    #[test]
    fn test_total_distance_is_open_path() {
        let tour = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(3.0, 0.0),
        ];
        let segments = segment_distances(&tour);

        assert_eq!(segments.len(), 2);
        assert!((segments[0] - 5.0).abs() < 1e-10);
        assert!((segments[1] - 4.0).abs() < 1e-10);
        assert!((total_distance(&tour) - 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_coincident_stops_have_zero_length() {
        let p = Point::new(7.0, 7.0);
        assert_eq!(total_distance(&[p, p, p]), 0.0);
    }

    #[test]
    fn test_from_order() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(1.0, 0.0),
        ];
        let sol = Solution::from_order(&points, vec![0, 2, 1], "test").unwrap();

        assert_eq!(sol.tour, vec![points[0], points[2], points[1]]);
        assert_eq!(sol.start_index, 0);
        assert!((sol.cost - 10.0).abs() < 1e-10);
        assert!((sol.longest_segment() - 9.0).abs() < 1e-10);
        assert!((sol.mean_segment() - 5.0).abs() < 1e-10);
        assert!(sol.is_permutation_of(3));
        assert!(!sol.is_permutation_of(4));
    }

    #[test]
    fn test_from_order_rejects_out_of_range() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let result = Solution::from_order(&points, vec![0, 2], "test");
        assert!(matches!(result, Err(TspError::InvalidArgument(_))));
    }

    #[test]
    fn test_repeated_index_is_not_permutation() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let sol = Solution::from_order(&points, vec![1, 1], "test").unwrap();
        assert!(!sol.is_permutation_of(2));
    }

    #[test]
    fn test_solution_json() {
        let points = vec![Point::new(0.0, 0.0), Point::new(0.0, 2.0)];
        let sol = Solution::from_order(&points, vec![1, 0], "test").unwrap();
        let json = serde_json::to_string(&sol).unwrap();
        let back: Solution = serde_json::from_str(&json).unwrap();

        assert_eq!(back.order, vec![1, 0]);
        assert_eq!(back.cost, 2.0);
    }
}
