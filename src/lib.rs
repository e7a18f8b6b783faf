//! Nearest Neighbor TSP Solver Library
//!
//! Builds tours over random Euclidean point sets with the greedy
//! nearest-neighbor heuristic and reports their lengths.
//!
//! # Features
//!
//! - Uniform random point generation in a bounded region
//! - Nearest Neighbor construction with first-in-pool tie-breaking
//! - Total and per-segment tour distances
//! - TSP-LIB style instance files for fixed point sets
//! - Benchmarking over many seeded random instances
//! - SVG visualization
//!
//! All randomness is supplied by the caller, so a seeded generator makes
//! every run reproducible.
//!
//! # Example
//!
//! ```
//! use nn_tsp_solver::generator::InstanceConfig;
//! use nn_tsp_solver::heuristics::construction::{ConstructionHeuristic, NearestNeighborHeuristic};
//! use nn_tsp_solver::instance::TspInstance;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let instance = TspInstance::generate(&InstanceConfig::default(), &mut rng).unwrap();
//!
//! let solution = NearestNeighborHeuristic::new()
//!     .construct(&instance.points, &mut rng)
//!     .unwrap();
//!
//! assert_eq!(solution.tour.len(), instance.points.len());
//! println!("Total distance: {:.2}", solution.cost);
//! ```

pub mod error;
pub mod instance;
pub mod generator;
pub mod solution;
pub mod heuristics;
pub mod benchmark;
pub mod visualization;

pub use error::{Result, TspError};
pub use instance::{Point, TspInstance};
pub use solution::Solution;
