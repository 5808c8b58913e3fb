//! Shared test utilities for the station climate workspace.
//!
//! This crate provides:
//! - Temporary SQLite databases shaped like the production station database
//! - Deterministic measurement generators
//! - Named fixture datasets with known answers
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then build a database in an async test:
//!
//! ```ignore
//! use test_utils::{fixtures, TestDatabase};
//!
//! let db = TestDatabase::build(&fixtures::two_station_dataset()).await?;
//! let url = db.url();
//! ```

pub mod database;
pub mod fixtures;
pub mod generators;

pub use database::{Dataset, TestDatabase};
pub use generators::*;

/// Assert two floats are within `epsilon` of each other.
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(70.33333, 70.3333, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}
