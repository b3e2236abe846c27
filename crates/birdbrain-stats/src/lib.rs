//! Statistical summaries for the birdbrain project.
//!
//! This crate provides the small set of descriptive statistics used to
//! summarize generations during training: minimum, maximum, mean, and median
//! of a dataset of `f32` values.
//!
//! # Examples
//!
//! ```
//! use birdbrain_stats::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.median, 3.0);
//! ```

pub use self::descriptive::DescriptiveStats;

pub mod descriptive;
