//! Histograms and bin intervals for a-contrario mode detection
//!
//! This crate provides the data side of the acontrario workspace: a validated
//! [`Histogram`] of bin counts, its [`CumulativeHistogram`] for constant-time
//! interval masses, the [`Interval`] type with its circular convention, and
//! the plain-text formats used to exchange histograms and mode lists.
//!
//! Building histograms from raw samples is deliberately not provided: the
//! input histogram is assumed to be given.
//!
//! # Examples
//!
//! ```rust
//! use acontrario_histogram::{Histogram, Interval};
//!
//! let hist = Histogram::new(vec![20.0, 1.0, 1.0, 1.0, 1.0, 20.0]).unwrap();
//! let cumulative = hist.cumulative();
//!
//! // On a circular histogram, (5, 0) covers the last and the first bin
//! let wrapped = Interval::new(5, 0);
//! assert_eq!(wrapped.bin_count(hist.len()), 2);
//! assert_eq!(cumulative.mass(wrapped), 40.0);
//! ```

pub mod io;
pub mod types;

// Re-exports
pub use io::{read_histogram, read_histogram_file, write_modes, write_modes_file};
pub use types::{CumulativeHistogram, Histogram, Interval};
