//! Platform-agnostic types for FluxViewer instrument readings.
//!
//! This crate provides the shared vocabulary of the storage layer and its
//! front ends: readings, channels, chart points and query windows.
//!
//! # Features
//!
//! - [`Reading`]: one timestamped flux/temperature/pressure/humidity sample
//! - [`Channel`]: selector for the field projected onto a chart
//! - [`DateWindow`]: inclusive, never-inverted query window
//! - [`point_budget`]: detail-control arithmetic for downsampling requests
//!
//! # Example
//!
//! ```
//! use fluxview_types::{Channel, Reading};
//! use time::macros::datetime;
//!
//! let reading = Reading::new(datetime!(2022-01-12 09:30), 0.8, 21.5, 1012.0, 38.0);
//! let points = Channel::Temperature.project(&[reading]);
//! assert_eq!(points[0].value, 21.5);
//! ```

pub mod budget;
pub mod error;
pub mod types;
pub mod window;

pub use budget::{MAX_POINTS, point_budget};
pub use error::{ParseError, WindowError};
pub use types::{Channel, ChartPoint, Reading};
pub use window::{DateWindow, END_OF_DAY};
