//! Dashboard views
//!
//! Turn store contents into render-ready view models and validate form
//! submissions:
//!
//! - **map**: bounding region, zoom level and points of the destinations
//! - **questions**: numbered question list
//! - **costs**: trip cost statistics and bar chart

pub mod costs;
pub mod map;
pub mod questions;

pub use costs::{BarChart, ChartBar, CostSummary, CostsView, MetricCard};
pub use map::{compute_zoom, DestinationSubmission, MapPoint, MapRegion, MapView};
pub use questions::{QuestionItem, QuestionSubmission, QuestionsView};

use thiserror::Error;

/// Errors raised while building a view or validating a submission
#[derive(Error, Debug, PartialEq)]
pub enum ViewError {
    /// The cost delta needs a previous and a last trip
    #[error("At least two trips are required, found {found}")]
    InsufficientHistory { found: usize },

    /// Submitted coordinate is not a number or out of range
    #[error("Invalid {field}: {value}")]
    InvalidCoordinate { field: &'static str, value: String },
}

/// Result type alias for view operations
pub type ViewResult<T> = Result<T, ViewError>;
