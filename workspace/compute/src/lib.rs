pub mod accuracy;
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod selection;

pub use dashboard::Dashboard;
pub use error::{ComputeError, Result};
pub use selection::SelectionRequest;
