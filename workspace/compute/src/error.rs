use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputeError {
    /// Requested product is not among the forecast products
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// The forecast collection has no products to select from
    #[error("No products available in the forecast data")]
    NoProducts,
}

impl ComputeError {
    /// Stable machine-readable code for API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ComputeError::UnknownProduct(_) => "UNKNOWN_PRODUCT",
            ComputeError::NoProducts => "NO_PRODUCTS",
        }
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
