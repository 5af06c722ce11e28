pub mod products;
pub mod report;
pub mod serve;

pub use products::list_products;
pub use report::print_report;
pub use serve::serve;
