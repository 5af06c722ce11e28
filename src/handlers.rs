pub mod dashboard;
pub mod health;
pub mod page;
pub mod products;
