use anyhow::Result;
use tracing::debug;

use crate::config::{initialize_app_state, DataConfig};

pub fn list_products(data: &DataConfig) -> Result<()> {
    let state = initialize_app_state(data)?;
    let products = state.dashboard().products();
    debug!(count = products.len(), "Listing products");

    for product in products {
        println!("{product}");
    }
    Ok(())
}
