//! Remote gallery adapters.

mod dto;
mod picsum_client;

pub use dto::PicsumImageResponse;
pub use picsum_client::{PICSUM_API_BASE, PicsumClient};
