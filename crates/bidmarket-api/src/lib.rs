// bidmarket-api: Async Rust client for the marketplace reference and search endpoints

pub mod client;
pub mod error;
pub mod listings;
pub mod reference;
pub mod transport;
pub mod types;

pub use client::MarketClient;
pub use error::Error;
pub use listings::SearchEndpoint;
pub use reference::ReferencePath;
pub use transport::{TlsMode, TransportConfig};
pub use types::{RawEntity, SearchPage};
