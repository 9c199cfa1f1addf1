pub mod client;
pub mod errors;
pub mod pacing;
pub mod pipeline;
pub mod types;

pub use client::{Fetcher, USER_AGENTS};
pub use errors::FetchError;
pub use pacing::Pacer;
pub use types::PageResponse;
