//! Per-platform adapters.

mod facebook;
mod twitter;
mod youtube;

pub use facebook::FacebookAdapter;
pub use twitter::TwitterAdapter;
pub use youtube::YouTubeAdapter;
