pub mod client;
pub mod http_client;
pub mod models;
pub mod urls;

pub use client::{StatsClient, fetch_reshaped};
pub use http_client::*;
pub use models::{PlayerSummary, ResultSet};
pub use urls::*;
