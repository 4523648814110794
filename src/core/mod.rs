//! Core index model, queries and refresh logic

pub mod basket;
pub mod catalog;
pub mod config;
pub mod error;
pub mod log;
pub mod model;
pub mod query;
pub mod service;
pub mod ticker;

// Re-export main types for cleaner imports
pub use basket::{BasketDocument, BasketProvider, FetchOutcome, MarketEntry};
pub use catalog::Category;
pub use error::QueryError;
pub use model::{IndexModel, IndexModelBuilder, TickerInfo};
pub use service::{IndexService, RefreshReport};
