//! Terminal presentation. No query logic lives here.

pub mod index;
pub mod refresh;
pub mod setup;
pub mod ticker;
pub mod ui;
