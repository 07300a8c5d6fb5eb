//! Remote data access layer.
//!
//! Every read is bound to a [`QueryKey`](crate::cache::QueryKey) and goes
//! through the shared cache. Every write declares which keys it invalidates.

mod client;
mod state;

pub use client::{DataClient, ToggleFlag};
pub use state::QueryState;
