//! Client-side cache of fetched records.
//!
//! The cache is the only shared mutable state on the client. It is written
//! through two paths only: fetch results (invalidate then refetch) and direct
//! optimistic writes that are later confirmed or rolled back.

mod model;
mod store;

pub use model::{CacheEvent, QueryKey};
pub use store::{FetchTicket, QueryCache};
