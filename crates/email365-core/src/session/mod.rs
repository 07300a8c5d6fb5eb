//! Identity and session lifecycle.

mod identity;
mod lifecycle;

pub use identity::{Identity, IdentityProvider, LocalIdentityProvider, LoginError};
pub use lifecycle::{Session, TopLevelView};
