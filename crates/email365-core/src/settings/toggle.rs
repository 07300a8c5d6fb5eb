//! Optimistic toggle for server-owned booleans.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::actor::Actor;
use crate::query::{DataClient, QueryState, ToggleFlag};
use crate::{Error, Result};

/// Clears the in-flight flag when the toggle settles, even if cancelled.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Switch whose displayed value flips before the server answers.
///
/// The sequence for one toggle:
/// 1. suspend any fetch of the flag in flight
/// 2. snapshot the cached value (`false` if none)
/// 3. display the negation
/// 4. call the server
/// 5. on success display what the server returned
/// 6. on failure restore the snapshot and post an error notice
/// 7. refetch in the background either way
///
/// A second toggle while step 4 is outstanding is rejected with
/// [`Error::Busy`]. Clones share the in-flight state.
pub struct OptimisticToggle<A> {
    client: Arc<DataClient<A>>,
    flag: ToggleFlag,
    in_flight: Arc<AtomicBool>,
}

impl<A> Clone for OptimisticToggle<A> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            flag: self.flag,
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<A: Actor> OptimisticToggle<A> {
    /// Create a toggle for `flag`.
    #[must_use]
    pub fn new(client: Arc<DataClient<A>>, flag: ToggleFlag) -> Self {
        Self {
            client,
            flag,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The flag this toggle controls.
    #[must_use]
    pub const fn flag(&self) -> ToggleFlag {
        self.flag
    }

    /// Value to display.
    #[must_use]
    pub fn displayed(&self) -> QueryState<bool> {
        self.client.state(self.flag.key())
    }

    /// Whether a toggle is waiting for the server.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Flip the flag. Returns the server's resulting value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Busy`] if a toggle is already outstanding, or the
    /// remote error after rolling back.
    pub async fn toggle(&self) -> Result<bool> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!(flag = ?self.flag, "Toggle already in flight");
            return Err(Error::Busy);
        }
        let _in_flight = InFlight(&self.in_flight);

        let key = self.flag.key();
        let cache = self.client.cache();

        cache.cancel(key);
        let previous = cache.get::<bool>(key).unwrap_or(false);
        cache.set(key, !previous);

        let outcome = match self.client.remote_toggle(self.flag).await {
            Ok(confirmed) => {
                if confirmed == previous {
                    tracing::info!(flag = ?self.flag, confirmed, "Server kept the previous value");
                }
                cache.set(key, confirmed);
                if self.flag == ToggleFlag::AccountLinked {
                    self.client.notices().success(if confirmed {
                        "Google account linked successfully"
                    } else {
                        "Google account unlinked successfully"
                    });
                }
                Ok(confirmed)
            }
            Err(e) => {
                cache.set(key, previous);
                self.client
                    .notices()
                    .error(format!("{}: {e}", self.flag.failure_prefix()));
                Err(e)
            }
        };

        self.client.spawn_refetch(key);
        outcome
    }
}
