//! Optimistic mutation support
//!
//! The UI applies a local state change first, then issues the network
//! call. On failure the canonical list is reloaded wholesale (eventual
//! consistency within one poll interval, not a targeted rollback). While
//! any such action is in flight, the order poll skips its tick so a
//! stale snapshot cannot clobber the optimistic state.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::ClientResult;

/// Counts mutating actions currently in flight
#[derive(Debug, Clone, Default)]
pub struct MutationTracker {
    in_flight: Arc<AtomicUsize>,
}

impl MutationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action; the guard un-registers it on drop
    pub fn begin(&self) -> MutationGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        MutationGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    /// Whether any mutating action is pending
    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}

/// RAII registration of one in-flight mutation
#[derive(Debug)]
pub struct MutationGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for MutationGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Run a mutating request after its optimistic local change.
///
/// The caller has already applied the local edit. On failure the
/// `resync` closure reloads canonical state; its own failure is logged
/// and the original error is returned either way.
pub async fn with_resync<T, Req, Res, ResFut>(
    tracker: &MutationTracker,
    request: Req,
    resync: Res,
) -> ClientResult<T>
where
    Req: Future<Output = ClientResult<T>>,
    Res: FnOnce() -> ResFut,
    ResFut: Future<Output = ClientResult<()>>,
{
    let _guard = tracker.begin();

    match request.await {
        Ok(value) => Ok(value),
        Err(error) => {
            tracing::warn!(error = %error, "Mutation failed, resyncing from server");
            if let Err(resync_error) = resync().await {
                tracing::error!(error = %resync_error, "Resync after failed mutation also failed");
            }
            Err(error)
        }
    }
}
