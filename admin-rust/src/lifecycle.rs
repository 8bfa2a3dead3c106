use crate::{AdminError, AdminResult};
use futures::future::{AbortHandle, Abortable};
use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex, PoisonError},
};

#[derive(Default)]
struct LifecycleState {
    unmounted: bool,
    next_id: u64,
    in_flight: HashMap<u64, AbortHandle>,
}

/// Tracks the operations a view has in flight so they can be cancelled when
/// the view goes away.
///
/// After [`Lifecycle::unmount`] every pending operation resolves to
/// [`AdminError::Unmounted`] without touching state, and new operations are
/// refused.
#[derive(Clone, Default)]
pub struct Lifecycle {
    state: Arc<Mutex<LifecycleState>>,
}

impl Lifecycle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive `future` unless the view is unmounted first.
    pub async fn run<F>(&self, future: F) -> AdminResult<F::Output>
    where
        F: Future,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let id = {
            let mut state = self.lock();
            if state.unmounted {
                return Err(AdminError::Unmounted);
            }
            let id = state.next_id;
            state.next_id += 1;
            state.in_flight.insert(id, handle);
            id
        };
        let _guard = InFlightGuard {
            lifecycle: self,
            id,
        };

        Abortable::new(future, registration)
            .await
            .map_err(|_| AdminError::Unmounted)
    }

    /// Abort everything in flight and refuse later operations.
    pub fn unmount(&self) {
        let handles: Vec<AbortHandle> = {
            let mut state = self.lock();
            state.unmounted = true;
            state.in_flight.drain().map(|(_, handle)| handle).collect()
        };
        if !handles.is_empty() {
            tracing::debug!(count = handles.len(), "aborting in-flight operations");
        }
        for handle in handles {
            handle.abort();
        }
    }

    #[must_use]
    pub fn is_unmounted(&self) -> bool {
        self.lock().unmounted
    }

    /// Whether any operation is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.lock().in_flight.is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LifecycleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct InFlightGuard<'a> {
    lifecycle: &'a Lifecycle,
    id: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.lifecycle.lock().in_flight.remove(&self.id);
    }
}
