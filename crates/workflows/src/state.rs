//! Per-view state cell.
//!
//! A view owns a [`ViewCell`]. Workflow bodies only ever hold a
//! [`WeakCell`] across network round trips, so a response that lands
//! after its view was dropped finds nothing to write into and is
//! discarded.
//!
//! Reloads are stamped with a generation taken when the request is
//! issued. A response older than the last one applied is dropped, so the
//! latest-issued reload wins even if an earlier one arrives later.

use std::sync::{Arc, Weak};

use tokio::sync::RwLock;

struct Slot<T> {
    value: Option<T>,
    /// Generation of the most recently issued reload.
    issued: u64,
    /// Generation of the most recently applied reload.
    applied: u64,
}

/// Outcome of handing a reload response to a [`WeakCell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Applied {
    Applied,
    /// A newer reload has already been applied.
    Stale,
    /// The owning view no longer exists.
    ViewGone,
}

pub(crate) struct ViewCell<T> {
    inner: Arc<RwLock<Slot<T>>>,
}

pub(crate) struct WeakCell<T> {
    inner: Weak<RwLock<Slot<T>>>,
}

impl<T> Clone for WeakCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T: Clone> ViewCell<T> {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Slot {
                value: None,
                issued: 0,
                applied: 0,
            })),
        }
    }

    pub(crate) fn weak(&self) -> WeakCell<T> {
        WeakCell {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Clone of the current value, `None` until the first load lands.
    pub(crate) async fn snapshot(&self) -> Option<T> {
        self.inner.read().await.value.clone()
    }

    /// Run `f` against the current value without cloning it.
    pub(crate) async fn read<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        let slot = self.inner.read().await;
        f(slot.value.as_ref())
    }
}

impl<T> WeakCell<T> {
    /// Reserve a generation for a reload about to be issued. `None` when
    /// the view is already gone.
    pub(crate) async fn begin_reload(&self) -> Option<u64> {
        let inner = self.inner.upgrade()?;
        let mut slot = inner.write().await;
        slot.issued += 1;
        Some(slot.issued)
    }

    /// Store a reload response if it is not older than what is shown.
    pub(crate) async fn apply(&self, generation: u64, value: T) -> Applied {
        let Some(inner) = self.inner.upgrade() else {
            return Applied::ViewGone;
        };
        let mut slot = inner.write().await;
        if generation < slot.applied {
            return Applied::Stale;
        }
        slot.applied = generation;
        slot.value = Some(value);
        Applied::Applied
    }

    /// Patch the current value in place. Returns `false` when the view is
    /// gone or nothing has been loaded yet.
    pub(crate) async fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let Some(inner) = self.inner.upgrade() else {
            return false;
        };
        let mut slot = inner.write().await;
        match slot.value.as_mut() {
            Some(value) => {
                f(value);
                true
            }
            None => false,
        }
    }
}
