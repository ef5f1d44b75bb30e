//! Render target: a screen's widget tree behind a liveness check
//!
//! The poller task and the front-end share one target. Once the screen is
//! torn down the target is invalidated, the view is dropped, and every later
//! write is refused. Invalidation takes the same lock as writes, so when
//! [`RenderTarget::invalidate`] returns no write is in progress or can start.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;

struct Inner<V> {
    view: Mutex<Option<V>>,
    revision: watch::Sender<u64>,
}

pub struct RenderTarget<V> {
    inner: Arc<Inner<V>>,
}

impl<V> Clone for RenderTarget<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> RenderTarget<V> {
    pub fn new(view: V) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                view: Mutex::new(Some(view)),
                revision,
            }),
        }
    }

    /// Mutate the view if the screen is still alive. Returns `false` when the
    /// target was invalidated and nothing was written.
    pub fn write<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut V),
    {
        let mut guard = self.inner.view.lock();
        match guard.as_mut() {
            Some(view) => {
                f(view);
                self.inner.revision.send_modify(|rev| *rev += 1);
                true
            }
            None => false,
        }
    }

    /// Read the view, `None` once invalidated
    pub fn read<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&V) -> R,
    {
        self.inner.view.lock().as_ref().map(f)
    }

    pub fn is_live(&self) -> bool {
        self.inner.view.lock().is_some()
    }

    /// Tear the screen down. Returns the last view, if it was still alive.
    pub fn invalidate(&self) -> Option<V> {
        let view = self.inner.view.lock().take();
        if view.is_some() {
            // wake observers so they notice the target is gone
            self.inner.revision.send_modify(|rev| *rev += 1);
        }
        view
    }

    /// Number of successful writes so far
    pub fn revision(&self) -> u64 {
        *self.inner.revision.borrow()
    }

    /// Receiver notified after every write and on invalidation
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }
}

impl<V: Clone> RenderTarget<V> {
    /// Copy of the current view, `None` once invalidated
    pub fn cloned_view(&self) -> Option<V> {
        self.read(V::clone)
    }
}
