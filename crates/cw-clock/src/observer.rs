//! Observer hooks invoked by the clock worker.

use std::sync::{Arc, Mutex, PoisonError};

use cw_core::Tick;
use cw_store::MetricStore;

/// Callbacks invoked on the clock's worker thread.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  `on_refresh` runs while the store's
/// write lock is held, so it sees a fully consistent snapshot; keep it short.
///
/// To read an observer's state after the clock stops, register an
/// `Arc<Mutex<O>>` and keep a clone.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl RefreshObserver for ProgressPrinter {
///     fn on_refresh(&mut self, tick: Tick, store: &MetricStore) {
///         println!("{tick}: {}", store.summary());
///     }
/// }
/// ```
pub trait RefreshObserver: Send {
    /// Called after every refresh pass, timed or forced.
    fn on_refresh(&mut self, _tick: Tick, _store: &MetricStore) {}

    /// Called when the clock transitions Running → Paused.  `ticks` is the
    /// number of refreshes completed so far.
    fn on_pause(&mut self, _ticks: u64) {}

    /// Called when the clock transitions Paused → Running.
    fn on_resume(&mut self, _ticks: u64) {}

    /// Called once when the worker exits.
    fn on_stop(&mut self, _ticks: u64) {}
}

/// A [`RefreshObserver`] that does nothing.
pub struct NoopObserver;

impl RefreshObserver for NoopObserver {}

impl<O: RefreshObserver> RefreshObserver for Arc<Mutex<O>> {
    fn on_refresh(&mut self, tick: Tick, store: &MetricStore) {
        self.lock().unwrap_or_else(PoisonError::into_inner).on_refresh(tick, store);
    }

    fn on_pause(&mut self, ticks: u64) {
        self.lock().unwrap_or_else(PoisonError::into_inner).on_pause(ticks);
    }

    fn on_resume(&mut self, ticks: u64) {
        self.lock().unwrap_or_else(PoisonError::into_inner).on_resume(ticks);
    }

    fn on_stop(&mut self, ticks: u64) {
        self.lock().unwrap_or_else(PoisonError::into_inner).on_stop(ticks);
    }
}
