//! `ClockHandle`: the caller's side of a running clock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Sender};
use tracing::warn;

use cw_core::Tick;
use cw_store::RefreshProfile;

use crate::clock::Control;
use crate::state::StateCell;
use crate::ClockState;

/// Controls one started clock.
///
/// `pause` and `resume` return once the worker has applied the transition,
/// so `state()` reflects it immediately afterwards.  Calls that make no
/// sense in the current state are no-ops.  Dropping the handle stops the
/// clock.
pub struct ClockHandle {
    tx:     Sender<Control>,
    worker: Option<JoinHandle<()>>,
    state:  Arc<StateCell>,
    ticks:  Arc<AtomicU64>,
}

impl ClockHandle {
    pub(crate) fn new(
        tx:     Sender<Control>,
        worker: JoinHandle<()>,
        state:  Arc<StateCell>,
        ticks:  Arc<AtomicU64>,
    ) -> Self {
        Self { tx, worker: Some(worker), state, ticks }
    }

    #[inline]
    pub fn state(&self) -> ClockState {
        self.state.get()
    }

    /// Refreshes completed so far, timed and forced.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }

    /// Suspend timed refreshes.  No-op unless running.
    pub fn pause(&self) {
        if self.state() == ClockState::Running {
            self.request(Control::Pause);
        }
    }

    /// Resume timed refreshes.  The next refresh fires one full interval
    /// after this call.  No-op unless paused.
    pub fn resume(&self) {
        if self.state() == ClockState::Paused {
            self.request(Control::Resume);
        }
    }

    /// Run one refresh with `profile` right now, in either running or paused
    /// state.  Timed refreshes keep their schedule.  Returns the tick the
    /// refresh ran as, or `None` if the clock has stopped.
    pub fn force_refresh(&self, profile: RefreshProfile) -> Option<Tick> {
        if self.state() == ClockState::Stopped {
            return None;
        }
        let (reply_tx, reply_rx) = bounded(1);
        self.tx.send(Control::Refresh(profile, reply_tx)).ok()?;
        reply_rx.recv().ok()
    }

    /// Stop the clock and join the worker.  Idempotent; a refresh in flight
    /// completes before this returns.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        // The worker may already be gone; the join below still succeeds.
        let _ = self.tx.send(Control::Stop);
        if worker.join().is_err() {
            warn!("clock worker panicked");
        }
        self.state.set(ClockState::Stopped);
    }

    fn request(&self, make: fn(Sender<()>) -> Control) {
        let (ack_tx, ack_rx) = bounded(1);
        if self.tx.send(make(ack_tx)).is_ok() {
            // Err means the worker exited before answering.
            let _ = ack_rx.recv();
        }
    }
}

impl Drop for ClockHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for ClockHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockHandle")
            .field("state", &self.state())
            .field("ticks", &self.ticks())
            .finish()
    }
}
