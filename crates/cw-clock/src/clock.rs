//! `SimulationClock` and its worker loop.
//!
//! # Threading model
//!
//! ```text
//!  ClockHandle ──Control──▶ worker thread ──write lock──▶ MetricStore
//!      ▲                          │
//!      └───────── ack ────────────┘   (pause / resume / force_refresh)
//! ```
//!
//! The worker is the only thread that mutates the store.  Timed refreshes
//! fire when `recv_timeout` on the control channel times out; a control
//! message arriving first is handled and the same deadline is kept.  While
//! paused the worker blocks on `recv`, so no timer fires at all.
//!
//! An observer that panics is detached and logged; the clock and the other
//! observers carry on.  If the worker thread exits for any reason the state
//! reads `Stopped`.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, info, warn};

use cw_core::{SimulatorConfig, Tick};
use cw_store::{MetricStore, RefreshProfile};

use crate::peak::wall_clock_peak;
use crate::state::StateCell;
use crate::{ClockError, ClockHandle, ClockResult, ClockState, RefreshObserver};

/// A `MetricStore` shared between the clock worker and readers.
pub type SharedStore = Arc<RwLock<MetricStore>>;

/// Wrap a store for use with [`SimulationClock`].
pub fn shared(store: MetricStore) -> SharedStore {
    Arc::new(RwLock::new(store))
}

// ── Control messages ──────────────────────────────────────────────────────────

pub(crate) enum Control {
    Pause(Sender<()>),
    Resume(Sender<()>),
    /// Run one refresh now with the given profile; replies with the tick it
    /// ran as.
    Refresh(RefreshProfile, Sender<Tick>),
    Stop,
}

// ── SimulationClock ───────────────────────────────────────────────────────────

/// Periodically refreshes a [`SharedStore`].
///
/// Configure observers, then call [`start`](Self::start) to spawn the worker.
/// All control goes through the returned [`ClockHandle`].
///
/// ```rust,ignore
/// let store = shared(builder.build()?);
/// let mut handle = SimulationClock::new(store.clone())
///     .observer(ProgressPrinter)
///     .start(Duration::from_secs(25), || false)?;
/// // ...
/// handle.stop();
/// ```
pub struct SimulationClock {
    store:     SharedStore,
    observers: Vec<Box<dyn RefreshObserver>>,
    name:      String,
}

impl SimulationClock {
    pub fn new(store: SharedStore) -> Self {
        Self { store, observers: Vec::new(), name: "cw-clock".to_owned() }
    }

    /// Register an observer.  Observers are called in registration order.
    pub fn observer(mut self, observer: impl RefreshObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Name given to the worker thread.
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Spawn the worker.  The first refresh fires one `interval` from now.
    ///
    /// `peak_hours` is consulted once per timed refresh.
    pub fn start<F>(self, interval: Duration, peak_hours: F) -> ClockResult<ClockHandle>
    where
        F: Fn() -> bool + Send + 'static,
    {
        if interval.is_zero() {
            return Err(ClockError::Config("refresh interval must be positive".into()));
        }

        let (tx, rx) = unbounded::<Control>();
        let state = Arc::new(StateCell::new(ClockState::Running));
        let ticks = Arc::new(AtomicU64::new(0));

        let worker = Worker {
            store:      self.store,
            observers:  self.observers,
            interval,
            peak_hours: Box::new(peak_hours),
            state:      Arc::clone(&state),
            ticks:      Arc::clone(&ticks),
        };

        let join = thread::Builder::new()
            .name(self.name)
            .spawn(move || worker.run(rx))?;

        info!(interval_ms = interval.as_millis() as u64, "clock started");
        Ok(ClockHandle::new(tx, join, state, ticks))
    }

    /// [`start`](Self::start) with the interval from `config` and a peak
    /// predicate that checks the local wall clock against
    /// `config.peak_windows`.
    pub fn start_with_config(self, config: &SimulatorConfig) -> ClockResult<ClockHandle> {
        config.validate()?;
        let peak = wall_clock_peak(config.peak_windows.clone());
        self.start(config.interval(), peak)
    }
}

// ── Worker ────────────────────────────────────────────────────────────────────

struct Worker {
    store:      SharedStore,
    observers:  Vec<Box<dyn RefreshObserver>>,
    interval:   Duration,
    peak_hours: Box<dyn Fn() -> bool + Send>,
    state:      Arc<StateCell>,
    ticks:      Arc<AtomicU64>,
}

/// Marks the clock stopped when the worker exits, unwinding included.
struct StopOnExit(Arc<StateCell>);

impl Drop for StopOnExit {
    fn drop(&mut self) {
        self.0.set(ClockState::Stopped);
    }
}

/// Call `hook` on every observer, detaching any that panic.
fn notify(
    observers: &mut Vec<Box<dyn RefreshObserver>>,
    hook: &'static str,
    mut f: impl FnMut(&mut Box<dyn RefreshObserver>),
) {
    observers.retain_mut(|o| match catch_unwind(AssertUnwindSafe(|| f(o))) {
        Ok(()) => true,
        Err(_) => {
            warn!(hook, "observer panicked; detaching it");
            false
        }
    });
}

impl Worker {
    fn run(mut self, rx: Receiver<Control>) {
        let _stopped = StopOnExit(self.state.clone());
        let mut deadline = Instant::now() + self.interval;

        loop {
            let msg = match self.state.get() {
                ClockState::Running => {
                    let timeout = deadline.saturating_duration_since(Instant::now());
                    match rx.recv_timeout(timeout) {
                        Ok(msg) => msg,
                        Err(RecvTimeoutError::Timeout) => {
                            let peak = (self.peak_hours)();
                            self.refresh(&RefreshProfile::LIVE, peak);
                            deadline += self.interval;
                            // A slow refresh or observer must not cause a
                            // burst of catch-up ticks.
                            let now = Instant::now();
                            if deadline < now {
                                deadline = now + self.interval;
                            }
                            continue;
                        }
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                ClockState::Paused => match rx.recv() {
                    Ok(msg) => msg,
                    Err(_) => break,
                },
                ClockState::Stopped => break,
            };

            match msg {
                Control::Pause(ack) => {
                    if self.state.get() == ClockState::Running {
                        self.state.set(ClockState::Paused);
                        let n = self.ticks.load(Ordering::Acquire);
                        info!(ticks = n, "clock paused");
                        notify(&mut self.observers, "on_pause", |o| o.on_pause(n));
                    }
                    let _ = ack.send(());
                }
                Control::Resume(ack) => {
                    if self.state.get() == ClockState::Paused {
                        self.state.set(ClockState::Running);
                        deadline = Instant::now() + self.interval;
                        let n = self.ticks.load(Ordering::Acquire);
                        info!(ticks = n, "clock resumed");
                        notify(&mut self.observers, "on_resume", |o| o.on_resume(n));
                    }
                    let _ = ack.send(());
                }
                Control::Refresh(profile, reply) => {
                    let tick = self.refresh(&profile, false);
                    let _ = reply.send(tick);
                }
                Control::Stop => break,
            }
        }

        self.state.set(ClockState::Stopped);
        let n = self.ticks.load(Ordering::Acquire);
        notify(&mut self.observers, "on_stop", |o| o.on_stop(n));
        info!(ticks = n, "clock stopped");
    }

    /// One refresh pass under the write lock.  Observers run before the lock
    /// is released so they see the pass atomically.
    fn refresh(&mut self, profile: &RefreshProfile, peak: bool) -> Tick {
        let started = Instant::now();
        let tick = Tick(self.ticks.load(Ordering::Acquire));

        {
            let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
            store.refresh_with(profile, peak);
            notify(&mut self.observers, "on_refresh", |o| o.on_refresh(tick, &store));
        }

        self.ticks.store(tick.0 + 1, Ordering::Release);
        debug!(
            %tick,
            peak,
            elapsed_us = started.elapsed().as_micros() as u64,
            "refresh complete"
        );
        tick
    }
}
