//! Clock lifecycle states.
//!
//! ```text
//! Stopped ──start──▶ Running ──pause──▶ Paused
//!                       ▲                  │
//!                       └─────resume───────┘
//! any ──stop──▶ Stopped (terminal for that handle)
//! ```

use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum ClockState {
    Running = 0,
    Paused  = 1,
    Stopped = 2,
}

impl ClockState {
    fn from_u8(v: u8) -> ClockState {
        match v {
            0 => ClockState::Running,
            1 => ClockState::Paused,
            _ => ClockState::Stopped,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClockState::Running => "running",
            ClockState::Paused  => "paused",
            ClockState::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for ClockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Lock-free cell shared between the worker (writer) and handles (readers).
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) fn new(state: ClockState) -> Self {
        Self(AtomicU8::new(state as u8))
    }

    #[inline]
    pub(crate) fn get(&self) -> ClockState {
        ClockState::from_u8(self.0.load(Ordering::Acquire))
    }

    #[inline]
    pub(crate) fn set(&self, state: ClockState) {
        self.0.store(state as u8, Ordering::Release);
    }
}
