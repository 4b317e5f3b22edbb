//! Simulated darshan slot bookings.
//!
//! A booking reserves a one-hour (or any) slot at a site and hands out a
//! queue number such as `A-156` plus a pass code to show at the gate.
//! Numbers come from a caller-supplied [`SimRng`] so seeded runs repeat.
//! No payment or identity is involved.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use cw_core::SimRng;
use cw_core::ids::BookingId;
use cw_store::Site;

use crate::{DeskError, DeskResult};

/// Queue numbers are `<letter>-<n>` with `n` in this range.
pub const QUEUE_NUMBER_RANGE: std::ops::RangeInclusive<u32> = 100..=1098;

/// Estimated wait handed out at booking time, in minutes.
pub const ESTIMATED_WAIT_RANGE: std::ops::Range<u32> = 10..40;

// ── TimeSlot ──────────────────────────────────────────────────────────────────

/// A `[start, end)` window of local time, written `HH:MM-HH:MM`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end:   NaiveTime,
}

impl TimeSlot {
    /// `None` unless `start < end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }
}

impl FromStr for TimeSlot {
    type Err = DeskError;

    fn from_str(s: &str) -> DeskResult<Self> {
        let invalid = || DeskError::InvalidSlot(s.to_owned());
        let (a, b) = s.trim().split_once('-').ok_or_else(invalid)?;
        let start = NaiveTime::parse_from_str(a.trim(), "%H:%M").map_err(|_| invalid())?;
        let end = NaiveTime::parse_from_str(b.trim(), "%H:%M").map_err(|_| invalid())?;
        TimeSlot::new(start, end).ok_or_else(invalid)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

// ── Booking ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Booking {
    pub id:                     BookingId,
    pub site:                   cw_core::SiteId,
    pub site_name:              String,
    pub date:                   NaiveDate,
    pub slot:                   TimeSlot,
    pub queue_number:           String,
    pub pass_code:              String,
    pub estimated_wait_minutes: u32,
    pub status:                 BookingStatus,
}

// ── BookingBook ───────────────────────────────────────────────────────────────

/// All bookings in creation order.
#[derive(Debug, Default)]
pub struct BookingBook {
    bookings: Vec<Booking>,
}

impl BookingBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book `slot` on `date` at `site`.
    ///
    /// The queue letter, number and estimated wait are drawn from `rng` in
    /// that order.
    pub fn book(
        &mut self,
        site: &Site,
        date: NaiveDate,
        slot: TimeSlot,
        rng:  &mut SimRng,
    ) -> &Booking {
        let letter = char::from(b'A' + rng.gen_range(0..26u8));
        let number = rng.gen_range(QUEUE_NUMBER_RANGE);
        let estimated_wait_minutes = rng.gen_range(ESTIMATED_WAIT_RANGE);

        let queue_number = format!("{letter}-{number}");
        let pass_code = pass_code(site.name(), letter, number, date);
        let id = BookingId(self.bookings.len() as u32);

        info!(%id, site = site.name(), %date, %slot, %queue_number, "darshan booked");

        self.bookings.push(Booking {
            id,
            site: site.id(),
            site_name: site.name().to_owned(),
            date,
            slot,
            queue_number,
            pass_code,
            estimated_wait_minutes,
            status: BookingStatus::Confirmed,
        });
        &self.bookings[id.index()]
    }

    /// Cancel a confirmed booking.  Cancelling twice is an error.
    pub fn cancel(&mut self, id: BookingId) -> DeskResult<&Booking> {
        let booking = self
            .bookings
            .get_mut(id.index())
            .ok_or(DeskError::BookingNotFound(id))?;
        if booking.status == BookingStatus::Cancelled {
            return Err(DeskError::InvalidTransition {
                what: id.to_string(),
                from: BookingStatus::Cancelled.as_str(),
                to:   BookingStatus::Cancelled.as_str(),
            });
        }
        booking.status = BookingStatus::Cancelled;
        info!(%id, "booking cancelled");
        Ok(&*booking)
    }

    pub fn get(&self, id: BookingId) -> DeskResult<&Booking> {
        self.bookings.get(id.index()).ok_or(DeskError::BookingNotFound(id))
    }

    /// Confirmed bookings at `site`, in creation order.
    pub fn for_site(&self, site: cw_core::SiteId) -> impl Iterator<Item = &Booking> + '_ {
        self.bookings
            .iter()
            .filter(move |b| b.site == site && b.status == BookingStatus::Confirmed)
    }

    /// The most recent confirmed booking, shown as the pilgrim's active pass.
    pub fn current(&self) -> Option<&Booking> {
        self.bookings
            .iter()
            .rev()
            .find(|b| b.status == BookingStatus::Confirmed)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Booking> {
        self.bookings.iter()
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

/// `QR_SOMNATHTEMPLE_A156_20250920`
fn pass_code(site_name: &str, letter: char, number: u32, date: NaiveDate) -> String {
    let site: String = site_name
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_uppercase)
        .collect();
    format!("QR_{site}_{letter}{number}_{}", date.format("%Y%m%d"))
}
