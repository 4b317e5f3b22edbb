//! Festival calendar and daily aarti timings.
//!
//! Both tables key temples by a short name ("Somnath", "Dwarka") that is
//! matched as a substring of the full site name, so "Dwarka" covers
//! "Dwarkadhish Temple".

use chrono::{NaiveDate, NaiveTime};

// ── Festivals ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Festival {
    pub date:  NaiveDate,
    pub name:  &'static str,
    /// Short temple names; empty means every temple.
    pub sites: &'static [&'static str],
    /// Expected crowd increase over a normal day, in percent.
    pub crowd_increase_pct: u32,
}

impl Festival {
    pub fn applies_to(&self, site_name: &str) -> bool {
        self.sites.is_empty() || self.sites.iter().any(|s| site_name.contains(s))
    }
}

impl std::fmt::Display for Festival {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} (+{}%, ", self.date, self.name, self.crowd_increase_pct)?;
        if self.sites.is_empty() {
            f.write_str("all temples)")
        } else {
            write!(f, "{})", self.sites.join(", "))
        }
    }
}

/// `(year, month, day, name, sites, increase %)`
const GUJARAT_FESTIVALS: [(i32, u32, u32, &str, &[&str], u32); 3] = [
    (2025, 10, 2,  "Dussehra",       &[],                   300),
    (2025, 10, 31, "Diwali",         &[],                   250),
    (2025, 11, 15, "Kartik Purnima", &["Somnath", "Dwarka"], 400),
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FestivalCalendar {
    festivals: Vec<Festival>,
}

impl FestivalCalendar {
    /// Festivals are kept sorted by date.
    pub fn new(mut festivals: Vec<Festival>) -> Self {
        festivals.sort_by_key(|f| f.date);
        Self { festivals }
    }

    pub fn gujarat() -> Self {
        Self::new(
            GUJARAT_FESTIVALS
                .iter()
                .filter_map(|&(y, m, d, name, sites, pct)| {
                    Some(Festival {
                        date: NaiveDate::from_ymd_opt(y, m, d)?,
                        name,
                        sites,
                        crowd_increase_pct: pct,
                    })
                })
                .collect(),
        )
    }

    /// Festivals on or after `from`, soonest first.
    pub fn upcoming(&self, from: NaiveDate) -> impl Iterator<Item = &Festival> + '_ {
        self.festivals.iter().filter(move |f| f.date >= from)
    }

    pub fn for_site<'a>(&'a self, site_name: &'a str) -> impl Iterator<Item = &'a Festival> + 'a {
        self.festivals.iter().filter(move |f| f.applies_to(site_name))
    }

    pub fn on(&self, date: NaiveDate) -> Option<&Festival> {
        self.festivals.iter().find(|f| f.date == date)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Festival> {
        self.festivals.iter()
    }

    pub fn len(&self) -> usize {
        self.festivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.festivals.is_empty()
    }
}

// ── Aarti timings ─────────────────────────────────────────────────────────────

/// `(temple, [(hour, minute)])`
const GUJARAT_AARTI: [(&str, [(u32, u32); 3]); 4] = [
    ("Somnath",     [(6, 0),  (12, 0),  (19, 0)]),
    ("Dwarkadhish", [(5, 30), (12, 30), (20, 30)]),
    ("Ambaji",      [(4, 0),  (12, 0),  (20, 0)]),
    ("Pavagadh",    [(5, 0),  (12, 30), (19, 30)]),
];

/// Daily aarti times per temple.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AartiSchedule {
    temples: Vec<(String, Vec<NaiveTime>)>,
}

impl AartiSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gujarat() -> Self {
        let mut schedule = Self::new();
        for (temple, times) in GUJARAT_AARTI {
            schedule.add(
                temple,
                times.iter().filter_map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            );
        }
        schedule
    }

    /// Replaces any times already recorded for `temple`.
    pub fn add(
        &mut self,
        temple: impl Into<String>,
        times: impl IntoIterator<Item = NaiveTime>,
    ) -> &mut Self {
        let temple = temple.into();
        let mut times: Vec<_> = times.into_iter().collect();
        times.sort();
        times.dedup();
        self.temples.retain(|(t, _)| *t != temple);
        self.temples.push((temple, times));
        self
    }

    pub fn for_site(&self, site_name: &str) -> Option<&[NaiveTime]> {
        self.temples
            .iter()
            .find(|(t, _)| site_name.contains(t.as_str()))
            .map(|(_, times)| times.as_slice())
    }

    /// First aarti at or after `time` today; `None` once the last has passed.
    pub fn next_after(&self, site_name: &str, time: NaiveTime) -> Option<NaiveTime> {
        self.for_site(site_name)?.iter().copied().find(|&t| t >= time)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NaiveTime])> + '_ {
        self.temples.iter().map(|(t, times)| (t.as_str(), times.as_slice()))
    }
}
