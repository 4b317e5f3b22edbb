//! `temples`: live crowd metrics for four Gujarat pilgrimage temples.
//!
//! Builds the metric store, starts the refresh clock with snapshot and
//! forecast observers, exercises the operator controls half-way through
//! (pause, manual refresh, SOS, booking, resume) and prints a report.
//!
//! Run with:
//!   cargo run -p temples -- --interval-ms 500 --ticks 10 --seed 42
//!   cargo run -p temples -- --config demos/temples/crowdwatch.toml

mod config;
mod sites;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cw_clock::{ClockHandle, ClockState, RefreshObserver, SimulationClock, shared};
use cw_core::{SimRng, StatusTier, Tick};
use cw_desk::{
    AartiSchedule, AlertLog, BookingBook, CrowdForecast, DeskReport, FestivalCalendar,
    ForecastObserver, TimeSlot,
};
use cw_output::{CsvWriter, OutputWriter, SnapshotObserver, SqliteWriter};
use cw_store::{MetricStore, MetricStoreBuilder, RefreshProfile, load_sites_csv};

use config::AppConfig;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Csv,
    Sqlite,
}

/// Live crowd metrics simulator for pilgrimage sites.
#[derive(Parser)]
#[command(name = "temples")]
struct Cli {
    /// TOML config file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds between refreshes.
    #[arg(long)]
    interval_ms: Option<u64>,

    /// RNG seed.  Omit to seed from entropy (the seed is logged).
    #[arg(long)]
    seed: Option<u64>,

    /// Timed refreshes to run before stopping.
    #[arg(long)]
    ticks: Option<u64>,

    /// Write snapshot files into this directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Load sites from a CSV file instead of the built-in temples.
    #[arg(long)]
    sites: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
}

/// Logs the store summary after every refresh.
struct ProgressLog;

impl RefreshObserver for ProgressLog {
    fn on_refresh(&mut self, tick: Tick, store: &MetricStore) {
        info!(%tick, "{}", store.summary());
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "temples=info,cw_clock=info,cw_store=info,cw_desk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    // ── Store ──────────────────────────────────────────────────────────────
    let specs = match &config.sites {
        Some(path) => load_sites_csv(path)
            .with_context(|| format!("loading sites from {}", path.display()))?,
        None => sites::gujarat_temples(),
    };
    let builder = match config.simulator.seed {
        Some(seed) => MetricStoreBuilder::new(seed),
        None => MetricStoreBuilder::from_entropy(),
    };
    let seed = builder.seed();
    let store = builder.sites(specs).build()?;
    let Some(flagship) = store.all().first().map(|s| s.id()) else {
        bail!("no sites configured");
    };
    let store = shared(store);

    // ── Observers ──────────────────────────────────────────────────────────
    let forecast = Arc::new(Mutex::new(ForecastObserver::new(
        CrowdForecast::reference_day(),
        flagship,
    )));
    let mut clock = SimulationClock::new(store.clone())
        .thread_name("temples-clock")
        .observer(ProgressLog)
        .observer(forecast.clone());

    let mut output: Option<Arc<Mutex<SnapshotObserver<Box<dyn OutputWriter>>>>> = None;
    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output dir {}", dir.display()))?;
        let writer: Box<dyn OutputWriter> = match cli.format {
            Format::Csv => Box::new(CsvWriter::new(dir)?),
            Format::Sqlite => Box::new(SqliteWriter::new(dir)?),
        };
        let obs = Arc::new(Mutex::new(SnapshotObserver::from_config(writer, &config.simulator)));
        clock = clock.observer(obs.clone());
        output = Some(obs);
    }

    // ── Run ────────────────────────────────────────────────────────────────
    let mut handle = clock.start_with_config(&config.simulator)?;
    let half = config.ticks / 2;
    wait_for_ticks(&handle, half, config.simulator.interval());

    let mut alerts = AlertLog::new();
    let mut bookings = BookingBook::new();
    operator_break(&handle, &store, &mut alerts, &mut bookings, seed)?;

    // The forced refresh counts as a tick, so aim one further.
    wait_for_ticks(&handle, config.ticks + 1, config.simulator.interval());
    handle.stop();

    // ── Report ─────────────────────────────────────────────────────────────
    let store = store.read().unwrap_or_else(PoisonError::into_inner);
    print_report(&store, &alerts, &bookings);

    let forecast = forecast.lock().unwrap_or_else(PoisonError::into_inner);
    println!(
        "\nForecast mean absolute error for {}: {:.0} visitors",
        store.get(flagship)?.name(),
        forecast.forecast().mean_abs_error()
    );

    if let Some(obs) = output {
        if let Some(e) = obs.lock().unwrap_or_else(PoisonError::into_inner).take_error() {
            warn!(error = %e, "snapshot output incomplete");
        }
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(ms) = cli.interval_ms {
        config.simulator.interval_ms = ms;
    }
    if cli.seed.is_some() {
        config.simulator.seed = cli.seed;
    }
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }
    if cli.output_dir.is_some() {
        config.output_dir = cli.output_dir.clone();
    }
    if cli.sites.is_some() {
        config.sites = cli.sites.clone();
    }
    config.simulator.validate()?;
    Ok(config)
}

fn wait_for_ticks(handle: &ClockHandle, target: u64, interval: Duration) {
    let poll = (interval / 4).clamp(Duration::from_millis(1), Duration::from_millis(100));
    while handle.ticks() < target && handle.state() != ClockState::Stopped {
        thread::sleep(poll);
    }
}

/// Pause the clock, act as a desk operator, then resume.
fn operator_break(
    handle:   &ClockHandle,
    store:    &cw_clock::SharedStore,
    alerts:   &mut AlertLog,
    bookings: &mut BookingBook,
    seed:     u64,
) -> Result<()> {
    handle.pause();
    info!(ticks = handle.ticks(), "operator break");

    if let Some(tick) = handle.force_refresh(RefreshProfile::MANUAL) {
        info!(%tick, "manual refresh");
    }

    {
        let store = store.read().unwrap_or_else(PoisonError::into_inner);
        for site in store.by_tier(StatusTier::Crowded) {
            alerts.record(cw_desk::Alert {
                id:         cw_core::ids::AlertId::INVALID,
                site:       site.name().to_owned(),
                kind:       "crowd_surge".to_owned(),
                severity:   cw_desk::Severity::Medium,
                location:   "Main Entry Gate".to_owned(),
                message:    format!("Crowd density at {}% of capacity", site.load_pct()),
                raised_at:  Local::now(),
                status:     cw_desk::AlertStatus::Monitoring,
                responders: vec!["Crowd Control Team".to_owned()],
            });
        }

        let nearest = store
            .nearest(sites::PILGRIM_POSITION)
            .or_else(|| store.all().first())
            .context("store has no sites")?;
        let mut rng = SimRng::new(seed);
        let slot: TimeSlot = "11:00-12:00".parse()?;
        let booking = bookings.book(nearest, Local::now().date_naive(), slot, &mut rng);
        info!(
            site = %booking.site_name,
            queue = %booking.queue_number,
            pass = %booking.pass_code,
            "booked nearest temple"
        );
    }

    let sos = alerts.raise_sos("Main Darshan Queue").id;
    alerts.acknowledge(sos)?;
    alerts.broadcast("", "Evening aarti at 19:00; use the east gate")?;

    handle.resume();
    Ok(())
}

fn print_report(store: &MetricStore, alerts: &AlertLog, bookings: &BookingBook) {
    println!(
        "\n{:<22} {:>11} {:>6} {:>9} {:>6} {:>8}",
        "Site", "Visitors", "Load", "Status", "Wait", "Parking"
    );
    for s in store {
        println!(
            "{:<22} {:>5}/{:<5} {:>5}% {:>9} {:>4}m {:>4}/{:<3}",
            s.name(),
            s.occupancy(),
            s.capacity(),
            s.load_pct(),
            s.tier(),
            s.wait_minutes(),
            s.parking_available(),
            s.parking_capacity(),
        );
    }

    println!("\n{}", DeskReport::generate(store, alerts));

    let now = Local::now();
    let aarti = AartiSchedule::gujarat();
    println!("\nNext aarti:");
    for s in store {
        match aarti.next_after(s.name(), now.time()) {
            Some(t) => println!("  {:<22} {}", s.name(), t.format("%H:%M")),
            None => println!("  {:<22} none left today", s.name()),
        }
    }

    let festivals = FestivalCalendar::gujarat();
    let mut upcoming = festivals.upcoming(now.date_naive()).peekable();
    if upcoming.peek().is_some() {
        println!("\nUpcoming festivals:");
        upcoming.for_each(|f| println!("  {f}"));
    }

    println!("\nAlerts ({} open of {}):", alerts.active().count(), alerts.len());
    for a in alerts.iter() {
        println!("  [{:<6}] {:<13} {} - {}", a.severity, a.status, a.site, a.message);
    }

    if let Some(b) = bookings.current() {
        println!(
            "\nActive booking: {} on {} {} queue {} (~{} min), pass {}",
            b.site_name, b.date, b.slot, b.queue_number, b.estimated_wait_minutes, b.pass_code
        );
    }
}
