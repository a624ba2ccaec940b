//! xsmall: smallest end-to-end run of the pdp simulation kernel.
//!
//! Generates a pickup-and-delivery scenario (Poisson arrivals over four
//! hours in a 5 km square), replays it through a one-minute-tick simulator,
//! and prints the resulting event log as CSV on stdout.  Progress goes to
//! stderr through `tracing`; set `RUST_LOG=debug` for per-registration
//! detail.

mod replay;

use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::info;

use pdp_core::TimeUnit;
use pdp_scenario::{
    DefaultParcelGenerator, EuclideanTravelModel, LocationsBuilder, ParcelGenerator, time_series,
};
use pdp_sim::{SimObject, SimulatorBuilder};

use replay::{EventLog, ParcelModel, ScenarioPlayer};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64 = 123;
const SCENARIO_LENGTH: u64 = 4 * 60 * 60 * 1000; // arrivals within 4 h
const END_TIME:        u64 = 8 * 60 * 60 * 1000; // every parcel delivered by 8 h
const EXPECTED_ORDERS: f64 = 20.0;
const SPEED_KMH:       f64 = 50.0;
const TICK_MINUTES:    u64 = 1;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    // 1. Scenario.
    let generator = DefaultParcelGenerator::builder()
        .arrival_times(time_series::homogeneous_poisson(
            SCENARIO_LENGTH as f64,
            EXPECTED_ORDERS,
        )?)
        .locations(LocationsBuilder::new().square(5.0).uniform()?)
        .build();
    let travel = EuclideanTravelModel::new(SPEED_KMH)?;
    let events = generator.generate(SEED, &travel, END_TIME)?;
    info!(
        parcels = events.len(),
        min = %generator.min(),
        max = %generator.max(),
        "scenario generated"
    );

    // 2. Simulator with the parcel model.
    let log = EventLog::default();
    let sim = SimulatorBuilder::new()
        .seed(SEED)
        .tick_length(TICK_MINUTES)
        .time_unit(TimeUnit::Minute)
        .add_model({
            let log = Arc::clone(&log);
            move || Arc::new(ParcelModel::new(log))
        })
        .build()?;

    // 3. The player drives arrivals and stops the run at the horizon.
    let player: Arc<dyn SimObject> = Arc::new(ScenarioPlayer::new(events, END_TIME));
    sim.register(player)?;

    // 4. Run to completion on this thread.
    let t0 = Instant::now();
    sim.start()?;
    info!(
        sim_time = sim.current_time(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "run finished"
    );

    // 5. Event table.
    let mut rows = log.lock().unwrap_or_else(|e| e.into_inner()).clone();
    rows.sort_by_key(|r| (r.time, r.parcel));

    let mut out = csv::Writer::from_writer(io::stdout().lock());
    out.write_record(["time_ms", "parcel", "event"])?;
    for row in &rows {
        out.write_record(&[row.time.to_string(), row.parcel.to_string(), row.event.to_string()])?;
    }
    out.flush()?;

    Ok(())
}
