//! Synthetic visit generation.
//!
//! Categorical fields, arrival times, derived flow timestamps and the
//! missing-data mask are each drawn from their own seeded generator (see
//! [`crate::seeded_rng`]), so a run is reproducible bit for bit from the
//! global seed and the record count.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp, Normal};

use crate::config::Config;
use crate::seeded_rng::make_rng;
use crate::visit::{Department, Outcome, TriageLevel, Visit, VisitType};

/// Number of doctors in the pool (`D001`..`D020`).
pub const DOCTOR_POOL_SIZE: u32 = 20;

// Registration desk: critical patients and the ER get a fast lane, the
// rest queue longer and occasionally hit a one-hour spike.
const FAST_REGISTRATION_MEAN_MIN: f64 = 5.0;
const SLOW_REGISTRATION_MEAN_MIN: f64 = 20.0;
const REGISTRATION_SPIKE_RATE: f64 = 0.05;
const REGISTRATION_SPIKE_MIN: f64 = 60.0;
const REGISTRATION_FLOOR_MIN: f64 = 1.0;

// Doctor queue: critical patients jump it.
const DOCTOR_WAIT_MEAN_MIN: f64 = 30.0;
const CRITICAL_DOCTOR_WAIT_MEAN_MIN: f64 = 5.0;
const DOCTOR_WAIT_FLOOR_MIN: f64 = 1.0;

// Consultation room.
const CONSULTATION_MEAN_MIN: f64 = 15.0;
const CONSULTATION_STD_MIN: f64 = 5.0;
const SPECIALIST_EXTRA_MIN: f64 = 10.0;
const CRITICAL_EXTRA_MIN: f64 = 20.0;
const CONSULTATION_FLOOR_MIN: f64 = 2.0;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// The three derived timestamps of a single visit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowTimes {
    pub registration_time: NaiveDateTime,
    pub consultation_start_time: NaiveDateTime,
    pub consultation_end_time: NaiveDateTime,
}

fn sample_exponential(rng: &mut ChaCha8Rng, mean_minutes: f64) -> f64 {
    Exp::new(1.0 / mean_minutes)
        .expect("exponential mean must be positive")
        .sample(rng)
}

/// Minutes between arrival and registration, floored at one minute.
pub fn registration_wait_minutes(
    rng: &mut ChaCha8Rng,
    department: Department,
    triage_level: TriageLevel,
) -> f64 {
    let wait = if triage_level == TriageLevel::Critical || department == Department::Er {
        sample_exponential(rng, FAST_REGISTRATION_MEAN_MIN)
    } else {
        let mut wait = sample_exponential(rng, SLOW_REGISTRATION_MEAN_MIN);
        if rng.gen_bool(REGISTRATION_SPIKE_RATE) {
            wait += REGISTRATION_SPIKE_MIN;
        }
        wait
    };
    wait.max(REGISTRATION_FLOOR_MIN)
}

/// Minutes between registration and the start of consultation, floored at
/// one minute. Critical patients jump the queue.
pub fn doctor_wait_minutes(rng: &mut ChaCha8Rng, triage_level: TriageLevel) -> f64 {
    let mean = if triage_level == TriageLevel::Critical {
        CRITICAL_DOCTOR_WAIT_MEAN_MIN
    } else {
        DOCTOR_WAIT_MEAN_MIN
    };
    sample_exponential(rng, mean).max(DOCTOR_WAIT_FLOOR_MIN)
}

/// Consultation length in minutes, floored at two minutes. Specialist
/// departments and critical cases run longer.
pub fn consultation_duration_minutes(
    rng: &mut ChaCha8Rng,
    department: Department,
    triage_level: TriageLevel,
) -> f64 {
    let normal = Normal::new(CONSULTATION_MEAN_MIN, CONSULTATION_STD_MIN)
        .expect("consultation std must be finite and positive");
    let mut duration = normal.sample(rng);
    if department.is_specialist() {
        duration += SPECIALIST_EXTRA_MIN;
    }
    if triage_level == TriageLevel::Critical {
        duration += CRITICAL_EXTRA_MIN;
    }
    duration.max(CONSULTATION_FLOOR_MIN)
}

fn minutes_after(time: NaiveDateTime, minutes: f64) -> NaiveDateTime {
    time + Duration::seconds((minutes * 60.0).round() as i64)
}

/// Derive the registration/consultation timestamps of one visit from its
/// categorical fields and arrival time. Pure given the generator state;
/// each offset is positive by construction, so the timestamps are ordered.
pub fn derive_flow(
    rng: &mut ChaCha8Rng,
    department: Department,
    triage_level: TriageLevel,
    arrival_time: NaiveDateTime,
) -> FlowTimes {
    let registration_time = minutes_after(
        arrival_time,
        registration_wait_minutes(rng, department, triage_level),
    );
    let consultation_start_time = minutes_after(
        registration_time,
        doctor_wait_minutes(rng, triage_level),
    );
    let consultation_end_time = minutes_after(
        consultation_start_time,
        consultation_duration_minutes(rng, department, triage_level),
    );
    FlowTimes {
        registration_time,
        consultation_start_time,
        consultation_end_time,
    }
}

/// Pick one value from a cumulative-probability table.
fn pick_weighted<T: Copy>(rng: &mut ChaCha8Rng, probabilities: &[(T, f64)]) -> T {
    let draw: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (value, probability) in probabilities {
        cumulative += probability;
        if draw < cumulative {
            return *value;
        }
    }
    // Rounding can leave the cumulative mass a hair under 1.
    probabilities
        .last()
        .expect("probability table must be non-empty")
        .0
}

fn draw_column<T: Copy>(
    global_seed: u64,
    block_id: &str,
    probabilities: &[(T, f64)],
    num_rows: usize,
) -> Vec<T> {
    let mut rng = make_rng(global_seed, block_id);
    (0..num_rows)
        .map(|_| pick_weighted(&mut rng, probabilities))
        .collect()
}

/// Arrival times drawn uniformly over the configured window at one-second
/// resolution, sorted ascending. The sort happens here, before any flow
/// derivation, so patient ids assigned afterwards ascend with arrival.
fn draw_arrival_times(config: &Config) -> Vec<NaiveDateTime> {
    let mut rng = make_rng(config.global_seed, "arrival");
    let start = config.start_date.and_time(NaiveTime::MIN);
    let window_seconds = config.window_days * SECONDS_PER_DAY;
    let mut arrivals: Vec<NaiveDateTime> = (0..config.num_records)
        .map(|_| start + Duration::seconds(rng.gen_range(0..window_seconds)))
        .collect();
    arrivals.sort();
    arrivals
}

/// Generate the full visit table. Deterministic in `config.global_seed`
/// and `config.num_records`; the missing-data injection has already been
/// applied to the result.
pub fn generate_visits(config: &Config) -> Vec<Visit> {
    let n = config.num_records;

    let departments = draw_column(
        config.global_seed,
        "department",
        &Department::DRAW_PROBABILITIES,
        n,
    );
    let triage_levels = draw_column(
        config.global_seed,
        "triage",
        &TriageLevel::DRAW_PROBABILITIES,
        n,
    );
    let visit_types = draw_column(
        config.global_seed,
        "visit-type",
        &VisitType::DRAW_PROBABILITIES,
        n,
    );
    let outcomes = draw_column(
        config.global_seed,
        "outcome",
        &Outcome::DRAW_PROBABILITIES,
        n,
    );

    let mut doctor_rng = make_rng(config.global_seed, "doctor");
    let doctor_ids: Vec<String> = (0..n)
        .map(|_| format!("D{:03}", doctor_rng.gen_range(1..=DOCTOR_POOL_SIZE)))
        .collect();

    let arrivals = draw_arrival_times(config);

    let mut flow_rng = make_rng(config.global_seed, "flow");
    let mut visits = Vec::with_capacity(n);
    for i in 0..n {
        let department = departments[i];
        let triage_level = triage_levels[i];
        let flow = derive_flow(&mut flow_rng, department, triage_level, arrivals[i]);
        visits.push(Visit {
            patient_id: format!("P{:05}", i + 1),
            department,
            triage_level,
            visit_type: visit_types[i],
            doctor_id: doctor_ids[i].clone(),
            outcome: outcomes[i],
            arrival_time: arrivals[i],
            registration_time: Some(flow.registration_time),
            consultation_start_time: flow.consultation_start_time,
            consultation_end_time: flow.consultation_end_time,
        });
    }

    let mut missing_rng = make_rng(config.global_seed, "missing-registration");
    inject_missing_registration(
        &mut visits,
        &mut missing_rng,
        config.missing_registration_rate,
    );

    visits
}

/// Null `registration_time` on an independent Bernoulli subset of rows,
/// simulating records the registration system never wrote. The ordering of
/// the remaining timestamps is deliberately not repaired; downstream
/// consumers must treat affected rows as incomplete. Returns the number of
/// rows nulled.
pub fn inject_missing_registration(
    visits: &mut [Visit],
    rng: &mut ChaCha8Rng,
    rate: f64,
) -> usize {
    let mut nulled = 0;
    for visit in visits.iter_mut() {
        if rng.gen_bool(rate) {
            visit.registration_time = None;
            nulled += 1;
        }
    }
    nulled
}
