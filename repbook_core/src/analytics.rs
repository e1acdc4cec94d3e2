//! Analytics aggregation: chart-ready series over the persisted workout log.
//!
//! Read-only and stateless: every function takes the workout collection, a
//! metric, a range, and an explicit `now`, and produces display-ready
//! points. Passing `now` in keeps range arithmetic deterministic under test.
//!
//! Workout-metric series bucket by full calendar date, so two workouts a
//! year apart never share a "Mon D" label bucket; the label is presentation
//! only.

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde::Serialize;

use crate::metrics::{exercise_metric, workout_metric, ExerciseMetric, WorkoutMetric};
use crate::types::Workout;

/// A workout-metric series keeps at most this many day buckets
pub const MAX_SERIES_POINTS: usize = 30;

/// Time window for filtering workouts before aggregation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeRange {
    LastThreeMonths,
    Year,
    AllTime,
}

/// One chart point: a short display date and the aggregated value
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricPoint {
    pub date: String,
    pub value: f64,
}

/// Retain completed workouts whose date falls inside the range
pub fn filter_by_range(
    workouts: &[Workout],
    range: TimeRange,
    now: DateTime<Utc>,
) -> Vec<&Workout> {
    let cutoff = match range {
        TimeRange::LastThreeMonths => Some(now - Months::new(3)),
        TimeRange::Year => Some(now - Months::new(12)),
        TimeRange::AllTime => None,
    };

    workouts
        .iter()
        .filter(|w| w.completed)
        .filter(|w| cutoff.map_or(true, |c| w.date >= c))
        .collect()
}

/// Build a day-bucketed series of a workout-level metric.
///
/// Workouts sharing a calendar day sum into one bucket; buckets come back
/// in ascending date order, truncated to the most recent
/// [`MAX_SERIES_POINTS`].
pub fn workout_metric_series(
    workouts: &[Workout],
    metric: WorkoutMetric,
    range: TimeRange,
    now: DateTime<Utc>,
) -> Vec<MetricPoint> {
    let mut buckets: std::collections::BTreeMap<NaiveDate, f64> = std::collections::BTreeMap::new();

    for workout in filter_by_range(workouts, range, now) {
        *buckets.entry(workout.date.date_naive()).or_insert(0.0) +=
            workout_metric(workout, metric);
    }

    let points: Vec<MetricPoint> = buckets
        .into_iter()
        .map(|(day, value)| MetricPoint {
            date: day_label(day),
            value,
        })
        .collect();

    let skip = points.len().saturating_sub(MAX_SERIES_POINTS);
    points.into_iter().skip(skip).collect()
}

/// Build a per-workout series of an exercise-level metric.
///
/// Each in-range workout contributes at most one point: the metric over the
/// first exercise whose name matches exactly. Workouts without the exercise,
/// or where the metric comes out 0 or below (nothing countable was
/// completed), are skipped rather than plotted as zeroes. Values round to
/// 2 decimal places.
pub fn exercise_metric_series(
    workouts: &[Workout],
    exercise_name: &str,
    metric: ExerciseMetric,
    range: TimeRange,
    now: DateTime<Utc>,
) -> Vec<MetricPoint> {
    let mut rows: Vec<(DateTime<Utc>, f64)> = filter_by_range(workouts, range, now)
        .into_iter()
        .filter_map(|workout| {
            let exercise = workout.exercises.iter().find(|e| e.name == exercise_name)?;
            let value = exercise_metric(exercise, metric);
            (value > 0.0).then_some((workout.date, value))
        })
        .collect();

    rows.sort_by_key(|(date, _)| *date);

    rows.into_iter()
        .map(|(date, value)| MetricPoint {
            date: day_label(date.date_naive()),
            value: (value * 100.0).round() / 100.0,
        })
        .collect()
}

/// Sum a workout-level metric over completed workouts from the last 7 days
/// and render it with its unit
pub fn week_summary(workouts: &[Workout], metric: WorkoutMetric, now: DateTime<Utc>) -> String {
    let cutoff = now - Duration::days(7);
    let total: f64 = workouts
        .iter()
        .filter(|w| w.completed && w.date >= cutoff)
        .map(|w| workout_metric(w, metric))
        .sum();

    match metric {
        WorkoutMetric::Duration => {
            let minutes = total.round() as i64;
            format!("{}h {}m", minutes / 60, minutes % 60)
        }
        WorkoutMetric::Volume => format!("{} kg", format_quantity(total)),
        WorkoutMetric::Reps => format!("{} reps", format_quantity(total)),
    }
}

/// Short display label for a day, e.g. "Nov 15"
fn day_label(day: NaiveDate) -> String {
    day.format("%b %-d").to_string()
}

fn format_quantity(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
