use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use super::describe::{describe, Summary};
use crate::config::NationalQuery;
use crate::process::Observation;

/// The national series: one averaged point per month, plus a summary of
/// every matching count.
#[derive(Debug, Clone, Serialize)]
pub struct NationalTrend {
    pub points: Vec<(NaiveDate, f64)>,
    pub summary: Summary,
}

/// Filter to the national series and summarise it. `None` when nothing matches.
pub fn national_trend(obs: &[Observation], query: &NationalQuery) -> Option<NationalTrend> {
    let matching: Vec<&Observation> = obs.iter().filter(|o| query.matches(o)).collect();
    let counts: Vec<f64> = matching.iter().map(|o| o.count).collect();
    let summary = describe(&counts)?;

    // several sectors can share a date; the line follows their mean
    let mut by_date: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for o in &matching {
        let slot = by_date.entry(o.date).or_insert((0.0, 0));
        slot.0 += o.count;
        slot.1 += 1;
    }
    let points: Vec<(NaiveDate, f64)> = by_date
        .into_iter()
        .map(|(date, (sum, n))| (date, sum / n as f64))
        .collect();
    debug!(rows = matching.len(), points = points.len(), "national series");

    Some(NationalTrend { points, summary })
}
