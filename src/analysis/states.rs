use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::StateQuery;
use crate::process::Observation;

/// Mean monthly count for one geography.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateAverage {
    pub geo: String,
    pub mean: f64,
    pub observations: usize,
}

impl fmt::Display for StateAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{: <6} {:>14.6}", self.geo, self.mean)
    }
}

/// Group matching rows by geography, average, and keep the `top_n` highest.
/// Ties go to the lower geography code. `None` when nothing matches or
/// `top_n` is zero.
pub fn state_performance(obs: &[Observation], query: &StateQuery) -> Option<Vec<StateAverage>> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for o in obs.iter().filter(|o| query.matches(o)) {
        let slot = groups.entry(o.geo.as_str()).or_insert((0.0, 0));
        slot.0 += o.count;
        slot.1 += 1;
    }
    if groups.is_empty() || query.top_n == 0 {
        return None;
    }

    let mut ranked: Vec<StateAverage> = groups
        .into_iter()
        .map(|(geo, (sum, n))| StateAverage {
            geo: geo.to_string(),
            mean: sum / n as f64,
            observations: n,
        })
        .collect();
    // stable sort keeps the BTreeMap's geo order among equal means
    ranked.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    ranked.truncate(query.top_n);
    Some(ranked)
}
