use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::process::Observation;

/// Selects the national time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NationalQuery {
    pub geo: String,
    pub sa: String,
    pub series: String,
    /// Restrict to one sector; `None` keeps every sector.
    pub naics_sector: Option<String>,
}

impl Default for NationalQuery {
    fn default() -> Self {
        Self {
            geo: "US".into(),
            sa: "A".into(),
            series: "BA_BA".into(),
            naics_sector: None,
        }
    }
}

impl NationalQuery {
    pub fn matches(&self, o: &Observation) -> bool {
        o.geo == self.geo
            && o.sa == self.sa
            && o.series == self.series
            && self
                .naics_sector
                .as_ref()
                .map_or(true, |s| &o.naics_sector == s)
    }
}

/// Selects the rows ranked by geography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateQuery {
    pub series: String,
    pub sa: String,
    /// Geography left out of the ranking (the national total).
    pub exclude_geo: String,
    pub naics_sector: Option<String>,
    pub top_n: usize,
}

impl Default for StateQuery {
    fn default() -> Self {
        Self {
            series: "BF_BF4Q".into(),
            sa: "A".into(),
            exclude_geo: "US".into(),
            naics_sector: None,
            top_n: 10,
        }
    }
}

impl StateQuery {
    pub fn matches(&self, o: &Observation) -> bool {
        o.series == self.series
            && o.sa == self.sa
            && o.geo != self.exclude_geo
            && self
                .naics_sector
                .as_ref()
                .map_or(true, |s| &o.naics_sector == s)
    }
}

/// Chart geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub line_size: (u32, u32),
    pub bar_size: (u32, u32),
}

impl Default for ChartConfig {
    fn default() -> Self {
        // 12x6in and 10x6in at 100 dpi
        Self {
            line_size: (1200, 600),
            bar_size: (1000, 600),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub national: NationalQuery,
    pub states: StateQuery,
    pub charts: ChartConfig,
}

/// Load a JSON report config. Any field left out keeps its default.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ReportConfig> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: ReportConfig = serde_json::from_str(&content)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}
