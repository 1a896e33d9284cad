// src/process/melt.rs
use chrono::{Datelike, Month, NaiveDate};
use serde::Serialize;
use tracing::debug;

use super::date_parser::month_start;
use super::months::CALENDAR;
use super::utils::parse_count;
use super::{WideRow, WideTable};

/// One (wide row, month column) pair, still holding the raw cell.
#[derive(Debug, Clone, Copy)]
pub struct MeltedRow<'a> {
    pub row: &'a WideRow,
    pub month: Month,
    pub value: &'a str,
}

/// A cleaned month-observation: valid date, numeric count.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub sa: String,
    pub naics_sector: String,
    pub series: String,
    pub geo: String,
    pub year: i32,
    pub month: Month,
    pub date: NaiveDate,
    pub count: f64,
}

/// What cleaning kept and threw away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    pub melted: usize,
    pub kept: usize,
    pub dropped_bad_date: usize,
    pub dropped_bad_count: usize,
}

/// Wide → long. Emits all January rows first, then February, and so on,
/// each block in input row order. `12 * rows` output rows, always.
pub fn melt(table: &WideTable) -> Vec<MeltedRow<'_>> {
    CALENDAR
        .iter()
        .enumerate()
        .flat_map(|(idx, &month)| {
            table.rows.iter().map(move |row| MeltedRow {
                row,
                month,
                value: row.months[idx].as_str(),
            })
        })
        .collect()
}

/// Derive the date + numeric count, dropping rows where either fails.
pub fn clean(melted: &[MeltedRow<'_>]) -> (Vec<Observation>, CleanStats) {
    let mut stats = CleanStats {
        melted: melted.len(),
        ..Default::default()
    };
    let mut out = Vec::with_capacity(melted.len());

    for m in melted {
        let Some(date) = month_start(&m.row.year, m.month) else {
            stats.dropped_bad_date += 1;
            continue;
        };
        let Some(count) = parse_count(m.value) else {
            stats.dropped_bad_count += 1;
            continue;
        };
        out.push(Observation {
            sa: m.row.sa.clone(),
            naics_sector: m.row.naics_sector.clone(),
            series: m.row.series.clone(),
            geo: m.row.geo.clone(),
            year: date.year(),
            month: m.month,
            date,
            count,
        });
    }

    stats.kept = out.len();
    debug!(
        melted = stats.melted,
        kept = stats.kept,
        bad_date = stats.dropped_bad_date,
        bad_count = stats.dropped_bad_count,
        "cleaned melted rows"
    );
    (out, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_row(geo: &str, year: &str, months: [&str; 12]) -> WideRow {
        WideRow {
            sa: "A".into(),
            naics_sector: "TOTAL".into(),
            series: "BA_BA".into(),
            geo: geo.into(),
            year: year.into(),
            months: months.map(String::from),
        }
    }

    fn sample_table() -> WideTable {
        WideTable {
            headers: Vec::new(),
            rows: vec![
                wide_row(
                    "US",
                    "2020",
                    ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"],
                ),
                wide_row(
                    "CA",
                    "2021",
                    ["10", "", "30", "(NA)", "50", "60", "70", "80", "90", "100", "110", "x"],
                ),
                wide_row(
                    "TX",
                    "bogus",
                    ["1", "1", "1", "1", "1", "1", "1", "1", "1", "1", "1", "1"],
                ),
            ],
        }
    }

    #[test]
    fn melt_yields_twelve_rows_per_wide_row() {
        let table = sample_table();
        let melted = melt(&table);
        assert_eq!(melted.len(), 12 * table.rows.len());
    }

    #[test]
    fn melt_orders_by_month_then_input_row() {
        let table = sample_table();
        let melted = melt(&table);
        let first: Vec<(&str, Month)> = melted
            .iter()
            .take(4)
            .map(|m| (m.row.geo.as_str(), m.month))
            .collect();
        assert_eq!(
            first,
            vec![
                ("US", Month::January),
                ("CA", Month::January),
                ("TX", Month::January),
                ("US", Month::February),
            ]
        );
        assert_eq!(melted[35].month, Month::December);
        assert_eq!(melted[35].row.geo, "TX");
    }

    #[test]
    fn clean_drops_bad_dates_and_counts() {
        let table = sample_table();
        let melted = melt(&table);
        let (obs, stats) = clean(&melted);

        // TX has an unparseable year; CA has three unusable counts
        assert_eq!(stats.melted, 36);
        assert_eq!(stats.dropped_bad_date, 12);
        assert_eq!(stats.dropped_bad_count, 3);
        assert_eq!(stats.kept, 21);
        assert_eq!(obs.len(), 21);
        assert!(obs.iter().all(|o| o.geo != "TX"));

        let ca_mar = obs
            .iter()
            .find(|o| o.geo == "CA" && o.month == Month::March)
            .expect("CA march kept");
        assert_eq!(ca_mar.date, NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());
        assert_eq!(ca_mar.count, 30.0);
        assert_eq!(ca_mar.year, 2021);
    }
}
