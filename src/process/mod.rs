// src/process/mod.rs
use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;

use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};
use tracing::{error, info, warn};

pub mod convert;
pub mod date_parser;
pub mod melt;
pub mod months;
pub mod utils;
pub mod write;

pub use melt::{clean, melt, CleanStats, MeltedRow, Observation};

use months::MONTH_COLUMNS;
use utils::clean_str;

/// Identifier columns carried through the wide → long reshape.
pub const ID_COLUMNS: [&str; 5] = ["sa", "naics_sector", "series", "geo", "year"];

/// One wide BFS row: the id columns plus twelve raw month cells.
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    pub sa: String,
    pub naics_sector: String,
    pub series: String,
    pub geo: String,
    pub year: String,
    /// Raw cells, index-aligned with `MONTH_COLUMNS`.
    pub months: [String; 12],
}

#[derive(Debug, Default)]
pub struct WideTable {
    /// Column names as the file spells them.
    pub headers: Vec<String>,
    pub rows: Vec<WideRow>,
}

/// The cleaned long table for one run.
#[derive(Debug)]
pub struct Dataset {
    pub observations: Vec<Observation>,
    pub wide_rows: usize,
    pub stats: CleanStats,
}

/// Resolve each required column to its position in `headers`.
fn locate_columns(headers: &[String]) -> Result<([usize; 5], [usize; 12])> {
    let find = |name: &str| -> Result<usize> {
        match headers
            .iter()
            .position(|h| clean_str(h).eq_ignore_ascii_case(name))
        {
            Some(idx) => Ok(idx),
            None => bail!("required column `{}` missing from header {:?}", name, headers),
        }
    };

    let mut ids = [0usize; 5];
    for (slot, name) in ids.iter_mut().zip(ID_COLUMNS) {
        *slot = find(name)?;
    }
    let mut months = [0usize; 12];
    for (slot, name) in months.iter_mut().zip(MONTH_COLUMNS) {
        *slot = find(name)?;
    }
    Ok((ids, months))
}

/// Parse a BFS wide CSV from any reader. Short rows yield empty cells.
pub fn read_wide_table<R: Read>(reader: R) -> Result<WideTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("reading CSV header row")?
        .iter()
        .map(str::to_string)
        .collect();
    let (ids, months) = locate_columns(&headers)?;

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        let cell = |i: usize| record.get(i).map(clean_str).unwrap_or_default();
        rows.push(WideRow {
            sa: cell(ids[0]),
            naics_sector: cell(ids[1]),
            series: cell(ids[2]),
            geo: cell(ids[3]),
            year: cell(ids[4]),
            months: months.map(cell),
        });
    }

    Ok(WideTable { headers, rows })
}

/// Load, melt and clean the BFS CSV at `path`.
///
/// A missing file is reported on the console and yields `Ok(None)`; every other
/// failure is an error.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_and_prepare<P: AsRef<Path>>(path: P) -> Result<Option<Dataset>> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            error!(path = %path.display(), "input file not found");
            println!("Error: The file at {} was not found.", path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("opening {}", path.display()));
        }
    };
    let table = read_wide_table(BufReader::new(file))
        .with_context(|| format!("loading {}", path.display()))?;
    info!(rows = table.rows.len(), columns = table.headers.len(), "read wide table");

    let melted = melt(&table);
    let (observations, stats) = clean(&melted);
    if stats.kept < stats.melted {
        warn!(
            dropped = stats.melted - stats.kept,
            bad_date = stats.dropped_bad_date,
            bad_count = stats.dropped_bad_count,
            "dropped incomplete rows"
        );
    }
    info!(observations = observations.len(), "prepared long table");

    Ok(Some(Dataset {
        observations,
        wide_rows: table.rows.len(),
        stats,
    }))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::{Cursor, Write};
    use tempfile::{tempdir, NamedTempFile};
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    pub(crate) fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,bfs_analysis=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    pub(crate) const SAMPLE: &str = "\
sa,naics_sector,series,geo,year,jan,feb,mar,apr,may,jun,jul,aug,sep,oct,nov,dec
A,TOTAL,BA_BA,US,2022,100,110,120,130,140,150,160,170,180,190,200,210
A,TOTAL,BA_BA,US,2023,220,230,240,250,260,270,280,290,300,,,
U,TOTAL,BA_BA,US,2023,1,1,1,1,1,1,1,1,1,1,1,1
A,TOTAL,BF_BF4Q,CA,2022,30,30,30,30,30,30,30,30,30,30,30,30
A,TOTAL,BF_BF4Q,TX,2022,20,20,20,20,20,20,20,20,20,20,20,20
A,TOTAL,BF_BF4Q,NY,2022,10,10,10,10,10,10,10,10,10,10,10,(NA)
A,TOTAL,BF_BF4Q,US,2022,999,999,999,999,999,999,999,999,999,999,999,999
";

    #[test]
    fn reads_wide_table_with_reordered_and_extra_columns() -> Result<()> {
        let csv = "\
YEAR,geo,extra,series,sa,naics_sector,dec,nov,oct,sep,aug,jul,jun,may,apr,mar,feb,jan
2020,\"US\",x,BA_BA,A,TOTAL,12,11,10,9,8,7,6,5,4,3,2,1
2021,CA,y,BA_BA,A,TOTAL,1
";
        let table = read_wide_table(Cursor::new(csv))?;
        assert_eq!(table.rows.len(), 2);
        let us = &table.rows[0];
        assert_eq!(us.geo, "US");
        assert_eq!(us.year, "2020");
        assert_eq!(us.months[0], "1");
        assert_eq!(us.months[11], "12");

        // short row: dec present, every other month empty
        let ca = &table.rows[1];
        assert_eq!(ca.months[11], "1");
        assert!(ca.months[..11].iter().all(String::is_empty));
        Ok(())
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let csv = "sa,naics_sector,series,geo,year,jan,feb\nA,TOTAL,BA_BA,US,2020,1,2\n";
        let err = read_wide_table(Cursor::new(csv)).unwrap_err();
        assert!(err.to_string().contains("`mar`"), "got: {err}");
    }

    #[test]
    fn load_and_prepare_cleans_sample() -> Result<()> {
        init_test_logging();
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(SAMPLE.as_bytes())?;

        let ds = load_and_prepare(tmp.path())?.expect("dataset");
        assert_eq!(ds.wide_rows, 7);
        assert_eq!(ds.stats.melted, 84);
        // three empty months in 2023 + one (NA)
        assert_eq!(ds.stats.dropped_bad_count, 4);
        assert_eq!(ds.stats.dropped_bad_date, 0);
        assert_eq!(ds.observations.len(), 80);
        Ok(())
    }

    #[test]
    fn missing_file_yields_none() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let result = load_and_prepare(dir.path().join("nope.csv"))?;
        assert!(result.is_none());
        Ok(())
    }
}
