use anyhow::{Context, Result};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::{fs, fs::File, path::Path};
use tracing::info;

use super::convert::observations_to_batch;
use super::Observation;

/// Write the cleaned long table as one Snappy-compressed Parquet file.
///
/// Writes to `<path>.tmp` first, then renames over `path`. Returns the row count.
pub fn write_long_parquet<P: AsRef<Path>>(obs: &[Observation], path: P) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {:?}", parent))?;
    }

    let batch = observations_to_batch(obs)?;
    let tmp_path = path.with_extension("parquet.tmp");
    let file =
        File::create(&tmp_path).with_context(|| format!("creating parquet file {:?}", &tmp_path))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .context("creating Arrow writer for long table")?;
    writer.write(&batch).context("writing long-table batch")?;
    writer.close().context("closing long-table writer")?;

    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;
    info!(rows = batch.num_rows(), path = %path.display(), "wrote parquet");
    Ok(batch.num_rows())
}
