use crate::process::months::column_for_month;
use crate::process::Observation;
use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, Date32Array, Float64Array, Int32Array, StringArray, UInt32Array},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use chrono::NaiveDate;
use std::sync::Arc;

/// Arrow schema of the tidy long table.
pub fn long_schema() -> Schema {
    Schema::new(vec![
        Field::new("sa", DataType::Utf8, false),
        Field::new("naics_sector", DataType::Utf8, false),
        Field::new("series", DataType::Utf8, false),
        Field::new("geo", DataType::Utf8, false),
        Field::new("year", DataType::Int32, false),
        Field::new("month_name", DataType::Utf8, false),
        Field::new("month_num", DataType::UInt32, false),
        Field::new("date", DataType::Date32, false),
        Field::new("count", DataType::Float64, false),
    ])
}

/// Days since 1970-01-01, the Date32 encoding.
pub fn date32_days(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    (date - epoch).num_days() as i32
}

/// Convert cleaned observations into a single RecordBatch.
pub fn observations_to_batch(obs: &[Observation]) -> Result<RecordBatch> {
    let text = |f: fn(&Observation) -> &str| -> ArrayRef {
        Arc::new(obs.iter().map(|o| Some(f(o))).collect::<StringArray>())
    };

    let columns: Vec<ArrayRef> = vec![
        text(|o| o.sa.as_str()),
        text(|o| o.naics_sector.as_str()),
        text(|o| o.series.as_str()),
        text(|o| o.geo.as_str()),
        Arc::new(Int32Array::from_iter_values(obs.iter().map(|o| o.year))),
        text(|o| column_for_month(o.month)),
        Arc::new(UInt32Array::from_iter_values(
            obs.iter().map(|o| o.month.number_from_month()),
        )),
        Arc::new(Date32Array::from_iter_values(
            obs.iter().map(|o| date32_days(o.date)),
        )),
        Arc::new(Float64Array::from_iter_values(obs.iter().map(|o| o.count))),
    ];

    RecordBatch::try_new(Arc::new(long_schema()), columns).context("building long-table batch")
}
