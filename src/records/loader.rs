//! Parses a climate CSV source into a typed [`RecordSet`].
//!
//! The source has a header row with the fixed columns
//! `LOCALIDAD, FECHA, PRECIP, TMAX, TMIN` and optionally `LATITUD, LONGITUD`.
//! Every cell is read as text and coerced per field; a malformed cell becomes a
//! missing value and never fails the load.

use crate::records::error::RecordStoreError;
use crate::types::observation::Observation;
use crate::types::record_set::RecordSet;
use crate::types::target::Target;
use chrono::NaiveDate;
use log::{debug, info};
use polars::prelude::*;
use std::path::Path;

pub(crate) const LOCALITY_COLUMN: &str = "LOCALIDAD";
pub(crate) const DATE_COLUMN: &str = "FECHA";
pub(crate) const LATITUDE_COLUMN: &str = "LATITUD";
pub(crate) const LONGITUDE_COLUMN: &str = "LONGITUD";

/// Day/month/year, e.g. `17/08/2021`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

type Cells = Vec<Option<String>>;

/// Counts of cells that were present in the source but coerced to missing.
#[derive(Debug, Default)]
struct CoercionTally {
    dates: usize,
    numbers: usize,
    negative_precip: usize,
}

/// Loads and parses the climate source at `path`.
///
/// # Errors
///
/// Returns [`RecordStoreError::SourceUnavailable`] if the path is missing, is not a
/// regular file or cannot be opened,
/// [`RecordStoreError::SourceUnreadable`] if it is not CSV at all, and
/// [`RecordStoreError::MissingColumn`] if a mandatory column is absent.
/// Individual malformed cells never produce an error.
pub fn load_records(path: &Path) -> Result<RecordSet, RecordStoreError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| RecordStoreError::SourceUnavailable(path.to_path_buf(), e))?;
    if !metadata.is_file() {
        return Err(RecordStoreError::SourceUnavailable(
            path.to_path_buf(),
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }
    std::fs::File::open(path)
        .map_err(|e| RecordStoreError::SourceUnavailable(path.to_path_buf(), e))?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|options| {
            options
                .with_truncate_ragged_lines(true)
                .with_encoding(CsvEncoding::LossyUtf8)
        })
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| RecordStoreError::SourceUnreadable(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| RecordStoreError::SourceUnreadable(path.to_path_buf(), e))?;

    let records = records_from_frame(&df, path)?;
    info!(
        "Loaded {} observations for {} localities from {:?}",
        records.len(),
        records.localities().len(),
        path
    );
    Ok(records)
}

fn records_from_frame(df: &DataFrame, path: &Path) -> Result<RecordSet, RecordStoreError> {
    let localities = required_cells(df, path, LOCALITY_COLUMN)?;
    let dates = required_cells(df, path, DATE_COLUMN)?;
    let precip = required_cells(df, path, Target::Precip.column_name())?;
    let tmax = required_cells(df, path, Target::Tmax.column_name())?;
    let tmin = required_cells(df, path, Target::Tmin.column_name())?;
    let latitudes = optional_cells(df, path, LATITUDE_COLUMN)?;
    let longitudes = optional_cells(df, path, LONGITUDE_COLUMN)?;

    let mut tally = CoercionTally::default();
    let observations = (0..df.height())
        .map(|row| {
            let locality = cell_at(&localities, row).map(str::trim).unwrap_or_default();
            Observation::new(locality, parse_date(cell_at(&dates, row), &mut tally))
                .with_precip(parse_precip(cell_at(&precip, row), &mut tally))
                .with_tmax(parse_number(cell_at(&tmax, row), &mut tally))
                .with_tmin(parse_number(cell_at(&tmin, row), &mut tally))
                .with_coordinates(
                    parse_number(optional_cell_at(&latitudes, row), &mut tally),
                    parse_number(optional_cell_at(&longitudes, row), &mut tally),
                )
        })
        .collect();

    debug!(
        "Coerced to missing in {:?}: {} dates, {} numbers, {} negative precipitation values",
        path, tally.dates, tally.numbers, tally.negative_precip
    );
    Ok(RecordSet::from_observations(observations))
}

/// Finds a column by name, ignoring surrounding whitespace in the header.
fn find_column<'a>(df: &'a DataFrame, name: &str) -> Option<&'a Column> {
    df.get_columns()
        .iter()
        .find(|column| column.name().trim() == name)
}

fn required_cells(df: &DataFrame, path: &Path, name: &str) -> Result<Cells, RecordStoreError> {
    let column = find_column(df, name).ok_or_else(|| RecordStoreError::MissingColumn {
        path: path.to_path_buf(),
        column: name.to_string(),
    })?;
    text_cells(column).map_err(|e| RecordStoreError::SourceUnreadable(path.to_path_buf(), e))
}

fn optional_cells(
    df: &DataFrame,
    path: &Path,
    name: &str,
) -> Result<Option<Cells>, RecordStoreError> {
    find_column(df, name)
        .map(text_cells)
        .transpose()
        .map_err(|e| RecordStoreError::SourceUnreadable(path.to_path_buf(), e))
}

fn text_cells(column: &Column) -> Result<Cells, PolarsError> {
    let column = column.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|cell| cell.map(str::to_owned))
        .collect())
}

fn cell_at(cells: &Cells, row: usize) -> Option<&str> {
    cells.get(row).and_then(|c| c.as_deref())
}

fn optional_cell_at(cells: &Option<Cells>, row: usize) -> Option<&str> {
    cells.as_ref().and_then(|c| cell_at(c, row))
}

fn is_blank(cell: Option<&str>) -> bool {
    cell.map_or(true, |c| c.trim().is_empty())
}

fn parse_date(cell: Option<&str>, tally: &mut CoercionTally) -> Option<NaiveDate> {
    let date = cell.and_then(|c| NaiveDate::parse_from_str(c.trim(), DATE_FORMAT).ok());
    if date.is_none() && !is_blank(cell) {
        tally.dates += 1;
    }
    date
}

fn parse_number(cell: Option<&str>, tally: &mut CoercionTally) -> Option<f64> {
    let number = cell
        .and_then(|c| c.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite());
    if number.is_none() && !is_blank(cell) {
        tally.numbers += 1;
    }
    number
}

fn parse_precip(cell: Option<&str>, tally: &mut CoercionTally) -> Option<f64> {
    match parse_number(cell, tally) {
        Some(p) if p < 0.0 => {
            tally.negative_precip += 1;
            None
        }
        other => other,
    }
}
