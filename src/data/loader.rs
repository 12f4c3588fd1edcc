use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{Track, TrackDataset};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("expected a top-level JSON array of track records")]
    JsonShape,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

pub type LoadResult<T> = Result<T, LoadError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a track dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – one track per row, header row with column names
/// * `.json`    – records-oriented array (`df.to_json(orient='records')`)
/// * `.parquet` – flat scalar columns, one track per row
pub fn load_file(path: &Path) -> LoadResult<TrackDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Release-date parsing
// ---------------------------------------------------------------------------

/// Derive a year from a `release_date` cell.
///
/// Accepts full `YYYY-MM-DD` dates as well as the truncated `YYYY-MM` and
/// `YYYY` forms that appear in track exports. Anything else is a parse
/// failure and drops the row.
pub fn parse_release_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.year());
    }
    let lead = raw.split('-').next()?;
    if lead.len() == 4 {
        if let Ok(year) = lead.parse::<i32>() {
            return Some(year);
        }
    }
    None
}

/// Parse a numeric cell; missing or malformed cells become NaN so the row
/// survives but drops out of aggregations over that column.
fn numeric_cell(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn column_index(headers: &[String], name: &'static str) -> LoadResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

fn load_csv(path: &Path) -> LoadResult<TrackDataset> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let name_idx = column_index(&headers, "name")?;
    let artists_idx = column_index(&headers, "artists")?;
    let date_idx = column_index(&headers, "release_date")?;
    let popularity_idx = column_index(&headers, "popularity")?;
    let danceability_idx = column_index(&headers, "danceability")?;
    let energy_idx = column_index(&headers, "energy")?;
    let valence_idx = column_index(&headers, "valence")?;
    let acousticness_idx = column_index(&headers, "acousticness")?;
    let tempo_idx = column_index(&headers, "tempo")?;
    let duration_idx = column_index(&headers, "duration_ms")?;
    let genre_idx = headers.iter().position(|h| h == "genre");

    let mut tracks = Vec::new();
    let mut dropped = 0usize;

    for result in reader.records() {
        let record = result?;

        let Some(year) = record.get(date_idx).and_then(parse_release_year) else {
            dropped += 1;
            continue;
        };

        tracks.push(Track {
            name: record.get(name_idx).unwrap_or("").to_string(),
            artists: record.get(artists_idx).unwrap_or("").to_string(),
            year,
            popularity: numeric_cell(record.get(popularity_idx)),
            danceability: numeric_cell(record.get(danceability_idx)),
            energy: numeric_cell(record.get(energy_idx)),
            valence: numeric_cell(record.get(valence_idx)),
            acousticness: numeric_cell(record.get(acousticness_idx)),
            tempo: numeric_cell(record.get(tempo_idx)),
            duration_ms: numeric_cell(record.get(duration_idx)),
            genre: genre_idx
                .and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        });
    }

    Ok(TrackDataset {
        tracks,
        has_genre: genre_idx.is_some(),
        dropped_rows: dropped,
    })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// The `artists` field is a plain string in some exports and a string array
/// in others; arrays are joined for display.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArtistsField {
    One(String),
    Many(Vec<String>),
}

impl ArtistsField {
    fn join(self) -> String {
        match self {
            ArtistsField::One(s) => s,
            ArtistsField::Many(v) => v.join(", "),
        }
    }
}

impl Default for ArtistsField {
    fn default() -> Self {
        ArtistsField::One(String::new())
    }
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    #[serde(default)]
    name: String,
    #[serde(default)]
    artists: ArtistsField,
    #[serde(default)]
    release_date: String,
    popularity: Option<f64>,
    danceability: Option<f64>,
    energy: Option<f64>,
    valence: Option<f64>,
    acousticness: Option<f64>,
    tempo: Option<f64>,
    duration_ms: Option<f64>,
    genre: Option<String>,
}

fn load_json(path: &Path) -> LoadResult<TrackDataset> {
    let text = std::fs::read_to_string(path)?;

    // Shape check first so a non-array file reports a clear error instead
    // of an opaque serde type mismatch.
    let root: serde_json::Value = serde_json::from_str(&text)?;
    if !root.is_array() {
        return Err(LoadError::JsonShape);
    }
    let raw: Vec<RawTrack> = serde_json::from_value(root)?;

    let has_genre = raw.iter().any(|r| r.genre.is_some());
    let mut tracks = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;

    for record in raw {
        let Some(year) = parse_release_year(&record.release_date) else {
            dropped += 1;
            continue;
        };
        tracks.push(Track {
            name: record.name,
            artists: record.artists.join(),
            year,
            popularity: record.popularity.unwrap_or(f64::NAN),
            danceability: record.danceability.unwrap_or(f64::NAN),
            energy: record.energy.unwrap_or(f64::NAN),
            valence: record.valence.unwrap_or(f64::NAN),
            acousticness: record.acousticness.unwrap_or(f64::NAN),
            tempo: record.tempo.unwrap_or(f64::NAN),
            duration_ms: record.duration_ms.unwrap_or(f64::NAN),
            genre: record.genre.filter(|g| !g.trim().is_empty()),
        });
    }

    Ok(TrackDataset {
        tracks,
        has_genre,
        dropped_rows: dropped,
    })
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet export with flat scalar columns.
///
/// Works with files written by both Pandas (`df.to_parquet()`) and Polars
/// (`df.write_parquet()`).
fn load_parquet(path: &Path) -> LoadResult<TrackDataset> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let mut tracks = Vec::new();
    let mut dropped = 0usize;
    let mut has_genre = false;

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let index_of = |name: &'static str| {
            schema
                .index_of(name)
                .map_err(|_| LoadError::MissingColumn(name.to_string()))
        };
        let name_col = batch.column(index_of("name")?);
        let artists_col = batch.column(index_of("artists")?);
        let date_col = batch.column(index_of("release_date")?);
        let popularity_col = batch.column(index_of("popularity")?);
        let danceability_col = batch.column(index_of("danceability")?);
        let energy_col = batch.column(index_of("energy")?);
        let valence_col = batch.column(index_of("valence")?);
        let acousticness_col = batch.column(index_of("acousticness")?);
        let tempo_col = batch.column(index_of("tempo")?);
        let duration_col = batch.column(index_of("duration_ms")?);
        let genre_col = schema.index_of("genre").ok().map(|i| batch.column(i));
        has_genre |= genre_col.is_some();

        for row in 0..batch.num_rows() {
            let date = string_at(date_col, row).unwrap_or_default();
            let Some(year) = parse_release_year(&date) else {
                dropped += 1;
                continue;
            };

            tracks.push(Track {
                name: string_at(name_col, row).unwrap_or_default(),
                artists: string_at(artists_col, row).unwrap_or_default(),
                year,
                popularity: float_at(popularity_col, row),
                danceability: float_at(danceability_col, row),
                energy: float_at(energy_col, row),
                valence: float_at(valence_col, row),
                acousticness: float_at(acousticness_col, row),
                tempo: float_at(tempo_col, row),
                duration_ms: float_at(duration_col, row),
                genre: genre_col
                    .and_then(|c| string_at(c, row))
                    .filter(|g| !g.trim().is_empty()),
            });
        }
    }

    Ok(TrackDataset {
        tracks,
        has_genre,
        dropped_rows: dropped,
    })
}

// -- Arrow helpers --

/// Read a string cell, accepting Utf8 and LargeUtf8 columns.
fn string_at(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|arr| arr.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        _ => None,
    }
}

/// Read a numeric cell as `f64`; nulls and non-numeric columns become NaN.
fn float_at(col: &Arc<dyn Array>, row: usize) -> f64 {
    if col.is_null(row) {
        return f64::NAN;
    }
    match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|arr| arr.value(row))
            .unwrap_or(f64::NAN),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|arr| arr.value(row) as f64)
            .unwrap_or(f64::NAN),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|arr| arr.value(row) as f64)
            .unwrap_or(f64::NAN),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|arr| arr.value(row) as f64)
            .unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}
