use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::method::ClusterMethod;
use super::model::{CellValue, FEATURE_COLUMNS, GENRES_COLUMN, MethodLabels, MusicDataset, Song};

/// Relative path the dashboard reads on startup.
pub const DEFAULT_DATA_PATH: &str = "amazon_music_clusters_all_methods.csv";

/// File extension [`load_file`] does not know how to parse.
#[derive(Debug, Error)]
#[error("unsupported file extension: .{0}")]
pub struct UnsupportedFormat(pub String);

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset from [`DEFAULT_DATA_PATH`], at most once per process.
///
/// The first outcome — success or failure — is cached until process exit; a
/// file edited on disk afterwards is not picked up.
pub fn load_cached() -> Result<&'static MusicDataset> {
    static CACHE: OnceLock<Result<MusicDataset, String>> = OnceLock::new();

    let outcome = CACHE.get_or_init(|| {
        load_file(Path::new(DEFAULT_DATA_PATH))
            .with_context(|| format!("loading {DEFAULT_DATA_PATH}"))
            .map_err(|e| format!("{e:#}"))
    });
    match outcome {
        Ok(dataset) => Ok(dataset),
        Err(msg) => bail!("{msg}"),
    }
}

/// Load a cluster table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one song per line (the upstream default)
/// * `.parquet` – flat columns, as written by `df.to_parquet()`
/// * `.json`    – `[{ "danceability": 0.71, ... }, ...]` records
pub fn load_file(path: &Path) -> Result<MusicDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        other => Err(UnsupportedFormat(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// Row assembly (shared by all formats)
// ---------------------------------------------------------------------------

fn check_required_columns(columns: &[String]) -> Result<()> {
    for required in FEATURE_COLUMNS.into_iter().chain([GENRES_COLUMN]) {
        if !columns.iter().any(|c| c == required) {
            bail!("source table is missing the '{required}' column");
        }
    }
    Ok(())
}

/// Assemble a [`Song`] from one row of dynamically-typed cells.
fn song_from_fields(mut fields: BTreeMap<String, CellValue>, row: usize) -> Result<Song> {
    let mut feature = |name: &str| -> Result<f64> {
        fields
            .remove(name)
            .and_then(|v| v.as_f64())
            .with_context(|| format!("row {row}: missing or non-numeric '{name}'"))
    };
    let danceability = feature("danceability")?;
    let energy = feature("energy")?;
    let valence = feature("valence")?;
    let tempo = feature("tempo")?;

    let genre = match fields.remove(GENRES_COLUMN) {
        Some(CellValue::String(s)) => s,
        Some(CellValue::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    let labels = MethodLabels {
        kmeans: take_label(&mut fields, ClusterMethod::KMeans, row)?,
        dbscan: take_label(&mut fields, ClusterMethod::Dbscan, row)?,
        hierarchical: take_label(&mut fields, ClusterMethod::Hierarchical, row)?,
    };

    Ok(Song {
        danceability,
        energy,
        valence,
        tempo,
        genre,
        labels,
        extra: fields,
    })
}

/// Pull one method's label out of the row.
///
/// Upstream pandas writes label columns as floats once NaN appears ("3.0");
/// coercion truncates exactly like `astype(int)`.
fn take_label(
    fields: &mut BTreeMap<String, CellValue>,
    method: ClusterMethod,
    row: usize,
) -> Result<Option<i64>> {
    match fields.remove(method.label_column()) {
        None | Some(CellValue::Null) => Ok(None),
        Some(CellValue::Integer(id)) => Ok(Some(id)),
        Some(CellValue::Float(f)) if f.is_finite() => Ok(Some(f as i64)),
        Some(other) => bail!(
            "row {row}: invalid '{}' label: {other:?}",
            method.label_column()
        ),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one song per line. Label cells
/// left empty mean the method did not assign that row.
fn load_csv(path: &Path) -> Result<MusicDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    check_required_columns(&columns)?;

    let mut songs = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut fields = BTreeMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(name) = columns.get(col_idx) {
                fields.insert(name.clone(), guess_cell_type(value));
            }
        }
        songs.push(song_from_fields(fields, row_no)?);
    }

    Ok(MusicDataset { songs, columns })
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "danceability": 0.71,
///     "energy": 0.62,
///     "valence": 0.54,
///     "tempo": 118.0,
///     "genres": "pop",
///     "cluster": 2,
///     "cluster_dbscan": null,
///     "cluster_hc": 1
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<MusicDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    check_required_columns(&columns)?;

    let mut songs = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        // Checked above.
        let obj = rec.as_object().with_context(|| format!("row {i}"))?;
        let fields = obj
            .iter()
            .map(|(k, v)| (k.clone(), json_to_cell(v)))
            .collect();
        songs.push(song_from_fields(fields, i)?);
    }

    Ok(MusicDataset { songs, columns })
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet cluster table.
///
/// Expected schema: one flat column per source column (strings, ints, floats,
/// bools); label columns are nullable. Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<MusicDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    check_required_columns(&columns)?;

    let reader = builder.build().context("building parquet reader")?;

    let mut songs = Vec::new();
    let mut row_base = 0usize;
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let mut fields = BTreeMap::new();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                fields.insert(field.name().clone(), extract_cell(batch.column(col_idx), row));
            }
            songs.push(song_from_fields(fields, row_base + row)?);
        }
        row_base += batch.num_rows();
    }

    Ok(MusicDataset { songs, columns })
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
                CellValue::String(s.value(row).to_string())
            } else {
                // LargeStringArray
                let s = col.as_string::<i64>();
                CellValue::String(s.value(row).to_string())
            }
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            CellValue::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            CellValue::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            CellValue::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            CellValue::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            CellValue::Bool(arr.value(row))
        }
        _ => CellValue::String(format!("{:?}", col.data_type())),
    }
}

// ---------------------------------------------------------------------------
