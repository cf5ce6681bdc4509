use std::collections::BTreeMap;
use std::fmt;

use super::method::ClusterMethod;

/// The four audio features every summary works over, in display order.
pub const FEATURE_COLUMNS: [&str; 4] = ["danceability", "energy", "valence", "tempo"];

/// Name of the genre column in the source table.
pub const GENRES_COLUMN: &str = "genres";

// ---------------------------------------------------------------------------
// CellValue – a single cell of the source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Full-precision form used when writing CSV. `Display` rounds floats for
    /// on-screen tables; this does not.
    pub fn export_str(&self) -> String {
        match self {
            CellValue::String(s) => s.clone(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(v) => v.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Null => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// MethodLabels – per-method cluster assignments for one song
// ---------------------------------------------------------------------------

/// `None` means the method did not assign this row (DBSCAN noise, or the
/// method was never run on this dataset).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MethodLabels {
    pub kmeans: Option<i64>,
    pub dbscan: Option<i64>,
    pub hierarchical: Option<i64>,
}

impl MethodLabels {
    pub fn get(&self, method: ClusterMethod) -> Option<i64> {
        match method {
            ClusterMethod::KMeans => self.kmeans,
            ClusterMethod::Dbscan => self.dbscan,
            ClusterMethod::Hierarchical => self.hierarchical,
        }
    }
}

// ---------------------------------------------------------------------------
// Song – one row of the source table
// ---------------------------------------------------------------------------

/// A single song (one row of the source table).
///
/// The audio features and genre are typed because every summary reads them;
/// all other source columns live in `extra` so the preview table and the
/// export can reproduce the full original row.
#[derive(Debug, Clone)]
pub struct Song {
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub tempo: f64,
    pub genre: String,
    pub labels: MethodLabels,
    pub extra: BTreeMap<String, CellValue>,
}

impl Song {
    /// The audio features in [`FEATURE_COLUMNS`] order.
    pub fn features(&self) -> [f64; 4] {
        [self.danceability, self.energy, self.valence, self.tempo]
    }

    /// Look up any source column by name.
    pub fn field(&self, column: &str) -> CellValue {
        match column {
            "danceability" => CellValue::Float(self.danceability),
            "energy" => CellValue::Float(self.energy),
            "valence" => CellValue::Float(self.valence),
            "tempo" => CellValue::Float(self.tempo),
            GENRES_COLUMN => CellValue::String(self.genre.clone()),
            _ => {
                if let Some(method) = ClusterMethod::for_column(column) {
                    return match self.labels.get(method) {
                        Some(id) => CellValue::Integer(id),
                        None => CellValue::Null,
                    };
                }
                self.extra.get(column).cloned().unwrap_or(CellValue::Null)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// MusicDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table plus its source column order.
#[derive(Debug, Clone, Default)]
pub struct MusicDataset {
    /// All songs (rows), in file order.
    pub songs: Vec<Song>,
    /// Column names exactly as they appear in the source file, preserved for
    /// preview and export.
    pub columns: Vec<String>,
}

impl MusicDataset {
    /// Number of songs.
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

// ---------------------------------------------------------------------------
