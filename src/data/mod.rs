//! Data layer: core types, loading, filtering, and export.
//!
//! Architecture:
//! ```text
//!  .csv / .parquet / .json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → MusicDataset (memoized for the process)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ MusicDataset  │  Vec<Song>, source column order
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐       ┌──────────┐
//!   │  filter   │ ────▶ │  export   │  method view → CSV download
//!   └──────────┘       └──────────┘
//! ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod method;
pub mod model;
