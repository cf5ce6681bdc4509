//! Descriptive statistics over a filtered cluster table.
//!
//! Everything here is a pure function of `(dataset, view)`: no caching, no
//! mutation. The app recomputes these artifacts when the method selection
//! changes and keeps them in `AppState` between frames.

pub mod projection;
pub mod summary;
