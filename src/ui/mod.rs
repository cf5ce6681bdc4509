//! View layer: stateless egui render functions over `AppState`.

pub mod charts;
pub mod panels;
