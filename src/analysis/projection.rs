use nalgebra::DMatrix;

use crate::data::filter::FilteredView;
use crate::data::model::MusicDataset;

// ---------------------------------------------------------------------------
// 2D projection of the audio features
// ---------------------------------------------------------------------------

/// Principal-component scores of the filtered rows, parallel to the view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    /// `[pca1, pca2]` per filtered row.
    pub coords: Vec<[f64; 2]>,
}

/// Project the four audio features onto their top two directions of variance.
///
/// Column-centered SVD. Deterministic for a fixed row set; the sign of each
/// axis is only stable up to reflection. Zero-variance input projects to the
/// origin rather than NaN, and fewer than two effective components pads the
/// second coordinate with 0.
pub fn project_2d(dataset: &MusicDataset, view: &FilteredView) -> Projection {
    let n = view.rows.len();
    if n == 0 {
        return Projection::default();
    }

    let mut matrix = DMatrix::<f64>::zeros(n, 4);
    for (i, &row) in view.rows.iter().enumerate() {
        for (j, v) in dataset.songs[row].features().into_iter().enumerate() {
            matrix[(i, j)] = v;
        }
    }

    // Center each feature column.
    for j in 0..4 {
        let mean = matrix.column(j).mean();
        for i in 0..n {
            matrix[(i, j)] -= mean;
        }
    }

    let svd = matrix.clone().svd(false, true);
    let Some(v_t) = svd.v_t else {
        return Projection {
            coords: vec![[0.0, 0.0]; n],
        };
    };

    // Scores = centered matrix × top right-singular vectors.
    let scores = matrix * v_t.transpose();
    let coords = (0..n)
        .map(|i| {
            let first = scores[(i, 0)];
            let second = if scores.ncols() > 1 { scores[(i, 1)] } else { 0.0 };
            [first, second]
        })
        .collect();

    Projection { coords }
}
