use super::method::ClusterMethod;
use super::model::MusicDataset;

// ---------------------------------------------------------------------------
// FilteredView – rows carrying a label for the active method
// ---------------------------------------------------------------------------

/// The dataset restricted to rows with a non-missing label for one method.
///
/// `rows` and `labels` are parallel: `labels[i]` is the coerced cluster ID of
/// `dataset.songs[rows[i]]`. Recomputed on every method change, never
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct FilteredView {
    pub rows: Vec<usize>,
    pub labels: Vec<i64>,
}

impl FilteredView {
    /// Keep the rows assigned by `method`, in source order.
    ///
    /// A method that was never run on this dataset yields an empty view; every
    /// downstream summary degenerates to zero/empty without error.
    pub fn build(dataset: &MusicDataset, method: ClusterMethod) -> Self {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for (idx, song) in dataset.songs.iter().enumerate() {
            if let Some(id) = song.labels.get(method) {
                rows.push(idx);
                labels.push(id);
            }
        }
        FilteredView { rows, labels }
    }

    /// Number of rows in the view.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct cluster IDs, ascending.
    pub fn cluster_ids(&self) -> Vec<i64> {
        let mut ids = self.labels.clone();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::MethodLabels;
    use crate::data::model::fixtures;

    #[test]
    fn drops_rows_without_a_label() {
        // 100 rows, 20 of them missing the DBSCAN label.
        let songs = (0..100i64)
            .map(|i| {
                fixtures::song(
                    [0.5, 0.5, 0.5, 100.0],
                    "pop",
                    MethodLabels {
                        kmeans: Some(i % 3),
                        dbscan: if i < 20 { None } else { Some(i % 4) },
                        hierarchical: None,
                    },
                )
            })
            .collect();
        let dataset = fixtures::dataset(songs);

        let view = FilteredView::build(&dataset, ClusterMethod::Dbscan);
        assert_eq!(view.len(), 80);
        assert!(view.len() <= dataset.len());

        // No missing label survives filtering.
        for &row in &view.rows {
            assert!(dataset.songs[row].labels.dbscan.is_some());
        }
    }

    #[test]
    fn full_label_column_keeps_every_row() {
        let songs = (0..10i64)
            .map(|i| fixtures::kmeans_song([0.1, 0.2, 0.3, 90.0], "rock", i % 2))
            .collect();
        let dataset = fixtures::dataset(songs);

        let view = FilteredView::build(&dataset, ClusterMethod::KMeans);
        assert_eq!(view.len(), dataset.len());
        assert_eq!(view.cluster_ids(), vec![0, 1]);
    }

    #[test]
    fn method_never_run_yields_empty_view() {
        let songs = (0..5i64)
            .map(|i| fixtures::kmeans_song([0.1, 0.2, 0.3, 90.0], "rock", i))
            .collect();
        let dataset = fixtures::dataset(songs);

        let view = FilteredView::build(&dataset, ClusterMethod::Hierarchical);
        assert!(view.is_empty());
        assert!(view.cluster_ids().is_empty());
    }

    #[test]
    fn cluster_ids_are_distinct_and_sorted() {
        let songs = vec![
            fixtures::kmeans_song([0.0; 4], "a", 5),
            fixtures::kmeans_song([0.0; 4], "b", -1),
            fixtures::kmeans_song([0.0; 4], "c", 5),
            fixtures::kmeans_song([0.0; 4], "d", 2),
        ];
        let dataset = fixtures::dataset(songs);

        let view = FilteredView::build(&dataset, ClusterMethod::KMeans);
        assert_eq!(view.cluster_ids(), vec![-1, 2, 5]);
    }
}
