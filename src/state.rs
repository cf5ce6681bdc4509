use crate::analysis::projection::{self, Projection};
use crate::analysis::summary::{self, ClusterProfile, GenreClusterCount, SummaryCounts, TOP_GENRE_PAIRS};
use crate::color::ClusterColorMap;
use crate::data::filter::FilteredView;
use crate::data::loader;
use crate::data::method::ClusterMethod;
use crate::data::model::MusicDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The derived artifacts are rebuilt on method change and read every frame.
pub struct AppState {
    /// Memoized dataset; `None` when the source file failed to load.
    pub dataset: Option<&'static MusicDataset>,
    /// Load failure shown as the whole-page error when `dataset` is `None`.
    pub load_error: Option<String>,

    /// Active clustering method.
    pub method: ClusterMethod,

    pub view: FilteredView,
    pub counts: SummaryCounts,
    pub sizes: Vec<(i64, usize)>,
    pub profile: ClusterProfile,
    pub projection: Projection,
    pub top_genres: Vec<GenreClusterCount>,
    pub colors: ClusterColorMap,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    fn empty() -> Self {
        AppState {
            dataset: None,
            load_error: None,
            method: ClusterMethod::KMeans,
            view: FilteredView::default(),
            counts: SummaryCounts::default(),
            sizes: Vec::new(),
            profile: ClusterProfile::default(),
            projection: Projection::default(),
            top_genres: Vec::new(),
            colors: ClusterColorMap::default(),
            status_message: None,
        }
    }

    /// Load the dataset from the fixed path and derive the initial artifacts.
    pub fn load() -> Self {
        match loader::load_cached() {
            Ok(dataset) => {
                log::info!(
                    "loaded {} songs with {} columns",
                    dataset.len(),
                    dataset.columns.len()
                );
                Self::from_dataset(dataset)
            }
            Err(e) => {
                log::error!("failed to load dataset: {e:#}");
                let mut state = Self::empty();
                state.load_error = Some(format!("{e:#}"));
                state
            }
        }
    }

    /// Build state over an already-loaded dataset.
    pub fn from_dataset(dataset: &'static MusicDataset) -> Self {
        let mut state = Self::empty();
        state.dataset = Some(dataset);
        state.recompute();
        state
    }

    /// Switch the active method and rebuild every derived artifact.
    pub fn set_method(&mut self, method: ClusterMethod) {
        if self.method != method {
            self.method = method;
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        let Some(dataset) = self.dataset else { return };
        self.view = FilteredView::build(dataset, self.method);
        self.counts = summary::counts(dataset, &self.view);
        self.sizes = summary::cluster_sizes(&self.view);
        self.profile = summary::cluster_profile(dataset, &self.view);
        self.projection = projection::project_2d(dataset, &self.view);
        self.top_genres = summary::top_genre_clusters(dataset, &self.view, TOP_GENRE_PAIRS);
        self.colors = ClusterColorMap::new(&self.view.cluster_ids());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{MethodLabels, fixtures};

    fn leaked_dataset() -> &'static MusicDataset {
        let songs = vec![
            fixtures::song(
                [0.8, 0.7, 0.9, 120.0],
                "pop",
                MethodLabels {
                    kmeans: Some(0),
                    dbscan: Some(0),
                    hierarchical: None,
                },
            ),
            fixtures::song(
                [0.4, 0.3, 0.2, 90.0],
                "folk",
                MethodLabels {
                    kmeans: Some(1),
                    dbscan: None,
                    hierarchical: None,
                },
            ),
        ];
        Box::leak(Box::new(fixtures::dataset(songs)))
    }

    #[test]
    fn artifacts_follow_the_active_method() {
        let mut state = AppState::from_dataset(leaked_dataset());
        assert_eq!(state.method, ClusterMethod::KMeans);
        assert_eq!(state.counts.songs, 2);
        assert_eq!(state.counts.clusters, 2);
        assert_eq!(state.projection.coords.len(), 2);

        state.set_method(ClusterMethod::Dbscan);
        assert_eq!(state.counts.songs, 1);
        assert_eq!(state.counts.clusters, 1);
        assert_eq!(state.sizes, vec![(0, 1)]);

        state.set_method(ClusterMethod::Hierarchical);
        assert_eq!(state.counts, SummaryCounts::default());
        assert!(state.view.is_empty());
    }
}
