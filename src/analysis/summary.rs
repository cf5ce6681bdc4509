use std::collections::BTreeMap;

use crate::data::filter::FilteredView;
use crate::data::model::MusicDataset;

// ---------------------------------------------------------------------------
// Headline counts
// ---------------------------------------------------------------------------

/// The three metrics of the overview section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryCounts {
    pub songs: usize,
    pub clusters: usize,
    pub genres: usize,
}

/// Row count, distinct cluster count and distinct genre count of the view.
pub fn counts(dataset: &MusicDataset, view: &FilteredView) -> SummaryCounts {
    let mut genres: Vec<&str> = view
        .rows
        .iter()
        .map(|&i| dataset.songs[i].genre.as_str())
        .collect();
    genres.sort_unstable();
    genres.dedup();

    SummaryCounts {
        songs: view.len(),
        clusters: view.cluster_ids().len(),
        genres: genres.len(),
    }
}

// ---------------------------------------------------------------------------
// Cluster size distribution
// ---------------------------------------------------------------------------

/// Rows per cluster, sorted by cluster ID ascending so the bar chart keeps a
/// stable x-axis across method switches.
pub fn cluster_sizes(view: &FilteredView) -> Vec<(i64, usize)> {
    let mut sizes: BTreeMap<i64, usize> = BTreeMap::new();
    for &id in &view.labels {
        *sizes.entry(id).or_default() += 1;
    }
    sizes.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Per-cluster feature means
// ---------------------------------------------------------------------------

/// Mean of each audio feature per cluster, clusters ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterProfile {
    pub clusters: Vec<i64>,
    /// `means[i][j]` = mean of `FEATURE_COLUMNS[j]` over cluster `clusters[i]`.
    pub means: Vec<[f64; 4]>,
}

pub fn cluster_profile(dataset: &MusicDataset, view: &FilteredView) -> ClusterProfile {
    let mut sums: BTreeMap<i64, ([f64; 4], usize)> = BTreeMap::new();
    for (&row, &id) in view.rows.iter().zip(&view.labels) {
        let entry = sums.entry(id).or_insert(([0.0; 4], 0));
        for (acc, v) in entry.0.iter_mut().zip(dataset.songs[row].features()) {
            *acc += v;
        }
        entry.1 += 1;
    }

    let mut profile = ClusterProfile::default();
    for (id, (sum, n)) in sums {
        profile.clusters.push(id);
        profile.means.push(sum.map(|s| s / n as f64));
    }
    profile
}

// ---------------------------------------------------------------------------
// Top genre/cluster combinations
// ---------------------------------------------------------------------------

/// Number of pairs the genre breakdown keeps.
pub const TOP_GENRE_PAIRS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreClusterCount {
    pub genre: String,
    pub cluster: i64,
    pub count: usize,
}

/// The `limit` most frequent (genre, cluster) pairs, most frequent first.
///
/// Ties break by (genre, cluster) order. Upstream leaves tie order
/// unspecified, so callers must not rely on which tied pair survives the
/// cutoff.
pub fn top_genre_clusters(
    dataset: &MusicDataset,
    view: &FilteredView,
    limit: usize,
) -> Vec<GenreClusterCount> {
    let mut counts: BTreeMap<(&str, i64), usize> = BTreeMap::new();
    for (&row, &id) in view.rows.iter().zip(&view.labels) {
        *counts
            .entry((dataset.songs[row].genre.as_str(), id))
            .or_default() += 1;
    }

    let mut pairs: Vec<GenreClusterCount> = counts
        .into_iter()
        .map(|((genre, cluster), count)| GenreClusterCount {
            genre: genre.to_string(),
            cluster,
            count,
        })
        .collect();
    // Stable sort: ties keep their (genre, cluster) order.
    pairs.sort_by(|a, b| b.count.cmp(&a.count));
    pairs.truncate(limit);
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::FilteredView;
    use crate::data::method::ClusterMethod;
    use crate::data::model::fixtures;

    fn view_of(dataset: &MusicDataset) -> FilteredView {
        FilteredView::build(dataset, ClusterMethod::KMeans)
    }

    #[test]
    fn counts_over_a_small_view() {
        let dataset = fixtures::dataset(vec![
            fixtures::kmeans_song([0.1, 0.2, 0.3, 100.0], "pop", 0),
            fixtures::kmeans_song([0.1, 0.2, 0.3, 100.0], "pop", 1),
            fixtures::kmeans_song([0.1, 0.2, 0.3, 100.0], "rock", 1),
        ]);
        let view = view_of(&dataset);

        let c = counts(&dataset, &view);
        assert_eq!(c.songs, 3);
        assert_eq!(c.clusters, 2);
        assert_eq!(c.genres, 2);
    }

    #[test]
    fn counts_degenerate_to_zero_on_empty_view() {
        let dataset = fixtures::dataset(vec![fixtures::kmeans_song([0.0; 4], "pop", 0)]);
        let view = FilteredView::build(&dataset, ClusterMethod::Dbscan);

        assert_eq!(counts(&dataset, &view), SummaryCounts::default());
        assert!(cluster_sizes(&view).is_empty());
        assert!(cluster_profile(&dataset, &view).clusters.is_empty());
        assert!(top_genre_clusters(&dataset, &view, TOP_GENRE_PAIRS).is_empty());
    }

    #[test]
    fn sizes_sort_by_cluster_id_not_count() {
        let dataset = fixtures::dataset(vec![
            fixtures::kmeans_song([0.0; 4], "a", 2),
            fixtures::kmeans_song([0.0; 4], "a", 2),
            fixtures::kmeans_song([0.0; 4], "a", 2),
            fixtures::kmeans_song([0.0; 4], "a", 0),
            fixtures::kmeans_song([0.0; 4], "a", -1),
        ]);
        let view = view_of(&dataset);

        assert_eq!(cluster_sizes(&view), vec![(-1, 1), (0, 1), (2, 3)]);
    }

    #[test]
    fn profile_reproduces_constant_features_exactly() {
        let a = [0.25, 0.5, 0.75, 100.0];
        let b = [0.1, 0.9, 0.3, 140.0];
        let mut songs = Vec::new();
        for _ in 0..4 {
            songs.push(fixtures::kmeans_song(a, "pop", 0));
        }
        for _ in 0..3 {
            songs.push(fixtures::kmeans_song(b, "rock", 1));
        }
        let dataset = fixtures::dataset(songs);
        let view = view_of(&dataset);

        let profile = cluster_profile(&dataset, &view);
        assert_eq!(profile.clusters, vec![0, 1]);
        assert_eq!(profile.means[0], a);
        assert_eq!(profile.means[1], b);
    }

    #[test]
    fn single_row_cluster_has_a_valid_mean() {
        let dataset = fixtures::dataset(vec![fixtures::kmeans_song([0.5, 0.6, 0.7, 99.0], "pop", 7)]);
        let view = view_of(&dataset);

        let profile = cluster_profile(&dataset, &view);
        assert_eq!(profile.clusters, vec![7]);
        assert_eq!(profile.means[0], [0.5, 0.6, 0.7, 99.0]);
    }

    #[test]
    fn top_pairs_selects_the_highest_counts() {
        // 20 pairs with distinct counts 1..=20.
        let mut songs = Vec::new();
        for pair in 0..20i64 {
            let genre = format!("genre_{pair:02}");
            for _ in 0..(pair + 1) {
                songs.push(fixtures::kmeans_song([0.0; 4], &genre, pair % 4));
            }
        }
        let dataset = fixtures::dataset(songs);
        let view = view_of(&dataset);

        let top = top_genre_clusters(&dataset, &view, TOP_GENRE_PAIRS);
        assert_eq!(top.len(), 15);

        // Exactly the 15 highest counts: 6..=20, descending.
        let counts: Vec<usize> = top.iter().map(|p| p.count).collect();
        assert_eq!(counts, (6..=20).rev().collect::<Vec<usize>>());
    }

    #[test]
    fn tied_cutoff_keeps_the_count_not_a_specific_pair() {
        // Two pairs with count 1 compete for the last slot; which one survives
        // is implementation-defined, only its count is contractual.
        let dataset = fixtures::dataset(vec![
            fixtures::kmeans_song([0.0; 4], "a", 0),
            fixtures::kmeans_song([0.0; 4], "a", 0),
            fixtures::kmeans_song([0.0; 4], "b", 0),
            fixtures::kmeans_song([0.0; 4], "c", 1),
        ]);
        let view = view_of(&dataset);

        let top = top_genre_clusters(&dataset, &view, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].genre, "a");
        assert_eq!(top[0].count, 2);
        assert_eq!(top[1].count, 1);
    }
}
