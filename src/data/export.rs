use std::path::Path;

use anyhow::{Context, Result};

use super::filter::FilteredView;
use super::method::ClusterMethod;
use super::model::MusicDataset;
use crate::analysis::projection::Projection;

// ---------------------------------------------------------------------------
// CSV export of the filtered view
// ---------------------------------------------------------------------------

/// Download filename for the active method, e.g. `music_clusters_dbscan.csv`.
pub fn export_filename(method: ClusterMethod) -> String {
    format!("music_clusters_{}.csv", method.file_tag())
}

/// Serialize the filtered view to CSV text.
///
/// Header = every source column in file order, then `pca1`/`pca2`. The active
/// method's label column is written as the coerced integer; everything else
/// serializes at full precision.
pub fn to_csv(
    dataset: &MusicDataset,
    view: &FilteredView,
    method: ClusterMethod,
    projection: &Projection,
) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = dataset.columns.iter().map(String::as_str).collect();
    header.push("pca1");
    header.push("pca2");
    writer.write_record(&header).context("writing CSV header")?;

    let label_column = method.label_column();
    for (i, (&row, &label)) in view.rows.iter().zip(&view.labels).enumerate() {
        let song = &dataset.songs[row];

        let mut record: Vec<String> = Vec::with_capacity(header.len());
        for column in &dataset.columns {
            if column.as_str() == label_column {
                record.push(label.to_string());
            } else {
                record.push(song.field(column).export_str());
            }
        }
        let [pca1, pca2] = projection.coords.get(i).copied().unwrap_or([0.0, 0.0]);
        record.push(pca1.to_string());
        record.push(pca2.to_string());

        writer
            .write_record(&record)
            .with_context(|| format!("writing CSV row {i}"))?;
    }

    let bytes = writer.into_inner().context("flushing CSV")?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}

/// Serialize the filtered view and write it to `path`.
pub fn write_csv(
    path: &Path,
    dataset: &MusicDataset,
    view: &FilteredView,
    method: ClusterMethod,
    projection: &Projection,
) -> Result<()> {
    let text = to_csv(dataset, view, method, projection)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{projection, summary};
    use crate::data::loader;
    use crate::data::model::fixtures;

    #[test]
    fn filename_encodes_method_lowercase() {
        assert_eq!(
            export_filename(ClusterMethod::KMeans),
            "music_clusters_k-means.csv"
        );
        assert_eq!(
            export_filename(ClusterMethod::Dbscan),
            "music_clusters_dbscan.csv"
        );
    }

    #[test]
    fn export_round_trips_through_the_csv_parser() {
        let songs = vec![
            fixtures::kmeans_song([0.8, 0.7, 0.9, 120.0], "pop", 0),
            fixtures::kmeans_song([0.4, 0.3, 0.2, 90.0], "folk", 1),
            fixtures::kmeans_song([0.5, 0.9, 0.4, 150.0], "metal", 1),
        ];
        let dataset = fixtures::dataset(songs);
        let view = FilteredView::build(&dataset, ClusterMethod::KMeans);
        let proj = projection::project_2d(&dataset, &view);

        let text = to_csv(&dataset, &view, ClusterMethod::KMeans, &proj).unwrap();

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert!(headers.contains(&"pca1".to_string()));
        assert!(headers.contains(&"pca2".to_string()));

        let cluster_idx = headers.iter().position(|h| h == "cluster").unwrap();
        let mut labels = Vec::new();
        let mut n_rows = 0;
        for record in reader.records() {
            let record = record.unwrap();
            labels.push(record.get(cluster_idx).unwrap().parse::<i64>().unwrap());
            n_rows += 1;
        }
        labels.sort_unstable();
        labels.dedup();

        assert_eq!(n_rows, view.len());
        assert_eq!(labels, view.cluster_ids());
    }

    #[test]
    fn empty_view_exports_header_only() {
        let dataset = fixtures::dataset(vec![fixtures::kmeans_song([0.0; 4], "pop", 0)]);
        let view = FilteredView::build(&dataset, ClusterMethod::Dbscan);
        let proj = projection::project_2d(&dataset, &view);

        let text = to_csv(&dataset, &view, ClusterMethod::Dbscan, &proj).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("danceability"));
    }

    // End-to-end: load a CSV from disk, filter, summarize, export, re-parse.
    #[test]
    fn load_filter_export_pipeline() {
        let csv = "\
danceability,energy,valence,tempo,genres,cluster,cluster_dbscan,cluster_hc
0.8,0.7,0.9,120.0,pop,0,0.0,0
0.4,0.3,0.2,90.0,folk,1,,0
0.5,0.9,0.4,150.0,metal,1,1.0,
0.6,0.5,0.5,110.0,pop,0,,1
";
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songs.csv");
        std::fs::write(&path, csv).unwrap();

        let dataset = loader::load_file(&path).unwrap();
        let view = FilteredView::build(&dataset, ClusterMethod::Dbscan);
        assert_eq!(view.len(), 2);

        let counts = summary::counts(&dataset, &view);
        assert_eq!(counts.songs, 2);
        assert_eq!(counts.clusters, 2);

        let proj = projection::project_2d(&dataset, &view);
        let out_path = dir.path().join(export_filename(ClusterMethod::Dbscan));
        write_csv(&out_path, &dataset, &view, ClusterMethod::Dbscan, &proj).unwrap();

        let reparsed = std::fs::read_to_string(&out_path).unwrap();
        let mut reader = csv::Reader::from_reader(reparsed.as_bytes());
        assert_eq!(reader.records().count(), view.len());
    }
}
