use std::fmt;

// ---------------------------------------------------------------------------
// ClusterMethod – the three upstream clustering algorithms
// ---------------------------------------------------------------------------

/// One of the three clustering methods whose precomputed labels ship with the
/// dataset. The enum is closed: an invalid method cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusterMethod {
    KMeans,
    Dbscan,
    Hierarchical,
}

impl ClusterMethod {
    /// All methods, in selector order.
    pub const ALL: [ClusterMethod; 3] = [
        ClusterMethod::KMeans,
        ClusterMethod::Dbscan,
        ClusterMethod::Hierarchical,
    ];

    /// The source column carrying this method's cluster assignments.
    pub fn label_column(self) -> &'static str {
        match self {
            ClusterMethod::KMeans => "cluster",
            ClusterMethod::Dbscan => "cluster_dbscan",
            ClusterMethod::Hierarchical => "cluster_hc",
        }
    }

    /// Reverse lookup: which method owns a given label column.
    pub fn for_column(column: &str) -> Option<ClusterMethod> {
        Self::ALL.into_iter().find(|m| m.label_column() == column)
    }

    /// Human-readable name shown in the selector and chart titles.
    pub fn display_name(self) -> &'static str {
        match self {
            ClusterMethod::KMeans => "K-Means",
            ClusterMethod::Dbscan => "DBSCAN",
            ClusterMethod::Hierarchical => "Hierarchical",
        }
    }

    /// Lowercase tag used in the export filename.
    pub fn file_tag(self) -> String {
        self.display_name().to_ascii_lowercase()
    }
}

impl fmt::Display for ClusterMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_columns_are_fixed() {
        assert_eq!(ClusterMethod::KMeans.label_column(), "cluster");
        assert_eq!(ClusterMethod::Dbscan.label_column(), "cluster_dbscan");
        assert_eq!(ClusterMethod::Hierarchical.label_column(), "cluster_hc");
    }

    #[test]
    fn for_column_roundtrips() {
        for method in ClusterMethod::ALL {
            assert_eq!(ClusterMethod::for_column(method.label_column()), Some(method));
        }
        assert_eq!(ClusterMethod::for_column("genres"), None);
    }

    #[test]
    fn file_tags_are_lowercase() {
        assert_eq!(ClusterMethod::KMeans.file_tag(), "k-means");
        assert_eq!(ClusterMethod::Dbscan.file_tag(), "dbscan");
        assert_eq!(ClusterMethod::Hierarchical.file_tag(), "hierarchical");
    }
}
