// Documents and their cluster assignments.
//
// A document's identity is the 1-based index from the source tables. It is
// carried through every stage so that raw, normalized and distance rows can
// be matched without relying on array positions.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Source-assigned document index (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u32);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cluster assignment for a document.
///
/// `Unassigned` sorts before every numbered cluster, so sorted cluster
/// listings put noise documents first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClusterLabel {
    Unassigned,
    Id(u32),
}

impl fmt::Display for ClusterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterLabel::Unassigned => write!(f, "unassigned"),
            ClusterLabel::Id(id) => write!(f, "{id}"),
        }
    }
}

/// Serialized as its display form, so the run manifest lists "unassigned"
/// and plain numbers.
impl Serialize for ClusterLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for ClusterLabel {
    type Err = String;

    /// Accepts a non-negative integer, or `-1` / empty / `unassigned` for
    /// documents the clustering left out.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "-1" || s.eq_ignore_ascii_case("unassigned") {
            return Ok(ClusterLabel::Unassigned);
        }
        s.parse::<u32>()
            .map(ClusterLabel::Id)
            .map_err(|_| format!("invalid cluster label {s:?}"))
    }
}

/// One document of the corpus, immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub category: String,
    pub year: i32,
    pub title: String,
    pub text: String,
    pub cluster: ClusterLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cluster_labels() {
        assert_eq!("3".parse::<ClusterLabel>().unwrap(), ClusterLabel::Id(3));
        assert_eq!(" 0 ".parse::<ClusterLabel>().unwrap(), ClusterLabel::Id(0));
        assert_eq!("-1".parse::<ClusterLabel>().unwrap(), ClusterLabel::Unassigned);
        assert_eq!("".parse::<ClusterLabel>().unwrap(), ClusterLabel::Unassigned);
        assert_eq!(
            "Unassigned".parse::<ClusterLabel>().unwrap(),
            ClusterLabel::Unassigned
        );
        assert!("two".parse::<ClusterLabel>().is_err());
        assert!("-2".parse::<ClusterLabel>().is_err());
    }

    #[test]
    fn test_serializes_as_display_form() {
        let labels = vec![ClusterLabel::Unassigned, ClusterLabel::Id(4)];
        assert_eq!(serde_json::to_string(&labels).unwrap(), r#"["unassigned","4"]"#);
    }

    #[test]
    fn test_unassigned_sorts_first() {
        let mut labels = vec![ClusterLabel::Id(2), ClusterLabel::Unassigned, ClusterLabel::Id(0)];
        labels.sort();
        assert_eq!(
            labels,
            vec![ClusterLabel::Unassigned, ClusterLabel::Id(0), ClusterLabel::Id(2)]
        );
    }
}
