// CSV loaders for the keyword directory and the document tables.
//
// Every table is parsed into a typed row once, here. The core stages only
// ever see `KeywordCorpus`, `Document` and the connectivity map.
//
// Layouts:
//   keywords/<group>/<NN. endpoint>.csv   header: keyword|형태소 [, weight|가중치]
//   cluster table                         index, category, year, title, context, cluster [, distance]
//   content table                         index, category, year, title, text
//   network table                         index, _, _, connected_node_count

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use serde::Deserialize;
use tracing::{debug, info};

use super::documents::{ClusterLabel, Document, DocumentId};
use super::keywords::{coerce_weight, Endpoint, KeywordCorpus, WeightedKeyword};
use crate::error::{Result, VectorError};

/// Header names accepted for the keyword column.
pub const KEYWORD_HEADERS: &[&str] = &["keyword", "형태소"];
/// Header names accepted for the optional weight column.
pub const WEIGHT_HEADERS: &[&str] = &["weight", "가중치"];

/// Document id -> connected-node-count from the network table.
pub type Connectivity = HashMap<DocumentId, u32>;

#[derive(Debug, Deserialize)]
struct KeywordRow {
    #[serde(alias = "형태소")]
    keyword: String,
    #[serde(default, alias = "가중치")]
    weight: Option<String>,
}

/// One row of the cluster-assignment table.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRow {
    pub id: DocumentId,
    pub category: String,
    pub year: i32,
    pub title: String,
    pub cluster: ClusterLabel,
}

/// Load every endpoint file below `dir`, in sorted group/file order.
pub fn load_keyword_dir(dir: &Path) -> Result<KeywordCorpus> {
    let mut endpoints = Vec::new();

    for group in sorted_entries(dir)? {
        if !group.is_dir() {
            continue;
        }
        for file in sorted_entries(&group)? {
            if file.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            let stem = file
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| {
                    VectorError::MalformedCorpus(format!(
                        "non UTF-8 file name: {}",
                        file.display()
                    ))
                })?;
            let endpoint = load_keyword_file(&file, endpoint_name(stem))?;
            debug!(
                endpoint = %endpoint.name,
                keywords = endpoint.keywords.len(),
                "Loaded endpoint keywords"
            );
            endpoints.push(endpoint);
        }
    }

    let corpus = KeywordCorpus::new(endpoints)?;
    info!(
        endpoints = corpus.endpoint_count(),
        axes = corpus.axis_count(),
        dir = %dir.display(),
        "Keyword corpus loaded"
    );
    Ok(corpus)
}

/// Read one endpoint's keyword file.
pub fn load_keyword_file(path: &Path, name: &str) -> Result<Endpoint> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let has = |names: &[&str]| headers.iter().any(|h| names.contains(&h.trim()));
    if !has(KEYWORD_HEADERS) {
        return Err(VectorError::MalformedCorpus(format!(
            "{} has no keyword column (expected one of {:?})",
            path.display(),
            KEYWORD_HEADERS
        )));
    }
    let weighted = has(WEIGHT_HEADERS);

    let mut keywords = Vec::new();
    for row in reader.deserialize::<KeywordRow>() {
        let row = row?;
        let keyword = row.keyword.trim().to_string();
        let weight = if weighted {
            coerce_weight(name, &keyword, row.weight.as_deref())?
        } else {
            1.0
        };
        keywords.push(WeightedKeyword { keyword, weight });
    }

    Ok(Endpoint::new(name, keywords))
}

/// Strip a leading ordinal prefix from a file stem: "03. 전통" -> "전통".
pub fn endpoint_name(stem: &str) -> &str {
    match stem.split_once('.') {
        Some((prefix, rest)) if is_ordinal(prefix) => rest.trim(),
        _ => stem.trim(),
    }
}

fn is_ordinal(prefix: &str) -> bool {
    let prefix = prefix.trim();
    !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit())
}

/// Read the cluster-assignment table. Each document index may appear once.
pub fn load_cluster_table(path: &Path) -> Result<Vec<ClusterRow>> {
    let mut seen = HashSet::new();
    read_rows(path, |record| {
        Ok(ClusterRow {
            id: unique_id(path, record, &mut seen)?,
            category: field(path, record, 1)?.to_string(),
            year: parse_field(path, record, 2, "year")?,
            title: field(path, record, 3)?.to_string(),
            cluster: field(path, record, 5)?
                .parse::<ClusterLabel>()
                .map_err(|reason| malformed(path, record, reason))?,
        })
    })
}

/// Read the document-content table into an id -> text map.
pub fn load_contents(path: &Path) -> Result<HashMap<DocumentId, String>> {
    let mut seen = HashSet::new();
    let rows = read_rows(path, |record| {
        Ok((
            unique_id(path, record, &mut seen)?,
            field(path, record, 4)?.to_string(),
        ))
    })?;
    Ok(rows.into_iter().collect())
}

/// Read the network table into an id -> connected-node-count map.
pub fn load_network(path: &Path) -> Result<Connectivity> {
    let mut seen = HashSet::new();
    let rows = read_rows(path, |record| {
        Ok((
            unique_id(path, record, &mut seen)?,
            parse_field::<u32>(path, record, 3, "connected node count")?,
        ))
    })?;
    info!(entries = rows.len(), "Network table loaded");
    Ok(rows.into_iter().collect())
}

/// Join the cluster table with the content table, keeping cluster-table order.
pub fn load_documents(clusters: &Path, contents: &Path) -> Result<Vec<Document>> {
    let rows = load_cluster_table(clusters)?;
    let texts = load_contents(contents)?;
    let documents = join_documents(rows, &texts)?;
    info!(documents = documents.len(), "Documents loaded");
    Ok(documents)
}

/// Attach raw text to each cluster row. Fails on the first row without text.
pub fn join_documents(
    rows: Vec<ClusterRow>,
    texts: &HashMap<DocumentId, String>,
) -> Result<Vec<Document>> {
    rows.into_iter()
        .map(|row| {
            let text = texts
                .get(&row.id)
                .cloned()
                .ok_or(VectorError::MissingDocumentText(row.id))?;
            Ok(Document {
                id: row.id,
                category: row.category,
                year: row.year,
                title: row.title,
                text,
                cluster: row.cluster,
            })
        })
        .collect()
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

fn read_rows<T>(
    path: &Path,
    mut parse: impl FnMut(&StringRecord) -> Result<T>,
) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut out = Vec::new();
    for record in reader.records() {
        out.push(parse(&record?)?);
    }
    Ok(out)
}

fn malformed(path: &Path, record: &StringRecord, reason: impl Into<String>) -> VectorError {
    VectorError::MalformedRecord {
        path: path.to_path_buf(),
        line: record.position().map(|p| p.line()).unwrap_or(0),
        reason: reason.into(),
    }
}

fn field<'r>(path: &Path, record: &'r StringRecord, idx: usize) -> Result<&'r str> {
    record
        .get(idx)
        .ok_or_else(|| malformed(path, record, format!("missing column {idx}")))
}

fn parse_field<T: std::str::FromStr>(
    path: &Path,
    record: &StringRecord,
    idx: usize,
    what: &str,
) -> Result<T> {
    let raw = field(path, record, idx)?;
    raw.trim()
        .parse()
        .map_err(|_| malformed(path, record, format!("invalid {what} {raw:?}")))
}

fn parse_id(path: &Path, record: &StringRecord, idx: usize) -> Result<DocumentId> {
    parse_field(path, record, idx, "document index").map(DocumentId)
}

/// Parse the index column, rejecting an index already seen in this table.
fn unique_id(
    path: &Path,
    record: &StringRecord,
    seen: &mut HashSet<DocumentId>,
) -> Result<DocumentId> {
    let id = parse_id(path, record, 0)?;
    if !seen.insert(id) {
        return Err(malformed(path, record, format!("duplicate document index {id}")));
    }
    Ok(id)
}
