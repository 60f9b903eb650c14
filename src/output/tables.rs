// Output tables.
//
// Each table is a header plus string rows, built from pipeline results and
// the documents they were computed from. Document rows always follow the
// input cluster-table order.

use crate::corpus::documents::Document;
use crate::error::{Result, VectorError};
use crate::pipeline::run::PipelineOutput;
use crate::vectors::aggregate::ClusterVector;
use crate::vectors::combinations::AxisPair;
use crate::vectors::distance::DistanceRecord;
use crate::vectors::AxisVector;

pub const RAW_VECTORS: &str = "raw_vectors";
pub const NORMALIZED_VECTORS: &str = "normalized_vectors";
pub const CLUSTER_VECTORS: &str = "cluster_vectors";
pub const AXIS_COMBINATIONS: &str = "axis_combinations";
pub const VECTORS_WITH_DISTANCE: &str = "vectors_with_distance";

/// Metadata columns that lead every per-document table.
const DOCUMENT_COLUMNS: [&str; 5] = ["index", "category", "year", "title", "cluster"];

/// A delimited table ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// File stem, without extension
    pub name: String,
    /// Whether an EUC-KR copy is written next to the UTF-8 one
    pub legacy_copy: bool,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Shortest round-trip text for a float.
pub fn format_value(value: f64) -> String {
    value.to_string()
}

/// Per-document table: metadata columns then one column per axis.
pub fn vector_table(
    name: &str,
    axes: &[String],
    documents: &[Document],
    vectors: &[AxisVector],
) -> Result<Table> {
    if documents.len() != vectors.len() {
        return Err(VectorError::DimensionMismatch {
            stage: "vector table",
            expected: documents.len(),
            actual: vectors.len(),
        });
    }

    let mut rows = Vec::with_capacity(vectors.len());
    for (document, vector) in documents.iter().zip(vectors) {
        if document.id != vector.id {
            return Err(VectorError::MisalignedDocument {
                expected: document.id,
                found: vector.id,
            });
        }
        check_width("vector table", axes.len(), vector.values.len())?;

        let mut row = document_cells(document);
        row.extend(vector.values.iter().map(|v| format_value(*v)));
        rows.push(row);
    }

    Ok(Table {
        name: name.to_string(),
        legacy_copy: false,
        header: header_with(&DOCUMENT_COLUMNS, axes),
        rows,
    })
}

/// One row per axis, one column per cluster.
pub fn cluster_table(axes: &[String], clusters: &[ClusterVector]) -> Result<Table> {
    let mut header = vec!["index".to_string(), "axis".to_string()];
    header.extend(clusters.iter().map(|c| c.label.to_string()));

    for cluster in clusters {
        check_width("cluster table", axes.len(), cluster.values.len())?;
    }

    let rows = axes
        .iter()
        .enumerate()
        .map(|(i, axis)| {
            let mut row = vec![i.to_string(), axis.clone()];
            row.extend(clusters.iter().map(|c| format_value(c.values[i])));
            row
        })
        .collect();

    Ok(Table {
        name: CLUSTER_VECTORS.to_string(),
        legacy_copy: true,
        header,
        rows,
    })
}

pub fn combinations_table(pairs: &[AxisPair]) -> Table {
    Table {
        name: AXIS_COMBINATIONS.to_string(),
        legacy_copy: true,
        header: vec![
            "index".to_string(),
            "horizontal".to_string(),
            "vertical".to_string(),
        ],
        rows: pairs
            .iter()
            .map(|p| vec![p.index.to_string(), p.horizontal.clone(), p.vertical.clone()])
            .collect(),
    }
}

/// Normalized table plus connectivity and distance columns.
pub fn distance_table(axes: &[String], records: &[DistanceRecord]) -> Result<Table> {
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        check_width("distance table", axes.len(), record.values.len())?;

        let mut row = vec![
            record.id.to_string(),
            record.category.clone(),
            record.year.to_string(),
            record.title.clone(),
            record.cluster.to_string(),
        ];
        row.extend(record.values.iter().map(|v| format_value(*v)));
        row.push(
            record
                .connected_node_count
                .map(|n| n.to_string())
                .unwrap_or_default(),
        );
        row.push(format_value(record.distance_from_cluster));
        rows.push(row);
    }

    let mut header = header_with(&DOCUMENT_COLUMNS, axes);
    header.push("connected_node_count".to_string());
    header.push("distance_from_cluster".to_string());

    Ok(Table {
        name: VECTORS_WITH_DISTANCE.to_string(),
        legacy_copy: false,
        header,
        rows,
    })
}

/// Raw and normalized tables only.
pub fn vector_tables(
    axes: &[String],
    documents: &[Document],
    raw: &[AxisVector],
    normalized: &[AxisVector],
) -> Result<Vec<Table>> {
    Ok(vec![
        vector_table(RAW_VECTORS, axes, documents, raw)?,
        vector_table(NORMALIZED_VECTORS, axes, documents, normalized)?,
    ])
}

/// Every table of a full run, in write order.
pub fn all_tables(documents: &[Document], output: &PipelineOutput) -> Result<Vec<Table>> {
    let axes = &output.vectors.axes;
    let mut tables = vector_tables(
        axes,
        documents,
        &output.vectors.raw,
        &output.vectors.normalized,
    )?;
    tables.push(cluster_table(axes, &output.clusters)?);
    tables.push(combinations_table(&output.combinations));
    tables.push(distance_table(axes, &output.distances)?);
    Ok(tables)
}

fn document_cells(document: &Document) -> Vec<String> {
    vec![
        document.id.to_string(),
        document.category.clone(),
        document.year.to_string(),
        document.title.clone(),
        document.cluster.to_string(),
    ]
}

fn header_with(leading: &[&str], axes: &[String]) -> Vec<String> {
    leading
        .iter()
        .map(|s| s.to_string())
        .chain(axes.iter().cloned())
        .collect()
}

fn check_width(stage: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(VectorError::DimensionMismatch {
            stage,
            expected,
            actual,
        });
    }
    Ok(())
}
