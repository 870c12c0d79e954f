//! Exhaustive in-memory vector index loaded from JSON files

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::domain::{DomainError, RetrievedRecord, VectorIndex};

/// On-disk layout of the index file
#[derive(Debug, Deserialize)]
struct IndexFile {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

/// A records-file entry: bare text, or text with an explicit id
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordEntry {
    Text(String),
    Identified { id: serde_json::Value, text: String },
}

#[derive(Debug, Clone)]
struct StoredRecord {
    id: String,
    text: String,
}

/// Brute-force squared-L2 index; the i-th vector belongs to the i-th record
#[derive(Debug)]
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
    records: Vec<StoredRecord>,
}

impl FlatIndex {
    /// Builds an index from parallel vectors and texts. Record ids are their
    /// positions.
    pub fn new(
        dimension: usize,
        vectors: Vec<Vec<f32>>,
        texts: Vec<String>,
    ) -> Result<Self, DomainError> {
        let records = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| StoredRecord {
                id: i.to_string(),
                text,
            })
            .collect();

        Self::from_parts(dimension, vectors, records)
    }

    fn from_parts(
        dimension: usize,
        vectors: Vec<Vec<f32>>,
        records: Vec<StoredRecord>,
    ) -> Result<Self, DomainError> {
        if dimension == 0 {
            return Err(DomainError::configuration("Index dimension must be positive"));
        }

        if vectors.len() != records.len() {
            return Err(DomainError::configuration(format!(
                "Index has {} vectors but {} records",
                vectors.len(),
                records.len()
            )));
        }

        if let Some(pos) = vectors.iter().position(|v| v.len() != dimension) {
            return Err(DomainError::configuration(format!(
                "Vector {} has dimension {}, expected {}",
                pos,
                vectors[pos].len(),
                dimension
            )));
        }

        Ok(Self {
            dimension,
            vectors,
            records,
        })
    }

    /// Loads the index and record files produced by the offline ingestion job
    pub fn load(
        index_path: impl AsRef<Path>,
        records_path: impl AsRef<Path>,
    ) -> Result<Self, DomainError> {
        let index_path = index_path.as_ref();
        let records_path = records_path.as_ref();

        let index: IndexFile = read_json(index_path)?;
        let entries: Vec<RecordEntry> = read_json(records_path)?;

        let records = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| match entry {
                RecordEntry::Text(text) => StoredRecord {
                    id: i.to_string(),
                    text,
                },
                RecordEntry::Identified { id, text } => StoredRecord {
                    id: match id {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    },
                    text,
                },
            })
            .collect();

        let flat = Self::from_parts(index.dimension, index.vectors, records)?;

        info!(
            index = %index_path.display(),
            records = flat.len(),
            dimension = flat.dimension,
            "Loaded vector index"
        );

        Ok(flat)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DomainError> {
    let data = std::fs::read_to_string(path).map_err(|e| {
        DomainError::configuration(format!("Failed to read '{}': {}", path.display(), e))
    })?;

    serde_json::from_str(&data).map_err(|e| {
        DomainError::configuration(format!("Failed to parse '{}': {}", path.display(), e))
    })
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl VectorIndex for FlatIndex {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<RetrievedRecord>, DomainError> {
        if query.len() != self.dimension {
            return Err(DomainError::rejected(
                "vector-index",
                format!(
                    "Query dimension {} does not match index dimension {}",
                    query.len(),
                    self.dimension
                ),
            ));
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, squared_l2(query, v)))
            .collect();

        // Stable sort keeps index order for equal distances
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(i, distance)| {
                let record = &self.records[i];
                RetrievedRecord::new(record.id.clone(), record.text.clone(), distance)
            })
            .collect())
    }
}
