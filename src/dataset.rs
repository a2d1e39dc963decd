//! Feature dataset: ordered fixed-length vectors with optional labels.
//!
//! A [`DataSet`] is built once, from an in-memory matrix or a delimited
//! text file, and is immutable afterwards. The record index is the stable
//! identity used by the mapper and the label aggregator.

use crate::error::{Result, SomGridError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// An ordered collection of fixed-length feature vectors, optionally
/// paired with one integer label per vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSet {
    features: Vec<Vec<f64>>,
    labels: Option<Vec<i64>>,
    feature_dim: usize,
    /// Sorted, deduplicated labels observed at construction. Empty when
    /// the dataset has no labels.
    distinct_labels: Vec<i64>,
}

impl DataSet {
    /// Builds a dataset from an in-memory matrix.
    ///
    /// When `has_labels` is true, each row's trailing column is truncated
    /// to an integer label and stripped from the feature vector.
    pub fn from_rows(rows: &[Vec<f64>], has_labels: bool) -> Result<Self> {
        if rows.is_empty() {
            return Err(SomGridError::EmptyInput("dataset has no records".to_string()));
        }

        let min_cols = if has_labels { 2 } else { 1 };
        let expected = rows[0].len();
        if expected < min_cols {
            return Err(SomGridError::DimensionMismatch {
                expected: min_cols,
                found: expected,
            });
        }

        let mut features = Vec::with_capacity(rows.len());
        let mut labels = if has_labels {
            Some(Vec::with_capacity(rows.len()))
        } else {
            None
        };

        for row in rows {
            if row.len() != expected {
                return Err(SomGridError::DimensionMismatch {
                    expected,
                    found: row.len(),
                });
            }
            if let Some(labels) = labels.as_mut() {
                let (feature, label) = row.split_at(row.len() - 1);
                features.push(feature.to_vec());
                labels.push(label[0] as i64);
            } else {
                features.push(row.clone());
            }
        }

        Ok(Self::assemble(features, labels))
    }

    /// Builds a dataset from a delimited text file.
    ///
    /// One record per line, comma-separated real numbers, with an optional
    /// trailing integer label per line under the `has_labels` convention.
    /// Malformed lines are reported with their 1-based line number, never
    /// repaired or skipped.
    pub fn from_delimited_file<P: AsRef<Path>>(path: P, has_labels: bool) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut records: Vec<Vec<f64>> = Vec::new();
        let mut raw_labels: Vec<i64> = Vec::new();

        for (line_idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = line_idx + 1;
            if line.trim().is_empty() {
                return Err(SomGridError::Parse {
                    line: line_no,
                    message: "blank record".to_string(),
                });
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let min_fields = if has_labels { 2 } else { 1 };
            if fields.len() < min_fields {
                return Err(SomGridError::Parse {
                    line: line_no,
                    message: format!("expected at least {} fields, found {}", min_fields, fields.len()),
                });
            }

            let (feature_fields, label_field) = if has_labels {
                let (f, l) = fields.split_at(fields.len() - 1);
                (f, Some(l[0]))
            } else {
                (&fields[..], None)
            };

            let mut feature = Vec::with_capacity(feature_fields.len());
            for field in feature_fields {
                let value: f64 = field.parse().map_err(|_| SomGridError::Parse {
                    line: line_no,
                    message: format!("invalid number {:?}", field),
                })?;
                feature.push(value);
            }

            if let Some(field) = label_field {
                let label: i64 = field.parse().map_err(|_| SomGridError::Parse {
                    line: line_no,
                    message: format!("invalid label {:?}", field),
                })?;
                raw_labels.push(label);
            }

            if let Some(first) = records.first() {
                if feature.len() != first.len() {
                    return Err(SomGridError::DimensionMismatch {
                        expected: first.len(),
                        found: feature.len(),
                    });
                }
            }
            records.push(feature);
        }

        if records.is_empty() {
            return Err(SomGridError::EmptyInput("file has no records".to_string()));
        }

        let labels = has_labels.then_some(raw_labels);
        Ok(Self::assemble(records, labels))
    }

    fn assemble(features: Vec<Vec<f64>>, labels: Option<Vec<i64>>) -> Self {
        let feature_dim = features[0].len();
        let distinct_labels = match &labels {
            Some(labels) => {
                let mut distinct = labels.clone();
                distinct.sort_unstable();
                distinct.dedup();
                distinct
            }
            None => Vec::new(),
        };

        Self {
            features,
            labels,
            feature_dim,
            distinct_labels,
        }
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the dataset holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Feature vector length, constant across the dataset.
    #[inline]
    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }

    /// Feature vector of the record at `index`.
    #[inline]
    pub fn feature(&self, index: usize) -> &[f64] {
        &self.features[index]
    }

    /// Whether the dataset carries labels.
    #[inline]
    pub fn has_labels(&self) -> bool {
        self.labels.is_some()
    }

    /// Label of the record at `index`, if the dataset carries labels.
    #[inline]
    pub fn label(&self, index: usize) -> Option<i64> {
        self.labels.as_ref().map(|labels| labels[index])
    }

    /// All labels, index-aligned with the records.
    pub fn labels(&self) -> Option<&[i64]> {
        self.labels.as_deref()
    }

    /// Sorted, deduplicated labels observed at construction time.
    pub fn distinct_labels(&self) -> &[i64] {
        &self.distinct_labels
    }
}
