//! Error type shared by every loader.

use std::path::PathBuf;

use rb_pack::MessageError;
use thiserror::Error;

use crate::mesh::{MeshError, UnknownElemType};
use crate::schema::SchemaId;

/// Why a model load was aborted.
///
/// A load never returns a partially populated model: when any of these is
/// returned the target model is exactly as it was before the call.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("couldn't open the buffer file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("couldn't read the buffer file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Message(#[from] MessageError),
    #[error("expected a {expected} root record, found {}", describe_tag(.found))]
    Schema {
        expected: SchemaId,
        found: Option<u64>,
    },
    #[error("{record} record is missing field `{field}`")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },
    #[error("{field}: expected {expected}, found {found}")]
    FieldType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid number of basis functions {n}, must be between 1 and {limit}")]
    BasisCount { n: u64, limit: u32 },
    #[error("size error while reading {section}: expected {expected} entries, found {found}")]
    Size {
        section: String,
        expected: usize,
        found: usize,
    },
    #[error("shape error while reading {section}: expected {expected} entries, found {found}")]
    Shape {
        section: String,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    UnknownElemType(#[from] UnknownElemType),
    #[error("invalid parameter data: {0}")]
    Parameter(String),
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

fn describe_tag(tag: &Option<u64>) -> String {
    match *tag {
        Some(tag) => match SchemaId::from_tag(tag) {
            Some(schema) => schema.to_string(),
            None => format!("unknown tag {tag:#x}"),
        },
        None => "an untagged root".to_owned(),
    }
}

impl LoadError {
    pub(crate) fn size(section: impl Into<String>, expected: usize, found: usize) -> Self {
        LoadError::Size {
            section: section.into(),
            expected,
            found,
        }
    }

    pub(crate) fn shape(section: impl Into<String>, expected: usize, found: usize) -> Self {
        LoadError::Shape {
            section: section.into(),
            expected,
            found,
        }
    }

    /// Section name carried by size and shape errors.
    pub fn section(&self) -> Option<&str> {
        match self {
            LoadError::Size { section, .. } | LoadError::Shape { section, .. } => Some(section),
            _ => None,
        }
    }
}
