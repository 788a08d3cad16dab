//! Load a written tree back into memory.

use super::leaf::LeafKind;
use super::{LEAF_KEY, TREE_NAME_KEY, TREE_TITLE_KEY};
use crate::arff::Header;
use crate::convert::ARFF_HEADER_KEY;
use crate::error::{Error, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{Field, Float64Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::path::Path;

/// All values of one branch.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Long(Vec<i64>),
    Double(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    fn new(kind: LeafKind) -> Self {
        match kind {
            LeafKind::Long => Self::Long(Vec::new()),
            LeafKind::Double => Self::Double(Vec::new()),
            LeafKind::String => Self::Text(Vec::new()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Long(v) => v.len(),
            Self::Double(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn extend_from(&mut self, array: &dyn Array) -> bool {
        match self {
            Self::Long(v) => match array.as_primitive_opt::<Int64Type>() {
                Some(a) => v.extend(a.values().iter().copied()),
                None => return false,
            },
            Self::Double(v) => match array.as_primitive_opt::<Float64Type>() {
                Some(a) => v.extend(a.values().iter().copied()),
                None => return false,
            },
            Self::Text(v) => match array.as_string_opt::<i32>() {
                Some(a) => v.extend(a.iter().map(|s| s.unwrap_or_default().to_string())),
                None => return false,
            },
        }
        true
    }
}

/// One branch read back from a tree file.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchData {
    pub name: String,
    pub kind: LeafKind,
    pub values: Column,
}

/// A tree read back from a file.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeData {
    pub name: String,
    pub title: String,
    pub branches: Vec<BranchData>,
    /// Source header, when the tree was produced from ARFF input.
    pub header: Option<Header>,
}

impl TreeData {
    /// Number of entries (rows).
    #[must_use]
    pub fn entries(&self) -> usize {
        self.branches.first().map_or(0, |b| b.values.len())
    }

    #[must_use]
    pub fn branch(&self, name: &str) -> Option<&BranchData> {
        self.branches.iter().find(|b| b.name == name)
    }

    /// Branch names in declaration order.
    #[must_use]
    pub fn branch_names(&self) -> Vec<&str> {
        self.branches.iter().map(|b| b.name.as_str()).collect()
    }
}

fn leaf_kind(field: &Field) -> Option<LeafKind> {
    field
        .metadata()
        .get(LEAF_KEY)
        .and_then(|tag| tag.chars().next())
        .and_then(LeafKind::from_tag)
        .or_else(|| LeafKind::from_data_type(field.data_type()))
}

/// Read every branch of the tree stored at `path`.
///
/// # Errors
/// Returns [`Error::ReadTree`] if the file cannot be opened, is not a tree
/// file, or holds a column type with no leaf mapping.
pub fn read_tree(path: impl AsRef<Path>) -> Result<TreeData> {
    let path = path.as_ref();
    let fail = |message: String| Error::ReadTree {
        path: path.to_path_buf(),
        message,
    };

    let file = File::open(path).map_err(|e| fail(e.to_string()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| fail(e.to_string()))?;
    let schema = builder.schema().clone();
    let metadata = schema.metadata();

    let name = metadata
        .get(TREE_NAME_KEY)
        .cloned()
        .ok_or_else(|| fail(format!("missing {TREE_NAME_KEY} metadata")))?;
    let title = metadata.get(TREE_TITLE_KEY).cloned().unwrap_or_default();
    let header = metadata
        .get(ARFF_HEADER_KEY)
        .map(|json| serde_json::from_str::<Header>(json))
        .transpose()
        .map_err(|e| fail(format!("invalid {ARFF_HEADER_KEY} metadata: {e}")))?;

    let mut branches = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let kind = leaf_kind(field)
            .ok_or_else(|| fail(format!("column [{}] has no leaf mapping", field.name())))?;
        branches.push(BranchData {
            name: field.name().clone(),
            kind,
            values: Column::new(kind),
        });
    }

    let reader = builder.build().map_err(|e| fail(e.to_string()))?;
    for batch in reader {
        let batch = batch.map_err(|e| fail(e.to_string()))?;
        for (branch, array) in branches.iter_mut().zip(batch.columns()) {
            if !branch.values.extend_from(array.as_ref()) {
                return Err(fail(format!(
                    "column [{}] does not hold {} values",
                    branch.name, branch.kind
                )));
            }
        }
    }

    Ok(TreeData {
        name,
        title,
        branches,
        header,
    })
}
