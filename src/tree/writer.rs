//! Entry-at-a-time tree writer over Parquet.
//!
//! A [`TreeWriter`] owns one scalar slot per branch. Callers overwrite the
//! slots, then call [`TreeWriter::fill`] to append them as one entry. Entries
//! collect in per-branch baskets that are flushed as a single record batch
//! every `basket_size` entries and once more on [`TreeWriter::close`].
//!
//! The branch layout is frozen by the first `fill` (or by `close` for an
//! empty tree); that is when the Arrow schema is built and the Parquet writer
//! is opened on the already-created file.

use super::leaf::{LeafKind, Scalar};
use super::{BRANCH_TYPE_KEY, ENCODING_KEY, LEAF_KEY, TREE_NAME_KEY, TREE_TITLE_KEY};
use crate::error::{Error, Result};
use arrow::array::{ArrayRef, Float64Builder, Int64Builder, StringBuilder};
use arrow::datatypes::{Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::errors::ParquetError;
use parquet::file::properties::WriterProperties;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// Default number of entries buffered per branch before a flush.
pub const DEFAULT_BASKET_SIZE: usize = 32_000;

enum Basket {
    Long(Int64Builder),
    Double(Float64Builder),
    Text(StringBuilder),
}

impl Basket {
    fn new(kind: LeafKind, capacity: usize) -> Self {
        match kind {
            LeafKind::Long => Self::Long(Int64Builder::with_capacity(capacity)),
            LeafKind::Double => Self::Double(Float64Builder::with_capacity(capacity)),
            LeafKind::String => Self::Text(StringBuilder::with_capacity(capacity, capacity * 8)),
        }
    }

    fn push(&mut self, slot: &Scalar) -> bool {
        match (self, slot) {
            (Self::Long(b), Scalar::Long(v)) => b.append_value(*v),
            (Self::Double(b), Scalar::Double(v)) => b.append_value(*v),
            (Self::Text(b), Scalar::Text(v)) => b.append_value(v),
            _ => return false,
        }
        true
    }

    fn finish(&mut self) -> ArrayRef {
        match self {
            Self::Long(b) => Arc::new(b.finish()) as ArrayRef,
            Self::Double(b) => Arc::new(b.finish()) as ArrayRef,
            Self::Text(b) => Arc::new(b.finish()) as ArrayRef,
        }
    }
}

struct Branch {
    name: String,
    kind: LeafKind,
    slot: Scalar,
    basket: Basket,
}

/// Name, branch layout, and entry count of a closed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSummary {
    pub name: String,
    pub title: String,
    pub branches: Vec<(String, LeafKind)>,
    pub entries: u64,
}

/// Writes one named tree into a fresh Parquet file.
pub struct TreeWriter {
    name: String,
    title: String,
    path: PathBuf,
    file: Option<File>,
    writer: Option<(ArrowWriter<File>, SchemaRef)>,
    branches: Vec<Branch>,
    metadata: HashMap<String, String>,
    basket_size: usize,
    pending: usize,
    entries: u64,
}

impl TreeWriter {
    /// Create (or truncate) the file at `path` for a tree called `name`.
    ///
    /// # Errors
    /// Returns [`Error::CreateOutput`] if the file cannot be created.
    pub fn create(path: impl AsRef<Path>, name: &str, title: &str) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| Error::CreateOutput {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            title: title.to_string(),
            path,
            file: Some(file),
            writer: None,
            branches: Vec::new(),
            metadata: HashMap::new(),
            basket_size: DEFAULT_BASKET_SIZE,
            pending: 0,
            entries: 0,
        })
    }

    /// Set how many entries each branch buffers before a flush (minimum 1).
    #[must_use]
    pub fn with_basket_size(mut self, basket_size: usize) -> Self {
        self.basket_size = basket_size.max(1);
        self
    }

    /// Number of entries appended so far.
    #[must_use]
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Attach a key/value pair to the tree's schema metadata.
    ///
    /// # Errors
    /// Returns [`Error::Branch`] once the layout is frozen.
    pub fn set_metadata(&mut self, key: &str, value: String) -> Result<()> {
        if self.writer.is_some() {
            return Err(Error::Branch {
                branch: key.to_string(),
                message: format!("tree [{}] already has entries", self.name),
            });
        }
        self.metadata.insert(key.to_string(), value);
        Ok(())
    }

    /// Declare a branch and return its slot index.
    ///
    /// # Errors
    /// Returns [`Error::Branch`] for an empty or duplicate name, or once the
    /// layout is frozen.
    pub fn branch(&mut self, name: &str, kind: LeafKind) -> Result<usize> {
        let fail = |message: String| Error::Branch {
            branch: name.to_string(),
            message,
        };
        if self.writer.is_some() {
            return Err(fail(format!("tree [{}] already has entries", self.name)));
        }
        if name.is_empty() {
            return Err(fail("branch name is empty".to_string()));
        }
        if self.branches.iter().any(|b| b.name == name) {
            return Err(fail(format!("duplicate branch in tree [{}]", self.name)));
        }
        debug!(tree = %self.name, branch = %kind.branch_type(name), "declared branch");
        self.branches.push(Branch {
            name: name.to_string(),
            kind,
            slot: kind.initial_value(),
            basket: Basket::new(kind, self.basket_size.min(DEFAULT_BASKET_SIZE)),
        });
        Ok(self.branches.len() - 1)
    }

    /// Mutable access to one branch slot.
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Scalar> {
        self.branches.get_mut(index).map(|b| &mut b.slot)
    }

    /// All branch slots, in declaration order.
    pub fn slots_mut(&mut self) -> impl Iterator<Item = &mut Scalar> {
        self.branches.iter_mut().map(|b| &mut b.slot)
    }

    /// Append the current slot values as one entry.
    ///
    /// # Errors
    /// Returns [`Error::Fill`] if a slot no longer matches its branch kind, or
    /// an I/O error if a basket flush fails.
    pub fn fill(&mut self) -> Result<()> {
        self.open()?;
        for branch in &mut self.branches {
            if !branch.basket.push(&branch.slot) {
                return Err(Error::Fill {
                    tree: self.name.clone(),
                    entry: self.entries,
                    source: arrow::error::ArrowError::InvalidArgumentError(format!(
                        "branch [{}] holds a {} value, expected {}",
                        branch.name,
                        branch.slot.kind(),
                        branch.kind
                    )),
                });
            }
        }
        self.entries += 1;
        self.pending += 1;
        trace!(tree = %self.name, entry = self.entries, "filled entry");
        if self.pending >= self.basket_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Write all buffered entries as one record batch.
    ///
    /// # Errors
    /// Returns an error if the batch cannot be assembled or written.
    pub fn flush(&mut self) -> Result<()> {
        if self.pending == 0 {
            return Ok(());
        }
        self.open()?;
        let arrays: Vec<ArrayRef> = self.branches.iter_mut().map(|b| b.basket.finish()).collect();
        let Some((writer, schema)) = self.writer.as_mut() else {
            return Err(self.not_open());
        };
        let batch = RecordBatch::try_new(schema.clone(), arrays).map_err(|source| Error::Fill {
            tree: self.name.clone(),
            entry: self.entries,
            source,
        })?;
        writer.write(&batch).map_err(|source| Error::WriteTree {
            tree: self.name.clone(),
            source,
        })?;
        debug!(tree = %self.name, rows = self.pending, entries = self.entries, "flushed basket");
        self.pending = 0;
        Ok(())
    }

    /// Flush remaining entries, write the file footer, and close the file.
    ///
    /// # Errors
    /// Returns [`Error::WriteTree`] if the final write fails.
    pub fn close(mut self) -> Result<TreeSummary> {
        self.open()?;
        self.flush()?;
        let Some((writer, _)) = self.writer.take() else {
            return Err(self.not_open());
        };
        writer.close().map_err(|source| Error::WriteTree {
            tree: self.name.clone(),
            source,
        })?;
        Ok(TreeSummary {
            name: self.name,
            title: self.title,
            branches: self
                .branches
                .into_iter()
                .map(|b| (b.name, b.kind))
                .collect(),
            entries: self.entries,
        })
    }

    fn not_open(&self) -> Error {
        Error::WriteTree {
            tree: self.name.clone(),
            source: ParquetError::General("tree writer is not open".to_string()),
        }
    }

    /// Freeze the branch layout and start the Parquet writer.
    fn open(&mut self) -> Result<()> {
        if self.writer.is_some() {
            return Ok(());
        }
        let Some(file) = self.file.take() else {
            return Err(self.not_open());
        };

        let fields: Vec<Field> = self
            .branches
            .iter()
            .map(|b| {
                Field::new(&b.name, b.kind.data_type(), false).with_metadata(HashMap::from([
                    (LEAF_KEY.to_string(), b.kind.tag().to_string()),
                    (ENCODING_KEY.to_string(), b.kind.encoding().to_string()),
                    (BRANCH_TYPE_KEY.to_string(), b.kind.branch_type(&b.name)),
                ]))
            })
            .collect();
        let mut metadata = self.metadata.clone();
        metadata.insert(TREE_NAME_KEY.to_string(), self.name.clone());
        metadata.insert(TREE_TITLE_KEY.to_string(), self.title.clone());
        let schema: SchemaRef = Arc::new(Schema::new_with_metadata(fields, metadata));

        let props = WriterProperties::builder().build();
        let writer = ArrowWriter::try_new(file, schema.clone(), Some(props)).map_err(|source| {
            Error::WriteTree {
                tree: self.name.clone(),
                source,
            }
        })?;
        debug!(
            tree = %self.name,
            path = %self.path.display(),
            branches = self.branches.len(),
            "opened tree writer"
        );
        self.writer = Some((writer, schema));
        Ok(())
    }
}
