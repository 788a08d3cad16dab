//! ARFF to tree conversion.
//!
//! The conversion is one sequential pass:
//!
//! 1. open the input (gzip-decompressed when the name ends in `.gz`);
//! 2. parse the ARFF header;
//! 3. map every attribute to a leaf kind, rejecting unsupported kinds before
//!    the output is touched;
//! 4. create the output tree and declare one branch per attribute;
//! 5. decode each row, transfer its fields into the branch slots, and fill;
//! 6. close the tree.
//!
//! The first error of any kind aborts the run.

use crate::arff::{Decoder, Header, Row};
use crate::error::{Error, Result};
use crate::io::open_input;
use crate::tree::{DEFAULT_BASKET_SIZE, LeafKind, TreeWriter};
use std::io::BufRead;
use std::path::Path;
use tracing::info;

/// Default tree title.
pub const DEFAULT_TITLE: &str = "ARFF event file";

/// Schema metadata key holding the JSON-encoded ARFF header.
pub const ARFF_HEADER_KEY: &str = "arff.header";

/// Tunables for a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Title stored alongside the tree name.
    pub title: String,
    /// Entries buffered per branch before a flush.
    pub basket_size: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            basket_size: DEFAULT_BASKET_SIZE,
        }
    }
}

impl ConvertOptions {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_basket_size(mut self, basket_size: usize) -> Self {
        self.basket_size = basket_size;
        self
    }

    /// Check option values.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOption`] for a zero basket size.
    pub fn validate(&self) -> Result<()> {
        if self.basket_size == 0 {
            return Err(Error::InvalidOption {
                option: "basket-size",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub relation: String,
    pub branches: usize,
    pub entries: u64,
}

/// Convert the ARFF file at `input` into a tree file at `output`.
///
/// Any existing file at `output` is replaced.
///
/// # Errors
/// Returns the first error hit while opening, decoding, or writing; see
/// [`Error`] for the taxonomy.
pub fn convert(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<ConversionSummary> {
    let reader = open_input(input.as_ref())?;
    convert_reader(reader, output, options)
}

/// Convert ARFF text read from `reader` into a tree file at `output`.
///
/// # Errors
/// See [`convert`].
pub fn convert_reader<R: BufRead>(
    reader: R,
    output: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<ConversionSummary> {
    options.validate()?;

    let mut decoder = Decoder::new(reader)?;
    let header = decoder.header().clone();
    info!(
        relation = %header.relation,
        attributes = header.len(),
        "arff file"
    );

    let kinds = plan_branches(&header)?;
    let header_json = serde_json::to_string(&header).map_err(|source| Error::Metadata {
        key: ARFF_HEADER_KEY,
        source,
    })?;

    let mut tree = TreeWriter::create(output.as_ref(), &header.relation, &options.title)?
        .with_basket_size(options.basket_size);
    tree.set_metadata(ARFF_HEADER_KEY, header_json)?;
    for (attr, kind) in header.attributes.iter().zip(kinds) {
        tree.branch(&attr.name, kind)?;
    }

    let mut row = Row::new();
    while decoder.decode(&mut row)? {
        transfer(&header, &row, &mut tree)?;
        tree.fill()?;
    }

    let summary = tree.close()?;
    info!(
        tree = %summary.name,
        branches = summary.branches.len(),
        entries = summary.entries,
        output = %output.as_ref().display(),
        "wrote tree"
    );
    Ok(ConversionSummary {
        relation: summary.name,
        branches: summary.branches.len(),
        entries: summary.entries,
    })
}

/// Leaf kind for every attribute, in header order.
///
/// # Errors
/// Returns [`Error::UnsupportedAttributeKind`] for the first attribute whose
/// kind has no branch mapping.
pub fn plan_branches(header: &Header) -> Result<Vec<LeafKind>> {
    header.attributes.iter().map(LeafKind::for_attribute).collect()
}

/// Copy one decoded row into the tree's branch slots.
///
/// # Errors
/// Returns [`Error::MissingValue`] when the row lacks an attribute and
/// [`Error::TypeMismatch`] when a value does not fit its branch.
pub fn transfer(header: &Header, row: &Row, tree: &mut TreeWriter) -> Result<()> {
    for (attr, slot) in header.attributes.iter().zip(tree.slots_mut()) {
        let value = row.get(&attr.name).ok_or_else(|| Error::MissingValue {
            attribute: attr.name.clone(),
        })?;
        let expected = slot.kind();
        slot.assign(value).map_err(|found| Error::TypeMismatch {
            attribute: attr.name.clone(),
            expected,
            found,
        })?;
    }
    Ok(())
}
