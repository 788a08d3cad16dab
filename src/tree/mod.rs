//! Columnar tree output.
//!
//! A *tree* is a named table of fixed-type *branches*; each appended row is an
//! *entry*. Trees are stored as Parquet files:
//!
//! - one non-nullable column per branch, in declaration order
//!   (`Int64` / `Float64` / `Utf8` for `long` / `double` / `string` leaves);
//! - the tree name and title in the schema metadata ([`TREE_NAME_KEY`],
//!   [`TREE_TITLE_KEY`]);
//! - the leaf tag, encoding, and `name/tag` branch type in each field's
//!   metadata ([`LEAF_KEY`], [`ENCODING_KEY`], [`BRANCH_TYPE_KEY`]).
//!
//! Use [`TreeWriter`] to write and [`read_tree`] to load a tree back.

mod leaf;
mod reader;
mod writer;

pub use leaf::{LeafKind, Scalar};
pub use reader::{BranchData, Column, TreeData, read_tree};
pub use writer::{DEFAULT_BASKET_SIZE, TreeSummary, TreeWriter};

/// Schema metadata key holding the tree name.
pub const TREE_NAME_KEY: &str = "tree.name";
/// Schema metadata key holding the tree title.
pub const TREE_TITLE_KEY: &str = "tree.title";
/// Field metadata key holding the single-character leaf tag.
pub const LEAF_KEY: &str = "tree.leaf";
/// Field metadata key holding the leaf encoding name.
pub const ENCODING_KEY: &str = "tree.encoding";
/// Field metadata key holding the `name/tag` branch type string.
pub const BRANCH_TYPE_KEY: &str = "tree.branch_type";
