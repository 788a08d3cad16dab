//! # arff2tree
//!
//! Convert data files in the attribute-relation file format (ARFF), optionally
//! gzip-compressed, into columnar **tree** files: one named table whose
//! statically typed **branches** mirror the ARFF attributes.
//!
//! ## Pipeline
//!
//! The conversion is a single sequential pass:
//!
//! 1. [`io::open_input`] opens the file, decompressing `.gz` inputs.
//! 2. [`arff::Decoder`] parses the header (relation name + typed attributes).
//! 3. [`tree::LeafKind::for_attribute`] maps every attribute to a leaf kind:
//!    `integer` → `long`, `real`/`numeric` → `double`, nominal → `string`.
//!    Any other kind aborts the run before a single row is read.
//! 4. [`tree::TreeWriter`] declares one branch per attribute.
//! 5. Each decoded [`arff::Row`] is copied into the branch slots with
//!    [`convert::transfer`] and appended with [`tree::TreeWriter::fill`].
//! 6. The tree is closed and the file footer written.
//!
//! Every error is fatal; see [`Error`] and [`ErrorCategory`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use arff2tree::{convert, ConvertOptions};
//! # fn main() -> anyhow::Result<()> {
//! let summary = convert("weather.arff.gz", "weather.parquet", &ConvertOptions::default())?;
//! println!("{}: {} entries", summary.relation, summary.entries);
//!
//! let tree = arff2tree::tree::read_tree("weather.parquet")?;
//! assert_eq!(tree.name, summary.relation);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `compression-gzip` (default): transparent `.gz` input via `flate2`.

pub mod arff;
pub mod cli;
pub mod convert;
pub mod error;
pub mod io;
pub mod testing;
pub mod tree;

pub use convert::{ConversionSummary, ConvertOptions, convert, convert_reader};
pub use error::{Error, ErrorCategory, Result};
