//! Command-line arguments.
//!
//! Input and output may be given as flags or as the first two positional
//! arguments. Flags win; positionals fill whatever the flags left unset, in
//! order:
//!
//! ```text
//! arff2tree weather.arff weather.parquet
//! arff2tree -i weather.arff.gz -o weather.parquet
//! arff2tree -o weather.parquet weather.arff
//! ```

use crate::convert::{ConvertOptions, DEFAULT_TITLE};
use crate::error::{Error, Result};
use crate::tree::DEFAULT_BASKET_SIZE;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "arff2tree",
    version,
    about = "Convert an ARFF file (optionally .gz) into a columnar tree file"
)]
pub struct Cli {
    /// Input ARFF file to convert from
    #[arg(short, long, value_name = "IN")]
    pub input: Option<PathBuf>,

    /// Output tree file to convert into
    #[arg(short, long, value_name = "OUT")]
    pub output: Option<PathBuf>,

    /// Input and output paths, when not given as flags
    #[arg(value_name = "PATH", num_args = 0..=2)]
    pub paths: Vec<PathBuf>,

    /// Title stored with the tree
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Entries buffered per branch before a flush
    #[arg(long, default_value_t = DEFAULT_BASKET_SIZE)]
    pub basket_size: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Resolve the input and output paths.
    ///
    /// # Errors
    /// Returns [`Error::MissingPaths`] unless both paths are known.
    pub fn resolve_paths(&self) -> Result<(PathBuf, PathBuf)> {
        let mut positional = self.paths.iter().cloned();
        let input = self.input.clone().or_else(|| positional.next());
        let output = self.output.clone().or_else(|| positional.next());
        match (input, output) {
            (Some(input), Some(output)) => Ok((input, output)),
            _ => Err(Error::MissingPaths),
        }
    }

    /// Conversion options from the flags.
    #[must_use]
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions::default()
            .with_title(self.title.clone())
            .with_basket_size(self.basket_size)
    }

    /// Default log filter for the requested verbosity.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
