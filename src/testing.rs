//! Fixtures for testing conversions.
//!
//! ```
//! use arff2tree::testing::*;
//! # fn main() -> anyhow::Result<()> {
//! let dir = tempfile::tempdir()?;
//! let input = write_fixture(dir.path(), "weather.arff", WEATHER_ARFF)?;
//! assert!(input.exists());
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Small dataset covering every supported attribute kind.
///
/// Five rows; `outlook` and `play` are nominal, `temperature` is real,
/// `humidity` is numeric, and `windy` is integer.
pub const WEATHER_ARFF: &str = "\
% Classic weather data
@relation weather

@attribute outlook {sunny, overcast, rainy}
@attribute temperature real
@attribute humidity numeric
@attribute windy integer
@attribute play {yes, no}

@data
sunny,85.0,85,0,no
sunny,80.5,90,1,no
overcast,83,86,0,yes
rainy,70.25,96,0,yes
'rainy',68,80,0,yes
";

/// Header declaring a `string` attribute, which has no branch mapping.
pub const UNSUPPORTED_ARFF: &str = "\
@relation notes
@attribute id integer
@attribute note string
@data
1,'first'
";

/// Row values of [`WEATHER_ARFF`], column by column.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherColumns {
    pub outlook: Vec<&'static str>,
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
    pub windy: Vec<i64>,
    pub play: Vec<&'static str>,
}

/// Expected column contents for [`WEATHER_ARFF`].
#[must_use]
pub fn weather_columns() -> WeatherColumns {
    WeatherColumns {
        outlook: vec!["sunny", "sunny", "overcast", "rainy", "rainy"],
        temperature: vec![85.0, 80.5, 83.0, 70.25, 68.0],
        humidity: vec![85.0, 90.0, 86.0, 96.0, 80.0],
        windy: vec![0, 1, 0, 0, 0],
        play: vec!["no", "no", "yes", "yes", "yes"],
    }
}

/// Write `contents` to `dir/name` and return the path.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// Write `contents` gzip-compressed to `dir/name` and return the path.
///
/// # Errors
/// Returns an error if the file cannot be written.
#[cfg(feature = "compression-gzip")]
pub fn write_gzip_fixture(dir: &Path, name: &str, contents: &str) -> io::Result<PathBuf> {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let path = dir.join(name);
    let mut encoder = GzEncoder::new(fs::File::create(&path)?, Compression::default());
    encoder.write_all(contents.as_bytes())?;
    encoder.finish()?;
    Ok(path)
}
