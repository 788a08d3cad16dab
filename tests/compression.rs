use anyhow::Result;
use arff2tree::Error;
use arff2tree::io::open_input;
use arff2tree::testing::*;
use std::io::Read;

#[test]
fn plain_input_is_read_as_is() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = write_fixture(tmp.path(), "weather.arff", WEATHER_ARFF)?;

    let mut text = String::new();
    open_input(&path)?.read_to_string(&mut text)?;
    assert_eq!(text, WEATHER_ARFF);
    Ok(())
}

#[cfg(feature = "compression-gzip")]
#[test]
fn gzip_input_is_decompressed() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = write_gzip_fixture(tmp.path(), "weather.arff.gz", WEATHER_ARFF)?;

    let mut text = String::new();
    open_input(&path)?.read_to_string(&mut text)?;
    assert_eq!(text, WEATHER_ARFF);
    Ok(())
}

#[cfg(feature = "compression-gzip")]
#[test]
fn concatenated_gzip_members_are_joined() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let (head, tail) = WEATHER_ARFF.split_at(WEATHER_ARFF.len() / 2);
    let first = write_gzip_fixture(tmp.path(), "a.gz", head)?;
    let second = write_gzip_fixture(tmp.path(), "b.gz", tail)?;

    let mut joined = std::fs::read(first)?;
    joined.extend(std::fs::read(second)?);
    let path = tmp.path().join("joined.arff.gz");
    std::fs::write(&path, joined)?;

    let mut text = String::new();
    open_input(&path)?.read_to_string(&mut text)?;
    assert_eq!(text, WEATHER_ARFF);
    Ok(())
}

#[test]
fn missing_file_names_the_path() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("nope.arff.gz");
    let Err(err) = open_input(&path) else {
        panic!("opening a missing file succeeded");
    };
    assert!(matches!(&err, Error::OpenInput { path: p, .. } if *p == path));
    Ok(())
}
