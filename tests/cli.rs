use arff2tree::cli::Cli;
use arff2tree::convert::DEFAULT_TITLE;
use arff2tree::tree::DEFAULT_BASKET_SIZE;
use arff2tree::{ConvertOptions, Error};
use clap::Parser;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("arff2tree").chain(args.iter().copied()))
        .expect("arguments parse")
}

fn paths(args: &[&str]) -> Result<(PathBuf, PathBuf), Error> {
    parse(args).resolve_paths()
}

#[test]
fn positional_paths() {
    let (input, output) = paths(&["in.arff", "out.parquet"]).expect("paths");
    assert_eq!(input, PathBuf::from("in.arff"));
    assert_eq!(output, PathBuf::from("out.parquet"));
}

#[test]
fn flag_paths() {
    let (input, output) =
        paths(&["-i", "in.arff.gz", "--output", "out.parquet"]).expect("paths");
    assert_eq!(input, PathBuf::from("in.arff.gz"));
    assert_eq!(output, PathBuf::from("out.parquet"));
}

#[test]
fn flags_win_and_positionals_fill_the_rest() {
    let (input, output) = paths(&["-o", "flag.parquet", "pos.arff"]).expect("paths");
    assert_eq!(input, PathBuf::from("pos.arff"));
    assert_eq!(output, PathBuf::from("flag.parquet"));

    let (input, output) = paths(&["-i", "flag.arff", "pos.parquet"]).expect("paths");
    assert_eq!(input, PathBuf::from("flag.arff"));
    assert_eq!(output, PathBuf::from("pos.parquet"));
}

#[test]
fn missing_paths_is_an_argument_error() {
    for args in [&[][..], &["only.arff"][..], &["-i", "in.arff"][..]] {
        let err = paths(args).unwrap_err();
        assert!(matches!(err, Error::MissingPaths), "{args:?}");
        assert_eq!(err.category(), arff2tree::ErrorCategory::Argument);
    }
}

#[test]
fn more_than_two_positionals_is_rejected() {
    assert!(Cli::try_parse_from(["arff2tree", "a", "b", "c"]).is_err());
}

#[test]
fn options_from_flags() {
    assert_eq!(parse(&["a", "b"]).options(), ConvertOptions::default());

    let options = parse(&["--title", "Run 7", "--basket-size", "128", "a", "b"]).options();
    assert_eq!(options.title, "Run 7");
    assert_eq!(options.basket_size, 128);
    assert_eq!(ConvertOptions::default().title, DEFAULT_TITLE);
    assert_eq!(ConvertOptions::default().basket_size, DEFAULT_BASKET_SIZE);
}

#[test]
fn verbosity_selects_log_level() {
    assert_eq!(parse(&[]).log_level(), "info");
    assert_eq!(parse(&["-v"]).log_level(), "debug");
    assert_eq!(parse(&["-vvv"]).log_level(), "trace");
}

mod binary {
    use anyhow::Result;
    use arff2tree::testing::{WEATHER_ARFF, write_fixture};
    use arff2tree::tree::read_tree;
    use std::ffi::OsStr;
    use std::process::{Command, Output};

    fn run(args: &[&OsStr]) -> Result<Output> {
        Ok(Command::new(env!("CARGO_BIN_EXE_arff2tree"))
            .args(args)
            .env("RUST_LOG", "off")
            .output()?)
    }

    #[test]
    fn missing_output_path_prints_usage() -> Result<()> {
        let out = run(&[OsStr::new("only.arff")])?;
        let stderr = String::from_utf8(out.stderr)?;
        assert_eq!(out.status.code(), Some(1));
        assert!(
            stderr.starts_with("**error** you need to give an input file name"),
            "{stderr}"
        );
        assert!(stderr.contains("Usage:"), "{stderr}");
        Ok(())
    }

    #[test]
    fn failed_conversion_exits_nonzero() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let input = tmp.path().join("absent.arff");
        let output = tmp.path().join("out.parquet");

        let out = run(&[input.as_os_str(), output.as_os_str()])?;
        let stderr = String::from_utf8(out.stderr)?;
        assert_eq!(out.status.code(), Some(1));
        assert!(stderr.starts_with("**error**"), "{stderr}");
        assert!(stderr.contains("absent.arff"), "{stderr}");
        assert!(!output.exists());
        Ok(())
    }

    #[test]
    fn converts_weather_file() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let input = write_fixture(tmp.path(), "weather.arff", WEATHER_ARFF)?;
        let output = tmp.path().join("weather.parquet");

        let out = run(&[OsStr::new("-o"), output.as_os_str(), input.as_os_str()])?;
        assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));

        let tree = read_tree(&output)?;
        assert_eq!(tree.name, "weather");
        assert_eq!(tree.entries(), 5);
        Ok(())
    }
}
