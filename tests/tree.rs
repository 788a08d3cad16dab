use anyhow::Result;
use arff2tree::Error;
use arff2tree::tree::*;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::fs::File;

#[test]
fn writes_declared_branches_and_entries() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("events.parquet");

    let mut tree = TreeWriter::create(&path, "events", "test events")?;
    assert_eq!(tree.branch("id", LeafKind::Long)?, 0);
    assert_eq!(tree.branch("energy", LeafKind::Double)?, 1);
    assert_eq!(tree.branch("label", LeafKind::String)?, 2);

    for (id, energy, label) in [(1, 0.5, "a"), (2, 1.5, "bb"), (3, 2.5, "")] {
        *tree.slot_mut(0).expect("slot") = Scalar::Long(id);
        *tree.slot_mut(1).expect("slot") = Scalar::Double(energy);
        *tree.slot_mut(2).expect("slot") = Scalar::Text(label.to_string());
        tree.fill()?;
    }
    assert_eq!(tree.entries(), 3);

    let summary = tree.close()?;
    assert_eq!(summary.name, "events");
    assert_eq!(summary.entries, 3);
    assert_eq!(
        summary.branches,
        vec![
            ("id".to_string(), LeafKind::Long),
            ("energy".to_string(), LeafKind::Double),
            ("label".to_string(), LeafKind::String),
        ]
    );

    let data = read_tree(&path)?;
    assert_eq!(data.name, "events");
    assert_eq!(data.title, "test events");
    assert_eq!(data.header, None);
    assert_eq!(
        data.branch("id").map(|b| &b.values),
        Some(&Column::Long(vec![1, 2, 3]))
    );
    assert_eq!(
        data.branch("energy").map(|b| &b.values),
        Some(&Column::Double(vec![0.5, 1.5, 2.5]))
    );
    assert_eq!(
        data.branch("label").map(|b| &b.values),
        Some(&Column::Text(vec!["a".into(), "bb".into(), String::new()]))
    );
    Ok(())
}

#[test]
fn schema_carries_leaf_metadata() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("meta.parquet");

    let mut tree = TreeWriter::create(&path, "meta", "title")?;
    tree.branch("n", LeafKind::Long)?;
    tree.branch("x", LeafKind::Double)?;
    tree.branch("s", LeafKind::String)?;
    tree.fill()?;
    tree.close()?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(&path)?)?;
    let schema = builder.schema();
    assert_eq!(
        schema.metadata().get(TREE_NAME_KEY).map(String::as_str),
        Some("meta")
    );
    assert_eq!(
        schema.metadata().get(TREE_TITLE_KEY).map(String::as_str),
        Some("title")
    );

    let expect = [
        ("n", DataType::Int64, "L", "long", "n/L"),
        ("x", DataType::Float64, "D", "double", "x/D"),
        ("s", DataType::Utf8, "C", "string", "s/C"),
    ];
    for (field, (name, data_type, tag, encoding, branch_type)) in
        schema.fields().iter().zip(expect)
    {
        assert_eq!(field.name(), name);
        assert_eq!(field.data_type(), &data_type);
        assert!(!field.is_nullable());
        let meta = |key: &str| field.metadata().get(key).cloned();
        assert_eq!(meta(LEAF_KEY).as_deref(), Some(tag));
        assert_eq!(meta(ENCODING_KEY).as_deref(), Some(encoding));
        assert_eq!(meta(BRANCH_TYPE_KEY).as_deref(), Some(branch_type));
    }
    Ok(())
}

#[test]
fn unfilled_slots_hold_initial_values() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("init.parquet");

    let mut tree = TreeWriter::create(&path, "init", "")?;
    tree.branch("n", LeafKind::Long)?;
    tree.branch("x", LeafKind::Double)?;
    tree.branch("s", LeafKind::String)?;
    tree.fill()?;
    tree.close()?;

    let data = read_tree(&path)?;
    assert_eq!(data.branches[0].values, Column::Long(vec![0]));
    assert_eq!(data.branches[1].values, Column::Double(vec![-999.0]));
    assert_eq!(data.branches[2].values, Column::Text(vec![String::new()]));
    Ok(())
}

#[test]
fn basket_flushes_keep_every_entry() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("baskets.parquet");

    let mut tree = TreeWriter::create(&path, "baskets", "")?.with_basket_size(10);
    tree.branch("i", LeafKind::Long)?;
    for i in 0..25 {
        for slot in tree.slots_mut() {
            *slot = Scalar::Long(i);
        }
        tree.fill()?;
    }
    tree.close()?;

    let reader = SerializedFileReader::new(File::open(&path)?)?;
    let total: i64 = (0..reader.metadata().num_row_groups())
        .map(|g| reader.metadata().row_group(g).num_rows())
        .sum();
    assert_eq!(total, 25);
    assert_eq!(
        read_tree(&path)?.branches[0].values,
        Column::Long((0..25).collect())
    );
    Ok(())
}

#[test]
fn empty_tree_keeps_its_branches() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("empty.parquet");

    let mut tree = TreeWriter::create(&path, "empty", "")?;
    tree.branch("a", LeafKind::Double)?;
    let summary = tree.close()?;
    assert_eq!(summary.entries, 0);

    let data = read_tree(&path)?;
    assert_eq!(data.branch_names(), vec!["a"]);
    assert_eq!(data.entries(), 0);
    Ok(())
}

#[test]
fn rejects_bad_branch_declarations() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let mut tree = TreeWriter::create(tmp.path().join("bad.parquet"), "bad", "")?;

    tree.branch("a", LeafKind::Long)?;
    assert!(matches!(
        tree.branch("a", LeafKind::Double),
        Err(Error::Branch { .. })
    ));
    assert!(matches!(
        tree.branch("", LeafKind::Double),
        Err(Error::Branch { .. })
    ));

    tree.fill()?;
    let err = tree.branch("late", LeafKind::Double).unwrap_err();
    assert!(err.to_string().contains("[late]"));
    assert!(tree.set_metadata("k", "v".to_string()).is_err());
    Ok(())
}

#[test]
fn fill_rejects_slot_of_wrong_kind() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let mut tree = TreeWriter::create(tmp.path().join("wrong.parquet"), "wrong", "")?;
    tree.branch("a", LeafKind::Long)?;
    *tree.slot_mut(0).expect("slot") = Scalar::Text("oops".into());

    let err = tree.fill().unwrap_err();
    assert!(matches!(err, Error::Fill { entry: 0, .. }));
    Ok(())
}

#[test]
fn reading_a_non_tree_file_fails() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("junk.parquet");
    std::fs::write(&path, b"not parquet")?;
    assert!(matches!(read_tree(&path), Err(Error::ReadTree { .. })));
    Ok(())
}
