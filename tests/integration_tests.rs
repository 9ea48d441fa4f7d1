use tfs_frame::{
    from_binary_slice, from_reader, from_str, from_str_with_options, read_file,
    read_file_with_options, to_binary_vec, to_string, to_string_with_options, write_file, Column,
    ColumnData, ColumnOrder, DataFrame, DataType, Error, ReadOptions, ScalarValue, WriteOptions,
};

const TWISS: &str = "\
@ NAME                 %05s \"TWISS\"
@ TYPE                 %05s \"TWISS\"
@ SEQUENCE             %06s \"LHCB1\"
@ PARTICLE             %06s \"PROTON\"
@ ENERGY               %le  6800
@ Q1                   %le  62.31
@ Q2                   %le  60.32
@ NUMBER_OF_BUNCHES    %d   2556
@ TITLE                %s   \"LHC b1 optics, round\"
* NAME                 KEYWORD   S          BETX       BETY
$ %s                   %s        %le        %le        %le
  \"IP1\"              \"MARKER\" 0          0.55       0.55
  \"MQXA.1R1\"         \"QUADRUPOLE\" 28.3     1759.8     1190.6
  \"IP2\"              \"MARKER\" 3332.4     10.0       10.0
  \"IP5\"              \"MARKER\" 13329.3    0.55       0.55
";

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("tfs_frame_{}_{}", std::process::id(), name))
}

#[test]
fn test_minimal_table() {
    let df = from_str("@ TITLE %s \"t\"\n* A B\n$ %le %s\n1.5 foo\n").unwrap();

    assert_eq!(df.row_count(), 1);
    assert_eq!(df.column_count(), 2);

    let a = df.column_by_name("A").unwrap();
    assert_eq!(a.data_type(), DataType::Float);
    assert_eq!(a.as_floats().unwrap(), &[1.5]);

    let b = df.column_by_name("B").unwrap();
    assert_eq!(b.data_type(), DataType::String);
    assert_eq!(b.as_strings().unwrap(), &["foo".to_string()]);

    assert_eq!(
        df.property_by_name("TITLE").unwrap().value(),
        &ScalarValue::String("\"t\"".to_string())
    );
}

#[test]
fn test_twiss_table() {
    let df = from_str(TWISS).unwrap();

    assert_eq!(df.property_count(), 9);
    assert_eq!(df.column_count(), 5);
    assert_eq!(df.row_count(), 4);
    df.verify().unwrap();

    assert_eq!(
        df.property_by_name("ENERGY").unwrap().value().as_float(),
        Ok(6800.0)
    );
    assert_eq!(
        df.property_by_name("NUMBER_OF_BUNCHES").unwrap().value().as_int(),
        Ok(2556)
    );
    assert_eq!(
        df.property_by_name("TITLE").unwrap().value().as_str(),
        Ok("\"LHC b1 optics, round\"")
    );

    let s = df.column_by_name("S").unwrap().as_floats().unwrap();
    assert_eq!(s, &[0.0, 28.3, 3332.4, 13329.3]);
    let names: Vec<_> = df.column_names().collect();
    assert_eq!(names, vec!["NAME", "KEYWORD", "S", "BETX", "BETY"]);
}

#[test]
fn test_properties_interleaved_with_header() {
    let text = "@ A %d 1\n* X Y\n@ B %d 2\n$ %d %d\n1 2\n";
    let df = from_str(text).unwrap();
    let names: Vec<_> = df.properties().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(df.row_count(), 1);
}

#[test]
fn test_float_complex_coercion_from_property() {
    let df = from_str("@ DQ1 %le 2.5\n").unwrap();
    let value = df.property(0).unwrap().value();
    let c = value.as_complex().unwrap();
    assert_eq!((c.re, c.im), (2.5, 0.0));
    assert!(matches!(value.as_str(), Err(Error::TypeMismatch { .. })));
}

#[test]
fn test_all_types_in_text() {
    let text = "* N X ON Z L\n$ %d %le %b %lz %s\n1 0.5 true 1+2i a\n-2 1e3 0 -0.5-1j b\n";
    let df = from_str(text).unwrap();
    assert_eq!(df.column(0).unwrap().as_ints().unwrap(), &[1, -2]);
    assert_eq!(df.column(1).unwrap().as_floats().unwrap(), &[0.5, 1000.0]);
    assert_eq!(df.column(2).unwrap().as_bools().unwrap(), &[true, false]);
    let z = df.column(3).unwrap().as_complexes().unwrap();
    assert_eq!((z[1].re, z[1].im), (-0.5, -1.0));

    let again = from_str(&to_string(&df).unwrap()).unwrap();
    assert_eq!(again, df);
}

// Hardened behaviour: these inputs were silently accepted as zeros or ragged
// columns before and are now rejected with the offending line.
#[test]
fn test_unparsable_number_is_rejected() {
    let err = from_str("* A\n$ %le\n1.0\n1,5\n").unwrap_err();
    assert_eq!(err, Error::parse(4, "invalid %le token '1,5'"));
}

#[test]
fn test_ragged_row_is_rejected() {
    let err = from_str(TWISS.replace("0.55       0.55\n", "0.55\n").as_str()).unwrap_err();
    assert!(matches!(err, Error::Parse { line: 12, .. }));
}

#[test]
fn test_header_only() {
    let df = from_str("* A B\n$ %s %le\n").unwrap();
    assert_eq!(df.column_count(), 2);
    assert_eq!(df.row_count(), 0);
    assert_eq!(df.column(1).unwrap().name(), "B");
}

#[test]
fn test_crlf_input() {
    let df = from_str("* A\r\n$ %d\r\n4\r\n").unwrap();
    assert_eq!(df.column(0).unwrap().as_ints().unwrap(), &[4]);
}

#[test]
fn test_text_roundtrip_preserves_order() {
    let df = from_str(TWISS).unwrap();
    let text = to_string(&df).unwrap();
    let back = from_str(&text).unwrap();
    assert_eq!(back, df);
    assert_eq!(
        back.column_names().collect::<Vec<_>>(),
        df.column_names().collect::<Vec<_>>()
    );
}

#[test]
fn test_sorted_output_reorders_columns() {
    let df = from_str(TWISS).unwrap();
    let options = WriteOptions::new().with_column_order(ColumnOrder::Sorted);
    let back = from_str(&to_string_with_options(&df, &options).unwrap()).unwrap();
    assert_eq!(
        back.column_names().collect::<Vec<_>>(),
        vec!["BETX", "BETY", "KEYWORD", "NAME", "S"]
    );
    assert_eq!(
        back.column_by_name("S").unwrap(),
        df.column_by_name("S").unwrap()
    );
}

#[test]
fn test_secondary_index() {
    let options = ReadOptions::new().with_index_column("NAME");
    let df = from_str_with_options(TWISS, &options).unwrap();
    let row = df.row_of("\"IP5\"").unwrap();
    assert_eq!(row, 3);
    assert_eq!(
        df.column_by_name("S").unwrap().get(row),
        Ok(ScalarValue::Float(13329.3))
    );
    assert!(matches!(df.row_of("\"IP8\""), Err(Error::NotFound { .. })));
}

#[test]
fn test_index_on_float_column_fails() {
    let options = ReadOptions::new().with_index_column("S");
    assert!(matches!(
        from_str_with_options(TWISS, &options),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn test_from_reader() {
    let df = from_reader(std::io::Cursor::new(TWISS), &ReadOptions::default()).unwrap();
    assert_eq!(df.row_count(), 4);
}

#[test]
fn test_programmatic_frame() {
    let mut df = DataFrame::new();
    df.reserve_columns(2);
    df.add_property("TITLE", "\"built\"");
    df.add_column(Column::from(("X".to_string(), vec![1.0, 2.0])))
        .unwrap();
    df.add_column(Column::from_data("N", ColumnData::Int(vec![1, 2])))
        .unwrap();
    df.reserve_rows(10);

    let back = from_str(&to_string(&df).unwrap()).unwrap();
    assert_eq!(back, df);
}

#[test]
fn test_file_roundtrip_text_and_binary() {
    let df = from_str(&TWISS.replace("%d   2556", "%le  2556")).unwrap();

    let text_path = temp_path("roundtrip.tfs");
    write_file(&df, &text_path).unwrap();
    assert_eq!(read_file(&text_path).unwrap(), df);

    let binary_path = temp_path("roundtrip.btfs");
    write_file(&df, &binary_path).unwrap();
    let options = ReadOptions::new().with_index_column("NAME");
    let from_binary = read_file_with_options(&binary_path, &options).unwrap();
    assert_eq!(from_binary.row_of("\"IP2\""), Ok(2));
    assert_eq!(from_binary.columns(), df.columns());

    std::fs::remove_file(text_path).ok();
    std::fs::remove_file(binary_path).ok();
}

#[test]
fn test_missing_file_is_io_error() {
    let result = read_file(temp_path("does_not_exist.tfs"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_rejected_binary_write_leaves_no_file() {
    let df = from_str("* N\n$ %d\n1\n").unwrap();
    let path = temp_path("rejected.btfs");
    assert!(matches!(
        write_file(&df, &path),
        Err(Error::UnsupportedType { .. })
    ));
    assert!(!path.exists());
}

// Binary strings may hold values the text grammar cannot delimit; the text
// writer refuses them instead of producing an unreadable table.
#[test]
fn test_binary_strings_unfit_for_text_are_rejected() {
    let mut df = DataFrame::new();
    df.add_column(Column::from_data(
        "NAME",
        ColumnData::String(vec![String::new(), "a b".to_string()]),
    ))
    .unwrap();
    df.add_column(Column::from(("S".to_string(), vec![1.0, 2.0])))
        .unwrap();

    let decoded = from_binary_slice(&to_binary_vec(&df).unwrap()).unwrap();
    assert_eq!(decoded, df);
    assert!(matches!(to_string(&decoded), Err(Error::InvalidData(_))));

    let path = temp_path("unfit.tfs");
    assert!(matches!(write_file(&decoded, &path), Err(Error::InvalidData(_))));
    assert!(!path.exists());
}
