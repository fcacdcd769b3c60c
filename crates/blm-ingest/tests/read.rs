use std::io::Write;

use blm_ingest::{IngestError, check_file_size_with_limit, read_csv_table, read_table};
use blm_model::ErrorKind;
use rust_xlsxwriter::Workbook;
use tempfile::NamedTempFile;

fn create_temp_csv(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file
}

#[test]
fn reads_devanagari_blocklist() {
    let file = create_temp_csv("citizenship_number,name\n१२३,राम थापा\n,सीता के.सि\n".as_bytes());
    let table = read_csv_table(file.path()).unwrap();

    assert_eq!(table.frame.height(), 2);
    assert_eq!(table.path, file.path());
    let names = table.frame.column("name").unwrap().str().unwrap();
    assert_eq!(names.get(0), Some("राम थापा"));
}

#[test]
fn fingerprint_is_sha256_of_raw_bytes() {
    let file = create_temp_csv(b"a\n1\n");
    let table = read_csv_table(file.path()).unwrap();
    assert_eq!(table.sha256.len(), 64);
    let again = read_csv_table(file.path()).unwrap();
    assert_eq!(table.sha256, again.sha256);

    let other = create_temp_csv(b"a\n2\n");
    assert_ne!(read_csv_table(other.path()).unwrap().sha256, table.sha256);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_csv_table(&dir.path().join("ledger.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn size_limit_is_enforced() {
    let file = create_temp_csv(b"name\nRam\nSita\n");
    let err = check_file_size_with_limit(file.path(), 4).unwrap_err();
    assert!(matches!(err, IngestError::FileTooLarge { max_size: 4, .. }));
    check_file_size_with_limit(file.path(), 1024).unwrap();
}

#[test]
fn non_utf8_file_is_encoding_error() {
    let file = create_temp_csv(b"name\n\xA4\xA4\n");
    let err = read_csv_table(file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Encoding);
}

#[test]
fn reads_first_sheet_of_workbook_as_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blocklist.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "citizenship_number").unwrap();
    sheet.write_string(0, 1, "name").unwrap();
    sheet.write_string(1, 0, "0012").unwrap();
    sheet.write_string(1, 1, "राम थापा").unwrap();
    sheet.write_number(2, 0, 123_456.0).unwrap();
    sheet.write_string(2, 1, "Sita").unwrap();
    sheet.write_string(3, 1, "Hari").unwrap();
    workbook.add_worksheet().write_string(0, 0, "ignored").unwrap();
    workbook.save(&path).unwrap();

    let table = read_table(&path).unwrap();

    assert_eq!(table.frame.height(), 3);
    assert_eq!(table.sha256.len(), 64);
    for column in table.frame.get_columns() {
        assert_eq!(column.dtype(), &polars::prelude::DataType::String);
    }
    let ids = table.frame.column("citizenship_number").unwrap().str().unwrap();
    assert_eq!(ids.get(0), Some("0012"));
    assert_eq!(ids.get(1), Some("123456"));
    assert_eq!(ids.get(2), None);
    let names = table.frame.column("name").unwrap().str().unwrap();
    assert_eq!(names.get(0), Some("राम थापा"));
}

#[test]
fn workbook_with_blank_header_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "CUS_LEG_ID").unwrap();
    sheet.write_string(0, 2, "name").unwrap();
    sheet.write_string(1, 0, "1").unwrap();
    workbook.save(&path).unwrap();

    let err = read_table(&path).unwrap_err();
    assert!(matches!(err, IngestError::EmptyColumnName { .. }));
}

#[test]
fn read_table_falls_back_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.txt");
    std::fs::write(&path, "CUS_LEG_ID,name\n007,Ram\n").unwrap();
    let table = read_table(&path).unwrap();
    let ids = table.frame.column("CUS_LEG_ID").unwrap().str().unwrap();
    assert_eq!(ids.get(0), Some("007"));
}

#[test]
fn corrupt_workbook_is_a_data_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();
    let err = read_table(&path).unwrap_err();
    assert!(matches!(err, IngestError::Workbook { .. }));
    assert_eq!(err.kind(), ErrorKind::Data);
}
