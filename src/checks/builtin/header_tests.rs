use std::path::Path;

use super::*;
use crate::checks::Status;

fn run(text: &str) -> CheckResult {
    let langs = Vec::new();
    EnsureHeaderAndRows
        .run(&CheckInput::new(text.as_bytes(), Path::new("g.csv"), &langs))
        .unwrap()
}

#[test]
fn metadata() {
    assert_eq!(EnsureHeaderAndRows.name(), "ensure-header-and-rows");
    assert_eq!(EnsureHeaderAndRows.priority(), 3);
    assert!(EnsureHeaderAndRows.fail_fast());
    assert!(EnsureHeaderAndRows.fixer().is_some());
}

#[test]
fn valid_file_passes() {
    let res = run("term;description;en\napple;fruit;apple\n");
    assert_eq!(res.status, Status::Pass, "{}", res.message);
}

#[test]
fn empty_file_fails() {
    let res = run("");
    assert_eq!(res.status, Status::Fail);
    assert!(res.message.contains("Empty file"));
}

#[test]
fn comma_delimiter_is_reported() {
    let res = run("term,description\napple,fruit\n");
    assert_eq!(res.status, Status::Fail);
    assert!(res.message.contains("','"));
}

#[test]
fn tab_delimiter_is_reported() {
    let res = run("term\tdescription\napple\tfruit\n");
    assert!(res.message.contains("TAB"));
}

#[test]
fn mixed_delimiters_are_reported() {
    let res = run("term;description,en\n");
    assert!(res.message.contains("mixed"));
}

#[test]
fn missing_required_column() {
    let res = run("term;notes\napple;x\n");
    assert_eq!(res.status, Status::Fail);
    assert!(res.message.contains("description"));
}

#[test]
fn wrong_column_order() {
    let res = run("description;term\nfruit;apple\n");
    assert_eq!(res.status, Status::Fail);
    assert!(res.message.contains("found term at #2, description at #1"));
}

#[test]
fn bom_and_case_are_tolerated() {
    let res = run("\u{feff}Term;DESCRIPTION\napple;fruit\n");
    assert_eq!(res.status, Status::Pass, "{}", res.message);
}

#[test]
fn blank_lines_after_header_fail() {
    let res = run("term;description\n\napple;fruit\n  \npear;fruit\n");
    assert_eq!(res.status, Status::Fail);
    assert!(res.message.contains("row(s): 2, 4"), "{}", res.message);
}

#[test]
fn field_count_mismatch_fails() {
    let res = run("term;description\napple;fruit;extra\n");
    assert_eq!(res.status, Status::Fail);
    assert!(res.message.contains("line 2 has 3 field(s), expected 2"));
}

#[test]
fn header_only_fails() {
    let res = run("term;description\n");
    assert_eq!(res.status, Status::Fail);
    assert!(res.message.contains("No data rows"));
}

#[test]
fn fix_removes_blank_lines_and_then_passes() {
    let langs = Vec::new();
    let data = b"term;description\n\napple;fruit\n\n";
    let input = CheckInput::new(data, Path::new("g.csv"), &langs);

    let out = EnsureHeaderAndRows.fix(&input).unwrap();

    assert_eq!(out.data, b"term;description\napple;fruit\n");
    assert!(out.note.contains("removed 2"));
    let again = EnsureHeaderAndRows.run(&input.with_data(&out.data)).unwrap();
    assert_eq!(again.status, Status::Pass);
}

#[test]
fn invalid_utf8_is_a_check_error() {
    let langs = Vec::new();
    let input = CheckInput::new(&[0xff, 0xfe], Path::new("g.csv"), &langs);
    assert!(matches!(
        EnsureHeaderAndRows.run(&input),
        Err(CheckError::Malformed(_))
    ));
}

#[test]
fn blank_line_inside_quoted_cell_is_content() {
    let text = "term;description\napple;\"line1\n\nline2\"\npear;fruit\n";
    let res = run(text);
    assert_eq!(res.status, Status::Pass, "{}", res.message);

    let langs = Vec::new();
    let input = CheckInput::new(text.as_bytes(), Path::new("g.csv"), &langs);
    let out = EnsureHeaderAndRows.fix(&input).unwrap();
    assert_eq!(out.data, text.as_bytes());
    assert!(out.note.contains("removed 0"));
}

#[test]
fn fix_keeps_quoted_cell_while_dropping_real_blank_lines() {
    let langs = Vec::new();
    let data = b"term;description\napple;\"a\n\nb\"\n\npear;fruit\n";
    let input = CheckInput::new(data, Path::new("g.csv"), &langs);

    let res = EnsureHeaderAndRows.run(&input).unwrap();
    assert!(res.message.contains("row(s): 5"), "{}", res.message);

    let out = EnsureHeaderAndRows.fix(&input).unwrap();
    assert_eq!(out.data, b"term;description\napple;\"a\n\nb\"\npear;fruit\n");
    let rows = records::parse(std::str::from_utf8(&out.data).unwrap()).unwrap();
    assert_eq!(rows[1].fields[1], "a\n\nb");
}

#[test]
fn all_empty_data_row_fails() {
    let res = run("term;description\napple;fruit\n;\n");
    assert_eq!(res.status, Status::Fail);
    assert!(res.message.contains("Blank data row is not allowed (line 3)"), "{}", res.message);

    let res = run("term;description\n  ;  \napple;fruit\n");
    assert_eq!(res.status, Status::Fail);
    assert!(res.message.contains("line 2"), "{}", res.message);
}

#[test]
fn unparseable_input_is_left_to_the_check() {
    let langs = Vec::new();
    let data = b"term;description\napple;\"open\n\n";
    let input = CheckInput::new(data, Path::new("g.csv"), &langs);

    let res = EnsureHeaderAndRows.run(&input).unwrap();
    assert_eq!(res.status, Status::Fail);
    assert!(res.message.contains("CSV parse error"), "{}", res.message);
    let out = EnsureHeaderAndRows.fix(&input).unwrap();
    assert_eq!(out.data, data);
}
