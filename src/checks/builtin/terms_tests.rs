use std::path::Path;

use super::*;
use crate::checks::Status;

fn input(text: &str) -> (Vec<u8>, Vec<String>) {
    (text.as_bytes().to_vec(), Vec::new())
}

fn run(check: &dyn Check, text: &str) -> Result<CheckResult, CheckError> {
    let (data, langs) = input(text);
    check.run(&CheckInput::new(&data, Path::new("g.csv"), &langs))
}

#[test]
fn non_empty_term_passes() {
    let res = run(&EnsureNonEmptyTerm, "term;description\napple;fruit\n").unwrap();
    assert_eq!(res.status, Status::Pass);
}

#[test]
fn non_empty_term_reports_blank_lines() {
    let res = run(
        &EnsureNonEmptyTerm,
        "term;description\napple;fruit\n  ;no term\n;again\n",
    )
    .unwrap();
    assert_eq!(res.status, Status::Fail);
    assert!(res.message.contains("line(s) 3, 4"), "{}", res.message);
}

#[test]
fn non_empty_term_without_term_column_errors() {
    let err = run(&EnsureNonEmptyTerm, "word;description\napple;fruit\n").unwrap_err();
    assert!(err.to_string().contains("'term' column"));
}

#[test]
fn unique_terms_pass() {
    let res = run(&EnsureUniqueTerms, "term;description\na;1\nb;2\n").unwrap();
    assert_eq!(res.status, Status::Pass);
}

#[test]
fn exact_duplicate_fails_with_lines() {
    let res = run(&EnsureUniqueTerms, "term;description\na;1\nb;2\na;3\n").unwrap();
    assert_eq!(res.status, Status::Fail);
    assert!(res.message.contains("'a' (lines 2 and 4)"), "{}", res.message);
}

#[test]
fn case_only_duplicate_warns() {
    let res = run(&EnsureUniqueTerms, "term;description\nApple;1\napple;2\n").unwrap();
    assert_eq!(res.status, Status::Warn);
    assert!(res.message.contains("'Apple' / 'apple'"));
}

#[test]
fn fix_drops_later_exact_duplicates() {
    let (data, langs) = input("term;description\na;1\nb;2\na;3\nb;4\nc;5\n");
    let input = CheckInput::new(&data, Path::new("g.csv"), &langs);

    let out = EnsureUniqueTerms.fix(&input).unwrap();

    assert_eq!(
        String::from_utf8(out.data.clone()).unwrap(),
        "term;description\na;1\nb;2\nc;5\n"
    );
    assert_eq!(out.note, "dropped 2 duplicate row(s)");
    let again = EnsureUniqueTerms.run(&input.with_data(&out.data)).unwrap();
    assert_eq!(again.status, Status::Pass);
}
