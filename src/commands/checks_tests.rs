use super::*;
use crate::checks::builtin::default_registry;

#[test]
fn builtin_checks_list_in_execution_order() {
    let checks = list_checks(&default_registry().snapshot());
    let names: Vec<_> = checks.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "ensure-csv-extension",
            "ensure-utf8-encoding",
            "ensure-header-and-rows",
            "ensure-non-empty-term",
            "ensure-unique-terms",
            "ensure-lang-columns",
            "ensure-flag-values",
        ]
    );
    assert!(checks[0].fail_fast);
    assert!(!checks[0].fixable);
    assert!(checks[1].fixable);
    assert!(!checks[3].fail_fast);
}

#[test]
fn text_listing_aligns_columns() {
    let checks = vec![
        CheckInfo {
            name: "a".to_string(),
            priority: 1,
            fail_fast: true,
            fixable: false,
        },
        CheckInfo {
            name: "longer".to_string(),
            priority: 10,
            fail_fast: false,
            fixable: true,
        },
    ];
    let text = format_checks_text(&checks);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "a       priority=1    critical  -");
    assert_eq!(lines[1], "longer  priority=10   normal    fix");
}
