//! End-to-end tests: section selection, cell-type bypasses, typed values
//! and error behaviour.

use pretty_assertions::assert_eq;

use chrono::{NaiveDate, TimeDelta};

use cellfmt::{CellFormat, CellType, CellValue, FormatSubType, FormatType};

#[test]
fn two_section_selection() {
    let cf = CellFormat::parse("#.#;(#.#)");
    let numeric = |sv: &str| cf.format_value(sv, CellType::Numeric, false).unwrap().text;

    assert_eq!(numeric("1.2"), "1.2");
    assert_eq!(numeric("-1.2"), "(1.2)");
    assert_eq!(numeric("0"), "."); // zero goes to the first section
    assert_eq!(
        cf.format_value("text", CellType::String, false).unwrap().text,
        "text"
    );
}

#[test]
fn three_section_selection() {
    let cf = CellFormat::parse("#.#;(#.#);\"iszero\"");
    let numeric = |sv: &str| cf.format_value(sv, CellType::Numeric, false).unwrap().text;

    assert_eq!(numeric("1.2"), "1.2");
    assert_eq!(numeric("-1.2"), "(1.2)");
    assert_eq!(numeric("0"), "iszero");
    assert_eq!(
        cf.format_value("text", CellType::String, false).unwrap().text,
        "text"
    );
}

#[test]
fn four_section_selection() {
    let cf = CellFormat::parse("#.#;(#.#);\"iszero\";\"text >\"@\"< here\"");
    let numeric = |sv: &str| cf.format_value(sv, CellType::Numeric, false).unwrap().text;

    assert_eq!(numeric("1.2"), "1.2");
    assert_eq!(numeric("-1.2"), "(1.2)");
    assert_eq!(numeric("0"), "iszero");
    assert_eq!(
        cf.format_value("foo", CellType::String, false).unwrap().text,
        "text >foo< here"
    );
}

#[test]
fn text_without_a_text_section_passes_through() {
    let v = CellFormat::parse("@")
        .format_value("foo", CellType::String, false)
        .unwrap();
    assert_eq!(v.text, "foo");
    assert_eq!(v.value, CellValue::Text("foo".to_string()));
    assert_eq!(v.section.format_type, FormatType::Text);
}

#[test]
fn bool_cells_bypass_the_format() {
    let cf = CellFormat::parse("#,##0.00");
    let v = cf.format_value("1", CellType::Bool, false).unwrap();
    assert_eq!(v.text, "TRUE");
    assert_eq!(v.value, CellValue::Bool(true));
    assert_eq!(v.section.format_type, FormatType::Bool);

    let v = cf.format_value("0", CellType::Bool, false).unwrap();
    assert_eq!(v.text, "FALSE");
    assert_eq!(v.value, CellValue::Bool(false));
}

#[test]
fn error_cells_pass_through_verbatim() {
    let v = CellFormat::parse("0.00")
        .format_value("#VALUE", CellType::Error, false)
        .unwrap();
    assert_eq!(v.text, "#VALUE");
    assert_eq!(v.value, CellValue::Text("#VALUE".to_string()));
    assert_eq!(v.section.format_type, FormatType::Error);
}

#[test]
fn formula_cells_format_like_numeric() {
    let cf = CellFormat::parse("0.00");
    assert_eq!(
        cf.format_value("1.5", CellType::Formula, false).unwrap().text,
        "1.50"
    );
    assert_eq!(
        cf.format_value("1.5", CellType::Numeric, false).unwrap().text,
        "1.50"
    );
}

#[test]
fn inline_cells_format_like_strings() {
    let cf = CellFormat::parse("0.00");
    assert_eq!(
        cf.format_value("abc", CellType::Inline, false).unwrap().text,
        "abc"
    );
}

#[test]
fn numeric_typed_value_keeps_the_sign() {
    let v = CellFormat::parse("0.#")
        .format_value("1.26", CellType::Numeric, false)
        .unwrap();
    assert_eq!(v.text, "1.3");
    assert_eq!(v.value, CellValue::Number(1.26));
    assert_eq!(v.section.format_type, FormatType::Number);

    let v = CellFormat::parse("0.#;(00.##)")
        .format_value("-1.26", CellType::Numeric, false)
        .unwrap();
    assert_eq!(v.text, "(01.26)");
    assert_eq!(v.value, CellValue::Number(-1.26));
}

#[test]
fn date_formats_produce_timestamps() {
    let expected = NaiveDate::from_ymd_opt(2015, 4, 5)
        .unwrap()
        .and_hms_opt(15, 0, 0)
        .unwrap();

    for (code, sub_type, text) in [
        ("yyyy-mm-dd", FormatSubType::Date, "2015-04-05"),
        ("hh:mm", FormatSubType::Time, "15:00"),
        ("yyyy-mm-dd hh:mm", FormatSubType::DateTime, "2015-04-05 15:00"),
    ] {
        let v = CellFormat::parse(code)
            .format_value("42099.625", CellType::Numeric, false)
            .unwrap();
        assert_eq!(v.text, text, "code={code:?}");
        assert_eq!(v.value, CellValue::DateTime(expected), "code={code:?}");
        assert_eq!(v.section.sub_type, sub_type, "code={code:?}");
    }
}

#[test]
fn duration_formats_produce_durations() {
    let v = CellFormat::parse("[hh]:mm")
        .format_value("2.5", CellType::Numeric, false)
        .unwrap();
    assert_eq!(v.text, "60:00");
    assert_eq!(v.value, CellValue::Duration(TimeDelta::hours(60)));
    assert_eq!(v.section.sub_type, FormatSubType::Duration);
    assert!(v.section.is_duration());
}

#[test]
fn conditional_formats_are_rejected() {
    let cf = CellFormat::parse("[>=100]\"big\";0");
    assert!(cf.is_conditional());
    assert_eq!(
        cf.format_value("150", CellType::Numeric, false),
        Err(cellfmt::FormatError::UnsupportedCondition)
    );
}

#[test]
fn unparseable_numbers_are_rejected() {
    let err = CellFormat::parse("0.00")
        .format_value("abc", CellType::Numeric, false)
        .unwrap_err();
    assert_eq!(
        err,
        cellfmt::FormatError::ParseNumber {
            value: "abc".to_string()
        }
    );
    assert!(err.to_string().contains("abc"));
}

#[test]
fn empty_format_passes_numbers_through() {
    let v = CellFormat::parse("")
        .format_value("-1.2", CellType::Numeric, false)
        .unwrap();
    assert_eq!(v.text, "-1.2");
    assert_eq!(v.value, CellValue::Number(-1.2));
    assert_eq!(v.section.format_type, FormatType::Number);
}

#[test]
fn excess_sections_are_never_selected() {
    // five sections: the fifth is compiled but unreachable
    let cf = CellFormat::parse("0;(0);\"zero\";@;\"never\"");
    assert_eq!(cf.sections().len(), 5);
    assert_eq!(
        cf.format_value("foo", CellType::String, false).unwrap().text,
        "foo"
    );
    assert_eq!(
        cf.format_value("-3", CellType::Numeric, false).unwrap().text,
        "(3)"
    );
}

#[test]
fn convenience_api_goes_through_the_cache() {
    let v = cellfmt::format_value("#,##0.00", "1234.5", CellType::Numeric, false).unwrap();
    assert_eq!(v.text, "1,234.50");
    // same code again: served from the cache, same result
    let v = cellfmt::format_value("#,##0.00", "1234.5", CellType::Numeric, false).unwrap();
    assert_eq!(v.text, "1,234.50");

    assert_eq!(
        cellfmt::parse_cached("#,##0.00"),
        cellfmt::parse_format("#,##0.00")
    );
}

#[test]
fn typed_value_accessors() {
    assert_eq!(CellValue::Number(2.0).as_number(), Some(2.0));
    assert_eq!(CellValue::Bool(true).as_number(), Some(1.0));
    assert_eq!(CellValue::Bool(true).as_bool(), Some(true));
    assert_eq!(
        CellValue::Text("x".to_string()).as_text(),
        Some("x")
    );
    assert_eq!(CellValue::Number(2.0).as_text(), None);
    assert_eq!(CellValue::Number(2.0).type_name(), "number");
    assert_eq!(
        CellValue::Duration(TimeDelta::hours(1)).type_name(),
        "duration"
    );
}
