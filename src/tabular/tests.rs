use super::*;

const NODES_CSV: &str = "id,mz,rt,isPrototype,name
1,100.0503,1.25,TRUE,glucose
2,180.0634,2.5,false,
3,-1.5e2,.5,True,007";

#[test]
fn test_dynamic_typing() {
    let table = TabularParser::new(ParseOptions::default())
        .parse_str(NODES_CSV)
        .unwrap();

    assert_eq!(table.headers(), &["id", "mz", "rt", "isPrototype", "name"]);
    assert_eq!(table.len(), 3);

    let first = &table.records()[0];
    assert_eq!(table.get(first, "id"), Some(&Value::Number(1.0)));
    assert_eq!(table.get(first, "mz"), Some(&Value::Number(100.0503)));
    assert_eq!(table.get(first, "isPrototype"), Some(&Value::Bool(true)));
    assert_eq!(table.get(first, "name"), Some(&Value::Text("glucose".into())));

    let second = &table.records()[1];
    assert_eq!(table.get(second, "isPrototype"), Some(&Value::Bool(false)));
    assert_eq!(table.get(second, "name"), Some(&Value::Empty));

    let third = &table.records()[2];
    assert_eq!(table.get(third, "mz"), Some(&Value::Number(-150.0)));
    assert_eq!(table.get(third, "rt"), Some(&Value::Number(0.5)));
    assert_eq!(table.get(third, "name"), Some(&Value::Number(7.0)));
}

#[test]
fn test_text_only_keeps_literals() {
    let table = TabularParser::new(ParseOptions::text_only())
        .parse_str("formula,delta\nC6H12O6,18.0100\n")
        .unwrap();

    let row = &table.records()[0];
    assert_eq!(table.get(row, "delta"), Some(&Value::Text("18.0100".into())));
    assert_eq!(table.get(row, "formula"), Some(&Value::Text("C6H12O6".into())));
}

#[test]
fn test_booleans_coerced_even_without_dynamic_typing() {
    let table = TabularParser::new(ParseOptions::text_only())
        .parse_str("flag\nFALSE\n")
        .unwrap();
    assert_eq!(table.records()[0].values(), &[Value::Bool(false)]);
}

#[test]
fn test_except_columns() {
    let options = ParseOptions {
        dynamic_typing: DynamicTyping::Except(vec!["matchedFormulaChange".into()]),
        ..Default::default()
    };
    let table = TabularParser::new(options)
        .parse_str("mzDiff,matchedFormulaChange\n2.0157,-2\n")
        .unwrap();

    let row = &table.records()[0];
    assert_eq!(table.get(row, "mzDiff"), Some(&Value::Number(2.0157)));
    assert_eq!(table.get(row, "matchedFormulaChange"), Some(&Value::Text("-2".into())));
}

#[test]
fn test_blank_lines_skipped() {
    let text = "id,mz\n1,100\n\n2,200\n\n";
    let table = TabularParser::default().parse_str(text).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.records()[1].line(), 4);
}

#[test]
fn test_ragged_row_reports_line() {
    let text = "id,mz,rt\n1,100,1\n2,200\n3,300,3\n";
    let err = TabularParser::default().parse_str(text).unwrap_err();

    match err {
        ParseError::RaggedRow {
            line,
            expected,
            found,
        } => {
            assert_eq!(line, 3);
            assert_eq!(expected, 3);
            assert_eq!(found, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_ragged_row_error_line_accessor() {
    let err = TabularParser::default()
        .parse_str("a,b\n1,2,3\n")
        .unwrap_err();
    assert_eq!(err.line(), Some(2));
}

#[test]
fn test_empty_input_has_no_header() {
    let err = TabularParser::default().parse_str("").unwrap_err();
    assert!(matches!(err, ParseError::MissingHeader));
}

#[test]
fn test_auto_delimiter() {
    assert_eq!(Delimiter::Auto.resolve("id\tmz\trt\n1\t2\t3"), b'\t');
    assert_eq!(Delimiter::Auto.resolve("id,mz,rt\n1,2,3"), b',');
    assert_eq!(Delimiter::Auto.resolve("\n\nid\tname,x\n"), b',');

    let table = TabularParser::default()
        .parse_str("id\tmz\n5\t99.5\n")
        .unwrap();
    assert_eq!(table.get(&table.records()[0], "mz"), Some(&Value::Number(99.5)));
}

#[test]
fn test_quoted_fields() {
    let text = "id,matchedDescription\n1,\"oxidation, then loss\"\n";
    let table = TabularParser::default().parse_str(text).unwrap();
    assert_eq!(
        table.get(&table.records()[0], "matchedDescription"),
        Some(&Value::Text("oxidation, then loss".into()))
    );
}

#[test]
fn test_numeric_grammar() {
    use super::value::looks_numeric;

    for ok in ["1", "-1", "1.", ".5", "1.5e3", "2E-4", " 42 ", "0.000"] {
        assert!(looks_numeric(ok), "{ok:?} should be numeric");
    }
    for bad in ["", "-", ".", "e5", "1e", "inf", "NaN", "0x1F", "1.2.3", "12a", "+1"] {
        assert!(!looks_numeric(bad), "{bad:?} should not be numeric");
    }
}

#[test]
fn test_overflow_stays_text() {
    assert_eq!(Value::coerce("1e400", true), Value::Text("1e400".into()));
}

#[test]
fn test_unsafe_integers_stay_text() {
    assert_eq!(
        Value::coerce("9007199254740991", true),
        Value::Number(MAX_SAFE_INTEGER)
    );
    assert_eq!(
        Value::coerce("9007199254740992", true),
        Value::Text("9007199254740992".into())
    );
    assert_eq!(
        Value::coerce("-9007199254740993", true),
        Value::Text("-9007199254740993".into())
    );
    assert_eq!(Value::coerce("1e300", true), Value::Text("1e300".into()));
}

#[test]
fn test_canonical_string() {
    assert_eq!(Value::coerce("12", true).to_canonical_string(), "12");
    assert_eq!(Value::coerce("12.0", true).to_canonical_string(), "12");
    assert_eq!(Value::coerce("12", false).to_canonical_string(), "12");
    assert_eq!(Value::coerce("0.25", true).to_canonical_string(), "0.25");
    assert_eq!(Value::Bool(true).to_canonical_string(), "true");
}
