use adlib_json::{ErrorKind, JsonParser, Object, ParseWarning, Value};

fn obj(fields: &[(&str, Value)]) -> Value {
    let mut out = Object::new();
    for (key, value) in fields {
        out.insert(*key, value.clone());
    }
    Value::Object(out)
}

fn arr(items: &[Value]) -> Value {
    Value::Array(items.to_vec())
}

#[test]
fn accepted_documents_matrix() {
    let cases: Vec<(&str, &str, Value)> = vec![
        ("null", "null", Value::Null),
        ("true", "true", Value::Bool(true)),
        ("int", "-17", Value::Int(-17)),
        ("zero", "0", Value::Int(0)),
        ("double", "3.25", Value::Double(3.25)),
        ("exp_double", "25e-1", Value::Double(2.5)),
        ("int_shaped_exp_is_double", "1e2", Value::Double(100.0)),
        ("string", r#""a b""#, Value::from("a b")),
        ("unicode_escape", r#""\u0041""#, Value::from("A")),
        ("two_byte_escape", r#""\u00DF""#, Value::from("ß")),
        ("three_byte_escape", r#""\uFFFD""#, Value::from("\u{fffd}")),
        ("raw_four_byte_utf8", "\"\u{1f600}\"", Value::from("\u{1f600}")),
        ("raw_control_char", "\"a\tb\"", Value::from("a\tb")),
        ("empty_array", "[]", arr(&[])),
        ("empty_object", "{}", obj(&[])),
        (
            "nested",
            r#"{"a":{"b":[1,[2,{"c":null}]]}}"#,
            obj(&[(
                "a",
                obj(&[(
                    "b",
                    arr(&[
                        Value::Int(1),
                        arr(&[Value::Int(2), obj(&[("c", Value::Null)])]),
                    ]),
                )]),
            )]),
        ),
        (
            "whitespace_everywhere",
            " \r\n\t[ 1 ,\n\t2 ] \n",
            arr(&[Value::Int(1), Value::Int(2)]),
        ),
        ("bom", "\u{feff}[true]", arr(&[Value::Bool(true)])),
        ("escaped_key", r#"{"a\"b":1}"#, obj(&[("a\"b", Value::Int(1))])),
    ];

    let mut parser = JsonParser::new();
    for (name, input, expected) in cases {
        let value = parser.parse(input);
        assert!(
            parser.errors().is_empty(),
            "case {name}: unexpected errors {:?}",
            parser.error_messages()
        );
        assert_eq!(value, expected, "case {name}");
    }
}

#[test]
fn rejected_documents_matrix() {
    let cases: Vec<(&str, &str, ErrorKind)> = vec![
        ("empty", "", ErrorKind::Syntax),
        ("only_whitespace", "   ", ErrorKind::Syntax),
        ("leading_zero", "01", ErrorKind::Syntax),
        ("leading_plus", "+1", ErrorKind::Syntax),
        ("bare_minus", "-", ErrorKind::Syntax),
        ("dot_no_digit", "1.", ErrorKind::Syntax),
        ("leading_dot", ".5", ErrorKind::Syntax),
        ("exp_no_digit", "1e", ErrorKind::Syntax),
        ("int_overflow", "4294967296", ErrorKind::Range),
        ("int_underflow", "-2147483649", ErrorKind::Range),
        ("double_overflow", "-1e999", ErrorKind::Range),
        ("double_underflow", "[1e-400]", ErrorKind::Range),
        ("unterminated_string", "\"abc", ErrorKind::Syntax),
        ("bad_escape", r#""\x""#, ErrorKind::Encoding),
        ("short_unicode_escape", r#""\u00""#, ErrorKind::Encoding),
        ("lone_high_surrogate", r#""\uD800""#, ErrorKind::Encoding),
        ("lone_low_surrogate", r#""\uDFFF""#, ErrorKind::Encoding),
        ("trailing_comma_array", "[1,2,]", ErrorKind::Syntax),
        ("trailing_comma_object", r#"{"a":1,}"#, ErrorKind::Syntax),
        ("missing_array_end", "[1", ErrorKind::Syntax),
        ("missing_array_comma", "[1 2]", ErrorKind::Syntax),
        ("missing_object_end", r#"{"a":1"#, ErrorKind::Syntax),
        ("missing_object_comma", r#"{"a":1 "b":2}"#, ErrorKind::Syntax),
        ("missing_colon", r#"{"a" 1}"#, ErrorKind::Syntax),
        ("non_string_key", "{a:1}", ErrorKind::Syntax),
        ("single_quotes", "'a'", ErrorKind::Syntax),
        ("bad_literal", "nulL", ErrorKind::Syntax),
        ("uppercase_literal", "TRUE", ErrorKind::Syntax),
        ("trailing_garbage", "[] []", ErrorKind::Syntax),
        ("mismatched_close", "[}", ErrorKind::Syntax),
    ];

    let mut parser = JsonParser::new();
    for (name, input, kind) in cases {
        let value = parser.parse(input);
        assert!(value.is_null(), "case {name}: result must be null");
        assert_eq!(parser.errors().len(), 1, "case {name}: exactly one error");
        assert_eq!(parser.errors()[0].kind(), kind, "case {name}");
        assert!(!parser.error_messages()[0].is_empty(), "case {name}");
    }
}

#[test]
fn duplicate_key_reporting() {
    let mut parser = JsonParser::new();
    let value = parser.parse(r#"{"a":1,"a":2}"#);
    assert_eq!(value, obj(&[("a", Value::Int(2))]));
    assert_eq!(parser.warnings(), &[ParseWarning::DuplicateKey("a".into())]);
    assert!(parser.warning_messages()[0].contains("\"a\""));
    assert!(parser.is_name_repeated());

    let value = parser.parse(r#"{"x":{"k":1,"k":true},"y":{"k":null,"j":0,"k":"z"}}"#);
    assert_eq!(value["x"]["k"], Value::Bool(true));
    assert_eq!(value["y"]["k"], Value::from("z"));
    assert_eq!(parser.warnings().len(), 2);

    parser.parse(r#"{"x":1}"#);
    assert!(!parser.is_name_repeated());
    assert!(parser.warnings().is_empty());
}

#[test]
fn bom_equivalence() {
    let mut parser = JsonParser::new();
    let with_bom = parser.parse("\u{feff}{\"a\":1}");
    let without = parser.parse("{\"a\":1}");
    assert_eq!(with_bom, without);
}

#[test]
fn parse_bytes_validates_utf8() {
    let mut parser = JsonParser::new();
    assert_eq!(parser.parse_bytes(b"[\"ok\"]"), arr(&[Value::from("ok")]));
    assert!(parser.parse_bytes(b"[\"\xc3\x28\"]").is_null());
    assert_eq!(parser.errors()[0].kind(), ErrorKind::Encoding);
}

#[test]
fn independent_parsers_share_nothing() {
    let mut first = JsonParser::new();
    let mut second = JsonParser::new();
    first.parse("[");
    second.parse("[]");
    assert_eq!(first.errors().len(), 1);
    assert!(second.errors().is_empty());
}

#[test]
fn dump_then_parse_is_identity() {
    let value = obj(&[
        ("s", Value::from("quote\" slash\\ nl\n ctl\u{7} é \u{1f600}")),
        ("d", Value::Double(-1.25e-8)),
        ("big", Value::Double(1.7976931348623157e308)),
        ("i", Value::Int(i32::MIN)),
        ("a", arr(&[Value::Null, Value::Bool(false), obj(&[])])),
    ]);
    let text = value.dump();
    let mut parser = JsonParser::new();
    assert_eq!(parser.parse(&text), value);
    assert!(parser.errors().is_empty());
}
