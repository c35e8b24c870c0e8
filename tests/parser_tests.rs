// tests/parser_tests.rs

use objective_json::{
    Array, EscapeKind, MalformedKind, Number, Object, ParseError, Parser, ParserConfig, Value,
    from_file, from_reader, parse, parse_bytes,
};

fn malformed_kind(input: &str) -> MalformedKind {
    match parse(input) {
        Err(ParseError::Malformed { kind, .. }) => kind,
        other => panic!("expected malformed error for {:?}, got {:?}", input, other),
    }
}

fn escape_kind(input: &str) -> EscapeKind {
    match parse(input) {
        Err(ParseError::InvalidEscape { kind, .. }) => kind,
        other => panic!("expected escape error for {:?}, got {:?}", input, other),
    }
}

// ============================================================================
// Well-formed input
// ============================================================================

#[test]
fn test_empty_input_is_null() {
    assert_eq!(parse("").unwrap(), Value::Null);
    assert_eq!(parse("  \n\t ").unwrap(), Value::Null);
}

#[test]
fn test_empty_containers() {
    assert_eq!(parse("{}").unwrap(), Value::Object(Object::new()));
    assert_eq!(parse("[]").unwrap(), Value::Array(Array::new()));
    assert_eq!(parse(" [ ] ").unwrap(), Value::Array(Array::new()));
}

#[test]
fn test_nested_object() {
    let value = parse(r#"{ "field" : "name" , "innerObj": {"innerField" : 342} }"#).unwrap();
    let obj = value.as_object().unwrap();

    assert_eq!(obj.len(), 2);
    assert_eq!(obj.get_string("field").unwrap(), "name");
    let inner = obj.get_object("innerObj").unwrap();
    assert_eq!(inner.get_i64("innerField").unwrap(), 342);
}

#[test]
fn test_whitespace_between_tokens() {
    let value = parse("\0[\r1.4  \t       ,     2, \n 1]").unwrap();
    assert_eq!(value, Value::from(vec![Value::from(1.4), Value::from(2), Value::from(1)]));
}

#[test]
fn test_whitespace_insensitive() {
    let compact = parse(r#"{"a":[1,{"b":null}],"c":"d"}"#).unwrap();
    let spaced = parse("{ \"a\" :\n[ 1 ,\t{ \"b\" : null } ] ,\r\n \"c\" : \"d\" }").unwrap();
    assert_eq!(compact, spaced);
}

#[test]
fn test_literals() {
    let cases = vec![
        ("[true]", Value::Boolean(true)),
        ("[false]", Value::Boolean(false)),
        ("[null]", Value::Null),
        ("[0]", Value::Number(Number::Integer(0))),
        ("[-17]", Value::Number(Number::Integer(-17))),
        ("[1.4]", Value::Number(Number::Float(1.4))),
        ("[-0.25]", Value::Number(Number::Float(-0.25))),
        ("[9223372036854775807]", Value::Number(Number::Integer(i64::MAX))),
        ("[-9223372036854775808]", Value::Number(Number::Integer(i64::MIN))),
        (r#"["text"]"#, Value::from("text")),
        (r#"[""]"#, Value::from("")),
    ];

    for (input, expected) in cases {
        let value = parse(input).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 1, "input {:?}", input);
        assert_eq!(arr[0], expected, "input {:?}", input);
    }
}

#[test]
fn test_integer_and_float_tags() {
    let value = parse("[1, 1.0]").unwrap();
    let arr = value.as_array().unwrap();
    assert!(arr[0].is_integer());
    assert!(arr[1].is_number() && !arr[1].is_integer());
    assert_ne!(arr[0], arr[1]);
}

#[test]
fn test_string_escapes() {
    let cases = vec![
        (r#"["€"]"#, "€"),
        (r#"["😀"]"#, "😀"),
        (r#"["a\"b"]"#, "a\"b"),
        (r#"["back\\slash"]"#, "back\\slash"),
        (r#"["\/"]"#, "/"),
        (r#"["\n\t\r"]"#, "\n\t\r"),
        (r#"["\u20AC"]"#, "€"),
        (r#"["\u00e9t\u00E9"]"#, "été"),
        (r#"["\uD83D\uDE00"]"#, "😀"),
        (r#"["a\uD83D\uDE00b"]"#, "a😀b"),
        (r#"["\b\f\0"]"#, "\u{8}\u{c}\0"),
        (r#"["it\'s"]"#, "it's"),
        ("[\"caf\u{e9}\"]", "café"),
    ];

    for (input, expected) in cases {
        let value = parse(input).unwrap();
        assert_eq!(value.as_array().unwrap().get_string(0).unwrap(), expected, "input {:?}", input);
    }
}

#[test]
fn test_structural_bytes_inside_strings() {
    let value = parse(r#"{"k,e:y": "[v]{a}"}"#).unwrap();
    assert_eq!(value.as_object().unwrap().get_string("k,e:y").unwrap(), "[v]{a}");
}

#[test]
fn test_trailing_comma_tolerated() {
    assert_eq!(parse("[1,2,]").unwrap(), parse("[1,2]").unwrap());
    assert_eq!(parse(r#"{"a":1,}"#).unwrap(), parse(r#"{"a":1}"#).unwrap());
}

#[test]
fn test_duplicate_key_keeps_last() {
    let value = parse(r#"{"a": 1, "a": 2}"#).unwrap();
    assert_eq!(value.as_object().unwrap().get_i64("a").unwrap(), 2);
}

#[test]
fn test_top_level_literal_is_discarded() {
    assert_eq!(parse("42").unwrap(), Value::Null);
    assert_eq!(parse(" true ").unwrap(), Value::Null);
    assert!(matches!(parse("nope"), Err(ParseError::NumberFormat { .. })));
}

#[test]
fn test_deep_nesting() {
    let depth = 200;
    let input = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let mut value = &parse(&input).unwrap();
    for _ in 1..depth {
        value = &value.as_array().unwrap()[0];
    }
    assert_eq!(value, &Value::Array(Array::new()));
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn test_multiple_values_message() {
    let err = parse("[1 1]").unwrap_err();
    assert_eq!(err.to_string(), "Multiple values found at index 4, json preview '[1 1]'");
    assert_eq!(err.offset(), Some(4));
    assert_eq!(err.preview(), Some("[1 1]"));
}

#[test]
fn test_malformed_kinds() {
    let cases = vec![
        ("[1 1]", MalformedKind::MultipleValues),
        (r#"["a" "b"]"#, MalformedKind::MultipleValues),
        (r#"{"a":1 {}}"#, MalformedKind::MultipleValues),
        ("1 {}", MalformedKind::MultipleValues),
        ("null [2]", MalformedKind::MultipleValues),
        ("1 2", MalformedKind::MultipleValues),
        (r#"[a"b"]"#, MalformedKind::CharactersBeforeString),
        (r#""a""#, MalformedKind::StartNotContainer),
        ("{:1}", MalformedKind::MissingFieldName),
        ("{1}", MalformedKind::MissingFieldName),
        ("[:]", MalformedKind::MissingFieldName),
        (r#"{"a" 1}"#, MalformedKind::MissingColon),
        (r#"{"a"}"#, MalformedKind::MissingColon),
        (r#"{"a"::1}"#, MalformedKind::UnexpectedColon),
        (r#"{"a":1,,}"#, MalformedKind::NoFieldNameForValue),
        ("{[1]}", MalformedKind::ExpectedFieldName),
        ("}", MalformedKind::ObjectNeverOpened),
        ("]", MalformedKind::ArrayNeverOpened),
        ("[1]]", MalformedKind::ArrayNeverOpened),
        ("{]", MalformedKind::ObjectClosedArray),
        ("[}", MalformedKind::ArrayClosedObject),
        ("[1}", MalformedKind::ArrayClosedObject),
        (",", MalformedKind::CommaOutsideContainer),
        ("[1,,2]", MalformedKind::EmptyValue),
        ("[,]", MalformedKind::EmptyValue),
        (r#"{"a":}"#, MalformedKind::EmptyValue),
        ("[1] 2", MalformedKind::TrailingContent),
        ("[1] [2]", MalformedKind::TrailingContent),
        (r#"{} "x""#, MalformedKind::TrailingContent),
        ("[1", MalformedKind::Unclosed),
        (r#"{"a": [1]"#, MalformedKind::Unclosed),
        (r#"["abc"#, MalformedKind::UnclosedString),
        (r#"{"ke"#, MalformedKind::UnclosedString),
    ];

    for (input, expected) in cases {
        assert_eq!(malformed_kind(input), expected, "input {:?}", input);
    }
}

#[test]
fn test_number_format_errors() {
    let cases = vec!["[tru]", "[1-2]", "[-]", "[.]", "[1.2.3]", "[1e5]", "[99999999999999999999]"];

    for input in cases {
        assert!(
            matches!(parse(input), Err(ParseError::NumberFormat { .. })),
            "input {:?}",
            input
        );
    }

    let err = parse("[12x]").unwrap_err();
    assert_eq!(err.to_string(), "Invalid json value '12x' at index 4, json preview '[12x]'");
}

#[test]
fn test_escape_errors() {
    let cases = vec![
        (r#"["\x"]"#, EscapeKind::UnknownEscape(b'x')),
        (r#"["\u12G4"]"#, EscapeKind::InvalidHex(b'G')),
        (r#"["\uD83D"]"#, EscapeKind::UnpairedSurrogate),
        (r#"["\uD83DA"]"#, EscapeKind::UnpairedSurrogate),
        (r#"["\uDE00"]"#, EscapeKind::UnpairedSurrogate),
        (r#"["\u12"#, EscapeKind::UnicodeUnfinished),
        (r#"["\"#, EscapeKind::Unfinished),
    ];

    for (input, expected) in cases {
        assert_eq!(escape_kind(input), expected, "input {:?}", input);
    }
}

#[test]
fn test_escapes_across_windows() {
    let json = r#"["\u20AC", "a\uD83D\uDE00b"]"#;
    for chunk_size in 1..=8 {
        let parser = Parser::with_config(ParserConfig {
            scratch_capacity: 1,
            chunk_size,
        });
        let value = parser.parse_reader(json.as_bytes()).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.get_string(0).unwrap(), "€", "chunk {}", chunk_size);
        assert_eq!(arr.get_string(1).unwrap(), "a😀b", "chunk {}", chunk_size);
        assert_eq!(arr.get(1).unwrap().as_str().unwrap().chars().count(), 3);
    }
}

#[test]
fn test_unclosed_string_message() {
    let err = parse(r#"["abc"#).unwrap_err();
    assert_eq!(err.to_string(), "Input ended inside a string at index 4, json preview '[\"abc'");
}

#[test]
fn test_string_errors_preview_surrounds_offset() {
    let parser = Parser::with_config(ParserConfig {
        scratch_capacity: 4,
        chunk_size: 4,
    });
    let err = parser
        .parse_reader(r#"["first" "a long second value"]"#.as_bytes())
        .unwrap_err();
    assert!(matches!(err, ParseError::Malformed { kind: MalformedKind::MultipleValues, .. }));
    assert_eq!(err.offset(), Some(29));
    assert_eq!(err.preview(), Some("e\"]"));
}

#[test]
fn test_preview_strips_control_bytes() {
    let err = parse("[\n1\t1\n]").unwrap_err();
    assert_eq!(err.offset(), Some(5));
    assert_eq!(err.preview(), Some("[11]"));
}

// ============================================================================
// Sources
// ============================================================================

#[test]
fn test_bytes_with_invalid_utf8_are_replaced() {
    let value = parse_bytes(b"[\"a\xffb\"]").unwrap();
    assert_eq!(value.as_array().unwrap().get_string(0).unwrap(), "a\u{fffd}b");
}

#[test]
fn test_reader_matches_in_memory() {
    let json = r#"{"list": [1, 2.5, "x€y", {"deep": [true, null]}], "s": "😀"}"#;
    let expected = parse(json).unwrap();

    assert_eq!(from_reader(json.as_bytes()).unwrap(), expected);
    for chunk_size in [1, 2, 3, 5, 16] {
        let parser = Parser::with_config(ParserConfig {
            scratch_capacity: 2,
            chunk_size,
        });
        assert_eq!(parser.parse_reader(json.as_bytes()).unwrap(), expected, "chunk {}", chunk_size);
    }
}

#[test]
fn test_error_offsets_are_absolute_across_windows() {
    let parser = Parser::with_config(ParserConfig {
        scratch_capacity: 4,
        chunk_size: 3,
    });
    let err = parser.parse_reader("[1, 2, 3 4]".as_bytes()).unwrap_err();
    assert!(matches!(err, ParseError::Malformed { kind: MalformedKind::MultipleValues, .. }));
    assert_eq!(err.offset(), Some(10));
}

#[test]
fn test_from_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"name": "file", "values": [1, 2, 3]}"#).unwrap();

    let value = from_file(file.path()).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.get_string("name").unwrap(), "file");
    assert_eq!(obj.get_array("values").unwrap().len(), 3);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = from_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ParseError::Io(_)));
    assert_eq!(err.offset(), None);
}
