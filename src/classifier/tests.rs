//! Tests for type classification and leaf parsers.

use super::*;
use crate::types::{EnvType, Kind};
use crate::value::ValueError;
use crate::{format_duration, parse_bool};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Duration;

fn leaf(classifier: &DefaultClassifier, ty: &TypeDescriptor) -> Parser {
    match classifier.classify(ty).unwrap() {
        Classification::Leaf(parser) => parser,
        Classification::Recurse => panic!("expected {ty} to be a leaf"),
    }
}

/// Classifies `T` with the default classifier and parses `raw` into it.
fn parse<T: EnvType>(raw: &str) -> Result<T, CastError> {
    let parser = leaf(&DefaultClassifier::new(), &T::descriptor());
    parser(raw).map(|value| T::from_value(value).unwrap())
}

crate::env_config! {
    struct Nested {
        host: String,
    }
}

// ==================== Duration parsing tests ====================

#[test]
fn test_parse_duration_all_units() {
    let d = parse::<Duration>("1d2h3m4s5ms6µs").unwrap();
    let expected = Duration::from_secs(86_400 + 2 * 3_600 + 3 * 60 + 4)
        + Duration::from_millis(5)
        + Duration::from_micros(6);
    assert_eq!(d, expected);
}

#[test]
fn test_parse_duration_minutes_seconds() {
    assert_eq!(parse::<Duration>("1m2s").unwrap(), Duration::from_secs(62));
}

#[test]
fn test_parse_duration_days() {
    assert_eq!(parse::<Duration>("53d").unwrap(), Duration::from_secs(53 * 86_400));
}

#[test]
fn test_parse_duration_milliseconds() {
    assert_eq!(parse::<Duration>("100ms").unwrap(), Duration::from_millis(100));
}

#[test]
fn test_parse_duration_mixed_sub_second() {
    assert_eq!(parse::<Duration>("2s500ms").unwrap(), Duration::from_millis(2_500));
}

#[test]
fn test_parse_duration_ascii_micros() {
    assert_eq!(parse::<Duration>("5us").unwrap(), Duration::from_micros(5));
}

#[test]
fn test_parse_duration_repeated_units_add_up() {
    assert_eq!(parse::<Duration>("1s1s").unwrap(), Duration::from_secs(2));
}

#[test]
fn test_parse_duration_rejects_garbage() {
    assert_eq!(
        parse::<Duration>("abc").unwrap_err(),
        CastError::Duration("abc".to_string())
    );
}

#[test]
fn test_parse_duration_rejects_missing_unit() {
    assert!(parse::<Duration>("10").is_err());
}

#[test]
fn test_parse_duration_rejects_unknown_unit() {
    assert!(parse::<Duration>("10x").is_err());
}

#[test]
fn test_parse_duration_rejects_gaps() {
    assert!(parse::<Duration>("1m 2s").is_err());
}

#[test]
fn test_parse_duration_empty() {
    assert!(parse::<Duration>("").is_err());
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Duration::from_secs(62)), "1m2s");
    assert_eq!(format_duration(Duration::ZERO), "0s");
    assert_eq!(format_duration(Duration::from_millis(2_500)), "2s500ms");
}

#[test]
fn test_format_duration_parses_back() {
    let d = parse::<Duration>("1d2h3m4s5ms6µs").unwrap();
    assert_eq!(format_duration(d), "1d2h3m4s5ms6µs");
}

// ==================== Boolean parsing tests ====================

#[test]
fn test_parse_bool_true_literals() {
    for raw in ["1", "t", "y", "yes", "on", "true", "TRUE", "True", "On"] {
        assert!(parse::<bool>(raw).unwrap(), "{raw} should be true");
    }
}

#[test]
fn test_parse_bool_false_literals() {
    for raw in ["0", "f", "n", "no", "off", "false", "False", "FALSE"] {
        assert!(!parse::<bool>(raw).unwrap(), "{raw} should be false");
    }
}

#[test]
fn test_parse_bool_invalid() {
    let err = parse_bool("foo").unwrap_err();
    assert_eq!(err.to_string(), "invalid bool value 'foo'");
}

// ==================== Scalar parsing tests ====================

#[test]
fn test_parse_int() {
    assert_eq!(parse::<u16>("5432").unwrap(), 5432);
    assert_eq!(parse::<i64>("-17").unwrap(), -17);
}

#[test]
fn test_parse_int_out_of_range() {
    assert_eq!(parse::<u16>("70000").unwrap_err(), CastError::IntRange);
    assert_eq!(parse::<u8>("-1").unwrap_err(), CastError::IntRange);
}

#[test]
fn test_parse_int_not_a_number() {
    let err = parse::<u32>("localhost").unwrap_err();
    assert!(matches!(err, CastError::Int(_)));
}

#[test]
fn test_parse_float_decimal_comma() {
    assert_eq!(parse::<f64>("4,2").unwrap(), 4.2);
    assert_eq!(parse::<f64>("1.5").unwrap(), 1.5);
    assert_eq!(parse::<f32>("0,25").unwrap(), 0.25);
}

#[test]
fn test_parse_float_out_of_f32_range() {
    assert_eq!(parse::<f32>("1e300").unwrap_err(), CastError::FloatRange);
    assert_eq!(parse::<f32>("-1e300").unwrap_err(), CastError::FloatRange);
    assert_eq!(parse::<f64>("1e300").unwrap(), 1e300);
}

#[test]
fn test_parse_float_infinity_is_kept() {
    assert_eq!(parse::<f32>("inf").unwrap(), f32::INFINITY);
}

#[test]
fn test_f32_from_wide_value_rejected() {
    let err = f32::from_value(Value::Float(1e300)).unwrap_err();
    assert!(matches!(err, ValueError::FloatOutOfRange { ty: "f32", .. }));
}

#[test]
fn test_parse_float_invalid() {
    assert!(matches!(parse::<f64>("fast").unwrap_err(), CastError::Float(_)));
}

#[test]
fn test_parse_string_is_identity() {
    assert_eq!(parse::<String>(" a,b:c ").unwrap(), " a,b:c ");
}

// ==================== Container parsing tests ====================

#[test]
fn test_parse_map() {
    let params = parse::<HashMap<String, i64>>("foo:1,bar:2").unwrap();
    assert_eq!(params, HashMap::from([("foo".to_string(), 1), ("bar".to_string(), 2)]));
}

#[test]
fn test_parse_map_typed_keys() {
    let ids = parse::<BTreeMap<u8, String>>("1:one,2:two").unwrap();
    assert_eq!(ids.get(&2).map(String::as_str), Some("two"));
}

#[test]
fn test_parse_map_keeps_extra_pair_separators_in_value() {
    let urls = parse::<HashMap<String, String>>("api:http://localhost").unwrap();
    assert_eq!(urls["api"], "http://localhost");
}

#[test]
fn test_parse_map_missing_separator() {
    let err = parse::<HashMap<String, String>>("foo").unwrap_err();
    assert!(matches!(err, CastError::MapItem { .. }));
    assert!(err.to_string().contains("expected key:value"));
}

#[test]
fn test_parse_map_bad_value() {
    let err = parse::<HashMap<String, i64>>("foo:x").unwrap_err();
    assert!(err.to_string().starts_with("invalid item 'x'"));
}

#[test]
fn test_parse_unparameterized_map_defaults_to_strings() {
    let ty = TypeDescriptor::leaf("Mapping", Origin::Map);
    let parser = leaf(&DefaultClassifier::new(), &ty);
    let value = parser("a:1").unwrap();
    assert_eq!(
        value,
        Value::Map(vec![(Value::Str("a".into()), Value::Str("1".into()))])
    );
}

#[test]
fn test_parse_sequence() {
    assert_eq!(parse::<Vec<i64>>("1,2,3").unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_parse_set_deduplicates() {
    let unique = parse::<HashSet<String>>("foo,foo,foo,bar").unwrap();
    assert_eq!(unique, HashSet::from(["foo".to_string(), "bar".to_string()]));
}

#[test]
fn test_parse_sequence_empty() {
    assert!(parse::<Vec<String>>("").unwrap().is_empty());
}

#[test]
fn test_parse_sequence_bad_item() {
    let err = parse::<Vec<u8>>("1,x,3").unwrap_err();
    assert!(err.to_string().starts_with("invalid item 'x'"));
}

#[test]
fn test_parse_sequence_of_optionals_empty_item_is_none() {
    assert_eq!(
        parse::<Vec<Option<u8>>>("1,,3").unwrap(),
        vec![Some(1), None, Some(3)]
    );
}

#[test]
fn test_parse_tuple_optional_element() {
    assert_eq!(parse::<(Option<u8>, u8)>(",3").unwrap(), (None, 3));
}

#[test]
fn test_parse_sequence_empty_item_for_required_element() {
    assert!(parse::<Vec<u8>>("1,,3").is_err());
}

#[test]
fn test_parse_tuple() {
    assert_eq!(parse::<(i64, i64)>("3,14159").unwrap(), (3, 14159));
    assert_eq!(
        parse::<(String, u16)>("localhost,5432").unwrap(),
        ("localhost".to_string(), 5432)
    );
}

#[test]
fn test_parse_tuple_wrong_length() {
    let err = parse::<(String, i64)>("a,1,2").unwrap_err();
    assert_eq!(err, CastError::TupleLength { expected: 2, actual: 3 });
    assert_eq!(
        err.to_string(),
        "invalid length for fixed tuple: expected 2, got 3"
    );
}

#[test]
fn test_custom_separators() {
    let classifier = DefaultClassifier::new()
        .with_item_separator(";")
        .with_pair_separator("=");
    let parser = leaf(&classifier, &HashMap::<String, u8>::descriptor());
    let value = parser("a=1;b=2").unwrap();
    let map = HashMap::<String, u8>::from_value(value).unwrap();
    assert_eq!(map, HashMap::from([("a".to_string(), 1), ("b".to_string(), 2)]));
}

#[test]
fn test_parse_optional_uses_inner_parser() {
    assert_eq!(parse::<Option<u16>>("8080").unwrap(), Some(8080));
}

// ==================== Classification tests ====================

#[test]
fn test_composite_recurses() {
    let result = DefaultClassifier::new().classify(&Nested::descriptor()).unwrap();
    assert!(matches!(result, Classification::Recurse));
}

#[test]
fn test_opaque_recurses() {
    let result = DefaultClassifier::new()
        .classify(&TypeDescriptor::opaque("Handle"))
        .unwrap();
    assert!(matches!(result, Classification::Recurse));
}

#[test]
fn test_postponed_is_fatal() {
    let err = DefaultClassifier::new()
        .classify(&TypeDescriptor::postponed("Database"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Postponed { .. }));
    assert_eq!(
        err.to_string(),
        "postponed evaluation of annotations is not supported: Database"
    );
}

#[test]
fn test_sequence_of_composites_unsupported() {
    let err = DefaultClassifier::new()
        .classify(&Vec::<Nested>::descriptor())
        .unwrap_err();
    assert_eq!(err.to_string(), "unsupported type Nested");
}

#[test]
fn test_optional_composite_unsupported() {
    let err = DefaultClassifier::new()
        .classify(&Option::<Nested>::descriptor())
        .unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedType { .. }));
}

#[test]
fn test_closure_classifier() {
    let upper = |ty: &TypeDescriptor| -> Result<Classification, ConfigError> {
        if ty.kind() == Kind::Str {
            let parser: Parser = Box::new(|s: &str| Ok(Value::Str(s.to_uppercase())));
            return Ok(Classification::Leaf(parser));
        }
        DefaultClassifier::new().classify(ty)
    };
    let Classification::Leaf(parser) = upper.classify(&String::descriptor()).unwrap() else {
        panic!("expected leaf");
    };
    assert_eq!(parser("abc").unwrap(), Value::Str("ABC".into()));
}

// ==================== Descriptor tests ====================

#[test]
fn test_descriptor_kinds() {
    assert_eq!(TypeDescriptor::of::<bool>().kind(), Kind::Bool);
    assert_eq!(u64::descriptor().kind(), Kind::Int);
    assert_eq!(String::descriptor().kind(), Kind::Str);
    assert_eq!(f64::descriptor().kind(), Kind::Float);
    assert_eq!(Duration::descriptor().kind(), Kind::Duration);
    assert_eq!(BTreeMap::<String, u8>::descriptor().kind(), Kind::Map);
    assert_eq!(Vec::<u8>::descriptor().kind(), Kind::Sequence);
    assert_eq!(<(u8, u8)>::descriptor().kind(), Kind::Sequence);
    assert_eq!(Option::<u8>::descriptor().kind(), Kind::Optional);
    assert_eq!(Nested::descriptor().kind(), Kind::Composite);
    assert_eq!(TypeDescriptor::postponed("X").kind(), Kind::Postponed);
    assert_eq!(TypeDescriptor::opaque("X").kind(), Kind::Unsupported);
}

#[test]
fn test_descriptor_names() {
    assert_eq!(HashMap::<String, i64>::descriptor().name(), "HashMap<String, i64>");
    assert_eq!(<(String, i64)>::descriptor().name(), "(String, i64)");
    assert_eq!(Option::<u16>::descriptor().name(), "Option<u16>");
    assert_eq!(Vec::<Duration>::descriptor().name(), "Vec<Duration>");
}

#[test]
fn test_descriptor_args() {
    let ty = HashMap::<String, Vec<i64>>::descriptor();
    assert_eq!(ty.args().len(), 2);
    assert_eq!(ty.arg(1).map(TypeDescriptor::kind), Some(Kind::Sequence));
    assert_eq!(
        ty.arg(1).and_then(|v| v.arg(0)).map(TypeDescriptor::kind),
        Some(Kind::Int)
    );
    assert!(<(u8, String)>::descriptor().is_fixed_tuple());
    assert!(!Vec::<u8>::descriptor().is_fixed_tuple());
}
