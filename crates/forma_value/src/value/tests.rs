use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_numeric_equality_crosses_int_float_bool() {
    assert_eq!(Value::int(1), Value::Float(1.0));
    assert_eq!(Value::Bool(true), Value::int(1));
    assert_eq!(Value::Bool(false), Value::Float(0.0));
    assert_ne!(Value::int(1), Value::Float(1.5));
    assert_ne!(Value::int(i64::MAX), Value::Float(9_223_372_036_854_775_808.0));
    assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
}

#[test]
fn test_strict_eq_keeps_tags_apart() {
    assert!(!Value::int(1).strict_eq(&Value::Float(1.0)));
    assert!(!Value::Bool(true).strict_eq(&Value::int(1)));
    assert!(!Value::bytes(b"ok".as_slice()).strict_eq(&Value::byte_array(b"ok".as_slice())));
    assert!(Value::Float(f64::NAN).strict_eq(&Value::Float(f64::NAN)));
    assert!(Value::list(vec![Value::int(1)]).strict_eq(&Value::list(vec![Value::int(1)])));
    assert!(!Value::list(vec![Value::int(1)]).strict_eq(&Value::list(vec![Value::Float(1.0)])));
}

#[test]
fn test_bytes_like_equality() {
    assert_eq!(Value::from(b"hi"), Value::byte_array(b"hi".as_slice()));
    assert_ne!(Value::from(b"hi"), Value::string("hi"));
}

#[test]
fn test_list_never_equals_tuple() {
    let items = vec![Value::int(1), Value::int(2)];
    assert_ne!(Value::list(items.clone()), Value::tuple(items));
}

#[test]
fn test_set_deduplicates_and_ignores_order() {
    let set = Value::set(vec![Value::int(1), Value::Float(1.0), Value::Bool(true), Value::int(2)]);
    assert_eq!(set.as_set().map(<[Value]>::len), Some(2));
    assert_eq!(set, Value::set(vec![Value::int(2), Value::int(1)]));
    assert_ne!(set, Value::set(vec![Value::int(2)]));
}

#[test]
fn test_map_overwrites_duplicate_keys_in_place() {
    let map = Value::map(vec![
        (Value::from("a"), Value::int(1)),
        (Value::from("b"), Value::int(2)),
        (Value::from("a"), Value::int(3)),
    ]);
    let entries = map.as_map().unwrap_or_default();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], (Value::from("a"), Value::int(3)));

    let reordered = Value::map(vec![
        (Value::from("b"), Value::int(2)),
        (Value::from("a"), Value::int(3)),
    ]);
    assert_eq!(map, reordered);
}

#[test]
fn test_type_of_and_instances() {
    assert_eq!(Value::None.type_of(), Type::None);
    assert!(Value::Bool(true).is_instance(&Type::Int));
    assert!(Value::int(3).is_instance(&Type::Number));
    assert!(!Value::Float(3.0).is_instance(&Type::Int));
    assert!(Value::from(b"ok").is_instance(&Type::BytesLike));
    assert!(Value::tuple(vec![]).is_instance(&Type::Sequence));
    assert!(!Value::string("abc").is_instance(&Type::Sequence));
    assert!(Value::None.is_instance(&Type::Any));
}

#[test]
fn test_object_instances_follow_class_chain() {
    let shape = Class::new("Shape");
    let circle = Class::subclass(&shape, "Circle");
    let c = Value::object(&circle, vec![("r".to_string(), Value::int(2))]);

    assert!(c.is_instance(&Type::Class(Arc::clone(&shape))));
    assert!(c.is_instance(&Type::Class(circle)));
    assert!(!Value::object(&shape, vec![]).is_instance(&c.type_of()));
    assert_eq!(c.as_object().and_then(|o| o.field("r")), Some(&Value::int(2)));
}

#[test]
fn test_accessors() {
    assert_eq!(Value::Bool(true).as_int(), Some(1));
    assert_eq!(Value::string("x").as_str(), Some("x"));
    assert_eq!(Value::byte_array(vec![1u8, 2]).as_bytes(), Some([1u8, 2].as_slice()));
    assert_eq!(Value::list(vec![Value::None]).as_sequence().map(<[Value]>::len), Some(1));
    assert_eq!(Value::Float(2.5).as_float(), Some(2.5));
    assert!(Value::from(None::<i64>).is_none());
    assert_eq!(Value::int(5).as_set(), None);
}

#[test]
fn test_display() {
    assert_eq!(Value::None.to_string(), "None");
    assert_eq!(Value::string("hi").to_string(), "\"hi\"");
    assert_eq!(Value::from(b"ok\n").to_string(), "b\"ok\\n\"");
    assert_eq!(Value::Float(1.0).to_string(), "1.0");
    assert_eq!(Value::tuple(vec![Value::int(1)]).to_string(), "(1,)");
    assert_eq!(
        Value::tuple(vec![Value::int(200), Value::from(b"ok")]).to_string(),
        "(200, b\"ok\")"
    );
    assert_eq!(Value::set(vec![]).to_string(), "set()");
    assert_eq!(
        Value::map(vec![(Value::from("k"), Value::list(vec![Value::Bool(false)]))]).to_string(),
        "{\"k\": [false]}"
    );
    let point = Class::new("Point");
    assert_eq!(
        Value::object(&point, vec![("x".to_string(), Value::int(1))]).to_string(),
        "Point(x=1)"
    );
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_equality {
    use super::super::Value;
    use proptest::prelude::*;

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::None),
            any::<bool>().prop_map(Value::Bool),
            (-4i64..4).prop_map(Value::Int),
            (-4i64..4).prop_map(|n| Value::Float(n as f64 / 2.0)),
            "[ab]{0,2}".prop_map(Value::string),
        ]
    }

    proptest! {
        #[test]
        fn equality_is_symmetric(a in scalar(), b in scalar()) {
            prop_assert_eq!(a == b, b == a);
        }

        #[test]
        fn strict_eq_implies_eq(a in scalar(), b in scalar()) {
            if a.strict_eq(&b) {
                prop_assert!(a == b);
            }
        }

        #[test]
        fn set_equality_ignores_order(items in proptest::collection::vec(scalar(), 0..6)) {
            let mut reversed = items.clone();
            reversed.reverse();
            prop_assert_eq!(Value::set(items), Value::set(reversed));
        }
    }
}
