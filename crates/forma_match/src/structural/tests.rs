use super::*;
use forma_pattern::{lit, map, none, seq, set, ty, var, var_with};
use forma_value::{Class, Type};
use pretty_assertions::assert_eq;

const X: VarId = VarId::new(0);
const Y: VarId = VarId::new(1);

/// Run one attempt with a two-slot table; returns the outcome and the table.
fn run(pattern: &Pattern, subject: &Value) -> (bool, BindingTable) {
    let attempt = Attempt::new(pattern, 2).unwrap_or_else(|e| panic!("{e}"));
    let mut table = BindingTable::new(2);
    let matched = attempt.attempt_match(pattern, subject, &mut table);
    (matched, table)
}

fn matches(pattern: &Pattern, subject: &Value) -> bool {
    run(pattern, subject).0
}

fn ints(items: &[i64]) -> Vec<Value> {
    items.iter().copied().map(Value::int).collect()
}

// Literals and types

#[test]
fn test_literal_uses_value_equality() {
    assert!(matches(&lit(3), &Value::int(3)));
    assert!(matches(&lit(3), &Value::Float(3.0)));
    assert!(!matches(&lit(3), &Value::int(4)));
    assert!(!matches(&lit("3"), &Value::int(3)));
    assert!(matches(&lit(b"ok"), &Value::byte_array(b"ok".as_slice())));
}

#[test]
fn test_none_literal_matches_only_none() {
    assert!(matches(&none(), &Value::None));
    assert!(!matches(&none(), &Value::Bool(false)));
    assert!(!matches(&none(), &Value::int(0)));
}

#[test]
fn test_type_constraint_accepts_subtypes() {
    assert!(matches(&ty(Type::Int), &Value::int(1)));
    assert!(matches(&ty(Type::Int), &Value::Bool(true)));
    assert!(!matches(&ty(Type::Int), &Value::Float(1.0)));
    assert!(matches(&ty(Type::BytesLike), &Value::from(b"x")));
    assert!(matches(&ty(Type::Any), &Value::None));

    let base = Class::new("Base");
    let derived = Class::subclass(&base, "Derived");
    assert!(matches(&ty(Type::Class(base)), &Value::object(&derived, vec![])));
}

// Sequences

#[test]
fn test_sequence_requires_exact_length() {
    let pattern = seq([ty(Type::Int), ty(Type::Int)]);
    assert!(matches(&pattern, &Value::tuple(ints(&[1, 2]))));
    assert!(matches(&pattern, &Value::list(ints(&[1, 2]))));
    assert!(!matches(&pattern, &Value::tuple(ints(&[1]))));
    assert!(!matches(&pattern, &Value::tuple(ints(&[1, 2, 3]))));
    assert!(matches(&seq([]), &Value::list(vec![])));
}

#[test]
fn test_sequence_is_positional() {
    let pattern = seq([ty(Type::Int), ty(Type::Str)]);
    assert!(matches(&pattern, &Value::tuple(vec![Value::int(1), Value::from("a")])));
    assert!(!matches(&pattern, &Value::tuple(vec![Value::from("a"), Value::int(1)])));
}

#[test]
fn test_sequence_rejects_non_sequences() {
    let pattern = seq([ty(Type::Str), ty(Type::Str)]);
    assert!(!matches(&pattern, &Value::from("ab")));
    assert!(!matches(&pattern, &Value::set(vec![Value::from("a"), Value::from("b")])));
    assert!(!matches(&seq([lit(1)]), &Value::int(1)));
}

// Collections

#[test]
fn test_collection_tolerates_extra_elements() {
    let pattern = set([lit(2), ty(Type::Str)]);
    let subject = Value::set(vec![Value::int(1), Value::int(2), Value::from("s"), Value::None]);
    assert!(matches(&pattern, &subject));
    assert!(matches(&set([]), &Value::set(ints(&[1]))));
}

#[test]
fn test_collection_is_injective() {
    let pattern = set([lit(2), lit(3), ty(Type::Int)]);
    let subject = Value::set(vec![Value::int(2), Value::int(3), Value::from("nope")]);
    assert!(!matches(&pattern, &subject));

    let subject = Value::set(vec![Value::int(2), Value::int(3), Value::int(4)]);
    assert!(matches(&pattern, &subject));
}

#[test]
fn test_collection_requires_a_set() {
    assert!(!matches(&set([lit(1)]), &Value::list(ints(&[1]))));
    assert!(!matches(&set([]), &Value::list(vec![])));
}

#[test]
fn test_collection_backtracks_over_type_overlap() {
    // `int` first grabbing 2 would starve the literal 2.
    let pattern = set([ty(Type::Int), lit(2)]);
    assert!(matches(&pattern, &Value::set(ints(&[2, 5]))));
    assert!(matches(&pattern, &Value::set(ints(&[5, 2]))));
    assert!(!matches(&pattern, &Value::set(ints(&[2]))));
}

// Mappings

#[test]
fn test_mapping_matches_key_and_value_of_one_pair() {
    let pattern = map([(lit("a"), ty(Type::Int))]);
    let subject = Value::map(vec![
        (Value::from("a"), Value::int(1)),
        (Value::from("b"), Value::from("x")),
    ]);
    assert!(matches(&pattern, &subject));

    // key "b" exists with an int value, key "a" does not
    let subject = Value::map(vec![
        (Value::from("a"), Value::from("x")),
        (Value::from("b"), Value::int(1)),
    ]);
    assert!(!matches(&pattern, &subject));
}

#[test]
fn test_mapping_pairs_are_claimed_once() {
    let pattern = map([(ty(Type::Str), ty(Type::Int)), (ty(Type::Str), ty(Type::Int))]);
    let one = Value::map(vec![(Value::from("a"), Value::int(1))]);
    let two = Value::map(vec![
        (Value::from("a"), Value::int(1)),
        (Value::from("b"), Value::int(2)),
    ]);
    assert!(!matches(&pattern, &one));
    assert!(matches(&pattern, &two));
}

#[test]
fn test_mapping_requires_a_map() {
    assert!(!matches(&map([]), &Value::set(vec![])));
    assert!(matches(&map([]), &Value::map(vec![])));
}

// Variables

#[test]
fn test_unconstrained_variable_captures_anything() {
    let (matched, table) = run(&var(X), &Value::from("anything"));
    assert!(matched);
    assert_eq!(table.get(X), Some(&Value::from("anything")));
}

#[test]
fn test_constrained_variable_binds_only_on_success() {
    let pattern = var_with(X, ty(Type::Int));
    let (matched, table) = run(&pattern, &Value::int(9));
    assert!(matched);
    assert_eq!(table.get(X), Some(&Value::int(9)));

    let (matched, table) = run(&pattern, &Value::from("9"));
    assert!(!matched);
    assert_eq!(table.get(X), None);
}

#[test]
fn test_repeated_variable_is_a_backreference() {
    let pattern = seq([var(X), var(X)]);
    assert!(matches(&pattern, &Value::tuple(ints(&[4, 4]))));
    assert!(!matches(&pattern, &Value::tuple(ints(&[4, 5]))));
}

#[test]
fn test_backreference_in_mapping() {
    let pattern = map([(var_with(X, ty(Type::Int)), var(X))]);
    assert!(matches(&pattern, &Value::map(vec![(Value::int(3), Value::int(3))])));
    assert!(!matches(&pattern, &Value::map(vec![(Value::int(1), Value::int(2))])));
}

#[test]
fn test_constraint_applies_at_unannotated_first_occurrence() {
    // The key is visited first and is unannotated; it still must be an int.
    let pattern = map([(var(X), var_with(X, ty(Type::Int)))]);
    assert!(!matches(&pattern, &Value::map(vec![(Value::from("s"), Value::from("s"))])));
    assert!(matches(&pattern, &Value::map(vec![(Value::int(5), Value::int(5))])));
}

#[test]
fn test_variables_agree_across_collection_entries() {
    // Two entries share X: both need the same element value, which a set
    // cannot supply twice.
    let pattern = set([var_with(X, ty(Type::Int)), var(X)]);
    assert!(!matches(&pattern, &Value::set(ints(&[1, 2]))));

    // Across nested sequences it works.
    let pattern = set([seq([lit("a"), var(X)]), seq([lit("b"), var(X)])]);
    let subject = Value::set(vec![
        Value::tuple(vec![Value::from("a"), Value::int(1)]),
        Value::tuple(vec![Value::from("b"), Value::int(2)]),
        Value::tuple(vec![Value::from("b"), Value::int(1)]),
    ]);
    let (matched, table) = run(&pattern, &subject);
    assert!(matched);
    assert_eq!(table.get(X), Some(&Value::int(1)));
}

#[test]
fn test_failed_branch_captures_do_not_leak_into_winner() {
    // Entry 1 can take ("k", 1) or ("k", 2); only 2 satisfies entry 2.
    let pattern = set([seq([lit("k"), var(X)]), seq([lit("v"), var(X)])]);
    let subject = Value::set(vec![
        Value::tuple(vec![Value::from("k"), Value::int(1)]),
        Value::tuple(vec![Value::from("k"), Value::int(2)]),
        Value::tuple(vec![Value::from("v"), Value::int(2)]),
    ]);
    let (matched, table) = run(&pattern, &subject);
    assert!(matched);
    assert_eq!(table.get(X), Some(&Value::int(2)));
}

#[test]
fn test_nested_variables_inside_constraint() {
    let pattern = var_with(X, seq([ty(Type::Int), var(Y)]));
    let subject = Value::tuple(vec![Value::int(1), Value::from("tail")]);
    let (matched, table) = run(&pattern, &subject);
    assert!(matched);
    assert_eq!(table.values(), vec![Some(subject), Some(Value::from("tail"))]);
}

#[test]
fn test_self_referential_constraint_never_matches() {
    let pattern = var_with(X, seq([var(X)]));
    assert!(!matches(&pattern, &Value::tuple(ints(&[1]))));
}

#[test]
fn test_bare_self_reference_is_rejected_before_matching() {
    let pattern = var_with(X, var(X));
    assert!(matches!(
        Attempt::new(&pattern, 2),
        Err(PatternError::SelfReferentialConstraint { var }) if var == X
    ));

    let pattern = map([(var_with(X, var(Y)), var_with(Y, var(X)))]);
    assert!(Attempt::new(&pattern, 2).is_err());
}

#[test]
fn test_deeply_nested_pattern() {
    let mut pattern = lit(0);
    let mut subject = Value::int(0);
    for _ in 0..2_000 {
        pattern = seq([pattern]);
        subject = Value::list(vec![subject]);
    }
    assert!(matches(&pattern, &subject));
}
