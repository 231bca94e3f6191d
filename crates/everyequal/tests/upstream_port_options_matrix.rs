//! Configuration behavior matrix: recursion toggles, depth ceilings,
//! ignore predicates, coercions, key/descriptor checks, and opaque
//! handlers, ported from the upstream `everyequal` 2.2.1 suite.

use std::cell::RefCell;
use std::rc::Rc;

use everyequal::{
    every_equal_with, val, Coercion, Config, Descriptor, EntryKey, MapValue, OpaqueValue, Record,
    SetValue, TagOptions, TypeTag, Value,
};

fn map(entries: Vec<(Value, Value)>) -> Value {
    Value::map(entries.into_iter().collect::<MapValue>())
}

fn set(items: Vec<Value>) -> Value {
    Value::set(items.into_iter().collect::<SetValue>())
}

// ── deep ─────────────────────────────────────────────────────────────────

#[test]
fn deep_false_stops_at_the_first_level() {
    let config = Config::new().with_deep(false);
    assert!(every_equal_with(&val!({ "n": 1 }), &val!({ "n": 1 }), &config));
    assert!(every_equal_with(&val!([1, 2]), &val!([1, 2]), &config));
    // Nested containers are distinct references, and shallow mode never
    // looks inside them.
    assert!(!every_equal_with(
        &val!({ "list": [1] }),
        &val!({ "list": [1] }),
        &config
    ));
    assert!(!every_equal_with(&val!([[2]]), &val!([[2]]), &config));
}

#[test]
fn deep_false_accepts_shared_references() {
    let inner = val!([1, 2]);
    let a = val!({ "list": (inner.clone()) });
    let b = val!({ "list": (inner) });
    assert!(every_equal_with(&a, &b, &Config::new().with_deep(false)));
}

#[test]
fn deep_false_leaves_top_level_leaves_alone() {
    let config = Config::new().with_deep(false);
    // The toggle gates container recursion, not the leaf procedures.
    assert!(every_equal_with(&Value::date(5), &Value::date(5), &config));
    // Equal-timestamp dates inside a container are still two references.
    assert!(!every_equal_with(
        &val!([Value::date(5)]),
        &val!([Value::date(5)]),
        &config
    ));
}

// ── maxDepth ─────────────────────────────────────────────────────────────

#[test]
fn max_depth_zero_requires_reference_equal_nesting() {
    let config = Config::new().with_max_depth(0);
    assert!(every_equal_with(&val!({ "n": 1 }), &val!({ "n": 1 }), &config));
    assert!(!every_equal_with(
        &val!({ "x": { "a": 1 } }),
        &val!({ "x": { "a": 1 } }),
        &config
    ));

    let inner = val!({ "a": 1 });
    let shared_a = val!({ "x": (inner.clone()) });
    let shared_b = val!({ "x": (inner) });
    assert!(every_equal_with(&shared_a, &shared_b, &config));
}

#[test]
fn max_depth_counts_container_descents() {
    let deep = || val!({ "a": { "b": { "c": [1] } } });
    assert!(!every_equal_with(&deep(), &deep(), &Config::new().with_max_depth(2)));
    assert!(every_equal_with(&deep(), &deep(), &Config::new().with_max_depth(3)));
}

#[test]
fn per_tag_max_depth_gates_that_tag_only() {
    let config = Config::new().with_tag(TypeTag::Record, TagOptions::new().max_depth(0));
    // Record entries stop recursing; sequence elements are unaffected.
    assert!(!every_equal_with(
        &val!({ "x": { "a": 1 } }),
        &val!({ "x": { "a": 1 } }),
        &config
    ));
    assert!(every_equal_with(&val!([[2], [3]]), &val!([[2], [3]]), &config));
}

// ── ignore ───────────────────────────────────────────────────────────────

#[test]
fn ignore_skips_matching_entries() {
    let config = Config::new().with_ignore(|key, _, _, _| {
        matches!(key, EntryKey::Prop(name) if name.as_text() == "timestamp")
    });
    let a = val!({ "id": 7, "timestamp": 100 });
    let b = val!({ "id": 7, "timestamp": 999 });
    assert!(!every_equal_with(&a, &b, &Config::new()));
    assert!(every_equal_with(&a, &b, &config));
    // Ignored entries still count toward the key census.
    assert!(!every_equal_with(&a, &val!({ "id": 7 }), &config));
}

#[test]
fn ignore_presence_suspends_record_order_sensitivity() {
    // Installing any ignore predicate suspends the stringified fast-reject,
    // and the key-union walk itself is order-blind.
    let a = val!({ "a": 1, "b": 2 });
    let b = val!({ "b": 2, "a": 1 });
    assert!(!every_equal_with(&a, &b, &Config::new()));
    let config = Config::new().with_ignore(|_, _, _, _| false);
    assert!(every_equal_with(&a, &b, &config));
}

#[test]
fn ignore_presence_keeps_mappings_positional() {
    // Mappings stay order-sensitive even without the fast-reject: the walk
    // itself is positional.
    let a = map(vec![(val!(1), val!("a")), (val!(2), val!("b"))]);
    let b = map(vec![(val!(2), val!("b")), (val!(1), val!("a"))]);
    let config = Config::new().with_ignore(|_, _, _, _| false);
    assert!(!every_equal_with(&a, &b, &config));
}

#[test]
fn ignore_sees_entry_context() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let config = Config::new().with_ignore(move |key, _, _, _| {
        sink.borrow_mut().push(match key {
            EntryKey::None => "element".to_string(),
            EntryKey::Prop(key) => format!("prop:{}", key.as_text()),
            EntryKey::MapKey(key) => format!("key:{key}"),
        });
        true
    });
    assert!(every_equal_with(&val!([1]), &val!([2]), &config));
    assert!(every_equal_with(&val!({ "a": 1 }), &val!({ "a": 2 }), &config));
    assert!(every_equal_with(
        &map(vec![(val!("k"), val!(1))]),
        &map(vec![(val!("k"), val!(2))]),
        &config
    ));
    assert_eq!(log.borrow().as_slice(), ["element", "prop:a", "key:k"]);
}

#[test]
fn ignored_set_elements_need_no_match() {
    // The predicate sees each unmatched target element paired with itself.
    let config = Config::new().with_tag(
        TypeTag::Set,
        TagOptions::new().ignore(|_, target, _, _| matches!(target, Value::Number(n) if *n < 0.0)),
    );
    assert!(every_equal_with(
        &set(vec![val!(-1), val!(2)]),
        &set(vec![val!(9), val!(2)]),
        &config
    ));
    assert!(!every_equal_with(
        &set(vec![val!(1), val!(2)]),
        &set(vec![val!(9), val!(2)]),
        &config
    ));
}

// ── coerced ──────────────────────────────────────────────────────────────

fn primitive_coercion(kind: Coercion) -> Config {
    Config::new().with_tag(
        TypeTag::Primitive,
        TagOptions::new().coerced(move |value| match value {
            Value::Number(_) | Value::Str(_) | Value::Bool(_) => Some(kind),
            _ => None,
        }),
    )
}

#[test]
fn number_coercion_compares_numeric_text() {
    let config = primitive_coercion(Coercion::Number);
    assert!(every_equal_with(&val!("5"), &val!(5), &config));
    assert!(every_equal_with(&val!("5.5"), &val!(5.5), &config));
    assert!(every_equal_with(&val!(true), &val!(1), &config));
    // Leading zeros vanish under numeric reading.
    assert!(every_equal_with(&val!("1"), &val!("01"), &config));
    assert!(!every_equal_with(&val!("5"), &val!(6), &config));
    // Unparseable text reads as NaN, which equals nothing, itself included.
    assert!(!every_equal_with(&val!("abc"), &val!("abc"), &config));
}

#[test]
fn string_coercion_stays_strict() {
    let config = primitive_coercion(Coercion::Str);
    assert!(every_equal_with(&val!("a"), &val!("a"), &config));
    assert!(!every_equal_with(&val!(5), &val!("5"), &config));
    // The same pair the numeric reading accepts stays unequal as text.
    assert!(!every_equal_with(&val!("1"), &val!("01"), &config));
}

#[test]
fn bool_coercion_compares_truthiness() {
    let config = primitive_coercion(Coercion::Bool);
    assert!(every_equal_with(&val!(1), &val!("yes"), &config));
    assert!(every_equal_with(&val!(0), &val!(""), &config));
    assert!(!every_equal_with(&val!(0), &val!("x"), &config));
}

#[test]
fn date_coercion_parses_timestamps() {
    let config = primitive_coercion(Coercion::Date);
    assert!(every_equal_with(&val!("1970-01-02"), &val!(86_400_000), &config));
    assert!(every_equal_with(
        &val!("2023-11-14T22:13:20Z"),
        &val!(1_700_000_000_000i64 as f64),
        &config
    ));
    assert!(!every_equal_with(&val!("junk"), &val!(5), &config));
    // Unparseable timestamps never match, not even themselves.
    assert!(!every_equal_with(
        &val!("2023-01-01T00:00:00.5€"),
        &val!("2023-01-01T00:00:00.5€"),
        &config
    ));
    assert!(!every_equal_with(&val!("400000000-01-01"), &val!("400000000-01-01"), &config));
    // Real date values are not primitives; the classifier never sees them.
    assert!(!every_equal_with(&Value::date(86_400_000), &val!("1970-01-02"), &config));
}

#[test]
fn pattern_coercion_compares_normalized_sources() {
    let config = primitive_coercion(Coercion::Pattern);
    assert!(every_equal_with(&val!("a+"), &val!("a+"), &config));
    assert!(!every_equal_with(&val!("a+"), &val!("b+"), &config));
    // Text that does not compile never gets a normalized form.
    assert!(!every_equal_with(&val!("a("), &val!("a("), &config));
}

#[test]
fn coercion_requires_both_sides_to_classify_alike() {
    let config = Config::new().with_tag(
        TypeTag::Primitive,
        TagOptions::new().coerced(|value| match value {
            Value::Str(_) => Some(Coercion::Number),
            _ => None,
        }),
    );
    // Only the string side classifies, so the ordinary strict path decides.
    assert!(!every_equal_with(&val!("5"), &val!(5), &config));
    assert!(every_equal_with(&val!("5"), &val!("5"), &config));
}

#[test]
fn coercion_never_applies_inside_containers() {
    let config = primitive_coercion(Coercion::Number);
    assert!(every_equal_with(&val!("5"), &val!(5), &config));
    // Container elements compare strictly unless both sides are containers.
    assert!(!every_equal_with(&val!(["5"]), &val!([5]), &config));
    assert!(!every_equal_with(&val!({ "v": "5" }), &val!({ "v": 5 }), &config));
}

// ── checkEqualKey ────────────────────────────────────────────────────────

#[test]
fn check_equal_key_compares_mapping_keys_deeply() {
    let a = map(vec![(val!([1]), val!("x"))]);
    let b = map(vec![(val!([1]), val!("x"))]);
    assert!(!every_equal_with(&a, &b, &Config::new()));

    let config = Config::new().with_tag(TypeTag::Mapping, TagOptions::new().check_equal_key(true));
    assert!(every_equal_with(&a, &b, &config));
    assert!(!every_equal_with(
        &map(vec![(val!([1]), val!("x"))]),
        &map(vec![(val!([2]), val!("x"))]),
        &config
    ));
    // Keys must match and values must still compare.
    assert!(!every_equal_with(
        &map(vec![(val!([1]), val!("x"))]),
        &map(vec![(val!([1]), val!("y"))]),
        &config
    ));
}

// ── checkDescriptor ──────────────────────────────────────────────────────

#[test]
fn check_descriptor_requires_matching_attributes() {
    let frozen = Descriptor {
        writable: false,
        ..Descriptor::default()
    };
    let mut a = Record::new();
    a.define("a", val!([1]), Descriptor::default());
    let mut b = Record::new();
    b.define("a", val!([1]), frozen);

    assert!(every_equal_with(&Value::obj(a.clone()), &Value::obj(b.clone()), &Config::new()));
    let config = Config::new().with_tag(TypeTag::Record, TagOptions::new().check_descriptor(true));
    assert!(!every_equal_with(&Value::obj(a), &Value::obj(b), &config));
}

#[test]
fn descriptor_check_follows_the_skip_chain() {
    // Strictly-equal values skip before the attribute comparison is reached.
    let frozen = Descriptor {
        writable: false,
        ..Descriptor::default()
    };
    let mut a = Record::new();
    a.define("a", 1, Descriptor::default());
    let mut b = Record::new();
    b.define("a", 1, frozen);
    let config = Config::new().with_tag(TypeTag::Record, TagOptions::new().check_descriptor(true));
    assert!(every_equal_with(&Value::obj(a), &Value::obj(b), &config));
}

// ── handler ──────────────────────────────────────────────────────────────

#[test]
fn handler_is_authoritative_for_classed_opaques() {
    let url = |text: &str| Value::opaque(OpaqueValue::of_class("URL").with_repr(text));
    let always = Config::new().with_tag(TypeTag::Opaque, TagOptions::new().handler(|_, _, _| true));
    let never = Config::new().with_tag(TypeTag::Opaque, TagOptions::new().handler(|_, _, _| false));
    assert!(every_equal_with(&url("https://x/"), &url("https://y/"), &always));
    assert!(!every_equal_with(&url("https://x/"), &url("https://x/"), &never));
}

#[test]
fn plain_bags_bypass_the_handler() {
    let bag = |n: f64| {
        let mut fields = Record::new();
        fields.insert("n", n);
        Value::opaque(OpaqueValue::plain().with_fields(fields))
    };
    let always = Config::new().with_tag(TypeTag::Opaque, TagOptions::new().handler(|_, _, _| true));
    let never = Config::new().with_tag(TypeTag::Opaque, TagOptions::new().handler(|_, _, _| false));
    // Field-bag structure wins in both directions.
    assert!(!every_equal_with(&bag(1.0), &bag(2.0), &always));
    assert!(every_equal_with(&bag(1.0), &bag(1.0), &never));
}

#[test]
fn opaque_ignore_short_circuits_the_chain() {
    let config = Config::new().with_tag(TypeTag::Opaque, TagOptions::new().ignore(|_, _, _, _| true));
    assert!(every_equal_with(
        &Value::opaque(OpaqueValue::of_class("URL")),
        &Value::opaque(OpaqueValue::of_class("Blob")),
        &config
    ));
}

// ── Greedy set matching ──────────────────────────────────────────────────

#[test]
fn set_matching_is_greedy_in_iteration_order() {
    let token = |text: &str| Value::opaque(OpaqueValue::of_class("Token").with_repr(text));
    let near = |a: &Value, b: &Value, _: usize| -> bool {
        let (Value::Opaque(x), Value::Opaque(y)) = (a, b) else {
            return false;
        };
        let (x, y) = (x.borrow(), y.borrow());
        match (&x.repr, &y.repr) {
            (Some(rx), Some(ry)) => rx.len().abs_diff(ry.len()) <= 1,
            _ => false,
        }
    };
    let config = Config::new()
        .with_tag(TypeTag::Opaque, TagOptions::new().handler(near))
        // Suspend the stringified fast-reject so matching decides.
        .with_tag(TypeTag::Set, TagOptions::new().ignore(|_, _, _, _| false));

    let source = || set(vec![token("a"), token("abc")]);
    // "ab" claims "a" first, stranding the remaining "a" against "abc",
    // even though the crosswise assignment would succeed.
    assert!(!every_equal_with(&set(vec![token("ab"), token("a")]), &source(), &config));
    assert!(every_equal_with(&set(vec![token("a"), token("ab")]), &source(), &config));
}

// ── Inheritance ──────────────────────────────────────────────────────────

#[test]
fn per_tag_blocks_override_shared_defaults() {
    let config = Config::new()
        .with_deep(false)
        .with_tag(TypeTag::Sequence, TagOptions::new().deep(true));
    // Sequences opted back in; records inherit the shallow default.
    assert!(every_equal_with(&val!([[2]]), &val!([[2]]), &config));
    assert!(!every_equal_with(
        &val!({ "x": { "y": 1 } }),
        &val!({ "x": { "y": 1 } }),
        &config
    ));
}
