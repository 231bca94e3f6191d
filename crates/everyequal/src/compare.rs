//! Dispatch core.
//!
//! Mirrors `everyEqual` in upstream `everyequal` 2.2.1: classify both
//! sides, give declared coercions first claim on primitive pairs, reject
//! mismatched tags, take the strict fast path, then hand the pair to the
//! per-tag procedure. Every verdict is a plain `bool`; only caller
//! callbacks can escape by panicking.

use everyequal_value::{to_bool, to_date_ms, to_number, Pattern, TypeTag, Value};

use crate::config::{Coercion, EntryKey, ResolvedConfig, ResolvedOptions};
use crate::containers::{map_equal, obj_equal, record_equal, seq_equal, set_equal};
use crate::leaf;
use crate::visited::VisitedPairs;

pub(crate) fn compare(
    target: &Value,
    source: &Value,
    config: &ResolvedConfig,
    visited: &mut VisitedPairs,
    depth: usize,
) -> bool {
    let tag = target.tag();
    let options = config.options(tag);

    // Declared coercions get first claim on primitive pairs; they are the
    // one sanctioned exception to the tag-match requirement.
    if target.is_primitive() && source.is_primitive() {
        if let Some(coerced) = &options.coerced {
            if let Some(verdict) =
                coerced_equal(coerced(target), coerced(source), target, source)
            {
                return verdict;
            }
        }
    }

    if tag != source.tag() {
        return false;
    }
    if target.strict_eq(source) {
        return true;
    }

    match tag {
        // Strict equality was the last word for primitives.
        TypeTag::Primitive => false,
        TypeTag::Sequence => seq_equal(target, source, options, config, visited, depth),
        TypeTag::Record => obj_equal(target, source, options, config, visited, depth),
        TypeTag::Mapping => map_equal(target, source, options, config, visited, depth),
        TypeTag::Set => set_equal(target, source, options, config, visited, depth),
        TypeTag::Date => leaf::date_equal(target, source),
        TypeTag::Pattern => leaf::pattern_equal(target, source),
        TypeTag::NumericArray => leaf::numeric_array_equal(target, source),
        TypeTag::Buffer => leaf::bytes_equal(target, source),
        TypeTag::ErrorLike => leaf::error_equal(target, source),
        TypeTag::Opaque => opaque_equal(target, source, options, config, visited, depth),
    }
}

// ── Coercion ─────────────────────────────────────────────────────────────

/// Applies a declared coercion when both sides classify to the same kind.
/// `None` means no verdict: the ordinary path decides.
fn coerced_equal(
    target_kind: Option<Coercion>,
    source_kind: Option<Coercion>,
    target: &Value,
    source: &Value,
) -> Option<bool> {
    let kind = match (target_kind, source_kind) {
        (Some(a), Some(b)) if a == b => a,
        _ => return None,
    };
    let verdict = match kind {
        Coercion::Str => target.strict_eq(source),
        Coercion::Number => to_number(target) == to_number(source),
        Coercion::Bool => to_bool(target) == to_bool(source),
        Coercion::Date => match (to_date_ms(target), to_date_ms(source)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        Coercion::Pattern => match (coerce_pattern(target), coerce_pattern(source)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    };
    Some(verdict)
}

/// Normalized `/source/` form of a primitive read as a pattern, if its text
/// compiles.
fn coerce_pattern(value: &Value) -> Option<String> {
    let text = value.to_string();
    Pattern::new(text, "")
        .ok()
        .map(|pattern| format!("/{}/", pattern.source()))
}

// ── Opaque ───────────────────────────────────────────────────────────────

/// Opaque pairs resolve down a fixed chain: ignore predicate, plain-bag
/// structural walk, caller handler, then class and textual form.
fn opaque_equal(
    target: &Value,
    source: &Value,
    options: &ResolvedOptions,
    config: &ResolvedConfig,
    visited: &mut VisitedPairs,
    depth: usize,
) -> bool {
    if let Some(ignore) = &options.ignore {
        if ignore(EntryKey::None, target, source, depth) {
            return true;
        }
    }
    let (Value::Opaque(a), Value::Opaque(b)) = (target, source) else {
        return false;
    };
    let (opaque_a, opaque_b) = (a.borrow(), b.borrow());
    if opaque_a.class.is_none() && opaque_b.class.is_none() {
        // Plain bags have no behavior to defer to; their fields compare the
        // way keyed records do, under the record options.
        let record_options = config.options(TypeTag::Record);
        return record_equal(
            target,
            source,
            &opaque_a.fields,
            &opaque_b.fields,
            record_options,
            config,
            visited,
            depth,
        );
    }
    if let Some(handler) = &options.handler {
        return handler(target, source, depth);
    }
    if opaque_a.class != opaque_b.class {
        return false;
    }
    match (&opaque_a.repr, &opaque_b.repr) {
        (Some(repr_a), Some(repr_b)) => repr_a == repr_b,
        // Without a textual form on both sides there is nothing left to
        // distinguish same-class instances by.
        _ => true,
    }
}
