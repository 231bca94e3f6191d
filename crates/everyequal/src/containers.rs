//! Container equality procedures: sequences, keyed records, mappings, sets.
//!
//! All four share one per-pair skip chain (strict identity, direct
//! self-containment, active-pair lookup) and one recurse-or-strict tail that
//! brackets every descent with visited-pair bookkeeping. Mirrors the
//! `arrayEqual` / `objectEqual` / `mapEqual` / `setEqual` procedures of
//! upstream `everyequal` 2.2.1.

use everyequal_value::{Key, Record, Value};

use crate::compare::compare;
use crate::config::{EntryKey, ResolvedConfig, ResolvedOptions};
use crate::signature;
use crate::visited::{PairState, VisitedPairs};

// ── Pair machinery ───────────────────────────────────────────────────────

/// Outcome of the shared skip chain for one entry pair.
enum PairStep {
    /// Settled equal without recursion.
    Skip,
    /// Still to be decided, by recursion or strict fallback.
    Compare,
    /// Rejected, and the whole comparison with it.
    Reject,
}

fn pair_step(
    enclosing_target: &Value,
    enclosing_source: &Value,
    target_value: &Value,
    source_value: &Value,
    visited: &VisitedPairs,
) -> PairStep {
    if target_value.strict_eq(source_value) {
        return PairStep::Skip;
    }
    if target_value.ref_eq(enclosing_target) && source_value.ref_eq(enclosing_source) {
        // Both sides point straight back at their own container.
        return PairStep::Skip;
    }
    if let (Some(target_id), Some(source_id)) =
        (target_value.obj_id(), source_value.obj_id())
    {
        match visited.state(target_id, source_id) {
            PairState::ActivePair => return PairStep::Skip,
            PairState::Conflict => return PairStep::Reject,
            PairState::Unseen => {}
        }
    }
    PairStep::Compare
}

/// Recurse-or-strict tail: nested pairs recurse one level deeper when the
/// options allow it; everything else falls back to strict equality.
fn compare_pair(
    target_value: &Value,
    source_value: &Value,
    options: &ResolvedOptions,
    config: &ResolvedConfig,
    visited: &mut VisitedPairs,
    depth: usize,
) -> bool {
    if !target_value.is_primitive()
        && !source_value.is_primitive()
        && options.deep
        && options.max_depth.admits(depth)
    {
        return recurse(target_value, source_value, config, visited, depth + 1);
    }
    target_value.strict_eq(source_value)
}

/// One guarded comparison: mark the pair active, run the dispatcher at the
/// given depth, clear the mark whatever the verdict.
pub(crate) fn recurse(
    target_value: &Value,
    source_value: &Value,
    config: &ResolvedConfig,
    visited: &mut VisitedPairs,
    depth: usize,
) -> bool {
    let ids = match (target_value.obj_id(), source_value.obj_id()) {
        (Some(target_id), Some(source_id)) => Some((target_id, source_id)),
        _ => None,
    };
    if let Some((target_id, source_id)) = ids {
        visited.enter(target_id, source_id);
    }
    let equal = compare(target_value, source_value, config, visited, depth);
    if let Some((target_id, _)) = ids {
        visited.exit(target_id);
    }
    equal
}

// ── Sequence ─────────────────────────────────────────────────────────────

pub(crate) fn seq_equal(
    target: &Value,
    source: &Value,
    options: &ResolvedOptions,
    config: &ResolvedConfig,
    visited: &mut VisitedPairs,
    depth: usize,
) -> bool {
    let (Value::Arr(a), Value::Arr(b)) = (target, source) else {
        return false;
    };
    let (items_a, items_b) = (a.borrow(), b.borrow());
    if items_a.len() != items_b.len() {
        return false;
    }
    if options.ignore.is_none()
        && signature::seq_signature(&items_a) != signature::seq_signature(&items_b)
    {
        return false;
    }
    for (target_value, source_value) in items_a.iter().zip(items_b.iter()) {
        if let Some(ignore) = &options.ignore {
            if ignore(EntryKey::None, target_value, source_value, depth) {
                continue;
            }
        }
        match pair_step(target, source, target_value, source_value, visited) {
            PairStep::Skip => continue,
            PairStep::Reject => return false,
            PairStep::Compare => {}
        }
        if !compare_pair(target_value, source_value, options, config, visited, depth) {
            return false;
        }
    }
    true
}

// ── Keyed record ─────────────────────────────────────────────────────────

pub(crate) fn obj_equal(
    target: &Value,
    source: &Value,
    options: &ResolvedOptions,
    config: &ResolvedConfig,
    visited: &mut VisitedPairs,
    depth: usize,
) -> bool {
    let (Value::Obj(a), Value::Obj(b)) = (target, source) else {
        return false;
    };
    let (record_a, record_b) = (a.borrow(), b.borrow());
    record_equal(
        target, source, &record_a, &record_b, options, config, visited, depth,
    )
}

/// Walks the union of own keys. Shared by keyed records and by plain-bag
/// opaque values, whose fields compare under the record options.
#[allow(clippy::too_many_arguments)]
pub(crate) fn record_equal(
    target: &Value,
    source: &Value,
    record_a: &Record,
    record_b: &Record,
    options: &ResolvedOptions,
    config: &ResolvedConfig,
    visited: &mut VisitedPairs,
    depth: usize,
) -> bool {
    if record_a.len() != record_b.len() {
        return false;
    }
    if options.ignore.is_none()
        && signature::record_signature(record_a) != signature::record_signature(record_b)
    {
        return false;
    }
    // Union of both key sets, target's insertion order first.
    let mut keys: Vec<Key> = record_a.keys().cloned().collect();
    for key in record_b.keys() {
        if !record_a.contains_key(key) {
            keys.push(key.clone());
        }
    }
    let undefined = Value::Undefined;
    for key in &keys {
        let prop_a = record_a.get(key);
        let prop_b = record_b.get(key);
        let target_value = prop_a.map(|p| &p.value).unwrap_or(&undefined);
        let source_value = prop_b.map(|p| &p.value).unwrap_or(&undefined);
        if let Some(ignore) = &options.ignore {
            if ignore(EntryKey::Prop(key), target_value, source_value, depth) {
                continue;
            }
        }
        if prop_a.is_none() != prop_b.is_none() {
            // Present as an own key on one side only: never equal, whatever
            // the values.
            return false;
        }
        match pair_step(target, source, target_value, source_value, visited) {
            PairStep::Skip => continue,
            PairStep::Reject => return false,
            PairStep::Compare => {}
        }
        if options.check_descriptor {
            if let (Some(prop_a), Some(prop_b)) = (prop_a, prop_b) {
                if prop_a.descriptor != prop_b.descriptor {
                    return false;
                }
            }
        }
        if !compare_pair(target_value, source_value, options, config, visited, depth) {
            return false;
        }
    }
    true
}

// ── Mapping ──────────────────────────────────────────────────────────────

pub(crate) fn map_equal(
    target: &Value,
    source: &Value,
    options: &ResolvedOptions,
    config: &ResolvedConfig,
    visited: &mut VisitedPairs,
    depth: usize,
) -> bool {
    let (Value::Map(a), Value::Map(b)) = (target, source) else {
        return false;
    };
    let (map_a, map_b) = (a.borrow(), b.borrow());
    if map_a.len() != map_b.len() {
        return false;
    }
    if options.ignore.is_none()
        && signature::map_signature(&map_a) != signature::map_signature(&map_b)
    {
        return false;
    }
    // Entries pair positionally, so insertion order is significant.
    for ((target_key, target_value), (source_key, source_value)) in
        map_a.iter().zip(map_b.iter())
    {
        let keys_equal = target_key.strict_eq(source_key)
            || (options.check_equal_key
                && key_pair_equal(target, source, target_key, source_key, config, visited, depth));
        if !keys_equal {
            return false;
        }
        if let Some(ignore) = &options.ignore {
            if ignore(EntryKey::MapKey(target_key), target_value, source_value, depth) {
                continue;
            }
        }
        match pair_step(target, source, target_value, source_value, visited) {
            PairStep::Skip => continue,
            PairStep::Reject => return false,
            PairStep::Compare => {}
        }
        if !compare_pair(target_value, source_value, options, config, visited, depth) {
            return false;
        }
    }
    true
}

/// Deep key comparison for one mapping entry: the same pair discipline as
/// values, with the recursion kept at the entry's own depth. Cyclic keys
/// settle through the active-pair table instead of descending forever.
fn key_pair_equal(
    target: &Value,
    source: &Value,
    target_key: &Value,
    source_key: &Value,
    config: &ResolvedConfig,
    visited: &mut VisitedPairs,
    depth: usize,
) -> bool {
    match pair_step(target, source, target_key, source_key, visited) {
        PairStep::Skip => true,
        PairStep::Reject => false,
        PairStep::Compare => recurse(target_key, source_key, config, visited, depth),
    }
}

// ── Set ──────────────────────────────────────────────────────────────────

pub(crate) fn set_equal(
    target: &Value,
    source: &Value,
    options: &ResolvedOptions,
    config: &ResolvedConfig,
    visited: &mut VisitedPairs,
    depth: usize,
) -> bool {
    let (Value::Set(a), Value::Set(b)) = (target, source) else {
        return false;
    };
    let (set_a, set_b) = (a.borrow(), b.borrow());
    if set_a.len() != set_b.len() {
        return false;
    }
    if set_a.is_empty() {
        return true;
    }
    if options.ignore.is_none()
        && signature::set_signature(&set_a) != signature::set_signature(&set_b)
    {
        return false;
    }
    // Greedy first-match: each target element claims the first unclaimed
    // source element it equals, and no claim is ever revisited.
    let pool: Vec<&Value> = set_b.iter().collect();
    let mut claimed = vec![false; pool.len()];
    'targets: for target_value in set_a.iter() {
        if let Some(ignore) = &options.ignore {
            if ignore(EntryKey::None, target_value, target_value, depth) {
                continue;
            }
        }
        if target_value.ref_eq(target) {
            // A set containing itself needs no counterpart.
            continue;
        }
        for (i, &source_value) in pool.iter().enumerate() {
            if claimed[i] {
                continue;
            }
            if set_candidate_equal(target_value, source_value, options, config, visited, depth) {
                claimed[i] = true;
                continue 'targets;
            }
        }
        return false;
    }
    true
}

/// One candidate attempt inside the greedy search. Failure only discards
/// the candidate, never the comparison.
fn set_candidate_equal(
    target_value: &Value,
    source_value: &Value,
    options: &ResolvedOptions,
    config: &ResolvedConfig,
    visited: &mut VisitedPairs,
    depth: usize,
) -> bool {
    if target_value.strict_eq(source_value) {
        return true;
    }
    if target_value.is_primitive() || source_value.is_primitive() || !options.deep {
        return false;
    }
    if let (Some(target_id), Some(source_id)) =
        (target_value.obj_id(), source_value.obj_id())
    {
        match visited.state(target_id, source_id) {
            PairState::ActivePair => return true,
            PairState::Conflict => return false,
            PairState::Unseen => {}
        }
    }
    if !options.max_depth.admits(depth) {
        return false;
    }
    recurse(target_value, source_value, config, visited, depth + 1)
}
