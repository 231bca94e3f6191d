//! Comparison configuration.
//!
//! Mirrors the upstream settings object: optional top-level defaults for
//! `deep`, `maxDepth`, and `ignore`, plus one option block per type tag.
//! Upstream merged the defaults into the caller's settings object lazily and
//! in place; here [`Config::resolve`] flattens everything once per call into
//! an immutable table the whole traversal reads.

use std::collections::HashMap;
use std::rc::Rc;

use everyequal_value::{Key, TypeTag, Value};

// ── Callbacks ────────────────────────────────────────────────────────────

/// Position of an entry handed to an ignore predicate.
#[derive(Debug, Clone, Copy)]
pub enum EntryKey<'a> {
    /// No key context: sequence elements, set members, opaque pairs.
    None,
    /// Keyed-record property.
    Prop(&'a Key),
    /// Mapping key whose value pair is being walked.
    MapKey(&'a Value),
}

/// Skip predicate over an entry pair: `(key, target, source, depth)`.
pub type IgnoreFn = Rc<dyn Fn(EntryKey<'_>, &Value, &Value, usize) -> bool>;

/// Classifier directing cross-type coercion of primitive pairs.
pub type CoerceFn = Rc<dyn Fn(&Value) -> Option<Coercion>>;

/// Custom equality for opaque values: `(target, source, depth)`.
pub type HandlerFn = Rc<dyn Fn(&Value, &Value, usize) -> bool>;

/// Primitive kind a [`CoerceFn`] can assign to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Str,
    Number,
    Bool,
    Date,
    Pattern,
}

// ── Depth ────────────────────────────────────────────────────────────────

/// Recursion ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxDepth {
    Unbounded,
    Limit(usize),
}

impl MaxDepth {
    /// True when a pair at `depth` may still recurse.
    #[inline]
    pub fn admits(&self, depth: usize) -> bool {
        match self {
            MaxDepth::Unbounded => true,
            MaxDepth::Limit(limit) => depth < *limit,
        }
    }
}

impl From<usize> for MaxDepth {
    fn from(limit: usize) -> Self {
        MaxDepth::Limit(limit)
    }
}

// ── Options ──────────────────────────────────────────────────────────────

/// Option block for one type tag; unset fields inherit the top-level
/// defaults where one exists.
#[derive(Clone, Default)]
pub struct TagOptions {
    deep: Option<bool>,
    max_depth: Option<MaxDepth>,
    ignore: Option<IgnoreFn>,
    coerced: Option<CoerceFn>,
    handler: Option<HandlerFn>,
    check_equal_key: Option<bool>,
    check_descriptor: Option<bool>,
}

impl TagOptions {
    pub fn new() -> Self {
        TagOptions::default()
    }

    /// Recursion toggle for entries of this kind.
    pub fn deep(mut self, deep: bool) -> Self {
        self.deep = Some(deep);
        self
    }

    /// Recursion ceiling for entries of this kind.
    pub fn max_depth(mut self, max_depth: impl Into<MaxDepth>) -> Self {
        self.max_depth = Some(max_depth.into());
        self
    }

    /// Skip predicate for entry pairs of this kind.
    pub fn ignore(
        mut self,
        ignore: impl Fn(EntryKey<'_>, &Value, &Value, usize) -> bool + 'static,
    ) -> Self {
        self.ignore = Some(Rc::new(ignore));
        self
    }

    /// Classifier letting primitive pairs compare under a declared coercion.
    pub fn coerced(mut self, coerced: impl Fn(&Value) -> Option<Coercion> + 'static) -> Self {
        self.coerced = Some(Rc::new(coerced));
        self
    }

    /// Custom equality for opaque pairs.
    pub fn handler(mut self, handler: impl Fn(&Value, &Value, usize) -> bool + 'static) -> Self {
        self.handler = Some(Rc::new(handler));
        self
    }

    /// Compare mapping keys deeply instead of by identity (mappings only).
    pub fn check_equal_key(mut self, on: bool) -> Self {
        self.check_equal_key = Some(on);
        self
    }

    /// Require matching property descriptors (keyed records only).
    pub fn check_descriptor(mut self, on: bool) -> Self {
        self.check_descriptor = Some(on);
        self
    }
}

/// Caller-facing configuration: top-level defaults plus per-tag blocks.
#[derive(Clone, Default)]
pub struct Config {
    deep: Option<bool>,
    max_depth: Option<MaxDepth>,
    ignore: Option<IgnoreFn>,
    tags: HashMap<TypeTag, TagOptions>,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }

    /// Default recursion toggle for every tag without its own.
    pub fn with_deep(mut self, deep: bool) -> Self {
        self.deep = Some(deep);
        self
    }

    /// Default recursion ceiling for every tag without its own.
    pub fn with_max_depth(mut self, max_depth: impl Into<MaxDepth>) -> Self {
        self.max_depth = Some(max_depth.into());
        self
    }

    /// Default skip predicate for every tag without its own.
    pub fn with_ignore(
        mut self,
        ignore: impl Fn(EntryKey<'_>, &Value, &Value, usize) -> bool + 'static,
    ) -> Self {
        self.ignore = Some(Rc::new(ignore));
        self
    }

    /// Installs (replacing) the option block for one tag.
    pub fn with_tag(mut self, tag: TypeTag, options: TagOptions) -> Self {
        self.tags.insert(tag, options);
        self
    }

    /// Flattens this configuration into the per-tag table one comparison
    /// reads. Per-tag fields win; absent `deep`, `max_depth`, and `ignore`
    /// fall back to the top-level values, then to the defaults (deep on,
    /// depth unbounded, no predicate).
    pub(crate) fn resolve(&self) -> ResolvedConfig {
        let tags = TypeTag::ALL
            .iter()
            .map(|tag| {
                let block = self.tags.get(tag);
                ResolvedOptions {
                    deep: block.and_then(|b| b.deep).or(self.deep).unwrap_or(true),
                    max_depth: block
                        .and_then(|b| b.max_depth)
                        .or(self.max_depth)
                        .unwrap_or(MaxDepth::Unbounded),
                    ignore: block
                        .and_then(|b| b.ignore.clone())
                        .or_else(|| self.ignore.clone()),
                    coerced: block.and_then(|b| b.coerced.clone()),
                    handler: block.and_then(|b| b.handler.clone()),
                    check_equal_key: block.and_then(|b| b.check_equal_key).unwrap_or(false),
                    check_descriptor: block.and_then(|b| b.check_descriptor).unwrap_or(false),
                }
            })
            .collect();
        ResolvedConfig { tags }
    }
}

// ── Resolved form ────────────────────────────────────────────────────────

/// Fully-defaulted options for one tag, fixed for a whole call.
#[derive(Clone)]
pub(crate) struct ResolvedOptions {
    pub deep: bool,
    pub max_depth: MaxDepth,
    pub ignore: Option<IgnoreFn>,
    pub coerced: Option<CoerceFn>,
    pub handler: Option<HandlerFn>,
    pub check_equal_key: bool,
    pub check_descriptor: bool,
}

/// One resolved block per tag, indexed in [`TypeTag::ALL`] order.
pub(crate) struct ResolvedConfig {
    tags: Vec<ResolvedOptions>,
}

impl ResolvedConfig {
    pub fn options(&self, tag: TypeTag) -> &ResolvedOptions {
        &self.tags[tag_index(tag)]
    }
}

fn tag_index(tag: TypeTag) -> usize {
    match tag {
        TypeTag::Primitive => 0,
        TypeTag::Sequence => 1,
        TypeTag::Record => 2,
        TypeTag::Mapping => 3,
        TypeTag::Set => 4,
        TypeTag::Date => 5,
        TypeTag::Pattern => 6,
        TypeTag::NumericArray => 7,
        TypeTag::Buffer => 8,
        TypeTag::ErrorLike => 9,
        TypeTag::Opaque => 10,
    }
}
