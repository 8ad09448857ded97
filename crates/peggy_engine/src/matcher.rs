//! Matcher construction, identity, names, actions, and operand slots.
//!
//! A [`Matcher`] is a cheap, cloneable handle to one node of a grammar graph.
//! Clones share identity: the memo table keys on [`MatcherId`], so two
//! handles to the same matcher share cached results, while two separately
//! constructed but structurally equal matchers do not.
//!
//! Matching never mutates a matcher. The only mutable state is the display
//! name, the attached action, and the operand slots, and those are changed
//! by the grammar author while building a grammar, not by recognition.
//!
//! # Recursive grammars
//!
//! Matchers form a graph, not a tree. A rule that refers to itself is built
//! with a [`Matcher::forward`] placeholder that is later patched with
//! [`Matcher::define`], or by reassigning an operand slot with
//! [`Matcher::set_operand`]. Both reject a patch that would make the grammar
//! left-recursive.
//!
//! Matchers are reference counted, so a cyclic grammar is never freed.
//! Build recursive grammars once and keep them.

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use peggy_foundation::{Error, ErrorKind, Result, Value};
use regex::Regex;

use crate::analysis;
use crate::node::Node;

// =============================================================================
// Identity
// =============================================================================

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a matcher.
///
/// Ids are unique for the life of the process and are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatcherId(u64);

impl MatcherId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MatcherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Variants
// =============================================================================

/// The closed set of matcher kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Exact string at the current position.
    Literal,
    /// Anchored regular expression.
    Regex,
    /// One character within an inclusive range.
    Range,
    /// Any one character.
    Any,
    /// All operands, one after another.
    Sequence,
    /// First operand that matches.
    Choice,
    /// Zero or more repetitions.
    Star,
    /// One or more repetitions.
    Plus,
    /// Zero or one occurrence.
    Optional,
    /// Positive lookahead.
    And,
    /// Negative lookahead.
    Not,
    /// Match whose text is hidden from rendering.
    Ignore,
    /// Placeholder patched with a delegate after construction.
    Forward,
}

impl Variant {
    /// Returns the structural name, which is also the default matcher name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Literal => "Literal",
            Self::Regex => "Regex",
            Self::Range => "Range",
            Self::Any => "Any",
            Self::Sequence => "Sequence",
            Self::Choice => "Choice",
            Self::Star => "Star",
            Self::Plus => "Plus",
            Self::Optional => "Optional",
            Self::And => "And",
            Self::Not => "Not",
            Self::Ignore => "Ignore",
            Self::Forward => "Forward",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-variant data. Operand slots sit behind `RefCell` so they can be
/// patched after construction.
pub(crate) enum Kind {
    Literal(String),
    Regex { pattern: String, regex: Regex },
    Range { from: char, to: char },
    Any,
    Sequence(RefCell<Vec<Matcher>>),
    Choice(RefCell<Vec<Matcher>>),
    Star(RefCell<Matcher>),
    /// Holds the expansion `Sequence(m, Star(m))`.
    Plus(RefCell<Matcher>),
    /// Holds the expansion `Choice(m, Literal(""))`.
    Optional(RefCell<Matcher>),
    And(RefCell<Matcher>),
    Not(RefCell<Matcher>),
    Ignore(RefCell<Matcher>),
    Forward(RefCell<Option<Matcher>>),
}

impl Kind {
    const fn variant(&self) -> Variant {
        match self {
            Self::Literal(_) => Variant::Literal,
            Self::Regex { .. } => Variant::Regex,
            Self::Range { .. } => Variant::Range,
            Self::Any => Variant::Any,
            Self::Sequence(_) => Variant::Sequence,
            Self::Choice(_) => Variant::Choice,
            Self::Star(_) => Variant::Star,
            Self::Plus(_) => Variant::Plus,
            Self::Optional(_) => Variant::Optional,
            Self::And(_) => Variant::And,
            Self::Not(_) => Variant::Not,
            Self::Ignore(_) => Variant::Ignore,
            Self::Forward(_) => Variant::Forward,
        }
    }
}

// =============================================================================
// Actions
// =============================================================================

/// A semantic action: computes a value from a successful match.
///
/// The node gives access to its children, each of which can be evaluated
/// independently with [`Node::evaluate`].
pub type Action = Rc<dyn Fn(&Node) -> Result<Value>>;

// =============================================================================
// Matcher
// =============================================================================

pub(crate) struct Inner {
    id: MatcherId,
    name: RefCell<Option<String>>,
    action: RefCell<Option<Action>>,
    kind: Kind,
    /// Matchers holding this one as an operand.
    referrers: RefCell<Vec<Weak<Inner>>>,
}

/// A handle to one grammar rule.
#[derive(Clone)]
pub struct Matcher(Rc<Inner>);

impl Matcher {
    fn from_kind(kind: Kind) -> Self {
        let matcher = Self(Rc::new(Inner {
            id: MatcherId::next(),
            name: RefCell::new(None),
            action: RefCell::new(None),
            kind,
            referrers: RefCell::new(Vec::new()),
        }));
        for operand in matcher.operands() {
            operand.add_referrer(&matcher);
        }
        matcher
    }

    // -------------------------------------------------------------------------
    // Terminals
    // -------------------------------------------------------------------------

    /// Matches exactly `pattern`.
    #[must_use]
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self::from_kind(Kind::Literal(pattern.into()))
    }

    /// Matches the empty string everywhere.
    #[must_use]
    pub fn empty() -> Self {
        Self::literal("")
    }

    /// Matches `pattern` anchored at the current position.
    ///
    /// # Errors
    /// Returns [`ErrorKind::InvalidPattern`] if the pattern does not compile.
    pub fn regex(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!(r"\A(?:{pattern})"))
            .map_err(|err| Error::invalid_pattern(pattern, err.to_string()))?;
        Ok(Self::from_kind(Kind::Regex {
            pattern: pattern.to_string(),
            regex,
        }))
    }

    /// Matches one character in `from..=to`.
    ///
    /// # Errors
    /// Returns [`ErrorKind::InvalidRange`] if `from > to`.
    pub fn range(from: char, to: char) -> Result<Self> {
        if from > to {
            return Err(Error::invalid_range(from, to));
        }
        Ok(Self::from_kind(Kind::Range { from, to }))
    }

    /// Matches exactly the character `c`, as the range `[c-c]`.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self::from_kind(Kind::Range { from: c, to: c })
    }

    /// Matches any one character; fails only at end of input.
    #[must_use]
    pub fn any() -> Self {
        Self::from_kind(Kind::Any)
    }

    // -------------------------------------------------------------------------
    // Combinators
    // -------------------------------------------------------------------------

    /// Matches every item in order, each starting where the previous ended.
    #[must_use]
    pub fn sequence<I, M>(items: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Matcher>,
    {
        let items = items.into_iter().map(Into::into).collect();
        Self::from_kind(Kind::Sequence(RefCell::new(items)))
    }

    /// Tries each alternative at the same position; the first success wins.
    #[must_use]
    pub fn choice<I, M>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Matcher>,
    {
        let alternatives = alternatives.into_iter().map(Into::into).collect();
        Self::from_kind(Kind::Choice(RefCell::new(alternatives)))
    }

    /// Matches `operand` as many times as possible, including zero.
    #[must_use]
    pub fn star(operand: impl Into<Matcher>) -> Self {
        Self::from_kind(Kind::Star(RefCell::new(operand.into())))
    }

    /// Matches `operand` one or more times.
    #[must_use]
    pub fn plus(operand: impl Into<Matcher>) -> Self {
        Self::from_kind(Kind::Plus(RefCell::new(plus_expansion(operand.into()))))
    }

    /// Matches `operand` or nothing.
    #[must_use]
    pub fn optional(operand: impl Into<Matcher>) -> Self {
        Self::from_kind(Kind::Optional(RefCell::new(optional_expansion(
            operand.into(),
        ))))
    }

    /// Succeeds without consuming input iff `operand` matches here.
    #[must_use]
    pub fn and(operand: impl Into<Matcher>) -> Self {
        Self::from_kind(Kind::And(RefCell::new(operand.into())))
    }

    /// Succeeds without consuming input iff `operand` does not match here.
    #[must_use]
    pub fn not(operand: impl Into<Matcher>) -> Self {
        Self::from_kind(Kind::Not(RefCell::new(operand.into())))
    }

    /// Matches `operand` but renders as empty text.
    #[must_use]
    pub fn ignore(operand: impl Into<Matcher>) -> Self {
        Self::from_kind(Kind::Ignore(RefCell::new(operand.into())))
    }

    /// Creates an undefined placeholder for a recursive rule.
    ///
    /// Until [`Matcher::define`] is called, matching the placeholder fails.
    #[must_use]
    pub fn forward() -> Self {
        Self::from_kind(Kind::Forward(RefCell::new(None)))
    }

    // -------------------------------------------------------------------------
    // Identity and naming
    // -------------------------------------------------------------------------

    /// Returns this matcher's identity.
    #[must_use]
    pub fn id(&self) -> MatcherId {
        self.0.id
    }

    /// Returns the structural kind of this matcher.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.0.kind.variant()
    }

    /// Returns true if both handles refer to the same matcher.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the display name, defaulting to the variant name.
    #[must_use]
    pub fn name(&self) -> String {
        self.0
            .name
            .borrow()
            .clone()
            .unwrap_or_else(|| self.variant().name().to_string())
    }

    /// Returns true if a name was set explicitly.
    #[must_use]
    pub fn has_name(&self) -> bool {
        self.0.name.borrow().is_some()
    }

    /// Sets the display name.
    pub fn set_name(&self, name: impl Into<String>) {
        *self.0.name.borrow_mut() = Some(name.into());
    }

    /// Builder form of [`Matcher::set_name`].
    #[must_use]
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    /// Returns the name if one was set, otherwise variant and id, e.g.
    /// `Sequence#12`.
    pub(crate) fn label(&self) -> String {
        match self.0.name.borrow().as_ref() {
            Some(name) => name.clone(),
            None => format!("{}{}", self.variant(), self.id()),
        }
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Attaches a semantic action, replacing any previous one.
    ///
    /// Nodes refer to their matcher, so the new action also applies to nodes
    /// produced before the change.
    pub fn set_action<F>(&self, action: F)
    where
        F: Fn(&Node) -> Result<Value> + 'static,
    {
        *self.0.action.borrow_mut() = Some(Rc::new(action));
    }

    /// Builder form of [`Matcher::set_action`].
    #[must_use]
    pub fn with_action<F>(self, action: F) -> Self
    where
        F: Fn(&Node) -> Result<Value> + 'static,
    {
        self.set_action(action);
        self
    }

    /// Removes the attached action; evaluation falls back to rendered text.
    pub fn clear_action(&self) {
        *self.0.action.borrow_mut() = None;
    }

    /// Returns the attached action.
    #[must_use]
    pub fn action(&self) -> Option<Action> {
        self.0.action.borrow().clone()
    }

    /// Returns true if an action is attached.
    #[must_use]
    pub fn has_action(&self) -> bool {
        self.0.action.borrow().is_some()
    }

    // -------------------------------------------------------------------------
    // Operand slots
    // -------------------------------------------------------------------------

    /// Returns the current operand slots.
    ///
    /// Plus and Optional report the operand they were built from, not their
    /// internal expansion. An undefined forward has no operands.
    #[must_use]
    pub fn operands(&self) -> Vec<Matcher> {
        match &self.0.kind {
            Kind::Literal(_) | Kind::Regex { .. } | Kind::Range { .. } | Kind::Any => Vec::new(),
            Kind::Sequence(items) | Kind::Choice(items) => items.borrow().clone(),
            Kind::Star(slot) | Kind::And(slot) | Kind::Not(slot) | Kind::Ignore(slot) => {
                vec![slot.borrow().clone()]
            }
            Kind::Plus(expansion) | Kind::Optional(expansion) => {
                expansion.borrow().first_operand().into_iter().collect()
            }
            Kind::Forward(delegate) => delegate.borrow().iter().cloned().collect(),
        }
    }

    /// Replaces operand slot `index`.
    ///
    /// Slot indices follow [`Matcher::operands`]; single-operand matchers and
    /// forwards have slot 0 only.
    ///
    /// # Errors
    /// Returns [`ErrorKind::OperandOutOfRange`] for a missing slot, or
    /// [`ErrorKind::LeftRecursion`] if the new operand makes the grammar
    /// left-recursive. The matcher is unchanged on error.
    pub fn set_operand(&self, index: usize, operand: impl Into<Matcher>) -> Result<()> {
        let operand = operand.into();
        let previous = self.swap_operand(index, Some(operand.clone()))?;
        operand.add_referrer(self);
        // A patch can make matchers above this one nullable, so every matcher
        // that reaches it is checked, not just its own subgraph.
        let (kept, dropped) = match analysis::check_patched(self) {
            Ok(()) => (Ok(()), previous),
            Err(err) => {
                self.swap_operand(index, previous)?;
                (Err(err), Some(operand))
            }
        };
        if let Some(dropped) = dropped {
            if !self.operands().contains(&dropped) {
                dropped.remove_referrer(self);
            }
        }
        kept
    }

    /// Patches a forward placeholder with its delegate.
    ///
    /// Redefining a forward replaces its delegate.
    ///
    /// # Errors
    /// Returns [`ErrorKind::NotForward`] if this is not a forward, or
    /// [`ErrorKind::LeftRecursion`] if the definition makes the grammar
    /// left-recursive, in which case the previous delegate is kept.
    pub fn define(&self, target: impl Into<Matcher>) -> Result<()> {
        if self.variant() != Variant::Forward {
            return Err(Error::not_forward(self.name()));
        }
        self.set_operand(0, target)
    }

    /// Returns false only for a forward that has not been defined.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        match &self.0.kind {
            Kind::Forward(delegate) => delegate.borrow().is_some(),
            _ => true,
        }
    }

    fn swap_operand(&self, index: usize, operand: Option<Matcher>) -> Result<Option<Matcher>> {
        let out_of_range =
            || Error::operand_out_of_range(self.name(), index, self.operands().len().max(1));
        let kind = &self.0.kind;
        if let Kind::Forward(delegate) = kind {
            return if index == 0 {
                Ok(delegate.replace(operand))
            } else {
                Err(out_of_range())
            };
        }
        let Some(operand) = operand else {
            return Err(Error::new(ErrorKind::Internal(format!(
                "cannot clear operand {index} of {}",
                self.name()
            ))));
        };
        match kind {
            Kind::Sequence(items) | Kind::Choice(items) => {
                let mut items = items.borrow_mut();
                match items.get_mut(index) {
                    Some(slot) => Ok(Some(std::mem::replace(slot, operand))),
                    None => {
                        let arity = items.len();
                        Err(Error::operand_out_of_range(self.name(), index, arity))
                    }
                }
            }
            Kind::Star(slot) | Kind::And(slot) | Kind::Not(slot) | Kind::Ignore(slot)
                if index == 0 =>
            {
                Ok(Some(slot.replace(operand)))
            }
            Kind::Plus(expansion) if index == 0 => {
                let previous = expansion.replace(plus_expansion(operand));
                Ok(previous.first_operand())
            }
            Kind::Optional(expansion) if index == 0 => {
                let previous = expansion.replace(optional_expansion(operand));
                Ok(previous.first_operand())
            }
            Kind::Literal(_) | Kind::Regex { .. } | Kind::Range { .. } | Kind::Any => Err(
                Error::operand_out_of_range(self.name(), index, 0),
            ),
            _ => Err(out_of_range()),
        }
    }

    /// Returns the live matchers that hold this one as an operand.
    pub(crate) fn referrers(&self) -> Vec<Matcher> {
        self.0
            .referrers
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .map(Self)
            .collect()
    }

    fn add_referrer(&self, referrer: &Matcher) {
        let weak = Rc::downgrade(&referrer.0);
        let mut referrers = self.0.referrers.borrow_mut();
        referrers.retain(|r| r.strong_count() > 0);
        if !referrers.iter().any(|r| r.ptr_eq(&weak)) {
            referrers.push(weak);
        }
    }

    fn remove_referrer(&self, referrer: &Matcher) {
        let weak = Rc::downgrade(&referrer.0);
        self.0
            .referrers
            .borrow_mut()
            .retain(|r| r.strong_count() > 0 && !r.ptr_eq(&weak));
    }

    fn first_operand(&self) -> Option<Matcher> {
        match &self.0.kind {
            Kind::Sequence(items) | Kind::Choice(items) => items.borrow().first().cloned(),
            _ => None,
        }
    }

    pub(crate) fn kind(&self) -> &Kind {
        &self.0.kind
    }
}

/// `Plus(m)` is recognized as `Sequence(m, Star(m))`.
fn plus_expansion(operand: Matcher) -> Matcher {
    let repeat = Matcher::star(operand.clone());
    Matcher::sequence([operand, repeat])
}

/// `Optional(m)` is recognized as `Choice(m, Literal(""))`.
fn optional_expansion(operand: Matcher) -> Matcher {
    Matcher::choice([operand, Matcher::empty()])
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Matcher {}

impl Hash for Matcher {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Matcher");
        s.field("id", &self.id()).field("variant", &self.variant());
        if let Some(name) = self.0.name.borrow().as_ref() {
            s.field("name", name);
        }
        s.finish()
    }
}

impl From<&Matcher> for Matcher {
    fn from(matcher: &Matcher) -> Self {
        matcher.clone()
    }
}

impl From<&str> for Matcher {
    fn from(pattern: &str) -> Self {
        Self::literal(pattern)
    }
}

impl From<String> for Matcher {
    fn from(pattern: String) -> Self {
        Self::literal(pattern)
    }
}

impl From<char> for Matcher {
    fn from(c: char) -> Self {
        Self::literal(c.to_string())
    }
}
