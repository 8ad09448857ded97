//! Static checks over grammar graphs.
//!
//! Packrat dispatch cannot make progress on a left-recursive rule: the rule
//! calls itself at the same position before consuming anything and the
//! recursion never ends. These checks find such cycles while the grammar is
//! being built instead of overflowing the stack at match time.
//!
//! A matcher is *nullable* if it can succeed without consuming input. The
//! operands a matcher may call at its own start position are its
//! *same-position* edges:
//!
//! - Sequence: each item up to and including the first non-nullable one
//! - Choice: every alternative
//! - Star, Plus, Optional, And, Not, Ignore: the operand
//! - Forward: the delegate
//!
//! A grammar is left-recursive iff some matcher reaches itself along
//! same-position edges.

use std::collections::{HashMap, HashSet};

use peggy_foundation::{Error, Result};

use crate::matcher::{Kind, Matcher, MatcherId};

/// Returns every matcher reachable from `root`, `root` first.
#[must_use]
pub fn reachable(root: &Matcher) -> Vec<Matcher> {
    reachable_from(std::slice::from_ref(root))
}

fn reachable_from(roots: &[Matcher]) -> Vec<Matcher> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    let mut stack: Vec<Matcher> = roots.iter().rev().cloned().collect();
    while let Some(matcher) = stack.pop() {
        if !seen.insert(matcher.id()) {
            continue;
        }
        let mut operands = matcher.operands();
        operands.reverse();
        stack.extend(operands);
        order.push(matcher);
    }
    order
}

/// Returns true if `matcher` can succeed without consuming input.
#[must_use]
pub fn nullable(matcher: &Matcher) -> bool {
    nullable_set(&reachable(matcher)).contains(&matcher.id())
}

/// Computes the nullable matchers among `matchers` by fixpoint iteration.
///
/// `matchers` must be closed under [`Matcher::operands`].
fn nullable_set(matchers: &[Matcher]) -> HashSet<MatcherId> {
    let mut nullable = HashSet::new();
    loop {
        let mut changed = false;
        for matcher in matchers {
            if !nullable.contains(&matcher.id()) && is_nullable_step(matcher, &nullable) {
                nullable.insert(matcher.id());
                changed = true;
            }
        }
        if !changed {
            return nullable;
        }
    }
}

fn is_nullable_step(matcher: &Matcher, nullable: &HashSet<MatcherId>) -> bool {
    let known = |m: &Matcher| nullable.contains(&m.id());
    match matcher.kind() {
        Kind::Literal(pattern) => pattern.is_empty(),
        Kind::Regex { regex, .. } => regex.is_match(""),
        Kind::Range { .. } | Kind::Any => false,
        Kind::Sequence(items) => items.borrow().iter().all(known),
        Kind::Choice(alternatives) => alternatives.borrow().iter().any(known),
        Kind::Star(_) | Kind::Optional(_) | Kind::And(_) | Kind::Not(_) => true,
        Kind::Plus(_) | Kind::Ignore(_) | Kind::Forward(_) => matcher.operands().iter().any(known),
    }
}

fn same_position_edges(matcher: &Matcher, nullable: &HashSet<MatcherId>) -> Vec<Matcher> {
    match matcher.kind() {
        Kind::Sequence(items) => {
            let mut edges = Vec::new();
            for item in items.borrow().iter() {
                edges.push(item.clone());
                if !nullable.contains(&item.id()) {
                    break;
                }
            }
            edges
        }
        _ => matcher.operands(),
    }
}

/// Rejects grammars in which a matcher can call itself at the position it
/// started from.
///
/// # Errors
/// Returns [`peggy_foundation::ErrorKind::LeftRecursion`] naming the matchers
/// on the first cycle found, starting and ending with the same one.
pub fn check_left_recursion(root: &Matcher) -> Result<()> {
    check_roots(std::slice::from_ref(root))
}

/// Checks every matcher that can reach `patched`, `patched` first.
///
/// Patching a matcher changes its own edges and may make the matchers above
/// it nullable, which exposes later Sequence items as same-position edges.
/// Every edge that can change therefore starts at a matcher reaching
/// `patched`.
pub(crate) fn check_patched(patched: &Matcher) -> Result<()> {
    check_roots(&referring(patched))
}

/// Returns `matcher` and every matcher that holds it, directly or not.
fn referring(matcher: &Matcher) -> Vec<Matcher> {
    let mut seen = HashSet::from([matcher.id()]);
    let mut order = vec![matcher.clone()];
    let mut next = 0;
    while let Some(current) = order.get(next).cloned() {
        next += 1;
        for referrer in current.referrers() {
            if seen.insert(referrer.id()) {
                order.push(referrer);
            }
        }
    }
    order
}

fn check_roots(roots: &[Matcher]) -> Result<()> {
    let matchers = reachable_from(roots);
    let nullable = nullable_set(&matchers);

    let mut finished: HashSet<MatcherId> = HashSet::new();
    for start in &matchers {
        if finished.contains(&start.id()) {
            continue;
        }
        // Iterative DFS; each frame holds a matcher and its pending edges.
        let mut path: Vec<Matcher> = Vec::new();
        let mut on_path: HashMap<MatcherId, usize> = HashMap::new();
        let mut frames: Vec<(Matcher, std::vec::IntoIter<Matcher>)> = Vec::new();

        on_path.insert(start.id(), 0);
        path.push(start.clone());
        frames.push((start.clone(), same_position_edges(start, &nullable).into_iter()));

        while let Some((_, edges)) = frames.last_mut() {
            match edges.next() {
                Some(next) => {
                    if let Some(&index) = on_path.get(&next.id()) {
                        let mut cycle: Vec<String> =
                            path[index..].iter().map(Matcher::label).collect();
                        cycle.push(next.label());
                        return Err(Error::left_recursion(cycle));
                    }
                    if finished.contains(&next.id()) {
                        continue;
                    }
                    on_path.insert(next.id(), path.len());
                    path.push(next.clone());
                    let edges = same_position_edges(&next, &nullable).into_iter();
                    frames.push((next, edges));
                }
                None => {
                    if let Some((done, _)) = frames.pop() {
                        on_path.remove(&done.id());
                        path.pop();
                        finished.insert(done.id());
                    }
                }
            }
        }
    }
    Ok(())
}

/// Checks a grammar before use: no left recursion and no undefined forwards.
///
/// # Errors
/// Returns the left-recursion error, or
/// [`peggy_foundation::ErrorKind::UnresolvedForward`] for the first
/// undefined forward reachable from `root`.
pub fn validate(root: &Matcher) -> Result<()> {
    if let Some(undefined) = reachable(root).iter().find(|m| !m.is_defined()) {
        return Err(Error::unresolved_forward(undefined.label()));
    }
    check_left_recursion(root)
}
