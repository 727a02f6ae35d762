//! Resolution cascade for ordering, equality and hashing.
//!
//! Absent operands and identical instances are settled before any handle is
//! taken. Everything else runs under both operands' handles, acquired in
//! parameter order.

use super::handle::Operand;
use super::types::{Comparison, Declared, Equivalence};
use std::any::{type_name, TypeId};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// The step of the cascade that produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rule {
    /// Both operands were absent.
    BothAbsent,
    /// Exactly one operand was absent.
    Absent,
    /// Both operands were the same instance.
    Identity,
    /// The strategy bound to `x`'s declared type decided.
    XStrategy,
    /// The strategy bound to `y`'s declared type decided (role-swapped).
    YStrategy,
    /// `x`'s typed native capability against `y`'s declared type decided.
    XNative,
    /// `y`'s typed native capability against `x`'s declared type decided.
    YNative,
    /// `x`'s untyped native ordering decided.
    XUntyped,
    /// `y`'s untyped native ordering decided.
    YUntyped,
    /// Default ordering or equality of `x`'s declared type decided.
    XDefault,
    /// Default ordering or equality of `y`'s declared type decided.
    YDefault,
    /// Nothing applied: `Equal` for ordering, `equals_any` for equality.
    Fallback,
}

/// A resolved value together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict<V> {
    /// The resolved ordering or equality.
    pub value: V,
    /// The cascade step that decided.
    pub rule: Rule,
}

impl<V> Verdict<V> {
    fn new(value: V, rule: Rule) -> Self {
        Self { value, rule }
    }
}

/// Outcome of the checks that run before any handle is acquired.
pub(crate) enum Triage<'a, A: ?Sized, B: ?Sized> {
    Settled(Verdict<Ordering>),
    Present(&'a A, &'a B),
}

/// Settles absence and identity. Absent operands sort first.
pub(crate) fn triage<'a, A, B>(x: Option<&'a A>, y: Option<&'a B>) -> Triage<'a, A, B>
where
    A: Operand + ?Sized,
    B: Operand + ?Sized,
{
    match (x, y) {
        (None, None) => Triage::Settled(Verdict::new(Ordering::Equal, Rule::BothAbsent)),
        (None, Some(_)) => Triage::Settled(Verdict::new(Ordering::Less, Rule::Absent)),
        (Some(_), None) => Triage::Settled(Verdict::new(Ordering::Greater, Rule::Absent)),
        (Some(x), Some(y)) if same_instance(x, y) => {
            Triage::Settled(Verdict::new(Ordering::Equal, Rule::Identity))
        }
        (Some(x), Some(y)) => Triage::Present(x, y),
    }
}

fn same_instance<A, B>(x: &A, y: &B) -> bool
where
    A: Operand + ?Sized,
    B: Operand + ?Sized,
{
    TypeId::of::<A>() == TypeId::of::<B>()
        && std::ptr::addr_eq(x as *const A, y as *const B)
        && x.instance_type() == y.instance_type()
}

/// Holds `x`'s handle, then `y`'s.
///
/// `y` is only try-acquired while `x` is held. When `y` is busy, `x` is
/// released and the caller waits on `y` alone before starting over, so two
/// threads comparing the same pair in opposite roles cannot deadlock.
///
/// Distinct operands must not share one handle.
pub(crate) fn acquire_pair<'a, A, B>(x: &'a A, y: &'a B) -> (A::Guard<'a>, B::Guard<'a>)
where
    A: Operand + ?Sized,
    B: Operand + ?Sized,
{
    loop {
        let gx = x.acquire();
        if let Some(gy) = y.try_acquire() {
            return (gx, gy);
        }
        drop(gx);
        trace!("second operand busy, waiting without holding the first");
        drop(y.acquire());
    }
}

/// Orders `x` relative to `y` and reports which rule decided.
///
/// Rules, first applicable wins:
///
/// 1. both absent: `Equal`
/// 2. one absent: the absent operand is `Less`
/// 3. same instance: `Equal`
/// 4. under both handles (`x` first):
///    a. `x_strategy`, if `y` casts to `x`'s declared type
///    b. `y_strategy`, if `x` casts to `y`'s declared type (reversed)
///    c. `x`'s typed native ordering against `y`
///    d. `y`'s typed native ordering against `x` (reversed)
///    e. `x`'s untyped native ordering
///    f. `y`'s untyped native ordering (reversed)
///    g. default ordering of `x`'s declared type, if `y` casts to it
///    h. default ordering of `y`'s declared type, if `x` casts to it (reversed)
///    i. `Equal`
///
/// Rules 4g and 4h only repeat the native capabilities: the default
/// ordering of a declared type is its own `compare_to`, then `compare_any`,
/// which 4c to 4f already consulted for the same pair. They only decide
/// when a capability answers differently on the second call.
///
/// Rule 4i is a weak fallback: across unrelated types the result is not a
/// total order.
pub fn resolve_compare<A, B>(
    x: Option<&A>,
    y: Option<&B>,
    x_strategy: Option<&dyn Comparison<A::Target>>,
    y_strategy: Option<&dyn Comparison<B::Target>>,
) -> Verdict<Ordering>
where
    A: Operand + ?Sized,
    B: Operand + ?Sized,
{
    let verdict = match triage(x, y) {
        Triage::Settled(verdict) => verdict,
        Triage::Present(x, y) => {
            let (gx, gy) = acquire_pair(x, y);
            cascade_compare::<A::Target, B::Target>(&gx, &gy, x_strategy, y_strategy)
        }
    };
    trace!(rule = ?verdict.rule, ordering = ?verdict.value, "comparison resolved");
    verdict
}

fn cascade_compare<X, Y>(
    x: &X,
    y: &Y,
    x_strategy: Option<&dyn Comparison<X>>,
    y_strategy: Option<&dyn Comparison<Y>>,
) -> Verdict<Ordering>
where
    X: Declared + ?Sized,
    Y: Declared + ?Sized,
{
    let xr = x.runtime();
    let yr = y.runtime();

    if let Some((strategy, yc)) = x_strategy.zip(X::cast(yr)) {
        return Verdict::new(strategy.compare(x, yc), Rule::XStrategy);
    }
    if let Some((strategy, xc)) = y_strategy.zip(Y::cast(xr)) {
        return Verdict::new(strategy.compare(y, xc).reverse(), Rule::YStrategy);
    }
    if let Some(ord) = y.typed().and_then(|ty| xr.compare_to(ty)) {
        return Verdict::new(ord, Rule::XNative);
    }
    if let Some(ord) = x.typed().and_then(|tx| yr.compare_to(tx)) {
        return Verdict::new(ord.reverse(), Rule::YNative);
    }
    if let Some(ord) = xr.compare_any(yr) {
        return Verdict::new(ord, Rule::XUntyped);
    }
    if let Some(ord) = yr.compare_any(xr) {
        return Verdict::new(ord.reverse(), Rule::YUntyped);
    }
    if let Some(ord) = X::cast(yr).and_then(|yc| x.default_compare(yc)) {
        return Verdict::new(ord, Rule::XDefault);
    }
    if let Some(ord) = Y::cast(xr).and_then(|xc| y.default_compare(xc)) {
        return Verdict::new(ord.reverse(), Rule::YDefault);
    }

    debug!(
        x = type_name::<X>(),
        y = type_name::<Y>(),
        "no ordering derivable, treating operands as equal"
    );
    Verdict::new(Ordering::Equal, Rule::Fallback)
}

/// Orders `x` relative to `y` using explicit per-side strategies.
///
/// See [`resolve_compare`] for the rules.
pub fn compare_with<A, B>(
    x: Option<&A>,
    y: Option<&B>,
    x_strategy: Option<&dyn Comparison<A::Target>>,
    y_strategy: Option<&dyn Comparison<B::Target>>,
) -> Ordering
where
    A: Operand + ?Sized,
    B: Operand + ?Sized,
{
    resolve_compare(x, y, x_strategy, y_strategy).value
}

/// Orders `x` relative to `y` from native capabilities alone.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use u_compare::compare;
///
/// assert_eq!(compare(Some(&5), Some(&5)), Ordering::Equal);
/// assert_eq!(compare(None::<&i32>, Some(&3)), Ordering::Less);
/// ```
pub fn compare<A, B>(x: Option<&A>, y: Option<&B>) -> Ordering
where
    A: Operand + ?Sized,
    B: Operand + ?Sized,
{
    resolve_compare(x, y, None, None).value
}

/// Decides equality of `x` and `y` and reports which rule decided.
///
/// Absence and identity are settled as for ordering. Under both handles:
/// explicit strategy (`x` side, then `y` side), typed native equality (`x`
/// side, then `y` side), default equality of whichever declared type the
/// other operand casts to, and finally `x`'s `equals_any`.
pub fn resolve_equals<A, B>(
    x: Option<&A>,
    y: Option<&B>,
    x_strategy: Option<&dyn Equivalence<A::Target>>,
    y_strategy: Option<&dyn Equivalence<B::Target>>,
) -> Verdict<bool>
where
    A: Operand + ?Sized,
    B: Operand + ?Sized,
{
    let verdict = match triage(x, y) {
        Triage::Settled(verdict) => Verdict::new(verdict.value == Ordering::Equal, verdict.rule),
        Triage::Present(x, y) => {
            let (gx, gy) = acquire_pair(x, y);
            cascade_equals::<A::Target, B::Target>(&gx, &gy, x_strategy, y_strategy)
        }
    };
    trace!(rule = ?verdict.rule, equal = verdict.value, "equality resolved");
    verdict
}

fn cascade_equals<X, Y>(
    x: &X,
    y: &Y,
    x_strategy: Option<&dyn Equivalence<X>>,
    y_strategy: Option<&dyn Equivalence<Y>>,
) -> Verdict<bool>
where
    X: Declared + ?Sized,
    Y: Declared + ?Sized,
{
    let xr = x.runtime();
    let yr = y.runtime();

    if let Some((strategy, yc)) = x_strategy.zip(X::cast(yr)) {
        return Verdict::new(strategy.equals(x, yc), Rule::XStrategy);
    }
    if let Some((strategy, xc)) = y_strategy.zip(Y::cast(xr)) {
        return Verdict::new(strategy.equals(y, xc), Rule::YStrategy);
    }
    if let Some(eq) = y.typed().and_then(|ty| xr.equals_to(ty)) {
        return Verdict::new(eq, Rule::XNative);
    }
    if let Some(eq) = x.typed().and_then(|tx| yr.equals_to(tx)) {
        return Verdict::new(eq, Rule::YNative);
    }
    if let Some(yc) = X::cast(yr) {
        return Verdict::new(x.default_equals(yc), Rule::XDefault);
    }
    if let Some(xc) = Y::cast(xr) {
        return Verdict::new(y.default_equals(xc), Rule::YDefault);
    }
    Verdict::new(xr.equals_any(yr), Rule::Fallback)
}

/// Decides equality of `x` and `y` using explicit per-side strategies.
pub fn equals_with<A, B>(
    x: Option<&A>,
    y: Option<&B>,
    x_strategy: Option<&dyn Equivalence<A::Target>>,
    y_strategy: Option<&dyn Equivalence<B::Target>>,
) -> bool
where
    A: Operand + ?Sized,
    B: Operand + ?Sized,
{
    resolve_equals(x, y, x_strategy, y_strategy).value
}

/// Decides equality of `x` and `y` from native capabilities alone.
pub fn equals<A, B>(x: Option<&A>, y: Option<&B>) -> bool
where
    A: Operand + ?Sized,
    B: Operand + ?Sized,
{
    resolve_equals(x, y, None, None).value
}

/// Native hash of `value` read under its handle. Absent values hash to 0.
pub fn hash<T: Operand + ?Sized>(value: Option<&T>) -> u64 {
    match value {
        None => 0,
        Some(value) => {
            let guard = value.acquire();
            let target: &T::Target = &guard;
            target.runtime().hash_code()
        }
    }
}
