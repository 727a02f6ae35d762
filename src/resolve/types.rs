//! Capability traits for operands and caller strategies.
//!
//! The engine never inspects concrete types directly. Each participating
//! type declares what it can do through [`Comparable`], and each declared
//! operand type describes how foreign values are checked and cast into it
//! through [`Declared`].

use std::any::Any;
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Upcast to [`Any`], implemented for every `'static` type.
///
/// Needed so that `&dyn Comparable` can be inspected for its runtime type.
pub trait AsAny: Any {
    /// Returns `self` as `&dyn Any`, preserving the concrete type.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Native ordering, equality and hashing capabilities of a type.
///
/// Every method has a default meaning "capability not supported", so a
/// type only implements what it actually offers. The engine consults these
/// capabilities after explicit strategies and before default ordering.
///
/// # Examples
///
/// ```
/// use std::any::Any;
/// use std::cmp::Ordering;
/// use u_compare::Comparable;
///
/// struct Celsius(i32);
/// struct Fahrenheit(i32);
///
/// impl Comparable for Celsius {
///     fn compare_to(&self, other: &dyn Any) -> Option<Ordering> {
///         if let Some(c) = other.downcast_ref::<Celsius>() {
///             return Some(self.0.cmp(&c.0));
///         }
///         other
///             .downcast_ref::<Fahrenheit>()
///             .map(|f| (self.0 * 9 / 5 + 32).cmp(&f.0))
///     }
/// }
/// ```
pub trait Comparable: AsAny + Send + Sync + 'static {
    /// Typed native ordering against `other`, which is passed as its
    /// declared type.
    ///
    /// Returns `None` when `self` declares no ordering against that type.
    fn compare_to(&self, other: &dyn Any) -> Option<Ordering> {
        let _ = other;
        None
    }

    /// Untyped native ordering against any comparable value.
    ///
    /// Returns `None` when no ordering exists for `other`'s runtime type.
    fn compare_any(&self, other: &dyn Comparable) -> Option<Ordering> {
        let _ = other;
        None
    }

    /// Typed native equality against `other`, passed as its declared type.
    fn equals_to(&self, other: &dyn Any) -> Option<bool> {
        let _ = other;
        None
    }

    /// Last-resort equality. Reference identity unless overridden.
    fn equals_any(&self, other: &dyn Comparable) -> bool {
        std::ptr::addr_eq(self as *const Self, other as *const dyn Comparable)
            && self.as_any().type_id() == other.as_any().type_id()
    }

    /// Native hash. Unless overridden, the hash of the runtime type, which
    /// stays stable when the value moves and agrees with identity equality.
    fn hash_code(&self) -> u64 {
        hash_of(&self.as_any().type_id())
    }
}

/// The static type an operand is declared as.
///
/// Implemented for every sized [`Comparable`] type and for
/// `dyn Comparable`, which stands for operands whose concrete type is only
/// known at runtime.
pub trait Declared: Send + Sync + 'static {
    /// Returns `value` viewed as `Self` if its runtime type is compatible.
    fn cast<'a>(value: &'a (dyn Comparable + 'static)) -> Option<&'a Self>;

    /// The runtime view of this value.
    fn runtime(&self) -> &(dyn Comparable + 'static);

    /// The value as its declared type, for typed capabilities.
    ///
    /// `None` for trait-object declarations, which have no typed form.
    fn typed(&self) -> Option<&dyn Any>;

    /// Default ordering for the declared type, if one is defined.
    fn default_compare(&self, other: &Self) -> Option<Ordering>;

    /// Default equality for the declared type.
    fn default_equals(&self, other: &Self) -> bool;
}

impl<T: Comparable> Declared for T {
    fn cast<'a>(value: &'a (dyn Comparable + 'static)) -> Option<&'a Self> {
        value.as_any().downcast_ref::<T>()
    }

    fn runtime(&self) -> &(dyn Comparable + 'static) {
        self
    }

    fn typed(&self) -> Option<&dyn Any> {
        Some(self)
    }

    fn default_compare(&self, other: &Self) -> Option<Ordering> {
        self.compare_to(other).or_else(|| self.compare_any(other))
    }

    fn default_equals(&self, other: &Self) -> bool {
        self.equals_to(other)
            .unwrap_or_else(|| self.equals_any(other))
    }
}

impl Declared for dyn Comparable {
    fn cast<'a>(value: &'a (dyn Comparable + 'static)) -> Option<&'a Self> {
        Some(value)
    }

    fn runtime(&self) -> &(dyn Comparable + 'static) {
        self
    }

    fn typed(&self) -> Option<&dyn Any> {
        None
    }

    fn default_compare(&self, other: &Self) -> Option<Ordering> {
        self.compare_any(other)
    }

    fn default_equals(&self, other: &Self) -> bool {
        self.equals_any(other)
    }
}

/// A caller-supplied ordering for values of type `T`.
///
/// Any `Fn(&T, &T) -> Ordering + Send + Sync` closure is a strategy.
pub trait Comparison<T: ?Sized>: Send + Sync {
    /// Orders `a` relative to `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparison<T> for F
where
    F: Fn(&T, &T) -> Ordering + Send + Sync,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// A caller-supplied equality together with its consistent hash.
///
/// Implementations must hash equal values equally. This is not checked.
pub trait Equivalence<T: ?Sized>: Send + Sync {
    /// Returns `true` if `a` and `b` are equal under this strategy.
    fn equals(&self, a: &T, b: &T) -> bool;

    /// Digest of `value`, consistent with [`equals`](Equivalence::equals).
    fn hash(&self, value: &T) -> u64;
}

/// An [`Equivalence`] built from a predicate closure and a hash closure.
///
/// Both halves are required, so a strategy can never lack its hash.
#[derive(Clone)]
pub struct EqualityStrategy<P, H> {
    predicate: P,
    hasher: H,
}

impl<P, H> EqualityStrategy<P, H> {
    /// Pairs an equality predicate with its hash derivation.
    pub fn new(predicate: P, hasher: H) -> Self {
        Self { predicate, hasher }
    }
}

impl<T: ?Sized, P, H> Equivalence<T> for EqualityStrategy<P, H>
where
    P: Fn(&T, &T) -> bool + Send + Sync,
    H: Fn(&T) -> u64 + Send + Sync,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.predicate)(a, b)
    }

    fn hash(&self, value: &T) -> u64 {
        (self.hasher)(value)
    }
}

/// Converts a signed comparison result (negative, zero, positive) into an
/// [`Ordering`].
pub fn ordering_from_sign(sign: i64) -> Ordering {
    sign.cmp(&0)
}

/// Deterministic 64-bit digest of a hashable value.
pub fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Implements [`Comparable`] for types with `Ord + Hash`.
///
/// The generated ordering and equality apply only against the same type;
/// foreign values report the capability as unsupported.
///
/// ```
/// use u_compare::{comparable, compare};
/// use std::cmp::Ordering;
///
/// #[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
/// struct Priority(u8);
///
/// comparable!(Priority);
///
/// assert_eq!(compare(Some(&Priority(1)), Some(&Priority(2))), Ordering::Less);
/// ```
#[macro_export]
macro_rules! comparable {
    ($($t:ty),+ $(,)?) => {
        $(
            impl $crate::Comparable for $t {
                fn compare_to(
                    &self,
                    other: &dyn ::std::any::Any,
                ) -> ::std::option::Option<::std::cmp::Ordering> {
                    other
                        .downcast_ref::<$t>()
                        .map(|other| ::std::cmp::Ord::cmp(self, other))
                }

                fn compare_any(
                    &self,
                    other: &dyn $crate::Comparable,
                ) -> ::std::option::Option<::std::cmp::Ordering> {
                    $crate::Comparable::compare_to(self, $crate::AsAny::as_any(other))
                }

                fn equals_to(
                    &self,
                    other: &dyn ::std::any::Any,
                ) -> ::std::option::Option<bool> {
                    other.downcast_ref::<$t>().map(|other| self == other)
                }

                fn equals_any(&self, other: &dyn $crate::Comparable) -> bool {
                    $crate::Comparable::equals_to(self, $crate::AsAny::as_any(other))
                        .unwrap_or(false)
                }

                fn hash_code(&self) -> u64 {
                    $crate::hash_of(self)
                }
            }
        )+
    };
}
