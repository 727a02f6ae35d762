//! `Comparable` implementations for standard library types.

use super::types::{hash_of, Comparable};
use std::any::Any;
use std::cmp::Ordering;

crate::comparable!(
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    bool,
    char,
    (),
    String,
    &'static str,
);

// NaN sorts before every number and equals itself; -0.0 and 0.0 are equal
// and hash alike.
macro_rules! float_comparable {
    ($($t:ty),+) => {
        $(
            impl Comparable for $t {
                fn compare_to(&self, other: &dyn Any) -> Option<Ordering> {
                    other.downcast_ref::<$t>().map(|other| {
                        self.partial_cmp(other).unwrap_or_else(|| {
                            match (self.is_nan(), other.is_nan()) {
                                (true, true) => Ordering::Equal,
                                (true, false) => Ordering::Less,
                                _ => Ordering::Greater,
                            }
                        })
                    })
                }

                fn compare_any(&self, other: &dyn Comparable) -> Option<Ordering> {
                    self.compare_to(other.as_any())
                }

                fn equals_to(&self, other: &dyn Any) -> Option<bool> {
                    other
                        .downcast_ref::<$t>()
                        .map(|other| self == other || (self.is_nan() && other.is_nan()))
                }

                fn equals_any(&self, other: &dyn Comparable) -> bool {
                    self.equals_to(other.as_any()).unwrap_or(false)
                }

                fn hash_code(&self) -> u64 {
                    let canonical: $t = if self.is_nan() {
                        <$t>::NAN
                    } else if *self == 0.0 {
                        0.0
                    } else {
                        *self
                    };
                    hash_of(&canonical.to_bits())
                }
            }
        )+
    };
}

float_comparable!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_compare_within_type_only() {
        assert_eq!(3i64.compare_to(&4i64), Some(Ordering::Less));
        assert_eq!(3i64.compare_to(&4i32), None);
        assert_eq!(3i64.compare_any(&3i64), Some(Ordering::Equal));
    }

    #[test]
    fn test_strings() {
        let owned = String::from("b");
        assert_eq!(owned.compare_to(&String::from("a")), Some(Ordering::Greater));
        assert_eq!("a".compare_to(&"b"), Some(Ordering::Less));
        assert_eq!(owned.equals_to(&"b"), None);
    }

    #[test]
    fn test_nan_sorts_first_and_equals_itself() {
        assert_eq!(f64::NAN.compare_to(&1.0f64), Some(Ordering::Less));
        assert_eq!(1.0f64.compare_to(&f64::NAN), Some(Ordering::Greater));
        assert_eq!(f64::NAN.compare_to(&f64::NAN), Some(Ordering::Equal));
        assert_eq!(f32::NAN.equals_to(&f32::NAN), Some(true));
    }

    #[test]
    fn test_signed_zero_hashes_alike() {
        assert_eq!((-0.0f64).equals_to(&0.0f64), Some(true));
        assert_eq!((-0.0f64).hash_code(), 0.0f64.hash_code());
    }

    #[test]
    fn test_equals_any_rejects_foreign_type() {
        assert!(!1u8.equals_any(&1u16));
        assert!(true.equals_any(&true));
    }
}
