//! Ready-made "greater than" functions for common key types.
//!
//! A comparator `f` orders keys so that `f(a, b)` is `true` iff `a` must come after `b`.  Keys
//! that are equal must satisfy `!f(a, b) && !f(b, a)`.  The plain functions sort from small to
//! big; the `_reversed` variants sort from big to small.
//!
//! ```
//! use skiplist::{compare, SkipList};
//!
//! let mut list: SkipList<i64, &str, _> = SkipList::new(compare::int64_reversed);
//! list.set(1, "one");
//! list.set(2, "two");
//! assert_eq!(list.front().map(|e| *e.key()), Some(2));
//! ```
//!
//! The float comparators follow IEEE ordering, which is not total: NaN keys break the contract
//! and lead to unspecified placement.

/// Ascending order for any `PartialOrd` key.
pub fn ascending<T: PartialOrd + ?Sized>(lhs: &T, rhs: &T) -> bool {
    lhs > rhs
}

/// Descending order for any `PartialOrd` key.
pub fn descending<T: PartialOrd + ?Sized>(lhs: &T, rhs: &T) -> bool {
    lhs < rhs
}

macro_rules! comparators {
    ($($name: ident, $reversed: ident => $ty: ty;)*) => {
        $(
            #[doc = concat!("Ascending order for `", stringify!($ty), "` keys.")]
            pub fn $name(lhs: &$ty, rhs: &$ty) -> bool {
                lhs > rhs
            }

            #[doc = concat!("Descending order for `", stringify!($ty), "` keys.")]
            pub fn $reversed(lhs: &$ty, rhs: &$ty) -> bool {
                lhs < rhs
            }
        )*
    }
}

comparators! {
    byte, byte_reversed => u8;
    bytes, bytes_reversed => Vec<u8>;
    float32, float32_reversed => f32;
    float64, float64_reversed => f64;
    int, int_reversed => isize;
    int8, int8_reversed => i8;
    int16, int16_reversed => i16;
    int32, int32_reversed => i32;
    int64, int64_reversed => i64;
    rune, rune_reversed => char;
    string, string_reversed => String;
    uint, uint_reversed => usize;
    uint8, uint8_reversed => u8;
    uint16, uint16_reversed => u16;
    uint32, uint32_reversed => u32;
    uint64, uint64_reversed => u64;
}
