use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use paste::paste;
use serde::{Deserialize, Serialize};

/// Grid coordinate as `(row, col)`, 0-indexed.
///
/// Components are signed, so a neighbour offset can be added before the result is checked
/// against the grid bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Coord(pub i32, pub i32);

impl Coord {
    pub const ZERO: Coord = Coord(0, 0);

    pub const fn col(self) -> i32 {
        self.1
    }

    pub fn abs_sum(self) -> i32 {
        self.0.abs() + self.1.abs()
    }

    /// Sum of absolute row and column differences.
    pub fn manhattan(self, other: Coord) -> usize {
        (self - other).abs_sum() as usize
    }

    /// Whether the two coordinates are exactly one orthogonal step apart.
    pub fn is_adjacent(self, other: Coord) -> bool {
        (self - other).abs_sum() == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

macro_rules! impl_op {
    ($trait:ident + Assign, $op:ident) => {
        impl_op!($trait, $op);

        paste! {
            impl [<$trait Assign>] for Coord {
                #[inline(always)]
                fn [<$op _assign>](&mut self, other: Coord) {
                    *self = self.$op(other);
                }
            }

            impl [<$trait Assign>]<i32> for Coord {
                #[inline(always)]
                fn [<$op _assign>](&mut self, other: i32) {
                    *self = self.$op(other);
                }
            }
        }
    };
    ($trait:ident, $op:ident) => {
        impl $trait for Coord {
            type Output = Coord;

            #[inline(always)]
            fn $op(self, other: Coord) -> Coord {
                Coord(self.0.$op(other.0), self.1.$op(other.1))
            }
        }

        impl $trait<i32> for Coord {
            type Output = Coord;

            #[inline(always)]
            fn $op(self, other: i32) -> Coord {
                Coord(self.0.$op(other), self.1.$op(other))
            }
        }
    };
}

impl_op!(Add + Assign, add);
impl_op!(Sub + Assign, sub);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let mut a = Coord(2, 3);
        assert_eq!(a + Coord(1, -1), Coord(3, 2));
        assert_eq!(a - Coord(2, 3), Coord::ZERO);

        a += Coord(1, 1);
        a -= 1;
        assert_eq!(a, Coord(2, 3));
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(Coord(0, 0).manhattan(Coord(4, 4)), 8);
        assert_eq!(Coord(3, 1).manhattan(Coord(1, 3)), 4);
        assert!(Coord(1, 1).is_adjacent(Coord(1, 2)));
        assert!(!Coord(1, 1).is_adjacent(Coord(2, 2)));
    }
}
