//! Domain arithmetic for derived variables.
//!
//! The solver requires every variable to have a finite domain, so whenever an encoder introduces a
//! variable standing for `a + b`, `a * b`, `|a - b|`, ..., its bounds are computed here from the
//! bounds of the operands.

use std::fmt::Display;
use std::fmt::Formatter;

/// Closed integer interval `[lb, ub]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub lb: i32,
    pub ub: i32,
}

impl Bounds {
    /// Creates `[lb, ub]`.
    ///
    /// # Panics
    /// If `lb > ub`.
    pub fn new(lb: i32, ub: i32) -> Self {
        assert!(lb <= ub, "invalid bounds [{lb}, {ub}]");
        Bounds { lb, ub }
    }

    pub const fn fixed(value: i32) -> Self {
        Bounds {
            lb: value,
            ub: value,
        }
    }

    pub const fn boolean() -> Self {
        Bounds { lb: 0, ub: 1 }
    }

    pub fn is_fixed(self) -> bool {
        self.lb == self.ub
    }

    pub fn contains(self, value: i32) -> bool {
        self.lb <= value && value <= self.ub
    }

    /// The intersection, or `None` if it is empty.
    pub fn intersect(self, other: Bounds) -> Option<Bounds> {
        let lb = self.lb.max(other.lb);
        let ub = self.ub.min(other.ub);
        (lb <= ub).then_some(Bounds { lb, ub })
    }

    /// The smallest interval containing both.
    pub fn hull(self, other: Bounds) -> Bounds {
        Bounds {
            lb: self.lb.min(other.lb),
            ub: self.ub.max(other.ub),
        }
    }

    pub fn add(self, other: Bounds) -> Bounds {
        from_wide(
            i64::from(self.lb) + i64::from(other.lb),
            i64::from(self.ub) + i64::from(other.ub),
        )
    }

    pub fn neg(self) -> Bounds {
        from_wide(-i64::from(self.ub), -i64::from(self.lb))
    }

    pub fn offset(self, offset: i32) -> Bounds {
        self.add(Bounds::fixed(offset))
    }

    pub fn scale(self, factor: i32) -> Bounds {
        self.mul(Bounds::fixed(factor))
    }

    /// Bounds of `x * y` for `x` in `self` and `y` in `other`, taken over the four corners.
    pub fn mul(self, other: Bounds) -> Bounds {
        let corners = [
            i64::from(self.lb) * i64::from(other.lb),
            i64::from(self.lb) * i64::from(other.ub),
            i64::from(self.ub) * i64::from(other.lb),
            i64::from(self.ub) * i64::from(other.ub),
        ];

        from_wide(
            corners.iter().copied().min().unwrap_or(0),
            corners.iter().copied().max().unwrap_or(0),
        )
    }

    /// Bounds of `|x|`.
    pub fn abs(self) -> Bounds {
        if self.lb >= 0 {
            self
        } else if self.ub <= 0 {
            self.neg()
        } else {
            Bounds {
                lb: 0,
                ub: self.lb.saturating_neg().max(self.ub),
            }
        }
    }

    /// Bounds of `floor(x / divisor)` for a strictly positive constant divisor.
    pub fn div_floor(self, divisor: i32) -> Bounds {
        assert!(divisor > 0, "divisor must be positive");
        Bounds {
            lb: NumExt::div_floor(self.lb, divisor),
            ub: NumExt::div_floor(self.ub, divisor),
        }
    }
}

impl Display for Bounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lb, self.ub)
    }
}

fn from_wide(lb: i64, ub: i64) -> Bounds {
    let clamp = |value: i64| value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    Bounds {
        lb: clamp(lb),
        ub: clamp(ub),
    }
}

pub(crate) trait NumExt {
    /// Division with rounding down, as opposed to truncation toward zero.
    fn div_floor(self, other: Self) -> Self;
}

impl NumExt for i32 {
    fn div_floor(self, other: Self) -> Self {
        let d = self / other;
        let r = self % other;
        if (r > 0 && other < 0) || (r < 0 && other > 0) {
            d - 1
        } else {
            d
        }
    }
}
