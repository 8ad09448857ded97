//! Operator sugar and construction macros.
//!
//! | Expression | Builds                      |
//! |------------|-----------------------------|
//! | `a \| b`   | `Choice(a, b)`              |
//! | `!a`       | `Not(a)`                    |
//! | `a * b`    | `Sequence(Star(a), b)`      |
//! | `a + b`    | `Sequence(Plus(a), b)`      |
//!
//! The right-hand side may be anything convertible into a matcher, so
//! `digit + ";"` works. `"a" * m`, `"a" + m` and `"a" | m` cover a literal
//! on the left.

use std::ops::{Add, BitOr, Mul, Not};

use crate::matcher::Matcher;

impl<T: Into<Matcher>> BitOr<T> for Matcher {
    type Output = Matcher;

    fn bitor(self, rhs: T) -> Matcher {
        Matcher::choice([self, rhs.into()])
    }
}

impl<T: Into<Matcher>> BitOr<T> for &Matcher {
    type Output = Matcher;

    fn bitor(self, rhs: T) -> Matcher {
        self.clone() | rhs
    }
}

impl Not for Matcher {
    type Output = Matcher;

    fn not(self) -> Matcher {
        Matcher::not(self)
    }
}

impl Not for &Matcher {
    type Output = Matcher;

    fn not(self) -> Matcher {
        Matcher::not(self)
    }
}

impl<T: Into<Matcher>> Mul<T> for Matcher {
    type Output = Matcher;

    fn mul(self, rhs: T) -> Matcher {
        Matcher::sequence([Matcher::star(self), rhs.into()])
    }
}

impl<T: Into<Matcher>> Mul<T> for &Matcher {
    type Output = Matcher;

    fn mul(self, rhs: T) -> Matcher {
        self.clone() * rhs
    }
}

impl<T: Into<Matcher>> Add<T> for Matcher {
    type Output = Matcher;

    fn add(self, rhs: T) -> Matcher {
        Matcher::sequence([Matcher::plus(self), rhs.into()])
    }
}

impl<T: Into<Matcher>> Add<T> for &Matcher {
    type Output = Matcher;

    fn add(self, rhs: T) -> Matcher {
        self.clone() + rhs
    }
}

impl BitOr<Matcher> for &str {
    type Output = Matcher;

    fn bitor(self, rhs: Matcher) -> Matcher {
        Matcher::literal(self) | rhs
    }
}

impl Mul<Matcher> for &str {
    type Output = Matcher;

    fn mul(self, rhs: Matcher) -> Matcher {
        Matcher::literal(self) * rhs
    }
}

impl Add<Matcher> for &str {
    type Output = Matcher;

    fn add(self, rhs: Matcher) -> Matcher {
        Matcher::literal(self) + rhs
    }
}

/// Builds a Sequence from matchers and literals.
///
/// ```text
/// seq![open, expr, ")"]
/// ```
#[macro_export]
macro_rules! seq {
    () => {
        $crate::Matcher::sequence(::std::iter::empty::<$crate::Matcher>())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Matcher::sequence([$($crate::Matcher::from($item)),*])
    };
}

/// Builds a Choice from matchers and literals.
///
/// ```text
/// choice![number, seq!["(", expr, ")"]]
/// ```
#[macro_export]
macro_rules! choice {
    () => {
        $crate::Matcher::choice(::std::iter::empty::<$crate::Matcher>())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Matcher::choice([$($crate::Matcher::from($item)),*])
    };
}
