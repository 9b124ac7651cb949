//! Rational number reduction
//!
//! Renders a numerator/denominator pair in lowest terms, either as a
//! plain integer or as `numerator/denominator`.

use std::fmt;

/// A fraction reduced to lowest terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub numerator: i64,
    pub denominator: i64,
}

impl Fraction {
    /// Reduces `numerator/denominator`
    ///
    /// A zero denominator is read as 1. When `signed` is set the sign is
    /// moved onto the numerator. A zero numerator yields `0/1`.
    pub fn reduce(numerator: i64, denominator: i64, signed: bool) -> Self {
        let mut numer = numerator;
        let mut denom = if denominator == 0 { 1 } else { denominator };

        if signed && denom < 0 {
            numer = -numer;
            denom = -denom;
        }

        if numer == 0 {
            return Fraction { numerator: 0, denominator: 1 };
        }

        let common = gcd(numer.unsigned_abs(), denom.unsigned_abs()) as i64;

        Fraction {
            numerator: numer / common,
            denominator: denom / common,
        }
    }

    /// Whether the fraction is a whole number
    pub fn is_integer(&self) -> bool {
        self.denominator == 1
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.numerator == 0 {
            write!(f, "0")
        } else if self.is_integer() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// Reduces a pair and renders it as text
pub fn reduce(numerator: i64, denominator: i64, signed: bool) -> String {
    Fraction::reduce(numerator, denominator, signed).to_string()
}

/// Reduces an unsigned RATIONAL element
pub fn reduce_unsigned(numerator: u32, denominator: u32) -> String {
    reduce(numerator as i64, denominator as i64, false)
}

/// Reduces a signed SRATIONAL element
pub fn reduce_signed(numerator: i32, denominator: i32) -> String {
    reduce(numerator as i64, denominator as i64, true)
}

/// Greatest common divisor of two positive values (Euclid, modulus form)
fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
