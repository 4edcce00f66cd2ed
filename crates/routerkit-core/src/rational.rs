//! Exact rational numbers
//!
//! Unit conversion factors and authored measurements (`5/32in`, `0.125in`)
//! are kept exact until they are decoded to machine coordinates, so that
//! e.g. a board unit of `1/8in` converts to millimeters without drift.

use crate::error::UnitError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

/// A reduced fraction with a strictly positive denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

impl Rational {
    /// Zero.
    pub const ZERO: Rational = Rational {
        numerator: 0,
        denominator: 1,
    };

    /// One.
    pub const ONE: Rational = Rational {
        numerator: 1,
        denominator: 1,
    };

    /// Creates a reduced rational number.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, UnitError> {
        Self::reduce(numerator as i128, denominator as i128)
    }

    /// Builds a fraction already in lowest terms with a positive denominator.
    pub(crate) const fn new_reduced(numerator: i64, denominator: i64) -> Self {
        Rational {
            numerator,
            denominator,
        }
    }

    /// Creates a rational number from an integer.
    pub const fn from_integer(n: i64) -> Self {
        Rational {
            numerator: n,
            denominator: 1,
        }
    }

    fn reduce(numerator: i128, denominator: i128) -> Result<Self, UnitError> {
        if denominator == 0 {
            return Err(UnitError::DivisionByZero);
        }
        let divisor = gcd(numerator, denominator).max(1);
        let mut numerator = numerator / divisor;
        let mut denominator = denominator / divisor;
        if denominator < 0 {
            numerator = -numerator;
            denominator = -denominator;
        }
        Ok(Rational {
            numerator: i64::try_from(numerator).map_err(|_| UnitError::Overflow)?,
            denominator: i64::try_from(denominator).map_err(|_| UnitError::Overflow)?,
        })
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    pub fn is_one(&self) -> bool {
        self.numerator == 1 && self.denominator == 1
    }

    /// Nearest floating point value.
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self, UnitError> {
        let n = self.numerator as i128 * rhs.denominator as i128
            + rhs.numerator as i128 * self.denominator as i128;
        let d = self.denominator as i128 * rhs.denominator as i128;
        Self::reduce(n, d)
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self, UnitError> {
        self.checked_add(rhs.checked_neg()?)
    }

    pub fn checked_neg(self) -> Result<Self, UnitError> {
        Ok(Rational {
            numerator: self.numerator.checked_neg().ok_or(UnitError::Overflow)?,
            denominator: self.denominator,
        })
    }

    pub fn checked_mul(self, rhs: Self) -> Result<Self, UnitError> {
        Self::reduce(
            self.numerator as i128 * rhs.numerator as i128,
            self.denominator as i128 * rhs.denominator as i128,
        )
    }

    pub fn checked_div(self, rhs: Self) -> Result<Self, UnitError> {
        Self::reduce(
            self.numerator as i128 * rhs.denominator as i128,
            self.denominator as i128 * rhs.numerator as i128,
        )
    }

    /// Parses a rational literal.
    ///
    /// Accepts decimals (`0.125`, `-3`), fractions (`-1/3`, `5/32`) and
    /// `+`-joined sums of those (`1+1/2`).
    pub fn parse(input: &str) -> Result<Self, UnitError> {
        let s = input.trim();
        let malformed = || UnitError::MalformedNumber {
            input: input.to_string(),
        };

        // A leading sign is part of the first term, not a sum.
        if let Some((pos, _)) = s.char_indices().skip(1).find(|&(_, c)| c == '+') {
            let a = Self::parse(&s[..pos])?;
            let b = Self::parse(&s[pos + 1..])?;
            return a.checked_add(b);
        }
        if let Some((a, b)) = s.rsplit_once('/') {
            let a = Self::parse(a)?;
            let b = Self::parse(b)?;
            return a.checked_div(b);
        }

        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let (ones, decimals) = match digits.split_once('.') {
            Some((ones, decimals)) => (ones, decimals),
            None => (digits, ""),
        };
        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|c| c.is_ascii_digit());
        if !all_digits(ones) || (digits.contains('.') && !all_digits(decimals)) {
            return Err(malformed());
        }

        let places = u32::try_from(decimals.len()).map_err(|_| malformed())?;
        let denominator = 10i128.checked_pow(places).ok_or(UnitError::Overflow)?;
        let mut numerator: i128 = format!("{ones}{decimals}")
            .parse()
            .map_err(|_| UnitError::Overflow)?;
        if negative {
            numerator = -numerator;
        }
        Self::reduce(numerator, denominator)
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl FromStr for Rational {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Rational {
    type Error = UnitError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Rational> for String {
    fn from(r: Rational) -> Self {
        r.to_string()
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator as i128 * other.denominator as i128;
        let rhs = other.numerator as i128 * self.denominator as i128;
        lhs.cmp(&rhs)
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

// Operator forms panic on overflow or division by zero, like the integer
// operators do. Use the `checked_*` methods on untrusted input.

impl Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Rational) -> Rational {
        self.checked_add(rhs).expect("rational addition overflowed")
    }
}

impl Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Rational) -> Rational {
        self.checked_sub(rhs).expect("rational subtraction overflowed")
    }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Rational {
        self.checked_mul(rhs).expect("rational multiplication overflowed")
    }
}

impl Div for Rational {
    type Output = Rational;

    fn div(self, rhs: Rational) -> Rational {
        self.checked_div(rhs)
            .expect("rational division by zero or overflow")
    }
}
