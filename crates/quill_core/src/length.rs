//! Unit-aware scalar lengths
//!
//! A [`Length`] keeps the unit it was written in so that same-unit arithmetic
//! stays exact; mixed-unit arithmetic falls back to user units (px).
//!
//! ```rust
//! use quill_core::Length;
//!
//! let a: Length = "10mm".parse().unwrap();
//! let b = a + Length::new(5.0, quill_core::Unit::Mm);
//! assert_eq!(b.to_string(), "15mm");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Absolute length units
///
/// Relative units (`%`, `em`, `ex`) are not supported and fail to parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Unit {
    /// User units
    #[default]
    Px,
    Pt,
    Pc,
    Mm,
    Cm,
    In,
}

impl Unit {
    /// Number of user units in one of this unit
    pub fn ratio(self) -> f64 {
        match self {
            Unit::Px => 1.0,
            Unit::Pt => 1.25,
            Unit::Pc => 15.0,
            Unit::Mm => 3.543307,
            Unit::Cm => 35.43307,
            Unit::In => 90.0,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Pt => "pt",
            Unit::Pc => "pc",
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::In => "in",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Unit> {
        match suffix {
            "" | "px" => Some(Unit::Px),
            "pt" => Some(Unit::Pt),
            "pc" => Some(Unit::Pc),
            "mm" => Some(Unit::Mm),
            "cm" => Some(Unit::Cm),
            "in" => Some(Unit::In),
            _ => None,
        }
    }
}

/// Scalar distance with a unit
#[derive(Clone, Copy, Debug, Default)]
pub struct Length {
    value: f64,
    unit: Unit,
}

impl Length {
    pub const ZERO: Length = Length {
        value: 0.0,
        unit: Unit::Px,
    };

    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Length in user units
    pub const fn px(value: f64) -> Self {
        Self::new(value, Unit::Px)
    }

    /// Amount in the length's own unit
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Amount converted into user units
    pub fn to_user_units(&self) -> f64 {
        self.value * self.unit.ratio()
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }

    pub fn abs(self) -> Length {
        Length::new(self.value.abs(), self.unit)
    }

    /// Divide by a scalar, keeping the unit
    pub fn checked_div(self, divisor: f64) -> Result<Length> {
        if divisor == 0.0 {
            return Err(Error::domain("division of a length by zero"));
        }
        Ok(Length::new(self.value / divisor, self.unit))
    }

    /// Dimensionless ratio `self / other`
    pub fn ratio(self, other: Length) -> Result<f64> {
        if other.is_zero() {
            return Err(Error::domain("division by a zero length"));
        }
        if self.unit == other.unit {
            Ok(self.value / other.value)
        } else {
            Ok(self.to_user_units() / other.to_user_units())
        }
    }

    fn combine(self, other: Length, op: impl Fn(f64, f64) -> f64) -> Length {
        if self.unit == other.unit {
            Length::new(op(self.value, other.value), self.unit)
        } else {
            Length::px(op(self.to_user_units(), other.to_user_units()))
        }
    }
}

impl From<f64> for Length {
    fn from(value: f64) -> Self {
        Length::px(value)
    }
}

impl From<Length> for f64 {
    fn from(length: Length) -> Self {
        length.to_user_units()
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        self.combine(rhs, |a, b| a + b)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        self.combine(rhs, |a, b| a - b)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length::new(self.value * rhs, self.unit)
    }
}

impl Neg for Length {
    type Output = Length;

    fn neg(self) -> Length {
        Length::new(-self.value, self.unit)
    }
}

impl PartialEq for Length {
    fn eq(&self, other: &Length) -> bool {
        if self.unit == other.unit {
            self.value == other.value
        } else {
            self.to_user_units() == other.to_user_units()
        }
    }
}

impl PartialOrd for Length {
    fn partial_cmp(&self, other: &Length) -> Option<Ordering> {
        if self.unit == other.unit {
            self.value.partial_cmp(&other.value)
        } else {
            self.to_user_units().partial_cmp(&other.to_user_units())
        }
    }
}

impl FromStr for Length {
    type Err = Error;

    fn from_str(s: &str) -> Result<Length> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(trimmed.len());
        let (number, suffix) = trimmed.split_at(split);

        let unit = Unit::from_suffix(suffix)
            .ok_or_else(|| Error::invalid_argument(format!("unknown length unit `{suffix}'")))?;
        let value: f64 = number
            .parse()
            .map_err(|_| Error::invalid_argument(format!("`{s}' is not a length")))?;
        if !value.is_finite() {
            return Err(Error::invalid_argument(format!("`{s}' is not a finite length")));
        }

        // A zero length carries no unit
        Ok(if value == 0.0 {
            Length::ZERO
        } else {
            Length::new(value, unit)
        })
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            Unit::Px => "",
            unit => unit.suffix(),
        };
        write!(f, "{}{}", format_decimal(self.value, 3), suffix)
    }
}

/// Format `value` with at most `precision` fractional digits, trimming
/// trailing zeros
pub fn format_decimal(value: f64, precision: usize) -> String {
    let mut text = format!("{:.*}", precision, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}
