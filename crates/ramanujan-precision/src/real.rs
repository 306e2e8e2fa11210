//! Arbitrary precision decimal reals.
//!
//! A [`Real`] is `significand * 10^exponent`, rounded half away from zero to
//! at most `precision` significant digits. The representation is canonical
//! (no trailing zeros in the significand), so two reals compare equal exactly
//! when their rounded values are equal, and rendering is deterministic.

use dashu::base::{Abs, BitTest, Signed as DashuSigned};
use dashu::integer::IBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use crate::PrecisionError;

/// Returns `10^n`.
pub(crate) fn pow10(n: usize) -> IBig {
    IBig::from(10).pow(n)
}

/// Number of decimal digits in `|n|`; zero has one digit.
pub(crate) fn digit_count(n: &IBig) -> usize {
    if n.is_zero() {
        return 1;
    }
    let magnitude = n.clone().abs();
    // (bits - 1) * log10(2), rounded down, is a lower bound on floor(log10 |n|).
    let bits = magnitude.bit_len();
    let mut digits = (bits.saturating_sub(1) as u64 * 30_102 / 100_000) as usize + 1;
    while magnitude >= pow10(digits) {
        digits += 1;
    }
    digits
}

/// Integer square root, rounded down.
pub(crate) fn isqrt(n: &IBig) -> IBig {
    if n.is_zero() {
        return IBig::ZERO;
    }
    let two = IBig::from(2);
    let mut x = pow10(digit_count(n) / 2 + 1);
    loop {
        let y = (&x + n / &x) / &two;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// An arbitrary precision decimal real number.
#[derive(Clone)]
pub struct Real {
    significand: IBig,
    exponent: i64,
    precision: usize,
}

impl Real {
    /// Creates zero carrying the given precision.
    #[must_use]
    pub fn zero(precision: usize) -> Self {
        Self {
            significand: IBig::ZERO,
            exponent: 0,
            precision: precision.max(1),
        }
    }

    /// Creates one carrying the given precision.
    #[must_use]
    pub fn one(precision: usize) -> Self {
        Self::from_i64(1, precision)
    }

    /// Creates a real from an integer, rounded to `precision` digits.
    #[must_use]
    pub fn from_i64(value: i64, precision: usize) -> Self {
        Self::from_parts(IBig::from(value), 0, precision)
    }

    /// Creates a real from an arbitrary precision integer.
    #[must_use]
    pub fn from_ibig(value: IBig, precision: usize) -> Self {
        Self::from_parts(value, 0, precision)
    }

    /// Creates `significand * 10^exponent`, rounded to `precision` digits.
    #[must_use]
    pub fn from_parts(significand: IBig, exponent: i64, precision: usize) -> Self {
        let precision = precision.max(1);
        if significand.is_zero() {
            return Self::zero(precision);
        }

        let mut significand = significand;
        let mut exponent = exponent;

        let digits = digit_count(&significand);
        if digits > precision {
            let dropped = digits - precision;
            let divisor = pow10(dropped);
            let remainder = (&significand % &divisor).abs();
            let mut quotient = &significand / &divisor;
            if remainder * IBig::from(2) >= divisor {
                if DashuSigned::is_negative(&significand) {
                    quotient = quotient - IBig::ONE;
                } else {
                    quotient = quotient + IBig::ONE;
                }
            }
            significand = quotient;
            exponent += dropped as i64;
        }

        let ten = IBig::from(10);
        while (&significand % &ten).is_zero() {
            significand = significand / &ten;
            exponent += 1;
        }

        Self {
            significand,
            exponent,
            precision,
        }
    }

    /// Parses a plain or scientific decimal literal such as `-12.5` or `3e-7`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a decimal literal.
    pub fn parse(text: &str, precision: usize) -> Result<Self, PrecisionError> {
        let malformed = || PrecisionError::MalformedDecimal(text.to_string());
        let trimmed = text.trim();

        let (mantissa, exp_part) = match trimmed.find(['e', 'E']) {
            Some(pos) => (&trimmed[..pos], Some(&trimmed[pos + 1..])),
            None => (trimmed, None),
        };
        let mut exponent: i64 = match exp_part {
            Some(e) => e.parse().map_err(|_| malformed())?,
            None => 0,
        };

        let (negative, unsigned) = match mantissa.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(malformed());
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let digits = format!("{int_part}{frac_part}");
        let mut significand = IBig::from_str_radix(&digits, 10).map_err(|_| malformed())?;
        if negative {
            significand = -significand;
        }
        exponent -= frac_part.len() as i64;

        Ok(Self::from_parts(significand, exponent, precision))
    }

    /// Returns the precision, in significant digits, this value carries.
    #[must_use]
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Re-rounds this value to a new precision.
    #[must_use]
    pub fn with_precision(&self, precision: usize) -> Self {
        Self::from_parts(self.significand.clone(), self.exponent, precision)
    }

    /// Returns the significand (without trailing zeros).
    #[must_use]
    pub fn significand(&self) -> &IBig {
        &self.significand
    }

    /// Returns the decimal exponent.
    #[must_use]
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Returns true if this value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.significand.is_zero()
    }

    /// Returns true if this value is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.significand)
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.is_zero() {
            0
        } else if self.is_negative() {
            -1
        } else {
            1
        }
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            significand: self.significand.clone().abs(),
            exponent: self.exponent,
            precision: self.precision,
        }
    }

    /// Returns `m` such that `10^(m-1) <= |self| < 10^m`.
    ///
    /// Zero reports `i64::MIN`.
    #[must_use]
    pub fn magnitude(&self) -> i64 {
        if self.is_zero() {
            return i64::MIN;
        }
        self.exponent + digit_count(&self.significand) as i64
    }

    /// Returns true if the value is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.exponent >= 0
    }

    /// Rounds to the nearest integer, halves away from zero.
    #[must_use]
    pub fn round_to_integer(&self) -> IBig {
        if self.exponent >= 0 {
            return &self.significand * pow10(self.exponent as usize);
        }
        let shift = (-self.exponent) as usize;
        if shift > digit_count(&self.significand) {
            return IBig::ZERO;
        }
        let divisor = pow10(shift);
        let mut quotient = &self.significand / &divisor;
        let remainder = (&self.significand % &divisor).abs();
        if remainder * IBig::from(2) >= divisor {
            if self.is_negative() {
                quotient = quotient - IBig::ONE;
            } else {
                quotient = quotient + IBig::ONE;
            }
        }
        quotient
    }

    /// Converts to an `i64` if the value is an integer in range.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() || self.exponent > 18 {
            return None;
        }
        (&self.significand * pow10(self.exponent as usize)).try_into().ok()
    }

    /// Divides, returning `None` when `rhs` is zero.
    #[must_use]
    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        Some(self.quotient(rhs))
    }

    /// Division for divisors known to be non-zero.
    pub(crate) fn quotient(&self, rhs: &Self) -> Self {
        let precision = self.precision.max(rhs.precision);
        if self.is_zero() || rhs.is_zero() {
            return Self::zero(precision);
        }
        let shift = (precision + 2 + digit_count(&rhs.significand))
            .saturating_sub(digit_count(&self.significand));
        let numerator = &self.significand * pow10(shift);
        let quotient = numerator / &rhs.significand;
        Self::from_parts(quotient, self.exponent - rhs.exponent - shift as i64, precision)
    }

    /// Returns `1 / self`, or `None` for zero.
    #[must_use]
    pub fn recip(&self) -> Option<Self> {
        Self::one(self.precision).checked_div(self)
    }

    /// Divides by a small non-zero integer.
    #[must_use]
    pub fn div_int(&self, divisor: i64) -> Self {
        debug_assert!(divisor != 0, "division by zero");
        if self.is_zero() || divisor == 0 {
            return Self::zero(self.precision);
        }
        let divisor = IBig::from(divisor);
        let shift = (self.precision + 2 + digit_count(&divisor))
            .saturating_sub(digit_count(&self.significand));
        let numerator = &self.significand * pow10(shift);
        Self::from_parts(numerator / divisor, self.exponent - shift as i64, self.precision)
    }

    /// Multiplies by a small integer.
    #[must_use]
    pub fn mul_int(&self, factor: i64) -> Self {
        Self::from_parts(&self.significand * IBig::from(factor), self.exponent, self.precision)
    }

    /// Computes `self^n` by repeated squaring.
    #[must_use]
    pub fn powi(&self, n: u32) -> Self {
        let mut result = Self::one(self.precision);
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = &result * &base;
            }
            exp >>= 1;
            if exp > 0 {
                base = &base * &base;
            }
        }

        result
    }

    /// Principal square root, or `None` for negative values.
    #[must_use]
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_negative() {
            return None;
        }
        Some(self.sqrt_abs())
    }

    /// Square root of `|self|`.
    pub(crate) fn sqrt_abs(&self) -> Self {
        if self.is_zero() {
            return Self::zero(self.precision);
        }

        // Scale so the integer root carries precision + 2 digits and the
        // exponent is even.
        let target = 2 * (self.precision + 2);
        let mut shift = target.saturating_sub(digit_count(&self.significand)) as i64;
        let mut exponent = self.exponent - shift;
        if exponent.rem_euclid(2) != 0 {
            shift += 1;
            exponent -= 1;
        }

        let scaled = self.significand.clone().abs() * pow10(shift as usize);
        Self::from_parts(isqrt(&scaled), exponent / 2, self.precision)
    }

    /// Renders the value positionally (never in scientific notation) with at
    /// most `digits` significant digits.
    ///
    /// The rendering is canonical: integers carry no decimal point, fractions
    /// carry no trailing zeros, and zero renders as `0`.
    #[must_use]
    pub fn to_decimal_string(&self, digits: usize) -> String {
        let rounded = self.with_precision(digits);
        rounded.render_exact()
    }

    /// Renders every digit of the stored significand.
    #[must_use]
    pub fn render_exact(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }

        let sign = if self.is_negative() { "-" } else { "" };
        let digits = self.significand.clone().abs().to_string();

        if self.exponent >= 0 {
            return format!("{sign}{digits}{}", "0".repeat(self.exponent as usize));
        }

        let frac_len = (-self.exponent) as usize;
        if digits.len() > frac_len {
            let (int_part, frac_part) = digits.split_at(digits.len() - frac_len);
            format!("{sign}{int_part}.{frac_part}")
        } else {
            let zeros = "0".repeat(frac_len - digits.len());
            format!("{sign}0.{zeros}{digits}")
        }
    }

    /// Returns the leading `digits` significant digits of `|self|`, truncated
    /// (not rounded), together with the magnitude.
    ///
    /// Two values agree to `digits` digits exactly when their prefixes match.
    #[must_use]
    pub fn leading_digits(&self, digits: usize) -> (i64, String) {
        if self.is_zero() {
            return (i64::MIN, "0".repeat(digits));
        }
        let mut text = self.significand.clone().abs().to_string();
        if text.len() >= digits {
            text.truncate(digits);
        } else {
            text.push_str(&"0".repeat(digits - text.len()));
        }
        (self.magnitude(), text)
    }

    /// Returns true if `|self|` and `|other|` share their first `digits`
    /// significant digits.
    #[must_use]
    pub fn agrees_with(&self, other: &Self, digits: usize) -> bool {
        self.leading_digits(digits) == other.leading_digits(digits)
    }

    fn add_impl(&self, rhs: &Self) -> Self {
        let precision = self.precision.max(rhs.precision);
        if self.is_zero() {
            return rhs.with_precision(precision);
        }
        if rhs.is_zero() {
            return self.with_precision(precision);
        }

        // An operand entirely below the rounding window of the other one
        // cannot change the rounded sum.
        let (ml, mr) = (self.magnitude(), rhs.magnitude());
        let window = precision as i64 + 1;
        if ml - mr > window {
            return self.with_precision(precision);
        }
        if mr - ml > window {
            return rhs.with_precision(precision);
        }

        let exponent = self.exponent.min(rhs.exponent);
        let lhs_sig = &self.significand * pow10((self.exponent - exponent) as usize);
        let rhs_sig = &rhs.significand * pow10((rhs.exponent - exponent) as usize);
        Self::from_parts(lhs_sig + rhs_sig, exponent, precision)
    }

    fn mul_impl(&self, rhs: &Self) -> Self {
        let precision = self.precision.max(rhs.precision);
        Self::from_parts(
            &self.significand * &rhs.significand,
            self.exponent + rhs.exponent,
            precision,
        )
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.significand == other.significand && self.exponent == other.exponent
    }
}

impl Eq for Real {}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Self) -> Ordering {
        let (ls, rs) = (self.signum(), other.signum());
        if ls != rs {
            return ls.cmp(&rs);
        }
        if ls == 0 {
            return Ordering::Equal;
        }

        let by_magnitude = self.magnitude().cmp(&other.magnitude());
        let unsigned = if by_magnitude == Ordering::Equal {
            let exponent = self.exponent.min(other.exponent);
            let l = self.significand.clone().abs() * pow10((self.exponent - exponent) as usize);
            let r = other.significand.clone().abs() * pow10((other.exponent - exponent) as usize);
            l.cmp(&r)
        } else {
            by_magnitude
        };

        if ls < 0 {
            unsigned.reverse()
        } else {
            unsigned
        }
    }
}

impl fmt::Debug for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Real({}, {} digits)", self.render_exact(), self.precision)
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_exact())
    }
}

impl FromStr for Real {
    type Err = PrecisionError;

    /// Parses with exactly as many digits as the literal carries.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.bytes().filter(u8::is_ascii_digit).count();
        Self::parse(s, digits.max(1))
    }
}

impl Serialize for Real {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render_exact())
    }
}

impl<'de> Deserialize<'de> for Real {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// Arithmetic operations
impl Add for &Real {
    type Output = Real;

    fn add(self, rhs: Self) -> Self::Output {
        self.add_impl(rhs)
    }
}

impl Add for Real {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.add_impl(&rhs)
    }
}

impl Sub for &Real {
    type Output = Real;

    fn sub(self, rhs: Self) -> Self::Output {
        self.add_impl(&-rhs)
    }
}

impl Sub for Real {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.add_impl(&-rhs)
    }
}

impl Mul for &Real {
    type Output = Real;

    fn mul(self, rhs: Self) -> Self::Output {
        self.mul_impl(rhs)
    }
}

impl Mul for Real {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.mul_impl(&rhs)
    }
}

impl Neg for Real {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            significand: -self.significand,
            exponent: self.exponent,
            precision: self.precision,
        }
    }
}

impl Neg for &Real {
    type Output = Real;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real(text: &str) -> Real {
        Real::parse(text, 30).unwrap()
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(&IBig::from(0)), 1);
        assert_eq!(digit_count(&IBig::from(9)), 1);
        assert_eq!(digit_count(&IBig::from(10)), 2);
        assert_eq!(digit_count(&IBig::from(-99_999)), 5);
        assert_eq!(digit_count(&pow10(120)), 121);
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(&IBig::from(0)), IBig::from(0));
        assert_eq!(isqrt(&IBig::from(15)), IBig::from(3));
        assert_eq!(isqrt(&IBig::from(16)), IBig::from(4));
        assert_eq!(isqrt(&IBig::from(1_000_000_007)), IBig::from(31_622));
    }

    #[test]
    fn test_rounding_half_away() {
        assert_eq!(Real::parse("1.25", 2).unwrap().render_exact(), "1.3");
        assert_eq!(Real::parse("-1.25", 2).unwrap().render_exact(), "-1.3");
        assert_eq!(Real::parse("9.99", 2).unwrap().render_exact(), "10");
        assert_eq!(Real::parse("1.24", 2).unwrap().render_exact(), "1.2");
    }

    #[test]
    fn test_rendering() {
        assert_eq!(real("111").render_exact(), "111");
        assert_eq!(real("111.000").render_exact(), "111");
        assert_eq!(real("0.00125").render_exact(), "0.00125");
        assert_eq!(real("-3.5e2").render_exact(), "-350");
        assert_eq!(real("12e-5").render_exact(), "0.00012");
        assert_eq!(real("0").render_exact(), "0");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Real::parse("", 10).is_err());
        assert!(Real::parse("1.2.3", 10).is_err());
        assert!(Real::parse("abc", 10).is_err());
        assert!(Real::parse("1e", 10).is_err());
    }

    #[test]
    fn test_basic_ops() {
        let a = real("1.5");
        let b = real("0.25");
        assert_eq!((&a + &b).render_exact(), "1.75");
        assert_eq!((&a - &b).render_exact(), "1.25");
        assert_eq!((&a * &b).render_exact(), "0.375");
        assert_eq!(a.checked_div(&b).unwrap().render_exact(), "6");
        assert!(a.checked_div(&Real::zero(30)).is_none());
    }

    #[test]
    fn test_division_rounds_to_precision() {
        let third = Real::one(10).checked_div(&Real::from_i64(3, 10)).unwrap();
        assert_eq!(third.render_exact(), "0.3333333333");
        let two_thirds = Real::from_i64(2, 10).checked_div(&Real::from_i64(3, 10)).unwrap();
        assert_eq!(two_thirds.render_exact(), "0.6666666667");
    }

    #[test]
    fn test_addition_far_apart() {
        let big = Real::parse("1e40", 10).unwrap();
        let tiny = Real::parse("1e-40", 10).unwrap();
        assert_eq!(&big + &tiny, big);
        assert_eq!(&big - &tiny, big);
    }

    #[test]
    fn test_ordering() {
        assert!(real("-2") < real("-1.5"));
        assert!(real("0.001") < real("0.01"));
        assert!(real("123.4") > real("123.39"));
        assert_eq!(real("5").cmp(&real("5.000")), Ordering::Equal);
    }

    #[test]
    fn test_sqrt() {
        let two = Real::from_i64(2, 20);
        assert_eq!(two.sqrt().unwrap().render_exact(), "1.4142135623730950488");
        assert_eq!(Real::from_i64(144, 20).sqrt().unwrap().render_exact(), "12");
        assert_eq!(real("0.0004").sqrt().unwrap().render_exact(), "0.02");
        assert!(real("-1").sqrt().is_none());
    }

    #[test]
    fn test_powi() {
        assert_eq!(real("1.1").powi(3).render_exact(), "1.331");
        assert_eq!(real("7").powi(0).render_exact(), "1");
    }

    #[test]
    fn test_round_to_integer() {
        assert_eq!(real("2.5").round_to_integer(), IBig::from(3));
        assert_eq!(real("-2.5").round_to_integer(), IBig::from(-3));
        assert_eq!(real("2.49").round_to_integer(), IBig::from(2));
        assert_eq!(real("0.0001").round_to_integer(), IBig::from(0));
        assert_eq!(real("42").to_i64(), Some(42));
        assert_eq!(real("4.2").to_i64(), None);
    }

    #[test]
    fn test_leading_digits_truncate() {
        let a = real("2.71828182845");
        let b = real("2.71828182945");
        assert!(a.agrees_with(&b, 9));
        assert!(!a.agrees_with(&b, 10));
        assert!(real("-2.718").agrees_with(&real("2.718"), 4));
        assert!(!real("0.2718").agrees_with(&real("2.718"), 4));
    }
}
