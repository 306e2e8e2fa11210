//! Numeric results with explicit undefined sentinels.
//!
//! Algorithms and transforms never raise on division by zero or overflow.
//! They produce [`Number::NaN`] or [`Number::Infinity`], which callers filter
//! out before storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::complex::Complex;
use crate::elementary;
use crate::real::Real;

/// Largest decimal magnitude a finite value may have.
///
/// Values beyond `10^MAX_MAGNITUDE` become [`Number::Infinity`]; values
/// below `10^-MAX_MAGNITUDE` flush to zero.
pub const MAX_MAGNITUDE: i64 = 1000;

/// A real or complex result, or an undefined sentinel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Number {
    /// A finite real value.
    Real(Real),
    /// A finite value with non-zero imaginary part.
    Complex(Complex),
    /// Not a number.
    #[serde(rename = "nan")]
    NaN,
    /// Unsigned infinity.
    Infinity,
}

fn clamp(value: Real) -> Option<Real> {
    if value.is_zero() {
        return Some(value);
    }
    let magnitude = value.magnitude();
    if magnitude > MAX_MAGNITUDE {
        None
    } else if magnitude < -MAX_MAGNITUDE {
        Some(Real::zero(value.precision()))
    } else {
        Some(value)
    }
}

impl Number {
    /// Wraps a real value, mapping overflow to infinity.
    #[must_use]
    pub fn real(value: Real) -> Self {
        clamp(value).map_or(Self::Infinity, Self::Real)
    }

    /// Wraps a complex value, collapsing to a real when the imaginary part
    /// vanishes.
    #[must_use]
    pub fn complex(value: Complex) -> Self {
        let Complex { re, im } = value;
        match (clamp(re), clamp(im)) {
            (Some(re), Some(im)) if im.is_zero() => Self::Real(re),
            (Some(re), Some(im)) => Self::Complex(Complex::new(re, im)),
            _ => Self::Infinity,
        }
    }

    /// Creates an integer value carrying `digits` of precision.
    #[must_use]
    pub fn from_i64(value: i64, digits: usize) -> Self {
        Self::Real(Real::from_i64(value, digits))
    }

    /// Creates zero carrying `digits` of precision.
    #[must_use]
    pub fn zero(digits: usize) -> Self {
        Self::Real(Real::zero(digits))
    }

    /// Returns true for [`Number::NaN`].
    #[must_use]
    pub fn is_nan(&self) -> bool {
        matches!(self, Self::NaN)
    }

    /// Returns true for [`Number::Infinity`].
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinity)
    }

    /// Returns true for real and complex values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Real(_) | Self::Complex(_))
    }

    /// Returns true if the value is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Real(r) => r.is_zero(),
            Self::Complex(c) => c.is_zero(),
            _ => false,
        }
    }

    /// Returns the real value, if this is one.
    #[must_use]
    pub fn as_real(&self) -> Option<&Real> {
        match self {
            Self::Real(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the precision carried by a finite value.
    #[must_use]
    pub fn precision(&self) -> Option<usize> {
        match self {
            Self::Real(r) => Some(r.precision()),
            Self::Complex(c) => Some(c.precision()),
            _ => None,
        }
    }

    /// Absolute value: `|x|` for reals, the modulus for complex values.
    #[must_use]
    pub fn abs(&self) -> Self {
        match self {
            Self::Real(r) => Self::Real(r.abs()),
            Self::Complex(c) => Self::real(c.abs()),
            other => other.clone(),
        }
    }

    fn to_complex(&self) -> Option<Complex> {
        match self {
            Self::Real(r) => Some(Complex::from_real(r.clone())),
            Self::Complex(c) => Some(c.clone()),
            _ => None,
        }
    }

    /// Returns `1 / self`; zero maps to infinity and infinity to zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        match self {
            Self::Real(r) => r.recip().map_or(Self::Infinity, Self::real),
            Self::Complex(c) => c.recip().map_or(Self::Infinity, Self::complex),
            Self::NaN => Self::NaN,
            Self::Infinity => Self::zero(1),
        }
    }

    /// Computes `self^n`.
    #[must_use]
    pub fn powi(&self, n: u32) -> Self {
        match self {
            Self::Real(r) => Self::real(r.powi(n)),
            Self::Complex(c) => Self::complex(c.powi(n)),
            Self::Infinity if n == 0 => Self::NaN,
            other => other.clone(),
        }
    }

    /// Square root of a real, or [`Number::NaN`] for negative reals.
    ///
    /// Complex inputs take the principal root.
    #[must_use]
    pub fn real_sqrt(&self) -> Self {
        match self {
            Self::Real(r) => r.sqrt().map_or(Self::NaN, Self::Real),
            other => other.sqrt(),
        }
    }

    /// Principal square root; negative reals give imaginary results.
    #[must_use]
    pub fn sqrt(&self) -> Self {
        match self {
            Self::Real(r) if !r.is_negative() => Self::Real(r.sqrt_abs()),
            Self::Real(r) => Self::complex(Complex::new(Real::zero(r.precision()), r.sqrt_abs())),
            Self::Complex(c) => Self::complex(c.sqrt()),
            other => other.clone(),
        }
    }

    /// Computes `e^self`.
    #[must_use]
    pub fn exp(&self) -> Self {
        match self {
            Self::Real(r) => r.exp().map_or(Self::Infinity, Self::real),
            Self::Complex(c) => c.exp().map_or(Self::Infinity, Self::complex),
            other => other.clone(),
        }
    }

    /// Natural logarithm; negative reals give complex results and zero
    /// gives infinity.
    #[must_use]
    pub fn ln(&self) -> Self {
        match self {
            Self::Real(r) if r.is_zero() => Self::Infinity,
            Self::Real(r) if r.is_negative() => {
                let magnitude = r.abs().ln().map_or(Self::NaN, Self::real);
                match magnitude {
                    Self::Real(re) => {
                        let im = elementary::pi(r.precision());
                        Self::complex(Complex::new(re, im))
                    }
                    other => other,
                }
            }
            Self::Real(r) => r.ln().map_or(Self::NaN, Self::real),
            Self::Complex(c) => c.ln().map_or(Self::Infinity, Self::complex),
            other => other.clone(),
        }
    }

    /// Computes `(sin self, cos self)`.
    fn sin_cos(&self) -> (Self, Self) {
        match self {
            Self::Real(r) => {
                let (sin, cos) = r.sin_cos();
                (Self::Real(sin), Self::Real(cos))
            }
            Self::Complex(c) => match c.sin_cos() {
                Some((sin, cos)) => (Self::complex(sin), Self::complex(cos)),
                None => (Self::Infinity, Self::Infinity),
            },
            _ => (Self::NaN, Self::NaN),
        }
    }

    /// Sine.
    #[must_use]
    pub fn sin(&self) -> Self {
        self.sin_cos().0
    }

    /// Cosine.
    #[must_use]
    pub fn cos(&self) -> Self {
        self.sin_cos().1
    }

    /// Tangent; infinite where the cosine vanishes.
    #[must_use]
    pub fn tan(&self) -> Self {
        let (sin, cos) = self.sin_cos();
        if cos.is_zero() {
            return Self::Infinity;
        }
        &sin / &cos
    }

    /// Cotangent; [`Number::NaN`] at zero.
    #[must_use]
    pub fn cot(&self) -> Self {
        if self.is_zero() {
            return Self::NaN;
        }
        let (sin, cos) = self.sin_cos();
        if sin.is_zero() {
            return Self::Infinity;
        }
        &cos / &sin
    }

    /// Renders a finite value positionally with at most `digits`
    /// significant digits per component.
    #[must_use]
    pub fn to_decimal_string(&self, digits: usize) -> String {
        match self {
            Self::Real(r) => r.to_decimal_string(digits),
            Self::Complex(c) => Complex::new(c.re.with_precision(digits), c.im.with_precision(digits))
                .to_string(),
            Self::NaN => "nan".to_string(),
            Self::Infinity => "inf".to_string(),
        }
    }

    /// Re-rounds a finite value to `digits` significant digits.
    #[must_use]
    pub fn with_precision(&self, digits: usize) -> Self {
        match self {
            Self::Real(r) => Self::Real(r.with_precision(digits)),
            Self::Complex(c) => Self::complex(Complex::new(
                c.re.with_precision(digits),
                c.im.with_precision(digits),
            )),
            other => other.clone(),
        }
    }

    /// Returns true if `|self|` and `|other|` share their leading `digits`
    /// significant digits. Undefined values never agree.
    #[must_use]
    pub fn agrees_with(&self, other: &Self, digits: usize) -> bool {
        match (self.abs(), other.abs()) {
            (Self::Real(a), Self::Real(b)) => a.agrees_with(&b, digits),
            _ => false,
        }
    }

    fn binary(
        &self,
        rhs: &Self,
        real: impl FnOnce(&Real, &Real) -> Self,
        complex: impl FnOnce(&Complex, &Complex) -> Self,
    ) -> Self {
        match (self, rhs) {
            (Self::Real(a), Self::Real(b)) => real(a, b),
            (a, b) => match (a.to_complex(), b.to_complex()) {
                (Some(a), Some(b)) => complex(&a, &b),
                _ => Self::NaN,
            },
        }
    }
}

impl From<Real> for Number {
    fn from(value: Real) -> Self {
        Self::real(value)
    }
}

impl From<Complex> for Number {
    fn from(value: Complex) -> Self {
        Self::complex(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(r) => write!(f, "{r}"),
            Self::Complex(c) => write!(f, "{c}"),
            Self::NaN => f.write_str("nan"),
            Self::Infinity => f.write_str("inf"),
        }
    }
}

impl Add for &Number {
    type Output = Number;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Number::NaN, _) | (_, Number::NaN) => Number::NaN,
            (Number::Infinity, Number::Infinity) => Number::NaN,
            (Number::Infinity, _) | (_, Number::Infinity) => Number::Infinity,
            _ => self.binary(rhs, |a, b| Number::real(a + b), |a, b| Number::complex(a + b)),
        }
    }
}

impl Sub for &Number {
    type Output = Number;

    fn sub(self, rhs: Self) -> Self::Output {
        self + &-rhs
    }
}

impl Mul for &Number {
    type Output = Number;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Number::NaN, _) | (_, Number::NaN) => Number::NaN,
            (Number::Infinity, x) | (x, Number::Infinity) if x.is_zero() => Number::NaN,
            (Number::Infinity, _) | (_, Number::Infinity) => Number::Infinity,
            _ => self.binary(rhs, |a, b| Number::real(a * b), |a, b| Number::complex(a * b)),
        }
    }
}

impl Div for &Number {
    type Output = Number;

    /// Division by zero gives [`Number::NaN`].
    fn div(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Number::NaN, _) | (_, Number::NaN) => Number::NaN,
            (Number::Infinity, Number::Infinity) => Number::NaN,
            (Number::Infinity, x) if x.is_zero() => Number::NaN,
            (Number::Infinity, _) => Number::Infinity,
            (_, Number::Infinity) => Number::zero(self.precision().unwrap_or(1)),
            _ => self.binary(
                rhs,
                |a, b| a.checked_div(b).map_or(Number::NaN, Number::real),
                |a, b| a.checked_div(b).map_or(Number::NaN, Number::complex),
            ),
        }
    }
}

impl Neg for &Number {
    type Output = Number;

    fn neg(self) -> Self::Output {
        match self {
            Number::Real(r) => Number::Real(-r),
            Number::Complex(c) => Number::Complex(-c),
            other => other.clone(),
        }
    }
}
