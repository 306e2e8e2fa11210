//! Complex numbers over [`Real`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::real::Real;

/// A complex number `re + im*i`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complex {
    /// Real part.
    pub re: Real,
    /// Imaginary part.
    pub im: Real,
}

impl Complex {
    /// Creates a complex number from its parts.
    #[must_use]
    pub fn new(re: Real, im: Real) -> Self {
        Self { re, im }
    }

    /// Embeds a real number.
    #[must_use]
    pub fn from_real(re: Real) -> Self {
        let im = Real::zero(re.precision());
        Self { re, im }
    }

    /// Returns the larger precision of the two parts.
    #[must_use]
    pub fn precision(&self) -> usize {
        self.re.precision().max(self.im.precision())
    }

    /// Returns true if the imaginary part is zero.
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    /// Returns true if both parts are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    /// Returns `re^2 + im^2`.
    #[must_use]
    pub fn norm_sqr(&self) -> Real {
        &(&self.re * &self.re) + &(&self.im * &self.im)
    }

    /// Returns the modulus `|z|`.
    #[must_use]
    pub fn abs(&self) -> Real {
        if self.im.is_zero() {
            return self.re.abs();
        }
        if self.re.is_zero() {
            return self.im.abs();
        }
        self.norm_sqr().sqrt_abs()
    }

    /// Returns the argument in `(-pi, pi]`.
    #[must_use]
    pub fn arg(&self) -> Real {
        Real::atan2(&self.im, &self.re)
    }

    /// Divides, returning `None` when `rhs` is zero.
    #[must_use]
    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        if rhs.im.is_zero() {
            return Some(Self::new(
                self.re.quotient(&rhs.re),
                self.im.quotient(&rhs.re),
            ));
        }

        let denom = rhs.norm_sqr();
        let re = &(&self.re * &rhs.re) + &(&self.im * &rhs.im);
        let im = &(&self.im * &rhs.re) - &(&self.re * &rhs.im);
        Some(Self::new(re.quotient(&denom), im.quotient(&denom)))
    }

    /// Returns `1 / self`, or `None` for zero.
    #[must_use]
    pub fn recip(&self) -> Option<Self> {
        Self::from_real(Real::one(self.precision())).checked_div(self)
    }

    /// Computes `self^n` by repeated squaring.
    #[must_use]
    pub fn powi(&self, n: u32) -> Self {
        let mut result = Self::from_real(Real::one(self.precision()));
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

    /// Principal square root, with non-negative real part.
    #[must_use]
    pub fn sqrt(&self) -> Self {
        let precision = self.precision();
        if self.is_zero() {
            return Self::from_real(Real::zero(precision));
        }

        // u = sqrt((|z| + |re|) / 2), then the other part is im / 2u.
        let modulus = self.abs();
        let u = (&modulus + &self.re.abs()).div_int(2).sqrt_abs();
        let v = self.im.quotient(&u.mul_int(2));

        if !self.re.is_negative() {
            Self::new(u, v)
        } else if self.im.is_negative() {
            Self::new(v.abs(), -u)
        } else {
            Self::new(v.abs(), u)
        }
    }

    /// Computes `e^self`, or `None` on overflow.
    #[must_use]
    pub fn exp(&self) -> Option<Self> {
        let scale = self.re.exp()?;
        let (sin, cos) = self.im.sin_cos();
        Some(Self::new(&scale * &cos, &scale * &sin))
    }

    /// Principal natural logarithm, or `None` for zero.
    #[must_use]
    pub fn ln(&self) -> Option<Self> {
        let re = self.abs().ln()?;
        Some(Self::new(re, self.arg()))
    }

    /// Computes `(sin self, cos self)`, or `None` on overflow.
    #[must_use]
    pub fn sin_cos(&self) -> Option<(Self, Self)> {
        let (sin_re, cos_re) = self.re.sin_cos();
        let (sinh_im, cosh_im) = self.im.sinh_cosh()?;

        let sin = Self::new(&sin_re * &cosh_im, &cos_re * &sinh_im);
        let cos = Self::new(&cos_re * &cosh_im, -(&sin_re * &sinh_im));
        Some((sin, cos))
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_negative() {
            write!(f, "({} - {}j)", self.re, self.im.abs())
        } else {
            write!(f, "({} + {}j)", self.re, self.im)
        }
    }
}

impl Add for &Complex {
    type Output = Complex;

    fn add(self, rhs: Self) -> Self::Output {
        Complex::new(&self.re + &rhs.re, &self.im + &rhs.im)
    }
}

impl Sub for &Complex {
    type Output = Complex;

    fn sub(self, rhs: Self) -> Self::Output {
        Complex::new(&self.re - &rhs.re, &self.im - &rhs.im)
    }
}

impl Mul for &Complex {
    type Output = Complex;

    fn mul(self, rhs: Self) -> Self::Output {
        let re = &(&self.re * &rhs.re) - &(&self.im * &rhs.im);
        let im = &(&self.re * &rhs.im) + &(&self.im * &rhs.re);
        Complex::new(re, im)
    }
}

impl Neg for &Complex {
    type Output = Complex;

    fn neg(self) -> Self::Output {
        Complex::new(-&self.re, -&self.im)
    }
}
