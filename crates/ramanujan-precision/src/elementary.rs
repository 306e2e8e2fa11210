//! Elementary functions over [`Real`].
//!
//! Every function evaluates with extra internal digits and rounds the result
//! to the precision carried by its argument. Constants that are expensive to
//! compute (pi, ln 2, ln 10) are memoised per precision.

use dashu::base::BitTest;
use dashu::integer::IBig;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

use crate::real::Real;

/// Internal digits added on top of the requested precision.
const EXTRA_DIGITS: usize = 10;

/// Largest argument whose exponential stays representable.
///
/// `e^2302` is just below `10^1000`.
pub const EXP_LIMIT: i64 = 2302;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Cached {
    Pi,
    Ln2,
    Ln10,
}

type ConstantCache = RwLock<FxHashMap<(Cached, usize), Real>>;

static CONSTANTS: OnceLock<ConstantCache> = OnceLock::new();

fn cached(kind: Cached, digits: usize, compute: impl FnOnce(usize) -> Real) -> Real {
    let cache = CONSTANTS.get_or_init(|| RwLock::new(FxHashMap::default()));

    if let Some(value) = cache.read().get(&(kind, digits)) {
        return value.clone();
    }

    let value = compute(digits);
    cache.write().insert((kind, digits), value.clone());
    value
}

/// Returns true once `term` no longer affects a sum of magnitude `scale`.
fn negligible(term: &Real, scale: i64, digits: usize) -> bool {
    term.is_zero() || term.magnitude() < scale.saturating_sub(digits as i64 + 2)
}

/// Sums `t + t^3/3 + t^5/5 + ...`, alternating signs when requested.
///
/// This is `atanh(t)` or `atan(t)` for `|t| < 1`.
fn odd_power_series(t: &Real, alternating: bool, digits: usize) -> Real {
    if t.is_zero() {
        return Real::zero(digits);
    }

    let t = t.with_precision(digits);
    let t2 = &t * &t;
    let scale = t.magnitude();
    let mut power = t.clone();
    let mut sum = t;
    let mut k: i64 = 1;

    loop {
        power = &power * &t2;
        if negligible(&power, scale, digits) {
            break;
        }
        let term = power.div_int(2 * k + 1);
        sum = if alternating && k % 2 == 1 {
            &sum - &term
        } else {
            &sum + &term
        };
        k += 1;
    }

    sum
}

fn reciprocal_of(n: i64, digits: usize) -> Real {
    Real::one(digits).div_int(n)
}

/// Returns pi to `digits` significant digits.
#[must_use]
pub fn pi(digits: usize) -> Real {
    cached(Cached::Pi, digits, |digits| {
        // Machin: pi = 16 atan(1/5) - 4 atan(1/239)
        let wp = digits + EXTRA_DIGITS;
        let a = odd_power_series(&reciprocal_of(5, wp), true, wp).mul_int(16);
        let b = odd_power_series(&reciprocal_of(239, wp), true, wp).mul_int(4);
        (&a - &b).with_precision(digits)
    })
}

/// Returns ln 2 to `digits` significant digits.
#[must_use]
pub fn ln2(digits: usize) -> Real {
    cached(Cached::Ln2, digits, |digits| {
        let wp = digits + EXTRA_DIGITS;
        odd_power_series(&reciprocal_of(3, wp), false, wp)
            .mul_int(2)
            .with_precision(digits)
    })
}

/// Returns ln 10 to `digits` significant digits.
#[must_use]
pub fn ln10(digits: usize) -> Real {
    cached(Cached::Ln10, digits, |digits| {
        // 10 = 2^3 * 5/4, and ln(5/4) = 2 atanh(1/9)
        let wp = digits + EXTRA_DIGITS;
        let ln_five_quarters = odd_power_series(&reciprocal_of(9, wp), false, wp).mul_int(2);
        (&ln2(wp).mul_int(3) + &ln_five_quarters).with_precision(digits)
    })
}

/// Returns Euler's number to `digits` significant digits.
#[must_use]
pub fn e(digits: usize) -> Real {
    Real::one(digits + EXTRA_DIGITS)
        .exp()
        .map_or_else(|| Real::zero(digits), |v| v.with_precision(digits))
}

impl Real {
    /// Computes `e^self`.
    ///
    /// Returns `None` when the result exceeds the representable range;
    /// large negative arguments underflow to zero.
    #[must_use]
    pub fn exp(&self) -> Option<Self> {
        let digits = self.precision();
        if self.is_zero() {
            return Some(Self::one(digits));
        }

        let limit = Self::from_i64(EXP_LIMIT, digits);
        if self.abs() > limit {
            return if self.is_negative() {
                Some(Self::zero(digits))
            } else {
                None
            };
        }

        // Halve the argument until it is small, sum the series, square back.
        let int_bits = self.abs().round_to_integer().bit_len();
        let halvings = int_bits + 8;
        let wp = digits + EXTRA_DIGITS + halvings / 3;

        let r = self.with_precision(wp).div_int(1_i64 << halvings);
        let one = Self::one(wp);
        let mut sum = one.clone();
        let mut term = one;
        let mut k: i64 = 1;
        loop {
            term = (&term * &r).div_int(k);
            if negligible(&term, 1, wp) {
                break;
            }
            sum = &sum + &term;
            k += 1;
        }

        for _ in 0..halvings {
            sum = &sum * &sum;
        }

        Some(sum.with_precision(digits))
    }

    /// Computes the natural logarithm, or `None` for non-positive values.
    #[must_use]
    pub fn ln(&self) -> Option<Self> {
        if self.is_negative() || self.is_zero() {
            return None;
        }

        let digits = self.precision();
        let wp = digits + EXTRA_DIGITS + 2;

        // Near one, the series in (x - 1)/(x + 1) converges fast and keeps
        // full relative accuracy.
        let delta = self.minus_one_exact(wp);
        if delta.is_zero() {
            return Some(Self::zero(digits));
        }
        if delta.magnitude() <= -2 {
            let x = self.with_precision(wp);
            let t = delta.quotient(&(&x + &Self::one(wp)));
            return Some(odd_power_series(&t, false, wp).mul_int(2).with_precision(digits));
        }

        // x = y * 10^m with 1 <= y < 10, then ln y = 64 ln(y^(1/64)).
        let m = self.magnitude() - 1;
        let mut y = Self::from_parts(self.significand().clone(), self.exponent() - m, wp);
        for _ in 0..6 {
            y = y.sqrt_abs();
        }
        let one = Self::one(wp);
        let t = (&y - &one).quotient(&(&y + &one));
        let ln_y = odd_power_series(&t, false, wp).mul_int(128);

        let result = &ln_y + &ln10(wp).mul_int(m);
        Some(result.with_precision(digits))
    }

    /// `self - 1`, computed exactly and then rounded to `digits`.
    fn minus_one_exact(&self, digits: usize) -> Self {
        let exponent = self.exponent();
        if exponent >= 0 {
            let whole = self.significand() * crate::real::pow10(exponent as usize);
            return Self::from_ibig(whole - IBig::ONE, digits);
        }
        let one = crate::real::pow10((-exponent) as usize);
        Self::from_parts(self.significand() - one, exponent, digits)
    }

    /// Computes `(sin self, cos self)`.
    #[must_use]
    pub fn sin_cos(&self) -> (Self, Self) {
        let digits = self.precision();
        if self.is_zero() {
            return (Self::zero(digits), Self::one(digits));
        }

        // Reducing modulo 2 pi cancels as many digits as the integer part has.
        let wp = digits + EXTRA_DIGITS + self.magnitude().max(0) as usize;
        let x = self.with_precision(wp);
        let two_pi = pi(wp).mul_int(2);
        let turns = x.quotient(&two_pi).round_to_integer();
        let reduced = &x - &(&two_pi * &Self::from_ibig(turns, wp));
        let r = reduced.div_int(8);
        let r2 = &r * &r;

        let mut sin = r.clone();
        let mut term = r;
        let mut k: i64 = 1;
        loop {
            term = -(&term * &r2).div_int((2 * k) * (2 * k + 1));
            if negligible(&term, 0, wp) {
                break;
            }
            sin = &sin + &term;
            k += 1;
        }

        let one = Self::one(wp);
        let mut cos = one.clone();
        let mut term = one.clone();
        let mut k: i64 = 1;
        loop {
            term = -(&term * &r2).div_int((2 * k - 1) * (2 * k));
            if negligible(&term, 1, wp) {
                break;
            }
            cos = &cos + &term;
            k += 1;
        }

        for _ in 0..3 {
            let doubled_sin = (&sin * &cos).mul_int(2);
            cos = &(&cos * &cos).mul_int(2) - &one;
            sin = doubled_sin;
        }

        (sin.with_precision(digits), cos.with_precision(digits))
    }

    /// Computes `(sinh self, cosh self)`, or `None` on overflow.
    #[must_use]
    pub fn sinh_cosh(&self) -> Option<(Self, Self)> {
        let digits = self.precision();
        if self.is_zero() {
            return Some((Self::zero(digits), Self::one(digits)));
        }

        // e^x - e^-x cancels about -log10|x| digits for small x.
        let cancelled = (-self.magnitude()).max(0) as usize;
        let wp = digits + EXTRA_DIGITS + cancelled;
        let ex = self.with_precision(wp).exp()?;
        let inv = Self::one(wp).quotient(&ex);
        let sinh = (&ex - &inv).div_int(2);
        let cosh = (&ex + &inv).div_int(2);
        Some((sinh.with_precision(digits), cosh.with_precision(digits)))
    }

    /// Computes the arctangent, in `(-pi/2, pi/2)`.
    #[must_use]
    pub fn atan(&self) -> Self {
        let digits = self.precision();
        if self.is_zero() {
            return Self::zero(digits);
        }

        let wp = digits + EXTRA_DIGITS;
        let one = Self::one(wp);
        let mut a = self.abs().with_precision(wp);
        let inverted = a > one;
        if inverted {
            a = one.quotient(&a);
        }

        // atan(a) = 2 atan(a / (1 + sqrt(1 + a^2)))
        for _ in 0..3 {
            let root = (&one + &(&a * &a)).sqrt_abs();
            a = a.quotient(&(&one + &root));
        }
        let mut result = odd_power_series(&a, true, wp).mul_int(8);

        if inverted {
            result = &pi(wp).div_int(2) - &result;
        }
        if self.is_negative() {
            result = -result;
        }
        result.with_precision(digits)
    }

    /// Computes the angle of the point `(x, y)`, in `(-pi, pi]`.
    #[must_use]
    pub fn atan2(y: &Self, x: &Self) -> Self {
        let digits = y.precision().max(x.precision());

        if x.is_zero() {
            return match y.signum() {
                0 => Self::zero(digits),
                1 => pi(digits).div_int(2),
                _ => -pi(digits).div_int(2),
            };
        }

        let base = y.quotient(x).atan();
        if !x.is_negative() {
            return base;
        }

        let pi = pi(digits + EXTRA_DIGITS);
        let shifted = if y.is_negative() {
            &base - &pi
        } else {
            &base + &pi
        };
        shifted.with_precision(digits)
    }
}
