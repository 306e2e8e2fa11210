//! The transforms and their permanent ids.

use ramanujan_precision::Number;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TransformError;

/// Identifies a transform in stored results.
///
/// Ids are permanent. `Identity` is always 0, which doubles as "no
/// transform was applied".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
#[allow(missing_docs)]
pub enum TransformId {
    Identity = 0,
    Inverse = 1,
    Squared = 2,
    Cubed = 3,
    Quartic = 4,
    Quintic = 5,
    Sextic = 6,
    Heptic = 7,
    SquaredInverse = 8,
    CubicInverse = 9,
    QuarticInverse = 10,
    QuinticInverse = 11,
    SexticInverse = 12,
    HepticInverse = 13,
    Sqrt = 14,
    SqrtInverse = 15,
    Sin = 16,
    Cos = 17,
    Tan = 18,
    Cot = 19,
    Exp = 20,
    Ln = 21,
    SinInverse = 22,
    CosInverse = 23,
    TanInverse = 24,
    CotInverse = 25,
    ExpInverse = 26,
    LnInverse = 27,
}

impl TransformId {
    /// All transforms, in id order.
    pub const ALL: [Self; 28] = [
        Self::Identity,
        Self::Inverse,
        Self::Squared,
        Self::Cubed,
        Self::Quartic,
        Self::Quintic,
        Self::Sextic,
        Self::Heptic,
        Self::SquaredInverse,
        Self::CubicInverse,
        Self::QuarticInverse,
        Self::QuinticInverse,
        Self::SexticInverse,
        Self::HepticInverse,
        Self::Sqrt,
        Self::SqrtInverse,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Cot,
        Self::Exp,
        Self::Ln,
        Self::SinInverse,
        Self::CosInverse,
        Self::TanInverse,
        Self::CotInverse,
        Self::ExpInverse,
        Self::LnInverse,
    ];

    /// Returns the stable numeric id.
    #[must_use]
    pub const fn type_id(self) -> u8 {
        self as u8
    }

    /// Looks up a transform by its numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::UnknownId`] if no transform has this id.
    pub fn from_type_id(id: u8) -> Result<Self, TransformError> {
        Self::ALL
            .get(usize::from(id))
            .copied()
            .ok_or(TransformError::UnknownId(id))
    }

    /// True for the identity transform.
    #[must_use]
    pub const fn is_identity(self) -> bool {
        matches!(self, Self::Identity)
    }

    /// Returns the transform's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Inverse => "inverse",
            Self::Squared => "squared",
            Self::Cubed => "cubed",
            Self::Quartic => "quartic",
            Self::Quintic => "quintic",
            Self::Sextic => "sextic",
            Self::Heptic => "heptic",
            Self::SquaredInverse => "squared_inverse",
            Self::CubicInverse => "cubic_inverse",
            Self::QuarticInverse => "quartic_inverse",
            Self::QuinticInverse => "quintic_inverse",
            Self::SexticInverse => "sextic_inverse",
            Self::HepticInverse => "heptic_inverse",
            Self::Sqrt => "sqrt",
            Self::SqrtInverse => "sqrt_inverse",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Cot => "cot",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::SinInverse => "sin_inverse",
            Self::CosInverse => "cos_inverse",
            Self::TanInverse => "tan_inverse",
            Self::CotInverse => "cot_inverse",
            Self::ExpInverse => "exp_inverse",
            Self::LnInverse => "ln_inverse",
        }
    }

    /// Returns the function implementing this transform.
    #[must_use]
    pub fn function(self) -> TransformFn {
        match self {
            Self::Identity => identity,
            Self::Inverse => Number::recip,
            Self::Squared => |x| x.powi(2),
            Self::Cubed => |x| x.powi(3),
            Self::Quartic => |x| x.powi(4),
            Self::Quintic => |x| x.powi(5),
            Self::Sextic => |x| x.powi(6),
            Self::Heptic => |x| x.powi(7),
            Self::SquaredInverse => |x| x.powi(2).recip(),
            Self::CubicInverse => |x| x.powi(3).recip(),
            Self::QuarticInverse => |x| x.powi(4).recip(),
            Self::QuinticInverse => |x| x.powi(5).recip(),
            Self::SexticInverse => |x| x.powi(6).recip(),
            Self::HepticInverse => |x| x.powi(7).recip(),
            Self::Sqrt => Number::real_sqrt,
            Self::SqrtInverse => |x| x.real_sqrt().recip(),
            Self::Sin => Number::sin,
            Self::Cos => Number::cos,
            Self::Tan => Number::tan,
            Self::Cot => Number::cot,
            Self::Exp => Number::exp,
            Self::Ln => Number::ln,
            Self::SinInverse => |x| x.sin().recip(),
            Self::CosInverse => |x| x.cos().recip(),
            Self::TanInverse => |x| x.tan().recip(),
            Self::CotInverse => |x| x.cot().recip(),
            Self::ExpInverse => |x| x.exp().recip(),
            Self::LnInverse => |x| x.ln().recip(),
        }
    }

    /// Applies the transform.
    #[must_use]
    pub fn apply(self, x: &Number) -> Number {
        (self.function())(x)
    }

    /// Renders `expr` with this transform applied, e.g. `sin(expr)` or `1/(expr)^2`.
    #[must_use]
    pub fn render(self, expr: &str) -> String {
        match self {
            Self::Identity => expr.to_string(),
            Self::Inverse => format!("1/({expr})"),
            Self::Squared => format!("({expr})^2"),
            Self::Cubed => format!("({expr})^3"),
            Self::Quartic => format!("({expr})^4"),
            Self::Quintic => format!("({expr})^5"),
            Self::Sextic => format!("({expr})^6"),
            Self::Heptic => format!("({expr})^7"),
            Self::SquaredInverse => format!("1/({expr})^2"),
            Self::CubicInverse => format!("1/({expr})^3"),
            Self::QuarticInverse => format!("1/({expr})^4"),
            Self::QuinticInverse => format!("1/({expr})^5"),
            Self::SexticInverse => format!("1/({expr})^6"),
            Self::HepticInverse => format!("1/({expr})^7"),
            Self::Sqrt => format!("sqrt({expr})"),
            Self::SqrtInverse => format!("1/sqrt({expr})"),
            Self::Sin => format!("sin({expr})"),
            Self::Cos => format!("cos({expr})"),
            Self::Tan => format!("tan({expr})"),
            Self::Cot => format!("cot({expr})"),
            Self::Exp => format!("exp({expr})"),
            Self::Ln => format!("ln({expr})"),
            Self::SinInverse => format!("1/sin({expr})"),
            Self::CosInverse => format!("1/cos({expr})"),
            Self::TanInverse => format!("1/tan({expr})"),
            Self::CotInverse => format!("1/cot({expr})"),
            Self::ExpInverse => format!("1/exp({expr})"),
            Self::LnInverse => format!("1/ln({expr})"),
        }
    }
}

/// Signature of a transform function.
pub type TransformFn = fn(&Number) -> Number;

fn identity(x: &Number) -> Number {
    x.clone()
}

impl TryFrom<u8> for TransformId {
    type Error = TransformError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_type_id(value)
    }
}

impl From<TransformId> for u8 {
    fn from(value: TransformId) -> Self {
        value.type_id()
    }
}

impl fmt::Display for TransformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
