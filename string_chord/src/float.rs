use std::{
    fmt::{Debug, Display},
    ops::{AddAssign, DivAssign, MulAssign, SubAssign},
};

use num_traits::{AsPrimitive, ConstOne, ConstZero};

/// Scalar used for pin coordinates and chord sampling.
pub trait Float:
    'static
    + Debug
    + Display
    + Sync
    + Send
    + Into<svg::node::Value>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + num_traits::Float
    + num_traits::NumCast
    + ConstZero
    + ConstOne
    + AsPrimitive<usize>
    + AsPrimitive<isize>
{
    const EPSILON: Self;
    const TWO: Self;
    /// Full turn, the angle spanned by the pin circle.
    const TAU: Self;
}

impl Float for f32 {
    const EPSILON: Self = f32::EPSILON;
    const TWO: Self = 2.0;
    const TAU: Self = core::f32::consts::TAU;
}

impl Float for f64 {
    const EPSILON: Self = f64::EPSILON;
    const TWO: Self = 2.0;
    const TAU: Self = core::f64::consts::TAU;
}
