use core::fmt::{Debug, Display};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use num_traits::{CheckedAdd, CheckedSub, One, Zero};

/// A trait representing a capacity/flow type which is typically a signed integer.
///
/// Signed because excess at the source goes negative during preflow
/// initialisation and reverse residual edges carry negative flow.
pub trait Int:
    Copy
    + Sum<Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Ord
    + AddAssign
    + SubAssign
    + CheckedAdd
    + CheckedSub
    + Zero
    + One
    + Debug
    + Display
    + Default
{
}

impl Int for i32 {}

impl Int for i64 {}
