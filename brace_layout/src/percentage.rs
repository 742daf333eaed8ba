use std::fmt;

/// A fraction of a reference dimension that is only known once a view is laid out inside its
/// container.
///
/// A `Percentage` never refers to a view. The reference dimension is picked by the layout intent
/// that consumes it (see [`Anchor`](crate::Anchor)), from the container of the view being
/// constrained.
///
/// The value is not clamped: `100` is the full reference span, negative values and values above
/// `100` are legal and scale below or beyond it.
///
/// # Examples
///
/// ```rust
/// use brace_layout::{as_percentage, Percent};
///
/// assert_eq!(as_percentage(50.0).value(), 50.0);
/// assert_eq!(25_u8.percent(), as_percentage(25.0));
/// assert_eq!(as_percentage(20.0).to_string(), "20%");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage {
    value: f64,
}

impl Percentage {
    /// The whole reference span.
    pub const HUNDRED: Self = Self::new(100.0);

    pub const fn new(value: f64) -> Self {
        Self { value }
    }

    /// The wrapped number, exactly as it was given.
    pub const fn value(self) -> f64 {
        self.value
    }

    /// The factor to multiply the reference attribute with, `value / 100`.
    pub fn multiplier(self) -> f64 {
        self.value / 100.0
    }

    /// The remaining share of the reference span, `100 - value`.
    pub fn complement(self) -> Self {
        Self::new(100.0 - self.value)
    }

    /// Whether this is exactly the whole reference span.
    #[allow(clippy::float_cmp)]
    pub fn is_full(self) -> bool {
        self.value == 100.0
    }
}

/// Marks a plain number as a percentage of the container.
pub const fn as_percentage(n: f64) -> Percentage {
    Percentage::new(n)
}

impl From<Percentage> for f64 {
    fn from(percentage: Percentage) -> Self {
        percentage.value
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.value)
    }
}

/// Turns numbers into [`Percentage`]s, `30_u8.percent()` reads as `30%`.
pub trait Percent {
    fn percent(self) -> Percentage;
}

impl Percent for f64 {
    fn percent(self) -> Percentage {
        Percentage::new(self)
    }
}

macro_rules! impl_percent {
    ($($ty:ty),*) => {
        $(
            impl Percent for $ty {
                fn percent(self) -> Percentage {
                    Percentage::new(f64::from(self))
                }
            }
        )*
    };
}

impl_percent!(f32, i32, u32, i16, u16, i8, u8);

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0)]
    #[case(50.0)]
    #[case(100.0)]
    #[case(-25.0)]
    #[case(250.0)]
    #[case(33.333_333)]
    #[case(f64::MAX)]
    fn wrapping_is_lossless(#[case] n: f64) {
        assert_eq!(as_percentage(n).value(), n);
        assert_eq!(f64::from(as_percentage(n)), n);
    }

    #[test]
    fn wrapping_keeps_nan() {
        assert!(as_percentage(f64::NAN).value().is_nan());
    }

    #[test]
    fn percent_literals() {
        assert_eq!(50_i32.percent(), as_percentage(50.0));
        assert_eq!(12.5_f32.percent(), as_percentage(12.5));
        assert_eq!((-10_i8).percent(), as_percentage(-10.0));
        assert_eq!(200_u16.percent(), as_percentage(200.0));
    }

    #[rstest]
    #[case(50.0, 0.5)]
    #[case(20.0, 0.2)]
    #[case(100.0, 1.0)]
    #[case(0.0, 0.0)]
    #[case(-50.0, -0.5)]
    fn multiplier(#[case] n: f64, #[case] expected: f64) {
        assert_eq!(as_percentage(n).multiplier(), expected);
    }

    #[test]
    fn complement() {
        assert_eq!(as_percentage(25.0).complement(), as_percentage(75.0));
        assert_eq!(as_percentage(100.0).complement(), as_percentage(0.0));
        assert_eq!(as_percentage(120.0).complement(), as_percentage(-20.0));
    }

    #[test]
    fn full() {
        assert!(Percentage::HUNDRED.is_full());
        assert!(!as_percentage(99.999).is_full());
        assert!(!as_percentage(0.0).is_full());
    }

    #[test]
    fn to_string() {
        assert_eq!(as_percentage(50.0).to_string(), "50%");
        assert_eq!(as_percentage(12.5).to_string(), "12.5%");
        assert_eq!(as_percentage(-3.0).to_string(), "-3%");
    }
}
