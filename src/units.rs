use derive_more::{Add, AddAssign, Display, From, Into, Sub, SubAssign, Sum};

/// A length on the canvas, measured in device pixels. Fractional values are kept
/// throughout layout so that measurement and painting agree exactly; only the canvas
/// height is ever rounded.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    From,
    Into,
    Display,
)]
pub struct Px(pub f32);

impl Px {
    pub const ZERO: Px = Px(0.0);

    /// The larger of two lengths
    pub fn max(self, other: Px) -> Px {
        Px(self.0.max(other.0))
    }

    /// The smaller of two lengths
    pub fn min(self, other: Px) -> Px {
        Px(self.0.min(other.0))
    }

    /// Round up to the next whole pixel
    pub fn ceil(self) -> u32 {
        self.0.max(0.0).ceil() as u32
    }
}

impl std::ops::Mul<f32> for Px {
    type Output = Px;

    fn mul(self, rhs: f32) -> Px {
        Px(self.0 * rhs)
    }
}

impl std::ops::MulAssign<f32> for Px {
    fn mul_assign(&mut self, rhs: f32) {
        self.0 *= rhs;
    }
}

impl std::ops::Div<f32> for Px {
    type Output = Px;

    fn div(self, rhs: f32) -> Px {
        Px(self.0 / rhs)
    }
}

impl From<u32> for Px {
    fn from(value: u32) -> Self {
        Px(value as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_stays_in_pixels() {
        let mut width = Px(42.0) * 2.0 + Px(6.0);
        width -= Px(10.0);
        assert_eq!(width, Px(80.0));
        assert_eq!(width / 4.0, Px(20.0));
        assert_eq!([Px(1.5), Px(2.5)].into_iter().sum::<Px>(), Px(4.0));
    }

    #[test]
    fn height_rounds_up() {
        assert_eq!(Px(1999.2).ceil(), 2000);
        assert_eq!(Px(-3.0).ceil(), 0);
        assert_eq!(Px::from(1080u32).max(Px(2.0)), Px(1080.0));
    }
}
