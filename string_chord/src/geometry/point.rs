use std::ops::Mul;

use num_traits::AsPrimitive;

use crate::Float;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Mul<T> for Point<T>
where
    T: Mul<Output = T> + Clone,
{
    type Output = Self;

    fn mul(self, scalar: T) -> Self {
        Point {
            x: self.x * scalar.clone(),
            y: self.y * scalar,
        }
    }
}

impl<T: Float> Point<T> {
    pub fn sq_distance(&self, other: &Self) -> T {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Self) -> T {
        num_traits::Float::sqrt(self.sq_distance(other))
    }

    pub fn aprox_eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < T::EPSILON && (self.y - other.y).abs() < T::EPSILON
    }

    pub fn floor(&self) -> Self {
        Self {
            x: self.x.floor(),
            y: self.y.floor(),
        }
    }

    /// Point at parameter `t` on the way from `self` to `other`.
    pub fn lerp(&self, other: &Self, t: T) -> Self {
        Self {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
        }
    }
}

impl<S: num_traits::NumCast> Point<S> {
    pub fn cast<I: num_traits::NumCast>(self) -> Option<Point<I>> {
        num_traits::cast(self.x).and_then(|x| num_traits::cast(self.y).map(|y| Point { x, y }))
    }
}

impl<S> Point<S> {
    pub fn as_<I: Copy + 'static>(self) -> Point<I>
    where
        S: AsPrimitive<I>,
    {
        Point {
            x: self.x.as_(),
            y: self.y.as_(),
        }
    }
}
