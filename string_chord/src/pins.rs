use num_traits::AsPrimitive;

use crate::{
    geometry::{Point, Segment},
    grid::Grid,
    verboser::{Message, Verboser},
    Float,
};

/// Pins evenly spaced on the circle inscribed in a square image.
#[derive(Clone, Debug)]
pub struct PinTable<S> {
    pins: Vec<Point<S>>,
    side: usize,
}

impl<S: Float> PinTable<S> {
    /// Places `count` pins on the circle of radius `side / 2 - 1` centered in the image.
    /// Pin `k` sits at angle `2πk / count`, both coordinates floored to its pixel.
    pub fn circle(side: usize, count: usize, verboser: &mut impl Verboser) -> Self
    where
        usize: AsPrimitive<S>,
    {
        let side_s: S = side.as_();
        let count_s: S = count.as_();
        let center = side_s / S::TWO;
        let radius = center - S::ONE;
        let pins = (0..count)
            .map(|i| {
                verboser.verbose(Message::CreatingPin(i));
                let i_s: S = i.as_();
                let theta = S::TAU * i_s / count_s;
                Point {
                    x: (center + radius * theta.cos()).floor(),
                    y: (center + radius * theta.sin()).floor(),
                }
            })
            .collect();
        Self { pins, side }
    }

    pub fn pins(&self) -> &[Point<S>] {
        &self.pins
    }

    pub fn get(&self, pin: usize) -> Option<Point<S>> {
        self.pins.get(pin).copied()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn grid(&self) -> Grid {
        Grid::square(self.side)
    }

    /// Segment from pin `from` to pin `to`, if both exist.
    pub fn segment(&self, from: usize, to: usize) -> Option<Segment<S>> {
        Some(Segment::new(self.get(from)?, self.get(to)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verboser::Silent;

    #[test]
    fn pins_lie_on_the_circle() {
        let side = 200;
        let table = PinTable::<f64>::circle(side, 61, &mut Silent);
        assert_eq!(table.len(), 61);
        let center = Point { x: 100.0, y: 100.0 };
        for pin in table.pins() {
            // flooring moves a pin by less than one pixel along each axis
            let distance = pin.distance(&center);
            assert!((distance - 99.0).abs() < 2.0f64.sqrt(), "{pin:?} at {distance}");
            assert_eq!(pin.x, pin.x.floor());
            assert_eq!(pin.y, pin.y.floor());
        }
    }

    #[test]
    fn pins_are_distinct() {
        let table = PinTable::<f32>::circle(200, 61, &mut Silent);
        for (i, a) in table.pins().iter().enumerate() {
            for b in &table.pins()[i + 1..] {
                assert!(!a.aprox_eq(b));
            }
        }
    }

    #[test]
    fn first_pin_is_on_the_right() {
        let table = PinTable::<f64>::circle(100, 4, &mut Silent);
        assert_eq!(table.get(0), Some(Point { x: 99.0, y: 50.0 }));
        assert_eq!(table.get(2), Some(Point { x: 1.0, y: 50.0 }));
        assert_eq!(table.get(4), None);
    }
}
