use bresenham::Bresenham;
use image::GenericImage;

use super::Point;
use crate::Float;

/// Straight chord between two pins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment<T> {
    pub start: Point<T>,
    pub end: Point<T>,
}

impl<T> Segment<T> {
    pub fn new(start: Point<T>, end: Point<T>) -> Self {
        Self { start, end }
    }
}

impl<T: Float> Segment<T> {
    pub fn length(&self) -> T {
        self.start.distance(&self.end)
    }

    /// Samples `floor(length)` points from `start` towards `end` (the end itself excluded),
    /// flooring each one to its pixel.
    pub fn sample_floor(&self) -> impl Iterator<Item = Point<isize>> + '_ {
        let steps = self.length().floor();
        let samples: usize = steps.as_();
        (0..samples).map(move |k| {
            let t = <T as num_traits::NumCast>::from(k).unwrap_or(T::ZERO) / steps;
            self.start.lerp(&self.end, t).floor().as_()
        })
    }

    /// Pixels of the 1-px line between the floored endpoints, both ends included.
    pub fn pixels(&self) -> impl Iterator<Item = Point<isize>> {
        let start: Point<isize> = self.start.floor().as_();
        let end: Point<isize> = self.end.floor().as_();
        Bresenham::new((start.x, start.y), (end.x, end.y))
            .map(|(x, y)| Point { x, y })
            .chain(std::iter::once(end))
    }

    /// Paints the line onto `img`, dropping pixels that fall outside of it.
    pub fn draw<I: GenericImage>(&self, img: &mut I, pixel: I::Pixel) {
        let (width, height) = img.dimensions();
        for point in self.pixels() {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if x < width && y < height {
                img.put_pixel(x, y, pixel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};

    use super::*;

    #[test]
    fn samples_floor_towards_end() {
        let segment = Segment::new(Point { x: 0.0f64, y: 0.0 }, Point { x: 4.0, y: 2.0 });
        // length sqrt(20) = 4.47.., four samples at t = 0, 1/4, 2/4, 3/4
        let points: Vec<_> = segment.sample_floor().collect();
        assert_eq!(
            points,
            vec![
                Point { x: 0, y: 0 },
                Point { x: 1, y: 0 },
                Point { x: 2, y: 1 },
                Point { x: 3, y: 1 },
            ]
        );
    }

    #[test]
    fn degenerate_segment_has_no_samples() {
        let segment = Segment::new(Point { x: 2.0f32, y: 2.0 }, Point { x: 2.5, y: 2.5 });
        assert_eq!(segment.sample_floor().count(), 0);
    }

    #[test]
    fn drawing_clips_to_the_canvas() {
        let mut canvas = GrayImage::from_pixel(4, 4, Luma([255]));
        let segment = Segment::new(Point { x: -2.0f64, y: 1.0 }, Point { x: 6.0, y: 1.0 });
        segment.draw(&mut canvas, Luma([0]));
        for x in 0..4 {
            assert_eq!(canvas.get_pixel(x, 1)[0], 0);
            assert_eq!(canvas.get_pixel(x, 0)[0], 255);
        }
    }
}
