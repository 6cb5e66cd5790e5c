use image::GrayImage;

use crate::{chord_cache::Footprint, darkness::Darkness, error::InvalidInput, grid::Grid};

/// Darkness of the source image that no drawn chord has accounted for yet.
///
/// Starts as `255 - source` per pixel and only ever decreases.
#[derive(Clone, Debug)]
pub struct Residual {
    pixels: Vec<u8>,
    grid: Grid,
}

impl Residual {
    pub fn from_pixels(grid: Grid, source: &[u8]) -> Result<Self, InvalidInput> {
        if grid.area() == 0 || source.is_empty() {
            return Err(InvalidInput::EmptyImage);
        }
        if !grid.is_square() {
            return Err(InvalidInput::NotSquare {
                width: grid.width,
                height: grid.height,
            });
        }
        if source.len() != grid.area() {
            return Err(InvalidInput::PixelCount {
                expected: grid.area(),
                actual: source.len(),
            });
        }
        Ok(Self {
            pixels: source.iter().map(|&pixel| 255 - pixel).collect(),
            grid,
        })
    }

    pub fn from_luma(image: &GrayImage) -> Result<Self, InvalidInput> {
        Self::from_pixels(
            Grid::new(image.height() as usize, image.width() as usize),
            image.as_raw(),
        )
    }

    /// Sum of the residual along `footprint`.
    pub fn score(&self, footprint: &Footprint) -> u64 {
        footprint
            .indexes()
            .iter()
            .map(|&index| self.pixels[index as usize] as u64)
            .sum()
    }

    /// Applies `darkness` to every pixel `footprint` crosses. A pixel crossed twice is
    /// relieved twice.
    pub fn relieve(&mut self, footprint: &Footprint, darkness: &impl Darkness) {
        for &index in footprint.indexes() {
            let pixel = &mut self.pixels[index as usize];
            *pixel = darkness.compute(*pixel);
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.grid.height && col < self.grid.width {
            Some(self.pixels[row * self.grid.width + col])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn total(&self) -> u64 {
        self.pixels.iter().map(|&pixel| pixel as u64).sum()
    }
}
