pub mod geometry {
    pub mod point;
    pub mod segment;

    pub use point::Point;
    pub use segment::Segment;
}

mod algorithm;
pub mod chord_cache;
pub mod darkness;
pub mod error;
mod float;
pub mod grid;
pub mod image;
pub mod pin_distancer;
pub mod pins;
pub mod recency;
pub mod render;
pub mod residual;
pub mod sequence;
pub mod settings;
pub mod verboser;

pub use algorithm::*;
pub use chord_cache::{ChordCache, Footprint};
pub use darkness::{Darkness, FlatDarkness};
pub use error::{Error, InvalidInput};
pub use float::Float;
pub use grid::Grid;
pub use pins::PinTable;
pub use residual::Residual;
pub use sequence::Sequence;
pub use settings::Settings;
