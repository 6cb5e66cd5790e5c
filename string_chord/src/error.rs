use crate::pin_distancer;

/// Problems with the input of a generation, raised before any work starts.
#[derive(Debug, thiserror::Error)]
pub enum InvalidInput {
    #[error("The image is empty")]
    EmptyImage,
    #[error("The image must be square, got {width}x{height}")]
    NotSquare { width: usize, height: usize },
    #[error("Expected {expected} pixels for the grid, got {actual}")]
    PixelCount { expected: usize, actual: usize },
    #[error("The image side {0} is too large to index its pixels")]
    TooLarge(usize),
    #[error("Pin count must be at least 2, got {0}")]
    PinCount(usize),
    #[error(transparent)]
    Distance(#[from] pin_distancer::Error),
    #[error("Recency window of {window} pins exceeds the {pins} pins on the circle")]
    RecencyWindow { window: usize, pins: usize },
    #[error("Scale factor must be at least 1")]
    ScaleFactor,
    #[error("Maximum frame count must be at least 1")]
    MaxFrames,
    #[error(
        "The residual buffer is {residual}x{residual} but the chords were baked for {cache}x{cache}"
    )]
    GridMismatch { residual: usize, cache: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_is_transparent() {
        let err = Error::from(InvalidInput::NotSquare {
            width: 3,
            height: 4,
        });
        assert_eq!(err.to_string(), "The image must be square, got 3x4");
    }
}
