/// How much residual a drawn chord leaves behind on each pixel it crosses.
pub trait Darkness: Send + Sync {
    /// New residual for a pixel holding `residual`. Must not exceed `residual`.
    fn compute(&self, residual: u8) -> u8;
}

/// Subtracts a fixed weight, floored at zero.
#[derive(Clone, Copy, Debug)]
pub struct FlatDarkness(pub u8);

impl Darkness for FlatDarkness {
    fn compute(&self, residual: u8) -> u8 {
        residual.saturating_sub(self.0)
    }
}
