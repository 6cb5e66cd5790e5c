use std::ops::RangeInclusive;

use thiserror::Error;

/// Minimum circular distance rule between the two pins of a chord.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinDistancer {
    count: usize,
    min: usize,
}

impl PinDistancer {
    pub fn new(count: usize, distance: usize) -> Result<Self, Error> {
        if distance == 0 {
            Err(Error::Zero)
        } else if count < 2 * distance {
            Err(Error::TooFar(count / 2))
        } else {
            Ok(Self {
                count,
                min: distance,
            })
        }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn circular_distance(&self, a_idx: usize, b_idx: usize) -> usize {
        let diff = a_idx.abs_diff(b_idx);
        diff.min(self.count - diff)
    }

    //NOTE: This does not check if a_idx and b_idx are inside bounds.
    pub fn is_valid(&self, a_idx: usize, b_idx: usize) -> bool {
        self.circular_distance(a_idx, b_idx) >= self.min
    }

    /// Forward offsets reaching every valid partner of a pin exactly once, ascending.
    pub fn offsets(&self) -> RangeInclusive<usize> {
        self.min..=self.count - self.min
    }

    pub fn partner(&self, pin: usize, offset: usize) -> usize {
        (pin + offset) % self.count
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("The minimum distance between pins must be at least 1.")]
    Zero,
    #[error("The minimum distance between pins must not exceed {0}.")]
    TooFar(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_impossible_distances() {
        assert!(matches!(PinDistancer::new(10, 0), Err(Error::Zero)));
        assert!(matches!(PinDistancer::new(10, 6), Err(Error::TooFar(5))));
        assert!(PinDistancer::new(10, 5).is_ok());
    }

    #[test]
    fn distance_wraps_around() {
        let distancer = PinDistancer::new(300, 30).unwrap();
        assert_eq!(distancer.circular_distance(0, 299), 1);
        assert_eq!(distancer.circular_distance(10, 280), 30);
        assert!(distancer.is_valid(10, 280));
        assert!(!distancer.is_valid(0, 299));
        assert!(!distancer.is_valid(7, 7));
    }

    #[test]
    fn offsets_reach_each_valid_partner_once() {
        let distancer = PinDistancer::new(12, 3).unwrap();
        for pin in 0..12 {
            let mut reached: Vec<_> = distancer
                .offsets()
                .map(|offset| distancer.partner(pin, offset))
                .collect();
            reached.sort_unstable();
            let expected: Vec<_> = (0..12).filter(|&p| distancer.is_valid(pin, p)).collect();
            assert_eq!(reached, expected);
        }
    }
}
