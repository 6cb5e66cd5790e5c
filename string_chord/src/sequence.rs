use std::{fmt, fs, num::ParseIntError, ops::Deref, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

/// Ordered pins a thread visits, seed pin first.
///
/// Its text form is the pin indexes separated by commas: `0,150,12`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence(Vec<usize>);

impl Sequence {
    pub fn new(pins: Vec<usize>) -> Self {
        Self(pins)
    }

    pub fn pins(&self) -> &[usize] {
        &self.0
    }

    /// Consecutive `(from, to)` pin pairs, one per drawn chord.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = (usize, usize)> + '_ {
        self.0.windows(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn lines(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> crate::error::Result<()> {
        Ok(fs::write(path, self.to_string())?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Ok(fs::read_to_string(path)?.parse()?)
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl From<Vec<usize>> for Sequence {
    fn from(pins: Vec<usize>) -> Self {
        Self(pins)
    }
}

impl Deref for Sequence {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pins = self.0.iter();
        if let Some(first) = pins.next() {
            write!(f, "{first}")?;
            for pin in pins {
                write!(f, ",{pin}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Sequence {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        s.split(',')
            .enumerate()
            .map(|(position, item)| {
                item.trim()
                    .parse::<usize>()
                    .map_err(|source| ParseError::InvalidPin {
                        position,
                        item: item.to_owned(),
                        source,
                    })
            })
            .collect::<Result<_, _>>()
            .map(Self)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("The sequence is empty")]
    Empty,
    #[error("Item {position} ('{item}') is not a pin index")]
    InvalidPin {
        position: usize,
        item: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
