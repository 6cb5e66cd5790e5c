use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    error::InvalidInput,
    geometry::Segment,
    grid::Grid,
    pin_distancer::PinDistancer,
    pins::PinTable,
    verboser::{Message, Verboser},
    Float,
};

/// Pixels crossed by a chord, in drawing order, as flat indexes into the image grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Footprint {
    indexes: Vec<u32>,
}

impl Footprint {
    /// Samples `floor(length)` points along `segment` by linear interpolation, flooring each
    /// coordinate. Not an exact Bresenham line: short chords are biased towards lower pixels.
    pub fn rasterize<S: Float>(segment: &Segment<S>, grid: Grid) -> Self {
        Self {
            indexes: segment
                .sample_floor()
                .filter_map(|point| point.cast::<usize>())
                .filter_map(|point| grid.index_of(point))
                .map(|index| index as u32)
                .collect(),
        }
    }

    pub fn indexes(&self) -> &[u32] {
        &self.indexes
    }

    /// `(row, col)` of every pixel, in drawing order.
    pub fn coords(&self, grid: Grid) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.indexes
            .iter()
            .map(move |&index| grid.coords_of(index as usize))
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}

/// Footprint of every legal chord, baked once before selection starts.
///
/// Each unordered pair is rasterized a single time, from its lower pin to its higher one,
/// and registered under both `(a, b)` and `(b, a)` so lookups never normalize pair order.
pub struct ChordCache {
    footprints: Vec<Footprint>,
    slots: Vec<Option<u32>>,
    grid: Grid,
    distancer: PinDistancer,
}

impl ChordCache {
    pub fn bake<S: Float>(
        table: &PinTable<S>,
        min_distance: usize,
        verboser: &mut impl Verboser,
    ) -> Result<Self, InvalidInput> {
        let count = table.len();
        let distancer = PinDistancer::new(count, min_distance)?;
        let grid = table.grid();
        if grid.area() > u32::MAX as usize {
            return Err(InvalidInput::TooLarge(grid.width));
        }

        let pairs: Vec<(usize, usize)> = (0..count)
            .flat_map(|low| (low + 1..count).map(move |high| (low, high)))
            .filter(|&(low, high)| distancer.is_valid(low, high))
            .collect();
        verboser.verbose(Message::Baking(0, pairs.len()));

        let pins = table.pins();
        let footprints: Vec<Footprint> = pairs
            .par_iter()
            .map(|&(low, high)| Footprint::rasterize(&Segment::new(pins[low], pins[high]), grid))
            .collect();

        let mut slots = vec![None; count * count];
        for (slot, &(low, high)) in pairs.iter().enumerate() {
            slots[low * count + high] = Some(slot as u32);
            slots[high * count + low] = Some(slot as u32);
        }
        verboser.verbose(Message::Baking(pairs.len(), pairs.len()));
        tracing::debug!(
            chords = footprints.len(),
            pixels = footprints.iter().map(Footprint::len).sum::<usize>(),
            "baked chord footprints"
        );

        Ok(Self {
            footprints,
            slots,
            grid,
            distancer,
        })
    }

    /// Footprint of the chord between `a` and `b`, in either order. `None` when the pair
    /// breaks the minimum distance rule or a pin is out of range.
    pub fn footprint(&self, a: usize, b: usize) -> Option<&Footprint> {
        let count = self.pin_count();
        if a >= count || b >= count {
            return None;
        }
        self.slots[a * count + b].map(|slot| &self.footprints[slot as usize])
    }

    pub fn chord_count(&self) -> usize {
        self.footprints.len()
    }

    pub fn pin_count(&self) -> usize {
        self.distancer.count()
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn distancer(&self) -> &PinDistancer {
        &self.distancer
    }
}
