use std::{ops::Range, time::Instant};

use image::GrayImage;
use num_traits::AsPrimitive;
use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};

use crate::{
    chord_cache::ChordCache,
    darkness::FlatDarkness,
    error::{Error, InvalidInput},
    grid::Grid,
    pins::PinTable,
    recency::RecencyWindow,
    residual::Residual,
    sequence::Sequence,
    settings::Settings,
    verboser::{Message, Verboser},
    Float,
};

/// Pin every sequence starts from.
pub const SEED_PIN: usize = 0;

/// Runs a whole generation on a prepared (square, masked, grayscale) image.
#[tracing::instrument(skip_all, fields(pins = settings.pins, side = image.width()))]
pub fn compute<S: Float>(
    image: &GrayImage,
    settings: &Settings,
    verboser: &mut impl Verboser,
) -> Result<Generation<S>, Error>
where
    usize: AsPrimitive<S>,
{
    compute_until(image, settings, None, verboser)
}

/// Like [`compute`], but stops selecting once `deadline` has passed. The sequence built so
/// far is returned as a valid, shorter result.
pub fn compute_until<S: Float>(
    image: &GrayImage,
    settings: &Settings,
    deadline: Option<Instant>,
    verboser: &mut impl Verboser,
) -> Result<Generation<S>, Error>
where
    usize: AsPrimitive<S>,
{
    settings.validate()?;
    let residual = Residual::from_luma(image)?;
    let table = PinTable::circle(residual.grid().width, settings.pins, verboser);
    let cache = ChordCache::bake(&table, settings.min_distance, verboser)?;
    let mut selector = Selector::new(&cache, residual, settings)?;
    let termination = match deadline {
        Some(deadline) => selector.run_until(deadline, verboser),
        None => selector.run(verboser),
    };
    Ok(Generation {
        pins: table,
        sequence: selector.into_sequence(),
        termination,
    })
}

/// Outcome of a generation: the pin sequence plus the geometry needed to draw it.
pub struct Generation<S> {
    pins: PinTable<S>,
    sequence: Sequence,
    termination: Termination,
}

impl<S: Float> Generation<S> {
    pub fn pins(&self) -> &PinTable<S> {
        &self.pins
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn grid(&self) -> Grid {
        self.pins.grid()
    }

    pub fn into_parts(self) -> (PinTable<S>, Sequence) {
        (self.pins, self.sequence)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The round budget was used up.
    MaxLines,
    /// No pin could be reached by a chord crossing any remaining darkness.
    NoCandidate,
    /// An external deadline expired.
    Deadline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Initialized,
    Selecting,
    Terminated(Termination),
}

/// Greedy chord selector.
///
/// Each round scans the partners of the current pin in ascending offset order, skips the
/// recently visited ones, and moves to the partner whose chord crosses the most residual.
/// The first partner wins ties, and a chord must cross some residual to be chosen at all.
pub struct Selector<'a> {
    cache: &'a ChordCache,
    residual: Residual,
    darkness: FlatDarkness,
    window: RecencyWindow,
    sequence: Vec<usize>,
    current: usize,
    max_lines: usize,
    progress_interval: usize,
    state: State,
    batches: Vec<Batch>,
}

impl<'a> Selector<'a> {
    pub fn new(
        cache: &'a ChordCache,
        residual: Residual,
        settings: &Settings,
    ) -> Result<Self, InvalidInput> {
        if residual.grid() != cache.grid() {
            return Err(InvalidInput::GridMismatch {
                residual: residual.grid().width,
                cache: cache.grid().width,
            });
        }
        if settings.recency_window > cache.pin_count() {
            return Err(InvalidInput::RecencyWindow {
                window: settings.recency_window,
                pins: cache.pin_count(),
            });
        }
        Ok(Self {
            cache,
            residual,
            darkness: FlatDarkness(settings.line_weight),
            window: RecencyWindow::new(settings.recency_window, SEED_PIN),
            sequence: vec![SEED_PIN],
            current: SEED_PIN,
            max_lines: settings.max_lines,
            progress_interval: settings.progress_interval,
            state: State::Initialized,
            batches: Batch::new(),
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    pub fn residual(&self) -> &Residual {
        &self.residual
    }

    pub fn into_sequence(self) -> Sequence {
        Sequence::from(self.sequence)
    }

    /// Selects one more pin. Returns `None` once the selector has terminated.
    pub fn step(&mut self) -> Option<usize> {
        if let State::Terminated(_) = self.state {
            return None;
        }
        if self.lines() >= self.max_lines {
            self.state = State::Terminated(Termination::MaxLines);
            return None;
        }
        self.state = State::Selecting;

        let Some(next) = self.best_candidate() else {
            self.state = State::Terminated(Termination::NoCandidate);
            return None;
        };
        if let Some(footprint) = self.cache.footprint(self.current, next.pin) {
            self.residual.relieve(footprint, &self.darkness);
        }
        self.sequence.push(next.pin);
        self.window.push(next.pin);
        self.current = next.pin;
        Some(next.pin)
    }

    /// Selects until termination.
    pub fn run(&mut self, verboser: &mut impl Verboser) -> Termination {
        self.run_while(verboser, || true)
    }

    /// Selects until termination or until `deadline` passes, whichever comes first.
    pub fn run_until(&mut self, deadline: Instant, verboser: &mut impl Verboser) -> Termination {
        let termination = self.run_while(verboser, || Instant::now() < deadline);
        if termination == Termination::Deadline {
            tracing::warn!(lines = self.lines(), "deadline reached, sequence cut short");
        }
        termination
    }

    fn run_while(
        &mut self,
        verboser: &mut impl Verboser,
        mut keep_going: impl FnMut() -> bool,
    ) -> Termination {
        loop {
            if let State::Terminated(termination) = self.state {
                verboser.verbose(Message::Finished(self.lines()));
                return termination;
            }
            if !keep_going() {
                self.state = State::Terminated(Termination::Deadline);
                continue;
            }
            if self.step().is_some()
                && self.progress_interval != 0
                && self.lines() % self.progress_interval == 0
            {
                verboser.verbose(Message::Computing(self.lines(), self.max_lines));
            }
        }
    }

    fn lines(&self) -> usize {
        self.sequence.len() - 1
    }

    fn best_candidate(&mut self) -> Option<Candidate> {
        let cache = self.cache;
        let residual = &self.residual;
        let window = &self.window;
        let current = self.current;
        let batches = &mut self.batches;
        let distancer = cache.distancer();
        let offsets = distancer.offsets();
        let range = *offsets.start()..*offsets.end() + 1;
        let chunk_size = range.len().div_ceil(batches.len());
        for (index, batch) in batches.iter_mut().enumerate() {
            let start = (range.start + index * chunk_size).min(range.end);
            batch.range = start..range.end.min(start + chunk_size);
        }

        batches.par_iter_mut().for_each(|batch| {
            batch.best = None;
            for offset in batch.range.clone() {
                let pin = distancer.partner(current, offset);
                if window.contains(pin) {
                    continue;
                }
                let Some(footprint) = cache.footprint(current, pin) else {
                    continue;
                };
                let score = residual.score(footprint);
                if score > batch.best.map_or(0, |best| best.score) {
                    batch.best = Some(Candidate { pin, score });
                }
            }
        });

        // Batches cover ascending offsets, so keeping the first strict maximum preserves the
        // sequential tie-break.
        let mut best: Option<Candidate> = None;
        for batch in batches.iter() {
            if let Some(candidate) = batch.best {
                if candidate.score > best.map_or(0, |best| best.score) {
                    best = Some(candidate);
                }
            }
        }
        best
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    pin: usize,
    score: u64,
}

struct Batch {
    range: Range<usize>,
    best: Option<Candidate>,
}

impl Batch {
    fn new() -> Vec<Self> {
        (0..num_cpus::get().max(1))
            .map(|_| Batch {
                range: 0..0,
                best: None,
            })
            .collect()
    }
}
