pub enum Message {
    CreatingPin(usize),
    Baking(usize, usize),
    Computing(usize, usize),
    Finished(usize),
}

pub trait Verboser {
    fn verbose(&mut self, message: Message);
}

pub struct Silent;

impl Verboser for Silent {
    fn verbose(&mut self, _: Message) {}
}

/// Forwards progress to `tracing` events.
pub struct Tracing;

impl Verboser for Tracing {
    fn verbose(&mut self, message: Message) {
        match message {
            Message::CreatingPin(pin) => tracing::trace!(pin, "placing pin"),
            Message::Baking(done, total) => tracing::debug!(done, total, "baking chords"),
            Message::Computing(round, max) => tracing::info!("Progress: {round}/{max} lines"),
            Message::Finished(lines) => tracing::info!(lines, "sequence complete"),
        }
    }
}
