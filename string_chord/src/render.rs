use image::{GrayImage, Luma};

use crate::{geometry::Segment, pins::PinTable, sequence::Sequence, Float};

const THREAD: Luma<u8> = Luma([0]);
const CANVAS: Luma<u8> = Luma([255]);

fn scaled_segment<S: Float>(
    pins: &PinTable<S>,
    from: usize,
    to: usize,
    scale: S,
) -> Option<Segment<S>> {
    let segment = pins.segment(from, to)?;
    Some(Segment::new(segment.start * scale, segment.end * scale))
}

fn blank_canvas<S: Float>(pins: &PinTable<S>, scale: u32) -> GrayImage {
    let side = pins.side() as u32 * scale;
    GrayImage::from_pixel(side, side, CANVAS)
}

fn scalar<S: Float>(scale: u32) -> S {
    <S as num_traits::NumCast>::from(scale).unwrap_or(S::ONE)
}

/// Draws the first `upto` chords of `sequence` as black lines on a white canvas
/// `scale` times the size of the working image.
pub fn render_lines<S: Float>(
    pins: &PinTable<S>,
    sequence: &Sequence,
    upto: usize,
    scale: u32,
) -> GrayImage {
    let mut canvas = blank_canvas(pins, scale);
    let factor = scalar::<S>(scale);
    for (from, to) in sequence.segments().take(upto) {
        if let Some(segment) = scaled_segment(pins, from, to, factor) {
            segment.draw(&mut canvas, THREAD);
        }
    }
    canvas
}

pub fn build_svg<S: Float>(
    pins: &PinTable<S>,
    sequence: &Sequence,
    line_thickness: f32,
) -> svg::Document {
    let side = pins.side();
    let mut doc = svg::Document::new()
        .set("viewBox", (0, 0, side, side))
        .add(
            svg::node::element::Rectangle::new()
                .set("width", side)
                .set("height", side)
                .set("fill", "white"),
        );
    for pin in pins.pins() {
        doc = doc.add(
            svg::node::element::Circle::new()
                .set("cx", pin.x)
                .set("cy", pin.y)
                .set("r", line_thickness)
                .set("fill", "black"),
        );
    }
    for (from, to) in sequence.segments() {
        let Some(segment) = pins.segment(from, to) else {
            continue;
        };
        doc = doc.add(
            svg::node::element::Line::new()
                .set("x1", format!("{:.4}", segment.start.x))
                .set("y1", format!("{:.4}", segment.start.y))
                .set("x2", format!("{:.4}", segment.end.x))
                .set("y2", format!("{:.4}", segment.end.y))
                .set("stroke", "black")
                .set("stroke-width", format!("{:.4}", line_thickness)),
        );
    }
    doc
}

/// Which chords close an animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramePlan {
    len: usize,
    stride: usize,
}

impl FramePlan {
    /// Plan for a sequence of `len` pins, stride `max(1, len / max_frames)`.
    pub fn new(len: usize, max_frames: usize) -> Self {
        Self {
            len,
            stride: (len / max_frames.max(1)).max(1),
        }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether the frame is emitted once chord `line` (1-based) is drawn. The last chord
    /// always closes a frame.
    pub fn emits(&self, line: usize) -> bool {
        line > 0 && line < self.len && (line % self.stride == 0 || line == self.len - 1)
    }

    pub fn frame_count(&self) -> usize {
        (1..self.len).filter(|&line| self.emits(line)).count()
    }
}

/// Canvases of a growing drawing, one per planned frame.
pub struct Frames<'a, S> {
    pins: &'a PinTable<S>,
    sequence: &'a Sequence,
    plan: FramePlan,
    canvas: GrayImage,
    factor: S,
    line: usize,
}

pub fn render_frames<'a, S: Float>(
    pins: &'a PinTable<S>,
    sequence: &'a Sequence,
    scale: u32,
    max_frames: usize,
) -> Frames<'a, S> {
    Frames {
        pins,
        sequence,
        plan: FramePlan::new(sequence.len(), max_frames),
        canvas: blank_canvas(pins, scale),
        factor: scalar(scale),
        line: 0,
    }
}

impl<S: Float> Frames<'_, S> {
    pub fn plan(&self) -> FramePlan {
        self.plan
    }
}

impl<S: Float> Iterator for Frames<'_, S> {
    type Item = GrayImage;

    fn next(&mut self) -> Option<Self::Item> {
        while self.line + 1 < self.sequence.len() {
            let (from, to) = (self.sequence[self.line], self.sequence[self.line + 1]);
            self.line += 1;
            if let Some(segment) = scaled_segment(self.pins, from, to, self.factor) {
                segment.draw(&mut self.canvas, THREAD);
            }
            if self.plan.emits(self.line) {
                return Some(self.canvas.clone());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verboser::Silent;

    #[test]
    fn frame_stride_is_capped() {
        let plan = FramePlan::new(3501, 50);
        assert_eq!(plan.stride(), 70);
        assert_eq!(plan.frame_count(), 50);
        assert!(plan.emits(3500));

        let plan = FramePlan::new(10, 50);
        assert_eq!(plan.stride(), 1);
        assert_eq!(plan.frame_count(), 9);

        let plan = FramePlan::new(1, 50);
        assert_eq!(plan.frame_count(), 0);
    }

    #[test]
    fn last_line_always_closes_a_frame() {
        let plan = FramePlan::new(105, 50);
        assert_eq!(plan.stride(), 2);
        assert!(plan.emits(104));
        assert!(!plan.emits(103));
        assert!(plan.emits(102));
    }

    #[test]
    fn lines_are_drawn_scaled() {
        let pins = PinTable::<f64>::circle(20, 4, &mut Silent);
        let sequence = Sequence::new(vec![0, 2]);
        let canvas = render_lines(&pins, &sequence, usize::MAX, 2);
        assert_eq!(canvas.dimensions(), (40, 40));
        // pin 0 at (19, 10) and pin 2 at (1, 10), a horizontal line at row 20
        assert_eq!(canvas.get_pixel(20, 20)[0], 0);
        assert_eq!(canvas.get_pixel(20, 5)[0], 255);

        let blank = render_lines(&pins, &sequence, 0, 2);
        assert!(blank.pixels().all(|pixel| pixel[0] == 255));
    }

    #[test]
    fn frames_follow_the_plan() {
        let pins = PinTable::<f32>::circle(20, 8, &mut Silent);
        let sequence = Sequence::new(vec![0, 3, 6, 1, 4, 7]);
        let frames: Vec<_> = render_frames(&pins, &sequence, 1, 2).collect();
        // stride 3: after lines 3 and 5
        assert_eq!(frames.len(), 2);
        assert_eq!(frames.last(), Some(&render_lines(&pins, &sequence, 5, 1)));
    }

    #[test]
    fn svg_has_a_line_per_chord() {
        let pins = PinTable::<f64>::circle(20, 8, &mut Silent);
        let sequence = Sequence::new(vec![0, 3, 6]);
        let svg = build_svg(&pins, &sequence, 0.5).to_string();
        assert_eq!(svg.matches("<line").count(), 2);
        assert_eq!(svg.matches("<circle").count(), 8);
    }
}
