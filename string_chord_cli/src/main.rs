use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use num_traits::AsPrimitive;
use string_chord::{render, verboser, Float, Settings};
use tracing_subscriber::EnvFilter;

mod animation;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image path.
    input: PathBuf,

    /// Output image path.
    output: PathBuf,

    /// Optional file to save the pin sequence to.
    sequence: Option<PathBuf>,

    /// Animate the drawing, chord by chord.
    #[arg(short, long)]
    animate: bool,

    /// JSON file with generation settings. Flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of pins around the circle.
    #[arg(short, long)]
    pins: Option<usize>,

    /// Minimum pin count between linked pins.
    #[arg(long)]
    min_distance: Option<usize>,

    /// Maximum number of lines to draw.
    #[arg(short = 'l', long)]
    max_lines: Option<usize>,

    /// Darkness removed along every drawn line.
    #[arg(short = 'w', long)]
    line_weight: Option<u8>,

    /// Number of recently visited pins that can not be visited again.
    #[arg(long)]
    recency_window: Option<usize>,

    /// Scale factor of the output image.
    #[arg(short, long)]
    scale: Option<u32>,

    /// Maximum frames of the animation.
    #[arg(long)]
    max_frames: Option<usize>,

    /// Also save the result as an SVG drawing.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Stop selecting lines after this many seconds, keeping what was found.
    #[arg(long)]
    timeout: Option<f64>,

    /// Precision of calculations (Single/Double).
    #[arg(long, value_enum, default_value_t = Precision::Double)]
    precision: Precision,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Precision {
    #[value(alias = "f32")]
    Single,
    #[value(alias = "f64")]
    Double,
}

impl Args {
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => read_settings(path)?,
            None => Settings::default(),
        };
        if let Some(pins) = self.pins {
            settings.pins = pins;
        }
        if let Some(min_distance) = self.min_distance {
            settings.min_distance = min_distance;
        }
        if let Some(max_lines) = self.max_lines {
            settings.max_lines = max_lines;
        }
        if let Some(line_weight) = self.line_weight {
            settings.line_weight = line_weight;
        }
        if let Some(recency_window) = self.recency_window {
            settings.recency_window = recency_window;
        }
        if let Some(scale) = self.scale {
            settings.scale_factor = scale;
        }
        if let Some(max_frames) = self.max_frames {
            settings.max_frames = max_frames;
        }
        settings.validate().context("invalid settings")?;
        Ok(settings)
    }

    fn deadline(&self, now: Instant) -> anyhow::Result<Option<Instant>> {
        let Some(secs) = self.timeout else {
            return Ok(None);
        };
        let timeout = Duration::try_from_secs_f64(secs)
            .with_context(|| format!("invalid timeout of {secs} seconds"))?;
        let deadline = now
            .checked_add(timeout)
            .with_context(|| format!("timeout of {secs} seconds is out of range"))?;
        Ok(Some(deadline))
    }
}

fn read_settings(path: &Path) -> anyhow::Result<Settings> {
    let f = File::open(path).with_context(|| format!("open settings '{}'", path.display()))?;
    let settings: Settings =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse settings JSON")?;
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let settings = args.settings()?;
    match args.precision {
        Precision::Single => run::<f32>(&args, &settings),
        Precision::Double => run::<f64>(&args, &settings),
    }
}

fn run<S: Float>(args: &Args, settings: &Settings) -> anyhow::Result<()>
where
    usize: AsPrimitive<S>,
{
    let image = string_chord::image::open(&args.input)
        .with_context(|| format!("could not read the image '{}'", args.input.display()))?;
    let deadline = args.deadline(Instant::now())?;

    tracing::info!("Generating string art...");
    let generation = string_chord::compute_until::<S>(
        &image,
        settings,
        deadline,
        &mut verboser::Tracing,
    )?;
    tracing::info!(
        lines = generation.sequence().lines(),
        termination = ?generation.termination(),
        "selection finished"
    );

    render::render_lines(
        generation.pins(),
        generation.sequence(),
        usize::MAX,
        settings.scale_factor,
    )
    .save(&args.output)
    .with_context(|| format!("could not write the image '{}'", args.output.display()))?;

    if let Some(path) = &args.sequence {
        generation
            .sequence()
            .save(path)
            .with_context(|| format!("could not create sequence file '{}'", path.display()))?;
        tracing::info!("Sequence saved to: {}", path.display());
    }

    if let Some(path) = &args.svg {
        let doc = render::build_svg(generation.pins(), generation.sequence(), 0.5);
        svg::save(path, &doc)
            .with_context(|| format!("could not write svg '{}'", path.display()))?;
        tracing::info!("SVG saved to: {}", path.display());
    }

    if args.animate {
        let path = animation::save(
            &generation,
            settings.scale_factor,
            settings.max_frames,
            &args.output,
        )?;
        tracing::info!("Animation saved to: {}", path.display());
    }

    tracing::info!("String art generated successfully!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "string_chord",
            "in.png",
            "out.png",
            "seq.txt",
            "--pins",
            "120",
            "-l",
            "900",
            "-a",
        ]);
        assert_eq!(args.sequence.as_deref(), Some(Path::new("seq.txt")));
        assert!(args.animate);
        let settings = args.settings().unwrap();
        assert_eq!(settings.pins, 120);
        assert_eq!(settings.max_lines, 900);
        assert_eq!(settings.min_distance, Settings::default().min_distance);
    }

    #[test]
    fn invalid_overrides_are_reported() {
        let args = Args::parse_from(["string_chord", "in.png", "out.png", "--pins", "40"]);
        assert!(args.settings().is_err());
    }

    #[test]
    fn timeout_sets_a_deadline() {
        let now = Instant::now();
        let args = Args::parse_from(["string_chord", "in.png", "out.png", "--timeout", "2.5"]);
        assert_eq!(
            args.deadline(now).unwrap(),
            Some(now + Duration::from_millis(2500))
        );
        let args = Args::parse_from(["string_chord", "in.png", "out.png"]);
        assert_eq!(args.deadline(now).unwrap(), None);
    }

    #[test]
    fn unrepresentable_timeouts_are_reported() {
        for timeout in ["inf", "NaN", "1e300"] {
            let args =
                Args::parse_from(["string_chord", "in.png", "out.png", "--timeout", timeout]);
            assert!(args.deadline(Instant::now()).is_err(), "{timeout}");
        }
    }

    #[test]
    fn precision_accepts_aliases() {
        let args = Args::parse_from(["string_chord", "in.png", "out.png", "--precision", "f32"]);
        assert!(matches!(args.precision, Precision::Single));
    }
}
