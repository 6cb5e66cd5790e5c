use serde::{Deserialize, Serialize};

use crate::{error::InvalidInput, pin_distancer::PinDistancer};

/// Tunable parameters of a generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of pins around the circle.
    pub pins: usize,
    /// Minimum circular distance between the two pins of a chord.
    pub min_distance: usize,
    /// Maximum number of chords to select.
    pub max_lines: usize,
    /// Residual removed from every pixel a chosen chord crosses.
    pub line_weight: u8,
    /// Magnification of rendered output.
    pub scale_factor: u32,
    /// How many recently visited pins are excluded as the next pin.
    pub recency_window: usize,
    /// Upper bound on animation frames.
    pub max_frames: usize,
    /// Rounds between progress notifications, 0 disables them.
    pub progress_interval: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pins: 300,
            min_distance: 30,
            max_lines: 3500,
            line_weight: 30,
            scale_factor: 4,
            recency_window: 20,
            max_frames: 50,
            progress_interval: 100,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.pins < 2 {
            return Err(InvalidInput::PinCount(self.pins));
        }
        self.distancer()?;
        if self.recency_window > self.pins {
            return Err(InvalidInput::RecencyWindow {
                window: self.recency_window,
                pins: self.pins,
            });
        }
        if self.scale_factor == 0 {
            return Err(InvalidInput::ScaleFactor);
        }
        if self.max_frames == 0 {
            return Err(InvalidInput::MaxFrames);
        }
        Ok(())
    }

    pub fn distancer(&self) -> Result<PinDistancer, InvalidInput> {
        Ok(PinDistancer::new(self.pins, self.min_distance)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "pins": 8, "min_distance": 2 }"#).unwrap();
        assert_eq!(settings.pins, 8);
        assert_eq!(settings.min_distance, 2);
        assert_eq!(settings.max_lines, Settings::default().max_lines);
        assert_eq!(settings.recency_window, 20);
    }

    #[test]
    fn rejects_bad_values() {
        let settings = Settings {
            pins: 1,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(InvalidInput::PinCount(1))));

        let settings = Settings {
            pins: 40,
            min_distance: 30,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(InvalidInput::Distance(_))));

        let settings = Settings {
            scale_factor: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(InvalidInput::ScaleFactor)));
    }

    #[test]
    fn recency_window_is_bounded_by_the_pins() {
        let settings = Settings {
            pins: 8,
            min_distance: 2,
            recency_window: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(InvalidInput::RecencyWindow {
                window: usize::MAX,
                pins: 8
            })
        ));

        let settings = Settings {
            recency_window: 8,
            ..settings
        };
        assert!(settings.validate().is_ok());

        let settings: Settings = serde_json::from_str(r#"{ "recency_window": 301 }"#).unwrap();
        assert!(matches!(
            settings.validate(),
            Err(InvalidInput::RecencyWindow { window: 301, .. })
        ));
    }
}
