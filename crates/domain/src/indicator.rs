//! LED-style indicator icons for boolean status flags.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::status::Flag;

/// Colour of a lit indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    /// Healthy / configured.
    #[default]
    Green,
    /// Fault.
    Red,
    /// Attention.
    Yellow,
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Green => f.write_str("green"),
            Self::Red => f.write_str("red"),
            Self::Yellow => f.write_str("yellow"),
        }
    }
}

/// A two-state indicator: off, or lit in the colour chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub on: bool,
    pub colour: Colour,
    /// Icon width in pixels.
    pub width: u32,
}

impl Indicator {
    /// Width used by every status table.
    pub const DEFAULT_WIDTH: u32 = 20;

    #[must_use]
    pub fn new(flag: impl Into<Flag>, colour: Colour, width: u32) -> Self {
        Self {
            on: flag.into().is_on(),
            colour,
            width,
        }
    }

    /// Green indicator at the default width.
    #[must_use]
    pub fn healthy(flag: impl Into<Flag>) -> Self {
        Self::new(flag, Colour::Green, Self::DEFAULT_WIDTH)
    }

    /// Icon file stem: `led-off` or `<colour>-led-on`.
    #[must_use]
    pub fn icon(&self) -> String {
        if self.on {
            format!("{}-led-on", self.colour)
        } else {
            "led-off".to_string()
        }
    }

    /// HTML fragment for this indicator.
    #[must_use]
    pub fn markup(&self) -> String {
        format!(
            r#"<img width="{}px" src="img/{}.png" alt="{}">"#,
            self.width,
            self.icon(),
            if self.on { "on" } else { "off" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_off_icon_when_flag_is_falsy() {
        let indicator = Indicator::new(false, Colour::Red, 25);
        assert_eq!(indicator.icon(), "led-off");
        assert_eq!(
            indicator.markup(),
            r#"<img width="25px" src="img/led-off.png" alt="off">"#
        );
    }

    #[test]
    fn should_render_coloured_icon_when_flag_is_truthy() {
        assert_eq!(Indicator::healthy(true).icon(), "green-led-on");
        assert_eq!(Indicator::new(true, Colour::Red, 20).icon(), "red-led-on");
    }

    #[test]
    fn should_use_default_width_for_healthy_indicator() {
        let markup = Indicator::healthy(Flag(true)).markup();
        assert_eq!(markup, r#"<img width="20px" src="img/green-led-on.png" alt="on">"#);
    }

    #[test]
    fn should_produce_same_markup_for_same_input() {
        let a = Indicator::new(true, Colour::Yellow, 10);
        let b = Indicator::new(true, Colour::Yellow, 10);
        assert_eq!(a.markup(), b.markup());
    }
}
