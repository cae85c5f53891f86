use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Easing curves.
///
/// `Power*(n)` follows the usual `powerN` naming: the curve exponent is
/// `n + 1`, so `power1` is quadratic and `power4` is quintic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    Linear,
    PowerIn(u8),
    PowerOut(u8),
    PowerInOut(u8),
}

impl Ease {
    /// Default curve for tweens that do not pick one.
    pub const POWER1_OUT: Self = Self::PowerOut(1);
    pub const POWER4_IN_OUT: Self = Self::PowerInOut(4);

    /// Maps linear progress `t` in `[0, 1]` onto the curve.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::PowerIn(n) => t.powi(i32::from(n) + 1),
            Self::PowerOut(n) => 1.0 - (1.0 - t).powi(i32::from(n) + 1),
            Self::PowerInOut(n) => {
                let e = i32::from(n) + 1;
                if t < 0.5 {
                    (2.0 * t).powi(e) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(e) / 2.0
                }
            }
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Self::POWER1_OUT
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "none"),
            Self::PowerIn(n) => write!(f, "power{n}.in"),
            Self::PowerOut(n) => write!(f, "power{n}.out"),
            Self::PowerInOut(n) => write!(f, "power{n}.inOut"),
        }
    }
}

impl FromStr for Ease {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "none" || s == "linear" {
            return Ok(Self::Linear);
        }
        let (curve, direction) = s.split_once('.').unwrap_or((s, "out"));
        let power = curve
            .strip_prefix("power")
            .and_then(|n| n.parse::<u8>().ok())
            .ok_or_else(|| format!("Unknown ease '{s}'"))?;
        match direction {
            "in" => Ok(Self::PowerIn(power)),
            "out" => Ok(Self::PowerOut(power)),
            "inOut" => Ok(Self::PowerInOut(power)),
            _ => Err(format!("Unknown ease direction in '{s}'")),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_hit_their_endpoints() {
        for ease in [Ease::Linear, Ease::PowerIn(2), Ease::POWER1_OUT, Ease::POWER4_IN_OUT] {
            assert!(ease.apply(0.0).abs() < 1e-6, "{ease} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{ease} at 1");
        }
    }

    #[test]
    fn in_out_is_symmetric_around_midpoint() {
        let ease = Ease::POWER4_IN_OUT;
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((ease.apply(0.2) + ease.apply(0.8) - 1.0).abs() < 1e-6);
        // Pronounced: slow start.
        assert!(ease.apply(0.2) < 0.01);
    }

    #[test]
    fn parses_gsap_style_names() {
        assert_eq!("power4.inOut".parse::<Ease>(), Ok(Ease::PowerInOut(4)));
        assert_eq!("power1".parse::<Ease>(), Ok(Ease::PowerOut(1)));
        assert_eq!("none".parse::<Ease>(), Ok(Ease::Linear));
        assert!("bounce.out".parse::<Ease>().is_err());
    }
}
