//! CSS values, transforms and easing curves used by the animation timelines.
//!
//! Everything here is plain data; resolving against the DOM happens in
//! `ui::scroll`, which feeds measured sizes back in through [`ResolveContext`].

use std::fmt;
use std::str::FromStr;

use derive_more::Display;

/// A length or scalar as written in an animation target.
#[derive(Debug, Clone, Copy, PartialEq, Display)]
pub enum CssValue {
    #[display("{_0}%")]
    Percent(f64),
    #[display("{_0}px")]
    Px(f64),
    #[display("{_0}")]
    Number(f64),
}

impl CssValue {
    /// Resolve to a pixel (or unitless) value against a reference length.
    ///
    /// `Percent` is relative to `reference`; the other variants pass through.
    pub fn resolve(&self, reference: f64) -> f64 {
        match *self {
            CssValue::Percent(p) => p / 100.0 * reference,
            CssValue::Px(v) | CssValue::Number(v) => v,
        }
    }

    /// Parse a computed style value such as `"12.5px"` or `"0.4"`.
    ///
    /// Returns `None` for keywords like `auto`.
    pub fn parse_computed(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(px) = raw.strip_suffix("px") {
            return px.trim().parse().ok().map(CssValue::Px);
        }
        if let Some(pct) = raw.strip_suffix('%') {
            return pct.trim().parse().ok().map(CssValue::Percent);
        }
        raw.parse().ok().map(CssValue::Number)
    }
}

/// Box offset properties that timelines animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Offset {
    Left,
    Right,
    Top,
    Bottom,
}

impl Offset {
    pub fn css_name(&self) -> &'static str {
        match self {
            Offset::Left => "left",
            Offset::Right => "right",
            Offset::Top => "top",
            Offset::Bottom => "bottom",
        }
    }

    /// Horizontal offsets resolve percentages against the containing block's
    /// width, vertical ones against its height.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Offset::Left | Offset::Right)
    }
}

/// Sizes needed to turn percentages into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolveContext {
    pub container_width: f64,
    pub container_height: f64,
}

impl ResolveContext {
    pub fn resolve(&self, offset: Offset, value: CssValue) -> f64 {
        let reference = if offset.is_horizontal() {
            self.container_width
        } else {
            self.container_height
        };
        value.resolve(reference)
    }
}

/// A fully specified 2D transform, decomposed into the components the
/// timelines interpolate independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotate: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        rotate: 0.0,
    };

    /// Decompose a computed `transform` value (`none` or `matrix(a, b, c, d, e, f)`).
    ///
    /// Skew is ignored; scale is taken as the length of the first column.
    pub fn from_computed(raw: &str) -> Self {
        let raw = raw.trim();
        let Some(args) = raw
            .strip_prefix("matrix(")
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            return Self::IDENTITY;
        };
        let parts: Vec<f64> = args
            .split(',')
            .filter_map(|p| p.trim().parse().ok())
            .collect();
        let [a, b, _, _, e, f] = parts[..] else {
            return Self::IDENTITY;
        };
        Transform {
            x: e,
            y: f,
            scale: (a * a + b * b).sqrt(),
            rotate: b.atan2(a).to_degrees(),
        }
    }

    /// Overlay the components present in `partial`.
    pub fn with(&self, partial: &PartialTransform) -> Self {
        Transform {
            x: partial.x.unwrap_or(self.x),
            y: partial.y.unwrap_or(self.y),
            scale: partial.scale.unwrap_or(self.scale),
            rotate: partial.rotate.unwrap_or(self.rotate),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) rotate({}deg) scale({})",
            self.x, self.y, self.rotate, self.scale
        )
    }
}

/// Transform components named by an animation target; unnamed components
/// keep whatever value the element already has.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartialTransform {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub scale: Option<f64>,
    pub rotate: Option<f64>,
}

impl PartialTransform {
    pub fn y(y: f64) -> Self {
        Self {
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn scale(scale: f64) -> Self {
        Self {
            scale: Some(scale),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.scale.is_none() && self.rotate.is_none()
    }

    /// Merge `other` on top of `self`.
    pub fn merge(&self, other: &PartialTransform) -> Self {
        Self {
            x: other.x.or(self.x),
            y: other.y.or(self.y),
            scale: other.scale.or(self.scale),
            rotate: other.rotate.or(self.rotate),
        }
    }
}

/// Error from parsing a transform declaration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformParseError {
    #[error("unsupported transform function `{0}`")]
    UnsupportedFunction(String),
    #[error("malformed transform `{0}`")]
    Malformed(String),
}

impl FromStr for PartialTransform {
    type Err = TransformParseError;

    /// Parses a space-separated list of `translateX/translateY/translate/scale/rotate` calls.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = PartialTransform::default();
        let mut rest = s.trim();
        while !rest.is_empty() {
            let open = rest
                .find('(')
                .ok_or_else(|| TransformParseError::Malformed(s.to_string()))?;
            let close = rest
                .find(')')
                .ok_or_else(|| TransformParseError::Malformed(s.to_string()))?;
            if close < open {
                return Err(TransformParseError::Malformed(s.to_string()));
            }
            let name = rest[..open].trim();
            let args: Vec<&str> = rest[open + 1..close].split(',').map(str::trim).collect();
            let number = |raw: &str, suffix: &str| -> Result<f64, TransformParseError> {
                raw.strip_suffix(suffix)
                    .unwrap_or(raw)
                    .trim()
                    .parse()
                    .map_err(|_| TransformParseError::Malformed(s.to_string()))
            };
            match (name, args.as_slice()) {
                ("translateX", [x]) => out.x = Some(number(x, "px")?),
                ("translateY", [y]) => out.y = Some(number(y, "px")?),
                ("translate", [x, y]) => {
                    out.x = Some(number(x, "px")?);
                    out.y = Some(number(y, "px")?);
                }
                ("scale", [k]) => out.scale = Some(number(k, "")?),
                ("rotate", [deg]) => out.rotate = Some(number(deg, "deg")?),
                _ => return Err(TransformParseError::UnsupportedFunction(name.to_string())),
            }
            rest = rest[close + 1..].trim_start();
        }
        Ok(out)
    }
}

/// Easing curves available to timeline steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    None,
    Power1In,
    #[default]
    Power1Out,
    Power1InOut,
    Power2In,
    Power2Out,
    Power2InOut,
}

impl Ease {
    /// Map linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::None => t,
            Ease::Power1In => t.powi(2),
            Ease::Power1Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power1InOut => in_out(t, 2),
            Ease::Power2In => t.powi(3),
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => in_out(t, 3),
        }
    }
}

fn in_out(t: f64, power: i32) -> f64 {
    if t < 0.5 {
        (2.0 * t).powi(power) / 2.0
    } else {
        1.0 - (2.0 * (1.0 - t)).powi(power) / 2.0
    }
}

/// Error from parsing an ease name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EaseParseError {
    #[error("unknown ease `{0}`")]
    Unknown(String),
}

impl FromStr for Ease {
    type Err = EaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" | "linear" => Ok(Ease::None),
            "power1.in" => Ok(Ease::Power1In),
            "power1.out" => Ok(Ease::Power1Out),
            "power1.inOut" => Ok(Ease::Power1InOut),
            "power2.in" => Ok(Ease::Power2In),
            "power2.out" => Ok(Ease::Power2Out),
            "power2.inOut" => Ok(Ease::Power2InOut),
            other => Err(EaseParseError::Unknown(other.to_string())),
        }
    }
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
