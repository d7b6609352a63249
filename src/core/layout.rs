//! Performance image layout: pairing images with their position specs.
//!
//! Images and positions are declared separately in `constants` and joined by
//! id here. The join is checked once, at configuration load, so the section
//! never renders an image without a position.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use crate::core::css::{CssValue, Offset, PartialTransform, TransformParseError};

/// An image shown in the performance section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceImage {
    pub id: &'static str,
    pub src: &'static str,
    pub alt: Option<&'static str>,
}

impl PerformanceImage {
    /// Alt text, falling back to a numbered description (1-based).
    pub fn alt_text(&self, index: usize) -> Cow<'static, str> {
        match self.alt {
            Some(alt) => Cow::Borrowed(alt),
            None => Cow::Owned(format!("Performance Image #{}", index + 1)),
        }
    }
}

/// Horizontal anchor of a positioned image. Exactly one side is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    Left(f64),
    Right(f64),
}

impl Anchor {
    pub fn offset(&self) -> Offset {
        match self {
            Anchor::Left(_) => Offset::Left,
            Anchor::Right(_) => Offset::Right,
        }
    }

    pub fn value(&self) -> f64 {
        match *self {
            Anchor::Left(v) | Anchor::Right(v) => v,
        }
    }
}

/// Target position of a performance image, in percent of the section box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSpec {
    pub id: &'static str,
    pub anchor: Anchor,
    pub bottom: f64,
    pub animate: bool,
    pub transform: Option<&'static str>,
}

impl PositionSpec {
    pub const fn left(id: &'static str, left: f64, bottom: f64) -> Self {
        Self {
            id,
            anchor: Anchor::Left(left),
            bottom,
            animate: true,
            transform: None,
        }
    }

    pub const fn right(id: &'static str, right: f64, bottom: f64) -> Self {
        Self {
            id,
            anchor: Anchor::Right(right),
            bottom,
            animate: true,
            transform: None,
        }
    }

    pub const fn at_rest(mut self) -> Self {
        self.animate = false;
        self
    }

    pub const fn with_transform(mut self, transform: &'static str) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Offsets this spec animates to, as CSS values.
    pub fn offsets(&self) -> [(Offset, CssValue); 2] {
        [
            (self.anchor.offset(), CssValue::Percent(self.anchor.value())),
            (Offset::Bottom, CssValue::Percent(self.bottom)),
        ]
    }

    /// Static inline style used when the image is not animated.
    pub fn inline_style(&self) -> String {
        let mut style = format!(
            "{}: {}; bottom: {};",
            self.anchor.offset().css_name(),
            CssValue::Percent(self.anchor.value()),
            CssValue::Percent(self.bottom)
        );
        if let Some(transform) = self.transform {
            style.push_str(&format!(" transform: {transform};"));
        }
        style
    }
}

/// Configuration errors for the performance layout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("performance image `{0}` has no position")]
    MissingPosition(String),
    #[error("position `{0}` does not match any performance image")]
    OrphanPosition(String),
    #[error("duplicate id `{0}`")]
    DuplicateId(String),
    #[error("position `{id}` has {axis} offset {value} outside [{min}, {max}]")]
    OutOfRange {
        id: String,
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("position `{id}` has an invalid transform: {source}")]
    InvalidTransform {
        id: String,
        #[source]
        source: TransformParseError,
    },
}

/// An image joined with its position and parsed transform.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    pub index: usize,
    pub image: PerformanceImage,
    pub position: PositionSpec,
    pub transform: Option<PartialTransform>,
}

/// The validated image/position join, in image order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PerformanceLayout {
    placed: Vec<PlacedImage>,
}

impl PerformanceLayout {
    /// Join images with positions, failing on any mismatch between the two id sets.
    pub fn new(images: &[PerformanceImage], positions: &[PositionSpec]) -> Result<Self, LayoutError> {
        let mut by_id: HashMap<&str, &PositionSpec> = HashMap::with_capacity(positions.len());
        for position in positions {
            if by_id.insert(position.id, position).is_some() {
                return Err(LayoutError::DuplicateId(position.id.to_string()));
            }
            validate_position(position)?;
        }

        let mut seen = HashSet::with_capacity(images.len());
        let mut placed = Vec::with_capacity(images.len());
        for (index, image) in images.iter().enumerate() {
            if !seen.insert(image.id) {
                return Err(LayoutError::DuplicateId(image.id.to_string()));
            }
            let position = by_id
                .get(image.id)
                .ok_or_else(|| LayoutError::MissingPosition(image.id.to_string()))?;
            let transform = position
                .transform
                .map(str::parse::<PartialTransform>)
                .transpose()
                .map_err(|source| LayoutError::InvalidTransform {
                    id: position.id.to_string(),
                    source,
                })?;
            placed.push(PlacedImage {
                index,
                image: *image,
                position: **position,
                transform,
            });
        }

        if let Some(orphan) = positions.iter().find(|p| !seen.contains(p.id)) {
            return Err(LayoutError::OrphanPosition(orphan.id.to_string()));
        }

        Ok(Self { placed })
    }

    pub fn images(&self) -> &[PlacedImage] {
        &self.placed
    }

    /// Images that take part in the entrance animation.
    pub fn animated(&self) -> impl Iterator<Item = &PlacedImage> {
        self.placed.iter().filter(|p| p.position.animate)
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

fn validate_position(position: &PositionSpec) -> Result<(), LayoutError> {
    let check = |axis: &'static str, value: f64, min: f64, max: f64| {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(LayoutError::OutOfRange {
                id: position.id.to_string(),
                axis,
                value,
                min,
                max,
            })
        }
    };
    check(
        position.anchor.offset().css_name(),
        position.anchor.value(),
        -100.0,
        100.0,
    )?;
    check("bottom", position.bottom, 0.0, 100.0)
}
