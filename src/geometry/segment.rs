use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::{is_finite_point, Point2, Vector2};

/// A directionless piece of line work used during cleaning and room detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Point2,
    pub b: Point2,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
}

impl Segment {
    /// Creates an anonymous segment.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            a,
            b,
            id: None,
            thickness: None,
        }
    }

    /// Sets the source identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the wall thickness carried by this segment.
    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = Some(thickness);
        self
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.a, &self.b)
    }

    /// Vector from `a` to `b` (not normalized).
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.b - self.a
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        nalgebra::center(&self.a, &self.b)
    }

    /// Returns the same segment with its endpoints swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
            id: self.id.clone(),
            thickness: self.thickness,
        }
    }

    /// Rejects segments carrying NaN or infinite coordinates.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` if any coordinate or the thickness is not finite.
    pub fn check_finite(&self) -> Result<()> {
        let thickness_ok = self.thickness.is_none_or(f64::is_finite);
        if is_finite_point(&self.a) && is_finite_point(&self.b) && thickness_ok {
            Ok(())
        } else {
            Err(GeometryError::NonFinite {
                context: format!("segment {}", self.id.as_deref().unwrap_or("<anonymous>")),
            }
            .into())
        }
    }
}
