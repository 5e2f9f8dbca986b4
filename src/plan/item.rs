use nalgebra::Rotation2;
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2};

/// Opening subtypes that attach to walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

/// Unrotated footprint dimensions of an item being placed or dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemFootprint {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

impl ItemFootprint {
    #[must_use]
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    /// Scaled width.
    #[must_use]
    pub fn world_width(&self) -> f64 {
        self.width * self.scale
    }

    /// Scaled height.
    #[must_use]
    pub fn world_height(&self) -> f64 {
        self.height * self.scale
    }
}

fn default_scale() -> f64 {
    1.0
}

/// A piece of furniture, a door or a window.
///
/// `(x, y)` is the item origin: the top-left corner of the unrotated
/// footprint. `rotation` is in degrees about the origin. `room_id` and
/// `attached_to_wall_id` are derived by room assignment; `room_id: None`
/// is the unassigned room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    pub id: String,
    #[serde(default)]
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<OpeningKind>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub inverted: bool,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_to_wall_id: Option<String>,
}

impl PlacedItem {
    /// Creates an unrotated, unscaled item at `(x, y)`.
    #[must_use]
    pub fn new(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            file: String::new(),
            subtype: None,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            scale: 1.0,
            inverted: false,
            room_id: None,
            attached_to_wall_id: None,
        }
    }

    #[must_use]
    pub fn with_subtype(mut self, subtype: OpeningKind) -> Self {
        self.subtype = Some(subtype);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    #[must_use]
    pub fn footprint(&self) -> ItemFootprint {
        ItemFootprint::new(self.width, self.height, self.scale)
    }

    /// Doors and windows attach to walls.
    #[must_use]
    pub fn is_opening(&self) -> bool {
        self.subtype.is_some()
    }

    #[must_use]
    pub fn origin(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    #[must_use]
    pub fn rotation_matrix(&self) -> Rotation2<f64> {
        Rotation2::new(self.rotation.to_radians())
    }

    /// Maps a point in the item's local (unrotated, scaled) frame to world space.
    #[must_use]
    pub fn to_world(&self, local: Vector2) -> Point2 {
        self.origin() + self.rotation_matrix() * local
    }

    /// Center of the rotated footprint.
    #[must_use]
    pub fn center(&self) -> Point2 {
        let fp = self.footprint();
        self.to_world(Vector2::new(fp.world_width() * 0.5, fp.world_height() * 0.5))
    }

    /// World-space corners of the rotated footprint, counter-clockwise in local order.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        let fp = self.footprint();
        let (w, h) = (fp.world_width(), fp.world_height());
        [
            self.to_world(Vector2::new(0.0, 0.0)),
            self.to_world(Vector2::new(w, 0.0)),
            self.to_world(Vector2::new(w, h)),
            self.to_world(Vector2::new(0.0, h)),
        ]
    }

    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` if any transform field is not finite.
    pub fn check_finite(&self) -> Result<()> {
        let fields = [
            self.x,
            self.y,
            self.width,
            self.height,
            self.rotation,
            self.scale,
        ];
        if fields.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(GeometryError::NonFinite {
                context: format!("item {}", self.id),
            }
            .into())
        }
    }
}
