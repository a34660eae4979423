//! Transform types for block and element rotations.

use super::Axis;
use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

/// Block-level transform from a blockstate variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTransform {
    /// X rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub x: i32,
    /// Y rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub y: i32,
}

impl BlockTransform {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check if this is an identity transform (no rotation).
    pub fn is_identity(&self) -> bool {
        self.x.rem_euclid(360) == 0 && self.y.rem_euclid(360) == 0
    }

    /// Both rotations are whole quarter turns.
    pub fn is_axis_aligned(&self) -> bool {
        self.x % 90 == 0 && self.y % 90 == 0
    }

    /// Rotation matrix applying X then Y rotation.
    ///
    /// Angles are negated: blockstate rotations are clockwise when looking down
    /// the axis, glam follows the right-hand rule.
    pub fn matrix(&self) -> Mat3 {
        let x_rot = Mat3::from_rotation_x((-self.x as f32).to_radians());
        let y_rot = Mat3::from_rotation_y((-self.y as f32).to_radians());
        y_rot * x_rot
    }

    /// Rotate a block-local position (0-1 space) about the block centre.
    pub fn apply(&self, position: [f32; 3]) -> [f32; 3] {
        if self.is_identity() {
            return position;
        }
        let centre = Vec3::splat(0.5);
        let rotated = self.matrix() * (Vec3::from(position) - centre) + centre;
        snap(rotated).to_array()
    }

    /// Rotate a direction vector (normals).
    pub fn apply_normal(&self, normal: [f32; 3]) -> [f32; 3] {
        if self.is_identity() {
            return normal;
        }
        snap(self.matrix() * Vec3::from(normal)).to_array()
    }
}

/// Element-level rotation from a model element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRotation {
    /// Origin point for rotation (in 0-16 model coordinates).
    #[serde(default = "default_origin")]
    pub origin: [f32; 3],
    /// Axis to rotate around.
    pub axis: Axis,
    /// Rotation angle in degrees (-45 to 45, in 22.5 increments).
    pub angle: f32,
    /// Whether to rescale the element after rotation.
    #[serde(default)]
    pub rescale: bool,
}

fn default_origin() -> [f32; 3] {
    [8.0, 8.0, 8.0]
}

impl ElementRotation {
    /// Origin converted from model coordinates (0-16) to block-local (0-1).
    pub fn block_origin(&self) -> [f32; 3] {
        [
            self.origin[0] / 16.0,
            self.origin[1] / 16.0,
            self.origin[2] / 16.0,
        ]
    }

    /// Get the angle in radians.
    pub fn angle_radians(&self) -> f32 {
        self.angle.to_radians()
    }

    /// Get the rescale factor for this rotation.
    /// When rescale is true, the element is stretched back to its original extent.
    pub fn rescale_factor(&self) -> f32 {
        if self.rescale {
            1.0 / self.angle_radians().cos()
        } else {
            1.0
        }
    }

    /// Rotate a block-local position about the element origin.
    pub fn apply(&self, position: [f32; 3]) -> [f32; 3] {
        let origin = Vec3::from(self.block_origin());
        let rotated = self.rotation_matrix() * (Vec3::from(position) - origin);

        let rescale = self.rescale_factor();
        let scaled = if rescale != 1.0 {
            match self.axis {
                Axis::X => Vec3::new(rotated.x, rotated.y * rescale, rotated.z * rescale),
                Axis::Y => Vec3::new(rotated.x * rescale, rotated.y, rotated.z * rescale),
                Axis::Z => Vec3::new(rotated.x * rescale, rotated.y * rescale, rotated.z),
            }
        } else {
            rotated
        };

        (scaled + origin).to_array()
    }

    /// Rotate a direction vector (normals); rescaling does not apply.
    pub fn apply_normal(&self, normal: [f32; 3]) -> [f32; 3] {
        (self.rotation_matrix() * Vec3::from(normal)).to_array()
    }

    fn rotation_matrix(&self) -> Mat3 {
        let angle = self.angle_radians();
        match self.axis {
            Axis::X => Mat3::from_rotation_x(angle),
            Axis::Y => Mat3::from_rotation_y(angle),
            Axis::Z => Mat3::from_rotation_z(angle),
        }
    }
}

/// Remove float noise left by quarter-turn rotations so boundary checks stay exact.
fn snap(v: Vec3) -> Vec3 {
    const GRID: f32 = 1.0 / 4096.0;
    let snap_component = |c: f32| {
        let snapped = (c / GRID).round() * GRID;
        if (snapped - c).abs() < 1.0e-5 {
            snapped
        } else {
            c
        }
    };
    Vec3::new(snap_component(v.x), snap_component(v.y), snap_component(v.z))
}
