//! Model transform stack.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Position and normal matrices of one stack frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixEntry {
    pub position: Mat4,
    pub normal: Mat3,
}

impl MatrixEntry {
    pub const IDENTITY: MatrixEntry = MatrixEntry {
        position: Mat4::IDENTITY,
        normal: Mat3::IDENTITY,
    };

    pub fn transform_position(&self, position: [f32; 3]) -> [f32; 3] {
        self.position.transform_point3(Vec3::from(position)).to_array()
    }

    /// Normals are not renormalised; non-uniform scales are already folded
    /// into the normal matrix.
    pub fn transform_normal(&self, normal: [f32; 3]) -> [f32; 3] {
        (self.normal * Vec3::from(normal)).to_array()
    }
}

impl Default for MatrixEntry {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A stack of transforms; the top frame applies to rendered geometry.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    stack: Vec<MatrixEntry>,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self {
            stack: vec![MatrixEntry::IDENTITY],
        }
    }

    /// Current top frame.
    pub fn peek(&self) -> &MatrixEntry {
        // The base frame is never popped.
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut MatrixEntry {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Duplicate the top frame.
    pub fn push(&mut self) {
        let top = *self.peek();
        self.stack.push(top);
    }

    /// Drop the top frame. Returns false if only the base frame is left.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        let top = self.top_mut();
        top.position *= Mat4::from_translation(Vec3::new(x, y, z));
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        let top = self.top_mut();
        top.position *= Mat4::from_scale(Vec3::new(x, y, z));

        if x == y && y == z {
            // Uniform scale only needs the sign.
            if x < 0.0 {
                top.normal = top.normal * -1.0;
            }
            return;
        }

        let inverse = Vec3::new(1.0 / x, 1.0 / y, 1.0 / z);
        let normalizer = (inverse.x * inverse.y * inverse.z).cbrt().recip();
        top.normal *= Mat3::from_diagonal(inverse * normalizer);
    }

    pub fn rotate(&mut self, rotation: Quat) {
        let top = self.top_mut();
        top.position *= Mat4::from_quat(rotation);
        top.normal *= Mat3::from_quat(rotation);
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}
