//! Vertex data structures and input descriptions.
//!
//! Pipeline states describe their vertex input as a list of
//! [`InputElement`]s. Per-vertex elements come from the primitive's vertex
//! buffer; per-instance elements come from a batched instances buffer.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// How often an input element advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputRate {
    /// Once per vertex.
    Vertex,
    /// Once per instance.
    Instance,
}

/// One attribute of the vertex input layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputElement {
    /// Vertex position, 3 × f32
    Position,
    /// Vertex color, 4 × u8
    Color,
    /// Vertex normal, 3 × f32
    Normal,
    /// Texture coordinate, 2 × f32
    TexCoord,
    /// Per-instance color, 4 × u8
    InstanceColor,
    /// Per-instance model matrix, 4 × 4 × f32
    InstanceTransform,
    /// Per-instance inverse-transpose model matrix, 4 × 4 × f32
    InstanceInverseTransform,
}

impl InputElement {
    /// Size of the element in bytes.
    pub const fn size(self) -> u32 {
        match self {
            InputElement::Position | InputElement::Normal => 12,
            InputElement::Color | InputElement::InstanceColor => 4,
            InputElement::TexCoord => 8,
            InputElement::InstanceTransform | InputElement::InstanceInverseTransform => 64,
        }
    }

    /// Which stream the element is read from.
    pub const fn rate(self) -> InputRate {
        match self {
            InputElement::Position
            | InputElement::Color
            | InputElement::Normal
            | InputElement::TexCoord => InputRate::Vertex,
            InputElement::InstanceColor
            | InputElement::InstanceTransform
            | InputElement::InstanceInverseTransform => InputRate::Instance,
        }
    }

    /// Total stride of all elements in `layout` read at `rate`.
    pub fn stride(layout: &[InputElement], rate: InputRate) -> u32 {
        layout
            .iter()
            .filter(|e| e.rate() == rate)
            .map(|e| e.size())
            .sum()
    }
}

/// Vertex format used by debug geometry: position, normal, UV and color.
///
/// # Memory Layout
///
/// - Offset 0: position (12 bytes)
/// - Offset 12: normal (12 bytes)
/// - Offset 24: tex_coord (8 bytes)
/// - Offset 32: color (4 bytes)
/// - Total size: 36 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct DebugVertex {
    /// Position in render space
    pub position: Vec3,
    /// Unit surface normal
    pub normal: Vec3,
    /// Texture coordinate
    pub tex_coord: Vec2,
    /// RGBA8 vertex color
    pub color: [u8; 4],
}

impl DebugVertex {
    /// Input layout matching this struct.
    pub const LAYOUT: [InputElement; 4] = [
        InputElement::Position,
        InputElement::Normal,
        InputElement::TexCoord,
        InputElement::Color,
    ];

    /// Creates a new vertex.
    #[inline]
    pub const fn new(position: Vec3, normal: Vec3, tex_coord: Vec2, color: [u8; 4]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_vertex_size_matches_layout() {
        assert_eq!(std::mem::size_of::<DebugVertex>(), 36);
        assert_eq!(
            InputElement::stride(&DebugVertex::LAYOUT, InputRate::Vertex),
            std::mem::size_of::<DebugVertex>() as u32
        );
        assert_eq!(InputElement::stride(&DebugVertex::LAYOUT, InputRate::Instance), 0);
    }

    #[test]
    fn test_instance_stride() {
        let layout = [
            InputElement::Position,
            InputElement::Normal,
            InputElement::InstanceTransform,
            InputElement::InstanceInverseTransform,
            InputElement::InstanceColor,
        ];
        assert_eq!(InputElement::stride(&layout, InputRate::Vertex), 24);
        assert_eq!(InputElement::stride(&layout, InputRate::Instance), 132);
    }

    #[test]
    fn test_debug_vertex_bytes() {
        let v = DebugVertex::new(Vec3::X, Vec3::Y, Vec2::ONE, [255, 0, 0, 255]);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[32..], &[255, 0, 0, 255]);
    }
}
