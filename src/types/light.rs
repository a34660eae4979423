//! Packed lightmap coordinates.
//!
//! A light coordinate stores block light in the low 16 bits and sky light in
//! the high 16 bits, each as `level << 4` (0-240). Arithmetic below works on
//! the two halves independently.

/// Block light 15, sky light 15.
pub const MAX_LIGHT_COORDS: u32 = 0x00F0_00F0;

const HALF_MASK: u32 = 0x0000_FFFF;
const MAX_HALF: u32 = 0xF0;

/// Pack block and sky light levels (0-15) into a light coordinate.
pub fn pack_light(block: u8, sky: u8) -> u32 {
    ((block.min(15) as u32) << 4) | ((sky.min(15) as u32) << 20)
}

/// Block light level (0-15) of a packed coordinate.
pub fn block_light(packed: u32) -> u8 {
    ((packed & HALF_MASK) >> 4).min(15) as u8
}

/// Sky light level (0-15) of a packed coordinate.
pub fn sky_light(packed: u32) -> u8 {
    ((packed >> 16) >> 4).min(15) as u8
}

/// Component-wise maximum of two light coordinates.
pub fn max_light(a: u32, b: u32) -> u32 {
    let low = (a & HALF_MASK).max(b & HALF_MASK);
    let high = (a >> 16).max(b >> 16);
    (high << 16) | low
}

/// Average a face corner's side, side, diagonal and centre samples.
///
/// Samples reading zero (fully enclosed neighbours) are replaced by the
/// centre value so corners next to opaque blocks do not go black.
pub fn mean_light(side1: u32, side2: u32, corner: u32, center: u32) -> u32 {
    let pick = |v: u32| if v == 0 { center } else { v };
    let samples = [pick(side1), pick(side2), pick(corner), center];
    // Each half sums in its own u32 so out-of-range samples cannot carry or overflow.
    let low: u32 = samples.iter().map(|v| v & HALF_MASK).sum();
    let high: u32 = samples.iter().map(|v| v >> 16).sum();
    (((high >> 2) & 0xFF) << 16) | ((low >> 2) & 0xFF)
}

/// Weighted blend of four light coordinates; weights are expected to sum to 1.
pub fn blend_light(lights: [u32; 4], weights: [f32; 4]) -> u32 {
    let mut low = 0.0f32;
    let mut high = 0.0f32;
    for (light, weight) in lights.iter().zip(weights.iter()) {
        low += (light & HALF_MASK) as f32 * weight;
        high += (light >> 16) as f32 * weight;
    }
    let low = (low.round().max(0.0) as u32).min(MAX_HALF);
    let high = (high.round().max(0.0) as u32).min(MAX_HALF);
    (high << 16) | low
}
