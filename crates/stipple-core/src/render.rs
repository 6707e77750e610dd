//! Plain-old-data render instances emitted by the engines.
//!
//! Engines resolve geometry and alpha only; color comes from the host's
//! palette at paint time. The structs are `Pod` so a GPU host can upload
//! them as instance buffers unchanged.

use bytemuck::{Pod, Zeroable};

/// One trail square.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PixelInstance {
    pub center: [f32; 2],
    /// Edge length after age shrink.
    pub size: f32,
    pub alpha: f32,
}

/// One ripple ring.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RingInstance {
    pub center: [f32; 2],
    pub diameter: f32,
    pub alpha: f32,
}

/// The soft cursor dot.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DotInstance {
    pub center: [f32; 2],
    pub diameter: f32,
    pub alpha: f32,
}
