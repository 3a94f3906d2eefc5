// Copyright 2025 the Lucent contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Value types used while recording GPU commands.

use crate::api::common::{Extent3D, Origin3D};
use crate::api::texture::FilterMode;
use crate::lucent_bitflags;

/// The rectangle of the framebuffer that rendering maps onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// The near depth bound, normally `0.0`.
    pub min_depth: f32,
    /// The far depth bound, normally `1.0`.
    pub max_depth: f32,
}

impl Viewport {
    /// A full-size viewport with the default depth range.
    pub const fn of_extent(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// The pixel rectangle outside which fragments are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScissorRect {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ScissorRect {
    /// A full-size scissor rectangle.
    pub const fn of_extent(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

/// The sampling filter used by [`blit`](crate::CommandBuffer::blit) when
/// source and destination regions differ in size.
pub type BlitFilter = FilterMode;

/// A sub-region of one mip level of a texture, used by blit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlitRegion {
    /// The texel offset of the region.
    pub origin: Origin3D,
    /// The texel dimensions of the region.
    pub extent: Extent3D,
    /// The mip level the region addresses.
    pub mip_level: u32,
}

impl BlitRegion {
    /// A region covering one whole mip-0 2D surface.
    pub const fn whole_2d(width: u32, height: u32) -> Self {
        Self {
            origin: Origin3D { x: 0, y: 0, z: 0 },
            extent: Extent3D {
                width,
                height,
                depth: 1,
            },
            mip_level: 0,
        }
    }
}

lucent_bitflags! {
    /// Pipeline stages referenced by submission waits and buffer/memory
    /// barriers.
    pub struct PipelineStages: u32 {
        /// Before any work begins.
        const TOP_OF_PIPE = 1 << 0;
        /// Vertex and index fetch.
        const VERTEX_INPUT = 1 << 1;
        /// Vertex shader execution.
        const VERTEX_SHADER = 1 << 2;
        /// Fragment shader execution.
        const FRAGMENT_SHADER = 1 << 3;
        /// Color attachment writes (including resolve and clears).
        const COLOR_ATTACHMENT_OUTPUT = 1 << 4;
        /// Compute shader execution.
        const COMPUTE_SHADER = 1 << 5;
        /// Copy, blit, and fill operations.
        const TRANSFER = 1 << 6;
        /// After all work completes.
        const BOTTOM_OF_PIPE = 1 << 7;
    }
}

/// An opaque handle to a command buffer allocated from the backend's
/// command pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandBufferId(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_of_extent_covers_surface() {
        let vp = Viewport::of_extent(800, 600);
        assert!((vp.width - 800.0).abs() < f32::EPSILON);
        assert!((vp.max_depth - 1.0).abs() < f32::EPSILON);
        let sc = ScissorRect::of_extent(800, 600);
        assert_eq!(sc.width, 800);
        assert_eq!(sc.x, 0);
    }

    #[test]
    fn whole_2d_region_is_mip_zero() {
        let region = BlitRegion::whole_2d(256, 128);
        assert_eq!(region.mip_level, 0);
        assert_eq!(region.extent.depth, 1);
        assert_eq!(region.extent.width, 256);
    }
}
