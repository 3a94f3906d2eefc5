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

//! All data structures used to configure graphics and compute pipelines.

use crate::api::binding::BindingSetLayoutId;
use crate::api::common::{IndexFormat, SampleCount, TextureFormat};
use crate::api::shader::ShaderModuleId;
use std::borrow::Cow;

/// The memory format of a single vertex attribute's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    /// Four 8-bit unsigned integer components.
    Uint8x4,
    /// Four 8-bit unsigned normalized components.
    Unorm8x4,
    /// Two 16-bit float components.
    Float16x2,
    /// Four 16-bit float components.
    Float16x4,
    /// One 32-bit float component.
    Float32,
    /// Two 32-bit float components.
    Float32x2,
    /// Three 32-bit float components.
    Float32x3,
    /// Four 32-bit float components.
    Float32x4,
    /// One 32-bit unsigned integer component.
    Uint32,
    /// Two 32-bit unsigned integer components.
    Uint32x2,
    /// Four 32-bit unsigned integer components.
    Uint32x4,
    /// One 32-bit signed integer component.
    Sint32,
    /// Two 32-bit signed integer components.
    Sint32x2,
    /// Four 32-bit signed integer components.
    Sint32x4,
    /// One 64-bit float component. Not supported by most hardware.
    Float64,
    /// Two 64-bit float components. Not supported by most hardware.
    Float64x2,
    /// Three 64-bit float components. Not supported by most hardware.
    Float64x3,
    /// Four 64-bit float components. Not supported by most hardware.
    Float64x4,
}

impl VertexFormat {
    /// The byte size of one attribute of this format.
    pub const fn size(&self) -> u64 {
        match self {
            VertexFormat::Uint8x4 | VertexFormat::Unorm8x4 | VertexFormat::Float16x2 => 4,
            VertexFormat::Float32 | VertexFormat::Uint32 | VertexFormat::Sint32 => 4,
            VertexFormat::Float16x4 | VertexFormat::Float32x2 => 8,
            VertexFormat::Uint32x2 | VertexFormat::Sint32x2 | VertexFormat::Float64 => 8,
            VertexFormat::Float32x3 => 12,
            VertexFormat::Float32x4
            | VertexFormat::Uint32x4
            | VertexFormat::Sint32x4
            | VertexFormat::Float64x2 => 16,
            VertexFormat::Float64x3 => 24,
            VertexFormat::Float64x4 => 32,
        }
    }
}

/// How often the GPU advances to the next element in a vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexStepMode {
    /// Advance per vertex.
    Vertex,
    /// Advance per rendered instance.
    Instance,
}

/// Describes a single vertex attribute within a vertex buffer layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    /// The input location of this attribute in the vertex shader.
    pub shader_location: u32,
    /// The format of the attribute's data.
    pub format: VertexFormat,
    /// The byte offset of this attribute from the start of the vertex.
    pub offset: u64,
}

/// Describes the memory layout of a single vertex buffer.
#[derive(Debug, Clone)]
pub struct VertexBufferLayout<'a> {
    /// The byte distance between consecutive elements in the buffer.
    pub array_stride: u64,
    /// How often the vertex buffer is advanced.
    pub step_mode: VertexStepMode,
    /// The attributes contained within each element of the buffer.
    pub attributes: Cow<'a, [VertexAttribute]>,
}

/// Defines how vertices are connected to form a geometric primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTopology {
    /// Isolated points.
    PointList,
    /// Isolated lines; every two vertices form a line.
    LineList,
    /// A connected line strip.
    LineStrip,
    /// Isolated triangles; every three vertices form a triangle.
    TriangleList,
    /// A connected triangle strip.
    TriangleStrip,
}

/// Defines which face of a triangle to cull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullMode {
    /// No culling is performed.
    None,
    /// Cull front-facing triangles.
    Front,
    /// Cull back-facing triangles.
    Back,
}

/// Defines which vertex winding order is "front-facing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontFace {
    /// Counter-clockwise winding order is the front face.
    Ccw,
    /// Clockwise winding order is the front face.
    Cw,
}

/// Defines how polygons are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolygonMode {
    /// Polygons are filled.
    Fill,
    /// Polygons are rendered as outlines (wireframe).
    Line,
    /// Polygon vertices are rendered as points.
    Point,
}

/// A constant depth offset applied to rasterized fragments.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DepthBias {
    /// Constant bias added to each fragment's depth.
    pub constant: i32,
    /// Bias scaled by the polygon's depth slope.
    pub slope_scale: f32,
    /// The maximum (or minimum) bias value.
    pub clamp: f32,
}

/// Describes the fixed-function rasterizer state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterizerState {
    /// The vertex winding order considered front-facing.
    pub front_face: FrontFace,
    /// The face culling mode.
    pub cull_mode: CullMode,
    /// The rasterization mode for polygons.
    pub polygon_mode: PolygonMode,
    /// The width of rasterized lines, in pixels.
    pub line_width: f32,
    /// Optional depth bias, used e.g. for shadow-map rendering.
    pub depth_bias: Option<DepthBias>,
}

impl Default for RasterizerState {
    fn default() -> Self {
        Self {
            front_face: FrontFace::Ccw,
            cull_mode: CullMode::Back,
            polygon_mode: PolygonMode::Fill,
            line_width: 1.0,
            depth_bias: None,
        }
    }
}

/// The comparison function used for depth and stencil testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareFunction {
    /// The test never passes.
    Never,
    /// Passes if the new value is less than the existing value.
    Less,
    /// Passes if the values are equal.
    Equal,
    /// Passes if the new value is less than or equal.
    LessEqual,
    /// Passes if the new value is greater.
    Greater,
    /// Passes if the values differ.
    NotEqual,
    /// Passes if the new value is greater than or equal.
    GreaterEqual,
    /// The test always passes.
    #[default]
    Always,
}

/// An operation performed on a stencil buffer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StencilOperation {
    /// Keep the existing stencil value.
    #[default]
    Keep,
    /// Set the stencil value to 0.
    Zero,
    /// Replace the stencil value with the reference value.
    Replace,
    /// Bitwise invert the stencil value.
    Invert,
    /// Increment, clamping at the maximum value.
    IncrementClamp,
    /// Decrement, clamping at 0.
    DecrementClamp,
    /// Increment, wrapping to 0 on overflow.
    IncrementWrap,
    /// Decrement, wrapping to the maximum on underflow.
    DecrementWrap,
}

/// Stencil operations for one triangle face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StencilFaceState {
    /// The comparison applied between the reference and stored value.
    pub compare: CompareFunction,
    /// The operation when the stencil test fails.
    pub fail_op: StencilOperation,
    /// The operation when the stencil test passes but the depth test fails.
    pub depth_fail_op: StencilOperation,
    /// The operation when both tests pass.
    pub pass_op: StencilOperation,
}

/// Describes depth and stencil testing for a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilState {
    /// The format of the depth/stencil attachment this pipeline renders
    /// into. Must be a depth format.
    pub format: TextureFormat,
    /// Whether fragments write their depth on passing the test.
    pub depth_write_enabled: bool,
    /// The depth comparison function.
    pub depth_compare: CompareFunction,
    /// The stencil state for front-facing primitives.
    pub stencil_front: StencilFaceState,
    /// The stencil state for back-facing primitives.
    pub stencil_back: StencilFaceState,
    /// Bitmask limiting which stencil bits are read.
    pub stencil_read_mask: u32,
    /// Bitmask limiting which stencil bits are written.
    pub stencil_write_mask: u32,
}

/// A factor in a blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// The factor is `0.0`.
    Zero,
    /// The factor is `1.0`.
    One,
    /// The source alpha component.
    SrcAlpha,
    /// `1.0 - src.a`.
    OneMinusSrcAlpha,
    /// The destination alpha component.
    DstAlpha,
    /// `1.0 - dst.a`.
    OneMinusDstAlpha,
}

/// The operation combining source and destination in a blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendOperation {
    /// `source + destination`.
    Add,
    /// `source - destination`.
    Subtract,
    /// `destination - source`.
    ReverseSubtract,
    /// `min(source, destination)`.
    Min,
    /// `max(source, destination)`.
    Max,
}

/// One half (color or alpha) of a blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendComponent {
    /// The factor applied to the source value.
    pub src_factor: BlendFactor,
    /// The factor applied to the destination value.
    pub dst_factor: BlendFactor,
    /// The combining operation.
    pub operation: BlendOperation,
}

impl BlendComponent {
    /// Source replaces destination (no blending).
    pub const REPLACE: Self = Self {
        src_factor: BlendFactor::One,
        dst_factor: BlendFactor::Zero,
        operation: BlendOperation::Add,
    };

    /// Standard non-premultiplied alpha blending.
    pub const ALPHA_BLENDING: Self = Self {
        src_factor: BlendFactor::SrcAlpha,
        dst_factor: BlendFactor::OneMinusSrcAlpha,
        operation: BlendOperation::Add,
    };
}

/// Blend state for a color attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendState {
    /// The blend equation for the RGB channels.
    pub color: BlendComponent,
    /// The blend equation for the alpha channel.
    pub alpha: BlendComponent,
}

impl BlendState {
    /// No blending; source replaces destination.
    pub const REPLACE: Self = Self {
        color: BlendComponent::REPLACE,
        alpha: BlendComponent::REPLACE,
    };

    /// Standard alpha blending on color, additive on alpha.
    pub const ALPHA_BLENDING: Self = Self {
        color: BlendComponent::ALPHA_BLENDING,
        alpha: BlendComponent::REPLACE,
    };
}

/// A descriptor used to create a [`GraphicsPipelineId`].
///
/// Aggregates every piece of immutable pipeline state: input assembly,
/// vertex fetch, rasterization, blending, depth/stencil, multisampling,
/// the shader stages, and the attachment formats of the render pass the
/// pipeline will be used with.
#[derive(Debug, Clone)]
pub struct GraphicsPipelineDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// The compiled vertex shader module.
    pub vertex_shader: ShaderModuleId,
    /// The compiled fragment shader module, if any (depth-only passes
    /// may omit it).
    pub fragment_shader: Option<ShaderModuleId>,
    /// The layouts of the binding sets the pipeline consumes, by set
    /// index.
    pub binding_layouts: Cow<'a, [BindingSetLayoutId]>,
    /// The vertex buffer layouts, by binding slot.
    pub vertex_layout: Cow<'a, [VertexBufferLayout<'a>]>,
    /// The primitive topology.
    pub topology: PrimitiveTopology,
    /// The index format for strip topologies with primitive restart.
    pub strip_index_format: Option<IndexFormat>,
    /// The fixed-function rasterizer state.
    pub rasterizer: RasterizerState,
    /// Per-attachment blend state; `None` disables blending.
    pub blend: Option<BlendState>,
    /// Depth/stencil state; `None` disables depth testing entirely.
    pub depth_stencil: Option<DepthStencilState>,
    /// The number of samples per pixel.
    pub sample_count: SampleCount,
    /// The formats of the color attachments this pipeline renders into.
    pub color_formats: Cow<'a, [TextureFormat]>,
    /// If `true`, viewport and scissor are dynamic state: the recorder
    /// must set them at least once before any draw.
    pub dynamic_viewport: bool,
}

/// A descriptor used to create a [`ComputePipelineId`].
#[derive(Debug, Clone)]
pub struct ComputePipelineDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// The compiled compute shader module.
    pub shader: ShaderModuleId,
    /// The layouts of the binding sets the pipeline consumes, by set
    /// index.
    pub binding_layouts: Cow<'a, [BindingSetLayoutId]>,
}

/// An opaque handle to a compiled graphics pipeline state object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphicsPipelineId(pub u64);

/// An opaque handle to a compiled compute pipeline state object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComputePipelineId(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_format_sizes() {
        assert_eq!(VertexFormat::Float32x3.size(), 12);
        assert_eq!(VertexFormat::Unorm8x4.size(), 4);
        assert_eq!(VertexFormat::Float64x4.size(), 32);
    }

    #[test]
    fn blend_presets() {
        let alpha = BlendState::ALPHA_BLENDING;
        assert_eq!(alpha.color.src_factor, BlendFactor::SrcAlpha);
        assert_eq!(alpha.color.dst_factor, BlendFactor::OneMinusSrcAlpha);
        assert_eq!(alpha.alpha, BlendComponent::REPLACE);
    }

    #[test]
    fn rasterizer_defaults() {
        let raster = RasterizerState::default();
        assert_eq!(raster.cull_mode, CullMode::Back);
        assert_eq!(raster.front_face, FrontFace::Ccw);
        assert!((raster.line_width - 1.0).abs() < f32::EPSILON);
        assert!(raster.depth_bias.is_none());
    }
}
