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

//! Render pass and render target descriptions.

use crate::api::common::{Extent2D, SampleCount, TextureFormat};
use crate::api::texture::TextureId;
use std::borrow::Cow;

/// The operation performed on an attachment at the start of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadOp {
    /// The existing contents are loaded into the pass.
    Load,
    /// The attachment is cleared before the pass begins; the clear value
    /// is supplied when the pass is recorded.
    Clear,
    /// The existing contents are undefined; cheaper than `Load` when the
    /// pass overwrites everything.
    DontCare,
}

/// The operation performed on an attachment at the end of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    /// Results are stored to the attachment's memory.
    Store,
    /// Results are discarded; a win on tile-based GPUs.
    Discard,
}

/// The clear value supplied for an attachment whose load op is
/// [`LoadOp::Clear`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClearValue {
    /// An RGBA color clear.
    Color([f32; 4]),
    /// A depth/stencil clear.
    DepthStencil {
        /// The depth clear value.
        depth: f32,
        /// The stencil clear value.
        stencil: u32,
    },
}

/// Describes one color attachment of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorAttachmentDescriptor {
    /// The texel format of the attachment.
    pub format: TextureFormat,
    /// The operation at the start of the pass.
    pub load_op: LoadOp,
    /// The operation at the end of the pass.
    pub store_op: StoreOp,
}

/// Describes the depth/stencil attachment of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilAttachmentDescriptor {
    /// The texel format; must be a depth format.
    pub format: TextureFormat,
    /// The depth aspect's operation at the start of the pass.
    pub depth_load_op: LoadOp,
    /// The depth aspect's operation at the end of the pass.
    pub depth_store_op: StoreOp,
    /// The stencil aspect's operation at the start of the pass.
    pub stencil_load_op: LoadOp,
    /// The stencil aspect's operation at the end of the pass.
    pub stencil_store_op: StoreOp,
}

/// A descriptor used to create a [`RenderPassId`]: the attachment
/// formats and load/store behavior shared by every compatible render
/// target and pipeline.
#[derive(Debug, Clone)]
pub struct RenderPassDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// The color attachments of the pass.
    pub color_attachments: Cow<'a, [ColorAttachmentDescriptor]>,
    /// The optional depth/stencil attachment of the pass.
    pub depth_stencil_attachment: Option<DepthStencilAttachmentDescriptor>,
    /// The sample count of every attachment.
    pub sample_count: SampleCount,
}

/// A descriptor used to create a [`RenderTargetId`]: the concrete
/// texture set a compatible render pass renders into.
#[derive(Debug, Clone)]
pub struct RenderTargetDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// The pass this target is compatible with.
    pub render_pass: RenderPassId,
    /// One texture per color attachment, in attachment order.
    pub color_textures: Cow<'a, [TextureId]>,
    /// The depth/stencil texture, if the pass declares one.
    pub depth_stencil_texture: Option<TextureId>,
    /// The dimensions of every attachment.
    pub extent: Extent2D,
}

/// An opaque handle to a render pass description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderPassId(pub u64);

/// An opaque handle to a render target (framebuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetId(pub u64);
