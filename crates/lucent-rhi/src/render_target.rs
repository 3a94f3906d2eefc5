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

//! Render pass descriptions and the texture sets they render into.

use crate::api::{
    ColorAttachmentDescriptor, DepthStencilAttachmentDescriptor, Extent2D, RenderPassDescriptor,
    RenderPassId, RenderTargetDescriptor, RenderTargetId, SampleCount, TextureUsage,
};
use crate::error::ResourceError;
use crate::resource::{DeferredRelease, RetireQueue, Texture};
use crate::traits::GpuBackend;
use std::borrow::Cow;
use std::sync::Arc;

/// The shape of a rendering pass: attachment formats and load/store
/// behavior, independent of any concrete texture.
///
/// A pass is the compatibility key between pipelines and render
/// targets: a pipeline renders into any target created for a pass whose
/// attachment formats match the pipeline's.
#[derive(Debug)]
pub struct RenderPass {
    retire: Arc<RetireQueue>,
    id: RenderPassId,
    color_attachments: Vec<ColorAttachmentDescriptor>,
    depth_stencil_attachment: Option<DepthStencilAttachmentDescriptor>,
    sample_count: SampleCount,
    label: Option<String>,
}

impl RenderPass {
    pub(crate) fn new(
        backend: &Arc<dyn GpuBackend>,
        retire: Arc<RetireQueue>,
        desc: &RenderPassDescriptor,
    ) -> Result<Self, ResourceError> {
        if desc.color_attachments.is_empty() && desc.depth_stencil_attachment.is_none() {
            return Err(ResourceError::InvalidDescriptor {
                reason: "render pass has no attachments".into(),
            });
        }
        for attachment in desc.color_attachments.iter() {
            if attachment.format.is_depth_format() {
                return Err(ResourceError::InvalidDescriptor {
                    reason: format!(
                        "depth format {:?} used as a color attachment",
                        attachment.format
                    ),
                });
            }
        }
        if let Some(attachment) = &desc.depth_stencil_attachment {
            if !attachment.format.is_depth_format() {
                return Err(ResourceError::InvalidDescriptor {
                    reason: format!(
                        "color format {:?} used as the depth/stencil attachment",
                        attachment.format
                    ),
                });
            }
        }
        let id = backend.create_render_pass(desc)?;
        Ok(Self {
            retire,
            id,
            color_attachments: desc.color_attachments.to_vec(),
            depth_stencil_attachment: desc.depth_stencil_attachment,
            sample_count: desc.sample_count,
            label: desc.label.as_ref().map(|l| l.to_string()),
        })
    }

    /// The backend handle of this pass.
    pub fn id(&self) -> RenderPassId {
        self.id
    }

    /// The color attachments of the pass, in order.
    pub fn color_attachments(&self) -> &[ColorAttachmentDescriptor] {
        &self.color_attachments
    }

    /// The depth/stencil attachment of the pass, if any.
    pub fn depth_stencil_attachment(&self) -> Option<&DepthStencilAttachmentDescriptor> {
        self.depth_stencil_attachment.as_ref()
    }

    /// The sample count of every attachment.
    pub fn sample_count(&self) -> SampleCount {
        self.sample_count
    }

    /// The debug label given at creation, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Drop for RenderPass {
    fn drop(&mut self) {
        self.retire.push(DeferredRelease::RenderPass(self.id));
    }
}

/// A concrete set of textures a compatible [`RenderPass`] renders into.
///
/// The target keeps its attachments alive for its own lifetime, so the
/// textures cannot retire while any pass could still render into them.
#[derive(Debug)]
pub struct RenderTarget {
    retire: Arc<RetireQueue>,
    id: RenderTargetId,
    color_textures: Vec<Arc<Texture>>,
    depth_stencil_texture: Option<Arc<Texture>>,
    extent: Extent2D,
    label: Option<String>,
}

impl RenderTarget {
    pub(crate) fn new(
        backend: &Arc<dyn GpuBackend>,
        retire: Arc<RetireQueue>,
        pass: &RenderPass,
        label: Option<&str>,
        color_textures: &[Arc<Texture>],
        depth_stencil_texture: Option<Arc<Texture>>,
        extent: Extent2D,
    ) -> Result<Self, ResourceError> {
        if extent.is_zero() {
            return Err(ResourceError::InvalidDescriptor {
                reason: "render target extent has a zero dimension".into(),
            });
        }
        if color_textures.len() != pass.color_attachments().len() {
            return Err(ResourceError::InvalidDescriptor {
                reason: format!(
                    "pass declares {} color attachments, got {} textures",
                    pass.color_attachments().len(),
                    color_textures.len()
                ),
            });
        }
        for (texture, attachment) in color_textures.iter().zip(pass.color_attachments()) {
            if texture.format() != attachment.format {
                return Err(ResourceError::InvalidDescriptor {
                    reason: format!(
                        "attachment expects {:?}, texture is {:?}",
                        attachment.format,
                        texture.format()
                    ),
                });
            }
            if !texture.usage().contains(TextureUsage::ATTACHMENT) {
                return Err(ResourceError::InvalidDescriptor {
                    reason: format!("texture {:?} lacks ATTACHMENT usage", texture.id()),
                });
            }
        }
        match (&depth_stencil_texture, pass.depth_stencil_attachment()) {
            (Some(texture), Some(attachment)) => {
                if texture.format() != attachment.format {
                    return Err(ResourceError::InvalidDescriptor {
                        reason: format!(
                            "depth attachment expects {:?}, texture is {:?}",
                            attachment.format,
                            texture.format()
                        ),
                    });
                }
            }
            (None, None) => {}
            (Some(_), None) => {
                return Err(ResourceError::InvalidDescriptor {
                    reason: "depth texture given but the pass declares none".into(),
                });
            }
            (None, Some(_)) => {
                return Err(ResourceError::InvalidDescriptor {
                    reason: "pass declares a depth attachment but no texture given".into(),
                });
            }
        }

        let ids: Vec<_> = color_textures.iter().map(|t| t.id()).collect();
        let desc = RenderTargetDescriptor {
            label: label.map(Cow::Borrowed),
            render_pass: pass.id(),
            color_textures: Cow::Owned(ids),
            depth_stencil_texture: depth_stencil_texture.as_ref().map(|t| t.id()),
            extent,
        };
        let id = backend.create_render_target(&desc)?;
        Ok(Self {
            retire,
            id,
            color_textures: color_textures.to_vec(),
            depth_stencil_texture,
            extent,
            label: label.map(|l| l.to_string()),
        })
    }

    /// The backend handle of this target.
    pub fn id(&self) -> RenderTargetId {
        self.id
    }

    /// The color textures, in attachment order.
    pub fn color_textures(&self) -> &[Arc<Texture>] {
        &self.color_textures
    }

    /// The depth/stencil texture, if the pass declares one.
    pub fn depth_stencil_texture(&self) -> Option<&Arc<Texture>> {
        self.depth_stencil_texture.as_ref()
    }

    /// The dimensions of every attachment.
    pub fn extent(&self) -> Extent2D {
        self.extent
    }

    /// The debug label given at creation, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Drop for RenderTarget {
    fn drop(&mut self) {
        self.retire.push(DeferredRelease::RenderTarget(self.id));
    }
}
