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

//! The frontend texture wrapper and its tracked resource state.

use super::{DeferredRelease, RetireQueue};
use crate::api::{
    Extent2D, Extent3D, ResourceState, SampleCount, TextureDescriptor, TextureFormat, TextureId,
    TextureUsage,
};
use crate::error::ResourceError;
use crate::traits::GpuBackend;
use std::sync::{Arc, Mutex};

/// A GPU image resource and the single source of truth for its current
/// [`ResourceState`].
///
/// The tracked state changes only when a barrier is recorded through
/// [`CommandBuffer::texture_barrier`](crate::CommandBuffer::texture_barrier);
/// a barrier into the state the texture is already in records nothing.
/// Swapchain-owned textures are created by the swapchain in
/// [`ResourceState::Undefined`] and cycle through `ColorAttachment` and
/// `Present` once per frame; dropping their wrapper releases nothing,
/// since the image belongs to the swapchain ring.
#[derive(Debug)]
pub struct Texture {
    retire: Arc<RetireQueue>,
    id: TextureId,
    format: TextureFormat,
    extent: Extent3D,
    mip_level_count: u32,
    sample_count: SampleCount,
    usage: TextureUsage,
    state: Mutex<ResourceState>,
    swapchain_owned: bool,
    label: Option<String>,
}

impl Texture {
    pub(crate) fn new(
        backend: &Arc<dyn GpuBackend>,
        retire: Arc<RetireQueue>,
        desc: &TextureDescriptor,
    ) -> Result<Self, ResourceError> {
        if desc.extent.width == 0 || desc.extent.height == 0 || desc.extent.depth == 0 {
            return Err(ResourceError::InvalidDescriptor {
                reason: format!(
                    "texture extent {}x{}x{} has a zero dimension",
                    desc.extent.width, desc.extent.height, desc.extent.depth
                ),
            });
        }
        if desc.mip_level_count == 0 {
            return Err(ResourceError::InvalidDescriptor {
                reason: "mip_level_count must be at least 1".into(),
            });
        }
        if desc.usage.is_empty() {
            return Err(ResourceError::InvalidDescriptor {
                reason: "texture usage must not be empty".into(),
            });
        }
        if !backend.supports_texture_format(desc.format, desc.usage) {
            return Err(ResourceError::UnsupportedTextureFormat {
                format: desc.format,
            });
        }
        if let Some(data) = desc.initial_data {
            if let Some(bpp) = desc.format.bytes_per_pixel() {
                let expected = desc.extent.texel_count() * bpp as u64;
                if data.len() as u64 != expected {
                    return Err(ResourceError::InvalidDescriptor {
                        reason: format!(
                            "initial data is {} bytes, expected {} for {:?} at {}x{}x{}",
                            data.len(),
                            expected,
                            desc.format,
                            desc.extent.width,
                            desc.extent.height,
                            desc.extent.depth
                        ),
                    });
                }
            }
        }
        let id = backend.create_texture(desc)?;
        Ok(Self {
            retire,
            id,
            format: desc.format,
            extent: desc.extent,
            mip_level_count: desc.mip_level_count,
            sample_count: desc.sample_count,
            usage: desc.usage,
            state: Mutex::new(ResourceState::Undefined),
            swapchain_owned: false,
            label: desc.label.as_ref().map(|l| l.to_string()),
        })
    }

    /// Wraps one image of a swapchain ring. The wrapper never releases
    /// the image; the swapchain owns it.
    pub(crate) fn from_swapchain_image(
        retire: Arc<RetireQueue>,
        id: TextureId,
        format: TextureFormat,
        extent: Extent2D,
        index: u32,
    ) -> Self {
        Self {
            retire,
            id,
            format,
            extent: Extent3D {
                width: extent.width,
                height: extent.height,
                depth: 1,
            },
            mip_level_count: 1,
            sample_count: SampleCount::X1,
            usage: TextureUsage::ATTACHMENT
                | TextureUsage::TRANSFER_SRC
                | TextureUsage::TRANSFER_DST,
            state: Mutex::new(ResourceState::Undefined),
            swapchain_owned: true,
            label: Some(format!("swapchain image {index}")),
        }
    }

    /// The backend handle of this texture.
    pub fn id(&self) -> TextureId {
        self.id
    }

    /// The texel format.
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Width, height, and depth in texels.
    pub fn extent(&self) -> Extent3D {
        self.extent
    }

    /// The number of mipmap levels.
    pub fn mip_level_count(&self) -> u32 {
        self.mip_level_count
    }

    /// The number of samples per pixel.
    pub fn sample_count(&self) -> SampleCount {
        self.sample_count
    }

    /// The allowed usages.
    pub fn usage(&self) -> TextureUsage {
        self.usage
    }

    /// Whether this texture is an image of a swapchain ring.
    pub fn is_swapchain_owned(&self) -> bool {
        self.swapchain_owned
    }

    /// The debug label given at creation, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The tracked resource state, as of the last recorded barrier.
    pub fn current_state(&self) -> ResourceState {
        self.state
            .lock()
            .map(|s| *s)
            .unwrap_or(ResourceState::Undefined)
    }

    /// Updates the tracked state if `to` differs from it, returning the
    /// previous state; `None` means the transition is redundant and no
    /// barrier should be recorded.
    pub(crate) fn transition(&self, to: ResourceState) -> Option<ResourceState> {
        let mut state = self.state.lock().ok()?;
        if *state == to {
            return None;
        }
        let from = *state;
        *state = to;
        Some(from)
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        if !self.swapchain_owned {
            self.retire.push(DeferredRelease::Texture(self.id));
        }
    }
}
