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

//! The presentable image ring and its recreation protocol.

use crate::api::{
    Extent2D, PresentMode, SemaphoreId, SwapchainDescriptor, SwapchainId, TextureFormat,
};
use crate::error::SwapchainError;
use crate::resource::{RetireQueue, Texture};
use crate::surface::Surface;
use crate::traits::GpuBackend;
use std::sync::{Arc, Mutex};

/// A fixed ring of presentable images on a [`Surface`].
///
/// The ring depth equals the buffering mode chosen at device creation
/// and never changes, not even across [`recreate`](Self::recreate):
/// recreation rebuilds the images at a new extent but preserves format,
/// present mode, and image count.
///
/// Image wrappers are memoized lazily: the first
/// [`image`](Self::image) call for an index wraps the backend texture in
/// an [`Arc<Texture>`] starting in the `Undefined` state, and later
/// calls return the same wrapper so state tracking stays coherent.
/// Recreation invalidates the whole cache.
#[derive(Debug)]
pub struct Swapchain {
    backend: Arc<dyn GpuBackend>,
    retire: Arc<RetireQueue>,
    id: SwapchainId,
    format: TextureFormat,
    present_mode: PresentMode,
    extent: Extent2D,
    image_count: u32,
    images: Mutex<Vec<Option<Arc<Texture>>>>,
}

impl Swapchain {
    pub(crate) fn new(
        backend: Arc<dyn GpuBackend>,
        retire: Arc<RetireQueue>,
        surface: &Surface,
        desc: &SwapchainDescriptor,
    ) -> Result<Self, SwapchainError> {
        let id = backend.create_swapchain(surface.id(), desc)?;
        log::info!(
            "Swapchain created: {}x{} {:?} {:?}, {} images",
            desc.extent.width,
            desc.extent.height,
            desc.format,
            desc.present_mode,
            desc.image_count
        );
        Ok(Self {
            backend,
            retire,
            id,
            format: desc.format,
            present_mode: desc.present_mode,
            extent: desc.extent,
            image_count: desc.image_count,
            images: Mutex::new(vec![None; desc.image_count as usize]),
        })
    }

    /// The backend handle of this swapchain.
    pub fn id(&self) -> SwapchainId {
        self.id
    }

    /// The texel format of every image in the ring.
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// The presentation pacing mode.
    pub fn present_mode(&self) -> PresentMode {
        self.present_mode
    }

    /// The current dimensions of every image in the ring.
    pub fn extent(&self) -> Extent2D {
        self.extent
    }

    /// The number of images in the ring. Fixed for the swapchain's
    /// lifetime.
    pub fn image_count(&self) -> u32 {
        self.image_count
    }

    /// The texture backing image `index`, wrapped on first access.
    pub fn image(&self, index: u32) -> Result<Arc<Texture>, SwapchainError> {
        if index >= self.image_count {
            return Err(SwapchainError::InvalidImageIndex {
                index,
                image_count: self.image_count,
            });
        }
        let mut images = self
            .images
            .lock()
            .map_err(|_| SwapchainError::BackendError("swapchain image cache poisoned".into()))?;
        let slot = &mut images[index as usize];
        if let Some(texture) = slot {
            return Ok(texture.clone());
        }
        let id = self.backend.swapchain_image(self.id, index)?;
        let texture = Arc::new(Texture::from_swapchain_image(
            self.retire.clone(),
            id,
            self.format,
            self.extent,
            index,
        ));
        *slot = Some(texture.clone());
        Ok(texture)
    }

    /// Acquires the next presentable image index, signaling `semaphore`
    /// when the image is ready to be rendered into.
    pub(crate) fn acquire_next_image(
        &self,
        semaphore: Option<SemaphoreId>,
    ) -> Result<u32, SwapchainError> {
        self.backend.acquire_next_image(self.id, semaphore)
    }

    /// Rebuilds the ring at `extent`. Old image views are released
    /// exactly once by the backend; the memoized wrappers are dropped
    /// here so the next [`image`](Self::image) call re-wraps fresh
    /// images in the `Undefined` state.
    ///
    /// Only legal while no frame is in flight.
    pub(crate) fn recreate(&mut self, extent: Extent2D) -> Result<(), SwapchainError> {
        self.backend.recreate_swapchain(self.id, extent)?;
        self.extent = extent;
        if let Ok(mut images) = self.images.lock() {
            for slot in images.iter_mut() {
                *slot = None;
            }
        }
        log::info!(
            "Swapchain recreated at {}x{}",
            extent.width,
            extent.height
        );
        Ok(())
    }
}

impl Drop for Swapchain {
    fn drop(&mut self) {
        self.backend.destroy_swapchain(self.id);
    }
}
