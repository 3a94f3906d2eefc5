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

//! The presentation surface tying a device to a platform window.

use crate::api::{Extent2D, SurfaceId};
use crate::error::DeviceError;
use crate::platform::RhiWindowHandle;
use crate::traits::GpuBackend;
use std::sync::Arc;

/// The native presentation target created from a platform window.
///
/// The surface's extent follows the window: when the two drift apart the
/// swapchain built on this surface reports out-of-date on acquisition and
/// must be recreated at the new extent.
#[derive(Debug)]
pub struct Surface {
    backend: Arc<dyn GpuBackend>,
    id: SurfaceId,
    window: RhiWindowHandle,
}

impl Surface {
    pub(crate) fn new(
        backend: Arc<dyn GpuBackend>,
        window: RhiWindowHandle,
    ) -> Result<Self, DeviceError> {
        let id = backend.create_surface(window.clone())?;
        log::info!("Surface created: {:?}", id);
        Ok(Self { backend, id, window })
    }

    /// The backend handle of this surface.
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// The window this surface presents into.
    pub fn window(&self) -> &RhiWindowHandle {
        &self.window
    }

    /// The surface's current dimensions. Zero in either dimension means
    /// the window is minimized and rendering must be skipped.
    pub fn extent(&self) -> Extent2D {
        self.backend.surface_extent(self.id)
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        self.backend.destroy_surface(self.id);
    }
}
