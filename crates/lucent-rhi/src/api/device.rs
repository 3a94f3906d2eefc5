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

//! Device- and swapchain-level descriptors.

use crate::api::common::{Extent2D, PresentMode, TextureFormat};
use crate::platform::RhiWindowHandle;

/// The depth of the swapchain image ring, which also bounds the number
/// of frames in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferingMode {
    /// One image; the CPU waits for every frame to finish.
    Single,
    /// Two images; classic double buffering.
    Double,
    /// Three images; smoother pacing at one extra frame of latency.
    Triple,
}

impl BufferingMode {
    /// The number of swapchain images (and frame slots) this mode
    /// requests.
    pub const fn image_count(&self) -> u32 {
        match self {
            BufferingMode::Single => 1,
            BufferingMode::Double => 2,
            BufferingMode::Triple => 3,
        }
    }
}

/// Creation parameters for a [`Device`](crate::Device).
#[derive(Clone)]
pub struct DeviceDescriptor {
    /// The application name, forwarded to the native API for driver
    /// heuristics and debugging tools.
    pub app_name: String,
    /// The window the device presents into.
    pub window: RhiWindowHandle,
    /// The swapchain depth.
    pub buffering: BufferingMode,
    /// Whether presentation waits for vertical blank.
    pub vsync: bool,
}

impl std::fmt::Debug for DeviceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (width, height) = self.window.inner_size();
        f.debug_struct("DeviceDescriptor")
            .field("app_name", &self.app_name)
            .field("window", &format_args!("{width}x{height}"))
            .field("buffering", &self.buffering)
            .field("vsync", &self.vsync)
            .finish()
    }
}

/// Creation parameters for a swapchain, as consumed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapchainDescriptor {
    /// The dimensions of every image in the ring.
    pub extent: Extent2D,
    /// The texel format of every image.
    pub format: TextureFormat,
    /// The presentation pacing mode.
    pub present_mode: PresentMode,
    /// The number of images in the ring.
    pub image_count: u32,
}

/// An opaque handle to a presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// An opaque handle to a swapchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapchainId(pub u64);

/// An opaque handle to a fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FenceId(pub u64);

/// An opaque handle to a semaphore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SemaphoreId(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffering_image_counts() {
        assert_eq!(BufferingMode::Single.image_count(), 1);
        assert_eq!(BufferingMode::Double.image_count(), 2);
        assert_eq!(BufferingMode::Triple.image_count(), 3);
    }
}
