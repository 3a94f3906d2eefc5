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

//! Common, backend-agnostic enums and small value types shared across
//! the rendering API.

/// A two-dimensional extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent2D {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Extent2D {
    /// Creates a new extent.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension is zero (e.g. a minimized
    /// window).
    pub const fn is_zero(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A three-dimensional extent in texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent3D {
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Depth in texels (or array layers for 2D array textures).
    pub depth: u32,
}

impl Extent3D {
    /// Creates a new 3D extent.
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Total number of texels covered by the extent.
    pub const fn texel_count(&self) -> u64 {
        self.width as u64 * self.height as u64 * self.depth as u64
    }
}

/// A three-dimensional offset into a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Origin3D {
    /// X offset in texels.
    pub x: u32,
    /// Y offset in texels.
    pub y: u32,
    /// Z offset in texels.
    pub z: u32,
}

/// Specifies the data type of indices in an index buffer.
///
/// The format must match how the bound buffer's index data was authored;
/// a mismatch yields undefined index interpretation, not a caught error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexFormat {
    /// Indices are 16-bit unsigned integers.
    Uint16,
    /// Indices are 32-bit unsigned integers.
    Uint32,
}

/// The number of samples per pixel for multisample anti-aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleCount {
    /// 1 sample per pixel (MSAA disabled).
    #[default]
    X1,
    /// 2 samples per pixel.
    X2,
    /// 4 samples per pixel.
    X4,
    /// 8 samples per pixel.
    X8,
}

impl SampleCount {
    /// The sample count as a plain integer.
    pub const fn as_u32(&self) -> u32 {
        match self {
            SampleCount::X1 => 1,
            SampleCount::X2 => 2,
            SampleCount::X4 => 4,
            SampleCount::X8 => 8,
        }
    }
}

/// A backend-agnostic representation of a native graphics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackendType {
    /// Vulkan.
    Vulkan,
    /// Microsoft's DirectX 12.
    Dx12,
    /// Apple's Metal.
    Metal,
    /// OpenGL.
    OpenGL,
    /// The CPU-only headless backend used for tests and tooling.
    Headless,
    /// An unknown or unsupported backend.
    #[default]
    Unknown,
}

/// The physical type of a graphics adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceType {
    /// A GPU integrated into the CPU.
    IntegratedGpu,
    /// A discrete, dedicated GPU.
    DiscreteGpu,
    /// A virtualized GPU.
    VirtualGpu,
    /// A software renderer running on the CPU.
    Cpu,
    /// An unknown device type.
    #[default]
    Unknown,
}

/// Information about the adapter a backend selected at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdapterInfo {
    /// The adapter's marketing name.
    pub name: String,
    /// The native API behind the adapter.
    pub backend: BackendType,
    /// The physical device type.
    pub device_type: DeviceType,
    /// Free-form driver version information.
    pub driver_info: String,
}

/// The kind of work a queue accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueKind {
    /// Rasterization, presentation, and everything below.
    Graphics,
    /// Compute dispatches and transfers.
    Compute,
    /// Copy operations only.
    Transfer,
}

/// How presentation is paced against the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentMode {
    /// Present waits for vertical blank (vSync on). Always available.
    Fifo,
    /// Present immediately; may tear (vSync off).
    Immediate,
    /// Triple-buffered low-latency presentation.
    Mailbox,
}

/// The memory format of pixels in a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// One 8-bit unsigned normalized component.
    R8Unorm,
    /// Two 8-bit unsigned normalized components.
    Rg8Unorm,
    /// Four 8-bit unsigned normalized components (RGBA).
    Rgba8Unorm,
    /// Four 8-bit unsigned normalized components (RGBA), sRGB encoded.
    Rgba8UnormSrgb,
    /// Four 8-bit unsigned normalized components (BGRA).
    Bgra8Unorm,
    /// Four 8-bit unsigned normalized components (BGRA), sRGB encoded.
    Bgra8UnormSrgb,
    /// One 16-bit float component.
    R16Float,
    /// Two 16-bit float components.
    Rg16Float,
    /// Four 16-bit float components.
    Rgba16Float,
    /// One 32-bit float component.
    R32Float,
    /// Two 32-bit float components.
    Rg32Float,
    /// Four 32-bit float components.
    Rgba32Float,
    /// One 32-bit unsigned integer component.
    R32Uint,
    /// 10-bit RGB with 2-bit alpha, unsigned normalized.
    Rgb10a2Unorm,
    /// Packed 11/11/10-bit float RGB.
    Rg11b10Float,
    /// 16-bit unsigned normalized depth.
    Depth16Unorm,
    /// 32-bit float depth.
    Depth32Float,
    /// 24-bit depth with an 8-bit stencil component.
    Depth24PlusStencil8,
    /// BC1 block compression (RGB + 1-bit alpha), 8 bytes per 4x4 block.
    Bc1RgbaUnorm,
    /// BC3 block compression (RGBA), 16 bytes per 4x4 block.
    Bc3RgbaUnorm,
    /// BC5 two-channel block compression, 16 bytes per 4x4 block.
    Bc5RgUnorm,
    /// BC7 high-quality RGBA block compression, 16 bytes per 4x4 block.
    Bc7RgbaUnorm,
}

impl TextureFormat {
    /// Bytes per texel for uncompressed formats, `None` for
    /// block-compressed formats (whose granularity is a 4x4 block).
    pub const fn bytes_per_pixel(&self) -> Option<u32> {
        match self {
            TextureFormat::R8Unorm => Some(1),
            TextureFormat::Rg8Unorm | TextureFormat::Depth16Unorm | TextureFormat::R16Float => {
                Some(2)
            }
            TextureFormat::Rgba8Unorm
            | TextureFormat::Rgba8UnormSrgb
            | TextureFormat::Bgra8Unorm
            | TextureFormat::Bgra8UnormSrgb
            | TextureFormat::Rg16Float
            | TextureFormat::R32Float
            | TextureFormat::R32Uint
            | TextureFormat::Rgb10a2Unorm
            | TextureFormat::Rg11b10Float
            | TextureFormat::Depth32Float
            | TextureFormat::Depth24PlusStencil8 => Some(4),
            TextureFormat::Rgba16Float | TextureFormat::Rg32Float => Some(8),
            TextureFormat::Rgba32Float => Some(16),
            TextureFormat::Bc1RgbaUnorm
            | TextureFormat::Bc3RgbaUnorm
            | TextureFormat::Bc5RgUnorm
            | TextureFormat::Bc7RgbaUnorm => None,
        }
    }

    /// Returns `true` for block-compressed formats.
    pub const fn is_compressed(&self) -> bool {
        matches!(
            self,
            TextureFormat::Bc1RgbaUnorm
                | TextureFormat::Bc3RgbaUnorm
                | TextureFormat::Bc5RgUnorm
                | TextureFormat::Bc7RgbaUnorm
        )
    }

    /// Returns `true` if the format carries a depth component.
    pub const fn is_depth_format(&self) -> bool {
        matches!(
            self,
            TextureFormat::Depth16Unorm
                | TextureFormat::Depth32Float
                | TextureFormat::Depth24PlusStencil8
        )
    }

    /// Returns `true` if the format carries a stencil component.
    pub const fn has_stencil(&self) -> bool {
        matches!(self, TextureFormat::Depth24PlusStencil8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_zero_detection() {
        assert!(Extent2D::new(0, 600).is_zero());
        assert!(Extent2D::new(800, 0).is_zero());
        assert!(!Extent2D::new(800, 600).is_zero());
    }

    #[test]
    fn format_classification() {
        assert_eq!(TextureFormat::Rgba8Unorm.bytes_per_pixel(), Some(4));
        assert_eq!(TextureFormat::Rgba32Float.bytes_per_pixel(), Some(16));
        assert_eq!(TextureFormat::Bc7RgbaUnorm.bytes_per_pixel(), None);
        assert!(TextureFormat::Bc1RgbaUnorm.is_compressed());
        assert!(TextureFormat::Depth32Float.is_depth_format());
        assert!(!TextureFormat::Depth32Float.has_stencil());
        assert!(TextureFormat::Depth24PlusStencil8.has_stencil());
    }

    #[test]
    fn sample_count_values() {
        assert_eq!(SampleCount::X1.as_u32(), 1);
        assert_eq!(SampleCount::X8.as_u32(), 8);
        assert_eq!(SampleCount::default(), SampleCount::X1);
    }
}
