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

//! Data structures related to GPU texture and sampler resources.

use crate::api::common::{Extent3D, SampleCount, TextureFormat};
use crate::lucent_bitflags;
use std::borrow::Cow;

lucent_bitflags! {
    /// A set of flags describing the allowed usages of a [`TextureId`].
    pub struct TextureUsage: u32 {
        /// The texture can be bound in a shader for sampling.
        const SAMPLED = 1 << 0;
        /// The texture can be bound as a storage image (shader writes).
        const STORAGE = 1 << 1;
        /// The texture can be a color or depth/stencil attachment.
        const ATTACHMENT = 1 << 2;
        /// The texture can be the source of a copy or blit.
        const TRANSFER_SRC = 1 << 3;
        /// The texture can be the destination of a copy or blit.
        const TRANSFER_DST = 1 << 4;
    }
}

/// A descriptor used to create a [`TextureId`].
///
/// Validation happens in the frontend before any backend call: zero
/// width or height, empty `usage`, or an unrecognized `format` reject
/// the descriptor without allocating anything.
#[derive(Debug, Clone)]
pub struct TextureDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// Width, height, and depth (or array layers) in texels.
    pub extent: Extent3D,
    /// The number of mipmap levels. Must be at least 1.
    pub mip_level_count: u32,
    /// The number of samples per pixel.
    pub sample_count: SampleCount,
    /// The texel format.
    pub format: TextureFormat,
    /// A bitmask of [`TextureUsage`] flags. Must not be empty.
    pub usage: TextureUsage,
    /// Optional initial pixel data, uploaded to mip level 0. For
    /// uncompressed formats its length must be exactly
    /// `extent.texel_count() * bytes_per_pixel`.
    pub initial_data: Option<&'a [u8]>,
}

/// Defines how texture coordinates outside `[0, 1]` are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressMode {
    /// Coordinates wrap around. `1.1` becomes `0.1`.
    Repeat,
    /// Coordinates are clamped to the edge texel.
    ClampToEdge,
    /// Coordinates wrap around, mirroring at each integer boundary.
    MirrorRepeat,
}

/// The filtering mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Point sampling; returns the nearest texel.
    Nearest,
    /// Weighted average of the four nearest texels.
    Linear,
}

/// A descriptor used to create a [`SamplerId`].
#[derive(Debug, Clone)]
pub struct SamplerDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// The address mode for the U texture coordinate.
    pub address_mode_u: AddressMode,
    /// The address mode for the V texture coordinate.
    pub address_mode_v: AddressMode,
    /// The address mode for the W texture coordinate.
    pub address_mode_w: AddressMode,
    /// The filter used when the texture is magnified on screen.
    pub mag_filter: FilterMode,
    /// The filter used when the texture is minified on screen.
    pub min_filter: FilterMode,
    /// The filter used between mipmap levels.
    pub mipmap_filter: FilterMode,
    /// The minimum level of detail to sample.
    pub lod_min_clamp: f32,
    /// The maximum level of detail to sample.
    pub lod_max_clamp: f32,
    /// The maximum anisotropy level. 1 disables anisotropic filtering.
    pub anisotropy_clamp: u16,
}

impl Default for SamplerDescriptor<'_> {
    fn default() -> Self {
        Self {
            label: None,
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            address_mode_w: AddressMode::ClampToEdge,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            mipmap_filter: FilterMode::Nearest,
            lod_min_clamp: 0.0,
            lod_max_clamp: 32.0,
            anisotropy_clamp: 1,
        }
    }
}

/// An opaque handle to a GPU texture resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// An opaque handle to a GPU sampler resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerId(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_flags_combine() {
        let usage = TextureUsage::SAMPLED | TextureUsage::TRANSFER_DST;
        assert!(usage.contains(TextureUsage::SAMPLED));
        assert!(!usage.contains(TextureUsage::ATTACHMENT));
        assert!(!usage.is_empty());
        assert!(TextureUsage::EMPTY.is_empty());
    }

    #[test]
    fn default_sampler_is_bilinear_clamp() {
        let desc = SamplerDescriptor::default();
        assert_eq!(desc.address_mode_u, AddressMode::ClampToEdge);
        assert_eq!(desc.mag_filter, FilterMode::Linear);
        assert_eq!(desc.anisotropy_clamp, 1);
    }
}
