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

//! Data structures related to shader modules.

use crate::lucent_bitflags;
use std::borrow::Cow;

/// The programmable stage a shader module is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// The vertex shader stage.
    Vertex,
    /// The fragment (pixel) shader stage.
    Fragment,
    /// The compute shader stage.
    Compute,
}

lucent_bitflags! {
    /// Flags describing which shader stages can access a resource
    /// binding.
    pub struct ShaderStageFlags: u32 {
        /// The vertex shader stage.
        const VERTEX = 1 << 0;
        /// The fragment shader stage.
        const FRAGMENT = 1 << 1;
        /// The compute shader stage.
        const COMPUTE = 1 << 2;
        /// Both graphics stages.
        const VERTEX_FRAGMENT = Self::VERTEX.bits() | Self::FRAGMENT.bits();
        /// All stages.
        const ALL = Self::VERTEX.bits() | Self::FRAGMENT.bits() | Self::COMPUTE.bits();
    }
}

impl ShaderStageFlags {
    /// Creates flags from a single shader stage.
    pub const fn from_stage(stage: ShaderStage) -> Self {
        match stage {
            ShaderStage::Vertex => Self::VERTEX,
            ShaderStage::Fragment => Self::FRAGMENT,
            ShaderStage::Compute => Self::COMPUTE,
        }
    }
}

/// Pre-compiled shader source handed to the backend.
///
/// The RHI carries no shader-compilation pipeline; callers supply
/// backend-consumable bytes (typically SPIR-V produced offline).
#[derive(Debug, Clone)]
pub enum ShaderSource<'a> {
    /// SPIR-V words.
    SpirV(Cow<'a, [u32]>),
    /// WGSL text, for backends that consume it directly.
    Wgsl(Cow<'a, str>),
}

impl ShaderSource<'_> {
    /// Returns `true` if the source contains no code at all.
    pub fn is_empty(&self) -> bool {
        match self {
            ShaderSource::SpirV(words) => words.is_empty(),
            ShaderSource::Wgsl(text) => text.is_empty(),
        }
    }
}

/// A descriptor used to create a [`ShaderModuleId`].
#[derive(Debug, Clone)]
pub struct ShaderModuleDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// The compiled shader source.
    pub source: ShaderSource<'a>,
    /// The entry point symbol (e.g. `main`, `vs_main`).
    pub entry_point: Cow<'a, str>,
    /// The stage this module is compiled for.
    pub stage: ShaderStage,
}

/// An opaque handle to a compiled shader module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderModuleId(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_flags_from_single_stage() {
        assert_eq!(
            ShaderStageFlags::from_stage(ShaderStage::Fragment),
            ShaderStageFlags::FRAGMENT
        );
        assert!(ShaderStageFlags::ALL.contains(ShaderStageFlags::COMPUTE));
        assert!(ShaderStageFlags::VERTEX_FRAGMENT.contains(ShaderStageFlags::VERTEX));
        assert!(!ShaderStageFlags::VERTEX_FRAGMENT.contains(ShaderStageFlags::COMPUTE));
    }

    #[test]
    fn empty_source_detection() {
        assert!(ShaderSource::SpirV(Cow::Borrowed(&[])).is_empty());
        assert!(!ShaderSource::SpirV(Cow::Borrowed(&[0x0723_0203])).is_empty());
        assert!(ShaderSource::Wgsl(Cow::Borrowed("")).is_empty());
    }
}
