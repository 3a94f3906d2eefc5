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

//! Data structures for shader binding sets: named groups of resource
//! bindings (textures, samplers, buffer ranges) bound atomically.

use crate::api::buffer::BufferId;
use crate::api::shader::ShaderStageFlags;
use crate::api::texture::{SamplerId, TextureId};
use std::borrow::Cow;

/// The kind of resource a binding slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingType {
    /// A texture read through a sampler.
    SampledTexture,
    /// A texture with shader read/write access.
    StorageTexture,
    /// A standalone sampler.
    Sampler,
    /// A uniform buffer range.
    UniformBuffer,
    /// A storage buffer range.
    StorageBuffer,
}

/// One slot in a binding set layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingSetLayoutEntry {
    /// The integer binding index within the set.
    pub binding: u32,
    /// The resource kind the slot accepts.
    pub ty: BindingType,
    /// The shader stages allowed to access the slot.
    pub visibility: ShaderStageFlags,
}

/// A descriptor used to create a [`BindingSetLayoutId`].
#[derive(Debug, Clone)]
pub struct BindingSetLayoutDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// The slots of the set, in any order; binding indices must be
    /// unique within the set.
    pub entries: Cow<'a, [BindingSetLayoutEntry]>,
}

/// A single write into one slot of a binding set, as consumed by the
/// backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingWrite {
    /// Bind a texture for sampled or storage access.
    Texture(TextureId),
    /// Bind a sampler.
    Sampler(SamplerId),
    /// Bind a byte range of a buffer.
    Buffer {
        /// The buffer to bind.
        buffer: BufferId,
        /// Byte offset of the bound range.
        offset: u64,
        /// Byte length of the bound range.
        size: u64,
    },
}

/// An opaque handle to a binding set layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingSetLayoutId(pub u64);

/// An opaque handle to a binding set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingSetId(pub u64);
