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

//! Data structures related to GPU buffer resources.

use std::borrow::Cow;

/// The single, fixed usage of a buffer, chosen at creation.
///
/// The usage constrains which operations are legal for the buffer's
/// whole lifetime: CPU-side copies are only legal on host-visible
/// usages, index binding only on [`BufferUsage::Index`], and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    /// Vertex data fetched by the input assembler.
    Vertex,
    /// Index data fetched by the input assembler.
    Index,
    /// Shader-visible constants; host-visible for per-frame updates.
    Uniform,
    /// Read/write shader access.
    Storage,
    /// A host-visible source for CPU → GPU transfers.
    Staging,
}

impl BufferUsage {
    /// Returns `true` if buffers of this usage live in memory the CPU
    /// can write directly. [`Buffer::cpu_copy`](crate::Buffer::cpu_copy)
    /// and read-back are only legal on host-visible usages.
    pub const fn is_host_visible(&self) -> bool {
        matches!(self, BufferUsage::Uniform | BufferUsage::Staging)
    }
}

/// A descriptor used to create a [`BufferId`].
#[derive(Debug, Clone)]
pub struct BufferDescriptor<'a> {
    /// An optional debug label for the buffer.
    pub label: Option<Cow<'a, str>>,
    /// The fixed usage of the buffer.
    pub usage: BufferUsage,
    /// The total size of the buffer in bytes. Must be non-zero.
    pub size: u64,
}

/// An opaque handle to a GPU buffer resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u64);
