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

//! Shader binding sets: groups of resources bound to a pipeline as one
//! unit.

use crate::api::{BindingSetId, BindingSetLayoutEntry, BindingType, BindingWrite};
use crate::error::ResourceError;
use crate::resource::{BindingSetLayout, Buffer, DeferredRelease, RetireQueue, Sampler, Texture};
use crate::traits::GpuBackend;
use std::sync::Arc;

/// A set of resource bindings conforming to a [`BindingSetLayout`],
/// bound atomically at one set index during recording.
///
/// Each `bind_*` write takes effect for every submission recorded after
/// it. Rewriting a slot while a frame that read the old contents is
/// still in flight is a caller contract violation the frontend does not
/// detect; per-frame data belongs in one set per frame slot.
#[derive(Debug)]
pub struct ShaderBindingSet {
    backend: Arc<dyn GpuBackend>,
    retire: Arc<RetireQueue>,
    id: BindingSetId,
    entries: Vec<BindingSetLayoutEntry>,
}

impl ShaderBindingSet {
    pub(crate) fn new(
        backend: Arc<dyn GpuBackend>,
        retire: Arc<RetireQueue>,
        layout: &BindingSetLayout,
    ) -> Result<Self, ResourceError> {
        let id = backend.create_binding_set(layout.id())?;
        Ok(Self {
            backend,
            retire,
            id,
            entries: layout.entries().to_vec(),
        })
    }

    /// The backend handle of this set.
    pub fn id(&self) -> BindingSetId {
        self.id
    }

    fn slot_entry(&self, slot: u32) -> Result<&BindingSetLayoutEntry, ResourceError> {
        self.entries
            .iter()
            .find(|e| e.binding == slot)
            .ok_or(ResourceError::NotFound {
                kind: "binding slot",
                id: slot as u64,
            })
    }

    /// Writes `texture` into `slot`, which must be a sampled- or
    /// storage-texture slot.
    pub fn bind_texture(&self, slot: u32, texture: &Texture) -> Result<(), ResourceError> {
        let entry = self.slot_entry(slot)?;
        if !matches!(
            entry.ty,
            BindingType::SampledTexture | BindingType::StorageTexture
        ) {
            return Err(ResourceError::InvalidDescriptor {
                reason: format!("slot {slot} accepts {:?}, not a texture", entry.ty),
            });
        }
        self.backend
            .write_binding(self.id, slot, BindingWrite::Texture(texture.id()))
    }

    /// Writes `sampler` into `slot`, which must be a sampler slot.
    pub fn bind_sampler(&self, slot: u32, sampler: &Sampler) -> Result<(), ResourceError> {
        let entry = self.slot_entry(slot)?;
        if entry.ty != BindingType::Sampler {
            return Err(ResourceError::InvalidDescriptor {
                reason: format!("slot {slot} accepts {:?}, not a sampler", entry.ty),
            });
        }
        self.backend
            .write_binding(self.id, slot, BindingWrite::Sampler(sampler.id()))
    }

    /// Writes a byte range of `buffer` into `slot`, which must be a
    /// uniform- or storage-buffer slot matching the buffer's usage.
    pub fn bind_buffer(
        &self,
        slot: u32,
        buffer: &Buffer,
        offset: u64,
        size: u64,
    ) -> Result<(), ResourceError> {
        let entry = self.slot_entry(slot)?;
        if !matches!(
            entry.ty,
            BindingType::UniformBuffer | BindingType::StorageBuffer
        ) {
            return Err(ResourceError::InvalidDescriptor {
                reason: format!("slot {slot} accepts {:?}, not a buffer", entry.ty),
            });
        }
        match offset.checked_add(size) {
            Some(end) if end <= buffer.size() => {}
            _ => {
                return Err(ResourceError::OutOfBounds {
                    offset,
                    len: size,
                    size: buffer.size(),
                })
            }
        }
        self.backend.write_binding(
            self.id,
            slot,
            BindingWrite::Buffer {
                buffer: buffer.id(),
                offset,
                size,
            },
        )
    }
}

impl Drop for ShaderBindingSet {
    fn drop(&mut self) {
        self.retire.push(DeferredRelease::BindingSet(self.id));
    }
}
