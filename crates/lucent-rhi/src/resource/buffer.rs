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

//! The frontend buffer wrapper: CPU-side access, resizing, and deferred
//! release.

use super::{DeferredRelease, RetireQueue};
use crate::api::{BufferDescriptor, BufferId, BufferUsage};
use crate::error::ResourceError;
use crate::traits::GpuBackend;
use std::borrow::Cow;
use std::sync::Arc;

/// A linear range of GPU memory with one fixed usage.
///
/// CPU-side operations ([`cpu_copy`](Self::cpu_copy),
/// [`read_back`](Self::read_back), [`memset`](Self::memset)) are only
/// legal on host-visible usages ([`BufferUsage::Uniform`] and
/// [`BufferUsage::Staging`]); device-local buffers are filled through a
/// staging buffer and a recorded copy
/// ([`CommandBuffer::copy_buffer`](crate::CommandBuffer::copy_buffer)).
///
/// Dropping a buffer defers the backend release until every frame whose
/// submission might reference it has completed.
#[derive(Debug)]
pub struct Buffer {
    backend: Arc<dyn GpuBackend>,
    retire: Arc<RetireQueue>,
    id: BufferId,
    usage: BufferUsage,
    size: u64,
    label: Option<String>,
}

impl Buffer {
    pub(crate) fn new(
        backend: Arc<dyn GpuBackend>,
        retire: Arc<RetireQueue>,
        desc: &BufferDescriptor,
    ) -> Result<Self, ResourceError> {
        if desc.size == 0 {
            return Err(ResourceError::InvalidDescriptor {
                reason: "buffer size must be non-zero".into(),
            });
        }
        let id = backend.create_buffer(desc)?;
        Ok(Self {
            backend,
            retire,
            id,
            usage: desc.usage,
            size: desc.size,
            label: desc.label.as_ref().map(|l| l.to_string()),
        })
    }

    /// The backend handle of this buffer.
    pub fn id(&self) -> BufferId {
        self.id
    }

    /// The fixed usage chosen at creation.
    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    /// The total size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The debug label given at creation, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn check_host_visible(&self) -> Result<(), ResourceError> {
        if self.usage.is_host_visible() {
            Ok(())
        } else {
            Err(ResourceError::NotHostVisible { usage: self.usage })
        }
    }

    fn check_range(&self, offset: u64, len: u64) -> Result<(), ResourceError> {
        match offset.checked_add(len) {
            Some(end) if end <= self.size => Ok(()),
            _ => Err(ResourceError::OutOfBounds {
                offset,
                len,
                size: self.size,
            }),
        }
    }

    /// Writes `data` into the buffer at `offset`. Host-visible usages
    /// only.
    pub fn cpu_copy(&self, offset: u64, data: &[u8]) -> Result<(), ResourceError> {
        self.check_host_visible()?;
        self.check_range(offset, data.len() as u64)?;
        self.backend.write_buffer(self.id, offset, data)
    }

    /// Writes a slice of plain-old-data values at `offset`.
    pub fn cpu_copy_slice<T: bytemuck::Pod>(
        &self,
        offset: u64,
        data: &[T],
    ) -> Result<(), ResourceError> {
        self.cpu_copy(offset, bytemuck::cast_slice(data))
    }

    /// Reads `out.len()` bytes from the buffer at `offset`. Host-visible
    /// usages only.
    pub fn read_back(&self, offset: u64, out: &mut [u8]) -> Result<(), ResourceError> {
        self.check_host_visible()?;
        self.check_range(offset, out.len() as u64)?;
        self.backend.read_buffer(self.id, offset, out)
    }

    /// Fills `size` bytes at `offset` with `value`. Host-visible usages
    /// only.
    pub fn memset(&self, offset: u64, size: u64, value: u8) -> Result<(), ResourceError> {
        self.check_host_visible()?;
        self.check_range(offset, size)?;
        self.backend.fill_buffer(self.id, offset, size, value)
    }

    /// Reallocates the buffer at `new_size`, keeping the same usage.
    ///
    /// With `keep_data`, the first `min(old, new)` bytes are preserved;
    /// this is only honored for host-visible usages, where the bytes can
    /// be copied through the CPU. The old allocation retires once no
    /// frame in flight can reference it, but the handle changes
    /// immediately: callers must rewrite any binding set that referenced
    /// this buffer before the next submission.
    pub fn resize(&mut self, new_size: u64, keep_data: bool) -> Result<(), ResourceError> {
        if new_size == 0 {
            return Err(ResourceError::InvalidDescriptor {
                reason: "buffer size must be non-zero".into(),
            });
        }
        if new_size == self.size {
            return Ok(());
        }
        let desc = BufferDescriptor {
            label: self.label.as_deref().map(Cow::Borrowed),
            usage: self.usage,
            size: new_size,
        };
        let new_id = self.backend.create_buffer(&desc)?;

        if keep_data && self.usage.is_host_visible() {
            let preserved = self.size.min(new_size) as usize;
            let mut bytes = vec![0u8; preserved];
            self.backend.read_buffer(self.id, 0, &mut bytes)?;
            self.backend.write_buffer(new_id, 0, &bytes)?;
        } else if keep_data {
            log::warn!(
                "Buffer resize with keep_data on non-host-visible usage {:?}; contents dropped",
                self.usage
            );
        }

        self.retire.push(DeferredRelease::Buffer(self.id));
        self.id = new_id;
        self.size = new_size;
        Ok(())
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        self.retire.push(DeferredRelease::Buffer(self.id));
    }
}
