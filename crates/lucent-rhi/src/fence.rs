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

//! CPU ↔ GPU and GPU ↔ GPU synchronization primitives.

use crate::api::{FenceId, SemaphoreId};
use crate::error::{DeviceError, FenceError};
use crate::traits::GpuBackend;
use std::sync::Arc;

/// A binary fence the CPU waits on to observe GPU completion.
///
/// A fence is attached to a submission via
/// [`Queue::submit`](crate::Queue::submit); the GPU signals it when that
/// submission completes. [`reset`](Self::reset) rearms the fence for
/// reuse, and is only legal after completion has been observed through
/// [`wait`](Self::wait) or [`is_signaled`](Self::is_signaled).
#[derive(Debug)]
pub struct Fence {
    backend: Arc<dyn GpuBackend>,
    id: FenceId,
}

impl Fence {
    pub(crate) fn new(backend: Arc<dyn GpuBackend>, signaled: bool) -> Result<Self, DeviceError> {
        let id = backend.create_fence(signaled)?;
        Ok(Self { backend, id })
    }

    /// The backend handle of this fence.
    pub fn id(&self) -> FenceId {
        self.id
    }

    /// Blocks until the fence signals, or fails with
    /// [`FenceError::Timeout`] after `timeout_ns` nanoseconds.
    pub fn wait(&self, timeout_ns: u64) -> Result<(), FenceError> {
        self.backend.wait_fence(self.id, timeout_ns)
    }

    /// Rearms the fence to the unsignaled state.
    pub fn reset(&self) {
        self.backend.reset_fence(self.id);
    }

    /// Queries the fence without blocking.
    pub fn is_signaled(&self) -> bool {
        self.backend.fence_signaled(self.id)
    }
}

impl Drop for Fence {
    fn drop(&mut self) {
        self.backend.destroy_fence(self.id);
    }
}

/// A GPU ↔ GPU ordering primitive, invisible to the CPU.
///
/// Semaphores link swapchain image acquisition to the submission that
/// renders into the image, and that submission to presentation. They
/// carry no observable state; only [`Fence`] reports completion to the
/// CPU.
#[derive(Debug)]
pub struct Semaphore {
    backend: Arc<dyn GpuBackend>,
    id: SemaphoreId,
}

impl Semaphore {
    pub(crate) fn new(backend: Arc<dyn GpuBackend>) -> Result<Self, DeviceError> {
        let id = backend.create_semaphore()?;
        Ok(Self { backend, id })
    }

    /// The backend handle of this semaphore.
    pub fn id(&self) -> SemaphoreId {
        self.id
    }
}

impl Drop for Semaphore {
    fn drop(&mut self) {
        self.backend.destroy_semaphore(self.id);
    }
}
