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

//! Queue submission and presentation.

use crate::api::{PipelineStages, QueueKind};
use crate::command_buffer::CommandBuffer;
use crate::error::{DeviceError, SwapchainError};
use crate::fence::{Fence, Semaphore};
use crate::swapchain::Swapchain;
use crate::traits::GpuBackend;
use std::sync::Arc;

/// GPU-side ordering constraints attached to a submission.
#[derive(Debug, Default)]
pub struct SubmitDependencies<'a> {
    /// A semaphore GPU execution waits on before reaching
    /// `wait_stages`.
    pub wait: Option<&'a Semaphore>,
    /// The stages that stall until `wait` signals. Ignored when `wait`
    /// is `None`.
    pub wait_stages: PipelineStages,
    /// A semaphore signaled when the submission's execution finishes.
    pub signal: Option<&'a Semaphore>,
}

/// One hardware submission queue of a fixed [`QueueKind`].
///
/// Command buffers submitted to the same queue execute in submission
/// order; ordering across queues requires semaphores.
#[derive(Debug)]
pub struct Queue {
    backend: Arc<dyn GpuBackend>,
    kind: QueueKind,
}

impl Queue {
    pub(crate) fn new(backend: Arc<dyn GpuBackend>, kind: QueueKind) -> Self {
        Self { backend, kind }
    }

    /// The kind of work this queue accepts.
    pub fn kind(&self) -> QueueKind {
        self.kind
    }

    /// Submits a recorded command buffer.
    ///
    /// `fence`, when given, signals on the CPU once the submission
    /// completes; it is the only way completion becomes observable. The
    /// command buffer moves to the Submitted state and must not be
    /// touched until that happens.
    pub fn submit(
        &self,
        cmd: &mut CommandBuffer,
        deps: &SubmitDependencies,
        fence: Option<&Fence>,
    ) -> Result<(), DeviceError> {
        assert!(
            cmd.queue_kind() == self.kind,
            "command buffer recorded for {:?} submitted to {:?} queue",
            cmd.queue_kind(),
            self.kind
        );
        self.backend.submit(
            self.kind,
            cmd.id(),
            deps.wait.map(|s| s.id()),
            deps.wait_stages,
            deps.signal.map(|s| s.id()),
            fence.map(|f| f.id()),
        )?;
        cmd.mark_submitted();
        Ok(())
    }

    /// Queues swapchain image `image_index` for presentation, waiting on
    /// `wait` so the image reaches the screen only after rendering into
    /// it finished. Graphics queues only.
    pub fn present(
        &self,
        swapchain: &Swapchain,
        image_index: u32,
        wait: Option<&Semaphore>,
    ) -> Result<(), SwapchainError> {
        assert!(
            self.kind == QueueKind::Graphics,
            "present on a {:?} queue",
            self.kind
        );
        self.backend
            .present(self.kind, swapchain.id(), image_index, wait.map(|s| s.id()))
    }
}
