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

//! Command recording and the command-buffer state machine.

use crate::api::{
    BlitFilter, BlitRegion, ClearValue, CommandBufferId, IndexFormat, PipelineStages, QueueKind,
    ResourceState, ScissorRect, TextureUsage, Viewport,
};
use crate::binding::ShaderBindingSet;
use crate::error::DeviceError;
use crate::pipeline::{ComputePipeline, GraphicsPipeline};
use crate::render_target::RenderTarget;
use crate::resource::{Buffer, Texture};
use crate::traits::GpuBackend;
use std::ops::Range;
use std::sync::Arc;

/// The lifecycle of a command buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordState {
    /// Empty, ready for [`CommandBuffer::begin`].
    Initial,
    /// Between `begin` and `end`; commands may be recorded.
    Recording,
    /// Recorded and closed; ready for submission.
    Executable,
    /// Handed to a queue; untouchable until the attached fence is
    /// observed.
    Submitted,
}

/// A transition of a texture's tracked [`ResourceState`].
#[derive(Debug)]
pub struct TextureBarrier<'a> {
    /// The texture to transition.
    pub texture: &'a Texture,
    /// The state the texture must be in for the commands that follow.
    pub new_state: ResourceState,
}

/// An execution/visibility dependency on a buffer between two pipeline
/// stage sets.
#[derive(Debug)]
pub struct BufferBarrier<'a> {
    /// The buffer the dependency covers.
    pub buffer: &'a Buffer,
    /// Stages that must complete before the barrier.
    pub src_stages: PipelineStages,
    /// Stages that wait at the barrier.
    pub dst_stages: PipelineStages,
}

/// A global execution/visibility dependency between two pipeline stage
/// sets.
#[derive(Debug, Clone, Copy)]
pub struct MemoryBarrier {
    /// Stages that must complete before the barrier.
    pub src_stages: PipelineStages,
    /// Stages that wait at the barrier.
    pub dst_stages: PipelineStages,
}

/// An ordered recording of GPU commands for one queue kind.
///
/// Recording follows a strict state machine: Initial → Recording
/// (via [`begin`](Self::begin)) → Executable (via [`end`](Self::end)) →
/// Submitted (via [`Queue::submit`](crate::Queue::submit)) → back to
/// Initial once the submission's fence has been observed. Calling a
/// method in the wrong state is a programming error and panics;
/// misrecording GPU commands is never recoverable at runtime.
///
/// Commands execute in recorded order. GPU-side hazards between them
/// are the caller's responsibility, expressed through
/// [`texture_barrier`](Self::texture_barrier),
/// [`buffer_barrier`](Self::buffer_barrier), and
/// [`memory_barrier`](Self::memory_barrier).
#[derive(Debug)]
pub struct CommandBuffer {
    backend: Arc<dyn GpuBackend>,
    id: CommandBufferId,
    queue_kind: QueueKind,
    state: RecordState,
    in_render_pass: bool,
}

impl CommandBuffer {
    pub(crate) fn new(
        backend: Arc<dyn GpuBackend>,
        queue_kind: QueueKind,
    ) -> Result<Self, DeviceError> {
        let id = backend.create_command_buffer(queue_kind)?;
        Ok(Self {
            backend,
            id,
            queue_kind,
            state: RecordState::Initial,
            in_render_pass: false,
        })
    }

    /// The backend handle of this command buffer.
    pub fn id(&self) -> CommandBufferId {
        self.id
    }

    /// The queue kind this buffer records for.
    pub fn queue_kind(&self) -> QueueKind {
        self.queue_kind
    }

    /// Whether the buffer is currently between `begin` and `end`.
    pub fn is_recording(&self) -> bool {
        self.state == RecordState::Recording
    }

    fn assert_recording(&self, op: &str) {
        assert!(
            self.state == RecordState::Recording,
            "{op} recorded outside begin/end (state {:?})",
            self.state
        );
    }

    /// Opens the buffer for recording.
    pub fn begin(&mut self) {
        assert!(
            self.state == RecordState::Initial,
            "begin on a command buffer in state {:?}",
            self.state
        );
        self.backend.begin_commands(self.id);
        self.state = RecordState::Recording;
    }

    /// Closes the recording; the buffer becomes submittable.
    pub fn end(&mut self) {
        self.assert_recording("end");
        assert!(!self.in_render_pass, "end with a render pass still open");
        self.backend.end_commands(self.id);
        self.state = RecordState::Executable;
    }

    pub(crate) fn mark_submitted(&mut self) {
        assert!(
            self.state == RecordState::Executable,
            "submit of a command buffer in state {:?}",
            self.state
        );
        self.state = RecordState::Submitted;
    }

    /// Returns the buffer to Initial after its submission's completion
    /// has been observed through a fence.
    pub(crate) fn reset_to_initial(&mut self) {
        assert!(
            self.state == RecordState::Submitted,
            "reset of a command buffer in state {:?}",
            self.state
        );
        self.state = RecordState::Initial;
    }

    /// Begins a render pass on `target`. `clears` supplies one value per
    /// attachment whose load op is `Clear`, in attachment order (color
    /// first, then depth/stencil).
    pub fn begin_render_pass(&mut self, target: &RenderTarget, clears: &[ClearValue]) {
        self.assert_recording("begin_render_pass");
        assert!(!self.in_render_pass, "render passes cannot nest");
        self.backend.cmd_begin_render_pass(self.id, target.id(), clears);
        self.in_render_pass = true;
    }

    /// Ends the open render pass.
    pub fn end_render_pass(&mut self) {
        self.assert_recording("end_render_pass");
        assert!(self.in_render_pass, "end_render_pass without an open pass");
        self.backend.cmd_end_render_pass(self.id);
        self.in_render_pass = false;
    }

    /// Binds a graphics pipeline for subsequent draws.
    pub fn bind_graphics_pipeline(&mut self, pipeline: &GraphicsPipeline) {
        self.assert_recording("bind_graphics_pipeline");
        self.backend.cmd_bind_graphics_pipeline(self.id, pipeline.id());
    }

    /// Binds a compute pipeline for subsequent dispatches.
    pub fn bind_compute_pipeline(&mut self, pipeline: &ComputePipeline) {
        self.assert_recording("bind_compute_pipeline");
        self.backend.cmd_bind_compute_pipeline(self.id, pipeline.id());
    }

    /// Binds `buffer` to vertex fetch slot `slot` at `offset`.
    pub fn bind_vertex_buffer(&mut self, slot: u32, buffer: &Buffer, offset: u64) {
        self.assert_recording("bind_vertex_buffer");
        self.backend.cmd_bind_vertex_buffer(self.id, slot, buffer.id(), offset);
    }

    /// Binds `buffer` as the index buffer at `offset`.
    pub fn bind_index_buffer(&mut self, buffer: &Buffer, offset: u64, format: IndexFormat) {
        self.assert_recording("bind_index_buffer");
        self.backend.cmd_bind_index_buffer(self.id, buffer.id(), offset, format);
    }

    /// Binds a shader binding set at set index `index`.
    pub fn bind_binding_set(&mut self, index: u32, set: &ShaderBindingSet) {
        self.assert_recording("bind_binding_set");
        self.backend.cmd_bind_binding_set(self.id, index, set.id());
    }

    /// Sets the dynamic viewport.
    pub fn set_viewport(&mut self, viewport: &Viewport) {
        self.assert_recording("set_viewport");
        self.backend.cmd_set_viewport(self.id, viewport);
    }

    /// Sets the dynamic scissor rectangle.
    pub fn set_scissor(&mut self, scissor: &ScissorRect) {
        self.assert_recording("set_scissor");
        self.backend.cmd_set_scissor(self.id, scissor);
    }

    /// Records a non-indexed draw over `vertices` for `instances`.
    pub fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>) {
        self.assert_recording("draw");
        self.backend.cmd_draw(self.id, vertices, instances);
    }

    /// Records an indexed draw over `indices` for `instances`, adding
    /// `base_vertex` to every index.
    pub fn draw_indexed(&mut self, indices: Range<u32>, base_vertex: i32, instances: Range<u32>) {
        self.assert_recording("draw_indexed");
        self.backend.cmd_draw_indexed(self.id, indices, base_vertex, instances);
    }

    /// Records a draw whose arguments the GPU reads from `buffer` at
    /// `offset`.
    pub fn draw_indirect(&mut self, buffer: &Buffer, offset: u64) {
        self.assert_recording("draw_indirect");
        self.backend.cmd_draw_indirect(self.id, buffer.id(), offset);
    }

    /// Records a compute dispatch of `x` × `y` × `z` workgroups.
    pub fn dispatch(&mut self, x: u32, y: u32, z: u32) {
        self.assert_recording("dispatch");
        self.backend.cmd_dispatch(self.id, x, y, z);
    }

    /// Records a dispatch whose arguments the GPU reads from `buffer`
    /// at `offset`.
    pub fn dispatch_indirect(&mut self, buffer: &Buffer, offset: u64) {
        self.assert_recording("dispatch_indirect");
        self.backend.cmd_dispatch_indirect(self.id, buffer.id(), offset);
    }

    /// Records an inline write of `data` into `buffer` at `offset`,
    /// ordered with the surrounding commands.
    pub fn update_buffer(&mut self, buffer: &Buffer, offset: u64, data: &[u8]) {
        self.assert_recording("update_buffer");
        self.backend.cmd_update_buffer(self.id, buffer.id(), offset, data);
    }

    /// Records a device-side copy of `size` bytes between two buffers.
    pub fn copy_buffer(
        &mut self,
        src: &Buffer,
        src_offset: u64,
        dst: &Buffer,
        dst_offset: u64,
        size: u64,
    ) {
        self.assert_recording("copy_buffer");
        self.backend
            .cmd_copy_buffer(self.id, src.id(), src_offset, dst.id(), dst_offset, size);
    }

    /// Records a transition of the texture's tracked state.
    ///
    /// The texture's tracked [`ResourceState`] supplies the source of
    /// the transition; if it already equals `barrier.new_state`, nothing
    /// is recorded.
    pub fn texture_barrier(&mut self, barrier: &TextureBarrier) {
        self.assert_recording("texture_barrier");
        if let Some(from) = barrier.texture.transition(barrier.new_state) {
            self.backend
                .cmd_texture_barrier(self.id, barrier.texture.id(), from, barrier.new_state);
        }
    }

    /// Records an execution/visibility dependency on a buffer.
    pub fn buffer_barrier(&mut self, barrier: &BufferBarrier) {
        self.assert_recording("buffer_barrier");
        self.backend.cmd_buffer_barrier(
            self.id,
            barrier.buffer.id(),
            barrier.src_stages,
            barrier.dst_stages,
        );
    }

    /// Records a global execution/visibility dependency.
    pub fn memory_barrier(&mut self, barrier: &MemoryBarrier) {
        self.assert_recording("memory_barrier");
        self.backend
            .cmd_memory_barrier(self.id, barrier.src_stages, barrier.dst_stages);
    }

    /// Records a GPU-side copy/scale from a region of `src` to a region
    /// of `dst`, filtering with `filter` when the regions differ in
    /// size.
    pub fn blit(
        &mut self,
        src: &Texture,
        src_region: &BlitRegion,
        dst: &Texture,
        dst_region: &BlitRegion,
        filter: BlitFilter,
    ) {
        self.assert_recording("blit");
        assert!(
            src.usage().contains(TextureUsage::TRANSFER_SRC),
            "blit source lacks TRANSFER_SRC usage"
        );
        assert!(
            dst.usage().contains(TextureUsage::TRANSFER_DST),
            "blit destination lacks TRANSFER_DST usage"
        );
        self.backend
            .cmd_blit(self.id, src.id(), src_region, dst.id(), dst_region, filter);
    }
}

impl Drop for CommandBuffer {
    fn drop(&mut self) {
        self.backend.destroy_command_buffer(self.id);
    }
}
