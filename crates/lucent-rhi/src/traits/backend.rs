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

use crate::api::*;
use crate::error::{DeviceError, FenceError, PipelineError, ResourceError, SwapchainError};
use crate::platform::RhiWindowHandle;
use std::fmt::Debug;
use std::ops::Range;

/// The single seam between the RHI frontend and a native graphics API.
///
/// One implementation exists per native backend; it is chosen once at
/// process start and fixed for the device's lifetime, so every frontend
/// type holds it as `Arc<dyn GpuBackend>`. The frontend performs all
/// descriptor validation, state-machine enforcement, and resource-state
/// tracking *before* calling in here — an implementation may assume its
/// inputs are structurally valid and restrict itself to translating
/// them into native calls.
///
/// All `cmd_*` methods append one command to an open recording
/// (bracketed by [`begin_commands`](Self::begin_commands) /
/// [`end_commands`](Self::end_commands)); the frontend guarantees they
/// are only invoked between those two calls. Commands execute in
/// recorded order, and command buffers submitted to one queue execute
/// in submission order.
pub trait GpuBackend: Send + Sync + Debug + 'static {
    // ── Adapter & device ────────────────────────────────────────────

    /// Information about the adapter the backend selected at startup.
    fn adapter_info(&self) -> AdapterInfo;

    /// Blocks until all queued work on all queues has completed.
    fn wait_idle(&self) -> Result<(), DeviceError>;

    /// Returns `true` if the vertex fetch stage can consume attributes
    /// of `format`.
    fn supports_vertex_format(&self, format: VertexFormat) -> bool;

    /// Returns `true` if textures of `format` can be created with
    /// `usage`.
    fn supports_texture_format(&self, format: TextureFormat, usage: TextureUsage) -> bool;

    // ── Surface & swapchain ─────────────────────────────────────────

    /// Associates a platform window with the device for presentation.
    fn create_surface(&self, window: RhiWindowHandle) -> Result<SurfaceId, DeviceError>;

    /// Releases a surface.
    fn destroy_surface(&self, surface: SurfaceId);

    /// The surface's current dimensions, as reported by the platform.
    fn surface_extent(&self, surface: SurfaceId) -> Extent2D;

    /// Creates a swapchain of `desc.image_count` presentable images on
    /// `surface`.
    fn create_swapchain(
        &self,
        surface: SurfaceId,
        desc: &SwapchainDescriptor,
    ) -> Result<SwapchainId, SwapchainError>;

    /// Tears down and rebuilds the image ring at `extent`, preserving
    /// format and present mode. Every old image view is released
    /// exactly once.
    fn recreate_swapchain(
        &self,
        swapchain: SwapchainId,
        extent: Extent2D,
    ) -> Result<(), SwapchainError>;

    /// Releases a swapchain and its images.
    fn destroy_swapchain(&self, swapchain: SwapchainId);

    /// The texture backing image `index` of the ring.
    fn swapchain_image(&self, swapchain: SwapchainId, index: u32)
        -> Result<TextureId, SwapchainError>;

    /// Acquires the next presentable image index, optionally signaling
    /// `semaphore` when the image is ready for rendering. May block if
    /// no image is free. Fails with [`SwapchainError::OutOfDate`] after
    /// a surface resize and [`SwapchainError::Minimized`] when the
    /// surface has zero extent.
    fn acquire_next_image(
        &self,
        swapchain: SwapchainId,
        semaphore: Option<SemaphoreId>,
    ) -> Result<u32, SwapchainError>;

    /// Queues image `index` for presentation on `queue`, waiting on
    /// `semaphore` if given. Valid only for a graphics-capable queue.
    fn present(
        &self,
        queue: QueueKind,
        swapchain: SwapchainId,
        index: u32,
        semaphore: Option<SemaphoreId>,
    ) -> Result<(), SwapchainError>;

    // ── Buffers ─────────────────────────────────────────────────────

    /// Allocates a buffer.
    fn create_buffer(&self, desc: &BufferDescriptor) -> Result<BufferId, ResourceError>;

    /// Releases a buffer.
    fn destroy_buffer(&self, buffer: BufferId);

    /// Writes `data` into a host-visible buffer at `offset`.
    fn write_buffer(&self, buffer: BufferId, offset: u64, data: &[u8])
        -> Result<(), ResourceError>;

    /// Reads `out.len()` bytes from a host-visible buffer at `offset`.
    fn read_buffer(&self, buffer: BufferId, offset: u64, out: &mut [u8])
        -> Result<(), ResourceError>;

    /// Fills `size` bytes of a host-visible buffer with `value`.
    fn fill_buffer(
        &self,
        buffer: BufferId,
        offset: u64,
        size: u64,
        value: u8,
    ) -> Result<(), ResourceError>;

    // ── Textures & samplers ─────────────────────────────────────────

    /// Allocates a texture, uploading `desc.initial_data` if present.
    fn create_texture(&self, desc: &TextureDescriptor) -> Result<TextureId, ResourceError>;

    /// Releases a texture.
    fn destroy_texture(&self, texture: TextureId);

    /// Creates a sampler.
    fn create_sampler(&self, desc: &SamplerDescriptor) -> Result<SamplerId, ResourceError>;

    /// Releases a sampler.
    fn destroy_sampler(&self, sampler: SamplerId);

    // ── Shaders & pipelines ─────────────────────────────────────────

    /// Creates a shader module from pre-compiled source.
    fn create_shader_module(
        &self,
        desc: &ShaderModuleDescriptor,
    ) -> Result<ShaderModuleId, ResourceError>;

    /// Releases a shader module.
    fn destroy_shader_module(&self, module: ShaderModuleId);

    /// Compiles an immutable graphics pipeline state object.
    fn create_graphics_pipeline(
        &self,
        desc: &GraphicsPipelineDescriptor,
    ) -> Result<GraphicsPipelineId, PipelineError>;

    /// Releases a graphics pipeline.
    fn destroy_graphics_pipeline(&self, pipeline: GraphicsPipelineId);

    /// Compiles an immutable compute pipeline state object.
    fn create_compute_pipeline(
        &self,
        desc: &ComputePipelineDescriptor,
    ) -> Result<ComputePipelineId, PipelineError>;

    /// Releases a compute pipeline.
    fn destroy_compute_pipeline(&self, pipeline: ComputePipelineId);

    // ── Binding sets ────────────────────────────────────────────────

    /// Creates a binding set layout.
    fn create_binding_set_layout(
        &self,
        desc: &BindingSetLayoutDescriptor,
    ) -> Result<BindingSetLayoutId, ResourceError>;

    /// Releases a binding set layout.
    fn destroy_binding_set_layout(&self, layout: BindingSetLayoutId);

    /// Allocates a binding set conforming to `layout`.
    fn create_binding_set(
        &self,
        layout: BindingSetLayoutId,
    ) -> Result<BindingSetId, ResourceError>;

    /// Releases a binding set.
    fn destroy_binding_set(&self, set: BindingSetId);

    /// Writes one slot of a binding set.
    fn write_binding(
        &self,
        set: BindingSetId,
        slot: u32,
        write: BindingWrite,
    ) -> Result<(), ResourceError>;

    // ── Render passes & targets ─────────────────────────────────────

    /// Creates a render pass description.
    fn create_render_pass(
        &self,
        desc: &RenderPassDescriptor,
    ) -> Result<RenderPassId, ResourceError>;

    /// Releases a render pass.
    fn destroy_render_pass(&self, pass: RenderPassId);

    /// Creates a render target (framebuffer) for a compatible pass.
    fn create_render_target(
        &self,
        desc: &RenderTargetDescriptor,
    ) -> Result<RenderTargetId, ResourceError>;

    /// Releases a render target.
    fn destroy_render_target(&self, target: RenderTargetId);

    // ── Synchronization primitives ──────────────────────────────────

    /// Creates a binary fence, optionally already signaled.
    fn create_fence(&self, signaled: bool) -> Result<FenceId, DeviceError>;

    /// Releases a fence.
    fn destroy_fence(&self, fence: FenceId);

    /// Blocks until the fence signals or `timeout_ns` elapses.
    fn wait_fence(&self, fence: FenceId, timeout_ns: u64) -> Result<(), FenceError>;

    /// Rearms a signaled fence for reuse.
    fn reset_fence(&self, fence: FenceId);

    /// Queries the fence without blocking.
    fn fence_signaled(&self, fence: FenceId) -> bool;

    /// Creates a GPU↔GPU semaphore.
    fn create_semaphore(&self) -> Result<SemaphoreId, DeviceError>;

    /// Releases a semaphore.
    fn destroy_semaphore(&self, semaphore: SemaphoreId);

    // ── Command buffers ─────────────────────────────────────────────

    /// Allocates a command buffer from the pool serving `queue`.
    fn create_command_buffer(&self, queue: QueueKind) -> Result<CommandBufferId, DeviceError>;

    /// Returns a command buffer to its pool.
    fn destroy_command_buffer(&self, cmd: CommandBufferId);

    /// Opens `cmd` for recording, implicitly resetting any previously
    /// recorded contents.
    fn begin_commands(&self, cmd: CommandBufferId);

    /// Closes the recording; `cmd` becomes submittable.
    fn end_commands(&self, cmd: CommandBufferId);

    /// Begins a render pass on `target`, consuming one clear value per
    /// attachment whose load op is `Clear`.
    fn cmd_begin_render_pass(&self, cmd: CommandBufferId, target: RenderTargetId, clears: &[ClearValue]);

    /// Ends the open render pass.
    fn cmd_end_render_pass(&self, cmd: CommandBufferId);

    /// Binds a graphics pipeline.
    fn cmd_bind_graphics_pipeline(&self, cmd: CommandBufferId, pipeline: GraphicsPipelineId);

    /// Binds a compute pipeline.
    fn cmd_bind_compute_pipeline(&self, cmd: CommandBufferId, pipeline: ComputePipelineId);

    /// Binds a vertex buffer to fetch slot `slot`.
    fn cmd_bind_vertex_buffer(&self, cmd: CommandBufferId, slot: u32, buffer: BufferId, offset: u64);

    /// Binds the index buffer.
    fn cmd_bind_index_buffer(
        &self,
        cmd: CommandBufferId,
        buffer: BufferId,
        offset: u64,
        format: IndexFormat,
    );

    /// Binds a binding set at set index `index`.
    fn cmd_bind_binding_set(&self, cmd: CommandBufferId, index: u32, set: BindingSetId);

    /// Sets the dynamic viewport.
    fn cmd_set_viewport(&self, cmd: CommandBufferId, viewport: &Viewport);

    /// Sets the dynamic scissor rectangle.
    fn cmd_set_scissor(&self, cmd: CommandBufferId, scissor: &ScissorRect);

    /// Records a non-indexed draw.
    fn cmd_draw(&self, cmd: CommandBufferId, vertices: Range<u32>, instances: Range<u32>);

    /// Records an indexed draw.
    fn cmd_draw_indexed(
        &self,
        cmd: CommandBufferId,
        indices: Range<u32>,
        base_vertex: i32,
        instances: Range<u32>,
    );

    /// Records a draw whose arguments are read from `buffer` at
    /// `offset` on the GPU.
    fn cmd_draw_indirect(&self, cmd: CommandBufferId, buffer: BufferId, offset: u64);

    /// Records a compute dispatch.
    fn cmd_dispatch(&self, cmd: CommandBufferId, x: u32, y: u32, z: u32);

    /// Records a dispatch whose arguments are read from `buffer` at
    /// `offset` on the GPU.
    fn cmd_dispatch_indirect(&self, cmd: CommandBufferId, buffer: BufferId, offset: u64);

    /// Records an inline CPU → GPU buffer write.
    fn cmd_update_buffer(&self, cmd: CommandBufferId, buffer: BufferId, offset: u64, data: &[u8]);

    /// Records a device-side buffer-to-buffer copy.
    fn cmd_copy_buffer(
        &self,
        cmd: CommandBufferId,
        src: BufferId,
        src_offset: u64,
        dst: BufferId,
        dst_offset: u64,
        size: u64,
    );

    /// Records a texture layout/access transition from `from` to `to`.
    /// The frontend has already filtered out redundant transitions.
    fn cmd_texture_barrier(
        &self,
        cmd: CommandBufferId,
        texture: TextureId,
        from: ResourceState,
        to: ResourceState,
    );

    /// Records an execution/visibility dependency on a buffer.
    fn cmd_buffer_barrier(
        &self,
        cmd: CommandBufferId,
        buffer: BufferId,
        src_stages: PipelineStages,
        dst_stages: PipelineStages,
    );

    /// Records a global execution/visibility dependency.
    fn cmd_memory_barrier(
        &self,
        cmd: CommandBufferId,
        src_stages: PipelineStages,
        dst_stages: PipelineStages,
    );

    /// Records a GPU-side copy/scale between two texture regions.
    fn cmd_blit(
        &self,
        cmd: CommandBufferId,
        src: TextureId,
        src_region: &BlitRegion,
        dst: TextureId,
        dst_region: &BlitRegion,
        filter: BlitFilter,
    );

    // ── Submission ──────────────────────────────────────────────────

    /// Submits a recorded command buffer to `queue`. If `wait` is
    /// given, GPU execution stalls at `wait_stages` until the semaphore
    /// signals; `signal` is signaled when execution finishes, and
    /// `fence` is signaled when the submission completes.
    #[allow(clippy::too_many_arguments)]
    fn submit(
        &self,
        queue: QueueKind,
        cmd: CommandBufferId,
        wait: Option<SemaphoreId>,
        wait_stages: PipelineStages,
        signal: Option<SemaphoreId>,
        fence: Option<FenceId>,
    ) -> Result<(), DeviceError>;
}
