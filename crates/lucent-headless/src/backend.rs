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

//! The CPU-only backend implementation.

use crate::counters::CallCounters;
use lucent_rhi::{
    AdapterInfo, BackendType, BindingSetLayoutDescriptor, BindingSetLayoutId, BindingSetId,
    BlitFilter, BlitRegion, BufferDescriptor, BufferId, BufferUsage, ClearValue,
    CommandBufferId, ComputePipelineDescriptor, ComputePipelineId, DeviceError, DeviceType,
    Extent2D, Extent3D, FenceError, FenceId, GpuBackend, GraphicsPipelineDescriptor,
    GraphicsPipelineId, IndexFormat, PipelineError, PipelineStages, PresentMode, QueueKind,
    RenderPassDescriptor, RenderPassId, RenderTargetDescriptor, RenderTargetId, ResourceError,
    ResourceState, RhiWindowHandle, SamplerDescriptor, SamplerId, ScissorRect, SemaphoreId,
    ShaderModuleDescriptor, ShaderModuleId, SurfaceId, SwapchainDescriptor, SwapchainError,
    SwapchainId, TextureDescriptor, TextureFormat, TextureId, TextureUsage, VertexFormat,
    Viewport,
};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

struct SurfaceEntry {
    window: RhiWindowHandle,
}

struct SwapchainEntry {
    surface: SurfaceId,
    extent: Extent2D,
    #[allow(dead_code)]
    format: TextureFormat,
    #[allow(dead_code)]
    present_mode: PresentMode,
    images: Vec<TextureId>,
    next_acquire: u32,
}

struct BufferEntry {
    #[allow(dead_code)]
    usage: BufferUsage,
    data: Vec<u8>,
}

struct TextureEntry {
    #[allow(dead_code)]
    format: TextureFormat,
    #[allow(dead_code)]
    extent: Extent3D,
}

struct CommandBufferEntry {
    queue: QueueKind,
    recording: bool,
    commands: u32,
}

struct BindingSetEntry {
    #[allow(dead_code)]
    layout: BindingSetLayoutId,
    writes: HashMap<u32, lucent_rhi::BindingWrite>,
}

/// A [`GpuBackend`] that executes everything on the CPU, instantly.
///
/// Submission is synchronous: a fence attached to a submission is
/// signaled before `submit` returns, and buffer commands
/// (`cmd_update_buffer`, `cmd_copy_buffer`) apply at record time. The
/// observable ordering a frontend relies on — fences after submission,
/// round-robin image indices, out-of-date on surface drift — is
/// faithful; only the passage of time is compressed to zero.
pub struct HeadlessBackend {
    next_id: AtomicU64,
    counters: CallCounters,
    surfaces: Mutex<HashMap<u64, SurfaceEntry>>,
    swapchains: Mutex<HashMap<u64, SwapchainEntry>>,
    buffers: Mutex<HashMap<u64, BufferEntry>>,
    textures: Mutex<HashMap<u64, TextureEntry>>,
    samplers: Mutex<HashSet<u64>>,
    shader_modules: Mutex<HashSet<u64>>,
    graphics_pipelines: Mutex<HashSet<u64>>,
    compute_pipelines: Mutex<HashSet<u64>>,
    binding_set_layouts: Mutex<HashSet<u64>>,
    binding_sets: Mutex<HashMap<u64, BindingSetEntry>>,
    render_passes: Mutex<HashSet<u64>>,
    render_targets: Mutex<HashSet<u64>>,
    fences: Mutex<HashMap<u64, bool>>,
    semaphores: Mutex<HashSet<u64>>,
    command_buffers: Mutex<HashMap<u64, CommandBufferEntry>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl HeadlessBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            counters: CallCounters::default(),
            surfaces: Mutex::new(HashMap::new()),
            swapchains: Mutex::new(HashMap::new()),
            buffers: Mutex::new(HashMap::new()),
            textures: Mutex::new(HashMap::new()),
            samplers: Mutex::new(HashSet::new()),
            shader_modules: Mutex::new(HashSet::new()),
            graphics_pipelines: Mutex::new(HashSet::new()),
            compute_pipelines: Mutex::new(HashSet::new()),
            binding_set_layouts: Mutex::new(HashSet::new()),
            binding_sets: Mutex::new(HashMap::new()),
            render_passes: Mutex::new(HashSet::new()),
            render_targets: Mutex::new(HashSet::new()),
            fences: Mutex::new(HashMap::new()),
            semaphores: Mutex::new(HashSet::new()),
            command_buffers: Mutex::new(HashMap::new()),
        }
    }

    /// The per-entry-point call counters.
    pub fn counters(&self) -> &CallCounters {
        &self.counters
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn window_of(&self, surface: SurfaceId) -> Option<RhiWindowHandle> {
        lock(&self.surfaces)
            .get(&surface.0)
            .map(|entry| entry.window.clone())
    }

    fn alloc_image(&self, format: TextureFormat, extent: Extent2D) -> TextureId {
        let id = TextureId(self.next_id());
        CallCounters::bump(&self.counters.texture_creates);
        lock(&self.textures).insert(
            id.0,
            TextureEntry {
                format,
                extent: Extent3D {
                    width: extent.width,
                    height: extent.height,
                    depth: 1,
                },
            },
        );
        id
    }

    fn release_images(&self, images: &[TextureId]) {
        let mut textures = lock(&self.textures);
        for image in images {
            if textures.remove(&image.0).is_some() {
                CallCounters::bump(&self.counters.swapchain_image_releases);
            }
        }
    }

    fn record(&self, cmd: CommandBufferId, what: &str) {
        let mut command_buffers = lock(&self.command_buffers);
        match command_buffers.get_mut(&cmd.0) {
            Some(entry) if entry.recording => entry.commands += 1,
            Some(_) => log::error!("{what} on command buffer {:?} outside recording", cmd),
            None => log::error!("{what} on unknown command buffer {:?}", cmd),
        }
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HeadlessBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessBackend")
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl GpuBackend for HeadlessBackend {
    fn adapter_info(&self) -> AdapterInfo {
        AdapterInfo {
            name: "Lucent Headless".into(),
            backend: BackendType::Headless,
            device_type: DeviceType::Cpu,
            driver_info: concat!("lucent-headless ", env!("CARGO_PKG_VERSION")).into(),
        }
    }

    fn wait_idle(&self) -> Result<(), DeviceError> {
        // Everything completed at submission; nothing to drain.
        Ok(())
    }

    fn supports_vertex_format(&self, format: VertexFormat) -> bool {
        !matches!(
            format,
            VertexFormat::Float64
                | VertexFormat::Float64x2
                | VertexFormat::Float64x3
                | VertexFormat::Float64x4
        )
    }

    fn supports_texture_format(&self, format: TextureFormat, usage: TextureUsage) -> bool {
        if format.is_compressed()
            && usage.intersects(TextureUsage::STORAGE | TextureUsage::ATTACHMENT)
        {
            return false;
        }
        if format.is_depth_format() && usage.contains(TextureUsage::STORAGE) {
            return false;
        }
        true
    }

    fn create_surface(&self, window: RhiWindowHandle) -> Result<SurfaceId, DeviceError> {
        let id = SurfaceId(self.next_id());
        lock(&self.surfaces).insert(id.0, SurfaceEntry { window });
        Ok(id)
    }

    fn destroy_surface(&self, surface: SurfaceId) {
        if lock(&self.surfaces).remove(&surface.0).is_none() {
            log::warn!("destroy_surface on unknown {:?}", surface);
        }
    }

    fn surface_extent(&self, surface: SurfaceId) -> Extent2D {
        match self.window_of(surface) {
            Some(window) => {
                let (width, height) = window.inner_size();
                Extent2D { width, height }
            }
            None => Extent2D {
                width: 0,
                height: 0,
            },
        }
    }

    fn create_swapchain(
        &self,
        surface: SurfaceId,
        desc: &SwapchainDescriptor,
    ) -> Result<SwapchainId, SwapchainError> {
        if self.window_of(surface).is_none() {
            return Err(SwapchainError::CreationFailed(format!(
                "unknown surface {surface:?}"
            )));
        }
        if desc.image_count == 0 {
            return Err(SwapchainError::CreationFailed(
                "image_count must be at least 1".into(),
            ));
        }
        let images = (0..desc.image_count)
            .map(|_| self.alloc_image(desc.format, desc.extent))
            .collect();
        let id = SwapchainId(self.next_id());
        lock(&self.swapchains).insert(
            id.0,
            SwapchainEntry {
                surface,
                extent: desc.extent,
                format: desc.format,
                present_mode: desc.present_mode,
                images,
                next_acquire: 0,
            },
        );
        Ok(id)
    }

    fn recreate_swapchain(
        &self,
        swapchain: SwapchainId,
        extent: Extent2D,
    ) -> Result<(), SwapchainError> {
        let (format, old_images) = {
            let mut swapchains = lock(&self.swapchains);
            let entry = swapchains.get_mut(&swapchain.0).ok_or_else(|| {
                SwapchainError::CreationFailed(format!("unknown swapchain {swapchain:?}"))
            })?;
            entry.extent = extent;
            entry.next_acquire = 0;
            (entry.format, std::mem::take(&mut entry.images))
        };
        self.release_images(&old_images);
        let images: Vec<_> = (0..old_images.len())
            .map(|_| self.alloc_image(format, extent))
            .collect();
        if let Some(entry) = lock(&self.swapchains).get_mut(&swapchain.0) {
            entry.images = images;
        }
        Ok(())
    }

    fn destroy_swapchain(&self, swapchain: SwapchainId) {
        let entry = lock(&self.swapchains).remove(&swapchain.0);
        match entry {
            Some(entry) => self.release_images(&entry.images),
            None => log::warn!("destroy_swapchain on unknown {:?}", swapchain),
        }
    }

    fn swapchain_image(
        &self,
        swapchain: SwapchainId,
        index: u32,
    ) -> Result<TextureId, SwapchainError> {
        let swapchains = lock(&self.swapchains);
        let entry = swapchains
            .get(&swapchain.0)
            .ok_or_else(|| SwapchainError::BackendError(format!("unknown {swapchain:?}")))?;
        entry
            .images
            .get(index as usize)
            .copied()
            .ok_or(SwapchainError::InvalidImageIndex {
                index,
                image_count: entry.images.len() as u32,
            })
    }

    fn acquire_next_image(
        &self,
        swapchain: SwapchainId,
        _semaphore: Option<SemaphoreId>,
    ) -> Result<u32, SwapchainError> {
        CallCounters::bump(&self.counters.acquires);
        let (surface, extent, image_count) = {
            let swapchains = lock(&self.swapchains);
            let entry = swapchains
                .get(&swapchain.0)
                .ok_or_else(|| SwapchainError::BackendError(format!("unknown {swapchain:?}")))?;
            (entry.surface, entry.extent, entry.images.len() as u32)
        };
        let current = self.surface_extent(surface);
        if current.is_zero() {
            return Err(SwapchainError::Minimized);
        }
        if current != extent {
            return Err(SwapchainError::OutOfDate);
        }
        let mut swapchains = lock(&self.swapchains);
        let entry = swapchains
            .get_mut(&swapchain.0)
            .ok_or_else(|| SwapchainError::BackendError(format!("unknown {swapchain:?}")))?;
        let index = entry.next_acquire;
        entry.next_acquire = (entry.next_acquire + 1) % image_count;
        Ok(index)
    }

    fn present(
        &self,
        queue: QueueKind,
        swapchain: SwapchainId,
        index: u32,
        _semaphore: Option<SemaphoreId>,
    ) -> Result<(), SwapchainError> {
        assert!(queue == QueueKind::Graphics, "present on a {queue:?} queue");
        CallCounters::bump(&self.counters.presents);
        let (surface, extent, image_count) = {
            let swapchains = lock(&self.swapchains);
            let entry = swapchains
                .get(&swapchain.0)
                .ok_or_else(|| SwapchainError::BackendError(format!("unknown {swapchain:?}")))?;
            (entry.surface, entry.extent, entry.images.len() as u32)
        };
        if index >= image_count {
            return Err(SwapchainError::InvalidImageIndex { index, image_count });
        }
        if self.surface_extent(surface) != extent {
            return Err(SwapchainError::OutOfDate);
        }
        Ok(())
    }

    fn create_buffer(&self, desc: &BufferDescriptor) -> Result<BufferId, ResourceError> {
        CallCounters::bump(&self.counters.buffer_creates);
        let id = BufferId(self.next_id());
        lock(&self.buffers).insert(
            id.0,
            BufferEntry {
                usage: desc.usage,
                data: vec![0u8; desc.size as usize],
            },
        );
        Ok(id)
    }

    fn destroy_buffer(&self, buffer: BufferId) {
        if lock(&self.buffers).remove(&buffer.0).is_some() {
            CallCounters::bump(&self.counters.buffer_destroys);
        } else {
            log::warn!("destroy_buffer on unknown {:?}", buffer);
        }
    }

    fn write_buffer(
        &self,
        buffer: BufferId,
        offset: u64,
        data: &[u8],
    ) -> Result<(), ResourceError> {
        let mut buffers = lock(&self.buffers);
        let entry = buffers.get_mut(&buffer.0).ok_or(ResourceError::NotFound {
            kind: "buffer",
            id: buffer.0,
        })?;
        let offset = offset as usize;
        let end = offset.checked_add(data.len()).filter(|&e| e <= entry.data.len());
        match end {
            Some(end) => {
                entry.data[offset..end].copy_from_slice(data);
                Ok(())
            }
            None => Err(ResourceError::OutOfBounds {
                offset: offset as u64,
                len: data.len() as u64,
                size: entry.data.len() as u64,
            }),
        }
    }

    fn read_buffer(
        &self,
        buffer: BufferId,
        offset: u64,
        out: &mut [u8],
    ) -> Result<(), ResourceError> {
        let buffers = lock(&self.buffers);
        let entry = buffers.get(&buffer.0).ok_or(ResourceError::NotFound {
            kind: "buffer",
            id: buffer.0,
        })?;
        let offset = offset as usize;
        let end = offset.checked_add(out.len()).filter(|&e| e <= entry.data.len());
        match end {
            Some(end) => {
                out.copy_from_slice(&entry.data[offset..end]);
                Ok(())
            }
            None => Err(ResourceError::OutOfBounds {
                offset: offset as u64,
                len: out.len() as u64,
                size: entry.data.len() as u64,
            }),
        }
    }

    fn fill_buffer(
        &self,
        buffer: BufferId,
        offset: u64,
        size: u64,
        value: u8,
    ) -> Result<(), ResourceError> {
        let mut buffers = lock(&self.buffers);
        let entry = buffers.get_mut(&buffer.0).ok_or(ResourceError::NotFound {
            kind: "buffer",
            id: buffer.0,
        })?;
        let offset = offset as usize;
        let end = offset.checked_add(size as usize).filter(|&e| e <= entry.data.len());
        match end {
            Some(end) => {
                entry.data[offset..end].fill(value);
                Ok(())
            }
            None => Err(ResourceError::OutOfBounds {
                offset: offset as u64,
                len: size,
                size: entry.data.len() as u64,
            }),
        }
    }

    fn create_texture(&self, desc: &TextureDescriptor) -> Result<TextureId, ResourceError> {
        CallCounters::bump(&self.counters.texture_creates);
        let id = TextureId(self.next_id());
        lock(&self.textures).insert(
            id.0,
            TextureEntry {
                format: desc.format,
                extent: desc.extent,
            },
        );
        Ok(id)
    }

    fn destroy_texture(&self, texture: TextureId) {
        if lock(&self.textures).remove(&texture.0).is_some() {
            CallCounters::bump(&self.counters.texture_destroys);
        } else {
            log::warn!("destroy_texture on unknown {:?}", texture);
        }
    }

    fn create_sampler(&self, _desc: &SamplerDescriptor) -> Result<SamplerId, ResourceError> {
        let id = SamplerId(self.next_id());
        lock(&self.samplers).insert(id.0);
        Ok(id)
    }

    fn destroy_sampler(&self, sampler: SamplerId) {
        lock(&self.samplers).remove(&sampler.0);
    }

    fn create_shader_module(
        &self,
        _desc: &ShaderModuleDescriptor,
    ) -> Result<ShaderModuleId, ResourceError> {
        let id = ShaderModuleId(self.next_id());
        lock(&self.shader_modules).insert(id.0);
        Ok(id)
    }

    fn destroy_shader_module(&self, module: ShaderModuleId) {
        lock(&self.shader_modules).remove(&module.0);
    }

    fn create_graphics_pipeline(
        &self,
        desc: &GraphicsPipelineDescriptor,
    ) -> Result<GraphicsPipelineId, PipelineError> {
        CallCounters::bump(&self.counters.graphics_pipeline_creates);
        let modules = lock(&self.shader_modules);
        if !modules.contains(&desc.vertex_shader.0) {
            return Err(PipelineError::InvalidShaderModule {
                id: desc.vertex_shader,
            });
        }
        if let Some(fragment) = desc.fragment_shader {
            if !modules.contains(&fragment.0) {
                return Err(PipelineError::InvalidShaderModule { id: fragment });
            }
        }
        drop(modules);
        let id = GraphicsPipelineId(self.next_id());
        lock(&self.graphics_pipelines).insert(id.0);
        Ok(id)
    }

    fn destroy_graphics_pipeline(&self, pipeline: GraphicsPipelineId) {
        if lock(&self.graphics_pipelines).remove(&pipeline.0) {
            CallCounters::bump(&self.counters.graphics_pipeline_destroys);
        }
    }

    fn create_compute_pipeline(
        &self,
        desc: &ComputePipelineDescriptor,
    ) -> Result<ComputePipelineId, PipelineError> {
        if !lock(&self.shader_modules).contains(&desc.shader.0) {
            return Err(PipelineError::InvalidShaderModule { id: desc.shader });
        }
        let id = ComputePipelineId(self.next_id());
        lock(&self.compute_pipelines).insert(id.0);
        Ok(id)
    }

    fn destroy_compute_pipeline(&self, pipeline: ComputePipelineId) {
        lock(&self.compute_pipelines).remove(&pipeline.0);
    }

    fn create_binding_set_layout(
        &self,
        _desc: &BindingSetLayoutDescriptor,
    ) -> Result<BindingSetLayoutId, ResourceError> {
        let id = BindingSetLayoutId(self.next_id());
        lock(&self.binding_set_layouts).insert(id.0);
        Ok(id)
    }

    fn destroy_binding_set_layout(&self, layout: BindingSetLayoutId) {
        lock(&self.binding_set_layouts).remove(&layout.0);
    }

    fn create_binding_set(
        &self,
        layout: BindingSetLayoutId,
    ) -> Result<BindingSetId, ResourceError> {
        if !lock(&self.binding_set_layouts).contains(&layout.0) {
            return Err(ResourceError::NotFound {
                kind: "binding set layout",
                id: layout.0,
            });
        }
        let id = BindingSetId(self.next_id());
        lock(&self.binding_sets).insert(
            id.0,
            BindingSetEntry {
                layout,
                writes: HashMap::new(),
            },
        );
        Ok(id)
    }

    fn destroy_binding_set(&self, set: BindingSetId) {
        lock(&self.binding_sets).remove(&set.0);
    }

    fn write_binding(
        &self,
        set: BindingSetId,
        slot: u32,
        write: lucent_rhi::BindingWrite,
    ) -> Result<(), ResourceError> {
        let mut sets = lock(&self.binding_sets);
        let entry = sets.get_mut(&set.0).ok_or(ResourceError::NotFound {
            kind: "binding set",
            id: set.0,
        })?;
        entry.writes.insert(slot, write);
        Ok(())
    }

    fn create_render_pass(
        &self,
        _desc: &RenderPassDescriptor,
    ) -> Result<RenderPassId, ResourceError> {
        let id = RenderPassId(self.next_id());
        lock(&self.render_passes).insert(id.0);
        Ok(id)
    }

    fn destroy_render_pass(&self, pass: RenderPassId) {
        lock(&self.render_passes).remove(&pass.0);
    }

    fn create_render_target(
        &self,
        desc: &RenderTargetDescriptor,
    ) -> Result<RenderTargetId, ResourceError> {
        if !lock(&self.render_passes).contains(&desc.render_pass.0) {
            return Err(ResourceError::NotFound {
                kind: "render pass",
                id: desc.render_pass.0,
            });
        }
        let textures = lock(&self.textures);
        for texture in desc.color_textures.iter() {
            if !textures.contains_key(&texture.0) {
                return Err(ResourceError::NotFound {
                    kind: "texture",
                    id: texture.0,
                });
            }
        }
        drop(textures);
        let id = RenderTargetId(self.next_id());
        lock(&self.render_targets).insert(id.0);
        Ok(id)
    }

    fn destroy_render_target(&self, target: RenderTargetId) {
        lock(&self.render_targets).remove(&target.0);
    }

    fn create_fence(&self, signaled: bool) -> Result<FenceId, DeviceError> {
        let id = FenceId(self.next_id());
        lock(&self.fences).insert(id.0, signaled);
        Ok(id)
    }

    fn destroy_fence(&self, fence: FenceId) {
        lock(&self.fences).remove(&fence.0);
    }

    fn wait_fence(&self, fence: FenceId, _timeout_ns: u64) -> Result<(), FenceError> {
        CallCounters::bump(&self.counters.fence_waits);
        match lock(&self.fences).get(&fence.0) {
            // Work completes at submission, so an unsignaled fence can
            // only signal through a future submit; waiting on it now
            // would block forever.
            Some(true) => Ok(()),
            Some(false) => Err(FenceError::Timeout),
            None => Err(FenceError::BackendError(format!("unknown {fence:?}"))),
        }
    }

    fn reset_fence(&self, fence: FenceId) {
        if let Some(signaled) = lock(&self.fences).get_mut(&fence.0) {
            *signaled = false;
        }
    }

    fn fence_signaled(&self, fence: FenceId) -> bool {
        lock(&self.fences).get(&fence.0).copied().unwrap_or(false)
    }

    fn create_semaphore(&self) -> Result<SemaphoreId, DeviceError> {
        let id = SemaphoreId(self.next_id());
        lock(&self.semaphores).insert(id.0);
        Ok(id)
    }

    fn destroy_semaphore(&self, semaphore: SemaphoreId) {
        lock(&self.semaphores).remove(&semaphore.0);
    }

    fn create_command_buffer(&self, queue: QueueKind) -> Result<CommandBufferId, DeviceError> {
        let id = CommandBufferId(self.next_id());
        lock(&self.command_buffers).insert(
            id.0,
            CommandBufferEntry {
                queue,
                recording: false,
                commands: 0,
            },
        );
        Ok(id)
    }

    fn destroy_command_buffer(&self, cmd: CommandBufferId) {
        lock(&self.command_buffers).remove(&cmd.0);
    }

    fn begin_commands(&self, cmd: CommandBufferId) {
        if let Some(entry) = lock(&self.command_buffers).get_mut(&cmd.0) {
            entry.recording = true;
            entry.commands = 0;
        } else {
            log::error!("begin_commands on unknown {:?}", cmd);
        }
    }

    fn end_commands(&self, cmd: CommandBufferId) {
        if let Some(entry) = lock(&self.command_buffers).get_mut(&cmd.0) {
            entry.recording = false;
        } else {
            log::error!("end_commands on unknown {:?}", cmd);
        }
    }

    fn cmd_begin_render_pass(
        &self,
        cmd: CommandBufferId,
        _target: RenderTargetId,
        _clears: &[ClearValue],
    ) {
        self.record(cmd, "begin_render_pass");
    }

    fn cmd_end_render_pass(&self, cmd: CommandBufferId) {
        self.record(cmd, "end_render_pass");
    }

    fn cmd_bind_graphics_pipeline(&self, cmd: CommandBufferId, _pipeline: GraphicsPipelineId) {
        self.record(cmd, "bind_graphics_pipeline");
    }

    fn cmd_bind_compute_pipeline(&self, cmd: CommandBufferId, _pipeline: ComputePipelineId) {
        self.record(cmd, "bind_compute_pipeline");
    }

    fn cmd_bind_vertex_buffer(
        &self,
        cmd: CommandBufferId,
        _slot: u32,
        _buffer: BufferId,
        _offset: u64,
    ) {
        self.record(cmd, "bind_vertex_buffer");
    }

    fn cmd_bind_index_buffer(
        &self,
        cmd: CommandBufferId,
        _buffer: BufferId,
        _offset: u64,
        _format: IndexFormat,
    ) {
        self.record(cmd, "bind_index_buffer");
    }

    fn cmd_bind_binding_set(&self, cmd: CommandBufferId, _index: u32, _set: BindingSetId) {
        self.record(cmd, "bind_binding_set");
    }

    fn cmd_set_viewport(&self, cmd: CommandBufferId, _viewport: &Viewport) {
        self.record(cmd, "set_viewport");
    }

    fn cmd_set_scissor(&self, cmd: CommandBufferId, _scissor: &ScissorRect) {
        self.record(cmd, "set_scissor");
    }

    fn cmd_draw(&self, cmd: CommandBufferId, _vertices: Range<u32>, _instances: Range<u32>) {
        self.record(cmd, "draw");
        CallCounters::bump(&self.counters.draws);
    }

    fn cmd_draw_indexed(
        &self,
        cmd: CommandBufferId,
        _indices: Range<u32>,
        _base_vertex: i32,
        _instances: Range<u32>,
    ) {
        self.record(cmd, "draw_indexed");
        CallCounters::bump(&self.counters.draws);
    }

    fn cmd_draw_indirect(&self, cmd: CommandBufferId, _buffer: BufferId, _offset: u64) {
        self.record(cmd, "draw_indirect");
        CallCounters::bump(&self.counters.draws);
    }

    fn cmd_dispatch(&self, cmd: CommandBufferId, _x: u32, _y: u32, _z: u32) {
        self.record(cmd, "dispatch");
        CallCounters::bump(&self.counters.dispatches);
    }

    fn cmd_dispatch_indirect(&self, cmd: CommandBufferId, _buffer: BufferId, _offset: u64) {
        self.record(cmd, "dispatch_indirect");
        CallCounters::bump(&self.counters.dispatches);
    }

    fn cmd_update_buffer(&self, cmd: CommandBufferId, buffer: BufferId, offset: u64, data: &[u8]) {
        self.record(cmd, "update_buffer");
        // Time is compressed to zero here: the write lands at record
        // time instead of execution time.
        if let Err(e) = self.write_buffer(buffer, offset, data) {
            log::error!("update_buffer failed: {e}");
        }
    }

    fn cmd_copy_buffer(
        &self,
        cmd: CommandBufferId,
        src: BufferId,
        src_offset: u64,
        dst: BufferId,
        dst_offset: u64,
        size: u64,
    ) {
        self.record(cmd, "copy_buffer");
        let mut bytes = vec![0u8; size as usize];
        if let Err(e) = self.read_buffer(src, src_offset, &mut bytes) {
            log::error!("copy_buffer read failed: {e}");
            return;
        }
        if let Err(e) = self.write_buffer(dst, dst_offset, &bytes) {
            log::error!("copy_buffer write failed: {e}");
        }
    }

    fn cmd_texture_barrier(
        &self,
        cmd: CommandBufferId,
        _texture: TextureId,
        _from: ResourceState,
        _to: ResourceState,
    ) {
        self.record(cmd, "texture_barrier");
        CallCounters::bump(&self.counters.texture_barriers);
    }

    fn cmd_buffer_barrier(
        &self,
        cmd: CommandBufferId,
        _buffer: BufferId,
        _src_stages: PipelineStages,
        _dst_stages: PipelineStages,
    ) {
        self.record(cmd, "buffer_barrier");
    }

    fn cmd_memory_barrier(
        &self,
        cmd: CommandBufferId,
        _src_stages: PipelineStages,
        _dst_stages: PipelineStages,
    ) {
        self.record(cmd, "memory_barrier");
    }

    fn cmd_blit(
        &self,
        cmd: CommandBufferId,
        _src: TextureId,
        _src_region: &BlitRegion,
        _dst: TextureId,
        _dst_region: &BlitRegion,
        _filter: BlitFilter,
    ) {
        self.record(cmd, "blit");
        CallCounters::bump(&self.counters.blits);
    }

    fn submit(
        &self,
        _queue: QueueKind,
        cmd: CommandBufferId,
        _wait: Option<SemaphoreId>,
        _wait_stages: PipelineStages,
        _signal: Option<SemaphoreId>,
        fence: Option<FenceId>,
    ) -> Result<(), DeviceError> {
        CallCounters::bump(&self.counters.submits);
        {
            let command_buffers = lock(&self.command_buffers);
            match command_buffers.get(&cmd.0) {
                Some(entry) if !entry.recording => {
                    log::trace!(
                        "submit of {:?} ({} commands) on {:?} queue",
                        cmd,
                        entry.commands,
                        entry.queue
                    );
                }
                Some(_) => {
                    return Err(DeviceError::BackendError(format!(
                        "submit of {cmd:?} while still recording"
                    )))
                }
                None => {
                    return Err(DeviceError::BackendError(format!(
                        "submit of unknown {cmd:?}"
                    )))
                }
            }
        }
        // Execution is instantaneous; completion is observable at once.
        if let Some(fence) = fence {
            if let Some(signaled) = lock(&self.fences).get_mut(&fence.0) {
                *signaled = true;
            }
        }
        Ok(())
    }
}
