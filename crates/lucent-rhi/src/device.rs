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

//! The device: resource factories and the per-frame orchestration loop.

use crate::api::{
    AdapterInfo, BufferDescriptor, BindingSetLayoutDescriptor, ComputePipelineDescriptor,
    DeviceDescriptor, Extent2D, GraphicsPipelineDescriptor, PipelineStages, PresentMode, QueueKind,
    RenderPassDescriptor, ResourceState, SamplerDescriptor, ShaderModuleDescriptor,
    SwapchainDescriptor, TextureDescriptor, TextureFormat,
};
use crate::binding::ShaderBindingSet;
use crate::command_buffer::{CommandBuffer, TextureBarrier};
use crate::error::{DeviceError, PipelineError, ResourceError, SwapchainError};
use crate::fence::{Fence, Semaphore};
use crate::pipeline::{ComputePipeline, GraphicsPipeline, Shader};
use crate::queue::{Queue, SubmitDependencies};
use crate::render_target::{RenderPass, RenderTarget};
use crate::resource::{BindingSetLayout, Buffer, RetireQueue, Sampler, Texture};
use crate::surface::Surface;
use crate::swapchain::Swapchain;
use crate::traits::GpuBackend;
use std::sync::Arc;

/// The outcome of [`Device::begin_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// An image was acquired; record into
    /// [`current_command_buffer`](Device::current_command_buffer) and
    /// finish with [`end_frame`](Device::end_frame) and
    /// [`present`](Device::present).
    Ready,
    /// No image is available this frame (resize in progress or window
    /// minimized). Skip all rendering; call
    /// [`recreate_swapchain`](Device::recreate_swapchain) once the
    /// window has a usable size.
    SkipFrame,
}

/// Per-image frame slot: the fence, command buffer, and render-finished
/// semaphore tied to one swapchain image.
#[derive(Debug)]
struct Frame {
    fence: Fence,
    command_buffer: CommandBuffer,
    render_semaphore: Semaphore,
    /// Which acquire semaphore the pending submission waits on.
    acquire_slot: usize,
    /// Serial of the submission this slot is waiting on.
    serial: u64,
    in_flight: bool,
}

/// The central object of the RHI: owns the surface, swapchain, queues,
/// and frame slots, and is the factory for every GPU resource.
///
/// # Frame loop
///
/// ```text
/// loop {
///     match device.begin_frame()? {
///         FrameStatus::SkipFrame => { device.recreate_swapchain()?; continue; }
///         FrameStatus::Ready => {}
///     }
///     // record into device.current_command_buffer()
///     device.end_frame()?;
///     device.present()?;
/// }
/// ```
///
/// `begin_frame` applies back-pressure: with N swapchain images at most
/// N frames are ever in flight, and re-acquiring an image whose prior
/// submission is still executing blocks on that slot's fence first.
///
/// # Resource lifetime
///
/// Resources are released by dropping their wrapper. The backend
/// release is deferred until every frame whose submission might
/// reference the resource has completed, so dropping mid-frame is
/// always safe.
#[derive(Debug)]
pub struct Device {
    backend: Arc<dyn GpuBackend>,
    retire: Arc<RetireQueue>,
    surface: Surface,
    swapchain: Swapchain,
    graphics_queue: Queue,
    compute_queue: Queue,
    transfer_queue: Queue,
    frames: Vec<Frame>,
    acquire_semaphores: Vec<Semaphore>,
    semaphore_cursor: usize,
    current_image: Option<u32>,
    needs_recreate: bool,
    submit_serial: u64,
    completed_serial: u64,
}

impl Device {
    /// The swapchain format every device currently renders in.
    pub const SWAPCHAIN_FORMAT: TextureFormat = TextureFormat::Bgra8UnormSrgb;

    /// Initializes a device over `backend` and builds the presentation
    /// chain for the descriptor's window.
    pub fn new(backend: Arc<dyn GpuBackend>, desc: &DeviceDescriptor) -> Result<Self, DeviceError> {
        if desc.app_name.is_empty() {
            return Err(DeviceError::InitializationFailed(
                "app_name must not be empty".into(),
            ));
        }
        let info = backend.adapter_info();
        log::info!(
            "Initializing device for '{}' on {} ({:?}, {:?})",
            desc.app_name,
            info.name,
            info.backend,
            info.device_type
        );

        let retire = RetireQueue::new();
        let surface = Surface::new(backend.clone(), desc.window.clone())?;
        let extent = surface.extent();
        let image_count = desc.buffering.image_count();
        let present_mode = if desc.vsync {
            PresentMode::Fifo
        } else {
            PresentMode::Immediate
        };
        let swapchain = Swapchain::new(
            backend.clone(),
            retire.clone(),
            &surface,
            &SwapchainDescriptor {
                extent,
                format: Self::SWAPCHAIN_FORMAT,
                present_mode,
                image_count,
            },
        )?;

        let mut frames = Vec::with_capacity(image_count as usize);
        let mut acquire_semaphores = Vec::with_capacity(image_count as usize);
        for _ in 0..image_count {
            frames.push(Frame {
                fence: Fence::new(backend.clone(), false)?,
                command_buffer: CommandBuffer::new(backend.clone(), QueueKind::Graphics)?,
                render_semaphore: Semaphore::new(backend.clone())?,
                acquire_slot: 0,
                serial: 0,
                in_flight: false,
            });
            acquire_semaphores.push(Semaphore::new(backend.clone())?);
        }

        Ok(Self {
            graphics_queue: Queue::new(backend.clone(), QueueKind::Graphics),
            compute_queue: Queue::new(backend.clone(), QueueKind::Compute),
            transfer_queue: Queue::new(backend.clone(), QueueKind::Transfer),
            backend,
            retire,
            surface,
            swapchain,
            frames,
            acquire_semaphores,
            semaphore_cursor: 0,
            current_image: None,
            needs_recreate: extent.is_zero(),
            submit_serial: 0,
            completed_serial: 0,
        })
    }

    /// Information about the adapter backing this device.
    pub fn adapter_info(&self) -> AdapterInfo {
        self.backend.adapter_info()
    }

    /// The presentation surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The swapchain.
    pub fn swapchain(&self) -> &Swapchain {
        &self.swapchain
    }

    /// The graphics queue.
    pub fn graphics_queue(&self) -> &Queue {
        &self.graphics_queue
    }

    /// The compute queue.
    pub fn compute_queue(&self) -> &Queue {
        &self.compute_queue
    }

    /// The transfer queue.
    pub fn transfer_queue(&self) -> &Queue {
        &self.transfer_queue
    }

    /// The swapchain image index acquired by the current frame, if one
    /// is open.
    pub fn current_image_index(&self) -> Option<u32> {
        self.current_image
    }

    /// The texture acquired by the current frame.
    ///
    /// # Panics
    /// Panics outside an open frame.
    pub fn current_swapchain_texture(&self) -> Arc<Texture> {
        let index = self
            .current_image
            .unwrap_or_else(|| panic!("no frame is open"));
        match self.swapchain.image(index) {
            Ok(texture) => texture,
            Err(e) => panic!("acquired image {index} disappeared: {e}"),
        }
    }

    /// The command buffer of the current frame's slot, open for
    /// recording between [`begin_frame`](Self::begin_frame) and
    /// [`end_frame`](Self::end_frame).
    ///
    /// # Panics
    /// Panics outside an open frame.
    pub fn current_command_buffer(&mut self) -> &mut CommandBuffer {
        let index = self
            .current_image
            .unwrap_or_else(|| panic!("no frame is open"));
        &mut self.frames[index as usize].command_buffer
    }

    /// Opens the next frame.
    ///
    /// Acquires a swapchain image, waits on the image's slot fence if a
    /// prior submission is still in flight, opens the slot's command
    /// buffer, and transitions the image to
    /// [`ResourceState::ColorAttachment`]. Returns
    /// [`FrameStatus::SkipFrame`] when the surface has changed size, is
    /// minimized, or the swapchain is already flagged for recreation.
    pub fn begin_frame(&mut self) -> Result<FrameStatus, DeviceError> {
        assert!(
            self.current_image.is_none(),
            "begin_frame while a frame is already open"
        );
        if self.needs_recreate {
            return Ok(FrameStatus::SkipFrame);
        }
        let surface_extent = self.surface.extent();
        if surface_extent.is_zero() {
            log::warn!("Surface minimized; skipping frame");
            self.needs_recreate = true;
            return Ok(FrameStatus::SkipFrame);
        }
        if surface_extent != self.swapchain.extent() {
            log::warn!(
                "Surface resized to {}x{} (swapchain is {}x{}); skipping frame",
                surface_extent.width,
                surface_extent.height,
                self.swapchain.extent().width,
                self.swapchain.extent().height
            );
            self.needs_recreate = true;
            return Ok(FrameStatus::SkipFrame);
        }

        let acquire_slot = self.semaphore_cursor;
        let semaphore_id = self.acquire_semaphores[acquire_slot].id();
        let index = match self.swapchain.acquire_next_image(Some(semaphore_id)) {
            Ok(index) => index,
            Err(SwapchainError::OutOfDate) => {
                log::warn!("Swapchain out of date on acquire; skipping frame");
                self.needs_recreate = true;
                return Ok(FrameStatus::SkipFrame);
            }
            Err(SwapchainError::Minimized) => {
                self.needs_recreate = true;
                return Ok(FrameStatus::SkipFrame);
            }
            Err(e) => return Err(DeviceError::Swapchain(e)),
        };

        let texture = self.swapchain.image(index)?;
        let frame = &mut self.frames[index as usize];
        if frame.in_flight {
            frame.fence.wait(u64::MAX)?;
            self.completed_serial = self.completed_serial.max(frame.serial);
            frame.fence.reset();
            frame.command_buffer.reset_to_initial();
            frame.in_flight = false;
            self.retire
                .drain_completed(self.backend.as_ref(), self.completed_serial);
        }
        frame.acquire_slot = acquire_slot;
        // Resources dropped from here on may already be referenced by
        // commands in this frame's recording, which submits as the next
        // serial.
        self.retire.on_begin_recording(self.submit_serial + 1);
        frame.command_buffer.begin();
        frame.command_buffer.texture_barrier(&TextureBarrier {
            texture: texture.as_ref(),
            new_state: ResourceState::ColorAttachment,
        });
        self.current_image = Some(index);
        Ok(FrameStatus::Ready)
    }

    /// Closes the current frame: transitions the acquired image to
    /// [`ResourceState::Present`], ends the recording, and submits it to
    /// the graphics queue with the frame's synchronization attached.
    pub fn end_frame(&mut self) -> Result<(), DeviceError> {
        let index = match self.current_image {
            Some(index) => index,
            None => panic!("end_frame without begin_frame"),
        };
        let texture = self.swapchain.image(index)?;
        let serial = self.submit_serial + 1;
        let frame = &mut self.frames[index as usize];
        frame.command_buffer.texture_barrier(&TextureBarrier {
            texture: texture.as_ref(),
            new_state: ResourceState::Present,
        });
        frame.command_buffer.end();
        self.graphics_queue.submit(
            &mut frame.command_buffer,
            &SubmitDependencies {
                wait: Some(&self.acquire_semaphores[frame.acquire_slot]),
                wait_stages: PipelineStages::COLOR_ATTACHMENT_OUTPUT,
                signal: Some(&frame.render_semaphore),
            },
            Some(&frame.fence),
        )?;
        frame.serial = serial;
        frame.in_flight = true;
        self.submit_serial = serial;
        Ok(())
    }

    /// Queues the current frame's image for presentation and closes the
    /// frame. A swapchain that went out of date between submission and
    /// presentation is flagged for recreation, not an error.
    pub fn present(&mut self) -> Result<(), DeviceError> {
        let index = match self.current_image.take() {
            Some(index) => index,
            None => panic!("present without begin_frame"),
        };
        let frame = &self.frames[index as usize];
        match self.graphics_queue.present(
            &self.swapchain,
            index,
            Some(&frame.render_semaphore),
        ) {
            Ok(()) => {}
            Err(SwapchainError::OutOfDate) => {
                log::warn!("Swapchain out of date on present");
                self.needs_recreate = true;
            }
            Err(e) => return Err(DeviceError::Swapchain(e)),
        }
        self.semaphore_cursor = (self.semaphore_cursor + 1) % self.acquire_semaphores.len();
        Ok(())
    }

    /// Whether the swapchain must be recreated before the next frame
    /// can render.
    pub fn needs_recreate(&self) -> bool {
        self.needs_recreate
    }

    /// Rebuilds the swapchain at the surface's current extent.
    ///
    /// Drains all frames in flight first, so old images are never
    /// released while referenced. A zero-sized surface leaves the
    /// swapchain flagged; call again once the window is restored.
    pub fn recreate_swapchain(&mut self) -> Result<(), DeviceError> {
        let extent = self.surface.extent();
        if extent.is_zero() {
            self.needs_recreate = true;
            return Ok(());
        }
        self.wait_idle()?;
        self.swapchain.recreate(extent)?;
        self.semaphore_cursor = 0;
        self.needs_recreate = false;
        Ok(())
    }

    /// Blocks until the GPU has finished all submitted work, then
    /// settles every frame slot and releases every retired resource.
    pub fn wait_idle(&mut self) -> Result<(), DeviceError> {
        self.backend.wait_idle()?;
        for frame in &mut self.frames {
            if frame.in_flight {
                self.completed_serial = self.completed_serial.max(frame.serial);
                frame.fence.reset();
                frame.command_buffer.reset_to_initial();
                frame.in_flight = false;
            }
        }
        self.retire.drain_all(self.backend.as_ref());
        Ok(())
    }

    // ── Factories ───────────────────────────────────────────────────
    //
    // Every factory validates its descriptor before the backend is
    // asked to allocate; a rejected descriptor makes no backend call.

    /// Creates a buffer.
    pub fn create_buffer(&self, desc: &BufferDescriptor) -> Result<Buffer, ResourceError> {
        Buffer::new(self.backend.clone(), self.retire.clone(), desc)
    }

    /// Creates a texture.
    pub fn create_texture(&self, desc: &TextureDescriptor) -> Result<Arc<Texture>, ResourceError> {
        Texture::new(&self.backend, self.retire.clone(), desc).map(Arc::new)
    }

    /// Creates a sampler.
    pub fn create_sampler(&self, desc: &SamplerDescriptor) -> Result<Sampler, ResourceError> {
        Sampler::new(&self.backend, self.retire.clone(), desc)
    }

    /// Creates a shader module.
    pub fn create_shader(&self, desc: &ShaderModuleDescriptor) -> Result<Shader, ResourceError> {
        Shader::new(&self.backend, self.retire.clone(), desc)
    }

    /// Creates a graphics pipeline. Vertex and attachment formats are
    /// checked against backend capabilities first; an unsupported
    /// format fails without compiling anything.
    pub fn create_graphics_pipeline(
        &self,
        desc: &GraphicsPipelineDescriptor,
    ) -> Result<GraphicsPipeline, PipelineError> {
        GraphicsPipeline::new(&self.backend, self.retire.clone(), desc)
    }

    /// Creates a compute pipeline.
    pub fn create_compute_pipeline(
        &self,
        desc: &ComputePipelineDescriptor,
    ) -> Result<ComputePipeline, PipelineError> {
        ComputePipeline::new(&self.backend, self.retire.clone(), desc)
    }

    /// Creates a binding set layout.
    pub fn create_binding_set_layout(
        &self,
        desc: &BindingSetLayoutDescriptor,
    ) -> Result<BindingSetLayout, ResourceError> {
        BindingSetLayout::new(&self.backend, self.retire.clone(), desc)
    }

    /// Creates a shader binding set conforming to `layout`, with every
    /// slot unwritten.
    pub fn create_shader_binding_set(
        &self,
        layout: &BindingSetLayout,
    ) -> Result<ShaderBindingSet, ResourceError> {
        ShaderBindingSet::new(self.backend.clone(), self.retire.clone(), layout)
    }

    /// Creates a render pass description.
    pub fn create_render_pass(
        &self,
        desc: &RenderPassDescriptor,
    ) -> Result<RenderPass, ResourceError> {
        RenderPass::new(&self.backend, self.retire.clone(), desc)
    }

    /// Creates a render target binding `pass` to concrete textures.
    /// Attachment counts, formats, and usages are checked against the
    /// pass before the backend allocates.
    pub fn create_render_target(
        &self,
        pass: &RenderPass,
        label: Option<&str>,
        color_textures: &[Arc<Texture>],
        depth_stencil_texture: Option<Arc<Texture>>,
        extent: Extent2D,
    ) -> Result<RenderTarget, ResourceError> {
        RenderTarget::new(
            &self.backend,
            self.retire.clone(),
            pass,
            label,
            color_textures,
            depth_stencil_texture,
            extent,
        )
    }

    /// Creates a standalone command buffer for `queue`, e.g. for
    /// one-off transfer work outside the frame loop.
    pub fn create_command_buffer(&self, queue: QueueKind) -> Result<CommandBuffer, DeviceError> {
        CommandBuffer::new(self.backend.clone(), queue)
    }

    /// Creates a binary fence.
    pub fn create_fence(&self, signaled: bool) -> Result<Fence, DeviceError> {
        Fence::new(self.backend.clone(), signaled)
    }

    /// Creates a semaphore.
    pub fn create_semaphore(&self) -> Result<Semaphore, DeviceError> {
        Semaphore::new(self.backend.clone())
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        if let Err(e) = self.wait_idle() {
            log::error!("wait_idle failed during device teardown: {e}");
            self.retire.drain_all(self.backend.as_ref());
        }
        log::info!("Device destroyed");
    }
}
