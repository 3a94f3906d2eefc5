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

//! # Lucent RHI
//!
//! The render hardware interface of the Lucent engine: one consistent,
//! backend-agnostic programming model over structurally different native
//! graphics APIs.
//!
//! The crate splits into three layers:
//!
//! - [`api`] — plain data: formats, usage flags, resource states, opaque
//!   ids, and the descriptor structs consumed by resource factories.
//! - [`traits`] — the [`GpuBackend`] contract a concrete backend
//!   implements. A backend is selected once at process start and handed to
//!   [`Device::new`] as an `Arc<dyn GpuBackend>`; nothing backend-specific
//!   crosses that seam in either direction.
//! - The frontend orchestration types ([`Device`], [`Swapchain`],
//!   [`CommandBuffer`], [`Texture`], ...) that own the per-frame loop,
//!   frames-in-flight back-pressure, resource-state tracking, and
//!   descriptor validation.
//!
//! All cross-stage ordering is explicit: fences for CPU↔GPU completion,
//! barriers for GPU-side hazards. There is no cooperative scheduling;
//! [`Device::begin_frame`] and [`Fence::wait`] block synchronously.

#![warn(missing_docs)]

pub mod api;
pub mod error;
pub mod platform;
pub mod traits;
pub mod utils;

mod binding;
mod command_buffer;
mod device;
mod fence;
mod pipeline;
mod queue;
mod render_target;
mod resource;
mod surface;
mod swapchain;

pub use self::api::{
    binding::*, buffer::*, command::*, common::*, device::*, pass::*, pipeline::*, shader::*,
    state::*, texture::*,
};
pub use self::binding::ShaderBindingSet;
pub use self::command_buffer::{BufferBarrier, CommandBuffer, MemoryBarrier, TextureBarrier};
pub use self::device::{Device, FrameStatus};
pub use self::error::{DeviceError, FenceError, PipelineError, ResourceError, SwapchainError};
pub use self::fence::{Fence, Semaphore};
pub use self::pipeline::{ComputePipeline, GraphicsPipeline, Shader};
pub use self::platform::{RhiWindow, RhiWindowHandle};
pub use self::queue::{Queue, SubmitDependencies};
pub use self::render_target::{RenderPass, RenderTarget};
pub use self::resource::{Buffer, BindingSetLayout, Sampler, Texture};
pub use self::surface::Surface;
pub use self::swapchain::Swapchain;
pub use self::traits::GpuBackend;
