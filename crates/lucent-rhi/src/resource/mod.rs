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

//! Frontend wrappers over GPU resources, plus the deferred-release
//! queue that keeps backend handles alive while frames in flight may
//! still reference them.

mod buffer;
mod texture;

pub use buffer::Buffer;
pub use texture::Texture;

use crate::api::{
    BindingSetLayoutDescriptor, BindingSetLayoutEntry, BindingSetLayoutId, BindingSetId, BufferId,
    ComputePipelineId, GraphicsPipelineId, RenderPassId, RenderTargetId, SamplerDescriptor,
    SamplerId, ShaderModuleId, TextureId,
};
use crate::error::ResourceError;
use crate::traits::GpuBackend;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// A backend handle whose release has been deferred.
#[derive(Debug, Clone, Copy)]
pub(crate) enum DeferredRelease {
    Buffer(BufferId),
    Texture(TextureId),
    Sampler(SamplerId),
    ShaderModule(ShaderModuleId),
    GraphicsPipeline(GraphicsPipelineId),
    ComputePipeline(ComputePipelineId),
    BindingSetLayout(BindingSetLayoutId),
    BindingSet(BindingSetId),
    RenderPass(RenderPassId),
    RenderTarget(RenderTargetId),
}

/// Deferred destruction, keyed by submission serial.
///
/// When a frontend wrapper drops, its backend handle is queued tagged
/// with the serial of the last submission that could still reference
/// it. While a frame is recording, that is the serial the open frame
/// will submit as, not the last one already submitted: commands already
/// recorded into the open command buffer may reference the resource.
/// The device moves the tag serial forward at `begin_frame` and drains
/// the queue as fence waits move its completed-serial watermark, so the
/// backend release happens only after every potentially-referencing
/// frame has finished.
#[derive(Debug, Default)]
pub(crate) struct RetireQueue {
    pending_serial: AtomicU64,
    pending: Mutex<Vec<(u64, DeferredRelease)>>,
}

impl RetireQueue {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues `release` behind every submission that may reference it,
    /// including the one currently being recorded.
    pub(crate) fn push(&self, release: DeferredRelease) {
        let serial = self.pending_serial.load(Ordering::Acquire);
        if let Ok(mut pending) = self.pending.lock() {
            pending.push((serial, release));
        }
    }

    /// Records that commands for the submission with `serial` are now
    /// being recorded; drops from here on must outlive that submission.
    pub(crate) fn on_begin_recording(&self, serial: u64) {
        self.pending_serial.store(serial, Ordering::Release);
    }

    /// Releases every queued handle whose tagged serial has completed.
    pub(crate) fn drain_completed(&self, backend: &dyn GpuBackend, completed_serial: u64) {
        let drained: Vec<DeferredRelease> = match self.pending.lock() {
            Ok(mut pending) => {
                let mut drained = Vec::new();
                pending.retain(|(serial, release)| {
                    if *serial <= completed_serial {
                        drained.push(*release);
                        false
                    } else {
                        true
                    }
                });
                drained
            }
            Err(_) => return,
        };
        for release in drained {
            match release {
                DeferredRelease::Buffer(id) => backend.destroy_buffer(id),
                DeferredRelease::Texture(id) => backend.destroy_texture(id),
                DeferredRelease::Sampler(id) => backend.destroy_sampler(id),
                DeferredRelease::ShaderModule(id) => backend.destroy_shader_module(id),
                DeferredRelease::GraphicsPipeline(id) => backend.destroy_graphics_pipeline(id),
                DeferredRelease::ComputePipeline(id) => backend.destroy_compute_pipeline(id),
                DeferredRelease::BindingSetLayout(id) => backend.destroy_binding_set_layout(id),
                DeferredRelease::BindingSet(id) => backend.destroy_binding_set(id),
                DeferredRelease::RenderPass(id) => backend.destroy_render_pass(id),
                DeferredRelease::RenderTarget(id) => backend.destroy_render_target(id),
            }
        }
    }

    /// Releases everything. Only legal after the device has gone idle.
    pub(crate) fn drain_all(&self, backend: &dyn GpuBackend) {
        self.drain_completed(backend, u64::MAX);
    }
}

/// A configured texture sampling state.
#[derive(Debug)]
pub struct Sampler {
    retire: Arc<RetireQueue>,
    id: SamplerId,
    label: Option<String>,
}

impl Sampler {
    pub(crate) fn new(
        backend: &Arc<dyn GpuBackend>,
        retire: Arc<RetireQueue>,
        desc: &SamplerDescriptor,
    ) -> Result<Self, ResourceError> {
        if desc.lod_min_clamp > desc.lod_max_clamp {
            return Err(ResourceError::InvalidDescriptor {
                reason: format!(
                    "lod_min_clamp {} exceeds lod_max_clamp {}",
                    desc.lod_min_clamp, desc.lod_max_clamp
                ),
            });
        }
        if desc.anisotropy_clamp == 0 {
            return Err(ResourceError::InvalidDescriptor {
                reason: "anisotropy_clamp must be at least 1".into(),
            });
        }
        let id = backend.create_sampler(desc)?;
        Ok(Self {
            retire,
            id,
            label: desc.label.as_ref().map(|l| l.to_string()),
        })
    }

    /// The backend handle of this sampler.
    pub fn id(&self) -> SamplerId {
        self.id
    }

    /// The debug label given at creation, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        self.retire.push(DeferredRelease::Sampler(self.id));
    }
}

/// The shape of a shader binding set: which slots exist, what resource
/// kind each accepts, and which stages see it.
#[derive(Debug)]
pub struct BindingSetLayout {
    retire: Arc<RetireQueue>,
    id: BindingSetLayoutId,
    entries: Vec<BindingSetLayoutEntry>,
    label: Option<String>,
}

impl BindingSetLayout {
    pub(crate) fn new(
        backend: &Arc<dyn GpuBackend>,
        retire: Arc<RetireQueue>,
        desc: &BindingSetLayoutDescriptor,
    ) -> Result<Self, ResourceError> {
        if desc.entries.is_empty() {
            return Err(ResourceError::InvalidDescriptor {
                reason: "binding set layout has no entries".into(),
            });
        }
        for (i, entry) in desc.entries.iter().enumerate() {
            if desc.entries[..i].iter().any(|e| e.binding == entry.binding) {
                return Err(ResourceError::InvalidDescriptor {
                    reason: format!("duplicate binding index {}", entry.binding),
                });
            }
            if entry.visibility.is_empty() {
                return Err(ResourceError::InvalidDescriptor {
                    reason: format!("binding {} is visible to no stage", entry.binding),
                });
            }
        }
        let id = backend.create_binding_set_layout(desc)?;
        Ok(Self {
            retire,
            id,
            entries: desc.entries.to_vec(),
            label: desc.label.as_ref().map(|l| l.to_string()),
        })
    }

    /// The backend handle of this layout.
    pub fn id(&self) -> BindingSetLayoutId {
        self.id
    }

    /// The slots declared by this layout.
    pub fn entries(&self) -> &[BindingSetLayoutEntry] {
        &self.entries
    }

    /// The debug label given at creation, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Drop for BindingSetLayout {
    fn drop(&mut self) {
        self.retire.push(DeferredRelease::BindingSetLayout(self.id));
    }
}
