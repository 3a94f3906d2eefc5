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

//! Shader modules and immutable pipeline state objects.
//!
//! Pipeline validation is a frontend concern: incompatible vertex or
//! attachment formats reject the descriptor before the backend is asked
//! to compile anything, so a pipeline value that exists is always
//! usable.

use crate::api::{
    ComputePipelineDescriptor, ComputePipelineId, GraphicsPipelineDescriptor, GraphicsPipelineId,
    ShaderModuleDescriptor, ShaderModuleId, ShaderStage, TextureUsage,
};
use crate::error::{PipelineError, ResourceError};
use crate::resource::{DeferredRelease, RetireQueue};
use crate::traits::GpuBackend;
use std::sync::Arc;

/// A compiled shader module for one stage.
#[derive(Debug)]
pub struct Shader {
    retire: Arc<RetireQueue>,
    id: ShaderModuleId,
    stage: ShaderStage,
    entry_point: String,
    label: Option<String>,
}

impl Shader {
    pub(crate) fn new(
        backend: &Arc<dyn GpuBackend>,
        retire: Arc<RetireQueue>,
        desc: &ShaderModuleDescriptor,
    ) -> Result<Self, ResourceError> {
        if desc.source.is_empty() {
            return Err(ResourceError::InvalidDescriptor {
                reason: "shader source is empty".into(),
            });
        }
        if desc.entry_point.is_empty() {
            return Err(ResourceError::InvalidDescriptor {
                reason: "shader entry point is empty".into(),
            });
        }
        let id = backend.create_shader_module(desc)?;
        Ok(Self {
            retire,
            id,
            stage: desc.stage,
            entry_point: desc.entry_point.to_string(),
            label: desc.label.as_ref().map(|l| l.to_string()),
        })
    }

    /// The backend handle of this module.
    pub fn id(&self) -> ShaderModuleId {
        self.id
    }

    /// The stage this module compiles for.
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// The entry point function name.
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// The debug label given at creation, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        self.retire.push(DeferredRelease::ShaderModule(self.id));
    }
}

/// An immutable, fully-baked graphics pipeline state object.
///
/// Everything configurable is fixed at creation; only the viewport and
/// scissor may change per draw, and only when the descriptor opted into
/// dynamic viewport state.
#[derive(Debug)]
pub struct GraphicsPipeline {
    retire: Arc<RetireQueue>,
    id: GraphicsPipelineId,
    label: Option<String>,
}

impl GraphicsPipeline {
    pub(crate) fn new(
        backend: &Arc<dyn GpuBackend>,
        retire: Arc<RetireQueue>,
        desc: &GraphicsPipelineDescriptor,
    ) -> Result<Self, PipelineError> {
        for layout in desc.vertex_layout.iter() {
            for attribute in layout.attributes.iter() {
                if !backend.supports_vertex_format(attribute.format) {
                    log::error!(
                        "Graphics pipeline {:?} rejected: vertex format {:?} unsupported",
                        desc.label,
                        attribute.format
                    );
                    return Err(PipelineError::UnsupportedVertexFormat {
                        format: attribute.format,
                    });
                }
            }
        }
        for &format in desc.color_formats.iter() {
            if format.is_depth_format()
                || !backend.supports_texture_format(format, TextureUsage::ATTACHMENT)
            {
                log::error!(
                    "Graphics pipeline {:?} rejected: color target format {:?}",
                    desc.label,
                    format
                );
                return Err(PipelineError::IncompatibleColorTarget { format });
            }
        }
        if let Some(depth_stencil) = &desc.depth_stencil {
            let format = depth_stencil.format;
            if !format.is_depth_format()
                || !backend.supports_texture_format(format, TextureUsage::ATTACHMENT)
            {
                log::error!(
                    "Graphics pipeline {:?} rejected: depth/stencil format {:?}",
                    desc.label,
                    format
                );
                return Err(PipelineError::IncompatibleDepthStencilFormat { format });
            }
        }
        let id = backend.create_graphics_pipeline(desc)?;
        log::info!("Graphics pipeline created: {:?} ({:?})", id, desc.label);
        Ok(Self {
            retire,
            id,
            label: desc.label.as_ref().map(|l| l.to_string()),
        })
    }

    /// The backend handle of this pipeline.
    pub fn id(&self) -> GraphicsPipelineId {
        self.id
    }

    /// The debug label given at creation, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Drop for GraphicsPipeline {
    fn drop(&mut self) {
        self.retire.push(DeferredRelease::GraphicsPipeline(self.id));
    }
}

/// An immutable compute pipeline state object.
#[derive(Debug)]
pub struct ComputePipeline {
    retire: Arc<RetireQueue>,
    id: ComputePipelineId,
    label: Option<String>,
}

impl ComputePipeline {
    pub(crate) fn new(
        backend: &Arc<dyn GpuBackend>,
        retire: Arc<RetireQueue>,
        desc: &ComputePipelineDescriptor,
    ) -> Result<Self, PipelineError> {
        let id = backend.create_compute_pipeline(desc)?;
        log::info!("Compute pipeline created: {:?} ({:?})", id, desc.label);
        Ok(Self {
            retire,
            id,
            label: desc.label.as_ref().map(|l| l.to_string()),
        })
    }

    /// The backend handle of this pipeline.
    pub fn id(&self) -> ComputePipelineId {
        self.id
    }

    /// The debug label given at creation, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Drop for ComputePipeline {
    fn drop(&mut self) {
        self.retire.push(DeferredRelease::ComputePipeline(self.id));
    }
}
