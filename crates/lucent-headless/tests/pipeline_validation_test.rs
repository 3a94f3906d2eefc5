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

//! Pipeline creation: capability checks happen before any backend call.

use lucent_headless::{HeadlessBackend, HeadlessWindow};
use lucent_rhi::{
    BufferingMode, CompareFunction, DepthStencilState, Device, DeviceDescriptor,
    GraphicsPipelineDescriptor, PipelineError, RasterizerState, SampleCount, Shader,
    ShaderModuleDescriptor, ShaderSource, ShaderStage, StencilFaceState, TextureFormat,
    VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode,
};
use std::borrow::Cow;
use std::sync::Arc;

fn device_with_backend() -> (Arc<HeadlessBackend>, Device) {
    let backend = Arc::new(HeadlessBackend::new());
    let window = Arc::new(HeadlessWindow::new(800, 600));
    let desc = DeviceDescriptor {
        app_name: "pipelines".into(),
        window,
        buffering: BufferingMode::Double,
        vsync: true,
    };
    let device = Device::new(backend.clone(), &desc).expect("device init");
    (backend, device)
}

fn shader(device: &Device, stage: ShaderStage, entry: &str) -> Shader {
    device
        .create_shader(&ShaderModuleDescriptor {
            label: None,
            source: ShaderSource::SpirV(Cow::Borrowed(&[0x0723_0203, 0, 0, 0])),
            entry_point: Cow::Owned(entry.to_string()),
            stage,
        })
        .expect("shader module")
}

fn descriptor_with_vertex_format(
    vs: &Shader,
    fs: &Shader,
    format: VertexFormat,
) -> GraphicsPipelineDescriptor<'static> {
    GraphicsPipelineDescriptor {
        label: Some("probe".into()),
        vertex_shader: vs.id(),
        fragment_shader: Some(fs.id()),
        binding_layouts: Cow::Owned(vec![]),
        vertex_layout: Cow::Owned(vec![VertexBufferLayout {
            array_stride: format.size(),
            step_mode: VertexStepMode::Vertex,
            attributes: Cow::Owned(vec![VertexAttribute {
                shader_location: 0,
                format,
                offset: 0,
            }]),
        }]),
        topology: lucent_rhi::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        rasterizer: RasterizerState::default(),
        blend: None,
        depth_stencil: None,
        sample_count: SampleCount::X1,
        color_formats: Cow::Owned(vec![Device::SWAPCHAIN_FORMAT]),
        dynamic_viewport: true,
    }
}

#[test]
fn supported_pipeline_compiles() {
    let (backend, device) = device_with_backend();
    let vs = shader(&device, ShaderStage::Vertex, "vs_main");
    let fs = shader(&device, ShaderStage::Fragment, "fs_main");

    let desc = descriptor_with_vertex_format(&vs, &fs, VertexFormat::Float32x3);
    let pipeline = device.create_graphics_pipeline(&desc).expect("pipeline");
    assert!(pipeline.label().is_some());
    assert_eq!(backend.counters().graphics_pipeline_creates(), 1);
}

#[test]
fn unsupported_vertex_format_fails_without_backend_calls() {
    let (backend, device) = device_with_backend();
    let vs = shader(&device, ShaderStage::Vertex, "vs_main");
    let fs = shader(&device, ShaderStage::Fragment, "fs_main");

    let desc = descriptor_with_vertex_format(&vs, &fs, VertexFormat::Float64x2);
    let result = device.create_graphics_pipeline(&desc);
    assert_eq!(
        result.err(),
        Some(PipelineError::UnsupportedVertexFormat {
            format: VertexFormat::Float64x2
        })
    );

    // The failure never reached the backend, and nothing was created
    // that could later be destroyed.
    assert_eq!(backend.counters().graphics_pipeline_creates(), 0);
    assert_eq!(backend.counters().graphics_pipeline_destroys(), 0);
}

#[test]
fn depth_format_is_not_a_color_target() {
    let (backend, device) = device_with_backend();
    let vs = shader(&device, ShaderStage::Vertex, "vs_main");
    let fs = shader(&device, ShaderStage::Fragment, "fs_main");

    let mut desc = descriptor_with_vertex_format(&vs, &fs, VertexFormat::Float32x3);
    desc.color_formats = Cow::Owned(vec![TextureFormat::Depth32Float]);
    let result = device.create_graphics_pipeline(&desc);
    assert_eq!(
        result.err(),
        Some(PipelineError::IncompatibleColorTarget {
            format: TextureFormat::Depth32Float
        })
    );
    assert_eq!(backend.counters().graphics_pipeline_creates(), 0);
}

#[test]
fn color_format_is_not_a_depth_attachment() {
    let (backend, device) = device_with_backend();
    let vs = shader(&device, ShaderStage::Vertex, "vs_main");
    let fs = shader(&device, ShaderStage::Fragment, "fs_main");

    let mut desc = descriptor_with_vertex_format(&vs, &fs, VertexFormat::Float32x3);
    desc.depth_stencil = Some(DepthStencilState {
        format: TextureFormat::Rgba8Unorm,
        depth_write_enabled: true,
        depth_compare: CompareFunction::Less,
        stencil_front: StencilFaceState::default(),
        stencil_back: StencilFaceState::default(),
        stencil_read_mask: !0,
        stencil_write_mask: !0,
    });
    let result = device.create_graphics_pipeline(&desc);
    assert_eq!(
        result.err(),
        Some(PipelineError::IncompatibleDepthStencilFormat {
            format: TextureFormat::Rgba8Unorm
        })
    );
    assert_eq!(backend.counters().graphics_pipeline_creates(), 0);
}

#[test]
fn depth_tested_pipeline_compiles() {
    let (_, device) = device_with_backend();
    let vs = shader(&device, ShaderStage::Vertex, "vs_main");
    let fs = shader(&device, ShaderStage::Fragment, "fs_main");

    let mut desc = descriptor_with_vertex_format(&vs, &fs, VertexFormat::Float32x3);
    desc.depth_stencil = Some(DepthStencilState {
        format: TextureFormat::Depth32Float,
        depth_write_enabled: true,
        depth_compare: CompareFunction::Less,
        stencil_front: StencilFaceState::default(),
        stencil_back: StencilFaceState::default(),
        stencil_read_mask: !0,
        stencil_write_mask: !0,
    });
    assert!(device.create_graphics_pipeline(&desc).is_ok());
}

#[test]
fn empty_shader_source_is_rejected() {
    let (_, device) = device_with_backend();
    let result = device.create_shader(&ShaderModuleDescriptor {
        label: None,
        source: ShaderSource::Wgsl(Cow::Borrowed("")),
        entry_point: Cow::Borrowed("main"),
        stage: ShaderStage::Vertex,
    });
    assert!(result.is_err());
}
