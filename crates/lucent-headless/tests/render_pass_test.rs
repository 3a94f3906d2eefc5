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

//! Render passes, render targets, and binding sets driven through a
//! whole frame.

use lucent_headless::{HeadlessBackend, HeadlessWindow};
use lucent_rhi::{
    BindingSetLayoutDescriptor, BindingSetLayoutEntry, BindingType, BufferDescriptor, BufferUsage,
    BufferingMode, ClearValue, ColorAttachmentDescriptor, Device, DeviceDescriptor, Extent2D,
    Extent3D, FrameStatus, LoadOp, RenderPassDescriptor, ResourceError, SampleCount,
    SamplerDescriptor, ScissorRect, ShaderStageFlags, StoreOp, TextureDescriptor, TextureFormat,
    TextureUsage, Viewport,
};
use std::borrow::Cow;
use std::sync::Arc;

fn device_with_backend() -> (Arc<HeadlessBackend>, Device) {
    let backend = Arc::new(HeadlessBackend::new());
    let window = Arc::new(HeadlessWindow::new(800, 600));
    let desc = DeviceDescriptor {
        app_name: "render-pass".into(),
        window,
        buffering: BufferingMode::Double,
        vsync: true,
    };
    let device = Device::new(backend.clone(), &desc).expect("device init");
    (backend, device)
}

fn swapchain_pass(device: &Device) -> lucent_rhi::RenderPass {
    device
        .create_render_pass(&RenderPassDescriptor {
            label: Some("main".into()),
            color_attachments: Cow::Owned(vec![ColorAttachmentDescriptor {
                format: Device::SWAPCHAIN_FORMAT,
                load_op: LoadOp::Clear,
                store_op: StoreOp::Store,
            }]),
            depth_stencil_attachment: None,
            sample_count: SampleCount::X1,
        })
        .expect("render pass")
}

#[test]
fn frame_draws_into_a_swapchain_target() {
    let (backend, mut device) = device_with_backend();
    let pass = swapchain_pass(&device);
    let extent = device.swapchain().extent();

    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::Ready);
    let image = device.current_swapchain_texture();
    let target = device
        .create_render_target(&pass, Some("frame target"), &[image], None, extent)
        .expect("render target");

    let cmd = device.current_command_buffer();
    cmd.begin_render_pass(&target, &[ClearValue::Color([0.1, 0.2, 0.3, 1.0])]);
    cmd.set_viewport(&Viewport::of_extent(extent.width, extent.height));
    cmd.set_scissor(&ScissorRect::of_extent(extent.width, extent.height));
    cmd.draw(0..3, 0..1);
    cmd.end_render_pass();

    device.end_frame().expect("end");
    device.present().expect("present");
    assert_eq!(backend.counters().draws(), 1);
}

#[test]
fn target_texture_count_must_match_the_pass() {
    let (_, device) = device_with_backend();
    let pass = swapchain_pass(&device);
    let result = device.create_render_target(
        &pass,
        None,
        &[],
        None,
        Extent2D::new(800, 600),
    );
    assert!(matches!(
        result,
        Err(ResourceError::InvalidDescriptor { .. })
    ));
}

#[test]
fn target_texture_format_must_match_the_pass() {
    let (_, device) = device_with_backend();
    let pass = swapchain_pass(&device);
    let wrong_format = device
        .create_texture(&TextureDescriptor {
            label: None,
            extent: Extent3D::new(800, 600, 1),
            mip_level_count: 1,
            sample_count: SampleCount::X1,
            format: TextureFormat::Rgba16Float,
            usage: TextureUsage::ATTACHMENT,
            initial_data: None,
        })
        .expect("texture");
    let result = device.create_render_target(
        &pass,
        None,
        &[wrong_format],
        None,
        Extent2D::new(800, 600),
    );
    assert!(matches!(
        result,
        Err(ResourceError::InvalidDescriptor { .. })
    ));
}

#[test]
fn binding_sets_accept_only_matching_slots() {
    let (_, device) = device_with_backend();
    let layout = device
        .create_binding_set_layout(&BindingSetLayoutDescriptor {
            label: Some("material".into()),
            entries: Cow::Owned(vec![
                BindingSetLayoutEntry {
                    binding: 0,
                    ty: BindingType::UniformBuffer,
                    visibility: ShaderStageFlags::VERTEX_FRAGMENT,
                },
                BindingSetLayoutEntry {
                    binding: 1,
                    ty: BindingType::SampledTexture,
                    visibility: ShaderStageFlags::FRAGMENT,
                },
                BindingSetLayoutEntry {
                    binding: 2,
                    ty: BindingType::Sampler,
                    visibility: ShaderStageFlags::FRAGMENT,
                },
            ]),
        })
        .expect("layout");
    let set = device.create_shader_binding_set(&layout).expect("set");

    let uniforms = device
        .create_buffer(&BufferDescriptor {
            label: None,
            usage: BufferUsage::Uniform,
            size: 256,
        })
        .expect("buffer");
    let texture = device
        .create_texture(&TextureDescriptor {
            label: None,
            extent: Extent3D::new(32, 32, 1),
            mip_level_count: 1,
            sample_count: SampleCount::X1,
            format: TextureFormat::Rgba8Unorm,
            usage: TextureUsage::SAMPLED,
            initial_data: None,
        })
        .expect("texture");
    let sampler = device
        .create_sampler(&SamplerDescriptor::default())
        .expect("sampler");

    set.bind_buffer(0, &uniforms, 0, 256).expect("bind buffer");
    set.bind_texture(1, &texture).expect("bind texture");
    set.bind_sampler(2, &sampler).expect("bind sampler");

    // Kind mismatches and unknown slots are rejected.
    assert!(set.bind_texture(0, &texture).is_err());
    assert!(set.bind_sampler(1, &sampler).is_err());
    assert!(matches!(
        set.bind_buffer(7, &uniforms, 0, 16),
        Err(ResourceError::NotFound { .. })
    ));
    // A buffer range past the end is rejected.
    assert!(matches!(
        set.bind_buffer(0, &uniforms, 128, 256),
        Err(ResourceError::OutOfBounds { .. })
    ));
}

#[test]
fn duplicate_layout_bindings_are_rejected() {
    let (_, device) = device_with_backend();
    let result = device.create_binding_set_layout(&BindingSetLayoutDescriptor {
        label: None,
        entries: Cow::Owned(vec![
            BindingSetLayoutEntry {
                binding: 0,
                ty: BindingType::UniformBuffer,
                visibility: ShaderStageFlags::ALL,
            },
            BindingSetLayoutEntry {
                binding: 0,
                ty: BindingType::Sampler,
                visibility: ShaderStageFlags::ALL,
            },
        ]),
    });
    assert!(matches!(
        result,
        Err(ResourceError::InvalidDescriptor { .. })
    ));
}
