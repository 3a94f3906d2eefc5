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

//! Resource-state tracking and barrier deduplication.

use lucent_headless::{HeadlessBackend, HeadlessWindow};
use lucent_rhi::{
    BufferingMode, Device, DeviceDescriptor, Extent3D, FrameStatus, QueueKind, ResourceState,
    SampleCount, TextureBarrier, TextureDescriptor, TextureFormat, TextureUsage,
};
use std::sync::Arc;

fn device_with_backend() -> (Arc<HeadlessBackend>, Device) {
    let backend = Arc::new(HeadlessBackend::new());
    let window = Arc::new(HeadlessWindow::new(800, 600));
    let desc = DeviceDescriptor {
        app_name: "barriers".into(),
        window,
        buffering: BufferingMode::Double,
        vsync: true,
    };
    let device = Device::new(backend.clone(), &desc).expect("device init");
    (backend, device)
}

fn sampled_texture(device: &Device) -> Arc<lucent_rhi::Texture> {
    device
        .create_texture(&TextureDescriptor {
            label: Some("probe".into()),
            extent: Extent3D::new(64, 64, 1),
            mip_level_count: 1,
            sample_count: SampleCount::X1,
            format: TextureFormat::Rgba8Unorm,
            usage: TextureUsage::SAMPLED | TextureUsage::TRANSFER_DST,
            initial_data: None,
        })
        .expect("texture")
}

#[test]
fn redundant_barrier_records_nothing() {
    let (backend, device) = device_with_backend();
    let texture = sampled_texture(&device);
    assert_eq!(texture.current_state(), ResourceState::Undefined);

    let mut cmd = device
        .create_command_buffer(QueueKind::Graphics)
        .expect("command buffer");
    cmd.begin();
    cmd.texture_barrier(&TextureBarrier {
        texture: &texture,
        new_state: ResourceState::ShaderRead,
    });
    assert_eq!(backend.counters().texture_barriers(), 1);
    assert_eq!(texture.current_state(), ResourceState::ShaderRead);

    // Same destination state: filtered out before the backend.
    cmd.texture_barrier(&TextureBarrier {
        texture: &texture,
        new_state: ResourceState::ShaderRead,
    });
    assert_eq!(backend.counters().texture_barriers(), 1);

    cmd.texture_barrier(&TextureBarrier {
        texture: &texture,
        new_state: ResourceState::TransferDst,
    });
    assert_eq!(backend.counters().texture_barriers(), 2);
    assert_eq!(texture.current_state(), ResourceState::TransferDst);
    cmd.end();
}

#[test]
fn tracked_state_persists_across_command_buffers() {
    let (_, device) = device_with_backend();
    let texture = sampled_texture(&device);

    let mut first = device
        .create_command_buffer(QueueKind::Graphics)
        .expect("command buffer");
    first.begin();
    first.texture_barrier(&TextureBarrier {
        texture: &texture,
        new_state: ResourceState::TransferDst,
    });
    first.end();

    let mut second = device
        .create_command_buffer(QueueKind::Graphics)
        .expect("command buffer");
    second.begin();
    // The texture remembers where the first recording left it.
    second.texture_barrier(&TextureBarrier {
        texture: &texture,
        new_state: ResourceState::TransferDst,
    });
    second.end();
    assert_eq!(texture.current_state(), ResourceState::TransferDst);
}

#[test]
fn frame_loop_cycles_swapchain_image_state() {
    let (backend, mut device) = device_with_backend();

    // First frame: Undefined -> ColorAttachment on begin, -> Present on
    // end. Two real transitions.
    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::Ready);
    let image = device.current_swapchain_texture();
    assert_eq!(image.current_state(), ResourceState::ColorAttachment);
    assert_eq!(backend.counters().texture_barriers(), 1);
    device.end_frame().expect("end");
    assert_eq!(image.current_state(), ResourceState::Present);
    assert_eq!(backend.counters().texture_barriers(), 2);
    device.present().expect("present");

    // Second frame uses the other image (fresh, Undefined).
    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::Ready);
    device.end_frame().expect("end");
    device.present().expect("present");
    assert_eq!(backend.counters().texture_barriers(), 4);

    // Third frame reuses image 0: Present -> ColorAttachment -> Present.
    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::Ready);
    assert_eq!(device.current_image_index(), Some(0));
    assert_eq!(
        device.current_swapchain_texture().current_state(),
        ResourceState::ColorAttachment
    );
    device.end_frame().expect("end");
    device.present().expect("present");
    assert_eq!(backend.counters().texture_barriers(), 6);
}

#[test]
#[should_panic(expected = "outside begin/end")]
fn barrier_outside_recording_is_a_contract_violation() {
    let (_, device) = device_with_backend();
    let texture = sampled_texture(&device);
    let mut cmd = device
        .create_command_buffer(QueueKind::Graphics)
        .expect("command buffer");
    cmd.texture_barrier(&TextureBarrier {
        texture: &texture,
        new_state: ResourceState::ShaderRead,
    });
}
