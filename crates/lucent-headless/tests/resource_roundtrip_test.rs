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

//! Buffer and texture lifecycle: CPU access rules, validation, and
//! deferred release.

use lucent_headless::{HeadlessBackend, HeadlessWindow};
use lucent_rhi::{
    BufferDescriptor, BufferUsage, BufferingMode, Device, DeviceDescriptor, Extent3D, FrameStatus,
    ResourceError, SampleCount, SamplerDescriptor, TextureDescriptor, TextureFormat, TextureUsage,
};
use std::sync::Arc;

fn device_with_backend() -> (Arc<HeadlessBackend>, Device) {
    let backend = Arc::new(HeadlessBackend::new());
    let window = Arc::new(HeadlessWindow::new(800, 600));
    let desc = DeviceDescriptor {
        app_name: "resources".into(),
        window,
        buffering: BufferingMode::Double,
        vsync: true,
    };
    let device = Device::new(backend.clone(), &desc).expect("device init");
    (backend, device)
}

fn staging_buffer(device: &Device, size: u64) -> lucent_rhi::Buffer {
    device
        .create_buffer(&BufferDescriptor {
            label: Some("staging".into()),
            usage: BufferUsage::Staging,
            size,
        })
        .expect("buffer")
}

#[test]
fn staging_buffer_round_trips_bytes() {
    let (_, device) = device_with_backend();
    let buffer = staging_buffer(&device, 64);

    let pattern: Vec<u8> = (0..32).collect();
    buffer.cpu_copy(8, &pattern).expect("cpu_copy");

    let mut out = vec![0u8; 32];
    buffer.read_back(8, &mut out).expect("read_back");
    assert_eq!(out, pattern);

    // Bytes outside the written range stay zero.
    let mut head = vec![0xffu8; 8];
    buffer.read_back(0, &mut head).expect("read_back");
    assert_eq!(head, vec![0u8; 8]);
}

#[test]
fn pod_slices_round_trip() {
    let (_, device) = device_with_backend();
    let buffer = staging_buffer(&device, 64);

    let values = [1.0f32, -2.5, 0.25, 1e6];
    buffer.cpu_copy_slice(16, &values).expect("cpu_copy_slice");

    let mut out = [0.0f32; 4];
    buffer
        .read_back(16, bytemuck::cast_slice_mut(&mut out))
        .expect("read_back");
    assert_eq!(out, values);
}

#[test]
fn memset_fills_a_range() {
    let (_, device) = device_with_backend();
    let buffer = staging_buffer(&device, 16);
    buffer.memset(4, 8, 0xab).expect("memset");

    let mut out = [0u8; 16];
    buffer.read_back(0, &mut out).expect("read_back");
    assert_eq!(&out[..4], &[0; 4]);
    assert_eq!(&out[4..12], &[0xab; 8]);
    assert_eq!(&out[12..], &[0; 4]);
}

#[test]
fn device_local_buffer_rejects_cpu_access() {
    let (_, device) = device_with_backend();
    let buffer = device
        .create_buffer(&BufferDescriptor {
            label: None,
            usage: BufferUsage::Vertex,
            size: 64,
        })
        .expect("buffer");

    assert_eq!(
        buffer.cpu_copy(0, &[0u8; 4]),
        Err(ResourceError::NotHostVisible {
            usage: BufferUsage::Vertex
        })
    );
    let mut out = [0u8; 4];
    assert_eq!(
        buffer.read_back(0, &mut out),
        Err(ResourceError::NotHostVisible {
            usage: BufferUsage::Vertex
        })
    );
}

#[test]
fn out_of_bounds_ranges_are_rejected() {
    let (_, device) = device_with_backend();
    let buffer = staging_buffer(&device, 32);

    assert_eq!(
        buffer.cpu_copy(24, &[0u8; 16]),
        Err(ResourceError::OutOfBounds {
            offset: 24,
            len: 16,
            size: 32
        })
    );
    assert!(buffer.memset(0, 33, 0).is_err());
    // Offset + len overflow must not wrap around.
    assert!(buffer.cpu_copy(u64::MAX, &[0u8; 1]).is_err());
}

#[test]
fn resize_preserves_leading_bytes() {
    let (_, device) = device_with_backend();
    let mut buffer = staging_buffer(&device, 16);
    let pattern: Vec<u8> = (100..116).collect();
    buffer.cpu_copy(0, &pattern).expect("cpu_copy");

    buffer.resize(32, true).expect("grow");
    assert_eq!(buffer.size(), 32);
    let mut out = vec![0u8; 16];
    buffer.read_back(0, &mut out).expect("read_back");
    assert_eq!(out, pattern);

    buffer.resize(8, true).expect("shrink");
    let mut out = vec![0u8; 8];
    buffer.read_back(0, &mut out).expect("read_back");
    assert_eq!(out, &pattern[..8]);
}

#[test]
fn zero_sized_descriptors_allocate_nothing() {
    let (backend, device) = device_with_backend();

    let buffers_before = backend.counters().buffer_creates();
    let result = device.create_buffer(&BufferDescriptor {
        label: None,
        usage: BufferUsage::Staging,
        size: 0,
    });
    assert!(matches!(
        result,
        Err(ResourceError::InvalidDescriptor { .. })
    ));
    assert_eq!(backend.counters().buffer_creates(), buffers_before);

    let textures_before = backend.counters().texture_creates();
    let result = device.create_texture(&TextureDescriptor {
        label: None,
        extent: Extent3D::new(0, 128, 1),
        mip_level_count: 1,
        sample_count: SampleCount::X1,
        format: TextureFormat::Rgba8Unorm,
        usage: TextureUsage::SAMPLED,
        initial_data: None,
    });
    assert!(matches!(
        result,
        Err(ResourceError::InvalidDescriptor { .. })
    ));
    assert_eq!(backend.counters().texture_creates(), textures_before);
}

#[test]
fn initial_data_length_is_checked() {
    let (backend, device) = device_with_backend();
    let before = backend.counters().texture_creates();
    let result = device.create_texture(&TextureDescriptor {
        label: None,
        extent: Extent3D::new(4, 4, 1),
        mip_level_count: 1,
        sample_count: SampleCount::X1,
        format: TextureFormat::Rgba8Unorm,
        usage: TextureUsage::SAMPLED,
        // 4x4 RGBA8 needs 64 bytes.
        initial_data: Some(&[0u8; 32]),
    });
    assert!(matches!(
        result,
        Err(ResourceError::InvalidDescriptor { .. })
    ));
    assert_eq!(backend.counters().texture_creates(), before);
}

#[test]
fn empty_texture_usage_is_rejected() {
    let (_, device) = device_with_backend();
    let result = device.create_texture(&TextureDescriptor {
        label: None,
        extent: Extent3D::new(16, 16, 1),
        mip_level_count: 1,
        sample_count: SampleCount::X1,
        format: TextureFormat::Rgba8Unorm,
        usage: TextureUsage::EMPTY,
        initial_data: None,
    });
    assert!(matches!(
        result,
        Err(ResourceError::InvalidDescriptor { .. })
    ));
}

#[test]
fn inverted_sampler_lod_range_is_rejected() {
    let (_, device) = device_with_backend();
    let result = device.create_sampler(&SamplerDescriptor {
        lod_min_clamp: 4.0,
        lod_max_clamp: 1.0,
        ..SamplerDescriptor::default()
    });
    assert!(matches!(
        result,
        Err(ResourceError::InvalidDescriptor { .. })
    ));
}

#[test]
fn dropped_buffer_outlives_frames_in_flight() {
    let (backend, mut device) = device_with_backend();

    let buffer = staging_buffer(&device, 16);
    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::Ready);
    device.end_frame().expect("end");
    device.present().expect("present");

    // The frame that might reference the buffer has been submitted but
    // its fence not yet observed: dropping must not release.
    drop(buffer);
    assert_eq!(backend.counters().buffer_destroys(), 0);

    device.wait_idle().expect("wait_idle");
    assert_eq!(backend.counters().buffer_destroys(), 1);
}

#[test]
fn buffer_dropped_mid_recording_outlives_the_open_frame() {
    let (backend, mut device) = device_with_backend();

    // Frame 1 occupies slot 0 so the next slot-0 wait observes only
    // serial 1.
    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::Ready);
    device.end_frame().expect("end");
    device.present().expect("present");

    // Frame 2 records a command referencing the buffer, then drops the
    // wrapper before the frame is submitted.
    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::Ready);
    let buffer = staging_buffer(&device, 16);
    device
        .current_command_buffer()
        .update_buffer(&buffer, 0, &[0xcd; 16]);
    drop(buffer);
    device.end_frame().expect("end");
    device.present().expect("present");

    // Frame 3 waits slot 0's fence, proving only serial 1 complete.
    // Serial 2 referenced the buffer, so it must not be released yet.
    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::Ready);
    assert_eq!(backend.counters().buffer_destroys(), 0);
    device.end_frame().expect("end");
    device.present().expect("present");

    device.wait_idle().expect("wait_idle");
    assert_eq!(backend.counters().buffer_destroys(), 1);
}

#[test]
fn buffer_dropped_before_any_submission_releases_on_drain() {
    let (backend, mut device) = device_with_backend();
    let buffer = staging_buffer(&device, 16);
    drop(buffer);
    // Tagged with serial 0 (nothing submitted); any drain releases it.
    device.wait_idle().expect("wait_idle");
    assert_eq!(backend.counters().buffer_destroys(), 1);
}
