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

//! Device-side transfers, compute dispatch, and buffer/memory barriers.

use lucent_headless::{HeadlessBackend, HeadlessWindow};
use lucent_rhi::{
    BlitRegion, BufferBarrier, BufferDescriptor, BufferUsage, BufferingMode,
    ComputePipelineDescriptor, Device, DeviceDescriptor, Extent3D, FilterMode, FrameStatus,
    MemoryBarrier, PipelineStages, QueueKind, SampleCount, ShaderModuleDescriptor, ShaderSource,
    ShaderStage, SubmitDependencies, TextureDescriptor, TextureFormat, TextureUsage,
};
use std::borrow::Cow;
use std::sync::Arc;

fn device_with_backend() -> (Arc<HeadlessBackend>, Device) {
    let backend = Arc::new(HeadlessBackend::new());
    let window = Arc::new(HeadlessWindow::new(800, 600));
    let desc = DeviceDescriptor {
        app_name: "transfers".into(),
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
fn recorded_copy_lands_in_the_destination() {
    let (_, mut device) = device_with_backend();
    let src = staging_buffer(&device, 32);
    let dst = staging_buffer(&device, 32);
    let pattern: Vec<u8> = (0..16).collect();
    src.cpu_copy(0, &pattern).expect("cpu_copy");

    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::Ready);
    device
        .current_command_buffer()
        .copy_buffer(&src, 0, &dst, 8, 16);
    device.end_frame().expect("end");
    device.present().expect("present");

    let mut out = vec![0u8; 16];
    dst.read_back(8, &mut out).expect("read_back");
    assert_eq!(out, pattern);
}

#[test]
fn inline_update_writes_through_the_command_stream() {
    let (_, mut device) = device_with_backend();
    let buffer = staging_buffer(&device, 16);

    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::Ready);
    device
        .current_command_buffer()
        .update_buffer(&buffer, 4, &[0x5a; 8]);
    device.end_frame().expect("end");
    device.present().expect("present");

    let mut out = [0u8; 16];
    buffer.read_back(0, &mut out).expect("read_back");
    assert_eq!(&out[..4], &[0; 4]);
    assert_eq!(&out[4..12], &[0x5a; 8]);
    assert_eq!(&out[12..], &[0; 4]);
}

#[test]
fn transfer_copy_runs_outside_the_frame_loop() {
    let (backend, device) = device_with_backend();
    let src = staging_buffer(&device, 8);
    let dst = staging_buffer(&device, 8);
    src.cpu_copy(0, &[1, 2, 3, 4, 5, 6, 7, 8]).expect("cpu_copy");

    let mut cmd = device
        .create_command_buffer(QueueKind::Transfer)
        .expect("command buffer");
    let fence = device.create_fence(false).expect("fence");
    cmd.begin();
    cmd.copy_buffer(&src, 0, &dst, 0, 8);
    cmd.end();
    device
        .transfer_queue()
        .submit(&mut cmd, &SubmitDependencies::default(), Some(&fence))
        .expect("submit");
    assert!(fence.is_signaled());
    assert_eq!(backend.counters().submits(), 1);

    let mut out = [0u8; 8];
    dst.read_back(0, &mut out).expect("read_back");
    assert_eq!(out, [1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn compute_dispatch_signals_its_fence() {
    let (backend, device) = device_with_backend();
    let shader = device
        .create_shader(&ShaderModuleDescriptor {
            label: Some("reduce".into()),
            source: ShaderSource::Wgsl(Cow::Borrowed("@compute fn cs_main() {}")),
            entry_point: Cow::Borrowed("cs_main"),
            stage: ShaderStage::Compute,
        })
        .expect("shader");
    let pipeline = device
        .create_compute_pipeline(&ComputePipelineDescriptor {
            label: Some("reduce".into()),
            shader: shader.id(),
            binding_layouts: Cow::Owned(vec![]),
        })
        .expect("pipeline");

    let mut cmd = device
        .create_command_buffer(QueueKind::Compute)
        .expect("command buffer");
    let fence = device.create_fence(false).expect("fence");
    cmd.begin();
    cmd.bind_compute_pipeline(&pipeline);
    cmd.dispatch(8, 8, 1);
    cmd.end();
    device
        .compute_queue()
        .submit(&mut cmd, &SubmitDependencies::default(), Some(&fence))
        .expect("submit");

    assert!(fence.is_signaled());
    assert_eq!(backend.counters().dispatches(), 1);
}

#[test]
fn blit_copies_between_transfer_textures() {
    let (backend, mut device) = device_with_backend();
    let src = device
        .create_texture(&TextureDescriptor {
            label: Some("blit src".into()),
            extent: Extent3D::new(64, 64, 1),
            mip_level_count: 1,
            sample_count: SampleCount::X1,
            format: TextureFormat::Rgba8Unorm,
            usage: TextureUsage::TRANSFER_SRC | TextureUsage::SAMPLED,
            initial_data: None,
        })
        .expect("src");
    let dst = device
        .create_texture(&TextureDescriptor {
            label: Some("blit dst".into()),
            extent: Extent3D::new(32, 32, 1),
            mip_level_count: 1,
            sample_count: SampleCount::X1,
            format: TextureFormat::Rgba8Unorm,
            usage: TextureUsage::TRANSFER_DST | TextureUsage::SAMPLED,
            initial_data: None,
        })
        .expect("dst");

    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::Ready);
    device.current_command_buffer().blit(
        &src,
        &BlitRegion::whole_2d(64, 64),
        &dst,
        &BlitRegion::whole_2d(32, 32),
        FilterMode::Linear,
    );
    device.end_frame().expect("end");
    device.present().expect("present");
    assert_eq!(backend.counters().blits(), 1);
}

#[test]
fn barriers_record_between_transfer_and_draw_stages() {
    let (backend, mut device) = device_with_backend();
    let buffer = staging_buffer(&device, 64);

    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::Ready);
    let cmd = device.current_command_buffer();
    cmd.update_buffer(&buffer, 0, &[7; 64]);
    cmd.buffer_barrier(&BufferBarrier {
        buffer: &buffer,
        src_stages: PipelineStages::TRANSFER,
        dst_stages: PipelineStages::VERTEX_INPUT,
    });
    cmd.memory_barrier(&MemoryBarrier {
        src_stages: PipelineStages::TRANSFER,
        dst_stages: PipelineStages::COMPUTE_SHADER,
    });
    device.end_frame().expect("end");
    device.present().expect("present");

    // Barriers order execution; they are not texture transitions.
    assert_eq!(backend.counters().texture_barriers(), 2);
    assert_eq!(backend.counters().submits(), 1);
}
