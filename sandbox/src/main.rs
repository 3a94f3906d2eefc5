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

//! Drives a short frame loop through the headless backend: clears the
//! swapchain image, draws a triangle, survives a mid-run resize, and
//! uploads per-frame uniforms. Run with `RUST_LOG=info` for the device
//! lifecycle log.

use lucent_headless::{HeadlessBackend, HeadlessWindow};
use lucent_rhi::{
    BufferDescriptor, BufferUsage, BufferingMode, ClearValue, ColorAttachmentDescriptor, Device,
    DeviceDescriptor, FrameStatus, LoadOp, RenderPassDescriptor, SampleCount, ScissorRect,
    StoreOp, Viewport,
};
use std::borrow::Cow;
use std::sync::Arc;

fn main() {
    env_logger::init();

    let backend = Arc::new(HeadlessBackend::new());
    let window = Arc::new(HeadlessWindow::new(800, 600));
    let mut device = match Device::new(
        backend.clone(),
        &DeviceDescriptor {
            app_name: "Lucent Sandbox".into(),
            window: window.clone(),
            buffering: BufferingMode::Double,
            vsync: true,
        },
    ) {
        Ok(device) => device,
        Err(e) => {
            log::error!("Device initialization failed: {e}");
            std::process::exit(1);
        }
    };

    let pass = device
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
        .expect("render pass");

    let uniforms = device
        .create_buffer(&BufferDescriptor {
            label: Some("frame uniforms".into()),
            usage: BufferUsage::Uniform,
            size: 64,
        })
        .expect("uniform buffer");

    for frame in 0u32..10 {
        // Simulate the user dragging the window larger mid-run.
        if frame == 5 {
            window.set_inner_size(1024, 768);
        }

        match device.begin_frame().expect("begin_frame") {
            FrameStatus::SkipFrame => {
                device.recreate_swapchain().expect("recreate_swapchain");
                continue;
            }
            FrameStatus::Ready => {}
        }

        let time = frame as f32 / 60.0;
        uniforms
            .cpu_copy_slice(0, &[time, 0.0, 0.0, 0.0])
            .expect("uniform upload");

        let extent = device.swapchain().extent();
        let image = device.current_swapchain_texture();
        let target = device
            .create_render_target(&pass, Some("frame"), &[image], None, extent)
            .expect("render target");

        let cmd = device.current_command_buffer();
        cmd.begin_render_pass(&target, &[ClearValue::Color([0.02, 0.02, 0.05, 1.0])]);
        cmd.set_viewport(&Viewport::of_extent(extent.width, extent.height));
        cmd.set_scissor(&ScissorRect::of_extent(extent.width, extent.height));
        cmd.draw(0..3, 0..1);
        cmd.end_render_pass();

        device.end_frame().expect("end_frame");
        device.present().expect("present");
        log::info!(
            "frame {frame}: {}x{}, image {:?}",
            extent.width,
            extent.height,
            device.current_image_index()
        );
    }

    device.wait_idle().expect("wait_idle");
    log::info!(
        "done: {} submissions, {} draws, {} presents",
        backend.counters().submits(),
        backend.counters().draws(),
        backend.counters().presents()
    );
}
