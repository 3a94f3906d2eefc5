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

//! Surface resize, minimization, and swapchain recreation.

use lucent_headless::{HeadlessBackend, HeadlessWindow};
use lucent_rhi::{BufferingMode, Device, DeviceDescriptor, FrameStatus};
use std::sync::Arc;

fn device_with(
    width: u32,
    height: u32,
) -> (Arc<HeadlessBackend>, Arc<HeadlessWindow>, Device) {
    let backend = Arc::new(HeadlessBackend::new());
    let window = Arc::new(HeadlessWindow::new(width, height));
    let desc = DeviceDescriptor {
        app_name: "recreate".into(),
        window: window.clone(),
        buffering: BufferingMode::Double,
        vsync: true,
    };
    let device = Device::new(backend.clone(), &desc).expect("device init");
    (backend, window, device)
}

fn run_frame(device: &mut Device) {
    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::Ready);
    device.end_frame().expect("end");
    device.present().expect("present");
}

#[test]
fn resize_skips_frame_then_recreates_at_new_extent() {
    let (backend, window, mut device) = device_with(800, 600);
    run_frame(&mut device);

    window.set_inner_size(1024, 768);
    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::SkipFrame);
    assert!(device.needs_recreate());

    let releases_before = backend.counters().swapchain_image_releases();
    device.recreate_swapchain().expect("recreate");

    let extent = device.swapchain().extent();
    assert_eq!((extent.width, extent.height), (1024, 768));
    // Every old image view released exactly once.
    assert_eq!(
        backend.counters().swapchain_image_releases() - releases_before,
        u64::from(device.swapchain().image_count())
    );

    run_frame(&mut device);
}

#[test]
fn recreate_preserves_format_and_image_count() {
    let (_, window, mut device) = device_with(800, 600);
    let format = device.swapchain().format();
    let present_mode = device.swapchain().present_mode();
    let image_count = device.swapchain().image_count();

    window.set_inner_size(400, 300);
    device.recreate_swapchain().expect("recreate");

    assert_eq!(device.swapchain().format(), format);
    assert_eq!(device.swapchain().present_mode(), present_mode);
    assert_eq!(device.swapchain().image_count(), image_count);
}

#[test]
fn minimized_window_skips_until_restored() {
    let (_, window, mut device) = device_with(800, 600);
    run_frame(&mut device);

    window.set_inner_size(0, 0);
    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::SkipFrame);

    // Recreation cannot proceed at zero extent; the flag stays set.
    device.recreate_swapchain().expect("recreate while minimized");
    assert!(device.needs_recreate());
    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::SkipFrame);

    window.set_inner_size(800, 600);
    device.recreate_swapchain().expect("recreate");
    assert!(!device.needs_recreate());
    run_frame(&mut device);
}

#[test]
fn indices_restart_after_recreation() {
    let (_, window, mut device) = device_with(800, 600);
    // Leave the ring mid-cycle.
    for _ in 0..3 {
        run_frame(&mut device);
    }

    window.set_inner_size(1024, 768);
    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::SkipFrame);
    device.recreate_swapchain().expect("recreate");

    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::Ready);
    assert_eq!(device.current_image_index(), Some(0));
    device.end_frame().expect("end");
    device.present().expect("present");
}

#[test]
fn resize_mid_frame_flags_recreation_on_present() {
    let (_, window, mut device) = device_with(800, 600);

    assert_eq!(device.begin_frame().expect("begin"), FrameStatus::Ready);
    window.set_inner_size(1024, 768);
    device.end_frame().expect("end");
    // Presentation notices the drift; the frame is not an error.
    device.present().expect("present");
    assert!(device.needs_recreate());
}

#[test]
fn new_images_start_unwritten_after_recreate() {
    use lucent_rhi::ResourceState;

    let (_, window, mut device) = device_with(800, 600);
    run_frame(&mut device);

    window.set_inner_size(640, 480);
    device.recreate_swapchain().expect("recreate");

    let image = device.swapchain().image(0).expect("image 0");
    assert_eq!(image.current_state(), ResourceState::Undefined);
}
