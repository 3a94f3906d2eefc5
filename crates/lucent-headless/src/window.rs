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

//! A window that exists only as a pair of dimensions.

use lucent_rhi::RhiWindow;
use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
};
use std::sync::Mutex;

/// An [`RhiWindow`] with no native handle behind it.
///
/// Tests drive resize and minimize scenarios by calling
/// [`set_inner_size`](Self::set_inner_size); the headless backend reads
/// the size back on every surface query and acquire, exactly like a
/// real backend consulting the platform.
#[derive(Debug)]
pub struct HeadlessWindow {
    size: Mutex<(u32, u32)>,
}

impl HeadlessWindow {
    /// Creates a window reporting `width` × `height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Mutex::new((width, height)),
        }
    }

    /// Changes the reported size. `(0, 0)` simulates minimization.
    pub fn set_inner_size(&self, width: u32, height: u32) {
        if let Ok(mut size) = self.size.lock() {
            *size = (width, height);
        }
    }
}

impl RhiWindow for HeadlessWindow {
    fn inner_size(&self) -> (u32, u32) {
        self.size.lock().map(|s| *s).unwrap_or((0, 0))
    }
}

impl HasWindowHandle for HeadlessWindow {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }
}

impl HasDisplayHandle for HeadlessWindow {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn usable_as_a_window_trait_object() {
        let window: Arc<dyn RhiWindow> = Arc::new(HeadlessWindow::new(640, 480));
        assert_eq!(window.inner_size(), (640, 480));
        // Trait objects must be debug-formattable for the device types
        // that embed them.
        assert!(format!("{window:?}").contains("HeadlessWindow"));
    }

    #[test]
    fn zero_size_simulates_minimization() {
        let window = HeadlessWindow::new(800, 600);
        window.set_inner_size(0, 0);
        assert_eq!(window.inner_size(), (0, 0));
    }
}
