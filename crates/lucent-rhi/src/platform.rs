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

//! The window abstraction consumed by [`Surface`](crate::Surface) creation.

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use std::fmt;
use std::sync::Arc;

/// A trait that abstracts the behavior of a presentable window.
///
/// Any windowing backend (winit, SDL, GLFW, a headless stub, ...) can
/// implement this trait to be usable as a presentation target. Backends
/// that require native handles obtain them through the
/// [`HasWindowHandle`]/[`HasDisplayHandle`] supertraits; a handle-less
/// implementation may return [`raw_window_handle::HandleError::Unavailable`].
pub trait RhiWindow: HasWindowHandle + HasDisplayHandle + Send + Sync + fmt::Debug {
    /// Returns the physical dimensions (width, height) of the window's
    /// inner area. A minimized window reports `(0, 0)`.
    fn inner_size(&self) -> (u32, u32);

    /// Returns the scale factor of the window.
    fn scale_factor(&self) -> f64 {
        1.0
    }
}

/// A clonable, thread-safe handle to the window a device presents into.
pub type RhiWindowHandle = Arc<dyn RhiWindow>;
