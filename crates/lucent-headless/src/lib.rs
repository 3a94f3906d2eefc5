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

//! # Lucent Headless
//!
//! A CPU-only [`GpuBackend`](lucent_rhi::GpuBackend) with no GPU, no
//! window system, and no asynchrony: buffers are byte vectors,
//! submission completes instantly, and swapchain images cycle
//! round-robin.
//!
//! Its purpose is observability. [`CallCounters`] records how many
//! times each backend entry point ran, so a test can assert not just
//! *what* a frontend operation computed but *which* backend calls it
//! produced — e.g. that a redundant barrier recorded nothing, or that a
//! rejected descriptor allocated nothing.

#![warn(missing_docs)]

mod backend;
mod counters;
mod window;

pub use backend::HeadlessBackend;
pub use counters::CallCounters;
pub use window::HeadlessWindow;
