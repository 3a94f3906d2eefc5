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

//! Per-entry-point call counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counts how many times each interesting backend entry point ran.
///
/// Counters only ever increase; tests snapshot a counter before an
/// operation and assert on the delta.
#[derive(Debug, Default)]
pub struct CallCounters {
    pub(crate) buffer_creates: AtomicU64,
    pub(crate) buffer_destroys: AtomicU64,
    pub(crate) texture_creates: AtomicU64,
    pub(crate) texture_destroys: AtomicU64,
    pub(crate) graphics_pipeline_creates: AtomicU64,
    pub(crate) graphics_pipeline_destroys: AtomicU64,
    pub(crate) swapchain_image_releases: AtomicU64,
    pub(crate) acquires: AtomicU64,
    pub(crate) presents: AtomicU64,
    pub(crate) submits: AtomicU64,
    pub(crate) fence_waits: AtomicU64,
    pub(crate) texture_barriers: AtomicU64,
    pub(crate) draws: AtomicU64,
    pub(crate) dispatches: AtomicU64,
    pub(crate) blits: AtomicU64,
}

impl CallCounters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Buffer allocations.
    pub fn buffer_creates(&self) -> u64 {
        self.buffer_creates.load(Ordering::Relaxed)
    }

    /// Buffer releases.
    pub fn buffer_destroys(&self) -> u64 {
        self.buffer_destroys.load(Ordering::Relaxed)
    }

    /// Texture allocations, swapchain images included.
    pub fn texture_creates(&self) -> u64 {
        self.texture_creates.load(Ordering::Relaxed)
    }

    /// Texture releases, swapchain images excluded.
    pub fn texture_destroys(&self) -> u64 {
        self.texture_destroys.load(Ordering::Relaxed)
    }

    /// Graphics pipeline compilations.
    pub fn graphics_pipeline_creates(&self) -> u64 {
        self.graphics_pipeline_creates.load(Ordering::Relaxed)
    }

    /// Graphics pipeline releases.
    pub fn graphics_pipeline_destroys(&self) -> u64 {
        self.graphics_pipeline_destroys.load(Ordering::Relaxed)
    }

    /// Swapchain image views released by recreation or teardown.
    pub fn swapchain_image_releases(&self) -> u64 {
        self.swapchain_image_releases.load(Ordering::Relaxed)
    }

    /// Swapchain image acquisitions.
    pub fn acquires(&self) -> u64 {
        self.acquires.load(Ordering::Relaxed)
    }

    /// Presentations.
    pub fn presents(&self) -> u64 {
        self.presents.load(Ordering::Relaxed)
    }

    /// Queue submissions.
    pub fn submits(&self) -> u64 {
        self.submits.load(Ordering::Relaxed)
    }

    /// Blocking fence waits.
    pub fn fence_waits(&self) -> u64 {
        self.fence_waits.load(Ordering::Relaxed)
    }

    /// Texture barriers actually recorded (redundant transitions are
    /// filtered out before reaching the backend).
    pub fn texture_barriers(&self) -> u64 {
        self.texture_barriers.load(Ordering::Relaxed)
    }

    /// Draw commands of any flavor.
    pub fn draws(&self) -> u64 {
        self.draws.load(Ordering::Relaxed)
    }

    /// Dispatch commands of any flavor.
    pub fn dispatches(&self) -> u64 {
        self.dispatches.load(Ordering::Relaxed)
    }

    /// Blit commands.
    pub fn blits(&self) -> u64 {
        self.blits.load(Ordering::Relaxed)
    }
}
