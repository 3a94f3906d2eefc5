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

//! The backend-agnostic data vocabulary of the RHI: enums, usage flags,
//! opaque resource ids, and the descriptor structs consumed by resource
//! factories. Everything here is plain data with no behavior beyond
//! validation helpers; the structs are interpreted by a concrete
//! [`GpuBackend`](crate::traits::GpuBackend).

pub mod binding;
pub mod buffer;
pub mod command;
pub mod common;
pub mod device;
pub mod pass;
pub mod pipeline;
pub mod shader;
pub mod state;
pub mod texture;

pub use self::binding::*;
pub use self::buffer::*;
pub use self::command::*;
pub use self::common::*;
pub use self::device::*;
pub use self::pass::*;
pub use self::pipeline::*;
pub use self::shader::*;
pub use self::state::*;
pub use self::texture::*;
