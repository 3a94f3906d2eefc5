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

//! Defines the hierarchy of error types for the RHI.
//!
//! Backend-specific result codes are converted into these enums (plus a
//! log line) at the point of failure; they never cross the [`Device`]
//! boundary as raw codes. Contract violations — recording outside
//! `begin`/`end`, illegal command-buffer state transitions — are fatal
//! assertions, not errors.
//!
//! [`Device`]: crate::Device

use crate::api::{BufferUsage, ShaderModuleId, TextureFormat, VertexFormat};
use std::fmt;

/// An error related to the creation or use of a GPU resource.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceError {
    /// A create-info field failed validation before any backend call.
    InvalidDescriptor {
        /// Human-readable description of the offending field.
        reason: String,
    },
    /// The requested texture format is not supported by the backend for
    /// the requested usage.
    UnsupportedTextureFormat {
        /// The rejected format.
        format: TextureFormat,
    },
    /// A CPU-side copy or fill was attempted on a buffer whose usage is
    /// not host-visible.
    NotHostVisible {
        /// The usage of the offending buffer.
        usage: BufferUsage,
    },
    /// A byte range falls outside the resource.
    OutOfBounds {
        /// Start of the requested range.
        offset: u64,
        /// Length of the requested range.
        len: u64,
        /// Total size of the resource.
        size: u64,
    },
    /// The backend has no resource registered under the given id.
    NotFound {
        /// The kind of resource ("buffer", "texture", ...).
        kind: &'static str,
        /// The raw id that failed to resolve.
        id: u64,
    },
    /// The backend failed to allocate memory for the resource.
    AllocationFailed(String),
    /// Any other backend-reported failure.
    BackendError(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::InvalidDescriptor { reason } => {
                write!(f, "Invalid resource descriptor: {reason}")
            }
            ResourceError::UnsupportedTextureFormat { format } => {
                write!(f, "Texture format {format:?} is not supported")
            }
            ResourceError::NotHostVisible { usage } => {
                write!(f, "Buffer usage {usage:?} is not host-visible")
            }
            ResourceError::OutOfBounds { offset, len, size } => {
                write!(
                    f,
                    "Range [{offset}, {}) is out of bounds for resource of size {size}",
                    offset + len
                )
            }
            ResourceError::NotFound { kind, id } => {
                write!(f, "No {kind} registered under id {id}")
            }
            ResourceError::AllocationFailed(details) => {
                write!(f, "Resource allocation failed: {details}")
            }
            ResourceError::BackendError(details) => {
                write!(f, "Backend error: {details}")
            }
        }
    }
}

impl std::error::Error for ResourceError {}

/// An error related to the creation of a graphics or compute pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// The vertex layout references an attribute format the backend
    /// cannot fetch.
    UnsupportedVertexFormat {
        /// The rejected vertex format.
        format: VertexFormat,
    },
    /// A color attachment format is not renderable on this backend.
    IncompatibleColorTarget {
        /// The rejected attachment format.
        format: TextureFormat,
    },
    /// The depth/stencil attachment format is not a depth format or is
    /// not supported as an attachment.
    IncompatibleDepthStencilFormat {
        /// The rejected attachment format.
        format: TextureFormat,
    },
    /// A shader module referenced by the pipeline is invalid or missing.
    InvalidShaderModule {
        /// The id of the offending shader module.
        id: ShaderModuleId,
    },
    /// The backend failed to compile the pipeline state object.
    CompilationFailed {
        /// A descriptive label for the pipeline, if available.
        label: Option<String>,
        /// Detailed error messages from the backend.
        details: String,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::UnsupportedVertexFormat { format } => {
                write!(f, "Vertex format {format:?} is not supported")
            }
            PipelineError::IncompatibleColorTarget { format } => {
                write!(f, "Color target format {format:?} is not renderable")
            }
            PipelineError::IncompatibleDepthStencilFormat { format } => {
                write!(f, "Depth/stencil format {format:?} is not usable as an attachment")
            }
            PipelineError::InvalidShaderModule { id } => {
                write!(f, "Invalid shader module {id:?} referenced by pipeline")
            }
            PipelineError::CompilationFailed { label, details } => {
                let label = label.as_deref().unwrap_or("<unlabeled>");
                write!(f, "Pipeline compilation failed for '{label}': {details}")
            }
        }
    }
}

impl std::error::Error for PipelineError {}

/// An error related to swapchain creation, acquisition, or presentation.
#[derive(Debug, Clone, PartialEq)]
pub enum SwapchainError {
    /// The surface dimensions no longer match the swapchain; the
    /// swapchain must be recreated before the next frame renders.
    OutOfDate,
    /// The window is minimized (zero-sized surface); rendering should be
    /// skipped until it is restored.
    Minimized,
    /// The backend could not create or recreate the swapchain.
    CreationFailed(String),
    /// An image index outside `[0, image_count)` was used.
    InvalidImageIndex {
        /// The offending index.
        index: u32,
        /// The number of images in the ring.
        image_count: u32,
    },
    /// Any other backend-reported failure.
    BackendError(String),
}

impl fmt::Display for SwapchainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapchainError::OutOfDate => {
                write!(f, "Swapchain is out of date and must be recreated")
            }
            SwapchainError::Minimized => {
                write!(f, "Surface is minimized (zero extent)")
            }
            SwapchainError::CreationFailed(details) => {
                write!(f, "Swapchain creation failed: {details}")
            }
            SwapchainError::InvalidImageIndex { index, image_count } => {
                write!(f, "Image index {index} out of range (image count {image_count})")
            }
            SwapchainError::BackendError(details) => {
                write!(f, "Backend error: {details}")
            }
        }
    }
}

impl std::error::Error for SwapchainError {}

/// An error reported while waiting on a fence.
#[derive(Debug, Clone, PartialEq)]
pub enum FenceError {
    /// The timeout elapsed before the fence signaled. The caller decides
    /// whether to retry or treat the device as lost.
    Timeout,
    /// Any other backend-reported failure.
    BackendError(String),
}

impl fmt::Display for FenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenceError::Timeout => write!(f, "Fence wait timed out"),
            FenceError::BackendError(details) => write!(f, "Backend error: {details}"),
        }
    }
}

impl std::error::Error for FenceError {}

/// A device-level error. Initialization failures are fatal; the
/// application is expected to log and exit.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceError {
    /// No capable adapter was found at initialization.
    NoAdapter,
    /// The logical device, queues, or swapchain could not be created.
    InitializationFailed(String),
    /// The device stopped responding; all subsequent work is invalid.
    Lost,
    /// A swapchain operation failed unrecoverably.
    Swapchain(SwapchainError),
    /// A resource operation failed.
    Resource(ResourceError),
    /// A fence wait failed.
    Fence(FenceError),
    /// Any other backend-reported failure.
    BackendError(String),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::NoAdapter => write!(f, "No capable graphics adapter found"),
            DeviceError::InitializationFailed(details) => {
                write!(f, "Device initialization failed: {details}")
            }
            DeviceError::Lost => write!(f, "Device lost"),
            DeviceError::Swapchain(e) => write!(f, "Swapchain error: {e}"),
            DeviceError::Resource(e) => write!(f, "Resource error: {e}"),
            DeviceError::Fence(e) => write!(f, "Fence error: {e}"),
            DeviceError::BackendError(details) => write!(f, "Backend error: {details}"),
        }
    }
}

impl std::error::Error for DeviceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeviceError::Swapchain(e) => Some(e),
            DeviceError::Resource(e) => Some(e),
            DeviceError::Fence(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SwapchainError> for DeviceError {
    fn from(e: SwapchainError) -> Self {
        DeviceError::Swapchain(e)
    }
}

impl From<ResourceError> for DeviceError {
    fn from(e: ResourceError) -> Self {
        DeviceError::Resource(e)
    }
}

impl From<FenceError> for DeviceError {
    fn from(e: FenceError) -> Self {
        DeviceError::Fence(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_are_readable() {
        let e = ResourceError::OutOfBounds {
            offset: 16,
            len: 64,
            size: 32,
        };
        assert_eq!(
            e.to_string(),
            "Range [16, 80) is out of bounds for resource of size 32"
        );

        let e = SwapchainError::InvalidImageIndex {
            index: 3,
            image_count: 2,
        };
        assert!(e.to_string().contains("index 3"));
    }

    #[test]
    fn device_error_preserves_source() {
        use std::error::Error;
        let e = DeviceError::from(FenceError::Timeout);
        assert!(e.source().is_some());
        assert_eq!(e.to_string(), "Fence error: Fence wait timed out");
    }
}
