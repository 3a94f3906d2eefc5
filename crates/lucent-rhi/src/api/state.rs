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

//! The explicit resource-state model behind texture barriers.

/// The GPU-visible access/layout mode of a texture.
///
/// Every [`Texture`](crate::Texture) tracks exactly one current state,
/// mutated only by a recorded
/// [`texture_barrier`](crate::CommandBuffer::texture_barrier). A
/// swapchain-owned texture cycles `Present` → `ColorAttachment` →
/// `Present` every frame; the very first acquisition transitions it out
/// of `Undefined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceState {
    /// Freshly created; contents are undefined and any transition out is
    /// free to discard them.
    #[default]
    Undefined,
    /// A catch-all layout usable for any access, at reduced efficiency.
    General,
    /// Readable from shaders (sampled or uniform texel access).
    ShaderRead,
    /// Writable from shaders (storage access).
    ShaderWrite,
    /// Bound as a color attachment of a render target.
    ColorAttachment,
    /// Bound as the depth/stencil attachment of a render target.
    DepthStencilAttachment,
    /// Source of a transfer (copy/blit) operation.
    TransferSrc,
    /// Destination of a transfer (copy/blit) operation.
    TransferDst,
    /// Handed to the presentation engine.
    Present,
}

impl ResourceState {
    /// Returns `true` for states in which the GPU may write the
    /// resource. Transitions *out* of a write state imply a
    /// visibility/availability dependency on previous work.
    pub const fn is_write_state(&self) -> bool {
        matches!(
            self,
            ResourceState::General
                | ResourceState::ShaderWrite
                | ResourceState::ColorAttachment
                | ResourceState::DepthStencilAttachment
                | ResourceState::TransferDst
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_state_classification() {
        assert!(ResourceState::ColorAttachment.is_write_state());
        assert!(ResourceState::TransferDst.is_write_state());
        assert!(!ResourceState::ShaderRead.is_write_state());
        assert!(!ResourceState::Present.is_write_state());
    }

    #[test]
    fn default_is_undefined() {
        assert_eq!(ResourceState::default(), ResourceState::Undefined);
    }
}
