//! Retained scene-graph handles and sprite visual state.
//!
//! The core owns a tree of lightweight groups mirroring the particle
//! ownership tree: the display's root group holds one group per shell
//! and burst particle, and each of those holds its sprite plus the
//! groups of any trails it sheds. Hosts mount the root group into their
//! own render tree and draw from the per-frame [`SpriteState`]
//! snapshots; the core never touches a camera or renderer.
//!
//! Resource lifecycle: each particle releases its [`SpriteVisual`]
//! exactly once when destroyed, and the shared [`Texture`] handle is
//! disposed exactly once when the display is dropped. Duplicate
//! releases are reported as errors and ignored by the callers so a
//! misbehaving host cannot crash the frame loop.

use crate::core_types::vec3::Vec3;
use crate::error::FireworksError;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque handle identifying one node in the retained scene tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Named container node.
///
/// Particles only ever attach and detach children on their own group;
/// the host camera and renderer stay untouched.
#[derive(Debug)]
pub struct Group {
    id: NodeId,
    name: String,
    children: Vec<NodeId>,
}

impl Group {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Group {
            id: NodeId::next(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Handle of this group, used when mounting it under a parent.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Group name, mirroring the owning particle kind.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach a child node.
    pub fn attach(&mut self, child: NodeId) {
        self.children.push(child);
    }

    /// Detach a child node. Returns false if the child was not attached.
    pub fn detach(&mut self, child: NodeId) -> bool {
        match self.children.iter().position(|&c| c == child) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether `child` is currently attached.
    #[must_use]
    pub fn contains(&self, child: NodeId) -> bool {
        self.children.contains(&child)
    }

    /// Number of attached children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// True when no children are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Opaque pre-loaded texture handle supplied by the host.
///
/// One handle is shared by every sprite in a display. The core never
/// loads or decodes it; it only calls [`Texture::dispose`] when the
/// display is torn down.
#[derive(Debug)]
pub struct Texture {
    label: String,
    disposed: Cell<bool>,
}

/// Shared reference to the display texture.
pub type SharedTexture = Rc<Texture>;

impl Texture {
    /// Wrap a host-loaded texture under a diagnostic label.
    pub fn load(label: impl Into<String>) -> SharedTexture {
        Rc::new(Texture {
            label: label.into(),
            disposed: Cell::new(false),
        })
    }

    /// Diagnostic label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the underlying resource has been released.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Release the underlying resource. Must happen exactly once; a
    /// second call reports [`FireworksError::InvalidState`] and leaves
    /// the handle unchanged.
    pub fn dispose(&self) -> Result<(), FireworksError> {
        if self.disposed.replace(true) {
            return Err(FireworksError::InvalidState("texture disposed twice"));
        }
        Ok(())
    }
}

/// Per-sprite material state owned by one particle.
#[derive(Debug)]
pub struct SpriteVisual {
    node: NodeId,
    texture: SharedTexture,
    /// Display hue in degrees.
    pub hue: f32,
    /// Blend opacity in [0, 1].
    pub opacity: f32,
    /// Sprite radius in world units.
    pub scale: f32,
    released: bool,
}

impl SpriteVisual {
    /// Create a sprite backed by the shared display texture.
    pub fn new(texture: SharedTexture, hue: f32, scale: f32) -> Self {
        SpriteVisual {
            node: NodeId::next(),
            texture,
            hue,
            opacity: 1.0,
            scale,
            released: false,
        }
    }

    /// Scene node carrying this sprite.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The shared texture backing this sprite.
    #[must_use]
    pub fn texture(&self) -> &SharedTexture {
        &self.texture
    }

    /// Whether the sprite's buffers have been released.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Release geometry and material buffers. Must happen exactly once;
    /// a second call reports [`FireworksError::InvalidState`].
    pub fn release(&mut self) -> Result<(), FireworksError> {
        if self.released {
            return Err(FireworksError::InvalidState("sprite visual released twice"));
        }
        self.released = true;
        Ok(())
    }
}

/// Snapshot of one drawable sprite for the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteState {
    /// World position.
    pub position: Vec3,
    /// Hue in degrees, already folded into [0, 360).
    pub hue: f32,
    /// Blend opacity.
    pub opacity: f32,
    /// Sprite radius in world units.
    pub scale: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_detach_round_trip() {
        let mut group = Group::new("TestGroup");
        let sprite = SpriteVisual::new(Texture::load("tex"), 120.0, 10.0);
        group.attach(sprite.node());
        assert!(group.contains(sprite.node()));
        assert_eq!(group.child_count(), 1);
        assert!(group.detach(sprite.node()));
        assert!(group.is_empty());
        assert!(!group.detach(sprite.node()));
    }

    #[test]
    fn sprite_release_is_exactly_once() {
        let mut sprite = SpriteVisual::new(Texture::load("tex"), 0.0, 10.0);
        assert!(sprite.release().is_ok());
        assert_eq!(
            sprite.release(),
            Err(FireworksError::InvalidState("sprite visual released twice"))
        );
        assert!(sprite.is_released());
    }

    #[test]
    fn texture_dispose_is_exactly_once() {
        let texture = Texture::load("tex");
        assert!(texture.dispose().is_ok());
        assert!(texture.is_disposed());
        assert_eq!(
            texture.dispose(),
            Err(FireworksError::InvalidState("texture disposed twice"))
        );
        // Still marked disposed, not reset by the failed call.
        assert!(texture.is_disposed());
    }

    #[test]
    fn node_ids_are_unique() {
        let a = Group::new("A");
        let b = Group::new("B");
        assert_ne!(a.id(), b.id());
    }
}
