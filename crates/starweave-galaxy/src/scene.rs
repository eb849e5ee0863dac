//! Render host seam.
//!
//! The galaxy never talks to a graphics API. It emits [`Sprite`]s into a
//! [`SceneHost`] once, then pushes per-frame [`Appearance`] updates through
//! the returned [`RenderHandle`].

use glam::Vec3;
use tracing::warn;

use crate::body::{Appearance, BodyKind};

/// Opaque handle to a sprite owned by a scene host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u32);

/// A point sprite as first inserted into the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub kind: BodyKind,
    pub position: Vec3,
    pub appearance: Appearance,
}

/// Anything that can display galaxy sprites.
pub trait SceneHost {
    /// Insert a sprite and return its handle.
    fn spawn(&mut self, sprite: Sprite) -> RenderHandle;

    /// Apply this frame's visual state to an existing sprite.
    fn update(&mut self, handle: RenderHandle, appearance: &Appearance);
}

/// In-memory scene used by the headless viewer and tests.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    sprites: Vec<Sprite>,
    update_count: u64,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Sprite behind a handle, if it exists.
    pub fn get(&self, handle: RenderHandle) -> Option<&Sprite> {
        self.sprites.get(handle.0 as usize)
    }

    /// Total number of appearance updates received.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Number of sprites of one kind.
    pub fn count_kind(&self, kind: BodyKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }
}

impl SceneHost for HeadlessScene {
    fn spawn(&mut self, sprite: Sprite) -> RenderHandle {
        let handle = RenderHandle(self.sprites.len() as u32);
        self.sprites.push(sprite);
        handle
    }

    fn update(&mut self, handle: RenderHandle, appearance: &Appearance) {
        match self.sprites.get_mut(handle.0 as usize) {
            Some(sprite) => {
                sprite.appearance = *appearance;
                self.update_count += 1;
            }
            None => warn!(handle = handle.0, "update for unknown sprite"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(kind: BodyKind) -> Sprite {
        Sprite {
            kind,
            position: Vec3::ZERO,
            appearance: Appearance::new(Vec3::ONE, 1.0, 1.0),
        }
    }

    #[test]
    fn test_spawn_returns_sequential_handles() {
        let mut scene = HeadlessScene::new();
        assert_eq!(scene.spawn(sprite(BodyKind::Star)), RenderHandle(0));
        assert_eq!(scene.spawn(sprite(BodyKind::Haze)), RenderHandle(1));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.count_kind(BodyKind::Haze), 1);
    }

    #[test]
    fn test_update_replaces_appearance() {
        let mut scene = HeadlessScene::new();
        let handle = scene.spawn(sprite(BodyKind::Star));
        let dimmed = Appearance::new(Vec3::ONE, 2.0, 0.5);
        scene.update(handle, &dimmed);
        assert_eq!(scene.get(handle).map(|s| s.appearance), Some(dimmed));
        assert_eq!(scene.update_count(), 1);
    }

    #[test]
    fn test_update_unknown_handle_is_ignored() {
        let mut scene = HeadlessScene::new();
        scene.update(RenderHandle(9), &Appearance::new(Vec3::ONE, 1.0, 1.0));
        assert!(scene.is_empty());
        assert_eq!(scene.update_count(), 0);
    }
}
