use bevy::prelude::*;

/// Canvas size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Width over height, or `None` for a degenerate viewport.
    pub fn aspect_ratio(&self) -> Option<f32> {
        (!self.is_empty()).then(|| self.width / self.height)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Reference to the loaded model root. Starts empty and is filled exactly once.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ModelSlot(Option<Entity>);

impl ModelSlot {
    pub fn get(&self) -> Option<Entity> {
        self.0
    }

    /// Store the model entity. Returns `false` and keeps the first entity if already set.
    pub fn set(&mut self, entity: Entity) -> bool {
        if self.0.is_some() {
            return false;
        }
        self.0 = Some(entity);
        true
    }
}

/// Shared scene state read by the pointer mapper and kept current by the resize handler.
#[derive(Resource, Debug, Default)]
pub struct SceneController {
    pub viewport: Viewport,
    pub model: ModelSlot,
}
