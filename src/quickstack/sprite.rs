use serde::{Deserialize, Serialize};

use crate::entities::catalog::{ItemSpriteData, SourceRect};
use crate::world::position::Vec2;

/// Milliseconds per frame for frame-based motion.
pub const FRAME_MS: f32 = 1000.0 / 60.0;

/// Draw scale applied to item sprites.
pub const ITEM_SCALE: f32 = 4.0;

/// One phase of an item's quick-stack animation, as replicated to observers.
///
/// Sprites are fully described at creation and never touched afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub texture: String,
    pub source: SourceRect,
    pub position: Vec2,
    pub motion: Vec2,
    pub acceleration: Vec2,
    /// Motion is per millisecond when set, per frame otherwise.
    pub time_based_motion: bool,
    pub alpha_fade: f32,
    pub scale: f32,
    pub scale_change: f32,
    pub layer_depth: f32,
    pub delay_ms: u32,
    pub duration_ms: f32,
    /// Zero runs the sprite once and removes it.
    pub loops: u32,
}

impl Sprite {
    /// A motionless, fully opaque item sprite at `position`.
    pub fn still(data: &ItemSpriteData, position: Vec2) -> Self {
        Self {
            texture: data.texture.clone(),
            source: data.source,
            position,
            motion: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            time_based_motion: false,
            alpha_fade: 0.0,
            scale: ITEM_SCALE,
            scale_change: 0.0,
            layer_depth: 0.0,
            delay_ms: 0,
            duration_ms: 0.0,
            loops: 0,
        }
    }

    /// Milliseconds after the batch starts at which this sprite disappears.
    pub fn end_ms(&self) -> u32 {
        self.delay_ms.saturating_add(self.duration_ms as u32)
    }

    /// Position `elapsed_ms` after the sprite starts moving.
    ///
    /// Time-based motion integrates continuously. Frame-based motion applies
    /// `motion` then bumps it by `acceleration` once per whole frame.
    pub fn position_at(&self, elapsed_ms: f32) -> Vec2 {
        if self.time_based_motion {
            let t = elapsed_ms;
            self.position + self.motion * t + self.acceleration * (0.5 * t * t)
        } else {
            let frames = (elapsed_ms / FRAME_MS).floor();
            let accumulated = 0.5 * frames * (frames - 1.0).max(0.0);
            self.position + self.motion * frames + self.acceleration * accumulated
        }
    }

    pub fn velocity_at(&self, elapsed_ms: f32) -> Vec2 {
        if self.time_based_motion {
            self.motion + self.acceleration * elapsed_ms
        } else {
            let frames = (elapsed_ms / FRAME_MS).floor();
            self.motion + self.acceleration * frames
        }
    }
}
