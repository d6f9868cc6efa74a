//! Builds the toss, hover and settle sprites for items being quick stacked.
//!
//! Each deposited item gets three phases:
//!
//! * a launch phase, either a projectile toss into a container in the actor's
//!   own region or an upward fade when the container lives in another region;
//! * a hover phase at the container, held while earlier items for the same
//!   container settle, so a burst of items visibly queues up;
//! * a settle phase that sinks into the container and fades out.
//!
//! Launch sprites play where the actor can see them. Hover and settle sprites
//! always play in the container's region.

use rand::Rng;
use std::collections::HashMap;

use crate::entities::catalog::ItemSpriteData;
use crate::entities::container::{Container, ContainerRef};
use crate::entities::player::Player;
use crate::entities::tags;
use crate::quickstack::batch::RegionSpriteBatch;
use crate::quickstack::sprite::Sprite;
use crate::quickstack::toss;
use crate::world::position::{TilePosition, Vec2, TILE_SIZE};
use crate::world::region::RegionId;
use crate::world::replication::ReplicationSink;

const HOVER_MS_PER_ITEM: f32 = 150.0;
const SETTLE_MS: f32 = 500.0;
const FADE_MS: f32 = 500.0;
const REST_HEIGHT_TILES: f32 = 1.5;
const JITTER_PX: f32 = 8.0;
const DEPTH_EPSILON: f32 = 1e-6;
const MIN_SPEED: f32 = 0.25;
const MAX_SPEED: f32 = 4.0;

const DRIFT_MOTION: Vec2 = Vec2::new(0.6, 4.5);
const DRIFT_ACCELERATION: Vec2 = Vec2::new(0.0, -0.08);
const DRIFT_ALPHA_FADE: f32 = 0.04;
const DRIFT_SCALE_CHANGE: f32 = -0.07;

/// Speed multipliers for the animation, each clamped into `0.25..=4.0` by the builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    /// Scales the launch phase.
    pub item_speed: f32,
    /// Scales the hover queue and the settle phase.
    pub stack_speed: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            item_speed: 1.0,
            stack_speed: 1.0,
        }
    }
}

impl AnimationSettings {
    /// Clamps both speeds into the supported range. NaN falls back to 1.
    pub fn constrained(self) -> Self {
        Self {
            item_speed: clamp_speed(self.item_speed),
            stack_speed: clamp_speed(self.stack_speed),
        }
    }

    pub fn hover_ms_per_item(&self) -> u32 {
        (HOVER_MS_PER_ITEM / self.stack_speed) as u32
    }

    pub fn settle_ms(&self) -> u32 {
        (SETTLE_MS / self.stack_speed) as u32
    }

    pub fn fade_ms(&self) -> u32 {
        (FADE_MS / self.item_speed) as u32
    }
}

fn clamp_speed(speed: f32) -> f32 {
    if speed.is_nan() {
        1.0
    } else {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchKind {
    /// Projectile into a container in the actor's region.
    Toss,
    /// Upward fade-out for a container in another region.
    Fade,
}

/// The three sprites produced for one deposited item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemTimeline {
    pub container: ContainerRef,
    pub kind: LaunchKind,
    pub launch_region: RegionId,
    /// Items already queued for this container earlier in the batch.
    pub queue_position: usize,
    pub launch: Sprite,
    pub hover: Sprite,
    pub settle: Sprite,
}

impl ItemTimeline {
    /// How long the item waits at the container before it settles.
    pub fn hover_hold_ms(&self) -> u32 {
        self.hover.duration_ms as u32
    }

    pub fn total_ms(&self) -> u32 {
        self.settle.end_ms()
    }
}

/// Pixel point above a container where items hover before settling.
pub fn rest_position(tile: TilePosition) -> Vec2 {
    tile.to_pixels() + Vec2::new(0.0, -REST_HEIGHT_TILES * TILE_SIZE)
}

/// Draw depth of a container's contents; lower rows draw in front.
pub fn base_layer_depth(tile: TilePosition) -> f32 {
    ((tile.y + 1) * 64) as f32 / 10000.0 + tile.x as f32 / 50000.0
}

/// Accumulates one deposit's sprites and broadcasts them once, per region.
#[derive(Debug)]
pub struct QuickStackAnimation<R> {
    actor_region: RegionId,
    hand_position: Vec2,
    settings: AnimationSettings,
    rng: R,
    batch: RegionSpriteBatch,
    animated: usize,
    queued: HashMap<ContainerRef, usize>,
    finishes: HashMap<ContainerRef, u32>,
}

impl<R: Rng> QuickStackAnimation<R> {
    pub fn new(actor: &Player, settings: AnimationSettings, rng: R) -> Self {
        Self {
            actor_region: actor.region.clone(),
            hand_position: actor.hand_position(),
            settings: settings.constrained(),
            rng,
            batch: RegionSpriteBatch::new(),
            animated: 0,
            queued: HashMap::new(),
            finishes: HashMap::new(),
        }
    }

    pub fn animated_items(&self) -> usize {
        self.animated
    }

    /// Adds the sprites for `item` flying into `container`, which lives at `target`.
    ///
    /// The container's animation tag is set to the latest finish among this batch's items for it.
    pub fn add_to_animation(
        &mut self,
        target: &ContainerRef,
        container: &mut Container,
        item: &ItemSpriteData,
    ) -> ItemTimeline {
        let queue_position = self.queued.get(target).copied().unwrap_or(0);
        let tile = container.display_tile();
        let rest = rest_position(tile);
        let jitter = Vec2::new(
            self.rng.gen::<f32>() * 2.0 * JITTER_PX - JITTER_PX,
            self.rng.gen::<f32>() * 2.0 * JITTER_PX - JITTER_PX,
        );
        let launch_from = self.hand_position + jitter;

        let epsilon = DEPTH_EPSILON * self.animated as f32;
        let base_depth = base_layer_depth(tile);

        let same_region = target.region == self.actor_region;
        let (kind, mut launch) = if same_region {
            (LaunchKind::Toss, self.toss_sprite(item, launch_from, rest))
        } else {
            (LaunchKind::Fade, self.fade_sprite(item, launch_from))
        };
        launch.layer_depth = 1.0 - epsilon;

        let mut hover = Sprite::still(item, rest);
        hover.delay_ms = launch.end_ms();
        let queued = u32::try_from(queue_position).unwrap_or(u32::MAX);
        hover.duration_ms = queued.saturating_mul(self.settings.hover_ms_per_item()) as f32;
        hover.layer_depth = base_depth - epsilon;

        let settle = self.settle_sprite(item, rest, hover.end_ms(), base_depth + epsilon);

        let launch_region = if same_region {
            target.region.clone()
        } else {
            self.actor_region.clone()
        };
        self.batch.sprites_for(&launch_region).push(launch.clone());
        self.batch
            .sprites_for(&target.region)
            .extend([hover.clone(), settle.clone()]);

        self.animated += 1;
        *self.queued.entry(target.clone()).or_insert(0) += 1;
        let finish = self.finishes.entry(target.clone()).or_insert(0);
        *finish = (*finish).max(settle.end_ms());
        tags::animation::record(&mut container.tags, *finish);

        ItemTimeline {
            container: target.clone(),
            kind,
            launch_region,
            queue_position,
            launch,
            hover,
            settle,
        }
    }

    /// Broadcasts every region's sprites and returns the number of item stacks animated.
    pub fn complete<S: ReplicationSink + ?Sized>(self, sink: &mut S) -> usize {
        let regions = self.batch.flush(sink);
        log::debug!(
            "quick stack animation: {} items across {} regions",
            self.animated,
            regions
        );
        self.animated
    }

    fn toss_sprite(&self, item: &ItemSpriteData, from: Vec2, to: Vec2) -> Sprite {
        let curve = toss::solve(from, to, self.settings.item_speed);
        let mut sprite = Sprite::still(item, from);
        sprite.time_based_motion = true;
        sprite.motion = curve.velocity;
        sprite.acceleration = curve.acceleration;
        sprite.duration_ms = curve.duration_ms;
        sprite
    }

    fn fade_sprite(&self, item: &ItemSpriteData, from: Vec2) -> Sprite {
        let speed = self.settings.item_speed;
        let mut sprite = Sprite::still(item, from);
        // Mirror of the settle drift: up instead of down.
        sprite.motion = Vec2::new(DRIFT_MOTION.x, -DRIFT_MOTION.y) * speed;
        sprite.acceleration = Vec2::new(DRIFT_ACCELERATION.x, -DRIFT_ACCELERATION.y) * speed;
        sprite.alpha_fade = DRIFT_ALPHA_FADE * speed;
        sprite.scale_change = DRIFT_SCALE_CHANGE * speed;
        sprite.duration_ms = self.settings.fade_ms() as f32;
        sprite
    }

    fn settle_sprite(&self, item: &ItemSpriteData, at: Vec2, delay_ms: u32, depth: f32) -> Sprite {
        let speed = self.settings.stack_speed;
        let mut sprite = Sprite::still(item, at);
        sprite.motion = DRIFT_MOTION * speed;
        sprite.acceleration = DRIFT_ACCELERATION * speed;
        sprite.alpha_fade = DRIFT_ALPHA_FADE * speed;
        sprite.scale_change = DRIFT_SCALE_CHANGE * speed;
        sprite.delay_ms = delay_ms;
        sprite.duration_ms = self.settings.settle_ms() as f32;
        sprite.layer_depth = depth;
        sprite
    }
}
