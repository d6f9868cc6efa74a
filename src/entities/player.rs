use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use crate::entities::item::ItemStack;
use crate::world::position::{Facing, TilePosition, Vec2, TILE_SIZE};
use crate::world::region::RegionId;

/// Identity of anyone able to hold a container gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ActorId(NonZeroU32);

impl ActorId {
    pub fn from_raw(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(ActorId)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl TryFrom<u32> for ActorId {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        ActorId::from_raw(value).ok_or_else(|| "actor id must be non-zero".to_string())
    }
}

impl From<ActorId> for u32 {
    fn from(value: ActorId) -> Self {
        value.get()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: ActorId,
    pub name: String,
    pub region: RegionId,
    /// Pixel position of the player's feet.
    pub position: Vec2,
    #[serde(default)]
    pub facing: Facing,
    #[serde(default)]
    pub inventory: Vec<Option<ItemStack>>,
}

impl Player {
    pub fn new(id: ActorId, name: impl Into<String>, region: RegionId, tile: TilePosition) -> Self {
        Self {
            id,
            name: name.into(),
            region,
            position: tile.to_pixels(),
            facing: Facing::Down,
            inventory: Vec::new(),
        }
    }

    pub fn tile(&self) -> TilePosition {
        TilePosition::new(
            (self.position.x / TILE_SIZE).floor() as i32,
            (self.position.y / TILE_SIZE).floor() as i32,
        )
    }

    /// Pixel point items leave from when thrown, before jitter.
    pub fn hand_position(&self) -> Vec2 {
        self.position + self.facing.hand_offset() * TILE_SIZE
    }

    pub fn slot(&self, slot: usize) -> Option<&ItemStack> {
        self.inventory.get(slot).and_then(|entry| entry.as_ref())
    }

    pub fn take_slot(&mut self, slot: usize) -> Option<ItemStack> {
        self.inventory.get_mut(slot).and_then(Option::take)
    }
}
