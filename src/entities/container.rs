use serde::{Deserialize, Serialize};

use crate::entities::item::ItemStack;
use crate::entities::tags::TagMap;
use crate::sync::gate::Gate;
use crate::world::position::TilePosition;
use crate::world::region::RegionId;

/// Stable handle to a container: its region plus the tile it occupies.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContainerRef {
    pub region: RegionId,
    pub tile: TilePosition,
}

impl ContainerRef {
    pub fn new(region: RegionId, tile: TilePosition) -> Self {
        Self { region, tile }
    }
}

impl std::fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@({},{})", self.region, self.tile.x, self.tile.y)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Container {
    pub tile: TilePosition,
    /// Tile the container is drawn from when it differs from `tile`.
    #[serde(default)]
    pub visual_tile: Option<TilePosition>,
    #[serde(default)]
    pub items: Vec<ItemStack>,
    #[serde(default)]
    pub tags: TagMap,
    #[serde(skip)]
    pub gate: Gate,
}

impl Container {
    pub fn new(tile: TilePosition) -> Self {
        Self {
            tile,
            visual_tile: None,
            items: Vec::new(),
            tags: TagMap::new(),
            gate: Gate::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<ItemStack>) -> Self {
        self.items = items;
        self
    }

    pub fn display_tile(&self) -> TilePosition {
        self.visual_tile.unwrap_or(self.tile)
    }

    /// `'name' x count, ...` listing used in diagnostics.
    pub fn describe_items(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("'{}' x {}", item.name, item.count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_tile_prefers_visual_override() {
        let mut container = Container::new(TilePosition::new(2, 3));
        assert_eq!(container.display_tile(), TilePosition::new(2, 3));
        container.visual_tile = Some(TilePosition::new(2, 2));
        assert_eq!(container.display_tile(), TilePosition::new(2, 2));
    }

    #[test]
    fn describe_items_lists_name_and_count() {
        let container = Container::new(TilePosition::new(0, 0)).with_items(vec![
            ItemStack::new("(O)388", "Wood", 12),
            ItemStack::new("(O)390", "Stone", 1),
        ]);
        assert_eq!(container.describe_items(), "'Wood' x 12, 'Stone' x 1");
    }

    #[test]
    fn container_ref_display() {
        let reference = ContainerRef::new(RegionId::new("Farm"), TilePosition::new(5, -1));
        assert_eq!(reference.to_string(), "Farm@(5,-1)");
    }
}
