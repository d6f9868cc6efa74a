use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::container::{Container, ContainerRef};
use crate::world::position::TilePosition;

/// Name of an independently replicated partition of the world.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(name: impl Into<String>) -> Self {
        RegionId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
pub struct Region {
    pub id: RegionId,
    containers: BTreeMap<TilePosition, Container>,
}

impl Region {
    pub fn new(id: RegionId) -> Self {
        Self {
            id,
            containers: BTreeMap::new(),
        }
    }

    /// Places `container` on its tile, returning whatever stood there before.
    pub fn place(&mut self, container: Container) -> Option<Container> {
        self.containers.insert(container.tile, container)
    }

    pub fn container(&self, tile: TilePosition) -> Option<&Container> {
        self.containers.get(&tile)
    }

    pub fn container_mut(&mut self, tile: TilePosition) -> Option<&mut Container> {
        self.containers.get_mut(&tile)
    }

    pub fn containers(&self) -> impl Iterator<Item = &Container> {
        self.containers.values()
    }

    pub fn containers_mut(&mut self) -> impl Iterator<Item = &mut Container> {
        self.containers.values_mut()
    }

    pub fn container_refs(&self) -> impl Iterator<Item = ContainerRef> + '_ {
        self.containers
            .keys()
            .map(|tile| ContainerRef::new(self.id.clone(), *tile))
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }
}
