use std::collections::BTreeMap;

use crate::entities::container::{Container, ContainerRef};
use crate::entities::player::Player;
use crate::quickstack::range::QuickStackRange;
use crate::world::region::{Region, RegionId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("no container at {0}")]
    UnknownContainer(ContainerRef),
}

/// Every region of the shared world and the containers placed in them.
#[derive(Debug, Default)]
pub struct WorldState {
    regions: BTreeMap<RegionId, Region>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the region with `id`, creating it empty if it does not exist yet.
    pub fn region_entry(&mut self, id: RegionId) -> &mut Region {
        self.regions
            .entry(id.clone())
            .or_insert_with(|| Region::new(id))
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    pub fn regions_mut(&mut self) -> impl Iterator<Item = &mut Region> {
        self.regions.values_mut()
    }

    pub fn place(&mut self, region: RegionId, container: Container) -> ContainerRef {
        let reference = ContainerRef::new(region.clone(), container.tile);
        self.region_entry(region).place(container);
        reference
    }

    pub fn container(&self, reference: &ContainerRef) -> Option<&Container> {
        self.regions
            .get(&reference.region)
            .and_then(|region| region.container(reference.tile))
    }

    pub fn container_mut(
        &mut self,
        reference: &ContainerRef,
    ) -> Result<&mut Container, WorldError> {
        self.regions
            .get_mut(&reference.region)
            .and_then(|region| region.container_mut(reference.tile))
            .ok_or_else(|| WorldError::UnknownContainer(reference.clone()))
    }

    pub fn container_count(&self) -> usize {
        self.regions.values().map(Region::container_count).sum()
    }

    /// Containers `player` may quick stack into, ordered by region then tile.
    pub fn containers_in_range(
        &self,
        player: &Player,
        range: QuickStackRange,
    ) -> Vec<ContainerRef> {
        match range {
            QuickStackRange::Global => self
                .regions
                .values()
                .flat_map(Region::container_refs)
                .collect(),
            QuickStackRange::Location => self
                .regions
                .get(&player.region)
                .map(|region| region.container_refs().collect())
                .unwrap_or_default(),
            QuickStackRange::Tiles(radius) => {
                let origin = player.tile();
                self.regions
                    .get(&player.region)
                    .map(|region| {
                        region
                            .container_refs()
                            .filter(|reference| origin.within(reference.tile, u32::from(radius)))
                            .collect()
                    })
                    .unwrap_or_default()
            }
        }
    }

    pub fn is_in_range(
        &self,
        player: &Player,
        range: QuickStackRange,
        reference: &ContainerRef,
    ) -> bool {
        match range {
            QuickStackRange::Global => true,
            QuickStackRange::Location => reference.region == player.region,
            QuickStackRange::Tiles(radius) => {
                reference.region == player.region
                    && player.tile().within(reference.tile, u32::from(radius))
            }
        }
    }
}
