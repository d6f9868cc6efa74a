use std::collections::BTreeMap;

use crate::quickstack::sprite::Sprite;
use crate::world::region::RegionId;
use crate::world::replication::ReplicationSink;

/// Sprites accumulated for one deposit, partitioned by the region they play in.
#[derive(Debug, Default)]
pub struct RegionSpriteBatch {
    regions: BTreeMap<RegionId, Vec<Sprite>>,
}

impl RegionSpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sprite list for `region`, created empty on first use.
    pub fn sprites_for(&mut self, region: &RegionId) -> &mut Vec<Sprite> {
        self.regions.entry(region.clone()).or_default()
    }

    pub fn sprites(&self, region: &RegionId) -> &[Sprite] {
        self.regions.get(region).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn sprite_count(&self) -> usize {
        self.regions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Hands each region's sprites to `sink` as one broadcast. Returns the number of regions sent.
    pub fn flush<S: ReplicationSink + ?Sized>(self, sink: &mut S) -> usize {
        let mut broadcasts = 0;
        for (region, sprites) in self.regions {
            if sprites.is_empty() {
                continue;
            }
            sink.broadcast_sprites(&region, sprites);
            broadcasts += 1;
        }
        broadcasts
    }
}
