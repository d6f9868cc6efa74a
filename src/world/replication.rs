use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::player::ActorId;
use crate::quickstack::sprite::Sprite;
use crate::world::region::RegionId;

/// A batch of sprites for one region, delivered as a single unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationEvent {
    pub region: RegionId,
    pub sprites: Vec<Sprite>,
}

/// Receives per-region sprite broadcasts.
pub trait ReplicationSink {
    fn broadcast_sprites(&mut self, region: &RegionId, sprites: Vec<Sprite>);
}

impl ReplicationSink for Vec<ReplicationEvent> {
    fn broadcast_sprites(&mut self, region: &RegionId, sprites: Vec<Sprite>) {
        self.push(ReplicationEvent {
            region: region.clone(),
            sprites,
        });
    }
}

#[derive(Debug, Default)]
struct Observer {
    region: Option<RegionId>,
    outbox: Vec<ReplicationEvent>,
}

/// Fans region broadcasts out to every observer currently in that region.
#[derive(Debug, Default)]
pub struct ObserverHub {
    observers: BTreeMap<ActorId, Observer>,
    history: Vec<ReplicationEvent>,
}

impl ObserverHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer` in `region`, or moves it there if already known.
    pub fn observe(&mut self, observer: ActorId, region: RegionId) {
        self.observers.entry(observer).or_default().region = Some(region);
    }

    pub fn leave(&mut self, observer: ActorId) -> bool {
        self.observers.remove(&observer).is_some()
    }

    pub fn observers_in(&self, region: &RegionId) -> Vec<ActorId> {
        self.observers
            .iter()
            .filter(|(_, observer)| observer.region.as_ref() == Some(region))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Takes everything queued for `observer` so far.
    pub fn drain(&mut self, observer: ActorId) -> Vec<ReplicationEvent> {
        self.observers
            .get_mut(&observer)
            .map(|observer| std::mem::take(&mut observer.outbox))
            .unwrap_or_default()
    }

    /// Every broadcast made through this hub, in order.
    pub fn history(&self) -> &[ReplicationEvent] {
        &self.history
    }
}

impl ReplicationSink for ObserverHub {
    fn broadcast_sprites(&mut self, region: &RegionId, sprites: Vec<Sprite>) {
        let event = ReplicationEvent {
            region: region.clone(),
            sprites,
        };
        let mut delivered = 0usize;
        for observer in self.observers.values_mut() {
            if observer.region.as_ref() == Some(region) {
                observer.outbox.push(event.clone());
                delivered += 1;
            }
        }
        log::debug!(
            "replicated {} sprites to {} observers in {}",
            event.sprites.len(),
            delivered,
            region
        );
        self.history.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::catalog::ItemCatalog;
    use crate::world::position::Vec2;

    fn actor(id: u32) -> ActorId {
        ActorId::from_raw(id).unwrap()
    }

    fn sprite() -> Sprite {
        Sprite::still(ItemCatalog::new().resolve("(O)388"), Vec2::ZERO)
    }

    #[test]
    fn broadcast_reaches_only_observers_in_region() {
        let farm = RegionId::new("Farm");
        let town = RegionId::new("Town");
        let mut hub = ObserverHub::new();
        hub.observe(actor(1), farm.clone());
        hub.observe(actor(2), farm.clone());
        hub.observe(actor(3), town.clone());

        hub.broadcast_sprites(&farm, vec![sprite(), sprite()]);

        assert_eq!(hub.drain(actor(1)).len(), 1);
        assert_eq!(hub.drain(actor(2))[0].sprites.len(), 2);
        assert!(hub.drain(actor(3)).is_empty());
        assert!(hub.drain(actor(1)).is_empty());
        assert_eq!(hub.history().len(), 1);
    }

    #[test]
    fn observer_follows_region_changes() {
        let farm = RegionId::new("Farm");
        let town = RegionId::new("Town");
        let mut hub = ObserverHub::new();
        hub.observe(actor(1), farm.clone());
        hub.observe(actor(1), town.clone());
        assert!(hub.observers_in(&farm).is_empty());
        assert_eq!(hub.observers_in(&town), vec![actor(1)]);
        assert!(hub.leave(actor(1)));
        assert!(!hub.leave(actor(1)));
    }

    #[test]
    fn vec_sink_records_events() {
        let mut events: Vec<ReplicationEvent> = Vec::new();
        events.broadcast_sprites(&RegionId::new("Mine"), vec![sprite()]);
        assert_eq!(events[0].region.as_str(), "Mine");
    }
}
