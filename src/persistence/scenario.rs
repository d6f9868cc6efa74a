use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::entities::catalog::ItemCatalog;
use crate::entities::container::Container;
use crate::entities::item::ItemStack;
use crate::entities::player::{ActorId, Player};
use crate::quickstack::deposit::DepositInstruction;
use crate::world::position::{Facing, TilePosition};
use crate::world::region::RegionId;
use crate::world::replication::ObserverHub;
use crate::world::state::WorldState;

/// A saved world snapshot plus one player's pending quick stack.
#[derive(Debug, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub regions: BTreeMap<RegionId, Vec<Container>>,
    pub player: ScenarioPlayer,
    #[serde(default)]
    pub observers: Vec<ScenarioObserver>,
    #[serde(default)]
    pub plan: Vec<DepositInstruction>,
    #[serde(default)]
    pub catalog: Option<ItemCatalog>,
    /// Item catalog YAML, relative to the scenario file. Replaces `catalog` when set.
    #[serde(default)]
    pub catalog_file: Option<PathBuf>,
    #[serde(default)]
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioPlayer {
    pub id: ActorId,
    pub name: String,
    pub region: RegionId,
    pub tile: TilePosition,
    #[serde(default)]
    pub facing: Facing,
    #[serde(default)]
    pub inventory: Vec<Option<ItemStack>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioObserver {
    pub id: ActorId,
    pub region: RegionId,
}

/// Everything a run needs, built from a [`Scenario`].
#[derive(Debug)]
pub struct LoadedScenario {
    pub world: WorldState,
    pub player: Player,
    pub hub: ObserverHub,
    pub plan: Vec<DepositInstruction>,
    pub catalog: ItemCatalog,
    pub seed: u64,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| format!("scenario read failed for {}: {}", path.display(), err))?;
        let mut scenario = Self::from_yaml(&text)
            .map_err(|err| format!("scenario parse failed for {}: {}", path.display(), err))?;
        if let Some(file) = &scenario.catalog_file {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            let catalog = ItemCatalog::load(&base.join(file))?;
            log::info!("item catalog {} loaded: {} items", file.display(), catalog.len());
            scenario.catalog = Some(catalog);
        }
        Ok(scenario)
    }

    pub fn from_yaml(text: &str) -> Result<Self, String> {
        serde_yaml::from_str(text).map_err(|err| err.to_string())
    }

    pub fn into_world(self) -> LoadedScenario {
        let mut world = WorldState::new();
        for (region, containers) in self.regions {
            world.region_entry(region.clone());
            for container in containers {
                if let Some(replaced) = world.region_entry(region.clone()).place(container) {
                    log::warn!(
                        "scenario places two containers at ({},{}) in {}; keeping the last",
                        replaced.tile.x,
                        replaced.tile.y,
                        region
                    );
                }
            }
        }

        let mut player = Player::new(
            self.player.id,
            self.player.name,
            self.player.region.clone(),
            self.player.tile,
        );
        player.facing = self.player.facing;
        player.inventory = self.player.inventory;

        let mut hub = ObserverHub::new();
        hub.observe(player.id, self.player.region);
        for observer in self.observers {
            hub.observe(observer.id, observer.region);
        }

        LoadedScenario {
            world,
            player,
            hub,
            plan: self.plan,
            catalog: self.catalog.unwrap_or_default(),
            seed: self.seed,
        }
    }
}
