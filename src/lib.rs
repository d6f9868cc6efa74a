pub mod config;
pub mod entities;
pub mod organize;
pub mod persistence;
pub mod quickstack;
pub mod sync;
pub mod telemetry;
pub mod world;

pub use config::{AppConfig, ConfigError, Settings};
pub use entities::container::{Container, ContainerRef};
pub use entities::item::ItemStack;
pub use entities::player::{ActorId, Player};
pub use organize::logic::{
    cleanup_region, toggle_auto_organize, try_organize, CleanupError, OrganizeOutcome,
    ToggleOutcome,
};
pub use organize::sort::{SortPolicy, StandardOrganize};
pub use quickstack::animation::{AnimationSettings, QuickStackAnimation};
pub use quickstack::deposit::{
    quick_stack, DepositInstruction, QuickStackOptions, QuickStackSummary,
};
pub use quickstack::range::QuickStackRange;
pub use sync::gate::{Gate, GateBusy, GateGuard};
pub use world::replication::{ObserverHub, ReplicationEvent, ReplicationSink};
pub use world::state::{WorldError, WorldState};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use persistence::scenario::Scenario;

const DEFAULT_SCENARIO: &str = "scenario.yaml";

pub fn run(args: &[String]) -> Result<(), String> {
    let config = AppConfig::from_args(args).map_err(|err| err.to_string())?;
    let settings = Settings::load(&config.root).map_err(|err| err.to_string())?;
    let level = config.log_level.unwrap_or_else(|| settings.log_level());
    telemetry::logging::init(&config.root, level)?;

    let scenario_path = config
        .scenario
        .clone()
        .unwrap_or_else(|| config.root.join(DEFAULT_SCENARIO));
    let mut loaded = Scenario::load(&scenario_path)?.into_world();
    log::info!(
        "scenario {} loaded: {} regions, {} containers",
        scenario_path.display(),
        loaded.world.regions().count(),
        loaded.world.container_count()
    );

    let mut organized = 0;
    let mut lock_failed = 0;
    if settings.auto_organize_enabled {
        let actor = loaded.player.id;
        for region in loaded.world.regions_mut() {
            for outcome in organize::logic::organize_region(region, actor, &StandardOrganize) {
                match outcome {
                    OrganizeOutcome::Organized => organized += 1,
                    OrganizeOutcome::LockFailed => lock_failed += 1,
                    OrganizeOutcome::Idle => {}
                }
            }
        }
    }

    let options = settings.quick_stack_options();
    let summary = quick_stack(
        &mut loaded.world,
        &mut loaded.player,
        &loaded.plan,
        &options,
        &loaded.catalog,
        SmallRng::seed_from_u64(loaded.seed),
        &mut loaded.hub,
    );

    println!("quickstack: {}", scenario_path.display());
    println!("- root: {}", config.root.display());
    println!("- range: {}", options.range);
    println!("- containers: {}", loaded.world.container_count());
    println!("- item sprites: {}", loaded.catalog.len());
    println!("- auto organized: {} (busy {})", organized, lock_failed);
    println!(
        "- deposited: {}, busy: {}, out of range: {}, missing: {}",
        summary.deposited, summary.busy, summary.out_of_range, summary.missing
    );
    println!("- animated items: {}", summary.animated);
    for event in loaded.hub.history() {
        println!("- broadcast {}: {} sprites", event.region, event.sprites.len());
    }
    log::logger().flush();
    Ok(())
}
