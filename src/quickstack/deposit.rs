use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::catalog::ItemCatalog;
use crate::entities::container::ContainerRef;
use crate::entities::item::merge_into;
use crate::entities::player::Player;
use crate::quickstack::animation::{AnimationSettings, QuickStackAnimation};
use crate::quickstack::range::QuickStackRange;
use crate::world::replication::ReplicationSink;
use crate::world::state::WorldState;

/// Move the stack in inventory `slot` into `container`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositInstruction {
    pub container: ContainerRef,
    pub slot: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickStackOptions {
    pub range: QuickStackRange,
    pub animate: bool,
    pub animation: AnimationSettings,
}

impl Default for QuickStackOptions {
    fn default() -> Self {
        Self {
            range: QuickStackRange::default(),
            animate: true,
            animation: AnimationSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuickStackSummary {
    /// Stacks moved into containers.
    pub deposited: usize,
    /// Stacks left with the player because their container was in use.
    pub busy: usize,
    /// Instructions naming a container out of range.
    pub out_of_range: usize,
    /// Instructions naming a missing container or an empty slot.
    pub missing: usize,
    /// Stacks animated; zero when animation is off.
    pub animated: usize,
}

/// Executes a deposit plan for `player` and plays it as a single animation.
///
/// Each container is held through its gate only while its contents change. A
/// busy container leaves the stack with the player; it is not retried.
pub fn quick_stack<R: Rng, S: ReplicationSink + ?Sized>(
    world: &mut WorldState,
    player: &mut Player,
    plan: &[DepositInstruction],
    options: &QuickStackOptions,
    catalog: &ItemCatalog,
    rng: R,
    sink: &mut S,
) -> QuickStackSummary {
    let mut summary = QuickStackSummary::default();
    let mut animation = options
        .animate
        .then(|| QuickStackAnimation::new(player, options.animation, rng));

    for instruction in plan {
        if !world.is_in_range(player, options.range, &instruction.container) {
            summary.out_of_range += 1;
            continue;
        }
        let container = match world.container_mut(&instruction.container) {
            Ok(container) => container,
            Err(err) => {
                log::debug!("quick stack skipped: {}", err);
                summary.missing += 1;
                continue;
            }
        };
        if player.slot(instruction.slot).is_none() {
            summary.missing += 1;
            continue;
        }
        let guard = match container.gate.try_acquire(player.id) {
            Ok(guard) => guard,
            Err(busy) => {
                log::debug!(
                    "quick stack into {} skipped: {}",
                    instruction.container,
                    busy
                );
                summary.busy += 1;
                continue;
            }
        };
        let Some(stack) = player.take_slot(instruction.slot) else {
            continue;
        };
        let sprite = catalog.resolve(&stack.item_id);
        merge_into(&mut container.items, stack);
        drop(guard);

        if let Some(animation) = animation.as_mut() {
            animation.add_to_animation(&instruction.container, container, sprite);
        }
        summary.deposited += 1;
    }

    if let Some(animation) = animation {
        summary.animated = animation.complete(sink);
    }
    log::info!(
        "{} quick stacked {} stacks ({} busy, {} out of range, {} missing)",
        player.name,
        summary.deposited,
        summary.busy,
        summary.out_of_range,
        summary.missing
    );
    summary
}
