//! Auto-organize: containers flagged for it are sorted whenever a trigger fires.

use crate::entities::container::Container;
use crate::entities::player::ActorId;
use crate::entities::tags::auto_organize;
use crate::organize::sort::SortPolicy;
use crate::sync::gate::GateGuard;
use crate::world::region::Region;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizeOutcome {
    /// The container is not flagged; nothing happened.
    Idle,
    Organized,
    /// Someone else held the container. It stays as it was until the next trigger.
    LockFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Flag set and the container sorted once.
    Enabled,
    /// Flag removed; the caller should reset its auto-organize affordance.
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CleanupError {
    #[error("container at ({x},{y}) in {region} is in use")]
    ContainerBusy { region: String, x: i32, y: i32 },
}

pub fn is_auto_organized(container: &Container) -> bool {
    auto_organize::is_set(&container.tags)
}

/// Sorts `container` if it is flagged and nobody else holds it.
pub fn try_organize<P: SortPolicy + ?Sized>(
    container: &mut Container,
    actor: ActorId,
    policy: &P,
) -> OrganizeOutcome {
    if !is_auto_organized(container) {
        return OrganizeOutcome::Idle;
    }
    let guard = match container.gate.try_acquire(actor) {
        Ok(guard) => guard,
        Err(busy) => {
            log::debug!(
                "failed to acquire container gate before auto organizing ({}). Items: {}.",
                busy,
                container.describe_items()
            );
            return OrganizeOutcome::LockFailed;
        }
    };
    policy.organize(&mut container.items);
    drop(guard);
    OrganizeOutcome::Organized
}

/// Flips the auto-organize flag. Turning it on sorts immediately, without the gate,
/// since the toggling actor is the one looking at the container.
pub fn toggle_auto_organize<P: SortPolicy + ?Sized>(
    container: &mut Container,
    policy: &P,
) -> ToggleOutcome {
    if auto_organize::clear(&mut container.tags) {
        log::info!(
            "auto organize disabled for container at ({},{})",
            container.tile.x,
            container.tile.y
        );
        ToggleOutcome::Disabled
    } else {
        auto_organize::set(&mut container.tags);
        policy.organize(&mut container.items);
        log::info!(
            "auto organize enabled for container at ({},{})",
            container.tile.x,
            container.tile.y
        );
        ToggleOutcome::Enabled
    }
}

/// Runs [`try_organize`] on every container in `region`.
pub fn organize_region<P: SortPolicy + ?Sized>(
    region: &mut Region,
    actor: ActorId,
    policy: &P,
) -> Vec<OrganizeOutcome> {
    region
        .containers_mut()
        .map(|container| try_organize(container, actor, policy))
        .collect()
}

/// Strips the auto-organize flag from every container in `region`.
///
/// Either every flag is removed or none is: all container gates are taken
/// first, and if any is busy the region is left untouched. Returns how many
/// flags were removed.
pub fn strip_region_flags(region: &mut Region, actor: ActorId) -> Result<usize, CleanupError> {
    let region_name = region.id.to_string();
    let mut guards: Vec<GateGuard> = Vec::with_capacity(region.container_count());
    for container in region.containers() {
        match container.gate.try_acquire(actor) {
            Ok(guard) => guards.push(guard),
            Err(_) => {
                return Err(CleanupError::ContainerBusy {
                    region: region_name,
                    x: container.tile.x,
                    y: container.tile.y,
                })
            }
        }
    }
    let mut removed = 0;
    for container in region.containers_mut() {
        if auto_organize::clear(&mut container.tags) {
            removed += 1;
        }
    }
    drop(guards);
    Ok(removed)
}

/// Boolean form of [`strip_region_flags`] for callers that only need success or failure.
pub fn cleanup_region(region: &mut Region, actor: ActorId) -> bool {
    match strip_region_flags(region, actor) {
        Ok(removed) => {
            log::info!("removed {} auto organize flags from {}", removed, region.id);
            true
        }
        Err(err) => {
            log::warn!("auto organize cleanup failed: {}", err);
            false
        }
    }
}
