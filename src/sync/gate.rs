use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::entities::player::ActorId;

const FREE: u32 = 0;

/// Exclusive, non-blocking access to a container's contents.
///
/// Acquisition never waits: the first caller to observe the gate free wins and
/// everyone else gets [`GateBusy`] immediately. Nothing is queued and nothing is
/// retried; a skipped caller tries again on its next trigger.
///
/// Cloning yields another handle to the same gate, the way every observer of a
/// shared container sees one lock.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    holder: Arc<AtomicU32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("gate held by actor {holder}")]
pub struct GateBusy {
    pub holder: ActorId,
}

/// Proof of exclusive access. Releases the gate when dropped.
#[derive(Debug)]
#[must_use = "the gate is released as soon as the guard is dropped"]
pub struct GateGuard {
    gate: Arc<AtomicU32>,
    holder: ActorId,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self, holder: ActorId) -> Result<GateGuard, GateBusy> {
        match self.holder.compare_exchange(
            FREE,
            holder.get(),
            Ordering::Acquire,
            Ordering::Relaxed,
        ) {
            Ok(_) => Ok(GateGuard {
                gate: Arc::clone(&self.holder),
                holder,
            }),
            Err(current) => Err(GateBusy {
                holder: ActorId::from_raw(current).unwrap_or(holder),
            }),
        }
    }

    pub fn holder(&self) -> Option<ActorId> {
        ActorId::from_raw(self.holder.load(Ordering::Acquire))
    }

    pub fn is_held(&self) -> bool {
        self.holder().is_some()
    }
}

impl GateGuard {
    pub fn holder(&self) -> ActorId {
        self.holder
    }
}

impl Drop for GateGuard {
    fn drop(&mut self) {
        self.gate.store(FREE, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;

    fn actor(id: u32) -> ActorId {
        ActorId::from_raw(id).expect("non-zero actor id")
    }

    #[test]
    fn free_gate_is_acquired_and_released_on_drop() {
        let gate = Gate::new();
        assert_eq!(gate.holder(), None);
        {
            let guard = gate.try_acquire(actor(1)).unwrap();
            assert_eq!(guard.holder(), actor(1));
            assert_eq!(gate.holder(), Some(actor(1)));
        }
        assert!(!gate.is_held());
        assert!(gate.try_acquire(actor(2)).is_ok());
    }

    #[test]
    fn held_gate_fails_fast_and_reports_holder() {
        let gate = Gate::new();
        let _guard = gate.try_acquire(actor(7)).unwrap();
        let busy = gate.try_acquire(actor(8)).unwrap_err();
        assert_eq!(busy.holder, actor(7));
        // No re-entry for the holder either.
        assert!(gate.try_acquire(actor(7)).is_err());
    }

    #[test]
    fn cloned_handles_share_one_gate() {
        let gate = Gate::new();
        let other = gate.clone();
        let guard = other.try_acquire(actor(3)).unwrap();
        assert_eq!(gate.holder(), Some(actor(3)));
        assert!(gate.try_acquire(actor(4)).is_err());
        drop(guard);
        assert!(gate.try_acquire(actor(4)).is_ok());
    }

    #[test]
    fn competing_attempts_while_held_all_fail() {
        let gate = Gate::new();
        let guard = gate.try_acquire(actor(1)).unwrap();
        let outcomes: Vec<bool> = (2..20)
            .map(|id| gate.try_acquire(actor(id)).is_ok())
            .collect();
        assert!(outcomes.iter().all(|ok| !ok));
        drop(guard);
        assert!(gate.try_acquire(actor(99)).is_ok());
    }

    #[test]
    fn concurrent_threads_see_exactly_one_winner() {
        let gate = Gate::new();
        let threads = 8;
        let start = Arc::new(Barrier::new(threads));
        let held = Arc::new(Barrier::new(threads));
        let handles: Vec<_> = (1..=threads as u32)
            .map(|id| {
                let gate = gate.clone();
                let start = Arc::clone(&start);
                let held = Arc::clone(&held);
                std::thread::spawn(move || {
                    start.wait();
                    let result = gate.try_acquire(actor(id));
                    let won = result.is_ok();
                    // Keep the winner's guard alive until every thread has tried.
                    held.wait();
                    drop(result);
                    won
                })
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
        assert!(!gate.is_held());
    }
}
