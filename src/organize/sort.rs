use std::cmp::Ordering;

use crate::entities::item::{merge_into, ItemStack};

/// Decides the order of a container's contents when it is organized.
pub trait SortPolicy {
    fn organize(&self, items: &mut Vec<ItemStack>);
}

/// Merges partial stacks, then sorts by category, name, quality (best first)
/// and stack size (largest first). Ties keep their existing order.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardOrganize;

impl StandardOrganize {
    fn compare(a: &ItemStack, b: &ItemStack) -> Ordering {
        a.category
            .cmp(&b.category)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| b.quality.cmp(&a.quality))
            .then_with(|| b.count.cmp(&a.count))
    }
}

impl SortPolicy for StandardOrganize {
    fn organize(&self, items: &mut Vec<ItemStack>) {
        let mut merged: Vec<ItemStack> = Vec::with_capacity(items.len());
        for item in items.drain(..) {
            merge_into(&mut merged, item);
        }
        merged.sort_by(Self::compare);
        *items = merged;
    }
}

impl<F> SortPolicy for F
where
    F: Fn(&mut Vec<ItemStack>),
{
    fn organize(&self, items: &mut Vec<ItemStack>) {
        self(items)
    }
}
