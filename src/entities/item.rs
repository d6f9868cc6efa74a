use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_STACK: u32 = 999;

/// A stack of identical items held by a player or a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Qualified id, e.g. `(O)388`.
    pub item_id: String,
    pub name: String,
    pub count: u32,
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
    #[serde(default)]
    pub category: i32,
    #[serde(default)]
    pub quality: u8,
}

fn default_max_stack() -> u32 {
    DEFAULT_MAX_STACK
}

impl ItemStack {
    pub fn new(item_id: impl Into<String>, name: impl Into<String>, count: u32) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
            count,
            max_stack: DEFAULT_MAX_STACK,
            category: 0,
            quality: 0,
        }
    }

    pub fn with_category(mut self, category: i32) -> Self {
        self.category = category;
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_max_stack(mut self, max_stack: u32) -> Self {
        self.max_stack = max_stack.max(1);
        self
    }

    /// Same item in the same quality, so the two stacks may merge.
    pub fn can_stack_with(&self, other: &ItemStack) -> bool {
        self.item_id == other.item_id && self.quality == other.quality
    }

    pub fn space_left(&self) -> u32 {
        self.max_stack.saturating_sub(self.count)
    }

    /// Moves as much of `other` into `self` as fits and returns how many moved.
    pub fn absorb(&mut self, other: &mut ItemStack) -> u32 {
        if !self.can_stack_with(other) {
            return 0;
        }
        let moved = self.space_left().min(other.count);
        self.count += moved;
        other.count -= moved;
        moved
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Adds `item` to `items`, topping up compatible stacks before appending what is left.
///
/// Returns the number of units that ended up in `items`, which is always the whole stack.
pub fn merge_into(items: &mut Vec<ItemStack>, mut item: ItemStack) -> u32 {
    let total = item.count;
    for existing in items.iter_mut() {
        if item.is_empty() {
            break;
        }
        existing.absorb(&mut item);
    }
    if !item.is_empty() {
        items.push(item);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_respects_max_stack() {
        let mut target = ItemStack::new("(O)388", "Wood", 995);
        let mut incoming = ItemStack::new("(O)388", "Wood", 10);
        assert_eq!(target.absorb(&mut incoming), 4);
        assert_eq!(target.count, 999);
        assert_eq!(incoming.count, 6);
    }

    #[test]
    fn absorb_ignores_different_quality() {
        let mut target = ItemStack::new("(O)24", "Parsnip", 3);
        let mut incoming = ItemStack::new("(O)24", "Parsnip", 3).with_quality(2);
        assert_eq!(target.absorb(&mut incoming), 0);
        assert_eq!(target.count, 3);
    }

    #[test]
    fn merge_into_tops_up_then_appends() {
        let mut items = vec![
            ItemStack::new("(O)388", "Wood", 990),
            ItemStack::new("(O)390", "Stone", 5),
        ];
        let moved = merge_into(&mut items, ItemStack::new("(O)388", "Wood", 20));
        assert_eq!(moved, 20);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].count, 999);
        assert_eq!(items[2].count, 11);
        assert_eq!(items[2].item_id, "(O)388");
    }

    #[test]
    fn max_stack_never_drops_below_one() {
        let item = ItemStack::new("(T)Axe", "Axe", 1).with_max_stack(0);
        assert_eq!(item.max_stack, 1);
    }
}
