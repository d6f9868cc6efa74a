use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Rectangle inside a texture, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpriteData {
    pub texture: String,
    pub source: SourceRect,
}

const ERROR_TEXTURE: &str = "TileSheets/error";

/// Resolves qualified item ids to the texture region they are drawn from.
///
/// Unknown ids resolve to the error item sprite rather than failing, so a
/// missing catalog entry only shows up as a placeholder in the animation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    #[serde(default)]
    items: HashMap<String, ItemSpriteData>,
    #[serde(default = "error_sprite")]
    error_item: ItemSpriteData,
}

fn error_sprite() -> ItemSpriteData {
    ItemSpriteData {
        texture: ERROR_TEXTURE.to_string(),
        source: SourceRect {
            x: 0,
            y: 0,
            width: 16,
            height: 16,
        },
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            error_item: error_sprite(),
        }
    }
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| format!("read item catalog {} failed: {}", path.display(), err))?;
        serde_yaml::from_str(&text)
            .map_err(|err| format!("parse item catalog {} failed: {}", path.display(), err))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn resolve(&self, item_id: &str) -> &ItemSpriteData {
        self.items.get(item_id).unwrap_or(&self.error_item)
    }
}
