//! The persisted quick-stack range setting.
//!
//! The setting is a string: a tile radius in `1..=15`, `"Location"` for the
//! player's whole region or `"Global"` for every region. Internally the two
//! tokens are encoded as 16 and 17 so the value fits an integer slider.

pub const DEFAULT_RANGE: &str = "5";
pub const LOCATION_VALUE: i32 = 16;
pub const GLOBAL_VALUE: i32 = 17;

const DEFAULT_VALUE: i32 = 5;
const MIN_TILES: i32 = 1;
const MAX_TILES: i32 = 15;
const LOCATION_TOKEN: &str = "Location";
const GLOBAL_TOKEN: &str = "Global";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickStackRange {
    /// Containers within this many tiles of the player, in the player's region.
    Tiles(u8),
    /// Every container in the player's region.
    Location,
    /// Every container in the world.
    Global,
}

/// Parses a config value, clamping radii into `1..=15` and defaulting anything unrecognized.
pub fn parse(value: &str) -> i32 {
    if let Ok(tiles) = value.trim().parse::<i64>() {
        return tiles.clamp(i64::from(MIN_TILES), i64::from(MAX_TILES)) as i32;
    }
    match value.trim() {
        LOCATION_TOKEN => LOCATION_VALUE,
        GLOBAL_TOKEN => GLOBAL_VALUE,
        _ => DEFAULT_VALUE,
    }
}

pub fn format(value: i32) -> String {
    if (MIN_TILES..=MAX_TILES).contains(&value) {
        return value.to_string();
    }
    match value {
        LOCATION_VALUE => LOCATION_TOKEN.to_string(),
        GLOBAL_VALUE => GLOBAL_TOKEN.to_string(),
        _ => DEFAULT_RANGE.to_string(),
    }
}

pub fn validate_and_constrain(value: &str) -> String {
    format(parse(value))
}

impl QuickStackRange {
    pub fn from_config(value: &str) -> Self {
        Self::from_value(parse(value))
    }

    pub fn from_value(value: i32) -> Self {
        match value {
            LOCATION_VALUE => QuickStackRange::Location,
            GLOBAL_VALUE => QuickStackRange::Global,
            tiles => QuickStackRange::Tiles(tiles.clamp(MIN_TILES, MAX_TILES) as u8),
        }
    }

    pub fn value(self) -> i32 {
        match self {
            QuickStackRange::Tiles(tiles) => i32::from(tiles),
            QuickStackRange::Location => LOCATION_VALUE,
            QuickStackRange::Global => GLOBAL_VALUE,
        }
    }

    pub fn tile_radius(self) -> Option<u8> {
        match self {
            QuickStackRange::Tiles(tiles) => Some(tiles),
            _ => None,
        }
    }
}

impl Default for QuickStackRange {
    fn default() -> Self {
        QuickStackRange::Tiles(DEFAULT_VALUE as u8)
    }
}

impl std::fmt::Display for QuickStackRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format(self.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn canonical_round_trip_table() {
        let cases = [
            ("0", "1"),
            ("5", "5"),
            ("15", "15"),
            ("20", "15"),
            ("Location", "Location"),
            ("Global", "Global"),
            ("garbage", "5"),
        ];
        for (input, expected) in cases {
            assert_eq!(validate_and_constrain(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn named_encodings() {
        assert_eq!(parse("Location"), 16);
        assert_eq!(parse("Global"), 17);
        assert_eq!(parse("global"), 5);
        assert_eq!(parse("-3"), 1);
        assert_eq!(parse("99999999999999"), 15);
    }

    #[test]
    fn category_values_are_stable() {
        for value in [1, 5, 15, 16, 17] {
            assert_eq!(parse(&format(value)), value);
            let text = format(value);
            assert_eq!(format(parse(&text)), text);
        }
    }

    #[test]
    fn unknown_integers_format_to_default() {
        assert_eq!(format(0), "5");
        assert_eq!(format(18), "5");
    }

    #[test]
    fn range_kind_from_config() {
        assert_eq!(QuickStackRange::from_config("3"), QuickStackRange::Tiles(3));
        assert_eq!(QuickStackRange::from_config("Location"), QuickStackRange::Location);
        assert_eq!(QuickStackRange::from_config("Global"), QuickStackRange::Global);
        assert_eq!(QuickStackRange::from_config("nope"), QuickStackRange::Tiles(5));
        assert_eq!(QuickStackRange::Global.tile_radius(), None);
        assert_eq!(QuickStackRange::Tiles(7).to_string(), "7");
    }

    proptest! {
        #[test]
        fn any_integer_clamps_into_tile_range(value in any::<i32>()) {
            let parsed = parse(&value.to_string());
            prop_assert!((1..=15).contains(&parsed));
            prop_assert_eq!(parsed, value.clamp(1, 15));
        }

        #[test]
        fn constrained_values_are_fixed_points(value in "\\PC*") {
            let once = validate_and_constrain(&value);
            prop_assert_eq!(validate_and_constrain(&once), once);
        }
    }
}
