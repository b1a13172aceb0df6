use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A symbol that can appear on a reel, with one or more interchangeable
/// art variants sharing the same description.
///
/// Variant grouping comes from the symbol scanner: image files whose
/// basenames differ only by a trailing `_<modifier><digit>` suffix are
/// collected under a single description (see `catalog::symbol_basename`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelSymbol {
    pub description: String,
    pub image_files: Vec<PathBuf>,
}

impl ReelSymbol {
    pub fn new(description: impl Into<String>, image_files: Vec<PathBuf>) -> Self {
        Self {
            description: description.into(),
            image_files,
        }
    }
}

/// A symbol fixed in place by a spin: one description, one concrete
/// art variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpunSymbol {
    pub description: String,
    pub image_file: PathBuf,
}

/// The three symbols showing on one reel after a spin, top to bottom.
/// Index 1 is the centre payline position.
pub type SpunReel = Vec<SpunSymbol>;

/// All reels of a spun machine, left to right.
pub type SpunReels = Vec<SpunReel>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reel_symbol_creation() {
        let symbol = ReelSymbol::new(
            "cherry",
            vec![PathBuf::from("cherry_1.png"), PathBuf::from("cherry_2.png")],
        );
        assert_eq!(symbol.description, "cherry");
        assert_eq!(symbol.image_files.len(), 2);
    }

    #[test]
    fn ron_round_trip() {
        let symbol = ReelSymbol::new("bell", vec![PathBuf::from("bell.png")]);
        let serialized = ron::to_string(&symbol).unwrap();
        let deserialized: ReelSymbol = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized, symbol);
    }

    #[test]
    fn spun_symbol_holds_one_variant() {
        let spun = SpunSymbol {
            description: "cherry".to_string(),
            image_file: PathBuf::from("cherry_2.png"),
        };
        assert_eq!(spun.description, "cherry");
        assert_eq!(spun.image_file, PathBuf::from("cherry_2.png"));
    }
}
