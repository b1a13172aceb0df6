use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::symbol::ReelSymbol;

/// The visual style of a fruit machine: a name for captions, background
/// and foreground art, and the pixel anchor for every symbol position.
///
/// `positions[r]` holds the anchors for reel `r`, top to bottom; every
/// reel shows `positions[r].len()` symbols (three on a standard machine,
/// with index 1 the centre payline).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineStyle {
    pub description: String,
    pub background: PathBuf,
    pub foreground: PathBuf,
    pub positions: Vec<Vec<(i32, i32)>>,
}

/// A reel: the pool of symbols a spin draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reel {
    pub symbols: Vec<ReelSymbol>,
}

impl Reel {
    pub fn new(symbols: Vec<ReelSymbol>) -> Self {
        Self { symbols }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_style() -> MachineStyle {
        MachineStyle {
            description: "classic cherry-red".to_string(),
            background: PathBuf::from("machines/red_bg.png"),
            foreground: PathBuf::from("machines/red_fg.png"),
            positions: vec![
                vec![(38, 12), (38, 86), (38, 160)],
                vec![(126, 12), (126, 86), (126, 160)],
                vec![(214, 12), (214, 86), (214, 160)],
            ],
        }
    }

    #[test]
    fn style_positions_per_reel() {
        let style = make_style();
        assert_eq!(style.positions.len(), 3);
        for reel_positions in &style.positions {
            assert_eq!(reel_positions.len(), 3);
        }
    }

    #[test]
    fn ron_round_trip() {
        let style = make_style();
        let serialized = ron::to_string(&style).unwrap();
        let deserialized: MachineStyle = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized, style);
    }

    #[test]
    fn reel_holds_symbol_pool() {
        let reel = Reel::new(vec![
            ReelSymbol::new("cherry", vec![PathBuf::from("cherry.png")]),
            ReelSymbol::new("bell", vec![PathBuf::from("bell.png")]),
        ]);
        assert_eq!(reel.symbols.len(), 2);
    }
}
