/// Fruit machine orchestration: one spin from styled cabinet to caption.
///
/// A machine owns the loaded styles, reels, and status catalog. Each
/// [`spin`](FruitMachine::spin) picks a cabinet style, lands three
/// distinct symbols on every reel, fixes an art variant for each, and
/// produces the accessibility description, the status caption, and the
/// jackpot flag. Image compositing happens elsewhere; this type only
/// decides what the picture and post would say.
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::debug;

use crate::core::context::join_natural;
use crate::core::phrase::{PhraseError, PhraseGenerator};
use crate::core::template::Template;
use crate::schema::machine::{MachineStyle, Reel};
use crate::schema::symbol::{SpunReels, SpunSymbol};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("no machine styles loaded")]
    NoMachines,
    #[error("no reels loaded")]
    NoReels,
    #[error("invalid machine setup: {0}")]
    Invalid(String),
    #[error(transparent)]
    Phrase(#[from] PhraseError),
}

/// One resolved spin: everything a publisher needs to post it.
#[derive(Debug, Clone)]
pub struct Spin {
    pub style: MachineStyle,
    pub reels: SpunReels,
    /// Accessibility description of the picture.
    pub description: String,
    /// Status caption generated from the template catalog.
    pub caption: String,
    pub jackpot: bool,
}

#[derive(Debug)]
pub struct FruitMachine {
    machines: Vec<MachineStyle>,
    reels: Vec<Reel>,
    phrases: PhraseGenerator,
}

impl FruitMachine {
    /// Assemble a machine from loaded resources.
    ///
    /// Everything a spin could trip over is checked here: every style
    /// carries one position list per reel with three anchors each, and
    /// every reel holds at least three symbols, each with art to show.
    /// After this, [`spin`](Self::spin) can only fail on a catalog and
    /// context mismatch.
    pub fn new(
        machines: Vec<MachineStyle>,
        reels: Vec<Reel>,
        statuses: Vec<Template>,
    ) -> Result<Self, MachineError> {
        if machines.is_empty() {
            return Err(MachineError::NoMachines);
        }
        if reels.is_empty() {
            return Err(MachineError::NoReels);
        }

        for machine in &machines {
            if machine.positions.len() != reels.len() {
                return Err(MachineError::Invalid(format!(
                    "style {:?} places {} reels but {} are loaded",
                    machine.description,
                    machine.positions.len(),
                    reels.len()
                )));
            }
            for (index, row) in machine.positions.iter().enumerate() {
                if row.len() != 3 {
                    return Err(MachineError::Invalid(format!(
                        "style {:?} has {} positions on reel {}, expected 3",
                        machine.description,
                        row.len(),
                        index
                    )));
                }
            }
        }

        for (index, reel) in reels.iter().enumerate() {
            if reel.symbols.len() < 3 {
                return Err(MachineError::Invalid(format!(
                    "reel {} holds {} symbols, need at least 3 distinct ones",
                    index,
                    reel.symbols.len()
                )));
            }
            for symbol in &reel.symbols {
                if symbol.image_files.is_empty() {
                    return Err(MachineError::Invalid(format!(
                        "symbol {:?} on reel {} has no image variants",
                        symbol.description, index
                    )));
                }
            }
        }

        let phrases = PhraseGenerator::new(statuses)?;
        Ok(Self {
            machines,
            reels,
            phrases,
        })
    }

    pub fn machines(&self) -> &[MachineStyle] {
        &self.machines
    }

    pub fn reels(&self) -> &[Reel] {
        &self.reels
    }

    /// Spin the machine once.
    ///
    /// Each reel lands distinct symbols (a reel strip cannot show the
    /// same symbol twice at once) in random order, one art variant
    /// fixed per landed symbol. The jackpot flag is true when the whole
    /// centre payline reads the same description.
    pub fn spin(&self, today: NaiveDate, rng: &mut StdRng) -> Result<Spin, MachineError> {
        let style = self
            .machines
            .choose(rng)
            .ok_or(MachineError::NoMachines)?
            .clone();
        let per_reel = style.positions[0].len();

        let mut reels: SpunReels = Vec::with_capacity(self.reels.len());
        for reel in &self.reels {
            let mut indexes: Vec<usize> = (0..reel.symbols.len()).collect();
            let (landed, _) = indexes.partial_shuffle(rng, per_reel);

            let mut spun_reel = Vec::with_capacity(per_reel);
            for &index in landed.iter() {
                let symbol = &reel.symbols[index];
                let image_file = symbol
                    .image_files
                    .choose(rng)
                    .ok_or_else(|| {
                        MachineError::Invalid(format!(
                            "symbol {:?} has no image variants",
                            symbol.description
                        ))
                    })?
                    .clone();
                spun_reel.push(SpunSymbol {
                    description: symbol.description.clone(),
                    image_file,
                });
            }
            reels.push(spun_reel);
        }

        let payline: Vec<&str> = reels.iter().map(|r| r[1].description.as_str()).collect();
        let description = format!(
            "A {} Fruit Machine with the centre payline showing a combination of {}.",
            style.description,
            join_natural(&payline)
        );
        let jackpot = payline.windows(2).all(|pair| pair[0] == pair[1]);

        let caption = self.phrases.generate(&style, &reels, today, rng)?;

        debug!(
            machine = %style.description,
            payline = %payline.join("/"),
            jackpot,
            "spun the reels"
        );

        Ok(Spin {
            style,
            reels,
            description,
            caption,
            jackpot,
        })
    }
}
