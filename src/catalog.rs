/// Catalog loading: one RON descriptor plus the symbol art beside it.
///
/// A catalog file names the machine styles, the shared reel position
/// grid, the symbol directories behind each reel, and the status
/// template catalog. All paths in the file are resolved relative to
/// the file itself, so a catalog directory can be moved as a unit.
/// Symbol art is discovered by walking each reel's directories; files
/// whose stems differ only by a variant suffix (`cherry_1`, `cherry_2`)
/// collapse into one symbol with interchangeable art.
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::core::machine::{FruitMachine, MachineError};
use crate::core::template::Template;
use crate::schema::machine::{MachineStyle, Reel};
use crate::schema::symbol::ReelSymbol;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("RON deserialization error in {}: {source}", .path.display())]
    Ron {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("symbol directory does not exist: {}", .0.display())]
    MissingSymbolDir(PathBuf),
    #[error("reel {0} has no symbol images")]
    EmptyReel(usize),
}

/// On-disk shape of the descriptor file.
#[derive(Debug, Deserialize)]
struct RawCatalog {
    machines: Vec<RawMachine>,
    /// Pixel anchors per reel, three rows each, shared by every style.
    reel_positions: Vec<Vec<(i32, i32)>>,
    /// Per reel, the directories to scan for symbol art.
    reels: Vec<Vec<PathBuf>>,
    statuses: Vec<Template>,
}

#[derive(Debug, Deserialize)]
struct RawMachine {
    description: String,
    background: PathBuf,
    foreground: PathBuf,
}

/// Everything loaded from one catalog directory.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub machines: Vec<MachineStyle>,
    pub reels: Vec<Reel>,
    pub statuses: Vec<Template>,
}

impl Catalog {
    /// Load a catalog from its RON descriptor.
    ///
    /// Symbols are grouped per reel, so a description appearing in two
    /// of a reel's directories still lands at most once per spin.
    /// Scanning is sorted at every level, which keeps symbol order,
    /// and with it every seeded draw, stable across filesystems.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawCatalog = ron::from_str(&contents).map_err(|source| CatalogError::Ron {
            path: path.to_path_buf(),
            source,
        })?;

        let machines: Vec<MachineStyle> = raw
            .machines
            .into_iter()
            .map(|machine| MachineStyle {
                description: machine.description,
                background: base.join(machine.background),
                foreground: base.join(machine.foreground),
                positions: raw.reel_positions.clone(),
            })
            .collect();

        let mut reels = Vec::with_capacity(raw.reels.len());
        for (index, dirs) in raw.reels.iter().enumerate() {
            let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
            for dir in dirs {
                let dir = base.join(dir);
                if !dir.is_dir() {
                    return Err(CatalogError::MissingSymbolDir(dir));
                }
                collect_symbol_files(&dir, &mut groups)?;
            }
            if groups.is_empty() {
                return Err(CatalogError::EmptyReel(index));
            }

            let symbols = groups
                .into_iter()
                .map(|(description, mut image_files)| {
                    image_files.sort();
                    ReelSymbol {
                        description,
                        image_files,
                    }
                })
                .collect();
            reels.push(Reel { symbols });
        }

        info!(
            machines = machines.len(),
            reels = reels.len(),
            statuses = raw.statuses.len(),
            catalog = %path.display(),
            "catalog loaded"
        );

        Ok(Self {
            machines,
            reels,
            statuses: raw.statuses,
        })
    }

    /// Assemble the loaded resources into a ready machine.
    pub fn into_machine(self) -> Result<FruitMachine, MachineError> {
        FruitMachine::new(self.machines, self.reels, self.statuses)
    }
}

/// Walk a directory, grouping image files by symbol description.
fn collect_symbol_files(
    dir: &Path,
    groups: &mut BTreeMap<String, Vec<PathBuf>>,
) -> Result<(), CatalogError> {
    let entries = fs::read_dir(dir).map_err(|source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        paths.push(entry.path());
    }
    paths.sort();

    for path in paths {
        if path.is_dir() {
            collect_symbol_files(&path, groups)?;
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        // Skip dotfiles left behind by editors and file managers.
        if stem.starts_with('.') {
            continue;
        }
        let description = symbol_basename(stem).to_string();
        groups.entry(description).or_default().push(path);
    }

    Ok(())
}

/// Strip a variant suffix from a symbol file stem.
///
/// Art sets mark interchangeable drawings of one symbol with a final
/// underscore-separated modifier ending in a digit: `cherry_1` and
/// `cherry_v2` are both `cherry`, while `high_card` keeps its
/// underscore.
fn symbol_basename(stem: &str) -> &str {
    if let Some((base, modifier)) = stem.rsplit_once('_') {
        if modifier.chars().next_back().is_some_and(|c| c.is_ascii_digit()) {
            return base;
        }
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_strips_numbered_modifiers() {
        assert_eq!(symbol_basename("cherry_1"), "cherry");
        assert_eq!(symbol_basename("cherry_v2"), "cherry");
        assert_eq!(symbol_basename("clw_r1"), "clw");
    }

    #[test]
    fn basename_keeps_plain_underscores() {
        assert_eq!(symbol_basename("high_card"), "high_card");
        assert_eq!(symbol_basename("lucky_seven_wild"), "lucky_seven_wild");
    }

    #[test]
    fn basename_without_underscore_passes_through() {
        assert_eq!(symbol_basename("bell"), "bell");
    }

    #[test]
    fn basename_with_trailing_underscore_passes_through() {
        assert_eq!(symbol_basename("cherry_"), "cherry_");
    }

    #[test]
    fn missing_descriptor_is_an_io_error() {
        let result = Catalog::load(Path::new("tests/fixtures/does_not_exist.ron"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
