//! The full campaign: one level archive per difficulty tier.

use std::fs;
use std::path::Path;

use oneline_core::board::Board;
use oneline_core::solution::Solution;

use crate::level_text::{LevelArchive, LevelError};

struct TierLevels {
    archive: LevelArchive,
    count: u32,
}

/// Every tier's levels, loaded once at startup from a directory of
/// `<tier>levels.txt` files (`0levels.txt`, `1levels.txt`, ...).
pub struct Campaign {
    tiers: Vec<TierLevels>,
}

impl Campaign {
    /// Load `tier_count` archives from `dir` and read each tier's level
    /// count from its `//levels` record.
    pub fn load(dir: &Path, tier_count: u32) -> Result<Self, LevelError> {
        let mut tiers = Vec::with_capacity(tier_count as usize);
        for tier in 0..tier_count {
            let path = dir.join(format!("{tier}levels.txt"));
            let text = fs::read_to_string(&path).map_err(|source| LevelError::Io {
                path: path.clone(),
                source,
            })?;
            let archive = LevelArchive::parse(&text);
            let count = archive.level_count()?;
            tiers.push(TierLevels { archive, count });
        }
        Ok(Self { tiers })
    }

    /// Build a campaign from already-parsed archives (tests, embedded
    /// resources).
    pub fn from_archives(archives: Vec<LevelArchive>) -> Result<Self, LevelError> {
        let mut tiers = Vec::with_capacity(archives.len());
        for archive in archives {
            let count = archive.level_count()?;
            tiers.push(TierLevels { archive, count });
        }
        Ok(Self { tiers })
    }

    /// Number of loaded tiers.
    pub fn tier_count(&self) -> u32 {
        self.tiers.len() as u32
    }

    /// Total level count of one tier.
    pub fn levels_in_tier(&self, tier: u32) -> Option<u32> {
        self.tiers.get(tier as usize).map(|t| t.count)
    }

    /// Level counts for all tiers in order, as challenge selection wants
    /// them.
    pub fn levels_per_tier(&self) -> Vec<u32> {
        self.tiers.iter().map(|t| t.count).collect()
    }

    /// The raw archive of one tier.
    pub fn archive(&self, tier: u32) -> Option<&LevelArchive> {
        self.tiers.get(tier as usize).map(|t| &t.archive)
    }

    /// Decode a level out of a tier.
    pub fn level(&self, tier: u32, index: u32) -> Result<(Board, Solution), LevelError> {
        self.tiers
            .get(tier as usize)
            .ok_or(LevelError::TierOutOfRange { tier })?
            .archive
            .level(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier_table(levels: u32) -> String {
        let mut out = format!("//levels: {levels}\n");
        for i in 1..=levels {
            out.push_str(&format!(
                "index: {i},\nlayout: [[\"21\", \"11\"]],\npath: [[0, 0], [0, 1], [1, 1], [1, 0]],\n"
            ));
        }
        out
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir()
            .join("oneline-campaign-tests")
            .join(format!("{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_every_tier_file() {
        let dir = scratch_dir("loads");
        for (tier, levels) in [(0u32, 3u32), (1, 2)] {
            fs::write(dir.join(format!("{tier}levels.txt")), tier_table(levels)).unwrap();
        }

        let campaign = Campaign::load(&dir, 2).unwrap();
        assert_eq!(campaign.tier_count(), 2);
        assert_eq!(campaign.levels_in_tier(0), Some(3));
        assert_eq!(campaign.levels_in_tier(1), Some(2));
        assert_eq!(campaign.levels_per_tier(), vec![3, 2]);

        let (board, solution) = campaign.level(1, 2).unwrap();
        assert_eq!(board.active_count(), 4);
        assert_eq!(solution.len(), 4);
    }

    #[test]
    fn missing_tier_file_is_an_io_error() {
        let dir = scratch_dir("missing");
        fs::write(dir.join("0levels.txt"), tier_table(1)).unwrap();

        // Asks for two tiers but only tier 0 exists.
        assert!(matches!(
            Campaign::load(&dir, 2),
            Err(LevelError::Io { .. })
        ));
    }

    #[test]
    fn tier_out_of_range_is_reported() {
        let campaign =
            Campaign::from_archives(vec![LevelArchive::parse(&tier_table(1))]).unwrap();
        assert!(matches!(
            campaign.level(5, 1),
            Err(LevelError::TierOutOfRange { tier: 5 })
        ));
        assert!(campaign.levels_in_tier(5).is_none());
    }

    #[test]
    fn archive_without_count_fails_to_load() {
        let archive = LevelArchive::parse("index: 1\n");
        assert!(matches!(
            Campaign::from_archives(vec![archive]),
            Err(LevelError::MissingLevelCount)
        ));
    }
}
