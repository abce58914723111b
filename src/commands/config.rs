//! Runtime settings shared by both front ends

use crate::game::save::DEFAULT_SAVE_FILE;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

/// Configuration for a play session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Where games are saved and loaded
    pub save_path: PathBuf,
    /// Fixed seed for reproducible secrets
    pub seed: Option<u64>,
    /// Print phase markers as turns reach milestones
    pub show_phases: bool,
}

impl GameConfig {
    #[must_use]
    pub fn new(save_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
            seed: None,
            show_phases: false,
        }
    }

    /// Random source for the whole process, seeded once
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_FILE)
    }
}
