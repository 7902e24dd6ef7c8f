use super::*;

/// Rejection sampling: draw uniform positions and discard the safe cell and repeats.
///
/// Expected draws stay close to the mine count while mines are sparse. The loop always ends because a valid
/// config keeps at least one cell free. The seed advances after every layout, so successive games differ but a
/// starting seed replays the same sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionSampler {
    seed: u64,
}

impl RejectionSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RejectionSampler {
    fn generate(&mut self, config: GameConfig, safe: Pos) -> Result<MineLayout> {
        use rand::prelude::*;

        if !config.contains(safe) {
            return Err(GameError::InvalidCoords);
        }

        let free_cells = config.total_cells() - 1;
        let target = if config.mines > free_cells {
            log::warn!(
                "Board cannot fit {} mines around the safe cell, placing {}",
                config.mines,
                free_cells
            );
            free_cells
        } else {
            config.mines
        };

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut layout = MineLayout::empty(config);
        let mut draws: u32 = 0;

        while layout.count() < target {
            let pos = Pos::new(
                rng.random_range(0..config.rows),
                rng.random_range(0..config.cols),
            );
            draws += 1;

            if pos == safe {
                continue;
            }
            layout.insert(pos);
        }

        self.seed = rng.random();
        log::debug!(
            "Placed {} mines avoiding {} after {} draws",
            layout.count(),
            safe,
            draws
        );
        Ok(layout)
    }
}
