/// Schedule for the probability of taking a random action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Exploration {
    /// Always exploit the current estimates.
    Greedy,
    /// Explore with a fixed probability.
    EpsilonGreedy {
        /// Probability of a uniformly random action.
        epsilon: f64,
    },
    /// Start fully random and anneal as `h / (h + episode)` with
    /// `h = decay_episodes / 2`, reaching one half after `h` episodes.
    Annealed {
        /// Number of episodes over which exploration falls to one third.
        decay_episodes: u32,
    },
}

impl Default for Exploration {
    fn default() -> Self {
        Self::EpsilonGreedy { epsilon: 0.1 }
    }
}

impl Exploration {
    /// Exploration probability for the given zero-based episode index.
    #[must_use]
    pub fn epsilon(self, episode: u64) -> f64 {
        match self {
            Self::Greedy => 0.0,
            Self::EpsilonGreedy { epsilon } => epsilon.clamp(0.0, 1.0),
            Self::Annealed { decay_episodes } => {
                let half = f64::from(decay_episodes) / 2.0;
                if half <= 0.0 {
                    return 0.0;
                }
                #[allow(clippy::cast_precision_loss)]
                let episode = episode as f64;
                half / (half + episode)
            }
        }
    }
}
