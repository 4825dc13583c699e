//! Configuration for a roll session.

/// Configuration for a roll session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for reproducible rolls; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// How many history entries the `history` command shows at once.
    pub history_window: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            history_window: 10,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the history window (at least 1).
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.history_window, 10);
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default().with_seed(123).with_history_window(5);
        assert_eq!(cfg.seed, Some(123));
        assert_eq!(cfg.history_window, 5);
    }

    #[test]
    fn history_window_clamped() {
        let cfg = SessionConfig::default().with_history_window(0);
        assert_eq!(cfg.history_window, 1);
    }
}
