use crate::config::SamplerConfig;

/// Bounded grow-and-retry policy for snapshot buffers
///
/// Attempt `n` (0-based) sizes the buffer at
/// `live_count + initial_margin + n * margin_step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityPolicy {
    pub initial_margin: usize,
    pub margin_step: usize,
    /// Additional attempts after the first; 0 disables retrying
    pub max_retries: u32,
}

impl CapacityPolicy {
    pub fn margin_for_attempt(&self, attempt: u32) -> usize {
        self.initial_margin
            .saturating_add(self.margin_step.saturating_mul(attempt as usize))
    }
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self {
            initial_margin: 10,
            margin_step: 10,
            max_retries: 3,
        }
    }
}

impl From<&SamplerConfig> for CapacityPolicy {
    fn from(config: &SamplerConfig) -> Self {
        Self {
            initial_margin: config.capacity_margin,
            margin_step: config.margin_step,
            max_retries: config.max_capacity_retries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_grows_linearly() {
        let policy = CapacityPolicy {
            initial_margin: 2,
            margin_step: 5,
            max_retries: 3,
        };
        assert_eq!(policy.margin_for_attempt(0), 2);
        assert_eq!(policy.margin_for_attempt(1), 7);
        assert_eq!(policy.margin_for_attempt(3), 17);
    }

    #[test]
    fn test_margin_saturates() {
        let policy = CapacityPolicy {
            initial_margin: usize::MAX - 1,
            margin_step: 10,
            max_retries: 1,
        };
        assert_eq!(policy.margin_for_attempt(1), usize::MAX);
    }
}
