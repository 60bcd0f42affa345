//! Planner configuration.

use chrono::Duration;

/// Tunable parameters for journey planning.
///
/// The search caps (`transfer_branch_limit`, `max_hops`) bound search time
/// on dense or malformed graphs; they trade precision for a guaranteed
/// finish, so raising them widens the search at a cost.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Fixed walking/waiting time charged for a route change (minutes).
    pub transfer_penalty_mins: i64,

    /// Walking allowance charged per walking leg of the journey (minutes).
    /// Every itinerary has two walking legs: to the first station and from
    /// the last.
    pub walk_allowance_mins: i64,

    /// Maximum hops explored by the graph-traversal fallback.
    pub max_hops: usize,

    /// Maximum second-route candidates considered per transfer station.
    pub transfer_branch_limit: usize,
}

impl PlannerConfig {
    /// Returns the transfer penalty as a Duration.
    pub fn transfer_penalty(&self) -> Duration {
        Duration::minutes(self.transfer_penalty_mins)
    }

    /// Returns the per-leg walking allowance as a Duration.
    pub fn walk_allowance(&self) -> Duration {
        Duration::minutes(self.walk_allowance_mins)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            transfer_penalty_mins: 10,
            walk_allowance_mins: 5,
            max_hops: 50,
            transfer_branch_limit: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.transfer_penalty_mins, 10);
        assert_eq!(config.walk_allowance_mins, 5);
        assert_eq!(config.max_hops, 50);
        assert_eq!(config.transfer_branch_limit, 5);
    }

    #[test]
    fn duration_methods() {
        let config = PlannerConfig::default();

        assert_eq!(config.transfer_penalty(), Duration::minutes(10));
        assert_eq!(config.walk_allowance(), Duration::minutes(5));
    }
}
