//! Action reward table
//!
//! Static mapping from dashboard action to a fixed XP amount. The table is
//! data: which action is worth what is a product decision, not engine
//! logic, so callers that only know an action name resolve it here.

/// Fixed XP amounts per action
pub const ACTION_REWARDS: &[(&str, u64)] = &[
    ("login", 5),
    ("word_mastered", 10),
    ("shadowing_session", 10),
    ("conversation", 15),
    ("diary_entry", 20),
    ("daily_goal", 25),
];

/// XP for an action name, None for unknown actions
pub fn xp_for_action(action: &str) -> Option<u64> {
    ACTION_REWARDS
        .iter()
        .find(|(name, _)| *name == action)
        .map(|(_, xp)| *xp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_actions() {
        assert_eq!(xp_for_action("login"), Some(5));
        assert_eq!(xp_for_action("diary_entry"), Some(20));
    }

    #[test]
    fn test_unknown_action() {
        assert_eq!(xp_for_action("does_not_exist"), None);
    }

    #[test]
    fn test_rewards_all_positive() {
        for (name, xp) in ACTION_REWARDS {
            assert!(*xp > 0, "{} must award positive XP", name);
        }
    }
}
