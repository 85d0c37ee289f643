#![forbid(unsafe_code)]

//! Seeded eligibility actions.
//!
//! Three buckets: rewards you can still earn, provider visits, and actions
//! already completed. The eligibility flow selects entries by `key`; the
//! `flow_key` is the label that flow reports to the UX map.

/// Tab an action is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionCategory {
    Rewards,
    Visits,
    Completed,
}

impl ActionCategory {
    pub const ALL: [ActionCategory; 3] = [
        ActionCategory::Rewards,
        ActionCategory::Visits,
        ActionCategory::Completed,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ActionCategory::Rewards => "Rewards",
            ActionCategory::Visits => "Visits",
            ActionCategory::Completed => "Completed",
        }
    }
}

/// One action a member can take (or has taken) to earn a reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityAction {
    /// Stable identifier used by the controllers.
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Reward earned on completion, as displayed.
    pub reward_label: &'static str,
    pub category: ActionCategory,
    /// Node key this action maps to in the eligibility navigation tree.
    pub flow_key: &'static str,
    /// Completion date line, present only for completed actions.
    pub completed_label: Option<&'static str>,
}

pub const ACTION_CATALOG: &[EligibilityAction] = &[
    EligibilityAction {
        key: "immunizations",
        title: "Immunizations",
        description: "Report flu and COVID vaccines",
        reward_label: "$15 towards groceries",
        category: ActionCategory::Rewards,
        flow_key: "Immunizations",
        completed_label: None,
    },
    EligibilityAction {
        key: "pregnancy",
        title: "Pregnancy Program",
        description: "Enroll in prenatal care support",
        reward_label: "$10 towards diapers",
        category: ActionCategory::Rewards,
        flow_key: "Pregnancy",
        completed_label: None,
    },
    EligibilityAction {
        key: "health-survey",
        title: "Health Survey",
        description: "Complete your annual health survey",
        reward_label: "$20 gym card",
        category: ActionCategory::Rewards,
        flow_key: "Health Survey",
        completed_label: None,
    },
    EligibilityAction {
        key: "health-assessment",
        title: "Health Assessment",
        description: "Schedule your annual health assessment",
        reward_label: "$20",
        category: ActionCategory::Visits,
        flow_key: "Annual Physical",
        completed_label: None,
    },
    EligibilityAction {
        key: "pcp-appointment",
        title: "PCP Appointment",
        description: "Visit your primary care provider",
        reward_label: "$50",
        category: ActionCategory::Visits,
        flow_key: "Dental Cleaning",
        completed_label: None,
    },
    EligibilityAction {
        key: "flu-shot",
        title: "Get Flu Shot",
        description: "Annual influenza vaccination",
        reward_label: "$15",
        category: ActionCategory::Completed,
        flow_key: "Immunizations",
        completed_label: Some("Completed: October 15, 2024"),
    },
    EligibilityAction {
        key: "bp-screening",
        title: "Blood Pressure Screening",
        description: "Routine blood pressure check",
        reward_label: "$10",
        category: ActionCategory::Completed,
        flow_key: "Annual Physical",
        completed_label: Some("Completed: September 8, 2024"),
    },
];

/// Actions listed under one tab, in catalog order.
#[must_use]
pub fn actions_for(category: ActionCategory) -> Vec<&'static EligibilityAction> {
    ACTION_CATALOG
        .iter()
        .filter(|a| a.category == category)
        .collect()
}

/// Look up an action by key.
#[must_use]
pub fn action(key: &str) -> Option<&'static EligibilityAction> {
    ACTION_CATALOG.iter().find(|a| a.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        for (i, a) in ACTION_CATALOG.iter().enumerate() {
            for b in &ACTION_CATALOG[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn lookup_round_trips() {
        for entry in ACTION_CATALOG {
            assert_eq!(action(entry.key), Some(entry));
        }
        assert_eq!(action("no-such-action"), None);
    }

    #[test]
    fn bucket_counts() {
        assert_eq!(actions_for(ActionCategory::Rewards).len(), 3);
        assert_eq!(actions_for(ActionCategory::Visits).len(), 2);
        assert_eq!(actions_for(ActionCategory::Completed).len(), 2);
    }

    #[test]
    fn only_completed_actions_carry_completion_dates() {
        for entry in ACTION_CATALOG {
            assert_eq!(
                entry.completed_label.is_some(),
                entry.category == ActionCategory::Completed,
                "action {}",
                entry.key
            );
        }
    }
}
