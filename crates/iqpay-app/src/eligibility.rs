#![forbid(unsafe_code)]

//! The eligibility flow controller.
//!
//! Members browse actions under two tabs (rewards, provider visits) and
//! report completed immunizations through a five-step wizard. Only the
//! immunizations action has a wizard; other actions show a detail
//! placeholder. No timers here; the flow is purely message driven.

use iqpay_model::picker::{IMMUNIZATION_LOCATIONS, IMMUNIZATION_TYPES, WIZARD_PROGRAMS};
use iqpay_model::{ActionCategory, EligibilityAction, action, actions_for, nav};
use iqpay_runtime::{Cmd, Model};

/// Which half of the screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilitySection {
    Actions,
    Plan,
}

/// Action list filter; a narrower view of [`ActionCategory`] without the
/// completed bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityMode {
    Rewards,
    Visits,
}

impl EligibilityMode {
    #[must_use]
    pub fn category(self) -> ActionCategory {
        match self {
            EligibilityMode::Rewards => ActionCategory::Rewards,
            EligibilityMode::Visits => ActionCategory::Visits,
        }
    }
}

/// Steps of the immunization wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    ConfirmEligibility,
    ImmunizationDetails,
    ReviewSubmit,
    DeliveryMethod,
    Confirmation,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::ConfirmEligibility,
        WizardStep::ImmunizationDetails,
        WizardStep::ReviewSubmit,
        WizardStep::DeliveryMethod,
        WizardStep::Confirmation,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            WizardStep::ConfirmEligibility => "Confirm Eligibility",
            WizardStep::ImmunizationDetails => "Immunization Details",
            WizardStep::ReviewSubmit => "Review & Submit",
            WizardStep::DeliveryMethod => "Delivery Method",
            WizardStep::Confirmation => "Confirmation",
        }
    }

    /// 1-based position for the step indicator.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            WizardStep::ConfirmEligibility => 1,
            WizardStep::ImmunizationDetails => 2,
            WizardStep::ReviewSubmit => 3,
            WizardStep::DeliveryMethod => 4,
            WizardStep::Confirmation => 5,
        }
    }

    #[must_use]
    pub fn next(self) -> Option<WizardStep> {
        Self::ALL.get(self.number() as usize).copied()
    }

    #[must_use]
    pub fn prev(self) -> Option<WizardStep> {
        let n = self.number() as usize;
        if n >= 2 { Some(Self::ALL[n - 2]) } else { None }
    }
}

/// How the confirmation is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMethod {
    Text,
    Email,
}

/// Wizard form fields, carried across steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardForm {
    pub member_id: String,
    pub dob_month: String,
    pub dob_day: String,
    pub dob_year: String,
    pub program: &'static str,
    pub immunization_type: &'static str,
    pub date_received: String,
    pub location: &'static str,
    pub provider: String,
    pub notes: String,
    pub delivery: DeliveryMethod,
}

impl Default for WizardForm {
    fn default() -> Self {
        Self {
            member_id: String::new(),
            dob_month: String::new(),
            dob_day: String::new(),
            dob_year: String::new(),
            program: WIZARD_PROGRAMS[0],
            immunization_type: IMMUNIZATION_TYPES[0],
            date_received: String::new(),
            location: IMMUNIZATION_LOCATIONS[0],
            provider: "CVS".to_owned(),
            notes: String::new(),
            delivery: DeliveryMethod::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EligibilityMsg {
    SelectSection(EligibilitySection),
    SelectMode(EligibilityMode),
    SelectAction(String),
    WizardContinue,
    WizardBack,
    /// Leave the flow entirely, resetting any selection and wizard state.
    Dismiss,
    MemberIdChanged(String),
    DobMonthChanged(String),
    DobDayChanged(String),
    DobYearChanged(String),
    ProgramSelected(&'static str),
    ImmunizationTypeSelected(&'static str),
    DateReceivedChanged(String),
    LocationSelected(&'static str),
    ProviderChanged(String),
    NotesChanged(String),
    DeliverySelected(DeliveryMethod),
}

/// The eligibility flow's screen controller.
pub struct EligibilityApp {
    section: EligibilitySection,
    mode: EligibilityMode,
    selected: Option<&'static EligibilityAction>,
    wizard: Option<(WizardStep, WizardForm)>,
    /// False until the first message; the UX map shows "Welcome" only then.
    interacted: bool,
}

impl Default for EligibilityApp {
    fn default() -> Self {
        Self::new()
    }
}

impl EligibilityApp {
    #[must_use]
    pub fn new() -> Self {
        Self {
            section: EligibilitySection::Actions,
            mode: EligibilityMode::Rewards,
            selected: None,
            wizard: None,
            interacted: false,
        }
    }

    #[must_use]
    pub fn section(&self) -> EligibilitySection {
        self.section
    }

    #[must_use]
    pub fn mode(&self) -> EligibilityMode {
        self.mode
    }

    #[must_use]
    pub fn selected_action(&self) -> Option<&'static EligibilityAction> {
        self.selected
    }

    #[must_use]
    pub fn wizard_step(&self) -> Option<WizardStep> {
        self.wizard.as_ref().map(|(step, _)| *step)
    }

    #[must_use]
    pub fn wizard_form(&self) -> Option<&WizardForm> {
        self.wizard.as_ref().map(|(_, form)| form)
    }

    /// Actions listed under the current mode.
    #[must_use]
    pub fn visible_actions(&self) -> Vec<&'static EligibilityAction> {
        actions_for(self.mode.category())
    }

    /// Step label the UX map is keyed by.
    #[must_use]
    pub fn current_step(&self) -> String {
        if !self.interacted {
            return "Welcome".to_owned();
        }
        if let Some((step, _)) = &self.wizard {
            return format!("Immunizations: {}", step.label());
        }
        match self.selected {
            Some(action) => action.flow_key.to_owned(),
            None => "Actions".to_owned(),
        }
    }

    /// UX map snapshot for the current step.
    #[must_use]
    pub fn ux_map(&self) -> nav::UxMap {
        nav::eligibility_map(&self.current_step())
    }

    fn form_mut(&mut self) -> Option<&mut WizardForm> {
        self.wizard.as_mut().map(|(_, form)| form)
    }

    fn reset_flow(&mut self) {
        self.selected = None;
        self.wizard = None;
    }
}

impl Model for EligibilityApp {
    type Message = EligibilityMsg;

    fn update(&mut self, msg: EligibilityMsg) -> Cmd<EligibilityMsg> {
        self.interacted = true;
        match msg {
            EligibilityMsg::SelectSection(section) => {
                self.section = section;
            }
            EligibilityMsg::SelectMode(mode) => {
                self.mode = mode;
            }
            EligibilityMsg::SelectAction(key) => {
                // Completed actions are display-only.
                if let Some(entry) = action(&key)
                    && entry.category != ActionCategory::Completed
                {
                    tracing::debug!(key = entry.key, "action selected");
                    self.selected = Some(entry);
                    self.wizard = if entry.flow_key == "Immunizations" {
                        Some((WizardStep::ConfirmEligibility, WizardForm::default()))
                    } else {
                        None
                    };
                }
            }
            EligibilityMsg::WizardContinue => {
                if let Some((step, _)) = &mut self.wizard
                    && let Some(next) = step.next()
                {
                    *step = next;
                }
            }
            EligibilityMsg::WizardBack => {
                if let Some((step, _)) = &mut self.wizard {
                    match step.prev() {
                        Some(prev) => *step = prev,
                        // Backing out of the first step leaves the flow.
                        None => self.reset_flow(),
                    }
                }
            }
            EligibilityMsg::Dismiss => self.reset_flow(),
            EligibilityMsg::MemberIdChanged(value) => {
                if let Some(form) = self.form_mut() {
                    form.member_id = value;
                }
            }
            EligibilityMsg::DobMonthChanged(value) => {
                if let Some(form) = self.form_mut() {
                    form.dob_month = value;
                }
            }
            EligibilityMsg::DobDayChanged(value) => {
                if let Some(form) = self.form_mut() {
                    form.dob_day = value;
                }
            }
            EligibilityMsg::DobYearChanged(value) => {
                if let Some(form) = self.form_mut() {
                    form.dob_year = value;
                }
            }
            EligibilityMsg::ProgramSelected(value) => {
                if let Some(form) = self.form_mut() {
                    form.program = value;
                }
            }
            EligibilityMsg::ImmunizationTypeSelected(value) => {
                if let Some(form) = self.form_mut() {
                    form.immunization_type = value;
                }
            }
            EligibilityMsg::DateReceivedChanged(value) => {
                if let Some(form) = self.form_mut() {
                    form.date_received = value;
                }
            }
            EligibilityMsg::LocationSelected(value) => {
                if let Some(form) = self.form_mut() {
                    form.location = value;
                }
            }
            EligibilityMsg::ProviderChanged(value) => {
                if let Some(form) = self.form_mut() {
                    form.provider = value;
                }
            }
            EligibilityMsg::NotesChanged(value) => {
                if let Some(form) = self.form_mut() {
                    form.notes = value;
                }
            }
            EligibilityMsg::DeliverySelected(value) => {
                if let Some(form) = self.form_mut() {
                    form.delivery = value;
                }
            }
        }
        Cmd::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> EligibilityApp {
        let mut app = EligibilityApp::new();
        app.update(EligibilityMsg::SelectSection(EligibilitySection::Actions));
        app
    }

    #[test]
    fn fresh_flow_shows_welcome_then_actions() {
        let mut app = EligibilityApp::new();
        assert_eq!(app.current_step(), "Welcome");
        assert_eq!(app.ux_map().active_key(), Some("Welcome"));

        app.update(EligibilityMsg::SelectMode(EligibilityMode::Rewards));
        assert_eq!(app.current_step(), "Actions");
    }

    #[test]
    fn mode_filters_action_list() {
        let mut app = started();
        assert_eq!(app.visible_actions().len(), 3);
        app.update(EligibilityMsg::SelectMode(EligibilityMode::Visits));
        assert_eq!(app.visible_actions().len(), 2);
    }

    #[test]
    fn immunizations_opens_the_wizard() {
        let mut app = started();
        app.update(EligibilityMsg::SelectAction("immunizations".into()));
        assert_eq!(app.wizard_step(), Some(WizardStep::ConfirmEligibility));
        assert_eq!(app.current_step(), "Immunizations: Confirm Eligibility");
        assert_eq!(app.ux_map().active_key(), Some("Confirm Eligibility"));
    }

    #[test]
    fn other_actions_show_placeholder_without_wizard() {
        let mut app = started();
        app.update(EligibilityMsg::SelectMode(EligibilityMode::Visits));
        app.update(EligibilityMsg::SelectAction("health-assessment".into()));
        assert_eq!(app.wizard_step(), None);
        assert_eq!(app.current_step(), "Annual Physical");
        assert_eq!(app.ux_map().active_key(), Some("Annual Physical"));
    }

    #[test]
    fn completed_and_unknown_actions_are_not_selectable() {
        let mut app = started();
        app.update(EligibilityMsg::SelectAction("flu-shot".into()));
        assert!(app.selected_action().is_none());
        app.update(EligibilityMsg::SelectAction("nope".into()));
        assert!(app.selected_action().is_none());
    }

    #[test]
    fn wizard_walks_forward_and_stops_at_confirmation() {
        let mut app = started();
        app.update(EligibilityMsg::SelectAction("immunizations".into()));
        let labels: Vec<_> = WizardStep::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            [
                "Confirm Eligibility",
                "Immunization Details",
                "Review & Submit",
                "Delivery Method",
                "Confirmation"
            ]
        );
        for expected in &WizardStep::ALL[1..] {
            app.update(EligibilityMsg::WizardContinue);
            assert_eq!(app.wizard_step(), Some(*expected));
        }
        app.update(EligibilityMsg::WizardContinue);
        assert_eq!(app.wizard_step(), Some(WizardStep::Confirmation));
    }

    #[test]
    fn wizard_back_leaves_flow_from_first_step() {
        let mut app = started();
        app.update(EligibilityMsg::SelectAction("immunizations".into()));
        app.update(EligibilityMsg::WizardContinue);
        app.update(EligibilityMsg::WizardBack);
        assert_eq!(app.wizard_step(), Some(WizardStep::ConfirmEligibility));

        app.update(EligibilityMsg::WizardBack);
        assert_eq!(app.wizard_step(), None);
        assert!(app.selected_action().is_none());
        assert_eq!(app.current_step(), "Actions");
    }

    #[test]
    fn dismiss_resets_everything() {
        let mut app = started();
        app.update(EligibilityMsg::SelectAction("immunizations".into()));
        app.update(EligibilityMsg::MemberIdChanged("A123".into()));
        app.update(EligibilityMsg::WizardContinue);
        app.update(EligibilityMsg::Dismiss);
        assert_eq!(app.wizard_step(), None);
        assert_eq!(app.current_step(), "Actions");

        // A fresh selection starts with a fresh form.
        app.update(EligibilityMsg::SelectAction("immunizations".into()));
        assert_eq!(app.wizard_form().unwrap().member_id, "");
    }

    #[test]
    fn form_fields_persist_across_steps() {
        let mut app = started();
        app.update(EligibilityMsg::SelectAction("immunizations".into()));
        app.update(EligibilityMsg::MemberIdChanged("M-0042".into()));
        app.update(EligibilityMsg::WizardContinue);
        app.update(EligibilityMsg::ImmunizationTypeSelected("COVID-19"));
        app.update(EligibilityMsg::DateReceivedChanged("2024-10-15".into()));
        app.update(EligibilityMsg::WizardContinue);
        app.update(EligibilityMsg::WizardBack);

        let form = app.wizard_form().unwrap();
        assert_eq!(form.member_id, "M-0042");
        assert_eq!(form.immunization_type, "COVID-19");
        assert_eq!(form.date_received, "2024-10-15");
    }

    #[test]
    fn wizard_defaults_match_picker_heads() {
        let mut app = started();
        app.update(EligibilityMsg::SelectAction("immunizations".into()));
        let form = app.wizard_form().unwrap();
        assert_eq!(form.program, "OTC Network");
        assert_eq!(form.immunization_type, "Influenza");
        assert_eq!(form.location, "Retail Pharmacy");
        assert_eq!(form.provider, "CVS");
        assert_eq!(form.delivery, DeliveryMethod::Text);
    }

    #[test]
    fn review_step_normalizes_onto_tree() {
        let mut app = started();
        app.update(EligibilityMsg::SelectAction("immunizations".into()));
        app.update(EligibilityMsg::WizardContinue);
        app.update(EligibilityMsg::WizardContinue);
        assert_eq!(app.current_step(), "Immunizations: Review & Submit");
        assert_eq!(app.ux_map().active_key(), Some("Review & Submit"));

        // Steps past the tree's wizard children mark nothing.
        app.update(EligibilityMsg::WizardContinue);
        assert_eq!(app.ux_map().active_key(), None);
    }
}
