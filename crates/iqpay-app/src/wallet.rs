#![forbid(unsafe_code)]

//! The wallet screen controller.
//!
//! One tagged state machine covers the whole prototype: a loading phase
//! with two cosmetic timers, the sign-in gate, and the authenticated
//! wallet. Overlay screens share a single `Option<Modal>`, so two modals
//! at once are unrepresentable; opening one while another is up replaces
//! it.

use std::sync::Arc;
use std::time::Duration;

use iqpay_model::{
    ActionCategory, BenefitProduct, CARD_CATALOG, CardKind, ProductCategory, nav, products_for,
};
use iqpay_runtime::{Clock, Cmd, Model, TimerKey, year_utc};
use iqpay_session::SessionStore;

use crate::auth::{AuthError, validate_sign_in};

/// Loading-screen progress increment interval.
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(25);
/// How long the loading screen shows before advancing.
pub const LOADING_DELAY: Duration = Duration::from_millis(1500);
/// How long a submitted report's success state shows before auto-closing.
pub const REPORT_DISMISS_DELAY: Duration = Duration::from_millis(2000);

const TIMER_LOADING_DONE: TimerKey = "loading.done";
const TIMER_LOADING_PROGRESS: TimerKey = "loading.progress";
const TIMER_REPORT_DISMISS: TimerKey = "report.dismiss";

/// Behavior switches between the shipped variants of the wallet flow.
#[derive(Debug, Clone, Copy)]
pub struct WalletConfig {
    /// Require sign-in after loading (false drops straight into the wallet).
    pub auth_gate: bool,
    /// Whether the report-missing-product form requires an attached photo.
    pub report_requires_photo: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            auth_gate: true,
            report_requires_photo: true,
        }
    }
}

/// Bottom-navigation destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopView {
    Cards,
    Offers,
    Program,
    Help,
    Scanner,
}

impl TopView {
    pub const ALL: [TopView; 5] = [
        TopView::Cards,
        TopView::Offers,
        TopView::Program,
        TopView::Help,
        TopView::Scanner,
    ];

    /// Step label when this view is frontmost (cards list case).
    #[must_use]
    pub fn step_label(self) -> &'static str {
        match self {
            TopView::Cards => "My Cards",
            TopView::Offers => "My Actions",
            TopView::Program => "My Program",
            TopView::Help => "Help",
            TopView::Scanner => "Scanner",
        }
    }
}

/// Cards tab sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardView {
    List,
    /// Index into [`CARD_CATALOG`].
    Detail(usize),
}

/// The report-missing-product form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportForm {
    pub store: Option<&'static str>,
    pub report_type: Option<&'static str>,
    /// Attached photo reference (file name in the prototype).
    pub photo: Option<String>,
    /// Set when a submit was rejected; cleared on the next field edit.
    pub blocked: bool,
    /// Set once a submit succeeds; the form then auto-dismisses.
    pub submitted: bool,
}

impl ReportForm {
    /// Message shown while `blocked` is set.
    pub const BLOCKED_MESSAGE: &'static str = "Please fill in all fields before submitting";

    fn complete(&self, require_photo: bool) -> bool {
        self.store.is_some()
            && self.report_type.is_some()
            && (!require_photo || self.photo.is_some())
    }
}

/// The single overlay slot. At most one of these is ever open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    StorePicker,
    Instructions,
    Scanner,
    ReportIssue(ReportForm),
    /// Key of the action being viewed.
    ActionDetail(&'static str),
}

/// Sign-in form state.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub contact: String,
    pub dob_month: String,
    pub dob_day: String,
    pub dob_year: String,
    pub remember: bool,
    pub error: Option<AuthError>,
}

/// Authenticated wallet state.
#[derive(Debug, Clone)]
pub struct WalletState {
    pub top_view: TopView,
    pub card_view: CardView,
    pub modal: Option<Modal>,
    pub selected_store: Option<&'static str>,
    pub product_filter: ProductCategory,
    pub action_filter: ActionCategory,
}

impl Default for WalletState {
    fn default() -> Self {
        Self {
            top_view: TopView::Cards,
            card_view: CardView::List,
            modal: None,
            selected_store: None,
            product_filter: ProductCategory::Active,
            action_filter: ActionCategory::Rewards,
        }
    }
}

/// Top-level phase of the controller.
#[derive(Debug, Clone)]
pub enum Phase {
    Loading { progress: u8 },
    Unauthenticated(AuthForm),
    Authenticated(WalletState),
}

/// Everything the controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletMsg {
    ProgressTick,
    LoadingDone,
    ContactChanged(String),
    DobMonthChanged(String),
    DobDayChanged(String),
    DobYearChanged(String),
    RememberToggled(bool),
    Authenticate,
    SelectTopView(TopView),
    SelectCard(usize),
    BackToCardList,
    SetProductFilter(ProductCategory),
    SetActionFilter(ActionCategory),
    OpenStorePicker,
    SelectStore(&'static str),
    OpenInstructions,
    OpenScanner,
    OpenReportIssue,
    ReportStoreSelected(&'static str),
    ReportTypeSelected(&'static str),
    ReportPhotoAttached(String),
    ReportPhotoCleared,
    SubmitReport,
    ReportDismissed,
    OpenActionDetail(&'static str),
    CloseModal,
    SignOut,
}

/// The wallet prototype's screen controller.
pub struct WalletApp {
    config: WalletConfig,
    session: SessionStore,
    clock: Arc<dyn Clock>,
    phase: Phase,
    /// Result of the one startup session check.
    restored: bool,
}

impl WalletApp {
    /// Build the controller and perform the single startup session check.
    #[must_use]
    pub fn new(config: WalletConfig, session: SessionStore, clock: Arc<dyn Clock>) -> Self {
        let restored = session.check(clock.now());
        tracing::debug!(restored, backend = session.backend_name(), "wallet starting");
        Self {
            config,
            session,
            clock,
            phase: Phase::Loading { progress: 0 },
            restored,
        }
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Whether the startup check found a live remembered session.
    #[must_use]
    pub fn session_restored(&self) -> bool {
        self.restored
    }

    /// Auth form, while the sign-in gate is showing.
    #[must_use]
    pub fn auth_form(&self) -> Option<&AuthForm> {
        match &self.phase {
            Phase::Unauthenticated(form) => Some(form),
            _ => None,
        }
    }

    /// Wallet state, once authenticated.
    #[must_use]
    pub fn wallet(&self) -> Option<&WalletState> {
        match &self.phase {
            Phase::Authenticated(state) => Some(state),
            _ => None,
        }
    }

    /// Products visible on the open card detail screen.
    #[must_use]
    pub fn visible_products(&self) -> &'static [BenefitProduct] {
        let Phase::Authenticated(state) = &self.phase else {
            return &[];
        };
        let CardView::Detail(index) = state.card_view else {
            return &[];
        };
        match CardKind::from_index(index) {
            Some(kind) => products_for(kind, state.product_filter),
            None => &[],
        }
    }

    /// Step label the UX map is keyed by.
    ///
    /// Overlays win over the underlying view; the store picker is the one
    /// overlay that does not change the step.
    #[must_use]
    pub fn current_step(&self) -> String {
        match &self.phase {
            Phase::Loading { .. } => "Loading".to_owned(),
            Phase::Unauthenticated(_) => "Auth".to_owned(),
            Phase::Authenticated(state) => {
                match &state.modal {
                    Some(Modal::Scanner) => return "Scanner".to_owned(),
                    Some(Modal::ReportIssue(_)) => return "Report Missing Product".to_owned(),
                    Some(Modal::Instructions) => return "Checkout Instructions".to_owned(),
                    Some(Modal::ActionDetail(key)) => return format!("Action Detail: {key}"),
                    Some(Modal::StorePicker) | None => {}
                }
                match (state.top_view, state.card_view) {
                    (TopView::Cards, CardView::Detail(index)) => CardKind::from_index(index)
                        .map(CardKind::step_label)
                        .unwrap_or("My Cards")
                        .to_owned(),
                    (view, _) => view.step_label().to_owned(),
                }
            }
        }
    }

    /// UX map snapshot for the current step.
    #[must_use]
    pub fn ux_map(&self) -> nav::UxMap {
        nav::wallet_map(&self.current_step())
    }

    fn enter_wallet(&mut self) {
        tracing::debug!("entering wallet");
        self.phase = Phase::Authenticated(WalletState::default());
    }

    fn authenticate(&mut self) -> Cmd<WalletMsg> {
        let Phase::Unauthenticated(form) = &mut self.phase else {
            return Cmd::None;
        };
        let now = self.clock.now();
        let result = validate_sign_in(
            &form.contact,
            &form.dob_month,
            &form.dob_day,
            &form.dob_year,
            year_utc(now),
        );
        match result {
            Err(e) => {
                tracing::debug!(error = %e, "sign-in rejected");
                form.error = Some(e);
                Cmd::None
            }
            Ok(()) => {
                form.error = None;
                if form.remember {
                    if let Err(e) = self.session.remember(now) {
                        tracing::warn!(error = %e, "failed to persist session, continuing");
                    }
                }
                self.enter_wallet();
                Cmd::None
            }
        }
    }

    /// Close whatever modal is open, cancelling a pending auto-dismiss.
    fn close_modal(state: &mut WalletState) -> Cmd<WalletMsg> {
        match state.modal.take() {
            Some(Modal::ReportIssue(form)) if form.submitted => {
                Cmd::cancel(TIMER_REPORT_DISMISS)
            }
            _ => Cmd::None,
        }
    }

    fn can_open_report(&self) -> bool {
        matches!(
            self.wallet(),
            Some(WalletState {
                top_view: TopView::Scanner,
                ..
            }) | Some(WalletState {
                modal: Some(Modal::Scanner),
                ..
            })
        )
    }
}

impl Model for WalletApp {
    type Message = WalletMsg;

    fn init(&mut self) -> Cmd<WalletMsg> {
        Cmd::batch(vec![
            Cmd::schedule(TIMER_LOADING_DONE, LOADING_DELAY, WalletMsg::LoadingDone),
            Cmd::schedule(
                TIMER_LOADING_PROGRESS,
                PROGRESS_INTERVAL,
                WalletMsg::ProgressTick,
            ),
        ])
    }

    fn update(&mut self, msg: WalletMsg) -> Cmd<WalletMsg> {
        match msg {
            WalletMsg::ProgressTick => {
                let Phase::Loading { progress } = &mut self.phase else {
                    return Cmd::None;
                };
                *progress = (*progress + 2).min(100);
                if *progress < 100 {
                    Cmd::schedule(
                        TIMER_LOADING_PROGRESS,
                        PROGRESS_INTERVAL,
                        WalletMsg::ProgressTick,
                    )
                } else {
                    Cmd::None
                }
            }
            WalletMsg::LoadingDone => {
                if !matches!(self.phase, Phase::Loading { .. }) {
                    return Cmd::None;
                }
                if self.restored || !self.config.auth_gate {
                    self.enter_wallet();
                } else {
                    tracing::debug!("showing sign-in gate");
                    self.phase = Phase::Unauthenticated(AuthForm::default());
                }
                Cmd::cancel(TIMER_LOADING_PROGRESS)
            }

            WalletMsg::ContactChanged(value) => {
                if let Phase::Unauthenticated(form) = &mut self.phase {
                    form.contact = value;
                }
                Cmd::None
            }
            WalletMsg::DobMonthChanged(value) => {
                if let Phase::Unauthenticated(form) = &mut self.phase {
                    form.dob_month = value;
                }
                Cmd::None
            }
            WalletMsg::DobDayChanged(value) => {
                if let Phase::Unauthenticated(form) = &mut self.phase {
                    form.dob_day = value;
                }
                Cmd::None
            }
            WalletMsg::DobYearChanged(value) => {
                if let Phase::Unauthenticated(form) = &mut self.phase {
                    form.dob_year = value;
                }
                Cmd::None
            }
            WalletMsg::RememberToggled(value) => {
                if let Phase::Unauthenticated(form) = &mut self.phase {
                    form.remember = value;
                }
                Cmd::None
            }
            WalletMsg::Authenticate => self.authenticate(),

            WalletMsg::SelectTopView(view) => {
                let Phase::Authenticated(state) = &mut self.phase else {
                    return Cmd::None;
                };
                let cmd = Self::close_modal(state);
                state.top_view = view;
                state.card_view = CardView::List;
                cmd
            }
            WalletMsg::SelectCard(index) => {
                if let Phase::Authenticated(state) = &mut self.phase
                    && state.top_view == TopView::Cards
                    && state.card_view == CardView::List
                    && state.modal.is_none()
                    && index < CARD_CATALOG.len()
                {
                    state.card_view = CardView::Detail(index);
                }
                Cmd::None
            }
            WalletMsg::BackToCardList => {
                if let Phase::Authenticated(state) = &mut self.phase
                    && state.top_view == TopView::Cards
                {
                    state.card_view = CardView::List;
                }
                Cmd::None
            }
            WalletMsg::SetProductFilter(filter) => {
                if let Phase::Authenticated(state) = &mut self.phase {
                    state.product_filter = filter;
                }
                Cmd::None
            }
            WalletMsg::SetActionFilter(filter) => {
                if let Phase::Authenticated(state) = &mut self.phase {
                    state.action_filter = filter;
                }
                Cmd::None
            }

            WalletMsg::OpenStorePicker => {
                if let Phase::Authenticated(state) = &mut self.phase
                    && state.modal.is_none()
                    && matches!(
                        state.card_view,
                        CardView::Detail(index)
                            if CardKind::from_index(index)
                                .is_some_and(CardKind::has_store_picker)
                    )
                {
                    state.modal = Some(Modal::StorePicker);
                }
                Cmd::None
            }
            WalletMsg::SelectStore(name) => {
                if let Phase::Authenticated(state) = &mut self.phase
                    && state.modal == Some(Modal::StorePicker)
                {
                    state.selected_store = Some(name);
                    state.modal = None;
                }
                Cmd::None
            }
            WalletMsg::OpenInstructions => {
                if let Phase::Authenticated(state) = &mut self.phase
                    && state.modal.is_none()
                    && matches!(state.card_view, CardView::Detail(_))
                {
                    state.modal = Some(Modal::Instructions);
                }
                Cmd::None
            }
            WalletMsg::OpenScanner => {
                // Replaces the instructions modal when opened from there.
                if let Phase::Authenticated(state) = &mut self.phase {
                    let cmd = Self::close_modal(state);
                    state.modal = Some(Modal::Scanner);
                    return cmd;
                }
                Cmd::None
            }
            WalletMsg::OpenReportIssue => {
                if self.can_open_report()
                    && let Phase::Authenticated(state) = &mut self.phase
                {
                    state.modal = Some(Modal::ReportIssue(ReportForm::default()));
                }
                Cmd::None
            }
            WalletMsg::ReportStoreSelected(name) => {
                if let Some(form) = self.report_form_mut() {
                    form.store = Some(name);
                    form.blocked = false;
                }
                Cmd::None
            }
            WalletMsg::ReportTypeSelected(kind) => {
                if let Some(form) = self.report_form_mut() {
                    form.report_type = Some(kind);
                    form.blocked = false;
                }
                Cmd::None
            }
            WalletMsg::ReportPhotoAttached(name) => {
                if let Some(form) = self.report_form_mut() {
                    form.photo = Some(name);
                    form.blocked = false;
                }
                Cmd::None
            }
            WalletMsg::ReportPhotoCleared => {
                if let Some(form) = self.report_form_mut() {
                    form.photo = None;
                }
                Cmd::None
            }
            WalletMsg::SubmitReport => {
                let require_photo = self.config.report_requires_photo;
                let Some(form) = self.report_form_mut() else {
                    return Cmd::None;
                };
                if !form.complete(require_photo) {
                    tracing::debug!("report submit blocked, fields missing");
                    form.blocked = true;
                    return Cmd::None;
                }
                form.blocked = false;
                form.submitted = true;
                Cmd::schedule(
                    TIMER_REPORT_DISMISS,
                    REPORT_DISMISS_DELAY,
                    WalletMsg::ReportDismissed,
                )
            }
            WalletMsg::ReportDismissed => {
                if let Phase::Authenticated(state) = &mut self.phase
                    && matches!(&state.modal, Some(Modal::ReportIssue(form)) if form.submitted)
                {
                    state.modal = None;
                }
                Cmd::None
            }

            WalletMsg::OpenActionDetail(key) => {
                if let Phase::Authenticated(state) = &mut self.phase
                    && state.top_view == TopView::Offers
                    && state.modal.is_none()
                    && iqpay_model::action(key).is_some()
                {
                    state.modal = Some(Modal::ActionDetail(key));
                }
                Cmd::None
            }
            WalletMsg::CloseModal => {
                if let Phase::Authenticated(state) = &mut self.phase {
                    return Self::close_modal(state);
                }
                Cmd::None
            }
            WalletMsg::SignOut => {
                if matches!(self.phase, Phase::Authenticated(_)) {
                    if let Err(e) = self.session.clear() {
                        tracing::warn!(error = %e, "failed to clear session on sign-out");
                    }
                    self.restored = false;
                    self.phase = Phase::Unauthenticated(AuthForm::default());
                    return Cmd::cancel(TIMER_REPORT_DISMISS);
                }
                Cmd::None
            }
        }
    }
}

impl WalletApp {
    fn report_form_mut(&mut self) -> Option<&mut ReportForm> {
        match &mut self.phase {
            Phase::Authenticated(WalletState {
                modal: Some(Modal::ReportIssue(form)),
                ..
            }) if !form.submitted => Some(form),
            _ => None,
        }
    }
}
