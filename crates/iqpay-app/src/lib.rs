#![forbid(unsafe_code)]

//! Screen controllers for the iQpay wallet prototype.
//!
//! Two controllers implement [`iqpay_runtime::Model`]:
//!
//! - [`WalletApp`] — loading screen, sign-in gate, card wallet with a
//!   single-modal overlay layer and the report-missing-product form.
//! - [`EligibilityApp`] — the eligibility action browser and its 5-step
//!   immunization wizard.
//!
//! Both expose `current_step()` so a host can render the matching UX map
//! from `iqpay-model`.

pub mod auth;
pub mod eligibility;
pub mod wallet;

pub use auth::{AuthError, validate_sign_in};
pub use eligibility::{
    DeliveryMethod, EligibilityApp, EligibilityMode, EligibilityMsg, EligibilitySection,
    WizardForm, WizardStep,
};
pub use wallet::{
    AuthForm, CardView, Modal, Phase, ReportForm, TopView, WalletApp, WalletConfig, WalletMsg,
    WalletState,
};
