#![forbid(unsafe_code)]

//! Static domain model for the iQpay wallet prototype.
//!
//! Everything in this crate is data: seeded card/product/action catalogs,
//! picker option lists, and the navigation trees that drive the UX map.
//! All lookups and filters are pure; nothing here mutates, performs I/O,
//! or knows about the screen controllers that consume it.

pub mod action;
pub mod card;
pub mod nav;
pub mod picker;
pub mod product;

pub use action::{ACTION_CATALOG, ActionCategory, EligibilityAction, action, actions_for};
pub use card::{CARD_CATALOG, Card, CardKind, card, card_at};
pub use nav::{NavNode, UxMap, UxRow, eligibility_map, eligibility_tree, wallet_map, wallet_tree};
pub use product::{BenefitProduct, ProductCategory, products_for, sum_balances};
