#![forbid(unsafe_code)]

//! Seeded benefit products, bucketed per card and category.
//!
//! `products_for` is the only lookup surface; it returns a static slice so
//! filtering can never observe or cause mutation. Balances are dollar
//! amounts; every seeded value is a multiple of 0.25 so sums are exact.

use crate::card::CardKind;

/// Lifecycle bucket a benefit product sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    Active,
    Expired,
    Future,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 3] = [
        ProductCategory::Active,
        ProductCategory::Expired,
        ProductCategory::Future,
    ];

    /// Filter-tab label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProductCategory::Active => "Active",
            ProductCategory::Expired => "Expired",
            ProductCategory::Future => "Future",
        }
    }
}

/// One benefit product as shown on a card detail screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenefitProduct {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    /// Remaining dollar balance. Zero for expired products.
    pub balance: f64,
    /// Expiry or start date exactly as displayed.
    pub date_label: &'static str,
    pub category: ProductCategory,
}

const OTC_ACTIVE: &[BenefitProduct] = &[
    BenefitProduct {
        id: 101,
        title: "$50 Nutrition Essentials",
        description: "Fresh produce, dairy, and whole grains",
        balance: 50.0,
        date_label: "Expires: Dec 31, 2025",
        category: ProductCategory::Active,
    },
    BenefitProduct {
        id: 102,
        title: "$100 Grocery Support",
        description: "Eligible food items at participating stores",
        balance: 100.0,
        date_label: "Expires: Mar 15, 2026",
        category: ProductCategory::Active,
    },
];

const OTC_EXPIRED: &[BenefitProduct] = &[BenefitProduct {
    id: 103,
    title: "$25 Health & Wellness",
    description: "Vitamins and first-aid supplies",
    balance: 0.0,
    date_label: "Expired: Sep 30, 2024",
    category: ProductCategory::Expired,
}];

const OTC_FUTURE: &[BenefitProduct] = &[BenefitProduct {
    id: 104,
    title: "$75 Holiday Bonus",
    description: "Seasonal grocery allowance",
    balance: 75.0,
    date_label: "Starts: Nov 1, 2025",
    category: ProductCategory::Future,
}];

const RIDESHARE_ACTIVE: &[BenefitProduct] = &[BenefitProduct {
    id: 201,
    title: "$150 Uber Rides",
    description: "Trips to medical appointments",
    balance: 150.0,
    date_label: "Expires: Dec 31, 2025",
    category: ProductCategory::Active,
}];

const RIDESHARE_EXPIRED: &[BenefitProduct] = &[BenefitProduct {
    id: 202,
    title: "$100 Uber Rides",
    description: "Trips to medical appointments",
    balance: 0.0,
    date_label: "Expired: Jun 30, 2024",
    category: ProductCategory::Expired,
}];

const RIDESHARE_FUTURE: &[BenefitProduct] = &[BenefitProduct {
    id: 203,
    title: "$200 Uber Rides",
    description: "Trips to medical appointments",
    balance: 200.0,
    date_label: "Starts: Jan 1, 2026",
    category: ProductCategory::Future,
}];

const INSTALLMENT_ACTIVE: &[BenefitProduct] = &[
    BenefitProduct {
        id: 301,
        title: "$1,500 Rent Assistance",
        description: "Monthly housing support",
        balance: 1500.0,
        date_label: "Expires: Dec 31, 2025",
        category: ProductCategory::Active,
    },
    BenefitProduct {
        id: 302,
        title: "$500 Utilities Support",
        description: "Electric, gas, and water bills",
        balance: 500.0,
        date_label: "Expires: Dec 31, 2025",
        category: ProductCategory::Active,
    },
];

const INSTALLMENT_FUTURE: &[BenefitProduct] = &[BenefitProduct {
    id: 303,
    title: "$1,800 Rent Assistance",
    description: "Monthly housing support",
    balance: 1800.0,
    date_label: "Starts: Jan 1, 2026",
    category: ProductCategory::Future,
}];

const RETAIL_ACTIVE: &[BenefitProduct] = &[BenefitProduct {
    id: 401,
    title: "$200 Walmart Shopping",
    description: "General merchandise and groceries",
    balance: 200.0,
    date_label: "Expires: Dec 31, 2025",
    category: ProductCategory::Active,
}];

const EMPTY: &[BenefitProduct] = &[];

/// Products for one card in one lifecycle bucket. Pure lookup into the
/// seeded catalog; empty buckets return an empty slice.
#[must_use]
pub fn products_for(kind: CardKind, category: ProductCategory) -> &'static [BenefitProduct] {
    match (kind, category) {
        (CardKind::Otc, ProductCategory::Active) => OTC_ACTIVE,
        (CardKind::Otc, ProductCategory::Expired) => OTC_EXPIRED,
        (CardKind::Otc, ProductCategory::Future) => OTC_FUTURE,
        (CardKind::Rideshare, ProductCategory::Active) => RIDESHARE_ACTIVE,
        (CardKind::Rideshare, ProductCategory::Expired) => RIDESHARE_EXPIRED,
        (CardKind::Rideshare, ProductCategory::Future) => RIDESHARE_FUTURE,
        (CardKind::Installment, ProductCategory::Active) => INSTALLMENT_ACTIVE,
        (CardKind::Installment, ProductCategory::Expired) => EMPTY,
        (CardKind::Installment, ProductCategory::Future) => INSTALLMENT_FUTURE,
        (CardKind::Retail, ProductCategory::Active) => RETAIL_ACTIVE,
        (CardKind::Retail, ProductCategory::Expired) => EMPTY,
        (CardKind::Retail, ProductCategory::Future) => EMPTY,
    }
}

/// Total balance across a product slice.
#[must_use]
pub fn sum_balances(products: &[BenefitProduct]) -> f64 {
    products.iter().map(|p| p.balance).sum()
}
