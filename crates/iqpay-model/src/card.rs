#![forbid(unsafe_code)]

//! Seeded benefit cards.
//!
//! The catalog is a const registry; callers match on [`CardKind`] for any
//! per-card behavior instead of comparing positional ids.

/// Which benefit program a card belongs to.
///
/// Every card-specific branch in the controllers is an exhaustive match on
/// this enum, so adding a card is a compile-guided change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    /// Over-the-counter benefit card with a store picker and checkout
    /// instructions flow.
    Otc,
    /// Rideshare credit card.
    Rideshare,
    /// Installment card covering rent and utility assistance.
    Installment,
    /// Retail shopping card scanned at checkout.
    Retail,
}

impl CardKind {
    /// All kinds in catalog display order.
    pub const ALL: [CardKind; 4] = [
        CardKind::Otc,
        CardKind::Rideshare,
        CardKind::Installment,
        CardKind::Retail,
    ];

    /// Position in [`CARD_CATALOG`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            CardKind::Otc => 0,
            CardKind::Rideshare => 1,
            CardKind::Installment => 2,
            CardKind::Retail => 3,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<CardKind> {
        Self::ALL.get(index).copied()
    }

    /// Step label reported to the UX map when this card's detail view is
    /// showing. Matches the per-card keys in the wallet navigation tree.
    #[must_use]
    pub fn step_label(self) -> &'static str {
        match self {
            CardKind::Otc => "OTC Card",
            CardKind::Rideshare => "Uber Card",
            CardKind::Installment => "Discover Card",
            CardKind::Retail => "Walmart Card",
        }
    }

    /// Whether the card detail view offers the store picker.
    #[must_use]
    pub fn has_store_picker(self) -> bool {
        matches!(self, CardKind::Otc)
    }
}

/// One entry in the seeded card catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub kind: CardKind,
    pub holder_name: &'static str,
    /// Full PAN as displayed on the card face (spaced groups).
    pub card_number_display: &'static str,
    pub program_name: &'static str,
    /// Brand accent token the presentation layer maps to a gradient.
    pub brand_accent: &'static str,
    /// Asset reference for a brand logo, when the card carries one.
    pub logo_ref: Option<&'static str>,
}

/// The four seeded cards, in display order.
pub const CARD_CATALOG: [Card; 4] = [
    Card {
        kind: CardKind::Otc,
        holder_name: "Abby Selbeck",
        card_number_display: "6103 8040 0273 7944 587",
        program_name: "Diaper Reward",
        logo_ref: None,
        brand_accent: "teal",
    },
    Card {
        kind: CardKind::Rideshare,
        holder_name: "Abby Selbeck",
        card_number_display: "5421 9876 5432 1098 234",
        program_name: "Transportation Assistance",
        logo_ref: Some("uber"),
        brand_accent: "black",
    },
    Card {
        kind: CardKind::Installment,
        holder_name: "Abby Selbeck",
        card_number_display: "4532 1122 3344 5566 778",
        program_name: "Rent Support",
        logo_ref: Some("discover"),
        brand_accent: "orange",
    },
    Card {
        kind: CardKind::Retail,
        holder_name: "Abby Selbeck",
        card_number_display: "6011 2233 4455 6677 889",
        program_name: "Grocery Card",
        logo_ref: Some("walmart"),
        brand_accent: "blue",
    },
];

/// Look up a card by kind. Total: every kind has a catalog entry.
#[must_use]
pub fn card(kind: CardKind) -> &'static Card {
    &CARD_CATALOG[kind.index()]
}

/// Look up a card by catalog position.
#[must_use]
pub fn card_at(index: usize) -> Option<&'static Card> {
    CARD_CATALOG.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_matches_kind_index() {
        for (i, entry) in CARD_CATALOG.iter().enumerate() {
            assert_eq!(entry.kind.index(), i);
            assert_eq!(CardKind::from_index(i), Some(entry.kind));
        }
        assert_eq!(CardKind::from_index(CARD_CATALOG.len()), None);
    }

    #[test]
    fn kind_lookup_round_trips() {
        for kind in CardKind::ALL {
            assert_eq!(card(kind).kind, kind);
        }
    }

    #[test]
    fn step_labels_are_distinct() {
        let labels: Vec<_> = CardKind::ALL.iter().map(|k| k.step_label()).collect();
        for (i, a) in labels.iter().enumerate() {
            for b in &labels[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn only_otc_offers_store_picker() {
        for kind in CardKind::ALL {
            assert_eq!(kind.has_store_picker(), kind == CardKind::Otc);
        }
    }
}
