//! Pledge entity type
//!
//! A pledge is a client's recorded financial commitment toward a property
//! purchase with partial-payment tracking. Amounts are numeric `Money`
//! values; the outstanding balance is derived, never stored.

use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::identity::{EntityKind, RecordId};
use crate::core::money::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pledge {
    /// Unique identifier
    pub id: RecordId,

    /// Client name, informal reference
    pub client: String,

    /// Property the pledge is against, informal reference
    pub property: String,

    /// Total committed amount
    pub amount: Money,

    /// Amount paid so far
    pub paid: Money,
}

impl Pledge {
    /// Outstanding balance: committed minus paid
    pub fn pending(&self) -> Money {
        self.amount.minus(self.paid)
    }
}

#[derive(Debug, Clone)]
pub struct PledgeDraft {
    pub client: String,
    pub property: String,
    pub amount: Money,
    pub paid: Money,
}

#[derive(Debug, Clone, Default)]
pub struct PledgePatch {
    pub client: Option<String>,
    pub property: Option<String>,
    pub amount: Option<Money>,
    pub paid: Option<Money>,
}

impl Record for Pledge {
    const KIND: EntityKind = EntityKind::Pledge;

    type Draft = PledgeDraft;
    type Patch = PledgePatch;

    fn create(id: RecordId, draft: PledgeDraft) -> Self {
        Self {
            id,
            client: draft.client,
            property: draft.property,
            amount: draft.amount,
            paid: draft.paid,
        }
    }

    fn apply(&mut self, patch: PledgePatch) {
        if let Some(client) = patch.client {
            self.client = client;
        }
        if let Some(property) = patch.property {
            self.property = property;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(paid) = patch.paid {
            self.paid = paid;
        }
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_derived() {
        let mut pledge = Pledge::create(
            RecordId::new(EntityKind::Pledge, 1),
            PledgeDraft {
                client: "Hassan Al Maktoum".to_string(),
                property: "Creek Rise T2".to_string(),
                amount: Money::aed(2_500_000),
                paid: Money::aed(600_000),
            },
        );
        assert_eq!(pledge.pending(), Money::aed(1_900_000));

        pledge.apply(PledgePatch {
            paid: Some(Money::aed(1_100_000)),
            ..Default::default()
        });
        assert_eq!(pledge.pending(), Money::aed(1_400_000));
    }
}
