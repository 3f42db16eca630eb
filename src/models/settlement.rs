//! Settlement model
//!
//! A settlement is a single directed payment that moves a debtor toward zero.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::member::MemberId;
use super::money::Money;

/// A payment instruction from a debtor to a creditor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

impl Settlement {
    pub fn new(from: MemberId, to: MemberId, amount: Money) -> Self {
        Self { from, to, amount }
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}: {}", self.from, self.to, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let s = Settlement::new(MemberId::Feroza, MemberId::Imthiaz, Money::from_minor(10000));
        assert_eq!(s.to_string(), "Feroza → Imthiaz: 100.00");
    }
}
