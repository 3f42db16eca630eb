//! Family members
//!
//! The roster is closed: four members known at compile time, listed in
//! canonical order by [`MemberId::ALL`]. Every ordering decision in the crate
//! (balance output, settlement tie-breaks, report rows) follows that order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Identifier of a family member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemberId {
    #[serde(rename = "Im")]
    Imthiaz,
    #[serde(rename = "Fe")]
    Feroza,
    #[serde(rename = "Fo")]
    Fouzya,
    #[serde(rename = "Ay")]
    Ayesha,
}

impl MemberId {
    /// The canonical, ordered member registry
    pub const ALL: [MemberId; 4] = [
        MemberId::Imthiaz,
        MemberId::Feroza,
        MemberId::Fouzya,
        MemberId::Ayesha,
    ];

    /// Short identifier as stored in the expense log
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Imthiaz => "Im",
            Self::Feroza => "Fe",
            Self::Fouzya => "Fo",
            Self::Ayesha => "Ay",
        }
    }

    /// Display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Imthiaz => "Imthiaz",
            Self::Feroza => "Feroza",
            Self::Fouzya => "Fouzya",
            Self::Ayesha => "Ayesha",
        }
    }

    /// Position in the canonical registry
    pub const fn index(&self) -> usize {
        match self {
            Self::Imthiaz => 0,
            Self::Feroza => 1,
            Self::Fouzya => 2,
            Self::Ayesha => 3,
        }
    }

    /// Parse a comma-separated member list ("Im,Fe" or "Imthiaz, Feroza")
    pub fn parse_list(s: &str) -> Result<Vec<MemberId>, UnknownMember> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MemberId {
    type Err = UnknownMember;

    /// Accepts the two-letter code or the display name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.code().eq_ignore_ascii_case(needle) || m.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownMember(needle.to_string()))
    }
}

/// A member reference that is not in the roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMember(pub String);

impl fmt::Display for UnknownMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<_> = MemberId::ALL.iter().map(|m| m.code()).collect();
        write!(f, "Unknown member '{}' (expected one of {})", self.0, known.join(", "))
    }
}

impl std::error::Error for UnknownMember {}

/// A member together with their derived position
///
/// `balance > 0` means the member is owed money, `balance < 0` means they owe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub total_contributed: Money,
    pub balance: Money,
}

impl Member {
    /// A member with nothing contributed and a zero balance
    pub fn new(id: MemberId) -> Self {
        Self {
            id,
            name: id.name().to_string(),
            total_contributed: Money::zero(),
            balance: Money::zero(),
        }
    }

    /// Position label used on screen and in reports
    pub fn status(&self) -> MemberStatus {
        if self.balance.is_positive() {
            MemberStatus::IsOwed
        } else if self.balance.is_negative() {
            MemberStatus::Owes
        } else {
            MemberStatus::Settled
        }
    }
}

/// Whether a member is owed money, owes money, or is square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    IsOwed,
    Owes,
    Settled,
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IsOwed => write!(f, "Is Owed"),
            Self::Owes => write!(f, "Owes"),
            Self::Settled => write!(f, "Settled"),
        }
    }
}
