//! The 12 standard leads and lead selections.

use crate::error::{EkgError, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the 12 standard ECG leads.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LeadId {
    /// Lead I (RA to LA).
    I,
    /// Lead II (RA to LL).
    II,
    /// Lead III (LA to LL).
    III,
    /// Augmented right arm.
    #[cfg_attr(feature = "serde", serde(rename = "aVR"))]
    AVR,
    /// Augmented left arm.
    #[cfg_attr(feature = "serde", serde(rename = "aVL"))]
    AVL,
    /// Augmented foot.
    #[cfg_attr(feature = "serde", serde(rename = "aVF"))]
    AVF,
    /// Precordial V1.
    V1,
    /// Precordial V2.
    V2,
    /// Precordial V3.
    V3,
    /// Precordial V4.
    V4,
    /// Precordial V5.
    V5,
    /// Precordial V6.
    V6,
}

impl LeadId {
    /// All 12 leads in conventional order.
    pub const ALL: [LeadId; 12] = [
        LeadId::I,
        LeadId::II,
        LeadId::III,
        LeadId::AVR,
        LeadId::AVL,
        LeadId::AVF,
        LeadId::V1,
        LeadId::V2,
        LeadId::V3,
        LeadId::V4,
        LeadId::V5,
        LeadId::V6,
    ];

    /// Returns the conventional lead label.
    pub fn name(self) -> &'static str {
        match self {
            LeadId::I => "I",
            LeadId::II => "II",
            LeadId::III => "III",
            LeadId::AVR => "aVR",
            LeadId::AVL => "aVL",
            LeadId::AVF => "aVF",
            LeadId::V1 => "V1",
            LeadId::V2 => "V2",
            LeadId::V3 => "V3",
            LeadId::V4 => "V4",
            LeadId::V5 => "V5",
            LeadId::V6 => "V6",
        }
    }

    /// Returns true for the six precordial leads.
    pub fn is_precordial(self) -> bool {
        matches!(
            self,
            LeadId::V1 | LeadId::V2 | LeadId::V3 | LeadId::V4 | LeadId::V5 | LeadId::V6
        )
    }

    /// Returns true if this lead is a member of `group`.
    #[inline]
    pub fn is_in(self, group: &[LeadId]) -> bool {
        group.contains(&self)
    }
}

/// Returns true if `lead` is known and a member of `group`.
///
/// Unrecognized leads belong to no group.
#[inline]
pub fn lead_in(lead: Option<LeadId>, group: &[LeadId]) -> bool {
    lead.map_or(false, |l| l.is_in(group))
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LeadId {
    type Err = EkgError;

    fn from_str(s: &str) -> Result<Self> {
        LeadId::ALL
            .iter()
            .copied()
            .find(|lead| lead.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| EkgError::UnknownLead(s.to_string()))
    }
}

/// Lead groups used by the territorial and conduction morphologies.
pub mod groups {
    use super::LeadId;

    /// Inferior leads.
    pub const INFERIOR: &[LeadId] = &[LeadId::II, LeadId::III, LeadId::AVF];
    /// Lateral leads (high and low).
    pub const LATERAL: &[LeadId] = &[LeadId::I, LeadId::AVL, LeadId::V5, LeadId::V6];
    /// High lateral leads.
    pub const HIGH_LATERAL: &[LeadId] = &[LeadId::I, LeadId::AVL];
    /// Anterior leads.
    pub const ANTERIOR: &[LeadId] = &[LeadId::V1, LeadId::V2, LeadId::V3, LeadId::V4];
    /// Anteroseptal leads.
    pub const ANTEROSEPTAL: &[LeadId] = &[LeadId::V1, LeadId::V2, LeadId::V3];
    /// Right precordial leads.
    pub const RIGHT_PRECORDIAL: &[LeadId] = &[LeadId::V1, LeadId::V2];
}

/// The target of a parameter edit: every lead, or one specific lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LeadSelection {
    /// Edit the global value.
    #[default]
    All,
    /// Edit one lead's override entry.
    Lead(LeadId),
}

impl From<LeadId> for LeadSelection {
    fn from(lead: LeadId) -> Self {
        LeadSelection::Lead(lead)
    }
}

impl fmt::Display for LeadSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadSelection::All => f.write_str("All"),
            LeadSelection::Lead(lead) => write!(f, "{lead}"),
        }
    }
}

impl FromStr for LeadSelection {
    type Err = EkgError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("all") {
            Ok(LeadSelection::All)
        } else {
            s.parse().map(LeadSelection::Lead)
        }
    }
}
