//! Per-lead polarity and magnitude coefficients.
//!
//! One underlying cardiac event looks different in each lead; the vector
//! table captures that with four coefficients. The Q wave reuses the R
//! coefficient. Positive `s` means a downward deflection.

use crate::types::LeadId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coefficients for the P, R (and Q), S and T components of one lead.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LeadVector {
    /// P wave coefficient.
    pub p: f64,
    /// R wave coefficient, also used for Q.
    pub r: f64,
    /// S wave coefficient (positive is downward).
    pub s: f64,
    /// T wave coefficient.
    pub t: f64,
}

impl LeadVector {
    /// Used for leads that are not in the table.
    pub const FALLBACK: LeadVector = LeadVector::new(1.0, 1.0, 0.25, 1.0);

    /// Nearly isoelectric vector produced by some electrode reversals.
    pub const FLAT: LeadVector = LeadVector::new(0.1, 0.1, 0.02, 0.1);

    /// Creates a vector from its four coefficients.
    pub const fn new(p: f64, r: f64, s: f64, t: f64) -> Self {
        Self { p, r, s, t }
    }

    /// Returns the table vector for `lead`.
    pub const fn of(lead: LeadId) -> Self {
        match lead {
            LeadId::I => LeadVector::new(1.0, 1.0, 0.2, 1.0),
            LeadId::II => LeadVector::new(1.2, 1.5, 0.2, 1.2),
            LeadId::III => LeadVector::new(0.8, 0.8, 0.3, 0.8),
            LeadId::AVR => LeadVector::new(-0.8, 0.1, 1.0, -0.8),
            LeadId::AVL => LeadVector::new(0.5, 0.6, 0.2, 0.5),
            LeadId::AVF => LeadVector::new(1.0, 1.1, 0.2, 1.0),
            // Precordial R progression: small r and deep S in V1 through
            // tall R and minimal S in V6.
            LeadId::V1 => LeadVector::new(0.6, 0.30, 1.2, -0.2),
            LeadId::V2 => LeadVector::new(0.7, 0.56, 1.4, 0.5),
            LeadId::V3 => LeadVector::new(0.8, 1.12, 0.8, 0.9),
            LeadId::V4 => LeadVector::new(0.8, 1.82, 0.4, 1.1),
            LeadId::V5 => LeadVector::new(0.8, 1.4, 0.2, 1.0),
            LeadId::V6 => LeadVector::new(0.8, 1.2, 0.1, 0.9),
        }
    }

    /// Returns the vector for an optional lead, falling back for `None`.
    pub fn lookup(lead: Option<LeadId>) -> Self {
        lead.map_or(Self::FALLBACK, Self::of)
    }

    /// Returns the vector for a lead name. Unrecognized names get
    /// [`LeadVector::FALLBACK`].
    pub fn by_name(name: &str) -> Self {
        Self::lookup(name.parse().ok())
    }

    /// Returns this vector with every coefficient negated.
    pub fn inverted(self) -> Self {
        Self::new(-self.p, -self.r, -self.s, -self.t)
    }
}
