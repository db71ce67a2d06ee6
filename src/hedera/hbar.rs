use serde::Serialize;
use std::fmt;

use crate::constants::TINYBARS_PER_HBAR;

/// Amount of HBAR held in tinybars. Serializes as the tinybar count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct Hbar(u64);

impl Hbar {
    pub fn from_tinybars(tinybars: u64) -> Self {
        Hbar(tinybars)
    }

    pub fn from_hbar(hbar: u64) -> Self {
        Hbar(hbar.saturating_mul(TINYBARS_PER_HBAR))
    }

}

impl fmt::Display for Hbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} ℏ", self.0 as f64 / TINYBARS_PER_HBAR as f64)
    }
}
