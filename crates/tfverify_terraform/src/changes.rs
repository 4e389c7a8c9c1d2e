//! Change-count parsing from Terraform summary lines.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Resource change counts reported by an apply, plan, or destroy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCounts {
    pub added: u32,
    pub changed: u32,
    pub destroyed: u32,
}

impl ChangeCounts {
    pub const ZERO: Self = Self {
        added: 0,
        changed: 0,
        destroyed: 0,
    };

    /// True when the operation touched nothing.
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.changed == 0 && self.destroyed == 0
    }

    pub fn total(&self) -> u32 {
        self.added + self.changed + self.destroyed
    }

    /// Parse the summary line out of human-readable Terraform output.
    ///
    /// Recognized forms:
    /// - `Apply complete! Resources: X added, Y changed, Z destroyed.`
    /// - `Destroy complete! Resources: Z destroyed.`
    /// - `Plan: X to add, Y to change, Z to destroy.`
    /// - `No changes.` (all-zero counts)
    pub fn parse(output: &str) -> Option<Self> {
        let apply =
            Regex::new(r"Resources:\s+(\d+)\s+added,\s+(\d+)\s+changed,\s+(\d+)\s+destroyed")
                .expect("static pattern compiles");
        if let Some(caps) = apply.captures(output) {
            return Some(Self {
                added: caps[1].parse().ok()?,
                changed: caps[2].parse().ok()?,
                destroyed: caps[3].parse().ok()?,
            });
        }

        let plan = Regex::new(r"Plan:\s+(\d+)\s+to\s+add,\s+(\d+)\s+to\s+change,\s+(\d+)\s+to\s+destroy")
            .expect("static pattern compiles");
        if let Some(caps) = plan.captures(output) {
            return Some(Self {
                added: caps[1].parse().ok()?,
                changed: caps[2].parse().ok()?,
                destroyed: caps[3].parse().ok()?,
            });
        }

        let destroy = Regex::new(r"Destroy complete!\s+Resources:\s+(\d+)\s+destroyed")
            .expect("static pattern compiles");
        if let Some(caps) = destroy.captures(output) {
            return Some(Self {
                added: 0,
                changed: 0,
                destroyed: caps[1].parse().ok()?,
            });
        }

        if output.contains("No changes.") {
            return Some(Self::ZERO);
        }

        None
    }
}

impl std::fmt::Display for ChangeCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} added, {} changed, {} destroyed",
            self.added, self.changed, self.destroyed
        )
    }
}
