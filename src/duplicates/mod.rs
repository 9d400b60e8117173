//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Grouping entries of one collection by normalized key
//! - Matching keys across the HD and UHD collections
//! - Keep/delete decisions for every group
//!
//! [`Analysis`] bundles the grouping results of one run; [`plan::build_plan`]
//! turns it into a [`DeletionPlan`] once collection roots are known.

pub mod groups;
pub mod plan;

use serde::Serialize;

use crate::manifest::{Collection, Entry};

pub use groups::{
    bucket_by_key, group_cross, group_duplicates, CrossDuplicateGroup, DuplicateGroup,
    GroupingStats,
};
pub use plan::{
    build_plan, decide_cross, decide_group, reclaimable_bytes, CrossDecision, DecisionPolicy,
    DeletionCandidate, DeletionPlan, GroupDecision, Roots, SizedEntry,
};

/// Grouping results for both collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Keys present in both collections
    pub cross: Vec<CrossDuplicateGroup>,
    /// Duplicate groups inside HD
    pub hd: Vec<DuplicateGroup>,
    /// Duplicate groups inside UHD
    pub uhd: Vec<DuplicateGroup>,
    /// Grouping statistics for HD
    #[serde(skip)]
    pub hd_stats: GroupingStats,
    /// Grouping statistics for UHD
    #[serde(skip)]
    pub uhd_stats: GroupingStats,
}

impl Analysis {
    /// Group both collections.
    #[must_use]
    pub fn new(hd: &[Entry], uhd: &[Entry], policy: &DecisionPolicy) -> Self {
        let cross = group_cross(hd, uhd, policy.min_cross_key_len);
        let (hd_groups, hd_stats) = group_duplicates(hd);
        let (uhd_groups, uhd_stats) = group_duplicates(uhd);
        Self {
            cross,
            hd: hd_groups,
            uhd: uhd_groups,
            hd_stats,
            uhd_stats,
        }
    }

    /// Duplicate groups of one collection.
    #[must_use]
    pub fn groups(&self, collection: Collection) -> &[DuplicateGroup] {
        match collection {
            Collection::Hd => &self.hd,
            Collection::Uhd => &self.uhd,
        }
    }

    /// Check if nothing was found at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cross.is_empty() && self.hd.is_empty() && self.uhd.is_empty()
    }
}
