//! JSON output formatter for duplicate check results.
//!
//! Provides machine-readable output for scripting and automation. The JSON
//! report is read-only: producing it never prompts and never deletes.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "summary": {
//!     "hd_movies": 120,
//!     "uhd_movies": 45,
//!     "cross_groups": 1,
//!     "hd_groups": 0,
//!     "uhd_groups": 0,
//!     "entries_to_delete": 1,
//!     "reclaimable_bytes": 2147483648,
//!     "reclaimable": "2.00 GB"
//!   },
//!   "cross": [
//!     {
//!       "key": "Alien (1979)",
//!       "title": "Alien",
//!       "hd": [{ "name": "Alien (1979)", "size": 2147483648, "action": "delete" }],
//!       "uhd": [{ "name": "Alien.1979.2160p", "size": 4294967296, "action": "keep" }],
//!       "delete": "HD"
//!     }
//!   ],
//!   "hd": [],
//!   "uhd": [],
//!   "candidates": [{ "collection": "HD", "path": "/volume1/HD/Alien (1979)" }],
//!   "warnings": []
//! }
//! ```
//!
//! Sizes and actions are `null` for groups whose collection root was not given.

use std::io::Write;

use serde::Serialize;

use super::format_size;
use crate::duplicates::{
    Analysis, CrossDecision, DeletionPlan, DuplicateGroup, GroupDecision, SizedEntry,
};
use crate::manifest::{Collection, Entry};

/// What the plan does with one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonAction {
    /// Member is kept
    Keep,
    /// Member is deleted
    Delete,
}

/// One listed entry.
#[derive(Debug, Clone, Serialize)]
pub struct JsonMember {
    /// Entry name as listed
    pub name: String,
    /// Largest video file size in bytes, if measured
    pub size: Option<u64>,
    /// Planned action, if decided
    pub action: Option<JsonAction>,
}

impl JsonMember {
    fn listed(entry: &Entry) -> Self {
        Self {
            name: entry.name.clone(),
            size: None,
            action: None,
        }
    }

    fn decided(member: &SizedEntry, action: JsonAction) -> Self {
        Self {
            name: member.entry.name.clone(),
            size: Some(member.size),
            action: Some(action),
        }
    }
}

/// A duplicate group inside one collection.
#[derive(Debug, Clone, Serialize)]
pub struct JsonGroup {
    /// Normalized key
    pub key: String,
    /// Display title
    pub title: String,
    /// Members; ranked by size when decided, manifest order otherwise
    pub members: Vec<JsonMember>,
}

impl JsonGroup {
    fn from_group(group: &DuplicateGroup, decision: Option<&GroupDecision>) -> Self {
        let members = match decision {
            Some(decision) => decision
                .members
                .iter()
                .enumerate()
                .map(|(i, m)| {
                    let action = if i == 0 { JsonAction::Keep } else { JsonAction::Delete };
                    JsonMember::decided(m, action)
                })
                .collect(),
            None => group.entries.iter().map(JsonMember::listed).collect(),
        };
        Self {
            key: group.key.to_string(),
            title: group.key.display_title(),
            members,
        }
    }
}

/// A title present in both collections.
#[derive(Debug, Clone, Serialize)]
pub struct JsonCrossGroup {
    /// Normalized key
    pub key: String,
    /// Display title
    pub title: String,
    /// HD members
    pub hd: Vec<JsonMember>,
    /// UHD members
    pub uhd: Vec<JsonMember>,
    /// Side being deleted, if decided
    pub delete: Option<Collection>,
}

impl JsonCrossGroup {
    fn from_decision(decision: &CrossDecision) -> Self {
        let side = |collection: Collection| -> Vec<JsonMember> {
            let action = if collection == decision.delete {
                JsonAction::Delete
            } else {
                JsonAction::Keep
            };
            decision
                .side(collection)
                .iter()
                .map(|m| JsonMember::decided(m, action))
                .collect()
        };
        Self {
            key: decision.key.to_string(),
            title: decision.key.display_title(),
            hd: side(Collection::Hd),
            uhd: side(Collection::Uhd),
            delete: Some(decision.delete),
        }
    }
}

/// One entry scheduled for deletion.
#[derive(Debug, Clone, Serialize)]
pub struct JsonCandidate {
    /// Collection of the entry
    pub collection: Collection,
    /// Full path of the entry
    pub path: String,
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Entries listed in the HD manifest
    pub hd_movies: usize,
    /// Entries listed in the UHD manifest
    pub uhd_movies: usize,
    /// Titles present in both collections
    pub cross_groups: usize,
    /// Duplicate groups inside HD
    pub hd_groups: usize,
    /// Duplicate groups inside UHD
    pub uhd_groups: usize,
    /// Entries the plan would delete
    pub entries_to_delete: usize,
    /// Bytes freed by the plan
    pub reclaimable_bytes: u64,
    /// Bytes freed, human readable
    pub reclaimable: String,
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Summary statistics
    pub summary: JsonSummary,
    /// Cross-collection groups, by key
    pub cross: Vec<JsonCrossGroup>,
    /// HD duplicate groups, by key
    pub hd: Vec<JsonGroup>,
    /// UHD duplicate groups, by key
    pub uhd: Vec<JsonGroup>,
    /// Deletion candidates in plan order
    pub candidates: Vec<JsonCandidate>,
    /// Non-fatal problems met during the run
    pub warnings: Vec<String>,
}

impl JsonOutput {
    /// Create the JSON view of one run.
    #[must_use]
    pub fn new(
        analysis: &Analysis,
        plan: &DeletionPlan,
        hd_movies: usize,
        uhd_movies: usize,
        reclaimable_bytes: u64,
        warnings: &[String],
    ) -> Self {
        let cross = analysis
            .cross
            .iter()
            .map(|group| {
                match plan.cross.iter().find(|d| d.key == group.key) {
                    Some(decision) => JsonCrossGroup::from_decision(decision),
                    None => JsonCrossGroup {
                        key: group.key.to_string(),
                        title: group.key.display_title(),
                        hd: group.hd.iter().map(JsonMember::listed).collect(),
                        uhd: group.uhd.iter().map(JsonMember::listed).collect(),
                        delete: None,
                    },
                }
            })
            .collect();

        let groups = |collection: Collection| -> Vec<JsonGroup> {
            analysis
                .groups(collection)
                .iter()
                .map(|group| {
                    let decision = plan.groups(collection).iter().find(|d| d.key == group.key);
                    JsonGroup::from_group(group, decision)
                })
                .collect()
        };

        Self {
            summary: JsonSummary {
                hd_movies,
                uhd_movies,
                cross_groups: analysis.cross.len(),
                hd_groups: analysis.hd.len(),
                uhd_groups: analysis.uhd.len(),
                entries_to_delete: plan.candidates.len(),
                reclaimable_bytes,
                reclaimable: format_size(reclaimable_bytes),
            },
            cross,
            hd: groups(Collection::Hd),
            uhd: groups(Collection::Uhd),
            candidates: plan
                .candidates
                .iter()
                .map(|c| JsonCandidate {
                    collection: c.collection,
                    path: c.path().to_string_lossy().into_owned(),
                })
                .collect(),
            warnings: warnings.to_vec(),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
