//! Keep/delete decisions for duplicate groups.
//!
//! # Overview
//!
//! Every group is ranked by the size of each member's largest video file:
//!
//! - **Within one collection** the largest member is kept and every other
//!   member is marked for deletion. The sort is stable, so among equal sizes
//!   the first listed member wins.
//! - **Across collections** the largest HD member is compared with the
//!   largest UHD member. The smaller side loses and *all* of its entries are
//!   marked, even when only one of them is truly redundant. On a tie the
//!   [`DecisionPolicy::tie_winner`] side is kept (UHD by default, on the
//!   assumption that the UHD copy is the better encode).
//!
//! Decisions are pure: they read sizes through [`SizeLookup`] and return an
//! explicit list of [`DeletionCandidate`]s. Nothing is touched on disk here;
//! see [`crate::actions::delete`] for execution.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::groups::{CrossDuplicateGroup, DuplicateGroup};
use super::Analysis;
use crate::manifest::{Collection, Entry};
use crate::scanner::SizeLookup;
use crate::title::NormalizedKey;

/// Cross keys must be longer than this many characters.
pub const DEFAULT_MIN_CROSS_KEY_LEN: usize = 3;

/// Side kept when both sides of a cross group have the same size.
pub const DEFAULT_TIE_WINNER: Collection = Collection::Uhd;

/// Tunable heuristics of the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionPolicy {
    /// Minimum key length (exclusive) for a cross-collection match
    pub min_cross_key_len: usize,
    /// Collection kept when cross sizes are equal
    pub tie_winner: Collection,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            min_cross_key_len: DEFAULT_MIN_CROSS_KEY_LEN,
            tie_winner: DEFAULT_TIE_WINNER,
        }
    }
}

impl DecisionPolicy {
    /// Set the minimum cross key length.
    #[must_use]
    pub fn with_min_cross_key_len(mut self, len: usize) -> Self {
        self.min_cross_key_len = len;
        self
    }

    /// Set the side kept on a tie.
    #[must_use]
    pub fn with_tie_winner(mut self, winner: Collection) -> Self {
        self.tie_winner = winner;
        self
    }
}

/// Directory roots used for size resolution, one per collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roots {
    /// HD library root
    pub hd: Option<PathBuf>,
    /// UHD library root
    pub uhd: Option<PathBuf>,
}

impl Roots {
    /// Create roots from optional paths. Empty paths count as absent.
    #[must_use]
    pub fn new(hd: Option<PathBuf>, uhd: Option<PathBuf>) -> Self {
        let present = |p: Option<PathBuf>| p.filter(|p| !p.as_os_str().is_empty());
        Self {
            hd: present(hd),
            uhd: present(uhd),
        }
    }

    /// Root of one collection.
    #[must_use]
    pub fn get(&self, collection: Collection) -> Option<&Path> {
        match collection {
            Collection::Hd => self.hd.as_deref(),
            Collection::Uhd => self.uhd.as_deref(),
        }
    }

    /// Check if both roots are known.
    #[must_use]
    pub fn both(&self) -> bool {
        self.hd.is_some() && self.uhd.is_some()
    }
}

/// An entry annotated with its ranking size (0 if missing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizedEntry {
    /// The listed entry
    #[serde(flatten)]
    pub entry: Entry,
    /// Largest video file size in bytes
    pub size: u64,
}

/// An entry scheduled for removal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DeletionCandidate {
    /// Collection root the entry lives in
    pub root: PathBuf,
    /// Entry name below the root
    pub name: String,
    /// Collection the entry belongs to
    pub collection: Collection,
}

impl DeletionCandidate {
    /// Create a candidate.
    #[must_use]
    pub fn new(root: &Path, name: impl Into<String>, collection: Collection) -> Self {
        Self {
            root: root.to_path_buf(),
            name: name.into(),
            collection,
        }
    }

    /// Full path of the entry.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.root.join(&self.name)
    }
}

/// Ranked members of one intra-collection group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupDecision {
    /// Shared key
    pub key: NormalizedKey,
    /// Collection of the group
    pub collection: Collection,
    /// Members sorted by size, largest first; the first one is kept
    pub members: Vec<SizedEntry>,
}

impl GroupDecision {
    /// The member that is kept.
    #[must_use]
    pub fn kept(&self) -> Option<&SizedEntry> {
        self.members.first()
    }

    /// Members marked for deletion.
    #[must_use]
    pub fn deleted(&self) -> &[SizedEntry] {
        self.members.get(1..).unwrap_or_default()
    }
}

/// Verdict for one cross-collection group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossDecision {
    /// Shared key
    pub key: NormalizedKey,
    /// HD members with sizes, manifest order
    pub hd: Vec<SizedEntry>,
    /// UHD members with sizes, manifest order
    pub uhd: Vec<SizedEntry>,
    /// Largest HD size
    pub hd_size: u64,
    /// Largest UHD size
    pub uhd_size: u64,
    /// Side whose entries are all deleted
    pub delete: Collection,
}

impl CrossDecision {
    /// Side that is kept.
    #[must_use]
    pub fn keep(&self) -> Collection {
        self.delete.other()
    }

    /// Check if both sides measured the same.
    #[must_use]
    pub fn is_tie(&self) -> bool {
        self.hd_size == self.uhd_size
    }

    /// Members of one side.
    #[must_use]
    pub fn side(&self, collection: Collection) -> &[SizedEntry] {
        match collection {
            Collection::Hd => &self.hd,
            Collection::Uhd => &self.uhd,
        }
    }
}

fn sized(entries: &[Entry], root: &Path, sizes: &impl SizeLookup) -> Vec<SizedEntry> {
    entries
        .iter()
        .map(|entry| SizedEntry {
            size: sizes.ranking_size(root, &entry.name),
            entry: entry.clone(),
        })
        .collect()
}

/// Rank an intra-collection group and mark all but the largest member.
#[must_use]
pub fn decide_group(
    group: &DuplicateGroup,
    root: &Path,
    sizes: &impl SizeLookup,
) -> (GroupDecision, Vec<DeletionCandidate>) {
    let collection = group.collection().unwrap_or(Collection::Hd);
    let mut members = sized(&group.entries, root, sizes);
    // Vec::sort_by is stable: equal sizes keep manifest order.
    members.sort_by(|a, b| b.size.cmp(&a.size));

    let candidates = members
        .iter()
        .skip(1)
        .map(|m| DeletionCandidate::new(root, m.entry.name.clone(), collection))
        .collect();

    if let Some(kept) = members.first() {
        log::debug!(
            "{} '{}': keeping {} ({} bytes)",
            collection,
            group.key,
            kept.entry.name,
            kept.size
        );
    }

    (
        GroupDecision {
            key: group.key.clone(),
            collection,
            members,
        },
        candidates,
    )
}

/// Compare both sides of a cross group and mark every entry of the losing side.
#[must_use]
pub fn decide_cross(
    group: &CrossDuplicateGroup,
    hd_root: &Path,
    uhd_root: &Path,
    policy: &DecisionPolicy,
    sizes: &impl SizeLookup,
) -> (CrossDecision, Vec<DeletionCandidate>) {
    let hd = sized(&group.hd, hd_root, sizes);
    let uhd = sized(&group.uhd, uhd_root, sizes);
    let hd_size = hd.iter().map(|m| m.size).max().unwrap_or(0);
    let uhd_size = uhd.iter().map(|m| m.size).max().unwrap_or(0);

    let delete = match hd_size.cmp(&uhd_size) {
        std::cmp::Ordering::Greater => Collection::Uhd,
        std::cmp::Ordering::Less => Collection::Hd,
        std::cmp::Ordering::Equal => policy.tie_winner.other(),
    };

    let (losers, root) = match delete {
        Collection::Hd => (&hd, hd_root),
        Collection::Uhd => (&uhd, uhd_root),
    };
    let candidates = losers
        .iter()
        .map(|m| DeletionCandidate::new(root, m.entry.name.clone(), delete))
        .collect();

    log::debug!(
        "Cross '{}': HD {} bytes, UHD {} bytes, deleting {}",
        group.key,
        hd_size,
        uhd_size,
        delete
    );

    (
        CrossDecision {
            key: group.key.clone(),
            hd,
            uhd,
            hd_size,
            uhd_size,
            delete,
        },
        candidates,
    )
}

/// Full keep/delete plan for one run.
///
/// Groups whose collection root is unknown are left undecided and do not
/// contribute candidates; cross groups need both roots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionPlan {
    /// Cross-collection verdicts, by key
    pub cross: Vec<CrossDecision>,
    /// HD group rankings, by key
    pub hd: Vec<GroupDecision>,
    /// UHD group rankings, by key
    pub uhd: Vec<GroupDecision>,
    /// Entries to delete: cross first, then HD, then UHD, without repeats
    pub candidates: Vec<DeletionCandidate>,
}

impl DeletionPlan {
    /// Check if nothing is scheduled for deletion.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Rankings of one collection.
    #[must_use]
    pub fn groups(&self, collection: Collection) -> &[GroupDecision] {
        match collection {
            Collection::Hd => &self.hd,
            Collection::Uhd => &self.uhd,
        }
    }

    /// Candidates of one collection.
    pub fn candidates_in(&self, collection: Collection) -> impl Iterator<Item = &DeletionCandidate> {
        self.candidates
            .iter()
            .filter(move |c| c.collection == collection)
    }

    /// Bytes freed by deleting every candidate.
    #[must_use]
    pub fn reclaimable_bytes(&self, sizes: &impl SizeLookup) -> u64 {
        reclaimable_bytes(&self.candidates, sizes)
    }
}

/// Bytes freed by deleting `candidates`.
#[must_use]
pub fn reclaimable_bytes(candidates: &[DeletionCandidate], sizes: &impl SizeLookup) -> u64 {
    candidates
        .iter()
        .map(|c| sizes.reclaimable_size(&c.root, &c.name))
        .sum()
}

/// First member with the largest size; ties go to the earliest listed.
fn largest(members: &[SizedEntry]) -> Option<&SizedEntry> {
    members
        .iter()
        .reduce(|best, m| if m.size > best.size { m } else { best })
}

/// Paths of the copies that remain on disk once the plan is carried out.
///
/// For a cross verdict that is the largest member of the kept side. An intra
/// ranking contributes its kept member unless a cross verdict deletes its
/// whole collection for that key. A manifest naming the same folder twice, or
/// HD and UHD sharing one root, can make a candidate point at one of these.
fn survivors(plan: &DeletionPlan, roots: &Roots) -> HashSet<PathBuf> {
    let mut paths = HashSet::new();
    let mut cross_losers = HashMap::new();

    for decision in &plan.cross {
        cross_losers.insert(&decision.key, decision.delete);
        let keep = decision.keep();
        if let (Some(root), Some(best)) = (roots.get(keep), largest(decision.side(keep))) {
            paths.insert(root.join(&best.entry.name));
        }
    }

    for decision in plan.hd.iter().chain(&plan.uhd) {
        if cross_losers.get(&decision.key) == Some(&decision.collection) {
            continue;
        }
        if let (Some(root), Some(kept)) = (roots.get(decision.collection), decision.kept()) {
            paths.insert(root.join(&kept.entry.name));
        }
    }

    paths
}

/// Decide every group of an analysis.
#[must_use]
pub fn build_plan(
    analysis: &Analysis,
    roots: &Roots,
    policy: &DecisionPolicy,
    sizes: &impl SizeLookup,
) -> DeletionPlan {
    let mut plan = DeletionPlan::default();
    let mut scheduled: Vec<DeletionCandidate> = Vec::new();

    if let (Some(hd_root), Some(uhd_root)) = (roots.get(Collection::Hd), roots.get(Collection::Uhd)) {
        for group in &analysis.cross {
            let (decision, candidates) = decide_cross(group, hd_root, uhd_root, policy, sizes);
            plan.cross.push(decision);
            scheduled.extend(candidates);
        }
    }

    for collection in [Collection::Hd, Collection::Uhd] {
        let Some(root) = roots.get(collection) else {
            continue;
        };
        for group in analysis.groups(collection) {
            let (decision, candidates) = decide_group(group, root, sizes);
            match collection {
                Collection::Hd => plan.hd.push(decision),
                Collection::Uhd => plan.uhd.push(decision),
            }
            scheduled.extend(candidates);
        }
    }

    let kept_paths = survivors(&plan, roots);
    let mut seen = HashSet::new();
    plan.candidates = scheduled
        .into_iter()
        .filter(|c| {
            if kept_paths.contains(&c.path()) {
                log::warn!(
                    "Not deleting {}: it is the copy being kept",
                    c.path().display()
                );
                return false;
            }
            seen.insert(c.clone())
        })
        .collect();

    log::info!(
        "Plan: {} cross verdicts, {} HD groups, {} UHD groups, {} entries to delete",
        plan.cross.len(),
        plan.hd.len(),
        plan.uhd.len(),
        plan.candidates.len()
    );

    plan
}
