//! Common-root detection.
//!
//! The IDE allows a physical source root to belong to one module only, but
//! build targets freely share directories. For every root referenced by more
//! than one target this module decides who owns it:
//!
//! - a target whose *only* root it is owns it through its own module, or
//! - a merged module is synthesized for the root, depending on everything
//!   the sharing targets depend on.
//!
//! Planning is pure; the builder applies the plan to the module graph.

use indexmap::{IndexMap, IndexSet};

use crate::core::{SourceKind, SourceRoot, Target, TargetAddress, TargetGraph};
use crate::resolver::errors::ResolveWarning;

/// Ownership decision for one shared source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootPlan<'g> {
    /// The module of a single-root target owns the root.
    Owner {
        root: &'g SourceRoot,
        owner: &'g TargetAddress,
    },

    /// A merged module is synthesized for the root.
    Merge(MergePlan<'g>),
}

/// A merged module to synthesize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePlan<'g> {
    /// The shared root
    pub root: &'g SourceRoot,

    /// Targets sharing the root, in payload order
    pub members: Vec<&'g TargetAddress>,

    /// Classification, taken from the first member's type
    pub kind: SourceKind,

    /// Union of the members' dependencies, in first-seen order
    pub dependencies: IndexSet<&'g TargetAddress>,

    /// Union of the members' library ids, in first-seen order
    pub libraries: IndexSet<&'g str>,
}

/// Result of common-root planning.
#[derive(Debug, Clone, Default)]
pub struct CommonRoots<'g> {
    /// One plan per shared root, in order of first reference
    pub plans: Vec<RootPlan<'g>>,

    /// Conditions met while planning
    pub warnings: Vec<ResolveWarning>,
}

/// Group targets by the source roots they reference.
///
/// A target that lists a root more than once is counted once for it.
pub fn roots_to_targets(
    graph: &TargetGraph,
) -> IndexMap<&SourceRoot, Vec<(&TargetAddress, &Target)>> {
    let mut by_root: IndexMap<&SourceRoot, Vec<(&TargetAddress, &Target)>> = IndexMap::new();
    for (address, target) in graph.targets() {
        for root in target.unique_roots() {
            by_root.entry(root).or_default().push((address, target));
        }
    }
    by_root
}

/// Decide the owner of every shared source root.
///
/// `has_module` tells whether a target got a module of its own; a target
/// that was skipped cannot own a root.
pub fn plan_common_roots<'g>(
    graph: &'g TargetGraph,
    has_module: impl Fn(&TargetAddress) -> bool,
) -> CommonRoots<'g> {
    let mut result = CommonRoots::default();

    for (root, members) in roots_to_targets(graph) {
        if members.len() < 2 {
            continue;
        }

        let candidates: Vec<&TargetAddress> = members
            .iter()
            .filter(|(_, target)| target.has_single_root())
            .map(|(address, _)| *address)
            .collect();
        if candidates.len() > 1 {
            tracing::debug!(
                "{} single-root targets share {}, the first with a module owns it",
                candidates.len(),
                root
            );
        }

        let mut owner = None;
        for candidate in candidates {
            if has_module(candidate) {
                owner = Some(candidate);
                break;
            }
            tracing::warn!("Bad common source root {} for {}", root, candidate);
            result.warnings.push(ResolveWarning::OrphanedCommonRoot {
                root: root.clone(),
                target: candidate.clone(),
            });
        }

        if let Some(owner) = owner {
            tracing::debug!("Found common source root target {}", owner);
            result.plans.push(RootPlan::Owner { root, owner });
            continue;
        }

        let (_, first) = members[0];
        let mut plan = MergePlan {
            root,
            members: members.iter().map(|(address, _)| *address).collect(),
            kind: first.source_kind(),
            dependencies: IndexSet::new(),
            libraries: IndexSet::new(),
        };
        for &(_, target) in &members {
            plan.dependencies.extend(target.dependencies());
            plan.libraries.extend(target.library_ids());
        }
        tracing::debug!(
            "Merging common source root {} shared by {} targets",
            root,
            plan.members.len()
        );
        result.plans.push(RootPlan::Merge(plan));
    }

    result
}
