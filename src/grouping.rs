//! Grouping tasks into board columns.
//!
//! A board view is a map from section to the tasks in it, in the order the
//! sections were first seen. A task posted in several sections shows up under
//! each of them; a task with only project-level memberships shows up nowhere.

use indexmap::IndexMap;

use crate::models::{Membership, SectionRef, Task};

/// Tasks keyed by section, in section discovery order.
pub type Grouped = IndexMap<SectionRef, Vec<Task>>;

/// Partition `tasks` by section membership.
///
/// Sections appear in the order they are first encountered while walking
/// `tasks`; within a section, tasks keep their input order.
pub fn group(tasks: &[Task]) -> Grouped {
    let mut grouped = Grouped::new();

    for task in tasks {
        let mut seen: Vec<&SectionRef> = Vec::new();
        for membership in &task.memberships {
            let section = match membership {
                Membership::Section { section, .. } => section,
                Membership::Project { .. } => continue,
            };
            // Same section listed twice on one task
            if seen.contains(&section) {
                continue;
            }
            seen.push(section);
            grouped
                .entry(section.clone())
                .or_default()
                .push(task.clone());
        }
    }

    grouped
}

/// Keep only the groups whose section gid is in `allowlist`.
///
/// An empty allowlist keeps everything. Group order is unchanged.
pub fn filter(grouped: Grouped, allowlist: &[String]) -> Grouped {
    if allowlist.is_empty() {
        return grouped;
    }
    grouped
        .into_iter()
        .filter(|(section, _)| allowlist.contains(&section.gid))
        .collect()
}

/// Lay groups out in `columns` order.
///
/// Sections not listed in `columns` are dropped and listed sections without
/// tasks are skipped. An empty `columns` leaves discovery order untouched.
pub fn ordered_by_columns(mut grouped: Grouped, columns: &[String]) -> Grouped {
    if columns.is_empty() {
        return grouped;
    }

    let mut ordered = Grouped::with_capacity(columns.len());
    for column in columns {
        let position = grouped.keys().position(|section| &section.gid == column);
        if let Some((section, tasks)) = position.and_then(|i| grouped.shift_remove_index(i)) {
            ordered.insert(section, tasks);
        }
    }
    ordered
}
