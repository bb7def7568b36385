//! Decides how little of the page must change between two documents.

use taskdeck_domain::DisplayDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePlan {
    Unchanged,
    /// Same groups in the same order; these groups' contents changed.
    PatchGroups(Vec<String>),
    /// Groups were added, removed or reordered.
    ReplaceContent,
}

pub fn plan_update(old: &DisplayDocument, new: &DisplayDocument) -> UpdatePlan {
    let same_layout = old.len() == new.len()
        && old
            .groups
            .keys()
            .zip(new.groups.keys())
            .all(|(a, b)| a == b);
    if !same_layout {
        return UpdatePlan::ReplaceContent;
    }

    let changed: Vec<String> = new
        .iter()
        .filter(|(name, group)| old.group(name) != Some(*group))
        .map(|(name, _)| name.to_string())
        .collect();

    if changed.is_empty() {
        UpdatePlan::Unchanged
    } else {
        UpdatePlan::PatchGroups(changed)
    }
}
