//! Canonical labels a repository is still missing.

use std::collections::HashSet;

use labelsync_core::{ReferenceLabel, ReferenceSet};

/// Reference labels whose name is absent from `logged`, in reference order.
///
/// `logged` names are compared lowercased.
pub fn remaining_labels<'a, I>(reference: &ReferenceSet, logged: I) -> Vec<ReferenceLabel>
where
    I: IntoIterator<Item = &'a str>,
{
    let seen: HashSet<String> = logged.into_iter().map(str::to_lowercase).collect();
    reference
        .iter()
        .filter(|label| !seen.contains(&label.name))
        .collect()
}
