//! Filtering of usage relationships into dependency edges.

use crate::base::constants::is_object_class;
use crate::base::{DependencyKind, RelationshipKind};
use crate::config::{DependencyOption, DependencyOptions};

/// Whether a usage `from → to` with `relationship` becomes a dependency
/// edge under `options`.
///
/// Object-to-Object usages never do. Annotation usages are not filtered.
pub fn should_show(
    options: &DependencyOptions,
    from: &str,
    to: &str,
    relationship: &RelationshipKind,
) -> bool {
    if is_object_class(from) && is_object_class(to) {
        return false;
    }
    if from == to && !options.contains(DependencyOption::SelfReferences) {
        return false;
    }
    let required = match relationship.dependency_kind() {
        Some(DependencyKind::OneToOne) => DependencyOption::OneToOne,
        Some(DependencyKind::OneToMany) => DependencyOption::OneToMany,
        Some(DependencyKind::Usage) => DependencyOption::Usages,
        Some(DependencyKind::Creation) => DependencyOption::Creation,
        Some(DependencyKind::Annotation) | None => return true,
    };
    options.contains(required)
}
