//! Display names for synthesized types.
//!
//! Names are written in type-expression syntax so that resolving a name in a
//! namespace with the factories installed yields an equivalent type.

use super::{BaseType, Constraint, Flavor};

pub(super) fn display_name(flavor: Flavor, base: &BaseType, constraint: &Constraint) -> String {
    let range = match constraint {
        Constraint::Predicate(predicate) => {
            return match base {
                BaseType::Any => format!("Valid[{}]", predicate.full_name()),
                base => format!("Valid[{}, {}]", base.name(), predicate.full_name()),
            };
        }
        Constraint::Bounds(range) => range,
    };
    match flavor {
        Flavor::Length => format!("Length[{}, {}]", base.name(), range.render()),
        Flavor::String => format!("String[{}]", range.render()),
        Flavor::Bounded | Flavor::Valid => match range.key.full_name() {
            None => format!("Bounded[{}, {}]", base.name(), range.render()),
            Some(key) => format!("Bounded[{}, {}, {key}]", base.name(), range.render()),
        },
    }
}
