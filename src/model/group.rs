//! Parent groups: which prerequisites of a node substitute for each other.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One entry of a node's `parent_groups`.
///
/// In JSON a bare string is [`ParentGroup::Required`] and an array is
/// [`ParentGroup::Alternatives`]; `null` inside the array is the optional
/// sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParentGroup {
    /// A single prerequisite that must be present. Produces no derived edge.
    Required(String),
    /// Interchangeable prerequisites; a `None` member makes the group optional.
    Alternatives(Vec<Option<String>>),
}

impl ParentGroup {
    /// Substitution group over the given compound ids.
    pub fn any_of(members: impl IntoIterator<Item = impl Into<String>>) -> Self {
        ParentGroup::Alternatives(members.into_iter().map(|m| Some(m.into())).collect())
    }

    /// Optional group: the given members plus the sentinel.
    pub fn optional(members: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut all = vec![None];
        all.extend(members.into_iter().map(|m| Some(m.into())));
        ParentGroup::Alternatives(all)
    }

    /// True iff this is an alternatives group containing the sentinel.
    pub fn is_optional(&self) -> bool {
        match self {
            ParentGroup::Required(_) => false,
            ParentGroup::Alternatives(members) => members.iter().any(Option::is_none),
        }
    }

    /// Non-sentinel members, as written.
    pub fn members(&self) -> Vec<&str> {
        match self {
            ParentGroup::Required(id) => vec![id.as_str()],
            ParentGroup::Alternatives(members) => members.iter().flatten().map(String::as_str).collect(),
        }
    }
}

/// Whether a node needs all of its parents or any one of them.
///
/// Serialized as the boolean `all_parents` flag: `true` is [`Logic::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum Logic {
    All,
    Any,
}

impl From<bool> for Logic {
    fn from(all_parents: bool) -> Self {
        if all_parents { Logic::All } else { Logic::Any }
    }
}

impl From<Logic> for bool {
    fn from(logic: Logic) -> Self {
        logic == Logic::All
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logic::All => write!(f, "all"),
            Logic::Any => write!(f, "any"),
        }
    }
}
