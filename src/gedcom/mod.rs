//! Family graph access: the read-only query interface the chart engine
//! consumes, plus a GEDCOM-backed implementation.
//!
//! The engine never touches GEDCOM records directly. Everything it needs
//! (parents, children, spouse families, sex) goes through [`FamilyGraph`],
//! so any store that can answer those questions can be charted.

pub mod parser;
pub mod store;

pub use parser::{parse_records, GedcomRecord};
pub use store::{GedcomStore, Individual, PersonName};

use serde::Serialize;
use std::fmt;

/// Canonical individual/family identifier, always of the form `@TOKEN@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Xref(String);

impl Xref {
    /// Canonicalize a raw identifier. Bare tokens (`I1`) are wrapped in the
    /// `@` delimiters; already-delimited ids are kept as they are.
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with('@') {
            Self(raw.to_string())
        } else {
            Self(format!("@{}@", raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier without its `@` delimiters.
    pub fn token(&self) -> &str {
        self.0.trim_matches('@')
    }
}

impl fmt::Display for Xref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Recorded sex of an individual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

impl Sex {
    /// Map a GEDCOM `SEX` value; anything other than `M`/`F` is unknown.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "M" | "m" => Sex::Male,
            "F" | "f" => Sex::Female,
            _ => Sex::Unknown,
        }
    }

    pub fn is_male(self) -> bool {
        matches!(self, Sex::Male)
    }
}

/// A family record: two spouses and their children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    pub xref: Xref,
    pub husband: Option<Xref>,
    pub wife: Option<Xref>,
    pub children: Vec<Xref>,
    /// True when the record carries a marriage event
    pub married: bool,
}

impl Family {
    /// True when `a` and `b` are this family's husband and wife, in either order.
    pub fn is_couple(&self, a: &Xref, b: &Xref) -> bool {
        match (&self.husband, &self.wife) {
            (Some(h), Some(w)) => (h == a && w == b) || (h == b && w == a),
            _ => false,
        }
    }

    /// True when the husband is `father` and the wife is `mother`.
    pub fn has_parents(&self, father: &Xref, mother: &Xref) -> bool {
        self.husband.as_ref() == Some(father) && self.wife.as_ref() == Some(mother)
    }
}

/// Read-only queries over a loaded family graph.
///
/// Lookups for ids that do not resolve return empty results rather than
/// errors; callers that need to tell "unknown" from "none" call
/// [`FamilyGraph::resolve`] first.
pub trait FamilyGraph {
    /// Canonicalize `id` and return it if the individual exists.
    fn resolve(&self, id: &str) -> Option<Xref>;

    /// (father, mother) from the individual's child family
    fn parents(&self, id: &Xref) -> (Option<Xref>, Option<Xref>);

    /// Children across all spouse families, in family order
    fn children(&self, id: &Xref) -> Vec<Xref>;

    fn spouse_families(&self, id: &Xref) -> Vec<&Family>;

    fn sex(&self, id: &Xref) -> Sex;

    fn display_name(&self, id: &Xref) -> String;

    fn birth_year(&self, id: &Xref) -> Option<String>;

    fn death_year(&self, id: &Xref) -> Option<String>;

    /// Whether `a` and `b` share a spouse family carrying a marriage event.
    /// The first family naming them as a couple decides.
    fn is_married(&self, a: &Xref, b: &Xref) -> bool {
        self.spouse_families(a)
            .into_iter()
            .find(|family| family.is_couple(a, b))
            .map_or(false, |family| family.married)
    }

    /// The other parent of `child`, seen from `parent`, and whether the pair
    /// was married. `None` unless the child has both parents recorded and
    /// `parent` is one of them.
    fn co_parent(&self, parent: &Xref, child: &Xref) -> Option<(Xref, bool)> {
        let (father, mother) = self.parents(child);
        let (father, mother) = (father?, mother?);

        let spouse = if *parent == father {
            mother
        } else if *parent == mother {
            father
        } else {
            return None;
        };

        let married = self.is_married(parent, &spouse);
        Some((spouse, married))
    }

    /// Both parents recorded and identical
    fn is_full_sibling(&self, a: &Xref, b: &Xref) -> bool {
        match (self.parents(a), self.parents(b)) {
            ((Some(f1), Some(m1)), (Some(f2), Some(m2))) => f1 == f2 && m1 == m2,
            _ => false,
        }
    }

    /// Exactly one recorded parent in common
    fn is_half_sibling(&self, a: &Xref, b: &Xref) -> bool {
        let (f1, m1) = self.parents(a);
        let (f2, m2) = self.parents(b);

        let same_father = f1.is_some() && f1 == f2;
        let same_mother = m1.is_some() && m1 == m2;

        same_father != same_mother
    }
}
