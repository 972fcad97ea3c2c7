//! Relationship path types and their ranking key.

use serde::Serialize;
use std::str::FromStr;

use crate::error::GedgraphError;
use crate::gedcom::Xref;

/// Which way a step crosses a parent/child edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// From a child up to one of its parents
    ToParent,
    /// From a parent down to one of its children
    ToChild,
}

impl Direction {
    /// Generation change of the step: +1 down to a child, -1 up to a parent
    pub fn offset(self) -> i32 {
        match self {
            Direction::ToParent => -1,
            Direction::ToChild => 1,
        }
    }
}

/// Whether the parent/child edge sits inside a complete couple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BloodWeight {
    Full,
    Half,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lineage {
    Male,
    Female,
}

/// One edge of a relationship path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    /// Individual the step arrives at
    pub individual: Xref,
    pub direction: Direction,
    pub blood: BloodWeight,
    pub lineage: Lineage,
}

/// A walk through the family graph from `start` to `end`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipPath {
    pub start: Xref,
    pub end: Xref,
    pub steps: Vec<PathStep>,
}

impl RelationshipPath {
    /// Zero-length path of an individual to itself
    pub fn empty(individual: Xref) -> Self {
        Self {
            start: individual.clone(),
            end: individual,
            steps: Vec::new(),
        }
    }

    pub fn length(&self) -> usize {
        self.steps.len()
    }

    /// Positive when `end` is a descendant of `start`, negative when an
    /// ancestor, zero for the same generation.
    pub fn generation_distance(&self) -> i32 {
        self.steps.iter().map(|s| s.direction.offset()).sum()
    }

    /// Number of half-blood steps
    pub fn blood_score(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.blood == BloodWeight::Half)
            .count()
    }

    /// Number of steps through the female line
    pub fn male_score(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.lineage == Lineage::Female)
            .count()
    }

    pub fn rank(&self) -> PathRank {
        PathRank {
            length: self.length(),
            blood_score: self.blood_score(),
            male_score: self.male_score(),
        }
    }

    /// Everyone on the path, start first
    pub fn members(&self) -> Vec<Xref> {
        std::iter::once(self.start.clone())
            .chain(self.steps.iter().map(|s| s.individual.clone()))
            .collect()
    }
}

/// Ordering key for paths: shorter first, then fewer half-blood steps, then
/// fewer female-line steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PathRank {
    pub length: usize,
    pub blood_score: usize,
    pub male_score: usize,
}

/// How equal-length paths are told apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ranking {
    /// Full blood before half blood, then male line before female line
    #[default]
    BloodThenMale,
    /// Length only; every shortest path is a tie
    LengthOnly,
}

impl Ranking {
    pub fn key(self, path: &RelationshipPath) -> PathRank {
        match self {
            Ranking::BloodThenMale => path.rank(),
            Ranking::LengthOnly => PathRank {
                length: path.length(),
                blood_score: 0,
                male_score: 0,
            },
        }
    }
}

impl FromStr for Ranking {
    type Err = GedgraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blood-then-male" => Ok(Ranking::BloodThenMale),
            "length-only" => Ok(Ranking::LengthOnly),
            other => Err(GedgraphError::InvalidArgument(format!(
                "unknown path ranking: {} (expected blood-then-male or length-only)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(id: &str, direction: Direction, blood: BloodWeight, lineage: Lineage) -> PathStep {
        PathStep {
            individual: Xref::new(id),
            direction,
            blood,
            lineage,
        }
    }

    fn path(steps: Vec<PathStep>) -> RelationshipPath {
        RelationshipPath {
            start: Xref::new("A"),
            end: steps.last().map(|s| s.individual.clone()).unwrap_or_else(|| Xref::new("A")),
            steps,
        }
    }

    #[test]
    fn test_empty_path() {
        let p = RelationshipPath::empty(Xref::new("I1"));
        assert_eq!(p.length(), 0);
        assert_eq!(p.generation_distance(), 0);
        assert_eq!(p.start, p.end);
        assert_eq!(p.members(), vec![Xref::new("I1")]);
    }

    #[test]
    fn test_generation_distance_signs() {
        use BloodWeight::Full;
        use Lineage::Male;

        let down = path(vec![
            step("B", Direction::ToChild, Full, Male),
            step("C", Direction::ToChild, Full, Male),
        ]);
        assert_eq!(down.generation_distance(), 2);

        let up = path(vec![
            step("B", Direction::ToParent, Full, Male),
            step("C", Direction::ToParent, Full, Male),
            step("D", Direction::ToParent, Full, Male),
        ]);
        assert_eq!(up.generation_distance(), -3);

        let across = path(vec![
            step("P", Direction::ToParent, Full, Male),
            step("S", Direction::ToChild, Full, Male),
        ]);
        assert_eq!(across.generation_distance(), 0);
        assert_eq!(across.length(), 2);
    }

    #[test]
    fn test_rank_orders_length_then_blood_then_lineage() {
        use Direction::{ToChild, ToParent};

        let full_male = path(vec![
            step("P", ToParent, BloodWeight::Full, Lineage::Male),
            step("S", ToChild, BloodWeight::Full, Lineage::Male),
        ]);
        let full_female = path(vec![
            step("M", ToParent, BloodWeight::Full, Lineage::Female),
            step("S", ToChild, BloodWeight::Full, Lineage::Female),
        ]);
        let half_male = path(vec![
            step("P", ToParent, BloodWeight::Full, Lineage::Male),
            step("S", ToChild, BloodWeight::Half, Lineage::Male),
        ]);
        let longer = path(vec![step("X", ToParent, BloodWeight::Full, Lineage::Male); 3]);

        assert!(full_male.rank() < full_female.rank());
        // Blood outranks lineage: half-male loses to full-female
        assert!(full_female.rank() < half_male.rank());
        assert!(half_male.rank() < longer.rank());

        assert_eq!(half_male.blood_score(), 1);
        assert_eq!(full_female.male_score(), 2);
    }

    #[test]
    fn test_length_only_ranking_ties() {
        use Direction::{ToChild, ToParent};

        let via_father = path(vec![
            step("P", ToParent, BloodWeight::Full, Lineage::Male),
            step("S", ToChild, BloodWeight::Full, Lineage::Male),
        ]);
        let via_mother = path(vec![
            step("M", ToParent, BloodWeight::Half, Lineage::Female),
            step("S", ToChild, BloodWeight::Half, Lineage::Female),
        ]);

        assert_eq!(
            Ranking::LengthOnly.key(&via_father),
            Ranking::LengthOnly.key(&via_mother)
        );
        assert_ne!(
            Ranking::BloodThenMale.key(&via_father),
            Ranking::BloodThenMale.key(&via_mother)
        );
    }

    #[test]
    fn test_ranking_from_str() {
        assert_eq!("blood-then-male".parse::<Ranking>().unwrap(), Ranking::BloodThenMale);
        assert_eq!("Length-Only".parse::<Ranking>().unwrap(), Ranking::LengthOnly);
        let err = "alphabetical".parse::<Ranking>().unwrap_err();
        assert!(err.to_string().contains("alphabetical"));
    }

    #[test]
    fn test_step_serializes_kebab_case() {
        let s = step("@I3@", Direction::ToParent, BloodWeight::Half, Lineage::Female);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["individual"], "@I3@");
        assert_eq!(json["direction"], "to-parent");
        assert_eq!(json["blood"], "half");
        assert_eq!(json["lineage"], "female");
    }
}
