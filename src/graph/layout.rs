//! Chart layouts: generation bands for pedigree, hourglass and bowtie charts,
//! and the co-parent pairing used by relationship charts.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use super::path::{Direction, RelationshipPath};
use super::walker::{GenerationWalker, WalkDirection};
use crate::error::{GedgraphError, Result};
use crate::gedcom::{FamilyGraph, Xref};

/// Chart variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Pedigree,
    Hourglass,
    Bowtie,
    Relationship,
}

impl FromStr for ChartKind {
    type Err = GedgraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pedigree" => Ok(ChartKind::Pedigree),
            "hourglass" => Ok(ChartKind::Hourglass),
            "bowtie" => Ok(ChartKind::Bowtie),
            "relationship" => Ok(ChartKind::Relationship),
            _ => Err(GedgraphError::InvalidArgument(format!(
                "unknown chart variant: {}",
                s
            ))),
        }
    }
}

impl ChartKind {
    /// Capitalized name used in chart headers and summaries
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Pedigree => "Pedigree",
            ChartKind::Hourglass => "Hourglass",
            ChartKind::Bowtie => "Bowtie",
            ChartKind::Relationship => "Relationship",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Pedigree => "pedigree",
            ChartKind::Hourglass => "hourglass",
            ChartKind::Bowtie => "bowtie",
            ChartKind::Relationship => "relationship",
        };
        f.write_str(name)
    }
}

/// What goes on the far side of the root in hourglass and bowtie charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitMode {
    /// Father's ancestors on one side, mother's on the other
    AncestorSplit,
    /// Ancestors on one side, descendants on the other
    #[default]
    Descendants,
}

impl FromStr for SplitMode {
    type Err = GedgraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ancestor-split" => Ok(SplitMode::AncestorSplit),
            "descendants" => Ok(SplitMode::Descendants),
            _ => Err(GedgraphError::InvalidArgument(format!(
                "unknown split mode: {} (expected ancestor-split or descendants)",
                s
            ))),
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitMode::AncestorSplit => f.write_str("ancestor-split"),
            SplitMode::Descendants => f.write_str("descendants"),
        }
    }
}

/// Individuals grouped by signed generation offset from a chart root.
///
/// Offset 0 holds exactly the root. Each individual is placed once; later
/// placements of an already-placed individual are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationMap {
    root: Xref,
    bands: BTreeMap<i32, Vec<Xref>>,
    #[serde(skip)]
    placed: HashMap<Xref, i32>,
}

impl GenerationMap {
    pub fn new(root: Xref) -> Self {
        let mut bands = BTreeMap::new();
        bands.insert(0, vec![root.clone()]);
        let mut placed = HashMap::new();
        placed.insert(root.clone(), 0);
        Self { root, bands, placed }
    }

    /// Place `individual` at `generation`; false if it was already placed.
    pub fn place(&mut self, individual: Xref, generation: i32) -> bool {
        if self.placed.contains_key(&individual) {
            return false;
        }
        self.placed.insert(individual.clone(), generation);
        self.bands.entry(generation).or_default().push(individual);
        true
    }

    pub fn root(&self) -> &Xref {
        &self.root
    }

    pub fn generation_of(&self, individual: &Xref) -> Option<i32> {
        self.placed.get(individual).copied()
    }

    /// Members of one band, in discovery order
    pub fn band(&self, generation: i32) -> &[Xref] {
        self.bands.get(&generation).map_or(&[], Vec::as_slice)
    }

    /// Bands from the lowest offset to the highest
    pub fn bands(&self) -> impl Iterator<Item = (i32, &[Xref])> + '_ {
        self.bands.iter().map(|(g, members)| (*g, members.as_slice()))
    }

    /// Everyone, band by band
    pub fn individuals(&self) -> impl Iterator<Item = &Xref> + '_ {
        self.bands.values().flatten()
    }

    /// Number of charted individuals, root included
    pub fn individual_count(&self) -> usize {
        self.placed.len()
    }

    pub fn min_generation(&self) -> i32 {
        self.bands.keys().next().copied().unwrap_or(0)
    }

    pub fn max_generation(&self) -> i32 {
        self.bands.keys().next_back().copied().unwrap_or(0)
    }
}

/// A path member's partner in the family that links it to the next member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoParent {
    /// The path member (always the parent side of a path edge)
    pub anchor: Xref,
    pub spouse: Xref,
    /// The couple's shared family records a marriage
    pub married: bool,
}

/// A ranked relationship path plus the partners drawn beside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipLayout {
    pub path: RelationshipPath,
    /// Start, each step's individual, in path order
    pub members: Vec<Xref>,
    pub co_parents: Vec<CoParent>,
}

impl RelationshipLayout {
    pub fn co_parent_of(&self, anchor: &Xref) -> Option<&CoParent> {
        self.co_parents.iter().find(|c| &c.anchor == anchor)
    }
}

/// Builds chart layouts on top of [`GenerationWalker`].
pub struct ChartLayoutBuilder<'g, G: FamilyGraph + ?Sized> {
    graph: &'g G,
    walker: GenerationWalker<'g, G>,
}

impl<G: FamilyGraph + ?Sized> Clone for ChartLayoutBuilder<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: FamilyGraph + ?Sized> Copy for ChartLayoutBuilder<'_, G> {}

impl<'g, G: FamilyGraph + ?Sized> ChartLayoutBuilder<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            walker: GenerationWalker::new(graph),
        }
    }

    /// Ancestors of the root at positive offsets
    pub fn pedigree(&self, root_id: &str, generations: usize) -> Option<GenerationMap> {
        let root = self.graph.resolve(root_id)?;
        let mut map = GenerationMap::new(root.clone());
        self.place_walk(&mut map, &root, generations, WalkDirection::Ancestors, |g| g);
        Some(map)
    }

    /// Vertical split chart. In `AncestorSplit` mode the father's line sits
    /// above the root and the mother's below.
    pub fn hourglass(
        &self,
        root_id: &str,
        generations: usize,
        split: SplitMode,
    ) -> Option<GenerationMap> {
        self.split_chart(root_id, generations, split, 1)
    }

    /// Horizontal split chart: as [`Self::hourglass`] with the two parental
    /// lines swapped in sign.
    pub fn bowtie(
        &self,
        root_id: &str,
        generations: usize,
        split: SplitMode,
    ) -> Option<GenerationMap> {
        self.split_chart(root_id, generations, split, -1)
    }

    /// Dispatch on a chart kind. Relationship charts have no generation
    /// bands and are rejected.
    pub fn build_banded(
        &self,
        kind: ChartKind,
        root_id: &str,
        generations: usize,
        split: SplitMode,
    ) -> Result<Option<GenerationMap>> {
        match kind {
            ChartKind::Pedigree => Ok(self.pedigree(root_id, generations)),
            ChartKind::Hourglass => Ok(self.hourglass(root_id, generations, split)),
            ChartKind::Bowtie => Ok(self.bowtie(root_id, generations, split)),
            ChartKind::Relationship => Err(GedgraphError::InvalidArgument(
                "relationship charts are not generation-banded; build them from a path".to_string(),
            )),
        }
    }

    /// [`Self::build_banded`] with the variant given by name
    pub fn build_named(
        &self,
        variant: &str,
        root_id: &str,
        generations: usize,
        split: SplitMode,
    ) -> Result<Option<GenerationMap>> {
        self.build_banded(variant.parse()?, root_id, generations, split)
    }

    /// Pair each parent on the path with the child's other parent.
    ///
    /// Every path edge has a parent side and a child side whichever way it
    /// is walked; the co-parent is anchored on the parent. Co-parents who
    /// are on the path themselves are left out, and each anchor and spouse
    /// is paired once.
    pub fn relationship(&self, path: &RelationshipPath) -> RelationshipLayout {
        let members = path.members();
        let mut co_parents: Vec<CoParent> = Vec::new();

        for (current, step) in members.iter().zip(&path.steps) {
            let (parent, child) = match step.direction {
                Direction::ToParent => (&step.individual, current),
                Direction::ToChild => (current, &step.individual),
            };

            if co_parents.iter().any(|c| &c.anchor == parent) {
                continue;
            }

            if let Some((spouse, married)) = self.graph.co_parent(parent, child) {
                let taken = members.contains(&spouse)
                    || co_parents.iter().any(|c| c.spouse == spouse);
                if !taken {
                    co_parents.push(CoParent {
                        anchor: parent.clone(),
                        spouse,
                        married,
                    });
                }
            }
        }

        RelationshipLayout {
            path: path.clone(),
            members,
            co_parents,
        }
    }

    /// `sign` is +1 for hourglass, -1 for bowtie; it only affects the
    /// ancestor-split placement.
    fn split_chart(
        &self,
        root_id: &str,
        generations: usize,
        split: SplitMode,
        sign: i32,
    ) -> Option<GenerationMap> {
        let root = self.graph.resolve(root_id)?;
        let mut map = GenerationMap::new(root.clone());

        match split {
            SplitMode::Descendants => {
                self.place_walk(&mut map, &root, generations, WalkDirection::Ancestors, |g| g);
                self.place_walk(&mut map, &root, generations, WalkDirection::Descendants, |g| -g);
            }
            SplitMode::AncestorSplit => {
                if generations == 0 {
                    return Some(map);
                }
                // Parents sit one generation out, so their walks get one less
                let (father, mother) = self.graph.parents(&root);
                let depth = generations - 1;
                if let Some(father) = father {
                    self.place_walk(&mut map, &father, depth, WalkDirection::Ancestors, |g| {
                        sign * (g + 1)
                    });
                }
                if let Some(mother) = mother {
                    self.place_walk(&mut map, &mother, depth, WalkDirection::Ancestors, |g| {
                        -sign * (g + 1)
                    });
                }
            }
        }

        Some(map)
    }

    fn place_walk(
        &self,
        map: &mut GenerationMap,
        from: &Xref,
        generations: usize,
        direction: WalkDirection,
        offset: impl Fn(i32) -> i32,
    ) {
        for (individual, generation) in self.walker.walk(from.as_str(), generations, direction) {
            let generation = i32::try_from(generation).unwrap_or(i32::MAX);
            map.place(individual, offset(generation));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{PathFinder, DEFAULT_MAX_DEPTH};
    use crate::test_support::sample_store;

    fn band(map: &GenerationMap, generation: i32) -> Vec<&str> {
        map.band(generation).iter().map(Xref::as_str).collect()
    }

    #[test]
    fn test_chart_kind_from_str() {
        assert_eq!("pedigree".parse::<ChartKind>().unwrap(), ChartKind::Pedigree);
        assert_eq!(ChartKind::Pedigree.title(), "Pedigree");
        assert_eq!("Bowtie".parse::<ChartKind>().unwrap(), ChartKind::Bowtie);
        let err = "fan".parse::<ChartKind>().unwrap_err();
        assert!(matches!(err, GedgraphError::InvalidArgument(_)));
        assert!(err.to_string().contains("fan"));
    }

    #[test]
    fn test_split_mode_from_str() {
        assert_eq!("ancestor-split".parse::<SplitMode>().unwrap(), SplitMode::AncestorSplit);
        assert_eq!("descendants".parse::<SplitMode>().unwrap(), SplitMode::Descendants);
        assert!("sideways".parse::<SplitMode>().is_err());
        assert_eq!(SplitMode::AncestorSplit.to_string(), "ancestor-split");
    }

    #[test]
    fn test_generation_map_places_once() {
        let mut map = GenerationMap::new(Xref::new("R"));
        assert!(map.place(Xref::new("A"), 1));
        assert!(!map.place(Xref::new("A"), -1));
        assert!(!map.place(Xref::new("R"), 2));
        assert_eq!(map.individual_count(), 2);
        assert_eq!(map.generation_of(&Xref::new("A")), Some(1));
        assert_eq!(band(&map, 0), vec!["@R@"]);
        assert!(map.band(5).is_empty());
    }

    #[test]
    fn test_pedigree_layout() {
        let store = sample_store();
        let map = ChartLayoutBuilder::new(&store).pedigree("I7", 3).unwrap();

        assert_eq!(band(&map, 0), vec!["@I7@"]);
        assert_eq!(band(&map, 1), vec!["@I5@", "@I6@"]);
        assert_eq!(band(&map, 2), vec!["@I3@", "@I4@"]);
        assert_eq!(band(&map, 3), vec!["@I1@", "@I2@"]);
        assert_eq!(map.min_generation(), 0);
        assert_eq!(map.max_generation(), 3);
    }

    #[test]
    fn test_pedigree_unknown_root() {
        let store = sample_store();
        assert!(ChartLayoutBuilder::new(&store).pedigree("I999", 3).is_none());
    }

    #[test]
    fn test_hourglass_descendants() {
        let store = sample_store();
        let map = ChartLayoutBuilder::new(&store)
            .hourglass("I3", 2, SplitMode::Descendants)
            .unwrap();

        assert_eq!(band(&map, 0), vec!["@I3@"]);
        assert_eq!(band(&map, 1), vec!["@I1@", "@I2@"]);
        assert_eq!(band(&map, -1), vec!["@I5@"]);
        assert_eq!(band(&map, -2), vec!["@I7@", "@I8@"]);
        assert_eq!(map.min_generation(), -2);
    }

    #[test]
    fn test_hourglass_ancestor_split() {
        let store = sample_store();
        let map = ChartLayoutBuilder::new(&store)
            .hourglass("I7", 3, SplitMode::AncestorSplit)
            .unwrap();

        assert_eq!(band(&map, 0), vec!["@I7@"]);
        assert_eq!(band(&map, 1), vec!["@I5@"]);
        assert_eq!(band(&map, 2), vec!["@I3@", "@I4@"]);
        assert_eq!(band(&map, 3), vec!["@I1@", "@I2@"]);
        assert_eq!(band(&map, -1), vec!["@I6@"]);
        assert_eq!(map.max_generation(), 3);
    }

    #[test]
    fn test_bowtie_ancestor_split_mirrors_signs() {
        let store = sample_store();
        let map = ChartLayoutBuilder::new(&store)
            .bowtie("I7", 3, SplitMode::AncestorSplit)
            .unwrap();

        assert_eq!(map.generation_of(&Xref::new("I5")), Some(-1));
        assert_eq!(map.generation_of(&Xref::new("I6")), Some(1));
        assert_eq!(map.generation_of(&Xref::new("I1")), Some(-3));
    }

    #[test]
    fn test_ancestor_split_zero_generations() {
        let store = sample_store();
        let map = ChartLayoutBuilder::new(&store)
            .hourglass("I7", 0, SplitMode::AncestorSplit)
            .unwrap();
        assert_eq!(map.individual_count(), 1);
    }

    #[test]
    fn test_build_named() {
        let store = sample_store();
        let builder = ChartLayoutBuilder::new(&store);

        let map = builder
            .build_named("pedigree", "I7", 1, SplitMode::default())
            .unwrap()
            .unwrap();
        assert_eq!(map.individual_count(), 3);

        let err = builder
            .build_named("fan", "I7", 1, SplitMode::default())
            .unwrap_err();
        assert!(err.to_string().contains("fan"));

        assert!(builder
            .build_named("relationship", "I7", 1, SplitMode::default())
            .is_err());
        assert!(builder
            .build_named("pedigree", "I999", 1, SplitMode::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_relationship_layout_ancestor_line() {
        let store = sample_store();
        let path = PathFinder::new(&store)
            .get_shortest_paths("I7", "I1", DEFAULT_MAX_DEPTH)
            .remove(0);
        let layout = ChartLayoutBuilder::new(&store).relationship(&path);

        let members: Vec<_> = layout.members.iter().map(Xref::as_str).collect();
        assert_eq!(members, vec!["@I7@", "@I5@", "@I3@", "@I1@"]);

        let pairs: Vec<_> = layout
            .co_parents
            .iter()
            .map(|c| (c.anchor.as_str(), c.spouse.as_str(), c.married))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("@I5@", "@I6@", false),
                ("@I3@", "@I4@", true),
                ("@I1@", "@I2@", true),
            ]
        );
    }

    #[test]
    fn test_relationship_layout_descendant_line() {
        let store = sample_store();
        let path = PathFinder::new(&store)
            .get_shortest_paths("I1", "I7", DEFAULT_MAX_DEPTH)
            .remove(0);
        let layout = ChartLayoutBuilder::new(&store).relationship(&path);

        assert_eq!(layout.co_parents.len(), 3);
        assert_eq!(layout.co_parent_of(&Xref::new("I1")).unwrap().spouse, Xref::new("I2"));
        assert!(layout.co_parent_of(&Xref::new("I7")).is_none());
    }

    #[test]
    fn test_relationship_layout_siblings_pair_parent_once() {
        let store = sample_store();
        let path = PathFinder::new(&store)
            .get_shortest_paths("I7", "I8", DEFAULT_MAX_DEPTH)
            .remove(0);
        let layout = ChartLayoutBuilder::new(&store).relationship(&path);

        assert_eq!(layout.co_parents.len(), 1);
        let co = &layout.co_parents[0];
        assert_eq!(co.anchor, Xref::new("I5"));
        assert_eq!(co.spouse, Xref::new("I6"));
        assert!(!co.married);
    }

    #[test]
    fn test_relationship_layout_same_individual() {
        let store = sample_store();
        let path = RelationshipPath::empty(Xref::new("I1"));
        let layout = ChartLayoutBuilder::new(&store).relationship(&path);
        assert_eq!(layout.members, vec![Xref::new("I1")]);
        assert!(layout.co_parents.is_empty());
    }
}
