use std::collections::{HashSet, VecDeque};

use crate::gedcom::{FamilyGraph, Xref};

/// Which neighbors a generation walk follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkDirection {
    /// Father then mother
    Ancestors,
    /// Children in family order
    Descendants,
}

/// Breadth-first walk assigning each reached individual a generation number.
pub struct GenerationWalker<'g, G: FamilyGraph + ?Sized> {
    graph: &'g G,
}

impl<G: FamilyGraph + ?Sized> Clone for GenerationWalker<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: FamilyGraph + ?Sized> Copy for GenerationWalker<'_, G> {}

impl<'g, G: FamilyGraph + ?Sized> GenerationWalker<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    /// `(individual, generation)` pairs in BFS order, root first at 0.
    ///
    /// Each individual appears once, at the generation it was first reached.
    /// Individuals at `max_generations` are included but not expanded. An
    /// unknown root yields an empty list.
    pub fn walk(
        &self,
        individual_id: &str,
        max_generations: usize,
        direction: WalkDirection,
    ) -> Vec<(Xref, usize)> {
        let root = match self.graph.resolve(individual_id) {
            Some(root) => root,
            None => return Vec::new(),
        };

        let mut result = Vec::new();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        visited.insert(root.clone());
        queue.push_back((root, 0usize));

        while let Some((current, generation)) = queue.pop_front() {
            if generation < max_generations {
                for next in self.neighbors(&current, direction) {
                    if visited.insert(next.clone()) {
                        queue.push_back((next, generation + 1));
                    }
                }
            }
            result.push((current, generation));
        }

        log::debug!(
            "{:?} walk from {}: {} individual(s) within {} generation(s)",
            direction,
            individual_id,
            result.len(),
            max_generations
        );

        result
    }

    pub fn ancestors(&self, individual_id: &str, max_generations: usize) -> Vec<(Xref, usize)> {
        self.walk(individual_id, max_generations, WalkDirection::Ancestors)
    }

    pub fn descendants(&self, individual_id: &str, max_generations: usize) -> Vec<(Xref, usize)> {
        self.walk(individual_id, max_generations, WalkDirection::Descendants)
    }

    fn neighbors(&self, individual: &Xref, direction: WalkDirection) -> Vec<Xref> {
        match direction {
            WalkDirection::Ancestors => {
                let (father, mother) = self.graph.parents(individual);
                father.into_iter().chain(mother).collect()
            }
            WalkDirection::Descendants => self.graph.children(individual),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_store, store_from};

    fn ids(pairs: &[(Xref, usize)]) -> Vec<&str> {
        pairs.iter().map(|(x, _)| x.as_str()).collect()
    }

    #[test]
    fn test_ancestor_walk() {
        let store = sample_store();
        let walk = GenerationWalker::new(&store).ancestors("@I7@", 3);

        assert_eq!(
            ids(&walk),
            vec!["@I7@", "@I5@", "@I6@", "@I3@", "@I4@", "@I1@", "@I2@"]
        );
        assert_eq!(walk[0].1, 0);
        assert_eq!(walk[1].1, 1);
        assert_eq!(walk[3].1, 2);
        assert_eq!(walk[6].1, 3);
    }

    #[test]
    fn test_ancestor_walk_limited() {
        let store = sample_store();
        let walk = GenerationWalker::new(&store).ancestors("I7", 1);
        assert_eq!(ids(&walk), vec!["@I7@", "@I5@", "@I6@"]);
        assert!(walk.iter().all(|(_, g)| *g <= 1));
    }

    #[test]
    fn test_zero_generations_is_root_only() {
        let store = sample_store();
        let walk = GenerationWalker::new(&store).ancestors("I7", 0);
        assert_eq!(walk, vec![(Xref::new("I7"), 0)]);
    }

    #[test]
    fn test_descendant_walk() {
        let store = sample_store();
        let walk = GenerationWalker::new(&store).descendants("I1", 10);
        assert_eq!(ids(&walk), vec!["@I1@", "@I3@", "@I5@", "@I7@", "@I8@"]);
        assert_eq!(walk.last().unwrap().1, 3);
    }

    #[test]
    fn test_unknown_root() {
        let store = sample_store();
        assert!(GenerationWalker::new(&store).ancestors("@I999@", 4).is_empty());
    }

    #[test]
    fn test_individual_appears_once() {
        // Cousin marriage: X's parents share both grandparents
        let store = store_from(
            "0 @G1@ INDI\n1 SEX M\n1 FAMS @F1@\n\
             0 @G2@ INDI\n1 SEX F\n1 FAMS @F1@\n\
             0 @A@ INDI\n1 SEX M\n1 FAMC @F1@\n1 FAMS @F2@\n\
             0 @B@ INDI\n1 SEX F\n1 FAMC @F1@\n1 FAMS @F2@\n\
             0 @X@ INDI\n1 SEX M\n1 FAMC @F2@\n\
             0 @F1@ FAM\n1 HUSB @G1@\n1 WIFE @G2@\n1 CHIL @A@\n1 CHIL @B@\n\
             0 @F2@ FAM\n1 HUSB @A@\n1 WIFE @B@\n1 CHIL @X@\n",
        );
        let walk = GenerationWalker::new(&store).ancestors("X", 5);
        assert_eq!(ids(&walk), vec!["@X@", "@A@", "@B@", "@G1@", "@G2@"]);
    }

    #[test]
    fn test_cycle_terminates() {
        let store = store_from(
            "0 @A@ INDI\n1 FAMC @F2@\n1 FAMS @F1@\n\
             0 @B@ INDI\n1 FAMC @F1@\n1 FAMS @F2@\n\
             0 @F1@ FAM\n1 HUSB @A@\n1 CHIL @B@\n\
             0 @F2@ FAM\n1 HUSB @B@\n1 CHIL @A@\n",
        );
        let walk = GenerationWalker::new(&store).ancestors("A", 100);
        assert_eq!(ids(&walk), vec!["@A@", "@B@"]);
    }
}
