//! Breadth-first search for relationship paths over the parent/child graph.

use std::collections::{HashMap, VecDeque};

use super::path::{BloodWeight, Direction, Lineage, PathStep, Ranking, RelationshipPath};
use crate::gedcom::{FamilyGraph, Xref};

/// Search depth used when the caller has no preference
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Finds and ranks relationship paths between two individuals.
///
/// Holds only a reference to the graph; every query allocates its own
/// queue and visited map.
pub struct PathFinder<'g, G: FamilyGraph + ?Sized> {
    graph: &'g G,
    ranking: Ranking,
}

impl<G: FamilyGraph + ?Sized> Clone for PathFinder<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: FamilyGraph + ?Sized> Copy for PathFinder<'_, G> {}

impl<'g, G: FamilyGraph + ?Sized> PathFinder<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            ranking: Ranking::default(),
        }
    }

    /// Use a different tie-break between equal-length paths
    pub fn with_ranking(mut self, ranking: Ranking) -> Self {
        self.ranking = ranking;
        self
    }

    /// All paths BFS discovers from `start_id` to `end_id` within `max_depth`
    /// steps, in discovery order.
    ///
    /// A node may be re-enqueued at a depth equal to the best depth seen so
    /// far, so parallel shortest paths (e.g. through both parents) are all
    /// reported. Unknown ids and unreachable pairs both yield an empty list.
    pub fn find_relationship_paths(
        &self,
        start_id: &str,
        end_id: &str,
        max_depth: usize,
    ) -> Vec<RelationshipPath> {
        let (start, end) = match (self.graph.resolve(start_id), self.graph.resolve(end_id)) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                log::debug!("Path search skipped: {} or {} not found", start_id, end_id);
                return Vec::new();
            }
        };

        if start == end {
            return vec![RelationshipPath::empty(start)];
        }

        let mut paths = Vec::new();
        let mut queue: VecDeque<(Xref, Vec<PathStep>)> = VecDeque::new();
        let mut visited: HashMap<Xref, usize> = HashMap::new();
        let mut min_length: Option<usize> = None;
        let mut expanded = 0usize;

        visited.insert(start.clone(), 0);
        queue.push_back((start.clone(), Vec::new()));

        while let Some((current, path)) = queue.pop_front() {
            let depth = path.len();

            if min_length.is_some_and(|min| depth > min) {
                continue;
            }
            if depth >= max_depth {
                continue;
            }
            expanded += 1;

            for (neighbor, step) in self.neighbors(&current) {
                if neighbor == end {
                    let mut steps = path.clone();
                    steps.push(step);
                    min_length.get_or_insert(steps.len());
                    paths.push(RelationshipPath {
                        start: start.clone(),
                        end: end.clone(),
                        steps,
                    });
                    continue;
                }

                let next_depth = depth + 1;
                if visited.get(&neighbor).map_or(true, |&seen| seen >= next_depth) {
                    visited.insert(neighbor.clone(), next_depth);
                    let mut steps = path.clone();
                    steps.push(step);
                    queue.push_back((neighbor, steps));
                }
            }
        }

        log::debug!(
            "Path search {} -> {}: {} path(s), {} node(s) expanded",
            start,
            end,
            paths.len(),
            expanded
        );

        paths
    }

    /// The best-ranked paths. Every returned path has the same rank; true
    /// ties are all kept, in discovery order.
    pub fn get_shortest_paths(
        &self,
        start_id: &str,
        end_id: &str,
        max_depth: usize,
    ) -> Vec<RelationshipPath> {
        let mut paths = self.find_relationship_paths(start_id, end_id, max_depth);
        let ranking = self.ranking;

        // Stable: equal keys keep discovery order
        paths.sort_by_key(|p| ranking.key(p));

        if let Some(best) = paths.first().map(|p| ranking.key(p)) {
            paths.retain(|p| ranking.key(p) == best);
        }
        paths
    }

    /// Father, mother, then children, each tagged with the step that reaches it.
    /// Steps up to a parent always count as full blood; only steps down to a
    /// child are weighed.
    fn neighbors(&self, individual: &Xref) -> Vec<(Xref, PathStep)> {
        let mut neighbors = Vec::new();
        let (father, mother) = self.graph.parents(individual);

        for (parent, lineage) in [(father, Lineage::Male), (mother, Lineage::Female)] {
            if let Some(parent) = parent {
                let step = PathStep {
                    individual: parent.clone(),
                    direction: Direction::ToParent,
                    blood: BloodWeight::Full,
                    lineage,
                };
                neighbors.push((parent, step));
            }
        }

        let lineage = if self.graph.sex(individual).is_male() {
            Lineage::Male
        } else {
            Lineage::Female
        };
        for child in self.graph.children(individual) {
            let step = PathStep {
                individual: child.clone(),
                direction: Direction::ToChild,
                blood: self.blood_weight(individual, &child),
                lineage,
            };
            neighbors.push((child, step));
        }

        neighbors
    }

    /// Full when the child's recorded father and mother are exactly the
    /// husband and wife of one of `parent`'s spouse families.
    fn blood_weight(&self, parent: &Xref, child: &Xref) -> BloodWeight {
        let (father, mother) = match self.graph.parents(child) {
            (Some(father), Some(mother)) => (father, mother),
            _ => return BloodWeight::Half,
        };

        let shared = self
            .graph
            .spouse_families(parent)
            .into_iter()
            .any(|family| family.has_parents(&father, &mother));

        if shared {
            BloodWeight::Full
        } else {
            BloodWeight::Half
        }
    }
}
