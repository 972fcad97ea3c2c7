//! Relationship engine: path search, generation walks and chart layouts.
//!
//! Everything here works over a borrowed [`FamilyGraph`](crate::gedcom::FamilyGraph)
//! and never mutates it. Unknown ids and unreachable pairs come back as
//! empty results; turning those into errors is left to callers.

mod layout;
mod path;
mod pathfinder;
mod walker;

pub use layout::{
    ChartKind, ChartLayoutBuilder, CoParent, GenerationMap, RelationshipLayout, SplitMode,
};
pub use path::{BloodWeight, Direction, Lineage, PathRank, PathStep, Ranking, RelationshipPath};
pub use pathfinder::{PathFinder, DEFAULT_MAX_DEPTH};
pub use walker::{GenerationWalker, WalkDirection};
