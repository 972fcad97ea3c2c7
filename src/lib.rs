pub mod config;
pub mod error;
pub mod gedcom;
pub mod graph;
pub mod render;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::{GedgraphError, Result};
pub use gedcom::{FamilyGraph, GedcomStore, Xref};
pub use graph::{
    ChartKind, ChartLayoutBuilder, GenerationMap, GenerationWalker, PathFinder, RelationshipPath,
    SplitMode,
};
pub use render::DotRenderer;
