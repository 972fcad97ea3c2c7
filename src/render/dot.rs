//! GraphViz DOT output for banded and relationship charts.

use std::collections::HashSet;

use super::describe::describe_relationship;
use crate::config::StyleConfig;
use crate::error::{GedgraphError, Result};
use crate::gedcom::{FamilyGraph, Xref};
use crate::graph::{
    ChartKind, ChartLayoutBuilder, Direction, GenerationMap, RelationshipPath, SplitMode,
};

/// Renders charts for one loaded graph as DOT source text.
pub struct DotRenderer<'g, G: FamilyGraph + ?Sized> {
    graph: &'g G,
    style: StyleConfig,
}

impl<'g, G: FamilyGraph + ?Sized> DotRenderer<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            style: StyleConfig::default(),
        }
    }

    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Ancestors of the root, drawn bottom-up
    pub fn pedigree(&self, root_id: &str, generations: usize) -> Result<String> {
        self.banded(ChartKind::Pedigree, root_id, generations, SplitMode::default())
    }

    pub fn hourglass(&self, root_id: &str, generations: usize, split: SplitMode) -> Result<String> {
        self.banded(ChartKind::Hourglass, root_id, generations, split)
    }

    pub fn bowtie(&self, root_id: &str, generations: usize, split: SplitMode) -> Result<String> {
        self.banded(ChartKind::Bowtie, root_id, generations, split)
    }

    /// Lay out and render any generation-banded chart kind.
    pub fn banded(
        &self,
        kind: ChartKind,
        root_id: &str,
        generations: usize,
        split: SplitMode,
    ) -> Result<String> {
        let map = ChartLayoutBuilder::new(self.graph)
            .build_banded(kind, root_id, generations, split)?
            .ok_or_else(|| GedgraphError::IndividualNotFound(root_id.to_string()))?;

        Ok(self.render_map(kind, &map, generations, split))
    }

    /// Render a layout that was already built for `kind`. `generations` and
    /// `split` only feed the header comments.
    pub fn render_map(
        &self,
        kind: ChartKind,
        map: &GenerationMap,
        generations: usize,
        split: SplitMode,
    ) -> String {
        let title = kind.title();
        let root = map.root();

        let mut lines = self.open_graph(title, rankdir(kind));
        lines.push(format!(
            "  // {} chart for {}",
            title,
            self.graph.display_name(root)
        ));
        lines.push(format!("  // Root: {}", root));
        lines.push(format!("  // Generations: {}", generations));
        if kind != ChartKind::Pedigree {
            lines.push(format!("  // Split: {}", split));
        }
        lines.push(String::new());

        for individual in map.individuals() {
            lines.push(format!(
                "  {} [label=\"{}\"];",
                escape_id(individual),
                self.label(individual)
            ));
        }

        if kind != ChartKind::Pedigree {
            lines.push(String::new());
            for (_, band) in map.bands() {
                if band.len() > 1 {
                    lines.push(rank_same(band));
                }
            }
        }

        lines.push(String::new());
        lines.extend(self.parent_edges(map));

        lines.push("}".to_string());
        lines.join("\n")
    }

    /// Render the first (best) path of `paths`; the rest only count toward
    /// the "equally short" note.
    pub fn relationship(&self, paths: &[RelationshipPath]) -> Result<String> {
        let path = paths.first().ok_or_else(|| {
            GedgraphError::InvalidArgument("no relationship paths to render".to_string())
        })?;

        for id in [&path.start, &path.end] {
            if self.graph.resolve(id.as_str()).is_none() {
                return Err(GedgraphError::IndividualNotFound(id.to_string()));
            }
        }

        let layout = ChartLayoutBuilder::new(self.graph).relationship(path);
        let start_name = self.graph.display_name(&path.start);
        let end_name = self.graph.display_name(&path.end);

        let kind = ChartKind::Relationship;
        let mut lines = self.open_graph(kind.title(), rankdir(kind));
        lines.push("  // Relationship chart".to_string());
        lines.push(format!("  // {} to {}", start_name, end_name));
        lines.push(format!("  // Start: {} ({})", start_name, path.start));
        lines.push(format!("  // End: {} ({})", end_name, path.end));
        lines.push(format!(
            "  // Relationship: {}",
            describe_relationship(self.graph, path)
        ));
        lines.push(format!("  // Generation distance: {}", path.generation_distance()));
        lines.push(format!("  // Path length: {} steps", path.length()));
        lines.push(String::new());

        if paths.len() > 1 {
            lines.push(format!("  // Note: {} equally short paths found", paths.len()));
            lines.push(String::new());
        }

        let mut drawn = HashSet::new();
        for member in &layout.members {
            if !drawn.insert(member) {
                continue;
            }

            let fill = if *member == path.start {
                &self.style.start_fill
            } else if *member == path.end {
                &self.style.end_fill
            } else {
                &self.style.path_fill
            };
            lines.push(self.filled_node(member, fill));

            if let Some(co) = layout.co_parent_of(member) {
                lines.push(self.filled_node(&co.spouse, &self.style.spouse_fill));
                lines.push(format!(
                    "  {{rank=same; {}; {};}}",
                    escape_id(&co.anchor),
                    escape_id(&co.spouse)
                ));
            }
        }

        lines.push(String::new());
        for co in &layout.co_parents {
            let style = if co.married { "solid" } else { "dashed" };
            lines.push(format!(
                "  {} -> {} [dir=none, style={}, constraint=false];",
                escape_id(&co.anchor),
                escape_id(&co.spouse),
                style
            ));
        }

        lines.push(String::new());
        for (current, step) in layout.members.iter().zip(&path.steps) {
            let (parent, child) = match step.direction {
                Direction::ToParent => (&step.individual, current),
                Direction::ToChild => (current, &step.individual),
            };
            lines.push(format!("  {} -> {};", escape_id(parent), escape_id(child)));
        }

        lines.push("}".to_string());
        Ok(lines.join("\n"))
    }

    fn open_graph(&self, title: &str, rankdir: &str) -> Vec<String> {
        vec![
            format!("digraph {} {{", title),
            format!("  rankdir={};", rankdir),
            format!(
                "  node [shape=box, style=\"rounded,filled\", fillcolor=\"{}\"];",
                self.style.node_fill
            ),
            String::new(),
        ]
    }

    fn filled_node(&self, individual: &Xref, fill: &str) -> String {
        format!(
            "  {} [label=\"{}\", fillcolor=\"{}\"];",
            escape_id(individual),
            self.label(individual),
            fill
        )
    }

    /// Name, plus `(birth - death)` when either year is known
    fn label(&self, individual: &Xref) -> String {
        let name = escape_label(&self.graph.display_name(individual));
        let birth = self.graph.birth_year(individual);
        let death = self.graph.death_year(individual);

        if birth.is_none() && death.is_none() {
            return name;
        }
        format!(
            "{}\\n({} - {})",
            name,
            escape_label(birth.as_deref().unwrap_or("?")),
            escape_label(death.as_deref().unwrap_or(""))
        )
    }

    /// Parent/child edges between charted individuals, father first. Edges
    /// always run from the higher band to the lower one so the rank order
    /// follows generation offsets; `dir=back` keeps the arrow on the child.
    fn parent_edges(&self, map: &GenerationMap) -> Vec<String> {
        let mut edges = Vec::new();

        for child in map.individuals() {
            let child_gen = map.generation_of(child).unwrap_or(0);
            let (father, mother) = self.graph.parents(child);

            for parent in father.iter().chain(mother.iter()) {
                let Some(parent_gen) = map.generation_of(parent) else {
                    continue;
                };
                if parent_gen > child_gen {
                    edges.push(format!("  {} -> {};", escape_id(parent), escape_id(child)));
                } else {
                    edges.push(format!(
                        "  {} -> {} [dir=back];",
                        escape_id(child),
                        escape_id(parent)
                    ));
                }
            }
        }

        edges
    }
}

fn rankdir(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Pedigree => "BT",
        ChartKind::Hourglass | ChartKind::Relationship => "TB",
        ChartKind::Bowtie => "LR",
    }
}

fn rank_same(band: &[Xref]) -> String {
    let ids: Vec<String> = band.iter().map(|x| format!("{};", escape_id(x))).collect();
    format!("  {{rank=same; {}}}", ids.join(" "))
}

/// DOT node id for an individual: `@` delimiters dropped and `-` replaced by
/// `_`. Ids that still are not bare DOT identifiers (leading digit, other
/// punctuation) are emitted as quoted strings of the raw token.
pub fn escape_id(xref: &Xref) -> String {
    let id = xref.token().replace('-', "_");
    let bare = id.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if bare {
        id
    } else {
        format!("\"{}\"", escape_label(xref.token()))
    }
}

fn escape_label(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
