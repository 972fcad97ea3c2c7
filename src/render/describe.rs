//! Plain-language names for relationship paths.

use crate::gedcom::FamilyGraph;
use crate::graph::{Direction, RelationshipPath};

/// Describe how `path.start` relates to `path.end`.
///
/// Paths that climb to a common ancestor and come back down get kinship
/// terms (siblings, aunt/uncle, n-th cousins k times removed). Paths joined
/// through a common descendant, or that zigzag, get a generic description.
/// Siblings are checked against `graph` to tell half from full.
pub fn describe_relationship<G: FamilyGraph + ?Sized>(
    graph: &G,
    path: &RelationshipPath,
) -> String {
    if path.steps.is_empty() {
        return "Same individual".to_string();
    }

    let len = path.length();
    let up = leading(path, Direction::ToParent);
    let down = path.steps[up..]
        .iter()
        .take_while(|s| s.direction == Direction::ToChild)
        .count();

    if up + down == len {
        if (up, down) == (1, 1) {
            return sibling_term(graph, path).to_string();
        }
        return kinship(up, down);
    }

    let first_down = leading(path, Direction::ToChild);
    let then_up = path.steps[first_down..]
        .iter()
        .take_while(|s| s.direction == Direction::ToParent)
        .count();
    if first_down + then_up == len {
        return format!("Linked through a common descendant ({} steps)", len);
    }

    format!(
        "Collateral relatives ({} steps, generation distance {})",
        len,
        path.generation_distance()
    )
}

fn leading(path: &RelationshipPath, direction: Direction) -> usize {
    path.steps
        .iter()
        .take_while(|s| s.direction == direction)
        .count()
}

fn sibling_term<G: FamilyGraph + ?Sized>(graph: &G, path: &RelationshipPath) -> &'static str {
    if graph.is_full_sibling(&path.start, &path.end) {
        "Siblings"
    } else if graph.is_half_sibling(&path.start, &path.end) {
        "Half-siblings"
    } else {
        "Siblings"
    }
}

/// `up` steps to the common ancestor, then `down` steps to the end
fn kinship(up: usize, down: usize) -> String {
    match (up, down) {
        (0, 1) => "Parent-Child".to_string(),
        (0, 2) => "Grandparent-Grandchild".to_string(),
        (0, n) => format!("Direct ancestor ({} generations)", n),
        (1, 0) => "Child-Parent".to_string(),
        (2, 0) => "Grandchild-Grandparent".to_string(),
        (n, 0) => format!("Direct descendant ({} generations)", n),
        (1, n) => {
            let greats = "Great-".repeat(n - 2);
            format!("{g}Aunt/Uncle-{g}Niece/Nephew", g = greats)
        }
        (n, 1) => {
            let greats = "Great-".repeat(n - 2);
            format!("{g}Niece/Nephew-{g}Aunt/Uncle", g = greats)
        }
        (up, down) => {
            let degree = up.min(down) - 1;
            let cousins = format!("{} cousins", ordinal(degree));
            match up.abs_diff(down) {
                0 => cousins,
                1 => format!("{} once removed", cousins),
                2 => format!("{} twice removed", cousins),
                n => format!("{} {} times removed", cousins, n),
            }
        }
    }
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
