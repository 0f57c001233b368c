//! In-memory evolution tree and the navigation helpers over it.
//!
//! Traversals use an explicit stack so malformed, very deep chains cannot
//! overflow the call stack.

use crate::api::models::{resource_id, ChainLink, EvolutionDetail, NamedResource};
use crate::models::pad_species_id;

/// Trigger recorded for an edge the upstream gives no condition for.
pub const UNKNOWN_TRIGGER: &str = "unknown";

/// The only trigger that carries a minimum level.
pub const LEVEL_UP_TRIGGER: &str = "level-up";

/// One stage of an evolution line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionNode {
    pub species_name: String,
    /// Upstream locator of the species, used to recover its national number.
    pub species_url: String,
    pub children: Vec<EvolutionEdge>,
}

/// Transition from a node into `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionEdge {
    pub target: EvolutionNode,
    pub trigger: String,
    pub min_level: Option<u8>,
}

impl EvolutionNode {
    pub fn leaf(species: &NamedResource) -> Self {
        Self {
            species_name: species.name.clone(),
            species_url: species.url.clone(),
            children: Vec::new(),
        }
    }

    /// Convert the upstream chain document into a tree.
    ///
    /// Recursion here is bounded by serde_json's nesting limit on the input.
    pub fn from_link(link: &ChainLink) -> Self {
        let children = link
            .evolves_to
            .iter()
            .map(|next| {
                let (trigger, min_level) = transition_of(&next.evolution_details);
                EvolutionEdge {
                    target: EvolutionNode::from_link(next),
                    trigger,
                    min_level,
                }
            })
            .collect();

        Self {
            species_name: link.species.name.clone(),
            species_url: link.species.url.clone(),
            children,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }

    /// Padded national number of this stage, or its raw name when the
    /// locator carries no number.
    pub fn species_id(&self) -> String {
        resource_id(&self.species_url)
            .map(pad_species_id)
            .unwrap_or_else(|| self.species_name.clone())
    }
}

/// Trigger and minimum level of a transition.
///
/// Only the first listed condition is kept when the upstream offers several
/// alternatives for the same target; downstream data depends on that.
fn transition_of(details: &[EvolutionDetail]) -> (String, Option<u8>) {
    let Some(detail) = details.first() else {
        return (UNKNOWN_TRIGGER.to_string(), None);
    };

    let trigger = detail
        .trigger
        .as_ref()
        .map(|t| t.name.clone())
        .unwrap_or_else(|| UNKNOWN_TRIGGER.to_string());

    let min_level = if trigger == LEVEL_UP_TRIGGER {
        detail.min_level
    } else {
        None
    };

    (trigger, min_level)
}

/// Depth-first search for the stage named `species_name`, compared case-insensitively.
/// Returns the first match in pre-order.
pub fn find_node<'a>(tree: &'a EvolutionNode, species_name: &str) -> Option<&'a EvolutionNode> {
    let mut stack = vec![tree];

    while let Some(node) = stack.pop() {
        if node.species_name.eq_ignore_ascii_case(species_name) {
            return Some(node);
        }
        // Reverse so siblings are visited left to right.
        stack.extend(node.children.iter().rev().map(|edge| &edge.target));
    }

    None
}

/// Number of stages on the longest path from the root. A lone node has depth 1.
/// Branches do not add up; the deepest one wins.
pub fn depth(tree: &EvolutionNode) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(tree, 1usize)];

    while let Some((node, level)) = stack.pop() {
        deepest = deepest.max(level);
        stack.extend(node.children.iter().map(|edge| (&edge.target, level + 1)));
    }

    deepest
}

/// Outgoing evolutions of `node`.
pub fn edges_of(node: &EvolutionNode) -> &[EvolutionEdge] {
    &node.children
}
