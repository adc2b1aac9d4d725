//! Orders action blocks into the sequence that runs when a trigger fires.

use crate::graph::{Block, Canvas};
use ahash::AHashSet;
use std::cmp::Ordering;

/// How the action sequence for a trigger is derived from the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinearizationPolicy {
    /// Every non-trigger block on the canvas, top to bottom. The same sequence is
    /// shared by all triggers and connections are not consulted.
    #[default]
    VerticalPosition,
    /// Depth-first walk along each trigger's outgoing connections. Each trigger gets
    /// its own sequence; blocks not reachable from it are left out.
    ConnectionTraversal,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FlowLinearizer {
    policy: LinearizationPolicy,
}

impl FlowLinearizer {
    pub fn new(policy: LinearizationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> LinearizationPolicy {
        self.policy
    }

    /// Returns the ordered actions executed when `trigger` fires.
    pub fn linearize<'a>(&self, canvas: &'a Canvas, trigger: &Block) -> Vec<&'a Block> {
        match self.policy {
            LinearizationPolicy::VerticalPosition => vertical_order(canvas),
            LinearizationPolicy::ConnectionTraversal => traverse_from(canvas, trigger),
        }
    }
}

/// Non-trigger blocks sorted by ascending Y. The sort is stable, so equal Y keeps
/// input order.
pub fn vertical_order(canvas: &Canvas) -> Vec<&Block> {
    let mut actions: Vec<&Block> = canvas.actions().collect();
    actions.sort_by(|a, b| by_vertical_position(a, b));
    actions
}

fn by_vertical_position(a: &Block, b: &Block) -> Ordering {
    a.position.y.total_cmp(&b.position.y)
}

fn traverse_from<'a>(canvas: &'a Canvas, trigger: &Block) -> Vec<&'a Block> {
    let index_of: ahash::AHashMap<&str, usize> = canvas
        .blocks
        .iter()
        .enumerate()
        .map(|(i, b)| (b.id.as_str(), i))
        .collect();

    let mut visited: AHashSet<&str> = AHashSet::new();
    let mut ordered = Vec::new();
    let mut stack: Vec<&'a Block> = successors(canvas, &trigger.id, &index_of);
    stack.reverse();
    visited.insert(trigger.id.as_str());

    while let Some(block) = stack.pop() {
        if !visited.insert(block.id.as_str()) {
            continue;
        }
        if block.is_trigger() {
            continue;
        }
        ordered.push(block);

        let mut next = successors(canvas, &block.id, &index_of);
        next.reverse();
        stack.extend(next.into_iter().filter(|b| !visited.contains(b.id.as_str())));
    }

    ordered
}

/// Direct successors of a block, ordered by Y and then by canvas index.
fn successors<'a>(
    canvas: &'a Canvas,
    block_id: &str,
    index_of: &ahash::AHashMap<&str, usize>,
) -> Vec<&'a Block> {
    let mut next: Vec<(usize, &'a Block)> = canvas
        .connections
        .iter()
        .filter(|c| c.source == block_id)
        .filter_map(|c| {
            let index = *index_of.get(c.target.as_str())?;
            Some((index, &canvas.blocks[index]))
        })
        .collect();
    next.sort_by(|(ia, a), (ib, b)| by_vertical_position(a, b).then(ia.cmp(ib)));
    next.dedup_by_key(|(index, _)| *index);
    next.into_iter().map(|(_, block)| block).collect()
}
