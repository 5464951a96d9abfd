//! Layout positioner
//!
//! Rows are generations, laid out top-down. Inside a row, persons who share
//! a parent (or carry a SIBLING edge) form a sibling group; groups sit under
//! their leftmost parent, and partners are placed next to each other. Each
//! row is centered on x = 0.

use crate::generation::Generations;
use crate::graph::FamilyGraph;
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distance between neighbouring persons and between rows
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spacing {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Spacing {
    pub fn new(horizontal: f64, vertical: f64) -> Self {
        Spacing { horizontal, vertical }
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            horizontal: 250.0,
            vertical: 150.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Positions aligned with the graph's dense indices
#[derive(Debug, Clone, PartialEq)]
pub struct Positions {
    values: Vec<Position>,
    rows: BTreeMap<u32, Vec<usize>>,
}

impl Positions {
    pub fn of(&self, idx: usize) -> Position {
        self.values[idx]
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.values
    }

    /// Dense indices of one generation, left to right
    pub fn row(&self, generation: u32) -> &[usize] {
        self.rows.get(&generation).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Disjoint sets over the slots of one row; each set is a sibling group
struct SiblingSets {
    leader: Vec<usize>,
    size: Vec<usize>,
}

impl SiblingSets {
    fn new(len: usize) -> Self {
        SiblingSets {
            leader: (0..len).collect(),
            size: vec![1; len],
        }
    }

    fn leader_of(&mut self, mut slot: usize) -> usize {
        while self.leader[slot] != slot {
            self.leader[slot] = self.leader[self.leader[slot]];
            slot = self.leader[slot];
        }
        slot
    }

    /// Larger group absorbs the smaller one
    fn join(&mut self, a: usize, b: usize) {
        let (a, b) = (self.leader_of(a), self.leader_of(b));
        if a == b {
            return;
        }
        let (big, small) = if self.size[a] >= self.size[b] { (a, b) } else { (b, a) };
        self.leader[small] = big;
        self.size[big] += self.size[small];
    }

    /// Groups numbered by their first slot, members in slot order, plus the
    /// group of every slot
    fn into_groups(mut self) -> (Vec<Vec<usize>>, Vec<usize>) {
        let len = self.leader.len();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut group_of = vec![0; len];
        let mut numbered: HashMap<usize, usize> = HashMap::new();
        for (slot, group) in group_of.iter_mut().enumerate() {
            let leader = self.leader_of(slot);
            let g = *numbered.entry(leader).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[g].push(slot);
            *group = g;
        }
        (groups, group_of)
    }
}

/// Assign an (x, y) to every person. Pure: same input, same coordinates.
pub fn position(graph: &FamilyGraph<'_>, generations: &Generations, spacing: Spacing) -> Positions {
    let n = graph.node_count();
    let mut by_generation: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for idx in 0..n {
        by_generation.entry(generations.of(idx)).or_default().push(idx);
    }

    let mut values = vec![Position::default(); n];
    let mut placed = vec![false; n];
    let mut rows = BTreeMap::new();

    for (generation, members) in by_generation {
        let order = order_row(graph, &members, &values, &placed);
        let center = (order.len() as f64 - 1.0) / 2.0;
        let y = f64::from(generation) * spacing.vertical;

        for (slot, &idx) in order.iter().enumerate() {
            values[idx] = Position {
                x: (slot as f64 - center) * spacing.horizontal,
                y,
            };
        }
        for &idx in &order {
            placed[idx] = true;
        }
        rows.insert(generation, order);
    }

    Positions { values, rows }
}

/// Left-to-right order of one row. `members` is in input order.
fn order_row(
    graph: &FamilyGraph<'_>,
    members: &[usize],
    placed_at: &[Position],
    placed: &[bool],
) -> Vec<usize> {
    let len = members.len();
    let local: HashMap<usize, usize> = members.iter().enumerate().map(|(i, &idx)| (idx, i)).collect();

    // Sibling groups: a shared parent or an explicit sibling link
    let mut sets = SiblingSets::new(len);
    let mut first_child_of: HashMap<usize, usize> = HashMap::new();
    for (i, &idx) in members.iter().enumerate() {
        let node = graph.node(idx);
        for &parent in &node.parent_ids {
            match first_child_of.entry(parent) {
                Entry::Occupied(e) => sets.join(*e.get(), i),
                Entry::Vacant(e) => {
                    e.insert(i);
                }
            }
        }
        for sibling in &node.sibling_ids {
            if let Some(&j) = local.get(sibling) {
                sets.join(i, j);
            }
        }
    }
    let (groups, group_of) = sets.into_groups();

    // Groups under their leftmost placed parent; unanchored groups last
    let anchors: Vec<Option<f64>> = groups
        .iter()
        .map(|group| {
            group
                .iter()
                .flat_map(|&i| graph.node(members[i]).parent_ids.iter())
                .filter(|&&p| placed[p])
                .map(|&p| placed_at[p].x)
                .min_by(f64::total_cmp)
        })
        .collect();
    let mut group_order: Vec<usize> = (0..groups.len()).collect();
    group_order.sort_by(|&a, &b| match (anchors[a], anchors[b]) {
        (Some(x), Some(y)) => x.total_cmp(&y).then(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(&b),
    });

    let partners = |i: usize| -> Vec<usize> {
        graph
            .node(members[i])
            .spouse_ids
            .iter()
            .filter_map(|p| local.get(p).copied())
            .collect()
    };

    let mut emitted = vec![false; len];
    let mut group_done = vec![false; groups.len()];
    let mut order = Vec::with_capacity(len);
    let mut cursor = 0;
    let mut next: Option<(usize, usize)> = None;

    loop {
        let (g, lead) = match next.take() {
            Some((g, lead)) => (g, Some(lead)),
            None => {
                while cursor < group_order.len() && group_done[group_order[cursor]] {
                    cursor += 1;
                }
                if cursor == group_order.len() {
                    break;
                }
                (group_order[cursor], None)
            }
        };
        group_done[g] = true;

        // A partner in a group still to come pulls this member to the end
        let crosses = |i: usize, done: &[bool]| {
            partners(i)
                .into_iter()
                .any(|j| group_of[j] != g && !done[group_of[j]] && groups[group_of[j]].len() > 1)
        };
        // Partners with no sibling group of their own travel with i
        let attached_to = |i: usize, emitted: &[bool]| -> Vec<usize> {
            partners(i)
                .into_iter()
                .filter(|&j| !emitted[j] && groups[group_of[j]].len() == 1)
                .collect()
        };
        let pending: Vec<usize> = groups[g]
            .iter()
            .copied()
            .filter(|&i| !emitted[i] && Some(i) != lead)
            .collect();
        let (tail, rest): (Vec<usize>, Vec<usize>) =
            pending.into_iter().partition(|&i| crosses(i, &group_done[..]));

        // Members bringing a partner along sit at the group's edges, so the
        // partner lands outside the siblings
        let alone = lead.is_none() && tail.is_empty() && rest.len() == 1;
        let outward: Vec<usize> = if alone {
            Vec::new()
        } else {
            rest.iter()
                .copied()
                .filter(|&i| !attached_to(i, &emitted).is_empty())
                .collect()
        };
        let front = outward
            .first()
            .copied()
            .filter(|_| lead.is_none() && (outward.len() > 1 || !tail.is_empty()));
        let end = outward
            .last()
            .copied()
            .filter(|&i| tail.is_empty() && Some(i) != front);
        let middle = rest.into_iter().filter(|&i| Some(i) != front && Some(i) != end);
        let sequence: Vec<usize> = front
            .into_iter()
            .chain(lead)
            .chain(middle)
            .chain(end)
            .chain(tail)
            .collect();

        for &i in &sequence {
            let attached = attached_to(i, &emitted);
            // Left of the front member, right of the end member and the lead;
            // elsewhere the first of two or more goes on the left
            let split = if Some(i) == front {
                attached.len()
            } else if Some(i) == end || Some(i) == lead {
                0
            } else {
                usize::from(attached.len() > 1)
            };

            for &j in attached[..split].iter().chain([&i]).chain(&attached[split..]) {
                order.push(members[j]);
                emitted[j] = true;
                group_done[group_of[j]] = true;
            }
        }

        next = sequence.last().and_then(|&i| {
            partners(i)
                .into_iter()
                .find(|&j| !emitted[j] && !group_done[group_of[j]])
                .map(|j| (group_of[j], j))
        });
    }

    order
}
