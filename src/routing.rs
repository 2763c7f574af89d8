//! Routing tables: a tabular form of the two-sided chain evaluation.
//!
//! The evaluation state of a fragment is a pair of booleans (is the space
//! just in front of it solid, is the space just behind it solid). The four
//! possible pairs map one-to-one onto [`PolygonCategory`]:
//!
//! * both empty      -> `Outside`
//! * back solid only -> `Aligned` (the fragment is surface, kept as-is)
//! * front solid only -> `ReverseAligned` (surface, kept flipped)
//! * both solid      -> `Inside`
//!
//! Each boolean operation then becomes a 4x4 transition table from (current
//! state, fragment category relative to the brush) to the next state. For a
//! brush that comes after the owner in the chain the `beyond` variant is
//! used, which sends any on-boundary category to `Outside`: the later brush
//! claims coplanar surfaces, so the fragment can never be emitted once such
//! a category is seen.
//!
//! A [`RoutingTable`] folds one table per brush in chain order, compacting
//! equal states between rounds. Walking it with a fragment's categories
//! reproduces the direct evaluation exactly.

use crate::brush::{relation::PolygonCategory, BooleanOp};

use PolygonCategory::{Aligned, Inside, Outside, ReverseAligned};

type OpTable = [[PolygonCategory; 4]; 4];

/// Transition tables, indexed `[state][category]` with the discriminant
/// order `Inside, Aligned, ReverseAligned, Outside`.
const UNION_TABLE: OpTable = [
    [Inside, Inside, Inside, Inside],
    [Inside, Aligned, Inside, Aligned],
    [Inside, Inside, ReverseAligned, ReverseAligned],
    [Inside, Aligned, ReverseAligned, Outside],
];

const SUBTRACT_TABLE: OpTable = [
    [Outside, ReverseAligned, Aligned, Inside],
    [Outside, Outside, Aligned, Aligned],
    [Outside, ReverseAligned, Outside, ReverseAligned],
    [Outside, Outside, Outside, Outside],
];

const INTERSECT_TABLE: OpTable = [
    [Inside, Aligned, ReverseAligned, Outside],
    [Aligned, Aligned, Outside, Outside],
    [ReverseAligned, Outside, ReverseAligned, Outside],
    [Outside, Outside, Outside, Outside],
];

const UNION_BEYOND_TABLE: OpTable = beyond(UNION_TABLE);
const SUBTRACT_BEYOND_TABLE: OpTable = beyond(SUBTRACT_TABLE);
const INTERSECT_BEYOND_TABLE: OpTable = beyond(INTERSECT_TABLE);

/// Rewrites a table so any on-boundary input lands in `Outside`.
const fn beyond(mut table: OpTable) -> OpTable {
    let mut state = 0;
    while state < 4 {
        table[state][Aligned as usize] = Outside;
        table[state][ReverseAligned as usize] = Outside;
        state += 1;
    }
    table
}

fn standard_table(op: BooleanOp) -> &'static OpTable {
    match op {
        BooleanOp::Union => &UNION_TABLE,
        BooleanOp::Subtract => &SUBTRACT_TABLE,
        BooleanOp::Intersect => &INTERSECT_TABLE,
    }
}

fn beyond_table(op: BooleanOp) -> &'static OpTable {
    match op {
        BooleanOp::Union => &UNION_BEYOND_TABLE,
        BooleanOp::Subtract => &SUBTRACT_BEYOND_TABLE,
        BooleanOp::Intersect => &INTERSECT_BEYOND_TABLE,
    }
}

/// One round per brush: `routes[state][category]` gives the state index for
/// the next round.
struct RoutingRound {
    routes: Vec<[u8; 4]>,
}

/// A compiled routing table for one owner over one brush chain.
pub struct RoutingTable {
    rounds: Vec<RoutingRound>,
    final_states: Vec<PolygonCategory>,
}

impl RoutingTable {
    /// The live states entering the first round, in index order.
    const INITIAL_STATES: [PolygonCategory; 4] = [Inside, Aligned, ReverseAligned, Outside];

    /// Index of the walk's starting state (`Outside`: nothing is solid
    /// before the first brush).
    const INITIAL_STATE_INDEX: usize = 3;

    /// Builds the table for the brush at `owner` within a chain with the
    /// given operations, in chain order.
    pub fn build(ops: &[BooleanOp], owner: usize) -> Self {
        let mut states = Self::INITIAL_STATES.to_vec();
        let mut rounds = Vec::with_capacity(ops.len());

        for (k, &op) in ops.iter().enumerate() {
            let table = if k > owner {
                beyond_table(op)
            } else {
                standard_table(op)
            };

            let mut next_states: Vec<PolygonCategory> = Vec::with_capacity(4);
            let mut routes = Vec::with_capacity(states.len());
            for &state in &states {
                let mut row = [0u8; 4];
                for category in 0..4 {
                    let destination = table[state as usize][category];
                    let index = next_states
                        .iter()
                        .position(|&s| s == destination)
                        .unwrap_or_else(|| {
                            next_states.push(destination);
                            next_states.len() - 1
                        });
                    row[category] = index as u8;
                }
                routes.push(row);
            }

            rounds.push(RoutingRound { routes });
            states = next_states;
        }

        Self {
            rounds,
            final_states: states,
        }
    }

    /// Routes a fragment's per-brush categories (owner slot included; a
    /// fragment of the owner's own face is `Aligned` there) to its final
    /// category: `Aligned` is emitted, `ReverseAligned` emitted flipped,
    /// anything else discarded.
    pub fn walk(&self, categories: &[PolygonCategory]) -> PolygonCategory {
        let mut state = Self::INITIAL_STATE_INDEX;
        for (round, &category) in self.rounds.iter().zip(categories) {
            // An index from a stale or corrupt walk cannot name a live
            // state; fall out as empty space.
            if state >= round.routes.len() {
                return Outside;
            }
            state = round.routes[state][category as usize] as usize;
        }
        self.final_states.get(state).copied().unwrap_or(Outside)
    }
}
