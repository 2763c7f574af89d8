//! The chain evaluator.
//!
//! Brushes are combined left to right: each brush applies its boolean
//! operation to the solid accumulated by the brushes before it. The surface
//! of the result is assembled per brush ("owner"): every face of the owner
//! is split against the planes of all overlapping brushes, each surviving
//! fragment is classified against those brushes, and the boolean chain is
//! evaluated at a point just in front of and just behind the fragment. A
//! fragment whose front side lands in empty space and whose back side lands
//! in solid is part of the surface; the reverse configuration is part of the
//! surface facing the other way; anything else is buried or floating and is
//! dropped.

use crate::{
    brush::{
        relation::{self, PolygonCategory},
        BooleanOp, Brush,
    },
    polygon::Polygon,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What to do with a fragment after evaluating the chain on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Emission {
    Keep,
    Flip,
    Discard,
}

/// Evaluates a brush chain and returns the polygons of its boolean surface.
///
/// Brushes are processed in chain order (the `order` field; ties keep input
/// order). Invalid input is dropped rather than reported: brushes with fewer
/// than four planes or non-finite planes, and faces with fewer than three
/// vertices or non-finite coordinates, simply do not contribute. The output
/// polygon order is unspecified.
pub fn process(brushes: &[Brush]) -> Vec<Polygon> {
    let mut chain: Vec<&Brush> = brushes.iter().filter(|brush| brush_is_valid(brush)).collect();
    chain.sort_by_key(|brush| brush.order);

    match chain.len() {
        0 => Vec::new(),
        1 => {
            if chain[0].operation == BooleanOp::Union {
                chain[0]
                    .faces
                    .iter()
                    .filter(|face| face_is_valid(face))
                    .cloned()
                    .collect()
            } else {
                Vec::new()
            }
        }
        _ => process_chain(&chain),
    }
}

fn process_chain(chain: &[&Brush]) -> Vec<Polygon> {
    let count = chain.len();

    let mut overlap = vec![vec![false; count]; count];
    for i in 0..count {
        for j in (i + 1)..count {
            let overlaps = relation::brushes_overlap(chain[i], chain[j]);
            overlap[i][j] = overlaps;
            overlap[j][i] = overlaps;
        }
    }

    let ops: Vec<BooleanOp> = chain.iter().map(|brush| brush.operation).collect();

    #[cfg(feature = "parallel")]
    {
        (0..count)
            .into_par_iter()
            .flat_map_iter(|owner| evaluate_owner(chain, &overlap, &ops, owner))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..count)
            .flat_map(|owner| evaluate_owner(chain, &overlap, &ops, owner))
            .collect()
    }
}

/// Splits, classifies and filters the faces owned by one brush.
fn evaluate_owner(
    chain: &[&Brush],
    overlap: &[Vec<bool>],
    ops: &[BooleanOp],
    owner: usize,
) -> Vec<Polygon> {
    let others: Vec<usize> = (0..chain.len())
        .filter(|&j| j != owner && overlap[owner][j])
        .collect();

    let splitters: Vec<_> = others
        .iter()
        .flat_map(|&j| chain[j].planes.iter().copied())
        .collect();

    let mut kept = Vec::new();
    let mut categories = vec![PolygonCategory::Outside; chain.len()];

    for face in &chain[owner].faces {
        if !face_is_valid(face) {
            continue;
        }

        // Carve the face into fragments that span no overlapping brush's
        // plane. Coplanar pieces survive splitting untouched.
        let mut fragments = vec![face.clone()];
        for plane in &splitters {
            let mut survivors = Vec::with_capacity(fragments.len());
            for fragment in &fragments {
                survivors.extend(
                    plane
                        .split_polygon(fragment)
                        .into_pieces()
                        .filter(|piece| !piece.is_degenerate()),
                );
            }
            fragments = survivors;
        }

        'fragments: for fragment in fragments {
            categories.fill(PolygonCategory::Outside);
            for &j in &others {
                categories[j] = relation::categorize_polygon(&fragment, &chain[j].planes);
            }

            // A brush later in the chain claims any surface coplanar with
            // one of its faces; emitting both would z-fight.
            for &j in &others {
                if j > owner
                    && matches!(
                        categories[j],
                        PolygonCategory::Aligned | PolygonCategory::ReverseAligned
                    )
                {
                    continue 'fragments;
                }
            }

            match decide(ops, owner, &categories) {
                Emission::Keep => kept.push(fragment),
                Emission::Flip => {
                    let mut flipped = fragment;
                    flipped.flip();
                    kept.push(flipped);
                }
                Emission::Discard => {}
            }
        }
    }

    kept
}

/// Evaluates the boolean chain just in front of and just behind a fragment
/// and derives the emission decision.
pub(crate) fn decide(
    ops: &[BooleanOp],
    owner: usize,
    categories: &[PolygonCategory],
) -> Emission {
    let mut front_solid = false;
    let mut back_solid = false;

    for (k, &op) in ops.iter().enumerate() {
        let (front_inside, back_inside) = if k == owner {
            // The fragment lies on the owner's boundary: solid behind it,
            // empty in front of it.
            (false, true)
        } else {
            side_flags(categories[k])
        };
        front_solid = apply(op, front_solid, front_inside);
        back_solid = apply(op, back_solid, back_inside);
    }

    match (front_solid, back_solid) {
        (false, true) => Emission::Keep,
        (true, false) => Emission::Flip,
        _ => Emission::Discard,
    }
}

/// Whether the points just in front of and just behind a fragment are
/// interior to a brush the fragment was classified against.
pub(crate) fn side_flags(category: PolygonCategory) -> (bool, bool) {
    match category {
        PolygonCategory::Inside => (true, true),
        PolygonCategory::Outside => (false, false),
        PolygonCategory::Aligned => (false, true),
        PolygonCategory::ReverseAligned => (true, false),
    }
}

pub(crate) fn apply(op: BooleanOp, solid: bool, inside: bool) -> bool {
    match op {
        BooleanOp::Union => solid || inside,
        BooleanOp::Subtract => solid && !inside,
        BooleanOp::Intersect => solid && inside,
    }
}

fn brush_is_valid(brush: &Brush) -> bool {
    brush.planes.len() >= 4
        && brush
            .planes
            .iter()
            .all(|plane| plane.normal.is_finite() && plane.distance_from_origin.is_finite())
}

fn face_is_valid(face: &Polygon) -> bool {
    face.vertices.len() >= 3 && face.vertices.iter().all(|vertex| vertex.pos.is_finite())
}
