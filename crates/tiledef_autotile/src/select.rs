//! Penalty-scored matching and weighted selection

use crate::signature::CornerSignature;
use rand::Rng;
use tiledef_core::{Corner, TileId, Tileset, WangId, WangSet};

/// One candidate tile for a signature. Penalty 0 is an exact match; each
/// constrained corner the tile's signature disagrees on adds 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WangMatch {
    pub tile: TileId,
    pub penalty: u32,
}

/// All rule tiles of `set` scored against `signature`, sorted by penalty,
/// then by id for determinism.
pub fn matches(set: &WangSet, signature: &CornerSignature) -> Vec<WangMatch> {
    let mut result: Vec<WangMatch> = set
        .tiles
        .iter()
        .map(|(&tile, &wang_id)| WangMatch {
            tile,
            penalty: signature.mismatches(wang_id),
        })
        .collect();
    result.sort_by_key(|m| (m.penalty, m.tile));
    result
}

/// The lowest-penalty tile for `signature`; ties break to the lowest id.
pub fn best_match(set: &WangSet, signature: &CornerSignature) -> Option<TileId> {
    matches(set, signature).first().map(|m| m.tile)
}

/// Pick among the lowest-penalty candidates, weighting each by the tile's
/// declared probability times the probabilities of the constrained colors it
/// actually carries. Falls back to the lowest id when every weight is zero.
pub fn choose_weighted<R: Rng + ?Sized>(
    set: &WangSet,
    signature: &CornerSignature,
    tileset: &Tileset,
    rng: &mut R,
) -> Option<TileId> {
    let scored = matches(set, signature);
    let best_penalty = scored.first()?.penalty;
    let candidates: Vec<TileId> = scored
        .iter()
        .take_while(|m| m.penalty == best_penalty)
        .map(|m| m.tile)
        .collect();

    let weights: Vec<f32> = candidates
        .iter()
        .map(|&tile| candidate_weight(set, tile, signature, tileset))
        .collect();
    let total: f32 = weights.iter().sum();
    if total <= 0.0 {
        return candidates.first().copied();
    }

    let mut roll = rng.gen_range(0.0..total);
    for (tile, weight) in candidates.iter().zip(&weights) {
        if roll < *weight {
            return Some(*tile);
        }
        roll -= weight;
    }
    candidates.last().copied()
}

fn candidate_weight(
    set: &WangSet,
    tile: TileId,
    signature: &CornerSignature,
    tileset: &Tileset,
) -> f32 {
    let mut weight = tileset.tile_probability(tile);
    let Some(wang_id) = set.wang_id_of(tile) else {
        return weight;
    };
    for corner in Corner::ALL {
        if signature.corner(corner) == WangId::UNSET {
            continue;
        }
        if let Some(color) = set.color(wang_id.corner(corner)) {
            weight *= color.probability;
        }
    }
    weight
}
