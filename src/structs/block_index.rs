use std::cmp::Ordering;

use crate::structs::block::{enumerate_block_origins, Block};
use crate::structs::entropy::block_entropy;
use crate::structs::image::PixelSource;

/// A per-image sequence of all in-bounds blocks, sorted by entropy descending.
/// Ties are broken by ascending `(y, x)` so two runs over identical pixels
/// always agree on rank 0 — this is what lets `extract` rediscover the same
/// length-prefix block `embed` used.
#[derive(Debug, Clone, Default)]
pub struct BlockIndex {
    blocks: Vec<Block>,
}

fn tie_break(a: &Block, b: &Block) -> Ordering {
    (a.y, a.x).cmp(&(b.y, b.x))
}

fn rank_order(a: &Block, b: &Block) -> Ordering {
    // descending entropy, ascending (y, x) on ties
    match b.entropy.partial_cmp(&a.entropy) {
        Some(Ordering::Equal) | None => tie_break(a, b),
        Some(order) => order,
    }
}

impl BlockIndex {
    pub fn build(source: &impl PixelSource) -> Self {
        let mut blocks: Vec<Block> = enumerate_block_origins(source.width(), source.height())
            .map(|(x, y)| Block {
                x,
                y,
                entropy: block_entropy(source, x, y),
            })
            .collect();
        blocks.sort_by(rank_order);
        BlockIndex { blocks }
    }

    /// Scores blocks in parallel with `rayon` before performing the identical
    /// serial sort, so the result is byte-for-byte the same as [`BlockIndex::build`]
    /// regardless of thread scheduling.
    #[cfg(feature = "parallel")]
    pub fn build_parallel(source: &(impl PixelSource + Sync)) -> Self {
        use rayon::prelude::*;

        let mut blocks: Vec<Block> = enumerate_block_origins(source.width(), source.height())
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|(x, y)| Block {
                x,
                y,
                entropy: block_entropy(source, x, y),
            })
            .collect();
        blocks.sort_by(rank_order);
        BlockIndex { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, rank: usize) -> Option<&Block> {
        self.blocks.get(rank)
    }

    pub fn truncate(&mut self, len: usize) {
        self.blocks.truncate(len);
    }

    pub fn is_sorted_descending(&self) -> bool {
        self.blocks.windows(2).all(|w| w[0].entropy >= w[1].entropy)
    }
}
