use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, info, warn};

use crate::error::{bail, ErrorCode, Result};
use crate::structs::block_index::BlockIndex;
use crate::structs::codec::block_bytes;
use crate::structs::image::{Image, OwnedImage};
use crate::structs::plan::{ComputedPlan, Plan, PlanImage};

fn ceil_div(a: u64, b: u64) -> u64 {
    if b == 0 {
        0
    } else {
        (a + b - 1) / b
    }
}

struct ImageState {
    image: OwnedImage,
    block_index: BlockIndex,
    usage: u64,
    block_bytes: u64,
    /// too few blocks to even carry `reserved`; permanently excluded.
    unusable: bool,
}

/// A candidate for the next block to hand to an image during greedy growth.
/// Ordered so the max-heap pops the globally highest-entropy candidate first;
/// ties are broken by ascending image index for determinism, matching the
/// `(y, x)` tie-break used within one image's block index.
struct Candidate {
    entropy: f64,
    image_idx: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.entropy == other.entropy && self.image_idx == other.image_idx
    }
}
impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.entropy.partial_cmp(&other.entropy) {
            Some(Ordering::Equal) | None => other.image_idx.cmp(&self.image_idx),
            Some(order) => order,
        }
    }
}

/// Distributes a `data_len`-byte payload across `images`, growing each
/// participating image's `usage` from a `reserved`-sized baseline by always
/// handing the next block to whichever image's next candidate block has the
/// highest entropy.
pub fn precompute(images: &[Image<'_>], data_len: u64, reserved: u64) -> Result<Plan> {
    let mut state: Vec<ImageState> = Vec::with_capacity(images.len());
    let mut contributed: u64 = 0;

    for image in images {
        let owned = OwnedImage::copy_from(image);
        let block_index = BlockIndex::build(&owned);
        let k = block_index.len() as u64;
        let bytes_per_block = block_bytes(owned.channels());
        let baseline = ceil_div(reserved, bytes_per_block);

        if k == 0 || baseline + 1 > k {
            debug!(
                "image {}x{} (c={}) cannot carry reserved={} bytes in {} available blocks; excluding",
                owned.width(),
                owned.height(),
                owned.channels(),
                reserved,
                k
            );
            state.push(ImageState {
                image: owned,
                block_index,
                usage: 0,
                block_bytes: bytes_per_block,
                unusable: true,
            });
            continue;
        }

        contributed += bytes_per_block * baseline - reserved;
        state.push(ImageState {
            image: owned,
            block_index,
            usage: baseline,
            block_bytes: bytes_per_block,
            unusable: false,
        });
    }

    let mut heap: BinaryHeap<Candidate> = BinaryHeap::new();
    for (idx, s) in state.iter().enumerate() {
        if !s.unusable && s.usage + 1 < s.block_index.len() as u64 {
            let entropy = s.block_index.get(s.usage as usize + 1).unwrap().entropy;
            heap.push(Candidate {
                entropy,
                image_idx: idx,
            });
        }
    }

    while contributed < data_len {
        let Some(candidate) = heap.pop() else {
            warn!(
                "requested {} bytes but only {} bytes of block capacity available across {} image(s)",
                data_len,
                contributed,
                state.len()
            );
            bail!(
                ErrorCode::OversizedData,
                "no combination of blocks carries {data_len} bytes (capacity {contributed})"
            );
        };

        let s = &mut state[candidate.image_idx];
        s.usage += 1;
        contributed += s.block_bytes;

        if s.usage + 1 < s.block_index.len() as u64 {
            let entropy = s.block_index.get(s.usage as usize + 1).unwrap().entropy;
            heap.push(Candidate {
                entropy,
                image_idx: candidate.image_idx,
            });
        }
    }

    let plan_images: Vec<PlanImage> = state
        .into_iter()
        .filter(|s| s.usage > 0)
        .map(|mut s| {
            s.block_index.truncate((s.usage + 1) as usize);
            PlanImage {
                image: s.image,
                block_index: s.block_index,
                usage: s.usage,
            }
        })
        .collect();

    info!(
        "precompute: {} of {} image(s) retained, {} bytes contributed for {} requested",
        plan_images.len(),
        images.len(),
        contributed,
        data_len
    );

    Ok(Plan::Computed(ComputedPlan {
        images: plan_images,
    }))
}
