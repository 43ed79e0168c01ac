use log::info;

use crate::error::{bail, ErrorCode, Result};
use crate::structs::block_index::BlockIndex;
use crate::structs::codec::{block_bytes, embed_data, embed_length};
use crate::structs::image::OwnedImage;

#[derive(Clone)]
pub(crate) struct PlanImage {
    pub image: OwnedImage,
    pub block_index: BlockIndex,
    pub usage: u64,
}

/// A precomputed, not-yet-embedded distribution of payload bytes across a set
/// of owned image copies.
#[derive(Clone)]
pub struct ComputedPlan {
    pub(crate) images: Vec<PlanImage>,
}

impl ComputedPlan {
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn usage(&self, index: usize) -> Option<u64> {
        self.images.get(index).map(|i| i.usage)
    }
}

/// The outcome of a successful `embed`: final pixel buffers, one per retained
/// image, in the same order as the `Plan` that produced them.
#[derive(Clone)]
pub struct EmbeddedPlan {
    images: Vec<OwnedImage>,
}

impl EmbeddedPlan {
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn images(&self) -> &[OwnedImage] {
        &self.images
    }

    pub fn into_pixel_buffers(self) -> Vec<Vec<u8>> {
        self.images.into_iter().map(|i| i.into_pixels()).collect()
    }
}

/// `precompute → embed` pipeline state. `Computed` admits exactly one `embed`
/// call; calling `embed` again on the resulting `Embedded` plan fails with
/// `BadPrecomputed`, matching the `{Uncomputed → Computed → Consumed}`
/// state machine (teardown of owned buffers itself needs no explicit call —
/// it happens when the value is dropped).
#[derive(Clone)]
pub enum Plan {
    Computed(ComputedPlan),
    Embedded(EmbeddedPlan),
}

impl Plan {
    pub fn image_count(&self) -> usize {
        match self {
            Plan::Computed(p) => p.image_count(),
            Plan::Embedded(p) => p.image_count(),
        }
    }
}

/// Pads `piece` with zero bytes up to `usage * bytes_per_block`: the loop in
/// [`embed`] writes exactly `usage` data blocks regardless of how much of that
/// capacity `piece` actually fills, so the padded buffer must cover all of it,
/// not just `piece`'s own next block boundary.
fn pad_piece(piece: &[u8], bytes_per_block: u64, usage: u64) -> Vec<u8> {
    let total = (bytes_per_block * usage) as usize;
    let mut padded = piece.to_vec();
    padded.resize(total, 0);
    padded
}

/// Writes each piece's length and data blocks into its image, in plan order.
/// Requires `pieces.len() == plan.image_count()` and each piece short enough
/// to fit in its image's `usage` data blocks.
pub fn embed(plan: Plan, pieces: &[&[u8]]) -> Result<Plan> {
    let computed = match plan {
        Plan::Computed(c) => c,
        Plan::Embedded(_) => {
            bail!(
                ErrorCode::BadPrecomputed,
                "plan has already been embedded; embed consumes a Computed plan exactly once"
            );
        }
    };

    if pieces.len() != computed.images.len() {
        bail!(
            ErrorCode::BadDataPiecesLen,
            "expected {} data piece(s), got {}",
            computed.images.len(),
            pieces.len()
        );
    }

    let mut finished = Vec::with_capacity(computed.images.len());
    for (plan_image, piece) in computed.images.into_iter().zip(pieces.iter()) {
        let PlanImage {
            mut image,
            block_index,
            usage,
        } = plan_image;

        let bytes_per_block = block_bytes(image.channels());
        let capacity = usage * bytes_per_block;
        if piece.len() as u64 > capacity {
            bail!(
                ErrorCode::BadDataPiecesLen,
                "piece of {} bytes exceeds image capacity of {} bytes ({} usable blocks)",
                piece.len(),
                capacity,
                usage
            );
        }

        let padded = pad_piece(piece, bytes_per_block, usage);
        let length_block = *block_index.get(0).expect("usage > 0 implies rank 0 exists");
        embed_length(&mut image, &length_block, piece.len() as u64);

        for rank in 1..=usage {
            let block = *block_index
                .get(rank as usize)
                .expect("usage + 1 <= block_index.len() invariant");
            let start = ((rank - 1) * bytes_per_block) as usize;
            let end = start + bytes_per_block as usize;
            embed_data(&mut image, &block, &padded[start..end]);
        }

        finished.push(image);
    }

    info!("embed: wrote {} image(s)", finished.len());

    Ok(Plan::Embedded(EmbeddedPlan { images: finished }))
}
