use log::{debug, warn};

use crate::error::{bail, ErrorCode, Result};
use crate::structs::block_index::BlockIndex;
use crate::structs::codec::{block_bytes, extract_data, extract_length};
use crate::structs::image::Image;

fn ceil_div(a: u64, b: u64) -> u64 {
    if b == 0 {
        0
    } else {
        (a + b - 1) / b
    }
}

/// Recovers the payload embedded in `image`, assuming it was produced by
/// `embed` with the same `reserved` value. `reserved` does not gate anything
/// here directly — it is opaque per-piece framing the caller
/// strips after extraction — but callers typically pass the same value they
/// used at embed time so that `precompute`'s block selection on the two sides
/// agrees (entropy ranking is unaffected by LSB writes, so it always does).
///
/// No copy of `image` is made: the block index is built by reading the
/// (already LSB-embedded) pixels directly, since entropy only depends on the
/// untouched upper 7 bits.
pub fn extract(image: &Image<'_>, reserved: u64) -> Result<Vec<u8>> {
    let _ = reserved; // opaque to the core; documented for API symmetry with embed's `reserved`.

    let block_index = BlockIndex::build(image);
    if block_index.is_empty() {
        bail!(
            ErrorCode::InvalidLen,
            "image has no blocks; no length-prefix block available"
        );
    }

    let length_block = block_index.get(0).expect("checked non-empty above");
    let len = extract_length(image, length_block);
    let bytes_per_block = block_bytes(image.channels());
    let blocks_needed = ceil_div(len, bytes_per_block);
    let available_data_blocks = block_index.len() as u64 - 1;

    if len == 0 || blocks_needed > available_data_blocks {
        warn!(
            "extract: length field decoded to {} bytes, needing {} blocks but only {} available; rejecting",
            len, blocks_needed, available_data_blocks
        );
        bail!(
            ErrorCode::InvalidLen,
            "decoded length {len} needs {blocks_needed} blocks but only {available_data_blocks} are available"
        );
    }

    debug!("extract: recovering {} bytes across {} block(s)", len, blocks_needed);

    let mut padded = vec![0u8; (blocks_needed * bytes_per_block) as usize];
    for rank in 1..=blocks_needed {
        let block = block_index
            .get(rank as usize)
            .expect("blocks_needed <= available_data_blocks invariant");
        let start = ((rank - 1) * bytes_per_block) as usize;
        let end = start + bytes_per_block as usize;
        extract_data(image, block, &mut padded[start..end]);
    }

    padded.truncate(len as usize);
    Ok(padded)
}
