use crate::consts::{ENTROPY_BINS, SQUARE_SIZE};
use crate::structs::image::PixelSource;

/// Shannon entropy (base 2) of the block at `(x, y)` in `source`, averaged
/// across channels. Bins on `sample >> 1`: the bit about to be overwritten by
/// embedding is excluded from scoring, so a block's entropy never changes
/// because of an LSB write to it. This is what lets `extract` rebuild the same
/// block ranking `embed` used, even though the pixels it reads are the
/// embedded ones.
///
/// Caller must ensure the block lies entirely within `source`; this is an
/// internal invariant upheld by the block generator and is not re-checked
/// here.
pub fn block_entropy(source: &impl PixelSource, x: u32, y: u32) -> f64 {
    let width = source.width() as usize;
    let channels = source.channels() as usize;
    let pixels = source.pixels();
    let area = (SQUARE_SIZE * SQUARE_SIZE) as f64;

    let mut total = 0.0;
    for c in 0..channels {
        let mut histogram = [0u32; ENTROPY_BINS];
        for row in 0..SQUARE_SIZE {
            let row_start = ((y + row) as usize * width + x as usize) * channels + c;
            for col in 0..SQUARE_SIZE as usize {
                let sample = pixels[row_start + col * channels];
                histogram[(sample >> 1) as usize] += 1;
            }
        }

        let mut channel_entropy = 0.0;
        for &count in histogram.iter() {
            if count == 0 {
                continue;
            }
            let p = count as f64 / area;
            channel_entropy -= p * p.log2();
        }
        total += channel_entropy;
    }

    total / channels as f64
}
