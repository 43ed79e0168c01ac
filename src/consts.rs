/// Side length of a square block, in pixels. Fixed by the wire format: changing
/// this invalidates every plan and embedded image produced under a different value.
pub const SQUARE_SIZE: u32 = 16;

/// Number of pixels in one block.
pub const SQUARE_AREA: u32 = SQUARE_SIZE * SQUARE_SIZE;

/// Histogram bin count used by the entropy scorer: the low bit of each sample
/// is dropped before binning (`sample >> 1`), so there are 128 reachable bins.
pub const ENTROPY_BINS: usize = 128;

/// Width in bytes of the little-endian payload-length prefix stored in the
/// rank-0 block of every participating image.
pub const LENGTH_PREFIX_BYTES: usize = 8;

/// Width in bits of the length prefix.
pub const LENGTH_PREFIX_BITS: u32 = (LENGTH_PREFIX_BYTES * 8) as u32;

/// Minimum and maximum supported channel counts (8-bit samples only).
pub const MIN_CHANNELS: u8 = 1;
pub const MAX_CHANNELS: u8 = 4;
