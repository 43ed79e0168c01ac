use byteorder::{ByteOrder, LittleEndian};

use crate::consts::{LENGTH_PREFIX_BITS, SQUARE_SIZE};
use crate::structs::block::Block;
use crate::structs::image::{OwnedImage, PixelSource};

/// Number of payload bytes one block carries: `S*S*channels/8`. Always a whole
/// number for `S=16` and `channels` in `1..=4` since `S*S=256` is divisible by 8.
pub fn block_bytes(channels: u8) -> u64 {
    (SQUARE_SIZE as u64 * SQUARE_SIZE as u64 * channels as u64) / 8
}

fn pixel_offset(width: u32, channels: u8, block: &Block, row: u32, col: u32, c: u32) -> usize {
    (((block.y + row) as usize * width as usize + (block.x + col) as usize) * channels as usize)
        + c as usize
}

/// Visits every LSB slot of a block in canonical scan order (rows outer,
/// columns, channels innermost), calling `f` with the running bit index and a
/// mutable reference to the underlying pixel byte.
fn for_each_bit_mut(image: &mut OwnedImage, block: &Block, mut f: impl FnMut(usize, &mut u8)) {
    let width = image.width();
    let channels = image.channels();
    let pixels = image.pixels_mut();
    let mut bit_index = 0usize;
    for row in 0..SQUARE_SIZE {
        for col in 0..SQUARE_SIZE {
            for c in 0..channels as u32 {
                let offset = pixel_offset(width, channels, block, row, col, c);
                f(bit_index, &mut pixels[offset]);
                bit_index += 1;
            }
        }
    }
}

/// Read-only counterpart of [`for_each_bit_mut`], usable on borrowed images.
fn for_each_bit(source: &impl PixelSource, block: &Block, mut f: impl FnMut(usize, u8)) {
    let width = source.width();
    let channels = source.channels();
    let pixels = source.pixels();
    let mut bit_index = 0usize;
    for row in 0..SQUARE_SIZE {
        for col in 0..SQUARE_SIZE {
            for c in 0..channels as u32 {
                let offset = pixel_offset(width, channels, block, row, col, c);
                f(bit_index, pixels[offset]);
                bit_index += 1;
            }
        }
    }
}

/// Writes the little-endian 64-bit `len` into `block`'s LSBs, then clears the
/// remaining LSBs of the block to zero. Every LSB in the block is touched, so
/// a compliant extractor only ever needs to read the first 64 of them.
pub fn embed_length(image: &mut OwnedImage, block: &Block, len: u64) {
    let bytes = len.to_le_bytes();
    for_each_bit_mut(image, block, |bit_index, pixel| {
        let bit = if (bit_index as u32) < LENGTH_PREFIX_BITS {
            (bytes[bit_index / 8] >> (bit_index % 8)) & 1
        } else {
            0
        };
        *pixel = (*pixel & 0b1111_1110) | bit;
    });
}

/// Writes `block_bytes(channels)` bytes of `data` into `block`'s LSBs, LSB-first
/// within each payload byte.
pub fn embed_data(image: &mut OwnedImage, block: &Block, data: &[u8]) {
    debug_assert_eq!(data.len() as u64, block_bytes(image.channels()));
    for_each_bit_mut(image, block, |bit_index, pixel| {
        let bit = (data[bit_index / 8] >> (bit_index % 8)) & 1;
        *pixel = (*pixel & 0b1111_1110) | bit;
    });
}

/// Reads the first 64 LSBs of `block` as a little-endian `u64`.
pub fn extract_length(source: &impl PixelSource, block: &Block) -> u64 {
    let mut bytes = [0u8; 8];
    for_each_bit(source, block, |bit_index, pixel| {
        if (bit_index as u32) < LENGTH_PREFIX_BITS {
            bytes[bit_index / 8] |= (pixel & 1) << (bit_index % 8);
        }
    });
    LittleEndian::read_u64(&bytes)
}

/// Reads `block_bytes(channels)` bytes from `block`'s LSBs into `dest`.
pub fn extract_data(source: &impl PixelSource, block: &Block, dest: &mut [u8]) {
    debug_assert_eq!(dest.len() as u64, block_bytes(source.channels()));
    for d in dest.iter_mut() {
        *d = 0;
    }
    for_each_bit(source, block, |bit_index, pixel| {
        dest[bit_index / 8] |= (pixel & 1) << (bit_index % 8);
    });
}
