//! Entropy-guided least-significant-bit steganography.
//!
//! Given one or more raw, uncompressed raster images and an opaque byte
//! payload, [`precompute`] decides which images participate and how many
//! blocks of each one to use, [`embed`] writes the payload into those blocks'
//! low bits, and [`extract`] recovers it from a single modified image. Block
//! selection favors visually noisy (high-entropy) regions of each image so
//! the perturbation is least detectable.
//!
//! This crate has no opinion on image formats, file I/O, or process
//! invocation — it consumes and produces raw pixel buffers; decoding PNGs or
//! BMPs and writing them back out is the caller's job.
//!
//! ```
//! use lsb_stego::Image;
//!
//! // a tiny synthetic 32x32 RGB image
//! let pixels = vec![0u8; 32 * 32 * 3];
//! let image = Image::new(32, 32, 3, &pixels).unwrap();
//!
//! let payload = b"hidden message";
//! let plan = lsb_stego::precompute(&[image], payload.len() as u64, 0).unwrap();
//! let embedded = lsb_stego::embed(plan, &[&payload[..]]).unwrap();
//!
//! let buffers = match embedded {
//!     lsb_stego::Plan::Embedded(e) => e.into_pixel_buffers(),
//!     _ => unreachable!(),
//! };
//! let modified = Image::new(32, 32, 3, &buffers[0]).unwrap();
//! let recovered = lsb_stego::extract(&modified, 0).unwrap();
//! assert_eq!(recovered, payload);
//! ```

pub mod consts;
pub mod error;

mod structs {
    pub mod block;
    pub mod block_index;
    pub mod codec;
    pub mod extract;
    pub mod image;
    pub mod plan;
    pub mod planner;
}

pub use error::{ErrorCode, StegoError};
pub use structs::block::Block;
pub use structs::block_index::BlockIndex;
pub use structs::image::{Image, OwnedImage, PixelSource};
pub use structs::plan::{embed, ComputedPlan, EmbeddedPlan, Plan};
pub use structs::planner::precompute;

pub use structs::extract::extract;
