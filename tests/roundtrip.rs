use lsb_stego::{embed, extract, precompute, Image, Plan};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

fn random_pixels(width: u32, height: u32, channels: u8, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..(width as usize * height as usize * channels as usize))
        .map(|_| rng.gen())
        .collect()
}

fn embedded_buffers(plan: Plan, pieces: &[&[u8]]) -> Vec<Vec<u8>> {
    match embed(plan, pieces).unwrap() {
        Plan::Embedded(e) => e.into_pixel_buffers(),
        _ => unreachable!(),
    }
}

/// Single image, no reserved overhead.
#[test]
fn identity_single_image() {
    let pixels = random_pixels(64, 64, 3, 1001);
    let image = Image::new(64, 64, 3, &pixels).unwrap();
    let plan = precompute(&[image], 100, 0).unwrap();

    let payload = random_pixels(10, 10, 1, 1002); // 100 random bytes
    let buffers = embedded_buffers(plan, &[&payload[..]]);

    let modified = Image::new(64, 64, 3, &buffers[0]).unwrap();
    let recovered = extract(&modified, 0).unwrap();
    assert_eq!(recovered, payload);
    assert_eq!(recovered.len(), 100);
}

/// Scenario 2: two images sharing one payload with reserved per-piece overhead.
#[test]
fn two_images_split_with_reserved_overhead() {
    let a_pixels = random_pixels(32, 32, 3, 1003);
    let b_pixels = random_pixels(48, 48, 3, 1004);
    let a = Image::new(32, 32, 3, &a_pixels).unwrap();
    let b = Image::new(48, 48, 3, &b_pixels).unwrap();

    let plan = precompute(&[a, b], 200, 8).unwrap();
    assert_eq!(plan.image_count(), 2);

    // Usage may have grown unevenly between the two images depending on which
    // had the higher-entropy next block, so split by actual capacity rather
    // than assuming an even 100/100 split.
    let (capacity_a, capacity_b) = match &plan {
        Plan::Computed(c) => (c.usage(0).unwrap() * 96, c.usage(1).unwrap() * 96),
        _ => unreachable!(),
    };

    let payload = random_pixels(200, 1, 1, 1005);
    let b_len = capacity_b.min(200) as usize;
    let a_len = 200 - b_len;
    assert!(a_len as u64 <= capacity_a, "split must fit both images' capacity");
    let piece_a = &payload[..a_len];
    let piece_b = &payload[a_len..a_len + b_len];

    let buffers = embedded_buffers(plan, &[piece_a, piece_b]);
    let img_a = Image::new(32, 32, 3, &buffers[0]).unwrap();
    let img_b = Image::new(48, 48, 3, &buffers[1]).unwrap();

    let mut recovered = extract(&img_a, 8).unwrap();
    recovered.extend(extract(&img_b, 8).unwrap());
    assert_eq!(recovered, payload);
}

/// Scenario 3: a 16x16 image has exactly one block total, leaving zero data
/// blocks once rank 0 is reserved for the length prefix.
#[test]
fn reject_oversize_with_no_data_blocks_available() {
    let pixels = random_pixels(16, 16, 3, 1006);
    let image = Image::new(16, 16, 3, &pixels).unwrap();
    let err = precompute(&[image], 1, 0).unwrap_err();
    assert_eq!(err.code(), lsb_stego::ErrorCode::OversizedData);
}

/// Scenario 4: flipping a non-LSB bit everywhere leaves extraction untouched.
#[test]
fn corruption_of_non_lsb_bit_is_harmless() {
    let pixels = random_pixels(64, 64, 3, 1007);
    let image = Image::new(64, 64, 3, &pixels).unwrap();
    let plan = precompute(&[image], 50, 0).unwrap();
    let payload = random_pixels(50, 1, 1, 1008);
    let mut buffers = embedded_buffers(plan, &[&payload[..]]);

    for byte in buffers[0].iter_mut() {
        *byte ^= 0b0000_0010;
    }

    let modified = Image::new(64, 64, 3, &buffers[0]).unwrap();
    let recovered = extract(&modified, 0).unwrap();
    assert_eq!(recovered, payload);
}

/// Scenario 5: corrupting a single LSB inside a data block flips exactly one
/// bit of the recovered payload.
#[test]
fn corruption_of_single_lsb_flips_one_bit() {
    let pixels = random_pixels(64, 64, 3, 1009);
    let image = Image::new(64, 64, 3, &pixels).unwrap();
    let plan = precompute(&[image], 50, 0).unwrap();
    let payload = vec![0u8; 50];
    let mut buffers = embedded_buffers(plan, &[&payload[..]]);

    let block_pixel_bytes = 16 * 16 * 3;
    buffers[0][block_pixel_bytes] ^= 1;

    let modified = Image::new(64, 64, 3, &buffers[0]).unwrap();
    let recovered = extract(&modified, 0).unwrap();
    let diff: u32 = recovered
        .iter()
        .zip(payload.iter())
        .map(|(a, b)| (a ^ b).count_ones())
        .sum();
    assert_eq!(diff, 1);
}

/// Scenario 6: an image with no embedded payload almost always fails the
/// length sanity gate rather than returning garbage.
#[test]
fn untouched_image_fails_invalid_len() {
    let pixels = random_pixels(64, 64, 3, 1010);
    let image = Image::new(64, 64, 3, &pixels).unwrap();
    match extract(&image, 0) {
        Err(e) => assert_eq!(e.code(), lsb_stego::ErrorCode::InvalidLen),
        Ok(_) => {}
    }
}

#[rstest]
#[case(32, 32, 1)]
#[case(32, 32, 2)]
#[case(32, 32, 3)]
#[case(32, 32, 4)]
fn round_trips_for_every_supported_channel_count(
    #[case] width: u32,
    #[case] height: u32,
    #[case] channels: u8,
) {
    let pixels = random_pixels(width, height, channels, 2000 + channels as u64);
    let image = Image::new(width, height, channels, &pixels).unwrap();
    let block_bytes = (16 * 16 * channels as u64) / 8;
    let plan = precompute(&[image], block_bytes, 0).unwrap();

    let payload = random_pixels(block_bytes as u32, 1, 1, 3000 + channels as u64);
    let buffers = embedded_buffers(plan, &[&payload[..]]);
    let modified = Image::new(width, height, channels, &buffers[0]).unwrap();
    let recovered = extract(&modified, 0).unwrap();
    assert_eq!(recovered, payload);
}

#[rstest]
#[case(8, 64)]
#[case(64, 8)]
#[case(15, 15)]
fn undersized_dimensions_yield_zero_blocks(#[case] width: u32, #[case] height: u32) {
    let pixels = random_pixels(width, height, 3, 4000 + width as u64 + height as u64);
    let image = Image::new(width, height, 3, &pixels).unwrap();
    let err = precompute(&[image], 1, 0).unwrap_err();
    assert_eq!(err.code(), lsb_stego::ErrorCode::OversizedData);
}
