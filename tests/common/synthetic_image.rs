#![allow(dead_code)]

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let cx = (x / cell) as i32;
            let cy = (y / cell) as i32;
            let sum = cx + cy;
            let val = if sum & 1 == 0 { 32u8 } else { 220u8 };
            img[y * width + x] = val;
        }
    }
    img
}

/// Uniform image with every sample set to `value`.
pub fn flat_u8(width: usize, height: usize, value: u8) -> Vec<u8> {
    vec![value; width * height]
}

/// Left-to-right ramp: `x * step`, saturating at 255.
pub fn horizontal_ramp_u8(width: usize, height: usize, step: u8) -> Vec<u8> {
    let mut img = vec![0u8; width * height];
    for row in img.chunks_exact_mut(width) {
        for (x, px) in row.iter_mut().enumerate() {
            *px = (x * step as usize).min(255) as u8;
        }
    }
    img
}

/// Deterministic pseudo-random texture (xorshift).
pub fn noise_u8(width: usize, height: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}
