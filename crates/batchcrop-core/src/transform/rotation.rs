//! Image rotation with canvas expansion.
//!
//! The canvas grows so no corner is clipped, matching what the user sees in
//! the selection UI: the crop rectangle is drawn against the rotated,
//! expanded reference image.
//!
//! Right-angle rotations (90, 180, 270) are exact pixel remaps and lose
//! nothing. Every other angle resamples by inverse mapping: each output
//! pixel is traced back through the inverse rotation to a fractional source
//! position, which is then interpolated (bilinear or Lanczos3). Uncovered
//! corner regions of the expanded canvas come out black.

use crate::decode::DecodedImage;

/// Interpolation filter for angled rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationFilter {
    /// Fast - used while the user drags the angle slider.
    #[default]
    Bilinear,
    /// 6x6 windowed sinc - used for the committed batch output.
    Lanczos3,
}

/// Angles this close to a right angle take the exact remap paths.
const RIGHT_ANGLE_EPSILON: f64 = 0.001;

/// Bounding-box dimensions of an image rotated by `angle_degrees`.
///
/// Right angles map exactly (90/270 swap the dimensions); everything else
/// uses the rotated-rectangle envelope `w' = w|cos| + h|sin|,
/// h' = w|sin| + h|cos|`, rounded to nearest and clamped to at least 1.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let turn = angle_degrees.rem_euclid(360.0);

    match right_angle_multiple(turn) {
        Some(0) | Some(2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let (sin, cos) = turn.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let w = f64::from(width);
    let h = f64::from(height);

    let bound_w = (w * cos + h * sin).round() as u32;
    let bound_h = (w * sin + h * cos).round() as u32;

    (bound_w.max(1), bound_h.max(1))
}

/// Which multiple of 90 degrees `turn` is, if it is one.
///
/// `turn` must already be normalized to `[0, 360)`.
fn right_angle_multiple(turn: f64) -> Option<u8> {
    for quarter in 0..=4u8 {
        if (turn - f64::from(quarter) * 90.0).abs() < RIGHT_ANGLE_EPSILON {
            return Some(quarter % 4);
        }
    }
    None
}

/// Rotate an image around its center, expanding the canvas to fit.
///
/// Positive angles rotate counter-clockwise. The filter only matters for
/// non-right angles; right angles are remapped exactly.
pub fn apply_rotation(
    image: &DecodedImage,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> DecodedImage {
    let turn = angle_degrees.rem_euclid(360.0);

    match right_angle_multiple(turn) {
        Some(0) => return image.clone(),
        Some(1) => return rotate90_ccw(image),
        Some(2) => return rotate180(image),
        Some(3) => return rotate90_cw(image),
        _ => {}
    }

    let (out_w, out_h) = compute_rotated_bounds(image.width, image.height, turn);

    // Inverse mapping runs the opposite rotation, so negate here to make
    // positive angles come out counter-clockwise on screen.
    let (sin, cos) = (-turn.to_radians()).sin_cos();

    let src_cx = f64::from(image.width) / 2.0;
    let src_cy = f64::from(image.height) / 2.0;
    let out_cx = f64::from(out_w) / 2.0;
    let out_cy = f64::from(out_h) / 2.0;

    let mut pixels = vec![0u8; (out_w * out_h * 3) as usize];

    for (row_index, row) in pixels.chunks_exact_mut((out_w * 3) as usize).enumerate() {
        let dy = row_index as f64 - out_cy;
        for (col_index, out_pixel) in row.chunks_exact_mut(3).enumerate() {
            let dx = col_index as f64 - out_cx;

            let src_x = dx * cos - dy * sin + src_cx;
            let src_y = dx * sin + dy * cos + src_cy;

            let sampled = match filter {
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y),
                InterpolationFilter::Lanczos3 => sample_lanczos3(image, src_x, src_y),
            };
            out_pixel.copy_from_slice(&sampled);
        }
    }

    DecodedImage {
        width: out_w,
        height: out_h,
        pixels,
    }
}

/// Exact 90-degree counter-clockwise remap. Output is `h x w`.
fn rotate90_ccw(image: &DecodedImage) -> DecodedImage {
    let (w, h) = (image.width as usize, image.height as usize);
    let mut pixels = vec![0u8; w * h * 3];

    // out(x, y) = src(w - 1 - y, x)
    for out_y in 0..w {
        for out_x in 0..h {
            let src_idx = (out_x * w + (w - 1 - out_y)) * 3;
            let out_idx = (out_y * h + out_x) * 3;
            pixels[out_idx..out_idx + 3].copy_from_slice(&image.pixels[src_idx..src_idx + 3]);
        }
    }

    DecodedImage {
        width: image.height,
        height: image.width,
        pixels,
    }
}

/// Exact 90-degree clockwise remap. Output is `h x w`.
fn rotate90_cw(image: &DecodedImage) -> DecodedImage {
    let (w, h) = (image.width as usize, image.height as usize);
    let mut pixels = vec![0u8; w * h * 3];

    // out(x, y) = src(y, h - 1 - x)
    for out_y in 0..w {
        for out_x in 0..h {
            let src_idx = ((h - 1 - out_x) * w + out_y) * 3;
            let out_idx = (out_y * h + out_x) * 3;
            pixels[out_idx..out_idx + 3].copy_from_slice(&image.pixels[src_idx..src_idx + 3]);
        }
    }

    DecodedImage {
        width: image.height,
        height: image.width,
        pixels,
    }
}

/// Exact 180-degree remap. Reversing pixel order reverses both axes.
fn rotate180(image: &DecodedImage) -> DecodedImage {
    let mut pixels = Vec::with_capacity(image.pixels.len());
    for pixel in image.pixels.chunks_exact(3).rev() {
        pixels.extend_from_slice(pixel);
    }

    DecodedImage {
        width: image.width,
        height: image.height,
        pixels,
    }
}

#[inline]
fn pixel_at(image: &DecodedImage, px: usize, py: usize) -> [f64; 3] {
    let idx = (py * image.width as usize + px) * 3;
    [
        f64::from(image.pixels[idx]),
        f64::from(image.pixels[idx + 1]),
        f64::from(image.pixels[idx + 2]),
    ]
}

/// Weighted average of the 2x2 neighborhood around `(x, y)`.
///
/// Out-of-range positions sample black, which is what fills the expanded
/// canvas corners.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let w = image.width as i64;
    let h = image.height as i64;

    if x < 0.0 || y < 0.0 || x >= (w - 1) as f64 || y >= (h - 1) as f64 {
        return [0, 0, 0];
    }

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let top_left = pixel_at(image, x0, y0);
    let top_right = pixel_at(image, x0 + 1, y0);
    let bottom_left = pixel_at(image, x0, y0 + 1);
    let bottom_right = pixel_at(image, x0 + 1, y0 + 1);

    let mut out = [0u8; 3];
    for (channel, slot) in out.iter_mut().enumerate() {
        let top = top_left[channel] * (1.0 - fx) + top_right[channel] * fx;
        let bottom = bottom_left[channel] * (1.0 - fx) + bottom_right[channel] * fx;
        *slot = (top * (1.0 - fy) + bottom * fy).clamp(0.0, 255.0).round() as u8;
    }
    out
}

/// Lanczos3 sample over the 6x6 neighborhood around `(x, y)`.
///
/// Positions too close to the border for the full kernel fall back to
/// bilinear rather than ringing against the edge.
fn sample_lanczos3(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let w = image.width as i64;
    let h = image.height as i64;

    if x < 2.0 || y < 2.0 || x >= (w - 3) as f64 || y >= (h - 3) as f64 {
        return sample_bilinear(image, x, y);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut accum = [0.0f64; 3];
    let mut total_weight = 0.0;

    for tap_y in (y0 - 2)..=(y0 + 3) {
        let wy = lanczos3_kernel(y - tap_y as f64);
        for tap_x in (x0 - 2)..=(x0 + 3) {
            let weight = wy * lanczos3_kernel(x - tap_x as f64);
            let pixel = pixel_at(image, tap_x as usize, tap_y as usize);
            accum[0] += pixel[0] * weight;
            accum[1] += pixel[1] * weight;
            accum[2] += pixel[2] * weight;
            total_weight += weight;
        }
    }

    let mut out = [0u8; 3];
    if total_weight > 0.0 {
        for (channel, slot) in out.iter_mut().enumerate() {
            *slot = (accum[channel] / total_weight).clamp(0.0, 255.0).round() as u8;
        }
    }
    out
}

/// Lanczos kernel with a = 3: `sinc(x) * sinc(x / 3)` for `|x| < 3`.
fn lanczos3_kernel(x: f64) -> f64 {
    const A: f64 = 3.0;

    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= A {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    (A * pi_x.sin() * (pi_x / A).sin()) / (pi_x * pi_x)
}
