use std::borrow::Cow;

use image::{RgbaImage, imageops::FilterType};

/// Size of an image scaled uniformly to fit inside a box.
///
/// The scale is `min(box_w / w, box_h / h)`, so small images grow and large
/// images shrink. Each side is rounded and kept within `1..=box side`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "scaled sides are clamped to the box"
)]
pub fn fit_size(width: u32, height: u32, box_width: u32, box_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 || box_width == 0 || box_height == 0 {
        return (box_width.min(1), box_height.min(1));
    }

    let scale = (f64::from(box_width) / f64::from(width))
        .min(f64::from(box_height) / f64::from(height));

    let fitted_w = (f64::from(width) * scale).round() as u32;
    let fitted_h = (f64::from(height) * scale).round() as u32;

    (fitted_w.clamp(1, box_width), fitted_h.clamp(1, box_height))
}

/// Resize an image to exactly `width` x `height`, borrowing it when no resize is needed
pub fn resize_exact(
    img: &RgbaImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Cow<'_, RgbaImage> {
    if img.dimensions() == (width, height) {
        Cow::Borrowed(img)
    } else {
        Cow::Owned(image::imageops::resize(img, width, height, filter))
    }
}
