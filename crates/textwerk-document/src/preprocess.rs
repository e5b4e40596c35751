// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR image preprocessing — grayscale conversion, contrast normalization,
// sharpening, and fixed-threshold binarization of rasterized pages.

use image::{DynamicImage, GrayImage, Luma};
use imageproc::filter::filter3x3;
use tracing::{debug, instrument};

/// 3x3 sharpening kernel. Counteracts rasterization blur before thresholding.
const SHARPEN_KERNEL: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

/// Prepare a rasterized page for OCR.
///
/// Pipeline, fixed order (recognition accuracy depends on each step):
///
/// 1. Convert to single-channel grayscale.
/// 2. Stretch the luminance histogram to the full 0–255 range.
/// 3. Apply a 3x3 sharpening convolution.
/// 4. Binarize against `threshold`: darker pixels become black (0),
///    everything else white (255).
///
/// Pure function — the input image is not modified.
#[instrument(skip(image), fields(width = image.width(), height = image.height(), threshold))]
pub fn preprocess_page(image: &DynamicImage, threshold: u8) -> GrayImage {
    let gray = image.to_luma8();
    let stretched = stretch_contrast(&gray);
    let sharpened: GrayImage = filter3x3::<Luma<u8>, f32, u8>(&stretched, &SHARPEN_KERNEL);
    let binary = binarize(&sharpened, threshold);
    debug!("page preprocessing complete");
    binary
}

/// Linearly stretch the luminance histogram to use the full 0–255 range.
///
/// Improves separation between ink and background on low-contrast scans.
/// A uniform image (no range to stretch) is returned unchanged.
fn stretch_contrast(gray: &GrayImage) -> GrayImage {
    let mut min_val = 255u8;
    let mut max_val = 0u8;
    for pixel in gray.pixels() {
        let val = pixel.0[0];
        min_val = min_val.min(val);
        max_val = max_val.max(val);
    }

    if max_val == min_val {
        return gray.clone();
    }

    let range = (max_val - min_val) as f32;
    let (width, height) = gray.dimensions();
    let mut output = GrayImage::new(width, height);
    for (x, y, pixel) in gray.enumerate_pixels() {
        let stretched = ((pixel.0[0] - min_val) as f32 / range * 255.0).round() as u8;
        output.put_pixel(x, y, Luma([stretched]));
    }
    output
}

/// Reduce a grayscale image to a strict two-tone image.
///
/// Every pixel with luminance below `threshold` becomes black, all others
/// white. Two-tone input materially improves OCR segmentation on text scans.
fn binarize(gray: &GrayImage, threshold: u8) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut output = GrayImage::new(width, height);
    for (x, y, pixel) in gray.enumerate_pixels() {
        let binary = if pixel.0[0] < threshold { 0u8 } else { 255u8 };
        output.put_pixel(x, y, Luma([binary]));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn binarize_splits_at_threshold() {
        let mut img = GrayImage::new(3, 1);
        img.put_pixel(0, 0, Luma([0u8]));
        img.put_pixel(1, 0, Luma([179u8]));
        img.put_pixel(2, 0, Luma([180u8]));

        let binary = binarize(&img, 180);
        assert_eq!(binary.get_pixel(0, 0).0[0], 0);
        assert_eq!(binary.get_pixel(1, 0).0[0], 0);
        assert_eq!(binary.get_pixel(2, 0).0[0], 255);
    }

    #[test]
    fn stretch_contrast_uses_full_range() {
        let mut img = GrayImage::new(3, 1);
        img.put_pixel(0, 0, Luma([100u8]));
        img.put_pixel(1, 0, Luma([150u8]));
        img.put_pixel(2, 0, Luma([200u8]));

        let stretched = stretch_contrast(&img);
        assert_eq!(stretched.get_pixel(0, 0).0[0], 0);
        assert_eq!(stretched.get_pixel(1, 0).0[0], 128);
        assert_eq!(stretched.get_pixel(2, 0).0[0], 255);
    }

    #[test]
    fn stretch_contrast_leaves_uniform_image_alone() {
        let img = GrayImage::from_pixel(4, 4, Luma([77u8]));
        let stretched = stretch_contrast(&img);
        assert!(stretched.pixels().all(|p| p.0[0] == 77));
    }

    #[test]
    fn preprocess_output_is_strictly_two_tone() {
        // Mid-gray noise field — after stretching and sharpening, every
        // surviving pixel must still land on exactly 0 or 255.
        let mut img = GrayImage::new(8, 8);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Luma([(x * 13 + y * 29) as u8]);
        }
        let dynamic = DynamicImage::ImageLuma8(img);

        let processed = preprocess_page(&dynamic, 180);
        assert!(processed.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn preprocess_preserves_dimensions() {
        let dynamic = DynamicImage::ImageRgb8(RgbImage::from_pixel(20, 30, image::Rgb([90, 90, 90])));
        let processed = preprocess_page(&dynamic, 160);
        assert_eq!(processed.dimensions(), (20, 30));
    }

    #[test]
    fn dark_page_with_light_ink_binarizes_cleanly() {
        // Low-contrast scan: background 120, ink 80. Stretching pushes the
        // background to white and the ink to black.
        let mut img = GrayImage::from_pixel(10, 10, Luma([120u8]));
        for x in 2..8 {
            img.put_pixel(x, 5, Luma([80u8]));
        }
        let processed = preprocess_page(&DynamicImage::ImageLuma8(img), 180);

        assert_eq!(processed.get_pixel(4, 5).0[0], 0, "ink must be black");
        assert_eq!(processed.get_pixel(0, 0).0[0], 255, "background must be white");
    }
}
