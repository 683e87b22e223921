//! Pure calculation functions for letterbox geometry.
//!
//! All functions here are pure and testable without any I/O or images.

use serde::Serialize;

/// Calculate the dimensions of a source image scaled to fit inside a target
/// area without cropping or distortion.
///
/// If the source is proportionally wider than the target, the width matches
/// and the height is floored; otherwise (taller or equal aspect) the height
/// matches and the width is floored.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `target` - Target canvas dimensions (width, height)
///
/// # Returns
/// * `(width, height)` - Fit dimensions (at least one matches target)
///
/// # Examples
/// ```
/// # use letterbox::imaging::calculate_fit_dimensions;
/// // 4:3 into 16:9 → pillarboxed, height matches
/// assert_eq!(calculate_fit_dimensions((800, 600), (1280, 720)), (960, 720));
///
/// // 21:9-ish into 16:9 → letterboxed, width matches
/// assert_eq!(calculate_fit_dimensions((2560, 1080), (1280, 720)), (1280, 540));
/// ```
pub fn calculate_fit_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w as f64 / tgt_h as f64;

    if src_aspect > tgt_aspect {
        // Source is wider: width matches, bars top and bottom
        let w = tgt_w;
        let h = (w as f64 / src_aspect).floor() as u32;
        (w, h)
    } else {
        // Source is taller or equal: height matches, bars left and right
        let h = tgt_h;
        let w = (h as f64 * src_aspect).floor() as u32;
        (w, h)
    }
}

/// Offset that centers an area of size `inner` inside `outer`, using floor division.
pub fn calculate_center_offset(outer: (u32, u32), inner: (u32, u32)) -> (u32, u32) {
    (
        outer.0.saturating_sub(inner.0) / 2,
        outer.1.saturating_sub(inner.1) / 2,
    )
}

/// Where a resized image lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Resized image width.
    pub width: u32,
    /// Resized image height.
    pub height: u32,
    /// Left edge on the canvas.
    pub x: u32,
    /// Top edge on the canvas.
    pub y: u32,
}

impl Placement {
    /// Whether the resized image collapsed to zero pixels along an axis.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Calculate the full letterbox placement of `source` on a `canvas`.
pub fn calculate_placement(source: (u32, u32), canvas: (u32, u32)) -> Placement {
    let (width, height) = calculate_fit_dimensions(source, canvas);
    let (x, y) = calculate_center_offset(canvas, (width, height));
    Placement {
        width,
        height,
        x,
        y,
    }
}
