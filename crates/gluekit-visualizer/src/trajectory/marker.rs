//! Current position marker
//!
//! Either an RGBA icon alpha-blended centered on the robot position, or a
//! plain disc when no icon is configured.

use gluekit_core::{PixelPoint, Result, TrajectoryError};
use image::imageops::FilterType;
use image::{Rgb, RgbImage, RgbaImage};
use std::path::Path;

use super::style::CURRENT_POINT_COLOR;

const DOT_RADIUS: i64 = 4;

/// Load an icon and scale it to `size` x `size`
pub fn load_marker_icon(path: &Path, size: u32) -> Result<RgbaImage> {
    let icon = image::open(path)
        .map_err(|e| TrajectoryError::AssetLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?
        .to_rgba8();
    Ok(image::imageops::resize(&icon, size, size, FilterType::Triangle))
}

/// Blend `icon` centered on `position`.
///
/// Returns false without drawing when the icon would not fit entirely
/// inside the frame.
pub fn draw_icon_at_position(icon: &RgbaImage, frame: &mut RgbImage, position: PixelPoint) -> bool {
    let (iw, ih) = icon.dimensions();
    let x1 = i64::from(position.x) - i64::from(iw / 2);
    let y1 = i64::from(position.y) - i64::from(ih / 2);
    if x1 < 0
        || y1 < 0
        || x1 + i64::from(iw) > i64::from(frame.width())
        || y1 + i64::from(ih) > i64::from(frame.height())
    {
        return false;
    }

    let (x1, y1) = (x1 as u32, y1 as u32);
    for (x, y, px) in icon.enumerate_pixels() {
        let alpha = f32::from(px[3]) / 255.0;
        let dst = frame.get_pixel_mut(x1 + x, y1 + y);
        for c in 0..3 {
            let blended = alpha * f32::from(px[c]) + (1.0 - alpha) * f32::from(dst[c]);
            dst[c] = blended.round() as u8;
        }
    }
    true
}

/// Filled disc at `position`, clipped to the frame
pub fn draw_position_dot(frame: &mut RgbImage, position: PixelPoint) {
    let (w, h) = (i64::from(frame.width()), i64::from(frame.height()));
    for dy in -DOT_RADIUS..=DOT_RADIUS {
        for dx in -DOT_RADIUS..=DOT_RADIUS {
            if dx * dx + dy * dy > DOT_RADIUS * DOT_RADIUS {
                continue;
            }
            let x = i64::from(position.x) + dx;
            let y = i64::from(position.y) + dy;
            if (0..w).contains(&x) && (0..h).contains(&y) {
                frame.put_pixel(x as u32, y as u32, CURRENT_POINT_COLOR);
            }
        }
    }
}
