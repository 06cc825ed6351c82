//! Trail colors and stroke widths
//!
//! Color and width follow the normalized progress along a segment
//! (0.0 at its oldest point, 1.0 at the newest) so the trail fades in
//! towards the robot's current position.

use image::Rgb;

const DARK_ORANGE: [u8; 3] = [140, 60, 0];
const PURPLE: [u8; 3] = [156, 39, 176];
const MAGENTA: [u8; 3] = [255, 0, 255];
const BRIGHT_PINK: [u8; 3] = [255, 170, 255];

/// Outer stroke of the trailing-edge highlight
pub const HIGHLIGHT_HALO: Rgb<u8> = Rgb([255, 200, 255]);
/// Inner stroke of the trailing-edge highlight
pub const HIGHLIGHT_CORE: Rgb<u8> = Rgb([255, 100, 255]);
pub const HIGHLIGHT_HALO_WIDTH: f32 = 6.0;
pub const HIGHLIGHT_CORE_WIDTH: f32 = 2.0;

/// Marker drawn at the current position when no icon is configured
pub const CURRENT_POINT_COLOR: Rgb<u8> = Rgb([0, 0, 128]);

const MIN_WIDTH: f32 = 2.0;
const MAX_WIDTH: f32 = 6.0;

/// Color band a progress value falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailBand {
    /// Below 30%: dark orange towards purple
    Early,
    /// 30% to 70%: purple towards magenta
    Middle,
    /// From 70%: magenta towards bright pink
    Late,
}

pub fn trail_band(progress: f32) -> TrailBand {
    if progress < 0.3 {
        TrailBand::Early
    } else if progress < 0.7 {
        TrailBand::Middle
    } else {
        TrailBand::Late
    }
}

fn mix(from: [u8; 3], to: [u8; 3], t: f32) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
    Rgb([
        channel(from[0], to[0]),
        channel(from[1], to[1]),
        channel(from[2], to[2]),
    ])
}

/// Stroke color for a line ending at `progress`
pub fn trail_color(progress: f32) -> Rgb<u8> {
    let progress = progress.clamp(0.0, 1.0);
    match trail_band(progress) {
        TrailBand::Early => mix(DARK_ORANGE, PURPLE, progress / 0.3),
        TrailBand::Middle => mix(PURPLE, MAGENTA, (progress - 0.3) / 0.4),
        TrailBand::Late => mix(MAGENTA, BRIGHT_PINK, (progress - 0.7) / 0.3),
    }
}

/// Stroke width for a line ending at `progress`, 2px growing to 6px
pub fn trail_thickness(progress: f32) -> f32 {
    MIN_WIDTH + (MAX_WIDTH - MIN_WIDTH) * progress.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(trail_band(0.0), TrailBand::Early);
        assert_eq!(trail_band(0.29), TrailBand::Early);
        assert_eq!(trail_band(0.3), TrailBand::Middle);
        assert_eq!(trail_band(0.69), TrailBand::Middle);
        assert_eq!(trail_band(0.7), TrailBand::Late);
        assert_eq!(trail_band(1.0), TrailBand::Late);
    }

    #[test]
    fn test_colors_continuous_at_band_edges() {
        // Each band starts where the previous one ends
        assert_eq!(trail_color(0.3), Rgb(PURPLE));
        assert_eq!(trail_color(0.7), Rgb(MAGENTA));
        assert_eq!(trail_color(1.0), Rgb(BRIGHT_PINK));
        assert_eq!(trail_color(0.0), Rgb(DARK_ORANGE));
    }

    #[test]
    fn test_late_band_brighter_than_early() {
        let luminance = |c: Rgb<u8>| c.0.iter().map(|&v| u32::from(v)).sum::<u32>();
        assert!(luminance(trail_color(0.9)) > luminance(trail_color(0.1)));
    }

    #[test]
    fn test_thickness_monotonic() {
        assert_eq!(trail_thickness(0.0), 2.0);
        assert_eq!(trail_thickness(1.0), 6.0);

        let mut previous = 0.0;
        for i in 0..=20 {
            let width = trail_thickness(i as f32 / 20.0);
            assert!(width >= previous);
            previous = width;
        }
        assert_eq!(trail_thickness(2.0), 6.0);
    }
}
