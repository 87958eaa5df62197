//! Slice layout and pointer arithmetic.
//!
//! Angles are radians in the drawing frame: 0 points at 3 o'clock and
//! positive angles sweep clockwise on screen.

use std::f64::consts::TAU;

/// Logical drawing surface, in units.
pub const SURFACE_SIZE: f64 = 500.0;
pub const WHEEL_CENTER: (f64, f64) = (SURFACE_SIZE / 2.0, SURFACE_SIZE / 2.0);
pub const WHEEL_RADIUS: f64 = 250.0;
/// Labels are right-aligned so that they end at this distance from the center.
pub const LABEL_RADIUS: f64 = 230.0;

/// Fixed pointer that picks the winner.
pub const POINTER_ANGLE: f64 = 0.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SliceColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        SliceColor { r, g, b }
    }
}

pub const PALETTE: [SliceColor; 5] = [
    SliceColor::rgb(0x00, 0xbf, 0xa5),
    SliceColor::rgb(0xef, 0x53, 0x50),
    SliceColor::rgb(0xff, 0xeb, 0x3b),
    SliceColor::rgb(0x64, 0xb5, 0xf6),
    SliceColor::rgb(0xba, 0x68, 0xc8),
];

#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    pub index: usize,
    pub label: String,
    pub start_angle: f64,
    pub sweep: f64,
    pub color: SliceColor,
}

impl Slice {
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep / 2.0
    }

    /// Whether `angle` (any winding) falls inside this slice.
    pub fn contains(&self, angle: f64) -> bool {
        let offset = (angle - self.start_angle).rem_euclid(TAU);
        offset < self.sweep
    }
}

pub fn slice_arc(count: usize) -> f64 {
    TAU / count as f64
}

pub fn palette_color(index: usize) -> SliceColor {
    PALETTE[index % PALETTE.len()]
}

/// Lays out one slice per name, in list order, starting at `rotation`.
pub fn wheel_layout(names: &[String], rotation: f64) -> Vec<Slice> {
    if names.is_empty() {
        return Vec::new();
    }
    let arc = slice_arc(names.len());
    names
        .iter()
        .enumerate()
        .map(|(index, name)| Slice {
            index,
            label: name.clone(),
            start_angle: rotation + index as f64 * arc,
            sweep: arc,
            color: palette_color(index),
        })
        .collect()
}

/// Index of the slice covering `angle` on a wheel of `count` slices turned
/// by `rotation`. `None` only when `count` is zero.
///
/// Slice `i` covers `[rotation + i·arc, rotation + (i+1)·arc)`, so `angle`
/// sits `(angle - rotation) mod 2π` past the leading edge of slice 0.
pub fn slice_at(count: usize, rotation: f64, angle: f64) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let offset = (angle - rotation).rem_euclid(TAU);
    let index = (offset / slice_arc(count)).floor() as usize;
    // rem_euclid may round up to exactly TAU
    Some(index.min(count - 1))
}

/// Index of the slice under [`POINTER_ANGLE`].
pub fn winner_index(count: usize, rotation: f64) -> Option<usize> {
    slice_at(count, rotation, POINTER_ANGLE)
}

/// Point on the wheel at `radius` along `angle`, in surface coordinates
/// with y growing downward.
pub fn polar_point(angle: f64, radius: f64) -> (f64, f64) {
    (
        WHEEL_CENTER.0 + radius * angle.cos(),
        WHEEL_CENTER.1 + radius * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("p{i}")).collect()
    }

    #[test]
    fn wheel_layout__empty_list_draws_nothing() {
        assert!(wheel_layout(&[], 1.0).is_empty());
    }

    #[test]
    fn wheel_layout__cycles_palette() {
        let layout = wheel_layout(&names(7), 0.0);
        assert_eq!(layout[0].color, PALETTE[0]);
        assert_eq!(layout[5].color, PALETTE[0]);
        assert_eq!(layout[6].color, PALETTE[1]);
    }

    #[test]
    fn winner_index__picks_slice_under_pointer() {
        // four slices, unrotated: slice 0 spans [0, π/2) which holds the pointer
        assert_eq!(winner_index(4, 0.0), Some(0));
        // just short of a quarter turn clockwise, slice 3 reaches the pointer
        assert_eq!(winner_index(4, PI / 2.0 - 0.01), Some(3));
        assert_eq!(winner_index(4, PI / 2.0 + 0.01), Some(2));
        assert_eq!(winner_index(4, PI + 0.01), Some(1));
        assert_eq!(winner_index(0, 0.3), None);
    }

    #[test]
    fn winner_index__handles_tiny_negative_offsets() {
        assert_eq!(winner_index(3, 1e-18), Some(2));
        assert_eq!(winner_index(3, -1e-18), Some(0));
    }

    proptest! {
        #[test]
        fn wheel_layout__slices_are_equal_and_cover_circle(n in 1usize..64, rotation in 0.0f64..100.0) {
            let layout = wheel_layout(&names(n), rotation);
            prop_assert_eq!(layout.len(), n);
            let total: f64 = layout.iter().map(|s| s.sweep).sum();
            prop_assert!((total - TAU).abs() < 1e-9);
            for pair in layout.windows(2) {
                prop_assert!((pair[0].sweep - pair[1].sweep).abs() < 1e-12);
                prop_assert!((pair[0].start_angle + pair[0].sweep - pair[1].start_angle).abs() < 1e-9);
            }
        }

        #[test]
        fn wheel_layout__is_idempotent(n in 0usize..32, rotation in -50.0f64..50.0) {
            let list = names(n);
            prop_assert_eq!(wheel_layout(&list, rotation), wheel_layout(&list, rotation));
        }

        #[test]
        fn winner_index__always_in_range(n in 1usize..200, rotation in -1e6f64..1e6) {
            let index = winner_index(n, rotation).unwrap();
            prop_assert!(index < n);
        }

        #[test]
        fn winner_index__slice_contains_pointer(n in 1usize..50, rotation in 0.0f64..1000.0) {
            let layout = wheel_layout(&names(n), rotation);
            let index = winner_index(n, rotation).unwrap();
            let slice = &layout[index];
            // tolerate boundary rounding by checking a hair inside the pointer
            let near = slice.contains(POINTER_ANGLE)
                || slice.contains(POINTER_ANGLE + 1e-9)
                || slice.contains(POINTER_ANGLE - 1e-9);
            prop_assert!(near);
        }
    }
}
