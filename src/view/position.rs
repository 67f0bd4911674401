// MViewer -- Interactive image viewing engine built with Rust, glib and cairo
//
// Copyright (c) 2024-2025 Martin van der Werff <github (at) newinnovations.nl>
//
// This file is part of MViewer.
//
// MViewer is free software: you can redistribute it and/or modify it under the terms of
// the GNU Affero General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR
// IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND
// FITNESS FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY
// DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT
// LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR
// BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
// STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use crate::rect::{PointI, SizeI};

use super::state::{Anchor, AxisRule, ViewerState};

/// Size of `size` on screen at `scale`, rounded down to whole pixels.
pub fn scaled_size(scale: f64, size: SizeI) -> SizeI {
    SizeI::new(
        (scale * size.width() as f64).floor() as i64,
        (scale * size.height() as f64).floor() as i64,
    )
}

/// Fixes one coordinate of the image origin.
///
/// * `pos` - current coordinate
/// * `rule` - placement of the anchor on this axis
/// * `window`, `image` - window length and scaled image length on this axis
fn fixup_axis(pos: i64, rule: AxisRule, fixed: bool, force: bool, window: i64, image: i64) -> i64 {
    let mut pos = if force || (fixed && image <= window) {
        rule.place(window, image)
    } else {
        pos
    };

    if fixed {
        // keep a pinned image against the window border
        if pos > 0 && pos + image > window {
            pos = 0;
        }
        if pos < 0 && pos + image < window {
            pos = window - image;
        }
    }

    // never further out than can be dragged back
    if pos + image < 0 {
        pos = -image;
    }
    if pos > window {
        pos = window;
    }
    pos
}

/// Recomputes the image origin for the given anchor and sizes.
///
/// With `force` every axis is placed by the anchor. Otherwise only axes on
/// which the image fits the window are placed, and only in fixed mode.
pub fn fixup_position(
    position: PointI,
    anchor: Anchor,
    fixed: bool,
    force: bool,
    window: SizeI,
    image: SizeI,
) -> PointI {
    let (horizontal, vertical) = anchor.rules();
    PointI::new(
        fixup_axis(position.x(), horizontal, fixed, force, window.width(), image.width()),
        fixup_axis(position.y(), vertical, fixed, force, window.height(), image.height()),
    )
}

impl ViewerState {
    /// Applies [`fixup_position`] to the state for a frame of `frame` size.
    pub fn fixup_position(&mut self, force: bool, window: SizeI, frame: SizeI) {
        self.position = fixup_position(
            self.position,
            self.anchor,
            self.fixed,
            force,
            window,
            scaled_size(self.scale, frame),
        );
    }

    /// Moves the viewport by (`dx`, `dy`), returns true if the position changed.
    pub fn drag(&mut self, dx: i64, dy: i64, window: SizeI, frame: SizeI) -> bool {
        let old = self.position;
        self.position = self.position + PointI::new(dx, dy);
        if self.position == old {
            return false;
        }
        self.fixup_position(false, window, frame);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: [(i64, i64); 5] = [(1, 1), (40, 30), (100, 80), (101, 81), (640, 480)];

    fn expected(rule: AxisRule, window: i64, image: i64) -> i64 {
        match rule {
            AxisRule::Start => 0,
            AxisRule::End => window - image,
            AxisRule::Center => (window - image).div_euclid(2),
        }
    }

    #[test]
    fn test_scaled_size_floors() {
        assert_eq!(scaled_size(1.0, SizeI::new(30, 20)), SizeI::new(30, 20));
        assert_eq!(scaled_size(0.5, SizeI::new(33, 21)), SizeI::new(16, 10));
        assert_eq!(scaled_size(1.999, SizeI::new(1, 2)), SizeI::new(1, 3));
    }

    #[test]
    fn test_forced_fixup_follows_anchor() {
        let window = SizeI::new(100, 80);
        for anchor in Anchor::ALL {
            let (h, v) = anchor.rules();
            for fixed in [false, true] {
                for &(w, ht) in &SIZES {
                    for start in [PointI::new(-500, 7), PointI::new(33, -2), PointI::new(0, 0)] {
                        let image = SizeI::new(w, ht);
                        let pos = fixup_position(start, anchor, fixed, true, window, image);
                        assert_eq!(
                            pos,
                            PointI::new(expected(h, 100, w), expected(v, 80, ht)),
                            "anchor {anchor:?} fixed {fixed} image {image}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_unforced_keeps_large_image() {
        let window = SizeI::new(100, 80);
        let image = SizeI::new(300, 200);
        let start = PointI::new(-50, -40);
        for fixed in [false, true] {
            let pos = fixup_position(start, Anchor::Center, fixed, false, window, image);
            assert_eq!(pos, start);
        }
    }

    #[test]
    fn test_unforced_fixed_pins_small_image() {
        let window = SizeI::new(100, 80);
        let image = SizeI::new(40, 300);
        let pos = fixup_position(PointI::new(-17, -10), Anchor::TopRight, true, false, window, image);
        // x fits and is pinned, y does not fit and stays
        assert_eq!(pos, PointI::new(60, -10));
        let pos = fixup_position(PointI::new(-17, -10), Anchor::TopRight, false, false, window, image);
        assert_eq!(pos, PointI::new(-17, -10));
    }

    #[test]
    fn test_fixed_snaps_to_border() {
        let window = SizeI::new(100, 80);
        let image = SizeI::new(200, 160);
        // gap on the left
        let pos = fixup_position(PointI::new(10, 0), Anchor::Center, true, false, window, image);
        assert_eq!(pos, PointI::new(0, 0));
        // gap on the right
        let pos = fixup_position(PointI::new(-150, -100), Anchor::Center, true, false, window, image);
        assert_eq!(pos, PointI::new(-100, -80));
        // not fixed: gaps are allowed
        let pos = fixup_position(PointI::new(10, -100), Anchor::Center, false, false, window, image);
        assert_eq!(pos, PointI::new(10, -100));
    }

    #[test]
    fn test_off_window_clamp() {
        let window = SizeI::new(100, 80);
        let image = SizeI::new(200, 160);
        let pos = fixup_position(PointI::new(-900, 500), Anchor::Center, false, false, window, image);
        assert_eq!(pos, PointI::new(-200, 80));
    }

    #[test]
    fn test_fixup_idempotent() {
        let window = SizeI::new(100, 80);
        for anchor in Anchor::ALL {
            for fixed in [false, true] {
                for &(w, h) in &SIZES {
                    let image = SizeI::new(w, h);
                    let once = fixup_position(PointI::new(-77, 55), anchor, fixed, false, window, image);
                    let twice = fixup_position(once, anchor, fixed, false, window, image);
                    assert_eq!(once, twice);
                }
            }
        }
    }

    #[test]
    fn test_drag_reversal() {
        let mut state = ViewerState {
            fixed: false,
            scale: 1.0,
            position: PointI::new(-100, -50),
            ..Default::default()
        };
        let window = SizeI::new(200, 100);
        let frame = SizeI::new(500, 400);
        assert!(state.drag(37, -12, window, frame));
        assert_eq!(state.position, PointI::new(-63, -62));
        assert!(state.drag(-37, 12, window, frame));
        assert_eq!(state.position, PointI::new(-100, -50));
        assert!(!state.drag(0, 0, window, frame));
    }
}
