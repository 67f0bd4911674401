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

use std::str::FromStr;

use crate::{
    error::{ViewerError, ViewerResult},
    rect::{PointI, SizeI},
};

use super::state::{ScalePolicy, MAX_SCALE, MIN_SCALE_PIXELS};

/// Scale factor that `policy` assigns to an `image` shown in `window`.
///
/// The result is capped at [`MAX_SCALE`]. Degenerate sizes yield 1.0.
pub fn policy_scale(policy: ScalePolicy, window: SizeI, image: SizeI) -> f64 {
    if image.is_empty() {
        return 1.0;
    }
    let scale_w = window.width() as f64 / image.width() as f64;
    let scale_h = window.height() as f64 / image.height() as f64;

    let scale = match policy {
        ScalePolicy::Optimal => scale_w.min(scale_h).min(1.0),
        ScalePolicy::Fit => scale_w.min(scale_h),
        ScalePolicy::Width => scale_w,
        ScalePolicy::Height => scale_h,
        ScalePolicy::Fill => scale_w.max(scale_h),
        ScalePolicy::Real => 1.0,
    };

    if scale.is_finite() && scale > 0.0 {
        scale.min(MAX_SCALE)
    } else {
        1.0
    }
}

/// Smallest scale at which both sides of `image` stay at least
/// [`MIN_SCALE_PIXELS`] long.
pub fn min_scale(image: SizeI) -> f64 {
    if image.is_empty() {
        return 0.0;
    }
    (MIN_SCALE_PIXELS / image.width() as f64).max(MIN_SCALE_PIXELS / image.height() as f64)
}

/// Parameter of the zoom action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomSpec {
    /// Apply a scale policy
    Policy(ScalePolicy),
    /// Relative change in percent of the current scale, never 0
    Percent(i64),
}

impl FromStr for ZoomSpec {
    type Err = ViewerError;

    fn from_str(s: &str) -> ViewerResult<Self> {
        let s = s.trim();
        if let Ok(policy) = s.parse::<ScalePolicy>() {
            return Ok(ZoomSpec::Policy(policy));
        }
        match s.parse::<i64>() {
            Ok(percent) if percent != 0 && percent > -1000 && percent < 1000 => {
                Ok(ZoomSpec::Percent(percent))
            }
            _ => Err(ViewerError::invalid("zoom", s)),
        }
    }
}

/// Outcome of a relative zoom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoomed {
    pub scale: f64,
    pub position: PointI,
}

/// Zooms by `percent` around the window center.
///
/// The image point under the window center keeps its screen location, up to
/// rounding to whole pixels. Zooming in stops at [`MAX_SCALE`], zooming out
/// at [`min_scale`] of `image`.
pub fn zoom_at_center(scale: f64, position: PointI, percent: i64, window: SizeI, image: SizeI) -> Zoomed {
    let half_w = window.width() as f64 / 2.0;
    let half_h = window.height() as f64 / 2.0;

    // pivot in image coordinates
    let center_x = half_w / scale - position.x() as f64 / scale;
    let center_y = half_h / scale - position.y() as f64 / scale;

    let step = (scale / 100.0) * percent as f64;
    let new_scale = if percent > 0 {
        (scale + step).min(MAX_SCALE)
    } else {
        (scale + step).max(min_scale(image))
    };

    Zoomed {
        scale: new_scale,
        position: PointI::new(
            (half_w - center_x * new_scale).round() as i64,
            (half_h - center_y * new_scale).round() as i64,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    const WINDOWS: [(i64, i64); 4] = [(800, 600), (1920, 1080), (300, 900), (77, 13)];
    const IMAGES: [(i64, i64); 5] = [(20, 20), (640, 480), (4000, 3000), (123, 4567), (1, 1)];

    #[test]
    fn test_policy_relations() {
        for &(ww, wh) in &WINDOWS {
            for &(iw, ih) in &IMAGES {
                let window = SizeI::new(ww, wh);
                let image = SizeI::new(iw, ih);
                let optimal = policy_scale(ScalePolicy::Optimal, window, image);
                let fit = policy_scale(ScalePolicy::Fit, window, image);
                let fill = policy_scale(ScalePolicy::Fill, window, image);
                assert!(optimal <= 1.0);
                assert_eq!(optimal, fit.min(1.0));
                assert!(fill >= fit);
                assert_eq!(policy_scale(ScalePolicy::Real, window, image), 1.0);
            }
        }
    }

    #[test]
    fn test_policy_values() {
        let window = SizeI::new(800, 600);
        let image = SizeI::new(400, 200);
        assert!(approx_eq(policy_scale(ScalePolicy::Optimal, window, image), 1.0, 1e-9));
        assert!(approx_eq(policy_scale(ScalePolicy::Fit, window, image), 2.0, 1e-9));
        assert!(approx_eq(policy_scale(ScalePolicy::Width, window, image), 2.0, 1e-9));
        assert!(approx_eq(policy_scale(ScalePolicy::Height, window, image), 3.0, 1e-9));
        assert!(approx_eq(policy_scale(ScalePolicy::Fill, window, image), 3.0, 1e-9));
    }

    #[test]
    fn test_policy_capped() {
        let window = SizeI::new(1000, 1000);
        let image = SizeI::new(1, 1);
        assert_eq!(policy_scale(ScalePolicy::Fill, window, image), MAX_SCALE);
        assert_eq!(policy_scale(ScalePolicy::Fit, SizeI::new(0, 0), image), 1.0);
        assert_eq!(policy_scale(ScalePolicy::Fit, window, SizeI::new(0, 5)), 1.0);
    }

    #[test]
    fn test_zoom_spec_parse() {
        assert_eq!("fill".parse::<ZoomSpec>().unwrap(), ZoomSpec::Policy(ScalePolicy::Fill));
        assert_eq!("+10".parse::<ZoomSpec>().unwrap(), ZoomSpec::Percent(10));
        assert_eq!("-999".parse::<ZoomSpec>().unwrap(), ZoomSpec::Percent(-999));
        for bad in ["0", "1000", "-1000", "ten", "", "1.5"] {
            assert!(bad.parse::<ZoomSpec>().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_zoom_keeps_pivot() {
        let window = SizeI::new(800, 600);
        let image = SizeI::new(4000, 3000);
        for &scale in &[0.25, 1.0, 3.7] {
            for &position in &[PointI::new(-1000, -700), PointI::new(13, -29), PointI::new(-3, 250)] {
                for &percent in &[10, 50, 999, -10, -50, -90, -999] {
                    let pivot_x = (400.0 - position.x() as f64) / scale;
                    let pivot_y = (300.0 - position.y() as f64) / scale;
                    let zoomed = zoom_at_center(scale, position, percent, window, image);
                    let screen_x = zoomed.position.x() as f64 + pivot_x * zoomed.scale;
                    let screen_y = zoomed.position.y() as f64 + pivot_y * zoomed.scale;
                    assert!(approx_eq(screen_x, 400.0, 0.5 + 1e-9), "{scale} {percent}");
                    assert!(approx_eq(screen_y, 300.0, 0.5 + 1e-9), "{scale} {percent}");
                }
            }
        }
    }

    #[test]
    fn test_zoom_in_converges_to_max() {
        let window = SizeI::new(800, 600);
        let image = SizeI::new(640, 480);
        let mut zoomed = Zoomed { scale: 1.0, position: PointI::new(80, 60) };
        for _ in 0..10 {
            zoomed = zoom_at_center(zoomed.scale, zoomed.position, 900, window, image);
        }
        assert_eq!(zoomed.scale, MAX_SCALE);
    }

    #[test]
    fn test_zoom_out_converges_to_min() {
        let window = SizeI::new(800, 600);
        let image = SizeI::new(20, 20);
        let mut zoomed = Zoomed { scale: 1.0, position: PointI::new(390, 290) };
        for _ in 0..10 {
            zoomed = zoom_at_center(zoomed.scale, zoomed.position, -900, window, image);
        }
        assert_eq!(zoomed.scale, 0.5);
    }

    #[test]
    fn test_min_scale() {
        assert_eq!(min_scale(SizeI::new(20, 20)), 0.5);
        assert_eq!(min_scale(SizeI::new(1000, 100)), 0.1);
    }
}
