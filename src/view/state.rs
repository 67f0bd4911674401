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

use std::{fmt::Display, str::FromStr, time::Duration};

use cairo::Filter;
use serde::{Deserialize, Serialize};

use crate::{
    config::ViewerConfig,
    error::{ViewerError, ViewerResult},
    image::colors::Color,
    rect::{PointI, SizeI},
};

/// Maximum allowed scale factor (10000%)
pub const MAX_SCALE: f64 = 100.0;
/// Smallest size in pixels the shorter scaled image side may shrink to
pub const MIN_SCALE_PIXELS: f64 = 10.0;

/// Named rule that derives a scale factor from image and window size.
///
/// The declaration order is the cycle order used when the scale action is
/// given without a parameter.
#[derive(Default, Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalePolicy {
    /// Fit the window, but never enlarge
    #[default]
    Optimal,
    /// Fit the window, enlarging small images
    Fit,
    /// Fit the window width
    Width,
    /// Fit the window height
    Height,
    /// Cover the whole window, cropping the image
    Fill,
    /// One image pixel per screen pixel
    Real,
}

impl ScalePolicy {
    pub const ALL: [ScalePolicy; 6] = [
        ScalePolicy::Optimal,
        ScalePolicy::Fit,
        ScalePolicy::Width,
        ScalePolicy::Height,
        ScalePolicy::Fill,
        ScalePolicy::Real,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScalePolicy::Optimal => "optimal",
            ScalePolicy::Fit => "fit",
            ScalePolicy::Width => "width",
            ScalePolicy::Height => "height",
            ScalePolicy::Fill => "fill",
            ScalePolicy::Real => "real",
        }
    }

    /// The policy following this one, wrapping after the last.
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl FromStr for ScalePolicy {
    type Err = ViewerError;

    fn from_str(s: &str) -> ViewerResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| ViewerError::invalid("scale", s))
    }
}

impl Display for ScalePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Placement rule on a single axis.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum AxisRule {
    /// Align with the left or top window edge
    Start,
    /// Share the remaining space equally
    Center,
    /// Align with the right or bottom window edge
    End,
}

impl AxisRule {
    /// Coordinate of an `image` long segment within a `window` long one.
    pub fn place(&self, window: i64, image: i64) -> i64 {
        match self {
            AxisRule::Start => 0,
            AxisRule::Center => (window - image).div_euclid(2),
            AxisRule::End => window - image,
        }
    }
}

/// Where an image sits when it is smaller than the window.
#[derive(Default, Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Top,
    #[default]
    Center,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// (anchor, horizontal rule, vertical rule)
const ANCHOR_RULES: [(Anchor, AxisRule, AxisRule); 9] = [
    (Anchor::Top, AxisRule::Center, AxisRule::Start),
    (Anchor::Center, AxisRule::Center, AxisRule::Center),
    (Anchor::Bottom, AxisRule::Center, AxisRule::End),
    (Anchor::Left, AxisRule::Start, AxisRule::Center),
    (Anchor::Right, AxisRule::End, AxisRule::Center),
    (Anchor::TopLeft, AxisRule::Start, AxisRule::Start),
    (Anchor::TopRight, AxisRule::End, AxisRule::Start),
    (Anchor::BottomLeft, AxisRule::Start, AxisRule::End),
    (Anchor::BottomRight, AxisRule::End, AxisRule::End),
];

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::Top,
        Anchor::Center,
        Anchor::Bottom,
        Anchor::Left,
        Anchor::Right,
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
    ];

    /// Horizontal and vertical placement rule
    pub fn rules(&self) -> (AxisRule, AxisRule) {
        ANCHOR_RULES
            .iter()
            .find(|(anchor, _, _)| anchor == self)
            .map(|&(_, h, v)| (h, v))
            .unwrap_or((AxisRule::Center, AxisRule::Center))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Anchor::Top => "top",
            Anchor::Center => "center",
            Anchor::Bottom => "bottom",
            Anchor::Left => "left",
            Anchor::Right => "right",
            Anchor::TopLeft => "topleft",
            Anchor::TopRight => "topright",
            Anchor::BottomLeft => "bottomleft",
            Anchor::BottomRight => "bottomright",
        }
    }
}

impl FromStr for Anchor {
    type Err = ViewerError;

    fn from_str(s: &str) -> ViewerResult<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| ViewerError::invalid("position", s))
    }
}

/// Resampling used when the scale is not exactly 1.0.
#[derive(Default, Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AntiAlias {
    None,
    Fast,
    Good,
    #[default]
    Bilinear,
    Best,
}

impl AntiAlias {
    pub const ALL: [AntiAlias; 5] = [
        AntiAlias::None,
        AntiAlias::Fast,
        AntiAlias::Good,
        AntiAlias::Bilinear,
        AntiAlias::Best,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AntiAlias::None => "none",
            AntiAlias::Fast => "fast",
            AntiAlias::Good => "good",
            AntiAlias::Bilinear => "bilinear",
            AntiAlias::Best => "best",
        }
    }

    pub fn filter(&self) -> Filter {
        match self {
            AntiAlias::None => Filter::Nearest,
            AntiAlias::Fast => Filter::Fast,
            AntiAlias::Good => Filter::Good,
            AntiAlias::Bilinear => Filter::Bilinear,
            AntiAlias::Best => Filter::Best,
        }
    }

    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|a| a == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Selects the named mode, or the next one when `param` is absent.
    pub fn switch(&self, param: Option<&str>) -> ViewerResult<Self> {
        match param {
            Some(name) => name.parse(),
            None => Ok(self.next()),
        }
    }
}

impl FromStr for AntiAlias {
    type Err = ViewerError;

    fn from_str(s: &str) -> ViewerResult<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| ViewerError::invalid("anti-aliasing mode", s))
    }
}

/// What is painted behind a transparent image.
#[derive(Default, Debug, Eq, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Background {
    /// Checker pattern
    #[default]
    Grid,
    Color(Color),
}

impl FromStr for Background {
    type Err = ViewerError;

    fn from_str(s: &str) -> ViewerResult<Self> {
        if s == "grid" {
            Ok(Background::Grid)
        } else {
            Ok(Background::Color(s.parse()?))
        }
    }
}

impl From<Background> for String {
    fn from(background: Background) -> Self {
        match background {
            Background::Grid => "grid".to_string(),
            Background::Color(color) => color.to_string(),
        }
    }
}

impl TryFrom<String> for Background {
    type Error = ViewerError;

    fn try_from(value: String) -> ViewerResult<Self> {
        value.parse()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnimationState {
    pub enabled: bool,
    /// False when the timer could not be registered
    pub available: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SlideshowState {
    pub enabled: bool,
    /// False when the timer could not be registered
    pub available: bool,
    pub duration: Duration,
}

/// Everything the viewer knows about how the current image is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    /// Top-left corner of the image in window coordinates
    pub position: PointI,
    /// Size of the image the state was last reset for
    pub image_size: SizeI,
    /// Current frame, always below the number of frames
    pub frame: usize,
    pub image_background: Background,
    pub window_background: Color,
    pub antialias: AntiAlias,
    /// Pin images smaller than the window to the anchor
    pub fixed: bool,
    pub scale_policy: ScalePolicy,
    pub keep_zoom: bool,
    pub anchor: Anchor,
    /// Current scale factor, 0.0 until the first image has been shown
    pub scale: f64,
    pub animation: AnimationState,
    pub slideshow: SlideshowState,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

impl ViewerState {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            position: PointI::default(),
            image_size: SizeI::default(),
            frame: 0,
            image_background: config.transparency,
            window_background: config.window,
            antialias: config.antialiasing,
            fixed: config.fixed,
            scale_policy: config.scale,
            keep_zoom: config.keep_zoom,
            anchor: config.position,
            scale: 0.0,
            animation: AnimationState {
                enabled: false,
                available: true,
            },
            slideshow: SlideshowState {
                enabled: config.slideshow,
                available: true,
                duration: Duration::from_secs(config.slideshow_time),
            },
        }
    }

    /// True before the first image has been reset into view.
    pub fn is_unscaled(&self) -> bool {
        self.scale <= 0.0
    }

    /// Scale readout, rounded to whole percents
    pub fn scale_percent(&self) -> i64 {
        (self.scale * 100.0).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_policy_cycle() {
        let mut policy = ScalePolicy::Fit;
        for _ in 0..ScalePolicy::ALL.len() {
            policy = policy.next();
        }
        assert_eq!(policy, ScalePolicy::Fit);
        assert_eq!(ScalePolicy::Real.next(), ScalePolicy::Optimal);
    }

    #[test]
    fn test_scale_policy_names() {
        for policy in ScalePolicy::ALL {
            assert_eq!(policy.name().parse::<ScalePolicy>().unwrap(), policy);
        }
        assert!("zoom".parse::<ScalePolicy>().is_err());
        assert!("".parse::<ScalePolicy>().is_err());
    }

    #[test]
    fn test_anchor_rules() {
        assert_eq!(Anchor::TopRight.rules(), (AxisRule::End, AxisRule::Start));
        assert_eq!(Anchor::Left.rules(), (AxisRule::Start, AxisRule::Center));
        assert_eq!(Anchor::BottomLeft.rules(), (AxisRule::Start, AxisRule::End));
        // every anchor has its own pair of rules
        let mut seen = std::collections::HashSet::new();
        for anchor in Anchor::ALL {
            assert!(seen.insert(anchor.rules()));
        }
    }

    #[test]
    fn test_axis_rule_place() {
        assert_eq!(AxisRule::Start.place(100, 40), 0);
        assert_eq!(AxisRule::Center.place(100, 40), 30);
        assert_eq!(AxisRule::End.place(100, 40), 60);
        // larger than the window
        assert_eq!(AxisRule::Center.place(100, 141), -21);
        assert_eq!(AxisRule::End.place(100, 140), -40);
    }

    #[test]
    fn test_antialias_switch() {
        assert_eq!(AntiAlias::Best.switch(None).unwrap(), AntiAlias::None);
        assert_eq!(AntiAlias::None.switch(Some("good")).unwrap(), AntiAlias::Good);
        assert!(AntiAlias::None.switch(Some("smooth")).is_err());
        assert_eq!(AntiAlias::Bilinear.filter(), Filter::Bilinear);
    }

    #[test]
    fn test_background_parse() {
        assert_eq!("grid".parse::<Background>().unwrap(), Background::Grid);
        assert_eq!(
            "#ff0000".parse::<Background>().unwrap(),
            Background::Color(Color::argb(0xffff0000))
        );
        assert!("checker".parse::<Background>().is_err());
    }

    #[test]
    fn test_state_from_default_config() {
        let state = ViewerState::default();
        assert!(state.is_unscaled());
        assert!(state.fixed);
        assert_eq!(state.scale_policy, ScalePolicy::Optimal);
        assert_eq!(state.anchor, Anchor::Center);
        assert_eq!(state.antialias, AntiAlias::Bilinear);
        assert_eq!(state.image_background, Background::Grid);
        assert_eq!(state.slideshow.duration, Duration::from_secs(3));
        assert!(!state.slideshow.enabled);
    }

    #[test]
    fn test_scale_percent_rounds() {
        let mut state = ViewerState::default();
        for (scale, percent) in [(1.0, 100), (0.333, 33), (0.6666, 67), (100.0, 10000)] {
            state.scale = scale;
            assert_eq!(state.scale_percent(), percent);
        }
    }
}
