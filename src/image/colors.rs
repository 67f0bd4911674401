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

use std::{fmt::Display, str::FromStr};

use cairo::Context;
use serde::{Deserialize, Serialize};

use crate::error::{ViewerError, ViewerResult};

/// A color stored as 0xAARRGGBB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color::argb(0xff000000);
    pub const WHITE: Color = Color::argb(0xffffffff);

    pub const fn argb(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    fn channel(&self, shift: u32) -> f64 {
        ((self.0 >> shift) & 0xff) as f64 / 255.0
    }

    pub fn alpha(&self) -> f64 {
        self.channel(24)
    }

    pub fn red(&self) -> f64 {
        self.channel(16)
    }

    pub fn green(&self) -> f64 {
        self.channel(8)
    }

    pub fn blue(&self) -> f64 {
        self.channel(0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl FromStr for Color {
    type Err = ViewerError;

    /// Accepts `#rrggbb` or `#rrggbbaa`, the leading `#` is optional.
    fn from_str(s: &str) -> ViewerResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ViewerError::InvalidColor(s.into()));
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| ViewerError::InvalidColor(s.into()))?;
        match hex.len() {
            6 => Ok(Color(0xff000000 | value)),
            8 => Ok(Color(value.rotate_right(8))),
            _ => Err(ViewerError::InvalidColor(s.into())),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ViewerError;

    fn try_from(value: String) -> ViewerResult<Self> {
        value.parse()
    }
}

impl Display for Color {
    /// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 >> 24 == 0xff {
            write!(f, "#{:06x}", self.0 & 0xffffff)
        } else {
            write!(f, "#{:08x}", self.0.rotate_left(8))
        }
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

pub trait CairoColorExt {
    fn color(&self, color: Color);
}

impl CairoColorExt for Context {
    fn color(&self, color: Color) {
        self.set_source_rgba(color.red(), color.green(), color.blue(), color.alpha());
    }
}
