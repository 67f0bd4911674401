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

use std::{
    fs::{create_dir_all, File},
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::ViewerResult,
    image::colors::Color,
    view::{Anchor, AntiAlias, Background, ScalePolicy},
};

pub const MAX_CACHE_SIZE: usize = 1024;
pub const MAX_SLIDESHOW_TIME: u64 = 86400;

/// Settings read once when the viewer starts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Pin images smaller than the window to `position`
    pub fixed: bool,
    pub antialiasing: AntiAlias,
    /// Color of the window outside the image
    pub window: Color,
    /// Background for transparent images, a color or "grid"
    pub transparency: Background,
    /// Initial scale policy
    pub scale: ScalePolicy,
    /// Keep the absolute scale when switching images
    pub keep_zoom: bool,
    /// Initial position of images smaller than the window
    pub position: Anchor,
    /// Number of previously viewed images to keep
    pub history: usize,
    /// Number of images to decode ahead
    pub preload: usize,
    pub slideshow: bool,
    /// Seconds per image in slideshow mode
    pub slideshow_time: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fixed: true,
            antialiasing: AntiAlias::Bilinear,
            window: Color::BLACK,
            transparency: Background::Grid,
            scale: ScalePolicy::Optimal,
            keep_zoom: false,
            position: Anchor::Center,
            history: 1,
            preload: 1,
            slideshow: false,
            slideshow_time: 3,
        }
    }
}

impl ViewerConfig {
    pub fn config_dir() -> PathBuf {
        let mut dir = dirs::config_dir().unwrap_or_default();
        dir.push("mviewer");
        dir
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("viewer.json")
    }

    pub fn from_reader<R: Read>(reader: R) -> ViewerResult<Self> {
        let config: ViewerConfig = serde_json::from_reader(reader)?;
        Ok(config.validate())
    }

    pub fn from_json(json: &str) -> ViewerResult<Self> {
        let config: ViewerConfig = serde_json::from_str(json)?;
        Ok(config.validate())
    }

    pub fn load(path: &Path) -> ViewerResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Configuration from the user's config file, defaults if it is absent or broken.
    pub fn load_or_default() -> Self {
        let path = Self::config_file();
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                info!("Using default viewer configuration ({}: {e})", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> ViewerResult<()> {
        if let Some(dir) = path.parent() {
            create_dir_all(dir)?;
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Replaces out of range numbers by their defaults.
    pub fn validate(mut self) -> Self {
        let defaults = Self::default();
        if self.history > MAX_CACHE_SIZE {
            warn!("Invalid history size {}, using {}", self.history, defaults.history);
            self.history = defaults.history;
        }
        if self.preload > MAX_CACHE_SIZE {
            warn!("Invalid preload count {}, using {}", self.preload, defaults.preload);
            self.preload = defaults.preload;
        }
        if !(1..=MAX_SLIDESHOW_TIME).contains(&self.slideshow_time) {
            warn!(
                "Invalid slideshow time {}, using {}",
                self.slideshow_time, defaults.slideshow_time
            );
            self.slideshow_time = defaults.slideshow_time;
        }
        self
    }
}
