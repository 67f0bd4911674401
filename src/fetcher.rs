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
    collections::{HashMap, VecDeque},
    fs::File,
    io::BufReader,
};

use cairo::{Format, ImageSurface};
use tracing::{debug, warn};

use crate::{
    error::ViewerResult,
    host::Fetcher,
    image::{Frame, Image},
};

/// Decodes the image behind a source identifier.
pub trait ImageLoader {
    fn load(&self, source: &str, index: usize) -> ViewerResult<Image>;
}

/// Loads PNG files with cairo.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngLoader;

impl ImageLoader for PngLoader {
    fn load(&self, source: &str, index: usize) -> ViewerResult<Image> {
        let mut reader = BufReader::new(File::open(source)?);
        let surface = ImageSurface::create_from_png(&mut reader)?;
        let alpha = surface.format() == Format::ARgb32;
        Image::new(source, index, vec![Frame::new(surface, 0)], alpha)
    }
}

/// [`Fetcher`] with a history of recently shown images and a store of
/// images decoded ahead of time.
pub struct CachedFetcher {
    loader: Box<dyn ImageLoader>,
    current: Option<Image>,
    /// Most recently shown images, newest first
    history: VecDeque<Image>,
    history_size: usize,
    preloaded: HashMap<usize, Image>,
    preload_size: usize,
}

impl CachedFetcher {
    pub fn new(loader: Box<dyn ImageLoader>) -> Self {
        Self {
            loader,
            current: None,
            history: VecDeque::new(),
            history_size: 0,
            preloaded: HashMap::new(),
            preload_size: 0,
        }
    }

    fn take_cached(&mut self, index: usize) -> Option<Image> {
        if let Some(image) = self.preloaded.remove(&index) {
            return Some(image);
        }
        let position = self.history.iter().position(|i| i.index == index)?;
        self.history.remove(position)
    }

    fn make_current(&mut self, image: Image) {
        let index = image.index;
        if let Some(previous) = self.current.replace(image) {
            if self.history_size > 0 {
                self.history.push_front(previous);
                self.history.truncate(self.history_size);
            }
        }
        self.prune_preloaded(index);
    }

    /// Drops preloaded images that are out of reach from `index`.
    fn prune_preloaded(&mut self, index: usize) {
        let reach = self.preload_size;
        let before = self.preloaded.len();
        self.preloaded.retain(|&i, _| i.abs_diff(index) <= reach);
        if self.preloaded.len() != before {
            debug!("dropped {} preloaded images", before - self.preloaded.len());
        }
    }

    fn load(&self, index: usize, source: &str) -> Option<Image> {
        match self.loader.load(source, index) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("Unable to load {source}: {e}");
                None
            }
        }
    }

    pub fn is_cached(&self, index: usize) -> bool {
        self.preloaded.contains_key(&index) || self.history.iter().any(|i| i.index == index)
    }
}

impl Fetcher for CachedFetcher {
    fn init(&mut self, first: Option<Image>, history: usize, preload: usize) {
        self.history_size = history;
        self.preload_size = preload;
        self.current = first;
    }

    fn current(&self) -> Option<&Image> {
        self.current.as_ref()
    }

    fn current_mut(&mut self) -> Option<&mut Image> {
        self.current.as_mut()
    }

    fn open(&mut self, index: usize, source: &str) -> bool {
        if self.current.as_ref().is_some_and(|i| i.index == index) {
            return true;
        }
        let image = match self.take_cached(index) {
            Some(image) => image,
            None => match self.load(index, source) {
                Some(image) => image,
                None => return false,
            },
        };
        self.make_current(image);
        true
    }

    fn reload(&mut self, index: usize, source: &str) -> bool {
        self.preloaded.remove(&index);
        self.history.retain(|i| i.index != index);
        match self.load(index, source) {
            Some(image) => {
                if self.current.as_ref().is_some_and(|i| i.index == index) {
                    self.current = Some(image);
                } else {
                    self.make_current(image);
                }
                true
            }
            None => false,
        }
    }

    fn attach(&mut self, mut image: Image, index: usize) {
        if self.preload_size == 0 || self.preloaded.len() >= self.preload_size {
            debug!("preload store full, dropping image {index}");
            return;
        }
        image.index = index;
        self.preloaded.insert(index, image);
    }

    fn destroy(&mut self) {
        self.current = None;
        self.history.clear();
        self.preloaded.clear();
    }
}
