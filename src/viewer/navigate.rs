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

use std::collections::HashSet;

use tracing::info;

use crate::{
    navigate::{nearest_loadable, Direction},
    overlay::InfoField,
    rect::PointI,
};

use super::Viewer;

impl Viewer {
    /// Shows the current image from its first frame with fresh scale and position.
    pub(super) fn reset_state(&mut self) {
        let Some(image) = self.fetcher.current() else {
            return;
        };
        let size = image.frame(0).size();
        let index = image.index;
        let name = image.name.clone();
        let frames = image.num_frames();

        self.state.frame = 0;

        if !self.state.keep_zoom || self.state.is_unscaled() {
            self.set_scale(self.state.scale_policy);
        } else {
            let scale = self.state.scale;
            let old = self.state.image_size;
            let dx = (scale * (old.width() - size.width()) as f64).floor() as i64;
            let dy = (scale * (old.height() - size.height()) as f64).floor() as i64;
            self.state.position = self.state.position + PointI::new(dx.div_euclid(2), dy.div_euclid(2));
            self.fixup_position(true);
        }

        self.state.image_size = size;

        self.host.set_title(&name);
        self.animation_ctl(true);
        self.slideshow_ctl(self.state.slideshow.enabled);

        if let Some(image) = self.fetcher.current() {
            self.overlay.reset(image);
        }
        self.update_scale_info();
        self.overlay.update(InfoField::ImageSize, size.to_string());
        if frames > 1 {
            self.overlay
                .update(InfoField::Frame, format!("1 of {frames}"));
        }
        if !self.list.is_empty() {
            let ordinal = self.list.ordinal(index).unwrap_or(index + 1);
            self.overlay.update(
                InfoField::Index,
                format!("{} of {}", ordinal, self.list.len()),
            );
        }

        self.host.set_content_animated(self.state.animation.enabled);
        self.host.request_redraw();
    }

    /// Opens the nearest loadable image in `direction`.
    ///
    /// Returns false when the list is exhausted, in which case exit has
    /// been requested.
    pub(super) fn next_image(&mut self, direction: Direction) -> bool {
        let from = self.fetcher.current().map(|i| i.index).unwrap_or_default();
        self.open_nearest(direction, from, HashSet::new())
    }

    /// `tried` holds entries that already failed to open during this request.
    fn open_nearest(&mut self, direction: Direction, from: usize, tried: HashSet<usize>) -> bool {
        let fetcher = &mut self.fetcher;
        let found = nearest_loadable(
            self.list.as_mut(),
            direction,
            from,
            tried,
            |index, source| fetcher.open(index, source),
        );
        match found {
            Some(_) => {
                self.reset_state();
                true
            }
            None => {
                info!("No more images to view, exit");
                self.host.exit(0);
                false
            }
        }
    }

    /// Drops the current image from the list and shows the next one.
    pub(super) fn skip_image(&mut self) -> bool {
        self.next_image(Direction::Skip)
    }

    /// Reads the current image again, or moves on if that fails.
    pub(super) fn reload(&mut self) {
        let Some(image) = self.fetcher.current() else {
            return;
        };
        let index = image.index;
        let source = image.source.clone();

        if self.fetcher.reload(index, &source) {
            self.reset_state();
            self.overlay
                .update(InfoField::Status, "Image reloaded".to_string());
        } else if self.open_nearest(Direction::Skip, index, HashSet::from([index])) {
            self.overlay.update(
                InfoField::Status,
                "Unable to update, open next file".to_string(),
            );
        }
    }

    /// Shows the entry at `index`, or the next loadable one after it.
    pub(super) fn activate(&mut self, index: usize) {
        let mut tried = HashSet::new();
        if let Some(source) = self.list.source(index).map(str::to_string) {
            if self.fetcher.open(index, &source) {
                self.reset_state();
                return;
            }
            tried.insert(index);
        }
        self.open_nearest(Direction::NextFile, index, tried);
    }

    /// Steps one frame forward or backward, wrapping at both ends.
    pub(super) fn next_frame(&mut self, forward: bool) {
        let Some(image) = self.fetcher.current() else {
            return;
        };
        let total = image.num_frames();
        let index = if forward {
            (self.state.frame + 1) % total
        } else if self.state.frame == 0 {
            total - 1
        } else {
            self.state.frame - 1
        };
        if index == self.state.frame {
            return;
        }
        let size = image.frame(index).size();

        self.state.frame = index;
        self.overlay
            .update(InfoField::Frame, format!("{} of {}", index + 1, total));
        self.overlay.update(InfoField::ImageSize, size.to_string());
        self.host.request_redraw();
    }
}
