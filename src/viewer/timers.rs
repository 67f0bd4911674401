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

use std::time::Duration;

use tracing::debug;

use crate::{
    navigate::Direction,
    timer::{TimerKind, TimerMessage},
};

use super::Viewer;

impl Viewer {
    /// Starts the animation timer if the current image is animated, stops it otherwise.
    pub(super) fn animation_ctl(&mut self, enable: bool) {
        let mut interval = Duration::ZERO;
        let mut enable = enable && self.state.animation.available;

        if enable {
            let duration = self
                .fetcher
                .current()
                .filter(|image| image.num_frames() > 1)
                .map(|image| image.frame(self.state.frame).duration())
                .unwrap_or_default();
            enable = duration != 0;
            interval = Duration::from_millis(duration as u64);
        }

        self.state.animation.enabled = enable;
        self.scheduler.set_interval(TimerKind::Animation, interval);
    }

    pub(super) fn slideshow_ctl(&mut self, enable: bool) {
        let enable = enable && self.state.slideshow.available;
        self.state.slideshow.enabled = enable;
        let interval = if enable {
            self.state.slideshow.duration
        } else {
            Duration::ZERO
        };
        self.scheduler.set_interval(TimerKind::Slideshow, interval);
    }

    pub(super) fn on_timer(&mut self, message: TimerMessage) {
        if !self.scheduler.is_current(&message) {
            debug!("ignoring stale {:?} timer", message.kind);
            return;
        }
        match message.kind {
            TimerKind::Animation => {
                self.next_frame(true);
                self.animation_ctl(true);
            }
            TimerKind::Slideshow => {
                let moved = self.next_image(Direction::NextFile);
                self.slideshow_ctl(moved);
            }
        }
    }
}
