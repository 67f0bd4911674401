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

mod actions;
mod navigate;
mod redraw;
mod timers;
mod zoom;


use tracing::{debug, warn};

use crate::{
    action::Action,
    config::ViewerConfig,
    host::{DisplayHost, Exporter, Fetcher, Overlay},
    image::Image,
    navigate::ImageList,
    rect::SizeI,
    timer::{Scheduler, TimerKind, TimerMessage},
    view::ViewerState,
};

/// Something the viewer has to react to.
#[derive(Debug)]
pub enum Event {
    Action(Action),
    /// The window needs to be painted
    Redraw,
    /// The window changed size
    Resize,
    /// Viewport moved by the pointer
    Drag { dx: i64, dy: i64 },
    /// Show the list entry at `index`
    Activate { index: usize },
    /// An image was decoded in the background
    Load { image: Image, index: usize },
    Timer(TimerMessage),
}

/// Everything the viewer talks to.
pub struct Collaborators {
    pub list: Box<dyn ImageList>,
    pub fetcher: Box<dyn Fetcher>,
    pub host: Box<dyn DisplayHost>,
    pub overlay: Box<dyn Overlay>,
    pub scheduler: Box<dyn Scheduler>,
    /// `None` when export is not supported
    pub exporter: Option<Box<dyn Exporter>>,
}

/// Interactive image viewer: owns the viewport state and applies events to it.
///
/// All methods run on the thread of the event loop, one event at a time.
pub struct Viewer {
    state: ViewerState,
    list: Box<dyn ImageList>,
    fetcher: Box<dyn Fetcher>,
    host: Box<dyn DisplayHost>,
    overlay: Box<dyn Overlay>,
    scheduler: Box<dyn Scheduler>,
    exporter: Option<Box<dyn Exporter>>,
}

impl Viewer {
    /// Creates the viewer and shows `first` if given.
    pub fn new(config: &ViewerConfig, parts: Collaborators, first: Option<Image>) -> Self {
        let Collaborators {
            list,
            mut fetcher,
            host,
            overlay,
            mut scheduler,
            exporter,
        } = parts;

        let mut state = ViewerState::from_config(config);

        state.animation.enabled = true;
        if let Err(e) = scheduler.watch(TimerKind::Animation) {
            warn!("Animation disabled: {e}");
            state.animation.available = false;
            state.animation.enabled = false;
        }
        if let Err(e) = scheduler.watch(TimerKind::Slideshow) {
            warn!("Slideshow disabled: {e}");
            state.slideshow.available = false;
            state.slideshow.enabled = false;
        }

        fetcher.init(first, config.history, config.preload);

        let mut viewer = Self {
            state,
            list,
            fetcher,
            host,
            overlay,
            scheduler,
            exporter,
        };
        if viewer.fetcher.current().is_some() {
            viewer.reset_state();
        }
        viewer
    }

    /// Stops both timers and releases the fetcher.
    pub fn destroy(&mut self) {
        self.fetcher.destroy();
        self.scheduler.release(TimerKind::Animation);
        self.scheduler.release(TimerKind::Slideshow);
        debug!("viewer destroyed");
    }

    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Action(action) => self.apply_action(&action),
            Event::Redraw => self.redraw(),
            Event::Resize => self.on_resize(),
            Event::Drag { dx, dy } => self.on_drag(dx, dy),
            Event::Activate { index } => self.activate(index),
            Event::Load { image, index } => self.fetcher.attach(image, index),
            Event::Timer(message) => self.on_timer(message),
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// The image on screen
    pub fn current(&self) -> Option<&Image> {
        self.fetcher.current()
    }

    fn window(&self) -> SizeI {
        self.host.window_size()
    }

    /// Size of the current frame in image pixels
    fn frame_size(&self) -> Option<SizeI> {
        self.fetcher
            .current()
            .map(|image| image.frame(self.state.frame).size())
    }
}
