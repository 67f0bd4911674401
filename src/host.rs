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

//! Interfaces to the parts of the application that surround the viewer.

use std::path::Path;

use cairo::Context;

use crate::{
    error::ViewerResult,
    image::{Frame, Image},
    overlay::InfoField,
    rect::SizeI,
};

/// Window and application services.
pub trait DisplayHost {
    fn window_size(&self) -> SizeI;
    fn set_title(&mut self, title: &str);
    fn request_redraw(&mut self);
    /// Hint that the content changes on its own (animation)
    fn set_content_animated(&mut self, animated: bool);

    /// Starts painting the window, `None` if it can not be drawn now.
    fn begin_draw(&mut self) -> Option<Context>;
    fn commit_draw(&mut self);

    fn exit(&mut self, code: i32);
    /// Switches to another application mode (e.g. gallery) at list `index`
    fn switch_mode(&mut self, index: usize);
    /// Runs an external command for the image at `source`
    fn execute(&mut self, command: Option<&str>, source: &str);
}

/// Loads images and keeps the current one.
pub trait Fetcher {
    fn init(&mut self, first: Option<Image>, history: usize, preload: usize);

    fn current(&self) -> Option<&Image>;
    fn current_mut(&mut self) -> Option<&mut Image>;

    /// Makes the image at `index` current, false if it can not be loaded.
    fn open(&mut self, index: usize, source: &str) -> bool;

    /// Same as [`Fetcher::open`] but bypasses every cache.
    fn reload(&mut self, index: usize, source: &str) -> bool;

    /// Accepts an image that was decoded in the background.
    fn attach(&mut self, image: Image, index: usize);

    fn destroy(&mut self);
}

/// Text painted on top of the image.
pub trait Overlay {
    /// Starts over for a newly shown image.
    fn reset(&mut self, image: &Image);
    fn update(&mut self, field: InfoField, text: String);
    fn draw(&self, context: &Context, window: SizeI) -> ViewerResult<()>;
}

/// Optional capability to save the current frame.
pub trait Exporter {
    fn export_png(&self, frame: &Frame, path: &Path) -> ViewerResult<()>;
}
