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

use tracing::error;

use crate::image::draw::draw_image;

use super::Viewer;

impl Viewer {
    /// Paints the current frame and the overlay into the window.
    pub(super) fn redraw(&mut self) {
        let Some(context) = self.host.begin_draw() else {
            return;
        };
        let window = self.window();
        if let Some(image) = self.fetcher.current() {
            if let Err(e) = draw_image(&context, window, &self.state, image) {
                error!("Unable to draw image: {e}");
            }
        }
        if let Err(e) = self.overlay.draw(&context, window) {
            error!("Unable to draw overlay: {e}");
        }
        drop(context);
        self.host.commit_draw();
    }

    pub(super) fn on_resize(&mut self) {
        self.fixup_position(false);
        self.reset_state();
    }
}
