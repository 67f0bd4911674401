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

use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::{
    action::{Action, ActionType},
    navigate::Direction,
    overlay::InfoField,
};

use super::Viewer;

impl Viewer {
    pub(super) fn apply_action(&mut self, action: &Action) {
        let params = action.params();
        match action.kind {
            ActionType::FirstFile => {
                self.next_image(Direction::First);
            }
            ActionType::LastFile => {
                self.next_image(Direction::Last);
            }
            ActionType::PrevDir => {
                self.next_image(Direction::PrevDir);
            }
            ActionType::NextDir => {
                self.next_image(Direction::NextDir);
            }
            ActionType::PrevFile => {
                self.next_image(Direction::PrevFile);
            }
            ActionType::NextFile => {
                self.next_image(Direction::NextFile);
            }
            ActionType::RandFile => {
                self.next_image(Direction::Random);
            }
            ActionType::SkipFile => {
                self.skip_image();
            }
            ActionType::PrevFrame | ActionType::NextFrame => {
                self.animation_ctl(false);
                self.host.set_content_animated(false);
                self.next_frame(action.kind == ActionType::NextFrame);
            }
            ActionType::Animation => {
                self.animation_ctl(!self.state.animation.enabled);
                self.host.set_content_animated(self.state.animation.enabled);
            }
            ActionType::Slideshow => {
                if !self.state.slideshow.available {
                    debug!("slideshow timer is not available");
                    return;
                }
                let enable = !self.state.slideshow.enabled && self.next_image(Direction::NextFile);
                self.slideshow_ctl(enable);
            }
            ActionType::Mode => {
                if let Some(image) = self.fetcher.current() {
                    let index = image.index;
                    self.host.switch_mode(index);
                }
            }
            ActionType::StepLeft => self.move_image(true, true, params),
            ActionType::StepRight => self.move_image(true, false, params),
            ActionType::StepUp => self.move_image(false, true, params),
            ActionType::StepDown => self.move_image(false, false, params),
            ActionType::Zoom => self.zoom_image(params),
            ActionType::Scale => self.scale_image(params),
            ActionType::KeepZoom => self.toggle_keep_zoom(),
            ActionType::RotateLeft => self.rotate_image(false),
            ActionType::RotateRight => self.rotate_image(true),
            ActionType::FlipVertical | ActionType::FlipHorizontal => {
                let Some(image) = self.fetcher.current_mut() else {
                    return;
                };
                let result = if action.kind == ActionType::FlipVertical {
                    image.flip_vertical()
                } else {
                    image.flip_horizontal()
                };
                if let Err(e) = result {
                    error!("Unable to flip image: {e}");
                }
                self.host.request_redraw();
            }
            ActionType::AntiAliasing => match self.state.antialias.switch(params) {
                Ok(mode) => {
                    self.state.antialias = mode;
                    self.overlay
                        .update(InfoField::Status, format!("Anti-aliasing: {}", mode.name()));
                    self.host.request_redraw();
                }
                Err(e) => warn!("{e}"),
            },
            ActionType::Reload => self.reload(),
            ActionType::Exec => {
                if let Some(image) = self.fetcher.current() {
                    let source = image.source.clone();
                    self.host.execute(params, &source);
                }
            }
            ActionType::Export => {
                self.export(params);
                self.host.request_redraw();
            }
            ActionType::Fullscreen | ActionType::Info | ActionType::Help => {
                debug!("{} is not handled by the viewer", action.kind.name());
            }
            ActionType::Exit => {
                info!("Exit requested");
                self.host.exit(0);
            }
        }
    }

    /// Saves the current frame as PNG to `path`.
    fn export(&mut self, path: Option<&str>) {
        let status = match (&self.exporter, path) {
            (None, _) => "Error: export to PNG is not supported",
            (Some(_), None) => "Error: export path is not specified",
            (Some(exporter), Some(path)) => {
                let Some(image) = self.fetcher.current() else {
                    return;
                };
                match exporter.export_png(image.frame(self.state.frame), Path::new(path)) {
                    Ok(()) => "Export completed",
                    Err(e) => {
                        warn!("Export to {path} failed: {e}");
                        "Error: export failed"
                    }
                }
            }
        };
        self.overlay
            .update(InfoField::Status, status.to_string());
    }
}
