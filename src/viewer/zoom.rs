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

use tracing::{error, warn};

use crate::{
    action::parse_move_step,
    overlay::InfoField,
    rect::PointI,
    view::{
        scale::{policy_scale, zoom_at_center, ZoomSpec},
        ScalePolicy,
    },
};

use super::Viewer;

impl Viewer {
    pub(super) fn fixup_position(&mut self, force: bool) {
        if let Some(frame) = self.frame_size() {
            let window = self.window();
            self.state.fixup_position(force, window, frame);
        }
    }

    pub(super) fn update_scale_info(&mut self) {
        self.overlay.update(
            InfoField::Scale,
            format!("{}%", self.state.scale_percent()),
        );
    }

    /// Moves the viewport by `params` percent of the window size (10 if absent).
    pub(super) fn move_image(&mut self, horizontal: bool, positive: bool, params: Option<&str>) {
        let step = match parse_move_step(params) {
            Ok(step) => step,
            Err(e) => {
                warn!("{e}");
                return;
            }
        };
        let step = if positive { step } else { -step };

        let old = self.state.position;
        let window = self.window();
        self.state.position = if horizontal {
            old + PointI::new((window.width() / 100) * step, 0)
        } else {
            old + PointI::new(0, (window.height() / 100) * step)
        };
        self.fixup_position(false);

        if self.state.position != old {
            self.host.request_redraw();
        }
    }

    /// Quarter turn keeping the image center in place.
    pub(super) fn rotate_image(&mut self, clockwise: bool) {
        let Some(frame) = self.frame_size() else {
            return;
        };
        let shift = (self.state.scale * (frame.width() - frame.height()) as f64 / 2.0) as i64;

        let Some(image) = self.fetcher.current_mut() else {
            return;
        };
        if let Err(e) = image.rotate(if clockwise { 90 } else { 270 }) {
            error!("Unable to rotate image: {e}");
            return;
        }
        self.state.position = self.state.position + PointI::new(shift, -shift);
        self.fixup_position(false);
        self.host.request_redraw();
    }

    pub(super) fn set_scale(&mut self, policy: ScalePolicy) {
        let Some(frame) = self.frame_size() else {
            return;
        };
        self.state.scale = policy_scale(policy, self.window(), frame);
        self.fixup_position(true);
        self.update_scale_info();
    }

    /// Selects the named scale policy, or the next one if `params` is absent.
    pub(super) fn scale_image(&mut self, params: Option<&str>) {
        let policy = match params {
            Some(name) => match name.parse::<ScalePolicy>() {
                Ok(policy) => policy,
                Err(e) => {
                    warn!("{e}");
                    return;
                }
            },
            None => self.state.scale_policy.next(),
        };
        self.state.scale_policy = policy;
        self.overlay
            .update(InfoField::Status, format!("Scale {}", policy.name()));
        self.set_scale(policy);
        self.host.request_redraw();
    }

    /// Applies a scale policy or zooms by a percentage around the window center.
    pub(super) fn zoom_image(&mut self, params: Option<&str>) {
        let Some(params) = params else {
            return;
        };
        let zoom = match params.parse::<ZoomSpec>() {
            Ok(zoom) => zoom,
            Err(e) => {
                warn!("{e}");
                return;
            }
        };
        match zoom {
            ZoomSpec::Policy(policy) => self.set_scale(policy),
            ZoomSpec::Percent(percent) => {
                let Some(frame) = self.frame_size() else {
                    return;
                };
                let zoomed = zoom_at_center(
                    self.state.scale,
                    self.state.position,
                    percent,
                    self.window(),
                    frame,
                );
                self.state.scale = zoomed.scale;
                self.state.position = zoomed.position;
                self.fixup_position(false);
            }
        }
        self.update_scale_info();
        self.host.request_redraw();
    }

    pub(super) fn toggle_keep_zoom(&mut self) {
        self.state.keep_zoom = !self.state.keep_zoom;
        self.overlay.update(
            InfoField::Status,
            format!("Keep zoom {}", if self.state.keep_zoom { "ON" } else { "OFF" }),
        );
        self.host.request_redraw();
    }

    pub(super) fn on_drag(&mut self, dx: i64, dy: i64) {
        let Some(frame) = self.frame_size() else {
            return;
        };
        let window = self.window();
        if self.state.drag(dx, dy, window, frame) {
            self.host.request_redraw();
        }
    }
}
