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

//! Interactive image viewing engine.
//!
//! The [`Viewer`](viewer::Viewer) owns the viewport state of an image viewer
//! and turns actions, timer expiries, resizes and drags into state changes
//! and redraw requests. Windowing, decoding and text rendering are reached
//! through the traits in [`host`].

pub mod action;
pub mod config;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod host;
pub mod image;
pub mod navigate;
pub mod overlay;
pub mod rect;
pub mod timer;
pub mod util;
pub mod view;
pub mod viewer;

#[cfg(test)]
mod testing;

pub use action::{Action, ActionType};
pub use config::ViewerConfig;
pub use error::{ViewerError, ViewerResult};
pub use viewer::{Collaborators, Event, Viewer};
