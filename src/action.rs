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

use std::{fmt::Display, str::FromStr};

use crate::error::{ViewerError, ViewerResult};

/// Default viewport step in percent of the window size
pub const DEFAULT_MOVE_STEP: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    FirstFile,
    LastFile,
    PrevDir,
    NextDir,
    PrevFile,
    NextFile,
    RandFile,
    SkipFile,
    PrevFrame,
    NextFrame,
    Animation,
    Slideshow,
    Mode,
    StepLeft,
    StepRight,
    StepUp,
    StepDown,
    Zoom,
    Scale,
    KeepZoom,
    RotateLeft,
    RotateRight,
    FlipVertical,
    FlipHorizontal,
    AntiAliasing,
    Reload,
    Exec,
    Export,
    /// Handled by the window layer
    Fullscreen,
    /// Handled by the overlay layer
    Info,
    /// Handled by the overlay layer
    Help,
    Exit,
}

const ACTION_NAMES: [(ActionType, &str); 32] = [
    (ActionType::FirstFile, "first_file"),
    (ActionType::LastFile, "last_file"),
    (ActionType::PrevDir, "prev_dir"),
    (ActionType::NextDir, "next_dir"),
    (ActionType::PrevFile, "prev_file"),
    (ActionType::NextFile, "next_file"),
    (ActionType::RandFile, "rand_file"),
    (ActionType::SkipFile, "skip_file"),
    (ActionType::PrevFrame, "prev_frame"),
    (ActionType::NextFrame, "next_frame"),
    (ActionType::Animation, "animation"),
    (ActionType::Slideshow, "slideshow"),
    (ActionType::Mode, "mode"),
    (ActionType::StepLeft, "step_left"),
    (ActionType::StepRight, "step_right"),
    (ActionType::StepUp, "step_up"),
    (ActionType::StepDown, "step_down"),
    (ActionType::Zoom, "zoom"),
    (ActionType::Scale, "scale"),
    (ActionType::KeepZoom, "keep_zoom"),
    (ActionType::RotateLeft, "rotate_left"),
    (ActionType::RotateRight, "rotate_right"),
    (ActionType::FlipVertical, "flip_vertical"),
    (ActionType::FlipHorizontal, "flip_horizontal"),
    (ActionType::AntiAliasing, "antialiasing"),
    (ActionType::Reload, "reload"),
    (ActionType::Exec, "exec"),
    (ActionType::Export, "export"),
    (ActionType::Fullscreen, "fullscreen"),
    (ActionType::Info, "info"),
    (ActionType::Help, "help"),
    (ActionType::Exit, "exit"),
];

impl ActionType {
    pub fn name(&self) -> &'static str {
        ACTION_NAMES
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, name)| *name)
            .unwrap_or_default()
    }
}

impl FromStr for ActionType {
    type Err = ViewerError;

    fn from_str(s: &str) -> ViewerResult<Self> {
        ACTION_NAMES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(kind, _)| *kind)
            .ok_or_else(|| ViewerError::UnknownAction(s.to_string()))
    }
}

/// A user or automation request with its optional parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionType,
    params: String,
}

impl Action {
    pub fn new(kind: ActionType) -> Self {
        Self {
            kind,
            params: String::new(),
        }
    }

    pub fn with_params(kind: ActionType, params: &str) -> Self {
        Self {
            kind,
            params: params.trim().to_string(),
        }
    }

    /// Parses `"name"` or `"name parameters"`.
    pub fn parse(text: &str) -> ViewerResult<Self> {
        let text = text.trim();
        let (name, params) = match text.split_once(char::is_whitespace) {
            Some((name, params)) => (name, params),
            None => (text, ""),
        };
        Ok(Self::with_params(name.parse()?, params))
    }

    /// The parameter string, `None` if it is empty.
    pub fn params(&self) -> Option<&str> {
        if self.params.is_empty() {
            None
        } else {
            Some(&self.params)
        }
    }
}

impl FromStr for Action {
    type Err = ViewerError;

    fn from_str(s: &str) -> ViewerResult<Self> {
        Action::parse(s)
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.params() {
            Some(params) => write!(f, "{} {}", self.kind.name(), params),
            None => f.write_str(self.kind.name()),
        }
    }
}

/// Step size in percent for the step actions, [`DEFAULT_MOVE_STEP`] if absent.
pub fn parse_move_step(params: Option<&str>) -> ViewerResult<i64> {
    let Some(params) = params else {
        return Ok(DEFAULT_MOVE_STEP);
    };
    match params.parse::<i64>() {
        Ok(step) if (1..=1000).contains(&step) => Ok(step),
        _ => Err(ViewerError::invalid("move step", params)),
    }
}
