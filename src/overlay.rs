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

use std::collections::BTreeMap;

use cairo::{Context, FontSlant, FontWeight};

use crate::{
    error::ViewerResult,
    host::Overlay,
    image::{
        colors::{CairoColorExt, Color},
        Image,
    },
    rect::SizeI,
    util::ellipsis_middle,
};

const FONT_SIZE: f64 = 14.0;
const LINE_HEIGHT: f64 = 18.0;
const MARGIN: f64 = 10.0;
const MAX_NAME_LEN: usize = 64;

/// A line of information shown on top of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InfoField {
    Name,
    /// Scale in percent
    Scale,
    /// Position in the image list
    Index,
    /// Position in the frame list
    Frame,
    ImageSize,
    /// Result of the last action
    Status,
}

impl InfoField {
    pub fn label(&self) -> &'static str {
        match self {
            InfoField::Name => "File",
            InfoField::Scale => "Scale",
            InfoField::Index => "Image",
            InfoField::Frame => "Frame",
            InfoField::ImageSize => "Size",
            InfoField::Status => "",
        }
    }
}

/// [`Overlay`] that keeps one text per field and paints them top left.
#[derive(Debug)]
pub struct TextOverlay {
    fields: BTreeMap<InfoField, String>,
    pub visible: bool,
}

impl TextOverlay {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            visible: true,
        }
    }

    pub fn get(&self, field: InfoField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Lines in display order
    pub fn lines(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .map(|(field, text)| match field {
                InfoField::Status => text.clone(),
                field => format!("{}: {}", field.label(), text),
            })
            .collect()
    }
}

impl Default for TextOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Overlay for TextOverlay {
    fn reset(&mut self, image: &Image) {
        self.fields.clear();
        self.fields
            .insert(InfoField::Name, ellipsis_middle(&image.name, MAX_NAME_LEN));
        let frame = image.frame(0);
        self.fields.insert(InfoField::ImageSize, frame.size().to_string());
        if image.num_frames() > 1 {
            self.fields
                .insert(InfoField::Frame, format!("1 of {}", image.num_frames()));
        }
    }

    fn update(&mut self, field: InfoField, text: String) {
        self.fields.insert(field, text);
    }

    fn draw(&self, context: &Context, window: SizeI) -> ViewerResult<()> {
        if !self.visible {
            return Ok(());
        }
        context.save()?;
        context.select_font_face("Liberation Sans", FontSlant::Normal, FontWeight::Normal);
        context.set_font_size(FONT_SIZE);
        let mut y = MARGIN + FONT_SIZE;
        for line in self.lines() {
            if y > window.height() as f64 {
                break;
            }
            // shadow first, then the text
            context.color(Color::BLACK);
            context.move_to(MARGIN + 1.0, y + 1.0);
            context.show_text(&line)?;
            context.color(Color::WHITE);
            context.move_to(MARGIN, y);
            context.show_text(&line)?;
            y += LINE_HEIGHT;
        }
        context.restore()?;
        Ok(())
    }
}
