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

pub mod colors;
pub mod draw;

use cairo::{Context, Filter, Format, ImageSurface, Matrix};

use crate::{
    error::{ViewerError, ViewerResult},
    rect::SizeI,
    util::path_to_filename,
};

/// One still picture of an image together with its display time.
#[derive(Debug, Clone)]
pub struct Frame {
    surface: ImageSurface,
    /// Display duration in milliseconds, 0 for a static frame
    duration: u32,
}

impl Frame {
    pub fn new(surface: ImageSurface, duration: u32) -> Self {
        Self { surface, duration }
    }

    /// Builds a frame from straight (non premultiplied) RGBA pixels.
    pub fn from_rgba8(width: u32, height: u32, rgba8: &[u8], duration: u32) -> ViewerResult<Self> {
        let stride = 4 * width as usize;
        if rgba8.len() != stride * height as usize {
            return Err(format!(
                "Frame data size mismatch: expected {}, got {}",
                stride * height as usize,
                rgba8.len()
            )
            .into());
        }
        let mut surface_data = vec![0; stride * height as usize];
        for (src_pixel, dst_pixel) in rgba8
            .chunks_exact(4)
            .zip(surface_data.chunks_exact_mut(4))
        {
            convert_rgba_pixel(src_pixel, dst_pixel);
        }
        let surface = ImageSurface::create_for_data(
            surface_data,
            Format::ARgb32,
            width as i32,
            height as i32,
            stride as i32,
        )?;
        Ok(Self::new(surface, duration))
    }

    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn width(&self) -> i64 {
        self.surface.width() as i64
    }

    pub fn height(&self) -> i64 {
        self.surface.height() as i64
    }

    pub fn size(&self) -> SizeI {
        SizeI::new(self.width(), self.height())
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Paints this frame into a new surface through `matrix`.
    fn transformed(&self, size: SizeI, matrix: Matrix) -> ViewerResult<Self> {
        let surface = ImageSurface::create(
            self.surface.format(),
            size.width() as i32,
            size.height() as i32,
        )?;
        let context = Context::new(&surface)?;
        context.set_operator(cairo::Operator::Source);
        context.transform(matrix);
        context.set_source_surface(&self.surface, 0.0, 0.0)?;
        context.source().set_filter(Filter::Nearest);
        context.paint()?;
        drop(context);
        surface.flush();
        Ok(Self::new(surface, self.duration))
    }

    /// Quarter turn, `clockwise` or counterclockwise.
    fn rotated(&self, clockwise: bool) -> ViewerResult<Self> {
        let w = self.width() as f64;
        let h = self.height() as f64;
        let matrix = if clockwise {
            Matrix::new(0.0, 1.0, -1.0, 0.0, h, 0.0)
        } else {
            Matrix::new(0.0, -1.0, 1.0, 0.0, 0.0, w)
        };
        self.transformed(self.size().transposed(), matrix)
    }

    fn half_turned(&self) -> ViewerResult<Self> {
        let matrix = Matrix::new(
            -1.0,
            0.0,
            0.0,
            -1.0,
            self.width() as f64,
            self.height() as f64,
        );
        self.transformed(self.size(), matrix)
    }

    fn flipped(&self, vertical: bool) -> ViewerResult<Self> {
        let matrix = if vertical {
            Matrix::new(1.0, 0.0, 0.0, -1.0, 0.0, self.height() as f64)
        } else {
            Matrix::new(-1.0, 0.0, 0.0, 1.0, self.width() as f64, 0.0)
        };
        self.transformed(self.size(), matrix)
    }
}

#[inline]
fn convert_rgba_pixel(src: &[u8], dst: &mut [u8]) {
    if src[3] == 255 {
        dst[0] = src[2]; // B
        dst[1] = src[1]; // G
        dst[2] = src[0]; // R
    } else if src[3] == 0 {
        dst[0] = 0;
        dst[1] = 0;
        dst[2] = 0;
    } else {
        let alpha = src[3] as u16;
        dst[0] = ((src[2] as u16 * alpha) / 255) as u8; // B
        dst[1] = ((src[1] as u16 * alpha) / 255) as u8; // G
        dst[2] = ((src[0] as u16 * alpha) / 255) as u8; // R
    }
    dst[3] = src[3]; // A
}

/// A decoded image as handed over by the fetcher.
#[derive(Debug, Clone)]
pub struct Image {
    frames: Vec<Frame>,
    /// Whether any frame carries transparency
    pub alpha: bool,
    /// Position of the image in the image list
    pub index: usize,
    /// Display name, used as window title
    pub name: String,
    /// Where the image came from (path or other source identifier)
    pub source: String,
}

impl Image {
    pub fn new(source: &str, index: usize, frames: Vec<Frame>, alpha: bool) -> ViewerResult<Self> {
        if frames.is_empty() {
            return Err(ViewerError::Other(format!("No frames in image {source}")));
        }
        Ok(Image {
            frames,
            alpha,
            index,
            name: path_to_filename(source),
            source: source.to_string(),
        })
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Frame `index`, or the first frame when the index is out of range.
    pub fn frame(&self, index: usize) -> &Frame {
        self.frames.get(index).unwrap_or(&self.frames[0])
    }

    pub fn is_animation(&self) -> bool {
        self.frames.len() > 1
    }

    /// Rotates all frames by `angle` degrees clockwise (multiples of 90).
    pub fn rotate(&mut self, angle: i32) -> ViewerResult<()> {
        let frames = match angle.rem_euclid(360) {
            0 => return Ok(()),
            90 => self.map_frames(|f| f.rotated(true))?,
            180 => self.map_frames(Frame::half_turned)?,
            270 => self.map_frames(|f| f.rotated(false))?,
            _ => return Err(ViewerError::invalid("rotation", &angle.to_string())),
        };
        self.frames = frames;
        Ok(())
    }

    pub fn flip_vertical(&mut self) -> ViewerResult<()> {
        self.frames = self.map_frames(|f| f.flipped(true))?;
        Ok(())
    }

    pub fn flip_horizontal(&mut self) -> ViewerResult<()> {
        self.frames = self.map_frames(|f| f.flipped(false))?;
        Ok(())
    }

    fn map_frames<F>(&self, op: F) -> ViewerResult<Vec<Frame>>
    where
        F: Fn(&Frame) -> ViewerResult<Frame>,
    {
        self.frames.iter().map(op).collect()
    }
}
