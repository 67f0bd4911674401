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

use cairo::{Context, Extend, FillRule, Format, ImageSurface, Matrix, Operator, SurfacePattern};

use crate::{
    error::ViewerResult,
    rect::{RectI, SizeI},
    view::{position::scaled_size, Background, ViewerState},
};

use super::{
    colors::{CairoColorExt, Color},
    Image,
};

/// Size of a single checker cell
pub const GRID_STEP: i32 = 10;
pub const GRID_COLOR1: Color = Color::argb(0xff333333);
pub const GRID_COLOR2: Color = Color::argb(0xff4c4c4c);

/// One repeatable tile of the checker pattern behind transparent images.
pub fn grid_tile() -> ViewerResult<ImageSurface> {
    let surface = ImageSurface::create(Format::ARgb32, GRID_STEP * 2, GRID_STEP * 2)?;
    let context = Context::new(&surface)?;
    context.set_operator(Operator::Source);

    let step = GRID_STEP as f64;

    context.color(GRID_COLOR1);
    context.rectangle(0.0, 0.0, step, step);
    context.rectangle(step, step, step, step);
    context.fill()?;

    context.color(GRID_COLOR2);
    context.rectangle(0.0, step, step, step);
    context.rectangle(step, 0.0, step, step);
    context.fill()?;

    drop(context);
    surface.flush();
    Ok(surface)
}

/// Fills the window outside `image_rect` with `color`.
fn draw_window_background(context: &Context, window: SizeI, image_rect: &RectI, color: Color) -> ViewerResult<()> {
    context.save()?;
    context.set_operator(Operator::Source);
    context.set_fill_rule(FillRule::EvenOdd);
    context.rectangle(0.0, 0.0, window.width() as f64, window.height() as f64);
    if !image_rect.is_empty() {
        let (x, y, w, h) = image_rect.to_cairo();
        context.rectangle(x, y, w, h);
    }
    context.color(color);
    context.fill()?;
    context.restore()?;
    Ok(())
}

fn draw_image_background(context: &Context, image_rect: &RectI, background: Background) -> ViewerResult<()> {
    let (x, y, w, h) = image_rect.to_cairo();
    context.save()?;
    context.set_operator(Operator::Source);
    match background {
        Background::Grid => {
            let pattern = SurfacePattern::create(grid_tile()?);
            pattern.set_extend(Extend::Repeat);
            // align the checker cells with the image origin
            let mut matrix = Matrix::identity();
            matrix.translate(-x, -y);
            pattern.set_matrix(matrix);
            context.set_source(&pattern)?;
        }
        Background::Color(color) => context.color(color),
    }
    context.rectangle(x, y, w, h);
    context.fill()?;
    context.restore()?;
    Ok(())
}

/// Paints the current frame of `image` as described by `state`.
///
/// The window outside the image gets the window background, transparent
/// images get the image background behind them. At scale 1.0 pixels are
/// copied as they are, otherwise they are resampled with the anti-aliasing
/// filter.
pub fn draw_image(context: &Context, window: SizeI, state: &ViewerState, image: &Image) -> ViewerResult<()> {
    let frame = image.frame(state.frame);
    let size = scaled_size(state.scale, frame.size());
    let image_rect = RectI::new_at(state.position, size);

    draw_window_background(context, window, &image_rect, state.window_background)?;

    if image_rect.is_empty() {
        return Ok(());
    }

    if image.alpha {
        draw_image_background(context, &image_rect, state.image_background)?;
    }

    let x = state.position.x() as f64;
    let y = state.position.y() as f64;
    context.save()?;
    if state.scale == 1.0 {
        context.set_source_surface(frame.surface(), x, y)?;
        context.source().set_filter(cairo::Filter::Nearest);
    } else {
        context.translate(x, y);
        context.scale(state.scale, state.scale);
        context.set_source_surface(frame.surface(), 0.0, 0.0)?;
        context.source().set_filter(state.antialias.filter());
    }
    context.paint()?;
    context.restore()?;
    Ok(())
}
