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

use std::ops::Add;

/// Width and height of an image, a frame or the window.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size<T> {
    width: T,
    height: T,
}

impl<T> Size<T>
where
    T: Copy,
{
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> T {
        self.width
    }

    pub fn height(&self) -> T {
        self.height
    }

    /// Size with width and height exchanged, as after a quarter turn.
    pub fn transposed(&self) -> Self {
        Self::new(self.height, self.width)
    }
}

impl Size<i64> {
    /// Returns true if either dimension is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl std::fmt::Display for Size<i64> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A point or a displacement in window coordinates.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VectorPoint<T> {
    x: T,
    y: T,
}

impl<T> VectorPoint<T>
where
    T: Copy,
{
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> T {
        self.x
    }

    pub fn y(&self) -> T {
        self.y
    }
}

impl<T> Add for VectorPoint<T>
where
    T: Copy + Add<Output = T>,
{
    type Output = VectorPoint<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// A rectangle defined by two corner points (x0, y0) and (x1, y1).
/// Empty rectangles have x0 >= x1 or y0 >= y1.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Rect<T> {
    pub x0: T,
    pub y0: T,
    pub x1: T,
    pub y1: T,
}

impl<T> Rect<T>
where
    T: Copy + PartialOrd + Add<Output = T>,
{
    pub const fn new(x0: T, y0: T, x1: T, y1: T) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle with its top left corner at `origin`, extending `size` to the right and down.
    pub fn new_at(origin: VectorPoint<T>, size: Size<T>) -> Self {
        Self::new(
            origin.x(),
            origin.y(),
            origin.x() + size.width(),
            origin.y() + size.height(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

impl Rect<i64> {
    /// The rectangle as (x, y, width, height) in cairo user space units.
    pub fn to_cairo(&self) -> (f64, f64, f64, f64) {
        (
            self.x0 as f64,
            self.y0 as f64,
            (self.x1 - self.x0) as f64,
            (self.y1 - self.y0) as f64,
        )
    }
}

pub type PointI = VectorPoint<i64>;
pub type SizeI = Size<i64>;
pub type RectI = Rect<i64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_at() {
        let rect = RectI::new_at(PointI::new(-5, 5), SizeI::new(10, 20));
        assert_eq!(rect, RectI::new(-5, 5, 5, 25));
        assert!(!rect.is_empty());
        assert_eq!(rect.to_cairo(), (-5.0, 5.0, 10.0, 20.0));
    }

    #[test]
    fn test_empty_rect() {
        assert!(RectI::new(10, 10, 10, 20).is_empty());
        assert!(RectI::new(10, 10, 5, 5).is_empty());
        assert!(RectI::new_at(PointI::new(3, 3), SizeI::new(0, 7)).is_empty());
    }

    #[test]
    fn test_point_ops() {
        let p = PointI::new(3, -4) + PointI::new(10, 10);
        assert_eq!(p, PointI::new(13, 6));
        assert_eq!(p + PointI::default(), p);
    }

    #[test]
    fn test_size() {
        let size = SizeI::new(640, 480);
        assert_eq!(size.to_string(), "640x480");
        assert_eq!(size.transposed(), SizeI::new(480, 640));
        assert!(!size.is_empty());
        assert!(SizeI::new(0, 10).is_empty());
    }
}
