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

//! Fakes and helpers shared by the unit tests.

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    rc::Rc,
    time::Duration,
};

use cairo::{Context, Format, ImageSurface, Operator};

use crate::{
    error::{ViewerError, ViewerResult},
    host::{DisplayHost, Fetcher, Overlay},
    image::{Frame, Image},
    overlay::{InfoField, TextOverlay},
    rect::SizeI,
    timer::{Scheduler, TimerKind, TimerMessage},
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Pixel at (`x`, `y`) as 0xAARRGGBB (premultiplied).
pub fn pixel_at(surface: &ImageSurface, x: i32, y: i32) -> u32 {
    let mut probe = ImageSurface::create(Format::ARgb32, 1, 1).unwrap();
    {
        let context = Context::new(&probe).unwrap();
        context.set_operator(Operator::Source);
        context
            .set_source_surface(surface, -x as f64, -y as f64)
            .unwrap();
        context.paint().unwrap();
    }
    probe.flush();
    let data = probe.data().unwrap();
    u32::from_ne_bytes([data[0], data[1], data[2], data[3]])
}

pub fn canvas(width: i32, height: i32) -> (ImageSurface, Context) {
    let surface = ImageSurface::create(Format::ARgb32, width, height).unwrap();
    let context = Context::new(&surface).unwrap();
    (surface, context)
}

fn rgba(argb: u32) -> [u8; 4] {
    [(argb >> 16) as u8, (argb >> 8) as u8, argb as u8, (argb >> 24) as u8]
}

pub fn solid_frame(width: u32, height: u32, argb: u32, duration: u32) -> Frame {
    let data: Vec<u8> = (0..width * height).flat_map(|_| rgba(argb)).collect();
    Frame::from_rgba8(width, height, &data, duration).unwrap()
}

/// Red, green, blue and white quarters (top-left, top-right, bottom-left, bottom-right).
pub fn quadrant_frame(width: u32, height: u32) -> Frame {
    let mut data = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let argb = match (x < width / 2, y < height / 2) {
                (true, true) => 0xffff0000,
                (false, true) => 0xff00ff00,
                (true, false) => 0xff0000ff,
                (false, false) => 0xffffffff,
            };
            data.extend(rgba(argb));
        }
    }
    Frame::from_rgba8(width, height, &data, 0).unwrap()
}

pub fn solid_image(source: &str, index: usize, width: u32, height: u32, argb: u32, alpha: bool) -> Image {
    Image::new(source, index, vec![solid_frame(width, height, argb, 0)], alpha).unwrap()
}

pub fn animated_image(source: &str, index: usize, durations: &[u32]) -> Image {
    let frames = durations
        .iter()
        .enumerate()
        .map(|(i, &d)| solid_frame(8 + i as u32, 6, 0xff808080, d))
        .collect();
    Image::new(source, index, frames, false).unwrap()
}

#[derive(Debug, Default)]
pub struct HostLog {
    pub window: SizeI,
    pub titles: Vec<String>,
    pub redraws: usize,
    pub commits: usize,
    pub animated: Option<bool>,
    pub exit: Option<i32>,
    pub mode_switch: Option<usize>,
    pub executed: Vec<(Option<String>, String)>,
    /// Last painted window content
    pub surface: Option<ImageSurface>,
}

pub struct RecordingHost(pub Rc<RefCell<HostLog>>);

impl RecordingHost {
    pub fn new(window: SizeI) -> (Self, Rc<RefCell<HostLog>>) {
        let log = Rc::new(RefCell::new(HostLog {
            window,
            ..Default::default()
        }));
        (Self(log.clone()), log)
    }
}

impl DisplayHost for RecordingHost {
    fn window_size(&self) -> SizeI {
        self.0.borrow().window
    }

    fn set_title(&mut self, title: &str) {
        self.0.borrow_mut().titles.push(title.to_string());
    }

    fn request_redraw(&mut self) {
        self.0.borrow_mut().redraws += 1;
    }

    fn set_content_animated(&mut self, animated: bool) {
        self.0.borrow_mut().animated = Some(animated);
    }

    fn begin_draw(&mut self) -> Option<Context> {
        let mut log = self.0.borrow_mut();
        let surface = ImageSurface::create(
            Format::ARgb32,
            log.window.width() as i32,
            log.window.height() as i32,
        )
        .ok()?;
        let context = Context::new(&surface).ok();
        log.surface = Some(surface);
        context
    }

    fn commit_draw(&mut self) {
        self.0.borrow_mut().commits += 1;
    }

    fn exit(&mut self, code: i32) {
        self.0.borrow_mut().exit = Some(code);
    }

    fn switch_mode(&mut self, index: usize) {
        self.0.borrow_mut().mode_switch = Some(index);
    }

    fn execute(&mut self, command: Option<&str>, source: &str) {
        self.0
            .borrow_mut()
            .executed
            .push((command.map(str::to_string), source.to_string()));
    }
}

#[derive(Debug, Default)]
pub struct FetcherLog {
    /// Images that can be opened, by list index
    pub loadable: HashMap<usize, Image>,
    pub opened: Vec<usize>,
    pub reloaded: Vec<usize>,
    pub history: usize,
    pub preload: usize,
    pub destroyed: bool,
}

pub struct MemoryFetcher {
    current: Option<Image>,
    log: Rc<RefCell<FetcherLog>>,
}

impl MemoryFetcher {
    pub fn new(images: Vec<Image>) -> (Self, Rc<RefCell<FetcherLog>>) {
        let log = Rc::new(RefCell::new(FetcherLog {
            loadable: images.into_iter().map(|i| (i.index, i)).collect(),
            ..Default::default()
        }));
        (
            Self {
                current: None,
                log: log.clone(),
            },
            log,
        )
    }

    fn take(&mut self, index: usize) -> bool {
        match self.log.borrow().loadable.get(&index).cloned() {
            Some(image) => {
                self.current = Some(image);
                true
            }
            None => false,
        }
    }
}

impl Fetcher for MemoryFetcher {
    fn init(&mut self, first: Option<Image>, history: usize, preload: usize) {
        self.current = first;
        let mut log = self.log.borrow_mut();
        log.history = history;
        log.preload = preload;
    }

    fn current(&self) -> Option<&Image> {
        self.current.as_ref()
    }

    fn current_mut(&mut self) -> Option<&mut Image> {
        self.current.as_mut()
    }

    fn open(&mut self, index: usize, _source: &str) -> bool {
        self.log.borrow_mut().opened.push(index);
        self.take(index)
    }

    fn reload(&mut self, index: usize, _source: &str) -> bool {
        self.log.borrow_mut().reloaded.push(index);
        self.take(index)
    }

    fn attach(&mut self, image: Image, index: usize) {
        self.log.borrow_mut().loadable.insert(index, image);
    }

    fn destroy(&mut self) {
        self.current = None;
        self.log.borrow_mut().destroyed = true;
    }
}

#[derive(Debug, Default)]
pub struct SchedulerLog {
    pub intervals: HashMap<TimerKind, Duration>,
    pub serials: HashMap<TimerKind, u64>,
    pub watched: HashSet<TimerKind>,
    pub released: HashSet<TimerKind>,
    /// Timers whose registration fails
    pub failing: HashSet<TimerKind>,
}

impl SchedulerLog {
    pub fn interval(&self, kind: TimerKind) -> Duration {
        self.intervals.get(&kind).copied().unwrap_or_default()
    }

    /// Message the timer would deliver if it expired now.
    pub fn fire(&self, kind: TimerKind) -> Option<TimerMessage> {
        if self.interval(kind).is_zero() {
            return None;
        }
        Some(TimerMessage {
            kind,
            serial: self.serials.get(&kind).copied().unwrap_or_default(),
        })
    }
}

/// Scheduler that only records what it was asked to do.
pub struct ManualScheduler(pub Rc<RefCell<SchedulerLog>>);

impl ManualScheduler {
    pub fn new(failing: &[TimerKind]) -> (Self, Rc<RefCell<SchedulerLog>>) {
        let log = Rc::new(RefCell::new(SchedulerLog {
            failing: failing.iter().copied().collect(),
            ..Default::default()
        }));
        (Self(log.clone()), log)
    }
}

impl Scheduler for ManualScheduler {
    fn watch(&mut self, kind: TimerKind) -> ViewerResult<()> {
        let mut log = self.0.borrow_mut();
        if log.failing.contains(&kind) {
            return Err(ViewerError::Other("no timer".into()));
        }
        log.watched.insert(kind);
        Ok(())
    }

    fn set_interval(&mut self, kind: TimerKind, interval: Duration) {
        let mut log = self.0.borrow_mut();
        *log.serials.entry(kind).or_default() += 1;
        let interval = if log.watched.contains(&kind) {
            interval
        } else {
            Duration::ZERO
        };
        log.intervals.insert(kind, interval);
    }

    fn is_current(&self, message: &TimerMessage) -> bool {
        let log = self.0.borrow();
        !log.interval(message.kind).is_zero()
            && log.serials.get(&message.kind).copied().unwrap_or_default() == message.serial
    }

    fn release(&mut self, kind: TimerKind) {
        let mut log = self.0.borrow_mut();
        log.watched.remove(&kind);
        log.released.insert(kind);
        log.intervals.insert(kind, Duration::ZERO);
    }
}

/// [`TextOverlay`] whose content stays readable after it was handed to the viewer.
pub struct SharedOverlay(pub Rc<RefCell<TextOverlay>>);

impl SharedOverlay {
    pub fn new() -> (Self, Rc<RefCell<TextOverlay>>) {
        let overlay = Rc::new(RefCell::new(TextOverlay::new()));
        (Self(overlay.clone()), overlay)
    }
}

impl Overlay for SharedOverlay {
    fn reset(&mut self, image: &Image) {
        self.0.borrow_mut().reset(image);
    }

    fn update(&mut self, field: InfoField, text: String) {
        self.0.borrow_mut().update(field, text);
    }

    fn draw(&self, context: &Context, window: SizeI) -> ViewerResult<()> {
        self.0.borrow().draw(context, window)
    }
}
