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

use std::time::Duration;

use async_channel::{Receiver, Sender};
use glib::{ControlFlow, JoinHandle, MainContext, Priority, Source};
use tracing::{debug, warn};

use crate::error::{ViewerError, ViewerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Advances to the next frame of an animated image
    Animation,
    /// Advances to the next image
    Slideshow,
}

impl TimerKind {
    fn slot(&self) -> usize {
        match self {
            TimerKind::Animation => 0,
            TimerKind::Slideshow => 1,
        }
    }
}

/// Delivered when a timer expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerMessage {
    pub kind: TimerKind,
    /// Arm generation, see [`Scheduler::is_current`]
    pub serial: u64,
}

/// One-shot, reloadable timers that report expiry as a [`TimerMessage`].
pub trait Scheduler {
    /// Registers the timer with the event loop. Must succeed before arming.
    fn watch(&mut self, kind: TimerKind) -> ViewerResult<()>;

    /// (Re)arms the timer to expire once after `interval`. A zero interval
    /// disarms it. Every call invalidates messages of earlier arms.
    fn set_interval(&mut self, kind: TimerKind, interval: Duration);

    /// True if `message` belongs to the latest arm of its timer.
    fn is_current(&self, message: &TimerMessage) -> bool;

    /// Disarms the timer and removes it from the event loop.
    fn release(&mut self, kind: TimerKind);
}

#[derive(Debug, Default)]
struct TimerSlot {
    watched: bool,
    armed: bool,
    serial: u64,
    source: Option<Source>,
}

impl TimerSlot {
    fn cancel(&mut self) {
        if let Some(source) = self.source.take() {
            if !source.is_destroyed() {
                source.destroy();
            }
        }
        self.armed = false;
    }
}

/// [`Scheduler`] backed by glib timeout sources attached to a main context.
///
/// Expiry is sent over an `async_channel`; see [`spawn_timer_dispatch`].
pub struct GlibScheduler {
    context: MainContext,
    sender: Sender<TimerMessage>,
    slots: [TimerSlot; 2],
}

impl GlibScheduler {
    pub fn new(context: MainContext, sender: Sender<TimerMessage>) -> Self {
        Self {
            context,
            sender,
            slots: Default::default(),
        }
    }

    /// Scheduler on the default main context together with the receiving end.
    pub fn with_channel() -> (Self, Receiver<TimerMessage>) {
        let (sender, receiver) = async_channel::unbounded();
        (Self::new(MainContext::default(), sender), receiver)
    }
}

impl Scheduler for GlibScheduler {
    fn watch(&mut self, kind: TimerKind) -> ViewerResult<()> {
        if self.sender.is_closed() {
            return Err(ViewerError::Other(format!(
                "{kind:?} timer: message channel is closed"
            )));
        }
        self.slots[kind.slot()].watched = true;
        Ok(())
    }

    fn set_interval(&mut self, kind: TimerKind, interval: Duration) {
        let slot = &mut self.slots[kind.slot()];
        slot.cancel();
        slot.serial += 1;
        if !slot.watched || interval.is_zero() {
            return;
        }

        let message = TimerMessage {
            kind,
            serial: slot.serial,
        };
        let sender = self.sender.clone();
        let source = glib::timeout_source_new(interval, None, Priority::DEFAULT, move || {
            if let Err(e) = sender.try_send(message) {
                warn!("Unable to deliver {:?} timer: {e}", message.kind);
            }
            ControlFlow::Break
        });
        source.attach(Some(&self.context));
        slot.source = Some(source);
        slot.armed = true;
        debug!("{kind:?} timer armed for {interval:?}");
    }

    fn is_current(&self, message: &TimerMessage) -> bool {
        let slot = &self.slots[message.kind.slot()];
        slot.armed && slot.serial == message.serial
    }

    fn release(&mut self, kind: TimerKind) {
        let slot = &mut self.slots[kind.slot()];
        slot.cancel();
        slot.serial += 1;
        slot.watched = false;
    }
}

impl Drop for GlibScheduler {
    fn drop(&mut self) {
        for slot in &mut self.slots {
            slot.cancel();
        }
    }
}

/// Runs `handler` for every timer message on the thread default main context.
///
/// Must be called on the thread that owns that context.
pub fn spawn_timer_dispatch<F>(receiver: Receiver<TimerMessage>, mut handler: F) -> JoinHandle<()>
where
    F: FnMut(TimerMessage) + 'static,
{
    glib::spawn_future_local(async move {
        while let Ok(message) = receiver.recv().await {
            handler(message);
        }
    })
}
