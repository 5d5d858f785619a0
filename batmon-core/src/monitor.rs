//! Battery monitor state machine
//!
//! One tick of the battery monitor task:
//! 1. drain the control queue without blocking; a suspend request parks the task inside the
//!    drain loop until it is resumed through its [`ResumeHandle`]
//! 2. publish the battery level
//! 3. publish the charge status pin, only if the level went out
//!
//! Publishing never waits for room in the display queue. A full queue drops the rest of the
//! tick, the next tick sends fresh values anyway.

use defmt::Format;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use embassy_sync::signal::Signal;

use crate::calibration::Calibration;
use crate::message::{Message, Outbox};
use crate::sample::SampleCell;

/// How far the publishing step of a tick got
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Publish {
    /// Level and status pin were both queued
    Both,
    /// Display queue was full, nothing was queued
    LevelDropped,
    /// Level was queued, the status pin didn't fit
    StatusDropped,
}

/// Summary of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub struct TickReport {
    /// Control messages consumed
    pub drained: usize,
    pub publish: Publish,
}

/// Wakes a suspended battery monitor
pub struct ResumeHandle<'a, M: RawMutex> {
    signal: &'a Signal<M, ()>,
}

impl<'a, M: RawMutex> ResumeHandle<'a, M> {
    pub const fn new(signal: &'a Signal<M, ()>) -> Self {
        Self { signal }
    }

    /// Notifies the monitor. A notification sent while it isn't suspended is kept and lets the
    /// next suspend request return immediately.
    pub fn resume(&self) {
        self.signal.signal(());
    }
}

impl<M: RawMutex> Clone for ResumeHandle<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: RawMutex> Copy for ResumeHandle<'_, M> {}

/// Everything one battery monitor tick reads from and writes to
pub struct BatteryMonitor<'a, M: RawMutex, O: Outbox, const N: usize> {
    control: Receiver<'a, M, Message, N>,
    display: O,
    resume: &'a Signal<M, ()>,
    samples: &'a SampleCell,
    calibration: Calibration,
}

impl<'a, M: RawMutex, O: Outbox, const N: usize> BatteryMonitor<'a, M, O, N> {
    pub fn new(
        control: Receiver<'a, M, Message, N>,
        display: O,
        resume: &'a Signal<M, ()>,
        samples: &'a SampleCell,
        calibration: Calibration,
    ) -> Self {
        Self {
            control,
            display,
            resume,
            samples,
            calibration,
        }
    }

    /// Handle to resume this monitor after a suspend request
    pub fn resume_handle(&self) -> ResumeHandle<'a, M> {
        ResumeHandle::new(self.resume)
    }

    /// Runs one tick: drain the control queue, then publish
    pub async fn tick(&self) -> TickReport {
        let drained = self.drain_control().await;
        let publish = self.publish();
        TickReport { drained, publish }
    }

    /// Consumes control messages until the queue is empty, returns how many were consumed
    ///
    /// Only a suspend request waits; every other message is dropped on the spot.
    pub async fn drain_control(&self) -> usize {
        let mut drained = 0;
        while let Ok(message) = self.control.try_receive() {
            drained += 1;
            if message == Message::SuspendRequest {
                info!("Battery monitor suspended");
                self.resume.wait().await;
                info!("Battery monitor resumed");
            }
        }
        drained
    }

    /// Publishes the latest sample, battery level first
    pub fn publish(&self) -> Publish {
        let sample = self.samples.load();
        let level = self.calibration.percent(sample.raw_level);

        if self.display.try_publish(Message::BatteryLevel(level)).is_err() {
            trace!("Display queue full, battery level dropped");
            return Publish::LevelDropped;
        }
        if self
            .display
            .try_publish(Message::BatteryStatusPin(sample.charging))
            .is_err()
        {
            trace!("Display queue full, status pin dropped");
            return Publish::StatusDropped;
        }
        Publish::Both
    }
}
