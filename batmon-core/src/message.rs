//! Message protocol
//!
//! One message type is shared by every queue in the firmware. The battery monitor only reacts
//! to [`Message::SuspendRequest`] on its control queue and produces the two battery variants on
//! the display queue.

use defmt::Format;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Sender, TrySendError};

/// Inter-task messages
#[derive(Debug, Clone, Copy, PartialEq, Format)]
pub enum Message {
    /// Ask the receiving task to block until it is notified again
    SuspendRequest,
    /// Battery charge level in percent, may lie outside 0..=100
    BatteryLevel(f32),
    /// Charge status pin level
    BatteryStatusPin(bool),
}

/// Non-blocking sending side of a message queue
pub trait Outbox {
    /// Queues `message` if there is room, hands it back otherwise
    fn try_publish(&self, message: Message) -> Result<(), TrySendError<Message>>;
}

impl<M: RawMutex, const N: usize> Outbox for Sender<'_, M, Message, N> {
    fn try_publish(&self, message: Message) -> Result<(), TrySendError<Message>> {
        self.try_send(message)
    }
}

impl<T: Outbox + ?Sized> Outbox for &T {
    fn try_publish(&self, message: Message) -> Result<(), TrySendError<Message>> {
        (**self).try_publish(message)
    }
}
