//! Bounded phase-event channel for `no_std` environments.
//!
//! Drivers usually learn about progress in a timer or DMA-complete interrupt.
//! They post [`PhaseEvent`]s here and the main loop drains them into
//! [`LightController::process_pending`](crate::LightController::process_pending),
//! so no core logic ever runs inside the interrupt itself.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::driver::PhaseEvent;

/// The channel was full; the report is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError(pub PhaseEvent);

/// The channel held no reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Queue of at most `SIZE` pending phase reports, guarded by critical sections.
pub struct PhaseChannel<const SIZE: usize> {
    pending: Mutex<RefCell<Deque<PhaseEvent, SIZE>>>,
}

impl<const SIZE: usize> PhaseChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for the interrupt side.
    pub const fn sender(&self) -> PhaseSender<'_, SIZE> {
        PhaseSender { channel: self }
    }

    /// Handle for the main loop.
    pub const fn receiver(&self) -> PhaseReceiver<'_, SIZE> {
        PhaseReceiver { channel: self }
    }

    /// Queues `event` behind any reports already waiting.
    pub fn try_send(&self, event: PhaseEvent) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            self.pending
                .borrow(cs)
                .borrow_mut()
                .push_back(event)
                .map_err(TrySendError)
        })
    }

    /// Takes the oldest waiting report.
    pub fn try_receive(&self) -> Result<PhaseEvent, TryReceiveError> {
        critical_section::with(|cs| {
            self.pending
                .borrow(cs)
                .borrow_mut()
                .pop_front()
                .ok_or(TryReceiveError)
        })
    }

    /// Number of reports waiting to be handled.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.pending.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for PhaseChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Posting half of a [`PhaseChannel`].
#[derive(Clone, Copy)]
pub struct PhaseSender<'a, const SIZE: usize> {
    channel: &'a PhaseChannel<SIZE>,
}

impl<const SIZE: usize> PhaseSender<'_, SIZE> {
    pub fn try_send(&self, event: PhaseEvent) -> Result<(), TrySendError> {
        self.channel.try_send(event)
    }
}

/// Draining half of a [`PhaseChannel`].
#[derive(Clone, Copy)]
pub struct PhaseReceiver<'a, const SIZE: usize> {
    channel: &'a PhaseChannel<SIZE>,
}

impl<const SIZE: usize> PhaseReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Result<PhaseEvent, TryReceiveError> {
        self.channel.try_receive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::PhaseSink;
    use crate::types::ActionPhase;

    #[test]
    fn events_come_out_in_order() {
        let channel: PhaseChannel<4> = PhaseChannel::new();
        let sender = channel.sender();
        let receiver = channel.receiver();

        sender.try_send(PhaseEvent::new(PhaseSink::Status, ActionPhase::InProgress)).unwrap();
        sender.try_send(PhaseEvent::new(PhaseSink::Status, ActionPhase::Done)).unwrap();
        assert_eq!(channel.len(), 2);

        assert_eq!(receiver.try_receive().unwrap().phase, ActionPhase::InProgress);
        assert_eq!(receiver.try_receive().unwrap().phase, ActionPhase::Done);
        assert_eq!(receiver.try_receive(), Err(TryReceiveError));
        assert!(channel.is_empty());
    }

    #[test]
    fn full_channel_hands_event_back() {
        let channel: PhaseChannel<1> = PhaseChannel::new();
        let event = PhaseEvent::sequence_tick();
        channel.try_send(event).unwrap();
        assert_eq!(channel.try_send(event), Err(TrySendError(event)));
        assert_eq!(channel.len(), 1);
    }

    #[test]
    fn sender_copies_share_one_queue() {
        let channel: PhaseChannel<4> = PhaseChannel::new();
        let timer = channel.sender();
        let dma = timer;

        timer.try_send(PhaseEvent::sequence_tick()).unwrap();
        dma.try_send(PhaseEvent::new(PhaseSink::Status, ActionPhase::Done)).unwrap();

        let receiver = channel.receiver();
        assert_eq!(receiver.try_receive().unwrap().sink, PhaseSink::Sequence);
        assert_eq!(receiver.try_receive().unwrap().sink, PhaseSink::Status);
    }
}
