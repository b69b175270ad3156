//! Scripted stand-ins for the bus, the wakeup pin and the delay source. All of
//! them append to one shared event log so tests can check ordering.

use std::{cell::RefCell, collections::VecDeque, convert::Infallible, rc::Rc};

use embedded_hal::{delay::DelayNs, digital};
use fugit::MillisDurationU32;

use super::{BusWriteError, G3Bus, G3};
use crate::config::G3Config;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    PinLow,
    PinHigh,
    DelayMs(u32),
    DelayNs(u32),
    Write {
        address: u8,
        bytes: Vec<u8>,
        timeout_ms: u32,
    },
    Read {
        address: u8,
        len: usize,
        timeout_ms: u32,
    },
}

#[derive(Default)]
struct Inner {
    events: Vec<Event>,
    replies: VecDeque<Vec<u8>>,
    write_failures: VecDeque<BusWriteError>,
}

#[derive(Clone, Default)]
pub struct EventLog(Rc<RefCell<Inner>>);

impl EventLog {
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    /// next read offers these bytes; reads without a queued reply are not acknowledged
    pub fn queue_reply(&self, bytes: &[u8]) {
        self.0.borrow_mut().replies.push_back(bytes.to_vec());
    }

    pub fn fail_next_write(&self, e: BusWriteError) {
        self.0.borrow_mut().write_failures.push_back(e);
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Write { bytes, .. } => Some(bytes),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().events.push(event);
    }
}

pub struct FakeBus(pub EventLog);

impl G3Bus for FakeBus {
    fn write(
        &mut self,
        address: u8,
        bytes: &[u8],
        timeout: MillisDurationU32,
    ) -> Result<(), BusWriteError> {
        self.0.push(Event::Write {
            address,
            bytes: bytes.to_vec(),
            timeout_ms: timeout.ticks(),
        });
        match self.0 .0.borrow_mut().write_failures.pop_front() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn read(&mut self, address: u8, buffer: &mut [u8], timeout: MillisDurationU32) -> usize {
        self.0.push(Event::Read {
            address,
            len: buffer.len(),
            timeout_ms: timeout.ticks(),
        });
        let Some(reply) = self.0 .0.borrow_mut().replies.pop_front() else {
            return 0;
        };
        let n = reply.len().min(buffer.len());
        buffer[..n].copy_from_slice(&reply[..n]);
        n
    }
}

pub struct FakePin(pub EventLog);

impl digital::ErrorType for FakePin {
    type Error = Infallible;
}

impl digital::OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.push(Event::PinLow);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.push(Event::PinHigh);
        Ok(())
    }
}

pub struct FakeDelay(pub EventLog);

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(Event::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::DelayMs(ms));
    }
}

pub type FakeG3<const N: usize> = G3<FakeBus, FakePin, FakeDelay, N>;

pub fn fake_g3<const N: usize>() -> (FakeG3<N>, EventLog) {
    let log = EventLog::default();
    let g3 = G3::new(
        FakeBus(log.clone()),
        FakePin(log.clone()),
        FakeDelay(log.clone()),
        G3Config::default(),
    );
    (g3, log)
}
