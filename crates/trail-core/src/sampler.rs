//! Location sampling: one-shot "locate me" requests and the background poll.
//!
//! The sampler never touches the sensor itself. It pushes [`SensorCommand`]s
//! for the host to carry out and is fed the outcomes through `on_position`,
//! `on_error` and `on_timeout`, each tagged with the [`Ticket`] it issued.
//! Outcomes for tickets that are no longer in flight are dropped.

use std::fmt;

use crate::effect::Effect;
use crate::error::SensorError;
use crate::geo::Coordinate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout_ms: Option<u32>,
    pub maximum_age_ms: u32,
}

/// The most recent accepted position sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiveFix {
    pub location: Coordinate,
    /// Sensor timestamp, milliseconds since the unix epoch.
    pub timestamp_ms: f64,
    pub accuracy_m: Option<f64>,
}

impl LiveFix {
    pub fn new(location: Coordinate, timestamp_ms: f64) -> Self {
        Self {
            location,
            timestamp_ms,
            accuracy_m: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SensorCommand {
    Request {
        ticket: Ticket,
        options: PositionOptions,
    },
    ArmTimeout {
        ticket: Ticket,
        after_ms: u32,
    },
    DisarmTimeout {
        ticket: Ticket,
    },
    StartInterval {
        every_ms: u32,
    },
    StopInterval,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    OneShot,
    Poll,
}

/// An accepted sensor reading and whether it replaced the stored fix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub kind: RequestKind,
    pub fix: LiveFix,
    pub applied: bool,
}

#[derive(Debug)]
pub struct LocationSampler {
    supported: bool,
    timeout_ms: u32,
    live_fix: Option<LiveFix>,
    in_flight: Option<(Ticket, RequestKind)>,
    polling: bool,
    polling_started: bool,
    // Ticks skipped behind the current poll request.
    poll_skips: u32,
    next_ticket: u64,
}

impl LocationSampler {
    pub fn new(supported: bool, timeout_ms: u32) -> Self {
        Self {
            supported,
            timeout_ms,
            live_fix: None,
            in_flight: None,
            polling: false,
            polling_started: false,
            poll_skips: 0,
            next_ticket: 1,
        }
    }

    #[inline]
    pub fn live_fix(&self) -> Option<LiveFix> {
        self.live_fix
    }

    #[inline]
    pub fn is_polling(&self) -> bool {
        self.polling
    }

    #[inline]
    pub fn in_flight(&self) -> Option<(Ticket, RequestKind)> {
        self.in_flight
    }

    fn issue(&mut self, kind: RequestKind) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some((ticket, kind));
        self.poll_skips = 0;
        ticket
    }

    /// User-initiated single position request with a bounded timeout.
    pub fn request_once(&mut self, out: &mut Vec<Effect>) -> Result<Ticket, SensorError> {
        if !self.supported {
            return Err(SensorError::Unsupported);
        }
        match self.in_flight {
            Some((ticket, RequestKind::OneShot)) => {
                log::debug!("[sampler] one-shot {} already pending", ticket);
                return Ok(ticket);
            }
            Some((ticket, RequestKind::Poll)) => {
                log::debug!("[sampler] one-shot supersedes poll {}", ticket);
            }
            None => {}
        }
        let ticket = self.issue(RequestKind::OneShot);
        out.push(
            SensorCommand::Request {
                ticket,
                options: PositionOptions {
                    high_accuracy: true,
                    timeout_ms: Some(self.timeout_ms),
                    maximum_age_ms: 0,
                },
            }
            .into(),
        );
        out.push(
            SensorCommand::ArmTimeout {
                ticket,
                after_ms: self.timeout_ms,
            }
            .into(),
        );
        Ok(ticket)
    }

    /// Begin the repeating sample. Returns false if already polling.
    pub fn start_polling(&mut self, every_ms: u32, out: &mut Vec<Effect>) -> bool {
        if self.polling || !self.supported {
            return false;
        }
        self.polling = true;
        self.polling_started = true;
        log::info!("[sampler] polling every {} ms", every_ms);
        out.push(SensorCommand::StartInterval { every_ms }.into());
        true
    }

    pub fn stop_polling(&mut self, out: &mut Vec<Effect>) -> bool {
        if !self.polling {
            return false;
        }
        self.polling = false;
        if matches!(self.in_flight, Some((_, RequestKind::Poll))) {
            self.in_flight = None;
        }
        log::info!("[sampler] polling stopped");
        out.push(SensorCommand::StopInterval.into());
        true
    }

    /// Start polling unless it has ever been started before.
    pub fn ensure_polling(&mut self, every_ms: u32, out: &mut Vec<Effect>) -> bool {
        if self.polling_started {
            return false;
        }
        self.start_polling(every_ms, out)
    }

    /// One interval tick.
    ///
    /// Skipped while a one-shot is outstanding. A poll still unanswered after
    /// one skipped tick is abandoned and replaced, so a hung request delays
    /// the next sample by at most one interval.
    pub fn on_poll_tick(&mut self, out: &mut Vec<Effect>) -> Option<Ticket> {
        if !self.polling {
            return None;
        }
        match self.in_flight {
            Some((ticket, RequestKind::OneShot)) => {
                log::debug!("[sampler] tick skipped, one-shot {} in flight", ticket);
                return None;
            }
            Some((ticket, RequestKind::Poll)) if self.poll_skips == 0 => {
                log::debug!("[sampler] tick skipped, poll {} still in flight", ticket);
                self.poll_skips += 1;
                return None;
            }
            Some((ticket, RequestKind::Poll)) => {
                log::debug!("[sampler] abandoning hung poll {}", ticket);
            }
            None => {}
        }
        let ticket = self.issue(RequestKind::Poll);
        out.push(
            SensorCommand::Request {
                ticket,
                options: PositionOptions {
                    high_accuracy: true,
                    timeout_ms: Some(self.timeout_ms),
                    maximum_age_ms: 0,
                },
            }
            .into(),
        );
        Some(ticket)
    }

    fn take_in_flight(&mut self, ticket: Ticket) -> Option<RequestKind> {
        match self.in_flight {
            Some((t, kind)) if t == ticket => {
                self.in_flight = None;
                Some(kind)
            }
            _ => {
                log::debug!("[sampler] dropping stale outcome for {}", ticket);
                None
            }
        }
    }

    pub fn on_position(
        &mut self,
        ticket: Ticket,
        fix: LiveFix,
        out: &mut Vec<Effect>,
    ) -> Option<Sample> {
        let kind = self.take_in_flight(ticket)?;
        if kind == RequestKind::OneShot {
            out.push(SensorCommand::DisarmTimeout { ticket }.into());
        }
        let applied = match self.live_fix {
            Some(prev) if fix.timestamp_ms < prev.timestamp_ms => {
                log::debug!(
                    "[sampler] {} is older than the stored fix ({} < {})",
                    ticket,
                    fix.timestamp_ms,
                    prev.timestamp_ms
                );
                false
            }
            _ => {
                self.live_fix = Some(fix);
                true
            }
        };
        Some(Sample { kind, fix, applied })
    }

    /// Returns the error only for a one-shot; poll failures are swallowed.
    pub fn on_error(
        &mut self,
        ticket: Ticket,
        error: SensorError,
        out: &mut Vec<Effect>,
    ) -> Option<SensorError> {
        match self.take_in_flight(ticket)? {
            RequestKind::OneShot => {
                out.push(SensorCommand::DisarmTimeout { ticket }.into());
                log::warn!("[sampler] one-shot {} failed: {}", ticket, error);
                Some(error)
            }
            RequestKind::Poll => {
                log::debug!("[sampler] poll {} failed: {}", ticket, error);
                None
            }
        }
    }

    pub fn on_timeout(&mut self, ticket: Ticket) -> Option<SensorError> {
        match self.in_flight {
            Some((t, RequestKind::OneShot)) if t == ticket => {
                self.in_flight = None;
                log::warn!("[sampler] one-shot {} timed out", ticket);
                Some(SensorError::Timeout)
            }
            _ => None,
        }
    }

    /// Release the interval and any armed timer.
    pub fn shutdown(&mut self, out: &mut Vec<Effect>) {
        self.stop_polling(out);
        if let Some((ticket, RequestKind::OneShot)) = self.in_flight.take() {
            out.push(SensorCommand::DisarmTimeout { ticket }.into());
        }
        self.in_flight = None;
    }
}
