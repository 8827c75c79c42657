//! Walks the trail through the site map core with a simulated GPS and a
//! logging "speech engine", on a simulated clock.
//!
//! Usage: `trail-native [seed]`

use anyhow::Context;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trail_core::{
    destination, distance_m, Capabilities, Coordinate, Effect, LiveFix, PlaybackError,
    RequestKind, SensorCommand, SensorError, SiteConfig, SiteMap, SpeechCommand, Ticket,
    TrailError, UtteranceId, SITE,
};

const DEFAULT_SEED: u64 = 7;
const STEP_MS: f64 = 1_000.0;
const WALK_SPEED_MPS: f64 = 1.2;
const DWELL_SEC: f64 = 60.0;
const GPS_NOISE_M: f64 = 1.0;
const SENSOR_LATENCY_MS: f64 = 800.0;
const POLL_DROP_PROBABILITY: f64 = 0.05;
const SPEECH_WORDS_PER_SEC: f64 = 2.5;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Pending {
    Answer(Ticket),
    Timeout(Ticket),
    PollTick,
    SpeechStart(UtteranceId),
    SpeechEnd(UtteranceId),
    SpeechInterrupted(UtteranceId),
}

/// Plays the browser's part: answers sensor requests, runs timers, speaks.
struct Host {
    now_ms: f64,
    queue: Vec<(f64, Pending)>,
    poll_every_ms: Option<u32>,
    speaking: Option<UtteranceId>,
    rng: StdRng,
}

impl Host {
    fn new(seed: u64) -> Self {
        Self {
            now_ms: 0.0,
            queue: Vec::new(),
            poll_every_ms: None,
            speaking: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn schedule(&mut self, after_ms: f64, p: Pending) {
        self.queue.push((self.now_ms + after_ms, p));
    }

    fn cancel(&mut self, p: Pending) {
        self.queue.retain(|(_, q)| *q != p);
    }

    /// Earliest event due by now; ties keep scheduling order.
    fn pop_due(&mut self) -> Option<Pending> {
        let mut best: Option<(usize, f64)> = None;
        for (i, (at, _)) in self.queue.iter().enumerate() {
            if *at <= self.now_ms && best.map_or(true, |(_, b)| *at < b) {
                best = Some((i, *at));
            }
        }
        best.map(|(i, _)| self.queue.remove(i).1)
    }

    fn noisy_fix(&mut self, at: Coordinate) -> LiveFix {
        let bearing = self.rng.gen_range(0.0..360.0);
        let offset = self.rng.gen_range(0.0..GPS_NOISE_M);
        let mut fix = LiveFix::new(destination(at, bearing, offset), self.now_ms);
        fix.accuracy_m = Some(GPS_NOISE_M);
        fix
    }

    fn execute(&mut self, out: &mut Vec<Effect>) {
        for effect in out.drain(..) {
            match effect {
                Effect::Sensor(cmd) => self.sensor(cmd),
                Effect::Speech(cmd) => self.speech(cmd),
                Effect::Camera(cmd) => log::info!("[camera] {:?}", cmd),
                Effect::Status(status) => log::info!("[status] {}", status),
            }
        }
    }

    fn sensor(&mut self, cmd: SensorCommand) {
        match cmd {
            SensorCommand::Request { ticket, .. } => {
                self.schedule(SENSOR_LATENCY_MS, Pending::Answer(ticket))
            }
            SensorCommand::ArmTimeout { ticket, after_ms } => {
                self.schedule(after_ms as f64, Pending::Timeout(ticket))
            }
            SensorCommand::DisarmTimeout { ticket } => self.cancel(Pending::Timeout(ticket)),
            SensorCommand::StartInterval { every_ms } => {
                self.poll_every_ms = Some(every_ms);
                self.schedule(every_ms as f64, Pending::PollTick);
            }
            SensorCommand::StopInterval => {
                self.poll_every_ms = None;
                self.cancel(Pending::PollTick);
            }
        }
    }

    fn speech(&mut self, cmd: SpeechCommand) {
        match cmd {
            SpeechCommand::Speak {
                utterance,
                text,
                voice,
            } => {
                let words = text.split_whitespace().count() as f64;
                let duration_ms = words / SPEECH_WORDS_PER_SEC / voice.rate as f64 * 1_000.0;
                log::info!("[speech] {} ({:.0} s): {}", utterance, duration_ms / 1_000.0, text);
                self.speaking = Some(utterance);
                self.schedule(0.0, Pending::SpeechStart(utterance));
                self.schedule(duration_ms, Pending::SpeechEnd(utterance));
            }
            SpeechCommand::Cancel => {
                // Browsers report a cancelled utterance as an "interrupted" error.
                if let Some(u) = self.speaking.take() {
                    self.cancel(Pending::SpeechEnd(u));
                    self.schedule(0.0, Pending::SpeechInterrupted(u));
                }
            }
        }
    }
}

/// The visitor's position along the trail path, dwelling at every stop.
struct Walker {
    stops: &'static [Coordinate],
    leg: usize,
    along_m: f64,
    dwell_left_sec: f64,
    position: Coordinate,
}

impl Walker {
    fn new(stops: &'static [Coordinate]) -> Option<Self> {
        let first = *stops.first()?;
        Some(Self {
            stops,
            leg: 0,
            along_m: 0.0,
            dwell_left_sec: DWELL_SEC,
            position: first,
        })
    }

    fn finished(&self) -> bool {
        self.leg + 1 >= self.stops.len() && self.dwell_left_sec <= 0.0
    }

    fn step(&mut self, dt_sec: f64) {
        if self.dwell_left_sec > 0.0 {
            self.dwell_left_sec -= dt_sec;
            return;
        }
        if self.leg + 1 >= self.stops.len() {
            return;
        }
        let (a, b) = (self.stops[self.leg], self.stops[self.leg + 1]);
        let len = distance_m(a, b);
        self.along_m += WALK_SPEED_MPS * dt_sec;
        if self.along_m >= len {
            self.leg += 1;
            self.along_m = 0.0;
            self.position = b;
            self.dwell_left_sec = DWELL_SEC;
            log::info!("[walk] reached stop {} after {:.0} m", self.leg, len);
        } else {
            let t = self.along_m / len;
            self.position = Coordinate::new(a.lat + (b.lat - a.lat) * t, a.lon + (b.lon - a.lon) * t);
        }
    }
}

#[derive(Debug)]
struct Summary {
    narrated: Vec<&'static str>,
    elapsed_ms: f64,
}

fn run(seed: u64) -> Result<Summary, TrailError> {
    let mut site = SiteMap::new(&SITE, SiteConfig::default(), Capabilities::default())?;
    let mut host = Host::new(seed);
    let mut out = Vec::new();
    let mut narrated: Vec<&'static str> = Vec::new();
    let Some(mut walker) = Walker::new(SITE.path) else {
        return Ok(Summary {
            narrated,
            elapsed_ms: 0.0,
        });
    };

    site.locate_me(&mut out);
    host.execute(&mut out);

    while !walker.finished() {
        host.now_ms += STEP_MS;
        walker.step(STEP_MS / 1_000.0);

        while let Some(p) = host.pop_due() {
            match p {
                Pending::Answer(ticket) => {
                    let is_poll = matches!(
                        site.sampler().in_flight(),
                        Some((t, RequestKind::Poll)) if t == ticket
                    );
                    if is_poll && host.rng.gen_bool(POLL_DROP_PROBABILITY) {
                        site.on_position_error(ticket, SensorError::Unavailable, &mut out);
                    } else {
                        let fix = host.noisy_fix(walker.position);
                        site.on_position(ticket, fix, &mut out);
                    }
                }
                Pending::Timeout(ticket) => site.on_request_timeout(ticket, &mut out),
                Pending::PollTick => {
                    site.on_poll_tick(&mut out);
                    if let Some(every) = host.poll_every_ms {
                        host.schedule(every as f64, Pending::PollTick);
                    }
                }
                Pending::SpeechStart(u) => site.on_speech_start(u),
                Pending::SpeechEnd(u) => {
                    if host.speaking == Some(u) {
                        host.speaking = None;
                    }
                    site.on_speech_end(u);
                }
                Pending::SpeechInterrupted(u) => {
                    site.on_speech_error(u, PlaybackError::Failed("interrupted".into()), &mut out)
                }
            }
            host.execute(&mut out);
        }

        // The visitor presses play on reaching a point they have not just heard.
        if let Some(point) = site.highlighted_point() {
            let fresh = narrated.last() != Some(&point.id());
            if fresh && site.session().active_point_id != Some(point.id()) {
                if site.play_nearest(&mut out)?.is_some() {
                    narrated.push(point.id());
                }
                host.execute(&mut out);
            }
        }
    }

    site.teardown(&mut out);
    host.execute(&mut out);
    Ok(Summary {
        narrated,
        elapsed_ms: host.now_ms,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("seed must be an unsigned integer, got {arg:?}"))?,
        None => DEFAULT_SEED,
    };
    log::info!("[walk] seed {}", seed);

    let summary = run(seed)?;
    log::info!(
        "[walk] done in {:.0} s, narrated {}",
        summary.elapsed_ms / 1_000.0,
        summary.narrated.join(" -> ")
    );
    Ok(())
}
