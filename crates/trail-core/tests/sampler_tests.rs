// Host-side tests for one-shot requests, polling lifecycle and stale outcomes.

use trail_core::*;

fn fix(lat: f64, lon: f64, ts: f64) -> LiveFix {
    LiveFix::new(Coordinate::new(lat, lon), ts)
}

fn requests(out: &[Effect]) -> Vec<(Ticket, PositionOptions)> {
    out.iter()
        .filter_map(|e| match e {
            Effect::Sensor(SensorCommand::Request { ticket, options }) => Some((*ticket, *options)),
            _ => None,
        })
        .collect()
}

fn intervals_started(out: &[Effect]) -> usize {
    out.iter()
        .filter(|e| matches!(e, Effect::Sensor(SensorCommand::StartInterval { .. })))
        .count()
}

#[test]
fn one_shot_requests_high_accuracy_with_timeout() {
    let mut s = LocationSampler::new(true, 8_000);
    let mut out = Vec::new();
    let t = s.request_once(&mut out).unwrap();
    let reqs = requests(&out);
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].0, t);
    assert!(reqs[0].1.high_accuracy);
    assert_eq!(reqs[0].1.timeout_ms, Some(8_000));
    assert!(out.contains(&Effect::Sensor(SensorCommand::ArmTimeout {
        ticket: t,
        after_ms: 8_000
    })));
    assert_eq!(s.in_flight(), Some((t, RequestKind::OneShot)));
}

#[test]
fn unsupported_sensor_fails_immediately() {
    let mut s = LocationSampler::new(false, 8_000);
    let mut out = Vec::new();
    assert_eq!(s.request_once(&mut out), Err(SensorError::Unsupported));
    assert!(out.is_empty());
    assert!(!s.start_polling(15_000, &mut out));
}

#[test]
fn repeated_one_shot_reuses_pending_ticket() {
    let mut s = LocationSampler::new(true, 8_000);
    let mut out = Vec::new();
    let a = s.request_once(&mut out).unwrap();
    out.clear();
    let b = s.request_once(&mut out).unwrap();
    assert_eq!(a, b);
    assert!(out.is_empty());
}

#[test]
fn successful_one_shot_stores_fix_and_disarms_timer() {
    let mut s = LocationSampler::new(true, 8_000);
    let mut out = Vec::new();
    let t = s.request_once(&mut out).unwrap();
    out.clear();
    let sample = s.on_position(t, fix(44.6256, -63.9224, 1_000.0), &mut out).unwrap();
    assert_eq!(sample.kind, RequestKind::OneShot);
    assert!(sample.applied);
    assert_eq!(out, vec![Effect::Sensor(SensorCommand::DisarmTimeout { ticket: t })]);
    assert_eq!(s.live_fix().unwrap().timestamp_ms, 1_000.0);
    assert_eq!(s.in_flight(), None);
}

#[test]
fn timeout_keeps_previous_fix_and_ignores_late_answer() {
    let mut s = LocationSampler::new(true, 8_000);
    let mut out = Vec::new();
    let first = s.request_once(&mut out).unwrap();
    s.on_position(first, fix(44.6256, -63.9224, 1_000.0), &mut out);
    let prior = s.live_fix();

    let t = s.request_once(&mut out).unwrap();
    assert_eq!(s.on_timeout(t), Some(SensorError::Timeout));
    assert_eq!(s.live_fix(), prior);

    // A second timer firing or a late sensor answer change nothing.
    assert_eq!(s.on_timeout(t), None);
    assert!(s.on_position(t, fix(1.0, 1.0, 9_000.0), &mut out).is_none());
    assert_eq!(s.live_fix(), prior);
}

#[test]
fn one_shot_errors_surface_but_leave_fix_alone() {
    let mut s = LocationSampler::new(true, 8_000);
    let mut out = Vec::new();
    let t = s.request_once(&mut out).unwrap();
    s.on_position(t, fix(44.0, -63.0, 5.0), &mut out);
    for err in [SensorError::PermissionDenied, SensorError::Unavailable] {
        let t = s.request_once(&mut out).unwrap();
        out.clear();
        assert_eq!(s.on_error(t, err, &mut out), Some(err));
        assert_eq!(out, vec![Effect::Sensor(SensorCommand::DisarmTimeout { ticket: t })]);
        assert_eq!(s.live_fix().unwrap().location, Coordinate::new(44.0, -63.0));
    }
}

#[test]
fn start_polling_twice_starts_one_interval() {
    let mut s = LocationSampler::new(true, 8_000);
    let mut out = Vec::new();
    assert!(s.start_polling(15_000, &mut out));
    assert!(!s.start_polling(15_000, &mut out));
    assert_eq!(intervals_started(&out), 1);
    assert_eq!(out[0], Effect::Sensor(SensorCommand::StartInterval { every_ms: 15_000 }));
    assert!(s.is_polling());
}

#[test]
fn ensure_polling_only_ever_starts_once() {
    let mut s = LocationSampler::new(true, 8_000);
    let mut out = Vec::new();
    assert!(s.ensure_polling(15_000, &mut out));
    assert!(s.stop_polling(&mut out));
    assert!(!s.ensure_polling(15_000, &mut out));
    assert_eq!(intervals_started(&out), 1);
    assert!(!s.stop_polling(&mut out), "stop is idempotent");
}

#[test]
fn poll_errors_are_swallowed() {
    let mut s = LocationSampler::new(true, 8_000);
    let mut out = Vec::new();
    s.start_polling(15_000, &mut out);
    let t = s.on_poll_tick(&mut out).unwrap();
    out.clear();
    assert_eq!(s.on_error(t, SensorError::Unavailable, &mut out), None);
    assert!(out.is_empty());
    assert!(s.live_fix().is_none());
    // Next tick proceeds normally.
    assert!(s.on_poll_tick(&mut out).is_some());
}

#[test]
fn hung_tick_delays_the_next_poll_by_one_interval() {
    let mut s = LocationSampler::new(true, 8_000);
    let mut out = Vec::new();
    s.start_polling(15_000, &mut out);
    let hung = s.on_poll_tick(&mut out).unwrap();
    assert!(s.on_poll_tick(&mut out).is_none());
    let next = s.on_poll_tick(&mut out).unwrap();
    assert_ne!(next, hung);
    assert_eq!(requests(&out).len(), 2);
    // The abandoned request's late answer is ignored.
    assert!(s.on_position(hung, fix(44.6, -63.9, 10.0), &mut out).is_none());
    let sample = s.on_position(next, fix(44.6, -63.9, 20.0), &mut out).unwrap();
    assert_eq!(sample.kind, RequestKind::Poll);
    assert!(s.on_poll_tick(&mut out).is_some());
}

#[test]
fn polling_keeps_sampling_when_requests_never_answer() {
    let mut s = LocationSampler::new(true, 8_000);
    let mut out = Vec::new();
    s.start_polling(15_000, &mut out);
    s.on_poll_tick(&mut out).unwrap();
    out.clear();
    // An hour of 15 s ticks with no sensor answers at all.
    for _ in 0..240 {
        s.on_poll_tick(&mut out);
    }
    assert_eq!(requests(&out).len(), 120);
    assert!(s.is_polling());
}

#[test]
fn poll_requests_carry_a_sensor_timeout() {
    let mut s = LocationSampler::new(true, 8_000);
    let mut out = Vec::new();
    s.start_polling(15_000, &mut out);
    s.on_poll_tick(&mut out).unwrap();
    let reqs = requests(&out);
    assert_eq!(reqs[0].1.timeout_ms, Some(8_000));
    assert!(reqs[0].1.high_accuracy);
}

#[test]
fn tick_waits_behind_a_pending_one_shot() {
    let mut s = LocationSampler::new(true, 8_000);
    let mut out = Vec::new();
    s.start_polling(15_000, &mut out);
    let t = s.request_once(&mut out).unwrap();
    for _ in 0..3 {
        assert!(s.on_poll_tick(&mut out).is_none());
    }
    assert_eq!(s.in_flight(), Some((t, RequestKind::OneShot)));
}

#[test]
fn poll_tick_without_polling_does_nothing() {
    let mut s = LocationSampler::new(true, 8_000);
    let mut out = Vec::new();
    assert!(s.on_poll_tick(&mut out).is_none());
    assert!(out.is_empty());
}

#[test]
fn older_fix_is_rejected() {
    let mut s = LocationSampler::new(true, 8_000);
    let mut out = Vec::new();
    s.start_polling(15_000, &mut out);
    let t1 = s.on_poll_tick(&mut out).unwrap();
    s.on_position(t1, fix(44.6, -63.9, 2_000.0), &mut out);
    let t2 = s.on_poll_tick(&mut out).unwrap();
    let sample = s.on_position(t2, fix(44.7, -63.8, 1_000.0), &mut out).unwrap();
    assert!(!sample.applied);
    assert_eq!(s.live_fix().unwrap().timestamp_ms, 2_000.0);
}

#[test]
fn one_shot_supersedes_inflight_poll() {
    let mut s = LocationSampler::new(true, 8_000);
    let mut out = Vec::new();
    s.start_polling(15_000, &mut out);
    let poll = s.on_poll_tick(&mut out).unwrap();
    let once = s.request_once(&mut out).unwrap();
    assert_ne!(poll, once);
    assert!(s.on_position(poll, fix(44.6, -63.9, 1.0), &mut out).is_none());
    assert!(s.on_position(once, fix(44.6, -63.9, 2.0), &mut out).is_some());
}

#[test]
fn shutdown_releases_interval_and_timer() {
    let mut s = LocationSampler::new(true, 8_000);
    let mut out = Vec::new();
    s.start_polling(15_000, &mut out);
    let t = s.request_once(&mut out).unwrap();
    out.clear();
    s.shutdown(&mut out);
    assert!(out.contains(&Effect::Sensor(SensorCommand::StopInterval)));
    assert!(out.contains(&Effect::Sensor(SensorCommand::DisarmTimeout { ticket: t })));
    assert!(!s.is_polling());
    assert!(s.on_position(t, fix(44.6, -63.9, 1.0), &mut out).is_none());
}

#[test]
fn error_codes_map_to_sensor_errors() {
    assert_eq!(SensorError::from_code(1), SensorError::PermissionDenied);
    assert_eq!(SensorError::from_code(2), SensorError::Unavailable);
    assert_eq!(SensorError::from_code(3), SensorError::Timeout);
    assert_eq!(SensorError::from_code(42), SensorError::Unavailable);
}
