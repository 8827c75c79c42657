// Host-side tests for the single-slot narration state machine.

use trail_core::*;

fn speaks(out: &[Effect]) -> Vec<UtteranceId> {
    out.iter()
        .filter_map(|e| match e {
            Effect::Speech(SpeechCommand::Speak { utterance, .. }) => Some(*utterance),
            _ => None,
        })
        .collect()
}

fn cancels(out: &[Effect]) -> usize {
    out.iter()
        .filter(|e| matches!(e, Effect::Speech(SpeechCommand::Cancel)))
        .count()
}

#[test]
fn play_then_natural_end_returns_to_idle() {
    let mut n = Narrator::new(true, Voice::default());
    let mut out = Vec::new();
    let u = n.play("well", "You are near the old well.", &mut out).unwrap();
    assert_eq!(
        n.state(),
        NarrationState::Playing {
            point_id: "well",
            utterance: u
        }
    );
    assert_eq!(
        n.session(),
        NarrationSession {
            active_point_id: Some("well"),
            is_playing: true
        }
    );
    assert_eq!(cancels(&out), 0);
    match &out[0] {
        Effect::Speech(SpeechCommand::Speak { text, voice, .. }) => {
            assert_eq!(text, "You are near the old well.");
            assert_eq!(voice.lang, "en-CA");
            assert_eq!(voice.rate, 1.0);
        }
        other => panic!("unexpected {other:?}"),
    }

    assert!(n.on_start(u));
    assert!(n.on_end(u));
    assert_eq!(n.state(), NarrationState::Idle);
    assert!(!n.session().is_playing);
}

#[test]
fn second_play_cancels_the_first_exactly_once() {
    let mut n = Narrator::new(true, Voice::default());
    let mut out = Vec::new();
    let a = n.play("a", "text a", &mut out).unwrap();
    out.clear();
    let b = n.play("b", "text b", &mut out).unwrap();
    assert_ne!(a, b);
    assert_eq!(cancels(&out), 1);
    assert_eq!(speaks(&out), vec![b]);
    // cancel is issued before the new utterance starts
    assert!(matches!(out[0], Effect::Speech(SpeechCommand::Cancel)));
    assert_eq!(
        n.state(),
        NarrationState::Playing {
            point_id: "b",
            utterance: b
        }
    );

    // The engine reports the end of the cancelled utterance late; it must not
    // knock the new one back to idle.
    assert!(!n.on_end(a));
    assert!(n.on_error(a, PlaybackError::Failed("interrupted".into())).is_none());
    assert_eq!(n.session().active_point_id, Some("b"));
}

#[test]
fn replaying_the_same_point_restarts_it() {
    let mut n = Narrator::new(true, Voice::default());
    let mut out = Vec::new();
    let first = n.play("well", "t", &mut out).unwrap();
    out.clear();
    let second = n.play("well", "t", &mut out).unwrap();
    assert_ne!(first, second);
    assert_eq!(cancels(&out), 1);
    assert_eq!(speaks(&out), vec![second]);
}

#[test]
fn stop_cancels_in_any_state() {
    let mut n = Narrator::new(true, Voice::default());
    let mut out = Vec::new();
    assert_eq!(n.stop(&mut out), None);
    assert_eq!(cancels(&out), 1);

    out.clear();
    let u = n.play("well", "t", &mut out).unwrap();
    out.clear();
    assert_eq!(n.stop(&mut out), Some("well"));
    assert_eq!(cancels(&out), 1);
    assert_eq!(n.state(), NarrationState::Idle);
    assert!(!n.on_end(u), "ended after stop is stale");
}

#[test]
fn playback_error_resets_without_retry() {
    let mut n = Narrator::new(true, Voice::default());
    let mut out = Vec::new();
    let u = n.play("well", "t", &mut out).unwrap();
    out.clear();
    let err = n.on_error(u, PlaybackError::Failed("synthesis-failed".into()));
    assert_eq!(err, Some(PlaybackError::Failed("synthesis-failed".into())));
    assert_eq!(n.state(), NarrationState::Idle);
    assert!(out.is_empty(), "no automatic retry");
}

#[test]
fn unsupported_engine_refuses_to_play() {
    let mut n = Narrator::new(false, Voice::default());
    let mut out = Vec::new();
    assert_eq!(n.play("well", "t", &mut out), Err(PlaybackError::Unsupported));
    assert!(out.is_empty());
    assert_eq!(n.state(), NarrationState::Idle);
}
