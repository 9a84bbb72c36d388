//! Integration tests for paced playback driven by a manual timer

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use ttyplay::config::PlaybackConfig;
use ttyplay::player::{ManualTimer, Player, PlayerState};
use ttyplay::source::{read_recording, LoadError};
use ttyplay::ttyrec::{DecodeError, Decoder};

use super::helpers::{demo_recording, gzip, recording, temp_recording};

type TestPlayer = Player<Vec<u8>, ManualTimer>;

fn player(speed: f64, max_delay_ms: u64, autostart: bool) -> TestPlayer {
    let config = PlaybackConfig {
        speed,
        max_delay_ms,
        autostart,
    };
    Player::new(Vec::<u8>::new(), ManualTimer::new(), &config)
        .unwrap()
        .with_decoder(Decoder::with_gzip())
}

/// Deliver every scheduled tick in order until nothing is pending.
fn drain(player: &mut TestPlayer) {
    while let Some(scheduled) = player.timer_mut().take_next() {
        player.fire(scheduled.tick);
    }
}

#[test]
fn double_speed_halves_the_gap() {
    let raw = recording(&[(1, 0, b"a"), (2, 500_000, b"b")]);
    let mut player = player(2.0, 10_000, true);

    player.open(Ok(raw.into())).unwrap();

    assert_eq!(player.sink(), b"a");
    assert_eq!(player.timer().delays(), vec![Duration::from_millis(750)]);
    drain(&mut player);
    assert_eq!(player.sink(), b"ab");
    assert_eq!(player.status(), PlayerState::Finished);
}

#[test]
fn long_gap_is_clamped_to_max_delay() {
    let raw = recording(&[(1, 0, b"a"), (61, 0, b"b")]);
    let mut player = player(1.0, 100, true);

    player.open(Ok(raw.into())).unwrap();

    assert_eq!(player.timer().delays(), vec![Duration::from_millis(100)]);
}

#[test]
fn emits_every_payload_once_in_order() {
    let mut player = player(1.0, 1_000, true);
    player.open(Ok(demo_recording().into())).unwrap();
    drain(&mut player);

    assert_eq!(player.sink(), b"hello\r\nworld");
    assert_eq!(
        player.timer().delays(),
        vec![Duration::from_millis(500), Duration::from_millis(1_000)]
    );
    assert_eq!(player.cursor(), 3);
    assert!(!player.is_pending());
}

#[test]
fn end_of_stream_schedules_nothing_further() {
    let mut player = player(1.0, 1_000, true);
    player.open(Ok(demo_recording().into())).unwrap();
    drain(&mut player);
    let scheduled = player.timer().history().len();

    player.play();
    assert!(player.step().is_none());

    assert_eq!(player.timer().history().len(), scheduled);
    assert_eq!(player.sink(), b"hello\r\nworld");
    assert_eq!(player.status(), PlayerState::Finished);
}

#[test]
fn stop_then_play_resumes_at_cursor() {
    let mut player = player(1.0, 1_000, true);
    player.open(Ok(demo_recording().into())).unwrap();

    player.stop();
    assert_eq!(player.status(), PlayerState::Paused);
    assert_eq!(player.cursor(), 1);

    player.play();
    assert_eq!(player.sink(), b"hello\r\n");
    drain(&mut player);
    assert_eq!(player.sink(), b"hello\r\nworld");
}

#[test]
fn cancelled_tick_is_ignored_when_it_arrives_late() {
    let mut player = player(1.0, 1_000, true);
    player.open(Ok(demo_recording().into())).unwrap();

    let stale = player.timer().pending().unwrap().tick;
    player.stop();

    assert!(!player.fire(stale));
    assert_eq!(player.sink(), b"hello");
}

#[test]
fn without_autostart_open_only_loads() {
    let mut player = player(1.0, 1_000, false);
    player.open(Ok(demo_recording().into())).unwrap();

    assert_eq!(player.status(), PlayerState::Ready);
    assert!(player.sink().is_empty());
    assert!(player.timer().history().is_empty());
}

#[test]
fn seek_to_time_then_play() {
    let mut player = player(1.0, 1_000, false);
    player.open(Ok(demo_recording().into())).unwrap();

    assert_eq!(player.seek_to_time(Duration::from_millis(400)), 1);
    player.play();
    drain(&mut player);

    assert_eq!(player.sink(), b"\r\nworld");
}

#[test]
fn gzipped_file_plays_like_plain() {
    let (_dir, path) = temp_recording("demo.ttyrec.gz", &gzip(&demo_recording()));
    let mut player = player(1.0, 1_000, true);

    player.open(read_recording(&path)).unwrap();
    drain(&mut player);

    assert_eq!(player.sink(), b"hello\r\nworld");
    assert!(player.sequence().unwrap().was_compressed());
}

#[test]
fn truncated_file_reports_and_keeps_previous_recording() {
    let mut raw = demo_recording();
    raw.truncate(raw.len() - 2);
    let (_dir, path) = temp_recording("broken.ttyrec", &raw);

    let errors = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&errors);
    let mut player = player(1.0, 1_000, false).on_error(move |err: &LoadError| {
        seen.borrow_mut().push(err.to_string());
    });

    player.open(Ok(demo_recording().into())).unwrap();
    player.open(read_recording(&path)).unwrap();

    assert_eq!(errors.borrow().len(), 1);
    assert!(errors.borrow()[0].contains("truncated"));
    assert_eq!(player.sequence().unwrap().len(), 3);
}

#[test]
fn missing_file_without_handler_is_returned() {
    let mut player = player(1.0, 1_000, true);
    let err = player
        .open(read_recording("/nonexistent/session.ttyrec"))
        .unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
    assert_eq!(player.status(), PlayerState::Idle);
}

#[test]
fn gzip_without_decoder_support_is_reported() {
    let config = PlaybackConfig::default();
    let mut player = Player::new(Vec::<u8>::new(), ManualTimer::new(), &config).unwrap();

    let err = player
        .open(Ok(gzip(&demo_recording()).into()))
        .unwrap_err();
    assert!(matches!(
        err,
        LoadError::Decode(DecodeError::CompressionUnsupported)
    ));
}
