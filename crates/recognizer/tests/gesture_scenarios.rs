mod support;

use gesture_gallery_landmark_model::{parse_frame_line_lossy, Command, ContactRegion};
use gesture_gallery_recognizer::{RecognizerConfig, SequencerPhase, TimeWindow, READY_FEEDBACK};

use support::{commands, recognizer, Script};

fn frame_windows(double_touch: u64, two_step: u64) -> RecognizerConfig {
    RecognizerConfig {
        double_touch_window: TimeWindow::Frames(double_touch),
        two_step_window: TimeWindow::Frames(two_step),
        ..RecognizerConfig::default()
    }
}

#[test]
fn knee_touch_for_five_frames_fires_next_once() {
    let recognizer = recognizer(RecognizerConfig::default());
    let script = Script::new()
        .touch(ContactRegion::RightKnee, 5)
        .absent(10);
    assert_eq!(commands(&recognizer, &script), vec![Command::Next]);
}

#[test]
fn temple_double_touch_fires_help_and_feedback_persists() {
    let recognizer = recognizer(frame_windows(30, 40));
    let script = Script::new()
        .rest(2)
        .touch(ContactRegion::RightTemple, 3)
        .rest(7)
        .touch(ContactRegion::RightTemple, 3)
        .rest(40)
        .absent(20);

    let state = recognizer.run(script.frames());
    let fired: Vec<Command> = state.emitter().history().iter().map(|e| e.command).collect();
    assert_eq!(fired, vec![Command::Help]);
    assert_eq!(state.emitter().feedback(), "Help");
}

#[test]
fn palm_then_elbow_within_timeout_fires_undo() {
    let recognizer = recognizer(frame_windows(30, 40));
    let script = Script::new()
        .touch(ContactRegion::LeftPalmCenter, 3)
        .rest(5)
        .touch(ContactRegion::LeftElbowCrease, 3)
        .rest(5);
    assert_eq!(commands(&recognizer, &script), vec![Command::Undo]);
}

#[test]
fn palm_then_elbow_after_timeout_fires_nothing() {
    let recognizer = recognizer(frame_windows(30, 40));
    let script = Script::new()
        .touch(ContactRegion::LeftPalmCenter, 3)
        .rest(50)
        .touch(ContactRegion::LeftElbowCrease, 3)
        .rest(5);
    assert!(commands(&recognizer, &script).is_empty());
}

#[test]
fn palm_then_wrist_fires_home() {
    let recognizer = recognizer(frame_windows(30, 40));
    let script = Script::new()
        .touch(ContactRegion::LeftPalmCenter, 3)
        .rest(4)
        .touch(ContactRegion::LeftWrist, 3);
    assert_eq!(commands(&recognizer, &script), vec![Command::Home]);
}

#[test]
fn palm_twice_fires_menu() {
    let recognizer = recognizer(frame_windows(30, 40));
    let script = Script::new()
        .touch(ContactRegion::LeftPalmCenter, 3)
        .rest(4)
        .touch(ContactRegion::LeftPalmCenter, 3);
    assert_eq!(commands(&recognizer, &script), vec![Command::Menu]);
}

#[test]
fn every_single_touch_command_fires() {
    let recognizer = recognizer(RecognizerConfig::default());
    let cases = [
        (ContactRegion::RightKnee, Command::Next),
        (ContactRegion::LeftKnee, Command::Previous),
        (ContactRegion::LeftIndexTip, Command::Increase),
        (ContactRegion::LeftPinkyTip, Command::Decrease),
        (ContactRegion::Chest, Command::Ok),
        (ContactRegion::Belly, Command::Cancel),
    ];
    for (region, expected) in cases {
        let script = Script::new().rest(2).touch(region, 4).rest(2);
        assert_eq!(
            commands(&recognizer, &script),
            vec![expected],
            "touching {region}"
        );
    }
}

#[test]
fn double_touch_separated_beyond_window_fires_nothing() {
    let recognizer = recognizer(frame_windows(30, 40));
    let script = Script::new()
        .touch(ContactRegion::RightTemple, 3)
        .rest(35)
        .touch(ContactRegion::RightTemple, 3)
        .rest(5);
    assert!(commands(&recognizer, &script).is_empty());
}

#[test]
fn different_region_between_double_touch_cancels() {
    let recognizer = recognizer(frame_windows(30, 40));
    let script = Script::new()
        .touch(ContactRegion::RightTemple, 3)
        .rest(2)
        .touch(ContactRegion::Chest, 3)
        .rest(2)
        .touch(ContactRegion::RightTemple, 3)
        .rest(2);

    let state = recognizer.run(script.frames());
    // The chest touch is consumed by the cancellation; the last temple
    // touch only arms a new sequence.
    assert_eq!(state.emitter().emitted_count(), 0);
    assert_eq!(
        state.pending().map(|p| p.first()),
        Some(ContactRegion::RightTemple)
    );
}

#[test]
fn unrelated_region_after_palm_returns_to_idle() {
    let recognizer = recognizer(frame_windows(30, 40));
    let script = Script::new()
        .touch(ContactRegion::LeftPalmCenter, 3)
        .rest(2)
        .touch(ContactRegion::RightKnee, 3);

    let mut state = recognizer.start_session();
    let mut last = None;
    for frame in script.frames() {
        last = Some(recognizer.process(&mut state, frame));
    }
    let last = last.expect("script has frames");
    assert_eq!(last.phase, SequencerPhase::Idle);
    assert_eq!(state.emitter().emitted_count(), 0);
}

#[test]
fn jitter_shorter_than_debounce_is_ignored() {
    let recognizer = recognizer(RecognizerConfig {
        debounce_frames: 3,
        ..RecognizerConfig::default()
    });
    let script = Script::new()
        .touch(ContactRegion::RightKnee, 2)
        .rest(1)
        .touch(ContactRegion::RightKnee, 2)
        .rest(5);
    assert!(commands(&recognizer, &script).is_empty());
}

#[test]
fn brief_dropout_while_holding_does_not_refire() {
    let recognizer = recognizer(RecognizerConfig::default());
    let script = Script::new()
        .touch(ContactRegion::RightKnee, 6)
        .absent(1)
        .touch(ContactRegion::RightKnee, 6)
        .rest(3);
    assert_eq!(commands(&recognizer, &script), vec![Command::Next]);
}

#[test]
fn millisecond_windows_follow_frame_timestamps() {
    let recognizer = recognizer(RecognizerConfig {
        double_touch_window: TimeWindow::Millis(500),
        ..RecognizerConfig::default()
    });
    let script = Script::new()
        .touch(ContactRegion::RightTemple, 3)
        .rest(3)
        .touch(ContactRegion::RightTemple, 3);

    // 20 ms per frame: the second touch lands well inside 500 ms.
    let fast: Vec<_> = script
        .frames()
        .iter()
        .enumerate()
        .map(|(i, f)| f.clone().with_timestamp(i as u64 * 20))
        .collect();
    let state = recognizer.run(&fast);
    assert_eq!(state.emitter().current_command(), Some(Command::Help));

    // 200 ms per frame: the same frames are over a second apart.
    let slow: Vec<_> = script
        .frames()
        .iter()
        .enumerate()
        .map(|(i, f)| f.clone().with_timestamp(i as u64 * 200))
        .collect();
    let state = recognizer.run(&slow);
    assert_eq!(state.emitter().feedback(), READY_FEEDBACK);
}

#[test]
fn sessions_are_independent() {
    let recognizer = recognizer(frame_windows(30, 40));
    let armed = Script::new().touch(ContactRegion::LeftPalmCenter, 3);
    let first = recognizer.run(armed.frames());
    assert!(first.pending().is_some());

    let second = recognizer.run(Script::new().touch(ContactRegion::LeftWrist, 3).frames());
    assert!(second.pending().is_none());
    assert_eq!(second.emitter().emitted_count(), 0);
}

/// Feed `palm`, then `garbage` unparseable lines, then `palm` again, the way
/// a live stream delivers them.
fn palm_lines_around_garbage(garbage: usize) -> Vec<String> {
    let palm = serde_json::to_string(&support::touching(ContactRegion::LeftPalmCenter))
        .expect("frame serializes");
    let mut lines = vec![palm.clone(); 3];
    lines.extend(std::iter::repeat("not json".to_string()).take(garbage));
    lines.extend(std::iter::repeat(palm).take(3));
    lines
}

fn commands_from_lines(lines: &[String]) -> (Vec<Command>, u64) {
    let recognizer = recognizer(frame_windows(30, 40));
    let mut state = recognizer.start_session();
    for (idx, line) in lines.iter().enumerate() {
        if let Some(frame) = parse_frame_line_lossy(line, idx + 1) {
            recognizer.process(&mut state, &frame);
        }
    }
    let fired = state.emitter().history().iter().map(|e| e.command).collect();
    (fired, state.frames_processed())
}

#[test]
fn malformed_lines_count_as_frames_and_expire_double_touch() {
    let (fired, frames) = commands_from_lines(&palm_lines_around_garbage(50));
    assert_eq!(frames, 56);
    assert!(fired.is_empty());

    let (fired, _) = commands_from_lines(&palm_lines_around_garbage(5));
    assert_eq!(fired, vec![Command::Menu]);
}
