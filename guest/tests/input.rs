//! Input forwarding tests.

mod common;

use glam_bridge_guest::{just_pressed, just_released, InputBinding};
use glam_bridge_schema::{InputRef, KeyCode, TRIGGER_KEY};

use common::*;

#[test]
fn test_just_pressed_forwards_trigger_code() {
    let host = FakeHost::pressing(&[TRIGGER_KEY]);
    let inp = InputRef(3);

    assert!(just_pressed(&host, inp));
    assert_eq!(host.calls(), vec![Call::JustPressed(InputRef(3), KeyCode(34))]);
}

#[test]
fn test_just_pressed_returns_host_false() {
    let host = FakeHost::pressing(&[KeyCode::A]);

    assert!(!just_pressed(&host, InputRef(1)));
    assert_eq!(host.calls(), vec![Call::JustPressed(InputRef(1), KeyCode(34))]);
}

#[test]
fn test_just_released_both_answers() {
    let yes = FakeHost::releasing(&[TRIGGER_KEY]);
    let no = FakeHost::new();

    assert!(just_released(&yes, InputRef(0)));
    assert!(!just_released(&no, InputRef(0)));
    assert_eq!(yes.calls(), vec![Call::JustReleased(InputRef(0), KeyCode(34))]);
    assert_eq!(no.calls(), vec![Call::JustReleased(InputRef(0), KeyCode(34))]);
}

#[test]
fn test_custom_binding() {
    let host = FakeHost {
        held: [KeyCode::W.code()].into_iter().collect(),
        ..FakeHost::new()
    };
    let forward = InputBinding::new(KeyCode::W);

    assert!(forward.pressed(&host, InputRef(2)));
    assert!(!forward.just_pressed(&host, InputRef(2)));
    assert_eq!(
        host.calls(),
        vec![
            Call::Pressed(InputRef(2), KeyCode::W),
            Call::JustPressed(InputRef(2), KeyCode::W),
        ]
    );
}

#[test]
fn test_default_binding_is_trigger() {
    assert_eq!(InputBinding::default().code, TRIGGER_KEY);
}
