use std::time::{Duration, Instant};

use universal_input::surface::{ControlEvent, UniversalInput, Widget};
use universal_input::{ControlConfig, Emission, Hooks, Mode, SelectOption, Value};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn mount(config: ControlConfig) -> UniversalInput {
    UniversalInput::new(config, Hooks::default())
}

fn end_editing_count(emissions: &[Emission]) -> usize {
    emissions
        .iter()
        .filter(|e| matches!(e, Emission::EndEditing(_)))
        .count()
}

#[test]
fn typing_into_a_mask_then_blurring_commits_the_conformed_value() {
    let mut control = mount(ControlConfig::masked("111-111"));
    assert_eq!(control.mode(), Mode::Masked);
    let t0 = Instant::now();

    assert!(control
        .handle(ControlEvent::Edit(Value::text("123456")), t0)
        .is_empty());
    assert_eq!(control.current_draft(), &Value::text("123-456"));

    let emissions = control.handle(ControlEvent::Blur, t0 + ms(50));
    assert_eq!(
        emissions,
        vec![
            Emission::Change(Value::text("123-456")),
            Emission::EndEditing(Value::text("123-456")),
        ]
    );

    // Blur cancelled the debounce.
    assert!(control.tick(t0 + ms(500)).is_empty());
}

#[test]
fn clearing_a_mask_commits_empty() {
    let mut control = mount(ControlConfig::masked("111-111").with_value("123-456"));
    let t0 = Instant::now();

    control.handle(ControlEvent::Edit(Value::text("___-___")), t0);
    assert_eq!(control.current_draft(), &Value::Empty);
    match control.render().widget {
        Widget::MaskedText { value, .. } => assert_eq!(value, ""),
        other => panic!("unexpected widget: {other:?}"),
    }

    let emissions = control.handle(ControlEvent::Blur, t0 + ms(10));
    assert_eq!(
        emissions,
        vec![
            Emission::Change(Value::Empty),
            Emission::EndEditing(Value::Empty),
        ]
    );
}

#[test]
fn numeric_edit_without_prepare_hook_ends_editing_once() {
    let mut control = mount(ControlConfig::number());
    let t0 = Instant::now();

    control.handle(ControlEvent::Edit(Value::text("42")), t0);
    let mut emissions = control.handle(ControlEvent::Blur, t0 + ms(20));
    emissions.extend(control.handle(ControlEvent::Blur, t0 + ms(40)));

    assert_eq!(emissions[0], Emission::Change(Value::Number(42.0)));
    assert_eq!(end_editing_count(&emissions), 1);
}

#[test]
fn numeric_zero_is_a_value() {
    let mut control = mount(ControlConfig::number().with_value(5_i64));
    let t0 = Instant::now();

    control.handle(ControlEvent::Edit(Value::text("0")), t0);
    assert_eq!(control.current_draft(), &Value::Number(0.0));
    assert_eq!(
        control.handle(ControlEvent::Blur, t0),
        vec![
            Emission::Change(Value::Number(0.0)),
            Emission::EndEditing(Value::Number(0.0)),
        ]
    );
}

#[test]
fn prepare_hook_normalizes_numeric_edits() {
    let hooks = Hooks::new().with_prepare_number(|raw| match raw.as_number() {
        Some(n) => Value::Number(n.round()),
        None => Value::Empty,
    });
    let mut control = UniversalInput::new(ControlConfig::number(), hooks);
    let t0 = Instant::now();

    control.handle(ControlEvent::Edit(Value::text("2.6")), t0);
    assert_eq!(
        control.handle(ControlEvent::Blur, t0)[0],
        Emission::Change(Value::Number(3.0))
    );
}

#[test]
fn selection_commits_immediately() {
    let mut control = mount(ControlConfig::select([
        SelectOption::new("a"),
        SelectOption::new("b"),
    ]));
    let t0 = Instant::now();

    let emissions = control.handle(ControlEvent::Select(Value::text("b")), t0);
    assert_eq!(
        emissions,
        vec![
            Emission::Change(Value::text("b")),
            Emission::EndEditing(Value::text("b")),
        ]
    );
    assert!(control.deadline().is_none());

    let after_blur = control.handle(ControlEvent::Blur, t0 + ms(5));
    assert_eq!(end_editing_count(&after_blur), 0);
}

#[test]
fn external_push_overwrites_unconfirmed_draft() {
    let mut control = mount(ControlConfig::text().eventable());
    let t0 = Instant::now();

    control.handle(ControlEvent::Edit(Value::text("draft")), t0);
    assert!(control.indicator().show);

    let emissions = control.handle(ControlEvent::External(Value::text("server")), t0 + ms(50));
    assert!(emissions.is_empty());
    assert_eq!(control.current_draft(), &Value::text("server"));
    assert!(!control.engine().is_dirty());
    assert!(!control.indicator().show);

    // The dropped debounce never fires, and blurring is not an edit.
    assert!(control.tick(t0 + ms(500)).is_empty());
    let emissions = control.handle(ControlEvent::Blur, t0 + ms(600));
    assert_eq!(emissions, vec![Emission::Change(Value::text("server"))]);
}

#[test]
fn edits_inside_the_window_coalesce() {
    let mut control = mount(ControlConfig::text());
    let t0 = Instant::now();

    for (i, text) in ["h", "he", "hel", "hell", "hello"].iter().enumerate() {
        control.handle(ControlEvent::Edit(Value::text(*text)), t0 + ms(i as u64 * 100));
    }

    // Last edit at 400ms, due at 600ms.
    assert!(control.tick(t0 + ms(599)).is_empty());
    assert_eq!(
        control.tick(t0 + ms(600)),
        vec![Emission::Change(Value::text("hello"))]
    );
    assert!(control.tick(t0 + ms(2_000)).is_empty());
}

#[test]
fn repeated_blur_is_idempotent() {
    let mut control = mount(ControlConfig::multiline());
    let t0 = Instant::now();

    control.handle(ControlEvent::Edit(Value::text("line one\nline two")), t0);
    let first = control.handle(ControlEvent::Blur, t0);
    let second = control.handle(ControlEvent::Blur, t0);

    assert_eq!(first.len(), 2);
    assert_eq!(
        second,
        vec![Emission::Change(Value::text("line one\nline two"))]
    );
}

#[test]
fn debounced_change_echoed_by_host_keeps_the_draft() {
    let mut control = mount(ControlConfig::text());
    let t0 = Instant::now();

    control.handle(ControlEvent::Edit(Value::text("ab")), t0);
    let change = control.tick(t0 + ms(200));
    assert_eq!(change, vec![Emission::Change(Value::text("ab"))]);

    control.handle(ControlEvent::Edit(Value::text("abc")), t0 + ms(210));
    // The host re-renders with the value it received earlier.
    control.handle(ControlEvent::External(Value::text("ab")), t0 + ms(220));
    assert_eq!(control.current_draft(), &Value::text("abc"));
}

#[test]
fn invalid_mask_falls_back_to_plain_text() {
    let mut control = mount(ControlConfig::masked("---"));
    assert_eq!(control.mode(), Mode::Plain);
    assert!(control.mask().is_none());

    control.handle(ControlEvent::Edit(Value::text("free text")), Instant::now());
    assert_eq!(control.current_draft(), &Value::text("free text"));
}

#[test]
fn read_only_controls_do_not_emit() {
    let mut control = mount(ControlConfig::text().read_only().with_value("fixed"));
    let t0 = Instant::now();

    assert!(control
        .handle(ControlEvent::Edit(Value::text("changed")), t0)
        .is_empty());
    assert!(control.handle(ControlEvent::Blur, t0).is_empty());
    assert!(control.tick(t0 + ms(500)).is_empty());
    assert_eq!(control.current_draft(), &Value::text("fixed"));
}

#[test]
fn disabled_controls_do_not_emit() {
    let mut control = mount(ControlConfig::text().disabled().with_value("fixed"));
    let t0 = Instant::now();

    assert!(control
        .handle(ControlEvent::Edit(Value::text("changed")), t0)
        .is_empty());
    assert!(control.handle(ControlEvent::Blur, t0).is_empty());
    assert!(control.tick(t0 + ms(500)).is_empty());
    assert_eq!(control.current_draft(), &Value::text("fixed"));
    assert!(control.render().disabled);
}

#[test]
fn clearing_a_mask_with_other_literals_commits_empty() {
    for (mask, filled) in [("(111) 111", "(123) 456"), (r"+\1 111-111", "+1 123-456")] {
        let mut control = mount(ControlConfig::masked(mask).with_value(filled));
        let t0 = Instant::now();

        control.handle(ControlEvent::Edit(Value::text("")), t0);
        assert_eq!(control.current_draft(), &Value::Empty, "mask {mask}");

        let emissions = control.handle(ControlEvent::Blur, t0 + ms(10));
        assert_eq!(
            emissions,
            vec![
                Emission::Change(Value::Empty),
                Emission::EndEditing(Value::Empty),
            ],
            "mask {mask}"
        );
    }
}
