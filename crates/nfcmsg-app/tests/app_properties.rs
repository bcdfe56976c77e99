//! Property-based tests for App state machine.
//!
//! Tests verify that invariants hold under arbitrary event and API call
//! sequences. This ensures behavioral correctness across all possible
//! execution paths.

use nfcmsg_app::{App, AppAction, AppConfig, AppEvent, NO_MESSAGE_FOUND};
use nfcmsg_harness::{InvariantRegistry, Snapshot};
use nfcmsg_proto::LinkCodec;
use proptest::prelude::*;

/// One step: either a user call or an event.
#[derive(Debug, Clone)]
enum Step {
    SetDraft(String),
    Write,
    Read,
    Dismiss,
    Switch,
    Event(AppEvent),
}

fn message() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ -~]{0,24}",
        "\\PC{0,12}",
        Just("a&b=c?d#e".to_owned()),
    ]
}

/// Generate random app events.
fn event_strategy() -> impl Strategy<Value = AppEvent> {
    let reason = "[a-z ]{1,16}";
    prop_oneof![
        1 => Just(AppEvent::Tick),
        1 => (1u16..200, 1u16..100).prop_map(|(c, r)| AppEvent::Resize(c, r)),
        1 => proptest::option::of(message()).prop_map(|message| AppEvent::LaunchedFromLink { message }),
        2 => proptest::option::of(message()).prop_map(|message| AppEvent::LinkOpened { message }),
        2 => Just(AppEvent::TagWritten),
        1 => reason.prop_map(|reason| AppEvent::TagWriteFailed { reason }),
        2 => proptest::option::of(message()).prop_map(|text| AppEvent::TagRead { text }),
        1 => reason.prop_map(|reason| AppEvent::TagReadFailed { reason }),
    ]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => message().prop_map(Step::SetDraft),
        2 => Just(Step::Write),
        2 => Just(Step::Read),
        1 => Just(Step::Dismiss),
        1 => Just(Step::Switch),
        4 => event_strategy().prop_map(Step::Event),
    ]
}

fn codec_strategy() -> impl Strategy<Value = LinkCodec> {
    prop_oneof![
        Just(LinkCodec::custom()),
        "[a-z]{1,10}\\.(app|com|org)".prop_map(LinkCodec::web),
    ]
}

fn apply(app: &mut App, step: Step) -> Vec<AppAction> {
    match step {
        Step::SetDraft(draft) => app.set_draft(draft),
        Step::Write => app.write_tag(),
        Step::Read => app.read_tag(),
        Step::Dismiss => app.dismiss_notice(),
        Step::Switch => app.switch_screen(),
        Step::Event(event) => app.handle(event),
    }
}

proptest! {
    /// App invariants hold under arbitrary step sequences.
    ///
    /// Verifies that the deep link always decodes to the draft and that
    /// exclusive mode never overlaps operations.
    #[test]
    fn prop_app_invariants_hold(
        codec in codec_strategy(),
        exclusive_sessions in any::<bool>(),
        steps in prop::collection::vec(step_strategy(), 0..60),
    ) {
        let mut app = App::new(AppConfig { codec, exclusive_sessions });
        let invariants = InvariantRegistry::standard();

        for step in steps {
            let _ = apply(&mut app, step.clone());

            let snapshot = Snapshot::capture(&app, None);
            prop_assert!(
                invariants.check_all(&snapshot).is_ok(),
                "Invariant violated after {:?}", step
            );
        }
    }

    /// Write requests always carry the current deep link.
    #[test]
    fn prop_write_carries_preview(draft in message()) {
        let mut app = App::default();
        let _ = app.set_draft(draft.clone());
        let actions = app.write_tag();

        let uri = actions.iter().find_map(|action| match action {
            AppAction::WriteTag { uri } => Some(uri.clone()),
            _ => None,
        });
        prop_assert_eq!(uri.as_deref(), Some(app.deep_link()));
        prop_assert_eq!(app.codec().decode(app.deep_link()), Some(draft));
    }

    /// Completion events always clear the matching busy flag.
    #[test]
    fn prop_completion_clears_busy(
        failed in any::<bool>(),
        text in proptest::option::of(message()),
    ) {
        let mut app = App::default();
        let _ = app.write_tag();
        let _ = app.read_tag();

        let write_done = if failed {
            AppEvent::TagWriteFailed { reason: "x".into() }
        } else {
            AppEvent::TagWritten
        };
        let _ = app.handle(write_done);
        prop_assert!(!app.is_writing());
        prop_assert!(app.is_reading());

        let _ = app.handle(AppEvent::TagRead { text });
        prop_assert!(!app.is_busy());
    }

    /// The readout only changes through reads and links, and an empty read
    /// never erases it.
    #[test]
    fn prop_readout_sources(steps in prop::collection::vec(step_strategy(), 0..60)) {
        let mut app = App::default();
        let mut expected: Option<String> = None;

        for step in steps {
            match &step {
                Step::Event(AppEvent::LaunchedFromLink { message: Some(m) })
                | Step::Event(AppEvent::LinkOpened { message: Some(m) })
                | Step::Event(AppEvent::TagRead { text: Some(m) }) => expected = Some(m.clone()),
                Step::Event(AppEvent::LinkOpened { message: None }) => {
                    expected = Some(NO_MESSAGE_FOUND.to_owned());
                },
                _ => {},
            }
            let _ = apply(&mut app, step);
            prop_assert_eq!(app.last_read(), expected.as_deref());
        }
    }
}
