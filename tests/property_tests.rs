//! Property-based tests for machines and container records.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated tables, event sequences and outcomes.

use hookstate::core::{OperationFailure, OperationState, Sequencer, Tracked};
use hookstate::fsm::{Machine, MachineConfig, StateNode, Step, TransitionError, TransitionMode};
use proptest::prelude::*;

const STATES: [&str; 4] = ["idle", "running", "paused", "stopped"];
const EVENTS: [&str; 5] = ["START", "STOP", "PAUSE", "RESUME", "RESET"];
// Names that may appear as targets or initial states without being declared.
const STRAYS: [&str; 2] = ["limbo", "ghost"];

prop_compose! {
    fn arbitrary_state()(index in 0..STATES.len()) -> &'static str {
        STATES[index]
    }
}

prop_compose! {
    fn arbitrary_event()(index in 0..EVENTS.len()) -> &'static str {
        EVENTS[index]
    }
}

prop_compose! {
    // Tables over the fixed state set; every target is a declared state.
    fn arbitrary_table()(
        entries in prop::collection::vec(
            (arbitrary_state(), arbitrary_event(), arbitrary_state()),
            0..12,
        ),
        initial in arbitrary_state(),
    ) -> MachineConfig {
        let mut config = MachineConfig::new(initial);
        for state in STATES {
            config = config.state(state, StateNode::new());
        }
        for (from, event, to) in entries {
            if let Some(node) = config.states.get_mut(from) {
                node.on.insert(event.to_string(), to.to_string());
            }
        }
        config
    }
}

prop_compose! {
    fn arbitrary_name()(index in 0..STATES.len() + STRAYS.len()) -> &'static str {
        STATES.iter().chain(STRAYS.iter()).copied().nth(index).unwrap_or("idle")
    }
}

prop_compose! {
    // Tables that may omit entries for some states, target undeclared
    // states and start from an undeclared initial state.
    fn arbitrary_loose_table()(
        declared in prop::collection::vec(any::<bool>(), STATES.len()),
        entries in prop::collection::vec(
            (arbitrary_state(), arbitrary_event(), arbitrary_name()),
            0..12,
        ),
        initial in arbitrary_name(),
        mode in prop_oneof![Just(TransitionMode::Permissive), Just(TransitionMode::Strict)],
    ) -> MachineConfig {
        let mut config = MachineConfig::new(initial).mode(mode);
        for (state, keep) in STATES.iter().zip(declared) {
            if keep {
                config = config.state(*state, StateNode::new());
            }
        }
        for (from, event, to) in entries {
            if let Some(node) = config.states.get_mut(from) {
                node.on.insert(event.to_string(), to.to_string());
            }
        }
        config
    }
}

prop_compose! {
    fn arbitrary_outcome()(ok in any::<bool>(), value in any::<u16>()) -> Result<u16, OperationFailure<u16>> {
        if ok { Ok(value) } else { Err(OperationFailure::Rejected(value)) }
    }
}

proptest! {
    #[test]
    fn transition_follows_table_or_stays(
        config in arbitrary_table(),
        events in prop::collection::vec(arbitrary_event(), 0..20),
    ) {
        let mut machine = Machine::new(config.clone());

        for event in events {
            let before = machine.state().to_string();
            let expected = config.next(&before, event).unwrap_or(before.as_str()).to_string();

            let step = machine.transition(event).unwrap();

            prop_assert_eq!(machine.state(), expected.as_str());
            prop_assert_eq!(step.is_moved(), config.next(&before, event).is_some());
        }
    }

    #[test]
    fn loose_table_follows_table_or_stays(
        config in arbitrary_loose_table(),
        events in prop::collection::vec(arbitrary_event(), 0..20),
    ) {
        let mut machine = Machine::new(config.clone());

        for event in events {
            let before = machine.state().to_string();
            let mapped = config.next(&before, event).map(str::to_string);

            match (machine.transition(event), &mapped) {
                (Ok(Step::Moved { from, to }), Some(next)) => {
                    prop_assert_eq!(&from, &before);
                    prop_assert_eq!(&to, next);
                }
                (Ok(Step::Ignored), None) => {
                    prop_assert_eq!(config.mode, TransitionMode::Permissive);
                }
                (Err(TransitionError::InvalidTransition { state, .. }), None) => {
                    prop_assert_eq!(config.mode, TransitionMode::Strict);
                    prop_assert_eq!(&state, &before);
                }
                (step, _) => prop_assert!(false, "unexpected {:?} for {:?}", step, mapped),
            }

            let expected = mapped.unwrap_or(before);
            prop_assert_eq!(machine.state(), expected.as_str());
        }
    }

    #[test]
    fn transition_has_no_hidden_history(
        config in arbitrary_loose_table(),
        prefix in prop::collection::vec(arbitrary_event(), 0..20),
        event in arbitrary_event(),
    ) {
        let mut walked = Machine::new(config.clone());
        for e in prefix {
            let _ = walked.transition(e);
        }
        let reached = walked.state().to_string();

        let mut restarted = config.clone();
        restarted.initial = reached;
        let mut fresh = Machine::new(restarted);

        let walked_step = walked.transition(event);
        let fresh_step = fresh.transition(event);

        prop_assert_eq!(walked_step, fresh_step);
        prop_assert_eq!(walked.state(), fresh.state());
    }

    #[test]
    fn current_state_stays_in_key_set(
        config in arbitrary_table(),
        events in prop::collection::vec(arbitrary_event(), 0..30),
    ) {
        prop_assert!(config.check().is_ok());
        let mut machine = Machine::new(config.clone());

        for event in events {
            machine.transition(event).unwrap();
            prop_assert!(config.contains(machine.state()));
        }
    }

    #[test]
    fn strict_mode_never_moves_on_error(
        config in arbitrary_table(),
        events in prop::collection::vec(arbitrary_event(), 0..20),
    ) {
        let mut machine = Machine::new(config.mode(TransitionMode::Strict));

        for event in events {
            let before = machine.state().to_string();
            match machine.transition(event) {
                Ok(Step::Moved { from, .. }) => prop_assert_eq!(from, before),
                Ok(Step::Ignored) => prop_assert!(false, "strict machine ignored an event"),
                Err(TransitionError::InvalidTransition { state, .. }) => {
                    prop_assert_eq!(&state, &before);
                    prop_assert_eq!(machine.state(), before.as_str());
                }
            }
        }
    }

    #[test]
    fn history_path_matches_visited_states(
        config in arbitrary_loose_table().prop_map(|c| c.mode(TransitionMode::Permissive)),
        events in prop::collection::vec(arbitrary_event(), 1..20),
    ) {
        let mut machine = Machine::new(config);
        let mut visited = vec![machine.state().to_string()];

        for event in events {
            if machine.transition(event).unwrap().is_moved() {
                visited.push(machine.state().to_string());
            }
        }

        let path = machine.history().get_path();
        if machine.history().is_empty() {
            prop_assert!(path.is_empty());
        } else {
            prop_assert_eq!(path, visited.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }

    #[test]
    fn settled_record_is_never_busy(
        outcomes in prop::collection::vec(arbitrary_outcome(), 1..20),
    ) {
        let mut record: OperationState<u16, u16> = OperationState::idle();
        let mut last_ok = None;
        let mut last_err = None;

        for outcome in outcomes {
            record.begin();
            prop_assert!(record.is_busy());

            match outcome {
                Ok(value) => {
                    record.succeed(value);
                    last_ok = Some(value);
                }
                Err(failure) => {
                    last_err = Some(failure.clone());
                    record.fail(failure);
                }
            }

            prop_assert!(!record.is_busy());
            prop_assert_eq!(record.result, last_ok);
            prop_assert_eq!(&record.error, &last_err);
        }
    }

    #[test]
    fn only_the_newest_ticket_is_latest(count in 1usize..50) {
        let sequencer = Sequencer::new();
        let tickets: Vec<_> = (0..count).map(|_| sequencer.issue()).collect();

        for (index, ticket) in tickets.iter().enumerate() {
            prop_assert_eq!(sequencer.is_latest(*ticket), index == count - 1);
        }
    }

    #[test]
    fn config_roundtrip_serialization(config in arbitrary_table()) {
        let json = serde_json::to_string(&config).unwrap();
        let deserialized = MachineConfig::from_json(&json).unwrap();
        prop_assert_eq!(config, deserialized);
    }
}
