//! Macros for ergonomic transition table construction.

/// Declare a [`MachineConfig`](crate::fsm::MachineConfig) from identifiers.
///
/// State and event names are the stringified identifiers. The resulting
/// config is permissive and unvalidated; pass it to
/// [`Machine::try_new`](crate::fsm::Machine::try_new) to check it.
///
/// # Example
///
/// ```
/// use hookstate::fsm::Machine;
/// use hookstate::transition_table;
///
/// let config = transition_table! {
///     initial: idle,
///     idle => { START => running },
///     running => { STOP => stopped, PAUSE => paused },
///     paused => { RESUME => running },
///     stopped => {},
/// };
///
/// let mut machine = Machine::try_new(config).unwrap();
/// machine.transition("START").unwrap();
/// assert_eq!(machine.state(), "running");
/// ```
#[macro_export]
macro_rules! transition_table {
    (
        initial: $initial:ident
        $(, $state:ident => { $($event:ident => $next:ident),* $(,)? })*
        $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut states = ::std::collections::BTreeMap::new();
        $(
            #[allow(unused_mut)]
            let mut node = $crate::fsm::StateNode::new();
            $(
                node = node.on(stringify!($event), stringify!($next));
            )*
            states.insert(stringify!($state).to_string(), node);
        )*
        let mut config = $crate::fsm::MachineConfig::new(stringify!($initial));
        config.states = states;
        config
    }};
}
