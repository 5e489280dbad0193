//! The `Reducer` trait: the single extension point for a state slice.

use std::fmt::Debug;

/// A state slice driven by a closed set of events.
///
/// Each associated type defines the shape of the slice:
/// - `State`: the data views read (session flags, draft contents)
/// - `Event`: everything that may change it; nothing else may
/// - `Effect`: side-channel output of a transition (e.g. a notice to
///   display), handed back to whoever dispatched the event
///
/// `reduce` must be pure and synchronous: same state and event in, same
/// state and effects out. Network calls happen before dispatch, never
/// inside it.
pub trait Reducer: Send + Sync + 'static {
    /// The slice's data. `PartialEq` lets the store skip publishing
    /// no-op transitions to subscribers.
    type State: Clone + PartialEq + Debug + Send + Sync + 'static;

    /// The closed set of events this slice consumes.
    type Event: Debug + Send + 'static;

    /// Output produced by a transition, if any.
    type Effect: Debug + Send + 'static;

    /// Applies `event` to `state` in place.
    fn reduce(state: &mut Self::State, event: Self::Event) -> Vec<Self::Effect>;
}
