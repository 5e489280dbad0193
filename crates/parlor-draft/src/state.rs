//! The draft slice: state, events, reducer, and selectors.

use parlor_protocol::{DraftSnapshot, MessageDraft};
use parlor_store::{Reducer, Store};

/// The draft store handle.
pub type DraftStore = Store<DraftReducer>;

/// The draft slice.
///
/// Until the first load resolves, `ready` is false and the draft content
/// is meaningless: the empty string there is a placeholder, not a saved
/// empty draft.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftState {
    pub(crate) ready: bool,
    pub(crate) message: MessageDraft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEvent {
    /// A load is in flight. Marker only.
    LoadRequest,
    /// The persisted draft arrived; replaces the message draft wholesale.
    LoadSuccess(DraftSnapshot),
    /// Loading failed. The slice becomes ready with an empty draft so the
    /// compose view can leave its loading state.
    LoadFailure(String),
    /// New content is waiting to be persisted. Marker only.
    MessageAutoSaveRequest(String),
    /// `content` was persisted.
    MessageAutoSaveSuccess(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEffect {
    LoadFailed { reason: String },
}

#[derive(Debug)]
pub struct DraftReducer;

impl Reducer for DraftReducer {
    type State = DraftState;
    type Event = DraftEvent;
    type Effect = DraftEffect;

    fn reduce(state: &mut DraftState, event: DraftEvent) -> Vec<DraftEffect> {
        match event {
            DraftEvent::LoadRequest | DraftEvent::MessageAutoSaveRequest(_) => {}
            DraftEvent::LoadSuccess(snapshot) => {
                state.ready = true;
                state.message = snapshot.message;
            }
            DraftEvent::LoadFailure(reason) => {
                state.ready = true;
                state.message = MessageDraft::default();
                return vec![DraftEffect::LoadFailed { reason }];
            }
            DraftEvent::MessageAutoSaveSuccess(content) => {
                state.message.autosave = content;
            }
        }
        Vec::new()
    }
}

pub fn is_ready(state: &DraftState) -> bool {
    state.ready
}

/// The auto-saved message, or `None` while the draft is still loading.
pub fn select_auto_saved_message(state: &DraftState) -> Option<&str> {
    state.ready.then_some(state.message.autosave.as_str())
}
