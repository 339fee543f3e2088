//! Pure hover state machine

use crate::catalog::RecordId;
use crate::render::MaterialHandle;

/// Pointer event raised by a passport panel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HoverEvent {
    /// The pointer entered the panel of this record
    Enter(RecordId),
    /// The pointer left the panel of this record
    Leave(RecordId),
}

impl HoverEvent {
    /// Record the event refers to
    pub fn record(&self) -> &RecordId {
        match self {
            Self::Enter(id) | Self::Leave(id) => id,
        }
    }
}

/// Which material, if any, is currently emphasized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HighlightState {
    /// Nothing is emphasized
    #[default]
    Idle,
    /// This material is emphasized
    Emphasizing(MaterialHandle),
}

impl HighlightState {
    /// The emphasized material
    pub fn active(&self) -> Option<MaterialHandle> {
        match self {
            Self::Idle => None,
            Self::Emphasizing(handle) => Some(*handle),
        }
    }
}

/// Change to apply to the material store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightEffect {
    /// Set the material's emission strength to the "on" intensity
    Emphasize(MaterialHandle),
    /// Set the material's emission strength to zero
    Clear(MaterialHandle),
}

/// Compute the next state and the effects that realize it
///
/// `resolved` is the material bound to the event's record, if any. Effects are
/// ordered: a previous emphasis is always cleared before a new one is applied.
pub fn transition(
    state: HighlightState,
    event: &HoverEvent,
    resolved: Option<MaterialHandle>,
) -> (HighlightState, Vec<HighlightEffect>) {
    match (event, resolved) {
        // Unbound or unknown record
        (_, None) => (state, Vec::new()),

        (HoverEvent::Enter(_), Some(handle)) => match state {
            HighlightState::Emphasizing(active) if active == handle => (state, Vec::new()),
            HighlightState::Emphasizing(active) => (
                HighlightState::Emphasizing(handle),
                vec![HighlightEffect::Clear(active), HighlightEffect::Emphasize(handle)],
            ),
            HighlightState::Idle => (
                HighlightState::Emphasizing(handle),
                vec![HighlightEffect::Emphasize(handle)],
            ),
        },

        (HoverEvent::Leave(_), Some(handle)) => match state {
            HighlightState::Emphasizing(active) if active == handle => {
                (HighlightState::Idle, vec![HighlightEffect::Clear(active)])
            }
            // Stale leave for a record that is no longer the active one
            _ => (state, Vec::new()),
        },
    }
}
