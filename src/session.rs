use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::{
    bar_kind::BarKind,
    loadout::{self, CalculationResult},
    message_bus::MessageBus,
    sync_channel::{Controller, Receiver, Subscription},
    sync_state::SyncState,
    weight::Weight,
};

enum Role {
    Controller(Controller),
    Receiver(Subscription),
}

/// One surface's view of the loader: its own copy of the state, plus the
/// channel that keeps it in step with the other surface.
///
/// A controller session publishes every edit. A receiver session overwrites
/// its state with whatever arrives last; edits made on it stay local.
pub struct PlateSession {
    state: Arc<Mutex<SyncState>>,
    role: Role,
}

impl PlateSession {
    #[must_use]
    pub fn controller(initial: SyncState, bus: Arc<dyn MessageBus>) -> Self {
        PlateSession {
            state: Arc::new(Mutex::new(initial)),
            role: Role::Controller(Controller::new(bus)),
        }
    }

    #[must_use]
    pub fn receiver(initial: SyncState, bus: Arc<dyn MessageBus>) -> Self {
        Self::receiver_with(initial, bus, |_, _| {})
    }

    /// Like [`PlateSession::receiver`], calling `on_change` with the new state
    /// and its freshly computed loadout after each update lands.
    #[must_use]
    pub fn receiver_with<F>(initial: SyncState, bus: Arc<dyn MessageBus>, mut on_change: F) -> Self
    where
        F: FnMut(SyncState, CalculationResult) + Send + 'static,
    {
        let state = Arc::new(Mutex::new(initial));
        let shared = Arc::clone(&state);

        let subscription = Receiver::new(bus).subscribe(move |update| {
            *shared.lock().unwrap_or_else(PoisonError::into_inner) = update;
            debug!(weight = %update.weight, bar = %update.bar_kind, "received state");
            on_change(update, loadout::compute(update.weight, update.bar_kind));
        });

        PlateSession {
            state,
            role: Role::Receiver(subscription),
        }
    }

    pub fn is_controller(&self) -> bool {
        matches!(self.role, Role::Controller(_))
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        match &self.role {
            Role::Controller(controller) => controller.is_connected(),
            Role::Receiver(subscription) => subscription.is_active(),
        }
    }

    #[must_use]
    pub fn state(&self) -> SyncState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn weight(&self) -> Weight {
        self.state().weight
    }

    pub fn bar_kind(&self) -> BarKind {
        self.state().bar_kind
    }

    pub fn set_weight(&self, weight: Weight) {
        self.edit(|state| state.weight = weight);
    }

    pub fn set_bar_kind(&self, bar_kind: BarKind) {
        self.edit(|state| state.bar_kind = bar_kind);
    }

    pub fn update(&self, update: SyncState) {
        self.edit(|state| *state = update);
    }

    /// Publishes under the state lock so concurrent edits reach the channel in
    /// the order they were applied.
    fn edit<F: FnOnce(&mut SyncState)>(&self, change: F) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        change(&mut state);
        if let Role::Controller(controller) = &self.role {
            controller.publish(*state);
        }
    }

    #[must_use]
    pub fn loadout(&self) -> CalculationResult {
        let state = self.state();
        loadout::compute(state.weight, state.bar_kind)
    }
}
