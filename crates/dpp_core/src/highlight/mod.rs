//! Hover highlighting
//!
//! At most one bound material is emphasized at a time. The decision logic is
//! the pure [`transition`] function; [`Highlighter`] owns the current state
//! and writes the resulting effects into the material store.

mod state;

pub use state::{transition, HighlightEffect, HighlightState, HoverEvent};

use crate::catalog::Catalog;
use crate::render::{MaterialHandle, MaterialStore};

/// Owns the single highlight state of a viewer session
#[derive(Debug, Clone)]
pub struct Highlighter {
    state: HighlightState,
    intensity: f32,
}

impl Highlighter {
    /// Create an idle highlighter emphasizing with `intensity`
    pub fn new(intensity: f32) -> Self {
        Self {
            state: HighlightState::Idle,
            intensity,
        }
    }

    /// Current state
    pub fn state(&self) -> HighlightState {
        self.state
    }

    /// Currently emphasized material
    pub fn active(&self) -> Option<MaterialHandle> {
        self.state.active()
    }

    /// Emission strength used for the "on" state
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// React to a hover event
    ///
    /// Returns `true` if the emphasized material changed.
    pub fn handle(
        &mut self,
        event: &HoverEvent,
        catalog: &Catalog,
        materials: &mut MaterialStore,
    ) -> bool {
        let resolved = catalog
            .find(event.record())
            .and_then(|record| record.bound_visual());

        let (next, effects) = transition(self.state, event, resolved);
        self.apply(&effects, materials);
        self.state = next;
        !effects.is_empty()
    }

    /// De-emphasize whatever is active and return to idle
    pub fn clear(&mut self, materials: &mut MaterialStore) {
        if let HighlightState::Emphasizing(handle) = self.state {
            self.apply(&[HighlightEffect::Clear(handle)], materials);
        }
        self.state = HighlightState::Idle;
    }

    fn apply(&self, effects: &[HighlightEffect], materials: &mut MaterialStore) {
        for effect in effects {
            let (handle, strength) = match *effect {
                HighlightEffect::Emphasize(handle) => (handle, self.intensity),
                HighlightEffect::Clear(handle) => (handle, 0.0),
            };
            if materials.set_emission_strength(handle, strength) {
                log::trace!("Emission strength of {:?} set to {}", handle, strength);
            } else {
                log::warn!("Highlight target {:?} no longer exists", handle);
            }
        }
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(crate::config::HighlightConfig::default().intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Record, RecordId};
    use crate::foundation::math::Vec3;
    use crate::render::RenderMaterial;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const HIGHLIGHT: Vec3 = Vec3::new(0.0, 0.75, 1.0);
    const NAMES: [&str; 3] = ["Brick", "Timber", "Steel"];

    struct Fixture {
        catalog: Catalog,
        store: MaterialStore,
        handles: Vec<MaterialHandle>,
    }

    impl Fixture {
        /// Records for every name, bound to textured materials
        fn bound() -> Self {
            let records = NAMES
                .iter()
                .map(|name| Record::for_material_name(name, *name, "", 50.0, 50.0, ""))
                .collect();
            let mut catalog = Catalog::new("Test", "test.glb", records).unwrap();
            let mut store = MaterialStore::new();
            let handles = NAMES
                .iter()
                .map(|name| {
                    let handle = store.insert(RenderMaterial::new(*name).with_color_map("t.png"));
                    catalog.bind_by_material_name(name, handle, &mut store, HIGHLIGHT);
                    handle
                })
                .collect();
            Self {
                catalog,
                store,
                handles,
            }
        }

        fn strength(&self, index: usize) -> f32 {
            self.store.get(self.handles[index]).unwrap().emission_strength
        }
    }

    fn id(name: &str) -> RecordId {
        RecordId::from_material_name(name)
    }

    #[test]
    fn test_enter_sets_configured_intensity() {
        let mut fx = Fixture::bound();
        let mut highlighter = Highlighter::new(0.5);

        assert!(highlighter.handle(&HoverEvent::Enter(id("Brick")), &fx.catalog, &mut fx.store));
        assert_eq!(fx.strength(0), 0.5);
        assert_eq!(highlighter.active(), Some(fx.handles[0]));
    }

    #[test]
    fn test_enter_enter_leave_keeps_second() {
        let mut fx = Fixture::bound();
        let mut highlighter = Highlighter::new(0.5);

        highlighter.handle(&HoverEvent::Enter(id("Brick")), &fx.catalog, &mut fx.store);
        highlighter.handle(&HoverEvent::Enter(id("Timber")), &fx.catalog, &mut fx.store);
        let changed = highlighter.handle(&HoverEvent::Leave(id("Brick")), &fx.catalog, &mut fx.store);

        assert!(!changed);
        assert_eq!(fx.strength(0), 0.0);
        assert_eq!(fx.strength(1), 0.5);
        assert_eq!(highlighter.state(), HighlightState::Emphasizing(fx.handles[1]));
    }

    #[test]
    fn test_second_leave_is_noop() {
        let mut fx = Fixture::bound();
        let mut highlighter = Highlighter::new(0.5);

        highlighter.handle(&HoverEvent::Enter(id("Steel")), &fx.catalog, &mut fx.store);
        assert!(highlighter.handle(&HoverEvent::Leave(id("Steel")), &fx.catalog, &mut fx.store));
        assert!(!highlighter.handle(&HoverEvent::Leave(id("Steel")), &fx.catalog, &mut fx.store));

        assert_eq!(highlighter.state(), HighlightState::Idle);
        assert!(fx.store.emphasized().is_empty());
    }

    #[test]
    fn test_unknown_and_unbound_records_are_ignored() {
        let mut fx = Fixture::bound();
        fx.catalog.reset_bindings();
        let mut highlighter = Highlighter::new(0.5);

        assert!(!highlighter.handle(&HoverEvent::Enter(id("Brick")), &fx.catalog, &mut fx.store));
        assert!(!highlighter.handle(&HoverEvent::Enter(RecordId::new("nope")), &fx.catalog, &mut fx.store));
        assert_eq!(highlighter.state(), HighlightState::Idle);
    }

    #[test]
    fn test_clear_resets_active_material() {
        let mut fx = Fixture::bound();
        let mut highlighter = Highlighter::new(0.5);
        highlighter.handle(&HoverEvent::Enter(id("Timber")), &fx.catalog, &mut fx.store);

        highlighter.clear(&mut fx.store);

        assert_eq!(fx.strength(1), 0.0);
        assert_eq!(highlighter.state(), HighlightState::Idle);
    }

    #[test]
    fn test_random_event_sequences_emphasize_at_most_one() {
        let mut fx = Fixture::bound();
        let mut highlighter = Highlighter::new(0.5);
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let ids: Vec<RecordId> = NAMES
            .iter()
            .map(|name| id(name))
            .chain(std::iter::once(RecordId::new("unknown")))
            .collect();

        for _ in 0..2_000 {
            let target = ids[rng.gen_range(0..ids.len())].clone();
            let event = if rng.gen_bool(0.5) {
                HoverEvent::Enter(target)
            } else {
                HoverEvent::Leave(target)
            };
            highlighter.handle(&event, &fx.catalog, &mut fx.store);

            let emphasized = fx.store.emphasized();
            assert!(emphasized.len() <= 1);
            assert_eq!(emphasized.first().copied(), highlighter.active());
        }
    }
}
