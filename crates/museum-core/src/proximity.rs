//! Radial proximity triggers with enter/exit hysteresis.
//!
//! Each trigger remembers whether the character was inside its circle last
//! frame, so focus changes fire on edges instead of every frame. Triggers are
//! evaluated in a fixed order: the profile trigger first, then exhibits in
//! catalog order. When circles overlap, the last trigger to fire `Enter` in a
//! frame owns the focus.

use crate::catalog::ExhibitCatalog;
use crate::config::ProximityCfg;
use crate::store::{Focus, Store};
use fnv::FnvHashMap;
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriggerKey {
    Profile,
    Exhibit(String),
}

impl TriggerKey {
    fn is_focused(&self, focus: &Focus) -> bool {
        match (self, focus) {
            (TriggerKey::Profile, Focus::Profile) => true,
            (TriggerKey::Exhibit(a), Focus::Exhibit(b)) => a == b,
            _ => false,
        }
    }
}

/// Hysteresis memory for one trigger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActivationRecord {
    pub was_in_circle: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Enter(TriggerKey),
    Sustain(TriggerKey),
    Exit(TriggerKey),
}

pub type Transitions = SmallVec<[Transition; 4]>;

#[derive(Clone, Debug)]
struct Trigger {
    key: TriggerKey,
    position: Vec2,
    record: ActivationRecord,
}

#[derive(Clone, Debug)]
pub struct ProximityDetector {
    radius: f32,
    triggers: Vec<Trigger>,
    by_exhibit: FnvHashMap<String, usize>,
}

impl ProximityDetector {
    pub fn new(catalog: &ExhibitCatalog, cfg: &ProximityCfg) -> Self {
        let mut triggers = Vec::with_capacity(catalog.len() + 1);
        triggers.push(Trigger {
            key: TriggerKey::Profile,
            position: cfg.profile_trigger,
            record: ActivationRecord::default(),
        });
        let mut by_exhibit = FnvHashMap::default();
        for e in catalog.iter() {
            by_exhibit.insert(e.id.clone(), triggers.len());
            triggers.push(Trigger {
                key: TriggerKey::Exhibit(e.id.clone()),
                position: e.trigger_position,
                record: ActivationRecord::default(),
            });
        }
        Self {
            radius: cfg.activation_radius,
            triggers,
            by_exhibit,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn profile_record(&self) -> ActivationRecord {
        self.triggers[0].record
    }

    pub fn exhibit_record(&self, id: &str) -> Option<ActivationRecord> {
        self.by_exhibit.get(id).map(|&i| self.triggers[i].record)
    }

    /// Trigger points in evaluation order.
    pub fn trigger_points(&self) -> impl Iterator<Item = (&TriggerKey, Vec2)> {
        self.triggers.iter().map(|t| (&t.key, t.position))
    }

    /// Run every trigger once against the store's logical position.
    pub fn step(&mut self, store: &mut Store) -> Transitions {
        let pos = store.character().position;
        let mut fired = Transitions::new();

        for t in &mut self.triggers {
            let in_circle = pos.distance(t.position) < self.radius;
            let was_in = t.record.was_in_circle;

            if in_circle && !was_in {
                match &t.key {
                    TriggerKey::Profile => store.focus_profile(),
                    TriggerKey::Exhibit(id) => store.focus_exhibit(id),
                }
                log::info!("[proximity] enter {:?}", t.key);
                fired.push(Transition::Enter(t.key.clone()));
            }

            let active = t.key.is_focused(store.flags().focus());

            if in_circle && active && !store.flags().is_amplified() {
                store.reamplify();
                fired.push(Transition::Sustain(t.key.clone()));
            }

            if !in_circle && was_in && active {
                store.clear_focus();
                log::info!("[proximity] exit {:?}", t.key);
                fired.push(Transition::Exit(t.key.clone()));
            }

            t.record.was_in_circle = in_circle;
        }
        fired
    }

    /// Forget all hysteresis state.
    pub fn reset(&mut self) {
        for t in &mut self.triggers {
            t.record = ActivationRecord::default();
        }
    }
}
