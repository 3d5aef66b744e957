use std::collections::BTreeMap;
use std::fmt;

use ratatui::layout::Rect;

/// Stable window identifier. Allocated monotonically and never reused, so a
/// stale id held by a pending callback can only ever miss the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "win-{}", self.0)
    }
}

/// Capability flags fixed at creation; never mutated afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowOptions {
    pub no_minimize: bool,
    pub no_maximize: bool,
    pub no_resize: bool,
}

impl WindowOptions {
    /// The restrictive set used by dialog-style windows.
    pub fn dialog() -> Self {
        Self {
            no_minimize: true,
            no_maximize: true,
            no_resize: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub bounds: Rect,
    /// Pre-maximize rectangle, retained so restore is exact.
    pub bounds_normal: Option<Rect>,
    pub minimized: bool,
    pub maximized: bool,
    pub z_order: u64,
    pub options: WindowOptions,
}

/// Single source of truth for all open windows. Owns the id and z-order
/// counters and the active-window pointer; all record mutation goes through
/// the manager, which holds the registry exclusively.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    records: BTreeMap<WindowId, WindowRecord>,
    created: u64,
    z_counter: u64,
    active: Option<WindowId>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of windows ever created, closed ones included. Drives the
    /// cascade offset.
    pub fn created_count(&self) -> u64 {
        self.created
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowRecord> {
        self.records.get(&id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut WindowRecord> {
        self.records.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowRecord> {
        self.records.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut WindowRecord> {
        self.records.values_mut()
    }

    pub fn active(&self) -> Option<WindowId> {
        self.active
    }

    /// Allocate a fresh record with the next id and z value.
    pub fn allocate(&mut self, title: String, bounds: Rect, options: WindowOptions) -> WindowId {
        self.created += 1;
        self.z_counter += 1;
        let id = WindowId(self.created);
        self.records.insert(
            id,
            WindowRecord {
                id,
                title,
                bounds,
                bounds_normal: None,
                minimized: false,
                maximized: false,
                z_order: self.z_counter,
                options,
            },
        );
        id
    }

    /// Remove the record; drops the active pointer when it referenced `id`.
    pub fn remove(&mut self, id: WindowId) -> Option<WindowRecord> {
        let removed = self.records.remove(&id);
        if removed.is_some() && self.active == Some(id) {
            self.active = None;
        }
        removed
    }

    /// The focus protocol: assign the next z value (counters never decrease
    /// or repeat, so relative recency stays recoverable) and mark active.
    pub fn raise(&mut self, id: WindowId) {
        if let Some(record) = self.records.get_mut(&id) {
            self.z_counter += 1;
            record.z_order = self.z_counter;
            self.active = Some(id);
        }
    }

    pub fn clear_active(&mut self, id: WindowId) {
        if self.active == Some(id) {
            self.active = None;
        }
    }

    /// Live window ids sorted back-to-front.
    pub fn ordered_by_z(&self) -> Vec<WindowId> {
        let mut ids: Vec<_> = self.records.values().map(|r| (r.z_order, r.id)).collect();
        ids.sort_unstable();
        ids.into_iter().map(|(_, id)| id).collect()
    }

    /// Highest z among visible (non-minimized) windows.
    pub fn top_visible(&self) -> Option<WindowId> {
        self.records
            .values()
            .filter(|r| !r.minimized)
            .max_by_key(|r| r.z_order)
            .map(|r| r.id)
    }
}
