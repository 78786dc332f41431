//! Object pool: arena with a free list and generational handles
//!
//! Live and free objects share one slot vector. `put` returns a slot to the
//! free list and bumps its generation, so any handle still pointing at it goes
//! stale instead of aliasing the next occupant. `clear` bumps the pool epoch,
//! which invalidates every handle issued before it.

use serde::{Deserialize, Serialize};

/// Objects that can be reused after being returned to a pool
pub trait Recycle {
    /// Restore per-instance state before the object is handed out again
    fn recycle(&mut self);
}

/// Index + generation reference into a [`Pool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle {
    index: u32,
    generation: u32,
    epoch: u32,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    value: T,
    generation: u32,
    live: bool,
}

/// Arena of reusable `T`
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    epoch: u32,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            epoch: 0,
        }
    }

    /// Add a freshly built object and return its handle
    pub fn insert(&mut self, value: T) -> Handle {
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            value,
            generation: 0,
            live: true,
        });
        Handle {
            index,
            generation: 0,
            epoch: self.epoch,
        }
    }

    /// Return an object to the free list. Stale or already-freed handles are
    /// ignored; returns whether the slot was released.
    pub fn put(&mut self, handle: Handle) -> bool {
        if handle.epoch != self.epoch {
            log::warn!("Ignoring put of pool handle from a cleared epoch {handle:?}");
            return false;
        }
        match self.slots.get_mut(handle.index as usize) {
            Some(slot) if slot.live && slot.generation == handle.generation => {
                slot.live = false;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(handle.index);
                true
            }
            _ => {
                log::warn!("Ignoring put of stale pool handle {handle:?}");
                false
            }
        }
    }

    /// Drop every object, live or free. All outstanding handles go stale.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn slot(&self, handle: Handle) -> Option<&Slot<T>> {
        if handle.epoch != self.epoch {
            return None;
        }
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.live && slot.generation == handle.generation)
    }

    pub fn get_ref(&self, handle: Handle) -> Option<&T> {
        self.slot(handle).map(|slot| &slot.value)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        if handle.epoch != self.epoch {
            return None;
        }
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.live && slot.generation == handle.generation)
            .map(|slot| &mut slot.value)
    }

    /// Number of objects waiting for reuse
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Number of objects currently handed out
    pub fn live_len(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl<T: Recycle> Pool<T> {
    /// Reuse a free object, recycled, or `None` when the free list is empty
    pub fn get(&mut self) -> Option<Handle> {
        let index = self.free.pop()?;
        let slot = &mut self.slots[index as usize];
        slot.value.recycle();
        slot.live = true;
        Some(Handle {
            index,
            generation: slot.generation,
            epoch: self.epoch,
        })
    }

    /// Reuse a free object or insert one built by `make`
    pub fn get_or_insert_with(&mut self, make: impl FnOnce() -> T) -> Handle {
        match self.get() {
            Some(handle) => handle,
            None => self.insert(make()),
        }
    }
}
