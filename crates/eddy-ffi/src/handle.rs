//! Slot+generation handle table for grids owned across the C boundary.
//!
//! A destroyed grid's handle keeps its old generation, so later calls with
//! it resolve to `None` instead of touching freed memory or a different
//! grid that reused the slot.

/// Upper 32 bits hold the slot, lower 32 bits the generation.
fn encode(slot: u32, generation: u32) -> u64 {
    (u64::from(slot) << 32) | u64::from(generation)
}

fn decode(handle: u64) -> (u32, u32) {
    ((handle >> 32) as u32, handle as u32)
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Maps opaque `u64` handles to owned values.
///
/// Freed slots are recycled through a free list with a bumped generation.
/// A slot whose generation wraps to zero is retired for good, since a
/// zero-generation handle from its first occupant could otherwise match
/// again.
pub(crate) struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> HandleTable<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Store `value` and return its handle.
    pub(crate) fn insert(&mut self, value: T) -> u64 {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.value = Some(value);
            return encode(idx, slot.generation);
        }
        let idx = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        encode(idx, 0)
    }

    fn live_slot(&self, handle: u64) -> Option<&Slot<T>> {
        let (idx, generation) = decode(handle);
        self.slots
            .get(idx as usize)
            .filter(|slot| slot.generation == generation)
    }

    /// The value behind `handle`, if it is still live.
    pub(crate) fn get(&self, handle: u64) -> Option<&T> {
        self.live_slot(handle)?.value.as_ref()
    }

    /// Take the value behind `handle` out of the table.
    ///
    /// Returns `None` for stale or unknown handles, so destroying twice is
    /// harmless.
    pub(crate) fn remove(&mut self, handle: u64) -> Option<T> {
        let (idx, generation) = decode(handle);
        let slot = self.slots.get_mut(idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        if slot.generation != 0 {
            self.free.push(idx);
        }
        Some(value)
    }

    /// Number of live values.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.value.is_some()).count()
    }
}
