use crate::generator::context::GenerationContext;
use core::num::NonZeroU64;

/// Opaque reference to a live [GenerationContext] inside a [ContextTable].
///
/// The low 32 bits hold the slot index plus one, the high 32 bits the generation of the slot at
/// the time the context was created. A handle is therefore never zero, and a handle to a freed
/// slot stops matching as soon as the slot is released.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ContextHandle(NonZeroU64);

impl ContextHandle {
    fn new(index: usize, generation: u32) -> Self {
        let low = index as u64 + 1;
        let raw = (u64::from(generation) << 32) | low;
        // `low` is at least one
        Self(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN))
    }

    /// Reinterpret a raw handle received over the foreign interface. Zero is never a handle.
    pub fn from_raw(raw: i64) -> Option<Self> {
        NonZeroU64::new(raw as u64).map(Self)
    }

    pub fn into_raw(self) -> i64 {
        self.0.get() as i64
    }

    fn index(&self) -> Option<usize> {
        let low = self.0.get() as u32;
        low.checked_sub(1).map(|index| index as usize)
    }

    fn generation(&self) -> u32 {
        (self.0.get() >> 32) as u32
    }
}

#[derive(Copy, Clone, Debug)]
enum SlotState {
    Free,
    Live(GenerationContext),
}

#[derive(Copy, Clone, Debug)]
struct Slot {
    /// Bumped every time the slot is released.
    generation: u32,
    state: SlotState,
}

impl Slot {
    const EMPTY: Slot = Slot {
        generation: 0,
        state: SlotState::Free,
    };
}

/// Fixed-capacity arena of generation contexts.
pub struct ContextTable<const MAX_CONTEXTS: usize> {
    slots: [Slot; MAX_CONTEXTS],
}

impl<const MAX_CONTEXTS: usize> Default for ContextTable<MAX_CONTEXTS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MAX_CONTEXTS: usize> ContextTable<MAX_CONTEXTS> {
    pub const fn new() -> Self {
        Self {
            slots: [Slot::EMPTY; MAX_CONTEXTS],
        }
    }

    /// Store `context` in the first free slot.
    ///
    /// returns: The handle of the new context or `None` if all slots are in use.
    pub fn insert(&mut self, context: GenerationContext) -> Option<ContextHandle> {
        let (index, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| matches!(slot.state, SlotState::Free))?;
        slot.state = SlotState::Live(context);
        Some(ContextHandle::new(index, slot.generation))
    }

    /// Look up a live context. Unknown, stale and freed handles yield `None`.
    pub fn get(&self, handle: ContextHandle) -> Option<&GenerationContext> {
        let slot = self.slots.get(handle.index()?)?;
        match &slot.state {
            SlotState::Live(context) if slot.generation == handle.generation() => Some(context),
            _ => None,
        }
    }

    /// Release the context behind `handle`.
    ///
    /// returns: Whether a live context was released.
    pub fn remove(&mut self, handle: ContextHandle) -> bool {
        let Some(slot) = handle.index().and_then(|index| self.slots.get_mut(index)) else {
            return false;
        };
        if slot.generation != handle.generation() || matches!(slot.state, SlotState::Free) {
            return false;
        }
        slot.state = SlotState::Free;
        slot.generation = slot.generation.wrapping_add(1);
        true
    }

    pub fn live_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot.state, SlotState::Live(_)))
            .count()
    }

    pub const fn capacity(&self) -> usize {
        MAX_CONTEXTS
    }
}
