/// Handle returned when registering a listener; pass it back to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(usize);

impl ListenerId {
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }
}

/// Ordered set of callbacks.
///
/// Ids start at 1 and are never reused, so removing one listener leaves the ids of the
/// others valid.
pub struct Listeners<F: ?Sized> {
    slots: Vec<Option<Box<F>>>,
}

impl<F: ?Sized> Default for Listeners<F> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<F: ?Sized> Listeners<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: Box<F>) -> ListenerId {
        self.slots.push(Some(listener));
        ListenerId(self.slots.len())
    }

    /// Returns `true` if a live listener was removed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        id.0.checked_sub(1)
            .and_then(|idx| self.slots.get_mut(idx))
            .and_then(Option::take)
            .is_some()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<F>> {
        self.slots.iter_mut().flatten()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<F: ?Sized> std::fmt::Debug for Listeners<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners").field("live", &self.len()).finish()
    }
}
