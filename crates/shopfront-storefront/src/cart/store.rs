use std::sync::{Mutex, PoisonError};

/// Persistence for the single opaque cart identifier.
///
/// Reads and writes are synchronous; the synchronizer reads at the start of
/// an operation and writes as soon as a snapshot arrives.
pub trait CartIdStore {
    fn load(&self) -> Option<String>;
    fn save(&self, cart_id: &str);
    fn clear(&self);
}

/// Process-local store, seeded from wherever the caller keeps the id (a
/// request header, a session file).
#[derive(Debug, Default)]
pub struct MemoryCartIdStore {
    cart_id: Mutex<Option<String>>,
}

impl MemoryCartIdStore {
    #[must_use]
    pub fn new(initial: Option<String>) -> Self {
        Self {
            cart_id: Mutex::new(initial.filter(|id| !id.trim().is_empty())),
        }
    }
}

impl CartIdStore for MemoryCartIdStore {
    fn load(&self) -> Option<String> {
        self.cart_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, cart_id: &str) {
        *self.cart_id.lock().unwrap_or_else(PoisonError::into_inner) = Some(cart_id.to_string());
    }

    fn clear(&self) {
        *self.cart_id.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
