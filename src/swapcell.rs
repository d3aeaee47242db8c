use std::sync::{Arc, Mutex};

// Use arc-swap instead? But see
// https://docs.rs/arc-swap/latest/arc_swap/docs/limitations/index.html

/// Stores an `Arc<T>`, hands it out to any number of passive readers
/// for any length of time, and allows the `Arc<T>` to be replaced at
/// any time. Readers never observe a partially-replaced value; they
/// hold either the old payload or the new one, wholesale.
pub struct SwapCell<T> {
    payload: Mutex<Arc<T>>,
}

impl<T> SwapCell<T> {
    pub fn new(payload: Arc<T>) -> SwapCell<T> {
        SwapCell {
            payload: Mutex::new(payload),
        }
    }

    /// Get the payload. Use it however long you want; this call
    /// finishes almost immediately.
    pub fn get(&self) -> Arc<T> {
        Arc::clone(&self.payload.lock().expect("never poisoned"))
    }

    /// Set the payload. Does not block readers holding the previous
    /// value; from this instant on, `get` returns the new payload.
    pub fn set(&self, val: Arc<T>) {
        *self.payload.lock().expect("never poisoned") = val;
    }
}
