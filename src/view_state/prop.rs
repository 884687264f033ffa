use parking_lot::Mutex;

/// A mutable cell holding one field of a view-state shape.
///
/// Deliberately not `Clone`: every shape instance builds its own cells, so
/// two keys can never end up sharing one.
pub struct Prop<T> {
    value: Mutex<T>,
}

impl<T> Prop<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
        }
    }

    pub fn set(&self, value: T) {
        *self.value.lock() = value;
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.value.lock())
    }
}

impl<T: Clone> Prop<T> {
    pub fn get(&self) -> T {
        self.value.lock().clone()
    }
}

impl Prop<bool> {
    /// Flip the flag and return the new value.
    pub fn toggle(&self) -> bool {
        self.update(|value| {
            *value = !*value;
            *value
        })
    }
}

impl<T: Default> Default for Prop<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Prop<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Prop").field(&*self.value.lock()).finish()
    }
}
