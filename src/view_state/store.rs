use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

/// A declared view-state shape. `init` builds a fresh instance whose cells
/// are independent of every other instance.
pub trait ViewShape: Send + Sync + 'static {
    fn init() -> Self;
}

type Factory<S> = Box<dyn Fn() -> S + Send + Sync>;

/// Lazily populated `key -> Arc<S>` map.
///
/// Entries live as long as the map (normally the controller that owns it),
/// not as long as the entity the key came from. Use [`clear`](Self::clear)
/// to bound memory on long-lived pages whose keys churn.
pub struct ViewStateMap<K, S> {
    entries: Mutex<HashMap<K, Arc<S>>>,
    factory: Factory<S>,
}

impl<K, S> ViewStateMap<K, S>
where
    K: Eq + Hash,
{
    pub fn new(factory: impl Fn() -> S + Send + Sync + 'static) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            factory: Box::new(factory),
        }
    }

    /// State for `key`, built on first access.
    pub fn get<Q>(&self, key: &Q) -> Arc<S>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        if let Some(state) = self.entries.lock().get(key) {
            return Arc::clone(state);
        }
        // Built without the lock held so a factory may read this map. If
        // another caller inserted meanwhile, theirs wins.
        let built = Arc::new((self.factory)());
        Arc::clone(self.entries.lock().entry(key.to_owned()).or_insert(built))
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.lock().contains_key(key)
    }

    /// Drop every entry. Instances still held by callers stay valid but are
    /// no longer returned by `get`.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<K, S> Default for ViewStateMap<K, S>
where
    K: Eq + Hash,
    S: ViewShape,
{
    fn default() -> Self {
        Self::new(S::init)
    }
}
