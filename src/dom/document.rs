use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use super::node::{NodeSnapshot, ViewNode};
use super::platform::Platform;
use super::style::StyleEngine;

/// Root attribute naming the active page, for styling and DOM queries.
pub const PAGE_NAME_ATTRIBUTE: &str = "data-page-name";

struct DocumentInner {
    attributes: RwLock<BTreeMap<String, String>>,
    mount: Mount,
}

/// The document: root attributes plus one mount point for views.
#[derive(Clone)]
pub struct Document {
    inner: Arc<DocumentInner>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSnapshot {
    pub attributes: BTreeMap<String, String>,
    pub mount: String,
    pub views: Vec<NodeSnapshot>,
}

impl Document {
    pub fn new(platform: Platform, mount: impl Into<String>) -> Self {
        let engine = StyleEngine::new(platform);
        Self {
            inner: Arc::new(DocumentInner {
                attributes: RwLock::new(BTreeMap::new()),
                mount: Mount::new(mount.into(), engine),
            }),
        }
    }

    pub fn mount(&self) -> &Mount {
        &self.inner.mount
    }

    pub fn engine(&self) -> &StyleEngine {
        self.inner.mount.engine()
    }

    pub fn platform(&self) -> &Platform {
        self.engine().platform()
    }

    /// Set a root attribute, replacing any previous value.
    pub fn set_root_attribute(&self, name: &str, value: &str) {
        self.inner
            .attributes
            .write()
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_root_attribute(&self, name: &str) -> Option<String> {
        self.inner.attributes.write().remove(name)
    }

    pub fn root_attribute(&self, name: &str) -> Option<String> {
        self.inner.attributes.read().get(name).cloned()
    }

    pub fn page_name(&self) -> Option<String> {
        self.root_attribute(PAGE_NAME_ATTRIBUTE)
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            attributes: self.inner.attributes.read().clone(),
            mount: self.inner.mount.name().to_string(),
            views: self
                .inner
                .mount
                .children()
                .iter()
                .map(ViewNode::snapshot)
                .collect(),
        }
    }
}

pub(crate) struct MountInner {
    name: String,
    children: Mutex<Vec<ViewNode>>,
    engine: StyleEngine,
}

/// Ordered container of view nodes. The newest view is first, so the
/// view it replaces is its next sibling.
#[derive(Clone)]
pub struct Mount {
    inner: Arc<MountInner>,
}

impl Mount {
    fn new(name: String, engine: StyleEngine) -> Self {
        Self {
            inner: Arc::new(MountInner {
                name,
                children: Mutex::new(Vec::new()),
                engine,
            }),
        }
    }

    pub(super) fn from_inner(inner: Arc<MountInner>) -> Self {
        Self { inner }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn engine(&self) -> &StyleEngine {
        &self.inner.engine
    }

    pub fn children(&self) -> Vec<ViewNode> {
        self.inner.children.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.children.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.children.lock().is_empty()
    }

    pub fn first(&self) -> Option<ViewNode> {
        self.inner.children.lock().first().cloned()
    }

    pub fn contains(&self, node: &ViewNode) -> bool {
        self.inner.children.lock().iter().any(|child| child == node)
    }

    /// Insert `node` as the first child, moving it out of any mount it was
    /// in before.
    pub fn insert_front(&self, node: &ViewNode) {
        node.detach();
        self.inner.children.lock().insert(0, node.clone());
        node.set_parent(&self.inner);
    }

    /// Remove `node`. Its transition listeners receive a cancelled event.
    pub fn remove(&self, node: &ViewNode) -> bool {
        let removed = {
            let mut children = self.inner.children.lock();
            let before = children.len();
            children.retain(|child| child != node);
            children.len() != before
        };
        if removed {
            node.on_detached();
        }
        removed
    }

    /// Remove every child except `keep`. Returns the removed nodes.
    pub fn retain_only(&self, keep: &ViewNode) -> Vec<ViewNode> {
        let removed: Vec<ViewNode> = {
            let mut children = self.inner.children.lock();
            let (kept, removed): (Vec<ViewNode>, Vec<ViewNode>) =
                children.drain(..).partition(|child| child == keep);
            *children = kept;
            removed
        };
        for node in &removed {
            node.on_detached();
        }
        removed
    }

    pub fn clear(&self) -> Vec<ViewNode> {
        let removed = std::mem::take(&mut *self.inner.children.lock());
        for node in &removed {
            node.on_detached();
        }
        removed
    }
}
