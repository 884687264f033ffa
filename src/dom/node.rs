use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

use super::document::{Mount, MountInner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Uuid);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Delivered to transition listeners. `cancelled` is set when the node was
/// detached while a transition could still have been running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEvent {
    pub name: String,
    pub cancelled: bool,
}

type Listener = Arc<dyn Fn(&TransitionEvent) + Send + Sync>;

struct NodeInner {
    tag: String,
    text: Vec<String>,
    classes: Vec<String>,
    /// Classes as of the last style recalculation; `None` until the node
    /// has been laid out once after insertion.
    computed: Option<Vec<String>>,
    recalc_pending: bool,
    listeners: Vec<(ListenerId, String, Listener)>,
    next_listener: u64,
    parent: Option<Weak<MountInner>>,
}

/// Shared handle to one view node. Clones refer to the same node.
#[derive(Clone)]
pub struct ViewNode {
    id: NodeId,
    inner: Arc<Mutex<NodeInner>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    pub id: String,
    pub tag: String,
    pub classes: Vec<String>,
    pub text: Vec<String>,
    pub listeners: usize,
}

impl ViewNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: NodeId(Uuid::new_v4()),
            inner: Arc::new(Mutex::new(NodeInner {
                tag: tag.into(),
                text: Vec::new(),
                classes: Vec::new(),
                computed: None,
                recalc_pending: false,
                listeners: Vec::new(),
                next_listener: 0,
                parent: None,
            })),
        }
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        let class = class.into();
        {
            let mut inner = self.inner.lock();
            if !inner.classes.contains(&class) {
                inner.classes.push(class);
            }
        }
        self
    }

    pub fn with_text(self, line: impl Into<String>) -> Self {
        self.inner.lock().text.push(line.into());
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tag(&self) -> String {
        self.inner.lock().tag.clone()
    }

    pub fn text(&self) -> Vec<String> {
        self.inner.lock().text.clone()
    }

    pub fn classes(&self) -> Vec<String> {
        self.inner.lock().classes.clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.inner.lock().classes.iter().any(|c| c == class)
    }

    /// Add `class`; returns false if it was already present.
    pub fn add_class(&self, class: &str) -> bool {
        let added = {
            let mut inner = self.inner.lock();
            if inner.classes.iter().any(|c| c == class) {
                false
            } else {
                inner.classes.push(class.to_string());
                true
            }
        };
        if added {
            self.invalidate_style();
        }
        added
    }

    /// Remove `class`; returns false if it was not present.
    pub fn remove_class(&self, class: &str) -> bool {
        let removed = {
            let mut inner = self.inner.lock();
            let before = inner.classes.len();
            inner.classes.retain(|c| c != class);
            inner.classes.len() != before
        };
        if removed {
            self.invalidate_style();
        }
        removed
    }

    /// Replace tag and text with those of `rendered`, adding any classes
    /// it carries. Classes already on this node (including transition
    /// state classes) are kept.
    pub fn replace_content(&self, rendered: &ViewNode) {
        if rendered.id == self.id {
            return;
        }
        let (tag, text, classes) = {
            let other = rendered.inner.lock();
            (other.tag.clone(), other.text.clone(), other.classes.clone())
        };
        let mut class_added = false;
        {
            let mut inner = self.inner.lock();
            inner.tag = tag;
            inner.text = text;
            for class in classes {
                if !inner.classes.contains(&class) {
                    inner.classes.push(class);
                    class_added = true;
                }
            }
        }
        if class_added {
            self.invalidate_style();
        }
    }

    pub fn add_transition_listener<F>(&self, event: &str, listener: F) -> ListenerId
    where
        F: Fn(&TransitionEvent) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        inner.next_listener += 1;
        let id = ListenerId(inner.next_listener);
        inner
            .listeners
            .push((id, event.to_string(), Arc::new(listener)));
        id
    }

    /// Remove a listener; returns false when it was already removed.
    pub fn remove_transition_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(existing, _, _)| *existing != id);
        inner.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    /// Invoke every listener registered for `event.name`. Listeners run
    /// without the node lock held, so they may remove themselves.
    pub fn dispatch_transition(&self, event: &TransitionEvent) -> usize {
        let listeners: Vec<Listener> = self
            .inner
            .lock()
            .listeners
            .iter()
            .filter(|(_, name, _)| *name == event.name)
            .map(|(_, _, listener)| Arc::clone(listener))
            .collect();
        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }

    pub fn is_attached(&self) -> bool {
        self.parent().is_some()
    }

    /// The node following this one in its mount point.
    pub fn next_sibling(&self) -> Option<ViewNode> {
        let parent = self.parent()?;
        let children = parent.children();
        let index = children.iter().position(|child| child.id == self.id)?;
        children.get(index + 1).cloned()
    }

    /// Remove the node from its mount point. Returns false when it was not
    /// attached.
    pub fn detach(&self) -> bool {
        match self.parent() {
            Some(parent) => parent.remove(self),
            None => false,
        }
    }

    /// Run a pending style recalculation now, like reading a layout
    /// property forces one in a browser.
    pub fn force_style(&self) {
        if let Some(parent) = self.parent() {
            parent.engine().recalc(self);
        }
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        let inner = self.inner.lock();
        NodeSnapshot {
            id: self.id.to_string(),
            tag: inner.tag.clone(),
            classes: inner.classes.clone(),
            text: inner.text.clone(),
            listeners: inner.listeners.len(),
        }
    }

    fn parent(&self) -> Option<Mount> {
        self.inner
            .lock()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(Mount::from_inner)
    }

    fn invalidate_style(&self) {
        let parent = {
            let mut inner = self.inner.lock();
            if inner.recalc_pending {
                return;
            }
            let Some(parent) = inner.parent.as_ref().and_then(Weak::upgrade) else {
                return;
            };
            inner.recalc_pending = true;
            Mount::from_inner(parent)
        };
        parent.engine().schedule(self.clone());
    }

    /// Consume a pending recalculation. Returns the classes whose presence
    /// changed since the previous one, or `None` when there was nothing to
    /// recalculate, this was the node's first layout, or nothing changed.
    pub(super) fn take_style_change(&self) -> Option<Vec<String>> {
        let mut inner = self.inner.lock();
        if !inner.recalc_pending {
            return None;
        }
        inner.recalc_pending = false;
        let current = inner.classes.clone();
        let previous = inner.computed.replace(current.clone())?;
        let changed: Vec<String> = current
            .iter()
            .filter(|class| !previous.contains(class))
            .chain(previous.iter().filter(|class| !current.contains(class)))
            .cloned()
            .collect();
        if changed.is_empty() {
            None
        } else {
            Some(changed)
        }
    }

    pub(super) fn set_parent(&self, parent: &Arc<MountInner>) {
        {
            let mut inner = self.inner.lock();
            inner.parent = Some(Arc::downgrade(parent));
            inner.computed = None;
            inner.recalc_pending = false;
        }
        // Layout on insertion; the first recalculation only records styles.
        self.invalidate_style();
    }

    /// Called by the mount after removing this node.
    pub(super) fn on_detached(&self) {
        let cancelled: Vec<(String, Listener)> = {
            let mut inner = self.inner.lock();
            inner.parent = None;
            inner.computed = None;
            inner.recalc_pending = false;
            inner
                .listeners
                .iter()
                .map(|(_, name, listener)| (name.clone(), Arc::clone(listener)))
                .collect()
        };
        for (name, listener) in cancelled {
            listener(&TransitionEvent {
                name,
                cancelled: true,
            });
        }
    }
}

impl std::fmt::Debug for ViewNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ViewNode")
            .field("id", &self.id)
            .field("tag", &inner.tag)
            .field("classes", &inner.classes)
            .finish()
    }
}

impl PartialEq for ViewNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ViewNode {}
