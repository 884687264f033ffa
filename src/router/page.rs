use std::any::Any;
use std::sync::Arc;

use crate::dom::ViewNode;
use crate::lifecycle::{LifetimeHandle, RedrawSignal};

use super::pattern::RouteParams;

/// State owned by one activation of a page.
pub trait Controller: Send + 'static {
    /// Called when the dispatcher leaves the route.
    fn on_teardown(&mut self) {}
}

/// Pages without state use `()`.
impl Controller for () {}

/// What a page sees of the route it was activated for.
#[derive(Debug, Clone)]
pub struct RouteContext {
    pub path: String,
    pub pattern: String,
    pub name: String,
    pub params: RouteParams,
    /// Ends when the dispatcher leaves this activation.
    pub lifetime: LifetimeHandle,
    /// Raised by controllers whose async data changed the view.
    pub redraw: RedrawSignal,
}

impl RouteContext {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}

/// A page module: an optional controller plus a view.
pub trait Page: Send + Sync + 'static {
    type Controller: Controller;

    /// Build the activation's controller. Pages returning `None` render
    /// with no controller.
    fn controller(&self, _context: &RouteContext) -> Option<Self::Controller> {
        None
    }

    fn view(&self, controller: Option<&Self::Controller>, context: &RouteContext) -> ViewNode;
}

/// Type-erased page, as stored in the route table.
pub(crate) trait Binding: Send + Sync {
    fn activate(&self, context: &RouteContext) -> Box<dyn Mounted>;
}

/// One live activation of a page.
pub(crate) trait Mounted: Send {
    fn render(&self, context: &RouteContext) -> ViewNode;
    fn teardown(&mut self);
    fn controller(&self) -> Option<&dyn Any>;
}

struct PageBinding<P> {
    page: Arc<P>,
}

struct Activation<P: Page> {
    page: Arc<P>,
    controller: Option<P::Controller>,
}

impl<P: Page> Binding for PageBinding<P> {
    fn activate(&self, context: &RouteContext) -> Box<dyn Mounted> {
        Box::new(Activation {
            page: Arc::clone(&self.page),
            controller: self.page.controller(context),
        })
    }
}

impl<P: Page> Mounted for Activation<P> {
    fn render(&self, context: &RouteContext) -> ViewNode {
        self.page.view(self.controller.as_ref(), context)
    }

    fn teardown(&mut self) {
        if let Some(controller) = self.controller.as_mut() {
            controller.on_teardown();
        }
    }

    fn controller(&self) -> Option<&dyn Any> {
        self.controller.as_ref().map(|controller| controller as &dyn Any)
    }
}

/// A pattern bound to a page.
pub struct Route {
    pub(crate) pattern: String,
    pub(crate) name: Option<String>,
    pub(crate) binding: Arc<dyn Binding>,
}

impl Route {
    pub fn new<P: Page>(pattern: impl Into<String>, page: P) -> Self {
        Self::shared(pattern, Arc::new(page))
    }

    /// Bind a page instance shared with other routes.
    pub fn shared<P: Page>(pattern: impl Into<String>, page: Arc<P>) -> Self {
        Self {
            pattern: pattern.into(),
            name: None,
            binding: Arc::new(PageBinding { page }),
        }
    }

    /// Name published as the page-name attribute. Defaults to the pattern
    /// without separators.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .field("name", &self.name)
            .finish()
    }
}
