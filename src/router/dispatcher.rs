use std::sync::Arc;

use serde::Serialize;

use crate::animator::{Animator, RenderHandle};
use crate::bus::{EventBus, RouteChange, RouteChanged};
use crate::config::NavigationMode;
use crate::dom::{Document, ViewNode, PAGE_NAME_ATTRIBUTE};
use crate::lifecycle::{Lifetime, RedrawSignal};

use super::error::RouteError;
use super::page::{Binding, Mounted, Route, RouteContext};
use super::pattern::{normalize_path, RouteParams, RoutePattern};

/// Everything the dispatcher renders into or reports to.
#[derive(Clone)]
pub struct AppContext {
    pub mode: NavigationMode,
    pub document: Document,
    pub bus: EventBus,
}

/// Result of one [`Dispatcher::navigate`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationOutcome {
    pub requested: String,
    /// The activated route; `None` when nothing could be rendered.
    pub route: Option<RouteChange>,
    pub animated: bool,
}

impl NavigationOutcome {
    pub fn rendered(&self) -> bool {
        self.route.is_some()
    }

    pub fn fell_back(&self) -> bool {
        self.route.as_ref().is_some_and(|route| route.fell_back)
    }
}

struct RegisteredRoute {
    pattern: RoutePattern,
    name: String,
    binding: Arc<dyn Binding>,
}

struct ActiveRoute {
    change: RouteChange,
    context: RouteContext,
    lifetime: Lifetime,
    mounted: Box<dyn Mounted>,
    node: ViewNode,
}

/// Maps locations to pages and swaps their views in the document.
pub struct Dispatcher {
    context: AppContext,
    animator: Animator,
    routes: Vec<RegisteredRoute>,
    default_path: Option<String>,
    active: Option<ActiveRoute>,
    renders: Vec<RenderHandle>,
    redraw: RedrawSignal,
}

impl Dispatcher {
    pub fn new(context: AppContext, animator: Animator) -> Self {
        Self {
            context,
            animator,
            routes: Vec::new(),
            default_path: None,
            active: None,
            renders: Vec::new(),
            redraw: RedrawSignal::new(),
        }
    }

    /// Replace the route table. `default_path` is activated whenever a
    /// location matches nothing, so it must match one of `routes`.
    pub fn register(&mut self, routes: Vec<Route>, default_path: &str) -> Result<(), RouteError> {
        let mut table: Vec<RegisteredRoute> = Vec::with_capacity(routes.len());
        for route in routes {
            let pattern = RoutePattern::parse(&route.pattern)?;
            if table.iter().any(|existing| existing.pattern.same_shape(&pattern)) {
                return Err(RouteError::DuplicatePattern {
                    pattern: pattern.to_string(),
                });
            }
            let name = route.name.unwrap_or_else(|| pattern.fallback_name());
            table.push(RegisteredRoute {
                pattern,
                name,
                binding: route.binding,
            });
        }

        let default_path = normalize_path(default_path);
        if find_route(&table, &default_path).is_none() {
            return Err(RouteError::UnknownDefault { path: default_path });
        }

        tracing::info!(routes = table.len(), default = %default_path, "Routes registered");
        self.routes = table;
        self.default_path = Some(default_path);
        Ok(())
    }

    /// Activate the route for `path`, falling back to the default route.
    ///
    /// Must be called from within a tokio runtime when animation is on.
    pub fn navigate(&mut self, path: &str) -> NavigationOutcome {
        let requested = normalize_path(path);
        self.renders.retain(|render| !render.is_finished());

        let resolved = match find_route(&self.routes, &requested) {
            Some((index, params)) => Some((index, params, requested.clone(), false)),
            None => self.default_path.as_ref().and_then(|default| {
                tracing::debug!(path = %requested, default = %default, "No route matched, using default");
                find_route(&self.routes, default)
                    .map(|(index, params)| (index, params, default.clone(), true))
            }),
        };

        let Some((index, params, resolved_path, fell_back)) = resolved else {
            tracing::warn!(path = %requested, "No route to render");
            self.deactivate();
            self.context.document.mount().clear();
            self.context
                .document
                .remove_root_attribute(PAGE_NAME_ATTRIBUTE);
            return NavigationOutcome {
                requested,
                route: None,
                animated: false,
            };
        };

        let route = &self.routes[index];
        let change = RouteChange {
            path: resolved_path,
            pattern: route.pattern.to_string(),
            name: route.name.clone(),
            params,
            fell_back,
        };
        let binding = Arc::clone(&route.binding);

        self.context
            .document
            .set_root_attribute(PAGE_NAME_ATTRIBUTE, &change.name);

        let previous = self.deactivate();

        let lifetime = Lifetime::new();
        let context = RouteContext {
            path: change.path.clone(),
            pattern: change.pattern.clone(),
            name: change.name.clone(),
            params: change.params.clone(),
            lifetime: lifetime.handle(),
            redraw: self.redraw.clone(),
        };
        let mounted = binding.activate(&context);
        let node = mounted.render(&context);

        let mount = self.context.document.mount();
        mount.insert_front(&node);
        let animated = self.animator.is_animated();
        if animated {
            let previous = previous.filter(|previous| previous.is_attached());
            let render = self
                .animator
                .animate(previous.as_ref(), &node, &lifetime.handle());
            self.renders.push(render);
        } else {
            mount.retain_only(&node);
        }

        tracing::info!(
            path = %change.path,
            pattern = %change.pattern,
            name = %change.name,
            fell_back,
            "Route activated"
        );
        self.active = Some(ActiveRoute {
            change: change.clone(),
            context,
            lifetime,
            mounted,
            node,
        });
        self.context.bus.trigger::<RouteChanged>(&change);

        NavigationOutcome {
            requested,
            route: Some(change),
            animated,
        }
    }

    /// Navigate to a location as reported by the host: `#/about` in hash
    /// mode, `/about` in path mode.
    pub fn navigate_fragment(&mut self, location: &str) -> NavigationOutcome {
        let path = match self.context.mode {
            NavigationMode::Hash => location
                .split_once('#')
                .map_or(location, |(_, fragment)| fragment),
            NavigationMode::Path => location.split('#').next().unwrap_or_default(),
        };
        self.navigate(path)
    }

    pub fn current(&self) -> Option<&RouteChange> {
        self.active.as_ref().map(|active| &active.change)
    }

    pub fn current_view(&self) -> Option<&ViewNode> {
        self.active.as_ref().map(|active| &active.node)
    }

    /// A clone of the active controller, if the page has one of type `C`.
    pub fn controller<C: Clone + 'static>(&self) -> Option<C> {
        self.active
            .as_ref()?
            .mounted
            .controller()?
            .downcast_ref::<C>()
            .cloned()
    }

    /// Signal raised by controllers when their view is stale.
    pub fn redraw_signal(&self) -> RedrawSignal {
        self.redraw.clone()
    }

    /// Re-render the active view in place. Returns false when no route is
    /// active.
    pub fn redraw(&mut self) -> bool {
        self.redraw.take();
        let Some(active) = &self.active else {
            return false;
        };
        let rendered = active.mounted.render(&active.context);
        active.node.replace_content(&rendered);
        tracing::debug!(name = %active.change.name, "View redrawn");
        true
    }

    /// Tear down the active controller, leaving its view in place.
    pub fn teardown(&mut self) {
        self.deactivate();
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn document(&self) -> &Document {
        &self.context.document
    }

    pub fn bus(&self) -> &EventBus {
        &self.context.bus
    }

    /// Transitions still in flight. The caller may await them.
    pub fn take_renders(&mut self) -> Vec<RenderHandle> {
        std::mem::take(&mut self.renders)
    }

    fn deactivate(&mut self) -> Option<ViewNode> {
        let mut active = self.active.take()?;
        active.mounted.teardown();
        active.lifetime.end();
        tracing::debug!(name = %active.change.name, "Route deactivated");
        Some(active.node)
    }
}

fn find_route(routes: &[RegisteredRoute], path: &str) -> Option<(usize, RouteParams)> {
    let mut best: Option<(usize, RouteParams, usize)> = None;
    for (index, route) in routes.iter().enumerate() {
        let Some(params) = route.pattern.matches(path) else {
            continue;
        };
        let specificity = route.pattern.specificity();
        if best.as_ref().map_or(true, |(_, _, best)| specificity > *best) {
            best = Some((index, params, specificity));
        }
    }
    best.map(|(index, params, _)| (index, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimationConfig;
    use crate::dom::Platform;
    use crate::router::{Controller, Page};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Static(&'static str);

    impl Page for Static {
        type Controller = ();

        fn view(&self, _controller: Option<&()>, context: &RouteContext) -> ViewNode {
            let node = ViewNode::new("div").with_text(self.0);
            match context.param("id") {
                Some(id) => node.with_text(id),
                None => node,
            }
        }
    }

    #[derive(Clone)]
    struct Counting {
        teardowns: Arc<AtomicUsize>,
    }

    impl Controller for Counting {
        fn on_teardown(&mut self) {
            self.teardowns.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct CountingPage {
        teardowns: Arc<AtomicUsize>,
    }

    impl Page for CountingPage {
        type Controller = Counting;

        fn controller(&self, _context: &RouteContext) -> Option<Counting> {
            Some(Counting {
                teardowns: Arc::clone(&self.teardowns),
            })
        }

        fn view(&self, controller: Option<&Counting>, _context: &RouteContext) -> ViewNode {
            assert!(controller.is_some());
            ViewNode::new("div").with_text("counting")
        }
    }

    fn dispatcher() -> Dispatcher {
        let platform = Platform::without_transitions();
        let animator = Animator::new(&AnimationConfig::default(), &platform);
        Dispatcher::new(
            AppContext {
                mode: NavigationMode::Hash,
                document: Document::new(platform, "m-view"),
                bus: EventBus::new(),
            },
            animator,
        )
    }

    #[test]
    fn duplicate_pattern_is_rejected() {
        let mut dispatcher = dispatcher();
        let result = dispatcher.register(
            vec![Route::new("/a", Static("a")), Route::new("/a/", Static("b"))],
            "/a",
        );
        assert_eq!(
            result,
            Err(RouteError::DuplicatePattern {
                pattern: "/a".to_string()
            })
        );
    }

    #[test]
    fn placeholder_names_do_not_make_patterns_distinct() {
        let mut dispatcher = dispatcher();
        let result = dispatcher.register(
            vec![
                Route::new("/u/:id", Static("a")),
                Route::new("/u/:name", Static("b")),
            ],
            "/u/1",
        );
        assert_eq!(
            result,
            Err(RouteError::DuplicatePattern {
                pattern: "/u/:name".to_string()
            })
        );
        assert!(dispatcher.current().is_none());
    }

    #[test]
    fn default_must_match_a_route() {
        let mut dispatcher = dispatcher();
        let result = dispatcher.register(vec![Route::new("/a", Static("a"))], "/missing");
        assert!(matches!(result, Err(RouteError::UnknownDefault { .. })));
    }

    #[test]
    fn most_specific_pattern_wins() {
        let mut dispatcher = dispatcher();
        dispatcher
            .register(
                vec![
                    Route::new("/item/:id", Static("generic")),
                    Route::new("/item/new", Static("specific")),
                ],
                "/item/new",
            )
            .unwrap();

        let outcome = dispatcher.navigate("/item/new");
        assert_eq!(outcome.route.unwrap().pattern, "/item/new");

        let outcome = dispatcher.navigate("/item/7");
        let route = outcome.route.unwrap();
        assert_eq!(route.pattern, "/item/:id");
        assert_eq!(route.params.get("id"), Some("7"));
    }

    #[test]
    fn unmatched_path_falls_back_to_default() {
        let mut dispatcher = dispatcher();
        dispatcher
            .register(vec![Route::new("/home", Static("home"))], "/home")
            .unwrap();
        let outcome = dispatcher.navigate("/nowhere");
        assert!(outcome.rendered());
        assert!(outcome.fell_back());
        assert_eq!(outcome.requested, "/nowhere");
        assert_eq!(dispatcher.current().unwrap().path, "/home");
    }

    #[test]
    fn nothing_registered_renders_nothing() {
        let mut dispatcher = dispatcher();
        let outcome = dispatcher.navigate("/anything");
        assert!(!outcome.rendered());
        assert!(dispatcher.document().mount().is_empty());
        assert_eq!(dispatcher.document().page_name(), None);
    }

    #[test]
    fn name_defaults_to_pattern_without_separators() {
        let mut dispatcher = dispatcher();
        dispatcher
            .register(
                vec![
                    Route::new("/about", Static("about")),
                    Route::new("/team", Static("team")).name("people"),
                ],
                "/about",
            )
            .unwrap();
        dispatcher.navigate("/about");
        assert_eq!(dispatcher.document().page_name().as_deref(), Some("about"));
        dispatcher.navigate("/team");
        assert_eq!(dispatcher.document().page_name().as_deref(), Some("people"));
        assert_eq!(dispatcher.document().snapshot().attributes.len(), 1);
    }

    #[test]
    fn leaving_a_route_tears_its_controller_down() {
        let teardowns = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = dispatcher();
        dispatcher
            .register(
                vec![
                    Route::new(
                        "/counting",
                        CountingPage {
                            teardowns: Arc::clone(&teardowns),
                        },
                    ),
                    Route::new("/about", Static("about")),
                ],
                "/about",
            )
            .unwrap();

        dispatcher.navigate("/counting");
        assert!(dispatcher.controller::<Counting>().is_some());
        dispatcher.navigate("/about");
        assert_eq!(teardowns.load(Ordering::SeqCst), 1);
        assert!(dispatcher.controller::<Counting>().is_none());
    }

    #[test]
    fn pass_through_swaps_views_synchronously() {
        let mut dispatcher = dispatcher();
        dispatcher
            .register(
                vec![Route::new("/a", Static("a")), Route::new("/b", Static("b"))],
                "/a",
            )
            .unwrap();
        dispatcher.navigate("/a");
        let first = dispatcher.current_view().cloned().unwrap();
        let outcome = dispatcher.navigate("/b");

        assert!(!outcome.animated);
        assert!(!first.is_attached());
        let children = dispatcher.document().mount().children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].text(), vec!["b".to_string()]);
        assert_eq!(children[0].listener_count(), 0);
    }

    #[test]
    fn fragment_is_read_according_to_mode() {
        let mut dispatcher = dispatcher();
        dispatcher
            .register(
                vec![Route::new("/a", Static("a")), Route::new("/b", Static("b"))],
                "/a",
            )
            .unwrap();
        let outcome = dispatcher.navigate_fragment("index.html#/b");
        assert_eq!(outcome.route.unwrap().path, "/b");
    }

    #[test]
    fn route_change_is_published() {
        let mut dispatcher = dispatcher();
        dispatcher
            .register(vec![Route::new("/item/:id", Static("item"))], "/item/1")
            .unwrap();
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        dispatcher.bus().on::<RouteChanged, _>(move |change| {
            sink.lock().push(change.path.clone());
        });
        dispatcher.navigate("/item/2");
        dispatcher.navigate("/item/3");
        assert_eq!(*seen.lock(), vec!["/item/2".to_string(), "/item/3".to_string()]);
    }

    #[test]
    fn redraw_keeps_node_identity() {
        let mut dispatcher = dispatcher();
        dispatcher
            .register(vec![Route::new("/item/:id", Static("item"))], "/item/1")
            .unwrap();
        assert!(!dispatcher.redraw());
        dispatcher.navigate("/item/1");
        let node = dispatcher.current_view().cloned().unwrap();
        dispatcher.redraw_signal().request();
        assert!(dispatcher.redraw());
        assert!(!dispatcher.redraw_signal().is_requested());
        assert_eq!(dispatcher.current_view(), Some(&node));
        assert_eq!(node.text(), vec!["item".to_string(), "1".to_string()]);
    }
}
