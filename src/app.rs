//! Shell assembly: config, document, bus, gateway and dispatcher wired
//! together with the demo pages.

use crate::animator::{Animator, SettleOutcome};
use crate::bus::EventBus;
use crate::config::{Config, ConfigStore};
use crate::dom::{Document, DocumentSnapshot, Platform};
use crate::error::ShellError;
use crate::gateway::{Contact, ContactDraft, ContactGateway, Gateway, InMemoryTransport};
use crate::pages::{self, seed_contacts, ContactsController};
use crate::router::{AppContext, Dispatcher, NavigationOutcome};

/// Pattern of the contacts page.
pub const CONTACTS_ROUTE: &str = "/contact";

pub struct App {
    config: ConfigStore,
    dispatcher: Dispatcher,
    gateway: ContactGateway,
}

impl App {
    /// Build the shell with a host matching the animation config.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: ConfigStore) -> Result<Self, ShellError> {
        let platform = Platform::from_config(&config.get().animation);
        Self::with_platform(config, platform)
    }

    pub fn with_platform(config: ConfigStore, platform: Platform) -> Result<Self, ShellError> {
        let settings: Config = config.get();
        settings.validate()?;

        let gateway = Gateway::spawn(
            InMemoryTransport::new(seed_contacts()).with_latency(settings.gateway.latency()),
        );
        let bus = EventBus::new();
        let animator = Animator::new(&settings.animation, &platform);
        let document = Document::new(platform, settings.navigation.mount.clone());

        let mut dispatcher = Dispatcher::new(
            AppContext {
                mode: settings.navigation.mode,
                document,
                bus: bus.clone(),
            },
            animator,
        );
        dispatcher.register(
            pages::routes(gateway.clone(), bus),
            &settings.navigation.default_route,
        )?;

        Ok(Self {
            config,
            dispatcher,
            gateway,
        })
    }

    /// Navigate to `location`: a path, or a location with a fragment.
    pub fn navigate(&mut self, location: &str) -> NavigationOutcome {
        if location.contains('#') {
            self.dispatcher.navigate_fragment(location)
        } else {
            self.dispatcher.navigate(location)
        }
    }

    /// Activate the configured default route.
    pub fn start(&mut self) -> NavigationOutcome {
        let default = self.config.get().navigation.default_route;
        self.dispatcher.navigate(&default)
    }

    /// Wait for running transitions and outstanding gateway work, then apply
    /// any redraw the controllers asked for.
    pub async fn settle(&mut self) -> Vec<SettleOutcome> {
        let mut outcomes = Vec::new();
        for render in self.dispatcher.take_renders() {
            outcomes.extend(render.settled().await);
        }

        // Let freshly spawned controller tasks issue their requests. The
        // gateway answers in issue order, so once a new list resolves every
        // earlier request has been answered as well.
        tokio::task::yield_now().await;
        if let Err(err) = self.gateway.list().await {
            tracing::warn!(error = %err, "Gateway barrier failed");
        }
        tokio::task::yield_now().await;

        self.redraw_if_requested();
        outcomes
    }

    pub fn redraw_if_requested(&mut self) -> bool {
        if self.dispatcher.redraw_signal().take() {
            self.dispatcher.redraw()
        } else {
            false
        }
    }

    /// Save a contact through the contacts page, activating it first.
    pub async fn add_contact(&mut self, draft: ContactDraft) -> Result<Contact, ShellError> {
        let on_contacts = self
            .dispatcher
            .current()
            .is_some_and(|route| route.pattern == CONTACTS_ROUTE);
        if !on_contacts {
            self.dispatcher.navigate(CONTACTS_ROUTE);
        }
        let Some(controller) = self.contacts_controller() else {
            return Err(ShellError::PageUnavailable {
                route: CONTACTS_ROUTE.to_string(),
            });
        };

        controller.show_form();
        let saved = controller.save(draft).await?;
        self.redraw_if_requested();
        Ok(saved)
    }

    pub fn contacts_controller(&self) -> Option<ContactsController> {
        self.dispatcher.controller::<ContactsController>()
    }

    pub fn config(&self) -> Config {
        self.config.get()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    pub fn document(&self) -> &Document {
        self.dispatcher.document()
    }

    pub fn bus(&self) -> &EventBus {
        self.dispatcher.bus()
    }

    pub fn gateway(&self) -> &ContactGateway {
        &self.gateway
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        self.document().snapshot()
    }
}
