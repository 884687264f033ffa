use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;

use crate::bus::{ContactUpdated, EventBus, SubscriptionId};
use crate::dom::ViewNode;
use crate::gateway::{Contact, ContactDraft, ContactGateway, GatewayError};
use crate::lifecycle::{LifetimeHandle, RedrawSignal};
use crate::router::{Controller, Page, RouteContext};
use crate::view_state::{Prop, ViewShape, ViewStateMap};

/// Contacts shipped with the in-memory transport.
pub fn seed_contacts() -> Vec<Contact> {
    vec![
        Contact::new("John Doe", "johndoe@hotmail.com"),
        Contact::new("George Raptis", "georapbox@gmail.com"),
        Contact::new("Mary Lou", "mlou@yahoo.com"),
        Contact::new("Tim Duncan", "tduncan@gmail.com"),
    ]
}

/// Per-row UI state, keyed by email.
#[derive(Debug)]
pub struct ContactRowState {
    pub is_editing: Prop<bool>,
}

impl ViewShape for ContactRowState {
    fn init() -> Self {
        Self {
            is_editing: Prop::new(false),
        }
    }
}

#[derive(Default)]
struct ListState {
    contacts: Option<Vec<Contact>>,
    error: Option<GatewayError>,
    issued: u64,
    applied: u64,
}

/// Controller of the contacts page. Clones share state.
#[derive(Clone)]
pub struct ContactsController {
    gateway: ContactGateway,
    bus: EventBus,
    subscription: SubscriptionId,
    list: Arc<Mutex<ListState>>,
    rows: Arc<ViewStateMap<String, ContactRowState>>,
    form_open: Arc<Prop<bool>>,
    lifetime: LifetimeHandle,
    redraw: RedrawSignal,
}

impl ContactsController {
    /// Subscribe to contact updates and start loading the list.
    pub fn new(gateway: ContactGateway, bus: EventBus, context: &RouteContext) -> Self {
        let subscription = bus.on::<ContactUpdated, _>(|contact| {
            tracing::info!(email = %contact.email, "Contact updated");
        });

        let controller = Self {
            gateway,
            bus,
            subscription,
            list: Arc::new(Mutex::new(ListState::default())),
            rows: Arc::new(ViewStateMap::default()),
            form_open: Arc::new(Prop::new(false)),
            lifetime: context.lifetime.clone(),
            redraw: context.redraw.clone(),
        };

        match Handle::try_current() {
            Ok(handle) => {
                let loader = controller.clone();
                handle.spawn(async move {
                    // Failures are recorded in the list state.
                    let _ = loader.refresh().await;
                });
            }
            Err(_) => tracing::warn!("No runtime, contacts not loaded"),
        }
        controller
    }

    /// Reload the list. Results of an older refresh never overwrite a newer
    /// one.
    pub async fn refresh(&self) -> Result<Vec<Contact>, GatewayError> {
        let ticket = {
            let mut list = self.list.lock();
            list.issued += 1;
            list.issued
        };

        let result = self.gateway.list().guarded(&self.lifetime).await;
        if let Err(GatewayError::Cancelled) = result {
            tracing::debug!("Contacts refresh cancelled");
            return result;
        }

        {
            let mut list = self.list.lock();
            if ticket < list.applied {
                tracing::trace!(ticket, applied = list.applied, "Stale contacts list dropped");
                return result;
            }
            list.applied = ticket;
            match &result {
                Ok(contacts) => {
                    list.contacts = Some(contacts.clone());
                    list.error = None;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Loading contacts failed");
                    list.error = Some(err.clone());
                }
            }
        }
        self.redraw.request();
        result
    }

    /// Store a new contact, reload the list, close the form, then notify
    /// subscribers, in that order.
    pub async fn save(&self, draft: ContactDraft) -> Result<Contact, GatewayError> {
        let saved = self.gateway.save(draft).guarded(&self.lifetime).await?;
        self.refresh().await?;
        self.hide_form();
        self.bus.trigger::<ContactUpdated>(&saved);
        Ok(saved)
    }

    /// Loaded contacts; empty while loading.
    pub fn contacts(&self) -> Vec<Contact> {
        self.list.lock().contacts.clone().unwrap_or_default()
    }

    pub fn is_loaded(&self) -> bool {
        self.list.lock().contacts.is_some()
    }

    pub fn error(&self) -> Option<GatewayError> {
        self.list.lock().error.clone()
    }

    pub fn row_state(&self, email: &str) -> Arc<ContactRowState> {
        self.rows.get(email)
    }

    /// Flip a row between display and edit mode.
    pub fn toggle_editing(&self, email: &str) -> bool {
        let editing = self.row_state(email).is_editing.toggle();
        self.redraw.request();
        editing
    }

    pub fn show_form(&self) {
        self.form_open.set(true);
        self.redraw.request();
    }

    pub fn hide_form(&self) {
        self.form_open.set(false);
        self.redraw.request();
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open.get()
    }
}

impl Controller for ContactsController {
    fn on_teardown(&mut self) {
        // Only our own handler; the bus is shared with other components.
        let removed = self.bus.unsubscribe::<ContactUpdated>(self.subscription);
        tracing::debug!(removed, "Contacts page unloaded, update handler removed");
    }
}

pub struct ContactsPage {
    gateway: ContactGateway,
    bus: EventBus,
}

impl ContactsPage {
    pub fn new(gateway: ContactGateway, bus: EventBus) -> Self {
        Self { gateway, bus }
    }
}

impl Page for ContactsPage {
    type Controller = ContactsController;

    fn controller(&self, context: &RouteContext) -> Option<ContactsController> {
        Some(ContactsController::new(
            self.gateway.clone(),
            self.bus.clone(),
            context,
        ))
    }

    fn view(&self, controller: Option<&ContactsController>, _context: &RouteContext) -> ViewNode {
        let mut node = ViewNode::new("div")
            .with_class("m-page")
            .with_text("Contacts");
        let Some(controller) = controller else {
            return node;
        };

        if controller.is_form_open() {
            node = node.with_text("New contact: [name] [email] (Save)");
        }
        if let Some(err) = controller.error() {
            node = node.with_text(format!("Error: {err}"));
        }
        if !controller.is_loaded() {
            return node.with_text("Loading contacts...");
        }

        for (index, contact) in controller.contacts().iter().enumerate() {
            let row = controller.row_state(&contact.email);
            let line = if row.is_editing.get() {
                format!("{}. [{}] [{}] (Save)", index + 1, contact.name, contact.email)
            } else {
                format!("{}. {} <{}> (Edit)", index + 1, contact.name, contact.email)
            };
            node = node.with_text(line);
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{Gateway, InMemoryTransport};
    use crate::lifecycle::Lifetime;
    use crate::router::RouteParams;

    fn context(lifetime: &Lifetime) -> RouteContext {
        RouteContext {
            path: "/contact".to_string(),
            pattern: "/contact".to_string(),
            name: "contact".to_string(),
            params: RouteParams::default(),
            lifetime: lifetime.handle(),
            redraw: RedrawSignal::new(),
        }
    }

    #[tokio::test]
    async fn loads_seed_contacts() {
        let lifetime = Lifetime::new();
        let gateway = Gateway::spawn(InMemoryTransport::new(seed_contacts()));
        let controller = ContactsController::new(gateway, EventBus::new(), &context(&lifetime));
        let contacts = controller.refresh().await.unwrap();
        assert_eq!(contacts.len(), 4);
        assert!(controller.is_loaded());
        assert_eq!(controller.contacts()[1].name, "George Raptis");
    }

    #[tokio::test]
    async fn save_refreshes_then_notifies() {
        let lifetime = Lifetime::new();
        let bus = EventBus::new();
        let gateway = Gateway::spawn(InMemoryTransport::new(seed_contacts()));
        let controller = ContactsController::new(gateway, bus.clone(), &context(&lifetime));

        let observer = controller.clone();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bus.on::<ContactUpdated, _>(move |contact| {
            // The list is already refreshed when subscribers hear about it.
            let listed = observer.contacts().iter().any(|c| c.email == contact.email);
            sink.lock().push((contact.id, listed, observer.is_form_open()));
        });

        controller.show_form();
        let saved = controller
            .save(ContactDraft::new("Ann", "a@x.com"))
            .await
            .unwrap();
        assert_eq!(saved.id, Some(5));
        assert_eq!(*seen.lock(), vec![(Some(5), true, false)]);
    }

    #[tokio::test]
    async fn row_state_survives_rerender() {
        let lifetime = Lifetime::new();
        let gateway = Gateway::spawn(InMemoryTransport::new(seed_contacts()));
        let page = ContactsPage::new(gateway, EventBus::new());
        let context = context(&lifetime);
        let controller = page.controller(&context).unwrap();
        controller.refresh().await.unwrap();

        assert!(controller.toggle_editing("mlou@yahoo.com"));
        let first = page.view(Some(&controller), &context);
        let second = page.view(Some(&controller), &context);
        assert_eq!(first.text(), second.text());
        assert!(second.text()[3].contains("[Mary Lou]"));
        assert!(second.text()[1].contains("(Edit)"));
    }

    #[tokio::test]
    async fn teardown_removes_only_own_update_handler() {
        let lifetime = Lifetime::new();
        let bus = EventBus::new();
        bus.on::<ContactUpdated, _>(|_| {});
        let gateway = Gateway::spawn(InMemoryTransport::new(seed_contacts()));
        let mut controller = ContactsController::new(gateway, bus.clone(), &context(&lifetime));
        assert_eq!(bus.handler_count::<ContactUpdated>(), 2);
        controller.on_teardown();
        assert_eq!(bus.handler_count::<ContactUpdated>(), 1);
        controller.on_teardown();
        assert_eq!(bus.handler_count::<ContactUpdated>(), 1);
    }

    #[tokio::test]
    async fn ended_lifetime_cancels_save() {
        let lifetime = Lifetime::new();
        let gateway = Gateway::spawn(InMemoryTransport::new(seed_contacts()));
        let controller = ContactsController::new(gateway, EventBus::new(), &context(&lifetime));
        lifetime.end();
        let result = controller.save(ContactDraft::new("Ann", "a@x.com")).await;
        assert_eq!(result, Err(GatewayError::Cancelled));
    }
}
