//! Page modules of the demo application.

mod about;
mod contacts;
mod dashboard;
mod userprofile;

use std::sync::Arc;

use crate::bus::EventBus;
use crate::gateway::ContactGateway;
use crate::router::Route;

pub use about::AboutPage;
pub use contacts::{seed_contacts, ContactRowState, ContactsController, ContactsPage};
pub use dashboard::DashboardPage;
pub use userprofile::UserProfilePage;

/// The application's route table.
pub fn routes(gateway: ContactGateway, bus: EventBus) -> Vec<Route> {
    let dashboard = Arc::new(DashboardPage);
    vec![
        Route::shared("/dashboard", Arc::clone(&dashboard)).name("dashboard"),
        Route::shared("/dashboard/:userName", dashboard).name("dashboard"),
        Route::new("/userprofile/:userName", UserProfilePage).name("userprofile"),
        Route::new("/about", AboutPage).name("about"),
        Route::new("/contact", ContactsPage::new(gateway, bus)).name("contact"),
    ]
}
