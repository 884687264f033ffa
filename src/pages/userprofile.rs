use crate::dom::ViewNode;
use crate::router::{Page, RouteContext};

pub struct UserProfilePage;

impl Page for UserProfilePage {
    type Controller = ();

    fn view(&self, _controller: Option<&()>, context: &RouteContext) -> ViewNode {
        let user = context.param("userName").unwrap_or("anonymous");
        ViewNode::new("div")
            .with_class("m-page")
            .with_text("User profile")
            .with_text(format!("Username: {user}"))
    }
}
