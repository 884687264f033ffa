use crate::dom::ViewNode;
use crate::router::{Page, RouteContext};

/// Landing page. Greets `:userName` when the route carries one.
pub struct DashboardPage;

impl Page for DashboardPage {
    type Controller = ();

    fn view(&self, _controller: Option<&()>, context: &RouteContext) -> ViewNode {
        let node = ViewNode::new("div")
            .with_class("m-page")
            .with_text("Dashboard");
        match context.param("userName") {
            Some(user) => node.with_text(format!("Welcome back, {user}")),
            None => node,
        }
    }
}
