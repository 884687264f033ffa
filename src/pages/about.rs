use crate::dom::ViewNode;
use crate::router::{Page, RouteContext};

pub struct AboutPage;

impl Page for AboutPage {
    type Controller = ();

    fn view(&self, _controller: Option<&()>, _context: &RouteContext) -> ViewNode {
        ViewNode::new("div")
            .with_class("m-page")
            .with_text("About")
            .with_text("A single-page shell with animated route transitions.")
    }
}
