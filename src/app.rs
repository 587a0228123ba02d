use crate::actuator::Actuator;
use crate::http::Response;
use crate::router::{self, Route};
use crate::template::Template;

/// State shared by every connection: the actuator and the page template.
///
/// Built once at boot and lent to the connection handler, one request at a time.
pub struct AppState<'t, A> {
    actuator: A,
    template: Template<'t>,
}

impl<'t, A: Actuator> AppState<'t, A> {
    pub fn new(actuator: A, template: Template<'t>) -> Self {
        Self { actuator, template }
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn respond(&mut self, route: Route) -> Response<'t> {
        router::respond(route, &mut self.actuator, self.template)
    }
}
