//! Path dispatch for the control page.
//!
//! Only `/on` and `/off` are actions. Every other path, including an empty or unknown
//! one, renders the status page: there is no 404.

use crate::actuator::Actuator;
use crate::http::{Body, ContentType, Response, ResponseHeaders};
use crate::template::Template;

/// Where clients are sent after switching.
pub const STATUS_PAGE: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    TurnOn,
    TurnOff,
    Status,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        match path {
            "/on" => Route::TurnOn,
            "/off" => Route::TurnOff,
            _ => Route::Status,
        }
    }
}

/// Apply the side effect of `route` and build its response.
pub fn respond<'t, A: Actuator>(
    route: Route,
    actuator: &mut A,
    template: Template<'t>,
) -> Response<'t> {
    match route {
        Route::TurnOn => {
            info!("LED on");
            actuator.turn_on();
            redirect()
        }
        Route::TurnOff => {
            info!("LED off");
            actuator.turn_off();
            redirect()
        }
        Route::Status => Response {
            headers: ResponseHeaders::success().with_content_type(ContentType::TextHtml),
            body: Body::Page(template.render(actuator.state())),
        },
    }
}

pub fn route<'t, A: Actuator>(path: &str, actuator: &mut A, template: Template<'t>) -> Response<'t> {
    respond(Route::from_path(path), actuator, template)
}

fn redirect() -> Response<'static> {
    Response {
        headers: ResponseHeaders::see_other(STATUS_PAGE),
        body: Body::Empty,
    }
}
