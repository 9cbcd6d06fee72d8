use std::fmt::Debug;

use http::Method;

/// Controller used for calls on the root path.
const ROOT_CONTROLLER: &str = "root";

/// The logical endpoint that handled a call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Endpoint group, may contain `/` for namespaces (e.g. `admin/users`).
    pub controller: String,
    /// Endpoint within the group.
    pub action: String,
}

impl RouteMeta {
    /// Creates route metadata.
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
        }
    }
}

/// Resolves the controller and action of a call when the driver does not report them.
pub trait RouteResolver: Debug + Send + Sync {
    /// Returns the route for the given method and path template.
    fn resolve(&self, method: &Method, path: &str) -> RouteMeta;
}

/// Resource-oriented routing conventions.
///
/// - the controller is the path without its identifier segments, e.g.
///   `/api/users/:id` → `api/users`
/// - identifier segments are placeholders (`:id`, `{id}`) or numbers
/// - the action follows the usual REST names:
///
/// | Method          | Collection        | Member    |
/// |-----------------|-------------------|-----------|
/// | `GET`           | `index`           | `show`    |
/// | `POST`          | `create`          | `post`    |
/// | `PUT` / `PATCH` | `put` / `patch`   | `update`  |
/// | `DELETE`        | `delete`          | `destroy` |
///
/// Other combinations use the lowercase method name.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestfulRoutes;

fn is_identifier(segment: &str) -> bool {
    segment.starts_with(':')
        || (segment.starts_with('{') && segment.ends_with('}'))
        || segment.bytes().all(|byte| byte.is_ascii_digit())
}

impl RouteResolver for RestfulRoutes {
    fn resolve(&self, method: &Method, path: &str) -> RouteMeta {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();

        let member = segments.last().is_some_and(|segment| is_identifier(segment));
        let controller = segments
            .iter()
            .copied()
            .filter(|segment| !is_identifier(segment))
            .collect::<Vec<_>>()
            .join("/");
        let controller = if controller.is_empty() {
            ROOT_CONTROLLER.to_string()
        } else {
            controller
        };

        let action = match (member, method) {
            (false, &Method::GET) => "index",
            (false, &Method::POST) => "create",
            (true, &Method::GET) => "show",
            (true, &Method::PUT | &Method::PATCH) => "update",
            (true, &Method::DELETE) => "destroy",
            _ => "",
        };
        let action = if action.is_empty() {
            method.as_str().to_ascii_lowercase()
        } else {
            action.to_string()
        };

        RouteMeta { controller, action }
    }
}
