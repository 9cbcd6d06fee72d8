//! Boundary with the code that actually performs test calls.
//!
//! The recorder does not issue HTTP requests itself. A [`TestDriver`] receives a
//! resolved [`DriverRequest`] and answers with a [`DriverOutput`]; the route of the
//! exchange either comes with the output or is resolved by a [`RouteResolver`].

use std::future::Future;

use http::{Method, StatusCode};
use indexmap::IndexMap;

use crate::Value;

mod call;
pub use self::call::ApiCall;

mod route;
pub use self::route::{RestfulRoutes, RouteMeta, RouteResolver};

/// A call ready to be dispatched: placeholders substituted, path params removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverRequest {
    /// HTTP method.
    pub method: Method,
    /// Resolved path.
    pub path: String,
    /// Params that were not consumed by the path.
    pub params: Value,
    /// Request headers.
    pub headers: IndexMap<String, String>,
}

/// What the driver observed when performing a call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverOutput {
    /// Response status.
    pub status: StatusCode,
    /// Raw response body.
    pub body: String,
    /// Route reported by the application under test, if it knows it.
    ///
    /// When absent the recorder falls back to its [`RouteResolver`].
    pub route: Option<RouteMeta>,
}

impl DriverOutput {
    /// Creates an output without route information.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            route: None,
        }
    }

    /// Attaches the route that handled the call.
    pub fn with_route(mut self, controller: impl Into<String>, action: impl Into<String>) -> Self {
        self.route = Some(RouteMeta::new(controller, action));
        self
    }
}

/// A trait for performing test calls against the application under test.
///
/// Implementations typically wrap an in-process router or a client bound to a test
/// server. Errors are surfaced to the test through [`DocsError::Driver`](crate::DocsError::Driver).
///
/// # Example
///
/// ```rust
/// use apidocs_core::{DriverOutput, DriverRequest, TestDriver};
/// use http::StatusCode;
///
/// #[derive(Debug)]
/// struct EchoDriver;
///
/// impl TestDriver for EchoDriver {
///     type Error = std::io::Error;
///
///     async fn dispatch(&mut self, request: DriverRequest) -> Result<DriverOutput, Self::Error> {
///         Ok(DriverOutput::new(StatusCode::OK, request.path))
///     }
/// }
/// ```
pub trait TestDriver {
    /// The error returned when a call cannot be performed.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Performs the call and reports what the application answered.
    fn dispatch(
        &mut self,
        request: DriverRequest,
    ) -> impl Future<Output = Result<DriverOutput, Self::Error>> + Send;
}
