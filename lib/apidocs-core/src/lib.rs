//! # Apidocs Core
//!
//! Record API documentation examples from the calls your tests already make.
//!
//! Every call performed through a [`DocRecorder`] is turned into a [`CaptureRecord`]
//! (method, path template, headers, sanitized params, status, body and free-form
//! annotations) and stored in a YAML file per controller:
//!
//! ```yaml
//! # doc/api/users.yml
//! show:
//!   ID-c033f660d823374cbe76b7725ab6aa0e:
//!     method: GET
//!     path: /users/123
//!     headers: {}
//!     params: {}
//!     status: 200
//!     body: '{"id":123,"name":"Ada"}'
//!     meta: {}
//!     controller: users
//!     action: show
//! ```
//!
//! Examples are keyed by a [`Fingerprint`] of the request shape and the status, so
//! running the test suite again refreshes existing examples instead of piling up
//! duplicates, and the files stay stable enough to be committed.
//!
//! ## Quick Start
//!
//! Implement [`TestDriver`] for whatever performs calls against your application,
//! then route the calls of your tests through a recorder:
//!
//! ```rust,no_run
//! use apidocs_core::{ApiCall, DocRecorder, DriverOutput, DriverRequest, TestDriver};
//! use http::StatusCode;
//!
//! #[derive(Debug)]
//! struct MyApp;
//!
//! impl TestDriver for MyApp {
//!     type Error = std::io::Error;
//!
//!     async fn dispatch(&mut self, request: DriverRequest) -> Result<DriverOutput, Self::Error> {
//!         // call your router or test server here
//!         Ok(DriverOutput::new(StatusCode::CREATED, r#"{"id":1}"#))
//!     }
//! }
//!
//! #[tokio::test]
//! async fn create_user() -> Result<(), apidocs_core::DocsError> {
//!     let mut recorder = DocRecorder::builder(MyApp).build();
//!
//!     let outcome = recorder
//!         .call_with(ApiCall::post("/users").with_param("name", "Ada"), |meta| {
//!             meta.describe("Create a user");
//!         })
//!         .await?;
//!
//!     assert_eq!(outcome.output().status, StatusCode::CREATED);
//!     Ok(())
//! }
//! ```
//!
//! ## Capturing on demand
//!
//! With [`DocsConfig::generate_on_demand`], calls are only documented when the
//! activation signal is present (by default the `API_DOCS` environment variable), so
//! the regular test run leaves the documentation untouched:
//!
//! ```bash
//! API_DOCS=1 cargo test
//! ```
//!
//! ## Writing once per session
//!
//! By default each capture rewrites its controller file. Disable
//! [`DocsConfig::automatic_write`] to load all files once and write them in
//! [`DocRecorder::end_session`].
//!
//! ## Error Handling
//!
//! Only failures that would lose an example are reported, as [`DocsError`]. Missing
//! or malformed documentation files are logged and treated as empty.

mod capture;
mod config;
mod driver;
mod error;
pub mod persist;
mod recorder;
mod store;
mod yaml;

pub use self::capture::{
    BINARY_SENTINEL, BinaryUpload, CaptureRecord, FINGERPRINT_PREFIX, Fingerprint, Meta, Value,
    sanitize,
};
pub use self::config::{ActivationSignal, DEFAULT_ACTIVATION_VAR, DEFAULT_DOCS_PATH, DocsConfig};
pub use self::driver::{
    ApiCall, DriverOutput, DriverRequest, RestfulRoutes, RouteMeta, RouteResolver, TestDriver,
};
pub use self::error::DocsError;
pub use self::recorder::{CallOutcome, DocRecorder, DocRecorderBuilder};
pub use self::store::{
    DocumentStore, GroupedStore, KeepFirstCapture, MergeStrategy, ReplaceByFingerprint,
};
pub use self::yaml::{ToYaml, YamlError};
