//! Capture orchestration.
//!
//! Each [`DocRecorder::call`] dispatches the call through the driver, then, unless
//! capture is gated off, builds a [`CaptureRecord`], merges it in the store of its
//! controller and persists it:
//!
//! - with `automatic_write`, the controller file is read again before every capture
//!   and written right after it, so examples written meanwhile by another recorder
//!   are kept
//! - otherwise every file is loaded when the session begins and written when it ends

use tracing::{debug, info, warn};

use crate::driver::{ApiCall, DriverOutput, TestDriver};
use crate::persist::DocsGateway;
use crate::{
    CaptureRecord, DocsConfig, DocsError, Fingerprint, GroupedStore, MergeStrategy, Meta,
    RouteResolver, sanitize,
};

mod builder;
pub use self::builder::DocRecorderBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Session {
    Closed,
    Open,
}

/// Records documentation examples from test calls.
///
/// # Example
///
/// ```rust,no_run
/// use apidocs_core::{ApiCall, DocRecorder, DriverOutput, DriverRequest, TestDriver};
/// use http::StatusCode;
///
/// #[derive(Debug)]
/// struct UsersApi;
///
/// impl TestDriver for UsersApi {
///     type Error = std::io::Error;
///
///     async fn dispatch(&mut self, request: DriverRequest) -> Result<DriverOutput, Self::Error> {
///         Ok(DriverOutput::new(StatusCode::OK, r#"{"id":123,"name":"Ada"}"#))
///     }
/// }
///
/// # async fn example() -> Result<(), apidocs_core::DocsError> {
/// let mut recorder = DocRecorder::builder(UsersApi).build();
///
/// let outcome = recorder
///     .call_with(ApiCall::get("/users/:id").with_param("id", 123), |meta| {
///         meta.describe("Fetch a single user");
///     })
///     .await?;
///
/// assert_eq!(outcome.output().status, StatusCode::OK);
/// // doc/api/users.yml now documents the `show` action
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DocRecorder<D> {
    config: DocsConfig,
    driver: D,
    gateway: DocsGateway,
    merge: Box<dyn MergeStrategy>,
    routes: Box<dyn RouteResolver>,
    store: GroupedStore,
    session: Session,
    pending: usize,
}

impl<D> DocRecorder<D> {
    /// Starts building a recorder around `driver`.
    pub fn builder(driver: D) -> DocRecorderBuilder<D> {
        DocRecorderBuilder::new(driver)
    }

    /// The configuration in use.
    pub fn config(&self) -> &DocsConfig {
        &self.config
    }

    /// The documentation files this recorder reads and writes.
    pub fn gateway(&self) -> &DocsGateway {
        &self.gateway
    }

    /// The examples known to this recorder, loaded ones included.
    pub fn store(&self) -> &GroupedStore {
        &self.store
    }

    /// The driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The driver, mutably, e.g. to seed application state between calls.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Loads every documentation file so that new captures merge with them.
    ///
    /// Only meaningful without `automatic_write`; a capture opens the session lazily
    /// if this was not called. Calling it on an open session does nothing.
    pub fn begin_session(&mut self) {
        if self.config.automatic_write {
            debug!("per-call writes, files are loaded before each capture");
            return;
        }
        if self.session == Session::Open {
            return;
        }

        let mut loaded = self.gateway.load_all();
        loaded.absorb(std::mem::take(&mut self.store));
        self.store = loaded;
        self.session = Session::Open;
        info!(
            path = %self.gateway.docs_path().display(),
            records = self.store.len(),
            "documentation session started"
        );
    }

    /// Writes every controller file if a session is open, then forgets all examples.
    ///
    /// # Errors
    ///
    /// Returns the first write failure. The examples are kept, so the call can be retried.
    pub fn end_session(&mut self) -> Result<(), DocsError> {
        if self.session == Session::Open {
            self.gateway.write_all(&self.store)?;
            info!(
                path = %self.gateway.docs_path().display(),
                captured = self.pending,
                records = self.store.len(),
                "documentation session ended"
            );
        }

        self.store = GroupedStore::new();
        self.session = Session::Closed;
        self.pending = 0;
        Ok(())
    }

    fn capture(
        &mut self,
        call: &ApiCall,
        output: &DriverOutput,
        meta: Meta,
    ) -> Result<Fingerprint, DocsError> {
        let route = match &output.route {
            Some(route) => route.clone(),
            None => self.routes.resolve(call.method(), call.path_template()),
        };
        let params = sanitize(&call.params());
        let record = CaptureRecord::build(call, output, route, meta, params);
        let controller = record.controller.clone();
        let action = record.action.clone();

        if self.config.automatic_write {
            let loaded = self.gateway.load_group(&controller);
            self.store.insert_group(controller.as_str(), loaded);
        } else {
            self.begin_session();
        }

        let store = self.store.group_mut(controller.as_str());
        let fingerprint = self.merge.merge(store, record);
        debug!(%controller, %action, %fingerprint, "example captured");

        if self.config.automatic_write {
            self.gateway.write_group(&controller, store)?;
        } else {
            self.pending += 1;
        }
        Ok(fingerprint)
    }
}

impl<D: TestDriver> DocRecorder<D> {
    /// Performs `call` and documents it without annotations.
    ///
    /// # Errors
    ///
    /// See [`DocRecorder::call_with`].
    pub async fn call(&mut self, call: ApiCall) -> Result<CallOutcome, DocsError> {
        self.call_with(call, |_| {}).await
    }

    /// Performs `call` and documents it, letting `annotate` fill the example metadata.
    ///
    /// `annotate` only runs when the call is captured. Annotations are part of the
    /// fingerprint: the same call with a different description is a distinct example.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::Driver`] if the driver fails, and a write error if the
    /// documentation file cannot be updated.
    pub async fn call_with(
        &mut self,
        call: ApiCall,
        annotate: impl FnOnce(&mut Meta),
    ) -> Result<CallOutcome, DocsError> {
        let request = call.to_request();
        debug!(method = %request.method, path = %request.path, "dispatching call");

        let output = self
            .driver
            .dispatch(request)
            .await
            .map_err(|err| DocsError::Driver {
                error: Box::new(err),
            })?;

        if !self.config.should_capture() {
            debug!(path = call.path_template(), "capture not requested, skipping");
            return Ok(CallOutcome {
                output,
                fingerprint: None,
            });
        }

        let mut meta = Meta::default();
        annotate(&mut meta);
        let fingerprint = self.capture(&call, &output, meta)?;

        Ok(CallOutcome {
            output,
            fingerprint: Some(fingerprint),
        })
    }
}

impl<D> Drop for DocRecorder<D> {
    fn drop(&mut self) {
        if self.pending > 0 {
            warn!(
                pending = self.pending,
                "captured examples were never written, call `end_session` before dropping the recorder"
            );
        }
    }
}

/// Result of a documented call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOutcome {
    output: DriverOutput,
    fingerprint: Option<Fingerprint>,
}

impl CallOutcome {
    /// What the driver returned.
    pub fn output(&self) -> &DriverOutput {
        &self.output
    }

    /// Consumes the outcome, returning the driver output.
    pub fn into_output(self) -> DriverOutput {
        self.output
    }

    /// Key of the stored example, `None` when capture was skipped.
    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.fingerprint.as_ref()
    }

    /// Returns `true` if the call was documented.
    pub fn is_captured(&self) -> bool {
        self.fingerprint.is_some()
    }
}
