use std::path::PathBuf;

use super::{DocRecorder, Session};
use crate::persist::{ControllerFileNaming, DocsGateway, FileNaming};
use crate::{DocsConfig, GroupedStore, MergeStrategy, ReplaceByFingerprint, RestfulRoutes, RouteResolver};

/// Builder for [`DocRecorder`].
///
/// # Default Configuration
///
/// - **Config**: [`DocsConfig::default()`] (`doc/api`, always capturing, per-call writes)
/// - **Merge strategy**: [`ReplaceByFingerprint`]
/// - **File naming**: [`ControllerFileNaming`] (`admin/users` → `admin:users.yml`)
/// - **Route resolver**: [`RestfulRoutes`]
///
/// # Example
///
/// ```rust
/// use apidocs_core::persist::ControllerFileNaming;
/// use apidocs_core::{DocRecorder, DocsConfig, KeepFirstCapture};
/// # use apidocs_core::{DriverOutput, DriverRequest, TestDriver};
/// # #[derive(Debug)]
/// # struct MyDriver;
/// # impl TestDriver for MyDriver {
/// #     type Error = std::io::Error;
/// #     async fn dispatch(&mut self, _: DriverRequest) -> Result<DriverOutput, Self::Error> {
/// #         Ok(DriverOutput::default())
/// #     }
/// # }
///
/// let recorder = DocRecorder::builder(MyDriver)
///     .with_config(DocsConfig::default().with_automatic_write(false))
///     .with_merge_strategy(KeepFirstCapture)
///     .with_file_naming(ControllerFileNaming::default().with_extension("yaml"))
///     .build();
///
/// assert!(!recorder.config().automatic_write);
/// ```
#[derive(Debug)]
pub struct DocRecorderBuilder<D> {
    driver: D,
    config: DocsConfig,
    merge: Box<dyn MergeStrategy>,
    naming: Box<dyn FileNaming>,
    routes: Box<dyn RouteResolver>,
}

impl<D> DocRecorderBuilder<D> {
    pub(super) fn new(driver: D) -> Self {
        Self {
            driver,
            config: DocsConfig::default(),
            merge: Box::new(ReplaceByFingerprint),
            naming: Box::new(ControllerFileNaming::default()),
            routes: Box::new(RestfulRoutes),
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: DocsConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the documentation directory.
    pub fn with_docs_path(mut self, docs_path: impl Into<PathBuf>) -> Self {
        self.config.docs_path = docs_path.into();
        self
    }

    /// Sets how captures enter the store.
    pub fn with_merge_strategy(mut self, merge: impl MergeStrategy + 'static) -> Self {
        self.merge = Box::new(merge);
        self
    }

    /// Sets how controllers map to file names.
    pub fn with_file_naming(mut self, naming: impl FileNaming + 'static) -> Self {
        self.naming = Box::new(naming);
        self
    }

    /// Sets how routes are resolved when the driver does not report them.
    pub fn with_route_resolver(mut self, routes: impl RouteResolver + 'static) -> Self {
        self.routes = Box::new(routes);
        self
    }

    /// Builds the recorder. No file is read until the first capture.
    pub fn build(self) -> DocRecorder<D> {
        let Self {
            driver,
            config,
            merge,
            naming,
            routes,
        } = self;
        let gateway = DocsGateway::new(config.docs_path.clone()).with_boxed_naming(naming);

        DocRecorder {
            config,
            driver,
            gateway,
            merge,
            routes,
            store: GroupedStore::new(),
            session: Session::Closed,
            pending: 0,
        }
    }
}
