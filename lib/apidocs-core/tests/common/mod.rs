use rstest::fixture;
use tempfile::TempDir;
use tracing::info;

mod users_app;
pub use self::users_app::*;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

#[fixture]
pub fn docs_dir() -> TempDir {
    init_tracing();
    match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(error) => {
            panic!("fail to create documentation directory: {error:?}");
        }
    }
}

#[fixture]
pub fn app() -> UsersApp {
    UsersApp::with_users([(123, "Ada"), (456, "Grace")])
}
