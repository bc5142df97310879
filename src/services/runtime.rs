//! Tokio Runtime Bridge
//!
//! GPUI drives its own executor, while the loader (reqwest, `tokio::time`)
//! needs a tokio reactor. Views await loader futures through this bridge:
//!
//! ```text
//! cx.spawn(async move |this, cx| ...)
//!       │
//!       ▼
//! run_in_tokio(controller.load(...))   ── runs on the shared runtime
//!       │
//!       ▼
//! this.update(cx, ...)                 ── back on the UI thread
//! ```

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Runtime};

static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn get_runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| {
        Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("roster-io")
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime")
    })
}

/// Run `future` on the shared tokio runtime and await its output
///
/// A panic inside the future resumes on the caller.
pub async fn run_in_tokio<F, T>(future: F) -> T
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    match get_runtime().spawn(future).await {
        Ok(result) => result,
        Err(e) => std::panic::resume_unwind(e.into_panic()),
    }
}
