//! HTTP surface for the task list.
//!
//! # Responsibility
//! - Map the five task routes onto `tasklist_core` use-cases.
//! - Carry flash messages across redirects and render the list page.
//!
//! # Invariants
//! - Handlers never touch storage directly; all access goes through
//!   [`AppState::run`].
//! - Storage failures become `500`; domain failures become flash messages.

pub mod error;
pub mod flash;
pub mod render;
pub mod routes;
pub mod state;

pub use error::{WebError, WebResult};
pub use routes::router;
pub use state::AppState;

use log::info;
use tokio::net::TcpListener;

/// Serves the task list on an already-bound listener until the server stops.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let local_addr = listener.local_addr()?;
    info!("event=server_start module=web status=ok addr=http://{local_addr}");
    axum::serve(listener, router(state)).await
}
