//! Expl session driver.
//!
//! Ties the stages together for a caller that already holds a parsed
//! [`Program`](expl_ir::Program):
//!
//! ```text
//! Program ──► Resolver ──► Interpreter ──► Value
//!                 │             │
//!                 └──── Problem ┴──► Diagnostic ──► rendered text
//! ```
//!
//! A [`Session`] keeps one top-level frame alive across submissions, so a
//! REPL can declare a name in one line and use it in the next.

mod problem;
mod session;

use std::sync::Once;

pub use problem::Problem;
pub use session::{Session, SessionOptions};

static TRACING: Once = Once::new();

/// Install a log subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and nothing after the first call.
/// `RUST_LOG=expl_eval=trace` shows every call; `explc=debug` every submission.
pub fn init_tracing() {
    TRACING.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(fmt::layer().with_target(true))
            .init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_tracing_is_idempotent() {
        super::init_tracing();
        super::init_tracing();
    }
}
