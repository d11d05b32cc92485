//! Command handlers, one per subcommand.

pub mod callback;
pub mod serve;
pub mod subscriptions;

pub use callback::CallbackCommandHandler;
pub use serve::ServeCommandHandler;
pub use subscriptions::SubscriptionCommandHandler;

use std::io::Write;

use serde::Serialize;

/// Writes `value` as pretty JSON followed by a newline.
fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
