//! Host side of the share client: argument parsing, configuration, blocking
//! transport, and printing the raw response body.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod transport;

use std::io::Write;

pub use commands::{Cli, Command};
pub use config::Settings;
pub use error::CliError;
pub use output::BodyWriter;
pub use transport::{Transport, TransportError};

/// Build, execute and print one request. Returns the HTTP status.
///
/// A response with an error status is still printed and returned as `Ok`;
/// only construction, transport and output failures are errors.
pub fn run<W: Write>(cli: &Cli, out: W) -> Result<u16, CliError> {
    let settings = Settings::from(&cli.connection);
    let client = settings.client()?;
    let request = cli.command.build_request(&client)?;
    tracing::debug!(command = cli.command.name(), ?request, "request built");

    let mut body = BodyWriter::new(out);
    let status = Transport::new(settings.timeout).execute(&request, &mut body)?;
    if !(200..300).contains(&status) {
        tracing::warn!(
            command = cli.command.name(),
            status,
            "server answered with an error status"
        );
    }

    body.finish()?;
    Ok(status)
}
