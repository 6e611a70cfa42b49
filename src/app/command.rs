use anyhow::Result;
use clap::{App, ArgMatches};

/// A subcommand of the application.
///
/// Each command declares its own CLI arguments (using clap) and executes itself given the parsed values.
/// Command names must be unique.
pub(crate) trait Command<'a> {
    /// Returns the name of the command, used as the subcommand name on the command line.
    fn name(&self) -> &str;

    /// Returns the clap subcommand describing the CLI arguments of this command.
    fn clap_subcommand(&self) -> App<'a, 'a>;

    /// Executes the command given the arguments parsed by clap.
    ///
    /// The app exits with a success status code iff `Ok(())` is returned.
    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()>;
}
