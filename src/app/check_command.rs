use super::{cli_manager::logging_level_cli_arg, command::Command, common};
use anyhow::Result;
use clap::{App, AppSettings, ArgMatches, SubCommand};
use log::info;

const CMD_NAME: &str = "check";

pub(crate) struct CheckCommand;

impl CheckCommand {
    pub(crate) fn new() -> Self {
        CheckCommand
    }
}

impl<'a> Command<'a> for CheckCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Checks input program files for errors")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let file = common::required_value(arg_matches, common::ARG_INPUT)?;
        let program = common::read_program(file)?;
        info!(
            "the ground program has {} strict rule(s) and {} defeasible rule(s) over {} literal(s)",
            program.n_strict_rules(),
            program.n_defeasible_rules(),
            program.literals().len()
        );
        Ok(())
    }
}
