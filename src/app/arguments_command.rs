use super::{cli_manager::logging_level_cli_arg, command::Command, common};
use anyhow::Result;
use clap::{App, AppSettings, ArgMatches, SubCommand};
use crudelp::io::{DelpWriter, ResponseWriter};
use log::info;

const CMD_NAME: &str = "arguments";

pub(crate) struct ArgumentsCommand;

impl ArgumentsCommand {
    pub(crate) fn new() -> Self {
        ArgumentsCommand
    }
}

impl<'a> Command<'a> for ArgumentsCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Lists the arguments of a program, optionally restricted to the ones concluding a literal")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .arg(common::literal_arg(false))
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let file = common::required_value(arg_matches, common::ARG_INPUT)?;
        let program = common::read_program(file)?;
        let arguments = match common::read_literal(arg_matches)? {
            Some(l) => program.arguments_for(&l),
            None => program.arguments(),
        };
        info!("found {} argument(s)", arguments.len());
        let mut out = std::io::stdout();
        DelpWriter::default().write_arguments(&mut out, &arguments)
    }
}
