use super::{cli_manager::logging_level_cli_arg, command::Command, common};
use anyhow::{anyhow, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use crudelp::{
    io::{DelpWriter, ResponseWriter},
    reasoner::{DelpAnswer, DelpReasoner},
};

const CMD_NAME: &str = "query";

const ARG_PRINT_TREES: &str = "PRINT_TREES";

pub(crate) struct QueryCommand;

impl QueryCommand {
    pub(crate) fn new() -> Self {
        QueryCommand
    }
}

impl<'a> Command<'a> for QueryCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Decides whether a literal is warranted by a program")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .arg(common::literal_arg(true))
            .args(&common::reasoning_args())
            .arg(
                Arg::with_name(ARG_PRINT_TREES)
                    .long("print-trees")
                    .takes_value(false)
                    .help("print the dialectical trees of the literal and its complement after the answer"),
            )
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let file = common::required_value(arg_matches, common::ARG_INPUT)?;
        let program = common::read_program(file)?;
        let literal = common::read_literal(arg_matches)?
            .ok_or_else(|| anyhow!("missing literal on the command line"))?;
        let limits = common::read_search_limits(arg_matches)?;
        let criterion = common::read_criterion_kind(arg_matches)?.to_criterion(&limits);
        let reasoner = DelpReasoner::new(criterion, limits);
        let answer = reasoner.query(&program, &literal)?;
        let writer = DelpWriter::default();
        let mut out = std::io::stdout();
        writer.write_answer(&mut out, answer)?;
        if arg_matches.is_present(ARG_PRINT_TREES) && answer != DelpAnswer::Unknown {
            let arguments = program.arguments();
            for l in [literal.clone(), literal.complement()] {
                for tree in reasoner.trees_for(&l, &arguments, &program) {
                    writer.write_tree(&mut out, &tree)?;
                }
            }
        }
        Ok(())
    }
}
