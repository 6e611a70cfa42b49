use super::{app_helper::init_logger_with_level, command::Command};
use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches};
use log::{info, LevelFilter};
use std::{ffi::OsString, str::FromStr};
use sysinfo::System;

const ARG_LOGGING_LEVEL: &str = "LOGGING_LEVEL";

/// The CLI argument used to set the logging level; it must be added to each subcommand.
pub(crate) fn logging_level_cli_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_LOGGING_LEVEL)
        .long("logging-level")
        .multiple(false)
        .default_value("info")
        .possible_values(&["trace", "debug", "info", "warn", "error", "off"])
        .help("set the minimal logging level")
}

pub(crate) struct CliManager<'a> {
    app_name: &'a str,
    version: &'a str,
    authors: &'a str,
    about: &'a str,
    commands: Vec<Box<dyn Command<'a>>>,
}

impl<'a> CliManager<'a> {
    pub(crate) fn new(app_name: &'a str, version: &'a str, authors: &'a str, about: &'a str) -> Self {
        CliManager {
            app_name,
            version,
            authors,
            about,
            commands: vec![],
        }
    }

    pub(crate) fn add_command(&mut self, command: Box<dyn Command<'a>>) {
        self.commands.push(command);
    }

    fn clap_app(&self) -> App<'a, 'a> {
        let mut app = App::new(self.app_name)
            .global_setting(AppSettings::DisableVersion)
            .global_setting(AppSettings::VersionlessSubcommands)
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .version(self.version)
            .author(self.authors)
            .about(self.about);
        for c in self.commands.iter() {
            app = app.subcommand(c.clap_subcommand());
        }
        app
    }

    pub(crate) fn parse_cli<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match self.clap_app().get_matches_from_safe(args) {
            Ok(matches) => self.execute_subcommand(&matches),
            Err(clap::Error {
                kind: clap::ErrorKind::HelpDisplayed,
                message,
                ..
            }) => {
                init_logger_with_level(LevelFilter::Info);
                message.split('\n').for_each(|s| info!("{}", s));
                Ok(())
            }
            Err(e) => {
                init_logger_with_level(LevelFilter::Info);
                info!("{} {}", self.app_name, self.version);
                Err(anyhow!("{}", e.message))
            }
        }
    }

    fn execute_subcommand(&self, matches: &ArgMatches<'_>) -> Result<()> {
        let (name, subcommand_matches) = match matches.subcommand() {
            (name, Some(m)) => (name, m),
            (_, None) => return Err(anyhow!("missing subcommand")),
        };
        let command = self
            .commands
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| anyhow!("unknown subcommand {}", name))?;
        let level = match subcommand_matches.value_of(ARG_LOGGING_LEVEL) {
            Some(l) => LevelFilter::from_str(l).context("while reading the logging level")?,
            None => LevelFilter::Info,
        };
        init_logger_with_level(level);
        info!("{} {}", self.app_name, self.version);
        sys_info();
        command.execute(subcommand_matches)
    }
}

fn sys_info() {
    info!("----------------------------------------");
    let sys = System::new_all();
    let unknown = || "[unknown]".to_string();
    info!("running on {}", System::host_name().unwrap_or_else(unknown));
    info!(
        "OS is {} {} with kernel {}",
        System::name().unwrap_or_else(unknown),
        System::os_version().unwrap_or_else(unknown),
        System::kernel_version().unwrap_or_else(unknown)
    );
    let mut cpu_kinds = sys.cpus().iter().map(|c| c.brand()).collect::<Vec<&str>>();
    cpu_kinds.sort_unstable();
    cpu_kinds.dedup();
    info!("{} logical CPU(s) {:?}", sys.cpus().len(), cpu_kinds);
    info!("total memory: {} bytes", sys.total_memory());
    info!("----------------------------------------");
}
