use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches};
use crudelp::{
    comparators::CriterionKind,
    delp::{DefeasibleLogicProgram, Literal},
    io::{DelpReader, ProgramReader},
    reasoner::SearchLimits,
};
use log::{info, warn};
use std::{
    fs::{self, File},
    io::{BufReader, Read},
    path::PathBuf,
    str::FromStr,
};
use strum::VariantNames;

pub(crate) const ARG_INPUT: &str = "INPUT";

pub(crate) fn input_args() -> Arg<'static, 'static> {
    Arg::with_name(ARG_INPUT)
        .short("f")
        .empty_values(false)
        .multiple(false)
        .help("the input file that contains the program")
        .required(true)
}

pub(crate) const ARG_LITERAL: &str = "LITERAL";

pub(crate) fn literal_arg(required: bool) -> Arg<'static, 'static> {
    Arg::with_name(ARG_LITERAL)
        .short("q")
        .empty_values(false)
        .multiple(false)
        .help("the literal of interest")
        .required(required)
}

const ARG_CRITERION: &str = "CRITERION";
const ARG_MAX_DEPTH: &str = "MAX_DEPTH";
const ARG_MAX_COMPLETIONS: &str = "MAX_COMPLETIONS";

pub(crate) fn reasoning_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name(ARG_CRITERION)
            .long("criterion")
            .empty_values(false)
            .multiple(false)
            .possible_values(CriterionKind::VARIANTS)
            .default_value(CriterionKind::GeneralizedSpecificity.into())
            .help("the criterion used to compare arguments")
            .required(false),
        Arg::with_name(ARG_MAX_DEPTH)
            .long("max-depth")
            .empty_values(false)
            .multiple(false)
            .help("the maximal depth of the dialectical trees")
            .required(false),
        Arg::with_name(ARG_MAX_COMPLETIONS)
            .long("max-completions")
            .empty_values(false)
            .multiple(false)
            .help("the maximal number of completions considered per argument when comparing arguments")
            .required(false),
    ]
}

/// Returns the value of an argument that is required by clap.
pub(crate) fn required_value<'a>(arg_matches: &'a ArgMatches<'_>, name: &str) -> Result<&'a str> {
    arg_matches
        .value_of(name)
        .ok_or_else(|| anyhow!("missing value for {}", name))
}

fn read_bound(arg_matches: &ArgMatches<'_>, name: &str) -> Result<Option<usize>> {
    arg_matches
        .value_of(name)
        .map(|v| {
            usize::from_str(v).with_context(|| format!(r#"invalid value "{}" for {}"#, v, name))
        })
        .transpose()
}

pub(crate) fn read_search_limits(arg_matches: &ArgMatches<'_>) -> Result<SearchLimits> {
    let limits = SearchLimits::default()
        .with_max_depth(read_bound(arg_matches, ARG_MAX_DEPTH)?)
        .with_max_completions(read_bound(arg_matches, ARG_MAX_COMPLETIONS)?);
    info!(
        "search limits: max depth is {:?}, max completions is {:?}",
        limits.max_depth(),
        limits.max_completions()
    );
    Ok(limits)
}

pub(crate) fn read_criterion_kind(arg_matches: &ArgMatches<'_>) -> Result<CriterionKind> {
    let str_kind = required_value(arg_matches, ARG_CRITERION)?;
    let kind = CriterionKind::from_str(str_kind)
        .with_context(|| format!(r#"unknown criterion "{}""#, str_kind))?;
    info!("comparing arguments with the {} criterion", kind.as_ref());
    Ok(kind)
}

pub(crate) fn read_literal(arg_matches: &ArgMatches<'_>) -> Result<Option<Literal>> {
    arg_matches
        .value_of(ARG_LITERAL)
        .map(|l| {
            DelpReader::default()
                .read_literal_from_str(l)
                .context("while parsing the literal passed to the command line")
        })
        .transpose()
}

/// Reads a program from a file, grounds it and checks the consistency of its strict part.
pub(crate) fn read_program(file_path: &str) -> Result<DefeasibleLogicProgram> {
    let mut reader = DelpReader::default();
    reader.add_warning_handler(Box::new(|line, msg| warn!("at line {}: {}", line, msg)));
    let program = read_file_path_with(file_path, &|r| reader.read(r))?;
    info!(
        "the program has {} fact(s), {} strict rule(s) and {} defeasible rule(s)",
        program.n_facts(),
        program.n_strict_rules(),
        program.n_defeasible_rules(),
    );
    let ground_program = program.ground();
    ground_program
        .check_strict_consistency()
        .context("while checking the program")?;
    Ok(ground_program)
}

pub(crate) fn read_file_path_with<F, R>(file_path: &str, reader: &F) -> Result<R>
where
    F: Fn(&mut dyn Read) -> Result<R>,
{
    let canonicalized = canonicalize_file_path(file_path)?;
    info!("reading input file {:?}", canonicalized);
    let mut file_reader = BufReader::new(
        File::open(&canonicalized)
            .with_context(|| format!("while opening file {:?}", canonicalized))?,
    );
    (reader)(&mut file_reader)
}

/// Canonicalize a path given by the user.
pub(crate) fn canonicalize_file_path(file_path: &str) -> Result<PathBuf> {
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}
