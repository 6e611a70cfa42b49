use super::ResponseWriter;
use crate::{
    delp::Argument,
    reasoner::{DelpAnswer, DialecticalTree},
};
use anyhow::{Context, Result};
use std::io::Write;

/// A writer for the results of the reasoning tasks.
///
/// The results are written this way:
///   * warrant answers: `YES`, `NO`, `UNDECIDED` or `UNKNOWN`
///   * arguments: one argument per line, as `<{rule; rule}, conclusion>`
///   * dialectical trees: on a single line, each node being written `[argument - child, child]` (or `[argument]` for leaves)
#[derive(Default)]
pub struct DelpWriter;

impl ResponseWriter for DelpWriter {
    fn write_answer(&self, writer: &mut dyn Write, answer: DelpAnswer) -> Result<()> {
        let context = "while writing a warrant answer";
        writeln!(writer, "{}", answer).context(context)?;
        writer.flush().context(context)
    }

    fn write_arguments(&self, writer: &mut dyn Write, arguments: &[Argument]) -> Result<()> {
        let context = "while writing arguments";
        arguments
            .iter()
            .try_for_each(|arg| writeln!(writer, "{}", arg).context(context))?;
        writer.flush().context(context)
    }

    fn write_tree(&self, writer: &mut dyn Write, tree: &DialecticalTree) -> Result<()> {
        let context = "while writing a dialectical tree";
        writeln!(writer, "{}", tree).context(context)?;
        writer.flush().context(context)
    }
}
