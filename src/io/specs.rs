use crate::{
    delp::{Argument, DefeasibleLogicProgram, Literal},
    reasoner::{DelpAnswer, DialecticalTree},
};
use anyhow::Result;
use std::io::{Read, Write};

/// The type of callback functions to call when warnings are raised while parsing a program.
///
/// The first parameter is the index (starting at 1) of the line on which the warning was raised.
pub type WarningHandler = Box<dyn Fn(usize, String)>;

/// A trait implemented by objects able to read defeasible logic programs.
pub trait ProgramReader {
    /// Reads a [`DefeasibleLogicProgram`].
    ///
    /// The returned program is not grounded; see [ground](DefeasibleLogicProgram::ground).
    /// In case warnings are raised, the callback functions registered by [add_warning_handler](Self::add_warning_handler) are triggered.
    ///
    /// # Example
    ///
    /// ```
    /// # use crudelp::delp::DefeasibleLogicProgram;
    /// # use crudelp::io::{DelpReader, ProgramReader};
    /// fn read_program_from_str(s: &str) -> DefeasibleLogicProgram {
    ///     let reader = DelpReader::default();
    ///     reader.read(&mut s.as_bytes()).expect("invalid program")
    /// }
    /// # read_program_from_str("bird(tweety).");
    /// ```
    fn read(&self, reader: &mut dyn Read) -> Result<DefeasibleLogicProgram>;

    /// Reads a literal from a string.
    fn read_literal_from_str(&self, literal: &str) -> Result<Literal>;

    /// Adds a callback function to call when warnings are raised while parsing a program.
    fn add_warning_handler(&mut self, h: WarningHandler);
}

/// A trait implemented by objects that write the results of the reasoning tasks.
pub trait ResponseWriter {
    /// Writes the answer to a warrant query.
    fn write_answer(&self, writer: &mut dyn Write, answer: DelpAnswer) -> Result<()>;

    /// Writes a list of arguments.
    fn write_arguments(&self, writer: &mut dyn Write, arguments: &[Argument]) -> Result<()>;

    /// Writes a dialectical tree.
    fn write_tree(&self, writer: &mut dyn Write, tree: &DialecticalTree) -> Result<()>;
}
