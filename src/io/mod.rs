//! Objects used to read defeasible logic programs and write the results of the reasoning tasks.

mod delp_reader;
pub use delp_reader::DelpReader;

mod delp_writer;
pub use delp_writer::DelpWriter;

mod specs;
pub use specs::ProgramReader;
pub use specs::ResponseWriter;
pub use specs::WarningHandler;

mod warning_result;
