//! Output document adapters.

mod file_output_writer;

pub use file_output_writer::FileOutputWriter;
