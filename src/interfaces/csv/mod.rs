pub mod fleet_reader;
pub mod report_writer;
