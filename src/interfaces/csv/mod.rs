pub mod settlement_writer;
