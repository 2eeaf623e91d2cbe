pub mod trip_reader;
