pub mod last_result;
