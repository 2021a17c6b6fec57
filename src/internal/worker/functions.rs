pub mod fetch_segment;
pub mod merge_segment;
pub mod scratch_file;
