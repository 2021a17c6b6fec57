pub mod job_hook;
