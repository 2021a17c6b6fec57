pub mod aggregate_events;
pub mod prepare_target;
