pub mod analytics_service;
pub mod completion_sweeper;
pub mod export_service;
pub mod grading_service;
pub mod notification_service;
pub mod quiz_service;
pub mod scheduler;
pub mod transcript_service;
pub mod weekly_aggregator;
