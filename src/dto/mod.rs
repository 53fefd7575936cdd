pub mod analytics_dto;
pub mod quiz_dto;
pub mod result_dto;
