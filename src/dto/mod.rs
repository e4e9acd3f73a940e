pub mod auth_dto;
pub mod deck_dto;
pub mod study_dto;
pub mod test_dto;
