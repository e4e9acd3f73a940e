pub mod ai_service;
pub mod deck_service;
pub mod grading_service;
pub mod test_service;
