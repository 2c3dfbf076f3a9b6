pub mod compare_service;
pub mod qa_service;
pub mod summary_service;
pub mod vectorize_service;
