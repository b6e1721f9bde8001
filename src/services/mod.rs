pub mod ai_service;
pub mod extract_service;
pub mod parse_service;
pub mod upload_service;
