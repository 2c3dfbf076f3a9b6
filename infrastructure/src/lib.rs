pub mod config;
pub mod document_loader;
pub mod embedder;
pub mod embedding_storage;
pub mod openai_client;
pub mod pdf_loader;
pub mod search;
pub mod staging;
pub mod text_splitter;
pub mod vector_index;
