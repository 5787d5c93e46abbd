pub mod embed_docs;
pub mod home;
pub mod not_found;

pub use embed_docs::EmbedDocsPage;
pub use home::HomePage;
pub use not_found::NotFound;
