pub mod blob;
pub mod transcript;

pub use blob::BlobStore;
pub use transcript::TranscriptStore;
