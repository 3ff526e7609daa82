//! HTTP front of the room-detection pipeline: multipart image upload in,
//! JSON detection report plus stored run artifacts out. Inference and
//! artifact storage stay behind trait seams ([`inference::InferenceClient`],
//! [`store::ArtifactStore`]).

pub mod config;
pub mod inference;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod store;
