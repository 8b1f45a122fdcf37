pub mod alias;
pub mod matching;
pub mod normalizer;
pub mod pipeline;
pub mod types;

pub use matching::is_matching;
pub use normalizer::normalize;
pub use pipeline::*;
pub use types::*;

pub const TARGET_EXTRACT: &str = "extract";
