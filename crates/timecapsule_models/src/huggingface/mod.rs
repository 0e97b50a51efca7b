//! Hugging Face text-generation integration.

mod driver;
mod dto;

pub use driver::HuggingFaceGenerator;
pub use dto::{
    HuggingFaceParameters, HuggingFaceParametersBuilder, HuggingFaceRequest, HuggingFaceResponse,
    parse_generated_text,
};
