mod engine;
mod tokenizer;

pub(crate) use engine::*;
pub(crate) use tokenizer::*;
