//! Intent parser adapters

mod keyword_parser;

pub use keyword_parser::KeywordIntentParser;
