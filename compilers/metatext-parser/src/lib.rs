pub mod token;
pub mod tokenize;
pub mod trim;
pub mod script;

pub use token::{Span, Token};
pub use tokenize::{tokenize, words};
pub use trim::{join_and_trim, trim_punctuation};
pub use script::{parse_script, ScriptError, TimedEvent};
