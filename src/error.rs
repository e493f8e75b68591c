use std::io;

pub const USAGE: &str = "usage: pwgen [<count> <length>]\n\n\
    with no arguments, prints 1 password of 16 characters.\n\
    count is at most 10, length is at most 256.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("expected 0 or 2 arguments, got {got}\n\n{}", USAGE)]
    Usage { got: usize },

    #[error("{name} must be a positive integer, got '{value}'")]
    NotPositiveInteger { name: &'static str, value: String },

    #[error("count must be at most {max}, got {got}")]
    CountTooLarge { max: usize, got: String },

    #[error("length must be at most {max}, got {got}")]
    LengthTooLarge { max: usize, got: String },

    #[error("secure random source {source_name} is unavailable: {source}")]
    Unavailable {
        source_name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read from secure random source {source_name}: {source}")]
    Read {
        source_name: String,
        #[source]
        source: io::Error,
    },
}
