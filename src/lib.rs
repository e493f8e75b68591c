use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::io::{self, Write};
use std::path::PathBuf;

mod entropy;
mod error;

pub use entropy::{DeviceEntropy, EntropySource, OsEntropy};
pub use error::{Error, USAGE};

/// Every printable, non-space ascii character except backslash.
pub const ALPHABET: &[u8; 93] = b"0123456789\
    ABCDEFGHIJKLMNOPQRSTUVWXYZ\
    abcdefghijklmnopqrstuvwxyz\
    !\"#$%&'()*+,-./:;<=>?@[]^_`{|}~";

/// raw bytes requested per character still missing
pub const OVERSAMPLE: usize = 4;

#[derive(Parser, Debug)]
#[clap(about = "pwgen: random passwords straight from the os entropy source")]
pub struct Args {
    /// <count> <length>: how many passwords (max 10)
    /// and how long each one is (max 256).
    ///
    /// default is 1 password of 16 characters
    #[clap(value_name = "COUNT LENGTH", allow_negative_numbers = true)]
    values: Vec<String>,

    /// read random bytes from this device
    /// (e.g. /dev/urandom) instead of the os rng
    #[clap(long)]
    device: Option<PathBuf>,

    /// silent mode
    #[clap(long)]
    pub silent: bool,

    /// debug
    #[clap(long)]
    pub debug: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub count: usize,
    pub length: usize,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            count: 1,
            length: 16,
        }
    }
}

impl Params {
    pub const MAX_COUNT: usize = 10;
    pub const MAX_LENGTH: usize = 256;

    pub fn from_args<S: AsRef<str>>(values: &[S]) -> Result<Self, Error> {
        let (count, length) = match values {
            [] => return Ok(Params::default()),
            [count, length] => (count.as_ref(), length.as_ref()),
            _ => return Err(Error::Usage { got: values.len() }),
        };
        let parsed_count = parse_positive("count", count)?;
        let parsed_length = parse_positive("length", length)?;
        let count = match parsed_count {
            Some(n) if n <= Self::MAX_COUNT => n,
            _ => {
                return Err(Error::CountTooLarge {
                    max: Self::MAX_COUNT,
                    got: count.to_string(),
                })
            }
        };
        let length = match parsed_length {
            Some(n) if n <= Self::MAX_LENGTH => n,
            _ => {
                return Err(Error::LengthTooLarge {
                    max: Self::MAX_LENGTH,
                    got: length.to_string(),
                })
            }
        };
        Ok(Params { count, length })
    }
}

/// Accepts only a bare run of ascii digits with a value of at least 1.
/// `Ok(None)` means the literal is valid but overflows usize.
fn parse_positive(name: &'static str, raw: &str) -> Result<Option<usize>, Error> {
    let not_positive = || Error::NotPositiveInteger {
        name,
        value: raw.to_string(),
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_positive());
    }
    if raw.bytes().all(|b| b == b'0') {
        return Err(not_positive());
    }
    Ok(raw.parse::<usize>().ok())
}

/// Keeps the bytes that are alphabet characters, in order.
pub fn filter(raw: &[u8]) -> impl Iterator<Item = u8> + '_ {
    raw.iter().copied().filter(|b| ALPHABET.contains(b))
}

#[derive(Debug)]
pub struct PasswordGenerator<S> {
    source: S,
}

impl<S: EntropySource> PasswordGenerator<S> {
    pub fn new(source: S) -> Self {
        PasswordGenerator { source }
    }

    /// Reads and filters until `length` characters have survived.
    /// Loops for as long as the source yields nothing usable.
    pub fn generate(&mut self, length: usize) -> Result<String, Error> {
        let mut acc: Vec<u8> = Vec::with_capacity(length);
        let mut reads = 0usize;
        while acc.len() < length {
            let mut raw = vec![0u8; (length - acc.len()) * OVERSAMPLE];
            self.source.fill(&mut raw)?;
            reads += 1;
            let before = acc.len();
            acc.extend(filter(&raw));
            debug!(
                "read {} bytes, {} survived ({}/{})",
                raw.len(),
                acc.len() - before,
                acc.len().min(length),
                length
            );
        }
        acc.truncate(length);
        debug!("password complete after {} reads", reads);
        Ok(acc.into_iter().map(char::from).collect())
    }

    /// Writes `count` passwords to `out`, one per line, each as soon as
    /// it is done.
    pub fn emit<W: Write>(&mut self, params: Params, out: &mut W) -> Result<()> {
        for i in 0..params.count {
            let password = self.generate(params.length)?;
            writeln!(out, "{password}").context("failed to write password")?;
            out.flush().context("failed to write password")?;
            info!("generated password {} of {}", i + 1, params.count);
        }
        Ok(())
    }
}

pub fn run(args: Args) -> Result<()> {
    let params = Params::from_args(args.values.as_slice())?;
    debug!("count={} length={}", params.count, params.length);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &args.device {
        Some(path) => PasswordGenerator::new(DeviceEntropy::open(path)?).emit(params, &mut out),
        None => PasswordGenerator::new(OsEntropy::new()?).emit(params, &mut out),
    }
}
