//! Byte-level access to input and output locations.
//!
//! Every file the tool touches is addressed by a [`Location`], which is either
//! a local path or an HTTP(S) URL. Object-store URIs are rewritten to their
//! public HTTPS endpoints:
//!
//! | Input                    | Resolved                                   |
//! |--------------------------|--------------------------------------------|
//! | `s3://bucket/key`        | `https://bucket.s3.amazonaws.com/key`      |
//! | `gs://bucket/key`        | `https://storage.googleapis.com/bucket/key`|
//! | `https://host/key`       | unchanged                                  |
//! | anything else            | local path                                 |
//!
//! Locations ending in `.gz` are decompressed transparently on read.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use flate2::read::MultiGzDecoder;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error on {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("HTTP error fetching {location}: {source}")]
    Http {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} fetching {location}")]
    Status { location: String, status: u16 },

    #[error("Writing to remote location is not supported: {0}")]
    UnsupportedWrite(String),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// A local path or remote URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Local(PathBuf),
    Remote(String),
    /// Standard output, written as `-`
    Stdout,
}

impl Location {
    /// Parse a user-supplied path or URI
    pub fn parse(s: &str) -> Self {
        if s == "-" {
            return Self::Stdout;
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Self::Remote(s.to_string());
        }
        if let Some(rest) = s.strip_prefix("s3://") {
            let (bucket, key) = rest.split_once('/').unwrap_or((rest, ""));
            return Self::Remote(format!("https://{bucket}.s3.amazonaws.com/{key}"));
        }
        if let Some(rest) = s.strip_prefix("gs://") {
            return Self::Remote(format!("https://storage.googleapis.com/{rest}"));
        }
        Self::Local(PathBuf::from(s))
    }

    /// Append path segments, one `/`-separated component each
    #[must_use]
    pub fn join<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self {
            Self::Local(path) => {
                let mut path = path.clone();
                for segment in segments {
                    path.push(segment.as_ref());
                }
                Self::Local(path)
            }
            Self::Remote(url) => {
                let mut url = url.trim_end_matches('/').to_string();
                for segment in segments {
                    url.push('/');
                    url.push_str(segment.as_ref());
                }
                Self::Remote(url)
            }
            Self::Stdout => Self::Stdout,
        }
    }

    pub fn is_gzipped(&self) -> bool {
        match self {
            Self::Local(path) => path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("gz")),
            Self::Remote(url) => url.to_ascii_lowercase().ends_with(".gz"),
            Self::Stdout => false,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{url}"),
            Self::Stdout => write!(f, "<stdout>"),
        }
    }
}

/// Read and write access to [`Location`]s
pub trait Storage {
    /// Read the raw bytes stored at `location`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if nothing exists at the location, or
    /// another variant if the read fails.
    fn read_bytes(&self, location: &Location) -> Result<Vec<u8>, StorageError>;

    /// Open `location` for writing, truncating any existing content.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be created.
    fn create_writer(&self, location: &Location) -> Result<Box<dyn Write>, StorageError>;

    /// Read `location` as UTF-8 text, decompressing `.gz` content.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or decompression fails, or the content is
    /// not valid UTF-8.
    fn read_text(&self, location: &Location) -> Result<String, StorageError> {
        let bytes = self.read_bytes(location)?;
        let io_err = |source| StorageError::Io {
            location: location.to_string(),
            source,
        };

        if location.is_gzipped() {
            let mut text = String::new();
            MultiGzDecoder::new(bytes.as_slice())
                .read_to_string(&mut text)
                .map_err(io_err)?;
            Ok(text)
        } else {
            String::from_utf8(bytes)
                .map_err(|e| io_err(io::Error::new(io::ErrorKind::InvalidData, e)))
        }
    }
}

/// Local filesystem plus read-only HTTP(S)
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultStorage;

impl DefaultStorage {
    pub fn new() -> Self {
        Self
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, StorageError> {
        let http_err = |source| StorageError::Http {
            location: url.to_string(),
            source,
        };

        let response = reqwest::blocking::get(url).map_err(http_err)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(StorageError::Status {
                location: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().map_err(http_err)?.to_vec())
    }
}

impl Storage for DefaultStorage {
    fn read_bytes(&self, location: &Location) -> Result<Vec<u8>, StorageError> {
        debug!("Reading {location}");
        match location {
            Location::Local(path) => std::fs::read(path).map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    StorageError::NotFound(location.to_string())
                } else {
                    StorageError::Io {
                        location: location.to_string(),
                        source,
                    }
                }
            }),
            Location::Remote(url) => self.fetch(url),
            Location::Stdout => Err(StorageError::Io {
                location: location.to_string(),
                source: io::Error::new(io::ErrorKind::Unsupported, "cannot read from stdout"),
            }),
        }
    }

    fn create_writer(&self, location: &Location) -> Result<Box<dyn Write>, StorageError> {
        match location {
            Location::Local(path) => {
                let file = File::create(path).map_err(|source| StorageError::Io {
                    location: location.to_string(),
                    source,
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
            Location::Stdout => Ok(Box::new(BufWriter::new(io::stdout()))),
            Location::Remote(url) => Err(StorageError::UnsupportedWrite(url.clone())),
        }
    }
}
