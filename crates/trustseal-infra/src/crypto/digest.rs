//! Streaming file digests.
//!
//! Implements the `FileDigester` trait from `trustseal-core` using the
//! RustCrypto hash crates. Files are read in fixed-size chunks, each chunk
//! feeding the digest accumulator, so peak memory is one chunk regardless of
//! file size. The digest is finalized only after end-of-file; any read error
//! aborts the whole computation.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use trustseal_core::service::hash::FileDigester;
use trustseal_types::algorithm::HashAlgorithm;
use trustseal_types::config::DEFAULT_CHUNK_SIZE;
use trustseal_types::digest::HexDigest;
use trustseal_types::error::IntegrityError;

/// Digest everything `reader` yields, `chunk_size` bytes at a time.
pub fn digest_reader<R: Read>(
    reader: R,
    algorithm: HashAlgorithm,
    chunk_size: usize,
) -> std::io::Result<HexDigest> {
    match algorithm {
        HashAlgorithm::Sha256 => stream_into::<Sha256, R>(reader, chunk_size),
        HashAlgorithm::Md5 => stream_into::<Md5, R>(reader, chunk_size),
        HashAlgorithm::Sha1 => stream_into::<Sha1, R>(reader, chunk_size),
    }
}

fn stream_into<D: Digest, R: Read>(mut reader: R, chunk_size: usize) -> std::io::Result<HexDigest> {
    let mut hasher = D::new();
    let mut chunk = vec![0u8; chunk_size.max(1)];
    loop {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => hasher.update(&chunk[..n]),
            // Interrupted reads consumed nothing; issue the read again.
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(HexDigest::from_bytes(&hasher.finalize()))
}

/// Digest the file at `path` on the current thread.
///
/// The handle is closed when this returns, on success and on error alike.
pub fn digest_path_blocking(
    path: &Path,
    algorithm: HashAlgorithm,
    chunk_size: usize,
) -> Result<HexDigest, IntegrityError> {
    let file = File::open(path).map_err(|e| IntegrityError::from_io(path, e))?;
    let digest = digest_reader(file, algorithm, chunk_size).map_err(|source| IntegrityError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), %algorithm, digest = %digest.short(16), "file digested");
    Ok(digest)
}

/// `FileDigester` that streams files on tokio's blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct StreamingFileDigester {
    chunk_size: usize,
}

impl StreamingFileDigester {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Default for StreamingFileDigester {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl FileDigester for StreamingFileDigester {
    async fn digest_file(&self, path: &Path, algorithm: HashAlgorithm) -> Result<HexDigest, IntegrityError> {
        let path = path.to_path_buf();
        let chunk_size = self.chunk_size;
        tokio::task::spawn_blocking(move || digest_path_blocking(&path, algorithm, chunk_size))
            .await
            .map_err(|e| IntegrityError::Worker(e.to_string()))?
    }
}
