//! FileDigester trait for computing file fingerprints.
//!
//! Defined in trustseal-core so services can hash files without coupling to
//! a specific hashing crate or I/O strategy. The streaming RustCrypto adapter
//! lives in trustseal-infra.

use std::path::Path;

use trustseal_types::algorithm::HashAlgorithm;
use trustseal_types::digest::HexDigest;
use trustseal_types::error::IntegrityError;

/// Abstraction over file digest computation.
///
/// Implementations must read the file incrementally, never return a partial
/// digest, and release the file handle on every exit path.
pub trait FileDigester: Send + Sync {
    /// Compute the digest of the file at `path`.
    ///
    /// Fails with `FileNotFound` if the path does not exist at call time and
    /// with `Io` on any read failure.
    fn digest_file(
        &self,
        path: &Path,
        algorithm: HashAlgorithm,
    ) -> impl std::future::Future<Output = Result<HexDigest, IntegrityError>> + Send;
}
