//! HTTP-shaped values at the edges of the write path
//!
//! Transport is out of scope; these types carry exactly the request headers
//! the pipeline consumes and the response contract it produces.

mod digest;
mod etag;
mod headers;
mod request;
mod response;

pub use digest::{Digest, DigestAlgorithm};
pub use etag::{build_etag_hash, EntityTag, EntityTagList};
pub use headers::{Link, Prefer};
pub use request::{LdpRequest, Preconditions, ACL_EXTENSION};
pub use response::{LdpResponse, Status};
