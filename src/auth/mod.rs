//! Request authentication for the Fordefi API
//!
//! Transaction endpoints require every request to be signed with the ECDSA
//! P-256 key registered alongside the API Signer. The cloud service checks
//! the signature against `path|timestamp|body` before the MPC signer will
//! touch the transaction.

pub mod key;
pub mod signer;

pub use key::load_signing_key;
pub use signer::RequestSigner;
