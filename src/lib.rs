//! Privacy primitives for blockchain-style value transfer.
//!
//! Three independent layers, each buildable on the one below:
//!
//! - [`curve`]: secp256k1 scalar and point arithmetic.
//! - [`commitment`]: additively-homomorphic Pedersen commitments over the
//!   curve layer, for hiding transfer amounts while still proving balance
//!   conservation.
//! - [`stealth`]: EIP-5564-style one-time addresses derived from a
//!   recipient's reusable meta-address.
//! - [`viewing_key`]: symmetric viewing keys for selective disclosure via
//!   XChaCha20-Poly1305.
//!
//! Chain-family cost heuristics, on-chain scanning infrastructure, key
//! storage/HSM integration, and post-quantum replacements are out of scope;
//! see each module's docs for the boundary of what it actually does.

pub mod commitment;
pub mod curve;
pub mod error;
pub mod hash;
pub mod stealth;
pub mod types;
pub mod viewing_key;

pub use commitment::{
    add_blindings, add_commitments, commit, commit_zero, get_generators, subtract_blindings,
    subtract_commitments, verify_opening, Generators, PedersenCommitment,
};
pub use error::{SipError, SipResult};
pub use stealth::{
    check_stealth_address, decode_stealth_meta_address, derive_stealth_private_key,
    encode_stealth_meta_address, generate_stealth_address, generate_stealth_meta_address,
    public_key_to_eth_address, StealthAddress, StealthAddressRecovery, StealthMetaAddress,
};
pub use types::{ChainId, HexString};
pub use viewing_key::{
    decrypt_with_viewing_key, derive_viewing_key_hash, encrypt_for_viewing_key,
    generate_viewing_key, should_encrypt, should_include_viewing_key, validate_privacy_level,
    EncryptedPayload, PrivacyLevel, ViewingKey,
};
