//! Identity management and transaction signing.
//!
//! # Security
//! - Secret seeds are loaded ONLY from environment variables
//! - Keys are never logged or serialized

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use ed25519_dalek::{Signer, SigningKey};
use sha3::{Digest, Sha3_256};
use std::fmt;

use crate::blockchain::types::{BlockchainError, BlockchainResult, SuiAddress};

/// Environment variable holding the admin seed.
pub const ADMIN_SEED_ENV_VAR: &str = "ADMIN_KEY_PAIR_SEED";
/// Environment variable holding the merchant seed.
pub const MERCHANT_SEED_ENV_VAR: &str = "MERCHANT_KEY_PAIR_SEED";
/// Environment variable holding the user seed.
pub const USER_SEED_ENV_VAR: &str = "USER_KEY_PAIR_SEED";

/// Signature scheme flag for Ed25519.
const ED25519_FLAG: u8 = 0x00;

/// Domain prefix prepended to transaction bytes before signing.
const TRANSACTION_DATA_DOMAIN: &[u8] = b"TransactionData::";

/// The three actors of the coffee NFT flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Role {
    Admin,
    Merchant,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Merchant => "merchant",
            Role::User => "user",
        }
    }

    pub fn env_var(&self) -> &'static str {
        match self {
            Role::Admin => ADMIN_SEED_ENV_VAR,
            Role::Merchant => MERCHANT_SEED_ENV_VAR,
            Role::User => USER_SEED_ENV_VAR,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An Ed25519 keypair and the Sui address derived from it.
#[derive(Clone)]
pub struct Identity {
    role: Role,
    signing_key: SigningKey,
    address: SuiAddress,
}

impl Identity {
    /// Create an identity from hex-encoded secret material.
    ///
    /// Accepts a 32-byte seed, or 64 bytes of seed followed by the public key.
    /// In the 64-byte form the public half must match the seed.
    pub fn from_hex_seed(role: Role, secret_hex: &str) -> BlockchainResult<Self> {
        let secret_hex = secret_hex.trim();
        let raw = secret_hex.strip_prefix("0x").unwrap_or(secret_hex);
        let bytes = hex::decode(raw)
            .map_err(|e| BlockchainError::Wallet(format!("Invalid {} seed hex: {}", role, e)))?;

        let signing_key = match bytes.len() {
            32 => {
                let mut seed = [0u8; 32];
                seed.copy_from_slice(&bytes);
                SigningKey::from_bytes(&seed)
            }
            64 => {
                let mut keypair = [0u8; 64];
                keypair.copy_from_slice(&bytes);
                SigningKey::from_keypair_bytes(&keypair).map_err(|e| {
                    BlockchainError::Wallet(format!("Invalid {} keypair: {}", role, e))
                })?
            }
            n => {
                return Err(BlockchainError::Wallet(format!(
                    "Invalid {} seed length: expected 32 or 64 bytes, got {}",
                    role, n
                )))
            }
        };

        let address = derive_address(&signing_key.verifying_key().to_bytes());

        tracing::debug!(role = %role, address = %address, "Identity loaded");

        Ok(Self {
            role,
            signing_key,
            address,
        })
    }

    /// Load identity from its environment variable.
    pub fn from_env(role: Role) -> BlockchainResult<Self> {
        Self::from_lookup(role, |var| std::env::var(var).ok())
    }

    /// Load identity using `lookup` for environment values.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(role: Role, lookup: F) -> BlockchainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = role.env_var();
        let secret = lookup(var)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| BlockchainError::Wallet(format!("Environment variable {} not set", var)))?;
        Self::from_hex_seed(role, &secret)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn address(&self) -> SuiAddress {
        self.address
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Sign base64 transaction bytes returned by the node.
    ///
    /// Returns the serialized signature: flag ‖ signature ‖ public key, base64-encoded.
    pub fn sign_transaction(&self, tx_bytes_b64: &str) -> BlockchainResult<String> {
        let tx_bytes = BASE64_STANDARD
            .decode(tx_bytes_b64)
            .map_err(|e| BlockchainError::Decode(format!("Invalid txBytes base64: {}", e)))?;

        let mut message = Vec::with_capacity(TRANSACTION_DATA_DOMAIN.len() + tx_bytes.len());
        message.extend_from_slice(TRANSACTION_DATA_DOMAIN);
        message.extend_from_slice(&tx_bytes);

        let signature = self.signing_key.sign(&message);

        let mut serialized = Vec::with_capacity(1 + 64 + 32);
        serialized.push(ED25519_FLAG);
        serialized.extend_from_slice(&signature.to_bytes());
        serialized.extend_from_slice(&self.public_key_bytes());

        Ok(BASE64_STANDARD.encode(serialized))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("role", &self.role)
            .field("address", &self.address)
            .finish()
    }
}

/// Derive a Sui address: first 20 bytes of SHA3-256(flag ‖ public key).
pub fn derive_address(public_key: &[u8; 32]) -> SuiAddress {
    let mut hasher = Sha3_256::new();
    hasher.update([ED25519_FLAG]);
    hasher.update(public_key);
    let digest = hasher.finalize();

    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[..20]);
    SuiAddress(address)
}

/// Admin, merchant and user identities, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Identities {
    pub admin: Identity,
    pub merchant: Identity,
    pub user: Identity,
}

impl Identities {
    /// Load all three identities from the environment.
    pub fn from_env() -> BlockchainResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load all three identities using `lookup` for environment values.
    pub fn from_lookup<F>(lookup: F) -> BlockchainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            admin: Identity::from_lookup(Role::Admin, &lookup)?,
            merchant: Identity::from_lookup(Role::Merchant, &lookup)?,
            user: Identity::from_lookup(Role::User, &lookup)?,
        })
    }

    pub fn get(&self, role: Role) -> &Identity {
        match role {
            Role::Admin => &self.admin,
            Role::Merchant => &self.merchant,
            Role::User => &self.user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signature, Verifier};
    use std::collections::HashMap;

    const TEST_SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
    // Public key of TEST_SEED (RFC 8032 test vector 1).
    const TEST_PUBLIC: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";

    #[test]
    fn test_identity_from_seed() {
        let identity = Identity::from_hex_seed(Role::Admin, TEST_SEED).unwrap();
        assert_eq!(hex::encode(identity.public_key_bytes()), TEST_PUBLIC);
        assert_eq!(identity.role(), Role::Admin);
    }

    #[test]
    fn test_seed_forms_agree() {
        let short = Identity::from_hex_seed(Role::User, TEST_SEED).unwrap();
        let prefixed = Identity::from_hex_seed(Role::User, &format!("0x{}", TEST_SEED)).unwrap();
        let long =
            Identity::from_hex_seed(Role::User, &format!("{}{}", TEST_SEED, TEST_PUBLIC)).unwrap();
        assert_eq!(short.address(), prefixed.address());
        assert_eq!(short.address(), long.address());
    }

    #[test]
    fn test_mismatched_public_half_rejected() {
        let bogus = format!("{}{}", TEST_SEED, "00".repeat(32));
        let result = Identity::from_hex_seed(Role::Merchant, &bogus);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_seed() {
        let err = Identity::from_hex_seed(Role::Admin, "not-hex").unwrap_err();
        assert!(err.to_string().contains("admin seed hex"));

        let err = Identity::from_hex_seed(Role::Admin, "abcd").unwrap_err();
        assert!(err.to_string().contains("got 2"));
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_unset_seed_names_variable() {
        let err = Identity::from_lookup(Role::User, env(&[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Wallet error: Environment variable USER_KEY_PAIR_SEED not set"
        );
    }

    #[test]
    fn test_blank_seed_counts_as_unset() {
        for blank in ["", "   "] {
            let err =
                Identity::from_lookup(Role::User, env(&[(USER_SEED_ENV_VAR, blank)])).unwrap_err();
            assert!(err.to_string().contains("USER_KEY_PAIR_SEED not set"));
        }
    }

    #[test]
    fn test_identities_from_lookup() {
        let merchant = "02".repeat(32);
        let user = "03".repeat(32);

        let err = Identities::from_lookup(env(&[
            (ADMIN_SEED_ENV_VAR, TEST_SEED),
            (MERCHANT_SEED_ENV_VAR, merchant.as_str()),
            (USER_SEED_ENV_VAR, ""),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("USER_KEY_PAIR_SEED"));

        let identities = Identities::from_lookup(env(&[
            (ADMIN_SEED_ENV_VAR, TEST_SEED),
            (MERCHANT_SEED_ENV_VAR, merchant.as_str()),
            (USER_SEED_ENV_VAR, user.as_str()),
        ]))
        .unwrap();
        assert_eq!(
            hex::encode(identities.get(Role::Admin).public_key_bytes()),
            TEST_PUBLIC
        );
    }

    #[test]
    fn test_address_derivation_is_deterministic() {
        let public: [u8; 32] = hex::decode(TEST_PUBLIC).unwrap().try_into().unwrap();
        let a = derive_address(&public);
        let b = derive_address(&public);
        assert_eq!(a, b);

        let mut hasher = Sha3_256::new();
        hasher.update([0u8]);
        hasher.update(public);
        let digest = hasher.finalize();
        assert_eq!(a.0[..], digest[..20]);
    }

    #[test]
    fn test_sign_transaction_layout() {
        let identity = Identity::from_hex_seed(Role::Admin, TEST_SEED).unwrap();
        let tx_bytes = b"fake transaction bytes";
        let serialized = identity
            .sign_transaction(&BASE64_STANDARD.encode(tx_bytes))
            .unwrap();

        let raw = BASE64_STANDARD.decode(serialized).unwrap();
        assert_eq!(raw.len(), 97);
        assert_eq!(raw[0], ED25519_FLAG);
        assert_eq!(&raw[65..], &identity.public_key_bytes()[..]);

        let signature = Signature::from_slice(&raw[1..65]).unwrap();
        let mut message = TRANSACTION_DATA_DOMAIN.to_vec();
        message.extend_from_slice(tx_bytes);
        assert!(identity
            .signing_key
            .verifying_key()
            .verify(&message, &signature)
            .is_ok());
    }

    #[test]
    fn test_debug_hides_secret() {
        let identity = Identity::from_hex_seed(Role::Admin, TEST_SEED).unwrap();
        let rendered = format!("{:?}", identity);
        assert!(!rendered.contains(TEST_SEED));
        assert!(rendered.contains("address"));
    }
}
