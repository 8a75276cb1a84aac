//! Key custody and the sealed wallet file.
//!
//! A wallet file is a small JSON document: the account address, the
//! compressed public key, and the private scalar sealed with a passphrase
//! (scrypt key derivation, AES-256-CBC). The open session keeps the
//! signing key in memory and acts as the console's identity collaborator.

use std::fs;
use std::path::Path;

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use anyhow::{anyhow, bail, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use rand::RngCore;
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::env::{Custodian, SecureStore};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

const ADDRESS_VERSION: u8 = 0x00;
const SALT_LEN: usize = 16;
const IV_LEN: usize = 16;

// Interactive-use scrypt cost.
const SCRYPT_LOG_N: u8 = 14;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// Passphrase sealing with scrypt + AES-256-CBC. The sealed blob is
/// `salt || iv || ciphertext`.
pub struct ScryptAesStore;

impl SecureStore for ScryptAesStore {
    fn seal(&self, passphrase: &str, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut salt = [0u8; SALT_LEN];
        let mut iv = [0u8; IV_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        rand::thread_rng().fill_bytes(&mut iv);

        let key = derive_key(passphrase, &salt)?;
        let cipher = Aes256CbcEnc::new_from_slices(key.as_slice(), &iv)
            .map_err(|_| anyhow!("bad cipher parameters"))?;
        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        let mut sealed = Vec::with_capacity(SALT_LEN + IV_LEN + ciphertext.len());
        sealed.extend_from_slice(&salt);
        sealed.extend_from_slice(&iv);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    fn open(&self, passphrase: &str, sealed: &[u8]) -> Result<Vec<u8>> {
        if sealed.len() < SALT_LEN + IV_LEN {
            bail!("sealed blob is too short");
        }
        let (salt, rest) = sealed.split_at(SALT_LEN);
        let (iv, ciphertext) = rest.split_at(IV_LEN);
        let key = derive_key(passphrase, salt)?;
        let cipher = Aes256CbcDec::new_from_slices(key.as_slice(), iv)
            .map_err(|_| anyhow!("bad cipher parameters"))?;
        cipher
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| anyhow!("wrong passphrase or corrupted wallet"))
    }
}

fn derive_key(passphrase: &str, salt: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let params = scrypt::Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, 32)
        .map_err(|_| anyhow!("invalid scrypt parameters"))?;
    let mut key = Zeroizing::new(vec![0u8; 32]);
    scrypt::scrypt(passphrase.as_bytes(), salt, &params, key.as_mut_slice())
        .map_err(|_| anyhow!("key derivation failed"))?;
    Ok(key)
}

/// On-disk wallet format.
#[derive(Debug, Serialize, Deserialize)]
struct WalletFile {
    version: u32,
    address: String,
    public_key: String,
    sealed_key: String,
}

/// An open wallet: the in-memory signing key and its derived address.
pub struct WalletSession {
    address: String,
    signing_key: SigningKey,
}

impl WalletSession {
    /// Generates a fresh key pair and writes the sealed wallet file.
    pub fn create(path: &Path, passphrase: &str) -> Result<Self> {
        if path.exists() {
            bail!("wallet file already exists: {}", path.display());
        }
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        let session = Self::from_key(signing_key);
        session.persist(path, passphrase)?;
        Ok(session)
    }

    /// Opens an existing wallet file, unsealing the key with `passphrase`.
    pub fn open(path: &Path, passphrase: &str) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("cannot read wallet file: {}", path.display()))?;
        let file: WalletFile =
            serde_json::from_str(&json).map_err(|_| anyhow!("invalid wallet file"))?;
        let sealed = BASE64
            .decode(&file.sealed_key)
            .map_err(|_| anyhow!("invalid wallet file"))?;
        let key_bytes = Zeroizing::new(ScryptAesStore.open(passphrase, &sealed)?);
        let signing_key =
            SigningKey::from_slice(&key_bytes).map_err(|_| anyhow!("corrupted wallet key"))?;
        let session = Self::from_key(signing_key);
        if session.address != file.address {
            bail!("wallet address mismatch");
        }
        Ok(session)
    }

    fn from_key(signing_key: SigningKey) -> Self {
        let address = address_from_key(signing_key.verifying_key());
        Self {
            address,
            signing_key,
        }
    }

    fn persist(&self, path: &Path, passphrase: &str) -> Result<()> {
        let key_bytes = Zeroizing::new(self.signing_key.to_bytes().to_vec());
        let sealed = ScryptAesStore.seal(passphrase, &key_bytes)?;
        let file = WalletFile {
            version: 1,
            address: self.address.clone(),
            public_key: hex::encode(
                self.signing_key
                    .verifying_key()
                    .to_encoded_point(true)
                    .as_bytes(),
            ),
            sealed_key: BASE64.encode(sealed),
        };
        let json = serde_json::to_string_pretty(&file).context("wallet serialization failed")?;
        fs::write(path, json)
            .with_context(|| format!("cannot write wallet file: {}", path.display()))?;
        Ok(())
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl Custodian for WalletSession {
    fn identity(&self) -> Option<String> {
        Some(self.address.clone())
    }

    fn sign(&self, digest: &[u8; 32]) -> Result<Vec<u8>> {
        let signature: Signature = self
            .signing_key
            .sign_prehash(digest)
            .map_err(|_| anyhow!("signing failed"))?;
        Ok(signature.to_bytes().to_vec())
    }
}

/// Base58check over the hashed compressed public key. Version byte zero
/// keeps addresses starting with `1`.
pub fn address_from_key(key: &VerifyingKey) -> String {
    let compressed = key.to_encoded_point(true);
    let hash = Ripemd160::digest(Sha256::digest(compressed.as_bytes()));
    let mut payload = Vec::with_capacity(25);
    payload.push(ADDRESS_VERSION);
    payload.extend_from_slice(&hash);
    let checksum = Sha256::digest(Sha256::digest(&payload));
    payload.extend_from_slice(&checksum[..4]);
    bs58::encode(payload).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SecureStore;

    #[test]
    fn seal_open_round_trip() {
        let store = ScryptAesStore;
        let sealed = store.seal("hunter2", b"secret bytes").unwrap();
        assert_eq!(store.open("hunter2", &sealed).unwrap(), b"secret bytes");
    }

    #[test]
    fn wrong_passphrase_is_rejected() {
        let store = ScryptAesStore;
        let sealed = store.seal("hunter2", b"secret bytes").unwrap();
        assert!(store.open("letmein", &sealed).is_err());
    }

    #[test]
    fn sealing_is_salted() {
        let store = ScryptAesStore;
        let one = store.seal("pw", b"data").unwrap();
        let two = store.seal("pw", b"data").unwrap();
        assert_ne!(one, two);
    }

    #[test]
    fn addresses_are_base58check_with_leading_one() {
        let key = SigningKey::random(&mut rand::thread_rng());
        let address = address_from_key(key.verifying_key());
        assert!(address.starts_with('1'));
        let decoded = bs58::decode(&address).into_vec().unwrap();
        assert_eq!(decoded.len(), 25);
        let checksum = Sha256::digest(Sha256::digest(&decoded[..21]));
        assert_eq!(&decoded[21..], &checksum[..4]);
    }

    #[test]
    fn create_then_open_recovers_the_same_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w.json");
        let created = WalletSession::create(&path, "pw").unwrap();
        let opened = WalletSession::open(&path, "pw").unwrap();
        assert_eq!(created.address(), opened.address());
        assert!(WalletSession::open(&path, "wrong").is_err());
    }

    #[test]
    fn create_refuses_to_clobber() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w.json");
        WalletSession::create(&path, "pw").unwrap();
        assert!(WalletSession::create(&path, "pw").is_err());
    }
}
