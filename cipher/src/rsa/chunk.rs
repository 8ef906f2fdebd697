use bignat::BigNat;

use crate::rsa::codec;
use crate::rsa::{Key, MIN_MODULUS_DIGITS};
use crate::{CipherError, Decrypt, Encrypt};

/// Marker byte appended to every chunk before encoding. It keeps the top
/// digits of the encoded number non-zero and lets decryption trim the
/// decoded bytes back to the original length without any length header.
const CHUNK_MARKER: u8 = b'a';

/// Chunked RSA over the decimal codec.
///
/// The same type serves both directions: construct it with the public key to
/// encrypt for the private holder, with the private key to decrypt (or to
/// produce a ciphertext only the public key opens).
///
/// The wire format is ASCII: the decimal digits of each chunk, every chunk
/// terminated by a single space.
pub struct ChunkCipher {
    key: Key,
}

impl ChunkCipher {
    pub fn new(key: Key) -> Result<Self, CipherError> {
        let digits = key.modulus().len();
        if digits < MIN_MODULUS_DIGITS {
            return Err(CipherError::KeyTooShort { digits });
        }
        Ok(Self { key })
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Plaintext bytes per chunk: every chunk plus its marker must encode to
    /// fewer digits than the modulus has.
    pub fn chunk_size(&self) -> usize {
        (self.key.modulus().len() - 1) / 3 - 1
    }

    pub fn encrypt_to_string(&self, msg: &[u8]) -> Result<String, CipherError> {
        let mut out = String::new();
        if msg.is_empty() {
            // an empty message still produces one marker-only chunk
            out.push_str(&self.encrypt_chunk(&[])?);
            out.push(' ');
            return Ok(out);
        }
        for chunk in msg.chunks(self.chunk_size()) {
            out.push_str(&self.encrypt_chunk(chunk)?);
            out.push(' ');
        }
        Ok(out)
    }

    /// Parses space-terminated decimal chunks and decrypts each. Trailing
    /// bytes after the last space are ignored, which is what lets the file
    /// mode cut a read buffer at a chunk boundary and rewind the rest.
    pub fn decrypt_from_str(&self, text: &str) -> Result<Vec<u8>, CipherError> {
        let mut out = Vec::new();
        let mut rest = text;
        while let Some(space) = rest.find(' ') {
            let token = &rest[..space];
            rest = &rest[space + 1..];

            let c: BigNat = token.parse().map_err(CipherError::Nat)?;
            if c >= *self.key.modulus() {
                return Err(CipherError::ChunkTooLarge);
            }
            let m = c.pow_mod(self.key.exponent(), self.key.modulus())?;
            let mut bytes = codec::decode(&m);
            match bytes.pop() {
                Some(CHUNK_MARKER) => out.extend_from_slice(&bytes),
                _ => {
                    return Err(CipherError::FileError(
                        "chunk marker missing after decryption (wrong key?)".to_string(),
                    ))
                }
            }
        }
        Ok(out)
    }

    fn encrypt_chunk(&self, chunk: &[u8]) -> Result<String, CipherError> {
        debug_assert!(chunk.len() <= self.chunk_size());
        let mut block = Vec::with_capacity(chunk.len() + 1);
        block.extend_from_slice(chunk);
        block.push(CHUNK_MARKER);

        let m = codec::encode(&block);
        if m >= *self.key.modulus() {
            return Err(CipherError::ChunkTooLarge);
        }
        let c = m.pow_mod(self.key.exponent(), self.key.modulus())?;
        Ok(c.to_string())
    }
}

impl Encrypt for ChunkCipher {
    fn encrypt(&self, plaintext: &[u8], ciphertext: &mut Vec<u8>) -> Result<(), CipherError> {
        ciphertext.extend_from_slice(self.encrypt_to_string(plaintext)?.as_bytes());
        Ok(())
    }
}

impl Decrypt for ChunkCipher {
    fn decrypt(&self, ciphertext: &[u8], plaintext: &mut Vec<u8>) -> Result<(), CipherError> {
        let text = std::str::from_utf8(ciphertext)
            .map_err(|_| CipherError::FileError("ciphertext is not ASCII decimal".to_string()))?;
        plaintext.extend_from_slice(&self.decrypt_from_str(text)?);
        Ok(())
    }
}
