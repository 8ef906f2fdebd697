//! File encryption and decryption over [`ChunkCipher`].
//!
//! Encryption reads the source in fixed buffers and appends each buffer's
//! chunked ciphertext. Decryption reads a larger buffer, consumes it only up
//! to the last space (a chunk boundary) and seeks back so the next read
//! starts on a whole chunk.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::rsa::ChunkCipher;
use crate::CipherError;

const ENCRYPT_BUF_LEN: usize = 4096;
const DECRYPT_BUF_LEN: usize = 8192;

impl ChunkCipher {
    pub fn encrypt_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        src: P,
        dst: Q,
    ) -> Result<(), CipherError> {
        let mut source = File::open(src)?;
        let mut dest = File::create(dst)?;

        let mut buf = [0u8; ENCRYPT_BUF_LEN];
        loop {
            let read = source.read(&mut buf)?;
            if read == 0 {
                break;
            }
            let wire = self.encrypt_to_string(&buf[..read])?;
            dest.write_all(wire.as_bytes())?;
        }
        Ok(())
    }

    pub fn decrypt_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        src: P,
        dst: Q,
    ) -> Result<(), CipherError> {
        let mut source = File::open(src)?;
        let mut dest = File::create(dst)?;
        let file_size = source.metadata()?.len();

        let mut buf = vec![0u8; DECRYPT_BUF_LEN];
        let mut consumed = 0u64;
        while consumed < file_size {
            let want = DECRYPT_BUF_LEN.min((file_size - consumed) as usize);
            source.read_exact(&mut buf[..want])?;
            let text = std::str::from_utf8(&buf[..want])
                .map_err(|_| CipherError::FileError("ciphertext is not ASCII".to_string()))?;

            let cut = match text.rfind(' ') {
                Some(i) => i + 1,
                None => {
                    return Err(CipherError::FileError(
                        "no chunk boundary in the read buffer".to_string(),
                    ))
                }
            };
            consumed += cut as u64;
            source.seek(SeekFrom::Start(consumed))?;

            let plain = self.decrypt_from_str(&text[..cut])?;
            dest.write_all(&plain)?;
        }
        Ok(())
    }
}
