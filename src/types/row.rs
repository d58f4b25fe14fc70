use serde::{Deserialize, Serialize};

use crate::types::error::{DatabaseError, Result};

pub const ID_SIZE: usize = 4;
pub const USERNAME_MAX_BYTES: usize = 32;
pub const EMAIL_MAX_BYTES: usize = 255;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_MAX_BYTES;
pub const ROW_SIZE: usize = EMAIL_OFFSET + EMAIL_MAX_BYTES;

/// A single record: id plus two fixed-width text columns.
///
/// A `Row` can only be obtained through [`Row::new`] or [`Row::from_bytes`],
/// so every instance fits the on-disk layout by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    id: i32,
    username: String,
    email: String,
}

impl Row {
    pub fn new(id: i32, username: &str, email: &str) -> Result<Self> {
        if id < 0 {
            return Err(DatabaseError::NegativeId(id));
        }
        if username.len() > USERNAME_MAX_BYTES {
            return Err(DatabaseError::FieldTooLong {
                field: "username",
                actual: username.len(),
                max: USERNAME_MAX_BYTES,
            });
        }
        if email.len() > EMAIL_MAX_BYTES {
            return Err(DatabaseError::FieldTooLong {
                field: "email",
                actual: email.len(),
                max: EMAIL_MAX_BYTES,
            });
        }
        Ok(Self {
            id,
            username: username.to_string(),
            email: email.to_string(),
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Serialize into a slot of exactly [`ROW_SIZE`] bytes.
    ///
    /// The id is little-endian; username and email are copied verbatim and
    /// right-padded with zero bytes to their fixed widths.
    pub fn write_to(&self, destination: &mut [u8]) {
        assert_eq!(destination.len(), ROW_SIZE, "row slot has the wrong size");
        destination[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        destination[USERNAME_OFFSET..EMAIL_OFFSET].fill(0);
        destination[USERNAME_OFFSET..USERNAME_OFFSET + self.username.len()]
            .copy_from_slice(self.username.as_bytes());
        destination[EMAIL_OFFSET..ROW_SIZE].fill(0);
        destination[EMAIL_OFFSET..EMAIL_OFFSET + self.email.len()]
            .copy_from_slice(self.email.as_bytes());
    }

    pub fn to_bytes(&self) -> [u8; ROW_SIZE] {
        let mut buffer = [0u8; ROW_SIZE];
        self.write_to(&mut buffer);
        buffer
    }

    /// Deserialize from a slot of exactly [`ROW_SIZE`] bytes, stripping the
    /// trailing zero padding from the text columns.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        assert_eq!(bytes.len(), ROW_SIZE, "row slot has the wrong size");
        let mut id_bytes = [0u8; ID_SIZE];
        id_bytes.copy_from_slice(&bytes[ID_OFFSET..ID_OFFSET + ID_SIZE]);
        let id = i32::from_le_bytes(id_bytes);
        let username = decode_text(&bytes[USERNAME_OFFSET..EMAIL_OFFSET], "username")?;
        let email = decode_text(&bytes[EMAIL_OFFSET..ROW_SIZE], "email")?;
        Ok(Self {
            id,
            username,
            email,
        })
    }
}

fn decode_text(raw: &[u8], field: &'static str) -> Result<String> {
    let end = raw.iter().rposition(|&byte| byte != 0).map_or(0, |p| p + 1);
    let text = std::str::from_utf8(&raw[..end])
        .map_err(|_| DatabaseError::InvalidFieldEncoding { field })?;
    Ok(text.to_string())
}
