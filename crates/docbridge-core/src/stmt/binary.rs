use uuid::Uuid;

/// Opaque binary payload with its sub-kind tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binary {
    pub subtype: BinarySubtype,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinarySubtype {
    Generic,

    /// 16-byte unique identifier. Crosses the wire as a dashed UUID string.
    Uuid,

    /// Any other tag, preserved as-is.
    Other(u8),
}

impl Binary {
    pub fn generic(bytes: impl Into<Vec<u8>>) -> Binary {
        Binary {
            subtype: BinarySubtype::Generic,
            bytes: bytes.into(),
        }
    }

    pub fn from_uuid(uuid: Uuid) -> Binary {
        Binary {
            subtype: BinarySubtype::Uuid,
            bytes: uuid.as_bytes().to_vec(),
        }
    }

    /// Returns the UUID this payload encodes, when it is a 16-byte UUID sub-kind.
    pub fn as_uuid(&self) -> Option<Uuid> {
        if self.subtype != BinarySubtype::Uuid {
            return None;
        }

        Uuid::from_slice(&self.bytes).ok()
    }
}

impl BinarySubtype {
    pub fn from_u8(tag: u8) -> BinarySubtype {
        match tag {
            0x00 => BinarySubtype::Generic,
            0x04 => BinarySubtype::Uuid,
            other => BinarySubtype::Other(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            BinarySubtype::Generic => 0x00,
            BinarySubtype::Uuid => 0x04,
            BinarySubtype::Other(other) => other,
        }
    }
}
