//! The write-side counterpart of [ByteStream](crate::bytestream::ByteStream)

/// Appends little-endian integers to a growable buffer
#[derive(Clone, Debug, Default)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

macro_rules! write_int {
    ($primitive: ty, $le_function: ident) => {
        pub fn $le_function(&mut self, value: $primitive) -> &mut Self {
            self.bytes.extend_from_slice(&value.to_le_bytes());
            self
        }
    };
}

impl ByteWriter {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Pad with zeros until the length is a multiple of `alignment`
    pub fn pad_to(&mut self, alignment: usize) -> &mut Self {
        while self.bytes.len() % alignment != 0 {
            self.bytes.push(0);
        }
        self
    }

    write_int!(u8, write_u8);
    write_int!(u16, write_le_u16);
    write_int!(u32, write_le_u32);
    write_int!(i32, write_le_i32);

    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::ByteWriter;
    use crate::bytestream::ByteStream;

    #[test]
    fn written_values_can_be_read_back() {
        let mut writer = ByteWriter::default();
        writer.write_le_u16(0x4d42).write_le_i32(-2).write_u8(7).pad_to(4);

        let bytes = writer.finish();
        assert_eq!(bytes.len(), 8);

        let mut stream = ByteStream::new(&bytes);
        assert_eq!(stream.next_le_u16(), Some(0x4d42));
        assert_eq!(stream.next_le_i32(), Some(-2));
        assert_eq!(stream.next_byte(), Some(7));
    }
}
