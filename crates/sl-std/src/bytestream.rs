//! Provides a [Cursor](std::io::Cursor) equivalent without [io::Error](std::io::Error)

/// Reads little- and big-endian integers from a borrowed byte slice
///
/// Reading past the end never panics, the `next_*` methods simply return `None`.
#[derive(Clone, Copy, Debug)]
pub struct ByteStream<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

macro_rules! next_int {
    ($primitive: ty, $be_function: ident, $le_function: ident) => {
        #[must_use]
        pub fn $be_function(&mut self) -> Option<$primitive> {
            self.next_chunk().map(<$primitive>::from_be_bytes)
        }

        #[must_use]
        pub fn $le_function(&mut self) -> Option<$primitive> {
            self.next_chunk().map(<$primitive>::from_le_bytes)
        }
    };
}

impl<'a> ByteStream<'a> {
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, cursor: 0 }
    }

    /// Returns the bytes from cursor until the end of the stream
    ///
    /// If the cursor is past the end of the stream, an empty slice is returned
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        let index = self.cursor.min(self.bytes.len());
        &self.bytes[index..]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining().is_empty()
    }

    pub fn advance(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_add(n);
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    /// Read the next `N` bytes, advancing the cursor only if there are enough of them
    #[inline]
    #[must_use]
    pub fn next_chunk<const N: usize>(&mut self) -> Option<[u8; N]> {
        let chunk: [u8; N] = self.remaining().get(..N)?.try_into().ok()?;
        self.cursor += N;
        Some(chunk)
    }

    /// Read the next `n` bytes as a slice
    #[must_use]
    pub fn next_slice(&mut self, n: usize) -> Option<&'a [u8]> {
        let slice = self.remaining().get(..n)?;
        self.cursor += n;
        Some(slice)
    }

    #[must_use]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.next_chunk::<1>().map(|[byte]| byte)
    }

    next_int!(u16, next_be_u16, next_le_u16);
    next_int!(i16, next_be_i16, next_le_i16);

    next_int!(u32, next_be_u32, next_le_u32);
    next_int!(i32, next_be_i32, next_le_i32);
}

#[cfg(test)]
mod tests {
    use super::ByteStream;

    #[test]
    fn read_integers() {
        let mut stream = ByteStream::new(&[0x42, 0x4d, 0x01, 0x00, 0x00, 0x00, 0xff]);

        assert_eq!(stream.next_chunk(), Some([0x42, 0x4d]));
        assert_eq!(stream.next_le_u32(), Some(1));
        assert_eq!(stream.next_le_u16(), None);
        assert_eq!(stream.next_byte(), Some(0xff));
        assert!(stream.is_empty());
    }

    #[test]
    fn reading_past_the_end_is_harmless() {
        let mut stream = ByteStream::new(&[]);
        assert_eq!(stream.next_le_i32(), None);
        assert!(stream.remaining().is_empty());

        stream.advance(100);
        assert_eq!(stream.next_slice(1), None);
    }
}
