//! Application data attached to objects, keyed by GUID

use std::{
    any::Any,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::DxgiError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl Guid {
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        let bytes = value.to_be_bytes();
        Self {
            data1: (value >> 96) as u32,
            data2: (value >> 80) as u16,
            data3: (value >> 64) as u16,
            data4: [
                bytes[8], bytes[9], bytes[10], bytes[11], bytes[12], bytes[13], bytes[14],
                bytes[15],
            ],
        }
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{{{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}}}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

pub type Interface = Arc<dyn Any + Send + Sync>;

enum Payload {
    Bytes(Box<[u8]>),
    Interface(Interface),
}

struct Entry {
    tag: Guid,
    payload: Payload,
}

/// A set of GUID keyed blobs and interface references
///
/// All operations go through a single lock, so a store can be shared freely between
/// threads.
#[derive(Default)]
pub struct PrivateStore {
    entries: Mutex<Vec<Entry>>,
}

impl PrivateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        // Entries are replaced whole, a poisoned store is still consistent
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn store(&self, tag: Guid, payload: Option<Payload>) {
        let mut entries = self.lock();
        entries.retain(|entry| entry.tag != tag);
        if let Some(payload) = payload {
            entries.push(Entry { tag, payload });
        }
    }

    /// Store a copy of `data` under `tag`, replacing what was there
    ///
    /// Passing `None` removes the entry.
    pub fn set_data(&self, tag: Guid, data: Option<&[u8]>) {
        log::trace!("Setting private data {tag}");
        self.store(tag, data.map(|data| Payload::Bytes(data.into())));
    }

    /// Keep a reference to `interface` under `tag`
    ///
    /// Passing `None` removes the entry and drops the stored reference.
    pub fn set_interface(&self, tag: Guid, interface: Option<Interface>) {
        log::trace!("Setting private interface {tag}");
        self.store(tag, interface.map(Payload::Interface));
    }

    /// Copy the data stored under `tag` into `buffer`
    ///
    /// Returns the size of the stored data. Without a buffer only the size is
    /// reported, a buffer that is too small yields [DxgiError::MoreData].
    pub fn get_data(&self, tag: Guid, buffer: Option<&mut [u8]>) -> Result<usize, DxgiError> {
        let entries = self.lock();
        let entry = entries
            .iter()
            .find(|entry| entry.tag == tag)
            .ok_or(DxgiError::NotFound)?;

        let Payload::Bytes(data) = &entry.payload else {
            log::warn!("Private data {tag} holds an interface");
            return Err(DxgiError::InvalidCall);
        };

        let Some(buffer) = buffer else {
            return Ok(data.len());
        };

        if buffer.len() < data.len() {
            return Err(DxgiError::MoreData {
                required: data.len(),
            });
        }
        buffer[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    pub fn get_interface(&self, tag: Guid) -> Result<Interface, DxgiError> {
        let entries = self.lock();
        let entry = entries
            .iter()
            .find(|entry| entry.tag == tag)
            .ok_or(DxgiError::NotFound)?;

        match &entry.payload {
            Payload::Interface(interface) => Ok(Arc::clone(interface)),
            Payload::Bytes(_) => {
                log::warn!("Private data {tag} holds plain data");
                Err(DxgiError::InvalidCall)
            },
        }
    }

    /// Drop every entry, releasing stored interfaces
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl fmt::Debug for PrivateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.lock();
        f.debug_list()
            .entries(entries.iter().map(|entry| entry.tag))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAG: Guid = Guid::from_u128(0x6f15aaf2_d208_4e89_9ab4_489535d34f9c);
    const OTHER: Guid = Guid::from_u128(0x1);

    #[test]
    fn guid_formatting() {
        assert_eq!(TAG.data1, 0x6f15aaf2);
        assert_eq!(TAG.data2, 0xd208);
        assert_eq!(TAG.data3, 0x4e89);
        assert_eq!(TAG.to_string(), "{6f15aaf2-d208-4e89-9ab4-489535d34f9c}");
    }

    #[test]
    fn data_round_trip() {
        let store = PrivateStore::new();
        store.set_data(TAG, Some(b"private".as_slice()));

        assert_eq!(store.get_data(TAG, None), Ok(7));

        let mut small = [0; 4];
        assert_eq!(
            store.get_data(TAG, Some(&mut small)),
            Err(DxgiError::MoreData { required: 7 })
        );
        assert_eq!(small, [0; 4]);

        let mut buffer = [0; 16];
        assert_eq!(store.get_data(TAG, Some(&mut buffer)), Ok(7));
        assert_eq!(&buffer[..7], b"private");

        assert_eq!(store.get_data(OTHER, None), Err(DxgiError::NotFound));
    }

    #[test]
    fn replacing_and_removing() {
        let store = PrivateStore::new();
        store.set_data(TAG, Some(b"first".as_slice()));
        store.set_data(TAG, Some(b"2nd".as_slice()));
        assert_eq!(store.get_data(TAG, None), Ok(3));

        store.set_data(TAG, None);
        assert_eq!(store.get_data(TAG, None), Err(DxgiError::NotFound));
    }

    #[test]
    fn interfaces_hold_references() {
        let store = PrivateStore::new();
        let interface: Interface = Arc::new(42_u32);
        store.set_interface(TAG, Some(Arc::clone(&interface)));
        assert_eq!(Arc::strong_count(&interface), 2);

        let stored = store.get_interface(TAG).unwrap();
        assert_eq!(stored.downcast_ref::<u32>(), Some(&42));
        assert_eq!(store.get_data(TAG, None), Err(DxgiError::InvalidCall));
        drop(stored);

        store.clear();
        assert_eq!(Arc::strong_count(&interface), 1);
        assert!(matches!(
            store.get_interface(TAG),
            Err(DxgiError::NotFound)
        ));
    }

    #[test]
    fn shared_between_threads() {
        let store = Arc::new(PrivateStore::new());
        let handles: Vec<_> = (0..4_u8)
            .map(|index| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let tag = Guid::from_u128(index.into());
                    store.set_data(tag, Some([index; 3].as_slice()));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for index in 0..4_u8 {
            let mut buffer = [0; 3];
            let tag = Guid::from_u128(index.into());
            assert_eq!(store.get_data(tag, Some(&mut buffer)), Ok(3));
            assert_eq!(buffer, [index; 3]);
        }
    }
}
