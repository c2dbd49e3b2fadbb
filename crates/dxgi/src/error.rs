use error_derive::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DxgiError {
    #[msg = "no data is stored under this key"]
    NotFound,

    /// The output buffer was too small, nothing was copied
    #[msg = "buffer too small, {required} bytes are needed"]
    MoreData { required: usize },

    #[msg = "invalid call"]
    InvalidCall,
}
