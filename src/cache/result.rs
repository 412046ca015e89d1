//! Cache Result
//!
//! Tagged outcome of a cache read. A miss is a normal result, not an error.

// == Cache Result ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Hit(T),
    Miss,
}

impl<T> CacheResult<T> {
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheResult::Hit(_))
    }

    pub fn is_miss(&self) -> bool {
        !self.is_hit()
    }
}

impl<T> From<Option<T>> for CacheResult<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => CacheResult::Hit(value),
            None => CacheResult::Miss,
        }
    }
}
