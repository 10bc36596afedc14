/// A write-once cell.
///
/// The first [`set`](Latch::set) latches the value permanently; later
/// writes are rejected and reported, so callers can record the conflict as
/// a diagnostic instead of silently overwriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latch<T> {
    value: Option<T>,
}

impl<T> Latch<T> {
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Latches `value` if the cell is still empty. Returns whether the
    /// write landed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value.is_none() {
            self.value = Some(value);
            true
        } else {
            false
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

impl<T: Copy> Latch<T> {
    pub fn copied(&self) -> Option<T> {
        self.value
    }
}

impl<T> Default for Latch<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_write_wins() {
        let mut latch = Latch::new();
        assert!(!latch.is_set());
        assert!(latch.set(3));
        assert!(!latch.set(4));
        assert_eq!(latch.copied(), Some(3));
    }
}
