use crate::error::ReferenceError;
use georef_domain::{Family, ReferenceKey};

/// The keys being resolved by one call chain, outermost first.
///
/// A stack belongs to exactly one top-level lookup and is threaded through nested
/// resolutions by `&mut`; it is never shared between threads, so a concurrent lookup of
/// the same key can never look like a cycle.
#[derive(Debug, Default)]
pub struct Resolution {
    stack: Vec<(Family, ReferenceKey)>,
}

impl Resolution {
    /// Pushes `(family, key)`, or fails if it is already in flight.
    ///
    /// # Errors
    /// [`ReferenceError::CircularReference`] listing the stack from the first occurrence
    /// of the key up to and including the repeat.
    pub fn enter(&mut self, family: Family, key: &ReferenceKey) -> Result<(), ReferenceError> {
        if let Some(start) = self.stack.iter().position(|(f, k)| *f == family && k == key) {
            let mut cycle = self.stack[start..].to_vec();
            cycle.push((family, key.clone()));
            return Err(ReferenceError::CircularReference { cycle });
        }
        self.stack.push((family, key.clone()));
        Ok(())
    }

    pub fn leave(&mut self) {
        self.stack.pop();
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn contains(&self, family: Family, key: &ReferenceKey) -> bool {
        self.stack.iter().any(|(f, k)| *f == family && k == key)
    }
}
