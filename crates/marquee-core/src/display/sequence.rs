use std::sync::Arc;

use crate::{Error, Result};

/// Ordered, non-empty, immutable list of strings to cycle through.
///
/// Cloning is cheap: all clones share the same backing slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSequence {
    items: Arc<[String]>,
}

impl ContentSequence {
    /// Build a sequence, rejecting an empty list
    pub fn new<I, S>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return Err(Error::InvalidConfig(
                "content sequence must contain at least one entry".to_string(),
            ));
        }
        Ok(Self {
            items: items.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entry at `index`, wrapping past the end
    pub fn get(&self, index: usize) -> &str {
        &self.items[index % self.items.len()]
    }

    /// Length 1 sequences never visibly rotate
    pub fn is_static(&self) -> bool {
        self.items.len() == 1
    }
}
