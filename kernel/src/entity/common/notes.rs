use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Notes(String);

impl Notes {
    pub fn new(notes: impl Into<String>) -> Self {
        Self(notes.into())
    }

    /// Blank input means "no notes".
    pub fn optional(notes: impl Into<String>) -> Option<Self> {
        let notes = notes.into();
        if notes.trim().is_empty() {
            None
        } else {
            Some(Self(notes))
        }
    }
}
