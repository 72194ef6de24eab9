//! Metro line identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a metro line.
///
/// Lines are compared by id only; two hops on the same id are a continuous
/// ride, anything else is a transfer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u32);

impl LineId {
    /// Returns the numeric id.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&LineId(2)).unwrap(), "2");
        assert_eq!(serde_json::from_str::<LineId>("11").unwrap(), LineId(11));
    }
}
