use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for control names — fast comparisons, low memory.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned identifier for controls in the GUI tree.
/// Internally a `Spur` index — 4 bytes, Copy, Eq, Hash in O(1).
///
/// Identity is by name: two controls can never share an id inside one tree,
/// which is what lets per-gesture side tables key on `ControlId`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(Spur);

impl ControlId {
    /// Intern a control name, or return the existing id if already interned.
    pub fn intern(s: &str) -> Self {
        ControlId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to the control name.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

}

impl fmt::Debug for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ControlId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ControlId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ControlId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = ControlId::intern("submit_button");
        let b = ControlId::intern("submit_button");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "submit_button");
        assert_eq!(a.to_string(), "submit_button");
    }
}
