use crate::physics::elements::Element;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Particle counts of an atom with no spatial information. Used as the
/// answer key of a challenge and as the snapshot a built atom is compared
/// against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumberAtom {
    pub proton_count: u32,
    pub neutron_count: u32,
    pub electron_count: u32,
}

impl NumberAtom {
    pub const fn new(proton_count: u32, neutron_count: u32, electron_count: u32) -> Self {
        Self {
            proton_count,
            neutron_count,
            electron_count,
        }
    }

    pub fn mass_number(&self) -> u32 {
        self.proton_count + self.neutron_count
    }

    pub fn charge(&self) -> i32 {
        self.proton_count as i32 - self.electron_count as i32
    }

    pub fn is_neutral(&self) -> bool {
        self.charge() == 0
    }

    pub fn element(&self) -> Option<&'static Element> {
        Element::by_atomic_number(self.proton_count)
    }

    pub fn symbol(&self) -> Option<&'static str> {
        self.element().map(Element::symbol)
    }

    pub fn is_stable(&self) -> bool {
        self.element()
            .is_some_and(|element| element.is_stable_isotope(self.neutron_count))
    }
}

impl fmt::Display for NumberAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}p {}n {}e",
            self.proton_count, self.neutron_count, self.electron_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_values() {
        let ion = NumberAtom::new(8, 8, 10);
        assert_eq!(ion.mass_number(), 16);
        assert_eq!(ion.charge(), -2);
        assert!(!ion.is_neutral());
        assert_eq!(ion.symbol(), Some("O"));
        assert!(ion.is_stable());
    }

    #[test]
    fn empty_atom_has_no_element() {
        let empty = NumberAtom::default();
        assert!(empty.is_neutral());
        assert_eq!(empty.element().map(Element::name), None);
        assert!(!empty.is_stable());
    }
}
