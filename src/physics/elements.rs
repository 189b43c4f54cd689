use serde::Serialize;

/// Basic metadata describing a chemical element.
#[derive(Clone, Debug, Serialize)]
pub struct Element {
    pub atomic_number: u32,
    pub symbol: &'static str,
    pub name: &'static str,
    pub standard_atomic_weight: f32,
    /// Neutron counts of the stable isotopes, most abundant first.
    pub stable_neutrons: &'static [u32],
}

pub const MAX_SUPPORTED_PROTONS: u32 = 18;

static ELEMENTS: [Element; MAX_SUPPORTED_PROTONS as usize] = [
    Element::new(1, "H", "Hydrogen", 1.008, &[0, 1]),
    Element::new(2, "He", "Helium", 4.0026, &[2, 1]),
    Element::new(3, "Li", "Lithium", 6.94, &[4, 3]),
    Element::new(4, "Be", "Beryllium", 9.0122, &[5]),
    Element::new(5, "B", "Boron", 10.81, &[6, 5]),
    Element::new(6, "C", "Carbon", 12.011, &[6, 7]),
    Element::new(7, "N", "Nitrogen", 14.007, &[7, 8]),
    Element::new(8, "O", "Oxygen", 15.999, &[8, 10, 9]),
    Element::new(9, "F", "Fluorine", 18.998, &[10]),
    Element::new(10, "Ne", "Neon", 20.180, &[10, 12, 11]),
    Element::new(11, "Na", "Sodium", 22.990, &[12]),
    Element::new(12, "Mg", "Magnesium", 24.305, &[12, 14, 13]),
    Element::new(13, "Al", "Aluminum", 26.982, &[14]),
    Element::new(14, "Si", "Silicon", 28.085, &[14, 15, 16]),
    Element::new(15, "P", "Phosphorus", 30.974, &[16]),
    Element::new(16, "S", "Sulfur", 32.06, &[16, 18, 17, 20]),
    Element::new(17, "Cl", "Chlorine", 35.45, &[18, 20]),
    Element::new(18, "Ar", "Argon", 39.948, &[22, 18, 20]),
];

impl Element {
    pub const fn new(
        atomic_number: u32,
        symbol: &'static str,
        name: &'static str,
        standard_atomic_weight: f32,
        stable_neutrons: &'static [u32],
    ) -> Self {
        Self {
            atomic_number,
            symbol,
            name,
            standard_atomic_weight,
            stable_neutrons,
        }
    }

    pub fn by_atomic_number(z: u32) -> Option<&'static Element> {
        ELEMENTS.iter().find(|element| element.atomic_number == z)
    }

    pub fn all() -> &'static [Element] {
        &ELEMENTS
    }

    pub fn is_supported(z: u32) -> bool {
        (1..=MAX_SUPPORTED_PROTONS).contains(&z)
    }

    pub fn is_stable_isotope(&self, neutrons: u32) -> bool {
        self.stable_neutrons.contains(&neutrons)
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_ordered_by_atomic_number() {
        assert_eq!(Element::all().len(), MAX_SUPPORTED_PROTONS as usize);
        for (index, element) in Element::all().iter().enumerate() {
            assert_eq!(element.atomic_number as usize, index + 1);
            assert!(!element.stable_neutrons.is_empty());
        }
    }

    #[test]
    fn lookup_by_atomic_number() {
        assert_eq!(Element::by_atomic_number(6).map(Element::symbol), Some("C"));
        assert!(Element::by_atomic_number(0).is_none());
        assert!(Element::by_atomic_number(MAX_SUPPORTED_PROTONS + 1).is_none());
        assert!(Element::by_atomic_number(8).unwrap().is_stable_isotope(10));
    }
}
