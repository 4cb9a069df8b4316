//! Ontology class definitions.

use serde::{Deserialize, Serialize};

/// Classes known to the ontology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OntologyClass {
    Teacher,
    Student,
    Learning,
    Object,
    PhysicalThing,
    Wheel,
    Car,
    Process,
    Teaching,
    Mathematics,
    Dog,
    Vehicle,
    Planet,
}

impl OntologyClass {
    /// Every class, in declaration order.
    pub const ALL: [OntologyClass; 13] = [
        OntologyClass::Teacher,
        OntologyClass::Student,
        OntologyClass::Learning,
        OntologyClass::Object,
        OntologyClass::PhysicalThing,
        OntologyClass::Wheel,
        OntologyClass::Car,
        OntologyClass::Process,
        OntologyClass::Teaching,
        OntologyClass::Mathematics,
        OntologyClass::Dog,
        OntologyClass::Vehicle,
        OntologyClass::Planet,
    ];

    /// Look up a class by its lower-case surface form.
    pub fn from_surface(surface: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.surface() == surface)
    }

    /// The lower-case surface form that names this class in text.
    pub fn surface(&self) -> &'static str {
        match self {
            OntologyClass::Teacher => "teacher",
            OntologyClass::Student => "student",
            OntologyClass::Learning => "learning",
            OntologyClass::Object => "object",
            OntologyClass::PhysicalThing => "physical thing",
            OntologyClass::Wheel => "wheel",
            OntologyClass::Car => "car",
            OntologyClass::Process => "process",
            OntologyClass::Teaching => "teaching",
            OntologyClass::Mathematics => "mathematics",
            OntologyClass::Dog => "dog",
            OntologyClass::Vehicle => "vehicle",
            OntologyClass::Planet => "planet",
        }
    }

    /// Canonical capitalized class name.
    pub fn name(&self) -> &'static str {
        match self {
            OntologyClass::Teacher => "Teacher",
            OntologyClass::Student => "Student",
            OntologyClass::Learning => "Learning",
            OntologyClass::Object => "Object",
            OntologyClass::PhysicalThing => "PhysicalThing",
            OntologyClass::Wheel => "Wheel",
            OntologyClass::Car => "Car",
            OntologyClass::Process => "Process",
            OntologyClass::Teaching => "Teaching",
            OntologyClass::Mathematics => "Mathematics",
            OntologyClass::Dog => "Dog",
            OntologyClass::Vehicle => "Vehicle",
            OntologyClass::Planet => "Planet",
        }
    }
}

impl std::fmt::Display for OntologyClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
