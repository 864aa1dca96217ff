use rand::Rng;
use rand::seq::SliceRandom;

/// Subjects a mini challenge without a filter draws from.
pub const MINI_CHALLENGE_SUBJECTS: &[&str] = &[
    "Matemática",
    "História do Brasil",
    "Geografia",
    "Biologia",
    "Física",
    "Química",
    "Linguagens",
];

pub struct SubjectArea {
    pub id: &'static str,
    pub label: &'static str,
}

/// The four ENEM knowledge areas offered on the home screen and study plan.
pub const SUBJECT_AREAS: &[SubjectArea] = &[
    SubjectArea {
        id: "Linguagens",
        label: "Linguagens e Códigos",
    },
    SubjectArea {
        id: "Ciências Humanas",
        label: "Ciências Humanas",
    },
    SubjectArea {
        id: "Ciências da Natureza",
        label: "Ciências da Natureza",
    },
    SubjectArea {
        id: "Matemática",
        label: "Matemática",
    },
];

pub fn random_mini_subject<R: Rng + ?Sized>(rng: &mut R) -> String {
    MINI_CHALLENGE_SUBJECTS
        .choose(rng)
        .copied()
        .unwrap_or("Matemática")
        .to_string()
}
