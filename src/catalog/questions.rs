//! Hard-coded household questionnaire.
//!
//! Parts A–D and F of the paper form. Part E (the per-dependent block,
//! questions 15–25) lives in [`super::dependents`] because it repeats.

use super::model::{ChoiceOption, ChoiceSet, JumpRule, Localized, Question, QuestionKind};

/// Question asking whether the head of family is alive.
pub const HEAD_ALIVE_ID: &str = "Q5";
/// Question asking whether the family has dependents.
pub const HAS_DEPENDENTS_ID: &str = "Q13";
/// Question collecting the declared number of dependents.
pub const DEPENDENT_COUNT_ID: &str = "Q14";
/// Photo of the dwelling; the child loop exits forward to this question.
pub const PHOTO_ID: &str = "Q26";

/// Record keys searched when resuming a prior submission.
pub const HEAD_NAME_KEY: &str = "ChefFamille";
pub const FAMILY_NAME_KEY: &str = "NomFamille";

pub const YES: &str = "yes";
pub const NO: &str = "no";

pub static YES_NO: ChoiceSet = ChoiceSet {
    name: "yes_no",
    options: &[
        ChoiceOption::new(YES, "Oui", "نعم"),
        ChoiceOption::new(NO, "Non", "لا"),
    ],
};

pub static HEAD_SEX: ChoiceSet = ChoiceSet {
    name: "head_sex",
    options: &[
        ChoiceOption::new("male", "Homme", "رجل"),
        ChoiceOption::new("female", "Femme", "امرأة"),
    ],
};

pub static MARITAL_STATUS: ChoiceSet = ChoiceSet {
    name: "marital_status",
    options: &[
        ChoiceOption::new("single", "Célibataire", "أعزب"),
        ChoiceOption::new("married", "Marié(e)", "متزوج"),
        ChoiceOption::new("divorced", "Divorcé(e)", "مطلق"),
        ChoiceOption::new("widowed", "Veuf/Veuve", "أرمل"),
    ],
};

pub static LOCALITY: ChoiceSet = ChoiceSet {
    name: "locality",
    options: &[
        ChoiceOption::new("hassi_el_bekay", "Hassi El Bekay", "احسي البكاي"),
        ChoiceOption::new("other", "Autre", "أخرى"),
    ],
};

pub static HOUSING_STATUS: ChoiceSet = ChoiceSet {
    name: "housing_status",
    options: &[
        ChoiceOption::new("owner", "Propriétaire", "ملك"),
        ChoiceOption::new("renter", "Locataire", "إيجار"),
        ChoiceOption::new("hosted", "Hébergé(e)", "ضيافة"),
        ChoiceOption::new("other", "Autre", "أخرى"),
    ],
};

pub(crate) static MAIN_QUESTIONS: [Question; 16] = [
    Question {
        id: "Q1",
        key: FAMILY_NAME_KEY,
        kind: QuestionKind::Text,
        prompt: Localized::new("1. Nom de la famille ?", "1. اسم الأسرة؟"),
    },
    Question {
        id: "Q2",
        key: "GrandeFamille",
        kind: QuestionKind::Text,
        prompt: Localized::new("2. Nom de la grande famille ?", "2. اسم الأسرة الكبيرة؟"),
    },
    Question {
        id: "Q3",
        key: HEAD_NAME_KEY,
        kind: QuestionKind::Text,
        prompt: Localized::new("3. Nom du chef de famille ?", "3. اسم رب الأسرة؟"),
    },
    Question {
        id: "Q4",
        key: "Responsable",
        kind: QuestionKind::Text,
        prompt: Localized::new(
            "4. Nom du responsable (si différent) ?",
            "4. اسم المسؤول (إذا كان مختلفًا)؟",
        ),
    },
    Question {
        id: HEAD_ALIVE_ID,
        key: "EnVie",
        kind: QuestionKind::SingleChoice(&YES_NO),
        prompt: Localized::new("5. Le chef est-il en vie ?", "5. هل هو على قيد الحياة؟"),
    },
    Question {
        id: "Q6",
        key: "Age",
        kind: QuestionKind::Number,
        prompt: Localized::new("6. Âge du chef ?", "6. العمر؟"),
    },
    Question {
        id: "Q7",
        key: "Sexe",
        kind: QuestionKind::SingleChoice(&HEAD_SEX),
        prompt: Localized::new("7. Sexe ?", "7. الجنس؟"),
    },
    Question {
        id: "Q8",
        key: "EtatCivil",
        kind: QuestionKind::SingleChoice(&MARITAL_STATUS),
        prompt: Localized::new("8. État civil ?", "8. الحالة الاجتماعية؟"),
    },
    Question {
        id: "Q9",
        key: "Tel",
        kind: QuestionKind::Text,
        prompt: Localized::new("9. Numéro de téléphone ?", "9. رقم الهاتف؟"),
    },
    Question {
        id: "Q10",
        key: "CNI",
        kind: QuestionKind::Text,
        prompt: Localized::new("10. Numéro Carte d'Identité ?", "10. رقم بطاقة التعريف؟"),
    },
    Question {
        id: "Q11",
        key: "Localite",
        kind: QuestionKind::SingleChoiceWithOther(&LOCALITY),
        prompt: Localized::new("11. Localité ?", "11. القرية؟"),
    },
    Question {
        id: "Q12",
        key: "StatutLogement",
        kind: QuestionKind::SingleChoiceWithOther(&HOUSING_STATUS),
        prompt: Localized::new("12. Statut du logement ?", "12. وضعية المسكن؟"),
    },
    Question {
        id: HAS_DEPENDENTS_ID,
        key: "AEnfants",
        kind: QuestionKind::SingleChoice(&YES_NO),
        prompt: Localized::new(
            "13. La famille a-t-elle des enfants ?",
            "13. هل لدى الأسرة أولاد؟",
        ),
    },
    Question {
        id: DEPENDENT_COUNT_ID,
        key: "NbEnfants",
        kind: QuestionKind::Number,
        prompt: Localized::new("14. Nombre d'enfants ?", "14. عدد الأولاد؟"),
    },
    Question {
        id: PHOTO_ID,
        key: "Photo",
        kind: QuestionKind::Photo,
        prompt: Localized::new("26. Photo du logement", "26. صورة للمسكن"),
    },
    Question {
        id: "Q27",
        key: "GPS",
        kind: QuestionKind::GeoCoordinates,
        prompt: Localized::new("27. Coordonnées GPS", "27. إحداثيات GPS"),
    },
];

/// Skip rules evaluated on the canonical option code of the answer.
pub(crate) static JUMP_RULES: [JumpRule; 2] = [
    // Deceased head: personal details (Q6–Q12) are skipped.
    JumpRule {
        from: HEAD_ALIVE_ID,
        when: NO,
        to: HAS_DEPENDENTS_ID,
    },
    JumpRule {
        from: HAS_DEPENDENTS_ID,
        when: NO,
        to: PHOTO_ID,
    },
];
