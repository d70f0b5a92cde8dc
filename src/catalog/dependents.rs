//! Repeating per-dependent block (questions 15–25).

use super::model::{ChoiceOption, ChoiceSet, Localized};

/// Column suffixes of one dependent slot, in persisted order.
pub const DEPENDENT_COLUMNS: [&str; 11] = [
    "Nom",
    "Sexe",
    "Mere",
    "Niveau",
    "Pro",
    "Grade",
    "Act_Femme",
    "Sante",
    "Maladie",
    "Aide",
    "Orga",
];

/// Prefix of dependent columns; slots are numbered from 1.
pub fn dependent_column(slot: usize, column: &str) -> String {
    format!("Enfant_{slot}_{column}")
}

pub const OFFICIAL: &str = "official";
pub const FEMALE: &str = "female";
pub const SICK: &str = "sick";
pub const ASSISTED: &str = "yes";

pub static SEX: ChoiceSet = ChoiceSet {
    name: "dependent_sex",
    options: &[
        ChoiceOption::new("male", "Homme", "رجل"),
        ChoiceOption::new(FEMALE, "Femme", "امرأة"),
    ],
};

pub static EDUCATION: ChoiceSet = ChoiceSet {
    name: "education",
    options: &[
        ChoiceOption::new("none", "Sans", "بدون مستوى"),
        ChoiceOption::new("primary", "Primaire", "ابتدائي"),
        ChoiceOption::new("secondary", "Secondaire", "ثانوي"),
        ChoiceOption::new("university", "Universitaire", "جامعي"),
        ChoiceOption::new("mahadra", "Mahadra", "محظرة"),
    ],
};

/// The leading "-" option is the neutral "not stated" occupation.
pub static OCCUPATION: ChoiceSet = ChoiceSet {
    name: "occupation",
    options: &[
        ChoiceOption::new("unstated", "-", "-"),
        ChoiceOption::new(OFFICIAL, "Fonctionnaire", "موظف"),
        ChoiceOption::new("private_employee", "Employé(e) privé", "عامل في القطاع الخاص"),
        ChoiceOption::new("self_employed", "Travaux libéraux", "أعمال حرة"),
        ChoiceOption::new("unemployed", "Sans emploi", "عاطل عن العمل"),
        ChoiceOption::new("student", "Étudiant", "طالب"),
        ChoiceOption::new("other", "Autre", "أخرى"),
    ],
};

pub static GRADE: ChoiceSet = ChoiceSet {
    name: "grade",
    options: &[
        ChoiceOption::new("minister", "Ministre", "وزير"),
        ChoiceOption::new("director_general", "Directeur Général", "مدير عام"),
        ChoiceOption::new("director", "Directeur", "مدير"),
        ChoiceOption::new("head_of_service", "Chef de Service", "رئيس مصلحة"),
        ChoiceOption::new("other", "Autre", "أخرى"),
    ],
};

pub static HEALTH: ChoiceSet = ChoiceSet {
    name: "health",
    options: &[
        ChoiceOption::new("good", "Bon", "جيدة"),
        ChoiceOption::new(SICK, "Malade", "مريض"),
    ],
};

pub static ILLNESS: ChoiceSet = ChoiceSet {
    name: "illness",
    options: &[
        ChoiceOption::new("chronic", "Maladie chronique", "مرض مزمن"),
        ChoiceOption::new("acute", "Maladie aiguë", "مرض حاد"),
        ChoiceOption::new("disability", "Handicap", "إعاقة"),
        ChoiceOption::new("other", "Autre", "آخر"),
    ],
};

/// Assistance defaults to "no" for a fresh dependent.
pub static ASSISTANCE: ChoiceSet = ChoiceSet {
    name: "assistance",
    options: &[
        ChoiceOption::new(ASSISTED, "Oui", "نعم"),
        ChoiceOption::new("no", "Non", "لا"),
    ],
};

pub const NAME_LABEL: Localized = Localized::new("15. Nom de l'enfant", "15. اسم الولد");
pub const SEX_LABEL: Localized = Localized::new("16. Sexe", "16. الجنس");
pub const MOTHER_LABEL: Localized = Localized::new("17. Nom de la mère", "17. اسم الأم");
pub const EDUCATION_LABEL: Localized =
    Localized::new("18. Niveau scolaire", "18. المستوى الدراسي");
pub const OCCUPATION_LABEL: Localized =
    Localized::new("19. Situation professionnelle", "19. الوضعية المهنية");
pub const GRADE_LABEL: Localized = Localized::new("20. Grade", "20. الدرجة الوظيفية");
pub const ACTIVITY_LABEL: Localized = Localized::new(
    "21. Activité professionnelle (si femme)",
    "21. النشاط المهني (إذا كانت امرأة)",
);
pub const HEALTH_LABEL: Localized = Localized::new("22. État de santé", "22. الحالة الصحية");
pub const ILLNESS_LABEL: Localized = Localized::new("23. Type de maladie", "23. نوع المرض");
pub const ASSISTANCE_LABEL: Localized = Localized::new(
    "24. A-t-il/elle bénéficié d'une aide ?",
    "24. هل استفاد(ت) من مساعدة؟",
);
pub const PROVIDER_LABEL: Localized = Localized::new(
    "25. Si oui, quel organisme ?",
    "25. إذا كان الجواب 'نعم'، ما هي الهيئة؟",
);

/// Heading narrated when a dependent's sub-form is shown.
pub fn dependent_intro(locale: super::Locale, index: usize) -> String {
    match locale {
        super::Locale::French => format!("Informations pour l'enfant {}", index + 1),
        super::Locale::Arabic => format!("معلومات الطفل {}", index + 1),
    }
}
