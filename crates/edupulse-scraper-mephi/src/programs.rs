//! MEPhI target programs and their ranking pages.

/// Program name and rating-list URL pairs.
pub const TARGET_PROGRAMS: [(&str, &str); 6] = [
    (
        "Машинное обучение и анализ данных",
        "https://org.mephi.ru/pupil-rating/get-rating/entity/12843/original/no",
    ),
    (
        "Информационные системы и технологии",
        "https://org.mephi.ru/pupil-rating/get-rating/entity/12768/original/no",
    ),
    (
        "Кибербезопасность",
        "https://org.mephi.ru/pupil-rating/get-rating/entity/12847/original/no",
    ),
    (
        "Математическое моделирование",
        "https://org.mephi.ru/pupil-rating/get-rating/entity/12816/original/no",
    ),
    (
        "Прикладная математика и информатика",
        "https://org.mephi.ru/pupil-rating/get-rating/entity/12764/original/no",
    ),
    (
        "Ядерные физика и технологии",
        "https://org.mephi.ru/pupil-rating/get-rating/entity/13584/original/no",
    ),
];

/// Curated English slugs; identifiers were first written under these, so
/// the table must stay in sync with historical rows.
pub const SLUGS: [(&str, &str); 6] = [
    ("Машинное обучение и анализ данных", "machine_learning_data_analysis"),
    (
        "Информационные системы и технологии",
        "information_systems_technologies",
    ),
    ("Кибербезопасность", "cybersecurity"),
    ("Математическое моделирование", "mathematical_modeling"),
    (
        "Прикладная математика и информатика",
        "applied_mathematics_informatics",
    ),
    ("Ядерные физика и технологии", "nuclear_physics_technologies"),
];
