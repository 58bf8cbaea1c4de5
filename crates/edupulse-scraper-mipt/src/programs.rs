//! MIPT target programs and their application-list pages.

/// Program name and application-list URL pairs.
pub const TARGET_PROGRAMS: [(&str, &str); 7] = [
    (
        "Науки о данных",
        "https://priem.mipt.ru/applications_v2/bWFzdGVyL05hdWtpIG8gZGFubnlraF9Lb250cmFrdC5odG1s",
    ),
    (
        "Современная комбинаторика",
        "https://priem.mipt.ru/applications_v2/bWFzdGVyL1NvdnJlbWVubmF5YSBrb21iaW5hdG9yaWthX0tvbnRyYWt0Lmh0bWw=",
    ),
    (
        "Комбинаторика и цифровая экономика",
        "https://priem.mipt.ru/applications_v2/bWFzdGVyL0tvbWJpbmF0b3Jpa2EgaSB0c2lmcm92YXlhIGVrb25vbWlrYV9Lb250cmFrdC5odG1s",
    ),
    (
        "Contemporary combinatorics",
        "https://priem.mipt.ru/applications_v2/bWFzdGVyL0NvbnRlbXBvcmFyeSBTb21iaW5hdG9yaWNzX0tvbnRyYWt0Lmh0bWw=",
    ),
    (
        "Modern Artificial Intelligence",
        "https://priem.mipt.ru/applications_v2/bWFzdGVyL01vZGVybiBzdGF0ZSBvZiBBcnRpZmljaWFsIEludGVsbGlnZW5jZV9Lb250cmFrdC5odG1s",
    ),
    (
        "Разработка IT-продукта",
        "https://priem.mipt.ru/applications_v2/bWFzdGVyL1JhenJhYm90a2EgSVQtcHJvZHVrdGFfS29udHJha3QuaHRtbA==",
    ),
    (
        "Управление IT-продуктами",
        "https://priem.mipt.ru/applications_v2/bWFzdGVyL1VwcmF2bGVuaWUgSVQtcHJvZHVrdGFtaV9Lb250cmFrdC5odG1s",
    ),
];

/// Curated English slugs; identifiers were first written under these, so
/// the table must stay in sync with historical rows.
pub const SLUGS: [(&str, &str); 7] = [
    ("Науки о данных", "data_science"),
    ("Современная комбинаторика", "modern_combinatorics"),
    ("Комбинаторика и цифровая экономика", "combinatorics_digital_economy"),
    ("Contemporary combinatorics", "contemporary_combinatorics"),
    ("Modern Artificial Intelligence", "modern_ai"),
    ("Разработка IT-продукта", "it_product_development"),
    ("Управление IT-продуктами", "it_product_management"),
];
