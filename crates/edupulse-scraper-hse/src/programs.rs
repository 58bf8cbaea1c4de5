//! HSE export location and target programs.

/// Full-time master's applications export published by the admission
/// office.
pub const EXPORT_URL: &str =
    "https://priem45.hse.ru/ABITREPORTS/MAGREPORTS/FullTime/39121437.xls";

/// Online master's programs tracked by this scraper.
pub const TARGET_PROGRAMS: [&str; 23] = [
    "ОНЛАЙН Аналитика больших данных",
    "ОНЛАЙН Аналитика данных и прикладная статистика",
    "ОНЛАЙН Инвестиции на финансовых рынках",
    "ОНЛАЙН Инженерия данных",
    "ОНЛАЙН Интерактивный дизайн",
    "ОНЛАЙН Искусственный интеллект",
    "ОНЛАЙН Искусственный интеллект в маркетинге и управлении продуктом",
    "ОНЛАЙН Кибербезопасность",
    "ОНЛАЙН Китайский язык в межкультурной бизнес-коммуникации",
    "ОНЛАЙН ЛигалТех",
    "ОНЛАЙН Магистр аналитики бизнеса",
    "ОНЛАЙН Магистр по наукам о данных",
    "ОНЛАЙН Маркетинг - менеджмент",
    "ОНЛАЙН Педагогический дизайн: теория и практика обучения",
    "ОНЛАЙН Прикладная социальная психология",
    "ОНЛАЙН Управление в креативных индустриях",
    "ОНЛАЙН Управление инновационным бизнесом",
    "ОНЛАЙН Управление стратегическими коммуникациями",
    "ОНЛАЙН Управление цифровым продуктом",
    "ОНЛАЙН Финансы",
    "ОНЛАЙН Цифровая инженерия для компьютерных игр",
    "ОНЛАЙН Цифровая урбанистика и аналитика города",
    "ОНЛАЙН Экономический анализ",
];

/// Header strings the applicant-count column has carried over time,
/// newest first. The export is regenerated every admission cycle and the
/// header text drifts with it.
pub const COUNT_HEADERS: [&str; 5] = [
    "Количество поданных заявлений в магистратуру\nМосква на 22.07.2025\nОсновной этап",
    "Количество заявлений (места с оплатой стоимости обучения)",
    "Количество заявлений",
    "Заявлений",
    "Кол-во заявлений",
];
