//! Idle-state intent inference.
//!
//! When no flow is active, free text is lower-cased and tested against
//! fixed keyword sets, one set per flow, in a fixed priority order. The
//! first set with any substring match wins. This is a best-effort
//! heuristic, not a classifier; false negatives are expected.

use rand::seq::SliceRandom;

/// Flow chosen by the keyword heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Fact,
    Gpt,
    Talk,
    Quiz,
    Translate,
    Resume,
}

/// Keyword sets in priority order. Ties between sets resolve by this order,
/// not by match count or position.
const KEYWORD_SETS: &[(Intent, &[&str])] = &[
    (Intent::Fact, &["факт", "facts", "random", "випадков"]),
    (Intent::Gpt, &["gpt", "чат", "питання", "запита", "дізнатися"]),
    (Intent::Talk, &["розмов", "говори", "особист", "легенд", "talk"]),
    (Intent::Quiz, &["квіз", "вікторин", "quiz", "питання тест"]),
    (
        Intent::Translate,
        &["переклад", "translate", "перекладач", "перекласти"],
    ),
    (Intent::Resume, &["резюме", "resume", "cv", "робота", "help resume"]),
];

const FUNNY_POOL: &[&str] = &[
    "🤔 Хмм… Я трохи заплутався.",
    "🧐 Дуже цікаво! Але не дуже схоже на команду.",
    "😅 Ого! Оце повідомлення!",
    "🤖 *Перезавантаження нейромереж…*",
    "🦄 Це виглядає магічно, але незрозуміло.",
    "🕵️ Аналізую ваше повідомлення…",
    "🎲 Випадкове повідомлення? Випадковий бот!",
    "📱 *тисне кнопки* Так… ні… все ще не те…",
    "🌈 Незвично, але мені подобається 😄",
    "🤓 Алгоритми розгубилися, але я тримаюсь!",
];

const HINT_POOL: &[&str] = &[
    "🤖 Хочете поставити питання? Використайте /gpt",
    "🎲 Спробуйте /random — цікавий факт вас чекає",
    "👤 Хочете поговорити з легендою? Команда /talk",
    "🧠 Перевірте знання — введіть /quiz",
    "🌐 Потрібен переклад? Використайте /translate",
    "💼 Створити резюме? Спробуйте /resume_help",
    "🏠 Повернутися в меню — /start",
];

/// Picks the flow for an idle free-text message, if any keyword matches.
pub fn detect(text: &str) -> Option<Intent> {
    let lowered = text.to_lowercase();
    for (intent, keywords) in KEYWORD_SETS {
        if keywords.iter().any(|k| lowered.contains(k)) {
            return Some(*intent);
        }
    }
    None
}

/// Short "switching mode" notice shown before launching the inferred flow.
pub fn notice(intent: Intent) -> &'static str {
    match intent {
        Intent::Fact => "🧠 Бачу, вас цікавлять факти!",
        Intent::Gpt => "🤖 Перемикаю в режим ChatGPT…",
        Intent::Talk => "👤 Хочете поговорити з легендою? Вмикаю режим…",
        Intent::Quiz => "🧠 Починаємо квіз! Готую теми…",
        Intent::Translate => "🌐 Перемикаю в режим перекладу…",
        Intent::Resume => "💼 Розпочинаємо створення резюме!",
    }
}

/// One random "did not understand" line paired with one random hint.
pub fn funny_fallback() -> String {
    let mut rng = rand::thread_rng();
    let funny = FUNNY_POOL
        .choose(&mut rng)
        .copied()
        .unwrap_or(FUNNY_POOL[0]);
    let hint = HINT_POOL.choose(&mut rng).copied().unwrap_or(HINT_POOL[0]);
    format!("{funny}\n\n💡 Підказка: {hint}")
}
