//! Quiz flow: `/quiz`, topic selection, question generation, and
//! free-text answer grading with a cumulative score.

use bot_core::{Button, Chat, Result};
use tracing::{error, info};

use crate::state::{ChatState, ConversationContext};

use super::{discard_wait, send_wait, FlowEnv};

const QUIZ_IMAGE: &str = "5_quiz_neon";
const QUESTION_REQUEST: &str = "Згенеруй одне чітке питання квізу без відповіді.";

/// Quiz topics: button payload (also the prompt name) → menu label.
pub const TOPICS: &[(&str, &str)] = &[
    ("quiz_science", "🔬 Наука"),
    ("quiz_history", "📜 Історія"),
    ("quiz_tech", "💻 Технології"),
    ("quiz_space", "🛰️ Космос"),
    ("quiz_random", "🎲 Мікс"),
];

/// Keyword prefixes marking a judgement as negative. Checked before the
/// positive set: "неправильно" must not match the positive "правильно".
const NEGATIVE_KEYWORDS: &[&str] = &["неправ", "невір", "wrong", "incorrect"];
const POSITIVE_KEYWORDS: &[&str] = &["правильно", "вірно", "correct"];

/// Classifies a model judgement as correct/incorrect.
///
/// Prefix checks on the trimmed lower-cased text first (negative takes
/// priority), then the fallback heuristic: contains a positive keyword and
/// no negative one.
pub fn classify_judgement(judgement: &str) -> bool {
    let clean = judgement.trim().to_lowercase();

    if NEGATIVE_KEYWORDS.iter().any(|n| clean.starts_with(n)) {
        return false;
    }
    if POSITIVE_KEYWORDS.iter().any(|p| clean.starts_with(p)) {
        return true;
    }
    POSITIVE_KEYWORDS.iter().any(|p| clean.contains(p))
        && !NEGATIVE_KEYWORDS.iter().any(|n| clean.contains(n))
}

/// Shows the topic menu.
pub async fn enter(env: &FlowEnv<'_>, chat: &Chat, ctx: &mut ConversationContext) -> Result<()> {
    ctx.reset();
    info!(chat_id = chat.id, flow = "quiz", "showing topic menu");

    env.bot.send_image(chat, QUIZ_IMAGE).await?;
    ctx.state = ChatState::QuizSelectingTopic;

    let mut buttons: Vec<Button> = TOPICS
        .iter()
        .map(|(payload, label)| Button::new(*payload, *label))
        .collect();
    buttons.push(Button::new("start", "🏁 Завершити"));

    env.bot
        .send_text_buttons(chat, "❓ Оберіть тему квізу:", &buttons)
        .await?;
    Ok(())
}

/// Routes the quiz buttons: next question, topic change, topic selection.
pub async fn on_button(
    env: &FlowEnv<'_>,
    chat: &Chat,
    ctx: &mut ConversationContext,
    payload: &str,
) -> Result<()> {
    match payload {
        "quiz_next" => {
            let topic = match &ctx.state {
                ChatState::QuizBetweenQuestions { topic }
                | ChatState::QuizAwaitingAnswer { topic, .. } => topic.clone(),
                _ => {
                    env.bot
                        .send_text(chat, "❓ Спочатку оберіть тему квізу: /quiz")
                        .await?;
                    return Ok(());
                }
            };
            generate_question(env, chat, ctx, &topic).await
        }
        "quiz_change_topic" => enter(env, chat, ctx).await,
        topic => {
            // Topic selected: fresh session, score starts from zero.
            ctx.reset();
            generate_question(env, chat, ctx, topic).await
        }
    }
}

/// Generates one question for the topic and arms answer grading.
pub async fn generate_question(
    env: &FlowEnv<'_>,
    chat: &Chat,
    ctx: &mut ConversationContext,
    topic: &str,
) -> Result<()> {
    info!(chat_id = chat.id, flow = "quiz", topic, "generating question");
    let prompt = env.resources.prompt(topic)?;
    ctx.state = ChatState::QuizBetweenQuestions {
        topic: topic.to_string(),
    };

    let waiting = send_wait(env, chat, "🔍 Генерую питання...").await;

    match ctx.session.send_question(&prompt, QUESTION_REQUEST).await {
        Ok(question) => {
            discard_wait(env, chat, waiting).await;
            ctx.state = ChatState::QuizAwaitingAnswer {
                topic: topic.to_string(),
                question: question.clone(),
            };
            env.bot
                .send_text(
                    chat,
                    &format!("❓ *Питання:*\n\n{question}\n\n✍️ Напишіть вашу відповідь:"),
                )
                .await?;
        }
        Err(e) => {
            error!(chat_id = chat.id, flow = "quiz", error = %e, "question generation failed");
            discard_wait(env, chat, waiting).await;
            env.bot
                .send_text(chat, "⚠️ Не вдалось згенерувати питання.")
                .await?;
        }
    }
    Ok(())
}

/// Grades a free-text answer against the current question and shows the
/// cumulative score.
pub async fn check_answer(
    env: &FlowEnv<'_>,
    chat: &Chat,
    ctx: &mut ConversationContext,
    topic: &str,
    question: &str,
    answer: &str,
) -> Result<()> {
    let prompt = env.resources.prompt(topic)?;
    let waiting = send_wait(env, chat, "🔍 Перевіряю відповідь...").await;

    let grading_request = format!(
        "Ось питання: {question}\nОсь відповідь користувача: {answer}\n\
         Оціни відповідь. Напиши коротко: правильно чи ні, дай коротке пояснення."
    );

    match ctx.session.send_question(&prompt, &grading_request).await {
        Ok(judgement) => {
            discard_wait(env, chat, waiting).await;

            ctx.quiz_score.total += 1;
            let is_correct = classify_judgement(&judgement);
            if is_correct {
                ctx.quiz_score.correct += 1;
            }
            info!(
                chat_id = chat.id,
                flow = "quiz",
                correct = is_correct,
                score_correct = ctx.quiz_score.correct,
                score_total = ctx.quiz_score.total,
                "answer graded"
            );

            let score = format!(
                "✅ Правильних: {}\n❔ Всього: {}",
                ctx.quiz_score.correct, ctx.quiz_score.total
            );
            let buttons = [
                Button::new("quiz_next", "🔄 Наступне питання"),
                Button::new("quiz_change_topic", "🗂 Змінити тему"),
                Button::new("start", "🏁 Завершити"),
            ];
            env.bot
                .send_text_buttons(
                    chat,
                    &format!("📘 *Результат:*\n\n{judgement}\n\n📊 *Ваш рахунок:*\n{score}"),
                    &buttons,
                )
                .await?;

            ctx.state = ChatState::QuizBetweenQuestions {
                topic: topic.to_string(),
            };
        }
        Err(e) => {
            error!(chat_id = chat.id, flow = "quiz", error = %e, "answer grading failed");
            discard_wait(env, chat, waiting).await;
            // State stays QuizAwaitingAnswer so the user can retry.
            env.bot
                .send_text(chat, "⚠️ Помилка перевірки відповіді.")
                .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_prefix_is_correct() {
        assert!(classify_judgement("Правильно, тому що Земля обертається."));
        assert!(classify_judgement("  Вірно! Гарна відповідь."));
        assert!(classify_judgement("Correct, well done."));
    }

    #[test]
    fn negative_prefix_wins_over_contained_positive() {
        // "неправильно" contains "правильно"; the negative prefix decides.
        assert!(!classify_judgement("Неправильно, бо це сталося пізніше."));
        assert!(!classify_judgement("Невірно. Спробуйте ще."));
        assert!(!classify_judgement("Incorrect, the answer is 42."));
    }

    #[test]
    fn ambiguous_judgement_falls_to_heuristic() {
        // No recognized keyword at all: graded incorrect.
        assert!(!classify_judgement("Схоже на правду"));
        // Positive keyword mid-sentence, no negative: graded correct.
        assert!(classify_judgement("Так, це правильно по суті."));
        // Both keyword families present: graded incorrect.
        assert!(!classify_judgement("Майже правильно, але невірно в датах."));
    }
}
