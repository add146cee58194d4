//! Resume flow: `/resume_help` collects name, education, experience, and
//! skills one message at a time, then assembles a resume in one shot.

use bot_core::{Button, Chat, Result};
use tracing::{debug, error, info};

use crate::state::{ChatState, ConversationContext, ResumeDraft, ResumeStep};

use super::{discard_wait, send_wait, FlowEnv};

const RESUME_IMAGE: &str = "7_resume_neon";

/// Starts the questionnaire from the first step.
pub async fn enter(env: &FlowEnv<'_>, chat: &Chat, ctx: &mut ConversationContext) -> Result<()> {
    ctx.reset();
    info!(chat_id = chat.id, flow = "resume", "starting questionnaire");

    env.bot.send_image(chat, RESUME_IMAGE).await?;
    ctx.state = ChatState::ResumeCollecting {
        step: ResumeStep::Name,
        draft: ResumeDraft::default(),
    };

    env.bot
        .send_text(
            chat,
            "💼 Давайте створимо Ваше резюме!\n\n\
             ✍️ Почнемо. Напишіть будь-ласка, *Ваше імʼя та прізвище*.",
        )
        .await?;
    Ok(())
}

/// Consumes one answer, stores it in the draft, and asks the next question;
/// the final answer triggers generation.
pub async fn collect(
    env: &FlowEnv<'_>,
    chat: &Chat,
    ctx: &mut ConversationContext,
    text: &str,
) -> Result<()> {
    let (step, mut draft) = match &ctx.state {
        ChatState::ResumeCollecting { step, draft } => (*step, draft.clone()),
        ChatState::ResumeDone => {
            // The resume is already delivered; only the buttons matter now.
            debug!(chat_id = chat.id, flow = "resume", "text after completion ignored");
            return Ok(());
        }
        _ => return Ok(()),
    };

    match step {
        ResumeStep::Name => {
            draft.name = text.to_string();
            ctx.state = ChatState::ResumeCollecting {
                step: ResumeStep::Education,
                draft,
            };
            env.bot
                .send_text(
                    chat,
                    "🎓 Добре! Тепер напишіть інформацію про *Вашу освіту*.\n\
                     (ВНЗ, спеціальність, роки)",
                )
                .await?;
        }
        ResumeStep::Education => {
            draft.education = text.to_string();
            ctx.state = ChatState::ResumeCollecting {
                step: ResumeStep::Experience,
                draft,
            };
            env.bot
                .send_text(
                    chat,
                    "💼 Чудово! Тепер опишіть *Досвід роботи*.\n\
                     (Компанія, посада, обовʼязки, роки)",
                )
                .await?;
        }
        ResumeStep::Experience => {
            draft.experience = text.to_string();
            ctx.state = ChatState::ResumeCollecting {
                step: ResumeStep::Skills,
                draft,
            };
            env.bot
                .send_text(chat, "🛠️ Супер! А тепер напишіть *Ваші ключові навички*.")
                .await?;
        }
        ResumeStep::Skills => {
            draft.skills = text.to_string();
            ctx.state = ChatState::ResumeDone;
            generate(env, chat, ctx, &draft).await?;
        }
    }
    Ok(())
}

/// Assembles the collected draft into one resume-generation request.
async fn generate(
    env: &FlowEnv<'_>,
    chat: &Chat,
    ctx: &mut ConversationContext,
    draft: &ResumeDraft,
) -> Result<()> {
    info!(chat_id = chat.id, flow = "resume", "generating resume");
    let prompt = env.resources.prompt("resume_help")?;

    let request = format!(
        "Імʼя: {}\nОсвіта: {}\nДосвід роботи: {}\nНавички: {}\n\
         Склади резюме у заданому форматі.",
        draft.name, draft.education, draft.experience, draft.skills
    );

    let waiting = send_wait(env, chat, "🔍 Формую ваше резюме...").await;

    match ctx.session.send_question(&prompt, &request).await {
        Ok(resume_text) => {
            discard_wait(env, chat, waiting).await;
            let buttons = [
                Button::new("start", "🏁 Завершити"),
                Button::new("resume_restart", "🔄 Почати заново"),
            ];
            env.bot
                .send_text_buttons(
                    chat,
                    &format!("📄 *Ваше резюме готове:*\n\n{resume_text}"),
                    &buttons,
                )
                .await?;
        }
        Err(e) => {
            error!(chat_id = chat.id, flow = "resume", error = %e, "resume generation failed");
            discard_wait(env, chat, waiting).await;
            env.bot
                .send_text(chat, "⚠️ Не вдалося сформувати резюме.")
                .await?;
        }
    }
    Ok(())
}

/// The restart button: wipe everything and begin from the first question.
pub async fn restart(env: &FlowEnv<'_>, chat: &Chat, ctx: &mut ConversationContext) -> Result<()> {
    enter(env, chat, ctx).await
}
