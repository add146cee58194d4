//! Routing tests: commands reset the conversation, the `start` button exits
//! any flow to the main menu, state-gated free text is guarded, and unknown
//! buttons get the default acknowledgment.

mod common;

use bot_core::{Chat, Command, Update};
use common::{build_dispatcher, Sent};
use telegram_gpt_bot::ChatState;

async fn state_of(dispatcher: &telegram_gpt_bot::Dispatcher, chat: &Chat) -> ChatState {
    let ctx = dispatcher.store().context(chat).await;
    let guard = ctx.lock().await;
    guard.state.clone()
}

#[tokio::test]
async fn start_button_exits_mid_quiz_to_main_menu() {
    let (dispatcher, bot, completer) = build_dispatcher();
    let chat = Chat::new(1);

    completer.push_reply("Яка планета найбільша?");
    dispatcher.dispatch(Update::button(chat, "quiz_science")).await.unwrap();
    assert!(matches!(
        state_of(&dispatcher, &chat).await,
        ChatState::QuizAwaitingAnswer { .. }
    ));

    dispatcher.dispatch(Update::button(chat, "start")).await.unwrap();

    assert_eq!(state_of(&dispatcher, &chat).await, ChatState::Idle);
    assert_eq!(bot.menu_count(), 1);
    assert!(bot.texts().iter().any(|t| t == "message:main"));
}

#[tokio::test]
async fn start_button_exits_mid_resume_to_main_menu() {
    let (dispatcher, bot, _completer) = build_dispatcher();
    let chat = Chat::new(2);

    dispatcher
        .dispatch(Update::command(chat, Command::ResumeHelp))
        .await
        .unwrap();
    dispatcher
        .dispatch(Update::text(chat, "Тарас Шевченко"))
        .await
        .unwrap();
    assert!(matches!(
        state_of(&dispatcher, &chat).await,
        ChatState::ResumeCollecting { .. }
    ));

    dispatcher.dispatch(Update::button(chat, "start")).await.unwrap();

    assert_eq!(state_of(&dispatcher, &chat).await, ChatState::Idle);
    assert_eq!(bot.menu_count(), 1);
}

#[tokio::test]
async fn command_entry_clears_previous_flow_state() {
    let (dispatcher, _bot, completer) = build_dispatcher();
    let chat = Chat::new(3);

    // Score a quiz answer so there is state to leak.
    completer.push_reply("Питання?");
    dispatcher.dispatch(Update::button(chat, "quiz_tech")).await.unwrap();
    completer.push_reply("Правильно, саме так.");
    dispatcher.dispatch(Update::text(chat, "42")).await.unwrap();

    {
        let ctx = dispatcher.store().context(&chat).await;
        let guard = ctx.lock().await;
        assert_eq!(guard.quiz_score.total, 1);
    }

    dispatcher
        .dispatch(Update::command(chat, Command::Translate))
        .await
        .unwrap();

    let ctx = dispatcher.store().context(&chat).await;
    let guard = ctx.lock().await;
    assert_eq!(guard.state, ChatState::TranslateSelecting);
    assert_eq!(guard.quiz_score.total, 0);
    assert_eq!(guard.quiz_score.correct, 0);
    assert!(guard.session.history().is_empty());
    assert!(guard.fact_history.is_empty());
}

#[tokio::test]
async fn text_without_selected_language_is_guarded() {
    let (dispatcher, bot, completer) = build_dispatcher();
    let chat = Chat::new(4);

    dispatcher
        .dispatch(Update::command(chat, Command::Translate))
        .await
        .unwrap();
    assert_eq!(completer.calls(), 0);

    dispatcher.dispatch(Update::text(chat, "привіт")).await.unwrap();

    assert_eq!(completer.calls(), 0, "no completion call may happen");
    assert_eq!(state_of(&dispatcher, &chat).await, ChatState::TranslateSelecting);
    assert_eq!(
        bot.last_text().unwrap(),
        "🌐 Спочатку оберіть мову: /translate"
    );
}

#[tokio::test]
async fn text_without_selected_persona_is_guarded() {
    let (dispatcher, bot, completer) = build_dispatcher();
    let chat = Chat::new(5);

    dispatcher.dispatch(Update::command(chat, Command::Talk)).await.unwrap();
    dispatcher.dispatch(Update::text(chat, "привіт")).await.unwrap();

    assert_eq!(completer.calls(), 0);
    assert_eq!(state_of(&dispatcher, &chat).await, ChatState::TalkSelecting);
    assert_eq!(
        bot.last_text().unwrap(),
        "😕 Спочатку виберіть особистість командою /talk"
    );
}

#[tokio::test]
async fn unknown_button_gets_default_acknowledgment() {
    let (dispatcher, bot, _completer) = build_dispatcher();
    let chat = Chat::new(6);

    dispatcher.dispatch(Update::button(chat, "mystery_button")).await.unwrap();

    let last = bot.last_text().unwrap();
    assert!(last.contains("Натиснута кнопка: mystery_button"));
    assert_eq!(state_of(&dispatcher, &chat).await, ChatState::Idle);
}

#[tokio::test]
async fn idle_keyword_text_launches_quiz_flow() {
    let (dispatcher, bot, _completer) = build_dispatcher();
    let chat = Chat::new(7);

    dispatcher.dispatch(Update::text(chat, "хочу квіз!")).await.unwrap();

    assert_eq!(state_of(&dispatcher, &chat).await, ChatState::QuizSelectingTopic);
    let texts = bot.texts();
    assert!(texts.iter().any(|t| t.contains("Починаємо квіз")));
    assert!(texts.iter().any(|t| t.contains("Оберіть тему квізу")));
}

#[tokio::test]
async fn unmatched_idle_text_falls_back_and_returns_to_menu() {
    let (dispatcher, bot, completer) = build_dispatcher();
    let chat = Chat::new(8);

    dispatcher
        .dispatch(Update::text(chat, "доброго ранку"))
        .await
        .unwrap();

    assert_eq!(completer.calls(), 0);
    assert_eq!(state_of(&dispatcher, &chat).await, ChatState::Idle);
    let texts = bot.texts();
    assert!(texts.iter().any(|t| t.contains("💡 Підказка: ")));
    assert!(texts.iter().any(|t| t == "message:main"));
    assert_eq!(bot.menu_count(), 1);
}

#[tokio::test]
async fn quiz_change_topic_reopens_menu_and_drops_score() {
    let (dispatcher, bot, completer) = build_dispatcher();
    let chat = Chat::new(9);

    completer.push_reply("Питання?");
    dispatcher.dispatch(Update::button(chat, "quiz_space")).await.unwrap();
    completer.push_reply("Вірно!");
    dispatcher.dispatch(Update::text(chat, "так")).await.unwrap();

    dispatcher
        .dispatch(Update::button(chat, "quiz_change_topic"))
        .await
        .unwrap();

    let ctx = dispatcher.store().context(&chat).await;
    let guard = ctx.lock().await;
    assert_eq!(guard.state, ChatState::QuizSelectingTopic);
    assert_eq!(guard.quiz_score.total, 0);
    drop(guard);

    assert!(bot
        .sent()
        .iter()
        .any(|s| matches!(s, Sent::Buttons { payloads, .. } if payloads.contains(&"quiz_science".to_string()))));
}

#[tokio::test]
async fn quiz_next_without_topic_is_guarded() {
    let (dispatcher, bot, completer) = build_dispatcher();
    let chat = Chat::new(10);

    dispatcher.dispatch(Update::button(chat, "quiz_next")).await.unwrap();

    assert_eq!(completer.calls(), 0);
    assert_eq!(
        bot.last_text().unwrap(),
        "❓ Спочатку оберіть тему квізу: /quiz"
    );
}
