//! Per-chat conversation state.
//!
//! The flow position is a closed enum ([`ChatState`]) carrying the fields
//! that state needs as payload, instead of a free-form string plus a loose
//! field bag. [`ConversationContext`] bundles the state with the scratch
//! data that outlives single transitions (fact history, quiz score) and the
//! chat's own LLM session. Everything is process-memory only and lost on
//! restart.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use bot_core::Chat;
use llm_session::{ChatCompleter, ChatSession};
use tokio::sync::Mutex;

/// Resume questionnaire steps, in collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeStep {
    Name,
    Education,
    Experience,
    Skills,
}

/// Answers collected so far by the resume flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeDraft {
    pub name: String,
    pub education: String,
    pub experience: String,
    pub skills: String,
}

/// Where the conversation currently is. `Idle` means no active flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChatState {
    #[default]
    Idle,
    /// Fact delivered; "more facts" / "finish" buttons are live.
    Fact,
    /// Open Q&A dialogue with the gpt prompt loaded.
    Gpt,
    /// Persona menu shown, nothing chosen yet.
    TalkSelecting,
    /// Dialogue with the chosen persona (payload slug, e.g. `talk_elon_musk`).
    TalkChatting { persona: String },
    /// Quiz topic menu shown.
    QuizSelectingTopic,
    /// Question delivered; the next free-text message is the answer.
    QuizAwaitingAnswer { topic: String, question: String },
    /// Answer graded; waiting for "next question" / "change topic" buttons.
    QuizBetweenQuestions { topic: String },
    /// Language menu shown, nothing chosen yet.
    TranslateSelecting,
    /// Language chosen (payload, e.g. `translate_en`); texts get translated.
    Translating { lang: String },
    /// Collecting resume answers, one step at a time.
    ResumeCollecting { step: ResumeStep, draft: ResumeDraft },
    /// Resume delivered; only restart/finish buttons remain.
    ResumeDone,
}

/// Cumulative quiz score for the current topic session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: u32,
    pub total: u32,
}

/// Recently delivered facts, oldest first, capped at
/// [`FactHistory::CAPACITY`] with FIFO eviction.
#[derive(Debug, Clone, Default)]
pub struct FactHistory {
    facts: VecDeque<String>,
}

impl FactHistory {
    pub const CAPACITY: usize = 25;

    pub fn contains(&self, fact: &str) -> bool {
        self.facts.iter().any(|f| f == fact)
    }

    /// Records a delivered fact, evicting the oldest entry when full.
    pub fn push(&mut self, fact: String) {
        self.facts.push_back(fact);
        if self.facts.len() > Self::CAPACITY {
            self.facts.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.facts.iter()
    }
}

/// All mutable state of one chat: flow position, scratch data, and the
/// chat's isolated completion session.
pub struct ConversationContext {
    pub state: ChatState,
    pub fact_history: FactHistory,
    pub quiz_score: QuizScore,
    pub session: ChatSession,
}

impl ConversationContext {
    pub fn new(completer: Arc<dyn ChatCompleter>) -> Self {
        Self {
            state: ChatState::Idle,
            fact_history: FactHistory::default(),
            quiz_score: QuizScore::default(),
            session: ChatSession::new(completer),
        }
    }

    /// Full clear: back to idle, every scratch field dropped, session
    /// history gone. There is no partial-clear semantics.
    pub fn reset(&mut self) {
        self.state = ChatState::Idle;
        self.fact_history = FactHistory::default();
        self.quiz_score = QuizScore::default();
        self.session.clear();
    }
}

/// Lazily-populated map from chat id to that chat's context. Each context
/// sits behind its own async mutex: a handler holds the lock for the whole
/// update, which serializes one chat's handlers while different chats
/// interleave freely at suspension points.
#[derive(Clone)]
pub struct StateStore {
    completer: Arc<dyn ChatCompleter>,
    contexts: Arc<Mutex<HashMap<i64, Arc<Mutex<ConversationContext>>>>>,
}

impl StateStore {
    pub fn new(completer: Arc<dyn ChatCompleter>) -> Self {
        Self {
            completer,
            contexts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the chat's context, creating it on first reference.
    pub async fn context(&self, chat: &Chat) -> Arc<Mutex<ConversationContext>> {
        let mut map = self.contexts.lock().await;
        map.entry(chat.id)
            .or_insert_with(|| {
                Arc::new(Mutex::new(ConversationContext::new(self.completer.clone())))
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use llm_session::ChatMessage;

    struct NoopCompleter;

    #[async_trait]
    impl ChatCompleter for NoopCompleter {
        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
            Ok(String::new())
        }
    }

    fn context() -> ConversationContext {
        ConversationContext::new(Arc::new(NoopCompleter))
    }

    #[test]
    fn fact_history_caps_at_25_evicting_oldest() {
        let mut history = FactHistory::default();
        for i in 1..=26 {
            history.push(format!("fact {i}"));
        }
        assert_eq!(history.len(), 25);
        assert_eq!(history.iter().next().unwrap(), "fact 2");
        assert!(!history.contains("fact 1"));
        assert!(history.contains("fact 26"));
    }

    #[test]
    fn reset_clears_state_scratch_and_session() {
        let mut ctx = context();
        ctx.state = ChatState::QuizBetweenQuestions {
            topic: "quiz_science".into(),
        };
        ctx.quiz_score = QuizScore { correct: 3, total: 5 };
        ctx.fact_history.push("a fact".into());
        ctx.session.set_prompt("quiz prompt");

        ctx.reset();

        assert_eq!(ctx.state, ChatState::Idle);
        assert_eq!(ctx.quiz_score, QuizScore::default());
        assert!(ctx.fact_history.is_empty());
        assert!(ctx.session.history().is_empty());
    }

    #[tokio::test]
    async fn store_returns_same_context_for_same_chat() {
        let store = StateStore::new(Arc::new(NoopCompleter));
        let chat = Chat::new(7);
        let a = store.context(&chat).await;
        let b = store.context(&chat).await;
        assert!(Arc::ptr_eq(&a, &b));

        let other = store.context(&Chat::new(8)).await;
        assert!(!Arc::ptr_eq(&a, &other));
    }
}
