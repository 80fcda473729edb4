//! Store, runner and the scripted API driven together.

use std::sync::Arc;

use services::{ApiCall, EffectRunner, InMemoryTutorApi, Operation};
use tutor_core::model::{
    CHAT_FALLBACK_REPLY, ChatRole, HistoryEntry, LeaderboardSnapshot, QuizId, Subject,
    SubjectStats,
};
use tutor_core::store::{
    Action, ChatStatus, PROGRESS_FAILED_ALERT, ProgressStatus, QuizPhase, SUBMIT_FAILED_ALERT,
    Section, Store,
};
use tutor_core::time::fixed_clock;

fn harness() -> (Store, EffectRunner, InMemoryTutorApi) {
    let api = InMemoryTutorApi::new();
    let runner = EffectRunner::new(Arc::new(api.clone()), "lycée");
    (Store::new(fixed_clock()), runner, api)
}

async fn start_quiz(store: &mut Store, runner: &EffectRunner, topic: &str) {
    runner
        .dispatch(store, Action::EditTopic(topic.to_string()))
        .await;
    runner.dispatch(store, Action::GenerateQuiz).await;
}

#[tokio::test]
async fn init_loads_history_for_the_default_subject() {
    let (mut store, runner, api) = harness();
    let api = api.with_history(
        Subject::HistoireGeo,
        vec![
            HistoryEntry::new(ChatRole::User, "Bonjour"),
            HistoryEntry::new(ChatRole::Assistant, "Salut !"),
        ],
    );

    runner.dispatch(&mut store, Action::Init).await;

    assert_eq!(store.chat().messages().len(), 2);
    assert!(!store.chat().shows_welcome());
    assert_eq!(api.calls(), vec![ApiCall::FetchHistory(Subject::HistoireGeo)]);
}

#[tokio::test]
async fn chat_round_trip_uses_the_configured_level() {
    let (mut store, runner, api) = harness();
    api.set_reply("Les mitochondries produisent l'énergie.");
    runner
        .dispatch(&mut store, Action::SelectChatSubject(Subject::Svt))
        .await;
    runner
        .dispatch(&mut store, Action::EditChatInput("  Mitochondrie ?  ".into()))
        .await;
    runner.dispatch(&mut store, Action::SendMessage).await;

    let messages = store.chat().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content(), "Mitochondrie ?");
    assert_eq!(messages[1].role(), ChatRole::Assistant);
    assert_eq!(store.chat().status(), ChatStatus::Idle);
    assert!(store.chat().wants_focus());
    assert!(!store.is_loading());
    assert!(api.calls().contains(&ApiCall::SendChat {
        subject: Subject::Svt,
        message: "Mitochondrie ?".to_string(),
        student_level: "lycée".to_string(),
    }));
}

#[tokio::test]
async fn failed_send_shows_fallback_without_touching_server_history() {
    let (mut store, runner, api) = harness();
    api.fail(Operation::SendChat);
    runner
        .dispatch(&mut store, Action::EditChatInput("Bonjour".into()))
        .await;
    runner.dispatch(&mut store, Action::SendMessage).await;

    let last = store.chat().messages().last().expect("fallback");
    assert_eq!(last.content(), CHAT_FALLBACK_REPLY);
    assert_eq!(store.chat().status(), ChatStatus::Idle);
    assert!(store.alert().is_none());
    assert!(api.history(Subject::HistoireGeo).is_empty());
}

#[tokio::test]
async fn declined_clear_issues_no_delete() {
    let (mut store, runner, api) = harness();
    runner.dispatch(&mut store, Action::RequestClearHistory).await;
    runner.dispatch(&mut store, Action::CancelClearHistory).await;

    assert!(
        api.calls()
            .iter()
            .all(|call| call.operation() != Operation::ClearHistory)
    );
}

#[tokio::test]
async fn confirmed_clear_deletes_then_reloads() {
    let (mut store, runner, api) = harness();
    let api = api.with_history(
        Subject::HistoireGeo,
        vec![HistoryEntry::new(ChatRole::User, "Bonjour")],
    );
    runner.dispatch(&mut store, Action::Init).await;
    runner.dispatch(&mut store, Action::RequestClearHistory).await;
    runner.dispatch(&mut store, Action::ConfirmClearHistory).await;

    assert_eq!(
        api.calls(),
        vec![
            ApiCall::FetchHistory(Subject::HistoireGeo),
            ApiCall::ClearHistory(Subject::HistoireGeo),
            ApiCall::FetchHistory(Subject::HistoireGeo),
        ]
    );
    assert!(store.chat().shows_welcome());
}

#[tokio::test]
async fn quiz_lifecycle_submits_answers_in_question_order() {
    let (mut store, runner, api) = harness();
    runner
        .dispatch(&mut store, Action::SelectQuestionCount(3))
        .await;
    start_quiz(&mut store, &runner, "La cellule").await;
    assert!(matches!(store.quiz().phase(), QuizPhase::InProgress(_)));
    let quiz_id = store.session().active_quiz_id().cloned().expect("quiz id");

    for (question, option) in [(0, 1), (1, 0), (2, 2)] {
        runner
            .dispatch(&mut store, Action::SelectOption { question, option })
            .await;
    }
    runner.dispatch(&mut store, Action::SubmitQuiz).await;

    let submits: Vec<_> = api
        .calls()
        .into_iter()
        .filter(|call| call.operation() == Operation::SubmitQuiz)
        .collect();
    assert_eq!(
        submits,
        vec![ApiCall::SubmitQuiz {
            quiz_id,
            answers: vec![1, 0, 2],
        }]
    );
    let QuizPhase::Reviewing(review) = store.quiz().phase() else {
        panic!("expected review, got {:?}", store.quiz().phase());
    };
    assert_eq!(review.result().total, 3);
}

#[tokio::test]
async fn incomplete_quiz_never_reaches_the_network() {
    let (mut store, runner, api) = harness();
    start_quiz(&mut store, &runner, "Rome").await;
    runner
        .dispatch(&mut store, Action::SelectOption { question: 0, option: 0 })
        .await;
    runner
        .dispatch(&mut store, Action::SelectOption { question: 2, option: 1 })
        .await;
    runner.dispatch(&mut store, Action::SubmitQuiz).await;

    assert_eq!(
        store.alert().map(|alert| alert.message()),
        Some("Veuillez répondre à la question 2")
    );
    assert!(
        api.calls()
            .iter()
            .all(|call| call.operation() != Operation::SubmitQuiz)
    );
}

#[tokio::test]
async fn failed_submit_keeps_selections_for_retry() {
    let (mut store, runner, api) = harness();
    runner
        .dispatch(&mut store, Action::SelectQuestionCount(3))
        .await;
    start_quiz(&mut store, &runner, "ADN").await;
    for question in 0..3 {
        runner
            .dispatch(&mut store, Action::SelectOption { question, option: 0 })
            .await;
    }
    api.fail(Operation::SubmitQuiz);
    runner.dispatch(&mut store, Action::SubmitQuiz).await;

    assert_eq!(
        store.alert().map(|alert| alert.message()),
        Some(SUBMIT_FAILED_ALERT)
    );
    let QuizPhase::InProgress(sheet) = store.quiz().phase() else {
        panic!("quiz should still be in progress");
    };
    assert_eq!(sheet.selection(2), Some(0));

    api.recover(Operation::SubmitQuiz);
    runner.dispatch(&mut store, Action::DismissAlert).await;
    runner.dispatch(&mut store, Action::SubmitQuiz).await;
    assert!(matches!(store.quiz().phase(), QuizPhase::Reviewing(_)));
}

#[tokio::test]
async fn reset_clears_quiz_identity() {
    let (mut store, runner, _api) = harness();
    start_quiz(&mut store, &runner, "Rome").await;
    assert_eq!(store.session().active_quiz_id(), Some(&QuizId::numeric(1)));

    runner.dispatch(&mut store, Action::ResetQuiz).await;

    assert!(matches!(store.quiz().phase(), QuizPhase::Generating));
    assert!(store.session().active_quiz_id().is_none());
    assert!(store.session().collected_answers().is_empty());
    assert!(store.quiz().form().topic.is_empty());
}

#[tokio::test]
async fn every_visit_to_progress_refetches() {
    let (mut store, runner, api) = harness();
    let mut snapshot = LeaderboardSnapshot {
        total_points: 50,
        total_quizzes: 2,
        ..LeaderboardSnapshot::default()
    };
    snapshot
        .subjects
        .insert(Subject::Svt, SubjectStats::default());
    api.set_leaderboard(snapshot.clone());

    runner
        .dispatch(&mut store, Action::Navigate(Section::Progress))
        .await;
    runner
        .dispatch(&mut store, Action::Navigate(Section::Chat))
        .await;
    runner
        .dispatch(&mut store, Action::Navigate(Section::Progress))
        .await;

    let fetches = api
        .calls()
        .iter()
        .filter(|call| **call == ApiCall::FetchLeaderboard)
        .count();
    assert_eq!(fetches, 2);
    assert_eq!(store.progress().snapshot(), Some(&snapshot));
    assert_eq!(store.progress().status(), &ProgressStatus::Ready);
}

#[tokio::test]
async fn leaderboard_failure_alerts_and_keeps_prior_snapshot() {
    let (mut store, runner, api) = harness();
    runner
        .dispatch(&mut store, Action::Navigate(Section::Progress))
        .await;
    api.fail(Operation::FetchLeaderboard);
    runner
        .dispatch(&mut store, Action::Navigate(Section::Progress))
        .await;

    assert_eq!(
        store.alert().map(|alert| alert.message()),
        Some(PROGRESS_FAILED_ALERT)
    );
    assert!(matches!(store.progress().status(), ProgressStatus::Failed(_)));
    assert_eq!(
        store.progress().snapshot(),
        Some(&LeaderboardSnapshot::default())
    );
}

#[tokio::test]
async fn subject_refresh_fetches_only_that_subject() {
    let (mut store, runner, api) = harness();
    runner
        .dispatch(&mut store, Action::Navigate(Section::Progress))
        .await;

    let mut snapshot = LeaderboardSnapshot::default();
    snapshot.subjects.insert(
        Subject::Svt,
        SubjectStats {
            total_points: 25,
            quizzes_completed: 1,
            ..SubjectStats::default()
        },
    );
    api.set_leaderboard(snapshot);
    runner
        .dispatch(&mut store, Action::RefreshSubject(Subject::Svt))
        .await;

    assert_eq!(
        api.calls(),
        vec![
            ApiCall::FetchLeaderboard,
            ApiCall::FetchSubjectProgress(Subject::Svt),
        ]
    );
    let shown = store.progress().snapshot().expect("snapshot");
    assert_eq!(shown.subject(Subject::Svt).total_points, 25);
    assert_eq!(shown.total_points, 0);
}
