use std::future::pending;
use std::sync::Arc;

use services::{InMemoryTutorApi, Operation, RequestFailure, ServiceInfo, TutorApi};
use tutor_core::model::{
    Badge, ChatRole, GeneratedQuiz, HistoryEntry, LeaderboardSnapshot, QuizId, QuizRequest,
    QuizResult, Subject, SubjectStats,
};
use tutor_core::store::{Action, QuizPhase};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_api};

#[tokio::test(flavor = "current_thread")]
async fn chat_view_smoke_renders_welcome_for_empty_history() {
    let mut harness = setup_view_harness(ViewKind::Chat, InMemoryTutorApi::new());
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Bonjour ! Je suis ton tuteur personnel"),
        "missing welcome in {html}"
    );
    assert!(html.contains("Histoire-Géo"), "missing subject tab in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn chat_view_smoke_renders_loaded_history() {
    let api = InMemoryTutorApi::new().with_history(
        Subject::HistoireGeo,
        vec![
            HistoryEntry::new(ChatRole::User, "Qui a construit Versailles ?"),
            HistoryEntry::new(ChatRole::Assistant, "Louis XIV."),
        ],
    );
    let mut harness = setup_view_harness(ViewKind::Chat, api);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Qui a construit Versailles ?"), "missing question in {html}");
    assert!(html.contains("Louis XIV."), "missing reply in {html}");
    assert!(!html.contains("Je suis ton tuteur personnel"), "welcome should be gone: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn chat_view_smoke_send_and_reply() {
    let api = InMemoryTutorApi::new();
    api.set_reply("La **photosynthèse** produit du glucose.");
    let mut harness = setup_view_harness(ViewKind::Chat, api.clone());
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(Action::EditChatInput("C'est quoi la photosynthèse ?".into()));
    harness.dispatch(Action::SendMessage);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("C'est quoi la photosynthèse ?"), "missing user message in {html}");
    assert!(html.contains("<strong>photosynthèse</strong>"), "missing reply in {html}");
    assert_eq!(api.history(Subject::HistoireGeo).len(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn chat_view_smoke_clear_confirmation() {
    let api = InMemoryTutorApi::new()
        .with_history(Subject::HistoireGeo, vec![HistoryEntry::new(ChatRole::User, "Salut")]);
    let mut harness = setup_view_harness(ViewKind::Chat, api.clone());
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(Action::RequestClearHistory);
    let html = harness.render();
    assert!(html.contains("Êtes-vous sûr"), "missing confirmation in {html}");

    harness.dispatch(Action::ConfirmClearHistory);
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains("Êtes-vous sûr"), "confirmation should close: {html}");
    assert!(html.contains("Je suis ton tuteur personnel"), "history should be empty: {html}");
    assert!(api.history(Subject::HistoireGeo).is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_empty_topic_alerts() {
    let api = InMemoryTutorApi::new();
    let mut harness = setup_view_harness(ViewKind::Quiz, api.clone());
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(Action::GenerateQuiz);
    let html = harness.render();
    assert!(
        html.contains("Veuillez entrer un sujet pour le quiz"),
        "missing alert in {html}"
    );
    assert!(
        api.calls()
            .iter()
            .all(|call| call.operation() != Operation::GenerateQuiz)
    );

    harness.dispatch(Action::DismissAlert);
    assert!(!harness.render().contains("Veuillez entrer"));
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_full_lifecycle() {
    let mut harness = setup_view_harness(ViewKind::Quiz, InMemoryTutorApi::new());
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Générer le quiz"), "missing generator in {html}");

    harness.dispatch(Action::EditTopic("Les volcans".into()));
    harness.dispatch(Action::SelectQuestionCount(3));
    harness.dispatch(Action::GenerateQuiz);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Quiz : Les volcans"), "missing quiz title in {html}");
    assert!(html.contains("Question 3"), "missing third question in {html}");

    for question in 0..3 {
        harness.dispatch(Action::SelectOption {
            question,
            option: 0,
        });
    }
    harness.dispatch(Action::SubmitQuiz);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("100%"), "missing score in {html}");
    assert!(html.contains("3/3 - Excellent !"), "missing summary in {html}");

    harness.dispatch(Action::ResetQuiz);
    let store = harness.store();
    assert!(matches!(store.quiz().phase(), QuizPhase::Generating));
    assert!(store.session().active_quiz_id().is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_renders_dashboard() {
    let api = InMemoryTutorApi::new();
    let mut snapshot = LeaderboardSnapshot {
        total_points: 40,
        total_quizzes: 1,
        badges: vec![Badge {
            icon: "🥇".into(),
            name: "Premier pas".into(),
        }],
        ..LeaderboardSnapshot::default()
    };
    snapshot.subjects.insert(
        Subject::Svt,
        SubjectStats {
            total_points: 40,
            quizzes_completed: 1,
            avg_score: 80.0,
            best_score: 80.0,
            ..SubjectStats::default()
        },
    );
    api.set_leaderboard(snapshot);

    let mut harness = setup_view_harness(ViewKind::Progress, api);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Débutant"), "missing default level in {html}");
    assert!(html.contains("Premier pas"), "missing badge in {html}");
    assert!(html.contains("80%"), "missing average in {html}");
    assert!(html.contains("Aucun quiz complété"), "missing placeholder in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_refreshes_one_subject() {
    let api = InMemoryTutorApi::new();
    let mut harness = setup_view_harness(ViewKind::Progress, api.clone());
    harness.rebuild();
    harness.settle().await;
    assert!(harness.render().contains("refresh-svt"));

    let mut snapshot = LeaderboardSnapshot::default();
    snapshot.subjects.insert(
        Subject::Svt,
        SubjectStats {
            total_points: 15,
            quizzes_completed: 1,
            ..SubjectStats::default()
        },
    );
    api.set_leaderboard(snapshot);
    harness.dispatch(Action::RefreshSubject(Subject::Svt));
    harness.settle().await;

    let svt = harness
        .store()
        .progress()
        .snapshot()
        .map(|snapshot| snapshot.subject(Subject::Svt).total_points);
    assert_eq!(svt, Some(15));
    assert!(harness.render().contains("🔄 Actualiser"));
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_renders_error_state() {
    let api = InMemoryTutorApi::new();
    api.fail(Operation::FetchLeaderboard);
    let mut harness = setup_view_harness(ViewKind::Progress, api);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Erreur lors du chargement de la progression"),
        "missing error in {html}"
    );
    assert!(!html.contains("Points totaux"), "stat blocks should be hidden: {html}");
}

/// Accepts every request and never answers.
struct StalledApi;

#[async_trait::async_trait]
impl TutorApi for StalledApi {
    async fn send_chat_message(
        &self,
        _subject: Subject,
        _message: &str,
        _student_level: &str,
    ) -> Result<String, RequestFailure> {
        pending().await
    }

    async fn fetch_history(&self, _subject: Subject) -> Result<Vec<HistoryEntry>, RequestFailure> {
        pending().await
    }

    async fn clear_history(&self, _subject: Subject) -> Result<(), RequestFailure> {
        pending().await
    }

    async fn generate_quiz(&self, _request: &QuizRequest) -> Result<GeneratedQuiz, RequestFailure> {
        pending().await
    }

    async fn submit_quiz(
        &self,
        _quiz_id: &QuizId,
        _answers: &[usize],
    ) -> Result<QuizResult, RequestFailure> {
        pending().await
    }

    async fn fetch_leaderboard(&self) -> Result<LeaderboardSnapshot, RequestFailure> {
        pending().await
    }

    async fn fetch_subject_progress(
        &self,
        _subject: Subject,
    ) -> Result<SubjectStats, RequestFailure> {
        pending().await
    }

    async fn service_info(&self) -> Result<ServiceInfo, RequestFailure> {
        pending().await
    }
}

#[tokio::test(flavor = "current_thread")]
async fn pending_requests_show_overlay_and_lock_controls() {
    let mut harness = setup_view_harness_with_api(ViewKind::Chat, Arc::new(StalledApi));
    harness.rebuild();
    harness.settle().await;
    assert!(!harness.render().contains("loading-overlay"));

    harness.dispatch(Action::EditChatInput("Bonjour".into()));
    harness.dispatch(Action::SendMessage);
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("loading-overlay"), "missing overlay in {html}");
    assert!(html.contains("disabled"), "send should be disabled: {html}");
}
