use std::sync::Arc;

use quiz_core::model::REVIEW_TOPIC;
use quiz_core::time::fixed_clock;
use services::loader::StaticQuestionFetcher;
use services::{Advanced, BankLoader, QuizLoopService};
use storage::repository::{InMemoryProgressStore, ProgressStore};

const TABLE: &str = "\
# be-verb drills
topic,question,options,answer,explanation,hint
iamyouare,主語が「I」のときのbe動詞は？,am|are|is,am,主語が「I」のbe動詞は必ず am になります。,
iamyouare,主語が「You」のときのbe動詞は？,am|are|is,are,「I am」と「You are」はセットで覚えましょう。,
iamyouare,「You are happy.」を疑問文にすると？,Happy you are?|You are happy?|Are you happy?,Are you happy?,be動詞を主語の前に移動させます。,
iamyouare,Q4,am|are|is,am,4問目です。,
iamyouare,Q5,am|are|is,is,5問目です。,
heshe,主語が「He」のときのbe動詞は？,am|are|is,is,三人称単数は is です。,
";

async fn load_services() -> (QuizLoopService, InMemoryProgressStore) {
    let bank = BankLoader::new(Arc::new(StaticQuestionFetcher(TABLE.to_string())))
        .load()
        .await
        .expect("bank loads");
    let store = InMemoryProgressStore::new();
    let services = QuizLoopService::new(fixed_clock(), Arc::new(bank), Arc::new(store.clone()));
    (services, store)
}

#[tokio::test]
async fn answers_persist_and_the_session_resumes_where_it_left_off() {
    let (services, store) = load_services().await;

    let mut session = services.start_topic("iamyouare").unwrap();
    assert_eq!(session.total_questions(), 5);

    // Answer two of five, one with a hint, then "reload the page".
    session.request_hint().unwrap();
    services.answer_current(&mut session, "am").await.unwrap();
    services.advance(&mut session).await.unwrap();
    services.answer_current(&mut session, "is").await.unwrap();
    services.advance(&mut session).await.unwrap();
    let score_before = session.score();
    let outcomes_before = session.outcomes().to_vec();
    drop(session);

    let prompt = services.resume_prompt().await.unwrap().expect("offer");
    assert_eq!(prompt.topic, "iamyouare");
    assert_eq!(prompt.next_ordinal, 3);

    let resumed = services.resume().await.unwrap().expect("resumes");
    assert_eq!(resumed.cursor(), 2);
    assert_eq!(resumed.score(), score_before);
    assert_eq!(resumed.outcomes(), outcomes_before.as_slice());
    assert_eq!(
        resumed.current_question().unwrap().text(),
        "「You are happy.」を疑問文にすると？"
    );

    // Progress is still on disk until the run completes.
    assert!(store.load_snapshot().await.unwrap().is_some());
}

#[tokio::test]
async fn completed_session_leaves_no_loadable_snapshot() {
    let (services, store) = load_services().await;

    let mut session = services.start_topic("heshe").unwrap();
    services.answer_current(&mut session, "is").await.unwrap();
    let advanced = services.advance(&mut session).await.unwrap();

    assert_eq!(advanced, Advanced::Finished);
    assert!(session.is_complete());
    assert!(store.load_snapshot().await.unwrap().is_none());
    assert!(services.resume().await.unwrap().is_none());
}

#[tokio::test]
async fn review_run_covers_wrong_and_hinted_questions() {
    let (services, _) = load_services().await;

    let mut session = services.start_topic("iamyouare").unwrap();
    // Q1 correct, Q2 wrong, Q3 correct-with-hint, Q4 and Q5 correct.
    let answers = ["am", "am", "Are you happy?", "am", "is"];
    for (index, answer) in answers.iter().enumerate() {
        if index == 2 {
            session.request_hint().unwrap();
        }
        services.answer_current(&mut session, answer).await.unwrap();
        services.advance(&mut session).await.unwrap();
    }
    assert!(session.is_complete());
    assert_eq!(session.score(), 4);

    let review = services.start_review(session.outcomes()).unwrap();
    assert_eq!(review.topic(), REVIEW_TOPIC);
    assert_eq!(review.total_questions(), 2);
    assert_eq!(
        review.current_question().unwrap().text(),
        "主語が「You」のときのbe動詞は？"
    );
}

#[tokio::test]
async fn abandoning_a_session_clears_saved_progress() {
    let (services, store) = load_services().await;

    let mut session = services.start_topic("iamyouare").unwrap();
    services.answer_current(&mut session, "am").await.unwrap();
    assert!(store.load_snapshot().await.unwrap().is_some());

    services.abandon(session).await.unwrap();
    assert!(store.load_snapshot().await.unwrap().is_none());
    assert!(services.resume().await.unwrap().is_none());
}

#[tokio::test]
async fn hinted_explanations_carry_bundled_translations() {
    let (services, _) = load_services().await;

    let mut session = services.start_topic("iamyouare").unwrap();
    services.answer_current(&mut session, "am").await.unwrap();
    services.advance(&mut session).await.unwrap();
    services.answer_current(&mut session, "are").await.unwrap();
    services.advance(&mut session).await.unwrap();

    // Q3 quotes "You are happy." which has a bundled translation.
    let hint = session.request_hint().unwrap();
    assert!(hint.contains("📝 You are happy."));
    assert!(hint.contains("→ あなたは幸せです。"));

    let feedback = services
        .answer_current(&mut session, "Are you happy?")
        .await
        .unwrap();
    assert!(feedback.outcome.is_correct);
    assert!(feedback.outcome.hint_viewed);
    assert!(feedback.explanation.contains("→ あなたは幸せです。"));
}
