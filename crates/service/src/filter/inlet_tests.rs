#![expect(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;

use automem_core::{FilterConfig, HostEvent, UserIdentity, UserPreferences};
use automem_storage::{InMemoryStore, MemoryStore};
use serde_json::{Value, json};

use super::MemoryFilter;
use crate::test_support::{BrokenStore, ClosedEmitter, FailingProvider, RecordingEmitter, ScriptedProvider};
use crate::{HookContext, Outcome};

fn filter(store: Arc<dyn MemoryStore>) -> MemoryFilter {
    MemoryFilter::new(FilterConfig::default(), store).unwrap()
}

fn context(provider: Arc<ScriptedProvider>) -> HookContext {
    HookContext::new(Some(UserIdentity::new("u1"))).with_completion(provider)
}

fn paris_body() -> Value {
    json!({"model": "llama3", "stream": true, "messages": [{"role": "user", "content": "I live in Paris now"}]})
}

#[tokio::test]
async fn test_update_scenario() {
    let store = Arc::new(InMemoryStore::new());
    store.seed("1", "u1", "[Tags: location] User lives in London").await;
    let provider = Arc::new(ScriptedProvider::new([
        r#"{"relevant_tags": ["location"]}"#,
        r#"[{"operation": "UPDATE", "id": "1", "content": "User lives in Paris", "tags": ["location"]}]"#,
    ]));

    let outcome = filter(store.clone()).inlet(&context(provider.clone()), paris_body()).await;

    assert!(store.get_by_id("1").await.unwrap().is_none());
    let all = store.all().await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].content, "[Tags: location] User lives in Paris");

    let messages = outcome.body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    let system = messages[0]["content"].as_str().unwrap();
    assert!(system.contains("Memory operations this turn"));
    assert!(system.contains("UPDATE 1 ->"));
    assert!(system.contains("User lives in Paris"));
    assert!(!system.contains("User lives in London"));
    assert_eq!(messages[1]["content"], "I live in Paris now");
    assert_eq!(outcome.body["model"], "llama3");
    assert_eq!(outcome.body["stream"], true);

    assert_eq!(outcome.turn.len(), 1);
    assert!(matches!(outcome.turn.operations[0].outcome, Outcome::Updated { .. }));
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_update_outside_relevant_set_still_applies() {
    let store = Arc::new(InMemoryStore::new());
    store.seed("1", "u1", "[Tags: location] User lives in London").await;
    let provider = Arc::new(ScriptedProvider::new([
        r#"{"relevant_tags": []}"#,
        r#"[{"operation": "UPDATE", "id": "1", "content": "User lives in Paris", "tags": ["location"]}]"#,
    ]));

    let outcome = filter(store.clone()).inlet(&context(provider), paris_body()).await;

    assert_eq!(outcome.turn.len(), 1);
    assert_eq!(store.all().await[0].content, "[Tags: location] User lives in Paris");
}

#[tokio::test]
async fn test_relevant_memories_are_spliced_into_existing_system_message() {
    let store = Arc::new(InMemoryStore::new());
    store.seed("1", "u1", "[Tags: food] Allergic to peanuts").await;
    store.seed("2", "u1", "[Tags: location] Lives in Oslo").await;
    let provider = Arc::new(ScriptedProvider::new([r#"{"relevant_tags": ["food"]}"#, "[]"]));
    let body = json!({"messages": [
        {"role": "system", "content": "You are helpful."},
        {"role": "user", "content": "Suggest a snack"}
    ]});

    let outcome = filter(store.clone()).inlet(&context(provider), body).await;

    let messages = outcome.body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    let system = messages[0]["content"].as_str().unwrap();
    assert!(system.starts_with("You are helpful.\n\nRelevant memories:"));
    assert!(system.contains("- Allergic to peanuts (tags: food)"));
    assert!(!system.contains("Oslo"));
    assert!(!system.contains("Memory operations this turn"));
    assert!(outcome.turn.is_empty());
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn test_nothing_to_report_leaves_body_unchanged() {
    let store = Arc::new(InMemoryStore::new());
    let provider = Arc::new(ScriptedProvider::new(["[]"]));
    let body = json!({"messages": [{"role": "user", "content": "What's 2 + 2?"}]});

    let outcome = filter(store.clone()).inlet(&context(provider.clone()), body.clone()).await;

    assert_eq!(outcome.body, body);
    assert!(outcome.turn.is_empty());
    assert!(store.is_empty().await);
    // Empty vocabulary: only the extraction call.
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_network_error_returns_original_body() {
    let store = Arc::new(InMemoryStore::new());
    store.seed("1", "u1", "[Tags: location] User lives in London").await;
    let ctx = HookContext::new(Some(UserIdentity::new("u1"))).with_completion(Arc::new(FailingProvider));

    let outcome = filter(store.clone()).inlet(&ctx, paris_body()).await;

    assert_eq!(outcome.body, paris_body());
    assert!(outcome.turn.is_empty());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_unreachable_endpoint_returns_original_body() {
    let config = FilterConfig {
        api_url: "http://127.0.0.1:9".to_owned(),
        request_timeout_secs: 2,
        ..FilterConfig::default()
    };
    let store = Arc::new(InMemoryStore::new());
    let filter = MemoryFilter::new(config, store.clone()).unwrap();
    let ctx = HookContext::new(Some(UserIdentity::new("u1")));

    let outcome = filter.inlet(&ctx, paris_body()).await;

    assert_eq!(outcome.body, paris_body());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_storage_failure_returns_original_body() {
    let provider = Arc::new(ScriptedProvider::new([r#"[{"operation": "NEW", "content": "Lives in Paris"}]"#]));

    let outcome = filter(Arc::new(BrokenStore)).inlet(&context(provider), paris_body()).await;

    assert_eq!(outcome.body, paris_body());
    assert!(outcome.turn.is_empty());
}

#[tokio::test]
async fn test_early_returns() {
    let store = Arc::new(InMemoryStore::new());
    let provider = Arc::new(ScriptedProvider::new(Vec::<&str>::new()));
    let filter = filter(store.clone());

    let cases = [
        json!("not an object"),
        json!({}),
        json!({"messages": "nope"}),
        json!({"messages": []}),
        json!({"messages": [{"role": "user", "content": "   "}]}),
        json!({"messages": [{"role": "assistant", "content": "hello"}]}),
    ];
    for body in cases {
        let outcome = filter.inlet(&context(provider.clone()), body.clone()).await;
        assert_eq!(outcome.body, body);
        assert!(outcome.turn.is_empty());
    }

    let anonymous = HookContext::new(None).with_completion(provider.clone());
    assert_eq!(filter.inlet(&anonymous, paris_body()).await.body, paris_body());

    filter.replace_config(FilterConfig { enabled: false, ..FilterConfig::default() }).await;
    assert_eq!(filter.inlet(&context(provider.clone()), paris_body()).await.body, paris_body());

    assert_eq!(provider.calls(), 0);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_status_events_follow_preference() {
    let store = Arc::new(InMemoryStore::new());
    let reply = r#"[{"operation": "NEW", "content": "Has two cats", "tags": ["pets"]}]"#;

    let emitter = Arc::new(RecordingEmitter::default());
    let ctx = context(Arc::new(ScriptedProvider::new([reply]))).with_emitter(emitter.clone());
    filter(store.clone()).inlet(&ctx, json!({"messages": [{"role": "user", "content": "I have two cats"}]})).await;
    assert_eq!(
        emitter.events(),
        vec![HostEvent::status("Processing memories...", false), HostEvent::status("Stored 1 memories", true)]
    );

    let quiet = Arc::new(RecordingEmitter::default());
    let user = UserIdentity::new("u1").with_preferences(UserPreferences { show_status: false });
    let ctx = HookContext::new(Some(user))
        .with_completion(Arc::new(ScriptedProvider::new([reply])))
        .with_emitter(quiet.clone());
    filter(store).inlet(&ctx, json!({"messages": [{"role": "user", "content": "I have two cats"}]})).await;
    assert!(quiet.events().is_empty());
}

#[tokio::test]
async fn test_emitter_failure_is_swallowed() {
    let store = Arc::new(InMemoryStore::new());
    let provider = Arc::new(ScriptedProvider::new([r#"[{"operation": "NEW", "content": "Plays chess"}]"#]));
    let ctx = context(provider).with_emitter(Arc::new(ClosedEmitter));

    let outcome = filter(store.clone()).inlet(&ctx, json!({"messages": [{"role": "user", "content": "I play chess"}]})).await;

    assert_eq!(outcome.turn.len(), 1);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_memories_of_other_users_are_invisible() {
    let store = Arc::new(InMemoryStore::new());
    store.seed("x", "u2", "[Tags: location] Lives in Rome").await;
    let provider = Arc::new(ScriptedProvider::new([r#"[{"operation": "DELETE", "id": "x"}]"#]));

    let outcome = filter(store.clone()).inlet(&context(provider.clone()), paris_body()).await;

    assert!(outcome.turn.is_empty());
    assert_eq!(store.len().await, 1);
    assert!(!provider.system_prompts()[0].contains("Rome"));
}
