use agent_nexus::chat::provider::{
    api_key, backend_for_key, generate_reply, local_response, status, Backend, ProviderStatus,
    Turn,
};
use agent_nexus::core::config::config::ChatConfig;

fn clear_keys() {
    std::env::remove_var("API_KEY");
    std::env::remove_var("OPENROUTER_API_KEY");
}

/// Points both backends at a loopback port nothing listens on, so the remote
/// path fails fast without touching the network.
fn unroutable_config() -> ChatConfig {
    ChatConfig {
        openrouter_url: "http://127.0.0.1:9/v1/chat/completions".into(),
        google_url: "http://127.0.0.1:9/v1beta".into(),
        request_timeout_secs: 2,
        ..ChatConfig::default()
    }
}

#[test]
fn keyword_categories_select_canned_replies() {
    let greeting = local_response("Hello there");
    let who = local_response("your name?");
    let tech = local_response("tell me about your tech stack");
    let help = local_response("help me out");
    let default = local_response("unrelated query about weather");

    assert!(greeting.contains("Greetings"));
    assert!(who.contains("digital construct"));
    assert!(tech.contains("architecture"));
    assert!(help.contains("API key"));
    assert!(default.contains("offline"));

    // Matching is case-insensitive and substring-based.
    assert_eq!(local_response("HELLO"), greeting);
    assert_eq!(local_response("your NAME please"), who);
}

// Environment-dependent scenarios share one test body: the env is process
// global and the harness runs sibling tests on parallel threads.
#[test]
fn credential_policy_and_remote_failure_fallback() {
    clear_keys();

    // No credential: local fallback, reported offline.
    assert_eq!(status(), ProviderStatus::Offline);
    assert!(api_key().is_none());
    let cfg = unroutable_config();
    let no_key_reply = generate_reply(&cfg, &[], "hello nexus");
    assert_eq!(no_key_reply, local_response("hello nexus"));

    // Whitespace-only credential counts as absent.
    std::env::set_var("API_KEY", "   ");
    assert!(api_key().is_none());

    // Short stub key: present for routing purposes but reported offline.
    std::env::set_var("API_KEY", "abc");
    assert_eq!(api_key().as_deref(), Some("abc"));
    assert_eq!(status(), ProviderStatus::Offline);

    // OPENROUTER_API_KEY is the documented alternate variable.
    clear_keys();
    std::env::set_var("OPENROUTER_API_KEY", "sk-or-v1-test-0000");
    assert_eq!(status(), ProviderStatus::Online);
    assert_eq!(backend_for_key(&api_key().unwrap()), Backend::OpenRouter);

    // Credential present but the remote is unreachable: the reply must be
    // byte-identical to the no-credential fallback, never an error.
    let history = vec![Turn::user("earlier"), Turn::model("context")];
    let reply = generate_reply(&cfg, &history, "hello nexus");
    assert_eq!(reply, no_key_reply);

    // Same policy on the Google route.
    std::env::set_var("API_KEY", "AIzaSyTestNotReal00000");
    assert_eq!(backend_for_key(&api_key().unwrap()), Backend::Google);
    let reply = generate_reply(&cfg, &history, "help");
    assert_eq!(reply, local_response("help"));

    clear_keys();
}
