//! Workflow tests for the language batch
//!
//! The API client and cache store are replaced by recording doubles so each
//! test can assert the exact calls, writes and progress lines.

use std::collections::VecDeque;
use std::error::Error as _;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::app::batch::LanguageBatch;
use crate::app::cache::CacheStore;
use crate::app::client::ApiClient;
use crate::app::output::CaptureOutput;
use crate::app::registry::Applet;
use crate::app::response::ApiResponse;
use crate::config::{SystemConfig, TranslatedApplications};
use crate::errors::{ApiError, BatchError, BatchErrorKind, CacheError, CacheResult};

/// One recorded API call
#[derive(Debug, Clone, PartialEq, Eq)]
struct RecordedCall {
    system_name: String,
    action_namespace: String,
    get_params: Vec<(String, String)>,
    post_params: Vec<(String, String)>,
}

impl RecordedCall {
    fn action(&self) -> &str {
        self.param(&self.get_params, "action").unwrap_or_default()
    }

    fn post(&self, name: &str) -> Option<&str> {
        self.param(&self.post_params, name)
    }

    fn param<'a>(&self, params: &'a [(String, String)], name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn owned(params: &[(&str, &str)]) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// API double answering from a queue of scripted responses
#[derive(Default)]
struct ScriptedApi {
    responses: Mutex<VecDeque<Option<ApiResponse>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedApi {
    fn new(responses: Vec<Option<ApiResponse>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::default(),
        })
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiClient for ScriptedApi {
    async fn call(
        &self,
        system_name: &str,
        action_namespace: &str,
        get_params: &[(&str, &str)],
        post_params: &[(&str, &str)],
    ) -> Option<ApiResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            system_name: system_name.to_string(),
            action_namespace: action_namespace.to_string(),
            get_params: owned(get_params),
            post_params: owned(post_params),
        });
        self.responses.lock().unwrap().pop_front().flatten()
    }
}

/// Cache double recording writes, optionally failing on one path
#[derive(Default)]
struct RecordingCache {
    writes: Mutex<Vec<(String, String)>>,
    fail_on: Option<String>,
}

impl RecordingCache {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn failing_on(path: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_on: Some(path.to_string()),
            ..Default::default()
        })
    }

    fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl CacheStore for RecordingCache {
    async fn put(&self, path: &str, content: &[u8]) -> CacheResult<()> {
        if self.fail_on.as_deref() == Some(path) {
            return Err(CacheError::Rejected {
                path: path.to_string(),
            });
        }
        self.writes.lock().unwrap().push((
            path.to_string(),
            String::from_utf8_lossy(content).into_owned(),
        ));
        Ok(())
    }
}

fn system_config(applications: &[(&str, Vec<&str>)]) -> Arc<SystemConfig> {
    let translated_applications: TranslatedApplications = applications
        .iter()
        .map(|(name, languages)| (*name, languages.clone()))
        .collect();

    Arc::new(SystemConfig {
        translated_applications,
        ..Default::default()
    })
}

fn batch(
    api: &Arc<ScriptedApi>,
    cache: &Arc<RecordingCache>,
    config: Arc<SystemConfig>,
) -> (LanguageBatch, Arc<CaptureOutput>) {
    let output = Arc::new(CaptureOutput::new());
    let batch = LanguageBatch::new(api.clone(), cache.clone(), config).with_output(output.clone());
    (batch, output)
}

fn write(path: &str, content: &str) -> (String, String) {
    (path.to_string(), content.to_string())
}

// ==================== Translation files ====================

#[tokio::test]
async fn test_generate_language_files_for_portal() {
    let api = ScriptedApi::new(vec![
        Some(ApiResponse::ok("EN_CONTENT")),
        Some(ApiResponse::ok("HU_CONTENT")),
    ]);
    let cache = RecordingCache::new();
    let (batch, output) = batch(&api, &cache, system_config(&[("portal", vec!["en", "hu"])]));

    let written = batch.generate_language_files().await.unwrap();

    assert_eq!(written, 2);
    assert_eq!(
        cache.writes(),
        vec![
            write("/portal/en.php", "EN_CONTENT"),
            write("/portal/hu.php", "HU_CONTENT"),
        ]
    );
    assert_eq!(
        output.lines(),
        vec![
            "\nGenerating language files.\n",
            "[APPLICATION: portal]\n",
            "\t[LANGUAGE: en] OK\n",
            "\t[LANGUAGE: hu] OK\n",
        ]
    );
}

#[tokio::test]
async fn test_language_file_requests() {
    let api = ScriptedApi::new(vec![
        Some(ApiResponse::ok("fr_php")),
        Some(ApiResponse::ok("de_php")),
    ]);
    let cache = RecordingCache::new();
    let (batch, _) = batch(&api, &cache, system_config(&[("appletId", vec!["fr", "de"])]));

    batch.generate_language_files().await.unwrap();

    let expected: Vec<RecordedCall> = ["fr", "de"]
        .into_iter()
        .map(|language| RecordedCall {
            system_name: "system_api".to_string(),
            action_namespace: "language_api".to_string(),
            get_params: owned(&[("system", "LanguageFiles"), ("action", "getLanguageFile")]),
            post_params: owned(&[("language", language)]),
        })
        .collect();
    assert_eq!(api.calls(), expected);
}

#[tokio::test]
async fn test_applications_and_languages_keep_configured_order() {
    let api = ScriptedApi::new(vec![
        Some(ApiResponse::ok("z-hu")),
        Some(ApiResponse::ok("z-de")),
        Some(ApiResponse::ok("a-en")),
    ]);
    let cache = RecordingCache::new();
    let (batch, output) = batch(
        &api,
        &cache,
        system_config(&[("zeta", vec!["hu", "de"]), ("alpha", vec!["en"])]),
    );

    batch.generate_language_files().await.unwrap();

    let paths: Vec<String> = cache.writes().into_iter().map(|(path, _)| path).collect();
    assert_eq!(paths, vec!["/zeta/hu.php", "/zeta/de.php", "/alpha/en.php"]);
    assert_eq!(
        output.lines(),
        vec![
            "\nGenerating language files.\n",
            "[APPLICATION: zeta]\n",
            "\t[LANGUAGE: hu] OK\n",
            "\t[LANGUAGE: de] OK\n",
            "[APPLICATION: alpha]\n",
            "\t[LANGUAGE: en] OK\n",
        ]
    );
}

#[tokio::test]
async fn test_generate_language_files_is_repeatable() {
    let responses = || {
        vec![
            Some(ApiResponse::ok("EN_CONTENT")),
            Some(ApiResponse::ok("HU_CONTENT")),
        ]
    };
    let config = system_config(&[("portal", vec!["en", "hu"])]);

    let first_api = ScriptedApi::new(responses());
    let first_cache = RecordingCache::new();
    let (first, first_output) = batch(&first_api, &first_cache, config.clone());
    first.generate_language_files().await.unwrap();

    let second_api = ScriptedApi::new(responses());
    let second_cache = RecordingCache::new();
    let (second, second_output) = batch(&second_api, &second_cache, config);
    second.generate_language_files().await.unwrap();

    assert_eq!(first_cache.writes(), second_cache.writes());
    assert_eq!(first_output.lines(), second_output.lines());
    assert_eq!(first_api.calls(), second_api.calls());
}

#[tokio::test]
async fn test_no_applications_only_prints_banner() {
    let api = ScriptedApi::new(vec![]);
    let cache = RecordingCache::new();
    let (batch, output) = batch(&api, &cache, system_config(&[]));

    assert_eq!(batch.generate_language_files().await.unwrap(), 0);
    assert!(api.calls().is_empty());
    assert_eq!(output.lines(), vec!["\nGenerating language files.\n"]);
}

#[tokio::test]
async fn test_api_error_fails_retrieving_file() {
    let api = ScriptedApi::new(vec![Some(ApiResponse::with_status("error"))]);
    let cache = RecordingCache::new();
    let (batch, _) = batch(&api, &cache, system_config(&[("portal", vec!["en", "hu"])]));

    let error = batch.generate_language_files().await.unwrap_err();

    assert_eq!(error.kind(), BatchErrorKind::FailRetrievingFile);
    assert!(error.to_string().contains("language: en"));
    assert!(matches!(
        error.api_error(),
        Some(ApiError::WrongResponse { .. })
    ));
    assert!(cache.writes().is_empty());
}

#[tokio::test]
async fn test_no_response_fails_retrieving_file() {
    let api = ScriptedApi::new(vec![None]);
    let cache = RecordingCache::new();
    let (batch, _) = batch(&api, &cache, system_config(&[("portal", vec!["en"])]));

    let error = batch.generate_language_files().await.unwrap_err();

    assert_eq!(error.kind(), BatchErrorKind::FailRetrievingFile);
    assert_eq!(error.api_error(), Some(&ApiError::CallFailed));
}

#[tokio::test]
async fn test_failure_on_second_language_stops_the_run() {
    let api = ScriptedApi::new(vec![
        Some(ApiResponse::ok("EN_CONTENT")),
        Some(ApiResponse::ok(false)),
        Some(ApiResponse::ok("DE_CONTENT")),
        Some(ApiResponse::ok("OTHER_CONTENT")),
    ]);
    let cache = RecordingCache::new();
    let (batch, output) = batch(
        &api,
        &cache,
        system_config(&[("portal", vec!["en", "hu", "de"]), ("admin", vec!["en"])]),
    );

    let error = batch.generate_language_files().await.unwrap_err();

    assert_eq!(error.kind(), BatchErrorKind::FailRetrievingFile);
    assert!(error.to_string().contains("hu"));
    assert_eq!(error.api_error(), Some(&ApiError::WrongContent));

    assert_eq!(cache.writes(), vec![write("/portal/en.php", "EN_CONTENT")]);

    let requested: Vec<Option<String>> = api
        .calls()
        .iter()
        .map(|call| call.post("language").map(str::to_string))
        .collect();
    assert_eq!(requested, vec![Some("en".to_string()), Some("hu".to_string())]);

    assert_eq!(
        output.lines(),
        vec![
            "\nGenerating language files.\n",
            "[APPLICATION: portal]\n",
            "\t[LANGUAGE: en] OK\n",
        ]
    );
}

#[tokio::test]
async fn test_cache_failure_fails_saving_file() {
    let api = ScriptedApi::new(vec![
        Some(ApiResponse::ok("EN_CONTENT")),
        Some(ApiResponse::ok("HU_CONTENT")),
    ]);
    let cache = RecordingCache::failing_on("/portal/hu.php");
    let (batch, _) = batch(&api, &cache, system_config(&[("portal", vec!["en", "hu"])]));

    let error = batch.generate_language_files().await.unwrap_err();

    assert_eq!(error.kind(), BatchErrorKind::FailSavingFile);
    assert!(error.to_string().contains("/portal/hu.php"));
    assert!(matches!(error, BatchError::SaveTranslationFile { ref path, .. } if path == "/portal/hu.php"));
    assert!(error.source().is_some());
    assert_eq!(cache.writes(), vec![write("/portal/en.php", "EN_CONTENT")]);
}

// ==================== Applet language XMLs ====================

#[tokio::test]
async fn test_generate_applet_language_xml_files() {
    let api = ScriptedApi::new(vec![
        Some(ApiResponse::ok(json!(["en"]))),
        Some(ApiResponse::ok("xml_file")),
    ]);
    let cache = RecordingCache::new();
    let (batch, output) = batch(&api, &cache, system_config(&[]));

    let written = batch.generate_applet_language_xml_files().await.unwrap();

    assert_eq!(written, 1);
    assert_eq!(cache.writes(), vec![write("/flash/lang_en.xml", "xml_file")]);
    assert_eq!(
        output.lines(),
        vec![
            "\nGetting applet language XMLs.\n",
            " Getting > JSM2_MemberApplet (memberapplet) language xmls.\n",
            " - Available languages: en\n",
            " OK saving applet: (JSM2_MemberApplet) language: (en) was successful.\n",
            " < JSM2_MemberApplet (memberapplet) language xml cached.\n",
            "\nApplet language XMLs generated.\n",
        ]
    );
}

#[tokio::test]
async fn test_applet_requests() {
    let api = ScriptedApi::new(vec![
        Some(ApiResponse::ok(json!(["en", "hu"]))),
        Some(ApiResponse::ok("<en/>")),
        Some(ApiResponse::ok("<hu/>")),
    ]);
    let cache = RecordingCache::new();
    let (batch, output) = batch(&api, &cache, system_config(&[]));

    batch.generate_applet_language_xml_files().await.unwrap();

    let calls = api.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].action(), "getAppletLanguages");
    assert_eq!(calls[0].post_params, owned(&[("applet", "JSM2_MemberApplet")]));
    for (call, language) in calls[1..].iter().zip(["en", "hu"]) {
        assert_eq!(call.system_name, "system_api");
        assert_eq!(call.action_namespace, "language_api");
        assert_eq!(call.action(), "getAppletLanguageFile");
        assert_eq!(
            call.post_params,
            owned(&[("applet", "JSM2_MemberApplet"), ("language", language)])
        );
    }

    assert_eq!(
        cache.writes(),
        vec![
            write("/flash/lang_en.xml", "<en/>"),
            write("/flash/lang_hu.xml", "<hu/>"),
        ]
    );
    assert!(output
        .lines()
        .contains(&" - Available languages: en, hu\n".to_string()));
}

#[tokio::test]
async fn test_empty_applet_languages_is_an_error() {
    let api = ScriptedApi::new(vec![Some(ApiResponse::ok(json!([])))]);
    let cache = RecordingCache::new();
    let (batch, output) = batch(&api, &cache, system_config(&[]));

    let error = batch.generate_applet_language_xml_files().await.unwrap_err();

    assert_eq!(error.kind(), BatchErrorKind::NoAvailableLanguageForApplet);
    assert!(error.to_string().contains("JSM2_MemberApplet"));
    assert_eq!(api.calls().len(), 1);
    assert!(cache.writes().is_empty());
    assert!(!output
        .lines()
        .iter()
        .any(|line| line.contains("Available languages")));
}

#[tokio::test]
async fn test_empty_string_applet_languages_is_an_error() {
    let api = ScriptedApi::new(vec![Some(ApiResponse::ok(""))]);
    let cache = RecordingCache::new();
    let (batch, _) = batch(&api, &cache, system_config(&[]));

    let error = batch.generate_applet_language_xml_files().await.unwrap_err();

    assert_eq!(error.kind(), BatchErrorKind::NoAvailableLanguageForApplet);
}

#[tokio::test]
async fn test_applet_discovery_failure_fails_retrieving_file() {
    let api = ScriptedApi::new(vec![Some(ApiResponse::with_status("error"))]);
    let cache = RecordingCache::new();
    let (batch, _) = batch(&api, &cache, system_config(&[]));

    let error = batch.generate_applet_language_xml_files().await.unwrap_err();

    assert_eq!(error.kind(), BatchErrorKind::FailRetrievingFile);
    assert!(matches!(error, BatchError::AppletLanguages { ref applet, .. } if applet == "JSM2_MemberApplet"));
}

#[tokio::test]
async fn test_applet_xml_failure_fails_retrieving_language() {
    let api = ScriptedApi::new(vec![
        Some(ApiResponse::ok(json!(["en", "hu"]))),
        Some(ApiResponse::ok("<en/>")),
        None,
    ]);
    let cache = RecordingCache::new();
    let (batch, _) = batch(&api, &cache, system_config(&[]));

    let error = batch.generate_applet_language_xml_files().await.unwrap_err();

    assert_eq!(error.kind(), BatchErrorKind::FailRetrievingLanguageForApplet);
    let message = error.to_string();
    assert!(message.contains("JSM2_MemberApplet"));
    assert!(message.contains("(hu)"));
    assert_eq!(error.api_error(), Some(&ApiError::CallFailed));
    assert_eq!(cache.writes(), vec![write("/flash/lang_en.xml", "<en/>")]);
}

#[tokio::test]
async fn test_applet_cache_failure_fails_saving_file() {
    let api = ScriptedApi::new(vec![
        Some(ApiResponse::ok(json!(["en"]))),
        Some(ApiResponse::ok("xml_file")),
    ]);
    let cache = RecordingCache::failing_on("/flash/lang_en.xml");
    let (batch, output) = batch(&api, &cache, system_config(&[]));

    let error = batch.generate_applet_language_xml_files().await.unwrap_err();

    assert_eq!(error.kind(), BatchErrorKind::FailSavingFile);
    let message = error.to_string();
    assert!(message.contains("JSM2_MemberApplet"));
    assert!(message.contains("(en)"));
    assert!(message.contains("/flash/lang_en.xml"));
    assert!(!output
        .lines()
        .contains(&"\nApplet language XMLs generated.\n".to_string()));
}

#[tokio::test]
async fn test_applet_failure_skips_remaining_applets() {
    let api = ScriptedApi::new(vec![
        Some(ApiResponse::ok(json!([]))),
        Some(ApiResponse::ok(json!(["en"]))),
    ]);
    let cache = RecordingCache::new();
    let (batch, _) = batch(&api, &cache, system_config(&[]));
    let batch = batch.with_applets(vec![
        Applet {
            id: "FirstApplet",
            directory: "first",
        },
        Applet {
            id: "SecondApplet",
            directory: "second",
        },
    ]);

    let error = batch.generate_applet_language_xml_files().await.unwrap_err();

    assert!(matches!(error, BatchError::NoAppletLanguages { ref applet } if applet == "FirstApplet"));
    assert_eq!(api.calls().len(), 1);
}
