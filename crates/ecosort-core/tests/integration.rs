//! Integration tests for the classification pipeline end to end.
//!
//! Uses a MockSource that answers from canned text instead of calling a
//! language model, so these tests run without network access.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use ecosort_core::classify::classify_heuristically;
use ecosort_core::classify_offline;
use ecosort_core::model::{Biodegradability, DetectedItem, TriState};
use ecosort_core::parsing::parse_items;
use ecosort_core::rules::material::{is_acceptable_material, GENERIC_MATERIALS};
use ecosort_core::rules::{parse_ruleset_str, RuleBook};
use ecosort_core::config::GeminiConfig;
use ecosort_core::source::{
    parse_batch, ClassificationSource, GeminiClient, GeminiSource, RawExternalClassification,
    SourceError,
};
use ecosort_core::trace::Resolution;
use ecosort_core::Pipeline;

enum Reply {
    Text(&'static str),
    Fail,
}

struct MockSource {
    name: &'static str,
    reply: Reply,
    calls: Arc<AtomicUsize>,
}

impl MockSource {
    fn new(name: &'static str, reply: Reply) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Self {
            name,
            reply,
            calls: Arc::clone(&calls),
        };
        (source, calls)
    }
}

#[async_trait]
impl ClassificationSource for MockSource {
    async fn classify_batch(
        &self,
        _labels: &[String],
    ) -> Result<Vec<RawExternalClassification>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Text(text) => parse_batch(text),
            Reply::Fail => Err(SourceError::Api {
                status: 503,
                body: "service unavailable".into(),
            }),
        }
    }

    fn name(&self) -> &str {
        self.name
    }
}

fn items(labels: &[&str]) -> Vec<DetectedItem> {
    labels.iter().map(|l| DetectedItem::new(*l)).collect()
}

const GOOD_RESPONSE: &str = r#"```json
{
  "classifications": [
    {
      "label": "Plastic",
      "type": "non-biodegradable",
      "material": "Polypropylene (PP) packaging film",
      "disposal": "Rinse, dry and place in the plastic recycling bin",
      "recyclable": "yes",
      "reusable": "potentially",
      "hazardous": "no",
      "icon": "fas fa-wine-bottle"
    },
    {
      "label": "cardboard",
      "type": "biodegradable",
      "material": "paper",
      "disposal": "Check local guidelines",
      "recyclable": "Yes",
      "reusable": "no",
      "hazardous": "no",
      "icon": "box"
    }
  ]
}
```"#;

// ---------------------------------------------------------------------------
// Test 1: Classifier unavailable, plastic and cardboard
// ---------------------------------------------------------------------------
#[tokio::test]
async fn offline_counts_by_label_and_type() {
    let pipeline = Pipeline::new(RuleBook::builtin());
    let report = pipeline.run(&items(&["plastic", "plastic", "cardboard"])).await;

    let stats = &report.stats;
    assert_eq!(stats.counts.get("Plastic"), Some(&2));
    assert_eq!(stats.counts.get("Cardboard"), Some(&1));
    assert_eq!(stats.non_biodegradable_count, 2);
    assert_eq!(stats.biodegradable_count, 1);
    assert_eq!(stats.unknown_count, 0);
}

// ---------------------------------------------------------------------------
// Test 2: Successful source, records reconciled field by field
// ---------------------------------------------------------------------------
#[tokio::test]
async fn external_records_are_reconciled() {
    let (source, calls) = MockSource::new("mock", Reply::Text(GOOD_RESPONSE));
    let pipeline = Pipeline::new(RuleBook::builtin()).with_source(source);
    let report = pipeline.run(&items(&["PLASTIC", "cardboard", "plastic"])).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.trace.source.as_deref(), Some("mock"));

    let plastic = &report.stats.waste_items[0].classification;
    assert_eq!(plastic.label, "Plastic");
    assert_eq!(plastic.material, "Polypropylene (PP) packaging film");
    assert_eq!(plastic.reusable, TriState::Potentially);

    // generic material, generic disposal and malformed icon are replaced
    let cardboard = &report.stats.waste_items[1].classification;
    assert_eq!(cardboard.kind, Biodegradability::Biodegradable);
    assert_eq!(cardboard.material, "Compressed paper pulp fibers");
    assert!(!cardboard.disposal.to_lowercase().contains("check local"));
    assert!(cardboard.icon.starts_with("fas fa-"));

    let entry = report.trace.entry("Cardboard").unwrap();
    assert_eq!(
        entry.resolution,
        Resolution::External {
            source: "mock".into()
        }
    );
    assert_eq!(report.trace.entry("Plastic").unwrap().occurrences, 2);
}

// ---------------------------------------------------------------------------
// Test 3: Failing source falls back to local rules for every label
// ---------------------------------------------------------------------------
#[tokio::test]
async fn failing_source_falls_back_completely() {
    let list = items(&["plastic bottle", "banana peel", "e-waste", "plastic bottle"]);
    let (source, calls) = MockSource::new("down", Reply::Fail);
    let pipeline = Pipeline::new(RuleBook::builtin()).with_source(source);
    let report = pipeline.run(&list).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(report.trace.source.is_none());
    assert_eq!(report.trace.warnings.len(), 1);
    assert_eq!(report.stats, classify_offline(&list, &RuleBook::builtin()));
    assert!(report
        .trace
        .entries
        .iter()
        .all(|e| e.resolution == Resolution::Heuristic));
}

// ---------------------------------------------------------------------------
// Test 4: Malformed response is a failure; one request, then local rules
// ---------------------------------------------------------------------------
#[tokio::test]
async fn malformed_response_falls_back_without_retry() {
    let list = items(&["plastic", "cardboard"]);
    let (broken, calls) =
        MockSource::new("broken", Reply::Text("Sorry, I can't help with that."));
    let pipeline = Pipeline::new(RuleBook::builtin()).with_source(broken);

    let report = pipeline.run(&list).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(report.trace.source.is_none());
    assert_eq!(report.trace.warnings.len(), 1);
    assert_eq!(report.stats, classify_offline(&list, &RuleBook::builtin()));
}

// ---------------------------------------------------------------------------
// Test 5: A later source replaces the earlier one
// ---------------------------------------------------------------------------
#[tokio::test]
async fn later_source_replaces_earlier() {
    let (first, first_calls) = MockSource::new("first", Reply::Fail);
    let (second, second_calls) = MockSource::new("second", Reply::Text(GOOD_RESPONSE));
    let pipeline = Pipeline::new(RuleBook::builtin())
        .with_source(first)
        .with_source(second);

    let report = pipeline.run(&items(&["plastic"])).await;
    assert_eq!(first_calls.load(Ordering::SeqCst), 0);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.trace.source.as_deref(), Some("second"));
}

// ---------------------------------------------------------------------------
// Test 6: Labels missing from a successful response use local rules
// ---------------------------------------------------------------------------
#[tokio::test]
async fn labels_missing_from_response_use_local_rules() {
    let (source, _) = MockSource::new("mock", Reply::Text(GOOD_RESPONSE));
    let pipeline = Pipeline::new(RuleBook::builtin()).with_source(source);
    let report = pipeline.run(&items(&["plastic", "sponge"])).await;

    let sponge = &report.stats.waste_items[1].classification;
    assert_eq!(sponge, &classify_heuristically("Sponge"));
    assert_eq!(
        report.trace.entry("Sponge").unwrap().resolution,
        Resolution::Heuristic
    );
}

// ---------------------------------------------------------------------------
// Test 7: Hostile response never leaks unknown or generic values
// ---------------------------------------------------------------------------
#[tokio::test]
async fn hostile_response_never_leaks_unknown() {
    const HOSTILE: &str = r#"[
        {"label": "Sponge", "type": "unknown", "material": "unknown",
         "recyclable": "possibly, if clean", "reusable": "unknown", "hazardous": null},
        {"label": "Glass", "type": "", "material": "glass", "recyclable": "unknown"},
        {"label": "Metal", "type": 3, "material": "Metal", "recyclable": false},
        {"label": "Tray", "material": "UNKNOWN plastic blend", "recyclable": "??"}
    ]"#;
    let (source, _) = MockSource::new("hostile", Reply::Text(HOSTILE));
    let pipeline = Pipeline::new(RuleBook::builtin()).with_source(source);
    let report = pipeline
        .run(&items(&["sponge", "glass", "metal", "tray"]))
        .await;

    for item in &report.stats.waste_items {
        let r = &item.classification;
        assert!(is_acceptable_material(&r.material), "{}", r.material);
        assert!(!GENERIC_MATERIALS.contains(&r.material.to_lowercase().as_str()));
        assert!(!r.material.to_lowercase().contains("unknown"));
        assert!(matches!(
            r.recyclable,
            TriState::Yes | TriState::No | TriState::Potentially
        ));
    }

    let sponge = &report.stats.waste_items[0].classification;
    assert_eq!(sponge.recyclable, TriState::Potentially);
    assert_eq!(sponge.kind, Biodegradability::Partial);
    assert_eq!(report.stats.unknown_count, 2);
}

// ---------------------------------------------------------------------------
// Test 8: Empty input makes no requests
// ---------------------------------------------------------------------------
#[tokio::test]
async fn empty_input_makes_no_requests() {
    let (source, calls) = MockSource::new("mock", Reply::Text(GOOD_RESPONSE));
    let pipeline = Pipeline::new(RuleBook::builtin()).with_source(source);
    let report = pipeline.run(&[]).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(report.stats.total(), 0);
    assert!(report.stats.counts.is_empty());
    assert!(report.stats.waste_items.is_empty());
}

// ---------------------------------------------------------------------------
// Test 9: Detection file with unlabelled items and a custom ruleset
// ---------------------------------------------------------------------------
#[test]
fn offline_with_custom_ruleset_and_unlabelled_items() {
    let list = parse_items(
        r#"[
            { "label": "sponge", "box_2d": [12, 40, 88, 120] },
            { "box_2d": [0, 0, 5, 5] },
            { "label": "Sponge" },
            { "label": "" }
        ]"#,
    )
    .unwrap();
    let ruleset = parse_ruleset_str(
        r#"{ "name": "Kitchen", "version": "1",
             "rules": [
               { "keywords": ["sponge"], "material": "Polyurethane foam with cellulose" }
             ] }"#,
    )
    .unwrap();
    let stats = classify_offline(&list, &RuleBook::builtin().with_ruleset(ruleset));

    assert_eq!(stats.total(), 2);
    assert_eq!(stats.skipped, 2);
    assert_eq!(stats.counts.get("Sponge"), Some(&2));
    assert_eq!(
        stats.waste_items[0].classification.material,
        "Polyurethane foam with cellulose"
    );
    assert_eq!(stats.waste_items[0].item.box_2d, Some([12.0, 40.0, 88.0, 120.0]));
}

// ---------------------------------------------------------------------------
// Test 10: Unreachable service never exposes the API key in the report
// ---------------------------------------------------------------------------
#[tokio::test]
async fn unreachable_service_keeps_api_key_out_of_report() {
    let config = GeminiConfig {
        api_key: Some("SUPERSECRET123".into()),
        base_url: "http://127.0.0.1:1".into(),
        timeout_secs: 2,
        ..GeminiConfig::default()
    };
    let client = GeminiClient::new(&config).unwrap();
    let pipeline = Pipeline::new(RuleBook::builtin()).with_source(GeminiSource::new(client));

    let report = pipeline.run(&items(&["plastic"])).await;
    assert!(report.trace.source.is_none());
    assert_eq!(report.trace.warnings.len(), 1);

    let json = serde_json::to_string(&report).unwrap();
    assert!(!json.contains("SUPERSECRET123"), "{json}");
    assert!(!json.contains("key="), "{json}");
}
