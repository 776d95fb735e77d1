//! End-to-end scenarios through decoration, conversion and cards.

use a11ylens_core::{
    ReportPlan, ResultDecorator, StaticTitle, UnifiedResultConverter, UuidGenerator,
    build_unified_scan_result, convert_scan_results_to_unified_rules, get_card_view_data,
    run_report,
};
use a11ylens_domain::compile_registries;
use a11ylens_testkit::fixtures::{sample_configs, sample_scans};
use a11ylens_testkit::scan_builder::EngineScanBuilder;
use a11ylens_testkit::schema::{
    validate_cards_view_model, validate_scan_results, validate_unified_scan_result,
    verify_camel_case_fields,
};
use a11ylens_types::{
    CardSelectionViewData, CardsViewModel, ConfigFile, ConversionMode, EngineScanResult,
    ResultStatus, UnifiedResult, UnifiedRule,
};

fn pipeline(
    config: &ConfigFile,
    engine: &EngineScanResult,
    selection: &CardSelectionViewData,
) -> (Vec<UnifiedRule>, Vec<UnifiedResult>, CardsViewModel) {
    let registries = compile_registries(config).expect("config compiles");
    let decorator = ResultDecorator::new(&registries, StaticTitle("Scenario".to_string()));
    let scan = decorator
        .decorate_results(Some(engine))
        .expect("engine present");

    let rules = convert_scan_results_to_unified_rules(Some(&scan));
    let results = UnifiedResultConverter::new(&registries.rules, UuidGenerator)
        .automated_checks_conversion(Some(&scan));
    let view = get_card_view_data(Some(&rules[..]), Some(&results[..]), Some(selection))
        .expect("all inputs present");
    (rules, results, view)
}

#[test]
fn configured_fail_message_reaches_fix_instructions() {
    let (_, results, view) = pipeline(
        &sample_configs::minimal(),
        &sample_scans::image_alt_violation(),
        &CardSelectionViewData::default(),
    );

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.status, ResultStatus::Fail);
    assert_eq!(result.rule_id, "image-alt");
    let fix = result.resolution.how_to_fix_web.as_ref().expect("fix");
    assert_eq!(fix.all, ["Configured: give the image alt text"]);
    let engine_text = "Element does not have an alt attribute";
    assert!(!fix.all.iter().any(|m| m == engine_text));
    assert_eq!(result.identifiers.concise_name, "img.hero");
    assert_eq!(view.cards.fail[0].nodes[0].result.uid, result.uid);
}

#[test]
fn inapplicable_rule_is_synthesized() {
    let (rules, results, view) = pipeline(
        &ConfigFile::built_in(),
        &sample_scans::inapplicable_region_only(),
        &CardSelectionViewData::default(),
    );

    assert_eq!(rules.len(), 1);
    assert!(results.is_empty());
    assert_eq!(view.cards.inapplicable.len(), 1);
    let card = &view.cards.inapplicable[0];
    assert_eq!(card.id, "region");
    assert!(card.nodes.is_empty());
    assert!(!card.is_expanded);
    assert!(view.cards.pass.is_empty());
    assert!(view.cards.fail.is_empty());
    assert!(view.cards.unknown.is_empty());
}

#[test]
fn expanded_fail_card() {
    let selection = CardSelectionViewData {
        expanded_rule_ids: vec!["region".to_string()],
        ..Default::default()
    };
    let (_, _, view) = pipeline(
        &ConfigFile::built_in(),
        &sample_scans::region_violation(),
        &selection,
    );

    assert_eq!(view.cards.fail.len(), 1);
    assert_eq!(view.cards.fail[0].id, "region");
    assert!(view.cards.fail[0].is_expanded);
    assert!(!view.all_cards_collapsed);
}

#[test]
fn absent_scan_results_convert_to_empty() {
    let registries = compile_registries(&ConfigFile::built_in()).expect("config compiles");
    let mut converter = UnifiedResultConverter::new(&registries.rules, UuidGenerator);

    assert!(convert_scan_results_to_unified_rules(None).is_empty());
    assert!(converter.automated_checks_conversion(None).is_empty());
    assert!(converter.needs_review_conversion(None).is_empty());

    let decorator = ResultDecorator::new(&registries, StaticTitle::default());
    assert_eq!(decorator.decorate_results(None), None);
    assert_eq!(get_card_view_data(None, None, None), None);
}

#[test]
fn identical_scans_get_different_uids() {
    let engine = sample_scans::mixed();
    let config = ConfigFile::built_in();
    let selection = CardSelectionViewData::default();
    let (_, first, _) = pipeline(&config, &engine, &selection);
    let (_, second, _) = pipeline(&config, &engine, &selection);

    assert_eq!(first.len(), second.len());
    assert!(first.iter().zip(&second).all(|(a, b)| a.uid != b.uid));
}

#[test]
fn mixed_scan_outputs_match_schemas_and_naming() {
    let run = run_report(
        &ReportPlan {
            title: "Mixed".to_string(),
            mode: ConversionMode::Automated,
            selection: None,
        },
        &ConfigFile::built_in(),
        &serde_json::to_string(&sample_scans::mixed()).expect("serialize"),
        UuidGenerator,
    )
    .expect("report runs");

    validate_scan_results(&run.scan_results).expect("scan results match schema");
    validate_unified_scan_result(&run.unified).expect("unified result matches schema");
    validate_cards_view_model(&run.cards).expect("cards match schema");

    let unified = serde_json::to_value(&run.unified).expect("serialize");
    verify_camel_case_fields(&unified).expect("unified keys are camelCase");
    let cards = serde_json::to_value(&run.cards).expect("serialize");
    verify_camel_case_fields(&cards).expect("card keys are camelCase");
}

#[test]
fn mixed_scan_decoration_details() {
    let registries = compile_registries(&ConfigFile::built_in()).expect("config compiles");
    let decorator = ResultDecorator::new(&registries, StaticTitle("Mixed".to_string()));
    let scan = decorator
        .decorate_results(Some(&sample_scans::mixed()))
        .expect("engine present");

    assert_eq!(scan.timestamp, "2024-05-01T12:00:00.000Z");
    let contrast = scan
        .violations
        .iter()
        .find(|r| r.id == "color-contrast")
        .expect("color-contrast kept");
    assert_eq!(
        contrast.nodes[0].any[0].message,
        "Element has insufficient color contrast of 2.5 (foreground color: #aaaaaa, background color: #ffffff)"
    );

    let link = &scan.incomplete[0];
    assert_eq!(
        link.nodes[0].snippet.as_deref(),
        Some("Link name: Read more\nLink URL: https://example.com/post")
    );

    let results = UnifiedResultConverter::new(&registries.rules, UuidGenerator)
        .needs_review_conversion(Some(&scan));
    let ids: Vec<_> = results.iter().map(|r| r.rule_id.as_str()).collect();
    assert_eq!(
        ids,
        ["image-alt", "image-alt", "color-contrast", "link-purpose"]
    );

    let rules = convert_scan_results_to_unified_rules(Some(&scan));
    let envelope = build_unified_scan_result(&scan, rules, results);
    assert_eq!(envelope.target_app_info.name, "Mixed");
    assert_eq!(envelope.target_app_info.url, "https://example.com/mixed");
}

#[test]
fn configured_suppression_drops_matching_any_checks() {
    let engine = EngineScanBuilder::new()
        .violation("custom-rule")
        .node("div.a")
        .any_check("c1", "  Element is HIDDEN ", false)
        .done()
        .node("div.b")
        .any_check("c1", "Element is hidden", false)
        .all_check("c2", "Element is hidden", false)
        .done()
        .done()
        .build();

    let (_, results, _) = pipeline(
        &sample_configs::with_suppression(&["element is hidden"]),
        &engine,
        &CardSelectionViewData::default(),
    );

    // div.a loses its only check; div.b keeps its `all` check.
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].identifiers.identifier, "div.b");
    let fix = results[0].resolution.how_to_fix_web.as_ref().expect("fix");
    assert!(fix.any.is_empty());
    assert_eq!(fix.all, ["Element is hidden"]);
}
