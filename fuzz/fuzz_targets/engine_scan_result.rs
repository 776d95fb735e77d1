//! Feeds arbitrary bytes through engine JSON parsing and the whole pipeline.
//!
//! Checks the invariants that must hold for any parseable input: decoration
//! never grows a rule, unified rules are unique, and every non-inapplicable
//! card status holds one card per rule.

#![no_main]

use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;

use a11ylens_core::{
    ResultDecorator, StaticTitle, UnifiedResultConverter, convert_scan_results_to_unified_rules,
    get_card_view_data,
};
use a11ylens_domain::compile_registries;
use a11ylens_types::{
    Bucket, CardRuleResultStatus, CardSelectionViewData, ConfigFile, ConversionMode,
    EngineScanResult,
};

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let Ok(engine) = serde_json::from_slice::<EngineScanResult>(data) else {
        return;
    };

    let registries = compile_registries(&ConfigFile::built_in()).expect("built-in config compiles");
    let decorator = ResultDecorator::new(&registries, StaticTitle("fuzz".to_string()));
    let Some(scan) = decorator.decorate_results(Some(&engine)) else {
        panic!("decoration of a present result must produce output");
    };

    for bucket in Bucket::ALL {
        assert!(scan.bucket(bucket).len() <= engine.bucket(bucket).len());
    }

    let rules = convert_scan_results_to_unified_rules(Some(&scan));
    let unique: HashSet<&str> = rules.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(unique.len(), rules.len());

    let mut counter = 0u64;
    for mode in [ConversionMode::Automated, ConversionMode::NeedsReview] {
        let results = UnifiedResultConverter::new(&registries.rules, || {
            counter += 1;
            format!("uid-{counter}")
        })
        .convert(Some(&scan), mode);

        let selection = CardSelectionViewData::default();
        let view = get_card_view_data(Some(&rules[..]), Some(&results[..]), Some(&selection))
            .expect("all inputs present");
        assert!(view.all_cards_collapsed);

        for status in CardRuleResultStatus::ALL {
            let cards = view.cards.get(status);
            let ids: HashSet<&str> = cards.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids.len(), cards.len());
        }
    }
});
