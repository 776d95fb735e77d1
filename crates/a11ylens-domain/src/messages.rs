//! Attach configured pass/fail messages to check results.

use a11ylens_types::CheckResult;

use crate::rules::CompiledRule;

/// Return copies of `checks` with configured messages applied.
///
/// A check keeps its engine-supplied message when the rule or check has no
/// configuration, or when the configuration has no message for the check's
/// outcome.
pub fn add_messages_to_checks(
    checks: &[CheckResult],
    rule: Option<&CompiledRule>,
) -> Vec<CheckResult> {
    checks
        .iter()
        .map(|check| {
            let configured = rule.and_then(|r| r.check(&check.id)).and_then(|cfg| {
                if check.result {
                    cfg.pass_message(&check.data)
                } else {
                    cfg.fail_message(&check.data)
                }
            });

            match configured {
                Some(message) => CheckResult {
                    message,
                    ..check.clone()
                },
                None => check.clone(),
            }
        })
        .collect()
}
