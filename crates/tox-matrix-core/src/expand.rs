use std::collections::BTreeMap;

use crate::catalog::{runner_for, Platform, Strategy};
use crate::job::JobRecord;
use crate::versions::version_token;

/// Per-platform strategies; platforms without an entry are tested fully.
pub type Strategies = BTreeMap<Platform, Strategy>;

pub fn strategy_for(strategies: &Strategies, platform: &str) -> Strategy {
    Platform::parse(platform)
        .and_then(|p| strategies.get(&p).copied())
        .unwrap_or_default()
}

/// Name of the generated job for `version` on `platform`: `py<token>`, plus a
/// `-<platform>` suffix unless the platform is the implicit one.
pub fn matrix_job_name(version: &str, platform: &str) -> String {
    let token = version_token(version);
    if platform == Platform::default().as_str() {
        format!("py{token}")
    } else {
        format!("py{token}-{platform}")
    }
}

/// Cross product of `platforms` and `versions`, filtered by each platform's
/// strategy. Output order follows the inputs; duplicates are left for the
/// job set to reject.
pub fn expand(platforms: &[String], strategies: &Strategies, versions: &[&str]) -> Vec<JobRecord> {
    let last = versions.len().saturating_sub(1);
    let mut out = Vec::new();
    for platform in platforms {
        let strategy = strategy_for(strategies, platform);
        for (idx, version) in versions.iter().enumerate() {
            if strategy == Strategy::MinMax && idx != 0 && idx != last {
                continue;
            }
            out.push(JobRecord::new(
                matrix_job_name(version, platform),
                format!("tox -e py{}", version_token(version)),
                *version,
                runner_for(platform),
            ));
        }
    }
    out
}
