use crate::analyze::acl::AclTier;
use crate::types::config::{Profile, PASS_THRESHOLD};
use crate::types::report::AnalysisResult;
use serde_json::{json, Value};

fn file_location(file: &str, line: Option<usize>) -> Value {
    let mut physical = json!({ "artifactLocation": { "uri": file } });
    if let Some(line) = line {
        physical["region"] = json!({ "startLine": line });
    }
    json!([{ "physicalLocation": physical }])
}

pub fn to_sarif(result: &AnalysisResult, profile: &Profile) -> Result<String, serde_json::Error> {
    let mut results = Vec::new();

    for file in &result.file_results {
        if !file.issues.is_empty() {
            results.push(json!({
                "ruleId": "file.score",
                "level": if f64::from(file.score) < PASS_THRESHOLD { "error" } else { "warning" },
                "message": { "text": format!("score {}/100: {}", file.score, file.issues) },
                "locations": file_location(&file.file, None),
            }));
        }
        for metric in &file.function_metrics {
            let level = match AclTier::classify(metric.acl, &profile.thresholds) {
                AclTier::Red => "error",
                AclTier::Yellow => "warning",
                AclTier::Green => continue,
            };
            results.push(json!({
                "ruleId": "function.acl",
                "level": level,
                "message": {
                    "text": format!("`{}` has agent cognitive load {:.1}", metric.name, metric.acl)
                },
                "locations": file_location(&file.file, Some(metric.start_line)),
            }));
        }
    }

    for issue in &result.project_issues {
        results.push(json!({
            "ruleId": "project.structure",
            "level": "warning",
            "message": { "text": issue },
        }));
    }

    let sarif = json!({
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION"),
                }
            },
            "results": results
        }]
    });

    serde_json::to_string_pretty(&sarif)
}
