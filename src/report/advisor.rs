//! Qualitative report for the `advise` command.

use crate::types::config::{Thresholds, ENTROPY_MAX_FILES, GOD_MODULE_THRESHOLD};
use crate::types::report::AnalysisResult;

struct Zone<'a> {
    file: &'a str,
    function: &'a str,
    line: usize,
    acl: f64,
    loc: usize,
}

fn hallucination_zones<'a>(result: &'a AnalysisResult, thresholds: &Thresholds) -> Vec<Zone<'a>> {
    let red = thresholds.acl_red;
    let mut zones: Vec<Zone> = result
        .file_results
        .iter()
        .flat_map(|file| {
            file.function_metrics
                .iter()
                .filter(move |metric| metric.acl > red)
                .map(move |metric| Zone {
                    file: &file.file,
                    function: &metric.name,
                    line: metric.start_line,
                    acl: metric.acl,
                    loc: metric.loc,
                })
        })
        .collect();
    zones.sort_by(|left, right| right.acl.total_cmp(&left.acl));
    zones
}

pub fn advisor_report(result: &AnalysisResult, thresholds: &Thresholds) -> String {
    let mut output = String::from("# 🧠 Agent Advisor Report\n\n");
    output.push_str(&format!(
        "Profile `{}` scored {:.1}/100.\n\n",
        result.profile, result.final_score
    ));

    output.push_str("## 🌀 Hallucination Zones\n\n");
    let zones = hallucination_zones(result, thresholds);
    if zones.is_empty() {
        output.push_str(&format!(
            "No functions exceed ACL {:.0}. Agents can reason about every unit.\n\n",
            thresholds.acl_red
        ));
    } else {
        output.push_str(&format!(
            "Functions above ACL {:.0} are likely to be misread or rewritten incorrectly.\n\n",
            thresholds.acl_red
        ));
        output.push_str("| File | Function | Line | ACL | LOC |\n");
        output.push_str("| :--- | :--- | ---: | ---: | ---: |\n");
        for zone in &zones {
            output.push_str(&format!(
                "| {} | `{}` | {} | {:.1} | {} |\n",
                zone.file, zone.function, zone.line, zone.acl, zone.loc
            ));
        }
        output.push('\n');
    }

    output.push_str("## 🏛️ God Modules\n\n");
    let gods = &result.dep_analysis.god_modules;
    if gods.is_empty() {
        output.push_str(&format!(
            "No module is imported by more than {GOD_MODULE_THRESHOLD} files.\n\n"
        ));
    } else {
        output.push_str("| Module | Importers |\n| :--- | ---: |\n");
        for god in gods {
            output.push_str(&format!("| {} | {} |\n", god.file, god.in_degree));
        }
        output.push_str(
            "\nChanges here ripple through the codebase; split by responsibility.\n\n",
        );
    }

    output.push_str("## 📂 Crowded Directories\n\n");
    if result.crowded_directories.is_empty() {
        output.push_str(&format!(
            "No directory holds more than {ENTROPY_MAX_FILES} files.\n\n"
        ));
    } else {
        output.push_str("| Directory | Files |\n| :--- | ---: |\n");
        for (dir, count) in &result.crowded_directories {
            output.push_str(&format!("| {dir} | {count} |\n"));
        }
        output.push('\n');
    }

    output.push_str("## 🔁 Circular Dependencies\n\n");
    let cycles = &result.dep_analysis.cycles;
    if cycles.is_empty() {
        output.push_str("No import cycles detected.\n");
    } else {
        for cycle in cycles {
            let mut path = cycle.clone();
            if let Some(first) = cycle.first() {
                path.push(first.clone());
            }
            output.push_str(&format!("- {}\n", path.join(" → ")));
        }
    }
    output
}
