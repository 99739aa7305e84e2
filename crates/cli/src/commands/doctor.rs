use serde::Serialize;
use storefront_core::config::{AppConfig, LoadOptions};
use storefront_core::{Catalog, ScoringEngine};

use crate::commands::{CommandResult, EXIT_CATALOG_FAILURE, EXIT_CONFIG_FAILURE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = exit_code_for(&report);

    if json_output {
        let output = serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
        return CommandResult { exit_code, output };
    }

    CommandResult { exit_code, output: render_human(&report) }
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });

            match Catalog::from_config(&config.catalog) {
                Ok(catalog) => {
                    checks.push(check_catalog(&catalog, &config));
                    checks.push(check_scoring(&catalog));
                }
                Err(error) => {
                    checks.push(DoctorCheck {
                        name: "catalog_load",
                        status: CheckStatus::Fail,
                        details: error.to_string(),
                    });
                    checks.push(skipped("scoring_invariants", "catalog did not load"));
                }
            }
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(skipped("catalog_load", "configuration did not load"));
            checks.push(skipped("scoring_invariants", "configuration did not load"));
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn skipped(name: &'static str, reason: &str) -> DoctorCheck {
    DoctorCheck {
        name,
        status: CheckStatus::Skipped,
        details: format!("skipped because {reason}"),
    }
}

fn check_catalog(catalog: &Catalog, config: &AppConfig) -> DoctorCheck {
    let source = config
        .catalog
        .path
        .as_ref()
        .map(|path| format!("`{}`", path.display()))
        .unwrap_or_else(|| "built-in demo catalog".to_string());

    if catalog.is_empty() {
        return DoctorCheck {
            name: "catalog_load",
            status: CheckStatus::Fail,
            details: format!("{source} contains no products"),
        };
    }

    DoctorCheck {
        name: "catalog_load",
        status: CheckStatus::Pass,
        details: format!(
            "{} products across {} categories from {source}",
            catalog.len(),
            catalog.list_categories().len()
        ),
    }
}

/// Self-similarity must be exactly one and every ranking must exclude the
/// selected product and respect the category split.
fn check_scoring(catalog: &Catalog) -> DoctorCheck {
    let engine = ScoringEngine::new();
    let calculator = engine.calculator();

    let violation = catalog.products().iter().find_map(|product| {
        if calculator.similarity(product, product) != 1.0 {
            return Some(format!("self-similarity of `{}` is not 1", product.id));
        }

        let recommendation = engine.get_recommendations(catalog, product.id.as_str());
        let similar_ok = recommendation
            .similar_products
            .iter()
            .all(|item| item.id != product.id && item.category == product.category);
        let cross_ok = recommendation
            .cross_category_products
            .iter()
            .all(|item| item.id != product.id && item.category != product.category);

        (!similar_ok || !cross_ok)
            .then(|| format!("ranking for `{}` violates the category split", product.id))
    });

    match violation {
        Some(details) => {
            DoctorCheck { name: "scoring_invariants", status: CheckStatus::Fail, details }
        }
        None => DoctorCheck {
            name: "scoring_invariants",
            status: CheckStatus::Pass,
            details: format!("rankings verified for {} products", catalog.len()),
        },
    }
}

fn exit_code_for(report: &DoctorReport) -> u8 {
    let failed = |name: &str| {
        report.checks.iter().any(|check| check.name == name && check.status == CheckStatus::Fail)
    };

    if failed("config_validation") {
        EXIT_CONFIG_FAILURE
    } else if failed("catalog_load") {
        EXIT_CATALOG_FAILURE
    } else if report.overall_status == CheckStatus::Fail {
        1
    } else {
        0
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
