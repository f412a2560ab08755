use crate::{CheckItem, CheckReport, TrustStatus};

pub fn build_check_report(trust: TrustStatus, checks: Vec<CheckItem>) -> CheckReport {
    let trust_ok = !trust.require_signed_module || trust.module_signature_ok;
    let checks_ok = checks.iter().all(|c| c.status == "ok");
    let overall = if trust_ok && checks_ok {
        "ok"
    } else {
        "needs_attention"
    }
    .to_string();

    let mut recommendations = Vec::new();
    if !trust_ok {
        recommendations.push(
            "Run `layidrop trust init` and publish deploy/airdrop.module.sig next to the module."
                .to_string(),
        );
    }
    for check in &checks {
        if check.status == "ok" {
            continue;
        }
        match check.name.as_str() {
            "state-dir" => recommendations
                .push("Ensure `~/.config/layidrop` exists and is writable.".to_string()),
            "chain-state" => recommendations.push(
                "Run `layidrop accounts` once to initialize the simulated chain state."
                    .to_string(),
            ),
            "module" => recommendations.push(
                "Run `layidrop module validate` and fix the reported module errors.".to_string(),
            ),
            "manifest" => recommendations.push(
                "Fix the manifest referenced by the module; `layidrop tree build` must accept it."
                    .to_string(),
            ),
            "policy-file" => recommendations.push(
                "Fix or remove `~/.config/layidrop/policy.toml`; it must parse as TOML."
                    .to_string(),
            ),
            other => recommendations.push(format!("Resolve the failing `{}` check.", other)),
        }
    }

    CheckReport {
        overall,
        trust,
        checks,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trust(require: bool, sig_ok: bool) -> TrustStatus {
        TrustStatus {
            require_signed_module: require,
            trusted_key_count: 1,
            module_source: "layinton/airdrop-module".to_string(),
            module_signature_ok: sig_ok,
        }
    }

    fn ok_item(name: &str) -> CheckItem {
        CheckItem {
            name: name.to_string(),
            status: "ok".to_string(),
        }
    }

    #[test]
    fn all_ok_yields_no_recommendations() {
        let report = build_check_report(
            trust(true, true),
            vec![
                ok_item("state-dir"),
                ok_item("chain-state"),
                ok_item("module"),
                ok_item("manifest"),
                ok_item("policy-file"),
            ],
        );
        assert_eq!(report.overall, "ok");
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn unsigned_module_only_matters_when_required() {
        let report = build_check_report(trust(false, false), vec![ok_item("module")]);
        assert_eq!(report.overall, "ok");

        let report = build_check_report(trust(true, false), vec![ok_item("module")]);
        assert_eq!(report.overall, "needs_attention");
        assert!(report.recommendations[0].contains("trust init"));
    }

    #[test]
    fn failing_checks_map_to_recommendations() {
        let mut bad = ok_item("manifest");
        bad.status = "missing".to_string();
        let report = build_check_report(trust(false, false), vec![bad]);
        assert_eq!(report.overall, "needs_attention");
        assert!(report.recommendations[0].contains("tree build"));
    }

    #[test]
    fn state_dir_and_policy_failures_have_recommendations() {
        let mut dir = ok_item("state-dir");
        dir.status = "missing".to_string();
        let mut policy = ok_item("policy-file");
        policy.status = "invalid".to_string();
        let report = build_check_report(trust(false, false), vec![dir, policy]);
        assert_eq!(report.overall, "needs_attention");
        assert!(report.recommendations[0].contains(".config/layidrop"));
        assert!(report.recommendations[1].contains("policy.toml"));
    }
}
