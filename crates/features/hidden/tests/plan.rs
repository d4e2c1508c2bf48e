use formgate_domain::config::{FormConfig, FormConfigInner};
use formgate_domain::form::FormState;
use formgate_domain::submission::{SubmissionInfo, SubmissionTarget};
use formgate_hidden::{plan, unpack};
use formgate_vault::prelude::*;

fn vault() -> Vault {
    Vault::builder().derived_keys("deployment-secret", "salt").and_then(|b| b.build()).unwrap()
}

fn config(encryption: bool, exempt: &[&str]) -> FormConfig {
    FormConfig::from(FormConfigInner {
        hidden_encryption: encryption,
        exempt_request_ids: exempt.iter().map(|s| (*s).to_owned()).collect(),
        ..FormConfigInner::default()
    })
}

fn form_targeting(request_ids: &[&str]) -> FormState {
    let mut form = FormState::new("f");
    for (i, id) in request_ids.iter().enumerate() {
        let target = SubmissionTarget::transition(format!("/app/{id}.do"));
        let mut info = SubmissionInfo::new(format!("s{i}"), (*id).to_owned(), target);
        info.extra_params.push(("p".to_owned(), format!("v{i}")));
        form.submissions.push(info);
        form.request_ids_involved.insert((*id).to_owned());
    }
    form.add_hidden("plain", "1");
    form.add_protected_hidden("secret", "2");
    form
}

fn names(fields: &[(String, String)]) -> Vec<&str> {
    fields.iter().map(|(n, _)| n.as_str()).collect()
}

#[test]
fn exempt_targets_only_keep_protected_fields_plain() {
    let form = form_targeting(&["R1"]);
    let out = plan(&form, &config(true, &["R1"]), &vault()).unwrap();

    assert_eq!(names(&out), ["nablarch_submit", "plain", "secret", "nablarch_hidden"]);
    let packed = unpack(&out[3].1).unwrap();
    assert_eq!(packed, [("hidden_submit_s0".to_owned(), "p=v0".to_owned())]);
}

#[test]
fn one_non_exempt_target_seals_every_sensitive_field() {
    let mut form = form_targeting(&["R1", "R2"]);
    form.set_token("tok");
    let codec = vault();
    let out = plan(&form, &config(true, &["R1"]), &codec).unwrap();

    assert_eq!(names(&out), ["nablarch_submit", "nablarch_hidden", "plain"]);
    let sealed = codec.unseal_fields(&out[1].1).unwrap();
    let sealed_names: Vec<_> = sealed.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(sealed_names, ["nablarch_token", "secret", "hidden_submit_s0", "hidden_submit_s1"]);
}

#[test]
fn disabled_encryption_packs_without_sealing() {
    let mut form = form_targeting(&["R2"]);
    form.set_token("t|k");
    let out = plan(&form, &config(false, &[]), &vault()).unwrap();

    assert_eq!(names(&out), ["nablarch_submit", "nablarch_hidden", "plain", "secret"]);
    assert_eq!(out[1].1, r"nablarch_token=t\|k|hidden_submit_s0=p\=v0");
}

#[test]
fn nothing_to_pack_emits_no_hidden_carrier() {
    let mut form = FormState::new("f");
    form.add_hidden("a", "1");
    form.post_resubmit_prevent = true;
    let out = plan(&form, &config(true, &[]), &vault()).unwrap();

    assert_eq!(
        out,
        [
            ("nablarch_submit".to_owned(), String::new()),
            ("a".to_owned(), "1".to_owned()),
            ("nablarch_post_resubmit_prevent".to_owned(), "true".to_owned()),
        ]
    );
}

#[test]
fn marker_follows_caller_protection_not_sealing() {
    let mut cfg = config(false, &[]);
    cfg.protection_marker = true;

    let out = plan(&form_targeting(&["R2"]), &cfg, &vault()).unwrap();
    assert_eq!(out.last().map(|(n, v)| (n.as_str(), v.as_str())), Some(("nablarch_hidden_protected", "")));

    let mut unprotected = FormState::new("g");
    unprotected.add_hidden("a", "1");
    let out = plan(&unprotected, &cfg, &vault()).unwrap();
    assert!(!names(&out).contains(&"nablarch_hidden_protected"));
}

#[test]
fn sealed_fields_sharing_a_name_merge_across_gaps() {
    let mut form = form_targeting(&["R2"]);
    form.add_protected_hidden("row", "a1");
    form.add_protected_hidden("other", "b");
    form.add_protected_hidden("row", "a2");
    let codec = vault();
    let out = plan(&form, &config(true, &[]), &codec).unwrap();

    let sealed = codec.unseal_fields(out.iter().find(|(n, _)| n == "nablarch_hidden").map(|(_, v)| v).unwrap()).unwrap();
    let rows: Vec<_> = sealed.iter().filter(|f| f.name == "row").collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].values, ["a1", "a2"]);
}
