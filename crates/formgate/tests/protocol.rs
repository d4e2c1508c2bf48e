use formgate::prelude::*;
use formgate::vault_from_config;

fn config(exempt: &[&str]) -> FormConfig {
    FormConfig::from(FormConfigInner {
        exempt_request_ids: exempt.iter().map(|s| (*s).to_owned()).collect(),
        ..FormConfigInner::default()
    })
}

/// What a browser posts back: every hidden field, the chosen submission and user input.
fn post(rendered: &RenderedForm, submit: &str, input: &[(&str, &str)]) -> RequestParams {
    let mut params: RequestParams = rendered
        .hidden_fields
        .iter()
        .filter(|(name, _)| name != "nablarch_submit")
        .map(|(n, v)| (n.as_str(), v.as_str()))
        .chain(input.iter().copied())
        .collect();
    params.append("nablarch_submit", submit);
    params
}

#[test]
fn sealed_form_round_trips_through_the_request_pipeline() {
    let cfg = config(&[]);
    let codec = vault_from_config(&cfg).unwrap();
    let mut page = RenderState::new(cfg.clone());

    page.open_form(Some("order")).unwrap();
    let token = page.issue_token().unwrap();
    let save = page.register_submission(Some("save"), SubmissionTarget::transition("/app/R2.do")).unwrap();
    formgate::features::submission::add_param(page.current_form().unwrap(), &save, "mode", "confirm").unwrap();
    page.current_form().unwrap().add_protected_hidden("order.price", "100");
    page.current_form().unwrap().add_hidden("order.note", "n");
    let rendered = page.close_form(&codec).unwrap();

    assert_eq!(rendered.hidden_fields[0].0, "nablarch_submit");
    let sealed = rendered.hidden_value("nablarch_hidden").unwrap();
    assert!(!sealed.contains('='));
    assert!(rendered.hidden_value("order.price").is_none(), "protected field must not travel in the clear");
    assert_eq!(rendered.hidden_value("order.note"), Some("n"));

    let mut params = decode_request(post(&rendered, "save", &[]), "R2", &cfg, &codec).unwrap();
    assert_eq!(params.first("mode"), Some("confirm"));
    assert_eq!(params.first("order.price"), Some("100"));
    verify_token(&mut params, &token).unwrap();
    assert!(!params.names().any(|n| n.starts_with("hidden_submit_") || n == "nablarch_hidden"));
}

#[test]
fn partition_boundary_follows_exemptions() {
    let cfg = config(&["R1"]);
    let codec = vault_from_config(&cfg).unwrap();

    let render = |uris: &[&str]| {
        let mut page = RenderState::new(cfg.clone());
        page.open_form(Some("f")).unwrap();
        for uri in uris {
            page.register_submission(None, SubmissionTarget::transition(*uri)).unwrap();
        }
        page.current_form().unwrap().add_protected_hidden("secret", "s");
        page.close_form(&codec).unwrap()
    };

    let exempt_only = render(&["/app/R1.do"]);
    assert_eq!(exempt_only.hidden_value("secret"), Some("s"));
    assert!(exempt_only.hidden_value("nablarch_hidden").is_none());

    let mixed = render(&["/app/R1.do", "/app/R2.do"]);
    assert!(mixed.hidden_value("secret").is_none());
    assert!(mixed.hidden_value("nablarch_hidden").is_some());
}

#[test]
fn forged_plain_pack_is_rejected_where_seal_is_required() {
    let cfg = config(&[]);
    let codec = vault_from_config(&cfg).unwrap();
    let params: RequestParams =
        [("nablarch_hidden", r"hidden_submit_go=role\=admin"), ("nablarch_submit", "go")].into_iter().collect();

    let err = decode_request(params, "R2", &cfg, &codec).unwrap_err();
    assert!(matches!(err, FormError::Hidden { .. }));
}

#[test]
fn composite_selection_survives_sealing_and_rejects_recombination() {
    let cfg = config(&[]);
    let codec = vault_from_config(&cfg).unwrap();
    let mut page = RenderState::new(cfg.clone());

    page.open_form(None).unwrap();
    page.register_submission(Some("pick"), SubmissionTarget::transition("/app/R3.do")).unwrap();
    page.register_composite(CompositeKeyField {
        var_name: "sel".to_owned(),
        key_names: vec!["key1".to_owned(), "key2".to_owned()],
        candidates: vec![vec!["v11".to_owned(), "v21".to_owned()], vec!["v12".to_owned(), "v22".to_owned()]],
    })
    .unwrap();
    let rendered = page.close_form(&codec).unwrap();
    assert_eq!(rendered.form_name, "nablarch_form1");
    assert!(rendered.hidden_fields.iter().all(|(n, _)| !n.starts_with("nablarch_cbx_")));

    let both = post(&rendered, "pick", &[("sel", "v11,v21"), ("sel", "v12,v22")]);
    let params = decode_request(both, "R3", &cfg, &codec).unwrap();
    assert_eq!(params.get("key1").unwrap(), ["v11", "v12"]);
    assert_eq!(params.get("key2").unwrap(), ["v21", "v22"]);

    let forged = post(&rendered, "pick", &[("sel", "v11,v22")]);
    let params = decode_request(forged, "R3", &cfg, &codec).unwrap();
    assert!(!params.contains("key1"));
}

#[test]
fn composite_variable_split_by_another_keeps_all_candidates() {
    let composite = |var: &str, row: [&str; 2]| CompositeKeyField {
        var_name: var.to_owned(),
        key_names: vec!["key1".to_owned(), "key2".to_owned()],
        candidates: vec![row.iter().map(|v| (*v).to_owned()).collect()],
    };

    for exempt in [&[][..], &["R2"][..]] {
        let cfg = config(exempt);
        let codec = vault_from_config(&cfg).unwrap();
        let mut page = RenderState::new(cfg.clone());

        page.open_form(Some("f")).unwrap();
        page.register_submission(Some("go"), SubmissionTarget::transition("/app/R2.do")).unwrap();
        page.register_composite(composite("a", ["1", "2"])).unwrap();
        page.register_composite(composite("b", ["5", "6"])).unwrap();
        page.register_composite(composite("a", ["3", "4"])).unwrap();
        let rendered = page.close_form(&codec).unwrap();

        let submitted = post(&rendered, "go", &[("a", "1,2"), ("a", "3,4")]);
        let params = decode_request(submitted, "R2", &cfg, &codec).unwrap();
        assert_eq!(params.get("key1").unwrap(), ["1", "3"], "exempt: {exempt:?}");
        assert_eq!(params.get("key2").unwrap(), ["2", "4"], "exempt: {exempt:?}");
    }
}

#[test]
fn descriptor_lists_disambiguated_submissions() {
    let cfg = config(&[]);
    let codec = vault_from_config(&cfg).unwrap();
    let mut page = RenderState::new(cfg);

    page.open_form(Some("f")).unwrap();
    for raw in ["x", "x", ""] {
        page.register_submission(Some(raw), SubmissionTarget::transition("/app/R1.do")).unwrap();
    }
    let rendered = page.close_form(&codec).unwrap();

    let descriptor: serde_json::Value = serde_json::from_str(&rendered.descriptor).unwrap();
    let names: Vec<_> = descriptor.as_object().unwrap().keys().cloned().collect();
    assert_eq!(names.len(), 3);
    for name in ["x", "f_2", "f_3"] {
        assert!(names.iter().any(|n| n == name), "missing {name}");
    }
    assert!(rendered.script.starts_with(r#"nablarch_submission_info["f"] = {"x":"#));
}

#[test]
fn form_lifecycle_errors() {
    let codec = vault_from_config(&FormConfig::default()).unwrap();
    let mut page = RenderState::new(FormConfig::default());

    assert!(matches!(page.current_form(), Err(FormError::MissingFormContext { .. })));
    assert!(page.try_current_form().is_none());
    assert!(matches!(page.close_form(&codec), Err(FormError::MissingFormContext { .. })));

    page.open_form(Some("a")).unwrap();
    assert!(matches!(page.open_form(Some("b")), Err(FormError::NestedForm { .. })));
    page.close_form(&codec).unwrap();

    assert!(matches!(page.open_form(Some("a")), Err(FormError::DuplicateFormName { .. })));
    assert_eq!(page.open_form(None).unwrap().form_name, "nablarch_form2");
}

#[test]
fn pages_do_not_share_state() {
    let mut first = RenderState::new(FormConfig::default());
    let mut second = RenderState::new(FormConfig::default());

    assert_eq!(first.open_form(None).unwrap().form_name, "nablarch_form1");
    assert_eq!(second.open_form(None).unwrap().form_name, "nablarch_form1");
}
