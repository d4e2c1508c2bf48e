use formgate_vault::prelude::*;

fn setup_vault() -> Vault {
    Vault::builder()
        .derived_keys("deployment-secret", "deployment-salt")
        .and_then(|b| b.build())
        .expect("Vault setup failed")
}

fn sample_fields() -> Vec<SealedField> {
    vec![
        SealedField::new("nablarch_token", ["AbC23xyz"]),
        SealedField::new("hidden_submit_confirm", ["user.id=42", "mode=a|b"]),
        SealedField::new("nablarch_cbx_composite_vars", ["form.users"]),
    ]
}

#[test]
fn seal_then_unseal_reproduces_ordered_fields() {
    let vault = setup_vault();
    let fields = sample_fields();

    let sealed = HiddenCodec::seal(&vault, &fields).expect("seal failed");
    let restored = HiddenCodec::unseal(&vault, &sealed).expect("unseal failed");

    assert_eq!(fields, restored);
}

#[test]
fn sealed_value_is_field_safe() {
    let vault = setup_vault();
    let sealed = vault.seal_fields(&sample_fields()).unwrap();

    assert!(sealed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
}

#[test]
fn sealing_twice_yields_different_ciphertexts() {
    let vault = setup_vault();
    let fields = sample_fields();

    let a = vault.seal_fields(&fields).unwrap();
    let b = vault.seal_fields(&fields).unwrap();

    assert_ne!(a, b, "random nonces must differ per seal");
}

#[test]
fn flipped_byte_is_rejected() {
    let vault = setup_vault();
    let sealed = vault.seal_fields(&sample_fields()).unwrap();

    let mut payload = ProtectedPayload::<Aes>::from_field_value(&sealed).unwrap().to_vec();
    let last = payload.len() - 1;
    payload[last] ^= 0x01;
    let forged = ProtectedPayload::<Aes>::from(payload).to_field_value();

    let result = vault.unseal_fields(&forged);
    assert!(matches!(result, Err(VaultError::Decryption { .. })));
}

#[test]
fn garbage_text_is_an_encoding_error() {
    let vault = setup_vault();

    let result = vault.unseal_fields("not base64 at all!");
    assert!(matches!(result, Err(VaultError::Encoding { .. })));
}

#[test]
fn other_deployment_cannot_unseal() {
    let vault = setup_vault();
    let other = Vault::<Aes>::builder().derived_keys("other-secret", "deployment-salt").unwrap();
    let other = other.build().unwrap();

    let sealed = vault.seal_fields(&sample_fields()).unwrap();
    assert!(other.unseal_fields(&sealed).is_err());
}

#[test]
fn raw_key_and_chacha_are_supported() {
    let vault = Vault::<ChaCha>::builder().raw_key([7u8; 32]).build().unwrap();
    let fields = sample_fields();

    let sealed = vault.seal_fields(&fields).unwrap();
    assert_eq!(vault.unseal_fields(&sealed).unwrap(), fields);
}

#[test]
fn vault_is_usable_as_trait_object() {
    let codec: Box<dyn HiddenCodec> = Box::new(setup_vault());
    let sealed = codec.seal(&[]).unwrap();

    assert!(codec.unseal(&sealed).unwrap().is_empty());
}
