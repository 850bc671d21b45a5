use migratify::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();
    assert_eq!(verifier.len(), 128);
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(verifier, generate_code_verifier());
}

#[test]
fn test_generate_code_challenge() {
    // RFC 7636 appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_generate_code_challenge_is_url_safe() {
    let challenge = generate_code_challenge(&generate_code_verifier());
    assert_eq!(challenge.len(), 43);
    assert!(!challenge.contains('=') && !challenge.contains('+') && !challenge.contains('/'));
}

#[test]
fn test_ellipsize() {
    assert_eq!(ellipsize("short", 10), "short");
    assert_eq!(ellipsize("a much longer text", 10), "a much ...");
}
