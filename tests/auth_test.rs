use migratify::spotify::auth::SpotifyAuthenticator;

#[test]
fn spotify_authorize_url_carries_the_pkce_challenge() {
    let authenticator = SpotifyAuthenticator::new(
        "client",
        "http://127.0.0.1:8888/callback",
        "user-library-modify playlist-modify-private",
        "https://accounts.test/authorize",
        "https://accounts.test/api/token",
    );

    let url = authenticator.authorize_url("challenge").unwrap();

    assert!(url.starts_with("https://accounts.test/authorize?client_id=client"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"));
    assert!(url.contains("code_challenge=challenge"));
    assert!(url.contains("code_challenge_method=S256"));
    assert!(url.contains("scope=user-library-modify+playlist-modify-private"));
}

#[test]
fn deezer_authorize_url_requests_the_configured_perms() {
    let authenticator = migratify::deezer::auth::DeezerAuthenticator::new(
        "42",
        "secret",
        "http://127.0.0.1:8888/callback",
        "basic_access,offline_access",
        "https://connect.test/oauth/auth.php",
        "https://connect.test/oauth/access_token.php",
    );

    let url = authenticator.authorize_url().unwrap();

    assert!(url.starts_with("https://connect.test/oauth/auth.php?app_id=42"));
    assert!(url.contains("perms=basic_access%2Coffline_access"));
    assert!(!url.contains("secret"));
}
