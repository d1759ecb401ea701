use clap::Parser;

use super::ConnectionArgs;

#[derive(Parser)]
struct Wrapper {
    #[command(flatten)]
    connection: ConnectionArgs,
}

#[test]
fn defaults_point_at_localhost_8080() {
    let wrapper = Wrapper::parse_from(["k"]);
    assert_eq!(wrapper.connection.server, "localhost");
    assert_eq!(wrapper.connection.port, 8080);
    assert_eq!(wrapper.connection.endpoint(), "http://localhost:8080");
    assert!(wrapper.connection.api_key.is_none());
    assert!(wrapper.connection.token.is_none());
}

#[test]
fn flags_override_defaults() {
    let wrapper = Wrapper::parse_from([
        "k",
        "--server",
        "kiosks.example.com",
        "--port",
        "9090",
        "--api-key",
        "key123",
        "--token",
        "tok456",
    ]);
    assert_eq!(wrapper.connection.endpoint(), "http://kiosks.example.com:9090");
    assert_eq!(wrapper.connection.api_key.as_deref(), Some("key123"));
    assert_eq!(wrapper.connection.token.as_deref(), Some("tok456"));
}
