use clap::Parser;

use super::Config;

fn parse(args: &[&str]) -> Config {
    Config::parse_from(args)
}

#[test]
fn defaults_are_valid() -> anyhow::Result<()> {
    let config = parse(&["kioskd"]);
    config.validate()?;
    assert_eq!(config.grpc_port, 8080);
    assert_eq!(config.session_lifetime_secs, 86400);
    assert_eq!(config.log_format, "text");
    Ok(())
}

#[test]
fn tls_without_cert_and_key_is_invalid() {
    let config = parse(&["kioskd", "--tls"]);
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("--tls-cert"));
}

#[test]
fn tls_with_cert_and_key_is_valid() -> anyhow::Result<()> {
    let config =
        parse(&["kioskd", "--tls", "--tls-cert", "cert.pem", "--tls-key", "key.pem"]);
    config.validate()?;
    Ok(())
}

#[test]
fn unknown_log_format_is_invalid() {
    let config = parse(&["kioskd", "--log-format", "xml"]);
    assert!(config.validate().is_err());
}

#[test]
fn session_lifetime_converts_seconds_to_duration() {
    let config = parse(&["kioskd", "--session-lifetime-secs", "60"]);
    assert_eq!(config.session_lifetime(), std::time::Duration::from_secs(60));
}
