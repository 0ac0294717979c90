//! DNS module tests.

use super::*;
use crate::initialization::init_resolver;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};

#[test]
fn test_no_connections_maps_to_no_nameservers() {
    let err = ResolveError::from(ResolveErrorKind::NoConnections);
    assert_eq!(DnsFailure::from(err), DnsFailure::NoNameservers);
}

#[test]
fn test_message_error_maps_to_other() {
    let err = ResolveError::from("request timed out");
    match DnsFailure::from(err) {
        DnsFailure::Other(msg) => assert!(msg.contains("request timed out")),
        other => panic!("expected Other, got {other:?}"),
    }
}

#[test]
fn test_failure_display() {
    assert_eq!(DnsFailure::NxDomain.to_string(), "no such domain");
    assert_eq!(DnsFailure::NoAnswer.to_string(), "no answer");
    assert_eq!(
        DnsFailure::NoNameservers.to_string(),
        "no nameservers available"
    );
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_resolve_a_success() {
    let probe = ResolverProbe::new(init_resolver());
    let ip = probe
        .resolve_a("google.com")
        .await
        .expect("google.com should resolve");
    assert!(ip.is_ipv4());
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_resolve_a_nonexistent_domain() {
    let probe = ResolverProbe::new(init_resolver());
    let result = probe
        .resolve_a("definitely-does-not-exist-12345.invalid")
        .await;
    assert_eq!(result, Err(DnsFailure::NxDomain));
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_resolve_mx_success() {
    let probe = ResolverProbe::new(init_resolver());
    let hosts = probe
        .resolve_mx("gmail.com")
        .await
        .expect("gmail.com should have MX records");
    assert!(!hosts.is_empty());
    for host in &hosts {
        assert!(host.contains('.'));
    }
}
