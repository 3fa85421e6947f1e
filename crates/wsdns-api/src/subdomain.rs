//! Provider-relative record names
//!
//! Websupport addresses records relative to the zone of the service, so the
//! challenge FQDN has to lose its base domain and TLD before it is sent.

/// Strip the last two labels (base domain + TLD) from `fqdn`.
///
/// Names with fewer than two labels are returned unchanged. A name with
/// exactly two labels is the zone apex and yields an empty string.
pub fn derive_subdomain(fqdn: &str) -> String {
    let labels: Vec<&str> = fqdn.split('.').collect();
    if labels.len() < 2 {
        return fqdn.to_string();
    }
    labels[..labels.len() - 2].join(".")
}

/// `_acme-challenge.<domain>`, the name certbot asks us to provision.
pub fn challenge_name(domain: &str) -> String {
    format!("_acme-challenge.{}", domain.trim_end_matches('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_subdomain_strips_base_domain() {
        assert_eq!(
            derive_subdomain("_acme-challenge.sub.example.com"),
            "_acme-challenge.sub"
        );
        assert_eq!(
            derive_subdomain("_acme-challenge.foo.bar.example.org"),
            "_acme-challenge.foo.bar"
        );
        assert_eq!(derive_subdomain("_acme-challenge.example.com"), "_acme-challenge");
    }

    #[test]
    fn test_derive_subdomain_boundaries() {
        // apex: both labels are stripped
        assert_eq!(derive_subdomain("a.b"), "");
        assert_eq!(derive_subdomain("localhost"), "localhost");
        assert_eq!(derive_subdomain(""), "");
    }

    #[test]
    fn test_challenge_name() {
        assert_eq!(challenge_name("example.com"), "_acme-challenge.example.com");
        assert_eq!(
            challenge_name("sub.example.com."),
            "_acme-challenge.sub.example.com"
        );
    }
}
