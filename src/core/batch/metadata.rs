//! Description of what a report contains

use serde_json::{Value, json};

/// Source of the report schema description returned by the metadata endpoint
pub trait ReportMetadataSource: Send + Sync + std::fmt::Debug {
    fn report_metadata(&self) -> Value;
}

/// Built-in description of the web and mail test categories
#[derive(Debug, Clone, Default)]
pub struct StaticReportMetadata;

impl ReportMetadataSource for StaticReportMetadata {
    fn report_metadata(&self) -> Value {
        json!({
            "web": {
                "name": "Website test",
                "categories": [
                    category("ipv6", "IPv6", &["web_ipv6_ns_address", "web_ipv6_ws_address", "web_ipv6_ws_similar"]),
                    category("dnssec", "DNSSEC", &["web_dnssec_exist", "web_dnssec_valid"]),
                    category("tls", "Secure connection (HTTPS)", &["web_https_http_available", "web_https_tls_version", "web_https_tls_ciphers", "web_https_cert_chain"]),
                    category("appsecpriv", "Security options", &["web_appsecpriv_x_frame_options", "web_appsecpriv_x_content_type_options", "web_appsecpriv_csp", "web_appsecpriv_referrer_policy"]),
                ],
            },
            "mail": {
                "name": "Email test",
                "categories": [
                    category("ipv6", "IPv6", &["mail_ipv6_ns_address", "mail_ipv6_mx_address"]),
                    category("dnssec", "DNSSEC", &["mail_dnssec_mailto_exist", "mail_dnssec_mailto_valid", "mail_dnssec_mx_exist", "mail_dnssec_mx_valid"]),
                    category("auth", "DMARC, DKIM and SPF", &["mail_auth_dmarc_exist", "mail_auth_dkim_exist", "mail_auth_spf_exist"]),
                    category("tls", "STARTTLS and DANE", &["mail_starttls_tls_available", "mail_starttls_tls_version", "mail_starttls_cert_chain", "mail_starttls_dane_valid"]),
                ],
            },
            "status": {
                "domain": ["waiting", "running", "done", "error", "cancelled"],
            },
        })
    }
}

fn category(key: &str, label: &str, tests: &[&str]) -> Value {
    json!({
        "key": key,
        "name": label,
        "tests": tests,
    })
}
