use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::model::{HOST, PORT};

pub static HOST_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[a-z0-9\-.]+$").unwrap());

/// Accepts or rejects a candidate preference value
pub trait Validator<T: ?Sized> {
    fn check(&self, value: &T) -> bool;
}

/// Host names made of ASCII letters, digits, `-` and `.`
#[derive(Debug, Clone, Copy, Default)]
pub struct HostValidator;

/// Whole numbers in `1..=65535`
#[derive(Debug, Clone, Copy, Default)]
pub struct PortValidator;

impl Validator<str> for HostValidator {
    fn check(&self, value: &str) -> bool {
        HOST_REGEX.is_match(value)
    }
}

impl Validator<Value> for HostValidator {
    fn check(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|host| Validator::<str>::check(self, host))
    }
}

impl Validator<f64> for PortValidator {
    fn check(&self, value: &f64) -> bool {
        value.fract() == 0.0 && *value > 0.0 && *value < 65536.0
    }
}

impl Validator<Value> for PortValidator {
    fn check(&self, value: &Value) -> bool {
        value.as_f64().is_some_and(|port| Validator::<f64>::check(self, &port))
    }
}

static HOST_VALIDATOR: HostValidator = HostValidator;
static PORT_VALIDATOR: PortValidator = PortValidator;

/// Validator for a stored field, `None` for fields without one
pub fn validator_for(field: &str) -> Option<&'static dyn Validator<Value>> {
    match field {
        HOST => Some(&HOST_VALIDATOR),
        PORT => Some(&PORT_VALIDATOR),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_port_bounds() {
        let port = PortValidator;
        assert!(!port.check(&0.0_f64));
        assert!(!port.check(&65536.0_f64));
        assert!(!port.check(&1.5_f64));
        assert!(!port.check(&-80.0_f64));
        assert!(!port.check(&f64::NAN));
        assert!(port.check(&1.0_f64));
        assert!(port.check(&65535.0_f64));
    }

    #[test]
    fn test_port_requires_number() {
        let port = PortValidator;
        assert!(port.check(&json!(8080)));
        assert!(port.check(&json!(8080.0)));
        assert!(!port.check(&json!("8080")));
        assert!(!port.check(&json!(null)));
        assert!(!port.check(&json!(1.5)));
    }

    #[test]
    fn test_host_pattern() {
        let host = HostValidator;
        assert!(host.check("proxy-zakupki-gov-ru.local"));
        assert!(host.check("LOCALHOST"));
        assert!(host.check("127.0.0.1"));
        assert!(!host.check(""));
        assert!(!host.check("bad host"));
        assert!(!host.check("host:8080"));
        assert!(!host.check("прокси.рф"));
    }

    #[test]
    fn test_host_requires_string() {
        let host = HostValidator;
        assert!(host.check(&json!("example.com")));
        assert!(!host.check(&json!(42)));
    }

    #[test]
    fn test_validator_lookup() {
        assert!(validator_for(HOST).unwrap().check(&json!("a.b")));
        assert!(validator_for(PORT).unwrap().check(&json!(80)));
        assert!(validator_for("Color").is_none());
    }
}
