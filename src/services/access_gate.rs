//! 访问控制 - 共享静态密码
//!
//! 未配置密码时不做任何校验

use crate::config::Config;
use crate::error::AccessError;

#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    password: Option<String>,
}

impl AccessGate {
    pub fn new(password: Option<String>) -> Self {
        Self {
            password: password.filter(|p| !p.is_empty()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.app_password.clone())
    }

    /// 是否需要密码
    pub fn is_enabled(&self) -> bool {
        self.password.is_some()
    }

    /// 校验用户提供的密码
    pub fn verify(&self, supplied: Option<&str>) -> Result<(), AccessError> {
        let Some(expected) = &self.password else {
            return Ok(());
        };
        let supplied = supplied.ok_or(AccessError::PasswordRequired)?;

        if constant_time_eq(expected.as_bytes(), supplied.as_bytes()) {
            Ok(())
        } else {
            Err(AccessError::IncorrectPassword)
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_gate_accepts_anything() {
        let gate = AccessGate::new(None);
        assert!(!gate.is_enabled());
        assert!(gate.verify(None).is_ok());
        assert!(AccessGate::new(Some(String::new())).verify(None).is_ok());
    }

    #[test]
    fn test_password_checked() {
        let gate = AccessGate::new(Some("s3cret".to_string()));
        assert!(gate.verify(Some("s3cret")).is_ok());
        assert!(matches!(gate.verify(Some("s3cre")), Err(AccessError::IncorrectPassword)));
        assert!(matches!(gate.verify(Some("S3cret")), Err(AccessError::IncorrectPassword)));
        assert!(matches!(gate.verify(None), Err(AccessError::PasswordRequired)));
    }
}
