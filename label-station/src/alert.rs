//! Operator-facing messages for failed print runs.

use std::fmt;

use zpl_printer::PrintError;

/// A short title and message shown to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub text: &'static str,
}

impl Alert {
    pub const NEED_IP: Alert = Alert {
        title: "Need IP",
        text: "Please input an IP",
    };

    pub const WRONG_IP: Alert = Alert {
        title: "Wrong IP",
        text: "Please input a valid/correct IP",
    };

    /// Alert for an error the operator can fix by changing the address
    pub fn for_error(err: &anyhow::Error) -> Option<Alert> {
        match err.downcast_ref::<PrintError>()? {
            PrintError::InvalidConfig(_) => Some(Self::NEED_IP),
            PrintError::Connection(_) | PrintError::InvalidAddress(_) => Some(Self::WRONG_IP),
            _ => None,
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_for_connection_error() {
        let err = anyhow::Error::new(PrintError::Connection("10.0.0.1:9100: refused".into()));
        assert_eq!(Alert::for_error(&err), Some(Alert::WRONG_IP));
    }

    #[test]
    fn test_alert_for_malformed_address() {
        let err = anyhow::Error::new(PrintError::InvalidAddress("10.0.0.1:abc".into()));
        assert_eq!(Alert::for_error(&err), Some(Alert::WRONG_IP));
    }

    #[test]
    fn test_alert_for_empty_host() {
        let err = anyhow::Error::new(PrintError::InvalidConfig("Printer address is empty".into()));
        assert_eq!(Alert::for_error(&err).unwrap().to_string(), "Need IP: Please input an IP");
    }

    #[test]
    fn test_no_alert_for_other_errors() {
        let err = anyhow::Error::new(PrintError::Write("broken pipe".into()));
        assert_eq!(Alert::for_error(&err), None);
        assert_eq!(Alert::for_error(&anyhow::anyhow!("other")), None);
    }
}
