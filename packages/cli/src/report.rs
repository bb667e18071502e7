use serde::Serialize;
use std::fmt;

/// Values produced by one command, printed as labelled lines or as JSON.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ciphertext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovered_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = [
            ("Encoded Public Key (ek)", &self.public_key),
            ("Encoded Private Key (dk)", &self.private_key),
            ("Encoded Encapsulated Value (c)", &self.ciphertext),
            ("Encoded Original Random Value (K)", &self.secret),
            ("Encoded Decapsulated Value (K)", &self.recovered_secret),
        ];

        for (label, value) in lines {
            if let Some(value) = value {
                writeln!(f, "{}: {}", label, value)?;
            }
        }

        match self.verified {
            Some(true) => writeln!(f, "Decapsulation successful!"),
            Some(false) => writeln!(f, "Decapsulation failed!"),
            None => Ok(()),
        }
    }
}
