use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use chainscript_types::{Schema, TypeTag};

/// Configuration for the ledger front end.
///
/// The server owns exactly one ledger, declared here. The default mirrors
/// the stock loans deployment: `Loans = (borrower: str, lender: str,
/// amount: float)` on the loopback interface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub ledger_name: String,
    pub schema: Schema,
    pub export_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let schema = Schema::new([
            ("borrower".to_string(), TypeTag::Str),
            ("lender".to_string(), TypeTag::Str),
            ("amount".to_string(), TypeTag::Float),
        ])
        .unwrap_or_else(|_| Schema::empty());

        Self {
            bind_addr: "127.0.0.1:9973".parse().unwrap_or_else(|_| {
                SocketAddr::from(([127, 0, 0, 1], 9973))
            }),
            ledger_name: "Loans".to_string(),
            schema,
            export_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:9973".parse::<SocketAddr>().unwrap());
        assert_eq!(c.ledger_name, "Loans");
        assert_eq!(c.schema.len(), 3);
        assert_eq!(c.schema.tag_of("amount"), Some(TypeTag::Float));
        assert_eq!(c.export_dir, PathBuf::from("."));
    }

    #[test]
    fn serde_roundtrip() {
        let c = ServerConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let parsed: ServerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.ledger_name, c.ledger_name);
        assert_eq!(parsed.bind_addr, c.bind_addr);
    }
}
