//! Connection string dialects.
//!
//! A dialect pairs an alias table with the set of keywords it recognizes.
//! Different layers use different dialects over the same scanner: the ORM
//! connection string names a provider and its metadata, while the provider's
//! own connection string speaks the storage dialect.
//!
//! The built-in dialects are initialized once on first use and never change.
//!
//! ```rust
//! use connstr_parse::Dialect;
//!
//! let parsed = Dialect::sql_server()
//!     .parse("Server=.;Database=Northwind;Trusted_Connection=yes")
//!     .unwrap();
//! assert_eq!(parsed.get("data source"), Some(Some(".")));
//! assert_eq!(parsed.get("initial catalog"), Some(Some("Northwind")));
//! assert_eq!(parsed.get("integrated security"), Some(Some("yes")));
//!
//! assert!(Dialect::entity().parse("Server=.").is_err());
//! ```

use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::assembler::{ParsedPairs, parse};
use crate::error::{ConnStrError, ConnStrResult, SyntaxError};
use crate::keywords::{AliasTable, RecognizedSet};

/// Keywords of the ORM connection dialect.
pub mod entity {
    /// Named connection to load instead of this string.
    pub const NAME: &str = "name";
    /// Metadata artifact locations.
    pub const METADATA: &str = "metadata";
    /// Invariant name of the storage provider.
    pub const PROVIDER: &str = "provider";
    /// Connection string handed to the storage provider.
    pub const PROVIDER_CONNECTION_STRING: &str = "provider connection string";

    pub(super) const KEYWORDS: [&str; 4] = [NAME, METADATA, PROVIDER, PROVIDER_CONNECTION_STRING];
}

/// Keywords of the SQL Server storage dialect.
pub mod sql_server {
    pub const APPLICATION_NAME: &str = "application name";
    pub const DATA_SOURCE: &str = "data source";
    pub const INITIAL_CATALOG: &str = "initial catalog";
    pub const INTEGRATED_SECURITY: &str = "integrated security";
    pub const PASSWORD: &str = "password";
    pub const USER_ID: &str = "user id";

    pub(super) const KEYWORDS: [&str; 33] = [
        APPLICATION_NAME,
        "applicationintent",
        "asynchronous processing",
        "attachdbfilename",
        "column encryption setting",
        "connect timeout",
        "connectretrycount",
        "connectretryinterval",
        "connection reset",
        "context connection",
        "current language",
        DATA_SOURCE,
        "encrypt",
        "enlist",
        "failover partner",
        INITIAL_CATALOG,
        INTEGRATED_SECURITY,
        "load balance timeout",
        "max pool size",
        "min pool size",
        "multipleactiveresultsets",
        "multisubnetfailover",
        "network library",
        "packet size",
        PASSWORD,
        "persist security info",
        "pooling",
        "replication",
        "transaction binding",
        "trustservercertificate",
        "type system version",
        USER_ID,
        "workstation id",
    ];

    pub(super) const ALIASES: [(&str, &str); 22] = [
        ("app", APPLICATION_NAME),
        ("async", "asynchronous processing"),
        ("extended properties", "attachdbfilename"),
        ("initial file name", "attachdbfilename"),
        ("connection timeout", "connect timeout"),
        ("timeout", "connect timeout"),
        ("language", "current language"),
        ("addr", DATA_SOURCE),
        ("address", DATA_SOURCE),
        ("network address", DATA_SOURCE),
        ("server", DATA_SOURCE),
        ("database", INITIAL_CATALOG),
        ("trusted_connection", INTEGRATED_SECURITY),
        ("connection lifetime", "load balance timeout"),
        ("net", "network library"),
        ("network", "network library"),
        ("pwd", PASSWORD),
        ("persistsecurityinfo", "persist security info"),
        ("uid", USER_ID),
        ("user", USER_ID),
        ("wsid", "workstation id"),
        ("trust server certificate", "trustservercertificate"),
    ];
}

static ENTITY: LazyLock<Dialect> = LazyLock::new(|| {
    Dialect::new(
        "entity",
        AliasTable::identity(),
        entity::KEYWORDS.into_iter().collect(),
    )
});

static SQL_SERVER: LazyLock<Dialect> = LazyLock::new(|| {
    Dialect::new(
        "sqlserver",
        sql_server::ALIASES.into_iter().collect(),
        sql_server::KEYWORDS.into_iter().collect(),
    )
});

static GENERIC: LazyLock<Dialect> =
    LazyLock::new(|| Dialect::new("generic", AliasTable::identity(), RecognizedSet::any()));

/// Alias table and recognized keywords for one kind of connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    name: SmolStr,
    aliases: AliasTable,
    recognized: RecognizedSet,
}

impl Dialect {
    /// Create a dialect.
    pub fn new(name: impl Into<SmolStr>, aliases: AliasTable, recognized: RecognizedSet) -> Self {
        Self {
            name: name.into(),
            aliases,
            recognized,
        }
    }

    /// The ORM connection dialect.
    pub fn entity() -> &'static Dialect {
        &ENTITY
    }

    /// The SQL Server storage dialect.
    pub fn sql_server() -> &'static Dialect {
        &SQL_SERVER
    }

    /// Any structurally valid keyword, no aliases.
    pub fn generic() -> &'static Dialect {
        &GENERIC
    }

    /// All built-in dialects.
    pub fn builtin() -> [&'static Dialect; 3] {
        [Self::entity(), Self::sql_server(), Self::generic()]
    }

    /// Look up a built-in dialect by name (case-insensitive).
    pub fn by_name(name: &str) -> ConnStrResult<&'static Dialect> {
        let wanted = name.trim().to_lowercase();
        let wanted = match wanted.as_str() {
            "mssql" | "sql server" | "sqlclient" => "sqlserver",
            other => other,
        };
        Self::builtin()
            .into_iter()
            .find(|d| d.name == wanted)
            .ok_or_else(|| ConnStrError::UnknownDialect(name.to_string()))
    }

    /// Dialect name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alias table.
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Recognized keywords.
    pub fn recognized(&self) -> &RecognizedSet {
        &self.recognized
    }

    /// Parse `input` with this dialect.
    pub fn parse(&self, input: &str) -> Result<ParsedPairs, SyntaxError> {
        parse(input, &self.aliases, &self.recognized)
    }
}

/// Serializable description of a custom dialect.
///
/// An empty `keywords` list accepts any structurally valid keyword.
///
/// ```toml
/// keywords = ["host", "port", "user"]
///
/// [aliases]
/// server = "host"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialectSpec {
    /// Canonical keywords.
    pub keywords: Vec<String>,
    /// Alias to canonical keyword.
    pub aliases: IndexMap<String, String>,
}

impl DialectSpec {
    /// Build the dialect.
    ///
    /// # Errors
    ///
    /// Fails when an alias points at a keyword outside a non-empty
    /// `keywords` list.
    pub fn into_dialect(self, name: impl Into<SmolStr>) -> ConnStrResult<Dialect> {
        let recognized = if self.keywords.is_empty() {
            RecognizedSet::any()
        } else {
            self.keywords.iter().map(|k| k.to_lowercase()).collect()
        };
        if let Some((alias, target)) = self
            .aliases
            .iter()
            .find(|(_, target)| !recognized.contains(&target.to_lowercase()))
        {
            return Err(ConnStrError::invalid_value(
                alias.as_str(),
                format!("alias target `{target}` is not a recognized keyword"),
            ));
        }
        let aliases = self
            .aliases
            .iter()
            .map(|(alias, target)| (alias.as_str(), target.to_lowercase()))
            .collect();
        Ok(Dialect::new(name, aliases, recognized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyntaxErrorKind;

    #[test]
    fn test_entity_dialect() {
        let parsed = Dialect::entity()
            .parse(r#"metadata=res://*/Model.csdl;provider=System.Data.SqlClient;provider connection string="Data Source=.;Initial Catalog=db""#)
            .unwrap();
        assert_eq!(parsed.get(entity::PROVIDER), Some(Some("System.Data.SqlClient")));
        assert_eq!(
            parsed.get(entity::PROVIDER_CONNECTION_STRING),
            Some(Some("Data Source=.;Initial Catalog=db"))
        );
    }

    #[test]
    fn test_entity_dialect_rejects_storage_keywords() {
        let err = Dialect::entity().parse("name=x;Server=.").unwrap_err();
        assert_eq!(err.kind(), SyntaxErrorKind::UnsupportedKeyword("server".to_string()));
        assert_eq!(err.offset(), 7);
    }

    #[test]
    fn test_sql_server_aliases() {
        let parsed = Dialect::sql_server()
            .parse("addr=host;uid=sa;pwd=secret;Timeout=30;APP=tool")
            .unwrap();
        assert_eq!(parsed.get(sql_server::DATA_SOURCE), Some(Some("host")));
        assert_eq!(parsed.get(sql_server::USER_ID), Some(Some("sa")));
        assert_eq!(parsed.get(sql_server::PASSWORD), Some(Some("secret")));
        assert_eq!(parsed.get("connect timeout"), Some(Some("30")));
        assert_eq!(parsed.get(sql_server::APPLICATION_NAME), Some(Some("tool")));
    }

    #[test]
    fn test_sql_server_aliases_point_at_keywords() {
        let dialect = Dialect::sql_server();
        for (alias, canonical) in dialect.aliases().iter() {
            assert!(
                dialect.recognized().contains(canonical),
                "alias {alias} points at unknown keyword {canonical}"
            );
        }
    }

    #[test]
    fn test_generic_accepts_anything() {
        let parsed = Dialect::generic().parse("whatever=1;Other Thing=2").unwrap();
        assert_eq!(parsed.get("other thing"), Some(Some("2")));
    }

    #[test]
    fn test_builtins_are_shared() {
        assert!(std::ptr::eq(Dialect::entity(), Dialect::entity()));
    }

    #[test]
    fn test_by_name() {
        assert_eq!(Dialect::by_name("Entity").unwrap().name(), "entity");
        assert_eq!(Dialect::by_name("mssql").unwrap().name(), "sqlserver");
        assert_eq!(Dialect::by_name("generic").unwrap().name(), "generic");
        assert!(matches!(
            Dialect::by_name("oracle"),
            Err(ConnStrError::UnknownDialect(name)) if name == "oracle"
        ));
    }

    #[test]
    fn test_dialect_spec_from_toml() {
        let spec: DialectSpec = toml::from_str(
            r#"
            keywords = ["Host", "port"]

            [aliases]
            Server = "host"
            "#,
        )
        .unwrap();
        let dialect = spec.into_dialect("custom").unwrap();
        let parsed = dialect.parse("SERVER=db;port=5432").unwrap();
        assert_eq!(parsed.get("host"), Some(Some("db")));
        assert_eq!(parsed.get("port"), Some(Some("5432")));
        assert!(dialect.parse("user=x").is_err());
    }

    #[test]
    fn test_dialect_spec_rejects_dangling_alias() {
        let spec = DialectSpec {
            keywords: vec!["host".to_string()],
            aliases: [("server".to_string(), "hostname".to_string())]
                .into_iter()
                .collect(),
        };
        assert!(matches!(
            spec.into_dialect("custom"),
            Err(ConnStrError::InvalidValue { keyword, .. }) if keyword == "server"
        ));
    }

    #[test]
    fn test_empty_spec_is_open() {
        let dialect = DialectSpec::default().into_dialect("open").unwrap();
        assert!(dialect.recognized().is_open());
    }
}
