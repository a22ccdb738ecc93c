//! Command line and environment configuration for the server.

use std::path::PathBuf;

use clap::Parser;

use crate::store::TableName;

/// The REST API server for the budget tracker and knowledge base.
///
/// Every option can also be set with the environment variable named in its help text.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File path to the application SQLite database. Records are kept in memory if not set.
    #[arg(long, env = "DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory containing an SSL certificate `cert.pem` and key `key.pem`.
    /// The server uses plain HTTP if not set.
    #[arg(long, env = "CERT_PATH")]
    pub cert_path: Option<PathBuf>,

    /// The table that holds budget transactions.
    #[arg(long, env = "TABLE_NAME", default_value = "BudgetTransactions")]
    pub table_name: TableName,

    /// The table that holds knowledge base notes.
    #[arg(
        long,
        env = "KNOWLEDGE_BASE_TABLE_NAME",
        default_value = "PersonalKnowledgeBase"
    )]
    pub knowledge_base_table_name: TableName,

    /// The table that published notifications are written to.
    #[arg(long, env = "NOTIFICATIONS_TABLE_NAME", default_value = "Notifications")]
    pub notifications_table_name: TableName,

    /// The topic that budget alerts are published to. Alerts are skipped if not set.
    #[arg(long, env = "SNS_TOPIC_ARN")]
    pub sns_topic_arn: Option<String>,

    /// Whether the send-alert function publishes anything. Only "true" (any case) enables it.
    #[arg(
        long,
        env = "SNS_ENABLED",
        default_value = "true",
        action = clap::ArgAction::Set,
        value_parser = parse_enabled_flag
    )]
    pub sns_enabled: bool,
}

/// Read a feature flag where "true" in any case is enabled and anything else is disabled.
fn parse_enabled_flag(value: &str) -> Result<bool, String> {
    Ok(value.trim().eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use crate::{Config, store::TableName};

    use super::parse_enabled_flag;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["server"]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.db_path, None);
        assert_eq!(config.cert_path, None);
        assert_eq!(
            config.table_name,
            TableName::new("BudgetTransactions").unwrap()
        );
        assert_eq!(
            config.knowledge_base_table_name,
            TableName::new("PersonalKnowledgeBase").unwrap()
        );
        assert_eq!(
            config.notifications_table_name,
            TableName::new("Notifications").unwrap()
        );
    }

    #[test]
    fn reads_arguments() {
        let config = Config::try_parse_from([
            "server",
            "--db-path",
            "records.db",
            "--port",
            "8080",
            "--table-name",
            "Transactions_test",
            "--sns-topic-arn",
            "arn:aws:sns:us-east-1:123456789012:budget",
            "--sns-enabled",
            "False",
        ])
        .unwrap();

        assert_eq!(config.db_path, Some(PathBuf::from("records.db")));
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.table_name,
            TableName::new("Transactions_test").unwrap()
        );
        assert_eq!(
            config.sns_topic_arn.as_deref(),
            Some("arn:aws:sns:us-east-1:123456789012:budget")
        );
        assert!(!config.sns_enabled);
    }

    #[test]
    fn rejects_invalid_table_name() {
        let result = Config::try_parse_from(["server", "--table-name", "no spaces allowed"]);

        assert!(result.is_err());
    }

    #[test]
    fn only_true_enables_flag() {
        assert_eq!(parse_enabled_flag("true"), Ok(true));
        assert_eq!(parse_enabled_flag("TRUE"), Ok(true));
        assert_eq!(parse_enabled_flag("True"), Ok(true));
        assert_eq!(parse_enabled_flag("false"), Ok(false));
        assert_eq!(parse_enabled_flag("1"), Ok(false));
        assert_eq!(parse_enabled_flag("yes"), Ok(false));
        assert_eq!(parse_enabled_flag(""), Ok(false));
    }
}
