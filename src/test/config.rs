#[cfg(test)]
mod tests {
    use std::{io::Write, str::FromStr, time::Duration};

    use clap::Parser;
    use tempfile::NamedTempFile;

    use crate::{
        config::{Catalog, Config, ProviderMode},
        models::{CryptoAsset, Universe},
    };

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: Config,
    }

    fn catalog_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "group,id,name,symbol").unwrap();
        writeln!(file, "index,^GSPC,S&P 500,").unwrap();
        writeln!(file, "digest,SPY,,").unwrap();
        writeln!(file, "crypto,bitcoin,Bitcoin,BTC").unwrap();
        writeln!(file, "crypto,dogecoin,,").unwrap();
        writeln!(file, "bonds,TLT,iShares 20+ Year,").unwrap();
        file
    }

    #[test]
    fn default_catalog_has_builtin_tables() {
        let catalog = Catalog::default();

        assert_eq!(catalog.indexes().len(), 4);
        assert_eq!(catalog.indexes()[0].symbol(), "^GSPC");
        assert_eq!(catalog.digest()[0].symbol(), "SPY");
        assert_eq!(
            catalog.crypto_ids(),
            vec!["bitcoin", "ethereum", "solana", "ripple"]
        );
        assert_eq!(catalog.cryptos()[3].symbol(), "XRP");
    }

    #[test]
    fn from_csv_works() {
        let file = catalog_file();
        let catalog = Catalog::from_csv(file.path().to_str().unwrap()).unwrap();

        assert_eq!(catalog.indexes().len(), 1);
        assert_eq!(catalog.indexes()[0].name(), "S&P 500");
        assert_eq!(catalog.digest()[0].name(), "SPY");
        assert_eq!(catalog.cryptos().len(), 2);
        assert_eq!(catalog.cryptos()[0].symbol(), "BTC");
        assert_eq!(catalog.cryptos()[1].name(), "Dogecoin");
        assert_eq!(catalog.cryptos()[1].symbol(), "DOG");
    }

    #[test]
    fn from_csv_fails_on_missing_file() {
        assert!(Catalog::from_csv("/nonexistent/catalog.csv").is_err());
    }

    #[test]
    fn crypto_fallbacks_follow_the_id() {
        let asset = CryptoAsset::from_id("ripple");
        assert_eq!(asset.name(), "Ripple");
        assert_eq!(asset.symbol(), "RIP");
    }

    #[test]
    fn config_parses_from_args() {
        let file = catalog_file();
        let path = file.path().to_str().unwrap();

        let cli = TestCli::try_parse_from([
            "market-digest",
            "--mode",
            "MOCK",
            "--timeout",
            "3",
            "--catalog",
            path,
        ])
        .unwrap();

        assert_eq!(*cli.config.mode(), ProviderMode::Mock);
        assert_eq!(cli.config.request_timeout(), Duration::from_secs(3));
        assert_eq!(cli.config.load_catalog().unwrap().cryptos().len(), 2);
    }

    #[test]
    fn default_config_uses_builtin_catalog() {
        let config = Config::default();

        assert_eq!(*config.mode(), ProviderMode::Live);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.load_catalog().unwrap(), Catalog::default());
    }

    #[test]
    fn universe_names_parse() {
        assert_eq!(Universe::from_str("sp500").unwrap(), Universe::Sp500);
        assert_eq!(Universe::from_str("Nasdaq100").unwrap(), Universe::Nasdaq100);
        assert_eq!(Universe::Dow30.to_string(), "dow30");
        assert!(Universe::from_str("ftse").is_err());
    }
}
