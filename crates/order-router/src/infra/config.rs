//! Router configuration, loaded from TOML.
//!
//! ```toml
//! max-hops = 3
//! max-iterations = 32
//!
//! [fees]
//! swap-fee-ppm = 3000
//! fee-receiver = "0x0200000000000000000000009008d19f58aabd9ed0d60971565aa8510560ab41"
//!
//! [gas]
//! gas-per-hop = 100000
//! base-gas = 21000
//! gas-price = "30000000000"
//! native-price = { numerator = "1", denominator = "1000000000000" }
//! ```

use {
    crate::domain::{
        aggregator::{Fees, Parameters},
        exchange::FeePpm,
        location::Location,
        path_finder::MAX_HOPS,
        quote::{GasParameters, Price},
    },
    anyhow::{Context, Result, ensure},
    number::serialization::{DecimalU256, HexU256},
    primitive_types::U256,
    serde::Deserialize,
    serde_with::serde_as,
    std::path::Path,
};

/// Validated router configuration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Config {
    pub parameters: Parameters,
    pub gas: GasParameters,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!(?path, "loading router configuration");
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path:?}"))?;
        Self::from_toml(&contents).with_context(|| format!("invalid config file {path:?}"))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: file::Config = toml::from_str(contents).context("failed to parse TOML")?;
        file.try_into()
    }
}

impl TryFrom<file::Config> for Config {
    type Error = anyhow::Error;

    fn try_from(file: file::Config) -> Result<Self> {
        ensure!(
            (1..=MAX_HOPS).contains(&file.max_hops),
            "max-hops must be between 1 and {MAX_HOPS}, got {}",
            file.max_hops
        );
        ensure!(file.max_iterations > 0, "max-iterations must be positive");

        let fee = FeePpm::new(file.fees.swap_fee_ppm).with_context(|| {
            format!(
                "swap-fee-ppm must be below {}, got {}",
                FeePpm::DENOMINATOR,
                file.fees.swap_fee_ppm
            )
        })?;
        let receiver = match file.fees.fee_receiver {
            Some(word) => Location::decode(word).context("invalid fee-receiver")?,
            None => Location::default(),
        };

        let native_price = file.gas.native_price;
        ensure!(
            !native_price.denominator.is_zero(),
            "native-price denominator must be non-zero"
        );

        Ok(Self {
            parameters: Parameters {
                max_hops: file.max_hops,
                max_iterations: file.max_iterations,
                fees: Fees { fee, receiver },
            },
            gas: GasParameters {
                gas_per_hop: file.gas.gas_per_hop,
                base_gas: file.gas.base_gas,
                gas_price: file.gas.gas_price,
                native_price: Price {
                    numerator: native_price.numerator,
                    denominator: native_price.denominator,
                },
            },
        })
    }
}

/// The on-disk shape.
mod file {
    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "kebab-case", deny_unknown_fields)]
    pub struct Config {
        #[serde(default = "default_max_hops")]
        pub max_hops: usize,
        #[serde(default = "default_max_iterations")]
        pub max_iterations: usize,
        #[serde(default)]
        pub fees: Fees,
        #[serde(default)]
        pub gas: Gas,
    }

    #[serde_as]
    #[derive(Debug, Default, Deserialize)]
    #[serde(rename_all = "kebab-case", deny_unknown_fields)]
    pub struct Fees {
        #[serde(default)]
        pub swap_fee_ppm: u32,
        /// Packed location word; an external zero address when unset.
        #[serde_as(as = "Option<HexU256>")]
        #[serde(default)]
        pub fee_receiver: Option<U256>,
    }

    #[serde_as]
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "kebab-case", deny_unknown_fields)]
    pub struct Gas {
        #[serde(default = "default_gas_per_hop")]
        pub gas_per_hop: u64,
        #[serde(default)]
        pub base_gas: u64,
        #[serde_as(as = "DecimalU256")]
        #[serde(default)]
        pub gas_price: U256,
        #[serde(default)]
        pub native_price: NativePrice,
    }

    #[serde_as]
    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct NativePrice {
        #[serde_as(as = "DecimalU256")]
        pub numerator: U256,
        #[serde_as(as = "DecimalU256")]
        pub denominator: U256,
    }

    impl Default for Gas {
        fn default() -> Self {
            Self {
                gas_per_hop: default_gas_per_hop(),
                base_gas: 0,
                gas_price: U256::zero(),
                native_price: NativePrice::default(),
            }
        }
    }

    impl Default for NativePrice {
        fn default() -> Self {
            Self {
                numerator: U256::one(),
                denominator: U256::one(),
            }
        }
    }

    fn default_max_hops() -> usize {
        Parameters::default().max_hops
    }

    fn default_max_iterations() -> usize {
        Parameters::default().max_iterations
    }

    fn default_gas_per_hop() -> u64 {
        GasParameters::default().gas_per_hop
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::domain::eth,
        hex_literal::hex,
        primitive_types::H160,
        std::io::Write,
    };

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn parses_every_field() {
        let config = Config::from_toml(
            r#"
            max-hops = 2
            max-iterations = 8

            [fees]
            swap-fee-ppm = 3000
            fee-receiver = "0x0200000000000000000000009008d19f58aabd9ed0d60971565aa8510560ab41"

            [gas]
            gas-per-hop = 90000
            base-gas = 21000
            gas-price = "30000000000"
            native-price = { numerator = "1", denominator = "1000000000000" }
            "#,
        )
        .unwrap();

        assert_eq!(config.parameters.max_hops, 2);
        assert_eq!(config.parameters.max_iterations, 8);
        assert_eq!(config.parameters.fees.fee, FeePpm::new(3_000).unwrap());
        assert_eq!(
            config.parameters.fees.receiver,
            Location::InternalAccount(eth::Address(H160(hex!(
                "9008d19f58aabd9ed0d60971565aa8510560ab41"
            ))))
        );
        assert_eq!(config.gas.gas_per_hop, 90_000);
        assert_eq!(config.gas.base_gas, 21_000);
        assert_eq!(config.gas.gas_price, U256::from(30_000_000_000_u64));
        assert_eq!(
            config.gas.native_price.denominator,
            U256::from(1_000_000_000_000_u64)
        );
    }

    #[test]
    fn rejects_invalid_values() {
        for toml in [
            "max-hops = 0",
            "max-hops = 4",
            "max-iterations = 0",
            "unknown = 1",
            "[fees]\nswap-fee-ppm = 1000000",
            "[fees]\nfee-receiver = \"0x07\"",
            "[gas]\nnative-price = { numerator = \"1\", denominator = \"0\" }",
            "[gas]\ngas-price = \"1.5\"",
        ] {
            assert!(Config::from_toml(toml).is_err(), "{toml:?}");
        }
    }

    #[test]
    fn max_hops_is_bounded_by_the_search_limit() {
        assert_eq!(Config::default().parameters.max_hops, MAX_HOPS);
        assert!(Config::from_toml(&format!("max-hops = {MAX_HOPS}")).is_ok());
        assert!(Config::from_toml(&format!("max-hops = {}", MAX_HOPS + 1)).is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max-iterations = 4").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.parameters.max_iterations, 4);
        assert!(Config::load(Path::new("/does/not/exist.toml")).is_err());
    }
}
