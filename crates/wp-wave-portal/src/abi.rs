//! Solidity interface of the deployed WavePortal contract.

use alloy_primitives::U256;
use alloy_sol_types::sol;
use wp_api_types::RawWave;
use wp_chain_client::{ChainError, ChainResult};

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct Wave {
        address waver;
        string message;
        uint256 timestamp;
    }

    #[derive(Debug, PartialEq, Eq)]
    event NewWave(address indexed from, uint256 timestamp, string message);

    function getTotalWaves() external view returns (uint256);
    function getAllWaves() external view returns (Wave[] memory);
    function wave(string message) external;
}

pub(crate) fn to_u64(value: U256, field: &str) -> ChainResult<u64> {
    u64::try_from(value).map_err(|_| ChainError::Decode(format!("{field} {value} overflows u64")))
}

impl TryFrom<Wave> for RawWave {
    type Error = ChainError;

    fn try_from(wave: Wave) -> ChainResult<Self> {
        Ok(Self {
            waver: wave.waver.to_string(),
            timestamp: to_u64(wave.timestamp, "timestamp")?,
            message: wave.message,
        })
    }
}

impl TryFrom<NewWave> for RawWave {
    type Error = ChainError;

    fn try_from(event: NewWave) -> ChainResult<Self> {
        Ok(Self {
            waver: event.from.to_string(),
            timestamp: to_u64(event.timestamp, "timestamp")?,
            message: event.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use alloy_sol_types::SolCall;

    #[test]
    fn wave_struct_converts_to_raw_record() {
        let wave = Wave {
            waver: address!("00000000000000000000000000000000000000ab"),
            message: "hi".to_owned(),
            timestamp: U256::from(1_700_000_000u64),
        };

        let raw = RawWave::try_from(wave).expect("fits");

        assert!(raw.waver.eq_ignore_ascii_case("0x00000000000000000000000000000000000000ab"));
        assert_eq!(raw.timestamp, 1_700_000_000);
        assert_eq!(raw.message, "hi");
    }

    #[test]
    fn oversized_timestamp_is_a_decode_error() {
        let wave = Wave {
            waver: address!("00000000000000000000000000000000000000ab"),
            message: String::new(),
            timestamp: U256::MAX,
        };

        assert!(matches!(RawWave::try_from(wave), Err(ChainError::Decode(_))));
    }

    #[test]
    fn selectors_match_the_deployed_signatures() {
        assert_eq!(getTotalWavesCall::SIGNATURE, "getTotalWaves()");
        assert_eq!(getAllWavesCall::SIGNATURE, "getAllWaves()");
        assert_eq!(waveCall::SIGNATURE, "wave(string)");
    }
}
