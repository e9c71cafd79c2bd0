use thiserror::Error;

/// Rejected [`DisasmConfig`](crate::DisasmConfig) values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ConfigError {
    /// Instruction words must start on even addresses.
    #[error("load address {0:03X} is not word aligned")]
    UnalignedLoadAddress(u16),
    /// The load address does not fit the 12-bit CHIP-8 address space.
    #[error("load address {0:X} is outside the 12-bit address space")]
    LoadAddressOutOfRange(u16),
}

#[cfg(test)]
mod tests {
    use super::ConfigError;

    #[test]
    fn messages_name_the_address() {
        assert_eq!(
            ConfigError::UnalignedLoadAddress(0x201).to_string(),
            "load address 201 is not word aligned"
        );
        assert_eq!(
            ConfigError::LoadAddressOutOfRange(0x1000).to_string(),
            "load address 1000 is outside the 12-bit address space"
        );
    }
}
