/*!
 * Omen Utils
 * 
 * Normalização e formatação de endereços
 */

use ethereum_types::Address;
use std::str::FromStr;
use tiny_keccak::{Hasher, Keccak};

use crate::error::{Error, Result};

/// Calcula o hash Keccak-256 de dados
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut result = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut result);
    result
}

/// Converte um endereço textual para a forma canônica.
///
/// Aceita qualquer combinação de maiúsculas e minúsculas, com ou sem o prefixo `0x`.
/// Duas grafias do mesmo endereço resultam no mesmo valor.
pub fn normalize_address(raw: &str) -> Result<Address> {
    let trimmed = raw.trim();
    let hex_str = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    Address::from_str(hex_str).map_err(|e| Error::InvalidAddress(format!("{}: {}", raw, e)))
}

/// Formata um Address com checksum EIP-55
pub fn to_checksum_address(address: &Address) -> String {
    let lower = format!("{:x}", address);
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // Vetores do EIP-55
    const CHECKSUMMED: [&str; 4] = [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn checksum_matches_eip55_vectors() {
        for expected in CHECKSUMMED {
            let addr = normalize_address(&expected.to_lowercase()).unwrap();
            assert_eq!(to_checksum_address(&addr), expected);
        }
    }

    #[test]
    fn casing_does_not_change_identity() {
        let upper = normalize_address("0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED").unwrap();
        let lower = normalize_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        let mixed = normalize_address(CHECKSUMMED[0]).unwrap();
        let bare = normalize_address("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(lower, mixed);
        assert_eq!(mixed, bare);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let addr = normalize_address("  0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed\n").unwrap();
        assert_eq!(to_checksum_address(&addr), CHECKSUMMED[0]);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(normalize_address("0x1234"), Err(Error::InvalidAddress(_))));
        assert!(matches!(normalize_address(""), Err(Error::InvalidAddress(_))));
        assert!(matches!(
            normalize_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed00"),
            Err(Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn upper_case_prefix_is_accepted() {
        let addr = normalize_address("0X5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED").unwrap();
        assert_eq!(to_checksum_address(&addr), CHECKSUMMED[0]);
    }

    #[test]
    fn rejects_odd_length_and_inner_prefix() {
        assert!(matches!(
            normalize_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beae"),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(
            normalize_address("0x0x5aaeb6053f3e94c9b9a09f33669435e7ef1bea"),
            Err(Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn rejects_non_hex_digits() {
        let res = normalize_address("0xZZaeb6053f3e94c9b9a09f33669435e7ef1beaed");
        assert!(matches!(res, Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn keccak_of_empty_input() {
        let hash = keccak256(&[]);
        assert_eq!(hash[0], 0xc5);
        assert_eq!(hash[31], 0x70);
    }
}
