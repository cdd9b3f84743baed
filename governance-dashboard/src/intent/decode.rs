// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Minimal decoder of unsigned transactions, sufficient for extracting the destination
//! and the call data of whatever the backend has built for us.
//! Supports legacy (optionally EIP-155), EIP-2930 and EIP-1559 transactions.

use alloy_rlp::{Decodable, Header, EMPTY_LIST_CODE, EMPTY_STRING_CODE};
use gfp_governance_types::{Address, Bytes, U256};
use thiserror::Error;

const EIP2930_TX_TYPE: u8 = 0x01;
const EIP1559_TX_TYPE: u8 = 0x02;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("the transaction is not valid hex: {source}")]
    MalformedHex {
        #[from]
        source: hex::FromHexError,
    },

    #[error("the transaction is empty")]
    Empty,

    #[error("transaction type {0:#04x} is not supported")]
    UnsupportedType(u8),

    #[error("expected an rlp list")]
    NotAList,

    #[error("malformed rlp: {source}")]
    MalformedRlp {
        #[from]
        source: alloy_rlp::Error,
    },

    #[error("found {0} unexpected bytes after the transaction")]
    TrailingBytes(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxType {
    Legacy,
    Eip2930,
    Eip1559,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTransaction {
    pub tx_type: TxType,
    pub chain_id: Option<u64>,
    pub nonce: u64,
    pub gas_limit: u64,
    /// `None` for contract creation.
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
}

/// Decodes a hex encoded (with or without the `0x` prefix) unsigned transaction.
pub fn decode_unsigned_tx(raw: &str) -> Result<DecodedTransaction, DecodeError> {
    let trimmed = raw.trim();
    let bytes = hex::decode(trimmed.strip_prefix("0x").unwrap_or(trimmed))?;
    DecodedTransaction::decode(&bytes)
}

fn list_payload<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8], DecodeError> {
    let header = Header::decode(buf)?;
    if !header.list {
        return Err(DecodeError::NotAList);
    }
    if buf.len() < header.payload_length {
        return Err(alloy_rlp::Error::InputTooShort.into());
    }
    let (payload, rest) = buf.split_at(header.payload_length);
    *buf = rest;
    Ok(payload)
}

fn decode_destination(buf: &mut &[u8]) -> Result<Option<Address>, DecodeError> {
    if buf.first() == Some(&EMPTY_STRING_CODE) {
        *buf = &buf[1..];
        return Ok(None);
    }
    Ok(Some(Address::decode(buf)?))
}

fn skip_access_list(buf: &mut &[u8]) -> Result<(), DecodeError> {
    list_payload(buf).map(|_| ())
}

impl DecodedTransaction {
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        let first = *raw.first().ok_or(DecodeError::Empty)?;
        let mut buf = raw;

        let decoded = if first >= EMPTY_LIST_CODE {
            Self::decode_legacy(&mut buf)?
        } else {
            buf = &buf[1..];
            match first {
                EIP2930_TX_TYPE => Self::decode_eip2930(&mut buf)?,
                EIP1559_TX_TYPE => Self::decode_eip1559(&mut buf)?,
                other => return Err(DecodeError::UnsupportedType(other)),
            }
        };

        if !buf.is_empty() {
            return Err(DecodeError::TrailingBytes(buf.len()));
        }
        Ok(decoded)
    }

    // nonce, gasPrice, gasLimit, to, value, data, [v, r, s]
    fn decode_legacy(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        let mut fields = list_payload(buf)?;

        let nonce = u64::decode(&mut fields)?;
        let _gas_price = U256::decode(&mut fields)?;
        let gas_limit = u64::decode(&mut fields)?;
        let to = decode_destination(&mut fields)?;
        let value = U256::decode(&mut fields)?;
        let input = Bytes::decode(&mut fields)?;

        let chain_id = if fields.is_empty() {
            None
        } else {
            let v = u64::decode(&mut fields)?;
            let r = U256::decode(&mut fields)?;
            let s = U256::decode(&mut fields)?;
            if r.is_zero() && s.is_zero() {
                // EIP-155 signing payload
                Some(v)
            } else if v >= 35 {
                Some((v - 35) / 2)
            } else {
                None
            }
        };

        Ok(DecodedTransaction {
            tx_type: TxType::Legacy,
            chain_id,
            nonce,
            gas_limit,
            to,
            value,
            input,
        })
    }

    // chainId, nonce, gasPrice, gasLimit, to, value, data, accessList, [signature]
    fn decode_eip2930(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        let mut fields = list_payload(buf)?;

        let chain_id = u64::decode(&mut fields)?;
        let nonce = u64::decode(&mut fields)?;
        let _gas_price = U256::decode(&mut fields)?;
        let gas_limit = u64::decode(&mut fields)?;
        let to = decode_destination(&mut fields)?;
        let value = U256::decode(&mut fields)?;
        let input = Bytes::decode(&mut fields)?;
        skip_access_list(&mut fields)?;

        Ok(DecodedTransaction {
            tx_type: TxType::Eip2930,
            chain_id: Some(chain_id),
            nonce,
            gas_limit,
            to,
            value,
            input,
        })
    }

    // chainId, nonce, maxPriorityFeePerGas, maxFeePerGas, gasLimit, to, value, data, accessList, [signature]
    fn decode_eip1559(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        let mut fields = list_payload(buf)?;

        let chain_id = u64::decode(&mut fields)?;
        let nonce = u64::decode(&mut fields)?;
        let _max_priority_fee_per_gas = U256::decode(&mut fields)?;
        let _max_fee_per_gas = U256::decode(&mut fields)?;
        let gas_limit = u64::decode(&mut fields)?;
        let to = decode_destination(&mut fields)?;
        let value = U256::decode(&mut fields)?;
        let input = Bytes::decode(&mut fields)?;
        skip_access_list(&mut fields)?;

        Ok(DecodedTransaction {
            tx_type: TxType::Eip1559,
            chain_id: Some(chain_id),
            nonce,
            gas_limit,
            to,
            value,
            input,
        })
    }
}
