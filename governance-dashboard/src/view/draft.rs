// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use gfp_governance_types::NewProposalRequest;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

pub const TITLE_LENGTH: RangeInclusive<usize> = 6..=120;
pub const DESCRIPTION_LENGTH: RangeInclusive<usize> = 11..=400;
pub const NEW_VALUE: RangeInclusive<i64> = 0..=100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error(
        "the title must be between {} and {} characters long. got {length}",
        TITLE_LENGTH.start(),
        TITLE_LENGTH.end()
    )]
    InvalidTitleLength { length: usize },

    #[error(
        "the description must be between {} and {} characters long. got {length}",
        DESCRIPTION_LENGTH.start(),
        DESCRIPTION_LENGTH.end()
    )]
    InvalidDescriptionLength { length: usize },

    #[error(
        "the new value must be between {} and {}. got {value}",
        NEW_VALUE.start(),
        NEW_VALUE.end()
    )]
    NewValueOutOfRange { value: i64 },
}

/// Content of the new proposal form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDraft {
    pub title: String,
    pub description: String,
    pub new_value: i64,
}

impl ProposalDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>, new_value: i64) -> Self {
        ProposalDraft {
            title: title.into(),
            description: description.into(),
            new_value,
        }
    }

    /// Produces the backend request, provided all the fields are within their bounds.
    pub fn validate(&self) -> Result<NewProposalRequest, DraftError> {
        let length = self.title.chars().count();
        if !TITLE_LENGTH.contains(&length) {
            return Err(DraftError::InvalidTitleLength { length });
        }

        let length = self.description.chars().count();
        if !DESCRIPTION_LENGTH.contains(&length) {
            return Err(DraftError::InvalidDescriptionLength { length });
        }

        let new_value = u32::try_from(self.new_value)
            .ok()
            .filter(|_| NEW_VALUE.contains(&self.new_value))
            .ok_or(DraftError::NewValueOutOfRange {
                value: self.new_value,
            })?;

        Ok(NewProposalRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            new_value,
        })
    }
}
