// SPDX-License-Identifier: Apache-2.0

//! Proto ⇄ domain conversions. No business logic lives here — just field
//! mapping, the same split the teacher draws between `service.rs` and
//! `convert.rs`.

use std::collections::BTreeMap;

use kiosk_core::{CoreError, Kiosk, Sign};

use super::proto;

pub fn kiosk_to_proto(kiosk: &Kiosk) -> proto::Kiosk {
    proto::Kiosk {
        id: kiosk.id as i32,
        name: kiosk.name.clone(),
        attributes: kiosk.attributes.clone().into_iter().collect(),
    }
}

pub fn proto_to_kiosk_fields(kiosk: proto::Kiosk) -> (String, BTreeMap<String, String>) {
    (kiosk.name, kiosk.attributes.into_iter().collect())
}

pub fn sign_to_proto(sign: &Sign) -> proto::Sign {
    proto::Sign {
        id: sign.id as i32,
        name: sign.name.clone(),
        text: sign.text.clone(),
        image: sign.image.clone(),
    }
}

pub fn proto_to_sign_fields(sign: proto::Sign) -> (String, Option<String>, Option<Vec<u8>>) {
    (sign.name, sign.text, sign.image)
}

/// Convert a wire `int32` id into the core's `u32`, rejecting non-positive
/// values as malformed input.
pub fn require_positive_id(id: i32, field: &str) -> Result<u32, CoreError> {
    u32::try_from(id).map_err(|_| CoreError::invalid_argument(format!("{field} must be positive, got {id}")))
}

/// Map a [`CoreError`] onto the [`tonic::Status`] it should be surfaced
/// as, one-to-one with the three domain error kinds.
pub fn core_error_to_status(err: CoreError) -> tonic::Status {
    let code = match &err {
        CoreError::NotFound(_) => tonic::Code::NotFound,
        CoreError::InvalidArgument(_) => tonic::Code::InvalidArgument,
        CoreError::Internal(_) => tonic::Code::Internal,
    };
    tonic::Status::new(code, err.message().to_owned())
}

#[cfg(test)]
#[path = "convert_tests.rs"]
mod tests;
